// Example: resolving a container through an ItemSource and reporting construction errors.
use collapsible::{Collapsible, CollapsibleConfig, Measure, StaticSource};

#[derive(Clone, Debug)]
struct Link {
    label: &'static str,
    width: f64,
}

impl Measure for Link {
    fn width(&self) -> f64 {
        self.width
    }
}

fn main() {
    let source = StaticSource::new().with_container(
        "#main-nav",
        vec![
            Link { label: "Home", width: 60.0 },
            Link { label: "Docs", width: 60.0 },
            Link { label: "Blog", width: 56.0 },
            Link { label: "Community", width: 110.0 },
        ],
    );

    let missing = CollapsibleConfig::new("#footer-nav", 16.0);
    if let Err(err) = Collapsible::new(&source, &missing.locator, missing.options()) {
        println!("{} ({})", err, err.code());
    }

    let cfg = CollapsibleConfig::new("#main-nav", 16.0);
    let Ok(mut c) = Collapsible::new(&source, &cfg.locator, cfg.options()) else {
        return;
    };
    c.build_mirror();
    if c.sync(220.0).is_ok() {
        for item in c.items() {
            let label = c.handle(item.index).map_or("?", |l| l.label);
            let place = if item.collapsed { "overflow" } else { "inline" };
            println!("{label}: {place}");
        }
    }
}
