use collapsible::{Collapsible, CollapsibleConfig, StaticSource};
use collapsible_adapter::{Controller, ManualSignal, MemorySurface, SharedWidth};

fn main() {
    // Example: a headless navbar driven by a host resize loop.
    //
    // A real integration would:
    // - implement `ItemSource` over its widget tree (or DOM)
    // - implement `Surface` to toggle a hidden flag on real nodes
    // - forward its resize events to `ManualSignal::notify` (or implement `ResizeSignal`)
    let source = StaticSource::new().with_container(
        "#nav",
        vec![72.0, 64.0, 88.0, 96.0, 70.0, 110.0],
    );
    let cfg = CollapsibleConfig::new("#nav", 32.0);
    let engine = match Collapsible::new(&source, &cfg.locator, cfg.options()) {
        Ok(engine) => engine,
        Err(err) => {
            eprintln!("{err}");
            return;
        }
    };

    let width = SharedWidth::new(800.0);
    let mut signal = ManualSignal::new();
    let surface = MemorySurface::new(engine.count());
    let rendered = match Controller::new(engine, width.clone(), surface).render(&mut signal) {
        Ok(rendered) => rendered,
        Err(err) => {
            eprintln!("{err}");
            return;
        }
    };

    for available in [800.0, 520.0, 400.0, 260.0, 90.0, 640.0] {
        width.set(available);
        signal.notify();
        let line = rendered.with_surface(|s| {
            let bar: String = s
                .primary_hidden()
                .iter()
                .map(|&hidden| if hidden { '.' } else { '#' })
                .collect();
            let more = if s.overflow_hidden() { "" } else { " [more]" };
            format!("{bar}{more}")
        });
        println!("width={available:>5} {}", line.unwrap_or_default());
    }
    println!("stats={:?}", rendered.stats());
}
