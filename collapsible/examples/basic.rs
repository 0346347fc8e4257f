// Example: minimal usage over synthetic widths.
use collapsible::{Collapsible, CollapsibleOptions};

fn main() -> collapsible::Result<()> {
    let widths = [80.0, 120.0, 64.0, 96.0, 72.0];
    let mut c = Collapsible::from_widths(widths, CollapsibleOptions::new(24.0))?;
    c.build_mirror();

    for available in [600.0, 400.0, 250.0, 90.0] {
        let k = c.sync(available)?;
        let mut primary = String::new();
        c.for_each_primary(|_, hidden| primary.push(if hidden { '.' } else { '#' }));
        println!(
            "available={available} k={k} primary=[{primary}] overflow_hidden={}",
            c.overflow_hidden()
        );
    }
    println!("required_width={}", c.required_width());
    Ok(())
}
