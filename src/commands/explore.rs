use anyhow::Result;
use evently_core::date_range::DateRange;
use evently_core::evently::Evently;
use evently_core::explore::ExploreFilter;
use owo_colors::OwoColorize;

use crate::render::Render;

pub fn run(evently: &Evently, category: String, from: Option<&str>, to: Option<&str>) -> Result<()> {
    let range = DateRange::from_args(from, to)?;
    if !range.is_active() && (range.from.is_some() || range.to.is_some()) {
        println!(
            "{}",
            "Date filter needs both --from and --to; showing all dates".dimmed()
        );
    }

    let filter = ExploreFilter { category, range };
    let events = evently.store().explore(&filter)?;

    if events.is_empty() {
        println!("{}", "No events found".dimmed());
        return Ok(());
    }

    for event in &events {
        println!("{}", event.render());
    }
    Ok(())
}
