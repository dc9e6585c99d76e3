use anyhow::Result;
use evently_core::evently::Evently;
use owo_colors::OwoColorize;

pub fn add(evently: &mut Evently, name: &str, make_default: bool) -> Result<()> {
    match evently.store().add_category(name)? {
        Some(category) => println!("{} {}", "Added category".green(), category.name.bold()),
        None => println!("{}", "Category is empty or already exists".dimmed()),
    }

    if make_default {
        evently.set_default_category(name)?;
        println!("{}", format!("Default category set to {}", name).dimmed());
    }
    Ok(())
}

pub fn list(evently: &Evently) -> Result<()> {
    let categories = evently.store().categories()?;

    if categories.is_empty() {
        println!("{}", "No categories. Add one with: evently category add <name>".dimmed());
        return Ok(());
    }

    let default = evently.default_category();
    for category in &categories {
        if Some(category.name.as_str()) == default {
            println!("{} {}", category.name, "(default)".dimmed());
        } else {
            println!("{}", category.name);
        }
    }
    Ok(())
}
