use anyhow::Result;
use evently_core::evently::Evently;
use owo_colors::OwoColorize;

pub fn register(evently: &Evently, email: &str, username: &str) -> Result<()> {
    let user = evently.store().register_user(email, username)?;
    println!("{} {} <{}>", "Registered".green(), user.username, user.email);
    println!("{}", format!("Log in with: evently login {}", user.email).dimmed());
    Ok(())
}

pub fn login(evently: &Evently, email: &str) -> Result<()> {
    let user = evently.store().login(email)?;
    println!("Logged in as {}", user.username.bold());
    Ok(())
}

pub fn logout(evently: &Evently) -> Result<()> {
    evently.store().logout()?;
    println!("{}", "Logged out".dimmed());
    Ok(())
}

pub fn whoami(evently: &Evently) -> Result<()> {
    match evently.store().current_user()? {
        Some(user) => println!("{} <{}>", user.username.bold(), user.email),
        None => println!("{}", "Not logged in".dimmed()),
    }
    println!("{}", format!("Store: {}", evently.display_path().display()).dimmed());
    Ok(())
}
