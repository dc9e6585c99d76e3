mod commands;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use evently_core::evently::Evently;
use evently_core::explore::ALL_CATEGORIES;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "evently")]
#[command(about = "Create events, invite people and track RSVPs in a local event store")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Event form fields shared by `create` and `edit`
#[derive(clap::Args)]
pub struct EventArgs {
    /// Event name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Organizing group or company
    #[arg(short, long)]
    pub organization: Option<String>,

    /// Category (defaults to default_category from config)
    #[arg(short, long)]
    pub category: Option<String>,

    /// Event description
    #[arg(long)]
    pub description: Option<String>,

    /// Maximum number of members
    #[arg(short, long)]
    pub member_limit: Option<u32>,

    /// Event location
    #[arg(short, long)]
    pub location: Option<String>,

    /// Event date (e.g. "2025-03-20")
    #[arg(short, long)]
    pub date: Option<String>,

    /// Contact phone number
    #[arg(long)]
    pub contact: Option<String>,

    /// Image file to attach
    #[arg(short, long)]
    pub image: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new user
    Register { email: String, username: String },
    /// Log in as an existing user
    Login { email: String },
    /// Log out the current user
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Create a new event
    Create {
        #[command(flatten)]
        event: EventArgs,
    },
    /// Edit one of your events (unset fields keep their current value)
    Edit {
        event_id: u64,

        #[command(flatten)]
        event: EventArgs,
    },
    /// Delete one of your events
    Delete {
        event_id: u64,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Invite another user to one of your events
    Invite { event_id: u64, email: String },
    /// RSVP to an event you created or were invited to
    Rsvp { event_id: u64 },
    /// List the events you created
    Events,
    /// List events you were invited to
    Invites,
    /// List your RSVPs
    Rsvps,
    /// Manage event categories
    Category {
        #[command(subcommand)]
        command: CategoryCommands,
    },
    /// Browse every user's events
    Explore {
        /// Only show this category
        #[arg(short, long, default_value = ALL_CATEGORIES)]
        category: String,

        /// Show events from this date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// Show events until this date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
    },
}

#[derive(Subcommand)]
enum CategoryCommands {
    /// Add a category
    Add {
        name: String,

        /// Also make it the default category for new events
        #[arg(long)]
        default: bool,
    },
    /// List categories
    List,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut evently = Evently::load()?;
    debug!(data_dir = %evently.data_path().display(), "Loaded configuration");

    match cli.command {
        Commands::Register { email, username } => commands::account::register(&evently, &email, &username),
        Commands::Login { email } => commands::account::login(&evently, &email),
        Commands::Logout => commands::account::logout(&evently),
        Commands::Whoami => commands::account::whoami(&evently),
        Commands::Create { event } => commands::create::run(&evently, event).await,
        Commands::Edit { event_id, event } => commands::edit::run(&evently, event_id, event).await,
        Commands::Delete { event_id, force } => commands::delete::run(&evently, event_id, force),
        Commands::Invite { event_id, email } => commands::invite::run(&evently, event_id, &email),
        Commands::Rsvp { event_id } => commands::rsvp::run(&evently, event_id),
        Commands::Events => commands::list::events(&evently),
        Commands::Invites => commands::list::invites(&evently),
        Commands::Rsvps => commands::list::rsvps(&evently),
        Commands::Category { command } => match command {
            CategoryCommands::Add { name, default } => {
                commands::category::add(&mut evently, &name, default)
            }
            CategoryCommands::List => commands::category::list(&evently),
        },
        Commands::Explore { category, from, to } => {
            commands::explore::run(&evently, category, from.as_deref(), to.as_deref())
        }
    }
}
