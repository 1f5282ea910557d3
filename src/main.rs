//! GeoHod command line driver
//!
//! Runs the client core against a live backend without the mini app UI.

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{error, info};

use geohod::{
    config::Settings,
    models::EventFilter,
    state::AppContext,
    utils::{clock::system_clock, helpers::{format_event_date, registration_link}, logging},
};

#[derive(Parser, Debug)]
#[command(name = "geohod", version, about = "GeoHod mini app client core")]
struct Args {
    /// Configuration file (TOML, extension optional)
    #[arg(short, long, default_value = "config")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List events
    Events {
        /// Only events I organize
        #[arg(long)]
        mine: bool,
        /// Only events I joined
        #[arg(long)]
        joined: bool,
    },
    /// Show one event with its participants and available actions
    Event { id: String },
    /// Show the first notification pages
    Notifications {
        #[arg(long, default_value_t = 1)]
        pages: u32,
    },
    /// Print the registration link for an event
    Link { id: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    // Load configuration
    let settings = Settings::from_file(&args.config).context("failed to load settings")?;
    settings.validate()?;

    // Initialize logging
    let _guard = logging::init_logging(&settings.logging)?;

    info!("{} starting", geohod::info());

    if let Command::Link { id } = &args.command {
        println!("{}", registration_link(&settings.host.bot_url, id)?);
        return Ok(());
    }

    let offset = settings.utc_offset();
    let mut ctx = AppContext::new(settings, system_clock())?;

    let result = run(&mut ctx, args.command, offset).await;
    if let Err(e) = &result {
        error!(error = %e, severity = %e.severity(), recoverable = e.is_recoverable(), "Command failed");
        eprintln!("{}", e.user_message());
    }
    result.map_err(Into::into)
}

async fn run(ctx: &mut AppContext, command: Command, offset: chrono::FixedOffset) -> geohod::Result<()> {
    match command {
        Command::Events { mine, joined } => {
            let filter = match (mine, joined) {
                (true, _) => EventFilter::authored(),
                (false, true) => EventFilter::joined(),
                (false, false) => EventFilter::default(),
            };
            for event in ctx.events.fetch(filter).await? {
                println!(
                    "{}  {}  {}  {}/{}  {}",
                    event.id,
                    format_event_date(event.date, offset),
                    event.status,
                    event.participants_count,
                    event.max_participants,
                    event.name
                );
            }
        }
        Command::Event { id } => {
            let detail = ctx.open_event(&id).await?;
            let event = detail.event();
            println!("{} ({})", event.name, event.status);
            println!("When: {}", format_event_date(event.date, offset));
            println!("Organizer: {}", event.author.display_name());
            println!("Participants: {}/{}", event.participants_count, event.max_participants);
            for participant in detail.participants() {
                println!("  - {}", participant.display_name());
            }
            println!("Actions: {:?}", detail.actions());
            println!("Link: {}", detail.registration_link()?);
        }
        Command::Notifications { pages } => {
            let mut feed = ctx.notification_feed();
            feed.open();
            for _ in 0..pages {
                if feed.load_more().await == 0 && !feed.has_more() {
                    break;
                }
            }
            if let Some(message) = feed.last_error() {
                eprintln!("{}", message);
            }
            for line in ctx.describe_notifications(&feed).await {
                println!("{}", line);
            }
        }
        Command::Link { .. } => {}
    }
    Ok(())
}
