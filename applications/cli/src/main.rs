/// Chorus - shared journal playback sync from the command line
use anyhow::{anyhow, Context};
use chorus_cli::{build_registry, config::ChorusConfig, render_status};
use chorus_core::JournalId;
use chorus_sync::SessionHandle;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "chorus")]
#[command(about = "Shared journal playback sync", long_about = None)]
struct Cli {
    /// Journal whose playback state to use
    #[arg(short, long, global = true, env = "CHORUS_JOURNAL")]
    journal: Option<String>,

    /// Configuration file path (defaults to ./chorus.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the current track and playlist
    Status {
        /// Print the session snapshot as JSON
        #[arg(long)]
        json: bool,
    },
    /// Toggle play/pause
    Toggle,
    /// Play a track by its number in the playlist
    Select {
        /// Track number as shown by `status` (starting at 1)
        number: usize,
    },
    /// Skip to the next track
    Next,
    /// Go back to the previous track
    Prev,
    /// Append a track to the playlist
    Add {
        /// Audio file or video URL
        url: String,
        /// Display title (defaults to "Track <n>")
        #[arg(short, long)]
        title: Option<String>,
    },
    /// Remove a track by id
    Remove {
        /// Entry id as shown by `status`
        id: String,
    },
    /// Keep the session open and print every change until Ctrl-C
    Watch,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing; status output goes to stdout, logs to stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chorus=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = ChorusConfig::load(cli.config.as_deref())?;
    config.validate()?;

    let journal = cli
        .journal
        .or_else(|| config.journal.clone())
        .ok_or_else(|| anyhow!("No journal given (use --journal or CHORUS_JOURNAL)"))?;
    let journal = JournalId::parse(journal).context("Invalid journal id")?;

    let registry = build_registry(&config)?;
    let session = registry.open(&journal).await;

    let result = run(&session, cli.command).await;
    registry.close_all().await;
    result
}

async fn run(session: &SessionHandle, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Status { json: true } => {
            let snapshot = session.snapshot().await?;
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
            return Ok(());
        }
        Commands::Status { json: false } => {}
        Commands::Toggle => session.toggle_play().await?,
        Commands::Select { number } => {
            let tracks = session.snapshot().await?.playlist.len();
            if number == 0 || number > tracks {
                return Err(anyhow!("No track {} (playlist has {} tracks)", number, tracks));
            }
            session.select_track(number - 1).await?;
        }
        Commands::Next => session.next_track().await?,
        Commands::Prev => session.previous_track().await?,
        Commands::Add { url, title } => {
            let entry = session.add_entry(url, title).await?;
            println!("Added {} [{}]", entry.title, entry.id);
        }
        Commands::Remove { id } => session.remove_entry(id).await?,
        Commands::Watch => return watch(session).await,
    }

    let snapshot = session.snapshot().await?;
    print!("{}", render_status(&snapshot));
    Ok(())
}

async fn watch(session: &SessionHandle) -> anyhow::Result<()> {
    let mut changes = session.changes();
    let current = changes.borrow_and_update().clone();
    print!("{}", render_status(&current));

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            result = &mut shutdown => {
                result.context("Failed to listen for Ctrl-C")?;
                tracing::info!("Stopping watch");
                break;
            }
            changed = changes.changed() => {
                if changed.is_err() {
                    tracing::warn!("Session stopped");
                    break;
                }
                let snapshot = changes.borrow_and_update().clone();
                println!();
                print!("{}", render_status(&snapshot));
            }
        }
    }

    Ok(())
}
