use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use picsilfy::config::{Config, ConfigStore};
use picsilfy::logging::init_tracing;
use picsilfy::session::SessionStore;
use picsilfy::store::album::AlbumOperation;
use picsilfy::store::auth::AuthOperation;
use picsilfy::store::Store;

#[derive(Parser, Debug)]
#[command(name = "picsilfy")]
#[command(about = "Terminal client for the Picsilfy photo-album sharing service")]
#[command(version)]
struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, short = 'c', env = "PICSILFY_CONFIG")]
    config: Option<PathBuf>,

    /// Backend base URL, overriding the config file
    #[arg(long, env = "PICSILFY_BASE_URL")]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// Interactive terminal UI (default)
    Tui,
    /// Print your albums and exit
    Albums,
    /// Print the signed-in user and exit
    Whoami,
    /// Sign out and forget the saved session
    Logout,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let mut config = Config::load_from(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;
    if let Some(base_url) = cli.base_url {
        config.api.base_url = base_url;
        config.validate()?;
    }
    tracing::info!(base_url = %config.api.base_url, "Starting picsilfy");

    let session = Arc::new(
        SessionStore::open(SessionStore::path_for(&config_path))
            .context("opening saved session")?,
    );
    let mut store =
        Store::open(&config.api.base_url, session).context("building the API client")?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("starting the async runtime")?;

    match cli.command.unwrap_or(Command::Tui) {
        Command::Tui => {
            let config = ConfigStore::new(config, config_path);
            picsilfy::ui::run(runtime.handle().clone(), config, store)?;
        }
        Command::Albums => runtime.block_on(print_albums(&mut store))?,
        Command::Whoami => runtime.block_on(print_user(&mut store))?,
        Command::Logout => {
            if store.session().is_signed_in() {
                // The local session is cleared even if the backend call fails.
                let _ = runtime.block_on(store.run(AuthOperation::Logout));
            }
            println!("Signed out");
        }
    }

    runtime.shutdown_timeout(std::time::Duration::from_secs(1));
    Ok(())
}

async fn print_albums(store: &mut Store) -> Result<()> {
    require_session(store)?;
    if let Err(e) = store.run(AlbumOperation::FetchAll).await {
        bail!("{}", e);
    }
    let albums = &store.state().album.albums;
    if albums.is_empty() {
        println!("No albums yet.");
    }
    for album in albums {
        println!("{}\t{}\t{}", album.id, album.name, album.created_label());
    }
    Ok(())
}

async fn print_user(store: &mut Store) -> Result<()> {
    require_session(store)?;
    if let Err(e) = store.run(AuthOperation::CurrentUser).await {
        bail!("{}", e);
    }
    match &store.state().auth.user {
        Some(user) => println!("{} (@{})", user.display_name(), user.username),
        None => println!("Not signed in"),
    }
    Ok(())
}

fn require_session(store: &Store) -> Result<()> {
    if !store.session().is_signed_in() {
        bail!("Not signed in. Run `picsilfy` and log in first.");
    }
    Ok(())
}
