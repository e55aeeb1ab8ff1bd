mod inspect;
mod render;

use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "clubmap-cli")]
#[command(about = "Plot championship clubs from the federation API")]
struct Cli {
    /// Route API requests through this relay prefix (e.g. `https://corsproxy.io/?`).
    #[arg(long, global = true, value_name = "URL", value_parser = parse_relay)]
    relay: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Toggle championships on (then off) and write the overlay as GeoJSON
    Render {
        /// Championship to show; repeat for several
        #[arg(long = "on", value_name = "CHAMP", required = true)]
        on: Vec<String>,
        /// Championship to hide again after loading
        #[arg(long = "off", value_name = "CHAMP")]
        off: Vec<String>,
        /// Write the GeoJSON here instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Print one club record
    Club { id: u64 },
    /// Print the first-phase pools of a championship
    Poules { champ: String },
    /// Print the engagements of one pool
    Engagements { champ: String, poule: u32 },
}

fn parse_relay(raw: &str) -> Result<String, String> {
    let raw = raw.trim();
    if raw.starts_with("http://") || raw.starts_with("https://") {
        Ok(raw.to_string())
    } else {
        Err(format!("'{raw}' is not an http(s) URL"))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = clubmap_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    if let Some(relay) = cli.relay {
        config.relay_url = Some(relay);
    }
    tracing::debug!(?config, "configuration loaded");

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let client = clubmap_fff::FffClient::from_config(&config)?;
    match command {
        Commands::Render { on, off, output } => {
            render::run_render(client, &config, &on, &off, output.as_deref()).await?;
        }
        Commands::Club { id } => inspect::run_club(&client, id).await?,
        Commands::Poules { champ } => inspect::run_poules(&client, &champ).await?,
        Commands::Engagements { champ, poule } => {
            inspect::run_engagements(&client, &champ, poule).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests;
