use clap::Parser;
use log::{error, info};
use server::network::{Server, ServerConfig};
use server::rules::MatchRules;
use std::path::PathBuf;

// Command line arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Server IP address to bind to
    #[arg(short = 'H', long, default_value = "0.0.0.0")]
    host: String,

    /// Server port to listen on
    #[arg(short, long, default_value = "8080")]
    port: u16,

    /// Directory holding the control and display pages
    #[arg(long, default_value = "assets")]
    assets_dir: PathBuf,

    /// Match identifiers created at startup
    #[arg(long, value_delimiter = ',', default_value = "Volley,Basket")]
    matches: Vec<String>,

    /// Highest live score a team can reach
    #[arg(long, default_value = "99")]
    score_max: u32,

    /// Points needed to win a regular set
    #[arg(long, default_value = "25")]
    set_target: u32,

    /// Points needed to win the deciding set
    #[arg(long, default_value = "15")]
    deciding_set_target: u32,

    /// Set number played to the deciding target
    #[arg(long, default_value = "5")]
    deciding_set: u32,

    /// Sets needed to win the match
    #[arg(long, default_value = "3")]
    sets_to_win: u32,

    /// Keep timeouts and substitutions used when a set is won
    #[arg(long)]
    keep_allowances: bool,
}

impl Args {
    fn into_config(self) -> ServerConfig {
        ServerConfig {
            addr: format!("{}:{}", self.host, self.port),
            assets_dir: self.assets_dir,
            rules: MatchRules {
                score_max: self.score_max,
                set_target: self.set_target,
                deciding_set_target: self.deciding_set_target,
                deciding_set: self.deciding_set,
                sets_to_win: self.sets_to_win,
                reset_allowances_on_set_win: !self.keep_allowances,
                ..MatchRules::default()
            },
            matches: self.matches,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    if std::env::var("RUST_LOG").is_err() {
        eprintln!("Set RUST_LOG=info for detailed logging");
    }

    let config = Args::parse().into_config();
    info!("Starting scoreboard with {:?}", config.rules);

    let server = Server::bind(config).await?;
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down gracefully...");
    };

    server.run_until(shutdown).await?;

    Ok(())
}
