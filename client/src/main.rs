use clap::{Parser, Subcommand};
use client::network::ScoreboardClient;
use client::rendering::render_scoreboard;
use log::{info, warn};
use shared::{Action, ConfigUpdate, Side};
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Server address to connect to
    #[arg(short = 's', long, default_value = "127.0.0.1:8080")]
    server: String,

    /// Match identifier
    #[arg(short = 'm', long = "match", default_value = "Volley")]
    match_id: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the current state once
    State {
        /// Print the raw JSON snapshot
        #[arg(long)]
        json: bool,
    },
    /// Poll and redraw the scoreboard until interrupted
    Watch {
        /// Polling interval in milliseconds
        #[arg(short = 'i', long, default_value = "1000")]
        interval_ms: u64,
    },
    /// List the matches the server knows
    Matches,
    /// Change a team's score
    Score {
        #[arg(value_parser = parse_side)]
        team: Side,
        #[arg(allow_negative_numbers = true, default_value = "1")]
        delta: i64,
    },
    /// Change a team's timeouts used
    Timeout {
        #[arg(value_parser = parse_side)]
        team: Side,
        #[arg(allow_negative_numbers = true, default_value = "1")]
        delta: i64,
    },
    /// Change a team's substitutions used
    Sub {
        #[arg(value_parser = parse_side)]
        team: Side,
        #[arg(allow_negative_numbers = true, default_value = "1")]
        delta: i64,
    },
    /// Zero scores, timeouts and substitutions of the current set
    ResetSet,
    /// Start the match over
    ResetMatch {
        /// Also reset the team names
        #[arg(long)]
        drop_names: bool,
    },
    /// Update names, colors, logos and allowances. Pass "null" to clear a logo or image.
    Config {
        #[arg(long)]
        team_a: Option<String>,
        #[arg(long)]
        team_b: Option<String>,
        #[arg(long)]
        bg_color: Option<String>,
        #[arg(long, value_parser = parse_side)]
        side_left: Option<Side>,
        #[arg(long)]
        logo_a: Option<String>,
        #[arg(long)]
        logo_b: Option<String>,
        #[arg(long)]
        bg_image: Option<String>,
        #[arg(long)]
        max_timeouts: Option<u32>,
        #[arg(long)]
        max_subs: Option<u32>,
    },
}

fn parse_side(value: &str) -> Result<Side, String> {
    Side::parse(&value.to_uppercase()).ok_or_else(|| format!("expected A or B, got {:?}", value))
}

fn reference(value: Option<String>) -> Option<Option<String>> {
    value.map(|v| if v == "null" { None } else { Some(v) })
}

impl Command {
    /// The update action this command sends, if any
    fn action(&self) -> Option<Action> {
        let action = match self {
            Command::State { .. } | Command::Watch { .. } | Command::Matches => return None,
            Command::Score { team, delta } => Action::Score {
                team: *team,
                delta: *delta,
            },
            Command::Timeout { team, delta } => Action::Timeout {
                team: *team,
                delta: *delta,
            },
            Command::Sub { team, delta } => Action::Sub {
                team: *team,
                delta: *delta,
            },
            Command::ResetSet => Action::ResetSet,
            Command::ResetMatch { drop_names } => Action::ResetMatch {
                keep_names: !drop_names,
            },
            Command::Config {
                team_a,
                team_b,
                bg_color,
                side_left,
                logo_a,
                logo_b,
                bg_image,
                max_timeouts,
                max_subs,
            } => Action::SetConfig(ConfigUpdate {
                team_a_name: team_a.clone(),
                team_b_name: team_b.clone(),
                bg_color: bg_color.clone(),
                side_left: *side_left,
                logo_a: reference(logo_a.clone()),
                logo_b: reference(logo_b.clone()),
                bg_image: reference(bg_image.clone()),
                max_timeouts: *max_timeouts,
                max_subs: *max_subs,
            }),
        };
        Some(action)
    }
}

async fn watch(
    client: &ScoreboardClient,
    match_id: &str,
    every: Duration,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut ticker = interval(every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match client.fetch_state(match_id).await {
                    Ok(state) => println!("\x1b[2J\x1b[H{}", render_scoreboard(&state)),
                    Err(e) => warn!("Poll failed: {}", e),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Stopped watching {}", match_id);
                return Ok(());
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    if std::env::var("RUST_LOG").is_err() {
        eprintln!("Set RUST_LOG=info for detailed logging");
    }

    let args = Args::parse();
    let client = ScoreboardClient::new(&args.server);
    info!("Using server {}", client.base_url());

    if let Some(action) = args.command.action() {
        client.send_action(&args.match_id, &action).await?;
        info!("Sent {} to {}", action.name(), args.match_id);
    }

    match &args.command {
        Command::State { json: true } => {
            let state = client.fetch_state(&args.match_id).await?;
            println!("{}", serde_json::to_string_pretty(&state)?);
        }
        Command::Watch { interval_ms } => {
            watch(&client, &args.match_id, Duration::from_millis((*interval_ms).max(100))).await?;
        }
        Command::Matches => {
            for id in client.list_matches().await? {
                println!("{}", id);
            }
        }
        _ => {
            let state = client.fetch_state(&args.match_id).await?;
            println!("{}", render_scoreboard(&state));
        }
    }

    Ok(())
}
