//! NotePortal CLI
//!
//! Command-line interface for a running NotePortal API:
//! - Check the wallet session and connect
//! - List and refresh submissions
//! - Play a note or send a wave
//! - Print the history as ABC notation

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "noteportal-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Play notes and send waves through an on-chain portal")]
#[command(long_about = "NotePortal records musical notes and messages on a portal contract.\nEvery submission is kept on-chain and can be replayed as a tune.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API server URL
    #[arg(long, default_value = "http://localhost:8082", global = true)]
    pub api_url: String,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show server and wallet status
    Status,

    /// Ask the wallet to authorize an account
    Connect,

    /// List the last read submissions
    List,

    /// Re-read all submissions from the contract
    Refresh,

    /// Play a note (MIDI number or name, e.g. 60 or C4)
    Play {
        /// Note to play
        note: String,
    },

    /// Send a wave with a message
    Wave {
        /// Message text
        message: String,
    },

    /// Print the played notes as ABC notation
    Notation,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Status => {
            let response = client
                .get(format!("{}/health", cli.api_url))
                .send()
                .await;

            match response {
                Ok(resp) if resp.status().is_success() => {
                    let health: serde_json::Value = resp.json().await?;

                    if cli.format == "json" {
                        println!("{}", serde_json::to_string_pretty(&health)?);
                        return Ok(());
                    }

                    println!("NotePortal v{}", env!("CARGO_PKG_VERSION"));
                    println!();
                    println!(
                        "API Status: {}",
                        health["status"].as_str().unwrap_or("unknown")
                    );
                    println!("Portal:     {}", health["kind"].as_str().unwrap_or("-"));
                    println!("Wallet:     {}", health["wallet"].as_str().unwrap_or("-"));

                    if let Some(uptime) = health["uptime_seconds"].as_u64() {
                        println!();
                        println!("Uptime: {}", format_duration(uptime));
                    }
                }
                Ok(resp) => {
                    eprintln!("API returned error: {}", resp.status());
                    std::process::exit(1);
                }
                Err(e) => {
                    eprintln!("Cannot connect to NotePortal API at {}", cli.api_url);
                    eprintln!("Error: {}", e);
                    eprintln!();
                    eprintln!("Make sure the NotePortal API server is running:");
                    eprintln!("  cargo run --bin noteportal");
                    std::process::exit(1);
                }
            }
        }

        Commands::Connect => {
            let response = client
                .post(format!("{}/api/v1/session/connect", cli.api_url))
                .send()
                .await?;

            let result = expect_success(response, "Connect").await?;

            match cli.format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(&result)?),
                _ => {
                    println!(
                        "Connected as {}",
                        result["account"].as_str().unwrap_or("-")
                    );
                    println!(
                        "{} submissions on record",
                        result["count"].as_u64().unwrap_or(0)
                    );
                }
            }
        }

        Commands::List => {
            let response = client
                .get(format!("{}/api/v1/submissions", cli.api_url))
                .send()
                .await?;

            let data = expect_success(response, "List").await?;
            print_submissions(&data, &cli.format)?;
        }

        Commands::Refresh => {
            let response = client
                .post(format!("{}/api/v1/submissions/refresh", cli.api_url))
                .send()
                .await?;

            expect_success(response, "Refresh").await?;

            let response = client
                .get(format!("{}/api/v1/submissions", cli.api_url))
                .send()
                .await?;

            let data = expect_success(response, "List").await?;
            print_submissions(&data, &cli.format)?;
        }

        Commands::Play { note } => {
            let note = match note.trim().parse::<u8>() {
                Ok(midi) => serde_json::json!(midi),
                Err(_) => serde_json::json!(note.trim()),
            };

            let body = serde_json::json!({ "note": note });
            submit(&client, &cli.api_url, &body, &cli.format).await?;
        }

        Commands::Wave { message } => {
            let body = serde_json::json!({ "message": message });
            submit(&client, &cli.api_url, &body, &cli.format).await?;
        }

        Commands::Notation => {
            let response = client
                .get(format!("{}/api/v1/notation", cli.api_url))
                .send()
                .await?;

            let data = expect_success(response, "Notation").await?;

            match cli.format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(&data)?),
                _ => {
                    println!("X:1");
                    println!("{}", data["abc"].as_str().unwrap_or("").trim_start());
                }
            }
        }

        Commands::Config { output } => {
            let config = noteportal::config::generate_default_config();

            match output {
                Some(path) => {
                    // Create parent directory if needed
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

async fn submit(
    client: &reqwest::Client,
    api_url: &str,
    body: &serde_json::Value,
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Waiting for the transaction to be mined...");

    let response = client
        .post(format!("{}/api/v1/submissions", api_url))
        .json(body)
        .send()
        .await?;

    let result = expect_success(response, "Submit").await?;

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&result)?),
        _ => {
            println!("Mined {}", result["tx_hash"].as_str().unwrap_or("-"));
            if let Some(block) = result["block_number"].as_u64() {
                println!("  Block: {}", block);
            }
            println!("  Total: {}", result["count"].as_u64().unwrap_or(0));
        }
    }

    Ok(())
}

async fn expect_success(
    response: reqwest::Response,
    action: &str,
) -> Result<serde_json::Value, Box<dyn std::error::Error>> {
    let status = response.status();

    if status.is_success() {
        return Ok(response.json().await?);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&text)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or(text);

    eprintln!("{} failed ({}): {}", action, status, message);
    std::process::exit(1);
}

fn print_submissions(
    data: &serde_json::Value,
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    if format == "json" {
        println!("{}", serde_json::to_string_pretty(data)?);
        return Ok(());
    }

    let rows = match data["submissions"].as_array() {
        Some(r) => r,
        None => {
            println!("No data");
            return Ok(());
        }
    };

    if rows.is_empty() {
        println!("Nothing on record yet.");
        println!();
        println!("Make the first submission with:");
        if data["kind"] == "wave" {
            println!("  noteportal-cli wave \"gm\"");
        } else {
            println!("  noteportal-cli play C4");
        }
        return Ok(());
    }

    println!("{:<22} {:<44} {}", "Time", "Address", "Payload");
    println!("{}", "-".repeat(80));

    for row in rows {
        let time = row["timestamp"]
            .as_str()
            .and_then(|s| chrono::DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "-".to_string());

        let payload = match (row["note_name"].as_str(), row["message"].as_str()) {
            (Some(name), _) => format!("{} ({})", name, row["note"].as_u64().unwrap_or(0)),
            (None, Some(message)) => message.to_string(),
            (None, None) => "-".to_string(),
        };

        println!(
            "{:<22} {:<44} {}",
            time,
            row["address"].as_str().unwrap_or("-"),
            payload
        );
    }

    println!();
    println!("{}", data["summary"].as_str().unwrap_or(""));

    Ok(())
}

fn format_duration(seconds: u64) -> String {
    if seconds < 60 {
        format!("{}s", seconds)
    } else if seconds < 3600 {
        format!("{}m {}s", seconds / 60, seconds % 60)
    } else if seconds < 86400 {
        format!("{}h {}m", seconds / 3600, (seconds % 3600) / 60)
    } else {
        format!("{}d {}h", seconds / 86400, (seconds % 86400) / 3600)
    }
}
