//! confab CLI: command-line interface for the confab chat client

use clap::{Parser, Subcommand};
use confab_client::{Config, HttpTransport, Transport, MAX_CITATIONS};
use std::io::{BufRead, Write};

/// Chat client for a search-augmented assistant server
#[derive(Parser)]
#[command(name = "confab")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Server URL (overrides the configured server)
    #[arg(long, global = true)]
    server: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the chat TUI (default when no command specified)
    Tui,

    /// Send a single message and print the reply
    Send {
        /// The message to send
        message: String,
    },

    /// Clear the server-side conversation history
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Check server health and print diagnostics
    Doctor {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let mut config = Config::load_or_default();
    if let Some(server) = cli.server {
        config.server_url = server;
    }

    match cli.command {
        None | Some(Commands::Tui) => {
            let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
            if let Err(e) = rt.block_on(confab_tui::run_tui(&config)) {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::Send { message }) => {
            init_tracing();
            block_on(cmd_send(&config, &message));
        }
        Some(Commands::Clear { yes }) => {
            init_tracing();
            if !yes && !confirm("Clear the conversation history? [y/N] ") {
                println!("Aborted");
                return;
            }
            block_on(cmd_clear(&config));
        }
        Some(Commands::Doctor { json }) => {
            init_tracing();
            block_on(cmd_doctor(&config, json));
        }
    }
}

/// Log to stderr for one-shot commands, filtered by `RUST_LOG`.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}

fn block_on<F: std::future::Future<Output = ()>>(future: F) {
    let rt = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
    rt.block_on(future);
}

fn connect(config: &Config) -> HttpTransport {
    match HttpTransport::new(&config.server_url) {
        Ok(transport) => transport,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

async fn cmd_send(config: &Config, message: &str) {
    let transport = connect(config);

    let reply = match transport.chat(message).await {
        Ok(reply) => reply,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    if !reply.success {
        let error = reply.error.unwrap_or_else(|| "unknown error".into());
        eprintln!("Error: {error}");
        std::process::exit(1);
    }

    println!("{}", reply.response.unwrap_or_default());

    let results = reply.search_results.unwrap_or_default();
    if !results.is_empty() {
        println!();
        println!("Sources:");
        for result in results.iter().take(MAX_CITATIONS) {
            println!("  {} <{}>", result.display_link, result.link);
        }
    }

    if let Some(len) = reply.history_length {
        println!();
        println!("{len} messages in history");
    }
}

async fn cmd_clear(config: &Config) {
    let transport = connect(config);

    match transport.clear().await {
        Ok(response) if response.success => {
            println!("Conversation history cleared!");
        }
        Ok(_) => {
            eprintln!("Error clearing history: server refused the request");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error clearing history: {e}");
            std::process::exit(1);
        }
    }
}

async fn cmd_doctor(config: &Config, json: bool) {
    let transport = connect(config);

    let health = match transport.health().await {
        Ok(health) => health,
        Err(e) => {
            if json {
                let output = serde_json::json!({
                    "server": config.server_url,
                    "reachable": false,
                    "error": e.to_string(),
                });
                println!(
                    "{}",
                    serde_json::to_string_pretty(&output).expect("failed to serialize")
                );
            } else {
                eprintln!("Server {} is unreachable: {e}", config.server_url);
            }
            std::process::exit(1);
        }
    };

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&health).expect("failed to serialize")
        );
        return;
    }

    println!("Server Health\n");
    println!("  Server: {}", config.server_url);
    println!("  Status: {}", health.status);
    println!(
        "  Model: {}",
        if health.gemini_configured {
            "configured"
        } else {
            "not configured"
        }
    );
    println!(
        "  Search: {}",
        if health.search_configured {
            "configured"
        } else {
            "not configured"
        }
    );
    println!("  Active conversations: {}", health.active_conversations);
}

/// Ask a yes/no question on stdout, defaulting to no.
fn confirm(prompt: &str) -> bool {
    print!("{prompt}");
    if std::io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    if std::io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim(), "y" | "Y" | "yes" | "Yes")
}
