//! staychat chat server binary.
//!
//! Accepts WebSocket connections, groups them into named rooms, and
//! broadcasts chat messages and presence to room members.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin staychat-server -- --host 127.0.0.1 --port 8080
//! ```

use clap::Parser;
use staychat_shared::setup_logger;

/// Real-time chat server for staychat
#[derive(Debug, Parser)]
#[command(name = "staychat-server", version, about)]
struct Args {
    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    // Run the server
    if let Err(e) = staychat_server::run_server(&args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
