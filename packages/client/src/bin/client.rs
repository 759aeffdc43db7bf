//! staychat CLI chat client.
//!
//! Connects to a staychat server, joins a room, prints incoming chat and
//! presence events, and sends whatever is typed at the prompt.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin staychat-client -- --username alice --room lobby
//! ```
//!
//! Commands: `/leave` leaves the current room, `/quit` exits.

use clap::Parser;
use futures_util::{SinkExt, StreamExt};
use rustyline::{DefaultEditor, error::ReadlineError};
use thiserror::Error;
use tokio_tungstenite::{
    connect_async,
    tungstenite::{self, Message},
};

use staychat_server::infrastructure::dto::websocket::{ClientEvent, ServerEvent};
use staychat_shared::{now_pht_timestamp, setup_logger};

/// CLI chat client for staychat
#[derive(Debug, Parser)]
#[command(name = "staychat-client", version, about)]
struct Args {
    /// WebSocket URL of the chat server
    #[arg(long, default_value = "ws://127.0.0.1:8080/ws")]
    url: String,

    /// Display name to join with
    #[arg(long)]
    username: String,

    /// Room to join
    #[arg(long)]
    room: String,
}

#[derive(Debug, Error)]
enum ClientError {
    #[error("websocket error: {0}")]
    WebSocket(#[from] tungstenite::Error),

    #[error("readline error: {0}")]
    Readline(#[from] ReadlineError),
}

/// Format a Unix-millisecond timestamp as a local (PHT) clock time.
fn format_time(sent_at: i64) -> String {
    use chrono::{FixedOffset, TimeZone};

    let pht = FixedOffset::east_opt(8 * 3600).unwrap();
    match pht.timestamp_millis_opt(sent_at) {
        chrono::LocalResult::Single(dt) => dt.format("%H:%M:%S").to_string(),
        _ => sent_at.to_string(),
    }
}

async fn run(args: Args) -> Result<(), ClientError> {
    let (stream, _) = connect_async(args.url.as_str()).await?;
    let (mut write, mut read) = stream.split();
    tracing::info!("Connected to {}", args.url);

    // Print incoming events until the server goes away
    let print_task = tokio::spawn(async move {
        while let Some(msg) = read.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("Connection lost: {}", e);
                    break;
                }
            };
            if let Message::Text(text) = msg {
                match serde_json::from_str::<ServerEvent>(&text) {
                    Ok(ServerEvent::ReceiveMessage {
                        message,
                        username,
                        sent_at,
                    }) => {
                        println!("[{}] {}: {}", format_time(sent_at), username, message);
                    }
                    Ok(ServerEvent::ChatroomUsers { users }) => {
                        let names: Vec<String> =
                            users.into_iter().map(|u| u.username).collect();
                        println!("* users in room: {}", names.join(", "));
                    }
                    Err(e) => {
                        tracing::warn!("Ignoring unrecognized frame: {}", e);
                    }
                }
            }
        }
    });

    // Join the requested room before reading any input
    let join = ClientEvent::JoinRoom {
        username: args.username.clone(),
        room: args.room.clone(),
    };
    write
        .send(Message::text(serde_json::to_string(&join).unwrap()))
        .await?;

    let mut editor = DefaultEditor::new()?;
    loop {
        // rustyline blocks, so keep it off the async runtime threads
        let (line, returned_editor) = tokio::task::spawn_blocking(move || {
            let mut editor = editor;
            let line = editor.readline("> ");
            if let Ok(entry) = &line {
                let _ = editor.add_history_entry(entry);
            }
            (line, editor)
        })
        .await
        .expect("readline task panicked");
        editor = returned_editor;

        let line = match line {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let event = match trimmed {
            "/quit" => break,
            "/leave" => ClientEvent::LeaveRoom {
                username: args.username.clone(),
                room: args.room.clone(),
            },
            _ => ClientEvent::SendMessage {
                message: trimmed.to_string(),
                username: args.username.clone(),
                room: args.room.clone(),
                sent_at: now_pht_timestamp(),
            },
        };
        write
            .send(Message::text(serde_json::to_string(&event).unwrap()))
            .await?;
    }

    // Close politely so the server reaps the connection right away
    let _ = write.send(Message::Close(None)).await;
    print_task.abort();

    Ok(())
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    // Run the client
    if let Err(e) = run(args).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
