use std::io::IsTerminal;
use std::net::IpAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Input;
use parley_client::webrtc::{LoggingRenderer, TransportConfig, WebRtcFactory, WebRtcTrack};
use parley_client::{ClientConfig, Session, StaticMedia, join_room};
use parley_core::IceServerConfig;
use parley_core::utils::{DEFAULT_PORT, DEFAULT_ROOM, DEFAULT_STUN_ADDR};
use parley_server::{ServerConfig, run_server};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "parley")]
#[command(about = "Room-based WebRTC signaling relay")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the relay.
    Serve {
        #[arg(long, default_value = "0.0.0.0")]
        host: IpAddr,

        #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
        port: u16,
    },
    /// Join a room as a receive-only participant and log incoming media.
    Join {
        #[arg(long, default_value = "ws://127.0.0.1:3000/ws")]
        url: String,

        /// Room to join. Prompted for when omitted on a terminal.
        #[arg(short, long)]
        room: Option<String>,

        #[arg(long = "stun", default_value = DEFAULT_STUN_ADDR)]
        stun: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match Cli::parse().command {
        Commands::Serve { host, port } => serve(ServerConfig { host, port }).await,
        Commands::Join { url, room, stun } => join(url, room, stun).await,
    }
}

async fn serve(config: ServerConfig) -> Result<()> {
    println!(
        "{} {}",
        "📡 Parley relay on".green().bold(),
        format!("ws://{}/ws", config.socket_addr()).cyan()
    );
    run_server(config).await
}

async fn join(url: String, room: Option<String>, stun: Vec<String>) -> Result<()> {
    let room = match room {
        Some(room) => room,
        None if std::io::stdin().is_terminal() => Input::new()
            .with_prompt("Room")
            .default(DEFAULT_ROOM.to_owned())
            .interact_text()
            .context("Failed to read room name")?,
        None => DEFAULT_ROOM.to_owned(),
    };

    let ice_servers: Vec<IceServerConfig> = stun.into_iter().map(IceServerConfig::stun).collect();
    let config = ClientConfig::new(url, room).with_ice_servers(ice_servers);
    let factory = WebRtcFactory::new(TransportConfig {
        receive_audio: true,
        receive_video: true,
        ..TransportConfig::from(&config)
    });

    println!(
        "{} {} {}",
        "🚪 Joining room".green().bold(),
        config.room.yellow().bold(),
        format!("via {}", config.url).dimmed()
    );

    let session = join_room(
        &config,
        factory,
        LoggingRenderer::new(),
        &StaticMedia::<WebRtcTrack>::empty(),
    )
    .await
    .context("Failed to join room")?;

    println!("{}", "Press Ctrl-C to leave.".dimmed());
    let relay_closed = tokio::select! {
        _ = tokio::signal::ctrl_c() => false,
        _ = wait_finished(&session) => true,
    };
    if !relay_closed {
        println!("{}", "👋 Leaving...".cyan());
        session.leave();
    }
    session.closed().await?;

    println!("{}", "✨ Session ended".green().bold());
    Ok(())
}

async fn wait_finished(session: &Session) {
    while !session.is_finished() {
        tokio::time::sleep(Duration::from_millis(200)).await;
    }
}
