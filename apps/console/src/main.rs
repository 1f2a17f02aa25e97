use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::Result;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::Mutex;

use client_core::{
    adapters::{MapAdapter, VoiceAdapter},
    backend::HttpAnalysisBackend,
    ClientEvent, SessionClient, SubmitOutcome,
};
use shared::domain::Role;

mod config;
mod render;

#[derive(Parser, Debug)]
struct Args {
    /// Base URL of the analysis service; overrides config and env.
    #[arg(long)]
    server_url: Option<String>,
    /// Path to the console config file (default: ./console.toml).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Start with voice output enabled.
    #[arg(long)]
    voice: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let mut settings = config::load_settings(args.config.as_deref());
    if let Some(url) = args.server_url {
        settings.server_url = url;
    }
    if args.voice {
        settings.voice = true;
    }

    let session_id = uuid::Uuid::new_v4().to_string();
    let backend = Arc::new(HttpAnalysisBackend::new(
        &settings.server_url,
        Duration::from_secs(settings.request_timeout_secs),
    )?);
    let client = SessionClient::new(backend, session_id.clone());

    println!("session {session_id} -> {}", settings.server_url);
    println!("type a message to submit it; /voice toggles speech, /export downloads the case report, /quit exits");

    let voice = Arc::new(Mutex::new(VoiceAdapter::new(
        render::TerminalSpeech,
        settings.voice,
    )));

    let mut events = client.subscribe_events();
    let voice_for_events = Arc::clone(&voice);
    tokio::spawn(async move {
        let mut map = MapAdapter::new(render::TerminalMapSurface::default());
        while let Ok(event) = events.recv().await {
            match event {
                ClientEvent::TranscriptAppended(message) => {
                    println!("{}", render::render_message(&message));
                    if message.role == Role::Counterpart {
                        voice_for_events.lock().await.on_reply(&message.text);
                    }
                }
                ClientEvent::PendingChanged(true) => println!("ANALYZING..."),
                ClientEvent::PendingChanged(false) => {}
                ClientEvent::ProjectionsUpdated(projections) => {
                    println!("{}", render::render_gauge(projections.risk));
                    print!("{}", render::render_intel(&projections.intel));
                    if let Some(geo) = &projections.geo {
                        map.apply(geo);
                    }
                }
                ClientEvent::Error(message) => eprintln!("error: {message}"),
            }
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "" => {}
            "/quit" => break,
            "/voice" => {
                let enabled = voice.lock().await.toggle();
                println!("voice {}", if enabled { "on" } else { "off" });
            }
            "/export" => {
                client
                    .export_report(PathBuf::from(&settings.export_path))
                    .await;
            }
            text => {
                // Submissions run in the background so the operator can keep
                // typing; the coordinator's pending guard rejects overlap.
                let client = Arc::clone(&client);
                let text = text.to_string();
                tokio::spawn(async move {
                    if client.submit(&text).await == SubmitOutcome::Busy {
                        println!("still analyzing the previous message; wait for the reply");
                    }
                });
            }
        }
    }

    Ok(())
}
