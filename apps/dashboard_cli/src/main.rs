use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{
    connect_dashboard, load_settings, ChannelEvent, DashboardController, DashboardView,
    EventChannel, UserAction,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{parse_command, Command, HELP};

#[derive(Parser, Debug)]
struct Args {
    /// Simulation server, e.g. http://127.0.0.1:5000
    #[arg(long)]
    server_url: Option<String>,
    /// Settings file; defaults to ./dashboard.toml
    #[arg(long)]
    config: Option<PathBuf>,
    /// Request training mode once connected.
    #[arg(long)]
    training: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut settings = load_settings(args.config.as_deref());
    if let Some(server_url) = args.server_url {
        settings.server_url = server_url;
    }
    if args.training {
        settings.training = true;
    }

    let filter = EnvFilter::try_new(&settings.log_filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    tracing::info!(server_url = %settings.server_url, "connecting to simulation server");

    let EventChannel {
        requests,
        mut events,
    } = connect_dashboard(&settings)
        .await
        .with_context(|| format!("failed to reach simulation server at {}", settings.server_url))?;
    let mut controller = DashboardController::new(requests);
    if settings.training {
        controller.dispatch(UserAction::SetTraining(true));
    }
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            event = events.recv() => {
                let Some(event) = event else { break };
                let name = match &event {
                    ChannelEvent::Connected => "connect",
                    ChannelEvent::Disconnected => "disconnect",
                    ChannelEvent::Server(server_event) => server_event.event_name(),
                };
                controller.handle_channel_event(event);
                report(name, &controller.render());
                if name == "disconnect" {
                    break;
                }
            }
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read stdin")? else { break };
                match parse_command(&line) {
                    Some(Command::Action(action)) => {
                        if !controller.dispatch(action) {
                            println!("{action:?} is not available right now");
                        }
                    }
                    Some(Command::Show) => print!("{}", controller.render()),
                    Some(Command::Quit) => break,
                    None => println!("{HELP}"),
                }
            }
        }
    }

    Ok(())
}

fn report(event: &str, view: &DashboardView) {
    match event {
        "connect" => println!("connected"),
        "disconnect" => println!("disconnected; controls reset to stopped"),
        "update_ui" => {
            let Some(latest) = view.actions.first() else {
                return;
            };
            let lights = view
                .lights
                .iter()
                .zip(view.queues.iter())
                .map(|(light, queue)| {
                    let signal = if light.green_active { 'G' } else { 'R' };
                    format!("{}:{signal}{}", light.direction, queue.markers)
                })
                .collect::<Vec<_>>()
                .join(" ");
            println!(
                "{} | {} | waiting {} | {lights}",
                latest.headline, latest.reward, view.stats.waiting_time
            );
        }
        "episode_summary" => {
            if let Some(summary) = view.summaries.first() {
                println!("{}", summary.lines().join(" | "));
            }
        }
        "simulation_reset" => println!("simulation reset"),
        "training_status" => println!(
            "training mode {}",
            if view.controls.training_checked { "on" } else { "off" }
        ),
        _ => {}
    }
}
