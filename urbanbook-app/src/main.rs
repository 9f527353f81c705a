use std::time::Duration;

use anyhow::{Context, Result};
use env_logger::{Builder, Target};
use log::{LevelFilter, debug, info};
use tokio::time::{self, Instant};

use urbanbook_app::AppConfig;
use urbanbook_app::domains::welcome::WelcomeScreen;
use urbanbook_app::infra::constants::welcome;
use urbanbook_carousel::{
    CarouselCommand, CarouselEffect, CarouselOverrides, VirtualIndex,
    spawn_carousel,
};

fn init_logger() {
    Builder::new()
        .target(Target::Stdout)
        .filter_level(LevelFilter::Warn)
        .filter_module("urbanbook_app", LevelFilter::Debug)
        .filter_module("urbanbook_welcome", LevelFilter::Debug)
        .filter_module("urbanbook_carousel", LevelFilter::Info)
        .init();
}

async fn sleep_until_arrival(arrival: Option<(VirtualIndex, Instant)>) {
    match arrival {
        Some((_, at)) => time::sleep_until(at).await,
        None => std::future::pending().await,
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    if std::env::var("RUST_LOG").is_err() {
        init_logger();
    } else {
        env_logger::init();
    }

    let config = AppConfig::from_environment();
    info!(
        "[Welcome] server {}, running for {:?}",
        config.server_url, config.demo_duration
    );

    let mut screen = WelcomeScreen::default();
    let carousel = CarouselOverrides {
        auto_scroll_interval_ms: Some(
            config
                .carousel
                .auto_scroll_interval_ms
                .unwrap_or(welcome::AUTO_SCROLL_INTERVAL_MS),
        ),
        ..config.carousel.clone()
    }
    .resolve()
    .context("invalid carousel configuration")?;

    let mut handle = spawn_carousel(screen.events().len(), carousel)
        .context("failed to mount welcome carousel")?;

    let snap = Duration::from_millis(welcome::SIMULATED_SNAP_MS);
    let demo_end = time::sleep(config.demo_duration);
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(demo_end, ctrl_c);
    let mut arrival: Option<(VirtualIndex, Instant)> = None;

    loop {
        tokio::select! {
            () = &mut demo_end => break,
            _ = &mut ctrl_c => {
                info!("[Welcome] interrupted");
                break;
            }
            () = sleep_until_arrival(arrival), if arrival.is_some() => {
                if let Some((index, _)) = arrival.take() {
                    handle.send(CarouselCommand::Settled(index));
                }
            }
            effect = handle.next_effect() => match effect {
                None => break,
                Some(CarouselEffect::ScrollTo { index, animated: true }) => {
                    debug!("[Welcome] scrolling to {}", index);
                    arrival = Some((index, Instant::now() + snap));
                }
                Some(CarouselEffect::ScrollTo { index, animated: false }) => {
                    debug!("[Welcome] jumped to {}", index);
                }
                Some(CarouselEffect::Pulse(pulse)) => {
                    debug!("[Welcome] pulse {:?}", pulse);
                }
                Some(CarouselEffect::IndexChanged(index)) => {
                    screen.on_index_change(index);
                    if let Some(event) = screen.background() {
                        info!(
                            "[Welcome] showing #{} {}",
                            event.id, event.title
                        );
                    }
                }
            },
        }
    }

    if let Some(state) = handle.shutdown().await {
        info!(
            "[Welcome] carousel stopped at {} ({:?})",
            state.active, state.phase
        );
    }
    Ok(())
}
