use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use raylib::prelude::*;
use tracing::info;

mod app;
mod auth;
mod config;
mod constants;
mod deck;
mod draw;
mod engine;
mod grid;
mod host;
mod input;
mod moon;
mod render;
mod state;
mod texture_loader;

use crate::app::{App, Settings};
use crate::auth::{AccessGate, FileJar, MarkerPolicy, SharedSecret};
use crate::config::{Args, Config};
use crate::constants::*;
use crate::input::InputCollector;
use crate::render::Painter;
use crate::texture_loader::load_optional;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = Config::from(Args::parse());
    info!(backdrop = ?config.backdrop, seed = config.seed, session = %config.session_file.display(), "starting");

    let (mut rl, thread) = raylib::init()
        .size(config.width, config.height)
        .title("Pitch Deck")
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(config.fps);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);

    let mut painter = Painter::new();
    if let Some(path) = &config.logo {
        if let Some(texture) = load_optional(&mut rl, &thread, path) {
            painter.register_image("logo", texture);
        }
    }

    let gate = AccessGate::new(
        SharedSecret::new(ACCESS_PASSWORD),
        FileJar::open(&config.session_file),
        MarkerPolicy::new(config.domain.clone(), config.secure_cookie),
    );
    let settings = Settings {
        backdrop: config.backdrop,
        seed: config.seed,
        debounce: config.debounce,
        show_logo: painter.has_image("logo"),
    };

    let started = Instant::now();
    let mut app = App::new(gate, settings, input::viewport(&rl), started.elapsed());
    let mut collector = InputCollector::new();

    // --- Main Loop ---
    while !rl.window_should_close() {
        let now = started.elapsed();
        for event in collector.collect(&mut rl) {
            app.handle(&event, now);
        }

        let layers = app.frame(now, rl.get_frame_time());
        painter.prepare(&mut rl, &thread, &layers);

        let mut d = rl.begin_drawing(&thread);
        d.clear_background(draw::background());
        painter.paint(&mut d, &layers);
    }

    let unlocked = app.is_unlocked();
    app.shutdown();
    info!(unlocked, "window closed");
    Ok(())
}
