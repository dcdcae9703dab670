// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! # Knobwheel.
//!
//! Host-side engine for a rotary-encoder command wheel.
//!
//! A knob with a push switch drives a modal menu system: in normal mode the
//! wheel position selects a command, a press activates it, and the leaf
//! modes behind the commands adjust volume, skip tracks, juggle windows,
//! steer an audio mixer and re-colour the overlay.
//!
//! It uses an event-driven architecture where:
//!
//! * The **Main Thread** runs the dispatch loop and owns every piece of
//!   mutable wheel state.
//! * **Producer Threads** feed the loop over an `std::sync::mpsc` channel:
//!   the report reader decodes device frames into gestures, deferred-click
//!   timers post presses whose double-click window elapsed, and a tick
//!   thread paces the inactivity poller.
//!
//! ## Demo frontend
//!
//! This binary stands in for the HID transport with a raw-mode keyboard
//! reader: arrow keys fabricate rotation reports against an absolute
//! position counter, space presses the knob, `d` double-taps, `l`
//! long-presses and `q` quits. The frames go through the same decoder a
//! real transport would feed.

mod config;
mod decoder;
mod events;
mod model;
mod modes;
mod overlay;
mod plugin;
mod system;
mod theme;
mod timer;
mod util;
mod wheel;

use std::{
    io,
    sync::{
        Arc, Mutex,
        mpsc::{self, Receiver, Sender},
    },
    thread,
    time::Duration,
};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode},
};
use tracing_subscriber::EnvFilter;

use crate::{
    config::WheelConfig,
    decoder::event_code,
    events::{AppEvent, process_events},
    model::registry::CommandRegistry,
    overlay::TermOverlay,
    plugin::{Plugin, display::DisplayPlugin},
    system::{Backends, BrightnessControl, MixerControl},
    wheel::MenuWheel,
};

/// The entry point of the application.
///
/// Sets up logging and the event channel, assembles the wheel from the
/// simulated backends, manages the terminal raw mode, and returns an error
/// if any part of the execution fails.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cfg = config::load_config();

    let (event_tx, event_rx) = mpsc::channel();
    let mut wheel = build_wheel(&cfg, event_tx.clone()).context("Failed to assemble the wheel")?;

    println!("knobwheel — ←/→ rotate, space press, d double-tap, l long-press, q quit");

    enable_raw_mode().context("Failed to enable raw mode")?;
    let res = run(&cfg, event_tx, &event_rx, &mut wheel);
    disable_raw_mode().ok();
    println!();

    res.context("Application error occurred")
}

/// Assembles registry, handlers and overlay into a ready-to-start wheel.
///
/// Built-in commands register first, then each plugin appends its own; the
/// wheel order is frozen when dispatch starts. The mixer backend is probed
/// here: when it is absent the Audio Mixer command and every mixer mode
/// stay unregistered rather than failing on first use.
fn build_wheel(cfg: &WheelConfig, event_tx: Sender<AppEvent>) -> Result<MenuWheel> {
    let mixer: Option<Arc<Mutex<dyn MixerControl>>> =
        Some(Arc::new(Mutex::new(system::sim::SimMixer::default())));
    let backends = Backends {
        volume: Arc::new(Mutex::new(system::sim::SimVolume::new(50))),
        media: Arc::new(Mutex::new(system::sim::SimMedia::default())),
        windows: Arc::new(Mutex::new(system::sim::SimWindows::with_demo_windows())),
        mixer,
        theme: Arc::new(Mutex::new(system::sim::ThemeStore::new(cfg.clone()))),
    };

    let mut registry = CommandRegistry::new();
    for command in modes::builtin_commands(backends.mixer.is_some()) {
        registry.register(command)?;
    }
    let mut handlers = modes::builtin_handlers(cfg, &backends);

    let brightness: Arc<Mutex<dyn BrightnessControl>> =
        Arc::new(Mutex::new(system::sim::SimBrightness::new(70)));
    let plugins: Vec<Box<dyn Plugin>> =
        vec![Box::new(DisplayPlugin::new(brightness, cfg.brightness_step))];
    plugin::install(plugins, &mut registry, &mut handlers)?;

    let overlay = Box::new(TermOverlay::new(cfg.active_theme()));
    Ok(MenuWheel::new(cfg, registry, handlers, overlay, event_tx))
}

/// Starts the producer threads and enters the dispatch loop.
///
/// Spawns the keyboard reader standing in for the HID transport and the
/// tick thread pacing the inactivity poller, then hands control to
/// [`process_events`] until the user quits or every producer has hung up.
fn run(
    cfg: &WheelConfig,
    event_tx: Sender<AppEvent>,
    event_rx: &Receiver<AppEvent>,
    wheel: &mut MenuWheel,
) -> Result<()> {
    // The firmware reports positions modulo the command count; the keyboard
    // stand-in has to wrap its counter the same way.
    let modulus = wheel.command_count().max(1) as u8;

    // Spawn a thread to translate keyboard input into fabricated device
    // reports and feed them through the decoder.
    let tx_keys = event_tx.clone();
    thread::spawn(move || {
        let mut position: u8 = 0;
        loop {
            match event::read() {
                Ok(event::Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    let report = match key.code {
                        KeyCode::Right | KeyCode::Up => {
                            position = (position + 1) % modulus;
                            Some(decoder::build_report(event_code::ROTATE_CW, position, 0))
                        }
                        KeyCode::Left | KeyCode::Down => {
                            position = (position + modulus - 1) % modulus;
                            Some(decoder::build_report(event_code::ROTATE_CCW, position, 0))
                        }
                        KeyCode::Char(' ') => Some(decoder::build_report(event_code::PRESS, 0, 0)),
                        KeyCode::Char('d') => {
                            Some(decoder::build_report(event_code::DOUBLE_TAP, 0, 0))
                        }
                        KeyCode::Char('l') => {
                            Some(decoder::build_report(event_code::LONG_PRESS, 0, 0))
                        }
                        KeyCode::Char('q') | KeyCode::Esc => {
                            tx_keys.send(AppEvent::ExitApplication).ok();
                            break;
                        }
                        _ => None,
                    };
                    if let Some(report) = report {
                        if let Some(gesture) = decoder::decode_report(&report) {
                            if tx_keys.send(AppEvent::Gesture(gesture)).is_err() {
                                break;
                            }
                        }
                    }
                }
                Ok(_) => {}
                Err(err) => {
                    let _ = tx_keys.send(AppEvent::Error(format!("keyboard input failed: {err}")));
                    break;
                }
            }
        }
    });

    // Spawn a thread to send a periodic tick application event; this paces
    // the inactivity auto-exit, which is level-triggered, so a late tick
    // merely delays it.
    let tx_tick = event_tx;
    let tick = Duration::from_millis(cfg.tick_ms);
    thread::spawn(move || {
        loop {
            if tx_tick.send(AppEvent::Tick).is_err() {
                break;
            }
            thread::sleep(tick);
        }
    });

    // Application event loop, process events until the user quits
    process_events(event_rx, wheel)
}
