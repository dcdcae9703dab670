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

//! Application events and the dispatch loop.
//!
//! Everything that happens to the wheel arrives here as an [`AppEvent`]:
//! gestures from the report reader, deferred clicks from their timers and
//! the heartbeat of the timeout poller. The loop is the single consumer of
//! the channel and the only code that touches wheel state.

use std::sync::mpsc::Receiver;

use anyhow::Result;
use tracing::warn;

use crate::{decoder::GestureEvent, model::MenuMode, wheel::MenuWheel};

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum AppEvent {
    /// A decoded gesture from the report reader.
    Gesture(GestureEvent),

    /// A deferred single click whose double-click window elapsed. `seq` and
    /// `mode` are re-validated against the dispatcher's pending click.
    DeferredPress { seq: u64, mode: MenuMode },

    /// Heartbeat of the timeout poller.
    Tick,

    /// A producer thread failed.
    Error(String),

    ExitApplication,
}

/// Runs the dispatch loop until a quit event arrives or every producer has
/// hung up.
///
/// The loop seals the command registry before consuming its first event;
/// from then on the wheel order is fixed.
pub(crate) fn process_events(event_rx: &Receiver<AppEvent>, wheel: &mut MenuWheel) -> Result<()> {
    wheel.start();

    while let Ok(event) = event_rx.recv() {
        match event {
            AppEvent::Gesture(gesture) => wheel.handle_gesture(gesture),
            AppEvent::DeferredPress { seq, mode } => wheel.handle_deferred_press(seq, mode),
            AppEvent::Tick => wheel.handle_tick(),
            AppEvent::Error(message) => {
                warn!(%message, "producer thread reported an error");
                wheel.show_error(&message);
            }
            AppEvent::ExitApplication => break,
        }
    }

    Ok(())
}
