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

//! Deferred single-click timers.
//!
//! A press inside a menu cannot act immediately, it might be the first half
//! of a double click. The dispatcher schedules the press here instead; once
//! the double-click window elapses the timer posts the press back onto the
//! event channel, so the deferred action still runs on the dispatch thread.
//!
//! Each scheduled click is guarded by a [`PendingClick`]: dropping the guard
//! disconnects the timer thread, which then exits without firing. Sequence
//! numbers let the dispatcher recognise a firing that raced its own
//! cancellation.

use std::{
    sync::mpsc::{self, RecvTimeoutError, Sender},
    thread,
    time::Duration,
};

use crate::{events::AppEvent, model::MenuMode};

pub(crate) struct ClickScheduler {
    event_tx: Sender<AppEvent>,
    next_seq: u64,
}

impl ClickScheduler {
    pub(crate) fn new(event_tx: Sender<AppEvent>) -> Self {
        Self { event_tx, next_seq: 0 }
    }

    /// Arms a one-shot timer that posts [`AppEvent::DeferredPress`] after
    /// `delay`, tagged with the mode it was armed in.
    pub(crate) fn schedule(&mut self, mode: MenuMode, delay: Duration) -> PendingClick {
        self.next_seq += 1;
        let seq = self.next_seq;
        let (cancel_tx, cancel_rx) = mpsc::channel::<()>();
        let event_tx = self.event_tx.clone();

        thread::spawn(move || {
            // Timeout means nobody cancelled us; anything else is a
            // dropped or signalled guard.
            if let Err(RecvTimeoutError::Timeout) = cancel_rx.recv_timeout(delay) {
                let _ = event_tx.send(AppEvent::DeferredPress { seq, mode });
            }
        });

        PendingClick { seq, _cancel_tx: cancel_tx }
    }
}

/// Guard for a scheduled click; dropping it cancels the timer.
pub(crate) struct PendingClick {
    seq: u64,
    _cancel_tx: Sender<()>,
}

impl PendingClick {
    pub(crate) fn seq(&self) -> u64 {
        self.seq
    }
}
