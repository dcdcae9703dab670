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

//! The overlay seam and a line-printing implementation for the demo.
//!
//! The dispatcher never renders anything itself; it hands display payload
//! snapshots and timed notifications to an [`OverlayDelegate`]. The real
//! product drives a radial on-screen overlay through this seam;
//! [`TermOverlay`] paints a single status line with ANSI escapes instead,
//! which is plenty for exercising the engine from a terminal.

use std::{
    io::{self, Write},
    time::Duration,
};

use crate::{
    model::{DisplayPayload, Slot},
    theme::Theme,
};

/// Receiver of display refreshes and notifications.
///
/// Both callbacks are invoked synchronously on the dispatch thread and must
/// not block for long.
pub(crate) trait OverlayDelegate {
    fn show_menu(&mut self, payload: &DisplayPayload);
    fn show_notification(&mut self, message: &str, duration: Duration);
}

/// Status-line overlay for running the wheel inside a terminal.
pub(crate) struct TermOverlay {
    theme: Theme,
}

impl TermOverlay {
    pub(crate) fn new(theme: Theme) -> Self {
        Self { theme }
    }

    fn slot_text(payload: &DisplayPayload, slot: Slot) -> String {
        let (icon, label) = match slot {
            Slot::Left => (payload.icons.as_ref().map(|i| i.left), &payload.left),
            Slot::Center => (payload.icons.as_ref().map(|i| i.center), &payload.center),
            Slot::Right => (payload.icons.as_ref().map(|i| i.right), &payload.right),
        };
        let text = match icon {
            Some(icon) if !icon.is_empty() => format!("{icon} {label}"),
            _ => label.clone(),
        };
        if payload.active_slot == Some(slot) {
            // bold pulse for the slot that just acted
            format!("\x1b[1m{text}\x1b[22m")
        } else {
            text
        }
    }
}

impl OverlayDelegate for TermOverlay {
    fn show_menu(&mut self, payload: &DisplayPayload) {
        if let Some((element, colour)) = payload.theme_patch {
            self.theme.apply(element, colour);
        }
        let accent = self.theme.accent_colour;

        let mut line = String::new();
        if let Some(title) = &payload.title {
            line.push_str(title);
            line.push_str("  ");
        }
        line.push_str(&format!(
            "{}  \x1b[38;2;{};{};{}m{}\x1b[0m  {}",
            Self::slot_text(payload, Slot::Left),
            accent.0,
            accent.1,
            accent.2,
            Self::slot_text(payload, Slot::Center),
            Self::slot_text(payload, Slot::Right),
        ));
        if let Some(progress) = payload.progress {
            line.push_str("  ");
            line.push_str(&progress_bar(progress));
        }

        print!("\r\x1b[2K  {line}");
        io::stdout().flush().ok();
    }

    fn show_notification(&mut self, message: &str, duration: Duration) {
        print!("\r\x1b[2K» {message}  ({} ms)\r\n", duration.as_millis());
        io::stdout().flush().ok();
    }
}

fn progress_bar(fraction: f64) -> String {
    const WIDTH: usize = 10;
    let filled = (fraction.clamp(0.0, 1.0) * WIDTH as f64).round() as usize;
    format!("[{}{}]", "█".repeat(filled), "░".repeat(WIDTH - filled))
}
