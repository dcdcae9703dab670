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

//! Domain models and core data structures.
//!
//! This module defines the central entities of the application—menu modes,
//! the wheel state record owned by the dispatch thread, and the display
//! payload snapshots handed to the overlay.

use std::time::Instant;

use crate::theme::{Rgb, ThemeElement};

pub(crate) mod registry;

/// Modes of the command wheel.
///
/// `Normal` is command selection; the rest are menu levels and leaf
/// controls entered through registered commands and submenu selectors.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub(crate) enum MenuMode {
    #[default]
    Normal,

    Media,
    Volume,

    WindowMenu,
    WindowCycle,
    WindowSnap,

    MixerMenu,
    MixerMic,
    MixerMainRouting,
    MixerMusicGain,
    MixerMusicRouting,
    MixerCommGain,
    MixerCommRouting,

    ThemeMenu,
    ThemeBox,
    ThemeAccent,
    ThemeText,

    DisplayMenu,
    DisplayBrightness,
}

/// A window known to the window-management backend.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct WindowInfo {
    pub(crate) id: u64,
    pub(crate) title: String,
}

/// Mutable wheel state, owned exclusively by the dispatch thread.
///
/// `last_activity` is populated exactly while a menu is open; it is `None`
/// in [`MenuMode::Normal`], which is what makes the inactivity predicate
/// trivially false there. `window_list` is a cache populated by the
/// window-cycle mode on entry and cleared on exit; it is only meaningful
/// within that mode.
#[derive(Debug)]
pub(crate) struct WheelState {
    pub(crate) current_command: usize,
    pub(crate) previous_command: usize,
    pub(crate) mode: MenuMode,
    pub(crate) submenu_index: usize,
    pub(crate) routing_selection: usize,
    pub(crate) click_count: u8,
    pub(crate) last_click: Option<Instant>,
    pub(crate) last_rotation_index: Option<u8>,
    pub(crate) last_activity: Option<Instant>,
    pub(crate) window_list: Vec<WindowInfo>,
}

impl Default for WheelState {
    fn default() -> Self {
        Self {
            current_command: 0,
            previous_command: 0,
            mode: MenuMode::Normal,
            submenu_index: 0,
            routing_selection: 0,
            click_count: 0,
            last_click: None,
            last_rotation_index: None,
            last_activity: None,
            window_list: Vec::new(),
        }
    }
}

/// The three label positions on the overlay.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Slot {
    Left,
    Center,
    Right,
}

/// Per-slot icon hints.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct SlotIcons {
    pub(crate) left: &'static str,
    pub(crate) center: &'static str,
    pub(crate) right: &'static str,
}

/// A display snapshot handed to the overlay.
///
/// Payloads are built by value from the current state; the overlay never
/// sees live state. `theme_patch` carries a live re-colour directive while
/// a theme picker is scrolling.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct DisplayPayload {
    pub(crate) left: String,
    pub(crate) center: String,
    pub(crate) right: String,
    pub(crate) title: Option<String>,
    pub(crate) progress: Option<f64>,
    pub(crate) icons: Option<SlotIcons>,
    pub(crate) active_slot: Option<Slot>,
    pub(crate) theme_patch: Option<(ThemeElement, Rgb)>,
}
