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

//! Mode handlers, one per interactive wheel mode.
//!
//! Each non-normal mode owns a [`ModeHandler`]: the dispatcher forwards
//! directed rotations and confirmed presses to the handler for the current
//! mode and asks it for a fresh [`DisplayPayload`] after every change.
//! Handlers never call back into the dispatcher; when a press should move
//! the wheel somewhere else they return a [`ModeAction`] and the dispatcher
//! performs the transition itself.

use anyhow::Result;

use crate::{
    config::WheelConfig,
    model::{DisplayPayload, MenuMode, WheelState, registry::Command},
    system::{Backends, MixerStrip},
    theme::ThemeElement,
};

pub(crate) mod media;
pub(crate) mod menu;
pub(crate) mod mixer;
pub(crate) mod theme;
pub(crate) mod volume;
pub(crate) mod window;

use media::MediaHandler;
use mixer::{GainHandler, MicHandler, RoutingHandler};
use theme::ThemeColourHandler;
use volume::VolumeHandler;
use window::{WindowCycleHandler, WindowSnapHandler};

/// Transition requested by a handler in response to a confirmed press.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum ModeAction {
    /// Move to another mode, e.g. from a menu into one of its leaves.
    Enter(MenuMode),
    /// Leave the menu system and return the wheel to normal mode.
    ExitMenu,
}

/// Behaviour of a single wheel mode.
pub(crate) trait ModeHandler {
    /// Called when the wheel enters this mode, before the first display
    /// refresh. Handlers that track per-visit state reset it here.
    fn on_enter(&mut self, _state: &mut WheelState) {}

    /// Called when the wheel leaves this mode for any reason.
    fn on_exit(&mut self, _state: &mut WheelState) {}

    /// A rotation step with an established direction.
    fn on_rotation(&mut self, state: &mut WheelState, clockwise: bool) -> Result<()>;

    /// A confirmed single press. Returning `Some` asks the dispatcher to
    /// transition; `None` keeps the wheel in this mode.
    fn on_press(&mut self, state: &mut WheelState) -> Result<Option<ModeAction>>;

    /// Snapshot of what the overlay should show for the current state.
    fn display(&self, state: &WheelState) -> DisplayPayload;
}

/// Advances `index` one step around a ring of `len` entries.
pub(crate) fn step(index: usize, len: usize, clockwise: bool) -> usize {
    if len == 0 {
        return 0;
    }
    if clockwise { (index + 1) % len } else { (index + len - 1) % len }
}

/// The entries either side of `index` on a ring of `len` entries.
pub(crate) fn neighbours(index: usize, len: usize) -> (usize, usize) {
    if len == 0 {
        return (0, 0);
    }
    ((index + len - 1) % len, (index + 1) % len)
}

/// The commands every installation gets on the normal-mode ring.
pub(crate) fn builtin_commands(mixer_available: bool) -> Vec<Command> {
    let mut commands = vec![
        Command::mode("Media Controls", "Play/pause and track skipping", MenuMode::Media),
        Command::mode("Volume", "System volume and mute", MenuMode::Volume),
        Command::mode("Window Management", "Cycle, snap and tile windows", MenuMode::WindowMenu),
        Command::mode("Theme Settings", "Recolour the overlay", MenuMode::ThemeMenu),
    ];
    if mixer_available {
        commands.push(Command::mode(
            "Audio Mixer",
            "Mixer strip gain and routing",
            MenuMode::MixerMenu,
        ));
    }
    commands
}

/// Builds the handler for every mode the built-in commands can reach.
///
/// Mixer modes are only wired up when a mixer backend is present; without
/// one the Audio Mixer command is not registered either, so the missing
/// handlers are unreachable.
pub(crate) fn builtin_handlers(
    cfg: &WheelConfig,
    backends: &Backends,
) -> Vec<(MenuMode, Box<dyn ModeHandler>)> {
    let mut handlers: Vec<(MenuMode, Box<dyn ModeHandler>)> = vec![
        (MenuMode::Media, Box::new(MediaHandler::new(backends.media.clone()))),
        (
            MenuMode::Volume,
            Box::new(VolumeHandler::new(backends.volume.clone(), cfg.volume_step)),
        ),
        (MenuMode::WindowMenu, Box::new(window::window_menu(backends.windows.clone()))),
        (
            MenuMode::WindowCycle,
            Box::new(WindowCycleHandler::new(backends.windows.clone(), cfg.window_title_chars)),
        ),
        (MenuMode::WindowSnap, Box::new(WindowSnapHandler::new(backends.windows.clone()))),
        (MenuMode::ThemeMenu, Box::new(theme::theme_menu())),
        (
            MenuMode::ThemeBox,
            Box::new(ThemeColourHandler::new(backends.theme.clone(), ThemeElement::Box)),
        ),
        (
            MenuMode::ThemeAccent,
            Box::new(ThemeColourHandler::new(backends.theme.clone(), ThemeElement::Accent)),
        ),
        (
            MenuMode::ThemeText,
            Box::new(ThemeColourHandler::new(backends.theme.clone(), ThemeElement::Text)),
        ),
    ];
    if let Some(mixer) = &backends.mixer {
        handlers.push((MenuMode::MixerMenu, Box::new(mixer::mixer_menu())));
        handlers.push((
            MenuMode::MixerMic,
            Box::new(MicHandler::new(mixer.clone(), cfg.gain_step_db)),
        ));
        handlers.push((
            MenuMode::MixerMainRouting,
            Box::new(RoutingHandler::new(mixer.clone(), MixerStrip::Main, "Main")),
        ));
        handlers.push((
            MenuMode::MixerMusicGain,
            Box::new(GainHandler::new(mixer.clone(), MixerStrip::Music, "Music", "🎵", cfg.gain_step_db)),
        ));
        handlers.push((
            MenuMode::MixerMusicRouting,
            Box::new(RoutingHandler::new(mixer.clone(), MixerStrip::Music, "Music")),
        ));
        handlers.push((
            MenuMode::MixerCommGain,
            Box::new(GainHandler::new(mixer.clone(), MixerStrip::Comm, "Comm", "💬", cfg.gain_step_db)),
        ));
        handlers.push((
            MenuMode::MixerCommRouting,
            Box::new(RoutingHandler::new(mixer.clone(), MixerStrip::Comm, "Comm")),
        ));
    }
    handlers
}
