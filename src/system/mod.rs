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

//! Capability interfaces for the system collaborators handlers drive.
//!
//! The wheel core never talks to the operating system itself; mode handlers
//! hold shared handles to these traits. Real device and OS backends live
//! behind the same seams as the simulated ones in [`sim`], so handlers and
//! tests are indifferent to which is wired in.
//!
//! Backends that can be absent (the routing mixer is optional on most
//! machines) are probed once during setup; dependent commands and handlers
//! are simply not registered when the probe fails.

use std::sync::{Arc, Mutex};

use anyhow::Result;

use crate::{
    model::WindowInfo,
    theme::{Rgb, ThemeElement},
};

pub(crate) mod sim;

/// Master output volume.
pub(crate) trait VolumeControl: Send {
    /// Current volume in percent, 0..=100.
    fn volume(&self) -> Result<u8>;
    fn set_volume(&mut self, percent: u8) -> Result<()>;
    /// Steps the volume, clamping at both ends.
    fn adjust_volume(&mut self, delta: i32) -> Result<()>;
    fn muted(&self) -> Result<bool>;
    fn toggle_mute(&mut self) -> Result<()>;
}

/// Media transport keys.
pub(crate) trait MediaControl: Send {
    fn play_pause(&mut self) -> Result<()>;
    fn next_track(&mut self) -> Result<()>;
    fn prev_track(&mut self) -> Result<()>;
}

/// Window enumeration and placement.
pub(crate) trait WindowManager: Send {
    /// Windows eligible for cycling, in z-order.
    fn visible_windows(&mut self) -> Result<Vec<WindowInfo>>;
    /// Brings a window to the foreground; `false` when the window is gone.
    fn activate(&mut self, id: u64) -> Result<bool>;
    fn snap_left(&mut self) -> Result<()>;
    fn snap_right(&mut self) -> Result<()>;
    fn maximize(&mut self) -> Result<()>;
    fn show_desktop(&mut self) -> Result<()>;
}

/// Mixer strips the wheel exposes.
///
/// `index` maps to the mixer's own strip numbering: the microphone is the
/// first hardware input, the main/music/comm strips are virtual inputs.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub(crate) enum MixerStrip {
    Mic,
    Main,
    Music,
    Comm,
}

impl MixerStrip {
    pub(crate) fn index(self) -> u8 {
        match self {
            MixerStrip::Mic => 0,
            MixerStrip::Main => 5,
            MixerStrip::Music => 6,
            MixerStrip::Comm => 7,
        }
    }
}

/// Hardware output buses of the mixer.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub(crate) enum MixerOutput {
    A1,
    A2,
    A3,
}

impl MixerOutput {
    pub(crate) const ALL: [MixerOutput; 3] = [MixerOutput::A1, MixerOutput::A2, MixerOutput::A3];

    pub(crate) fn bus_name(self) -> &'static str {
        match self {
            MixerOutput::A1 => "A1",
            MixerOutput::A2 => "A2",
            MixerOutput::A3 => "A3",
        }
    }
}

/// Strip gain range the mixer accepts, in dB.
pub(crate) const GAIN_MIN_DB: f32 = -60.0;
pub(crate) const GAIN_MAX_DB: f32 = 12.0;

/// Audio-routing mixer with per-strip gain, mute and output routing.
pub(crate) trait MixerControl: Send {
    fn strip_gain(&self, strip: MixerStrip) -> Result<f32>;
    fn set_strip_gain(&mut self, strip: MixerStrip, gain_db: f32) -> Result<()>;
    /// Steps the gain, clamping to `GAIN_MIN_DB..=GAIN_MAX_DB`.
    fn adjust_strip_gain(&mut self, strip: MixerStrip, delta_db: f32) -> Result<()>;
    fn strip_muted(&self, strip: MixerStrip) -> Result<bool>;
    fn toggle_strip_mute(&mut self, strip: MixerStrip) -> Result<()>;
    fn routing(&self, strip: MixerStrip, output: MixerOutput) -> Result<bool>;
    fn toggle_routing(&mut self, strip: MixerStrip, output: MixerOutput) -> Result<()>;
}

/// Monitor brightness and power.
pub(crate) trait BrightnessControl: Send {
    /// Current brightness in percent, 0..=100.
    fn brightness(&self) -> Result<u8>;
    fn set_brightness(&mut self, percent: u8) -> Result<()>;
    fn adjust_brightness(&mut self, delta: i32) -> Result<()>;
    /// Puts the attached monitors to sleep.
    fn power_off(&mut self) -> Result<()>;
}

/// Overlay theme persistence: live element re-colouring plus saving the
/// patched palette.
pub(crate) trait ThemeControl: Send {
    fn apply(&mut self, element: ThemeElement, colour: Rgb) -> Result<()>;
    fn save(&mut self) -> Result<()>;
}

/// The collaborator handles handed to the built-in handler factory.
///
/// All handles are shared; handler callbacks run on the dispatch thread
/// only, the mutexes exist so that a polling backend may own a handle too.
#[derive(Clone)]
pub(crate) struct Backends {
    pub(crate) volume: Arc<Mutex<dyn VolumeControl>>,
    pub(crate) media: Arc<Mutex<dyn MediaControl>>,
    pub(crate) windows: Arc<Mutex<dyn WindowManager>>,
    pub(crate) mixer: Option<Arc<Mutex<dyn MixerControl>>>,
    pub(crate) theme: Arc<Mutex<dyn ThemeControl>>,
}
