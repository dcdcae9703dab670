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

//! Simulated collaborator backends.
//!
//! These keep their state in memory and log what a real backend would do,
//! which is enough to run the whole wheel end to end without any OS
//! integration. Tests use them too.

use std::collections::HashMap;

use anyhow::{Context, Result};
use tracing::{debug, info};

use super::{
    BrightnessControl, GAIN_MAX_DB, GAIN_MIN_DB, MediaControl, MixerControl, MixerOutput,
    MixerStrip, ThemeControl, VolumeControl, WindowManager,
};
use crate::{
    config::{self, WheelConfig},
    model::WindowInfo,
    theme::{Rgb, Theme, ThemeElement},
};

pub(crate) struct SimVolume {
    level: u8,
    muted: bool,
}

impl SimVolume {
    pub(crate) fn new(level: u8) -> Self {
        Self { level: level.min(100), muted: false }
    }
}

impl VolumeControl for SimVolume {
    fn volume(&self) -> Result<u8> {
        Ok(self.level)
    }

    fn set_volume(&mut self, percent: u8) -> Result<()> {
        self.level = percent.min(100);
        debug!(level = self.level, "volume set");
        Ok(())
    }

    fn adjust_volume(&mut self, delta: i32) -> Result<()> {
        self.level = (self.level as i32 + delta).clamp(0, 100) as u8;
        debug!(level = self.level, delta, "volume adjusted");
        Ok(())
    }

    fn muted(&self) -> Result<bool> {
        Ok(self.muted)
    }

    fn toggle_mute(&mut self) -> Result<()> {
        self.muted = !self.muted;
        debug!(muted = self.muted, "mute toggled");
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct SimMedia {
    playing: bool,
}

impl MediaControl for SimMedia {
    fn play_pause(&mut self) -> Result<()> {
        self.playing = !self.playing;
        info!(playing = self.playing, "media play/pause");
        Ok(())
    }

    fn next_track(&mut self) -> Result<()> {
        info!("media next track");
        Ok(())
    }

    fn prev_track(&mut self) -> Result<()> {
        info!("media previous track");
        Ok(())
    }
}

pub(crate) struct SimWindows {
    windows: Vec<WindowInfo>,
}

impl SimWindows {
    pub(crate) fn new(windows: Vec<WindowInfo>) -> Self {
        Self { windows }
    }

    /// A plausible desktop for the demo frontend.
    pub(crate) fn with_demo_windows() -> Self {
        let titles = [
            "Terminal — ~/src/knobwheel",
            "Mozilla Firefox",
            "Files",
            "Logic Analyzer - capture_03.sal",
        ];
        Self::new(
            titles
                .iter()
                .enumerate()
                .map(|(id, title)| WindowInfo { id: id as u64 + 1, title: title.to_string() })
                .collect(),
        )
    }
}

impl WindowManager for SimWindows {
    fn visible_windows(&mut self) -> Result<Vec<WindowInfo>> {
        Ok(self.windows.clone())
    }

    fn activate(&mut self, id: u64) -> Result<bool> {
        let known = self.windows.iter().any(|w| w.id == id);
        if known {
            info!(id, "window activated");
        } else {
            debug!(id, "window vanished before activation");
        }
        Ok(known)
    }

    fn snap_left(&mut self) -> Result<()> {
        info!("window snapped left");
        Ok(())
    }

    fn snap_right(&mut self) -> Result<()> {
        info!("window snapped right");
        Ok(())
    }

    fn maximize(&mut self) -> Result<()> {
        info!("window maximized");
        Ok(())
    }

    fn show_desktop(&mut self) -> Result<()> {
        info!("desktop shown");
        Ok(())
    }
}

pub(crate) struct SimMixer {
    gains: HashMap<MixerStrip, f32>,
    mutes: HashMap<MixerStrip, bool>,
    routing: HashMap<(MixerStrip, MixerOutput), bool>,
}

impl Default for SimMixer {
    fn default() -> Self {
        let strips = [MixerStrip::Mic, MixerStrip::Main, MixerStrip::Music, MixerStrip::Comm];
        let mut routing = HashMap::new();
        for strip in strips {
            // everything starts routed to the speakers only
            routing.insert((strip, MixerOutput::A1), true);
            routing.insert((strip, MixerOutput::A2), false);
            routing.insert((strip, MixerOutput::A3), false);
        }
        Self {
            gains: strips.iter().map(|&s| (s, 0.0)).collect(),
            mutes: strips.iter().map(|&s| (s, false)).collect(),
            routing,
        }
    }
}

impl MixerControl for SimMixer {
    fn strip_gain(&self, strip: MixerStrip) -> Result<f32> {
        Ok(self.gains.get(&strip).copied().unwrap_or(0.0))
    }

    fn set_strip_gain(&mut self, strip: MixerStrip, gain_db: f32) -> Result<()> {
        let gain_db = gain_db.clamp(GAIN_MIN_DB, GAIN_MAX_DB);
        self.gains.insert(strip, gain_db);
        debug!(strip = strip.index(), gain_db, "strip gain set");
        Ok(())
    }

    fn adjust_strip_gain(&mut self, strip: MixerStrip, delta_db: f32) -> Result<()> {
        let current = self.strip_gain(strip)?;
        self.set_strip_gain(strip, current + delta_db)
    }

    fn strip_muted(&self, strip: MixerStrip) -> Result<bool> {
        Ok(self.mutes.get(&strip).copied().unwrap_or(false))
    }

    fn toggle_strip_mute(&mut self, strip: MixerStrip) -> Result<()> {
        let muted = !self.strip_muted(strip)?;
        self.mutes.insert(strip, muted);
        debug!(strip = strip.index(), muted, "strip mute toggled");
        Ok(())
    }

    fn routing(&self, strip: MixerStrip, output: MixerOutput) -> Result<bool> {
        Ok(self.routing.get(&(strip, output)).copied().unwrap_or(false))
    }

    fn toggle_routing(&mut self, strip: MixerStrip, output: MixerOutput) -> Result<()> {
        let enabled = !self.routing(strip, output)?;
        self.routing.insert((strip, output), enabled);
        debug!(strip = strip.index(), output = output.bus_name(), enabled, "routing toggled");
        Ok(())
    }
}

pub(crate) struct SimBrightness {
    percent: u8,
}

impl SimBrightness {
    pub(crate) fn new(percent: u8) -> Self {
        Self { percent: percent.min(100) }
    }
}

impl BrightnessControl for SimBrightness {
    fn brightness(&self) -> Result<u8> {
        Ok(self.percent)
    }

    fn set_brightness(&mut self, percent: u8) -> Result<()> {
        self.percent = percent.min(100);
        debug!(percent = self.percent, "brightness set");
        Ok(())
    }

    fn adjust_brightness(&mut self, delta: i32) -> Result<()> {
        self.percent = (self.percent as i32 + delta).clamp(0, 100) as u8;
        debug!(percent = self.percent, delta, "brightness adjusted");
        Ok(())
    }

    fn power_off(&mut self) -> Result<()> {
        info!("monitors powered off");
        Ok(())
    }
}

/// Theme persistence backed by the application configuration file.
pub(crate) struct ThemeStore {
    config: WheelConfig,
    theme: Theme,
}

impl ThemeStore {
    pub(crate) fn new(config: WheelConfig) -> Self {
        let theme = config.active_theme();
        Self { config, theme }
    }
}

impl ThemeControl for ThemeStore {
    fn apply(&mut self, element: ThemeElement, colour: Rgb) -> Result<()> {
        self.theme.apply(element, colour);
        Ok(())
    }

    fn save(&mut self) -> Result<()> {
        self.config.custom_theme = Some(self.theme);
        config::save_config(&self.config).context("saving patched theme")?;
        info!("theme saved");
        Ok(())
    }
}
