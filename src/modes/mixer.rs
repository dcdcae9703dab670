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

//! Audio mixer modes: strip gain, mic mute and output routing.
//!
//! Gain modes rotate the strip level in configurable dB steps; a press
//! means "mute" on the microphone strip and "reset to unity" on the
//! playback strips. Routing modes rotate through the physical outputs and
//! toggle the selected one on press, so a strip can feed speakers,
//! wired and wireless headsets in any combination.

use std::sync::{Arc, Mutex};

use anyhow::Result;

use super::{
    ModeAction, ModeHandler,
    menu::{MenuEntry, MenuSelector},
    neighbours, step,
};
use crate::{
    model::{DisplayPayload, MenuMode, SlotIcons, WheelState},
    system::{GAIN_MAX_DB, GAIN_MIN_DB, MixerControl, MixerOutput, MixerStrip},
    util::format::format_db,
};

/// The intermediate menu reached from the Audio Mixer command.
pub(crate) fn mixer_menu() -> MenuSelector {
    MenuSelector::new(
        Some("🎚 Audio Mixer"),
        vec![
            MenuEntry::Mode("Microphone Control", MenuMode::MixerMic),
            MenuEntry::Mode("Main Routing", MenuMode::MixerMainRouting),
            MenuEntry::Mode("Music Gain", MenuMode::MixerMusicGain),
            MenuEntry::Mode("Music Routing", MenuMode::MixerMusicRouting),
            MenuEntry::Mode("Comm Gain", MenuMode::MixerCommGain),
            MenuEntry::Mode("Comm Routing", MenuMode::MixerCommRouting),
        ],
    )
}

fn gain_fraction(gain_db: f32) -> f64 {
    f64::from((gain_db - GAIN_MIN_DB) / (GAIN_MAX_DB - GAIN_MIN_DB)).clamp(0.0, 1.0)
}

/// Microphone strip: rotate for gain, press to mute.
pub(crate) struct MicHandler {
    mixer: Arc<Mutex<dyn MixerControl>>,
    step_db: f32,
}

impl MicHandler {
    pub(crate) fn new(mixer: Arc<Mutex<dyn MixerControl>>, step_db: f32) -> Self {
        Self { mixer, step_db }
    }
}

impl ModeHandler for MicHandler {
    fn on_rotation(&mut self, _state: &mut WheelState, clockwise: bool) -> Result<()> {
        let delta = if clockwise { self.step_db } else { -self.step_db };
        self.mixer.lock().unwrap().adjust_strip_gain(MixerStrip::Mic, delta)
    }

    fn on_press(&mut self, _state: &mut WheelState) -> Result<Option<ModeAction>> {
        self.mixer.lock().unwrap().toggle_strip_mute(MixerStrip::Mic)?;
        Ok(None)
    }

    fn display(&self, _state: &WheelState) -> DisplayPayload {
        let (gain, muted) = {
            let mixer = self.mixer.lock().unwrap();
            (
                mixer.strip_gain(MixerStrip::Mic).unwrap_or(0.0),
                mixer.strip_muted(MixerStrip::Mic).unwrap_or(false),
            )
        };
        DisplayPayload {
            left: "Quieter".to_string(),
            center: format_db(gain),
            right: "Louder".to_string(),
            title: Some(if muted { "🎤 MIC MUTED" } else { "🎤 Microphone" }.to_string()),
            progress: Some(gain_fraction(gain)),
            icons: Some(SlotIcons {
                left: "−",
                center: if muted { "🔇" } else { "🎤" },
                right: "+",
            }),
            ..Default::default()
        }
    }
}

/// Playback strip gain: rotate to adjust, press to reset to unity.
pub(crate) struct GainHandler {
    mixer: Arc<Mutex<dyn MixerControl>>,
    strip: MixerStrip,
    label: &'static str,
    icon: &'static str,
    step_db: f32,
}

impl GainHandler {
    pub(crate) fn new(
        mixer: Arc<Mutex<dyn MixerControl>>,
        strip: MixerStrip,
        label: &'static str,
        icon: &'static str,
        step_db: f32,
    ) -> Self {
        Self { mixer, strip, label, icon, step_db }
    }
}

impl ModeHandler for GainHandler {
    fn on_rotation(&mut self, _state: &mut WheelState, clockwise: bool) -> Result<()> {
        let delta = if clockwise { self.step_db } else { -self.step_db };
        self.mixer.lock().unwrap().adjust_strip_gain(self.strip, delta)
    }

    fn on_press(&mut self, _state: &mut WheelState) -> Result<Option<ModeAction>> {
        self.mixer.lock().unwrap().set_strip_gain(self.strip, 0.0)?;
        Ok(None)
    }

    fn display(&self, _state: &WheelState) -> DisplayPayload {
        let gain = self.mixer.lock().unwrap().strip_gain(self.strip).unwrap_or(0.0);
        DisplayPayload {
            left: "Quieter".to_string(),
            center: format_db(gain),
            right: "Louder".to_string(),
            title: Some(format!("{} {} Gain", self.icon, self.label)),
            progress: Some(gain_fraction(gain)),
            icons: Some(SlotIcons { left: "−", center: self.icon, right: "+" }),
            ..Default::default()
        }
    }
}

fn output_label(output: MixerOutput) -> &'static str {
    match output {
        MixerOutput::A1 => "Speakers",
        MixerOutput::A2 => "Wired",
        MixerOutput::A3 => "Wireless",
    }
}

fn output_icon(output: MixerOutput) -> &'static str {
    match output {
        MixerOutput::A1 => "🔊",
        MixerOutput::A2 => "🎧",
        MixerOutput::A3 => "📡",
    }
}

/// Output routing for one strip: rotate through the outputs, press to
/// toggle whether the strip feeds the selected one.
pub(crate) struct RoutingHandler {
    mixer: Arc<Mutex<dyn MixerControl>>,
    strip: MixerStrip,
    label: &'static str,
}

impl RoutingHandler {
    pub(crate) fn new(
        mixer: Arc<Mutex<dyn MixerControl>>,
        strip: MixerStrip,
        label: &'static str,
    ) -> Self {
        Self { mixer, strip, label }
    }
}

impl ModeHandler for RoutingHandler {
    fn on_enter(&mut self, state: &mut WheelState) {
        state.routing_selection = 0;
    }

    fn on_rotation(&mut self, state: &mut WheelState, clockwise: bool) -> Result<()> {
        state.routing_selection = step(state.routing_selection, MixerOutput::ALL.len(), clockwise);
        Ok(())
    }

    fn on_press(&mut self, state: &mut WheelState) -> Result<Option<ModeAction>> {
        let output = MixerOutput::ALL[state.routing_selection];
        self.mixer.lock().unwrap().toggle_routing(self.strip, output)?;
        Ok(None)
    }

    fn display(&self, state: &WheelState) -> DisplayPayload {
        let output = MixerOutput::ALL[state.routing_selection];
        let enabled = self.mixer.lock().unwrap().routing(self.strip, output).unwrap_or(false);
        let (prev, next) = neighbours(state.routing_selection, MixerOutput::ALL.len());
        DisplayPayload {
            left: output_label(MixerOutput::ALL[prev]).to_string(),
            center: format!("{} [{}]", output_label(output), if enabled { "ON" } else { "OFF" }),
            right: output_label(MixerOutput::ALL[next]).to_string(),
            title: Some(format!("🎚 {} Routing", self.label)),
            icons: Some(SlotIcons {
                left: output_icon(MixerOutput::ALL[prev]),
                center: if enabled { output_icon(output) } else { "⊘" },
                right: output_icon(MixerOutput::ALL[next]),
            }),
            ..Default::default()
        }
    }
}
