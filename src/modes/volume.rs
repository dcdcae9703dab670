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

//! System volume mode: rotate to adjust, press to toggle mute.

use std::sync::{Arc, Mutex};

use anyhow::Result;

use super::{ModeAction, ModeHandler};
use crate::{
    model::{DisplayPayload, SlotIcons, WheelState},
    system::VolumeControl,
};

pub(crate) struct VolumeHandler {
    volume: Arc<Mutex<dyn VolumeControl>>,
    step: i32,
}

impl VolumeHandler {
    pub(crate) fn new(volume: Arc<Mutex<dyn VolumeControl>>, step: i32) -> Self {
        Self { volume, step }
    }
}

impl ModeHandler for VolumeHandler {
    fn on_rotation(&mut self, _state: &mut WheelState, clockwise: bool) -> Result<()> {
        let delta = if clockwise { self.step } else { -self.step };
        self.volume.lock().unwrap().adjust_volume(delta)
    }

    fn on_press(&mut self, _state: &mut WheelState) -> Result<Option<ModeAction>> {
        self.volume.lock().unwrap().toggle_mute()?;
        Ok(None)
    }

    fn display(&self, _state: &WheelState) -> DisplayPayload {
        // Read failures degrade the readout, not the mode.
        let (level, muted) = {
            let volume = self.volume.lock().unwrap();
            (volume.volume().unwrap_or(0), volume.muted().unwrap_or(false))
        };
        DisplayPayload {
            left: "Volume Down".to_string(),
            center: format!("{level}%"),
            right: "Volume Up".to_string(),
            title: Some(if muted { "🔇 MUTED" } else { "🔊 Volume" }.to_string()),
            progress: Some(f64::from(level) / 100.0),
            icons: Some(SlotIcons {
                left: "−",
                center: if muted { "🔇" } else { "🔊" },
                right: "+",
            }),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::sim::SimVolume;

    fn handler(level: u8) -> VolumeHandler {
        VolumeHandler::new(Arc::new(Mutex::new(SimVolume::new(level))), 2)
    }

    #[test]
    fn test_rotation_adjusts_by_configured_step() {
        let mut handler = handler(50);
        let mut state = WheelState::default();

        handler.on_rotation(&mut state, true).unwrap();
        assert_eq!(handler.display(&state).center, "52%");

        handler.on_rotation(&mut state, false).unwrap();
        handler.on_rotation(&mut state, false).unwrap();
        assert_eq!(handler.display(&state).center, "48%");
    }

    #[test]
    fn test_press_toggles_mute_in_title() {
        let mut handler = handler(30);
        let mut state = WheelState::default();

        assert_eq!(handler.display(&state).title.as_deref(), Some("🔊 Volume"));
        handler.on_press(&mut state).unwrap();
        assert_eq!(handler.display(&state).title.as_deref(), Some("🔇 MUTED"));
        handler.on_press(&mut state).unwrap();
        assert_eq!(handler.display(&state).title.as_deref(), Some("🔊 Volume"));
    }

    #[test]
    fn test_display_reports_progress_fraction() {
        let handler = handler(75);
        let state = WheelState::default();
        let payload = handler.display(&state);
        assert_eq!(payload.progress, Some(0.75));
    }
}
