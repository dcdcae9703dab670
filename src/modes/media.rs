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

//! Media transport mode: rotate to skip tracks, press to play/pause.

use std::sync::{Arc, Mutex};

use anyhow::Result;

use super::{ModeAction, ModeHandler};
use crate::{
    model::{DisplayPayload, Slot, SlotIcons, WheelState},
    system::MediaControl,
};

pub(crate) struct MediaHandler {
    media: Arc<Mutex<dyn MediaControl>>,
    /// Which slot acted last, so the overlay can pulse it.
    last_slot: Option<Slot>,
}

impl MediaHandler {
    pub(crate) fn new(media: Arc<Mutex<dyn MediaControl>>) -> Self {
        Self { media, last_slot: None }
    }
}

impl ModeHandler for MediaHandler {
    fn on_enter(&mut self, _state: &mut WheelState) {
        self.last_slot = None;
    }

    fn on_exit(&mut self, _state: &mut WheelState) {
        self.last_slot = None;
    }

    fn on_rotation(&mut self, _state: &mut WheelState, clockwise: bool) -> Result<()> {
        if clockwise {
            self.media.lock().unwrap().next_track()?;
            self.last_slot = Some(Slot::Right);
        } else {
            self.media.lock().unwrap().prev_track()?;
            self.last_slot = Some(Slot::Left);
        }
        Ok(())
    }

    fn on_press(&mut self, _state: &mut WheelState) -> Result<Option<ModeAction>> {
        self.media.lock().unwrap().play_pause()?;
        self.last_slot = Some(Slot::Center);
        Ok(None)
    }

    fn display(&self, _state: &WheelState) -> DisplayPayload {
        DisplayPayload {
            left: "Previous Track".to_string(),
            center: "Play/Pause".to_string(),
            right: "Next Track".to_string(),
            title: Some("🎧 Media".to_string()),
            icons: Some(SlotIcons { left: "⏮", center: "⏯", right: "⏭" }),
            active_slot: self.last_slot,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::sim::SimMedia;

    fn handler() -> MediaHandler {
        MediaHandler::new(Arc::new(Mutex::new(SimMedia::default())))
    }

    #[test]
    fn test_rotation_pulses_the_acting_slot() {
        let mut handler = handler();
        let mut state = WheelState::default();

        handler.on_rotation(&mut state, true).unwrap();
        assert_eq!(handler.display(&state).active_slot, Some(Slot::Right));

        handler.on_rotation(&mut state, false).unwrap();
        assert_eq!(handler.display(&state).active_slot, Some(Slot::Left));
    }

    #[test]
    fn test_press_pulses_center_and_stays_in_mode() {
        let mut handler = handler();
        let mut state = WheelState::default();

        let action = handler.on_press(&mut state).unwrap();
        assert_eq!(action, None);
        assert_eq!(handler.display(&state).active_slot, Some(Slot::Center));
    }

    #[test]
    fn test_reentry_clears_the_pulse() {
        let mut handler = handler();
        let mut state = WheelState::default();

        handler.on_press(&mut state).unwrap();
        handler.on_exit(&mut state);
        handler.on_enter(&mut state);
        assert_eq!(handler.display(&state).active_slot, None);
    }
}
