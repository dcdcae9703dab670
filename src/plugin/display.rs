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

//! Display-control plugin: monitor brightness and power.
//!
//! Ships in-tree as the reference plugin. It contributes one command that
//! opens a small menu with a linear brightness control and a power-off
//! action.

use std::sync::{Arc, Mutex};

use anyhow::Result;

use super::Plugin;
use crate::{
    model::{DisplayPayload, MenuMode, SlotIcons, WheelState, registry::Command},
    modes::{
        ModeAction, ModeHandler,
        menu::{MenuEntry, MenuSelector},
    },
    system::BrightnessControl,
};

/// Brightness a press resets to, matching the monitors' factory default.
const DEFAULT_BRIGHTNESS: u8 = 50;

pub(crate) struct DisplayPlugin {
    brightness: Arc<Mutex<dyn BrightnessControl>>,
    step: i32,
}

impl DisplayPlugin {
    pub(crate) fn new(brightness: Arc<Mutex<dyn BrightnessControl>>, step: i32) -> Self {
        Self { brightness, step }
    }
}

impl Plugin for DisplayPlugin {
    fn name(&self) -> &'static str {
        "display"
    }

    fn commands(&mut self) -> Vec<Command> {
        vec![Command::mode(
            "Display Settings",
            "Monitor brightness and power",
            MenuMode::DisplayMenu,
        )]
    }

    fn mode_handlers(&mut self) -> Vec<(MenuMode, Box<dyn ModeHandler>)> {
        let power = self.brightness.clone();
        vec![
            (
                MenuMode::DisplayMenu,
                Box::new(MenuSelector::new(
                    Some("🖥 Display"),
                    vec![
                        MenuEntry::Mode("Brightness", MenuMode::DisplayBrightness),
                        MenuEntry::Action(
                            "Power Off",
                            Box::new(move || {
                                power.lock().unwrap().power_off()?;
                                Ok(Some(ModeAction::ExitMenu))
                            }),
                        ),
                    ],
                )),
            ),
            (
                MenuMode::DisplayBrightness,
                Box::new(BrightnessHandler::new(self.brightness.clone(), self.step)),
            ),
        ]
    }
}

/// Linear brightness control: rotate to adjust, press to reset.
pub(crate) struct BrightnessHandler {
    brightness: Arc<Mutex<dyn BrightnessControl>>,
    step: i32,
}

impl BrightnessHandler {
    pub(crate) fn new(brightness: Arc<Mutex<dyn BrightnessControl>>, step: i32) -> Self {
        Self { brightness, step }
    }
}

impl ModeHandler for BrightnessHandler {
    fn on_rotation(&mut self, _state: &mut WheelState, clockwise: bool) -> Result<()> {
        let delta = if clockwise { self.step } else { -self.step };
        self.brightness.lock().unwrap().adjust_brightness(delta)
    }

    fn on_press(&mut self, _state: &mut WheelState) -> Result<Option<ModeAction>> {
        self.brightness.lock().unwrap().set_brightness(DEFAULT_BRIGHTNESS)?;
        Ok(None)
    }

    fn display(&self, _state: &WheelState) -> DisplayPayload {
        let percent = self.brightness.lock().unwrap().brightness().unwrap_or(0);
        DisplayPayload {
            left: "Dimmer".to_string(),
            center: format!("{percent}%"),
            right: "Brighter".to_string(),
            title: Some("🖥 Brightness".to_string()),
            progress: Some(f64::from(percent) / 100.0),
            icons: Some(SlotIcons { left: "−", center: "☀", right: "+" }),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::sim::SimBrightness;

    fn plugin(percent: u8) -> (DisplayPlugin, Arc<Mutex<SimBrightness>>) {
        let backend = Arc::new(Mutex::new(SimBrightness::new(percent)));
        (DisplayPlugin::new(backend.clone(), 5), backend)
    }

    #[test]
    fn test_plugin_contributes_command_and_both_modes() {
        let (mut plugin, _) = plugin(60);
        let commands = plugin.commands();
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].name, "Display Settings");

        let modes: Vec<MenuMode> = plugin.mode_handlers().into_iter().map(|(m, _)| m).collect();
        assert_eq!(modes, vec![MenuMode::DisplayMenu, MenuMode::DisplayBrightness]);
    }

    #[test]
    fn test_brightness_rotation_steps_and_clamps() {
        let (plugin, backend) = plugin(98);
        let mut handler = BrightnessHandler::new(plugin.brightness.clone(), plugin.step);
        let mut state = WheelState::default();

        handler.on_rotation(&mut state, true).unwrap();
        assert_eq!(backend.lock().unwrap().brightness().unwrap(), 100);
        handler.on_rotation(&mut state, false).unwrap();
        assert_eq!(handler.display(&state).center, "95%");
        assert_eq!(handler.display(&state).progress, Some(0.95));
    }

    #[test]
    fn test_brightness_press_resets_to_default() {
        let (plugin, backend) = plugin(10);
        let mut handler = BrightnessHandler::new(plugin.brightness.clone(), plugin.step);
        let mut state = WheelState::default();

        let action = handler.on_press(&mut state).unwrap();
        assert_eq!(action, None);
        assert_eq!(backend.lock().unwrap().brightness().unwrap(), DEFAULT_BRIGHTNESS);
    }

    #[test]
    fn test_menu_power_off_action_exits() {
        let (mut plugin, _) = plugin(60);
        let mut handlers = plugin.mode_handlers();
        let (_, menu) = &mut handlers[0];
        let mut state = WheelState::default();

        menu.on_enter(&mut state);
        menu.on_rotation(&mut state, true).unwrap();
        assert_eq!(menu.on_press(&mut state).unwrap(), Some(ModeAction::ExitMenu));
    }
}
