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

//! Generic sub-menu carousel.
//!
//! All the intermediate menus (window management, mixer, theme, display)
//! behave identically: rotate through a fixed list of entries, press to
//! descend into a mode or fire an action. [`MenuSelector`] implements that
//! once; each menu is just a list of [`MenuEntry`] values.

use anyhow::Result;

use super::{ModeAction, ModeHandler, neighbours, step};
use crate::model::{DisplayPayload, MenuMode, WheelState};

/// One selectable row of a [`MenuSelector`].
pub(crate) enum MenuEntry {
    /// Descend into another mode when pressed.
    Mode(&'static str, MenuMode),
    /// Run an action when pressed; the action decides the transition.
    Action(&'static str, Box<dyn FnMut() -> Result<Option<ModeAction>>>),
}

impl MenuEntry {
    fn name(&self) -> &'static str {
        match self {
            MenuEntry::Mode(name, _) | MenuEntry::Action(name, _) => name,
        }
    }
}

pub(crate) struct MenuSelector {
    title: Option<&'static str>,
    entries: Vec<MenuEntry>,
}

impl MenuSelector {
    pub(crate) fn new(title: Option<&'static str>, entries: Vec<MenuEntry>) -> Self {
        Self { title, entries }
    }
}

impl ModeHandler for MenuSelector {
    fn on_enter(&mut self, state: &mut WheelState) {
        state.submenu_index = 0;
    }

    fn on_rotation(&mut self, state: &mut WheelState, clockwise: bool) -> Result<()> {
        state.submenu_index = step(state.submenu_index, self.entries.len(), clockwise);
        Ok(())
    }

    fn on_press(&mut self, state: &mut WheelState) -> Result<Option<ModeAction>> {
        match self.entries.get_mut(state.submenu_index) {
            Some(MenuEntry::Mode(_, mode)) => Ok(Some(ModeAction::Enter(*mode))),
            Some(MenuEntry::Action(_, action)) => action(),
            None => Ok(None),
        }
    }

    fn display(&self, state: &WheelState) -> DisplayPayload {
        if self.entries.is_empty() {
            return DisplayPayload {
                center: "(empty menu)".to_string(),
                title: self.title.map(str::to_string),
                ..Default::default()
            };
        }
        let (left, right) = if self.entries.len() > 1 {
            let (prev, next) = neighbours(state.submenu_index, self.entries.len());
            (self.entries[prev].name().to_string(), self.entries[next].name().to_string())
        } else {
            (String::new(), String::new())
        };
        DisplayPayload {
            left,
            center: format!("▶ {}", self.entries[state.submenu_index].name()),
            right,
            title: self.title.map(str::to_string),
            ..Default::default()
        }
    }
}
