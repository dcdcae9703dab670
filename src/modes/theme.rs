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

//! Theme modes: pick a palette element, then a colour for it.
//!
//! Rotating a colour picker previews the colour twice over: the display
//! payload carries a theme patch for the overlay and the colour is applied
//! live on the theme collaborator. Pressing persists the patched palette
//! and drops back to the theme menu; leaving any other way keeps the saved
//! palette untouched.

use std::sync::{Arc, Mutex};

use anyhow::Result;

use super::{
    ModeAction, ModeHandler,
    menu::{MenuEntry, MenuSelector},
    neighbours, step,
};
use crate::{
    model::{DisplayPayload, MenuMode, WheelState},
    system::ThemeControl,
    theme::{PICKER_COLOURS, ThemeElement},
};

/// The intermediate menu reached from the Theme Settings command.
pub(crate) fn theme_menu() -> MenuSelector {
    MenuSelector::new(
        Some("🎨 Theme"),
        vec![
            MenuEntry::Mode("Box Colour", MenuMode::ThemeBox),
            MenuEntry::Mode("Accent Colour", MenuMode::ThemeAccent),
            MenuEntry::Mode("Text Colour", MenuMode::ThemeText),
        ],
    )
}

/// Colour carousel for one element family of the palette.
pub(crate) struct ThemeColourHandler {
    theme: Arc<Mutex<dyn ThemeControl>>,
    element: ThemeElement,
    /// Set once the user has rotated this visit; gates the live preview so
    /// that merely entering the picker does not re-colour anything.
    previewing: bool,
}

impl ThemeColourHandler {
    pub(crate) fn new(theme: Arc<Mutex<dyn ThemeControl>>, element: ThemeElement) -> Self {
        Self { theme, element, previewing: false }
    }

    fn title(&self) -> &'static str {
        match self.element {
            ThemeElement::Box => "🎨 Box Colour",
            ThemeElement::Accent => "🎨 Accent Colour",
            ThemeElement::Text => "🎨 Text Colour",
        }
    }
}

impl ModeHandler for ThemeColourHandler {
    fn on_enter(&mut self, state: &mut WheelState) {
        state.submenu_index = 0;
        self.previewing = false;
    }

    fn on_exit(&mut self, _state: &mut WheelState) {
        self.previewing = false;
    }

    fn on_rotation(&mut self, state: &mut WheelState, clockwise: bool) -> Result<()> {
        state.submenu_index = step(state.submenu_index, PICKER_COLOURS.len(), clockwise);
        let (_, colour) = PICKER_COLOURS[state.submenu_index];
        self.theme.lock().unwrap().apply(self.element, colour)?;
        self.previewing = true;
        Ok(())
    }

    fn on_press(&mut self, state: &mut WheelState) -> Result<Option<ModeAction>> {
        let (_, colour) = PICKER_COLOURS[state.submenu_index];
        {
            let mut theme = self.theme.lock().unwrap();
            theme.apply(self.element, colour)?;
            theme.save()?;
        }
        Ok(Some(ModeAction::Enter(MenuMode::ThemeMenu)))
    }

    fn display(&self, state: &WheelState) -> DisplayPayload {
        let (prev, next) = neighbours(state.submenu_index, PICKER_COLOURS.len());
        let (name, colour) = PICKER_COLOURS[state.submenu_index];
        DisplayPayload {
            left: PICKER_COLOURS[prev].0.to_string(),
            center: format!("▶ {name}"),
            right: PICKER_COLOURS[next].0.to_string(),
            title: Some(self.title().to_string()),
            theme_patch: self.previewing.then_some((self.element, colour)),
            ..Default::default()
        }
    }
}
