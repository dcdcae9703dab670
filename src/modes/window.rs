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

//! Window management modes.
//!
//! A small menu fans out to two leaf modes: cycling focus through the
//! visible windows and snapping the active window into a screen half.
//! The window list is captured once on entry and lives in
//! [`WheelState::window_list`] so the carousel stays stable while open,
//! even if windows come and go underneath it.

use std::sync::{Arc, Mutex};

use anyhow::Result;
use tracing::warn;

use super::{
    ModeAction, ModeHandler,
    menu::{MenuEntry, MenuSelector},
    neighbours, step,
};
use crate::{
    model::{DisplayPayload, MenuMode, SlotIcons, WheelState},
    system::WindowManager,
    util::format::truncate_label,
};

/// The intermediate menu reached from the Window Management command.
pub(crate) fn window_menu(windows: Arc<Mutex<dyn WindowManager>>) -> MenuSelector {
    MenuSelector::new(
        Some("🪟 Windows"),
        vec![
            MenuEntry::Mode("Window Cycle", MenuMode::WindowCycle),
            MenuEntry::Mode("Window Snap", MenuMode::WindowSnap),
            MenuEntry::Action(
                "Show Desktop",
                Box::new(move || {
                    windows.lock().unwrap().show_desktop()?;
                    Ok(Some(ModeAction::ExitMenu))
                }),
            ),
        ],
    )
}

/// Rotate through the visible windows, press to bring one to the front.
pub(crate) struct WindowCycleHandler {
    windows: Arc<Mutex<dyn WindowManager>>,
    title_width: usize,
}

impl WindowCycleHandler {
    pub(crate) fn new(windows: Arc<Mutex<dyn WindowManager>>, title_width: usize) -> Self {
        Self { windows, title_width }
    }

    fn label(&self, state: &WheelState, index: usize) -> String {
        truncate_label(&state.window_list[index].title, self.title_width)
    }
}

impl ModeHandler for WindowCycleHandler {
    fn on_enter(&mut self, state: &mut WheelState) {
        state.submenu_index = 0;
        state.window_list = self.windows.lock().unwrap().visible_windows().unwrap_or_else(|err| {
            warn!(error = %err, "window enumeration failed");
            Vec::new()
        });
    }

    fn on_exit(&mut self, state: &mut WheelState) {
        state.window_list.clear();
    }

    fn on_rotation(&mut self, state: &mut WheelState, clockwise: bool) -> Result<()> {
        state.submenu_index = step(state.submenu_index, state.window_list.len(), clockwise);
        Ok(())
    }

    fn on_press(&mut self, state: &mut WheelState) -> Result<Option<ModeAction>> {
        let Some(window) = state.window_list.get(state.submenu_index) else {
            return Ok(Some(ModeAction::ExitMenu));
        };
        if self.windows.lock().unwrap().activate(window.id)? {
            return Ok(Some(ModeAction::ExitMenu));
        }
        // The window vanished between enumeration and activation.
        warn!(id = window.id, title = %window.title, "window gone, dropping from carousel");
        state.window_list.remove(state.submenu_index);
        if state.submenu_index >= state.window_list.len() {
            state.submenu_index = 0;
        }
        Ok(None)
    }

    fn display(&self, state: &WheelState) -> DisplayPayload {
        let title = Some("🪟 Window Cycle".to_string());
        match state.window_list.len() {
            0 => DisplayPayload {
                center: "⚠ No windows found".to_string(),
                title,
                ..Default::default()
            },
            1 => DisplayPayload {
                center: format!("▶ {}", self.label(state, 0)),
                title,
                ..Default::default()
            },
            len => {
                let (prev, next) = neighbours(state.submenu_index, len);
                DisplayPayload {
                    left: self.label(state, prev),
                    center: format!("▶ {}", self.label(state, state.submenu_index)),
                    right: self.label(state, next),
                    title,
                    ..Default::default()
                }
            }
        }
    }
}

type SnapFn = fn(&mut dyn WindowManager) -> Result<()>;

const SNAP_OPTIONS: [(&str, &str, SnapFn); 3] = [
    ("Snap Left", "◧", |w| w.snap_left()),
    ("Snap Right", "◨", |w| w.snap_right()),
    ("Maximize", "⬜", |w| w.maximize()),
];

/// Choose a snap position, press to apply it and leave the menu.
pub(crate) struct WindowSnapHandler {
    windows: Arc<Mutex<dyn WindowManager>>,
}

impl WindowSnapHandler {
    pub(crate) fn new(windows: Arc<Mutex<dyn WindowManager>>) -> Self {
        Self { windows }
    }
}

impl ModeHandler for WindowSnapHandler {
    fn on_enter(&mut self, state: &mut WheelState) {
        state.submenu_index = 0;
    }

    fn on_rotation(&mut self, state: &mut WheelState, clockwise: bool) -> Result<()> {
        state.submenu_index = step(state.submenu_index, SNAP_OPTIONS.len(), clockwise);
        Ok(())
    }

    fn on_press(&mut self, state: &mut WheelState) -> Result<Option<ModeAction>> {
        let (_, _, action) = SNAP_OPTIONS[state.submenu_index];
        action(&mut *self.windows.lock().unwrap())?;
        Ok(Some(ModeAction::ExitMenu))
    }

    fn display(&self, state: &WheelState) -> DisplayPayload {
        let (prev, next) = neighbours(state.submenu_index, SNAP_OPTIONS.len());
        DisplayPayload {
            left: SNAP_OPTIONS[prev].0.to_string(),
            center: format!("▶ {}", SNAP_OPTIONS[state.submenu_index].0),
            right: SNAP_OPTIONS[next].0.to_string(),
            title: Some("🪟 Window Snap".to_string()),
            icons: Some(SlotIcons {
                left: SNAP_OPTIONS[prev].1,
                center: SNAP_OPTIONS[state.submenu_index].1,
                right: SNAP_OPTIONS[next].1,
            }),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        model::WindowInfo,
        system::sim::SimWindows,
    };

    fn cycle_handler(windows: SimWindows) -> WindowCycleHandler {
        WindowCycleHandler::new(Arc::new(Mutex::new(windows)), 22)
    }

    #[test]
    fn test_enter_captures_window_list() {
        let mut handler = cycle_handler(SimWindows::with_demo_windows());
        let mut state = WheelState::default();

        handler.on_enter(&mut state);
        assert_eq!(state.window_list.len(), 4);
        assert_eq!(state.submenu_index, 0);

        handler.on_exit(&mut state);
        assert!(state.window_list.is_empty());
    }

    #[test]
    fn test_rotation_wraps_around_window_list() {
        let mut handler = cycle_handler(SimWindows::with_demo_windows());
        let mut state = WheelState::default();
        handler.on_enter(&mut state);

        handler.on_rotation(&mut state, false).unwrap();
        assert_eq!(state.submenu_index, 3);
        handler.on_rotation(&mut state, true).unwrap();
        assert_eq!(state.submenu_index, 0);
    }

    #[test]
    fn test_press_activates_and_exits() {
        let mut handler = cycle_handler(SimWindows::with_demo_windows());
        let mut state = WheelState::default();
        handler.on_enter(&mut state);
        handler.on_rotation(&mut state, true).unwrap();

        let action = handler.on_press(&mut state).unwrap();
        assert_eq!(action, Some(ModeAction::ExitMenu));
    }

    #[test]
    fn test_press_on_vanished_window_prunes_it() {
        let mut handler = cycle_handler(SimWindows::new(vec![WindowInfo {
            id: 1,
            title: "Real".to_string(),
        }]));
        let mut state = WheelState::default();
        handler.on_enter(&mut state);
        state.window_list.push(WindowInfo { id: 99, title: "Ghost".to_string() });
        state.submenu_index = 1;

        let action = handler.on_press(&mut state).unwrap();
        assert_eq!(action, None);
        assert_eq!(state.window_list.len(), 1);
        assert_eq!(state.submenu_index, 0);
    }

    #[test]
    fn test_empty_window_list_shows_warning_and_exits_on_press() {
        let mut handler = cycle_handler(SimWindows::new(Vec::new()));
        let mut state = WheelState::default();
        handler.on_enter(&mut state);

        assert_eq!(handler.display(&state).center, "⚠ No windows found");
        assert_eq!(handler.on_press(&mut state).unwrap(), Some(ModeAction::ExitMenu));
    }

    #[test]
    fn test_long_titles_are_truncated() {
        let mut handler = cycle_handler(SimWindows::new(vec![WindowInfo {
            id: 1,
            title: "An Extremely Long Window Title That Will Not Fit".to_string(),
        }]));
        handler.title_width = 10;
        let mut state = WheelState::default();
        handler.on_enter(&mut state);

        assert_eq!(handler.display(&state).center, "▶ An Extreme");
    }

    #[test]
    fn test_snap_press_applies_and_exits() {
        let mut handler = WindowSnapHandler::new(Arc::new(Mutex::new(SimWindows::new(Vec::new()))));
        let mut state = WheelState::default();
        handler.on_enter(&mut state);
        handler.on_rotation(&mut state, true).unwrap();

        assert_eq!(handler.display(&state).center, "▶ Snap Right");
        assert_eq!(handler.on_press(&mut state).unwrap(), Some(ModeAction::ExitMenu));
    }
}
