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

//! The menu state machine at the heart of the wheel.
//!
//! [`MenuWheel`] owns the command registry, the mode-handler table and the
//! single mutable [`WheelState`]. Decoded gestures arrive through the
//! dispatch loop; everything the wheel does in response happens
//! synchronously here, so a transition always runs to completion before the
//! next event is looked at.
//!
//! Two pieces of timing logic live in this module:
//!
//! * click disambiguation: a press inside a menu is deferred for the
//!   double-click window via [`ClickScheduler`]; a second press inside the
//!   window cancels the deferral and leaves the menu instead. A deferred
//!   press that fires is re-validated against its sequence number and the
//!   mode it was scheduled in, so a firing that raced a mode change is a
//!   silent no-op.
//! * inactivity: [`MenuWheel::has_timed_out`] is a pure predicate over the
//!   last-activity timestamp; the tick producer polls it and a missed tick
//!   merely delays the auto-exit by one period.

use std::{
    collections::HashMap,
    sync::mpsc::Sender,
    time::{Duration, Instant},
};

use tracing::{debug, info, trace, warn};

use crate::{
    config::WheelConfig,
    decoder::GestureEvent,
    events::AppEvent,
    model::{
        DisplayPayload, MenuMode, WheelState,
        registry::{CommandAction, CommandRegistry},
    },
    modes::{ModeAction, ModeHandler, neighbours},
    overlay::OverlayDelegate,
    timer::{ClickScheduler, PendingClick},
};

pub(crate) struct MenuWheel {
    registry: CommandRegistry,
    handlers: HashMap<MenuMode, Box<dyn ModeHandler>>,
    state: WheelState,
    overlay: Box<dyn OverlayDelegate>,
    scheduler: ClickScheduler,
    pending_click: Option<PendingClick>,

    double_click: Duration,
    menu_timeout: Duration,
    notify_info: Duration,
    notify_executed: Duration,
    notify_error: Duration,
}

impl MenuWheel {
    pub(crate) fn new(
        cfg: &WheelConfig,
        registry: CommandRegistry,
        handlers: Vec<(MenuMode, Box<dyn ModeHandler>)>,
        overlay: Box<dyn OverlayDelegate>,
        event_tx: Sender<AppEvent>,
    ) -> Self {
        Self {
            registry,
            handlers: handlers.into_iter().collect(),
            state: WheelState::default(),
            overlay,
            scheduler: ClickScheduler::new(event_tx),
            pending_click: None,
            double_click: Duration::from_millis(cfg.double_click_ms),
            menu_timeout: Duration::from_millis(cfg.menu_timeout_ms),
            notify_info: Duration::from_millis(cfg.notify_info_ms),
            notify_executed: Duration::from_millis(cfg.notify_executed_ms),
            notify_error: Duration::from_millis(cfg.notify_error_ms),
        }
    }

    /// Freezes the wheel order and paints the initial selection. Called by
    /// the dispatch loop before the first event is consumed.
    pub(crate) fn start(&mut self) {
        self.registry.seal();
        info!(commands = self.registry.count(), modes = self.handlers.len(), "wheel started");
        self.render();
    }

    pub(crate) fn state(&self) -> &WheelState {
        &self.state
    }

    pub(crate) fn command_count(&self) -> usize {
        self.registry.count()
    }

    pub(crate) fn handle_gesture(&mut self, gesture: GestureEvent) {
        match gesture {
            GestureEvent::Rotation { index } => self.handle_rotation(index),
            GestureEvent::Press => self.handle_press(),
            GestureEvent::Release => {}
            GestureEvent::LongPress => debug!("long press reserved, ignoring"),
            GestureEvent::DoubleTap => {
                if self.state.mode != MenuMode::Normal {
                    self.exit_to_normal();
                }
            }
        }
    }

    fn handle_rotation(&mut self, index: u8) {
        let count = self.registry.count();
        if count == 0 {
            return;
        }

        if self.state.mode == MenuMode::Normal {
            // The firmware's absolute position is authoritative for the
            // selection; no direction is inferred here.
            self.state.previous_command = self.state.current_command;
            self.state.current_command = index as usize % count;
            trace!(index, selected = self.state.current_command, "selection moved");
            self.render();
            return;
        }

        self.state.last_activity = Some(Instant::now());

        let Some(prev) = self.state.last_rotation_index else {
            // First sample after a mode entry has no reference point; it
            // only establishes the baseline.
            trace!(index, "rotation baseline established");
            self.state.last_rotation_index = Some(index);
            self.render();
            return;
        };
        let clockwise = index as usize % count == (prev as usize + 1) % count;
        self.state.last_rotation_index = Some(index);

        let mode = self.state.mode;
        if let Some(handler) = self.handlers.get_mut(&mode) {
            match handler.on_rotation(&mut self.state, clockwise) {
                Ok(()) => self.render(),
                Err(err) => {
                    warn!(?mode, error = ?err, "rotation handler failed");
                    let message = format!("⚠ {err:#}");
                    self.overlay.show_notification(&message, self.notify_error);
                }
            }
        }
    }

    fn handle_press(&mut self) {
        if self.state.mode == MenuMode::Normal {
            self.run_selected_command();
            return;
        }

        let now = Instant::now();
        let within = self
            .state
            .last_click
            .is_some_and(|last| now.duration_since(last) < self.double_click);
        self.state.last_click = Some(now);

        if self.state.click_count > 0 && within {
            debug!("double click, leaving menu");
            self.state.click_count = 0;
            self.pending_click = None;
            self.exit_to_normal();
        } else {
            self.state.click_count = 1;
            let pending = self.scheduler.schedule(self.state.mode, self.double_click);
            trace!(seq = pending.seq(), "single click deferred");
            self.pending_click = Some(pending);
        }
    }

    /// A deferred single click whose double-click window elapsed.
    ///
    /// Only acted on when `seq` is still the pending click and the wheel is
    /// still in the mode the click was scheduled in; anything else raced a
    /// cancellation or a mode change and is dropped.
    pub(crate) fn handle_deferred_press(&mut self, seq: u64, mode: MenuMode) {
        let live = self.pending_click.as_ref().is_some_and(|pending| pending.seq() == seq);
        if !live || mode != self.state.mode || self.state.mode == MenuMode::Normal {
            trace!(seq, scheduled = ?mode, current = ?self.state.mode, "stale deferred click dropped");
            return;
        }
        self.pending_click = None;
        self.state.click_count = 0;
        self.state.last_activity = Some(Instant::now());

        let action = match self.handlers.get_mut(&mode) {
            Some(handler) => match handler.on_press(&mut self.state) {
                Ok(action) => action,
                Err(err) => {
                    warn!(?mode, error = ?err, "press handler failed");
                    let message = format!("⚠ {err:#}");
                    self.overlay.show_notification(&message, self.notify_error);
                    return;
                }
            },
            None => return,
        };
        match action {
            Some(ModeAction::Enter(next)) => self.enter_mode(next),
            Some(ModeAction::ExitMenu) => self.exit_to_normal(),
            None => self.render(),
        }
    }

    fn run_selected_command(&mut self) {
        let index = self.state.current_command;
        let Some(command) = self.registry.get(index) else {
            warn!(index, "press with no command selected");
            return;
        };
        match &command.action {
            CommandAction::EnterMode(mode) => {
                let mode = *mode;
                self.enter_mode(mode);
            }
            CommandAction::Invoke(action) => {
                let name = command.name.clone();
                match action() {
                    Ok(()) => {
                        debug!(%name, "command executed");
                        let message = format!("Executed: {name}");
                        self.overlay.show_notification(&message, self.notify_executed);
                    }
                    Err(err) => {
                        warn!(%name, error = ?err, "command failed");
                        let message = format!("⚠ {name}: {err:#}");
                        self.overlay.show_notification(&message, self.notify_error);
                    }
                }
            }
        }
    }

    /// The one place the active mode changes.
    ///
    /// Re-entering the current mode is not a no-op: the exit/enter cycle
    /// runs again and the per-mode counters reset.
    pub(crate) fn enter_mode(&mut self, mode: MenuMode) {
        if mode != MenuMode::Normal && !self.handlers.contains_key(&mode) {
            warn!(?mode, "no handler registered for mode");
            self.overlay.show_notification("⚠ Control not available", self.notify_error);
            return;
        }
        debug!(from = ?self.state.mode, to = ?mode, "mode transition");

        let old = self.state.mode;
        if let Some(handler) = self.handlers.get_mut(&old) {
            handler.on_exit(&mut self.state);
        }
        self.pending_click = None;
        self.state.mode = mode;
        self.state.submenu_index = 0;
        self.state.last_rotation_index = None;
        self.state.click_count = 0;
        self.state.last_activity = (mode != MenuMode::Normal).then(Instant::now);
        if let Some(handler) = self.handlers.get_mut(&mode) {
            handler.on_enter(&mut self.state);
        }
        self.render();
    }

    /// Returns the wheel to normal mode, announcing the exit. No-op when
    /// already there.
    pub(crate) fn exit_to_normal(&mut self) {
        if self.state.mode == MenuMode::Normal {
            return;
        }
        self.enter_mode(MenuMode::Normal);
        self.overlay.show_notification("Returned to Normal Mode", self.notify_info);
    }

    /// Whether the open menu has been quiet past the configured timeout.
    /// Always false in normal mode.
    pub(crate) fn has_timed_out(&self) -> bool {
        self.state.mode != MenuMode::Normal
            && self
                .state
                .last_activity
                .is_some_and(|last| last.elapsed() >= self.menu_timeout)
    }

    pub(crate) fn handle_tick(&mut self) {
        if self.has_timed_out() {
            info!(mode = ?self.state.mode, "menu timed out");
            self.exit_to_normal();
        }
    }

    pub(crate) fn show_error(&mut self, message: &str) {
        let message = format!("⚠ {message}");
        self.overlay.show_notification(&message, self.notify_error);
    }

    fn render(&mut self) {
        let payload = if self.state.mode == MenuMode::Normal {
            self.normal_payload()
        } else {
            match self.handlers.get(&self.state.mode) {
                Some(handler) => handler.display(&self.state),
                None => return,
            }
        };
        self.overlay.show_menu(&payload);
    }

    fn normal_payload(&self) -> DisplayPayload {
        let count = self.registry.count();
        let name = |index: usize| {
            self.registry
                .get(index)
                .map(|command| command.name.clone())
                .unwrap_or_default()
        };
        if count == 0 {
            return DisplayPayload {
                center: "(no commands)".to_string(),
                ..Default::default()
            };
        }
        let index = self.state.current_command;
        let (left, right) = if count > 1 {
            let (prev, next) = neighbours(index, count);
            (name(prev), name(next))
        } else {
            (String::new(), String::new())
        };
        DisplayPayload {
            left,
            center: format!("● {}", name(index)),
            right,
            title: self.registry.get(index).map(|command| command.description.clone()),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::{
            Arc, Mutex,
            mpsc::{self, Receiver},
        },
        thread,
    };

    use anyhow::bail;

    use super::*;
    use crate::{
        model::registry::Command,
        modes::menu::{MenuEntry, MenuSelector},
    };

    /// Everything the wheel did, shared between the test handler, the test
    /// overlay and the assertions.
    #[derive(Default)]
    struct Trace {
        rotations: Vec<bool>,
        presses: usize,
        enters: usize,
        exits: usize,
        menus: Vec<DisplayPayload>,
        notes: Vec<(String, Duration)>,
    }

    struct TestHandler {
        trace: Arc<Mutex<Trace>>,
        press_action: Option<ModeAction>,
        fail_rotation: bool,
    }

    impl ModeHandler for TestHandler {
        fn on_enter(&mut self, state: &mut WheelState) {
            state.submenu_index = 0;
            self.trace.lock().unwrap().enters += 1;
        }

        fn on_exit(&mut self, _state: &mut WheelState) {
            self.trace.lock().unwrap().exits += 1;
        }

        fn on_rotation(&mut self, _state: &mut WheelState, clockwise: bool) -> anyhow::Result<()> {
            if self.fail_rotation {
                bail!("rotation backend gone");
            }
            self.trace.lock().unwrap().rotations.push(clockwise);
            Ok(())
        }

        fn on_press(&mut self, _state: &mut WheelState) -> anyhow::Result<Option<ModeAction>> {
            self.trace.lock().unwrap().presses += 1;
            Ok(self.press_action)
        }

        fn display(&self, _state: &WheelState) -> DisplayPayload {
            DisplayPayload { center: "test".to_string(), ..Default::default() }
        }
    }

    struct TestOverlay {
        trace: Arc<Mutex<Trace>>,
    }

    impl OverlayDelegate for TestOverlay {
        fn show_menu(&mut self, payload: &DisplayPayload) {
            self.trace.lock().unwrap().menus.push(payload.clone());
        }

        fn show_notification(&mut self, message: &str, duration: Duration) {
            self.trace.lock().unwrap().notes.push((message.to_string(), duration));
        }
    }

    const TEST_WINDOW_MS: u64 = 40;
    const TEST_TIMEOUT_MS: u64 = 80;

    fn test_wheel(press_action: Option<ModeAction>, fail_rotation: bool)
    -> (MenuWheel, Arc<Mutex<Trace>>, Receiver<AppEvent>) {
        let cfg = WheelConfig {
            double_click_ms: TEST_WINDOW_MS,
            menu_timeout_ms: TEST_TIMEOUT_MS,
            ..WheelConfig::default()
        };
        let trace = Arc::new(Mutex::new(Trace::default()));

        let mut registry = CommandRegistry::new();
        registry.register(Command::mode("Test Mode", "The test handler", MenuMode::Media)).unwrap();
        registry.register(Command::invoke("Greet", "Always succeeds", || Ok(()))).unwrap();
        registry
            .register(Command::invoke("Boom", "Always fails", || bail!("kaput")))
            .unwrap();
        registry.register(Command::mode("Carousel", "Three options", MenuMode::ThemeMenu)).unwrap();

        let handlers: Vec<(MenuMode, Box<dyn ModeHandler>)> = vec![
            (
                MenuMode::Media,
                Box::new(TestHandler { trace: trace.clone(), press_action, fail_rotation }),
            ),
            (
                MenuMode::ThemeMenu,
                Box::new(MenuSelector::new(
                    None,
                    vec![
                        MenuEntry::Mode("One", MenuMode::Media),
                        MenuEntry::Mode("Two", MenuMode::Media),
                        MenuEntry::Mode("Three", MenuMode::Media),
                    ],
                )),
            ),
        ];

        let (event_tx, event_rx) = mpsc::channel();
        let overlay = Box::new(TestOverlay { trace: trace.clone() });
        let mut wheel = MenuWheel::new(&cfg, registry, handlers, overlay, event_tx);
        wheel.start();
        (wheel, trace, event_rx)
    }

    fn rotate(wheel: &mut MenuWheel, index: u8) {
        wheel.handle_gesture(GestureEvent::Rotation { index });
    }

    /// Presses and then lets the deferred click fire through the channel,
    /// the way the dispatch loop would.
    fn press_and_settle(wheel: &mut MenuWheel, event_rx: &Receiver<AppEvent>) {
        wheel.handle_gesture(GestureEvent::Press);
        match event_rx.recv_timeout(Duration::from_millis(500)).unwrap() {
            AppEvent::DeferredPress { seq, mode } => wheel.handle_deferred_press(seq, mode),
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn test_normal_rotation_follows_absolute_index() {
        let (mut wheel, trace, _rx) = test_wheel(None, false);

        for index in [0u8, 1, 2, 3, 0] {
            rotate(&mut wheel, index);
            assert_eq!(wheel.state().current_command, index as usize);
        }
        assert_eq!(wheel.state().previous_command, 3);
        // no menu mode was ever entered, so no direction was inferred
        assert!(trace.lock().unwrap().rotations.is_empty());
        assert_eq!(trace.lock().unwrap().menus.last().unwrap().center, "● Test Mode");
    }

    #[test]
    fn test_normal_rotation_reduces_out_of_range_index() {
        let (mut wheel, _trace, _rx) = test_wheel(None, false);
        rotate(&mut wheel, 7);
        assert_eq!(wheel.state().current_command, 3);
    }

    #[test]
    fn test_normal_payload_shows_neighbours_and_description() {
        let (mut wheel, trace, _rx) = test_wheel(None, false);
        rotate(&mut wheel, 1);

        let trace = trace.lock().unwrap();
        let payload = trace.menus.last().unwrap();
        assert_eq!(payload.left, "Test Mode");
        assert_eq!(payload.center, "● Greet");
        assert_eq!(payload.right, "Boom");
        assert_eq!(payload.title.as_deref(), Some("Always succeeds"));
    }

    #[test]
    fn test_normal_press_enters_mode_command() {
        let (mut wheel, trace, _rx) = test_wheel(None, false);
        wheel.handle_gesture(GestureEvent::Press);

        assert_eq!(wheel.state().mode, MenuMode::Media);
        assert_eq!(trace.lock().unwrap().enters, 1);
        assert!(wheel.state().last_activity.is_some());
    }

    #[test]
    fn test_normal_press_invoke_success_notifies() {
        let (mut wheel, trace, _rx) = test_wheel(None, false);
        rotate(&mut wheel, 1);
        wheel.handle_gesture(GestureEvent::Press);

        assert_eq!(wheel.state().mode, MenuMode::Normal);
        let trace = trace.lock().unwrap();
        let (message, duration) = trace.notes.last().unwrap();
        assert_eq!(message, "Executed: Greet");
        assert_eq!(*duration, Duration::from_millis(2000));
    }

    #[test]
    fn test_normal_press_invoke_error_notifies_and_stays() {
        let (mut wheel, trace, _rx) = test_wheel(None, false);
        rotate(&mut wheel, 2);
        wheel.handle_gesture(GestureEvent::Press);

        assert_eq!(wheel.state().mode, MenuMode::Normal);
        assert_eq!(wheel.state().current_command, 2);
        let trace = trace.lock().unwrap();
        let (message, duration) = trace.notes.last().unwrap();
        assert!(message.contains("Boom") && message.contains("kaput"), "{message}");
        assert_eq!(*duration, Duration::from_millis(3000));
    }

    #[test]
    fn test_direction_inference_single_step_only() {
        let (mut wheel, trace, _rx) = test_wheel(None, false);
        wheel.enter_mode(MenuMode::Media);

        // first sample is the baseline, then: +1, +1, -1, skip, wrap
        for index in [0u8, 1, 2, 1, 3, 0] {
            rotate(&mut wheel, index);
        }
        assert_eq!(trace.lock().unwrap().rotations, vec![true, true, false, false, true]);
    }

    #[test]
    fn test_bootstrap_rotation_only_renders_and_touches_timer() {
        let (mut wheel, trace, _rx) = test_wheel(None, false);
        wheel.enter_mode(MenuMode::Media);
        let renders = trace.lock().unwrap().menus.len();

        rotate(&mut wheel, 5);
        assert!(trace.lock().unwrap().rotations.is_empty());
        assert_eq!(trace.lock().unwrap().menus.len(), renders + 1);
        assert!(wheel.state().last_activity.is_some());
    }

    #[test]
    fn test_reentry_resets_rotation_baseline() {
        let (mut wheel, trace, _rx) = test_wheel(None, false);
        wheel.enter_mode(MenuMode::Media);
        rotate(&mut wheel, 0);
        rotate(&mut wheel, 1);
        assert_eq!(trace.lock().unwrap().rotations.len(), 1);

        wheel.enter_mode(MenuMode::Media);
        rotate(&mut wheel, 2);
        // baseline again after re-entry, no direction for this sample
        assert_eq!(trace.lock().unwrap().rotations.len(), 1);
    }

    #[test]
    fn test_enter_mode_reentry_is_not_a_noop() {
        let (mut wheel, trace, _rx) = test_wheel(None, false);
        wheel.enter_mode(MenuMode::Media);
        wheel.enter_mode(MenuMode::Media);

        let trace = trace.lock().unwrap();
        assert_eq!(trace.enters, 2);
        assert_eq!(trace.exits, 1);
    }

    #[test]
    fn test_enter_unregistered_mode_is_refused() {
        let (mut wheel, trace, _rx) = test_wheel(None, false);
        wheel.enter_mode(MenuMode::MixerMenu);

        assert_eq!(wheel.state().mode, MenuMode::Normal);
        assert!(trace.lock().unwrap().notes.last().unwrap().0.contains("not available"));
    }

    #[test]
    fn test_carousel_steps_and_wraps_through_absolute_indices() {
        let (mut wheel, _trace, _rx) = test_wheel(None, false);
        wheel.enter_mode(MenuMode::ThemeMenu);

        rotate(&mut wheel, 0); // baseline
        rotate(&mut wheel, 1);
        rotate(&mut wheel, 2);
        assert_eq!(wheel.state().submenu_index, 2);
        rotate(&mut wheel, 3);
        assert_eq!(wheel.state().submenu_index, 0);
    }

    #[test]
    fn test_double_click_exits_without_pressing_handler() {
        let (mut wheel, trace, rx) = test_wheel(None, false);
        wheel.enter_mode(MenuMode::Media);

        wheel.handle_gesture(GestureEvent::Press);
        wheel.handle_gesture(GestureEvent::Press);
        assert_eq!(wheel.state().mode, MenuMode::Normal);
        assert_eq!(trace.lock().unwrap().presses, 0);

        // even if the cancelled timer's firing still arrives, it is stale
        while let Ok(event) = rx.recv_timeout(Duration::from_millis(100)) {
            if let AppEvent::DeferredPress { seq, mode } = event {
                wheel.handle_deferred_press(seq, mode);
            }
        }
        assert_eq!(trace.lock().unwrap().presses, 0);
    }

    #[test]
    fn test_single_click_fires_exactly_once_after_window() {
        let (mut wheel, trace, rx) = test_wheel(None, false);
        wheel.enter_mode(MenuMode::Media);

        press_and_settle(&mut wheel, &rx);
        assert_eq!(trace.lock().unwrap().presses, 1);
        assert_eq!(wheel.state().mode, MenuMode::Media);
        assert_eq!(wheel.state().click_count, 0);
        assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());
    }

    #[test]
    fn test_presses_outside_window_are_separate_single_clicks() {
        let (mut wheel, trace, rx) = test_wheel(None, false);
        wheel.enter_mode(MenuMode::Media);

        press_and_settle(&mut wheel, &rx);
        thread::sleep(Duration::from_millis(TEST_WINDOW_MS + 10));
        press_and_settle(&mut wheel, &rx);

        assert_eq!(trace.lock().unwrap().presses, 2);
        assert_eq!(wheel.state().mode, MenuMode::Media);
    }

    #[test]
    fn test_deferred_click_after_mode_change_is_dropped() {
        let (mut wheel, trace, rx) = test_wheel(None, false);
        wheel.enter_mode(MenuMode::Media);

        wheel.handle_gesture(GestureEvent::Press);
        wheel.handle_gesture(GestureEvent::DoubleTap);
        assert_eq!(wheel.state().mode, MenuMode::Normal);

        if let Ok(AppEvent::DeferredPress { seq, mode }) =
            rx.recv_timeout(Duration::from_millis(500))
        {
            wheel.handle_deferred_press(seq, mode);
        }
        assert_eq!(trace.lock().unwrap().presses, 0);
    }

    #[test]
    fn test_deferred_click_with_wrong_sequence_is_dropped() {
        let (mut wheel, trace, _rx) = test_wheel(None, false);
        wheel.enter_mode(MenuMode::Media);
        wheel.handle_gesture(GestureEvent::Press);

        // right mode, wrong sequence: a firing that raced its cancellation
        wheel.handle_deferred_press(9999, MenuMode::Media);
        assert_eq!(trace.lock().unwrap().presses, 0);
        assert_eq!(wheel.state().mode, MenuMode::Media);
    }

    #[test]
    fn test_deferred_click_applies_returned_exit_action() {
        let (mut wheel, trace, rx) = test_wheel(Some(ModeAction::ExitMenu), false);
        wheel.enter_mode(MenuMode::Media);

        press_and_settle(&mut wheel, &rx);
        assert_eq!(trace.lock().unwrap().presses, 1);
        assert_eq!(wheel.state().mode, MenuMode::Normal);
        assert_eq!(trace.lock().unwrap().notes.last().unwrap().0, "Returned to Normal Mode");
    }

    #[test]
    fn test_deferred_click_applies_returned_enter_action() {
        let (mut wheel, _trace, rx) =
            test_wheel(Some(ModeAction::Enter(MenuMode::ThemeMenu)), false);
        wheel.enter_mode(MenuMode::Media);

        press_and_settle(&mut wheel, &rx);
        assert_eq!(wheel.state().mode, MenuMode::ThemeMenu);
    }

    #[test]
    fn test_double_tap_is_noop_in_normal_mode() {
        let (mut wheel, trace, _rx) = test_wheel(None, false);
        wheel.handle_gesture(GestureEvent::DoubleTap);
        assert_eq!(wheel.state().mode, MenuMode::Normal);
        assert!(trace.lock().unwrap().notes.is_empty());
    }

    #[test]
    fn test_long_press_and_release_are_noops() {
        let (mut wheel, trace, _rx) = test_wheel(None, false);
        wheel.enter_mode(MenuMode::Media);
        let renders = trace.lock().unwrap().menus.len();

        wheel.handle_gesture(GestureEvent::LongPress);
        wheel.handle_gesture(GestureEvent::Release);
        assert_eq!(wheel.state().mode, MenuMode::Media);
        assert_eq!(trace.lock().unwrap().menus.len(), renders);
    }

    #[test]
    fn test_menu_times_out_back_to_normal() {
        let (mut wheel, _trace, _rx) = test_wheel(None, false);
        wheel.enter_mode(MenuMode::Media);

        assert!(!wheel.has_timed_out());
        thread::sleep(Duration::from_millis(TEST_TIMEOUT_MS + 20));
        assert!(wheel.has_timed_out());

        wheel.handle_tick();
        assert_eq!(wheel.state().mode, MenuMode::Normal);
        assert!(!wheel.has_timed_out());
        assert!(wheel.state().last_activity.is_none());
    }

    #[test]
    fn test_activity_holds_the_timeout_off() {
        let (mut wheel, _trace, _rx) = test_wheel(None, false);
        wheel.enter_mode(MenuMode::Media);

        thread::sleep(Duration::from_millis(TEST_TIMEOUT_MS / 2));
        rotate(&mut wheel, 0);
        thread::sleep(Duration::from_millis(TEST_TIMEOUT_MS / 2));
        wheel.handle_tick();
        assert_eq!(wheel.state().mode, MenuMode::Media);
    }

    #[test]
    fn test_timeout_never_fires_in_normal_mode() {
        let (mut wheel, _trace, _rx) = test_wheel(None, false);
        thread::sleep(Duration::from_millis(TEST_TIMEOUT_MS + 20));
        assert!(!wheel.has_timed_out());
    }

    #[test]
    fn test_rotation_handler_error_becomes_notification() {
        let (mut wheel, trace, _rx) = test_wheel(None, true);
        wheel.enter_mode(MenuMode::Media);
        rotate(&mut wheel, 0);
        rotate(&mut wheel, 1);

        assert_eq!(wheel.state().mode, MenuMode::Media);
        let trace = trace.lock().unwrap();
        let (message, duration) = trace.notes.last().unwrap();
        assert!(message.contains("rotation backend gone"), "{message}");
        assert_eq!(*duration, Duration::from_millis(3000));
    }
}
