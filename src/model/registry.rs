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

//! The command registry backing the NORMAL selection wheel.
//!
//! Commands are registered once during setup, in wheel order: the firmware
//! derives its absolute position space from the final count, so the
//! registry seals itself when dispatch starts and rejects registration
//! afterwards.

use anyhow::Result;
use thiserror::Error;

use crate::model::MenuMode;

/// What pressing the knob on a selected command does.
///
/// Mode transitions are data so that neither commands nor plugins hold a
/// reference back into the dispatcher; `Invoke` covers arbitrary one-shot
/// actions.
pub(crate) enum CommandAction {
    EnterMode(MenuMode),
    Invoke(Box<dyn Fn() -> Result<()>>),
}

/// One position on the selection wheel.
pub(crate) struct Command {
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) action: CommandAction,
}

impl Command {
    pub(crate) fn mode(name: &str, description: &str, mode: MenuMode) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            action: CommandAction::EnterMode(mode),
        }
    }

    pub(crate) fn invoke(
        name: &str,
        description: &str,
        action: impl Fn() -> Result<()> + 'static,
    ) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            action: CommandAction::Invoke(Box::new(action)),
        }
    }
}

#[derive(Debug, Error, Eq, PartialEq)]
pub(crate) enum RegistryError {
    #[error("command registry is sealed once dispatch has started")]
    Sealed,
}

/// Append-only command table; insertion order is wheel order.
#[derive(Default)]
pub(crate) struct CommandRegistry {
    commands: Vec<Command>,
    sealed: bool,
}

impl CommandRegistry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Appends a command, returning its wheel index.
    pub(crate) fn register(&mut self, command: Command) -> Result<usize, RegistryError> {
        if self.sealed {
            return Err(RegistryError::Sealed);
        }
        self.commands.push(command);
        Ok(self.commands.len() - 1)
    }

    /// Marks the index space final. Called when the first event is
    /// processed; idempotent.
    pub(crate) fn seal(&mut self) {
        self.sealed = true;
    }

    pub(crate) fn get(&self, index: usize) -> Option<&Command> {
        self.commands.get(index)
    }

    pub(crate) fn count(&self) -> usize {
        self.commands.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_returns_wheel_order_indices() {
        let mut registry = CommandRegistry::new();
        let a = registry.register(Command::mode("Media", "", MenuMode::Media)).unwrap();
        let b = registry.register(Command::mode("Volume", "", MenuMode::Volume)).unwrap();
        assert_eq!((a, b), (0, 1));
        assert_eq!(registry.count(), 2);
        assert_eq!(registry.get(0).unwrap().name, "Media");
        assert!(registry.get(2).is_none());
    }

    #[test]
    fn test_sealed_registry_rejects_registration() {
        let mut registry = CommandRegistry::new();
        registry.register(Command::mode("Media", "", MenuMode::Media)).unwrap();
        registry.seal();
        let err = registry
            .register(Command::mode("Volume", "", MenuMode::Volume))
            .unwrap_err();
        assert_eq!(err, RegistryError::Sealed);
        assert_eq!(registry.count(), 1);
    }

    #[test]
    fn test_invoke_command_runs_action() {
        let command = Command::invoke("Greet", "prints a greeting", || Ok(()));
        match command.action {
            CommandAction::Invoke(action) => assert!(action().is_ok()),
            CommandAction::EnterMode(_) => panic!("expected an invoke action"),
        }
    }
}
