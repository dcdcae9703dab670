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

//! The plugin registration protocol.
//!
//! A plugin contributes commands to the selection wheel and handlers for the
//! modes those commands reach. Both contributions are plain data returned
//! from the two trait methods; plugins never see the registry or the
//! dispatcher, and how plugin values come into existence is the caller's
//! business. Installation happens exactly once during setup, after the
//! built-ins and before the first event is dispatched.

use anyhow::{Context, Result};
use tracing::info;

use crate::{
    model::{
        MenuMode,
        registry::{Command, CommandRegistry},
    },
    modes::ModeHandler,
};

pub(crate) mod display;

pub(crate) trait Plugin {
    fn name(&self) -> &'static str;

    /// Commands to append to the selection wheel, in wheel order.
    fn commands(&mut self) -> Vec<Command>;

    /// Handlers for the modes this plugin's commands reach.
    fn mode_handlers(&mut self) -> Vec<(MenuMode, Box<dyn ModeHandler>)>;
}

/// Installs each plugin's commands and handlers. Called once during setup.
pub(crate) fn install(
    plugins: Vec<Box<dyn Plugin>>,
    registry: &mut CommandRegistry,
    handlers: &mut Vec<(MenuMode, Box<dyn ModeHandler>)>,
) -> Result<()> {
    for mut plugin in plugins {
        let commands = plugin.commands();
        let modes = plugin.mode_handlers();
        info!(plugin = plugin.name(), commands = commands.len(), modes = modes.len(), "installing plugin");
        for command in commands {
            registry
                .register(command)
                .with_context(|| format!("registering commands from plugin {}", plugin.name()))?;
        }
        handlers.extend(modes);
    }
    Ok(())
}
