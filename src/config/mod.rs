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

//! Application configuration.
//!
//! This module manages the application configuration file. Timing windows
//! and control steps default to the values the paired firmware was tuned
//! against; the device identity block is what a HID transport should match
//! on.

use serde::{Deserialize, Serialize};

use crate::{decoder::device, theme::Theme};

const CONFIG_NAME: &str = "knobwheel";

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct WheelConfig {
    pub version: u32,

    /// Two presses within this window collapse into a double click.
    pub double_click_ms: u64,
    /// Open menus auto-exit after this much inactivity.
    pub menu_timeout_ms: u64,
    /// Cadence of the timeout poller.
    pub tick_ms: u64,

    pub volume_step: i32,
    pub gain_step_db: f32,
    pub brightness_step: i32,
    pub window_title_chars: usize,

    pub notify_info_ms: u64,
    pub notify_executed_ms: u64,
    pub notify_error_ms: u64,

    /// Built-in palette name; `custom_theme` overrides it once a picker
    /// has saved.
    pub theme: String,
    pub custom_theme: Option<Theme>,

    pub vendor_id: u16,
    pub product_id: u16,
    pub usage_page: u16,
    pub usage: u16,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            version: 1,
            double_click_ms: 300,
            menu_timeout_ms: 5000,
            tick_ms: 500,
            volume_step: 2,
            gain_step_db: 3.0,
            brightness_step: 5,
            window_title_chars: 22,
            notify_info_ms: 1500,
            notify_executed_ms: 2000,
            notify_error_ms: 3000,
            theme: "dark".to_string(),
            custom_theme: None,
            vendor_id: device::VENDOR_ID,
            product_id: device::PRODUCT_ID,
            usage_page: device::USAGE_PAGE,
            usage: device::USAGE,
        }
    }
}

impl WheelConfig {
    /// The palette the overlay starts with: a saved custom theme wins over
    /// the named built-in.
    pub fn active_theme(&self) -> Theme {
        self.custom_theme
            .or_else(|| Theme::named(&self.theme))
            .unwrap_or_default()
    }
}

pub fn load_config() -> WheelConfig {
    confy::load(CONFIG_NAME, None).unwrap_or_default()
}

pub fn save_config(cfg: &WheelConfig) -> Result<(), confy::ConfyError> {
    confy::store(CONFIG_NAME, None, cfg)
}
