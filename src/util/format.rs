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

/// Truncates a label to at most `max_chars` characters.
///
/// Carousel slots have a fixed width on the overlay, so window titles and
/// other free-form labels are cut rather than wrapped. Truncation counts
/// characters, not bytes, so multi-byte titles are cut on a valid boundary.
///
/// # Arguments
///
/// * `label` - The label to truncate.
/// * `max_chars` - The maximum number of characters to keep.
///
/// # Examples
///
/// ```
/// assert_eq!(truncate_label("Mozilla Firefox - Private Browsing", 22), "Mozilla Firefox - Priv");
/// assert_eq!(truncate_label("Files", 22), "Files");
/// ```
pub(crate) fn truncate_label(label: &str, max_chars: usize) -> String {
    label.chars().take(max_chars).collect()
}

/// Formats a mixer strip gain as a signed decibel string, e.g. `"+3.0 dB"`.
pub(crate) fn format_db(gain: f32) -> String {
    format!("{:+.1} dB", gain)
}
