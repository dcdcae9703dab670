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

//! Decoding of raw vendor HID reports into gesture events.
//!
//! The firmware sends fixed-layout reports on its vendor usage page. The
//! layout is a compatibility contract with the paired firmware: offsets and
//! the marker value must not be renumbered.
//!
//! | offset | field                                                      |
//! |--------|------------------------------------------------------------|
//! | 0      | marker, always `0xFD`; anything else is not ours           |
//! | 1      | event-type code                                            |
//! | 2      | absolute wheel position (rotation) or source id (buttons)  |
//! | 3      | auxiliary value                                            |
//! | 4..=5  | optional little-endian elapsed-time in milliseconds        |
//!
//! Reports arrive as 32- or 64-byte buffers depending on the host HID stack.
//! Anything shorter than four bytes, carrying a foreign marker, or carrying
//! an unknown event code is discarded without signalling failure; discarded
//! reports never reach the event channel.

use tracing::trace;

/// Identity of the paired device on its vendor usage page.
pub(crate) mod device {
    pub(crate) const VENDOR_ID: u16 = 0x3434;
    pub(crate) const PRODUCT_ID: u16 = 0x0311;
    pub(crate) const USAGE_PAGE: u16 = 0xFF60;
    pub(crate) const USAGE: u16 = 0x61;
}

/// Report framing.
pub(crate) mod report {
    /// First byte of every report the firmware emits.
    pub(crate) const MARKER: u8 = 0xFD;
    /// Shortest report that still carries all mandatory fields.
    pub(crate) const MIN_LEN: usize = 4;
    /// Report size on the wire; some HID stacks pad to 64.
    pub(crate) const LEN: usize = 32;
}

/// Event-type codes carried in byte 1.
pub(crate) mod event_code {
    pub(crate) const ROTATE_CW: u8 = 0x01;
    pub(crate) const ROTATE_CCW: u8 = 0x02;
    pub(crate) const PRESS: u8 = 0x03;
    pub(crate) const RELEASE: u8 = 0x04;
    pub(crate) const LONG_PRESS: u8 = 0x05;
    pub(crate) const DOUBLE_TAP: u8 = 0x06;
}

/// A decoded knob gesture.
///
/// Rotation carries the absolute wheel position reported by the firmware.
/// The firmware also tags rotations with its own direction code, but
/// consecutive absolute positions are authoritative, so both rotation codes
/// decode to the same variant and direction is inferred downstream.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum GestureEvent {
    Rotation { index: u8 },
    Press,
    Release,
    LongPress,
    DoubleTap,
}

/// Decodes one raw report, returning `None` for anything that is not a
/// well-formed gesture from the paired firmware.
pub(crate) fn decode_report(data: &[u8]) -> Option<GestureEvent> {
    if data.len() < report::MIN_LEN {
        trace!(len = data.len(), "discarding truncated report");
        return None;
    }
    if data[0] != report::MARKER {
        trace!(marker = data[0], "discarding report with foreign marker");
        return None;
    }

    let event = match data[1] {
        event_code::ROTATE_CW | event_code::ROTATE_CCW => {
            GestureEvent::Rotation { index: data[2] }
        }
        event_code::PRESS => GestureEvent::Press,
        event_code::RELEASE => GestureEvent::Release,
        event_code::LONG_PRESS => GestureEvent::LongPress,
        event_code::DOUBLE_TAP => GestureEvent::DoubleTap,
        code => {
            trace!(code, "discarding report with unknown event code");
            return None;
        }
    };

    trace!(?event, source = data[2], aux = data[3], elapsed_ms = elapsed_field(data), "decoded report");
    Some(event)
}

/// Reads the optional elapsed-time field, present when the report is long
/// enough to carry it. Diagnostic only.
fn elapsed_field(data: &[u8]) -> Option<u16> {
    if data.len() >= 6 {
        Some(u16::from_le_bytes([data[4], data[5]]))
    } else {
        None
    }
}

/// Fabricates a firmware frame.
///
/// Used by the demo frontend to simulate the device and by tests; the
/// layout mirrors [`decode_report`].
pub(crate) fn build_report(code: u8, value: u8, aux: u8) -> [u8; report::LEN] {
    let mut data = [0u8; report::LEN];
    data[0] = report::MARKER;
    data[1] = code;
    data[2] = value;
    data[3] = aux;
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_rotation_carries_absolute_index() {
        let data = build_report(event_code::ROTATE_CW, 2, 0);
        assert_eq!(decode_report(&data), Some(GestureEvent::Rotation { index: 2 }));

        // the firmware's direction claim is ignored, positions decide
        let data = build_report(event_code::ROTATE_CCW, 7, 0);
        assert_eq!(decode_report(&data), Some(GestureEvent::Rotation { index: 7 }));
    }

    #[test]
    fn test_decode_button_events() {
        assert_eq!(decode_report(&build_report(event_code::PRESS, 0, 0)), Some(GestureEvent::Press));
        assert_eq!(decode_report(&build_report(event_code::RELEASE, 0, 0)), Some(GestureEvent::Release));
        assert_eq!(decode_report(&build_report(event_code::LONG_PRESS, 0, 0)), Some(GestureEvent::LongPress));
        assert_eq!(decode_report(&build_report(event_code::DOUBLE_TAP, 0, 0)), Some(GestureEvent::DoubleTap));
    }

    #[test]
    fn test_discards_foreign_marker() {
        let mut data = build_report(event_code::PRESS, 0, 0);
        data[0] = 0x01;
        assert_eq!(decode_report(&data), None);
    }

    #[test]
    fn test_discards_truncated_report() {
        assert_eq!(decode_report(&[]), None);
        assert_eq!(decode_report(&[report::MARKER]), None);
        assert_eq!(decode_report(&[report::MARKER, event_code::PRESS, 0]), None);
    }

    #[test]
    fn test_discards_unknown_event_code() {
        assert_eq!(decode_report(&build_report(0x4e, 0, 0)), None);
        assert_eq!(decode_report(&build_report(0x00, 0, 0)), None);
    }

    #[test]
    fn test_accepts_minimal_and_padded_reports() {
        let minimal = [report::MARKER, event_code::PRESS, 0, 0];
        assert_eq!(decode_report(&minimal), Some(GestureEvent::Press));

        let mut padded = [0u8; 64];
        padded[0] = report::MARKER;
        padded[1] = event_code::ROTATE_CW;
        padded[2] = 3;
        assert_eq!(decode_report(&padded), Some(GestureEvent::Rotation { index: 3 }));
    }

    #[test]
    fn test_elapsed_field_requires_six_bytes() {
        assert_eq!(elapsed_field(&[report::MARKER, 1, 0, 0]), None);
        assert_eq!(elapsed_field(&[report::MARKER, 1, 0, 0, 0x2c, 0x01]), Some(300));
    }
}
