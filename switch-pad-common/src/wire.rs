//! Decomposition of a composite code into the frame sent over the wire.

use crate::command::CompositeCode;
use crate::stick;

/// One decoded command frame: the seven fields the controller board parses
/// out of each serial line.
///
/// Frames are recomputed from the composite code on every tick and never
/// stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WireCommand {
    pub buttons_high: u8,
    pub buttons_low: u8,
    pub dpad: u8,
    pub left_x: u8,
    pub left_y: u8,
    pub right_x: u8,
    pub right_y: u8,
}

impl WireCommand {
    /// Decompose a composite code field by field.
    ///
    /// Any 64-bit value is accepted; bits outside the known sub-fields are
    /// masked off, never rejected.
    pub fn from_code(code: CompositeCode) -> Self {
        let buttons = code.button_bits();
        let (left_angle, left_intensity) = code.left_stick_polar();
        let (right_angle, right_intensity) = code.right_stick_polar();
        let (left_x, left_y) = stick::to_cartesian(left_angle, left_intensity);
        let (right_x, right_y) = stick::to_cartesian(right_angle, right_intensity);

        Self {
            buttons_high: (buttons >> 8) as u8,
            buttons_low: (buttons & 0xFF) as u8,
            dpad: code.dpad_flags().device_code(),
            left_x,
            left_y,
            right_x,
            right_y,
        }
    }

    /// Render the frame as the space-separated decimal line the board
    /// parses, CR-LF terminated.
    pub fn encode_line(&self) -> String {
        format!(
            "{} {} {} {} {} {} {}\r\n",
            self.buttons_high,
            self.buttons_low,
            self.dpad,
            self.left_x,
            self.left_y,
            self.right_x,
            self.right_y,
        )
    }
}
