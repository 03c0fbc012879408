//! Direction-pad flags and their device-native hat codes.

use bitflags::bitflags;

pub const DPAD_CODE_UP: u8 = 0x00;
pub const DPAD_CODE_UP_RIGHT: u8 = 0x01;
pub const DPAD_CODE_RIGHT: u8 = 0x02;
pub const DPAD_CODE_DOWN_RIGHT: u8 = 0x03;
pub const DPAD_CODE_DOWN: u8 = 0x04;
pub const DPAD_CODE_DOWN_LEFT: u8 = 0x05;
pub const DPAD_CODE_LEFT: u8 = 0x06;
pub const DPAD_CODE_UP_LEFT: u8 = 0x07;
pub const DPAD_CODE_CENTER: u8 = 0x08;

bitflags! {
    /// Dpad direction flags, bits 16..20 of the composite command.
    pub struct DpadFlags: u8 {
        const UP    = 0x01;
        const RIGHT = 0x02;
        const DOWN  = 0x04;
        const LEFT  = 0x08;
    }
}

impl DpadFlags {
    /// Map the flag set to the hat code the controller board expects.
    ///
    /// Only the eight compass points and the empty set are representable on
    /// the device; contradictory combinations such as UP|DOWN collapse to
    /// center rather than failing.
    pub fn device_code(self) -> u8 {
        let up = self.contains(Self::UP);
        let right = self.contains(Self::RIGHT);
        let down = self.contains(Self::DOWN);
        let left = self.contains(Self::LEFT);

        match (up, right, down, left) {
            (true, false, false, false) => DPAD_CODE_UP,
            (true, true, false, false) => DPAD_CODE_UP_RIGHT,
            (false, true, false, false) => DPAD_CODE_RIGHT,
            (false, true, true, false) => DPAD_CODE_DOWN_RIGHT,
            (false, false, true, false) => DPAD_CODE_DOWN,
            (false, false, true, true) => DPAD_CODE_DOWN_LEFT,
            (false, false, false, true) => DPAD_CODE_LEFT,
            (true, false, false, true) => DPAD_CODE_UP_LEFT,
            (false, false, false, false) => DPAD_CODE_CENTER,
            _ => {
                log::debug!("No hat code for dpad combination {:?}, centering", self);
                DPAD_CODE_CENTER
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn compass_points_map_to_device_codes() {
        assert_eq!(DpadFlags::UP.device_code(), DPAD_CODE_UP);
        assert_eq!((DpadFlags::UP | DpadFlags::RIGHT).device_code(), DPAD_CODE_UP_RIGHT);
        assert_eq!(DpadFlags::RIGHT.device_code(), DPAD_CODE_RIGHT);
        assert_eq!((DpadFlags::DOWN | DpadFlags::RIGHT).device_code(), DPAD_CODE_DOWN_RIGHT);
        assert_eq!(DpadFlags::DOWN.device_code(), DPAD_CODE_DOWN);
        assert_eq!((DpadFlags::DOWN | DpadFlags::LEFT).device_code(), DPAD_CODE_DOWN_LEFT);
        assert_eq!(DpadFlags::LEFT.device_code(), DPAD_CODE_LEFT);
        assert_eq!((DpadFlags::UP | DpadFlags::LEFT).device_code(), DPAD_CODE_UP_LEFT);
        assert_eq!(DpadFlags::empty().device_code(), DPAD_CODE_CENTER);
    }

    #[test]
    fn contradictory_combinations_center() {
        assert_eq!((DpadFlags::UP | DpadFlags::DOWN).device_code(), DPAD_CODE_CENTER);
        assert_eq!((DpadFlags::LEFT | DpadFlags::RIGHT).device_code(), DPAD_CODE_CENTER);
        assert_eq!(DpadFlags::all().device_code(), DPAD_CODE_CENTER);
        assert_eq!(
            (DpadFlags::UP | DpadFlags::RIGHT | DpadFlags::DOWN).device_code(),
            DPAD_CODE_CENTER
        );
    }
}
