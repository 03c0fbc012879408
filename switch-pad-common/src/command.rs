//! The composite command word and its composition rules.

use std::ops::{BitOr, BitOrAssign};

use bitflags::bitflags;

use crate::dpad::DpadFlags;
use crate::symbol::InputSymbol;

bitflags! {
    /// Button flags, the low 16 bits of the composite command.
    pub struct Buttons: u16 {
        const Y       = 1 << 0;
        const B       = 1 << 1;
        const A       = 1 << 2;
        const X       = 1 << 3;
        const L       = 1 << 4;
        const R       = 1 << 5;
        const ZL      = 1 << 6;
        const ZR      = 1 << 7;
        const MINUS   = 1 << 8;
        const PLUS    = 1 << 9;
        const LCLICK  = 1 << 10;
        const RCLICK  = 1 << 11;
        const HOME    = 1 << 12;
        const CAPTURE = 1 << 13;
    }
}

const DPAD_SHIFT: u32 = 16;
const LEFT_STICK_SHIFT: u32 = 24;
const RIGHT_STICK_SHIFT: u32 = 44;

/// A stick sub-field is 8 intensity bits with 12 angle bits above them.
const STICK_FIELD: u64 = 0xF_FFFF;

const LEFT_STICK_MASK: u64 = STICK_FIELD << LEFT_STICK_SHIFT;
const RIGHT_STICK_MASK: u64 = STICK_FIELD << RIGHT_STICK_SHIFT;

/// Bit-packed composite command word.
///
/// Layout: bits 0..16 button flags, bits 16..20 dpad direction flags, bits
/// 24..44 the left stick sub-field, bits 44..64 the right stick sub-field.
/// The sub-fields are disjoint, so codes touching different fields combine
/// with a plain OR.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct CompositeCode(u64);

impl CompositeCode {
    /// No buttons, centered dpad, both sticks at rest.
    pub const NEUTRAL: Self = Self(0);

    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }

    pub const fn buttons(buttons: Buttons) -> Self {
        Self(buttons.bits() as u64)
    }

    pub const fn dpad(flags: DpadFlags) -> Self {
        Self((flags.bits() as u64) << DPAD_SHIFT)
    }

    /// Left stick deflection: angle in degrees, counter-clockwise from
    /// rightward, at the given intensity.
    pub const fn left_stick(angle_degrees: u16, intensity: u8) -> Self {
        Self(stick_field(angle_degrees, intensity) << LEFT_STICK_SHIFT)
    }

    pub const fn right_stick(angle_degrees: u16, intensity: u8) -> Self {
        Self(stick_field(angle_degrees, intensity) << RIGHT_STICK_SHIFT)
    }

    pub fn button_bits(self) -> u16 {
        self.0 as u16
    }

    /// Dpad nibble; bits 20..24 are reserved and never interpreted.
    pub fn dpad_flags(self) -> DpadFlags {
        DpadFlags::from_bits_truncate((self.0 >> DPAD_SHIFT) as u8)
    }

    /// Left stick (angle in degrees, intensity).
    pub fn left_stick_polar(self) -> (u16, u8) {
        split_stick_field(self.0 >> LEFT_STICK_SHIFT)
    }

    /// Right stick (angle in degrees, intensity).
    pub fn right_stick_polar(self) -> (u16, u8) {
        split_stick_field(self.0 >> RIGHT_STICK_SHIFT)
    }
}

const fn stick_field(angle_degrees: u16, intensity: u8) -> u64 {
    intensity as u64 | (((angle_degrees & 0xFFF) as u64) << 8)
}

const fn split_stick_field(field: u64) -> (u16, u8) {
    (((field >> 8) & 0xFFF) as u16, field as u8)
}

impl BitOr for CompositeCode {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for CompositeCode {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Fold the held inputs, oldest trigger first, into one composite code.
///
/// Button and dpad flags accumulate. The stick sub-fields are exclusive: two
/// codes deflecting the same stick cannot be merged bit-wise, so the most
/// recent trigger replaces whatever owned that stick before it.
pub fn compose<I>(held: I) -> CompositeCode
where
    I: IntoIterator<Item = InputSymbol>,
{
    let mut code = 0;
    for symbol in held {
        let contribution = symbol.code().raw();
        if contribution & LEFT_STICK_MASK != 0 && code & LEFT_STICK_MASK != 0 {
            log::trace!("{} takes over the left stick", symbol.name());
            code &= !LEFT_STICK_MASK;
        }
        if contribution & RIGHT_STICK_MASK != 0 && code & RIGHT_STICK_MASK != 0 {
            log::trace!("{} takes over the right stick", symbol.name());
            code &= !RIGHT_STICK_MASK;
        }
        code |= contribution;
    }
    CompositeCode(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn compose_empty_set_is_neutral() {
        assert_eq!(compose([]), CompositeCode::NEUTRAL);
    }

    #[test]
    fn compose_accumulates_disjoint_fields() {
        let code = compose([InputSymbol::A, InputSymbol::Up, InputSymbol::DpadLeft]);
        assert_eq!(code.button_bits(), Buttons::A.bits());
        assert_eq!(code.dpad_flags(), DpadFlags::LEFT);
        assert_eq!(code.left_stick_polar(), (90, 0xFF));
        assert_eq!(code.right_stick_polar(), (0, 0));
    }

    #[test]
    fn compose_latest_trigger_owns_the_stick() {
        // Both symbols deflect the left stick; the one triggered last wins.
        let code = compose([InputSymbol::Up, InputSymbol::RunLeft]);
        assert_eq!(code.left_stick_polar(), (180, 0xFF));
        assert_eq!(code.button_bits(), Buttons::B.bits());

        let code = compose([InputSymbol::RunLeft, InputSymbol::Up]);
        assert_eq!(code.left_stick_polar(), (90, 0xFF));
        // The earlier trigger's button contribution survives the takeover.
        assert_eq!(code.button_bits(), Buttons::B.bits());
    }

    #[test]
    fn compose_sticks_are_independent() {
        let code = compose([InputSymbol::Up, InputSymbol::CameraLeft]);
        assert_eq!(code.left_stick_polar(), (90, 0xFF));
        assert_eq!(code.right_stick_polar(), (180, 0xFF));
    }

    #[test]
    fn stick_fields_land_at_documented_offsets() {
        assert_eq!(CompositeCode::left_stick(90, 0xFF).raw(), 0x0000_005A_FF00_0000);
        assert_eq!(CompositeCode::right_stick(90, 0xFF).raw(), 0x05AF_F000_0000_0000);
        assert_eq!(CompositeCode::dpad(DpadFlags::UP).raw(), 0x0001_0000);
    }

    #[test]
    fn accessors_mask_out_of_range_fields() {
        let code = CompositeCode::from_raw(u64::MAX);
        assert_eq!(code.button_bits(), 0xFFFF);
        assert_eq!(code.dpad_flags(), DpadFlags::all());
        assert_eq!(code.left_stick_polar(), (0xFFF, 0xFF));
        assert_eq!(code.right_stick_polar(), (0xFFF, 0xFF));
    }
}
