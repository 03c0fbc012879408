//! The closed set of logical inputs the server understands.

use std::time::Duration;

use crate::command::{Buttons, CompositeCode};
use crate::dpad::DpadFlags;

/// Full stick deflection, shared by every directional symbol.
const FULL_TILT: u8 = 0xFF;

/// A named logical input. Each symbol contributes a fixed slice of the
/// composite command and stays held for a fixed duration once triggered.
///
/// The set is closed on purpose: lookups cannot fail at runtime, and adding
/// a symbol forces both its code and its hold duration to be supplied before
/// anything compiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputSymbol {
    // Left stick, walking speed.
    Up,
    Left,
    Back,
    Right,
    LeftUp,
    RightUp,
    RightDown,
    LeftDown,
    // Left stick plus B, running.
    RunUp,
    RunLeft,
    RunBack,
    RunRight,
    RunLeftUp,
    RunRightUp,
    RunRightDown,
    RunLeftDown,
    // Left stick, short taps.
    QuickUp,
    QuickLeft,
    QuickDown,
    QuickRight,
    // Right stick.
    CameraUp,
    CameraDown,
    CameraLeft,
    CameraRight,
    // Plain buttons.
    A,
    B,
    X,
    Y,
    L,
    R,
    Zl,
    Zr,
    Minus,
    Plus,
    Home,
    // Dpad.
    DpadLeft,
    DpadRight,
    // Button/stick combos.
    Backflip,
    Parry,
    // Deliberate no-op.
    Neutral,
}

impl InputSymbol {
    pub const ALL: [Self; 40] = [
        Self::Up,
        Self::Left,
        Self::Back,
        Self::Right,
        Self::LeftUp,
        Self::RightUp,
        Self::RightDown,
        Self::LeftDown,
        Self::RunUp,
        Self::RunLeft,
        Self::RunBack,
        Self::RunRight,
        Self::RunLeftUp,
        Self::RunRightUp,
        Self::RunRightDown,
        Self::RunLeftDown,
        Self::QuickUp,
        Self::QuickLeft,
        Self::QuickDown,
        Self::QuickRight,
        Self::CameraUp,
        Self::CameraDown,
        Self::CameraLeft,
        Self::CameraRight,
        Self::A,
        Self::B,
        Self::X,
        Self::Y,
        Self::L,
        Self::R,
        Self::Zl,
        Self::Zr,
        Self::Minus,
        Self::Plus,
        Self::Home,
        Self::DpadLeft,
        Self::DpadRight,
        Self::Backflip,
        Self::Parry,
        Self::Neutral,
    ];

    /// Look up a symbol by its trigger name, as it appears in request paths.
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "up" => Self::Up,
            "left" => Self::Left,
            "back" => Self::Back,
            "right" => Self::Right,
            "leftup" => Self::LeftUp,
            "rightup" => Self::RightUp,
            "rightdown" => Self::RightDown,
            "leftdown" => Self::LeftDown,
            "runup" => Self::RunUp,
            "runleft" => Self::RunLeft,
            "runback" => Self::RunBack,
            "runright" => Self::RunRight,
            "runleftup" => Self::RunLeftUp,
            "runrightup" => Self::RunRightUp,
            "runrightdown" => Self::RunRightDown,
            "runleftdown" => Self::RunLeftDown,
            "quickup" => Self::QuickUp,
            "quickleft" => Self::QuickLeft,
            "quickdown" => Self::QuickDown,
            "quickright" => Self::QuickRight,
            "cameraup" => Self::CameraUp,
            "cameradown" => Self::CameraDown,
            "cameraleft" => Self::CameraLeft,
            "cameraright" => Self::CameraRight,
            "a" => Self::A,
            "b" => Self::B,
            "x" => Self::X,
            "y" => Self::Y,
            "l" => Self::L,
            "r" => Self::R,
            "zl" => Self::Zl,
            "zr" => Self::Zr,
            "minus" => Self::Minus,
            "plus" => Self::Plus,
            "home" => Self::Home,
            "dleft" => Self::DpadLeft,
            "dright" => Self::DpadRight,
            "backflip" => Self::Backflip,
            "parry" => Self::Parry,
            "none" => Self::Neutral,
            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Left => "left",
            Self::Back => "back",
            Self::Right => "right",
            Self::LeftUp => "leftup",
            Self::RightUp => "rightup",
            Self::RightDown => "rightdown",
            Self::LeftDown => "leftdown",
            Self::RunUp => "runup",
            Self::RunLeft => "runleft",
            Self::RunBack => "runback",
            Self::RunRight => "runright",
            Self::RunLeftUp => "runleftup",
            Self::RunRightUp => "runrightup",
            Self::RunRightDown => "runrightdown",
            Self::RunLeftDown => "runleftdown",
            Self::QuickUp => "quickup",
            Self::QuickLeft => "quickleft",
            Self::QuickDown => "quickdown",
            Self::QuickRight => "quickright",
            Self::CameraUp => "cameraup",
            Self::CameraDown => "cameradown",
            Self::CameraLeft => "cameraleft",
            Self::CameraRight => "cameraright",
            Self::A => "a",
            Self::B => "b",
            Self::X => "x",
            Self::Y => "y",
            Self::L => "l",
            Self::R => "r",
            Self::Zl => "zl",
            Self::Zr => "zr",
            Self::Minus => "minus",
            Self::Plus => "plus",
            Self::Home => "home",
            Self::DpadLeft => "dleft",
            Self::DpadRight => "dright",
            Self::Backflip => "backflip",
            Self::Parry => "parry",
            Self::Neutral => "none",
        }
    }

    /// The symbol's fixed contribution to the composite command.
    pub fn code(self) -> CompositeCode {
        match self {
            Self::Up | Self::QuickUp => CompositeCode::left_stick(90, FULL_TILT),
            Self::Left | Self::QuickLeft => CompositeCode::left_stick(180, FULL_TILT),
            Self::Back | Self::QuickDown => CompositeCode::left_stick(270, FULL_TILT),
            Self::Right | Self::QuickRight => CompositeCode::left_stick(0, FULL_TILT),
            Self::LeftUp => CompositeCode::left_stick(135, FULL_TILT),
            Self::RightUp => CompositeCode::left_stick(45, FULL_TILT),
            Self::RightDown => CompositeCode::left_stick(315, FULL_TILT),
            Self::LeftDown => CompositeCode::left_stick(225, FULL_TILT),
            Self::RunUp => {
                CompositeCode::left_stick(90, FULL_TILT) | CompositeCode::buttons(Buttons::B)
            }
            Self::RunLeft => {
                CompositeCode::left_stick(180, FULL_TILT) | CompositeCode::buttons(Buttons::B)
            }
            Self::RunBack => {
                CompositeCode::left_stick(270, FULL_TILT) | CompositeCode::buttons(Buttons::B)
            }
            Self::RunRight => {
                CompositeCode::left_stick(0, FULL_TILT) | CompositeCode::buttons(Buttons::B)
            }
            Self::RunLeftUp => {
                CompositeCode::left_stick(135, FULL_TILT) | CompositeCode::buttons(Buttons::B)
            }
            Self::RunRightUp => {
                CompositeCode::left_stick(45, FULL_TILT) | CompositeCode::buttons(Buttons::B)
            }
            Self::RunRightDown => {
                CompositeCode::left_stick(315, FULL_TILT) | CompositeCode::buttons(Buttons::B)
            }
            Self::RunLeftDown => {
                CompositeCode::left_stick(225, FULL_TILT) | CompositeCode::buttons(Buttons::B)
            }
            Self::CameraUp => CompositeCode::right_stick(90, FULL_TILT),
            Self::CameraDown => CompositeCode::right_stick(270, FULL_TILT),
            Self::CameraLeft => CompositeCode::right_stick(180, FULL_TILT),
            Self::CameraRight => CompositeCode::right_stick(0, FULL_TILT),
            Self::A => CompositeCode::buttons(Buttons::A),
            Self::B => CompositeCode::buttons(Buttons::B),
            Self::X => CompositeCode::buttons(Buttons::X),
            Self::Y => CompositeCode::buttons(Buttons::Y),
            Self::L => CompositeCode::buttons(Buttons::L),
            Self::R => CompositeCode::buttons(Buttons::R),
            Self::Zl => CompositeCode::buttons(Buttons::ZL),
            Self::Zr => CompositeCode::buttons(Buttons::ZR),
            Self::Minus => CompositeCode::buttons(Buttons::MINUS),
            Self::Plus => CompositeCode::buttons(Buttons::PLUS),
            Self::Home => CompositeCode::buttons(Buttons::HOME),
            Self::DpadLeft => CompositeCode::dpad(DpadFlags::LEFT),
            Self::DpadRight => CompositeCode::dpad(DpadFlags::RIGHT),
            Self::Backflip => {
                CompositeCode::buttons(Buttons::ZL | Buttons::X)
                    | CompositeCode::left_stick(270, FULL_TILT)
            }
            Self::Parry => CompositeCode::buttons(Buttons::ZL | Buttons::A),
            Self::Neutral => CompositeCode::NEUTRAL,
        }
    }

    /// How long a trigger keeps the symbol held before it auto-releases.
    pub fn hold_duration(self) -> Duration {
        match self {
            Self::A
            | Self::B
            | Self::X
            | Self::Y
            | Self::QuickUp
            | Self::QuickLeft
            | Self::QuickDown
            | Self::QuickRight => Duration::from_millis(100),
            Self::Parry
            | Self::CameraUp
            | Self::CameraDown
            | Self::CameraLeft
            | Self::CameraRight
            | Self::DpadLeft
            | Self::DpadRight => Duration::from_millis(300),
            Self::Up
            | Self::Left
            | Self::Back
            | Self::Right
            | Self::LeftUp
            | Self::RightUp
            | Self::RightDown
            | Self::LeftDown
            | Self::RunUp
            | Self::RunLeft
            | Self::RunBack
            | Self::RunRight
            | Self::RunLeftUp
            | Self::RunRightUp
            | Self::RunRightDown
            | Self::RunLeftDown => Duration::from_millis(800),
            Self::L
            | Self::R
            | Self::Zl
            | Self::Zr
            | Self::Minus
            | Self::Plus
            | Self::Home
            | Self::Backflip
            | Self::Neutral => Duration::from_secs(1),
        }
    }
}
