//! Shared command model for the switch-pad project: the bit-packed composite
//! command word, the input symbol tables, and the per-tick wire frame.

pub mod command;
pub mod dpad;
pub mod stick;
pub mod symbol;
pub mod wire;

pub use command::{compose, Buttons, CompositeCode};
pub use dpad::DpadFlags;
pub use symbol::InputSymbol;
pub use wire::WireCommand;
