//! Pin/signal model shared by every part.
//!
//! Each part exposes an ordered, read-only [`PinTable`] describing its
//! physical contacts and the electrical signals they carry. An external
//! wiring or simulation engine looks pins up by number or name and reads the
//! part's current value to know what to drive on which pin.
//!
//! Pin tables are authored statically; [`validate_pins`] is the authoring
//! check and is exercised by the test suite for every shipped part.

mod table;
mod types;
mod validate;

pub use table::PinTable;
pub use types::*;
pub use validate::validate_pins;
