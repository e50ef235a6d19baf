//! Interactive analog control.
//!
//! A control turns continuous user input into a calibrated, clamped value.
//! The input handling is an explicit two-state machine:
//!
//! ```text
//!            begin_interaction
//!   Idle  ----------------------->  Pressed
//!    ^                                 |  update_from_pointer (moves value)
//!    |         end_interaction         |
//!    +---------------------------------+
//! ```
//!
//! Host UI callbacks (mouse, touch, keyboard, native range input) map onto
//! these named operations, so the machine is independent of any framework.
//!
//! Pointer positions go through three stages:
//!
//! 1. page pixels are divided by the display zoom,
//! 2. the inverse of the anchor's screen CTM (captured on press) maps them to
//!    local millimetres,
//! 3. the part's [`Calibration`] maps millimetres to a value, rounded to the
//!    nearest whole unit and clamped to `[min, max]`.
//!
//! Pointer drags are continuous; only keyboard increments honour `step`.
//!
//! Parts share their control through a [`ControlHandle`]. Changes made
//! through the handle are announced to subscribers after the control is
//! released, so a subscriber can read the new value back.

mod analog;
mod calibration;
mod config;
mod event;
mod handle;
mod layout;
mod notify;
mod proxy;

pub use analog::{AnalogControl, InteractionState};
pub use calibration::{Axis, Calibration};
pub use config::{ControlConfig, DEFAULT_MAX, DEFAULT_MIN, DEFAULT_STEP};
pub use event::{ElementEvent, Key};
pub use handle::ControlHandle;
pub use layout::{DetachedLayout, LayoutSource, SharedLayout};
pub use notify::SubscriptionId;
pub use proxy::RangeProxy;
