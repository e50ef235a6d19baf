//! # Partsim
//!
//! Interactive electronic part models for browser-based circuit simulators.
//!
//! This library provides:
//! - A typed pin/signal model that every part exposes to a wiring engine
//! - An interactive analog control that turns pointer, touch and keyboard
//!   input into a clamped, calibrated value with change notification
//! - Window-scoped listener management with guaranteed detach
//! - A small catalog of parts composing the two
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`pin`] - Pin and signal descriptions, lookup and validation
//! - [`geometry`] - Page-to-local coordinate conversion
//! - [`control`] - The analog control state machine and its configuration
//! - [`viewport`] - Window-level event surface and listener guards
//! - [`parts`] - Concrete parts (slide potentiometer, rotary potentiometer, LED)
//! - [`trace`] - Parser for scripted input traces
//! - [`bench`] - Replays traces against a mounted part
//!
//! ## Usage
//!
//! ### Native CLI
//!
//! ```bash
//! partsim pins slide-potentiometer --json
//! partsim run drag.trace
//! ```
//!
//! ### WASM
//!
//! ```javascript
//! import { WasmPart } from 'partsim';
//!
//! const pot = new WasmPart('slide-potentiometer');
//! pot.set_layout(...tipElement.getScreenCTM());
//! pot.pointer_down();
//! pot.pointer_move(event.pageX, event.pageY);
//! ```
//!
//! ## Value Pipeline
//!
//! For each pointer event during a press:
//!
//! 1. Divide the page position by the display zoom
//! 2. Map it through the inverse anchor CTM captured when the press began
//! 3. Apply the part's calibration, round to the nearest unit, clamp to
//!    `[min, max]`
//! 4. Notify subscribers if the stored value changed

pub mod bench;
pub mod control;
pub mod error;
pub mod geometry;
pub mod parts;
pub mod pin;
pub mod trace;
pub mod viewport;

// Re-export main types for convenience
pub use bench::Workbench;
pub use control::{AnalogControl, ControlConfig, ControlHandle};
pub use error::{PartsError, Result};
pub use parts::{Part, PartKind};
pub use pin::{ElementPin, PinSignalInfo, PinTable};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmPart;
