//! Concrete parts.
//!
//! A part *has* a pin table and, if it is adjustable, *has* an
//! [`AnalogControl`]; there is no shared base type. Non-interactive parts
//! simply report no control.
//!
//! | Part | Control | Pins |
//! |------|---------|------|
//! | `slide-potentiometer` | linear, 30 mm travel | VCC, SIG, GND |
//! | `potentiometer` | rotary, 270° sweep | GND, SIG, VCC |
//! | `led` | none | A, C |

mod led;
mod potentiometer;
mod slide_potentiometer;

pub use led::Led;
pub use potentiometer::Potentiometer;
pub use slide_potentiometer::SlidePotentiometer;

pub use crate::control::ControlHandle;

use std::fmt;
use std::rc::Rc;

use log::{debug, warn};

use crate::control::{AnalogControl, ControlConfig, SharedLayout};
use crate::error::{PartsError, Result};
use crate::pin::PinTable;
use crate::viewport::{ListenerGuard, Viewport};

/// Common interface of all parts, as seen by a wiring or simulation engine.
pub trait Part {
    /// Which catalog entry this part is.
    fn kind(&self) -> PartKind;

    /// The part's pins, in authoring order.
    fn pin_info(&self) -> &PinTable;

    /// Current value reported on the part's signal pin.
    fn value(&self) -> f64;

    /// The interactive control, if the part has one.
    fn control(&self) -> Option<ControlHandle> {
        None
    }

    /// Insert the part into an interactive surface.
    fn connect(&mut self, _viewport: &Viewport) {}

    /// Remove the part from its interactive surface.
    fn disconnect(&mut self) {}

    /// Whether the part is currently inserted.
    fn is_connected(&self) -> bool {
        false
    }
}

/// A control plus its viewport attachment.
///
/// Connecting twice keeps a single listener; disconnecting (or dropping the
/// mount) releases it.
#[derive(Debug)]
pub(crate) struct Mount {
    control: ControlHandle,
    guard: Option<ListenerGuard>,
}

impl Mount {
    pub(crate) fn new(control: AnalogControl) -> Self {
        Self {
            control: ControlHandle::new(control),
            guard: None,
        }
    }

    pub(crate) fn control(&self) -> &ControlHandle {
        &self.control
    }

    pub(crate) fn value(&self) -> f64 {
        self.control.value()
    }

    pub(crate) fn connect(&mut self, viewport: &Viewport) {
        if self.guard.is_some() {
            return;
        }
        self.guard = Some(viewport.attach(Rc::new(self.control.clone())));
    }

    pub(crate) fn disconnect(&mut self) {
        if self.guard.take().is_some() {
            // a release outside the window would never reach us now
            if self.control.try_update(|c| c.end_interaction()).is_none() {
                warn!("control busy while disconnecting; press left open");
            }
            debug!("control disconnected");
        }
    }

    pub(crate) fn is_connected(&self) -> bool {
        self.guard.is_some()
    }
}

/// Catalog of shipped parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartKind {
    SlidePotentiometer,
    Potentiometer,
    Led,
}

impl PartKind {
    /// Every shipped part.
    pub const ALL: [PartKind; 3] = [
        PartKind::SlidePotentiometer,
        PartKind::Potentiometer,
        PartKind::Led,
    ];

    /// Catalog name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SlidePotentiometer => "slide-potentiometer",
            Self::Potentiometer => "potentiometer",
            Self::Led => "led",
        }
    }

    /// Look up a part by catalog name.
    pub fn from_name(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| PartsError::unknown_part(name))
    }

    /// Whether this part has an interactive control.
    pub fn is_interactive(&self) -> bool {
        !matches!(self, Self::Led)
    }

    /// Instantiate the part.
    ///
    /// `config` is ignored by non-interactive parts.
    pub fn build(&self, config: ControlConfig, layout: SharedLayout) -> Box<dyn Part> {
        match self {
            Self::SlidePotentiometer => Box::new(SlidePotentiometer::new(config, layout)),
            Self::Potentiometer => Box::new(Potentiometer::new(config, layout)),
            Self::Led => Box::new(Led::new()),
        }
    }
}

impl fmt::Display for PartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
