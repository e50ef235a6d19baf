//! Abstract Syntax Tree types for input traces.

use crate::control::ElementEvent;
use crate::viewport::ViewportEvent;

/// Complete AST representation of a parsed trace.
#[derive(Debug, Clone, Default)]
pub struct TraceAst {
    /// Part selected with `.part`, if any
    pub part: Option<String>,
    /// Steps in source order
    pub steps: Vec<Step>,
}

impl TraceAst {
    /// Create a new empty trace.
    pub fn new() -> Self {
        Self::default()
    }
}

/// One trace line.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub command: Command,
    /// Source line number for error reporting
    pub line: usize,
}

/// What a trace line does.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `.range min max [step]`
    Range { min: f64, max: f64, step: Option<f64> },
    /// `.layout a b c d e f`
    Layout([f64; 6]),
    /// `.detach-layout`
    DetachLayout,
    /// `.zoom <v>` or `.zoom none`
    Zoom(Option<f64>),
    /// `.mount`
    Mount,
    /// `.unmount`
    Unmount,
    /// Event on the control element
    Element(ElementEvent),
    /// Event at viewport scope
    Viewport(ViewportEvent),
    /// `input <v>`: native proxy edit
    Input(f64),
    /// `set <v>`: programmatic value
    Set(f64),
    /// `min <v>`
    Min(f64),
    /// `max <v>`
    Max(f64),
    /// `step <v>`
    Step(f64),
    /// `expect <v>`
    Expect(f64),
}
