//! Workbench: one part mounted on a viewport, driven by a trace.
//!
//! The workbench stands in for a host page. It owns the viewport, the
//! anchor layout and the part, replays [`TraceAst`] steps against them and
//! records every change notification the part emits.

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info};

use crate::control::{ControlConfig, SharedLayout};
use crate::error::{PartsError, Result};
use crate::parts::{ControlHandle, Part, PartKind};
use crate::trace::{Command, Step, TraceAst};
use crate::viewport::Viewport;

/// Tolerance for `expect` assertions.
pub const EXPECT_TOLERANCE: f64 = 1e-9;

/// One change notification, tagged with the trace line that caused it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueChange {
    /// Trace line number (0 for changes made outside a trace)
    pub line: usize,
    /// New value
    pub value: f64,
}

/// A part on a simulated page.
pub struct Workbench {
    viewport: Viewport,
    layout: SharedLayout,
    part: Box<dyn Part>,
    pending: Rc<RefCell<Vec<f64>>>,
    changes: Vec<ValueChange>,
}

impl Workbench {
    /// Create a workbench with an identity anchor layout (1 px per mm).
    pub fn new(kind: PartKind, config: ControlConfig) -> Self {
        Self::with_layout(kind, config, SharedLayout::identity())
    }

    /// Create a workbench with a caller-supplied layout.
    pub fn with_layout(kind: PartKind, config: ControlConfig, layout: SharedLayout) -> Self {
        let part = kind.build(config, layout.clone());
        let pending = Rc::new(RefCell::new(Vec::new()));
        if let Some(control) = part.control() {
            let sink = Rc::clone(&pending);
            control.subscribe(move |value| sink.borrow_mut().push(value));
        }
        debug!("workbench created for {}", kind);
        Self {
            viewport: Viewport::new(),
            layout,
            part,
            pending,
            changes: Vec::new(),
        }
    }

    /// Create a workbench for the part a trace selects.
    ///
    /// `fallback` is used when the trace has no `.part` directive.
    pub fn for_trace(ast: &TraceAst, fallback: Option<PartKind>) -> Result<Self> {
        let kind = match ast.part.as_deref() {
            Some(name) => PartKind::from_name(name)?,
            None => fallback.ok_or(PartsError::MissingPart)?,
        };
        Ok(Self::new(kind, ControlConfig::default()))
    }

    /// Replay every step of a trace.
    pub fn run(&mut self, ast: &TraceAst) -> Result<&[ValueChange]> {
        let start = self.changes.len();
        for step in &ast.steps {
            self.apply(step)?;
        }
        info!(
            "trace replayed: {} steps, {} value changes",
            ast.steps.len(),
            self.changes.len() - start
        );
        Ok(&self.changes[start..])
    }

    /// Apply a single trace step.
    pub fn apply(&mut self, step: &Step) -> Result<()> {
        let line = step.line;
        match &step.command {
            Command::Range {
                min,
                max,
                step: increment,
            } => {
                self.require_control(line)?.update(|control| {
                    control.set_range(*min, *max);
                    if let Some(increment) = increment {
                        control.set_step(*increment);
                    }
                });
            }
            Command::Layout(ctm) => self.layout.set_ctm(Some(*ctm)),
            Command::DetachLayout => self.layout.set_ctm(None),
            Command::Zoom(zoom) => self.layout.set_zoom(*zoom),
            Command::Mount => self.part.connect(&self.viewport),
            Command::Unmount => self.part.disconnect(),
            Command::Element(event) => self
                .require_control(line)?
                .update(|c| c.handle_element_event(event)),
            Command::Viewport(event) => self.viewport.dispatch(event),
            Command::Input(v) => self
                .require_control(line)?
                .update(|c| c.handle_direct_input(*v)),
            Command::Set(v) => self.require_control(line)?.update(|c| c.set_value(*v)),
            Command::Min(v) => self.require_control(line)?.update(|c| c.set_min(*v)),
            Command::Max(v) => self.require_control(line)?.update(|c| c.set_max(*v)),
            Command::Step(v) => self.require_control(line)?.update(|c| c.set_step(*v)),
            Command::Expect(expected) => {
                let actual = self.part.value();
                if (actual - expected).abs() > EXPECT_TOLERANCE {
                    return Err(PartsError::ExpectationFailed {
                        line,
                        expected: *expected,
                        actual,
                    });
                }
            }
        }
        self.collect(line);
        Ok(())
    }

    fn require_control(&self, line: usize) -> Result<ControlHandle> {
        self.part.control().ok_or_else(|| PartsError::NotInteractive {
            part: self.part.kind().name().to_string(),
            line,
        })
    }

    fn collect(&mut self, line: usize) {
        let drained: Vec<f64> = self.pending.borrow_mut().drain(..).collect();
        self.changes
            .extend(drained.into_iter().map(|value| ValueChange { line, value }));
    }

    /// The part under test.
    pub fn part(&self) -> &dyn Part {
        self.part.as_ref()
    }

    /// Mutable access to the part under test.
    pub fn part_mut(&mut self) -> &mut dyn Part {
        self.part.as_mut()
    }

    /// The simulated window.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// The anchor layout the part reads from.
    pub fn layout(&self) -> &SharedLayout {
        &self.layout
    }

    /// Every change recorded so far. Changes made through [`Self::part_mut`]
    /// are picked up by the next step, or by [`Self::sync`].
    pub fn changes(&self) -> &[ValueChange] {
        &self.changes
    }

    /// Record notifications raised outside of trace steps (line 0).
    pub fn sync(&mut self) {
        self.collect(0);
    }
}
