//! Sources of anchor geometry and display zoom.

use std::cell::RefCell;
use std::rc::Rc;

/// Where a control reads its anchor's on-screen geometry from.
///
/// Implemented by the host UI layer. Both queries may fail: the anchor can be
/// detached or not yet laid out, and the display may not report a zoom.
pub trait LayoutSource {
    /// Screen CTM of the anchor element (local mm to page px), in DOMMatrix
    /// order `[a, b, c, d, e, f]`.
    fn anchor_screen_ctm(&self) -> Option<[f64; 6]>;

    /// Display-wide zoom not reflected in the CTM.
    fn display_zoom(&self) -> Option<f64>;
}

/// A layout that never has geometry, for controls that are not on screen.
#[derive(Debug, Clone, Copy, Default)]
pub struct DetachedLayout;

impl LayoutSource for DetachedLayout {
    fn anchor_screen_ctm(&self) -> Option<[f64; 6]> {
        None
    }

    fn display_zoom(&self) -> Option<f64> {
        None
    }
}

#[derive(Debug, Clone, Default)]
struct LayoutState {
    ctm: Option<[f64; 6]>,
    zoom: Option<f64>,
}

/// Layout state shared between a host and the controls it lays out.
///
/// Clones share the same state, so the host can move or resize the anchor
/// between interactions.
#[derive(Debug, Clone, Default)]
pub struct SharedLayout {
    state: Rc<RefCell<LayoutState>>,
}

impl SharedLayout {
    /// Create a layout with no geometry yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a layout with an identity CTM (1 page px per local mm).
    pub fn identity() -> Self {
        let layout = Self::new();
        layout.set_ctm(Some([1.0, 0.0, 0.0, 1.0, 0.0, 0.0]));
        layout
    }

    /// Set or clear the anchor's screen CTM.
    pub fn set_ctm(&self, ctm: Option<[f64; 6]>) {
        self.state.borrow_mut().ctm = ctm;
    }

    /// Set or clear the display zoom.
    pub fn set_zoom(&self, zoom: Option<f64>) {
        self.state.borrow_mut().zoom = zoom;
    }
}

impl LayoutSource for SharedLayout {
    fn anchor_screen_ctm(&self) -> Option<[f64; 6]> {
        self.state.borrow().ctm
    }

    fn display_zoom(&self) -> Option<f64> {
        self.state.borrow().zoom
    }
}
