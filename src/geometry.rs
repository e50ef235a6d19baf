//! Page-to-local coordinate conversion.
//!
//! Pointer events arrive in page pixels. Controls calibrate in the local
//! millimetre space of their anchor element. The host reports the anchor's
//! screen CTM (local to page); we keep its inverse and apply the display zoom
//! separately, because the CTM does not account for CSS-level zoom.

use std::fmt;

use glam::{DAffine2, DVec2};

/// Determinants smaller than this are treated as non-invertible.
const MIN_DETERMINANT: f64 = 1e-12;

/// A 2D point in either page or local space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<DVec2> for Point {
    fn from(v: DVec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl From<Point> for DVec2 {
    fn from(p: Point) -> Self {
        DVec2::new(p.x, p.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}

/// Cached page-to-local mapping for one interaction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageTransform {
    page_to_local: DAffine2,
}

impl PageTransform {
    /// Build from an anchor's screen CTM, given in DOMMatrix order
    /// `[a, b, c, d, e, f]` (local to page).
    ///
    /// Returns `None` if the matrix is not finite or cannot be inverted,
    /// e.g. when the anchor has collapsed to zero size.
    pub fn from_screen_ctm(ctm: [f64; 6]) -> Option<Self> {
        Self::from_local_to_page(DAffine2::from_cols_array(&ctm))
    }

    /// Build from a local-to-page affine transform.
    pub fn from_local_to_page(local_to_page: DAffine2) -> Option<Self> {
        if !local_to_page.is_finite() {
            return None;
        }
        if local_to_page.matrix2.determinant().abs() < MIN_DETERMINANT {
            return None;
        }
        let page_to_local = local_to_page.inverse();
        page_to_local
            .is_finite()
            .then_some(Self { page_to_local })
    }

    /// Convert a page point to local space.
    ///
    /// Zoom is divided out first, then the inverse CTM is applied.
    pub fn to_local(&self, page: Point, zoom: f64) -> Point {
        let unzoomed = DVec2::new(page.x / zoom, page.y / zoom);
        self.page_to_local.transform_point2(unzoomed).into()
    }
}

/// Normalize a host-reported zoom factor, defaulting to 1.
pub fn sanitize_zoom(zoom: Option<f64>) -> f64 {
    match zoom {
        Some(z) if z.is_finite() && z > 0.0 => z,
        _ => 1.0,
    }
}
