//! Mapping from local anchor coordinates to control values.

use crate::geometry::Point;

use super::ControlConfig;

/// Local axis a linear control travels along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Axis {
    #[default]
    X,
    Y,
}

impl Axis {
    fn pick(self, p: Point) -> f64 {
        match self {
            Axis::X => p.x,
            Axis::Y => p.y,
        }
    }
}

/// Fixed per-part calibration between physical travel and value range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Calibration {
    /// Straight travel, e.g. a slider tip.
    ///
    /// `origin_offset` is the local coordinate (mm) where the value is `min`;
    /// `travel` is the distance (mm) covered between `min` and `max`.
    Linear {
        axis: Axis,
        origin_offset: f64,
        travel: f64,
    },
    /// Rotary travel, e.g. a knob.
    ///
    /// Angles are in degrees, clockwise in screen space, with 0 along +x.
    /// `start_angle` maps to `min`, `start_angle + sweep` maps to `max`.
    Angular {
        center: Point,
        start_angle: f64,
        sweep: f64,
    },
}

impl Calibration {
    /// Compute the value for a local-space point.
    ///
    /// The result is rounded to the nearest whole unit and offset by `min`,
    /// but not clamped. Returns `None` when the range is empty or the point
    /// gives no usable reading (e.g. exactly on a knob's centre).
    pub fn value_at(&self, local: Point, config: &ControlConfig) -> Option<f64> {
        let span = config.span();
        if !(span > 0.0) {
            return None;
        }

        let raw = match *self {
            Calibration::Linear {
                axis,
                origin_offset,
                travel,
            } => {
                if !(travel > 0.0) {
                    return None;
                }
                let units_per_increment = travel / span;
                (axis.pick(local) - origin_offset) / units_per_increment
            }
            Calibration::Angular {
                center,
                start_angle,
                sweep,
            } => {
                let dx = local.x - center.x;
                let dy = local.y - center.y;
                if (dx == 0.0 && dy == 0.0) || !(sweep > 0.0) {
                    return None;
                }
                let relative = (dy.atan2(dx).to_degrees() - start_angle).rem_euclid(360.0);
                let along = if relative <= sweep {
                    relative
                } else if relative - sweep < 360.0 - relative {
                    // past the end stop, nearer to it than to the start
                    sweep
                } else {
                    0.0
                };
                along / sweep * span
            }
        };

        raw.is_finite().then(|| config.min + raw.round())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn linear() -> Calibration {
        Calibration::Linear {
            axis: Axis::X,
            origin_offset: 0.0,
            travel: 30.0,
        }
    }

    #[test]
    fn test_linear_midpoint() {
        let config = ControlConfig::new();
        let v = linear().value_at(Point::new(15.0, 0.0), &config).unwrap();
        assert_relative_eq!(v, 50.0);
    }

    #[test]
    fn test_linear_rounds_to_nearest_unit() {
        let config = ControlConfig::new();
        // 0.3 mm per unit: 4.0 mm is 13.33 units
        let v = linear().value_at(Point::new(4.0, 0.0), &config).unwrap();
        assert_relative_eq!(v, 13.0);
    }

    #[test]
    fn test_linear_offsets_by_min() {
        let config = ControlConfig::new().with_range(-50.0, 50.0);
        let v = linear().value_at(Point::new(15.0, 0.0), &config).unwrap();
        assert_relative_eq!(v, 0.0);
    }

    #[test]
    fn test_linear_is_unclamped() {
        let config = ControlConfig::new();
        let v = linear().value_at(Point::new(-3.0, 0.0), &config).unwrap();
        assert_relative_eq!(v, -10.0);
    }

    #[test]
    fn test_empty_range() {
        let config = ControlConfig::new().with_range(5.0, 5.0);
        assert!(linear().value_at(Point::new(15.0, 0.0), &config).is_none());
    }

    #[test]
    fn test_angular() {
        let knob = Calibration::Angular {
            center: Point::new(0.0, 0.0),
            start_angle: 135.0,
            sweep: 270.0,
        };
        let config = ControlConfig::new();

        // straight up (screen y negative) is the middle of the sweep
        let top = knob.value_at(Point::new(0.0, -1.0), &config).unwrap();
        assert_relative_eq!(top, 50.0);

        let start = knob.value_at(Point::new(-1.0, 1.0), &config).unwrap();
        assert_relative_eq!(start, 0.0);

        let end = knob.value_at(Point::new(1.0, 1.0), &config).unwrap();
        assert_relative_eq!(end, 100.0);

        // dead zone below the knob snaps to the nearer stop
        let near_end = knob.value_at(Point::new(0.2, 1.0), &config).unwrap();
        assert_relative_eq!(near_end, 100.0);
        let near_start = knob.value_at(Point::new(-0.2, 1.0), &config).unwrap();
        assert_relative_eq!(near_start, 0.0);

        assert!(knob.value_at(Point::new(0.0, 0.0), &config).is_none());
    }
}
