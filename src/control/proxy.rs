//! Native range-input proxy.
//!
//! Assistive technology and keyboard navigation go through a hidden
//! range-input-like element that mirrors the control's configuration and
//! value. Its edits are routed back through the control's direct-input path,
//! so they are clamped like any other value.

use super::{ControlConfig, Key};

/// Snapshot of the attributes a native range input would carry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeProxy {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub value: f64,
}

impl RangeProxy {
    /// Mirror a control's configuration and value.
    pub fn mirror(config: &ControlConfig, value: f64) -> Self {
        Self {
            min: config.min,
            max: config.max,
            step: config.step,
            value,
        }
    }

    /// `aria-valuemin` attribute.
    pub fn aria_valuemin(&self) -> String {
        format_number(self.min)
    }

    /// `aria-valuenow` attribute.
    pub fn aria_valuenow(&self) -> String {
        format_number(self.value)
    }

    /// `aria-valuemax` attribute.
    pub fn aria_valuemax(&self) -> String {
        format_number(self.max)
    }

    /// Parse the text of a proxy edit. Empty or non-numeric text is ignored.
    pub fn parse_input(text: &str) -> Option<f64> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        text.parse::<f64>().ok().filter(|v| !v.is_nan())
    }

    /// Target value for a navigation key, or `None` for keys that do not
    /// move the value.
    ///
    /// Arrow and page keys move to the next step-grid position (anchored at
    /// `min`) in their direction; the result is not clamped here.
    pub fn stepped(&self, key: Key) -> Option<f64> {
        let step = if self.step.is_finite() && self.step > 0.0 {
            self.step
        } else {
            1.0
        };
        let page = ((self.max - self.min) / 10.0 / step).round().max(1.0);

        let (direction, count) = match key {
            Key::ArrowRight | Key::ArrowUp => (1.0, 1.0),
            Key::ArrowLeft | Key::ArrowDown => (-1.0, 1.0),
            Key::PageUp => (1.0, page),
            Key::PageDown => (-1.0, page),
            Key::Home => return Some(self.min),
            Key::End => return Some(self.max),
            Key::Other => return None,
        };

        let mut position = (self.value - self.min) / step;
        if (position - position.round()).abs() < 1e-9 {
            position = position.round();
        }
        let index = if direction > 0.0 {
            position.floor() + count
        } else {
            position.ceil() - count
        };
        Some(self.min + index * step)
    }
}

fn format_number(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{}", v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proxy(value: f64) -> RangeProxy {
        RangeProxy::mirror(&ControlConfig::new(), value)
    }

    #[test]
    fn test_aria_attributes() {
        let p = proxy(42.0);
        assert_eq!(p.aria_valuemin(), "0");
        assert_eq!(p.aria_valuenow(), "42");
        assert_eq!(p.aria_valuemax(), "100");
        assert_eq!(proxy(12.5).aria_valuenow(), "12.5");
    }

    #[test]
    fn test_parse_input() {
        assert_eq!(RangeProxy::parse_input("37"), Some(37.0));
        assert_eq!(RangeProxy::parse_input(" 4.5 "), Some(4.5));
        assert_eq!(RangeProxy::parse_input(""), None);
        assert_eq!(RangeProxy::parse_input("abc"), None);
    }

    #[test]
    fn test_arrow_keys_follow_step_grid() {
        assert_eq!(proxy(50.0).stepped(Key::ArrowRight), Some(52.0));
        assert_eq!(proxy(50.0).stepped(Key::ArrowDown), Some(48.0));
        // unaligned values move to the next grid point
        assert_eq!(proxy(51.0).stepped(Key::ArrowUp), Some(52.0));
        assert_eq!(proxy(51.0).stepped(Key::ArrowLeft), Some(50.0));
    }

    #[test]
    fn test_page_home_end() {
        assert_eq!(proxy(50.0).stepped(Key::PageUp), Some(60.0));
        assert_eq!(proxy(50.0).stepped(Key::PageDown), Some(40.0));
        assert_eq!(proxy(50.0).stepped(Key::Home), Some(0.0));
        assert_eq!(proxy(50.0).stepped(Key::End), Some(100.0));
        assert_eq!(proxy(50.0).stepped(Key::Other), None);
    }

    #[test]
    fn test_page_moves_whole_steps() {
        let config = ControlConfig::new().with_step(3.0);
        // a tenth of the span is 10, which rounds to 3 steps of 3
        assert_eq!(RangeProxy::mirror(&config, 50.0).stepped(Key::PageUp), Some(57.0));
        assert_eq!(RangeProxy::mirror(&config, 51.0).stepped(Key::PageDown), Some(42.0));

        // a page never moves less than one step
        let coarse = ControlConfig::new().with_step(40.0);
        assert_eq!(RangeProxy::mirror(&coarse, 40.0).stepped(Key::PageUp), Some(80.0));
    }
}
