//! Core types for pin and signal descriptions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// I2C bus line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum I2cSignal {
    Scl,
    Sda,
}

/// SPI bus line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SpiSignal {
    Sck,
    Mosi,
    Miso,
    Ss,
}

/// Serial (USART) line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UsartSignal {
    Rx,
    Tx,
}

/// One electrical signal carried by a pin.
///
/// The variant fully determines which sub-fields exist, so a kind can never
/// be paired with another kind's fields.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PinSignalInfo {
    /// Supply rail
    Power {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        voltage: Option<f64>,
    },
    /// Ground return
    Ground,
    /// Analog input/output, optionally bound to an ADC channel
    Analog {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        channel: Option<u8>,
    },
    /// Plain digital logic level
    Digital,
    /// Pulse-width modulated output
    Pwm,
    /// I2C bus line
    I2c { signal: I2cSignal, bus: u8 },
    /// SPI bus line
    Spi { signal: SpiSignal, bus: u8 },
    /// Serial line
    Usart { signal: UsartSignal, bus: u8 },
}

impl PinSignalInfo {
    /// Short lowercase kind name, matching the serialized `type` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Power { .. } => "power",
            Self::Ground => "ground",
            Self::Analog { .. } => "analog",
            Self::Digital => "digital",
            Self::Pwm => "pwm",
            Self::I2c { .. } => "i2c",
            Self::Spi { .. } => "spi",
            Self::Usart { .. } => "usart",
        }
    }
}

impl fmt::Display for PinSignalInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Power { voltage: Some(v) } => write!(f, "power({}V)", v),
            Self::Power { voltage: None } => write!(f, "power"),
            Self::Ground => write!(f, "ground"),
            Self::Analog { channel: Some(ch) } => write!(f, "analog(A{})", ch),
            Self::Analog { channel: None } => write!(f, "analog"),
            Self::Digital => write!(f, "digital"),
            Self::Pwm => write!(f, "pwm"),
            Self::I2c { signal, bus } => write!(f, "i2c{}:{:?}", bus, signal),
            Self::Spi { signal, bus } => write!(f, "spi{}:{:?}", bus, signal),
            Self::Usart { signal, bus } => write!(f, "usart{}:{:?}", bus, signal),
        }
    }
}

/// Analog signal bound to `channel`.
pub const fn analog(channel: u8) -> PinSignalInfo {
    PinSignalInfo::Analog {
        channel: Some(channel),
    }
}

/// Supply rail of unspecified voltage.
pub const fn power() -> PinSignalInfo {
    PinSignalInfo::Power { voltage: None }
}

/// Ground return.
pub const fn ground() -> PinSignalInfo {
    PinSignalInfo::Ground
}

/// I2C line on `bus`.
pub const fn i2c(signal: I2cSignal, bus: u8) -> PinSignalInfo {
    PinSignalInfo::I2c { signal, bus }
}

/// SPI line on `bus`.
pub const fn spi(signal: SpiSignal, bus: u8) -> PinSignalInfo {
    PinSignalInfo::Spi { signal, bus }
}

/// Serial line on `bus`.
pub const fn usart(signal: UsartSignal, bus: u8) -> PinSignalInfo {
    PinSignalInfo::Usart { signal, bus }
}

/// A single physical contact on a part's body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementPin {
    /// Label, unique within the part
    pub name: String,
    /// X position in the part's local millimetre space
    pub x: f64,
    /// Y position in the part's local millimetre space
    pub y: f64,
    /// 1-based physical index, unique within the part
    pub number: u32,
    /// Signals multiplexed on this pin, never empty
    pub signals: Vec<PinSignalInfo>,
}

impl ElementPin {
    /// Create a pin.
    pub fn new(
        name: impl Into<String>,
        x: f64,
        y: f64,
        number: u32,
        signals: Vec<PinSignalInfo>,
    ) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            number,
            signals,
        }
    }

    /// Check whether any signal on this pin is of the given kind.
    pub fn carries(&self, kind: &str) -> bool {
        self.signals.iter().any(|s| s.kind() == kind)
    }
}

impl fmt::Display for ElementPin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>3} {:<6} ({:>7.2}, {:>7.2})", self.number, self.name, self.x, self.y)?;
        for (i, signal) in self.signals.iter().enumerate() {
            let sep = if i == 0 { " " } else { ", " };
            write!(f, "{}{}", sep, signal)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_json_uses_type_tag() {
        let json = serde_json::to_string(&analog(0)).unwrap();
        assert_eq!(json, r#"{"type":"analog","channel":0}"#);

        let json = serde_json::to_string(&power()).unwrap();
        assert_eq!(json, r#"{"type":"power"}"#);

        let json = serde_json::to_string(&i2c(I2cSignal::Sda, 0)).unwrap();
        assert_eq!(json, r#"{"type":"i2c","signal":"SDA","bus":0}"#);
    }

    #[test]
    fn test_signal_json_rejects_mismatched_fields() {
        // an i2c signal without its bus is not representable
        let parsed: std::result::Result<PinSignalInfo, _> =
            serde_json::from_str(r#"{"type":"i2c","signal":"SDA"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_pin_carries() {
        let pin = ElementPin::new("SIG", 1.0, 66.5, 2, vec![analog(0)]);
        assert!(pin.carries("analog"));
        assert!(!pin.carries("power"));
    }
}
