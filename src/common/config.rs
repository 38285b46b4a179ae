// src/common/config.rs

/// Decoder options.
///
/// The defaults reject digit bytes outside 0..=9 and accept unmapped
/// unit/range pairs silently (zero value, blank unit), which is how the meter
/// behaves on reserved codes.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct DecoderConfig {
    /// Treat a digit byte above 9 as a malformed frame.
    pub strict_digits: bool,
    /// Report `UnknownUnitOrRange` when the (unit, range) pair has no scale.
    /// The zeroed reading is still stored.
    pub strict_units: bool,
}

impl DecoderConfig {
    /// Payload decoding as the legacy host library did it: no digit checks,
    /// no unit/range reporting. Only decoding is affected; buffering and
    /// resync behave the same under every config.
    pub const LEGACY: DecoderConfig = DecoderConfig {
        strict_digits: false,
        strict_units: false,
    };

    pub const fn new() -> Self {
        DecoderConfig {
            strict_digits: true,
            strict_units: false,
        }
    }

    pub const fn with_strict_digits(mut self, enabled: bool) -> Self {
        self.strict_digits = enabled;
        self
    }

    pub const fn with_strict_units(mut self, enabled: bool) -> Self {
        self.strict_units = enabled;
        self
    }
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = DecoderConfig::default();
        assert!(cfg.strict_digits);
        assert!(!cfg.strict_units);
    }

    #[test]
    fn test_builders() {
        let cfg = DecoderConfig::new().with_strict_units(true).with_strict_digits(false);
        assert_eq!(cfg, DecoderConfig { strict_digits: false, strict_units: true });
        assert_eq!(DecoderConfig::new().with_strict_digits(false), DecoderConfig::LEGACY);
    }
}
