// src/common/units.rs

use core::fmt;

/// Number of range slots per measurement mode.
pub const RANGE_SLOTS: usize = 7;

/// Physical unit class of a reading.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum Unit {
    Volt,
    Ampere,
    Ohm,
    Diode,
    Hertz,
    Farad,
    /// Blank display, also used for any reserved unit code.
    #[default]
    None,
}

impl Unit {
    /// Single-character symbol as shown by the legacy host software.
    pub const fn symbol(&self) -> char {
        match self {
            Unit::Volt => 'V',
            Unit::Ampere => 'A',
            Unit::Ohm => 'O',
            Unit::Diode => 'D',
            Unit::Hertz => 'H',
            Unit::Farad => 'F',
            Unit::None => ' ',
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Meter function selected by the rotary switch, as carried in the unit byte.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum MeasurementMode {
    DcVolt = 0,
    AcVolt = 1,
    DcMilliAmp = 2,
    AcMilliAmp = 3,
    Ohm = 4,
    Continuity = 5,
    Diode = 6,
    /// Adaptive frequency (ADP).
    Adaptive = 7,
    DcAmp = 8,
    AcAmp = 9,
    Hertz = 10,
    /// Nothing on the display.
    Blank = 11,
    Capacitance = 12,
}

// Decimal-point placement per mode and range. Slots the meter never uses hold 0.0.
const SCALE_TABLE: [[f32; RANGE_SLOTS]; 13] = [
    [0.0001, 0.001, 0.01, 0.1, 1.0, 0.0, 0.0],            // DC V
    [0.0001, 0.001, 0.01, 0.1, 1.0, 0.0, 0.0],            // AC V
    [0.000001, 0.00001, 0.0001, 0.001, 0.001, 0.0, 0.0],  // DC mA
    [0.000001, 0.00001, 0.0001, 0.001, 0.001, 0.0, 0.0],  // AC mA
    [0.1, 1.0, 10.0, 100.0, 1000.0, 10000.0, 0.0],        // Ohm
    [0.1, 1.0, 10.0, 100.0, 1000.0, 10000.0, 0.0],        // Continuity
    [0.001, 0.001, 0.0, 0.0, 0.0, 0.0, 0.0],              // Diode
    [10.0, 100.0, 1000.0, 0.0, 0.0, 0.1, 1.0],            // ADP
    [0.01, 0.0, 0.01, 0.0, 0.0, 0.0, 0.0],                // DC A
    [0.01, 0.0, 0.01, 0.0, 0.0, 0.0, 0.0],                // AC A
    [10.0, 100.0, 1000.0, 0.0, 0.0, 0.1, 1.0],            // Hz
    [0.0; RANGE_SLOTS],                                   // Blank
    [1e-12, 1e-11, 1e-10, 1e-9, 1e-8, 0.0, 0.0],          // Capacitance
];

impl MeasurementMode {
    /// Tries to convert a unit code (already masked to 7 bits) into a mode.
    pub fn from_code(code: u8) -> Option<Self> {
        use MeasurementMode::*;
        match code {
            0 => Some(DcVolt),
            1 => Some(AcVolt),
            2 => Some(DcMilliAmp),
            3 => Some(AcMilliAmp),
            4 => Some(Ohm),
            5 => Some(Continuity),
            6 => Some(Diode),
            7 => Some(Adaptive),
            8 => Some(DcAmp),
            9 => Some(AcAmp),
            10 => Some(Hertz),
            11 => Some(Blank),
            12 => Some(Capacitance),
            _ => None,
        }
    }

    #[inline]
    pub const fn code(&self) -> u8 {
        *self as u8
    }

    pub const fn unit(&self) -> Unit {
        use MeasurementMode::*;
        match self {
            DcVolt | AcVolt => Unit::Volt,
            DcMilliAmp | AcMilliAmp | DcAmp | AcAmp => Unit::Ampere,
            Ohm | Continuity => Unit::Ohm,
            Diode => Unit::Diode,
            Adaptive | Hertz => Unit::Hertz,
            Blank => Unit::None,
            Capacitance => Unit::Farad,
        }
    }

    /// Multiplier applied to the raw digit count for the given range code.
    /// Unused or out-of-table ranges give `0.0`.
    pub fn scale(&self, range: u8) -> f32 {
        SCALE_TABLE[*self as usize]
            .get(range as usize)
            .copied()
            .unwrap_or(0.0)
    }
}

/// Unit symbol for a 7-bit unit code; `' '` for reserved codes.
pub fn unit_symbol(unit_code: u8) -> char {
    MeasurementMode::from_code(unit_code)
        .map_or(Unit::None, |mode| mode.unit())
        .symbol()
}

/// Scale for a (unit, range) pair, falling back to `0.0` for anything unmapped.
pub fn scale_factor(unit_code: u8, range_code: u8) -> f32 {
    MeasurementMode::from_code(unit_code).map_or(0.0, |mode| mode.scale(range_code))
}

/// Strict lookup: `None` unless the protocol defines a non-zero scale for the pair.
pub fn lookup(unit_code: u8, range_code: u8) -> Option<f32> {
    let scale = scale_factor(unit_code, range_code);
    (scale != 0.0).then_some(scale)
}
