//! Register map definitions for the MAX17048 fuel gauge.
#![allow(unused_parens)]

use modular_bitfield::prelude::*;

/// Register address of `VCELL`.
pub const REG_VCELL: u8 = 0x02;
/// Register address of `SOC`.
pub const REG_SOC: u8 = 0x04;
/// Register address of `MODE`.
pub const REG_MODE: u8 = 0x06;
/// Register address of `VERSION`.
pub const REG_VERSION: u8 = 0x08;
/// Register address of `CONFIG`.
pub const REG_CONFIG: u8 = 0x0C;
/// Register address of `CMD`.
pub const REG_CMD: u8 = 0xFE;

/// Soft reset command value written to the `CMD` register.
pub const RESET_COMMAND: u16 = 0x5400;

/// Factory-default compensation value (`RCOMP0`).
pub const DEFAULT_RCOMP: u8 = 0x97;

/// VCELL resolution numerator: 78.125 µV/LSB expressed in nanovolts.
pub const VCELL_RESOLUTION_NV: u64 = 78_125;

/// Access permissions encoded for each register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterAccess {
    /// Read-only register.
    ReadOnly,
    /// Write-only register.
    WriteOnly,
    /// Read/write register.
    ReadWrite,
}

/// Minimal metadata exposed by every register value type.
pub trait Register {
    /// Raw storage backing the register payload.
    type Raw: Copy;
    /// Register address as documented in the datasheet.
    const ADDRESS: u8;
    /// Access permission classification.
    const ACCESS: RegisterAccess;
    /// Optional reset/default value defined by the datasheet.
    const RESET_VALUE: Option<Self::Raw>;
}

/// Bitfield representation of the `MODE` register (address `0x06`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mode {
    #[skip]
    __: B12,
    // Hibernate status indicator, read-only (bit 12).
    pub hi_stat: bool,
    // Sleep permission flag (bit 13).
    pub en_sleep: bool,
    // Quick-start command flag (bit 14).
    pub quick_start: bool,
    #[skip]
    __: B1,
}

impl From<u16> for Mode {
    fn from(value: u16) -> Self {
        Self::from_bytes(value.to_le_bytes())
    }
}

impl From<Mode> for u16 {
    fn from(value: Mode) -> Self {
        u16::from_le_bytes(value.into_bytes())
    }
}

/// Bitfield representation of the `CONFIG` register (address `0x0C`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    // Empty-alert threshold, 32 - ATHD percent (bits 4:0).
    pub alert_threshold: B5,
    // Alert status flag (bit 5).
    pub alert: bool,
    // Alert on 1% SOC change (bit 6).
    pub alert_on_soc_change: bool,
    // Sleep mode request (bit 7).
    pub sleep: bool,
    // Compensation value for the internal battery model (bits 15:8).
    pub rcomp: B8,
}

impl From<u16> for Config {
    fn from(value: u16) -> Self {
        Self::from_bytes(value.to_le_bytes())
    }
}

impl From<Config> for u16 {
    fn from(value: Config) -> Self {
        u16::from_le_bytes(value.into_bytes())
    }
}

impl Register for Mode {
    type Raw = u16;
    const ADDRESS: u8 = REG_MODE;
    const ACCESS: RegisterAccess = RegisterAccess::ReadWrite;
    const RESET_VALUE: Option<Self::Raw> = Some(0x0000);
}

impl Register for Config {
    type Raw = u16;
    const ADDRESS: u8 = REG_CONFIG;
    const ACCESS: RegisterAccess = RegisterAccess::ReadWrite;
    const RESET_VALUE: Option<Self::Raw> = Some(0x971C);
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Validates that Mode bitfields match the datasheet layout.
    #[test]
    fn mode_layout_matches_datasheet() {
        let mode = Mode::from(1u16 << 13);
        assert!(mode.en_sleep());
        assert!(!mode.quick_start());
        assert!(!mode.hi_stat());

        let mode = Mode::from(1u16 << 14);
        assert!(mode.quick_start());
        assert!(!mode.en_sleep());

        let mode = Mode::from(1u16 << 12);
        assert!(mode.hi_stat());
    }

    /// Ensures Config encodes and decodes as expected across all fields.
    #[test]
    fn config_roundtrip() {
        let config = Config::new()
            .with_rcomp(DEFAULT_RCOMP)
            .with_sleep(false)
            .with_alert_threshold(0x1C);

        assert_eq!(u16::from(config), 0x971C);
        let decoded = Config::from(u16::from(config));
        assert_eq!(decoded.rcomp(), DEFAULT_RCOMP);
        assert_eq!(decoded.alert_threshold(), 0x1C);
        assert!(!decoded.sleep());
        assert!(!decoded.alert());
        assert!(!decoded.alert_on_soc_change());
    }

    /// The documented power-on value decodes to the factory compensation.
    #[test]
    fn config_reset_value_carries_default_rcomp() {
        let reset = Config::from(Config::RESET_VALUE.unwrap());
        assert_eq!(reset.rcomp(), DEFAULT_RCOMP);
        assert!(!reset.sleep());
    }

    /// Setting the sleep bit touches bit 7 and nothing else.
    #[test]
    fn config_sleep_bit_is_bit_seven() {
        let raw = u16::from(Config::from(0u16).with_sleep(true));
        assert_eq!(raw, 1 << 7);
    }
}
