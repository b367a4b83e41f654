//! DDR5 device specification types.

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Physically plausible bounds for the core supply voltage in V.
pub const VDD_BOUNDS: (f64, f64) = (1.0, 1.2);
/// Physically plausible bounds for the wordline pump voltage in V.
pub const VPP_BOUNDS: (f64, f64) = (1.6, 1.9);

/// Static DRAM geometry parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchitectureSpec {
    /// Device data width in bits (x4, x8 or x16).
    pub width: u32,
    /// Total number of banks.
    pub num_banks: u32,
    /// Number of bank groups.
    pub num_bank_groups: u32,
    /// Number of ranks on the module.
    pub num_ranks: u32,
    /// Number of columns per row.
    pub num_columns: u32,
    /// Number of rows per bank.
    pub num_rows: u32,
    /// Burst length in transfers.
    pub burst_length: u32,
    /// Transfers per clock cycle (2 for double data rate).
    pub data_rate: u32,
}

impl ArchitectureSpec {
    /// Returns the single die density in Gbit.
    pub fn chip_density_gbit(&self) -> f64 {
        let bits =
            self.num_rows as f64 * self.num_columns as f64 * self.num_banks as f64 * self.width as f64;
        bits / (1u64 << 30) as f64
    }
}

/// JEDEC-style supply voltages and IDD/IPP current measurements.
///
/// All currents are stored in mA. The power models convert them to A
/// internally before multiplying by voltage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerSpec {
    /// Core supply voltage in V.
    pub vdd: f64,
    /// Wordline pump voltage in V.
    pub vpp: f64,
    /// I/O supply voltage in V.
    pub vddq: f64,

    /// Current during a full ACT-ACTIVE-PRE row cycle.
    pub idd0: f64,
    /// Precharged standby current.
    pub idd2n: f64,
    /// Active standby current.
    pub idd3n: f64,
    /// Read burst current.
    pub idd4r: f64,
    /// Write burst current.
    pub idd4w: f64,
    /// Refresh current.
    pub idd5b: f64,
    /// Self-refresh current.
    pub idd6n: f64,
    /// Precharged power-down current.
    pub idd2p: f64,
    /// Active power-down current.
    pub idd3p: f64,

    /// VPP current during activate.
    pub ipp0: f64,
    /// Precharged VPP standby current.
    pub ipp2n: f64,
    /// Active VPP standby current.
    pub ipp3n: f64,
    /// VPP current during reads.
    pub ipp4r: f64,
    /// VPP current during writes.
    pub ipp4w: f64,
    /// VPP current during refresh.
    pub ipp5b: f64,
    /// Self-refresh VPP current.
    pub ipp6n: f64,
    /// Precharged power-down VPP current.
    pub ipp2p: f64,
    /// Active power-down VPP current.
    pub ipp3p: f64,
}

impl PowerSpec {
    /// Returns all current measurements as (name, value in mA) pairs.
    pub fn currents(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("idd0", self.idd0),
            ("idd2n", self.idd2n),
            ("idd3n", self.idd3n),
            ("idd4r", self.idd4r),
            ("idd4w", self.idd4w),
            ("idd5b", self.idd5b),
            ("idd6n", self.idd6n),
            ("idd2p", self.idd2p),
            ("idd3p", self.idd3p),
            ("ipp0", self.ipp0),
            ("ipp2n", self.ipp2n),
            ("ipp3n", self.ipp3n),
            ("ipp4r", self.ipp4r),
            ("ipp4w", self.ipp4w),
            ("ipp5b", self.ipp5b),
            ("ipp6n", self.ipp6n),
            ("ipp2p", self.ipp2p),
            ("ipp3p", self.ipp3p),
        ]
    }

    /// Checks that all currents are non-negative and both supply voltages
    /// are within their plausible bounds.
    pub fn validate(&self) -> Result<(), ModelError> {
        for (name, value) in self.currents() {
            if value < 0. {
                return Err(ModelError::InvalidValue {
                    field: name.to_string(),
                    reason: format!("current must be non-negative, got {} mA", value),
                });
            }
        }
        if self.vdd < VDD_BOUNDS.0 || self.vdd > VDD_BOUNDS.1 {
            return Err(ModelError::InvalidValue {
                field: "vdd".to_string(),
                reason: format!("expected {}-{} V, got {} V", VDD_BOUNDS.0, VDD_BOUNDS.1, self.vdd),
            });
        }
        if self.vpp < VPP_BOUNDS.0 || self.vpp > VPP_BOUNDS.1 {
            return Err(ModelError::InvalidValue {
                field: "vpp".to_string(),
                reason: format!("expected {}-{} V, got {} V", VPP_BOUNDS.0, VPP_BOUNDS.1, self.vpp),
            });
        }
        Ok(())
    }
}

/// Timing parameters: clock period in ns and command timings in clock cycles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingSpec {
    /// Clock period in ns.
    pub tck_ns: f64,
    /// Row active time in cycles.
    pub ras: u32,
    /// RAS-to-CAS delay in cycles.
    pub rcd: u32,
    /// Row precharge time in cycles.
    pub rp: u32,
    /// Normal refresh cycle time in cycles.
    pub rfc1: u32,
    /// Fine granularity refresh cycle time in cycles.
    pub rfc2: u32,
    /// Same-bank refresh cycle time in cycles.
    pub rfcsb: u32,
    /// Average refresh interval in cycles.
    pub refi: u32,
}

/// Complete specification of a single DDR5 device.
///
/// Instances are never mutated by the models - parameter perturbation
/// always works on a fresh clone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceSpec {
    /// Device identifier, e.g. part number.
    pub id: String,
    pub architecture: ArchitectureSpec,
    pub power: PowerSpec,
    pub timing: TimingSpec,
}

impl DeviceSpec {
    /// Returns the device data rate in MT/s derived from the clock period.
    pub fn data_rate_mts(&self) -> f64 {
        self.architecture.data_rate as f64 * 1000. / self.timing.tck_ns
    }

    /// Validates the power parameters against their physical bounds.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.timing.tck_ns <= 0. {
            return Err(ModelError::NonPositiveTiming {
                field: "tCK".to_string(),
                value: self.timing.tck_ns,
            });
        }
        self.power.validate()
    }
}
