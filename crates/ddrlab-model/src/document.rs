//! Parsing of externally supplied device specification and workload documents.
//!
//! The JSON schema follows the vendor memspec convention: a `memspec`
//! wrapper with `memarchitecturespec`, `mempowerspec` and `memtimingspec`
//! sub-objects, and a flat workload object. Documents are validated before
//! they reach the models.

use log::warn;
use serde::Deserialize;

use crate::error::ModelError;
use crate::spec::{ArchitectureSpec, DeviceSpec, PowerSpec, TimingSpec};
use crate::workload::Workload;

#[derive(Debug, Deserialize)]
struct MemSpecDocument {
    memspec: RawMemSpec,
}

#[derive(Debug, Deserialize)]
struct RawMemSpec {
    #[serde(rename = "memoryId", default)]
    memory_id: String,
    memarchitecturespec: RawArchitectureSpec,
    mempowerspec: RawPowerSpec,
    memtimingspec: RawTimingSpec,
}

#[derive(Debug, Deserialize)]
struct RawArchitectureSpec {
    width: u32,
    #[serde(rename = "nbrOfBanks")]
    nbr_of_banks: u32,
    #[serde(rename = "nbrOfBankGroups")]
    nbr_of_bank_groups: u32,
    #[serde(rename = "nbrOfRanks")]
    nbr_of_ranks: u32,
    #[serde(rename = "nbrOfColumns")]
    nbr_of_columns: u32,
    #[serde(rename = "nbrOfRows")]
    nbr_of_rows: u32,
    #[serde(rename = "burstLength")]
    burst_length: u32,
    #[serde(rename = "dataRate")]
    data_rate: u32,
}

#[derive(Debug, Deserialize)]
struct RawPowerSpec {
    vdd: f64,
    vpp: f64,
    vddq: f64,
    idd0: f64,
    idd2n: f64,
    idd3n: f64,
    idd4r: f64,
    idd4w: f64,
    idd5b: f64,
    idd6n: f64,
    idd2p: f64,
    idd3p: f64,
    ipp0: f64,
    ipp2n: f64,
    ipp3n: f64,
    ipp4r: f64,
    ipp4w: f64,
    ipp5b: f64,
    ipp6n: f64,
    ipp2p: f64,
    ipp3p: f64,
}

#[derive(Debug, Deserialize)]
struct RawTimingSpec {
    /// Clock period in seconds, as found in vendor memspec files.
    #[serde(rename = "tCK")]
    tck_s: f64,
    #[serde(rename = "RAS")]
    ras: u32,
    #[serde(rename = "RCD")]
    rcd: u32,
    #[serde(rename = "RP")]
    rp: u32,
    #[serde(rename = "RFC1")]
    rfc1: u32,
    #[serde(rename = "RFC2")]
    rfc2: u32,
    #[serde(rename = "RFCsb")]
    rfcsb: u32,
    #[serde(rename = "REFI")]
    refi: u32,
}

/// Normalizes a document current to mA.
///
/// Vendor files mix units: some list currents in A, some in mA. A value
/// below 1 is assumed to be in A and converted. This magnitude heuristic is
/// a known approximation carried over from the upstream document format -
/// a genuine sub-1 mA measurement would be inflated by it, which is why
/// every conversion is logged.
fn normalize_current(field: &str, value: f64) -> f64 {
    if value >= 0. && value < 1. {
        warn!("assuming {} = {} is in A, converting to {} mA", field, value, value * 1000.);
        value * 1000.
    } else {
        value
    }
}

/// Parses and validates a device specification document.
pub fn parse_memspec(json: &str) -> Result<DeviceSpec, ModelError> {
    let doc: MemSpecDocument = serde_json::from_str(json).map_err(|e| ModelError::Parse(e.to_string()))?;
    let raw = doc.memspec;
    let a = raw.memarchitecturespec;
    let p = raw.mempowerspec;
    let t = raw.memtimingspec;

    let spec = DeviceSpec {
        id: raw.memory_id,
        architecture: ArchitectureSpec {
            width: a.width,
            num_banks: a.nbr_of_banks,
            num_bank_groups: a.nbr_of_bank_groups,
            num_ranks: a.nbr_of_ranks,
            num_columns: a.nbr_of_columns,
            num_rows: a.nbr_of_rows,
            burst_length: a.burst_length,
            data_rate: a.data_rate,
        },
        power: PowerSpec {
            vdd: p.vdd,
            vpp: p.vpp,
            vddq: p.vddq,
            idd0: normalize_current("idd0", p.idd0),
            idd2n: normalize_current("idd2n", p.idd2n),
            idd3n: normalize_current("idd3n", p.idd3n),
            idd4r: normalize_current("idd4r", p.idd4r),
            idd4w: normalize_current("idd4w", p.idd4w),
            idd5b: normalize_current("idd5b", p.idd5b),
            idd6n: normalize_current("idd6n", p.idd6n),
            idd2p: normalize_current("idd2p", p.idd2p),
            idd3p: normalize_current("idd3p", p.idd3p),
            ipp0: normalize_current("ipp0", p.ipp0),
            ipp2n: normalize_current("ipp2n", p.ipp2n),
            ipp3n: normalize_current("ipp3n", p.ipp3n),
            ipp4r: normalize_current("ipp4r", p.ipp4r),
            ipp4w: normalize_current("ipp4w", p.ipp4w),
            ipp5b: normalize_current("ipp5b", p.ipp5b),
            ipp6n: normalize_current("ipp6n", p.ipp6n),
            ipp2p: normalize_current("ipp2p", p.ipp2p),
            ipp3p: normalize_current("ipp3p", p.ipp3p),
        },
        timing: TimingSpec {
            tck_ns: t.tck_s * 1e9,
            ras: t.ras,
            rcd: t.rcd,
            rp: t.rp,
            rfc1: t.rfc1,
            rfc2: t.rfc2,
            rfcsb: t.rfcsb,
            refi: t.refi,
        },
    };
    spec.validate()?;
    Ok(spec)
}

/// Raw workload document with all fields optional, so that the missing
/// field can be reported by name instead of as a generic parse error.
#[derive(Debug, Default, Deserialize)]
pub struct WorkloadDocument {
    #[serde(rename = "BNK_PRE_percent")]
    pub bank_pre_percent: Option<f64>,
    #[serde(rename = "CKE_LO_PRE_percent")]
    pub cke_lo_pre_percent: Option<f64>,
    #[serde(rename = "CKE_LO_ACT_percent")]
    pub cke_lo_act_percent: Option<f64>,
    #[serde(rename = "PageHit_percent")]
    pub page_hit_percent: Option<f64>,
    #[serde(rename = "RDsch_percent")]
    pub rd_sch_percent: Option<f64>,
    #[serde(rename = "WRsch_percent")]
    pub wr_sch_percent: Option<f64>,
    #[serde(rename = "tRRDsch_ns")]
    pub trrd_sch_ns: Option<f64>,
}

impl WorkloadDocument {
    /// Checks the required field subset and builds a workload profile.
    pub fn into_workload(self) -> Result<Workload, ModelError> {
        fn required(field: &str, value: Option<f64>) -> Result<f64, ModelError> {
            value.ok_or_else(|| ModelError::MissingField(field.to_string()))
        }
        Ok(Workload {
            bank_pre_pct: required("BNK_PRE_percent", self.bank_pre_percent)?,
            cke_lo_pre_pct: required("CKE_LO_PRE_percent", self.cke_lo_pre_percent)?,
            cke_lo_act_pct: required("CKE_LO_ACT_percent", self.cke_lo_act_percent)?,
            page_hit_pct: self.page_hit_percent.unwrap_or(0.),
            read_pct: required("RDsch_percent", self.rd_sch_percent)?,
            write_pct: required("WRsch_percent", self.wr_sch_percent)?,
            trrd_sch_ns: required("tRRDsch_ns", self.trrd_sch_ns)?,
        })
    }
}

/// Parses and validates a workload document.
pub fn parse_workload(json: &str) -> Result<Workload, ModelError> {
    let doc: WorkloadDocument = serde_json::from_str(json).map_err(|e| ModelError::Parse(e.to_string()))?;
    doc.into_workload()
}
