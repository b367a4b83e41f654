//! Workload activity profiles.

use serde::{Deserialize, Serialize};

/// Steady-state workload description used by the power models.
///
/// Percentage fields describe the fraction of time (0-100) the device spends
/// in the corresponding state; `trrd_sch_ns` is the average scheduled
/// row-to-row activation delay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workload {
    /// Fraction of time all banks are precharged.
    pub bank_pre_pct: f64,
    /// Fraction of precharged time spent in power-down (CKE low).
    pub cke_lo_pre_pct: f64,
    /// Fraction of active time spent in power-down (CKE low).
    pub cke_lo_act_pct: f64,
    /// Fraction of accesses hitting an open row.
    pub page_hit_pct: f64,
    /// Fraction of time spent in read bursts.
    pub read_pct: f64,
    /// Fraction of time spent in write bursts.
    pub write_pct: f64,
    /// Average scheduled row-to-row activation delay in ns.
    pub trrd_sch_ns: f64,
}

/// Named workload profiles resolved by the deployment search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkloadKind {
    /// Mostly precharged and powered down, negligible traffic.
    Idle,
    /// Even mix of reads and writes.
    Balanced,
    /// Read-dominated streaming traffic.
    ReadHeavy,
    /// Write-dominated traffic.
    WriteHeavy,
}

impl WorkloadKind {
    /// Returns the concrete activity profile for this workload kind.
    pub fn profile(&self) -> Workload {
        match self {
            WorkloadKind::Idle => Workload {
                bank_pre_pct: 90.,
                cke_lo_pre_pct: 60.,
                cke_lo_act_pct: 10.,
                page_hit_pct: 50.,
                read_pct: 1.,
                write_pct: 1.,
                trrd_sch_ns: 500.,
            },
            WorkloadKind::Balanced => Workload {
                bank_pre_pct: 30.,
                cke_lo_pre_pct: 5.,
                cke_lo_act_pct: 0.,
                page_hit_pct: 60.,
                read_pct: 25.,
                write_pct: 25.,
                trrd_sch_ns: 60.,
            },
            WorkloadKind::ReadHeavy => Workload {
                bank_pre_pct: 20.,
                cke_lo_pre_pct: 0.,
                cke_lo_act_pct: 0.,
                page_hit_pct: 70.,
                read_pct: 45.,
                write_pct: 10.,
                trrd_sch_ns: 50.,
            },
            WorkloadKind::WriteHeavy => Workload {
                bank_pre_pct: 20.,
                cke_lo_pre_pct: 0.,
                cke_lo_act_pct: 0.,
                page_hit_pct: 70.,
                read_pct: 10.,
                write_pct: 45.,
                trrd_sch_ns: 50.,
            },
        }
    }
}
