//! Core die power model.

use serde::Serialize;

use crate::error::ModelError;
use crate::spec::DeviceSpec;
use crate::workload::Workload;

const MA_TO_A: f64 = 1e-3;

/// Per-component core die power breakdown in W.
///
/// `pre_stby_w` and `act_stby_w` report the power-down-blended standby
/// levels for the fully precharged and fully active states; the actual
/// background contribution to `vdd_w` mixes them by the bank-precharged
/// fraction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PowerResult {
    /// Precharged standby power.
    pub pre_stby_w: f64,
    /// Active standby power.
    pub act_stby_w: f64,
    /// Activate/precharge power on both rails.
    pub act_pre_w: f64,
    /// Incremental read burst power.
    pub read_w: f64,
    /// Incremental write burst power.
    pub write_w: f64,
    /// Refresh power on both rails.
    pub refresh_w: f64,
    /// Total power on the VDD rail.
    pub vdd_w: f64,
    /// Total power on the VPP rail.
    pub vpp_w: f64,
    /// Grand total, `vdd_w + vpp_w`.
    pub total_w: f64,
}

impl PowerResult {
    /// Returns true if any component is negative.
    ///
    /// The model does not clamp negative values: a negative component means
    /// the parameter set is physically implausible (e.g. a burst current
    /// below the standby current) and the caller should discard the result.
    pub fn has_negative(&self) -> bool {
        [
            self.pre_stby_w,
            self.act_stby_w,
            self.act_pre_w,
            self.read_w,
            self.write_w,
            self.refresh_w,
            self.vdd_w,
            self.vpp_w,
            self.total_w,
        ]
        .iter()
        .any(|p| *p < 0.)
    }
}

/// Computes the core die power breakdown from a device specification and
/// a workload profile.
///
/// The model sums five additive terms, each a voltage x incremental-current
/// x duty-cycle product: background standby, refresh, read, write and
/// activate/precharge. It is pure and deterministic.
#[derive(Debug, Clone, Default)]
pub struct CorePowerModel;

impl CorePowerModel {
    /// Creates the core power model.
    pub fn new() -> Self {
        Self {}
    }

    /// Returns the power breakdown in W.
    ///
    /// Fails if a timing parameter used as a divisor (tCK, REFI, tRRDsch)
    /// is not positive.
    pub fn compute(&self, spec: &DeviceSpec, workload: &Workload) -> Result<PowerResult, ModelError> {
        let p = &spec.power;
        let t = &spec.timing;

        if t.tck_ns <= 0. {
            return Err(ModelError::NonPositiveTiming {
                field: "tCK".to_string(),
                value: t.tck_ns,
            });
        }
        if t.refi == 0 {
            return Err(ModelError::NonPositiveTiming {
                field: "REFI".to_string(),
                value: t.refi as f64,
            });
        }
        if workload.trrd_sch_ns <= 0. {
            return Err(ModelError::NonPositiveTiming {
                field: "tRRDsch".to_string(),
                value: workload.trrd_sch_ns,
            });
        }

        let tck = t.tck_ns;
        let t_ras = t.ras as f64 * tck;
        let t_rp = t.rp as f64 * tck;
        let t_rfc1 = t.rfc1 as f64 * tck;
        let t_refi = t.refi as f64 * tck;

        let bank_pre = workload.bank_pre_pct / 100.;
        let cke_lo_pre = workload.cke_lo_pre_pct / 100.;
        let cke_lo_act = workload.cke_lo_act_pct / 100.;
        let rd = workload.read_pct / 100.;
        let wr = workload.write_pct / 100.;

        // 1) Background standby power (VDD): blend normal and power-down
        // currents by the CKE-low fractions, then mix the precharged and
        // active levels by the bank-precharged fraction.
        let i_pre_bg = ((1. - cke_lo_pre) * p.idd2n + cke_lo_pre * p.idd2p) * MA_TO_A;
        let pre_stby_w = p.vdd * i_pre_bg;

        let i_act_bg = ((1. - cke_lo_act) * p.idd3n + cke_lo_act * p.idd3p) * MA_TO_A;
        let act_stby_w = p.vdd * i_act_bg;

        let background_vdd = bank_pre * pre_stby_w + (1. - bank_pre) * act_stby_w;

        // 2) Refresh power (VDD + VPP), incremental over active standby.
        let duty_ref = t_rfc1 / t_refi;
        let ref_vdd = p.vdd * (p.idd5b - p.idd3n) * MA_TO_A * duty_ref;
        let ref_vpp = p.vpp * (p.ipp5b - p.ipp3n) * MA_TO_A * duty_ref;
        let refresh_w = ref_vdd + ref_vpp;

        // 3) Read/write burst power (VDD), incremental over active standby.
        let read_w = p.vdd * (p.idd4r - p.idd3n) * MA_TO_A * rd;
        let write_w = p.vdd * (p.idd4w - p.idd3n) * MA_TO_A * wr;

        // 4) Activate/precharge power (VDD + VPP). The clamp to 1 models
        // saturation when activations are issued back-to-back faster than
        // one row cycle; VPP is only drawn while the wordline is raised.
        let t_row_cycle = t_ras + t_rp;
        let duty_act_pre = (t_row_cycle / workload.trrd_sch_ns).min(1.);
        let duty_act_vpp = (t_ras / workload.trrd_sch_ns).min(1.);

        let act_pre_vdd = p.vdd * (p.idd0 - p.idd2n) * MA_TO_A * duty_act_pre;
        let act_vpp = p.vpp * (p.ipp0 - p.ipp2n) * MA_TO_A * duty_act_vpp;
        let act_pre_w = act_pre_vdd + act_vpp;

        // 5) Aggregate per rail.
        let vdd_w = background_vdd + read_w + write_w + ref_vdd + act_pre_vdd;
        let vpp_w = ref_vpp + act_vpp;
        let total_w = vdd_w + vpp_w;

        Ok(PowerResult {
            pre_stby_w,
            act_stby_w,
            act_pre_w,
            read_w,
            write_w,
            refresh_w,
            vdd_w,
            vpp_w,
            total_w,
        })
    }
}
