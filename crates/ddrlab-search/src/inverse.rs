//! Inverse device parameter search.
//!
//! Given a workload and a power target, searches for a device parameter
//! set whose forward-model output matches the target, starting from each
//! catalog preset.

use log::{debug, info};

use ddrlab_model::core_model::{CorePowerModel, PowerResult};
use ddrlab_model::dimm::{DimmConfig, DimmPowerModel, DimmPowerResult};
use ddrlab_model::presets::PresetCatalog;
use ddrlab_model::spec::DeviceSpec;
use ddrlab_model::workload::Workload;

use crate::error::SearchError;
use crate::optimizer::{RandomPerturbation, SpecOptimizer};

/// Desired power figures. The core total is always required; the remaining
/// fields participate in the loss only when set.
#[derive(Debug, Clone, PartialEq)]
pub struct PowerTarget {
    /// Required core die total in W.
    pub core_w: f64,
    /// Optional VPP rail total in W.
    pub vpp_w: Option<f64>,
    /// Optional read component in W.
    pub read_w: Option<f64>,
    /// Optional write component in W.
    pub write_w: Option<f64>,
    /// Optional module total in W.
    pub dimm_w: Option<f64>,
}

impl PowerTarget {
    /// Creates a target constraining only the core total.
    pub fn core(core_w: f64) -> Self {
        Self {
            core_w,
            vpp_w: None,
            read_w: None,
            write_w: None,
            dimm_w: None,
        }
    }
}

/// Weights of the squared-error loss terms.
#[derive(Debug, Clone, PartialEq)]
pub struct LossWeights {
    pub core: f64,
    pub vpp: f64,
    pub read: f64,
    pub write: f64,
    pub dimm: f64,
}

impl Default for LossWeights {
    fn default() -> Self {
        Self {
            core: 5.,
            vpp: 1.,
            read: 1.,
            write: 1.,
            dimm: 1.,
        }
    }
}

/// Best-fit device found by the inverse search.
#[derive(Debug, Clone)]
pub struct InverseFit {
    /// Name of the catalog preset the fit was derived from.
    pub preset: String,
    pub spec: DeviceSpec,
    pub power: PowerResult,
    pub dimm_power: DimmPowerResult,
    pub loss: f64,
}

/// Inverse search engine.
///
/// The candidate generation strategy is pluggable via [`SpecOptimizer`];
/// the plausibility filter (no negative power components) and the weighted
/// loss are applied here regardless of the strategy.
pub struct InverseSearch {
    optimizer: Box<dyn SpecOptimizer>,
    weights: LossWeights,
    dimm_config: DimmConfig,
}

impl InverseSearch {
    /// Creates the search with the default random perturbation strategy.
    pub fn new(samples_per_preset: usize, seed: u64) -> Self {
        Self::with_optimizer(Box::new(RandomPerturbation::new(samples_per_preset, seed)))
    }

    /// Creates the search with a custom candidate generation strategy.
    pub fn with_optimizer(optimizer: Box<dyn SpecOptimizer>) -> Self {
        Self {
            optimizer,
            weights: LossWeights::default(),
            dimm_config: DimmConfig::default(),
        }
    }

    pub fn with_weights(mut self, weights: LossWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_dimm_config(mut self, dimm_config: DimmConfig) -> Self {
        self.dimm_config = dimm_config;
        self
    }

    /// Runs the search across all catalog presets and returns the
    /// minimum-loss plausible candidate.
    pub fn run(
        &mut self,
        catalog: &PresetCatalog,
        workload: &Workload,
        target: &PowerTarget,
    ) -> Result<InverseFit, SearchError> {
        let core_model = CorePowerModel::new();
        let dimm_model = DimmPowerModel::new();

        let mut best: Option<InverseFit> = None;
        let mut evaluated = 0usize;

        for preset in catalog.presets() {
            // Surface configuration errors from the preset itself instead of
            // silently rejecting every perturbation of it.
            core_model.compute(&preset.spec, workload)?;

            let mut config = self.dimm_config.clone();
            if config.module_capacity_gb.is_none() {
                config.module_capacity_gb = Some(preset.capacity_gb);
            }

            let weights = &self.weights;
            let mut objective = |candidate: &DeviceSpec| -> Option<f64> {
                evaluated += 1;
                let power = core_model.compute(candidate, workload).ok()?;
                if power.has_negative() {
                    return None;
                }
                let dimm = dimm_model.compute(&power, candidate, &config);
                Some(loss(&power, &dimm, target, weights))
            };

            let found = self.optimizer.optimize(&preset.spec, &mut objective);
            match found {
                Some((spec, loss)) => {
                    debug!("preset {}: best loss {:.6}", preset.name, loss);
                    if best.as_ref().map_or(true, |b| loss < b.loss) {
                        let power = core_model.compute(&spec, workload)?;
                        let dimm_power = dimm_model.compute(&power, &spec, &config);
                        best = Some(InverseFit {
                            preset: preset.name.clone(),
                            spec,
                            power,
                            dimm_power,
                            loss,
                        });
                    }
                }
                None => debug!("preset {}: all candidates rejected", preset.name),
            }
        }

        match best {
            Some(fit) => {
                info!(
                    "inverse search done: preset {}, loss {:.6}, {} candidates evaluated",
                    fit.preset, fit.loss, evaluated
                );
                Ok(fit)
            }
            None => Err(SearchError::NoPlausibleCandidate {
                presets: catalog.len(),
                evaluated,
            }),
        }
    }
}

fn loss(power: &PowerResult, dimm: &DimmPowerResult, target: &PowerTarget, weights: &LossWeights) -> f64 {
    let mut loss = weights.core * (power.total_w - target.core_w).powi(2);
    if let Some(vpp_w) = target.vpp_w {
        loss += weights.vpp * (power.vpp_w - vpp_w).powi(2);
    }
    if let Some(read_w) = target.read_w {
        loss += weights.read * (power.read_w - read_w).powi(2);
    }
    if let Some(write_w) = target.write_w {
        loss += weights.write * (power.write_w - write_w).powi(2);
    }
    if let Some(dimm_w) = target.dimm_w {
        loss += weights.dimm * (dimm.total_w - dimm_w).powi(2);
    }
    loss
}
