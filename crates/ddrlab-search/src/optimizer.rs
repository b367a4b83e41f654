//! Derivative-free search over device parameter space.

use rand::prelude::*;
use rand_pcg::Pcg64;

use ddrlab_model::spec::{DeviceSpec, VDD_BOUNDS, VPP_BOUNDS};

/// A black-box minimizer over device specifications.
///
/// The objective returns the loss of a candidate, or `None` if the
/// candidate is rejected (e.g. physically implausible). Implementations
/// must keep the first-seen candidate on loss ties.
pub trait SpecOptimizer {
    fn optimize(
        &mut self,
        base: &DeviceSpec,
        objective: &mut dyn FnMut(&DeviceSpec) -> Option<f64>,
    ) -> Option<(DeviceSpec, f64)>;
}

/// Random multi-start perturbation search.
///
/// Draws independent candidates around the base specification: each
/// whitelisted current is scaled by a uniform factor in [0.7, 1.3] and both
/// supply voltages are redrawn within their physical bounds. The forward
/// model is cheap and the duty-cycle clamps make it non-smooth, so plain
/// random sampling is used instead of a gradient method.
pub struct RandomPerturbation {
    samples: usize,
    rng: Pcg64,
}

impl RandomPerturbation {
    /// Creates the search with the given per-run sample budget and seed.
    pub fn new(samples: usize, seed: u64) -> Self {
        Self {
            samples,
            rng: Pcg64::seed_from_u64(seed),
        }
    }

    fn perturb(&mut self, base: &DeviceSpec) -> DeviceSpec {
        let mut spec = base.clone();
        let p = &mut spec.power;
        for current in [
            &mut p.idd0,
            &mut p.idd2n,
            &mut p.idd3n,
            &mut p.idd4r,
            &mut p.idd4w,
            &mut p.idd5b,
            &mut p.idd2p,
            &mut p.idd3p,
            &mut p.ipp0,
            &mut p.ipp2n,
            &mut p.ipp3n,
            &mut p.ipp5b,
        ] {
            *current *= self.rng.gen_range(0.7..1.3);
        }
        p.vdd = self.rng.gen_range(VDD_BOUNDS.0..VDD_BOUNDS.1);
        p.vpp = self.rng.gen_range(VPP_BOUNDS.0..VPP_BOUNDS.1);
        spec
    }
}

impl SpecOptimizer for RandomPerturbation {
    fn optimize(
        &mut self,
        base: &DeviceSpec,
        objective: &mut dyn FnMut(&DeviceSpec) -> Option<f64>,
    ) -> Option<(DeviceSpec, f64)> {
        let mut best: Option<(DeviceSpec, f64)> = None;
        for _ in 0..self.samples {
            let candidate = self.perturb(base);
            if let Some(loss) = objective(&candidate) {
                if best.as_ref().map_or(true, |(_, best_loss)| loss < *best_loss) {
                    best = Some((candidate, loss));
                }
            }
        }
        best
    }
}
