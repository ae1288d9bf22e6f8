//! Nelder-Mead polishing of the best grid node.

use argmin::core::{CostFunction, Executor};
use argmin::solver::neldermead::NelderMead;
use tracing::{debug, warn};

use crate::fit::{Bounds, Misfit};

/// Misfit as a function of `[te, F]` or `[te, F, alpha]`.
struct MisfitCost<'a, 'b> {
    misfit: &'a Misfit<'b>,
    bounds: &'a Bounds,
    fixed_alpha: f64,
}

impl CostFunction for MisfitCost<'_, '_> {
    type Param = Vec<f64>;
    type Output = f64;

    fn cost(&self, p: &Self::Param) -> Result<Self::Output, argmin::core::Error> {
        let inside = p
            .iter()
            .zip(self.bounds.lower.iter().zip(&self.bounds.upper))
            .all(|(v, (lo, hi))| v >= lo && v <= hi);
        if !inside {
            return Ok(f64::MAX);
        }
        let alpha = p.get(2).copied().unwrap_or(self.fixed_alpha);
        let c = self.misfit.chi2(p[0], p[1], alpha);
        Ok(if c.is_finite() { c } else { f64::MAX })
    }
}

/// Runs Nelder-Mead from `start` and returns the minimiser and its misfit.
///
/// Each initial simplex vertex moves one coordinate by its grid step, toward
/// the interior when the step would leave the bounds. Returns `None` if the
/// solver fails.
pub(crate) fn polish(
    misfit: &Misfit<'_>,
    start: &[f64],
    steps: &[f64],
    bounds: &Bounds,
    fixed_alpha: f64,
) -> Option<(Vec<f64>, f64)> {
    let mut simplex = vec![start.to_vec()];
    for (d, &step) in steps.iter().enumerate() {
        let mut vertex = start.to_vec();
        vertex[d] = if start[d] + step <= bounds.upper[d] {
            start[d] + step
        } else {
            start[d] - step
        };
        simplex.push(vertex);
    }

    let cost = MisfitCost {
        misfit,
        bounds,
        fixed_alpha,
    };
    let run = || -> Result<(Vec<f64>, f64), argmin::core::Error> {
        let solver = NelderMead::new(simplex).with_sd_tolerance(1e-10)?;
        let result = Executor::new(cost, solver)
            .configure(|state| state.max_iters(500))
            .run()?;
        let state = result.state();
        let best = state
            .best_param
            .clone()
            .ok_or_else(|| argmin::core::Error::msg("solver returned no parameters"))?;
        Ok((best, state.best_cost))
    };
    match run() {
        Ok((params, cost)) => {
            debug!(?params, cost, "nelder-mead refinement finished");
            Some((params, cost))
        }
        Err(e) => {
            warn!(error = %e, "nelder-mead refinement failed, keeping grid optimum");
            None
        }
    }
}
