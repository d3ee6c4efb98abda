//! The three particle integrators (spec.md §4.3-§4.5) and their shared
//! skeleton: clear feedback, purge ghosts, evaluate drag/force per grain
//! (in parallel, read-only), then apply the results, tag boundary-crossers
//! and deposit corrector feedback sequentially in grain-array order.
//!
//! Design note (spec.md §9): the five build-time physics flags are
//! collapsed into one runtime [`crate::grid::PhysicsConfig`] consumed
//! identically by all three schemes, and the skeleton below is shared so
//! the per-grain loop is not duplicated three times — only the numerical
//! scheme in `per_grain` differs between `explicit`, `semi_implicit` and
//! `fully_implicit`.

pub mod explicit;
pub mod fully_implicit;
pub mod semi_implicit;

use crate::feedback::feedback_corrector;
use crate::gas::GasInterpolator;
use crate::ghost;
use crate::grain::Grain;
use crate::grid::{azimuthal_axis, ActiveAxes, Grid, PhysicsConfig};
use crate::vector::Vec3;
use rayon::prelude::*;

/// Per-grain outcome of the (parallel, read-only) scheme evaluation: the
/// new position/velocity plus the midpoint state and velocity increment the
/// corrector feedback phase needs.
struct GrainUpdate {
    x_new: Vec3,
    v_new: Vec3,
    x_mid: Vec3,
    v_mid: Vec3,
    dv: Vec3,
}

/// Runs the shared skeleton around a per-scheme `step` closure. `step`
/// receives the grid, active-axis flags, config and a grain, and must
/// return the scheme's second-order update without mutating the grain
/// itself.
fn run<G, F>(grid: &mut Grid, gas: &mut G, cfg: &PhysicsConfig, grains: &mut Vec<Grain>, step: F)
where
    G: GasInterpolator + Sync,
    F: Fn(&Grid, &G, &PhysicsConfig, ActiveAxes, &Grain) -> GrainUpdate + Sync,
{
    gas.feedback_clear();
    gas.get_gasinfo(grid);
    ghost::purge(grid, grains);

    let active = grid.active_axes();

    let updates: Vec<GrainUpdate> = grains
        .par_iter()
        .map(|grain| step(grid, gas, cfg, active, grain))
        .collect();

    let azimuth = azimuthal_axis(cfg.dim);

    for (grain, update) in grains.iter_mut().zip(updates) {
        grain.x = update.x_new;
        grain.v = update.v_new;

        for (i, &axis_active) in active.iter().enumerate() {
            if !axis_active {
                continue;
            }
            if cfg.fargo && i == azimuth {
                continue;
            }
            if grain.x[i] < grid.lower[i] || grain.x[i] >= grid.upper[i] {
                grain.pos = crate::grain::status::LEFT_DOMAIN;
            }
        }

        if cfg.feedback {
            feedback_corrector(grid, gas, cfg, grain.species, update.x_mid, update.v_mid, update.dv);
        }
    }
}

/// Per-axis trapezoidal position update `x_new = x + 1/2 dt (v + v_new)`,
/// applied only to active axes; collapsed axes are left bit-identical.
fn trapezoidal_position(x: Vec3, v: Vec3, v_new: Vec3, dt: f64, active: ActiveAxes) -> Vec3 {
    let mut x_new = x;
    for i in 0..3 {
        if active[i] {
            x_new[i] = x[i] + 0.5 * dt * (v[i] + v_new[i]);
        }
    }
    x_new
}

/// Applies `delta` only to active axes, leaving collapsed axes unchanged.
fn axis_masked_add(base: Vec3, delta: Vec3, active: ActiveAxes) -> Vec3 {
    let mut out = base;
    for i in 0..3 {
        if active[i] {
            out[i] += delta[i];
        }
    }
    out
}
