//! Explicit predictor-corrector integrator (spec.md §4.3). Second order,
//! stable only while `dt / t_s ≲ 1`.

use super::{axis_masked_add, run, trapezoidal_position, GrainUpdate};
use crate::drag;
use crate::force;
use crate::gas::GasInterpolator;
use crate::grain::Grain;
use crate::grid::{ActiveAxes, Grid, PhysicsConfig};

/// Advances every live grain one step with the explicit scheme, tags
/// boundary-crossers, and (if `cfg.feedback`) deposits corrector feedback.
pub fn integrate<G: GasInterpolator + Sync>(
    grid: &mut Grid,
    gas: &mut G,
    cfg: &PhysicsConfig,
    grains: &mut Vec<Grain>,
) {
    run(grid, gas, cfg, grains, step);
}

fn step(grid: &Grid, gas: &impl GasInterpolator, cfg: &PhysicsConfig, active: ActiveAxes, grain: &Grain) -> GrainUpdate {
    let dt = grid.dt;
    let x = grain.x;
    let v = grain.v;

    let mut x_half = axis_masked_add(x, v * (0.5 * dt), active);
    if cfg.has_3d_shear_correction() {
        x_half.x2 -= 0.1875 * v.x1 * dt * dt;
    }

    let d0 = drag::evaluate(grid, gas, grain.species, x, v);
    let f0 = d0.force + force::non_drag_force(cfg, x, v);
    let v_half = v + f0 * (0.5 * dt);

    let d1 = drag::evaluate(grid, gas, grain.species, x_half, v_half);
    let f1 = d1.force + force::non_drag_force(cfg, x_half, v_half);
    let dv = f1 * dt;

    let v_new = axis_masked_add(v, dv, active);
    let x_new = trapezoidal_position(x, v, v_new, dt, active);

    GrainUpdate {
        x_new,
        v_new,
        x_mid: (x + x_new) * 0.5,
        v_mid: (v + v_new) * 0.5,
        dv,
    }
}
