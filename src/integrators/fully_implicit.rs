//! Fully-implicit integrator (spec.md §4.5): trapezoidal with an analytic
//! 2×2 matrix inversion covering the full drag+Coriolis coupling. The most
//! delicate of the three schemes — stable across the full range of
//! stopping-time/timestep ratios.

use super::{axis_masked_add, run, trapezoidal_position, GrainUpdate};
use crate::drag;
use crate::force;
use crate::gas::GasInterpolator;
use crate::grain::Grain;
use crate::grid::{rotation_plane, ActiveAxes, Grid, PhysicsConfig};
use crate::vector::Vec3;

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

    let mut x_pred = x;
    for i in 0..3 {
        if active[i] {
            x_pred[i] += dt * v[i];
        }
    }
    if cfg.has_3d_shear_correction() {
        x_pred.x2 -= 0.75 * v.x1 * dt * dt;
    }

    let dc = drag::evaluate(grid, gas, grain.species, x, v);
    let inv_t_s1 = dc.inv_stopping_time;
    let f_c = dc.force + force::non_drag_force(cfg, x, v);

    let dp = drag::evaluate(grid, gas, grain.species, x_pred, v);
    let inv_t_s2 = dp.inv_stopping_time;
    let f_p = dp.force + force::non_drag_force(cfg, x_pred, v);

    let b0 = 1.0 + dt * inv_t_s1;
    let mut f_tilde = (f_c + f_p * b0) * 0.5;

    let omega = cfg.omega * dt;
    if cfg.shearing_box {
        let (ia, ib, _ic) = rotation_plane(cfg.dim);
        f_tilde[ia] -= omega * f_p[ib];
        f_tilde[ib] += if cfg.fargo { 0.25 * omega } else { omega } * f_p[ia];
    }

    let dv = if !cfg.shearing_box {
        let d = 1.0 + 0.5 * dt * (inv_t_s1 + inv_t_s2 + dt * inv_t_s1 * inv_t_s2);
        let mut dv = Vec3::zero();
        for i in 0..3 {
            if active[i] {
                dv[i] = dt * f_tilde[i] / d;
            }
        }
        dv
    } else {
        let d = 1.0 + 0.5 * dt * (inv_t_s1 + inv_t_s2 + dt * inv_t_s1 * inv_t_s2);
        let b = omega * (-2.0 - (inv_t_s1 + inv_t_s2) * dt);
        let (a, c) = if cfg.fargo {
            (d - 0.5 * omega * omega, -0.25 * b)
        } else {
            (d - 2.0 * omega * omega, -b)
        };
        let det = a * a - b * c;
        assert!(det > 0.0, "fully-implicit matrix singular: Det={} (a={} b={} c={})", det, a, b, c);

        let (ia, ib, ic) = rotation_plane(cfg.dim);
        let mut dv = Vec3::zero();
        if active[ia] {
            dv[ia] = dt * (a * f_tilde[ia] - b * f_tilde[ib]) / det;
        }
        if active[ib] {
            dv[ib] = dt * (-c * f_tilde[ia] + a * f_tilde[ib]) / det;
        }
        if active[ic] {
            dv[ic] = dt * f_tilde[ic] / d;
        }
        dv
    };

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
