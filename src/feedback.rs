//! The feedback accumulator (spec.md §4.6): predictor-phase and
//! corrector-phase momentum deposition from grains onto gas cells.

use crate::force;
use crate::gas::GasInterpolator;
use crate::grain::{status, Grain};
use crate::grid::{Grid, PhysicsConfig};
use crate::vector::Vec3;

/// Predictor-phase feedback: clears the feedback buffer and deposits a
/// clamped drag-momentum estimate for every live grain. Called once per
/// step, before the gas update, separately from the three integrator entry
/// points (spec.md §6).
pub fn feedback_predictor<G: GasInterpolator>(grid: &Grid, gas: &mut G, grains: &[Grain]) {
    gas.feedback_clear();

    for grain in grains.iter().filter(|g| g.pos != status::GHOST) {
        let stencil = match gas.weight_stencil(grid, grain.x) {
            Some(s) => s,
            None => continue,
        };
        let state = match gas.gas_values(grid, &stencil) {
            Some(s) => s,
            None => continue,
        };

        let mut u = state.u;
        gas.gas_velocity_shift(grain.x, &mut u);

        let dv = u - grain.v;
        let mut t_s = gas.stopping_time(grid, grain.species, state.rho, state.sound_speed, dv.norm());
        // Intentional under-coupling: keeps the gas update stable when
        // grains are arbitrarily stiff (spec.md §9, "Feedback clamping").
        t_s = t_s.max(grid.dt);

        let mass = grid.species[grain.species].mass;
        // Negated: the grain's drag acceleration is ~dv/t_s, so what it
        // gains the gas loses.
        let fb = dv * (-mass * grid.dt / (2.0 * t_s));

        gas.distribute_feedback(grid, &stencil, fb);
    }
}

/// Corrector-phase feedback for a single grain, called from inside the main
/// integrator loop after `dv` (the velocity update for this step) has been
/// computed.
///
/// `x_mid`/`v_mid` is the midpoint state `(½(x+x'), ½(v+v'))`; the stencil
/// is looked up there (see `DESIGN.md`'s Open Question decisions).
pub fn feedback_corrector<G: GasInterpolator>(
    grid: &Grid,
    gas: &mut G,
    cfg: &PhysicsConfig,
    species: usize,
    x_mid: Vec3,
    v_mid: Vec3,
    dv: Vec3,
) {
    let f_mid = force::non_drag_force(cfg, x_mid, v_mid);
    let mass = grid.species[species].mass;
    // Drag-only portion of the grain's velocity change, negated: what the
    // grain loses to drag, the gas gains.
    let impulse = (f_mid * grid.dt - dv) * mass;

    let stencil = match gas.weight_stencil(grid, x_mid) {
        Some(s) => s,
        None => return,
    };

    gas.distribute_feedback(grid, &stencil, impulse);

    if cfg.has_3d_shear_correction() {
        gas.distribute_feedback_shear(grid, &stencil, impulse);
    }
}
