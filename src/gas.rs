//! The external collaborator interface (spec.md §6): everything the
//! integrator needs from the fluid solver, mesh and gas-to-particle
//! interpolation, none of which are in scope here.

use crate::grid::Grid;
use crate::vector::Vec3;

/// A 3x3x3 interpolation stencil and its origin cell index, as produced by
/// `weight_stencil`.
#[derive(Debug, Clone, Copy)]
pub struct Stencil {
    pub weights: [[[f64; 3]; 3]; 3],
    pub origin: [usize; 3],
}

/// A weighted sample of the gas state at a point.
#[derive(Debug, Clone, Copy)]
pub struct GasState {
    pub rho: f64,
    pub u: Vec3,
    pub sound_speed: f64,
}

/// The interface the integrator consumes from the fluid solver, mesh and
/// gas-to-particle interpolation collaborators (spec.md §6). Implementors
/// own the feedback buffer and any gas-derived interpolation caches; the
/// integrator itself never inspects gas state directly.
pub trait GasInterpolator {
    /// Locates the cell containing `x` and builds its interpolation weight
    /// stencil. `None` when `x` falls outside the mesh the collaborator can
    /// stencil at all (distinct from "outside the integrable region", which
    /// is signalled by `gas_values` returning `None`).
    fn weight_stencil(&self, grid: &Grid, x: Vec3) -> Option<Stencil>;

    /// Weighted gas sample at the stencil. `None` is the out-of-domain
    /// sentinel (spec.md §4.2 step 2).
    fn gas_values(&self, grid: &Grid, stencil: &Stencil) -> Option<GasState>;

    /// Applies the steady pressure-gradient frame correction to `u` in
    /// place (spec.md §4.2 step 3).
    fn gas_velocity_shift(&self, x: Vec3, u: &mut Vec3);

    /// Species-dependent stopping time `t_s(type, rho, c_s, |dv|)`.
    fn stopping_time(&self, grid: &Grid, species: usize, rho: f64, sound_speed: f64, dv_norm: f64) -> f64;

    /// Adds momentum-density `fb` into the stencil cells.
    fn distribute_feedback(&mut self, grid: &Grid, stencil: &Stencil, fb: Vec3);

    /// Same, but into the radially-offset azimuthal column (3D non-FARGO
    /// shearing-sheet feedback only, spec.md §4.6's `distrFB_shear`).
    fn distribute_feedback_shear(&mut self, grid: &Grid, stencil: &Stencil, fb: Vec3);

    /// Zeroes the feedback buffer at the start of a step.
    fn feedback_clear(&mut self);

    /// Refreshes any gas-derived interpolation caches.
    fn get_gasinfo(&mut self, grid: &Grid);
}
