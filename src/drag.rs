//! The linear drag model (spec.md §4.2).

use crate::gas::GasInterpolator;
use crate::grid::Grid;
use crate::vector::Vec3;
use log::warn;

/// Drag force and inverse stopping time returned by [`evaluate`].
#[derive(Debug, Clone, Copy)]
pub struct DragResult {
    pub force: Vec3,
    pub inv_stopping_time: f64,
}

impl DragResult {
    fn free_streaming() -> DragResult {
        DragResult {
            force: Vec3::zero(),
            inv_stopping_time: 0.0,
        }
    }
}

/// Computes the linear drag force and `1/t_s` on a grain of the given
/// species at `(x, v)`. Free-streams (zero drag) and logs a warning if `x`
/// falls outside the integrable region — this is the sole recoverable error
/// path in the integrator (spec.md §7a).
pub fn evaluate<G: GasInterpolator>(grid: &Grid, gas: &G, species: usize, x: Vec3, v: Vec3) -> DragResult {
    let stencil = match gas.weight_stencil(grid, x) {
        Some(s) => s,
        None => {
            warn!(
                "grain at ({}, {}, {}) has no interpolation stencil; treating as free-streaming",
                x.x1, x.x2, x.x3
            );
            return DragResult::free_streaming();
        }
    };

    let state = match gas.gas_values(grid, &stencil) {
        Some(s) => s,
        None => {
            warn!(
                "grain at ({}, {}, {}) is outside the integrable region; treating as free-streaming",
                x.x1, x.x2, x.x3
            );
            return DragResult::free_streaming();
        }
    };

    let mut u = state.u;
    gas.gas_velocity_shift(x, &mut u);

    let dv = v - u;
    let dv_norm = dv.norm();

    let t_s = gas.stopping_time(grid, species, state.rho, state.sound_speed, dv_norm);

    DragResult {
        force: -(dv / t_s),
        inv_stopping_time: 1.0 / t_s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gas::{GasState, Stencil};
    use crate::testutil::UniformGas;

    fn grid() -> Grid {
        Grid {
            n: [8, 1, 1],
            dx: [1.0; 3],
            time: 0.0,
            dt: 0.01,
            proc_id: 0,
            lower: [0.0; 3],
            upper: [8.0, 1.0, 1.0],
            species: vec![crate::grid::Species { mass: 1.0, num: 1 }],
        }
    }

    #[test]
    fn zero_relative_velocity_gives_zero_drag() {
        let g = grid();
        let gas = UniformGas::new(&g, 1.0, Vec3::zero(), 1.0, 1.0);
        let r = evaluate(&g, &gas, 0, Vec3::new(4., 0., 0.), Vec3::zero());
        assert_eq!(r.force, Vec3::zero());
        assert_eq!(r.inv_stopping_time, 1.0);
    }

    #[test]
    fn drag_opposes_relative_velocity() {
        let g = grid();
        let gas = UniformGas::new(&g, 1.0, Vec3::zero(), 1.0, 2.0);
        let r = evaluate(&g, &gas, 0, Vec3::new(4., 0., 0.), Vec3::new(1.0, 0., 0.));
        assert_eq!(r.force, Vec3::new(-0.5, 0., 0.));
        assert_eq!(r.inv_stopping_time, 0.5);
    }

    struct NoStencilGas;
    impl GasInterpolator for NoStencilGas {
        fn weight_stencil(&self, _grid: &Grid, _x: Vec3) -> Option<Stencil> {
            None
        }
        fn gas_values(&self, _grid: &Grid, _stencil: &Stencil) -> Option<GasState> {
            unreachable!()
        }
        fn gas_velocity_shift(&self, _x: Vec3, _u: &mut Vec3) {}
        fn stopping_time(&self, _grid: &Grid, _species: usize, _rho: f64, _cs: f64, _dv: f64) -> f64 {
            unreachable!()
        }
        fn distribute_feedback(&mut self, _grid: &Grid, _stencil: &Stencil, _fb: Vec3) {}
        fn distribute_feedback_shear(&mut self, _grid: &Grid, _stencil: &Stencil, _fb: Vec3) {}
        fn feedback_clear(&mut self) {}
        fn get_gasinfo(&mut self, _grid: &Grid) {}
    }

    #[test]
    fn outside_mesh_free_streams() {
        let r = evaluate(&grid(), &NoStencilGas, 0, Vec3::new(100., 0., 0.), Vec3::new(1., 0., 0.));
        assert_eq!(r.force, Vec3::zero());
        assert_eq!(r.inv_stopping_time, 0.0);
    }
}
