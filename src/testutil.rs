//! A minimal analytically-defined gas model, used by this crate's own tests
//! and available to integration tests and the demo binary. It is
//! deliberately trivial: uniform density/velocity/sound speed and a constant
//! stopping time, always in-domain. It stands in for the mesh, fluid solver
//! and gas-to-particle interpolation collaborators spec.md puts out of
//! scope — it is not a reimplementation of any of them.

use crate::gas::{GasInterpolator, GasState, Stencil};
use crate::grid::Grid;
use crate::vector::Vec3;
use ndarray::Array4;

/// Uniform gas state with a constant stopping time and an accumulating
/// feedback buffer, for exercising the feedback accumulator (spec.md §4.6)
/// and the literal test scenarios of spec.md §8.
pub struct UniformGas {
    pub rho: f64,
    pub u: Vec3,
    pub sound_speed: f64,
    pub stopping_time: f64,
    /// Frame-shift applied to `u` in `gas_velocity_shift` (simulates the
    /// steady pressure-gradient drift correction).
    pub frame_shift: Vec3,
    /// Per-cell accumulated momentum-density, shape `(3, n0, n1, n2)`.
    pub feedback: Array4<f64>,
}

impl UniformGas {
    pub fn new(grid: &Grid, rho: f64, u: Vec3, sound_speed: f64, stopping_time: f64) -> UniformGas {
        UniformGas {
            rho,
            u,
            sound_speed,
            stopping_time,
            frame_shift: Vec3::zero(),
            feedback: Array4::zeros((3, grid.n[0], grid.n[1], grid.n[2])),
        }
    }

    pub fn total_feedback(&self) -> Vec3 {
        Vec3::new(
            self.feedback.index_axis(ndarray::Axis(0), 0).sum(),
            self.feedback.index_axis(ndarray::Axis(0), 1).sum(),
            self.feedback.index_axis(ndarray::Axis(0), 2).sum(),
        )
    }
}

impl GasInterpolator for UniformGas {
    fn weight_stencil(&self, grid: &Grid, x: Vec3) -> Option<Stencil> {
        let idx = |xi: f64, dxi: f64, ni: usize| -> Option<usize> {
            if ni <= 1 {
                return Some(0);
            }
            let i = (xi / dxi).floor();
            if i < 0.0 || i as usize >= ni {
                None
            } else {
                Some(i as usize)
            }
        };
        let origin = [
            idx(x.x1, self.dx_or_one(grid, 0), grid.n[0])?,
            idx(x.x2, self.dx_or_one(grid, 1), grid.n[1])?,
            idx(x.x3, self.dx_or_one(grid, 2), grid.n[2])?,
        ];
        Some(Stencil {
            weights: [[[0.0; 3]; 3]; 3],
            origin,
        })
    }

    fn gas_values(&self, _grid: &Grid, _stencil: &Stencil) -> Option<GasState> {
        Some(GasState {
            rho: self.rho,
            u: self.u,
            sound_speed: self.sound_speed,
        })
    }

    fn gas_velocity_shift(&self, _x: Vec3, u: &mut Vec3) {
        *u += self.frame_shift;
    }

    fn stopping_time(&self, _grid: &Grid, _species: usize, _rho: f64, _cs: f64, _dv: f64) -> f64 {
        self.stopping_time
    }

    fn distribute_feedback(&mut self, _grid: &Grid, stencil: &Stencil, fb: Vec3) {
        let [i, j, k] = stencil.origin;
        for c in 0..3 {
            self.feedback[[c, i, j, k]] += fb[c];
        }
    }

    fn distribute_feedback_shear(&mut self, grid: &Grid, stencil: &Stencil, fb: Vec3) {
        self.distribute_feedback(grid, stencil, fb);
    }

    fn feedback_clear(&mut self) {
        self.feedback.fill(0.0);
    }

    fn get_gasinfo(&mut self, _grid: &Grid) {}
}

impl UniformGas {
    fn dx_or_one(&self, grid: &Grid, axis: usize) -> f64 {
        if grid.dx[axis] > 0.0 {
            grid.dx[axis]
        } else {
            1.0
        }
    }
}
