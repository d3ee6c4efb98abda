//! Read-only grid metadata as seen by the integrator.
//!
//! The actual gas state (density, velocities, sound speed) lives behind the
//! [`crate::drag::GasInterpolator`] collaborator; `Grid` only carries the
//! geometry and bookkeeping the integrator needs on its own.

/// Per-species material constants and live-particle bookkeeping.
#[derive(Debug, Clone, Copy)]
pub struct Species {
    pub mass: f64,
    pub num: usize,
}

/// Dimensionality of the integration. In the 2D case the axes are
/// (X, Z, Y): `x1`/`x3` form the shearing-sheet plane, `x2` is vertical.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dim {
    TwoD,
    ThreeD,
}

/// Which axis indices form the rotation plane (Coriolis coupling) and which
/// is out of plane, for a given dimensionality.
///
/// 3D: plane is `(x1, x2)`, out-of-plane is `x3`.
/// 2D: plane is `(x1, x3)`, out-of-plane is `x2` (vertical).
///
/// See `DESIGN.md` for why the 2D convention was chosen this way (spec.md §9
/// leaves it as an open question).
pub fn rotation_plane(dim: Dim) -> (usize, usize, usize) {
    match dim {
        Dim::ThreeD => (0, 1, 2),
        Dim::TwoD => (0, 2, 1),
    }
}

/// The azimuthal axis index, exempt from boundary tagging in FARGO mode
/// (spec.md, "State tagging at boundaries").
pub fn azimuthal_axis(dim: Dim) -> usize {
    match dim {
        Dim::ThreeD => 1,
        Dim::TwoD => 2,
    }
}

/// Runtime-selected physics variant. Collapses the reference's build-time
/// flags (`SHEARING_BOX`, `FARGO`, `VERTICAL_GRAVITY`, `FEEDBACK`, 2D/3D)
/// into one value consumed uniformly by all three integrators.
#[derive(Debug, Clone, Copy)]
pub struct PhysicsConfig {
    pub dim: Dim,
    pub shearing_box: bool,
    pub fargo: bool,
    pub vertical_gravity: bool,
    pub feedback: bool,
    pub omega: f64,
}

impl PhysicsConfig {
    /// Whether axis `i` participates in the shear-correction terms of
    /// §4.3-§4.5 (only ever the 3D, non-FARGO, shearing-box case).
    pub fn has_3d_shear_correction(&self) -> bool {
        self.shearing_box && !self.fargo && self.dim == Dim::ThreeD
    }
}

/// Read-only metadata the integrator consumes about the mesh and particle
/// species table.
#[derive(Debug, Clone)]
pub struct Grid {
    /// Per-axis cell counts. `n[i] == 1` means axis `i` is collapsed: the
    /// integrator must leave `x_i` and `v_i` untouched.
    pub n: [usize; 3],
    pub dx: [f64; 3],
    pub time: f64,
    pub dt: f64,
    pub proc_id: i32,
    /// Lower/upper bounds of the live (non-ghost) region, per axis.
    pub lower: [f64; 3],
    pub upper: [f64; 3],
    pub species: Vec<Species>,
}

/// Per-axis "is this axis active" flags, derived once per integrator call
/// from `Grid::n` (spec.md §9: "encode this as an explicit per-axis active
/// flag read once per integrator call").
pub type ActiveAxes = [bool; 3];

impl Grid {
    pub fn active_axes(&self) -> ActiveAxes {
        [self.n[0] > 1, self.n[1] > 1, self.n[2] > 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    /// `active_axes` must agree with `n[i] > 1` for every axis, for any
    /// cell-count triple (spec.md §9's collapsed-axis sentinel convention).
    #[quickcheck]
    fn active_axes_matches_cell_counts(n0: usize, n1: usize, n2: usize) -> bool {
        let n = [n0.max(1), n1.max(1), n2.max(1)];
        let g = Grid {
            n,
            dx: [1.0; 3],
            time: 0.0,
            dt: 0.01,
            proc_id: 0,
            lower: [0.0; 3],
            upper: [n[0] as f64, n[1] as f64, n[2] as f64],
            species: vec![],
        };
        g.active_axes() == [n[0] > 1, n[1] > 1, n[2] > 1]
    }

    #[test]
    fn collapsed_axis_detection() {
        let g = Grid {
            n: [8, 1, 4],
            dx: [1.0; 3],
            time: 0.0,
            dt: 0.01,
            proc_id: 0,
            lower: [0.0; 3],
            upper: [8.0, 1.0, 4.0],
            species: vec![Species { mass: 1.0, num: 0 }],
        };
        assert_eq!(g.active_axes(), [true, false, true]);
    }

    #[test]
    fn rotation_planes() {
        assert_eq!(rotation_plane(Dim::ThreeD), (0, 1, 2));
        assert_eq!(rotation_plane(Dim::TwoD), (0, 2, 1));
        assert_eq!(azimuthal_axis(Dim::ThreeD), 1);
        assert_eq!(azimuthal_axis(Dim::TwoD), 2);
    }
}
