//! The non-drag force model (spec.md §4.1): Coriolis, tidal and vertical
//! gravity terms of the (optional) shearing-sheet frame. Pure function of
//! position and velocity; no side effects.

use crate::grid::{Dim, PhysicsConfig};
use crate::vector::Vec3;

/// Returns the non-drag force per unit mass on a grain at `(x, v)`.
pub fn non_drag_force(cfg: &PhysicsConfig, x: Vec3, v: Vec3) -> Vec3 {
    if !cfg.shearing_box {
        return Vec3::zero();
    }

    let omega = cfg.omega;
    let mut f = Vec3::zero();

    match cfg.dim {
        Dim::ThreeD => {
            f.x1 += 2.0 * omega * v.x2;
            if !cfg.fargo {
                f.x1 += 3.0 * omega * omega * x.x1;
            }
            f.x2 += if cfg.fargo {
                -0.5 * omega * v.x1
            } else {
                -2.0 * omega * v.x1
            };
            if cfg.vertical_gravity {
                f.x3 += -omega * omega * x.x3;
            }
        }
        Dim::TwoD => {
            f.x1 += 3.0 * omega * omega * x.x1 + 2.0 * omega * v.x3;
            f.x3 += -2.0 * omega * v.x1;
            if cfg.vertical_gravity {
                f.x2 += -omega * omega * x.x2;
            }
        }
    }

    f
}
