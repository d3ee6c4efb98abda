//! The `Grain` record and the grain array compaction rule.

use crate::vector::Vec3;
use serde::{Deserialize, Serialize};

/// Sentinel values for `Grain::pos`, the status tag used by the
/// boundary/migration collaborator.
pub mod status {
    /// Incoming ghost copy from a neighbouring subdomain; purged before
    /// integration.
    pub const GHOST: i32 = 0;
    /// Left the live region during the current step; awaits migration.
    pub const LEFT_DOMAIN: i32 = 10;
}

/// A single Lagrangian dust grain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Grain {
    pub x: Vec3,
    pub v: Vec3,
    /// Index into `Grid::species`.
    pub species: usize,
    /// 0 = ghost, >=1 = live, 10 = left the domain this step.
    pub pos: i32,
    /// Azimuthal advection to apply downstream, FARGO frame only.
    pub shift: Option<f64>,
}

impl Grain {
    pub fn new(x: Vec3, v: Vec3, species: usize) -> Grain {
        Grain {
            x,
            v,
            species,
            pos: 1,
            shift: None,
        }
    }

    pub fn is_ghost(&self) -> bool {
        self.pos == status::GHOST
    }
}
