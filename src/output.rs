//! Per-timestep summary captured by the demo driver (`[SUPPLEMENT]`,
//! SPEC_FULL.md §12), grounded on the teacher's `OutputEntry`.

use serde::{Deserialize, Serialize};

/// Diagnostics the demo driver reports after a timestep. Not all fields are
/// always populated, mirroring the teacher's `Option`-per-field style for
/// output that's only produced on a cadence.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct OutputEntry {
    pub timestep: usize,
    pub time: f64,
    pub mean_speed: Option<f64>,
    pub num_live: Option<usize>,
    pub num_left_domain: Option<usize>,
}
