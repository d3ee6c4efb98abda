//! Lagrangian particle integration core: three second-order schemes coupling
//! massive dust grains to a background gas via linear drag, optionally in a
//! shearing-sheet/FARGO rotating frame, with optional momentum feedback onto
//! the gas grid. The fluid solver, mesh and gas-to-particle interpolation are
//! external collaborators behind the [`gas::GasInterpolator`] trait.

pub mod drag;
pub mod errors;
pub mod feedback;
pub mod force;
pub mod gas;
pub mod ghost;
pub mod grain;
pub mod grid;
pub mod integrators;
pub mod output;
pub mod settings;
pub mod testutil;
pub mod vector;
