//! TOML-deserialized run configuration for the demo driver (`[AMBIENT]`,
//! SPEC_FULL.md §10), mirroring the teacher's `SettingsSI` / `check_settings`
//! pattern.

use crate::errors::{Result, ResultExt};
use error_chain::bail;
use crate::grid::{Dim, PhysicsConfig};
use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scheme {
    Explicit,
    SemiImplicit,
    FullyImplicit,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpeciesSettings {
    pub mass: f64,
    pub num: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GridSettings {
    pub n: [usize; 3],
    pub lower: [f64; 3],
    pub upper: [f64; 3],
    pub dt: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PhysicsSettings {
    #[serde(rename = "3d")]
    pub three_d: bool,
    pub shearing_box: bool,
    pub fargo: bool,
    pub vertical_gravity: bool,
    pub feedback: bool,
    pub omega: f64,
}

impl PhysicsSettings {
    pub fn to_config(&self) -> PhysicsConfig {
        PhysicsConfig {
            dim: if self.three_d { Dim::ThreeD } else { Dim::TwoD },
            shearing_box: self.shearing_box,
            fargo: self.fargo,
            vertical_gravity: self.vertical_gravity,
            feedback: self.feedback,
            omega: self.omega,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    pub grid: GridSettings,
    pub physics: PhysicsSettings,
    pub species: Vec<SpeciesSettings>,
    pub scheme: Scheme,
    pub number_of_timesteps: usize,
    pub output_every: usize,
}

/// Reads and validates a TOML parameter file.
pub fn read_parameter_file(path: &str) -> Result<Settings> {
    let text = fs::read_to_string(path).chain_err(|| "Unable to read parameter file.")?;
    let settings: Settings = toml::from_str(&text).chain_err(|| "Unable to parse parameter file.")?;
    check_settings(&settings)?;
    Ok(settings)
}

fn check_settings(s: &Settings) -> Result<()> {
    if s.grid.n.contains(&0) {
        bail!("Grid cell counts must be non-zero: {:?}", s.grid.n);
    }
    for i in 0..3 {
        if s.grid.upper[i] <= s.grid.lower[i] {
            bail!(
                "Grid upper bound must exceed lower bound on axis {}: {} <= {}",
                i,
                s.grid.upper[i],
                s.grid.lower[i]
            );
        }
    }
    if s.grid.dt <= 0.0 {
        bail!("Timestep must be positive: {}", s.grid.dt);
    }
    if s.species.is_empty() {
        bail!("Species table must not be empty.");
    }
    if s.output_every == 0 {
        bail!("output_every must be positive.");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_grid_axis() {
        let s = Settings {
            grid: GridSettings {
                n: [0, 1, 1],
                lower: [0.0; 3],
                upper: [1.0, 1.0, 1.0],
                dt: 0.01,
            },
            physics: PhysicsSettings {
                three_d: true,
                shearing_box: false,
                fargo: false,
                vertical_gravity: false,
                feedback: false,
                omega: 0.0,
            },
            species: vec![SpeciesSettings { mass: 1.0, num: 1 }],
            scheme: Scheme::Explicit,
            number_of_timesteps: 1,
            output_every: 1,
        };
        assert!(check_settings(&s).is_err());
    }

    #[test]
    fn accepts_well_formed_settings() {
        let toml_text = r#"
            scheme = "fully_implicit"
            number_of_timesteps = 10
            output_every = 5

            [grid]
            n = [8, 8, 1]
            lower = [-4.0, -4.0, 0.0]
            upper = [4.0, 4.0, 1.0]
            dt = 0.01

            [physics]
            "3d" = true
            shearing_box = true
            fargo = false
            vertical_gravity = false
            feedback = false
            omega = 1.0

            [[species]]
            mass = 1.0
            num = 100
        "#;
        let settings: Settings = toml::from_str(toml_text).unwrap();
        assert!(check_settings(&settings).is_ok());
        assert_eq!(settings.scheme, Scheme::FullyImplicit);
    }
}
