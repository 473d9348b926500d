use std::collections::BTreeMap;

use serde::Deserialize;

use crate::input::InputError;

/// Simulated particles of one event, stored as parallel arrays.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CaloParticleEvent {
    #[serde(rename = "CaloParticleEnergy")]
    pub energy: Vec<f64>,
    #[serde(rename = "CaloParticleEta")]
    pub eta: Vec<f64>,
    #[serde(rename = "CaloParticlePhi")]
    pub phi: Vec<f64>,
    /// Association scores to layer clusters, one list per particle.
    #[serde(rename = "CP2LCscore")]
    pub scores: Vec<Vec<f64>>,
}

impl CaloParticleEvent {
    pub fn n_particles(&self) -> usize {
        self.energy.len()
    }

    pub fn validate(&self, event: &str) -> Result<(), InputError> {
        let expected = self.energy.len();
        let fields: [(&'static str, usize); 3] = [
            ("CaloParticleEta", self.eta.len()),
            ("CaloParticlePhi", self.phi.len()),
            ("CP2LCscore", self.scores.len()),
        ];
        for (field, found) in fields {
            if found != expected {
                return Err(InputError::ShapeMismatch {
                    event: event.to_string(),
                    field,
                    expected,
                    found,
                });
            }
        }
        Ok(())
    }
}

/// Reconstructed-cluster side of the association. The metrics only need the
/// event structure, so the payload is kept as raw JSON.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LayerClusterEvent {
    #[serde(flatten)]
    pub fields: BTreeMap<String, serde_json::Value>,
}
