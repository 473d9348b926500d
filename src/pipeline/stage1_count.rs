use crate::input::{InputError, ParticleEvents};
use crate::model::{KinematicAxis, Metric, SCORE_THRESHOLD};

/// Attribute values of the particles selected for one kinematic axis.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AxisSelection {
    /// At least one score below threshold.
    pub purity: Vec<f64>,
    /// More than one score below threshold.
    pub duplicate: Vec<f64>,
    /// Every particle with at least one score.
    pub total: Vec<f64>,
}

impl AxisSelection {
    pub fn numerator(&self, metric: Metric) -> &[f64] {
        match metric {
            Metric::Purity => &self.purity,
            Metric::Duplicate => &self.duplicate,
        }
    }

    pub fn denominator(&self) -> &[f64] {
        &self.total
    }

    fn push(&mut self, value: f64, n_matched: usize) {
        self.total.push(value);
        if n_matched > 0 {
            self.purity.push(value);
            if n_matched > 1 {
                self.duplicate.push(value);
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParticleCounts {
    pub eta: AxisSelection,
    pub phi: AxisSelection,
    pub energy: AxisSelection,
}

impl ParticleCounts {
    pub fn axis(&self, axis: KinematicAxis) -> &AxisSelection {
        match axis {
            KinematicAxis::Eta => &self.eta,
            KinematicAxis::Phi => &self.phi,
            KinematicAxis::Energy => &self.energy,
        }
    }

    pub fn n_counted(&self) -> usize {
        self.eta.total.len()
    }
}

pub fn count_matched_scores(scores: &[f64]) -> usize {
    scores.iter().filter(|&&s| s < SCORE_THRESHOLD).count()
}

pub fn count_particles(events: &ParticleEvents) -> Result<ParticleCounts, InputError> {
    let mut counts = ParticleCounts::default();
    let mut skipped = 0usize;

    for entry in events.iter_ordered() {
        let (key, event) = entry?;
        event.validate(&key)?;
        for cp in 0..event.n_particles() {
            let scores = &event.scores[cp];
            if scores.is_empty() {
                skipped += 1;
                continue;
            }
            let n_matched = count_matched_scores(scores);
            counts.eta.push(event.eta[cp], n_matched);
            counts.phi.push(event.phi[cp], n_matched);
            counts.energy.push(event.energy[cp], n_matched);
        }
    }

    tracing::debug!(
        events = events.len(),
        counted = counts.n_counted(),
        skipped_unassociated = skipped,
        matched = counts.eta.purity.len(),
        duplicated = counts.eta.duplicate.len(),
        "counted calo particles"
    );

    Ok(counts)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_count.rs"]
mod tests;
