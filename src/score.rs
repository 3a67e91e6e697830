//! Sustainability score over the placed parts of a scene.

use crate::catalog::{ComponentKind, MaterialKind};

/// CO2 total (kg) that maps to a CO2 sub-score of zero
pub const MAX_CO2: f64 = 50.0;

const CO2_WEIGHT: f64 = 0.5;
const RECYCLABILITY_WEIGHT: f64 = 0.3;
const DURABILITY_WEIGHT: f64 = 0.2;

#[derive(Debug, Clone, PartialEq)]
pub struct PartScore {
    pub component: ComponentKind,
    pub material: MaterialKind,
    pub co2: f64,
    pub recyclability: f64,
    pub durability: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreResult {
    pub total_co2: f64,
    /// 0 (worst) to 100 (best)
    pub overall_score: f64,
    pub per_part: Vec<PartScore>,
}

/// Scores a list of `(component, material)` pairs such as
/// [`SceneStore::placed_parts`](crate::scene::SceneStore::placed_parts)
pub fn compute(parts: &[(ComponentKind, MaterialKind)]) -> ScoreResult {
    if parts.is_empty() {
        return ScoreResult {
            total_co2: 0.0,
            overall_score: 0.0,
            per_part: Vec::new(),
        };
    }

    let per_part: Vec<PartScore> = parts
        .iter()
        .map(|&(component, material)| {
            let props = material.properties();
            let mass = component.volume_factor() * props.density;
            PartScore {
                component,
                material,
                co2: mass * props.co2_per_kg,
                recyclability: props.recyclability,
                durability: props.durability,
            }
        })
        .collect();

    let n = per_part.len() as f64;
    let total_co2: f64 = per_part.iter().map(|p| p.co2).sum();
    let avg_recyclability = per_part.iter().map(|p| p.recyclability).sum::<f64>() / n;
    let avg_durability = per_part.iter().map(|p| p.durability).sum::<f64>() / n;

    let co2_score = 1.0 - (total_co2 / MAX_CO2).clamp(0.0, 1.0);
    let overall = CO2_WEIGHT * co2_score
        + RECYCLABILITY_WEIGHT * avg_recyclability / 10.0
        + DURABILITY_WEIGHT * avg_durability / 10.0;

    ScoreResult {
        total_co2,
        overall_score: overall * 100.0,
        per_part,
    }
}

/// Feedback line for a score change; `None` when there is nothing to say
pub fn hint(previous: Option<&ScoreResult>, current: &ScoreResult) -> Option<&'static str> {
    let Some(previous) = previous else {
        return Some("Try changing one material and watch the score react!");
    };

    let delta = current.overall_score - previous.overall_score;
    if delta > 5.0 {
        Some("Nice! Your build just became more sustainable.")
    } else if delta < -5.0 {
        Some("Your CO2 footprint increased. Can you swap one part to wood or cardboard?")
    } else if current.overall_score < 40.0 {
        Some("Your score is quite low. Start with the frame, it uses the most material.")
    } else if current.overall_score > 80.0 {
        Some("Awesome! A very green build. Can you keep it this high while experimenting?")
    } else {
        None
    }
}
