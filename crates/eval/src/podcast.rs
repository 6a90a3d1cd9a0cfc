use serde::{Deserialize, Serialize};

use crate::normalize;

pub const DEFAULT_PODCAST_RUN_ID: &str = "demo-run";
const BASE_COST_USD: f64 = 0.03;
const COST_PER_HIGHLIGHT_USD: f64 = 0.008;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PodcastParams {
    pub latency_ms: f64,
    pub has_highlights: bool,
    pub estimated_cost_usd: f64,
    pub error_count: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PodcastScores {
    pub quality: u8,
    pub speed: u8,
    pub cost: u8,
    pub stability: u8,
}

pub fn evaluate_podcast(params: &PodcastParams) -> PodcastScores {
    PodcastScores {
        quality: normalize(if params.has_highlights { 85.0 } else { 35.0 }),
        speed: normalize(100.0 - params.latency_ms / 120.0),
        cost: normalize(100.0 - params.estimated_cost_usd * 250.0),
        stability: normalize(100.0 - params.error_count * 20.0),
    }
}

pub const PODCAST_NOTES: [&str; 2] = [
    "Podcast evaluation is heuristic and should be calibrated with human review.",
    "Use consistent sample sets for before/after prompt comparison.",
];

/// A run report as submitted by a caller. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodcastRun {
    #[serde(default)]
    pub run_id: Option<String>,
    #[serde(default)]
    pub latency_ms: Option<f64>,
    #[serde(default)]
    pub error_count: Option<f64>,
    #[serde(default)]
    pub has_highlights: Option<bool>,
    #[serde(default)]
    pub highlight_count: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PodcastMetrics {
    pub latency_ms: f64,
    pub error_count: f64,
    pub has_highlights: bool,
    pub highlight_count: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PodcastReport {
    pub run_id: String,
    pub metrics: PodcastMetrics,
    pub scores: PodcastScores,
    pub notes: Vec<String>,
}

fn non_negative(value: Option<f64>) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(0.0).max(0.0)
}

impl PodcastRun {
    /// Cost is estimated from the highlight count. `hasHighlights` defaults
    /// to whether any highlight was counted.
    pub fn evaluate(self) -> PodcastReport {
        let latency_ms = non_negative(self.latency_ms);
        let error_count = non_negative(self.error_count);
        let highlight_count = non_negative(self.highlight_count);
        let has_highlights = self.has_highlights.unwrap_or(highlight_count > 0.0);

        let scores = evaluate_podcast(&PodcastParams {
            latency_ms,
            has_highlights,
            estimated_cost_usd: BASE_COST_USD + highlight_count * COST_PER_HIGHLIGHT_USD,
            error_count,
        });

        PodcastReport {
            run_id: self
                .run_id
                .filter(|id| !id.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_PODCAST_RUN_ID.to_string()),
            metrics: PodcastMetrics {
                latency_ms,
                error_count,
                has_highlights,
                highlight_count,
            },
            scores,
            notes: PODCAST_NOTES.iter().map(|n| n.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scores_follow_formulas() {
        let scores = evaluate_podcast(&PodcastParams {
            latency_ms: 2400.0,
            has_highlights: true,
            estimated_cost_usd: 0.06,
            error_count: 1.0,
        });

        assert_eq!(
            scores,
            PodcastScores {
                quality: 85,
                speed: 80,
                cost: 85,
                stability: 80,
            }
        );
    }

    #[test]
    fn extreme_inputs_stay_in_range() {
        let scores = evaluate_podcast(&PodcastParams {
            latency_ms: 60_000.0,
            has_highlights: false,
            estimated_cost_usd: 10.0,
            error_count: 9.0,
        });

        assert_eq!(scores.quality, 35);
        assert_eq!(scores.speed, 0);
        assert_eq!(scores.cost, 0);
        assert_eq!(scores.stability, 0);
    }

    #[test]
    fn run_defaults() {
        let run: PodcastRun = serde_json::from_value(serde_json::json!({
            "latencyMs": -50,
            "highlightCount": 4
        }))
        .unwrap();
        let report = run.evaluate();

        assert_eq!(report.run_id, DEFAULT_PODCAST_RUN_ID);
        assert_eq!(report.metrics.latency_ms, 0.0);
        assert!(report.metrics.has_highlights);
        assert_eq!(report.scores.speed, 100);
        assert_eq!(report.scores.quality, 85);
        assert!(report.scores.cost < 100);
        assert_eq!(report.notes.len(), 2);
    }

    #[test]
    fn explicit_has_highlights_wins() {
        let run = PodcastRun {
            has_highlights: Some(false),
            highlight_count: Some(3.0),
            ..Default::default()
        };
        assert_eq!(run.evaluate().scores.quality, 35);
    }
}
