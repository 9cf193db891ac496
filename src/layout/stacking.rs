// Label stacking: resolves horizontal overlap between neighbouring value
// labels into vertical stack levels. Pure geometry over measured extents,
// shared by every chart kind.

use serde::{Deserialize, Serialize};

use crate::config::StackingConfig;
use crate::error::LayoutError;

/// Which way stacked labels move away from the plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StackDirection {
    /// Labels sit above bars; levels grow positive.
    Up,
    /// Labels sit below shapes; levels grow negative.
    Down,
}

impl StackDirection {
    pub fn step(self) -> i32 {
        match self {
            StackDirection::Up => 1,
            StackDirection::Down => -1,
        }
    }
}

/// A label measured at its default (unstacked) slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelCandidate {
    /// Where the connector line originates (bar or shape center).
    pub anchor_x: f32,
    pub measured_left: f32,
    pub measured_width: f32,
}

impl LabelCandidate {
    /// Candidate centered on `anchor_x`.
    pub fn centered(anchor_x: f32, measured_width: f32) -> Self {
        Self {
            anchor_x,
            measured_left: anchor_x - measured_width / 2.0,
            measured_width,
        }
    }

    fn right_edge(&self, gap: f32) -> f32 {
        self.measured_left + self.measured_width + gap
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LabelPlacement {
    pub level: i32,
    pub resolved_left: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelStacker {
    pub gap: f32,
    pub base_level: i32,
    pub direction: StackDirection,
}

impl LabelStacker {
    pub fn new(gap: f32, base_level: i32, direction: StackDirection) -> Self {
        Self {
            gap,
            base_level,
            direction,
        }
    }

    pub fn from_config(config: &StackingConfig, direction: StackDirection) -> Self {
        Self::new(config.label_gap, config.base_level, direction)
    }

    pub fn resolve_levels(&self, candidates: &[LabelCandidate]) -> Result<Vec<i32>, LayoutError> {
        Ok(self
            .resolve_placements(candidates)?
            .into_iter()
            .map(|placement| placement.level)
            .collect())
    }

    /// Resolves levels right to left: whether label `i` moves depends on
    /// whether `i + 1` already had to.
    pub fn resolve_placements(
        &self,
        candidates: &[LabelCandidate],
    ) -> Result<Vec<LabelPlacement>, LayoutError> {
        validate_candidates(candidates)?;
        let Some(last) = candidates.len().checked_sub(1) else {
            return Ok(Vec::new());
        };

        let mut resolved_left: Vec<f32> = candidates.iter().map(|c| c.measured_left).collect();
        let mut levels = vec![self.base_level; candidates.len()];
        let step = self.direction.step();

        for idx in (0..last).rev() {
            let right_edge = candidates[idx].right_edge(self.gap);
            if right_edge > resolved_left[idx + 1] {
                resolved_left[idx + 1] = right_edge;
                levels[idx] = levels[idx + 1].checked_add(step).ok_or(
                    LayoutError::LevelOverflow {
                        base_level: self.base_level,
                    },
                )?;
            } else {
                levels[idx] = self.base_level;
            }
        }

        let max_depth = levels
            .iter()
            .map(|level| self.depth(*level))
            .max()
            .unwrap_or(0);
        tracing::debug!(
            labels = candidates.len(),
            max_depth,
            gap = self.gap,
            "resolved label stack levels"
        );

        Ok(levels
            .into_iter()
            .zip(resolved_left)
            .map(|(level, resolved_left)| LabelPlacement {
                level,
                resolved_left,
            })
            .collect())
    }

    /// Distance of `level` from the baseline, in rows.
    pub fn depth(&self, level: i32) -> u32 {
        level.abs_diff(self.base_level)
    }

    /// Extra extent the container reserves so the deepest label is not
    /// clipped. No labels reserve nothing.
    pub fn reserved_extent(&self, levels: &[i32], unit_step: f32) -> f32 {
        let Some(max_depth) = levels.iter().map(|level| self.depth(*level)).max() else {
            return 0.0;
        };
        let unit_step = if unit_step.is_finite() {
            unit_step.max(0.0)
        } else {
            0.0
        };
        unit_step * (max_depth as f32 + 1.0)
    }
}

fn validate_candidates(candidates: &[LabelCandidate]) -> Result<(), LayoutError> {
    for (index, candidate) in candidates.iter().enumerate() {
        let fields = [
            ("anchor_x", candidate.anchor_x),
            ("measured_left", candidate.measured_left),
            ("measured_width", candidate.measured_width),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(LayoutError::InvalidMeasurement {
                    index,
                    field,
                    value,
                });
            }
        }
        if candidate.measured_width < 0.0 {
            return Err(LayoutError::InvalidMeasurement {
                index,
                field: "measured_width",
                value: candidate.measured_width,
            });
        }
    }
    Ok(())
}
