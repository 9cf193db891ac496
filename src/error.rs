use thiserror::Error;

use crate::ir::ChartKind;

/// Failures raised by the layout pass.
///
/// All of these are caller precondition violations: the engine refuses to
/// produce a layout from measurements it cannot trust.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("label {index}: {field} must be a finite, non-negative measurement (got {value})")]
    InvalidMeasurement {
        index: usize,
        field: &'static str,
        value: f32,
    },
    #[error("text {text:?}: {field} must be a finite, non-negative measurement (got {value})")]
    InvalidTextMeasurement {
        text: String,
        field: &'static str,
        value: f32,
    },
    #[error("label {text:?} measured zero width; measure only after the text is attached to a live surface")]
    ZeroWidthMeasurement { text: String },
    #[error("label stack ran past the level range starting at base level {base_level}")]
    LevelOverflow { base_level: i32 },
    #[error("chart has no rows")]
    EmptyChart,
    #[error("row {row:?} has {found} values, expected {expected}")]
    SeriesMismatch {
        row: String,
        expected: usize,
        found: usize,
    },
    #[error("row {row:?} contains a non-finite value")]
    NonFiniteValue { row: String },
    #[error("row {row:?} contains a negative value")]
    NegativeValue { row: String },
    #[error("{kind:?} charts draw a single series, got {found}")]
    UnsupportedSeriesCount { kind: ChartKind, found: usize },
}
