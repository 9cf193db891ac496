use serde::{Deserialize, Serialize};

use crate::error::LayoutError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    /// One bar per row, value label above it.
    Bar,
    /// Series segments stacked per row, total label above the stack.
    Stacked,
    /// One bar per series side by side, a label above each bar.
    Grouped,
    /// Fixed-size shapes per row, value label below each shape.
    Custom,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartRow {
    pub label: String,
    pub values: Vec<f32>,
}

/// Parsed chart data plus the options a chart call carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    #[serde(default)]
    pub title: Option<String>,
    /// Series names; empty for single-series charts.
    #[serde(default)]
    pub series: Vec<String>,
    pub rows: Vec<ChartRow>,
}

impl ChartSpec {
    pub fn from_json(input: &str) -> anyhow::Result<Self> {
        let spec: ChartSpec = serde_json::from_str(input)?;
        spec.validate()?;
        Ok(spec)
    }

    pub fn series_count(&self) -> usize {
        self.series.len().max(1)
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.rows.is_empty() {
            return Err(LayoutError::EmptyChart);
        }
        if matches!(self.kind, ChartKind::Bar | ChartKind::Custom) && self.series.len() > 1 {
            return Err(LayoutError::UnsupportedSeriesCount {
                kind: self.kind,
                found: self.series.len(),
            });
        }
        let expected = self.series_count();
        for row in &self.rows {
            if row.values.len() != expected {
                return Err(LayoutError::SeriesMismatch {
                    row: row.label.clone(),
                    expected,
                    found: row.values.len(),
                });
            }
            if row.values.iter().any(|value| !value.is_finite()) {
                return Err(LayoutError::NonFiniteValue {
                    row: row.label.clone(),
                });
            }
            if row.values.iter().any(|value| *value < 0.0) {
                return Err(LayoutError::NegativeValue {
                    row: row.label.clone(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_grouped_chart() {
        let spec = ChartSpec::from_json(
            r#"{
                "kind": "grouped",
                "title": "Satisfaction",
                "series": ["2023", "2024"],
                "rows": [
                    {"label": "Agree", "values": [40, 52]},
                    {"label": "Disagree", "values": [60, 48]}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(spec.kind, ChartKind::Grouped);
        assert_eq!(spec.series_count(), 2);
        assert_eq!(spec.rows[1].values, vec![60.0, 48.0]);
    }

    #[test]
    fn single_series_needs_one_value_per_row() {
        let spec = ChartSpec {
            kind: ChartKind::Bar,
            title: None,
            series: Vec::new(),
            rows: vec![ChartRow {
                label: "Yes".to_string(),
                values: vec![1.0, 2.0],
            }],
        };
        assert_eq!(
            spec.validate(),
            Err(LayoutError::SeriesMismatch {
                row: "Yes".to_string(),
                expected: 1,
                found: 2,
            })
        );
    }

    #[test]
    fn empty_rows_are_rejected() {
        assert!(ChartSpec::from_json(r#"{"kind": "bar", "rows": []}"#).is_err());
    }

    #[test]
    fn non_finite_values_are_rejected() {
        let spec = ChartSpec {
            kind: ChartKind::Custom,
            title: None,
            series: Vec::new(),
            rows: vec![ChartRow {
                label: "No".to_string(),
                values: vec![f32::INFINITY],
            }],
        };
        assert!(matches!(spec.validate(), Err(LayoutError::NonFiniteValue { .. })));
    }

    #[test]
    fn negative_values_are_rejected() {
        let err = ChartSpec::from_json(
            r#"{"kind": "bar", "rows": [
                {"label": "net", "values": [-12.5]},
                {"label": "gross", "values": [30]}
            ]}"#,
        )
        .unwrap_err();
        assert_eq!(
            err.downcast_ref::<LayoutError>(),
            Some(&LayoutError::NegativeValue {
                row: "net".to_string()
            })
        );
    }

    #[test]
    fn single_series_kinds_reject_extra_series() {
        for kind in [ChartKind::Bar, ChartKind::Custom] {
            let spec = ChartSpec {
                kind,
                title: None,
                series: vec!["2023".to_string(), "2024".to_string()],
                rows: vec![ChartRow {
                    label: "Yes".to_string(),
                    values: vec![10.0, 99.0],
                }],
            };
            assert_eq!(
                spec.validate(),
                Err(LayoutError::UnsupportedSeriesCount { kind, found: 2 })
            );
        }
    }

    #[test]
    fn single_named_series_is_allowed_on_bar_charts() {
        let spec = ChartSpec {
            kind: ChartKind::Bar,
            title: None,
            series: vec!["2024".to_string()],
            rows: vec![ChartRow {
                label: "Yes".to_string(),
                values: vec![10.0],
            }],
        };
        assert!(spec.validate().is_ok());
    }
}
