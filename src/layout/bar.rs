use crate::config::ChartConfig;
use crate::ir::{ChartKind, ChartSpec};
use crate::theme::Theme;

use super::{format_value, BarLayout, PendingLabel, PlotArea};

/// A bar in value space. Pixels on the vertical axis are assigned once the
/// plot top is known, which depends on how deep the labels stack.
#[derive(Debug, Clone)]
pub(super) struct BarColumn {
    pub row: usize,
    pub series: usize,
    pub x: f32,
    pub width: f32,
    pub start: f32,
    pub end: f32,
    pub color: String,
}

#[derive(Debug, Clone)]
pub(super) struct BarGeometry {
    pub columns: Vec<BarColumn>,
    pub labels: Vec<PendingLabel>,
    pub band_centers: Vec<f32>,
    pub max_value: f32,
}

pub(super) fn bar_geometry(
    spec: &ChartSpec,
    theme: &Theme,
    config: &ChartConfig,
    plot_x: f32,
    plot_width: f32,
) -> BarGeometry {
    let rows = spec.rows.len().max(1);
    let band = plot_width / rows as f32;
    let inner = band * (1.0 - config.bar_padding);
    let series_count = spec.series_count();

    let mut columns = Vec::new();
    let mut labels = Vec::new();
    let mut band_centers = Vec::with_capacity(spec.rows.len());

    for (row_idx, row) in spec.rows.iter().enumerate() {
        let band_x = plot_x + row_idx as f32 * band + (band - inner) / 2.0;
        let center = band_x + inner / 2.0;
        band_centers.push(center);

        match spec.kind {
            ChartKind::Stacked => {
                let mut cursor = 0.0_f32;
                for (series_idx, &value) in row.values.iter().enumerate() {
                    columns.push(BarColumn {
                        row: row_idx,
                        series: series_idx,
                        x: band_x,
                        width: inner,
                        start: cursor,
                        end: cursor + value,
                        color: theme.series_color(series_idx),
                    });
                    cursor += value;
                }
                labels.push(PendingLabel {
                    text: format_value(cursor),
                    anchor_x: center,
                    value: cursor,
                });
            }
            ChartKind::Grouped => {
                let slot = inner / series_count as f32;
                let bar_width = slot * (1.0 - config.group_padding);
                for (series_idx, &value) in row.values.iter().enumerate() {
                    let x = band_x + series_idx as f32 * slot + (slot - bar_width) / 2.0;
                    columns.push(BarColumn {
                        row: row_idx,
                        series: series_idx,
                        x,
                        width: bar_width,
                        start: 0.0,
                        end: value,
                        color: theme.series_color(series_idx),
                    });
                    labels.push(PendingLabel {
                        text: format_value(value),
                        anchor_x: x + bar_width / 2.0,
                        value,
                    });
                }
            }
            ChartKind::Bar | ChartKind::Custom => {
                let value = row.values.first().copied().unwrap_or(0.0);
                columns.push(BarColumn {
                    row: row_idx,
                    series: 0,
                    x: band_x,
                    width: inner,
                    start: 0.0,
                    end: value,
                    color: theme.series_color(0),
                });
                labels.push(PendingLabel {
                    text: format_value(value),
                    anchor_x: center,
                    value,
                });
            }
        }
    }

    let max_value = columns.iter().map(|column| column.end).fold(0.0, f32::max);
    BarGeometry {
        columns,
        labels,
        band_centers,
        max_value: if max_value > 0.0 { max_value } else { 1.0 },
    }
}

pub(super) fn value_to_y(value: f32, max_value: f32, plot: &PlotArea) -> f32 {
    plot.bottom() - value / max_value * plot.height
}

pub(super) fn place_bars(geometry: &BarGeometry, plot: &PlotArea) -> Vec<BarLayout> {
    geometry
        .columns
        .iter()
        .map(|column| {
            let top = value_to_y(column.end, geometry.max_value, plot);
            let bottom = value_to_y(column.start, geometry.max_value, plot);
            BarLayout {
                row: column.row,
                series: column.series,
                x: column.x,
                y: top,
                width: column.width,
                height: (bottom - top).max(0.0),
                value: column.end - column.start,
                color: column.color.clone(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::ChartRow;

    fn spec(kind: ChartKind, series: &[&str], rows: &[(&str, &[f32])]) -> ChartSpec {
        ChartSpec {
            kind,
            title: None,
            series: series.iter().map(|s| s.to_string()).collect(),
            rows: rows
                .iter()
                .map(|(label, values)| ChartRow {
                    label: label.to_string(),
                    values: values.to_vec(),
                })
                .collect(),
        }
    }

    fn config() -> ChartConfig {
        ChartConfig {
            bar_padding: 0.2,
            group_padding: 0.0,
            ..ChartConfig::default()
        }
    }

    #[test]
    fn single_bars_fill_padded_bands() {
        let spec = spec(ChartKind::Bar, &[], &[("A", &[10.0]), ("B", &[20.0])]);
        let geometry = bar_geometry(&spec, &Theme::default(), &config(), 0.0, 200.0);
        assert_eq!(geometry.columns.len(), 2);
        assert_eq!(geometry.columns[0].x, 10.0);
        assert_eq!(geometry.columns[0].width, 80.0);
        assert_eq!(geometry.band_centers, vec![50.0, 150.0]);
        assert_eq!(geometry.max_value, 20.0);
        assert_eq!(geometry.labels[1].text, "20");
    }

    #[test]
    fn stacked_bars_label_the_total() {
        let spec = spec(
            ChartKind::Stacked,
            &["yes", "no"],
            &[("Q1", &[30.0, 20.5]), ("Q2", &[10.0, 5.0])],
        );
        let geometry = bar_geometry(&spec, &Theme::default(), &config(), 0.0, 200.0);
        assert_eq!(geometry.columns.len(), 4);
        assert_eq!(geometry.columns[1].start, 30.0);
        assert_eq!(geometry.columns[1].end, 50.5);
        assert_eq!(geometry.labels.len(), 2);
        assert_eq!(geometry.labels[0].text, "50.50");
        assert_eq!(geometry.max_value, 50.5);
    }

    #[test]
    fn grouped_labels_follow_bars_left_to_right() {
        let spec = spec(
            ChartKind::Grouped,
            &["a", "b"],
            &[("Q1", &[1.0, 2.0]), ("Q2", &[3.0, 4.0])],
        );
        let geometry = bar_geometry(&spec, &Theme::default(), &config(), 0.0, 200.0);
        let anchors: Vec<f32> = geometry.labels.iter().map(|l| l.anchor_x).collect();
        assert_eq!(anchors, vec![30.0, 70.0, 130.0, 170.0]);
        assert_ne!(geometry.columns[0].color, geometry.columns[1].color);
    }

    #[test]
    fn all_zero_values_keep_a_unit_scale() {
        let spec = spec(ChartKind::Bar, &[], &[("A", &[0.0])]);
        let geometry = bar_geometry(&spec, &Theme::default(), &config(), 0.0, 100.0);
        assert_eq!(geometry.max_value, 1.0);
    }

    #[test]
    fn bars_map_values_onto_plot_height() {
        let spec = spec(ChartKind::Bar, &[], &[("A", &[5.0]), ("B", &[10.0])]);
        let geometry = bar_geometry(&spec, &Theme::default(), &config(), 0.0, 100.0);
        let plot = PlotArea {
            x: 0.0,
            y: 20.0,
            width: 100.0,
            height: 100.0,
        };
        let bars = place_bars(&geometry, &plot);
        assert_eq!(bars[0].y, 70.0);
        assert_eq!(bars[0].height, 50.0);
        assert_eq!(bars[1].y, 20.0);
    }
}
