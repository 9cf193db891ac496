use crate::config::ChartConfig;
use crate::ir::ChartSpec;
use crate::theme::Theme;

use super::{format_value, PendingLabel, ShapeLayout};

/// Horizontal placement of one shape per row; `y` is filled in later.
pub(super) fn shape_row(
    spec: &ChartSpec,
    theme: &Theme,
    config: &ChartConfig,
    plot_x: f32,
    plot_width: f32,
) -> (Vec<ShapeLayout>, Vec<PendingLabel>) {
    let rows = spec.rows.len().max(1);
    let band = plot_width / rows as f32;
    let size = config.shape_size.min(band * (1.0 - config.bar_padding)).max(1.0);
    let max_value = spec
        .rows
        .iter()
        .filter_map(|row| row.values.first().copied())
        .fold(0.0_f32, f32::max);
    let max_value = if max_value > 0.0 { max_value } else { 1.0 };

    let mut shapes = Vec::with_capacity(spec.rows.len());
    let mut labels = Vec::with_capacity(spec.rows.len());
    for (row_idx, row) in spec.rows.iter().enumerate() {
        let value = row.values.first().copied().unwrap_or(0.0);
        let center = plot_x + (row_idx as f32 + 0.5) * band;
        shapes.push(ShapeLayout {
            row: row_idx,
            x: center - size / 2.0,
            y: 0.0,
            size,
            fill_ratio: value / max_value,
            value,
            color: theme.series_color(row_idx),
        });
        labels.push(PendingLabel {
            text: format_value(value),
            anchor_x: center,
            value,
        });
    }
    (shapes, labels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{ChartKind, ChartRow};

    #[test]
    fn shapes_are_centered_in_bands_and_capped() {
        let spec = ChartSpec {
            kind: ChartKind::Custom,
            title: None,
            series: Vec::new(),
            rows: ["a", "b", "c", "d"]
                .iter()
                .enumerate()
                .map(|(idx, label)| ChartRow {
                    label: label.to_string(),
                    values: vec![idx as f32 * 10.0],
                })
                .collect(),
        };
        let config = ChartConfig {
            shape_size: 48.0,
            bar_padding: 0.5,
            ..ChartConfig::default()
        };
        let (shapes, labels) = shape_row(&spec, &Theme::default(), &config, 0.0, 200.0);
        assert_eq!(shapes[0].size, 25.0);
        assert_eq!(shapes[1].x, 75.0 - 12.5);
        assert_eq!(shapes[3].fill_ratio, 1.0);
        assert_eq!(shapes[0].fill_ratio, 0.0);
        assert_eq!(labels[2].text, "20");
        assert_eq!(labels[2].anchor_x, 125.0);
    }
}
