// Legend sizing: a single row when every entry fits the container, one entry
// per row otherwise. No wrapping in between.

use serde::{Deserialize, Serialize};

use crate::config::LegendConfig;

use super::{LegendItemLayout, LegendLayout, TextBlock};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendOrientation {
    Horizontal,
    Vertical,
}

pub fn legend_row_width(text_widths: &[f32], config: &LegendConfig) -> f32 {
    if text_widths.is_empty() {
        return 0.0;
    }
    let count = text_widths.len() as f32;
    let text_total: f32 = text_widths.iter().sum();
    text_total
        + count * (config.swatch_width + config.swatch_gap)
        + (count - 1.0) * config.swatch_right_margin
}

pub fn choose_orientation(
    text_widths: &[f32],
    available_width: f32,
    config: &LegendConfig,
) -> LegendOrientation {
    let required = legend_row_width(text_widths, config);
    let orientation = if required > available_width {
        LegendOrientation::Vertical
    } else {
        LegendOrientation::Horizontal
    };
    tracing::debug!(
        entries = text_widths.len(),
        required,
        available_width,
        ?orientation,
        "chose legend orientation"
    );
    orientation
}

pub fn legend_height(count: usize, orientation: LegendOrientation, config: &LegendConfig) -> f32 {
    if count == 0 {
        return 0.0;
    }
    match orientation {
        LegendOrientation::Horizontal => config.swatch_height + config.below_margin,
        LegendOrientation::Vertical => {
            let rows = count as f32;
            rows * config.swatch_height + (rows - 1.0) * config.inter_row_gap + config.below_margin
        }
    }
}

/// Places swatches and labels starting at `origin` (top-left).
pub(crate) fn layout_legend(
    entries: Vec<(TextBlock, String)>,
    origin: (f32, f32),
    available_width: f32,
    config: &LegendConfig,
) -> LegendLayout {
    let widths: Vec<f32> = entries.iter().map(|(label, _)| label.width).collect();
    let orientation = choose_orientation(&widths, available_width, config);
    let height = legend_height(entries.len(), orientation, config);
    let width = match orientation {
        LegendOrientation::Horizontal => legend_row_width(&widths, config),
        LegendOrientation::Vertical => widths
            .iter()
            .map(|w| w + config.swatch_width + config.swatch_gap)
            .fold(0.0, f32::max),
    };

    let (origin_x, origin_y) = origin;
    let mut cursor_x = origin_x;
    let mut items = Vec::with_capacity(entries.len());
    for (idx, (label, color)) in entries.into_iter().enumerate() {
        let (swatch_x, swatch_y) = match orientation {
            LegendOrientation::Horizontal => (cursor_x, origin_y),
            LegendOrientation::Vertical => (
                origin_x,
                origin_y + idx as f32 * (config.swatch_height + config.inter_row_gap),
            ),
        };
        cursor_x += label.width + config.swatch_width + config.swatch_gap + config.swatch_right_margin;
        items.push(LegendItemLayout {
            swatch_x,
            swatch_y,
            swatch_width: config.swatch_width,
            swatch_height: config.swatch_height,
            label_x: swatch_x + config.swatch_width + config.swatch_gap,
            label_y: swatch_y + config.swatch_height / 2.0,
            label,
            color,
        });
    }

    LegendLayout {
        orientation,
        x: origin_x,
        y: origin_y,
        width,
        height,
        items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn survey_legend() -> LegendConfig {
        LegendConfig {
            swatch_width: 32.0,
            swatch_height: 24.0,
            swatch_gap: 12.0,
            swatch_right_margin: 24.0,
            inter_row_gap: 8.0,
            below_margin: 16.0,
        }
    }

    fn block(width: f32) -> TextBlock {
        TextBlock {
            text: "x".to_string(),
            width,
            height: 14.0,
        }
    }

    #[test]
    fn row_width_sums_text_swatches_and_margins() {
        assert_eq!(legend_row_width(&[80.0, 95.0, 70.0], &survey_legend()), 425.0);
    }

    #[test]
    fn wide_legend_switches_to_vertical() {
        let config = survey_legend();
        let widths = [80.0, 95.0, 70.0];
        let orientation = choose_orientation(&widths, 300.0, &config);
        assert_eq!(orientation, LegendOrientation::Vertical);
        assert_eq!(legend_height(widths.len(), orientation, &config), 104.0);
    }

    #[test]
    fn narrow_legend_stays_horizontal() {
        let config = survey_legend();
        let orientation = choose_orientation(&[80.0, 95.0, 70.0], 425.0, &config);
        assert_eq!(orientation, LegendOrientation::Horizontal);
        assert_eq!(legend_height(3, orientation, &config), 40.0);
    }

    #[test]
    fn empty_legend_takes_no_space() {
        let config = survey_legend();
        assert_eq!(legend_row_width(&[], &config), 0.0);
        assert_eq!(legend_height(0, LegendOrientation::Vertical, &config), 0.0);
    }

    #[test]
    fn horizontal_items_advance_along_the_row() {
        let entries = vec![
            (block(50.0), "#111".to_string()),
            (block(30.0), "#222".to_string()),
        ];
        let legend = layout_legend(entries, (10.0, 20.0), 1000.0, &survey_legend());
        assert_eq!(legend.orientation, LegendOrientation::Horizontal);
        assert_eq!(legend.items[0].swatch_x, 10.0);
        assert_eq!(legend.items[1].swatch_x, 10.0 + 50.0 + 32.0 + 12.0 + 24.0);
        assert!(legend.items.iter().all(|item| item.swatch_y == 20.0));
        assert_eq!(legend.width, 50.0 + 30.0 + 2.0 * 44.0 + 24.0);
    }

    #[test]
    fn vertical_items_stack_rows() {
        let entries = vec![
            (block(80.0), "#111".to_string()),
            (block(95.0), "#222".to_string()),
            (block(70.0), "#333".to_string()),
        ];
        let legend = layout_legend(entries, (0.0, 0.0), 300.0, &survey_legend());
        assert_eq!(legend.orientation, LegendOrientation::Vertical);
        let ys: Vec<f32> = legend.items.iter().map(|item| item.swatch_y).collect();
        assert_eq!(ys, vec![0.0, 32.0, 64.0]);
        assert_eq!(legend.height, 104.0);
        assert_eq!(legend.width, 95.0 + 44.0);
        assert_eq!(legend.items[1].label_x, 44.0);
    }
}
