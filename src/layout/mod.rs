mod bar;
mod custom;
pub mod legend;
pub mod stacking;
pub(crate) mod types;
pub use types::*;

use bar::{bar_geometry, place_bars, value_to_y};
use custom::shape_row;
use legend::layout_legend;
use stacking::{LabelCandidate, LabelStacker, StackDirection};

use crate::config::LayoutConfig;
use crate::error::LayoutError;
use crate::ir::{ChartKind, ChartSpec};
use crate::measure::{TextMeasurer, TextStyle};
use crate::theme::Theme;

const CATEGORY_LABEL_GAP: f32 = 6.0;

/// A value label before measurement.
#[derive(Debug, Clone)]
pub(crate) struct PendingLabel {
    pub text: String,
    pub anchor_x: f32,
    pub value: f32,
}

pub(crate) fn format_value(value: f32) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if (rounded - rounded.round()).abs() < 0.001 {
        format!("{:.0}", rounded)
    } else {
        format!("{:.2}", rounded)
    }
}

/// Measures one line of text, rejecting non-finite or negative boxes and a
/// zero width for visible text.
pub(crate) fn measure_block(
    text: &str,
    style: &TextStyle,
    measurer: &dyn TextMeasurer,
) -> Result<TextBlock, LayoutError> {
    let measured = measurer.measure(text, style);
    for (field, value) in [("width", measured.width), ("height", measured.height)] {
        if !value.is_finite() || value < 0.0 {
            return Err(LayoutError::InvalidTextMeasurement {
                text: text.to_string(),
                field,
                value,
            });
        }
    }
    if !text.trim().is_empty() && measured.width <= 0.0 {
        return Err(LayoutError::ZeroWidthMeasurement {
            text: text.to_string(),
        });
    }
    Ok(TextBlock {
        text: text.to_string(),
        width: measured.width,
        height: measured.height,
    })
}

/// Lays out one chart in a single pass: measure, pick the legend
/// orientation, place marks, stack value labels, then size the container.
pub fn compute_chart_layout(
    spec: &ChartSpec,
    measurer: &dyn TextMeasurer,
    theme: &Theme,
    config: &LayoutConfig,
) -> Result<ChartLayout, LayoutError> {
    spec.validate()?;
    let chart_cfg = &config.chart;
    let width = chart_cfg.width.max(1.0);
    let plot_x = chart_cfg.margin_left;
    let plot_width = (width - chart_cfg.margin_left - chart_cfg.margin_right).max(1.0);
    let mut cursor_y = chart_cfg.margin_top;

    let title_style = TextStyle::new(theme.font_family.as_str(), theme.title_font_size);
    let legend_style = TextStyle::new(theme.font_family.as_str(), theme.legend_font_size);
    let label_style = TextStyle::new(theme.font_family.as_str(), theme.label_font_size);

    let title = match spec.title.as_deref().filter(|t| !t.trim().is_empty()) {
        Some(text) => {
            let block = measure_block(text, &title_style, measurer)?;
            let layout = TitleLayout {
                x: width / 2.0,
                y: cursor_y,
                text: block,
            };
            cursor_y += layout.text.height + chart_cfg.title_gap;
            Some(layout)
        }
        None => None,
    };

    let legend = if spec.series.len() > 1 {
        let entries = spec
            .series
            .iter()
            .enumerate()
            .map(|(idx, name)| Ok((measure_block(name, &legend_style, measurer)?, theme.series_color(idx))))
            .collect::<Result<Vec<_>, LayoutError>>()?;
        let legend = layout_legend(entries, (plot_x, cursor_y), plot_width, &config.legend);
        cursor_y += legend.height;
        Some(legend)
    } else {
        None
    };

    let categories = spec
        .rows
        .iter()
        .map(|row| measure_block(&row.label, &label_style, measurer))
        .collect::<Result<Vec<_>, LayoutError>>()?;
    let category_row_height = categories
        .iter()
        .map(|block| block.height)
        .fold(0.0, f32::max)
        + CATEGORY_LABEL_GAP;

    let direction = match spec.kind {
        ChartKind::Custom => StackDirection::Down,
        ChartKind::Bar | ChartKind::Stacked | ChartKind::Grouped => StackDirection::Up,
    };
    let stacker = LabelStacker::from_config(&config.stacking, direction);
    let unit_step = config.stacking.unit_step;

    let mut layout = match spec.kind {
        ChartKind::Custom => {
            let (mut shapes, pending) = shape_row(spec, theme, chart_cfg, plot_x, plot_width);
            let (blocks, candidates) = measure_labels(&pending, &label_style, measurer)?;
            let placements = stacker.resolve_placements(&candidates)?;
            let levels: Vec<i32> = placements.iter().map(|p| p.level).collect();
            let reserved_extent = stacker.reserved_extent(&levels, unit_step);

            let category_y = cursor_y;
            let shape_size = shapes.first().map(|shape| shape.size).unwrap_or(0.0);
            let plot = PlotArea {
                x: plot_x,
                y: cursor_y + category_row_height,
                width: plot_width,
                height: shape_size,
            };
            for shape in &mut shapes {
                shape.y = plot.y;
            }

            let labels = blocks
                .into_iter()
                .zip(candidates.iter().zip(&placements))
                .map(|(text, (candidate, placement))| {
                    let depth = stacker.depth(placement.level) as f32;
                    let y = plot.bottom() + unit_step * depth;
                    let x = placement.resolved_left;
                    let connector = [
                        (candidate.anchor_x, plot.bottom()),
                        (x + text.width / 2.0, y),
                    ];
                    ValueLabelLayout {
                        anchor_x: candidate.anchor_x,
                        level: placement.level,
                        x,
                        y,
                        connector,
                        connector_color: theme.line_color.clone(),
                        text,
                    }
                })
                .collect();

            let category_layouts = category_layouts(categories, &shapes_centers(&shapes), category_y);
            ChartLayout {
                kind: spec.kind,
                width,
                height: plot.bottom() + reserved_extent + chart_cfg.margin_bottom,
                direction,
                reserved_extent,
                plot,
                title,
                legend,
                bars: Vec::new(),
                shapes,
                labels,
                categories: category_layouts,
            }
        }
        ChartKind::Bar | ChartKind::Stacked | ChartKind::Grouped => {
            let geometry = bar_geometry(spec, theme, chart_cfg, plot_x, plot_width);
            let (blocks, candidates) = measure_labels(&geometry.labels, &label_style, measurer)?;
            let placements = stacker.resolve_placements(&candidates)?;
            let levels: Vec<i32> = placements.iter().map(|p| p.level).collect();
            let reserved_extent = stacker.reserved_extent(&levels, unit_step);

            let plot = PlotArea {
                x: plot_x,
                y: cursor_y + reserved_extent,
                width: plot_width,
                height: chart_cfg.plot_height.max(1.0),
            };
            let bars = place_bars(&geometry, &plot);

            let labels = blocks
                .into_iter()
                .zip(candidates.iter().zip(&placements))
                .zip(&geometry.labels)
                .map(|((text, (candidate, placement)), pending)| {
                    let depth = stacker.depth(placement.level) as f32;
                    let y = plot.y - unit_step * (depth + 1.0);
                    let x = placement.resolved_left;
                    let connector = [
                        (candidate.anchor_x, value_to_y(pending.value, geometry.max_value, &plot)),
                        (x + text.width / 2.0, y + unit_step),
                    ];
                    ValueLabelLayout {
                        anchor_x: candidate.anchor_x,
                        level: placement.level,
                        x,
                        y,
                        connector,
                        connector_color: theme.line_color.clone(),
                        text,
                    }
                })
                .collect();

            let category_y = plot.bottom() + CATEGORY_LABEL_GAP;
            let category_layouts = category_layouts(categories, &geometry.band_centers, category_y);
            ChartLayout {
                kind: spec.kind,
                width,
                height: plot.bottom() + category_row_height + chart_cfg.margin_bottom,
                direction,
                reserved_extent,
                plot,
                title,
                legend,
                bars,
                shapes: Vec::new(),
                labels,
                categories: category_layouts,
            }
        }
    };

    layout.height = layout.height.ceil();
    tracing::debug!(
        kind = ?layout.kind,
        width = layout.width,
        height = layout.height,
        reserved_extent = layout.reserved_extent,
        "computed chart layout"
    );
    Ok(layout)
}

fn measure_labels(
    pending: &[PendingLabel],
    style: &TextStyle,
    measurer: &dyn TextMeasurer,
) -> Result<(Vec<TextBlock>, Vec<LabelCandidate>), LayoutError> {
    let mut blocks = Vec::with_capacity(pending.len());
    let mut candidates = Vec::with_capacity(pending.len());
    for label in pending {
        let block = measure_block(&label.text, style, measurer)?;
        candidates.push(LabelCandidate::centered(label.anchor_x, block.width));
        blocks.push(block);
    }
    Ok((blocks, candidates))
}

fn shapes_centers(shapes: &[ShapeLayout]) -> Vec<f32> {
    shapes.iter().map(|shape| shape.x + shape.size / 2.0).collect()
}

fn category_layouts(blocks: Vec<TextBlock>, centers: &[f32], y: f32) -> Vec<CategoryLabelLayout> {
    blocks
        .into_iter()
        .zip(centers)
        .enumerate()
        .map(|(row, (text, center))| CategoryLabelLayout {
            row,
            x: center - text.width / 2.0,
            y,
            text,
        })
        .collect()
}
