use serde::Serialize;

use crate::ir::ChartKind;

use super::legend::LegendOrientation;
use super::stacking::StackDirection;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextBlock {
    pub text: String,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlotArea {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl PlotArea {
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TitleLayout {
    pub x: f32,
    pub y: f32,
    pub text: TextBlock,
}

#[derive(Debug, Clone, Serialize)]
pub struct BarLayout {
    pub row: usize,
    pub series: usize,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub value: f32,
    pub color: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShapeLayout {
    pub row: usize,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    /// Share of the shape filled, relative to the largest value.
    pub fill_ratio: f32,
    pub value: f32,
    pub color: String,
}

/// A value label after stacking. `x`/`y` are the top-left of its box.
#[derive(Debug, Clone, Serialize)]
pub struct ValueLabelLayout {
    pub text: TextBlock,
    pub anchor_x: f32,
    pub level: i32,
    pub x: f32,
    pub y: f32,
    /// Pointer line from the bar/shape edge to the label box.
    pub connector: [(f32, f32); 2],
    pub connector_color: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryLabelLayout {
    pub row: usize,
    pub x: f32,
    pub y: f32,
    pub text: TextBlock,
}

#[derive(Debug, Clone, Serialize)]
pub struct LegendItemLayout {
    pub swatch_x: f32,
    pub swatch_y: f32,
    pub swatch_width: f32,
    pub swatch_height: f32,
    pub label_x: f32,
    pub label_y: f32,
    pub label: TextBlock,
    pub color: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LegendLayout {
    pub orientation: LegendOrientation,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub items: Vec<LegendItemLayout>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartLayout {
    pub kind: ChartKind,
    pub width: f32,
    pub height: f32,
    pub direction: StackDirection,
    /// Space kept free beyond the plot so the deepest label is not clipped.
    pub reserved_extent: f32,
    pub plot: PlotArea,
    pub title: Option<TitleLayout>,
    pub legend: Option<LegendLayout>,
    pub bars: Vec<BarLayout>,
    pub shapes: Vec<ShapeLayout>,
    pub labels: Vec<ValueLabelLayout>,
    pub categories: Vec<CategoryLabelLayout>,
}
