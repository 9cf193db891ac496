use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StackingConfig {
    /// Minimum horizontal gap between neighbouring labels.
    pub label_gap: f32,
    pub base_level: i32,
    /// Height of one stack row.
    pub unit_step: f32,
}

impl Default for StackingConfig {
    fn default() -> Self {
        Self {
            label_gap: 10.0,
            base_level: 0,
            unit_step: 18.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegendConfig {
    pub swatch_width: f32,
    pub swatch_height: f32,
    pub swatch_gap: f32,
    pub swatch_right_margin: f32,
    pub inter_row_gap: f32,
    pub below_margin: f32,
}

impl Default for LegendConfig {
    fn default() -> Self {
        Self {
            swatch_width: 32.0,
            swatch_height: 24.0,
            swatch_gap: 12.0,
            swatch_right_margin: 24.0,
            inter_row_gap: 8.0,
            below_margin: 16.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    pub width: f32,
    pub plot_height: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
    pub margin_left: f32,
    pub margin_right: f32,
    pub title_gap: f32,
    /// Fraction of each category band left empty around its bars.
    pub bar_padding: f32,
    /// Fraction of a grouped bar slot left empty between sibling bars.
    pub group_padding: f32,
    pub shape_size: f32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 600.0,
            plot_height: 280.0,
            margin_top: 16.0,
            margin_bottom: 16.0,
            margin_left: 24.0,
            margin_right: 24.0,
            title_gap: 12.0,
            bar_padding: 0.2,
            group_padding: 0.1,
            shape_size: 48.0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub fast_text_metrics: bool,
    pub stacking: StackingConfig,
    pub legend: LegendConfig,
    pub chart: ChartConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    fast_text_metrics: Option<bool>,
    stacking: Option<StackingConfigFile>,
    legend: Option<LegendConfigFile>,
    chart: Option<ChartConfigFile>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    label_font_size: Option<NumberOrString>,
    legend_font_size: Option<NumberOrString>,
    title_font_size: Option<NumberOrString>,
    text_color: Option<String>,
    line_color: Option<String>,
    palette: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f32),
    String(String),
}

impl NumberOrString {
    fn as_f32(&self) -> Option<f32> {
        match self {
            NumberOrString::Number(val) => Some(*val),
            NumberOrString::String(val) => val.trim().trim_end_matches("px").parse::<f32>().ok(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StackingConfigFile {
    label_gap: Option<f32>,
    base_level: Option<i32>,
    unit_step: Option<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegendConfigFile {
    swatch_width: Option<f32>,
    swatch_height: Option<f32>,
    swatch_gap: Option<f32>,
    swatch_right_margin: Option<f32>,
    inter_row_gap: Option<f32>,
    below_margin: Option<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartConfigFile {
    width: Option<f32>,
    plot_height: Option<f32>,
    margin_top: Option<f32>,
    margin_bottom: Option<f32>,
    margin_left: Option<f32>,
    margin_right: Option<f32>,
    title_gap: Option<f32>,
    bar_padding: Option<f32>,
    group_padding: Option<f32>,
    shape_size: Option<f32>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

/// Parses a JSON5 config document and merges it over the defaults.
pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let parsed: ConfigFile = json5::from_str(contents)?;

    match parsed.theme.as_deref() {
        Some("modern") => config.theme = Theme::modern(),
        Some("default") | Some("survey") | None => {}
        Some(other) => tracing::warn!(theme = other, "unknown theme, keeping default"),
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.font_family {
            config.theme.font_family = v;
        }
        if let Some(v) = vars.label_font_size.as_ref().and_then(NumberOrString::as_f32) {
            config.theme.label_font_size = v;
        }
        if let Some(v) = vars.legend_font_size.as_ref().and_then(NumberOrString::as_f32) {
            config.theme.legend_font_size = v;
        }
        if let Some(v) = vars.title_font_size.as_ref().and_then(NumberOrString::as_f32) {
            config.theme.title_font_size = v;
        }
        if let Some(v) = vars.text_color {
            config.theme.text_color = v;
        }
        if let Some(v) = vars.line_color {
            config.theme.line_color = v;
        }
        if let Some(v) = vars.palette {
            config.theme.palette = v;
        }
    }

    if let Some(v) = parsed.fast_text_metrics {
        config.layout.fast_text_metrics = v;
    }

    if let Some(stacking) = parsed.stacking {
        let cfg = &mut config.layout.stacking;
        if let Some(v) = stacking.label_gap {
            cfg.label_gap = v;
        }
        if let Some(v) = stacking.base_level {
            cfg.base_level = v;
        }
        if let Some(v) = stacking.unit_step {
            cfg.unit_step = v;
        }
    }

    if let Some(legend) = parsed.legend {
        let cfg = &mut config.layout.legend;
        if let Some(v) = legend.swatch_width {
            cfg.swatch_width = v;
        }
        if let Some(v) = legend.swatch_height {
            cfg.swatch_height = v;
        }
        if let Some(v) = legend.swatch_gap {
            cfg.swatch_gap = v;
        }
        if let Some(v) = legend.swatch_right_margin {
            cfg.swatch_right_margin = v;
        }
        if let Some(v) = legend.inter_row_gap {
            cfg.inter_row_gap = v;
        }
        if let Some(v) = legend.below_margin {
            cfg.below_margin = v;
        }
    }

    if let Some(chart) = parsed.chart {
        let cfg = &mut config.layout.chart;
        if let Some(v) = chart.width {
            cfg.width = v;
        }
        if let Some(v) = chart.plot_height {
            cfg.plot_height = v;
        }
        if let Some(v) = chart.margin_top {
            cfg.margin_top = v;
        }
        if let Some(v) = chart.margin_bottom {
            cfg.margin_bottom = v;
        }
        if let Some(v) = chart.margin_left {
            cfg.margin_left = v;
        }
        if let Some(v) = chart.margin_right {
            cfg.margin_right = v;
        }
        if let Some(v) = chart.title_gap {
            cfg.title_gap = v;
        }
        if let Some(v) = chart.bar_padding {
            cfg.bar_padding = v.clamp(0.0, 0.95);
        }
        if let Some(v) = chart.group_padding {
            cfg.group_padding = v.clamp(0.0, 0.95);
        }
        if let Some(v) = chart.shape_size {
            cfg.shape_size = v;
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_path_yields_defaults() {
        let config = load_config(None).unwrap();
        assert_eq!(config.layout.stacking.label_gap, 10.0);
        assert_eq!(config.layout.legend.swatch_width, 32.0);
    }

    #[test]
    fn json5_overrides_merge_over_defaults() {
        let config = parse_config(
            r##"{
                // doubled gap, as the grouped charts use
                theme: "modern",
                themeVariables: { labelFontSize: "13px", palette: ["#000"] },
                stacking: { labelGap: 20, unitStep: 8 },
                legend: { belowMargin: 4 },
                chart: { width: 320, barPadding: 2.0 },
            }"##,
        )
        .unwrap();
        assert_eq!(config.layout.stacking.label_gap, 20.0);
        assert_eq!(config.layout.stacking.unit_step, 8.0);
        assert_eq!(config.layout.stacking.base_level, 0);
        assert_eq!(config.layout.legend.below_margin, 4.0);
        assert_eq!(config.layout.legend.swatch_height, 24.0);
        assert_eq!(config.layout.chart.width, 320.0);
        assert_eq!(config.layout.chart.bar_padding, 0.95);
        assert_eq!(config.theme.label_font_size, 13.0);
        assert_eq!(config.theme.palette, vec!["#000".to_string()]);
        assert_eq!(config.theme.font_family, Theme::modern().font_family);
    }

    #[test]
    fn malformed_config_is_an_error() {
        assert!(parse_config("{ stacking: ").is_err());
    }
}
