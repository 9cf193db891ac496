use serde::{Deserialize, Serialize};

const SURVEY_PALETTE: [&str; 8] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
];

const MODERN_PALETTE: [&str; 8] = [
    "#4e79a7", "#f28e2c", "#e15759", "#76b7b2", "#59a14f", "#edc949", "#af7aa1", "#ff9da7",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub label_font_size: f32,
    pub legend_font_size: f32,
    pub title_font_size: f32,
    pub text_color: String,
    pub line_color: String,
    pub palette: Vec<String>,
}

impl Theme {
    pub fn survey_default() -> Self {
        Self {
            font_family: "\"Helvetica Neue\", Helvetica, Arial, sans-serif".to_string(),
            label_font_size: 12.0,
            legend_font_size: 14.0,
            title_font_size: 18.0,
            text_color: "#333333".to_string(),
            line_color: "#999999".to_string(),
            palette: SURVEY_PALETTE.iter().map(|c| c.to_string()).collect(),
        }
    }

    pub fn modern() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            label_font_size: 11.0,
            legend_font_size: 13.0,
            title_font_size: 16.0,
            text_color: "#1C2430".to_string(),
            line_color: "#7A8AA6".to_string(),
            palette: MODERN_PALETTE.iter().map(|c| c.to_string()).collect(),
        }
    }

    /// Series color, cycling through the palette.
    pub fn series_color(&self, idx: usize) -> String {
        if self.palette.is_empty() {
            return self.text_color.clone();
        }
        self.palette[idx % self.palette.len()].clone()
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::survey_default()
    }
}
