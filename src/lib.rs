#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod measure;
pub mod text_metrics;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LayoutConfig, load_config};
pub use error::LayoutError;
pub use ir::{ChartKind, ChartRow, ChartSpec};
pub use layout::compute_chart_layout;
pub use layout::legend::{LegendOrientation, choose_orientation, legend_height, legend_row_width};
pub use layout::stacking::{LabelCandidate, LabelPlacement, LabelStacker, StackDirection};
pub use measure::{FontTextMeasurer, HeuristicTextMeasurer, TextBox, TextMeasurer, TextStyle};
pub use theme::Theme;
