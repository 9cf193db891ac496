use crate::layout::ChartLayout;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

pub fn layout_to_json(layout: &ChartLayout) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(layout)?)
}

/// Writes the layout as pretty JSON to `path`, or stdout when `None`.
pub fn write_layout_dump(path: Option<&Path>, layout: &ChartLayout) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            let file = File::create(path)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, layout)?;
            writer.write_all(b"\n")?;
            writer.flush()?;
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            serde_json::to_writer_pretty(&mut handle, layout)?;
            handle.write_all(b"\n")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{ChartKind, ChartRow, ChartSpec};
    use crate::layout::compute_chart_layout;
    use crate::measure::HeuristicTextMeasurer;
    use crate::{LayoutConfig, Theme};

    #[test]
    fn dump_carries_levels_and_extent() {
        let spec = ChartSpec {
            kind: ChartKind::Bar,
            title: None,
            series: Vec::new(),
            rows: vec![ChartRow {
                label: "Yes".to_string(),
                values: vec![12.0],
            }],
        };
        let layout = compute_chart_layout(
            &spec,
            &HeuristicTextMeasurer,
            &Theme::default(),
            &LayoutConfig::default(),
        )
        .unwrap();
        let json = layout_to_json(&layout).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["kind"], "bar");
        assert_eq!(value["direction"], "up");
        assert_eq!(value["reserved_extent"], 18.0);
        assert_eq!(value["labels"][0]["level"], 0);
    }

    #[test]
    fn writes_dump_to_file() {
        let dir = std::env::temp_dir().join("sclayout-dump-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("layout.json");
        let spec = ChartSpec {
            kind: ChartKind::Custom,
            title: Some("Regions".to_string()),
            series: Vec::new(),
            rows: vec![ChartRow {
                label: "North".to_string(),
                values: vec![3.0],
            }],
        };
        let layout = compute_chart_layout(
            &spec,
            &HeuristicTextMeasurer,
            &Theme::default(),
            &LayoutConfig::default(),
        )
        .unwrap();
        write_layout_dump(Some(&path), &layout).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("\"shapes\""));
    }
}
