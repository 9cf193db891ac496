// System-font text metrics. Faces are resolved once per font-family string
// and kept for the life of the process.

use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Mutex;
use ttf_parser::Face;

static FONT_CACHE: Lazy<Mutex<FontCache>> = Lazy::new(|| Mutex::new(FontCache::new()));

/// Line metrics for a string: advance width and ascent+descent height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineMetrics {
    pub width: f32,
    pub height: f32,
}

/// Measures `text` with the first installed face matching `font_family`.
/// Returns `None` when no face resolves.
pub fn measure_line(text: &str, font_size: f32, font_family: &str) -> Option<LineMetrics> {
    if font_size <= 0.0 {
        return Some(LineMetrics {
            width: 0.0,
            height: 0.0,
        });
    }
    let mut guard = FONT_CACHE.lock().ok()?;
    let face = guard.face(font_family)?;
    Some(face.measure(text, font_size))
}

struct FontCache {
    db: Database,
    loaded_system_fonts: bool,
    faces: HashMap<String, Option<FaceMetrics>>,
}

impl FontCache {
    fn new() -> Self {
        Self {
            db: Database::new(),
            loaded_system_fonts: false,
            faces: HashMap::new(),
        }
    }

    fn face(&mut self, font_family: &str) -> Option<&FaceMetrics> {
        let key = normalize_family_key(font_family);
        if !self.faces.contains_key(&key) {
            let face = self.load_face(&key);
            if face.is_none() {
                tracing::debug!(family = key.as_str(), "no installed face, using fallback widths");
            }
            self.faces.insert(key.clone(), face);
        }
        self.faces.get(&key).and_then(Option::as_ref)
    }

    fn load_face(&mut self, font_family: &str) -> Option<FaceMetrics> {
        let names: Vec<String> = font_family
            .split(',')
            .map(|part| part.trim().trim_matches('"').trim_matches('\'').to_string())
            .filter(|name| !name.is_empty())
            .collect();
        let mut families: Vec<Family<'_>> = names.iter().map(|name| family_token(name)).collect();
        if families.is_empty() {
            families.push(Family::SansSerif);
        }

        if !self.loaded_system_fonts {
            self.db.load_system_fonts();
            self.loaded_system_fonts = true;
        }

        let query = Query {
            families: &families,
            weight: Weight::NORMAL,
            stretch: Stretch::Normal,
            style: Style::Normal,
        };
        let id = self.db.query(&query)?;
        self.db
            .with_face_data(id, |data, index| FaceMetrics::parse(data, index))
            .flatten()
    }
}

fn family_token(name: &str) -> Family<'_> {
    match name.to_ascii_lowercase().as_str() {
        "serif" => Family::Serif,
        "sans-serif" | "system-ui" | "-apple-system" | "ui-sans-serif" => Family::SansSerif,
        "monospace" | "ui-monospace" => Family::Monospace,
        "cursive" => Family::Cursive,
        "fantasy" => Family::Fantasy,
        _ => Family::Name(name),
    }
}

/// Advance widths for one face, in font units.
struct FaceMetrics {
    units_per_em: f32,
    line_height_units: f32,
    ascii_advances: [u16; 128],
    advances: HashMap<char, u16>,
}

impl FaceMetrics {
    fn parse(data: &[u8], index: u32) -> Option<Self> {
        let face = Face::parse(data, index).ok()?;
        let mut ascii_advances = [0u16; 128];
        for byte in 0u8..=127 {
            if let Some(glyph) = face.glyph_index(byte as char) {
                ascii_advances[byte as usize] = face.glyph_hor_advance(glyph).unwrap_or(0);
            }
        }
        // Latin-1 supplement and general punctuation cover most survey labels.
        let mut advances = HashMap::new();
        for ch in ('\u{a0}'..='\u{17f}').chain('\u{2000}'..='\u{206f}') {
            if let Some(advance) = face
                .glyph_index(ch)
                .and_then(|glyph| face.glyph_hor_advance(glyph))
            {
                advances.insert(ch, advance);
            }
        }
        let line_height_units = f32::from(face.ascender()) - f32::from(face.descender());
        Some(Self {
            units_per_em: f32::from(face.units_per_em().max(1)),
            line_height_units,
            ascii_advances,
            advances,
        })
    }

    fn measure(&self, text: &str, font_size: f32) -> LineMetrics {
        let scale = font_size / self.units_per_em;
        let fallback = font_size * 0.56;
        let mut width = 0.0f32;
        for ch in text.chars() {
            if ch == '\n' {
                continue;
            }
            let advance = if ch.is_ascii() {
                Some(self.ascii_advances[ch as usize]).filter(|advance| *advance > 0)
            } else {
                self.advances.get(&ch).copied()
            };
            width += match advance {
                Some(advance) => f32::from(advance) * scale,
                None => fallback,
            };
        }
        LineMetrics {
            width: width.max(0.0),
            height: (self.line_height_units * scale).max(font_size),
        }
    }
}

fn normalize_family_key(font_family: &str) -> String {
    let trimmed = font_family.trim();
    if trimmed.is_empty() {
        "sans-serif".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn family_tokens_map_generics() {
        assert_eq!(family_token("Sans-Serif"), Family::SansSerif);
        assert_eq!(family_token("ui-monospace"), Family::Monospace);
        assert_eq!(family_token("Inter"), Family::Name("Inter"));
    }

    #[test]
    fn empty_family_normalizes_to_sans_serif() {
        assert_eq!(normalize_family_key("   "), "sans-serif");
        assert_eq!(normalize_family_key(" Arial "), "Arial");
    }

    #[test]
    fn zero_font_size_measures_nothing() {
        let metrics = measure_line("abc", 0.0, "sans-serif").unwrap();
        assert_eq!(metrics.width, 0.0);
    }
}
