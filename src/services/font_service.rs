// src/services/font_service.rs
//
// Loads the outline font off the main thread and hands it to the scene once ready.
// There is a single load attempt: no retry and no fallback font.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use ttf_parser::{Face, GlyphId, OutlineBuilder};

use crate::errors::FontError;

/// Anything that can describe glyph outlines in font units (y up).
pub trait GlyphSource {
    fn units_per_em(&self) -> f32;

    /// Feeds the outline of `ch` into `sink` and returns its horizontal advance
    /// in font units, or `None` when the font has no glyph for `ch`.
    fn outline_glyph(&self, ch: char, sink: &mut dyn OutlineBuilder) -> Option<f32>;
}

/// A parsed font file. Read-only and cheap to clone.
#[derive(Clone)]
pub struct FontAsset {
    data: Arc<[u8]>,
    units_per_em: u16,
    family_name: Option<String>,
}

impl std::fmt::Debug for FontAsset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontAsset")
            .field("family_name", &self.family_name)
            .field("units_per_em", &self.units_per_em)
            .field("bytes", &self.data.len())
            .finish()
    }
}

impl FontAsset {
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, FontError> {
        let (units_per_em, family_name) = {
            let face = Face::parse(&data, 0)?;
            let family_name = face
                .names()
                .into_iter()
                .filter(|name| name.name_id == ttf_parser::name_id::FAMILY)
                .find_map(|name| name.to_string());
            (face.units_per_em(), family_name)
        };

        if units_per_em == 0 {
            return Err(FontError::InvalidUnitsPerEm);
        }

        Ok(Self {
            data: Arc::from(data),
            units_per_em,
            family_name,
        })
    }

    pub fn from_file(path: &Path) -> Result<Self, FontError> {
        let data = std::fs::read(path).map_err(|source| FontError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(data)
    }

    pub fn family_name(&self) -> Option<&str> {
        self.family_name.as_deref()
    }

    fn face(&self) -> Option<Face<'_>> {
        // validated in from_bytes
        Face::parse(&self.data, 0).ok()
    }
}

impl GlyphSource for FontAsset {
    fn units_per_em(&self) -> f32 {
        f32::from(self.units_per_em)
    }

    fn outline_glyph(&self, ch: char, sink: &mut dyn OutlineBuilder) -> Option<f32> {
        let face = self.face()?;
        let glyph_id: GlyphId = face.glyph_index(ch)?;
        // whitespace has an advance but no outline
        let _ = face.outline_glyph(glyph_id, sink);
        Some(f32::from(face.glyph_hor_advance(glyph_id).unwrap_or(0)))
    }
}

enum LoadState {
    Loading(Receiver<Result<FontAsset, FontError>>),
    Ready(FontAsset),
    Failed,
}

/// absent -> loading -> ready | failed
pub struct FontProvider {
    state: LoadState,
}

impl FontProvider {
    /// Starts reading and parsing `path` on the rayon pool.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let (tx, rx) = mpsc::channel();
        tracing::info!("Loading font {}", path.display());

        rayon::spawn(move || {
            let result = FontAsset::from_file(&path);
            // the receiver only disappears when the app is shutting down
            let _ = tx.send(result);
        });

        Self {
            state: LoadState::Loading(rx),
        }
    }

    /// A provider whose font is already present.
    pub fn ready(font: FontAsset) -> Self {
        Self {
            state: LoadState::Ready(font),
        }
    }

    /// Checks on a pending load without blocking. Yields the outcome exactly once,
    /// on the call that observes the transition out of loading.
    pub fn poll(&mut self) -> Option<Result<FontAsset, FontError>> {
        let LoadState::Loading(rx) = &self.state else {
            return None;
        };

        let result = match rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => Err(FontError::Disconnected),
        };

        self.state = match &result {
            Ok(font) => LoadState::Ready(font.clone()),
            Err(_) => LoadState::Failed,
        };
        Some(result)
    }

    pub fn font(&self) -> Option<&FontAsset> {
        match &self.state {
            LoadState::Ready(font) => Some(font),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, LoadState::Loading(_))
    }

    pub fn has_failed(&self) -> bool {
        matches!(self.state, LoadState::Failed)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::time::Duration;

    pub(crate) const BUNDLED_FONT: &[u8] = include_bytes!("../../assets/fonts/DejaVuSerif.ttf");

    pub(crate) fn bundled_font() -> FontAsset {
        FontAsset::from_bytes(BUNDLED_FONT.to_vec()).unwrap()
    }

    fn wait_for(provider: &mut FontProvider) -> Result<FontAsset, FontError> {
        for _ in 0..500 {
            if let Some(result) = provider.poll() {
                return result;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        panic!("font load did not finish");
    }

    #[derive(Default)]
    struct CountingSink {
        commands: usize,
    }

    impl OutlineBuilder for CountingSink {
        fn move_to(&mut self, _x: f32, _y: f32) {
            self.commands += 1;
        }
        fn line_to(&mut self, _x: f32, _y: f32) {
            self.commands += 1;
        }
        fn quad_to(&mut self, _x1: f32, _y1: f32, _x: f32, _y: f32) {
            self.commands += 1;
        }
        fn curve_to(&mut self, _x1: f32, _y1: f32, _x2: f32, _y2: f32, _x: f32, _y: f32) {
            self.commands += 1;
        }
        fn close(&mut self) {
            self.commands += 1;
        }
    }

    #[test]
    fn test_parse_bundled_font() {
        let font = bundled_font();
        assert_eq!(font.units_per_em(), 2048.0);
        assert_eq!(font.family_name(), Some("DejaVu Serif"));
    }

    #[test]
    fn test_outline_glyph() {
        let font = bundled_font();

        let mut sink = CountingSink::default();
        let advance = font.outline_glyph('H', &mut sink).unwrap();
        assert!(advance > 0.0);
        assert!(sink.commands > 0);

        let mut sink = CountingSink::default();
        let advance = font.outline_glyph(' ', &mut sink).unwrap();
        assert!(advance > 0.0);
        assert_eq!(sink.commands, 0);

        let mut sink = CountingSink::default();
        assert!(font.outline_glyph('\u{10FFFD}', &mut sink).is_none());
    }

    #[test]
    fn test_invalid_bytes_are_rejected() {
        let result = FontAsset::from_bytes(b"definitely not a font".to_vec());
        assert!(matches!(result, Err(FontError::Parse(_))));
    }

    #[test]
    fn test_provider_loads_font() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/fonts/DejaVuSerif.ttf");
        let mut provider = FontProvider::load(path);
        assert!(provider.font().is_none());

        let font = wait_for(&mut provider).unwrap();
        assert_eq!(font.units_per_em(), 2048.0);
        assert!(provider.font().is_some());
        assert!(!provider.is_loading());
        // the outcome is reported once
        assert!(provider.poll().is_none());
    }

    #[test]
    fn test_provider_missing_file_fails_for_good() {
        let mut provider = FontProvider::load("no/such/font.ttf");
        let result = wait_for(&mut provider);
        assert!(matches!(result, Err(FontError::Io { .. })));
        assert!(provider.has_failed());
        assert!(provider.font().is_none());
        assert!(provider.poll().is_none());
    }
}
