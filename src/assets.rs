use crate::{Character, PortraitError};
use ab_glyph::{Font, FontVec, PxScale, ScaleFont};
use image::RgbaImage;
use std::fs;
use std::path::{Path, PathBuf};

const FONT_FILE: &str = "Inter-Regular.ttf";

/// Faces are rasterized at 72 DPI, so one point is one pixel per em.
const FONT_DPI: f32 = 72.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    Level,
    Zeta,
    Omicron,
}

impl Badge {
    fn file_name(self) -> &'static str {
        match self {
            Badge::Level => "level.png",
            Badge::Zeta => "zeta.png",
            Badge::Omicron => "omicron.png",
        }
    }
}

/// Read-only view of the asset directory. Paths below the root are fixed:
///
/// ```text
/// fonts/Inter-Regular.ttf
/// characters/<image file>
/// gear/<gear level>.png
/// relics/<faction>.png
/// badges/{level,zeta,omicron}.png
/// ```
#[derive(Debug, Clone)]
pub struct AssetStore {
    root: PathBuf,
}

impl AssetStore {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn font_path(&self) -> PathBuf {
        self.root.join("fonts").join(FONT_FILE)
    }

    pub fn character_path(&self, character: &Character) -> PathBuf {
        self.root.join("characters").join(character.image_file)
    }

    pub fn gear_border_path(&self, gear_level: u32) -> PathBuf {
        self.root.join("gear").join(format!("{}.png", gear_level))
    }

    pub fn relic_border_path(&self, faction: &str) -> PathBuf {
        self.root.join("relics").join(format!("{}.png", faction))
    }

    pub fn badge_path(&self, badge: Badge) -> PathBuf {
        self.root.join("badges").join(badge.file_name())
    }

    /// Decode any format the `image` crate recognizes into RGBA8.
    pub fn load_image(&self, path: &Path) -> Result<RgbaImage, PortraitError> {
        image::open(path)
            .map(|img| img.to_rgba8())
            .map_err(|source| PortraitError::Image {
                path: path.to_path_buf(),
                source,
            })
    }

    pub fn load_font(&self) -> Result<LoadedFont, PortraitError> {
        LoadedFont::from_file(&self.font_path())
    }
}

/// A parsed font file that faces of different sizes borrow from.
pub struct LoadedFont {
    font: FontVec,
    path: PathBuf,
}

impl LoadedFont {
    pub fn from_file(path: &Path) -> Result<Self, PortraitError> {
        let data = fs::read(path).map_err(|source| PortraitError::FontRead {
            path: path.to_path_buf(),
            source,
        })?;
        let font = FontVec::try_from_vec(data).map_err(|source| PortraitError::FontParse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            font,
            path: path.to_path_buf(),
        })
    }

    /// A face at `size` points.
    pub fn face(&self, size: f32) -> Result<FontFace<'_>, PortraitError> {
        let units_per_em = self
            .font
            .units_per_em()
            .ok_or_else(|| PortraitError::FontMetrics {
                path: self.path.clone(),
            })?;
        let px_per_em = size * FONT_DPI / 72.0;
        // PxScale is the ascent-to-descent height, not the em size.
        let scale = PxScale::from(px_per_em * self.font.height_unscaled() / units_per_em);
        Ok(FontFace {
            font: &self.font,
            scale,
        })
    }
}

#[derive(Clone, Copy)]
pub struct FontFace<'a> {
    font: &'a FontVec,
    scale: PxScale,
}

impl<'a> FontFace<'a> {
    pub fn font(&self) -> &'a FontVec {
        self.font
    }

    pub fn scale(&self) -> PxScale {
        self.scale
    }

    /// Ascent in whole pixels, rounded up.
    pub fn ascent(&self) -> i32 {
        self.font.as_scaled(self.scale).ascent().ceil() as i32
    }

    /// Advance width of `text` including kerning, rounded to the nearest pixel.
    pub fn measure(&self, text: &str) -> i32 {
        let scaled = self.font.as_scaled(self.scale);
        let mut width = 0.0;
        let mut previous = None;
        for ch in text.chars() {
            let id = scaled.glyph_id(ch);
            if let Some(prev) = previous {
                width += scaled.kern(prev, id);
            }
            width += scaled.h_advance(id);
            previous = Some(id);
        }
        width.round() as i32
    }
}
