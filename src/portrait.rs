//! Portrait composition.
//!
//! Layers are stacked in a fixed order: character art, gear or relic border,
//! level badge with the level number, then the optional zeta and omicron
//! badges with their counts. The first failing load aborts the whole build.

use crate::assets::{AssetStore, Badge, FontFace};
use crate::renderer::{Canvas, Point};
use crate::{Character, PortraitError, PortraitRequest};
use image::{Rgba, RgbaImage};
use tracing::debug;

pub const SMALL_FONT_SIZE: f32 = 18.0;
pub const LARGE_FONT_SIZE: f32 = 24.0;

const TEXT_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Where a badge is drawn and the region its label is centered in.
#[derive(Debug, Clone, Copy)]
pub struct BadgeSlot {
    pub position: Point,
    pub size: Point,
    /// Upward baseline nudge compensating for ascent vs. visual center.
    pub nudge: i32,
}

pub const LEVEL_SLOT: BadgeSlot = BadgeSlot {
    position: Point::new(75, 128),
    size: Point::new(50, 44),
    nudge: 5,
};

pub const ZETA_SLOT: BadgeSlot = BadgeSlot {
    position: Point::new(18, 100),
    size: Point::new(60, 60),
    nudge: 4,
};

pub const OMICRON_SLOT: BadgeSlot = BadgeSlot {
    position: Point::new(121, 100),
    size: Point::new(60, 60),
    nudge: 4,
};

impl BadgeSlot {
    /// Baseline origin that centers a label of `text_width` in the slot.
    pub fn label_origin(&self, text_width: i32, ascent: i32) -> Point {
        Point::new(
            self.position.x + (self.size.x - text_width) / 2,
            self.position.y + (self.size.y + ascent) / 2 - self.nudge,
        )
    }
}

pub struct PortraitBuilder<'a> {
    assets: &'a AssetStore,
}

impl<'a> PortraitBuilder<'a> {
    pub fn new(assets: &'a AssetStore) -> Self {
        Self { assets }
    }

    pub fn build(
        &self,
        request: &PortraitRequest,
        character: &Character,
    ) -> Result<RgbaImage, PortraitError> {
        let font = self.assets.load_font()?;
        let small = font.face(SMALL_FONT_SIZE)?;
        let large = font.face(LARGE_FONT_SIZE)?;

        let portrait = self.assets.load_image(&self.assets.character_path(character))?;
        let mut canvas = Canvas::new();
        canvas.draw_centered(&portrait);

        if request.is_relic() {
            let border = self
                .assets
                .load_image(&self.assets.relic_border_path(character.faction))?;
            canvas.draw_over(&border, Point::default());
        } else {
            let border = self
                .assets
                .load_image(&self.assets.gear_border_path(request.gear_level))?;
            canvas.draw_centered(&border);
        }

        self.draw_badge(&mut canvas, Badge::Level, &LEVEL_SLOT, &large, request.level)?;

        if request.zetas > 0 {
            self.draw_badge(&mut canvas, Badge::Zeta, &ZETA_SLOT, &small, request.zetas)?;
        }
        if request.omicrons > 0 {
            self.draw_badge(&mut canvas, Badge::Omicron, &OMICRON_SLOT, &small, request.omicrons)?;
        }

        debug!(
            char = character.id,
            gear_level = request.gear_level,
            relic_level = request.relic_level,
            "portrait composed"
        );
        Ok(canvas.into_image())
    }

    fn draw_badge(
        &self,
        canvas: &mut Canvas,
        badge: Badge,
        slot: &BadgeSlot,
        face: &FontFace<'_>,
        value: u32,
    ) -> Result<(), PortraitError> {
        let image = self.assets.load_image(&self.assets.badge_path(badge))?;
        canvas.draw_over(&image, slot.position);

        let text = value.to_string();
        let origin = slot.label_origin(face.measure(&text), face.ascent());
        canvas.draw_text(face, origin, &text, TEXT_COLOR);
        Ok(())
    }
}
