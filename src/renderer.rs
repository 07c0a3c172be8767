use crate::assets::FontFace;
use crate::PortraitError;
use ab_glyph::{point, Font, ScaleFont};
use image::codecs::png::PngEncoder;
use image::imageops::overlay;
use image::{ColorType, ImageBuffer, ImageEncoder, Pixel, Rgba, RgbaImage};

pub const CANVAS_SIZE: u32 = 200;

/// Integer pixel position or extent. Components may be negative when a layer
/// is larger than the area it is centered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Offset that centers `content` inside `container`, per axis, truncating.
pub fn center_offset(container: Point, content: Point) -> Point {
    Point::new(
        (container.x - content.x) / 2,
        (container.y - content.y) / 2,
    )
}

fn size_of(img: &RgbaImage) -> Point {
    Point::new(img.width() as i32, img.height() as i32)
}

/// Fixed-size RGBA surface that portrait layers are stacked on.
pub struct Canvas {
    pub image: RgbaImage,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    /// A fully transparent `CANVAS_SIZE` square.
    pub fn new() -> Self {
        let mut canvas = Self {
            image: ImageBuffer::new(CANVAS_SIZE, CANVAS_SIZE),
        };
        canvas.clear();
        canvas
    }

    pub fn clear(&mut self) {
        for pixel in self.image.pixels_mut() {
            *pixel = Rgba([0, 0, 0, 0]);
        }
    }

    pub fn size(&self) -> Point {
        size_of(&self.image)
    }

    /// Blend `src` over the canvas with its top-left corner at `at`.
    /// Pixels falling outside the canvas are dropped.
    pub fn draw_over(&mut self, src: &RgbaImage, at: Point) {
        overlay(&mut self.image, src, at.x as i64, at.y as i64);
    }

    /// Draw `src` centered on the canvas. Returns the offset used.
    pub fn draw_centered(&mut self, src: &RgbaImage) -> Point {
        let offset = center_offset(self.size(), size_of(src));
        self.draw_over(src, offset);
        offset
    }

    /// Render `text` with its left edge at `origin.x` and baseline at `origin.y`,
    /// blending `color` by glyph coverage.
    pub fn draw_text(&mut self, face: &FontFace<'_>, origin: Point, text: &str, color: Rgba<u8>) {
        let font = face.font();
        let scaled = font.as_scaled(face.scale());
        let (width, height) = (self.image.width() as i32, self.image.height() as i32);

        let mut caret = point(origin.x as f32, origin.y as f32);
        let mut previous = None;
        for ch in text.chars() {
            let id = scaled.glyph_id(ch);
            if let Some(prev) = previous {
                caret.x += scaled.kern(prev, id);
            }
            let glyph = id.with_scale_and_position(face.scale(), caret);
            caret.x += scaled.h_advance(id);
            previous = Some(id);

            let Some(outlined) = font.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();
            let image = &mut self.image;
            outlined.draw(|gx, gy, coverage| {
                let x = bounds.min.x as i32 + gx as i32;
                let y = bounds.min.y as i32 + gy as i32;
                if x < 0 || y < 0 || x >= width || y >= height {
                    return;
                }
                let alpha = (coverage.clamp(0.0, 1.0) * color[3] as f32 + 0.5) as u8;
                image
                    .get_pixel_mut(x as u32, y as u32)
                    .blend(&Rgba([color[0], color[1], color[2], alpha]));
            });
        }
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }
}

/// PNG-encode an RGBA image.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, PortraitError> {
    let mut buf = Vec::new();
    PngEncoder::new(&mut buf)
        .write_image(image.as_raw(), image.width(), image.height(), ColorType::Rgba8)
        .map_err(PortraitError::Encode)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, color: [u8; 4]) -> RgbaImage {
        ImageBuffer::from_pixel(width, height, Rgba(color))
    }

    #[test]
    fn center_offset_truncates() {
        let canvas = Point::new(200, 200);
        assert_eq!(center_offset(canvas, Point::new(100, 50)), Point::new(50, 75));
        assert_eq!(center_offset(canvas, Point::new(199, 101)), Point::new(0, 49));
        assert_eq!(center_offset(canvas, Point::new(200, 200)), Point::new(0, 0));
    }

    #[test]
    fn center_offset_negative_for_oversized_content() {
        let offset = center_offset(Point::new(200, 200), Point::new(240, 203));
        assert_eq!(offset, Point::new(-20, -1));
    }

    #[test]
    fn center_offset_is_pure() {
        let canvas = Point::new(200, 200);
        let content = Point::new(137, 91);
        assert_eq!(center_offset(canvas, content), center_offset(canvas, content));
    }

    #[test]
    fn new_canvas_is_transparent() {
        let canvas = Canvas::new();
        assert_eq!(canvas.size(), Point::new(200, 200));
        assert!(canvas.image.pixels().all(|p| p.0 == [0, 0, 0, 0]));
    }

    #[test]
    fn draw_centered_places_layer() {
        let mut canvas = Canvas::new();
        let offset = canvas.draw_centered(&solid(100, 100, [255, 0, 0, 255]));

        assert_eq!(offset, Point::new(50, 50));
        assert_eq!(canvas.image.get_pixel(49, 49).0, [0, 0, 0, 0]);
        assert_eq!(canvas.image.get_pixel(50, 50).0, [255, 0, 0, 255]);
        assert_eq!(canvas.image.get_pixel(149, 149).0, [255, 0, 0, 255]);
        assert_eq!(canvas.image.get_pixel(150, 150).0, [0, 0, 0, 0]);
    }

    #[test]
    fn draw_over_keeps_destination_under_transparent_pixels() {
        let mut canvas = Canvas::new();
        canvas.draw_over(&solid(200, 200, [0, 0, 255, 255]), Point::new(0, 0));
        canvas.draw_over(&solid(10, 10, [255, 0, 0, 0]), Point::new(5, 5));

        assert_eq!(canvas.image.get_pixel(7, 7).0, [0, 0, 255, 255]);
    }

    #[test]
    fn draw_over_blends_partial_alpha() {
        let mut canvas = Canvas::new();
        canvas.draw_over(&solid(1, 1, [0, 0, 0, 255]), Point::new(0, 0));
        canvas.draw_over(&solid(1, 1, [255, 255, 255, 128]), Point::new(0, 0));

        let p = canvas.image.get_pixel(0, 0).0;
        assert!(p[3] >= 254, "got {:?}", p);
        assert!((127..=129).contains(&p[0]), "got {:?}", p);
    }

    #[test]
    fn draw_over_onto_transparent_keeps_source_color() {
        let mut canvas = Canvas::new();
        canvas.draw_over(&solid(1, 1, [10, 20, 30, 100]), Point::new(3, 4));

        let p = canvas.image.get_pixel(3, 4).0;
        let expected = [10u8, 20, 30, 100];
        for (got, want) in p.iter().zip(expected) {
            assert!(got.abs_diff(want) <= 1, "got {:?}", p);
        }
    }

    #[test]
    fn draw_over_clips_to_canvas() {
        let mut canvas = Canvas::new();
        canvas.draw_over(&solid(20, 20, [0, 255, 0, 255]), Point::new(190, -10));

        assert_eq!(canvas.image.get_pixel(199, 0).0, [0, 255, 0, 255]);
        assert_eq!(canvas.image.get_pixel(190, 9).0, [0, 255, 0, 255]);
        assert_eq!(canvas.image.get_pixel(190, 10).0, [0, 0, 0, 0]);
        assert_eq!(canvas.image.get_pixel(189, 0).0, [0, 0, 0, 0]);
    }

    #[test]
    fn encode_png_writes_signature() {
        let data = encode_png(&Canvas::new().into_image()).unwrap();
        assert_eq!(&data[0..8], &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]);

        let decoded = image::load_from_memory(&data).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (200, 200));
    }
}
