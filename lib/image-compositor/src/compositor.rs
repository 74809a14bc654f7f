use crate::geometry::{Anchor, Rectangle, SourceCrop, compute_crop};
use derivative::Derivative;
use derive_setters::Setters;
use image::{
    RgbaImage,
    imageops::{self, FilterType},
};

/// Draws images onto an RGBA canvas.
///
/// `render_*` cover-fit the source into the destination (crop, never
/// distort). `draw_image` stretches the source to the destination like a
/// sized canvas `drawImage` call.
#[derive(Debug, Clone, Derivative, Setters)]
#[derivative(Default)]
#[setters(prefix = "with_")]
#[non_exhaustive]
pub struct Compositor {
    #[derivative(Default(value = "FilterType::Triangle"))]
    filter: FilterType,
}

impl Compositor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cover-fits `image` over the whole canvas.
    pub fn render_full_bleed(
        &self,
        canvas: &mut RgbaImage,
        image: &RgbaImage,
        anchor: Option<Anchor>,
    ) -> SourceCrop {
        let rect = Rectangle::sized(canvas.width(), canvas.height());
        self.render_to_region(canvas, image, rect, anchor)
    }

    /// Cover-fits `image` into `rect`, cropping whatever overflows around `anchor`.
    pub fn render_to_region(
        &self,
        canvas: &mut RgbaImage,
        image: &RgbaImage,
        rect: Rectangle,
        anchor: Option<Anchor>,
    ) -> SourceCrop {
        let crop = compute_crop(
            image.width() as f64,
            image.height() as f64,
            rect.width as f64,
            rect.height as f64,
            anchor.unwrap_or_default(),
        );

        let (x, y, w, h) = snap_to_pixels(&crop, image.width(), image.height());
        log::trace!("render crop {crop:?} -> pixels ({x}, {y}, {w}, {h}) into {rect:?}");

        let region = imageops::crop_imm(image, x, y, w, h).to_image();
        self.blit(canvas, &region, rect);

        crop
    }

    /// Draws `image` stretched to `rect`, blending over what is already there.
    pub fn draw_image(&self, canvas: &mut RgbaImage, image: &RgbaImage, rect: Rectangle) {
        self.blit(canvas, image, rect);
    }

    fn blit(&self, canvas: &mut RgbaImage, image: &RgbaImage, rect: Rectangle) {
        if image.dimensions() == (rect.width, rect.height) {
            imageops::overlay(canvas, image, rect.x as i64, rect.y as i64);
        } else {
            let scaled = imageops::resize(image, rect.width, rect.height, self.filter);
            imageops::overlay(canvas, &scaled, rect.x as i64, rect.y as i64);
        }
    }
}

// Sampling works on whole pixels: round both crop edges, keep at least one pixel.
fn snap_to_pixels(crop: &SourceCrop, width: u32, height: u32) -> (u32, u32, u32, u32) {
    let x0 = (crop.cx.round() as u32).min(width.saturating_sub(1));
    let y0 = (crop.cy.round() as u32).min(height.saturating_sub(1));
    let x1 = ((crop.cx + crop.cw).round() as u32).clamp(x0 + 1, width.max(x0 + 1));
    let y1 = ((crop.cy + crop.ch).round() as u32).clamp(y0 + 1, height.max(y0 + 1));

    (x0, y0, x1 - x0, y1 - y0)
}
