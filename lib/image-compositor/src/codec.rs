use crate::{CompositorError, CompositorResult};
use image::{ImageFormat, RgbaImage};
use resvg::{tiny_skia, usvg};
use std::io::Cursor;

/// Decodes raster bytes (format guessed from the content) into RGBA8.
pub fn decode_image(bytes: &[u8]) -> CompositorResult<RgbaImage> {
    let img = image::load_from_memory(bytes)?;
    log::debug!("decoded {}x{} image", img.width(), img.height());
    Ok(img.to_rgba8())
}

/// Renders an SVG document scaled to exactly `width` x `height`.
pub fn rasterize_svg(bytes: &[u8], width: u32, height: u32) -> CompositorResult<RgbaImage> {
    let tree = usvg::Tree::from_data(bytes, &usvg::Options::default())
        .map_err(|e| CompositorError::Svg(e.to_string()))?;

    let mut pixmap = tiny_skia::Pixmap::new(width, height).ok_or_else(|| {
        CompositorError::InvalidParameter(format!("invalid raster size {width}x{height}"))
    })?;

    let size = tree.size();
    let transform = tiny_skia::Transform::from_scale(
        width as f32 / size.width(),
        height as f32 / size.height(),
    );
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    // tiny-skia keeps premultiplied alpha
    let data = pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect::<Vec<u8>>();

    RgbaImage::from_raw(width, height, data).ok_or_else(|| {
        CompositorError::InvalidParameter("rasterized buffer size mismatch".to_string())
    })
}

pub fn encode_png(canvas: &RgbaImage) -> CompositorResult<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    canvas.write_to(&mut buf, ImageFormat::Png)?;
    Ok(buf.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use image::Rgba;

    const SQUARE_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10" viewBox="0 0 10 10">
  <rect x="0" y="0" width="10" height="10" fill="#ff0000"/>
</svg>"##;

    #[test]
    fn test_png_encode_decode() -> Result<()> {
        let canvas = RgbaImage::from_pixel(16, 9, Rgba([10, 20, 30, 255]));
        let bytes = encode_png(&canvas)?;

        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
        assert_eq!(decode_image(&bytes)?, canvas);
        Ok(())
    }

    #[test]
    fn test_decode_garbage_fails() {
        let err = decode_image(b"definitely not an image").unwrap_err();
        assert!(matches!(err, CompositorError::Image(_)));
    }

    #[test]
    fn test_rasterize_svg_to_target_size() -> Result<()> {
        let img = rasterize_svg(SQUARE_SVG.as_bytes(), 120, 60)?;

        assert_eq!(img.dimensions(), (120, 60));
        assert_eq!(*img.get_pixel(60, 30), Rgba([255, 0, 0, 255]));
        Ok(())
    }

    #[test]
    fn test_rasterize_invalid_svg_fails() {
        let err = rasterize_svg(b"<svg", 10, 10).unwrap_err();
        assert!(matches!(err, CompositorError::Svg(_)));

        let err = rasterize_svg(SQUARE_SVG.as_bytes(), 0, 10).unwrap_err();
        assert!(matches!(err, CompositorError::InvalidParameter(_)));
    }
}
