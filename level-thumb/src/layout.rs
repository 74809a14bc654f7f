use image_compositor::Rectangle;

pub const CANVAS_WIDTH: u32 = 1280;
pub const CANVAS_HEIGHT: u32 = 720;
pub const MARGIN: u32 = 20;
pub const ICON_SIZE: u32 = 120;
pub const LOGO_SIZE: u32 = 70;

/// Difficulty badge, bottom-left corner.
pub fn icon_rect() -> Rectangle {
    Rectangle::new(
        MARGIN,
        CANVAS_HEIGHT - MARGIN - ICON_SIZE,
        ICON_SIZE,
        ICON_SIZE,
    )
}

/// Branding logo, top-right corner.
pub fn logo_rect() -> Rectangle {
    Rectangle::new(
        CANVAS_WIDTH - MARGIN - LOGO_SIZE,
        MARGIN,
        LOGO_SIZE,
        LOGO_SIZE,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_positions() {
        assert_eq!(icon_rect(), Rectangle::new(20, 580, 120, 120));
        assert_eq!(logo_rect(), Rectangle::new(1190, 20, 70, 70));
    }
}
