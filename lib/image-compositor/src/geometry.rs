/// Below this distance from 1.0 the width adjustment counts as "not applied",
/// which lets the height axis take over when the aspect ratios match.
const RATIO_EPSILON: f64 = 1e-14;

/// Destination region in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rectangle {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rectangle {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle at the origin covering `width` x `height`.
    pub fn sized(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }
}

/// Normalized point selecting which part of the source survives cropping.
///
/// Both components are clamped into `[0.0, 1.0]` on construction, so
/// `Anchor::new(-1.0, 2.0)` is the same anchor as `Anchor::new(0.0, 1.0)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    offset_x: f64,
    offset_y: f64,
}

impl Anchor {
    pub const CENTER: Anchor = Anchor {
        offset_x: 0.5,
        offset_y: 0.5,
    };

    pub const TOP_LEFT: Anchor = Anchor {
        offset_x: 0.0,
        offset_y: 0.0,
    };

    pub const BOTTOM_RIGHT: Anchor = Anchor {
        offset_x: 1.0,
        offset_y: 1.0,
    };

    pub fn new(offset_x: f64, offset_y: f64) -> Self {
        Self {
            offset_x: clamp_unit(offset_x),
            offset_y: clamp_unit(offset_y),
        }
    }

    pub fn offset_x(&self) -> f64 {
        self.offset_x
    }

    pub fn offset_y(&self) -> f64 {
        self.offset_y
    }
}

impl Default for Anchor {
    fn default() -> Self {
        Self::CENTER
    }
}

fn clamp_unit(v: f64) -> f64 {
    if v < 0.0 {
        0.0
    } else if v > 1.0 {
        1.0
    } else {
        v
    }
}

/// Region of the source image, in source pixels, that maps onto the destination.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceCrop {
    pub cx: f64,
    pub cy: f64,
    pub cw: f64,
    pub ch: f64,
}

/// Computes the cover-fit crop of a `source_width` x `source_height` image
/// for a `dest_width` x `dest_height` destination.
///
/// The returned crop has the destination's aspect ratio and lies inside the
/// source bounds. All dimensions must be positive; zero or negative inputs
/// give meaningless geometry.
pub fn compute_crop(
    source_width: f64,
    source_height: f64,
    dest_width: f64,
    dest_height: f64,
    anchor: Anchor,
) -> SourceCrop {
    // "contain" scale first, then stretch the axis that leaves a gap
    let r = (dest_width / source_width).min(dest_height / source_height);
    let mut nw = source_width * r;
    let mut nh = source_height * r;
    let mut ar = 1.0;

    if nw < dest_width {
        ar = dest_width / nw;
    }
    if (ar - 1.0).abs() < RATIO_EPSILON && nh < dest_height {
        ar = dest_height / nh;
    }

    nw *= ar;
    nh *= ar;

    let mut cw = source_width / (nw / dest_width);
    let mut ch = source_height / (nh / dest_height);
    let mut cx = (source_width - cw) * anchor.offset_x;
    let mut cy = (source_height - ch) * anchor.offset_y;

    if cx < 0.0 {
        cx = 0.0;
    }
    if cy < 0.0 {
        cy = 0.0;
    }
    if cw > source_width {
        cw = source_width;
    }
    if ch > source_height {
        ch = source_height;
    }

    SourceCrop { cx, cy, cw, ch }
}
