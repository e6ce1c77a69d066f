/// An axis-aligned clip rectangle in render-target pixels.
///
/// Scissors are plain values: two rectangles with the same bounds are the same clip,
/// whoever built them. "No clipping" is expressed as `Option::<Scissor>::None`, which
/// never compares equal to any rectangle, including a zero-sized one.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Scissor {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Scissor {
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// True if nothing drawn under this clip could be visible.
    ///
    /// NaN extents count as degenerate.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

impl From<[f32; 4]> for Scissor {
    fn from(area: [f32; 4]) -> Self {
        Self::new(area[0], area[1], area[2], area[3])
    }
}

impl From<(f32, f32, f32, f32)> for Scissor {
    fn from((x, y, width, height): (f32, f32, f32, f32)) -> Self {
        Self::new(x, y, width, height)
    }
}
