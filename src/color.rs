/// RGB color with normalized floating-point channels.
///
/// Channels are nominally in `0.0..=1.0` but are not clamped when set.
/// Out-of-range values only matter at encode time, where [`Color::to_bgr8`]
/// saturates them.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);
    pub const RED: Color = Color::new(1.0, 0.0, 0.0);
    pub const GREEN: Color = Color::new(0.0, 1.0, 0.0);
    pub const BLUE: Color = Color::new(0.0, 0.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build a color from a BMP pixel triple stored as `[blue, green, red]`.
    pub fn from_bgr8(bgr: [u8; 3]) -> Self {
        Self {
            r: f32::from(bgr[2]) / 255.0,
            g: f32::from(bgr[1]) / 255.0,
            b: f32::from(bgr[0]) / 255.0,
        }
    }

    /// Quantize to a BMP pixel triple `[blue, green, red]`.
    ///
    /// Each channel is scaled by 255 and truncated toward zero. Values below
    /// zero (and NaN) become 0, values above 1.0 become 255.
    pub fn to_bgr8(self) -> [u8; 3] {
        [
            quantize(self.b),
            quantize(self.g),
            quantize(self.r),
        ]
    }
}

// `as` from f32 truncates toward zero and saturates at the u8 range.
#[inline]
fn quantize(channel: f32) -> u8 {
    (channel * 255.0) as u8
}

#[cfg(feature = "rgb")]
impl From<rgb::RGB<f32>> for Color {
    fn from(px: rgb::RGB<f32>) -> Self {
        Self::new(px.r, px.g, px.b)
    }
}

#[cfg(feature = "rgb")]
impl From<Color> for rgb::RGB<f32> {
    fn from(c: Color) -> Self {
        rgb::RGB {
            r: c.r,
            g: c.g,
            b: c.b,
        }
    }
}
