//! Colors and the categorical face palette.

/// Linear RGB color with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    /// Red.
    pub r: f32,
    /// Green.
    pub g: f32,
    /// Blue.
    pub b: f32,
}

impl Rgb {
    /// Pure white.
    pub const WHITE: Self = Self { r: 1.0, g: 1.0, b: 1.0 };
    /// Pure black.
    pub const BLACK: Self = Self { r: 0.0, g: 0.0, b: 0.0 };
    /// Pure red, the blade outline color.
    pub const RED: Self = Self { r: 1.0, g: 0.0, b: 0.0 };
    /// Neutral gray used for axis decorations.
    pub const GRAY: Self = Self { r: 0.55, g: 0.55, b: 0.55 };

    /// Create a color; components are clamped into `[0, 1]`.
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self {
            r: r.clamp(0.0, 1.0),
            g: g.clamp(0.0, 1.0),
            b: b.clamp(0.0, 1.0),
        }
    }

    /// From 8-bit components.
    pub fn from_u8(rgb: [u8; 3]) -> Self {
        Self::new(
            rgb[0] as f32 / 255.0,
            rgb[1] as f32 / 255.0,
            rgb[2] as f32 / 255.0,
        )
    }

    /// To 8-bit components.
    pub fn to_u8(self) -> [u8; 3] {
        let q = |c: f32| (c * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b)]
    }

    /// Multiply every component by `k`.
    pub fn scaled(self, k: f32) -> Self {
        Self::new(self.r * k, self.g * k, self.b * k)
    }
}

/// The ten-color categorical cycle surface plotters assign to consecutive surfaces.
pub const TAB10: [[u8; 3]; 10] = [
    [0x1f, 0x77, 0xb4],
    [0xff, 0x7f, 0x0e],
    [0x2c, 0xa0, 0x2c],
    [0xd6, 0x27, 0x28],
    [0x94, 0x67, 0xbd],
    [0x8c, 0x56, 0x4b],
    [0xe3, 0x77, 0xc2],
    [0x7f, 0x7f, 0x7f],
    [0xbc, 0xbd, 0x22],
    [0x17, 0xbe, 0xcf],
];

/// Face color for the `n`-th submitted surface.
pub fn cycle_color(n: usize) -> Rgb {
    Rgb::from_u8(TAB10[n % TAB10.len()])
}
