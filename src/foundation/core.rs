use crate::foundation::error::{SeedError, SeedResult};

pub use kurbo::{Affine, BezPath, Circle, Point, Rect, Vec2};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> SeedResult<Self> {
        if width == 0 || height == 0 {
            return Err(SeedError::validation("canvas dimensions must be > 0"));
        }
        Ok(Self { width, height })
    }

    pub fn center(self) -> Point {
        Point::new(f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }

    pub fn min_dim(self) -> f64 {
        f64::from(self.width.min(self.height))
    }

    pub fn rect(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }
}

/// Straight (non-premultiplied) RGBA8.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub fn is_transparent(self) -> bool {
        self.a == 0
    }

    /// Multiplies alpha by `factor` (clamped to 0..1), the way a canvas global alpha applies.
    pub fn scale_alpha(self, factor: f64) -> Self {
        let factor = if factor.is_finite() {
            factor.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let a = (f64::from(self.a) * factor).round().clamp(0.0, 255.0) as u8;
        Self { a, ..self }
    }

    pub fn to_premul(self) -> Rgba8Premul {
        Rgba8Premul::from_straight_rgba(self.r, self.g, self.b, self.a)
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba8Premul {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8Premul {
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canvas_rejects_zero_dimensions() {
        assert!(Canvas::new(0, 10).is_err());
        assert!(Canvas::new(10, 0).is_err());
        let c = Canvas::new(500, 400).unwrap();
        assert_eq!(c.center(), Point::new(250.0, 200.0));
        assert_eq!(c.min_dim(), 400.0);
    }

    #[test]
    fn scale_alpha_clamps_factor() {
        let c = Rgba8::rgb(10, 20, 30);
        assert_eq!(c.scale_alpha(0.5).a, 128);
        assert_eq!(c.scale_alpha(2.0).a, 255);
        assert_eq!(c.scale_alpha(-1.0).a, 0);
        assert_eq!(c.scale_alpha(f64::NAN).a, 0);
        assert_eq!(c.scale_alpha(0.5).r, 10);
    }

    #[test]
    fn premul_of_opaque_is_identity() {
        let c = Rgba8::rgb(200, 100, 50);
        assert_eq!(c.to_premul().to_array(), [200, 100, 50, 255]);
        assert_eq!(Rgba8::TRANSPARENT.to_premul(), Rgba8Premul::transparent());
    }
}
