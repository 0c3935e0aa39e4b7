//! Outline of the centered aleph character.
//!
//! The glyph is kept as vector geometry so the ornament renders identically with no font
//! available. Coordinates are in em units centered on the origin.

use kurbo::{Affine, BezPath};

use crate::foundation::core::{Point, Rgba8};

/// Ink over the dark (left) half of the duality motif.
pub const INK_ON_DARK: Rgba8 = Rgba8::WHITE;
/// Ink over the light (right) half of the duality motif.
pub const INK_ON_LIGHT: Rgba8 = Rgba8::BLACK;

fn aleph_em() -> BezPath {
    let mut p = BezPath::new();

    // Diagonal stroke.
    p.move_to((-0.36, -0.40));
    p.line_to((-0.18, -0.40));
    p.line_to((0.36, 0.40));
    p.line_to((0.18, 0.40));
    p.close_path();

    // Upper right arm.
    p.move_to((0.02, -0.10));
    p.curve_to((0.22, -0.18), (0.22, -0.32), (0.30, -0.40));
    p.line_to((0.38, -0.40));
    p.curve_to((0.34, -0.22), (0.26, -0.08), (0.10, 0.00));
    p.close_path();

    // Lower left leg.
    p.move_to((-0.04, 0.04));
    p.curve_to((-0.22, 0.12), (-0.24, 0.28), (-0.30, 0.40));
    p.line_to((-0.14, 0.40));
    p.curve_to((-0.12, 0.28), (-0.04, 0.20), (0.06, 0.14));
    p.close_path();

    p
}

/// Aleph outline centered on `center`, `size` pixels tall per em.
pub fn aleph(center: Point, size: f64) -> BezPath {
    Affine::translate(center.to_vec2()) * Affine::scale(size) * aleph_em()
}

#[cfg(test)]
mod tests {
    use kurbo::Shape;

    use super::*;

    #[test]
    fn glyph_is_centered_and_scaled() {
        let g = aleph(Point::new(100.0, 50.0), 20.0);
        let b = g.bounding_box();
        assert!((b.center().x - 100.0).abs() < 0.5);
        assert!((b.center().y - 50.0).abs() < 0.5);
        assert!((b.height() - 16.0).abs() < 1e-6);
        assert!(g.contains(Point::new(100.0, 50.0)));
    }
}
