//! Layout of the six-circle pattern and the shapes painted for each layer.
//!
//! Angles follow screen conventions: y grows downward, so increasing angles turn clockwise and
//! `-π/2` points up.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use kurbo::{Arc, BezPath, CircleSegment, Shape};

use crate::{
    foundation::core::{Canvas, Circle, Point, Rect, Vec2},
    region::CIRCLE_COUNT,
};

/// Flattening tolerance used when turning curves into paths, in pixels.
pub const PATH_TOLERANCE: f64 = 0.1;

pub const INNER_DISC_RATIO: f64 = 0.5;
pub const DUALITY_RATIO: f64 = 0.3;
pub const GLYPH_RATIO: f64 = 0.2;

/// Angle of circle `index` around the midpoint.
pub fn circle_angle(index: usize, rotation: f64) -> f64 {
    (index as f64) * (PI / 3.0) - FRAC_PI_2 + rotation
}

pub fn circle_centers(center: Point, radius: f64, rotation: f64) -> [Point; CIRCLE_COUNT] {
    std::array::from_fn(|i| {
        let a = circle_angle(i, rotation);
        center + Vec2::new(a.cos(), a.sin()) * radius
    })
}

/// Resolved positions for one render pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SeedLayout {
    pub center: Point,
    pub radius: f64,
    pub rotation: f64,
    pub circles: [Point; CIRCLE_COUNT],
}

impl SeedLayout {
    pub fn new(canvas: Canvas, radius_ratio: f64, rotation: f64) -> Self {
        let center = canvas.center();
        let radius = f64::from(canvas.width) * radius_ratio;
        Self {
            center,
            radius,
            rotation,
            circles: circle_centers(center, radius, rotation),
        }
    }

    pub fn circle(&self, i: usize) -> Circle {
        Circle::new(self.circles[i % CIRCLE_COUNT], self.radius)
    }

    pub fn center_disc(&self) -> Circle {
        Circle::new(self.center, self.radius)
    }

    pub fn circle_path(&self, i: usize) -> BezPath {
        self.circle(i).to_path(PATH_TOLERANCE)
    }

    pub fn center_path(&self) -> BezPath {
        self.center_disc().to_path(PATH_TOLERANCE)
    }

    pub fn inner_disc_radius(&self) -> f64 {
        self.radius * INNER_DISC_RATIO
    }

    /// Start angle and sweep of inner wedge `k` out of `count`. The first wedge is centered on
    /// circle 0, so with six wedges every boundary sits 30° off a circle angle.
    pub fn wedge_span(&self, k: usize, count: usize) -> (f64, f64) {
        let sweep = TAU / count as f64;
        let start = (k as f64) * sweep - FRAC_PI_2 - sweep / 2.0 + self.rotation;
        (start, sweep)
    }

    pub fn wedge_path(&self, k: usize, count: usize) -> BezPath {
        let (start, sweep) = self.wedge_span(k, count);
        CircleSegment::new(self.center, self.inner_disc_radius(), 0.0, start, sweep)
            .to_path(PATH_TOLERANCE)
    }

    /// Radial separator line at the start edge of wedge `k`.
    pub fn wedge_separator(&self, k: usize, count: usize) -> BezPath {
        let (start, _) = self.wedge_span(k, count);
        let mut p = BezPath::new();
        p.move_to(self.center);
        p.line_to(self.center + Vec2::new(start.cos(), start.sin()) * self.inner_disc_radius());
        p
    }

    pub fn inner_disc_path(&self) -> BezPath {
        Circle::new(self.center, self.inner_disc_radius()).to_path(PATH_TOLERANCE)
    }
}

/// Paths of the two-tone duality motif, painted in field order.
#[derive(Clone, Debug)]
pub struct DualityMotif {
    /// Full disc, painted light and outlined dark.
    pub disc: BezPath,
    /// Left half, painted dark.
    pub dark_half: BezPath,
    /// Upper lobe, painted dark.
    pub dark_lobe: BezPath,
    /// Lower lobe, painted light.
    pub light_lobe: BezPath,
    /// Small dot inside the dark lobe, painted light.
    pub light_dot: BezPath,
    /// Small dot inside the light lobe, painted dark.
    pub dark_dot: BezPath,
}

impl DualityMotif {
    pub fn new(center: Point, radius: f64) -> Self {
        let circle = |c: Point, r: f64| Circle::new(c, r).to_path(PATH_TOLERANCE);
        let upper = center - Vec2::new(0.0, radius / 2.0);
        let lower = center + Vec2::new(0.0, radius / 2.0);

        // From the bottom, clockwise through the left-most point, to the top.
        let half_arc = Arc::new(center, (radius, radius), FRAC_PI_2, PI, 0.0);
        let mut dark_half = BezPath::new();
        dark_half.move_to(center + Vec2::new(0.0, radius));
        half_arc.to_cubic_beziers(PATH_TOLERANCE, |p1, p2, p3| dark_half.curve_to(p1, p2, p3));
        dark_half.close_path();

        Self {
            disc: circle(center, radius),
            dark_half,
            dark_lobe: circle(upper, radius / 2.0),
            light_lobe: circle(lower, radius / 2.0),
            light_dot: circle(upper, radius / 6.0),
            dark_dot: circle(lower, radius / 6.0),
        }
    }
}

/// Left and right halves of the canvas, split at the midpoint.
pub fn split_halves(canvas: Canvas) -> (Rect, Rect) {
    let r = canvas.rect();
    let mid = canvas.center().x;
    (
        Rect::new(r.x0, r.y0, mid, r.y1),
        Rect::new(mid, r.y0, r.x1, r.y1),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_circle_points_up() {
        let c = circle_centers(Point::new(0.0, 0.0), 10.0, 0.0);
        assert!((c[0].x - 0.0).abs() < 1e-9);
        assert!((c[0].y + 10.0).abs() < 1e-9);
    }

    #[test]
    fn six_wedges_are_offset_half_a_step() {
        let layout = SeedLayout::new(Canvas::new(100, 100).unwrap(), 0.16, 0.0);
        let (start, sweep) = layout.wedge_span(0, 6);
        assert!((sweep - PI / 3.0).abs() < 1e-12);
        assert!((start - (circle_angle(0, 0.0) - PI / 6.0)).abs() < 1e-12);
    }

    #[test]
    fn dark_half_covers_the_left_side() {
        let m = DualityMotif::new(Point::new(50.0, 50.0), 20.0);
        let b = m.dark_half.bounding_box();
        assert!((b.x0 - 30.0).abs() < 0.5);
        assert!((b.x1 - 50.0).abs() < 0.5);
        assert!(m.dark_half.contains(Point::new(40.0, 50.0)));
        assert!(!m.dark_half.contains(Point::new(60.0, 50.0)));
    }

    #[test]
    fn halves_meet_at_midpoint() {
        let (l, r) = split_halves(Canvas::new(200, 100).unwrap());
        assert_eq!(l.x1, 100.0);
        assert_eq!(r.x0, 100.0);
        assert_eq!(r.x1, 200.0);
    }
}
