use std::f64::consts::{FRAC_PI_2, FRAC_PI_3, PI, TAU};

use kurbo::Point;
use seed_of_life::{Canvas, SeedLayout, circle_angle, circle_centers};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn centers_sit_on_the_ring_at_sixty_degree_steps() {
    let mid = Point::new(120.0, 75.0);
    for rotation in [0.0, 0.3, -1.7, 12.5] {
        let centers = circle_centers(mid, 40.0, rotation);
        for (i, c) in centers.iter().enumerate() {
            let d = *c - mid;
            assert!(approx(d.hypot(), 40.0), "circle {i} off the ring");
            let expected = i as f64 * FRAC_PI_3 - FRAC_PI_2 + rotation;
            assert!(approx(d.y.atan2(d.x).sin(), expected.sin()));
            assert!(approx(d.y.atan2(d.x).cos(), expected.cos()));
        }
    }
}

#[test]
fn full_turn_restores_every_center() {
    let mid = Point::new(250.0, 250.0);
    for rotation in [0.0, 0.005, 1.0, -2.25] {
        let a = circle_centers(mid, 80.0, rotation);
        let b = circle_centers(mid, 80.0, rotation + TAU);
        for (p, q) in a.iter().zip(b.iter()) {
            assert!(p.distance(*q) < 1e-9);
        }
    }
}

#[test]
fn five_hundred_square_layout() {
    let layout = SeedLayout::new(Canvas::new(500, 500).unwrap(), 0.16, 0.0);
    assert!(approx(layout.radius, 80.0));
    assert!(layout.circles[0].distance(Point::new(250.0, 170.0)) < 1e-9);
    assert!(layout.circles[3].distance(Point::new(250.0, 330.0)) < 1e-9);

    let a = circle_angle(1, 0.0);
    let expected = Point::new(250.0 + 80.0 * a.cos(), 250.0 + 80.0 * a.sin());
    assert!(layout.circles[1].distance(expected) < 1e-9);
}

#[test]
fn radius_follows_width_not_height() {
    let layout = SeedLayout::new(Canvas::new(400, 900).unwrap(), 0.25, 0.0);
    assert!(approx(layout.radius, 100.0));
    assert_eq!(layout.center, Point::new(200.0, 450.0));
}

#[test]
fn wedges_tile_the_inner_disc() {
    let layout = SeedLayout::new(Canvas::new(500, 500).unwrap(), 0.16, 0.0);
    for count in [6usize, 9, 12] {
        let mut end = None;
        let mut total = 0.0;
        for k in 0..count {
            let (start, sweep) = layout.wedge_span(k, count);
            if let Some(prev) = end {
                assert!(approx(start, prev), "gap before wedge {k} of {count}");
            }
            end = Some(start + sweep);
            total += sweep;
        }
        assert!(approx(total, TAU));
    }

    let (first, sweep) = layout.wedge_span(0, 6);
    assert!(approx(first, -FRAC_PI_2 - PI / 6.0));
    assert!(approx(sweep, FRAC_PI_3));
    assert!(approx(layout.inner_disc_radius(), 40.0));
}

#[test]
fn wedges_turn_with_the_pattern() {
    let canvas = Canvas::new(500, 500).unwrap();
    let still = SeedLayout::new(canvas, 0.16, 0.0);
    let turned = SeedLayout::new(canvas, 0.16, 0.4);
    let (a, _) = still.wedge_span(2, 6);
    let (b, _) = turned.wedge_span(2, 6);
    assert!(approx(b - a, 0.4));
}
