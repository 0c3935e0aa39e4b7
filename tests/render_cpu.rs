use seed_of_life::{
    Canvas, CpuSurface, PatternConfig, PatternRenderer, RegionId, Rgba8, Surface as _,
};

fn mix64(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

fn digest_u64(bytes: &[u8]) -> u64 {
    let mut state = 0x9E37_79B9_7F4A_7C15u64;
    for chunk in bytes.chunks(8) {
        let mut v = 0u64;
        for (i, &b) in chunk.iter().enumerate() {
            v |= (b as u64) << (i * 8);
        }
        state = mix64(state ^ v);
    }
    state
}

fn render(config: PatternConfig, rotation: f64, animating: bool) -> CpuSurface {
    let mut surface = CpuSurface::new(Canvas::new(500, 500).unwrap()).unwrap();
    let mut renderer = PatternRenderer::new(config);
    renderer
        .render_frame(&mut surface, rotation, animating)
        .unwrap();
    surface
}

fn corners(surface: &CpuSurface) -> [[u8; 4]; 4] {
    let c = surface.canvas();
    let (w, h) = (c.width - 1, c.height - 1);
    [(0, 0), (w, 0), (0, h), (w, h)].map(|(x, y)| surface.pixel(x, y).unwrap())
}

#[test]
fn corners_keep_the_background_color() {
    let mut config = PatternConfig::default();
    config
        .colors
        .insert(RegionId::Background, Rgba8::rgb(0x12, 0x34, 0x56));

    let surface = render(config, 0.0, false);
    for px in corners(&surface) {
        assert_eq!(px, [0x12, 0x34, 0x56, 255]);
    }
}

#[test]
fn transparent_background_falls_back_to_white() {
    let mut config = PatternConfig::default();
    config.colors.insert(RegionId::Background, Rgba8::TRANSPARENT);

    let surface = render(config, 0.0, false);
    for px in corners(&surface) {
        assert_eq!(px, [255, 255, 255, 255]);
    }
}

#[test]
fn disc_clip_leaves_corners_empty() {
    let config = PatternConfig {
        clip_to_disc: true,
        ..PatternConfig::default()
    };
    let surface = render(config, 0.0, false);
    for px in corners(&surface) {
        assert_eq!(px, [0, 0, 0, 0]);
    }
    assert_eq!(surface.pixel(250, 5).unwrap()[3], 255);
}

#[test]
fn upper_circle_tracks_rotation() {
    // (250, 100) lies inside the upward circle only.
    let still = render(PatternConfig::default(), 0.0, false);
    let [r, g, b, a] = still.pixel(250, 100).unwrap();
    assert_eq!(a, 255);
    assert!(r < 60 && g < 60 && b < 60, "expected dark circle-1, got {r},{g},{b}");

    // A sixth of a turn brings circle 6 (dark turquoise) to the top.
    let turned = render(PatternConfig::default(), std::f64::consts::FRAC_PI_3, false);
    let [r, g, b, _] = turned.pixel(250, 100).unwrap();
    assert!(r < 80 && g > 150 && b > 150, "expected circle-6, got {r},{g},{b}");
}

#[test]
fn rendering_is_deterministic() {
    let a = render(PatternConfig::default(), 0.37, true);
    let b = render(PatternConfig::default(), 0.37, true);
    assert_eq!(
        digest_u64(&a.frame().data),
        digest_u64(&b.frame().data)
    );

    let c = render(PatternConfig::default(), 0.38, true);
    assert_ne!(a.frame().data, c.frame().data);
}

#[test]
fn save_png_round_trips_dimensions() {
    let dir = std::path::PathBuf::from("target").join("render_cpu");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("frame.png");

    let surface = render(PatternConfig::default(), 0.0, false);
    surface.save_png(&path).unwrap();

    let img = image::open(&path).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (500, 500));
    assert_eq!(img.get_pixel(0, 0).0, [255, 255, 255, 255]);
}

#[test]
fn wedges_show_through_a_transparent_center() {
    // Straight up from the midpoint, inside the first (yellow) wedge.
    let [r, g, b, a] = render(PatternConfig::default(), 0.0, false)
        .pixel(250, 220)
        .unwrap();
    assert_eq!(a, 255);
    assert!(r > 240 && g > 240 && b < 40, "expected yellow wedge, got {r},{g},{b}");
}

#[test]
fn opaque_center_covers_the_wedges() {
    let mut config = PatternConfig::default();
    config
        .colors
        .insert(RegionId::CenterCircle, Rgba8::rgb(0, 0, 255));
    let [r, g, b, _] = render(config, 0.0, false).pixel(250, 220).unwrap();
    assert!(r < 60 && g < 60 && b > 200, "expected blue center, got {r},{g},{b}");
}

#[test]
fn aleph_inverts_across_the_midline() {
    let surface = render(PatternConfig::default(), 0.0, false);
    let left = surface.pixel(247, 246).unwrap();
    let right = surface.pixel(252, 253).unwrap();
    assert!(left[..3].iter().all(|&c| c > 240), "left half ink: {left:?}");
    assert!(right[..3].iter().all(|&c| c < 15), "right half ink: {right:?}");
}
