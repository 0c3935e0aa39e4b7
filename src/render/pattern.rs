use kurbo::Shape;

use crate::{
    config::PatternConfig,
    foundation::{
        core::{Affine, Canvas, Circle, Rgba8},
        error::SeedResult,
    },
    geometry::{DUALITY_RATIO, DualityMotif, GLYPH_RATIO, PATH_TOLERANCE, SeedLayout, split_halves},
    glyph,
    palette::ColorResolver,
    region::{CIRCLE_COUNT, RegionId},
    render::surface::Surface,
};

const MOTIF_LIGHT: Rgba8 = Rgba8::WHITE;
const MOTIF_DARK: Rgba8 = Rgba8::BLACK;
const SEPARATOR_COLOR: Rgba8 = Rgba8::WHITE;
const SEPARATOR_ALPHA: f64 = 0.3;
const SEPARATOR_WIDTH: f64 = 1.0;
const MOTIF_OUTLINE_WIDTH: f64 = 1.0;

/// Which of the frame's passes is being painted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PassKind {
    /// The only pass of an idle frame.
    Single,
    /// Static, non-rotated trail pass painted under the foreground while animating.
    Ghost,
    /// Rotated pass painted over the ghost while animating.
    Foreground,
}

/// Paints the layered pattern onto a [`Surface`].
#[derive(Debug)]
pub struct PatternRenderer {
    config: PatternConfig,
    colors: ColorResolver,
}

impl PatternRenderer {
    pub fn new(config: PatternConfig) -> Self {
        let colors = ColorResolver::configured(config.colors.clone());
        Self { config, colors }
    }

    /// Uses `colors` instead of resolving from `config.colors`.
    pub fn with_resolver(config: PatternConfig, colors: ColorResolver) -> Self {
        Self { config, colors }
    }

    pub fn config(&self) -> &PatternConfig {
        &self.config
    }

    pub fn colors(&self) -> &ColorResolver {
        &self.colors
    }

    pub fn colors_mut(&mut self) -> &mut ColorResolver {
        &mut self.colors
    }

    /// Replaces the configuration. Cached colors are rebuilt from the new overrides.
    pub fn set_config(&mut self, config: PatternConfig) {
        self.colors = ColorResolver::configured(config.colors.clone());
        self.config = config;
    }

    pub fn set_layer_opacities(&mut self, background: Option<f64>, foreground: Option<f64>) {
        if let Some(v) = background {
            self.config.layer_effect.set_background_opacity(v);
        }
        if let Some(v) = foreground {
            self.config.layer_effect.set_foreground_opacity(v);
        }
    }

    pub fn set_layer_effect_enabled(&mut self, enabled: bool) {
        self.config.layer_effect.enabled = enabled;
    }

    pub fn layout(&self, canvas: Canvas, rotation: f64) -> SeedLayout {
        SeedLayout::new(canvas, self.config.radius_ratio, rotation)
    }

    /// Paints one complete frame: background, then either a single pass or, while animating
    /// with the layer effect enabled, the static ghost pass under the rotated foreground.
    #[tracing::instrument(level = "debug", skip(self, surface))]
    pub fn render_frame(
        &mut self,
        surface: &mut dyn Surface,
        rotation: f64,
        animating: bool,
    ) -> SeedResult<()> {
        let canvas = surface.canvas();
        surface.begin_frame();
        surface.set_transform(Affine::IDENTITY);

        let disc_clip = self.config.clip_to_disc.then(|| {
            Circle::new(canvas.center(), canvas.min_dim() / 2.0).to_path(PATH_TOLERANCE)
        });
        if let Some(clip) = &disc_clip {
            surface.push_clip(clip);
        }

        let background = self.colors.resolve(RegionId::Background);
        surface.fill_rect(canvas.rect(), background);

        if animating && self.config.layer_effect.enabled {
            self.paint_pass(surface, canvas, 0.0, PassKind::Ghost);
            self.paint_pass(surface, canvas, rotation, PassKind::Foreground);
        } else {
            self.paint_pass(surface, canvas, rotation, PassKind::Single);
        }

        if disc_clip.is_some() {
            surface.pop_clip();
        }
        surface.end_frame()
    }

    /// Paints every layer of one pass in z-order. The background is not touched.
    pub fn paint_pass(
        &mut self,
        surface: &mut dyn Surface,
        canvas: Canvas,
        rotation: f64,
        kind: PassKind,
    ) {
        let fx = self.config.layer_effect;
        let layer_opacity = match kind {
            PassKind::Single => 1.0,
            PassKind::Ghost => fx.background_opacity,
            PassKind::Foreground => fx.foreground_opacity,
        };

        let layout = self.layout(canvas, rotation);
        if kind == PassKind::Ghost {
            let c = layout.center.to_vec2();
            surface.set_transform(
                Affine::translate(c) * Affine::scale(fx.ghost_scale) * Affine::translate(-c),
            );
        }

        let layers = self.config.layers;
        self.paint_base(surface, &layout, layer_opacity);
        self.paint_petals(surface, &layout, layer_opacity);
        if layers.center_petals {
            self.paint_center_petals(surface, &layout, layer_opacity);
        }
        if layers.tri_petals {
            self.paint_tri_petals(surface, &layout, layer_opacity);
        }
        if layers.inner_wedges {
            self.paint_inner_wedges(surface, &layout, layer_opacity);
        }
        self.paint_center_disc(surface, &layout, layer_opacity);
        self.paint_borders(surface, &layout, layer_opacity, kind == PassKind::Ghost);
        if layers.ornaments && kind != PassKind::Ghost {
            self.paint_ornaments(surface, canvas, &layout, layer_opacity);
        }

        surface.set_transform(Affine::IDENTITY);
        tracing::debug!(?kind, rotation, layer_opacity, "pass painted");
    }

    fn paint_base(&mut self, surface: &mut dyn Surface, layout: &SeedLayout, layer: f64) {
        let alpha = self.config.opacity.primary * layer;
        for i in 0..CIRCLE_COUNT {
            let color = self.colors.resolve(RegionId::circle_at(i));
            surface.fill_path(&layout.circle_path(i), color.scale_alpha(alpha));
        }
    }

    fn paint_petals(&mut self, surface: &mut dyn Surface, layout: &SeedLayout, layer: f64) {
        let alpha = self.config.opacity.intersection * layer;
        for i in 0..CIRCLE_COUNT {
            let color = self.colors.resolve(RegionId::petal_at(i));
            surface.push_clip(&layout.circle_path(i));
            surface.fill_path(&layout.circle_path(i + 1), color.scale_alpha(alpha));
            surface.pop_clip();
        }
    }

    fn paint_center_petals(&mut self, surface: &mut dyn Surface, layout: &SeedLayout, layer: f64) {
        let alpha = self.config.opacity.center_petal * layer;
        let center = layout.center_path();
        for i in 0..CIRCLE_COUNT {
            let color = self.colors.resolve(RegionId::center_petal_at(i));
            surface.push_clip(&layout.circle_path(i));
            surface.fill_path(&center, color.scale_alpha(alpha));
            surface.pop_clip();
        }
    }

    fn paint_tri_petals(&mut self, surface: &mut dyn Surface, layout: &SeedLayout, layer: f64) {
        let alpha = self.config.opacity.tri_petal * layer;
        let center = layout.center_path();
        for i in 0..CIRCLE_COUNT {
            let color = self.colors.resolve(RegionId::tri_petal_at(i));
            for k in 0..3 {
                surface.push_clip(&layout.circle_path(i + k));
            }
            surface.fill_path(&center, color.scale_alpha(alpha));
            for _ in 0..3 {
                surface.pop_clip();
            }
        }
    }

    fn paint_inner_wedges(&mut self, surface: &mut dyn Surface, layout: &SeedLayout, layer: f64) {
        let alpha = self.config.opacity.inner_sliver * layer;
        let count = usize::from(self.config.inner_wedge_count);
        let fixed;
        let layout = if self.config.layers.rotate_wedges {
            layout
        } else {
            fixed = SeedLayout {
                rotation: 0.0,
                ..*layout
            };
            &fixed
        };
        for k in 0..count {
            let color = self.colors.resolve(RegionId::inner_sliver_at(k));
            surface.fill_path(&layout.wedge_path(k, count), color.scale_alpha(alpha));
        }

        if self.config.layers.wedge_separators {
            let ink = SEPARATOR_COLOR.scale_alpha(SEPARATOR_ALPHA * layer);
            for k in 0..count {
                surface.stroke_path(&layout.wedge_separator(k, count), SEPARATOR_WIDTH, ink);
            }
            surface.stroke_path(&layout.inner_disc_path(), SEPARATOR_WIDTH, ink);
        }
    }

    fn paint_center_disc(&mut self, surface: &mut dyn Surface, layout: &SeedLayout, layer: f64) {
        let color = self.colors.resolve(RegionId::CenterCircle);
        if color.is_transparent() {
            return;
        }
        let alpha = self.config.opacity.center * layer;
        surface.fill_path(&layout.center_path(), color.scale_alpha(alpha));
    }

    fn paint_borders(
        &mut self,
        surface: &mut dyn Surface,
        layout: &SeedLayout,
        layer: f64,
        ghost: bool,
    ) {
        let color = self.colors.resolve(RegionId::Border);
        let (alpha, width) = if ghost {
            (layer * 0.5, self.config.border_width * 0.5)
        } else {
            (layer, self.config.border_width)
        };
        if width <= 0.0 {
            return;
        }

        let ink = color.scale_alpha(alpha);
        for i in 0..CIRCLE_COUNT {
            surface.stroke_path(&layout.circle_path(i), width, ink);
        }
        surface.stroke_path(&layout.center_path(), width, ink);
    }

    fn paint_ornaments(
        &mut self,
        surface: &mut dyn Surface,
        canvas: Canvas,
        layout: &SeedLayout,
        layer: f64,
    ) {
        let light = MOTIF_LIGHT.scale_alpha(layer);
        let dark = MOTIF_DARK.scale_alpha(layer);

        let motif = DualityMotif::new(layout.center, layout.radius * DUALITY_RATIO);
        surface.fill_path(&motif.disc, light);
        surface.stroke_path(&motif.disc, MOTIF_OUTLINE_WIDTH, dark);
        surface.fill_path(&motif.dark_half, dark);
        surface.fill_path(&motif.dark_lobe, dark);
        surface.fill_path(&motif.light_lobe, light);
        surface.fill_path(&motif.light_dot, light);
        surface.fill_path(&motif.dark_dot, dark);

        let aleph = glyph::aleph(layout.center, layout.radius * GLYPH_RATIO);
        let (left, right) = split_halves(canvas);
        for (half, ink) in [(left, glyph::INK_ON_DARK), (right, glyph::INK_ON_LIGHT)] {
            surface.push_clip(&half.to_path(PATH_TOLERANCE));
            surface.fill_path(&aleph, ink.scale_alpha(layer));
            surface.pop_clip();
        }
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Shape;

    use super::*;
    use crate::{
        config::LayerToggles,
        foundation::core::BezPath,
        render::record::{DrawCommand, RecordingSurface},
    };

    fn record(config: PatternConfig, rotation: f64, animating: bool) -> RecordingSurface {
        let mut surface = RecordingSurface::new(Canvas::new(500, 500).unwrap());
        PatternRenderer::new(config)
            .render_frame(&mut surface, rotation, animating)
            .unwrap();
        surface
    }

    fn white_strokes(surface: &RecordingSurface, width: f64) -> Vec<Rgba8> {
        surface
            .strokes()
            .filter(|(_, w, c)| *w == width && (c.r, c.g, c.b) == (255, 255, 255))
            .map(|(_, _, c)| c)
            .collect()
    }

    #[test]
    fn ghost_borders_are_half_width_and_half_alpha() {
        let idle = record(PatternConfig::default(), 0.2, false);
        assert!(white_strokes(&idle, 1.5).is_empty());
        assert_eq!(white_strokes(&idle, 3.0).len(), 7);

        let animating = record(PatternConfig::default(), 0.2, true);
        let ghost = white_strokes(&animating, 1.5);
        assert_eq!(ghost.len(), 7);
        // 0.25 layer opacity, halved.
        assert!(ghost.iter().all(|c| c.a == 32));
        let fg = white_strokes(&animating, 3.0);
        assert_eq!(fg.len(), 7);
        assert!(fg.iter().all(|c| c.a == 255));
    }

    #[test]
    fn ornaments_skip_the_ghost_pass() {
        let bare = PatternConfig {
            layers: LayerToggles {
                ornaments: false,
                ..LayerToggles::default()
            },
            ..PatternConfig::default()
        };
        for animating in [false, true] {
            let with = record(PatternConfig::default(), 0.0, animating).fills().count();
            let without = record(bare.clone(), 0.0, animating).fills().count();
            // Six motif fills plus the aleph twice, painted once per frame.
            assert_eq!(with - without, 8, "animating: {animating}");
        }
    }

    #[test]
    fn aleph_is_light_left_and_dark_right() {
        let s = record(PatternConfig::default(), 0.0, false);
        let tail = &s.commands()[s.commands().len() - 7..];
        let DrawCommand::PushClip(left) = &tail[0] else {
            panic!("expected left clip, got {:?}", tail[0]);
        };
        assert_eq!(left.bounding_box().x1, 250.0);
        assert!(matches!(&tail[1], DrawCommand::FillPath { color, .. } if *color == Rgba8::WHITE));
        assert_eq!(tail[2], DrawCommand::PopClip);
        let DrawCommand::PushClip(right) = &tail[3] else {
            panic!("expected right clip, got {:?}", tail[3]);
        };
        assert_eq!(right.bounding_box().x0, 250.0);
        assert!(matches!(&tail[4], DrawCommand::FillPath { color, .. } if *color == Rgba8::BLACK));
        assert_eq!(tail[5], DrawCommand::PopClip);
    }

    #[test]
    fn transparent_center_is_not_filled() {
        let layout = SeedLayout::new(Canvas::new(500, 500).unwrap(), 0.16, 0.0);
        let center = layout.center_path();
        let s = record(PatternConfig::default(), 0.0, false);
        // Only the six clipped center petals use the center disc.
        assert_eq!(s.fills().filter(|(p, _)| **p == center).count(), 6);
    }

    #[test]
    fn opaque_center_is_painted_over_the_wedges() {
        let mut config = PatternConfig::default();
        config
            .colors
            .insert(RegionId::CenterCircle, Rgba8::rgb(1, 2, 3));
        let s = record(config, 0.0, false);

        let fills: Vec<_> = s.fills().collect();
        let center_at = fills
            .iter()
            .position(|(_, c)| (c.r, c.g, c.b) == (1, 2, 3))
            .unwrap();
        assert_eq!(fills[center_at].1.a, 230);

        let layout = SeedLayout::new(Canvas::new(500, 500).unwrap(), 0.16, 0.0);
        let last_wedge = fills
            .iter()
            .rposition(|(p, _)| **p == layout.wedge_path(5, 6))
            .unwrap();
        assert!(center_at > last_wedge);
    }

    #[test]
    fn tri_petals_nest_three_clips() {
        let s = record(PatternConfig::default(), 0.0, false);
        assert_eq!(s.max_clip_depth(), 1);

        let mut config = PatternConfig::default();
        config.layers.tri_petals = true;
        assert_eq!(record(config.clone(), 0.0, false).max_clip_depth(), 3);

        config.clip_to_disc = true;
        assert_eq!(record(config, 0.0, false).max_clip_depth(), 4);
    }

    #[test]
    fn wedge_rotation_can_be_pinned() {
        fn first_wedge(config: &PatternConfig, rotation: f64) -> BezPath {
            let s = record(config.clone(), rotation, false);
            s.fills()
                .find(|(_, c)| (c.r, c.g, c.b) == (255, 255, 0))
                .map(|(p, _)| p.clone())
                .unwrap()
        }

        let turning = PatternConfig::default();
        assert_ne!(first_wedge(&turning, 0.0), first_wedge(&turning, 0.7));

        let mut pinned = PatternConfig::default();
        pinned.layers.rotate_wedges = false;
        assert_eq!(first_wedge(&pinned, 0.0), first_wedge(&pinned, 0.7));
    }
}
