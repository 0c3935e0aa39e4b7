use std::{collections::BTreeMap, path::Path};

use crate::{
    foundation::{
        core::Rgba8,
        error::{SeedError, SeedResult},
    },
    region::{CIRCLE_COUNT, MAX_INNER_SLIVERS, RegionId},
};

/// Everything a render pass reads. Replaceable between passes, never mutated during one.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    /// Circle radius as a fraction of surface width.
    pub radius_ratio: f64,
    /// Per-region overrides; anything absent resolves through the built-in palette.
    pub colors: BTreeMap<RegionId, Rgba8>,
    pub border_width: f64,
    pub opacity: LayerOpacity,
    pub layers: LayerToggles,
    pub inner_wedge_count: u8,
    pub layer_effect: LayerEffect,
    pub animation: AnimationConfig,
    /// Clip the whole pattern, background included, to a disc of the surface's min dimension.
    pub clip_to_disc: bool,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            radius_ratio: 0.16,
            colors: BTreeMap::new(),
            border_width: 3.0,
            opacity: LayerOpacity::default(),
            layers: LayerToggles::default(),
            inner_wedge_count: CIRCLE_COUNT as u8,
            layer_effect: LayerEffect::default(),
            animation: AnimationConfig::default(),
            clip_to_disc: false,
        }
    }
}

/// Fill alpha for each layer, before the pass opacity is applied.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LayerOpacity {
    pub primary: f64,
    pub intersection: f64,
    pub center_petal: f64,
    pub center: f64,
    pub inner_sliver: f64,
    pub tri_petal: f64,
}

impl Default for LayerOpacity {
    fn default() -> Self {
        Self {
            primary: 0.85,
            intersection: 0.9,
            center_petal: 0.85,
            center: 0.9,
            inner_sliver: 0.95,
            tri_petal: 0.9,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LayerToggles {
    pub center_petals: bool,
    pub tri_petals: bool,
    pub inner_wedges: bool,
    /// Turn the inner wedges with the circles. When off they stay at their rotation-0 angles.
    pub rotate_wedges: bool,
    pub wedge_separators: bool,
    pub ornaments: bool,
}

impl Default for LayerToggles {
    fn default() -> Self {
        Self {
            center_petals: true,
            tri_petals: false,
            inner_wedges: true,
            rotate_wedges: true,
            wedge_separators: true,
            ornaments: true,
        }
    }
}

/// Ghost/foreground double pass used while animating.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LayerEffect {
    pub enabled: bool,
    pub background_opacity: f64,
    pub foreground_opacity: f64,
    /// Scale of the static ghost pass about the surface midpoint.
    pub ghost_scale: f64,
}

impl Default for LayerEffect {
    fn default() -> Self {
        Self {
            enabled: true,
            background_opacity: 0.25,
            foreground_opacity: 1.0,
            ghost_scale: 0.95,
        }
    }
}

impl LayerEffect {
    pub fn set_background_opacity(&mut self, v: f64) {
        self.background_opacity = clamp_opacity("background_opacity", v, self.background_opacity);
    }

    pub fn set_foreground_opacity(&mut self, v: f64) {
        self.foreground_opacity = clamp_opacity("foreground_opacity", v, self.foreground_opacity);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub enabled: bool,
    /// Rotation advance per animation frame, in radians.
    pub step_rad: f64,
    /// Rotation per pixel of horizontal pointer drag, in radians.
    pub drag_rad_per_px: f64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            step_rad: 0.005,
            drag_rad_per_px: 0.01,
        }
    }
}

/// Clamps an opacity into `[0, 1]`. Non-finite input keeps `current`.
pub fn clamp_opacity(name: &str, v: f64, current: f64) -> f64 {
    if !v.is_finite() {
        tracing::warn!(name, value = v, "ignoring non-finite opacity");
        return current;
    }
    let clamped = v.clamp(0.0, 1.0);
    if clamped != v {
        tracing::warn!(name, value = v, clamped, "opacity out of range, clamping");
    }
    clamped
}

impl PatternConfig {
    pub fn from_json_str(s: &str) -> SeedResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg.normalized())
    }

    pub fn load_json(path: &Path) -> SeedResult<Self> {
        let s = std::fs::read_to_string(path).map_err(|e| {
            SeedError::Other(anyhow::Error::new(e).context(format!(
                "read pattern config '{}'",
                path.display()
            )))
        })?;
        Self::from_json_str(&s)
    }

    pub fn to_json_pretty(&self) -> SeedResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> SeedResult<()> {
        if !self.radius_ratio.is_finite() || self.radius_ratio <= 0.0 || self.radius_ratio > 0.5 {
            return Err(SeedError::validation("radius_ratio must be in (0, 0.5]"));
        }
        if !self.border_width.is_finite() || self.border_width < 0.0 {
            return Err(SeedError::validation("border_width must be finite and >= 0"));
        }
        let wedges = usize::from(self.inner_wedge_count);
        if !(CIRCLE_COUNT..=MAX_INNER_SLIVERS).contains(&wedges) {
            return Err(SeedError::validation(format!(
                "inner_wedge_count must be in {CIRCLE_COUNT}..={MAX_INNER_SLIVERS}"
            )));
        }
        let scale = self.layer_effect.ghost_scale;
        if !scale.is_finite() || scale <= 0.0 || scale > 1.0 {
            return Err(SeedError::validation("layer_effect.ghost_scale must be in (0, 1]"));
        }
        if !self.animation.step_rad.is_finite() || !self.animation.drag_rad_per_px.is_finite() {
            return Err(SeedError::validation("animation rates must be finite"));
        }
        Ok(())
    }

    /// Returns a copy with every opacity clamped into `[0, 1]`.
    pub fn normalized(mut self) -> Self {
        let o = &mut self.opacity;
        for (name, v) in [
            ("opacity.primary", &mut o.primary),
            ("opacity.intersection", &mut o.intersection),
            ("opacity.center_petal", &mut o.center_petal),
            ("opacity.center", &mut o.center),
            ("opacity.inner_sliver", &mut o.inner_sliver),
            ("opacity.tri_petal", &mut o.tri_petal),
        ] {
            *v = clamp_opacity(name, *v, 1.0);
        }
        let fx = &mut self.layer_effect;
        fx.background_opacity = clamp_opacity("background_opacity", fx.background_opacity, 0.25);
        fx.foreground_opacity = clamp_opacity("foreground_opacity", fx.foreground_opacity, 1.0);
        self
    }

    pub fn radius_for_width(&self, width: u32) -> f64 {
        f64::from(width) * self.radius_ratio
    }
}
