//! Region → color resolution.
//!
//! A [`ColorSource`] answers "what color did the host configure for this region", possibly
//! with nothing. [`ColorResolver`] wraps a source with a per-instance cache and the built-in
//! fallback so that a lookup never fails.

use std::collections::{BTreeMap, HashMap};

use crate::{foundation::core::Rgba8, region::RegionId};

/// Pluggable color lookup capability.
pub trait ColorSource {
    fn lookup(&self, region: RegionId) -> Option<Rgba8>;
}

impl<F> ColorSource for F
where
    F: Fn(RegionId) -> Option<Rgba8>,
{
    fn lookup(&self, region: RegionId) -> Option<Rgba8> {
        self(region)
    }
}

/// The default color table. Defines a color for every region.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuiltinPalette;

impl BuiltinPalette {
    pub fn color(region: RegionId) -> Rgba8 {
        const CIRCLES: [u32; 6] = [0x000000, 0x00FF00, 0xFF0000, 0x8B4513, 0x0000FF, 0x00CED1];
        const PETALS: [u32; 6] = [0x90EE90, 0xFFA500, 0xFF6B6B, 0x4B0082, 0x87CEEB, 0x008B8B];
        const CENTER_PETALS: [u32; 6] = [0xFFD700, 0xADFF2F, 0xFF1493, 0xD2691E, 0x9370DB, 0xE0FFFF];
        const TRI_PETALS: [u32; 6] = [0xF5DEB3, 0xFF69B4, 0x7FFFD4, 0xBA55D3, 0xFFDAB9, 0x40E0D0];
        const INNER_SLIVERS: [u32; 12] = [
            0xFFFF00, 0xFFA500, 0xFF1493, 0x800080, 0xE6E6FA, 0xFFB6C1, 0x00FFFF, 0x98FB98,
            0xDDA0DD, 0xF0E68C, 0xFA8072, 0xADD8E6,
        ];

        fn pick(table: &[u32], n: u8) -> Rgba8 {
            let i = usize::from(n.max(1) - 1) % table.len();
            from_hex(table[i])
        }

        match region {
            RegionId::Circle(n) => pick(&CIRCLES, n),
            RegionId::CenterCircle => Rgba8::TRANSPARENT,
            RegionId::Petal(n) => pick(&PETALS, n),
            RegionId::CenterPetal(n) => pick(&CENTER_PETALS, n),
            RegionId::TriPetal(n) => pick(&TRI_PETALS, n),
            RegionId::InnerSliver(n) => pick(&INNER_SLIVERS, n),
            RegionId::Border => Rgba8::WHITE,
            RegionId::Background => Rgba8::WHITE,
        }
    }
}

impl ColorSource for BuiltinPalette {
    fn lookup(&self, region: RegionId) -> Option<Rgba8> {
        Some(Self::color(region))
    }
}

fn from_hex(v: u32) -> Rgba8 {
    Rgba8::rgb((v >> 16) as u8, (v >> 8) as u8, v as u8)
}

/// Colors supplied by the host configuration. Regions not listed resolve to nothing.
#[derive(Clone, Debug, Default)]
pub struct ConfiguredPalette {
    colors: BTreeMap<RegionId, Rgba8>,
}

impl ConfiguredPalette {
    pub fn new(colors: BTreeMap<RegionId, Rgba8>) -> Self {
        Self { colors }
    }
}

impl ColorSource for ConfiguredPalette {
    fn lookup(&self, region: RegionId) -> Option<Rgba8> {
        self.colors.get(&region).copied()
    }
}

/// Cached, infallible color lookup.
///
/// A missing value, or a transparent value for a region that must be visible, resolves to
/// the [`BuiltinPalette`] entry.
pub struct ColorResolver {
    source: Box<dyn ColorSource>,
    cache: HashMap<RegionId, Rgba8>,
}

impl ColorResolver {
    pub fn new(source: impl ColorSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            cache: HashMap::new(),
        }
    }

    pub fn builtin() -> Self {
        Self::new(BuiltinPalette)
    }

    pub fn configured(colors: BTreeMap<RegionId, Rgba8>) -> Self {
        Self::new(ConfiguredPalette::new(colors))
    }

    /// Swaps the lookup strategy. Cached colors are dropped.
    pub fn set_source(&mut self, source: impl ColorSource + 'static) {
        self.source = Box::new(source);
        self.cache.clear();
    }

    pub fn resolve(&mut self, region: RegionId) -> Rgba8 {
        if let Some(c) = self.cache.get(&region) {
            return *c;
        }

        let color = match self.source.lookup(region) {
            Some(c) if !c.is_transparent() || region.allows_transparent() => c,
            Some(_) => {
                tracing::debug!(%region, "transparent color for opaque region, using fallback");
                BuiltinPalette::color(region)
            }
            None => {
                tracing::debug!(%region, "no configured color, using fallback");
                BuiltinPalette::color(region)
            }
        };

        self.cache.insert(region, color);
        color
    }

    pub fn cached(&self, region: RegionId) -> Option<Rgba8> {
        self.cache.get(&region).copied()
    }

    /// Regions resolved since the cache was last cleared.
    pub fn resolved_regions(&self) -> Vec<RegionId> {
        let mut out: Vec<_> = self.cache.keys().copied().collect();
        out.sort();
        out
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }
}

impl Default for ColorResolver {
    fn default() -> Self {
        Self::builtin()
    }
}

impl std::fmt::Debug for ColorResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColorResolver")
            .field("cached", &self.cache.len())
            .finish_non_exhaustive()
    }
}
