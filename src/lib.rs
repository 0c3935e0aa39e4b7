#![forbid(unsafe_code)]

pub mod anim;
pub mod config;
pub mod foundation;
pub mod geometry;
pub mod glyph;
pub mod instance;
pub mod palette;
pub mod region;
pub mod render;

pub use anim::{AnimationPhase, FrameHandle, FrameScheduler, ManualScheduler, RenderState};
pub use config::{AnimationConfig, LayerEffect, LayerOpacity, LayerToggles, PatternConfig};
pub use foundation::color::parse_color;
pub use foundation::core::{Canvas, Rgba8, Rgba8Premul};
pub use foundation::error::{SeedError, SeedResult};
pub use geometry::{DualityMotif, SeedLayout, circle_angle, circle_centers};
pub use instance::SeedOfLife;
pub use palette::{BuiltinPalette, ColorResolver, ColorSource, ConfiguredPalette};
pub use region::RegionId;
pub use render::cpu::{CpuSurface, CpuSurfaces};
pub use render::record::{DrawCommand, RecordingSurface};
pub use render::{FrameRGBA, PassKind, PatternRenderer, Surface, SurfaceProvider};
