pub mod cpu;
pub mod pattern;
pub mod record;
pub mod surface;

pub use pattern::{PassKind, PatternRenderer};
pub use surface::{FrameRGBA, Surface, SurfaceProvider};
