use crate::foundation::{
    core::{Affine, BezPath, Canvas, Rect, Rgba8},
    error::SeedResult,
};

/// A rendered frame as RGBA8 pixels.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Straight-alpha copy of the pixel data, as image encoders expect.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        if !self.premultiplied {
            return self.data.clone();
        }
        let mut out = self.data.clone();
        for px in out.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        out
    }
}

/// 2D drawing target the pattern is painted onto.
///
/// Clip regions nest: every `push_clip` intersects with the clips already pushed until the
/// matching `pop_clip`. The current transform applies to every shape submitted after it is set,
/// clip paths included.
pub trait Surface {
    fn canvas(&self) -> Canvas;

    /// Starts a new frame. Prior content is discarded.
    fn begin_frame(&mut self);

    fn set_transform(&mut self, transform: Affine);

    fn fill_rect(&mut self, rect: Rect, color: Rgba8);

    fn fill_path(&mut self, path: &BezPath, color: Rgba8);

    fn stroke_path(&mut self, path: &BezPath, width: f64, color: Rgba8);

    fn push_clip(&mut self, path: &BezPath);

    fn pop_clip(&mut self);

    /// Finishes the frame, making it visible to readers of the surface.
    fn end_frame(&mut self) -> SeedResult<()>;
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn canvas(&self) -> Canvas {
        (**self).canvas()
    }

    fn begin_frame(&mut self) {
        (**self).begin_frame()
    }

    fn set_transform(&mut self, transform: Affine) {
        (**self).set_transform(transform)
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba8) {
        (**self).fill_rect(rect, color)
    }

    fn fill_path(&mut self, path: &BezPath, color: Rgba8) {
        (**self).fill_path(path, color)
    }

    fn stroke_path(&mut self, path: &BezPath, width: f64, color: Rgba8) {
        (**self).stroke_path(path, width, color)
    }

    fn push_clip(&mut self, path: &BezPath) {
        (**self).push_clip(path)
    }

    fn pop_clip(&mut self) {
        (**self).pop_clip()
    }

    fn end_frame(&mut self) -> SeedResult<()> {
        (**self).end_frame()
    }
}

/// Host lookup of drawing surfaces by id. `None` means the surface does not exist.
pub trait SurfaceProvider {
    type Surface: Surface;

    fn acquire(&mut self, id: &str) -> Option<Self::Surface>;
}
