use std::{collections::BTreeMap, path::Path};

use anyhow::Context as _;

use crate::{
    foundation::{
        core::{Affine, BezPath, Canvas, Rect, Rgba8},
        error::{SeedError, SeedResult},
    },
    render::surface::{FrameRGBA, Surface, SurfaceProvider},
};

/// CPU raster surface powered by `vello_cpu`.
pub struct CpuSurface {
    canvas: Canvas,
    ctx: vello_cpu::RenderContext,
    pixmap: vello_cpu::Pixmap,
    clip_depth: usize,
}

impl CpuSurface {
    pub fn new(canvas: Canvas) -> SeedResult<Self> {
        let width: u16 = canvas
            .width
            .try_into()
            .map_err(|_| SeedError::render("surface width exceeds u16"))?;
        let height: u16 = canvas
            .height
            .try_into()
            .map_err(|_| SeedError::render("surface height exceeds u16"))?;
        if width == 0 || height == 0 {
            return Err(SeedError::render("surface dimensions must be > 0"));
        }

        Ok(Self {
            canvas,
            ctx: vello_cpu::RenderContext::new(width, height),
            pixmap: vello_cpu::Pixmap::new(width, height),
            clip_depth: 0,
        })
    }

    /// Premultiplied RGBA8 copy of the last finished frame.
    pub fn frame(&self) -> FrameRGBA {
        FrameRGBA {
            width: self.canvas.width,
            height: self.canvas.height,
            data: self.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.canvas.width || y >= self.canvas.height {
            return None;
        }
        let i = ((y as usize) * (self.canvas.width as usize) + (x as usize)) * 4;
        let px = self.pixmap.data_as_u8_slice().get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    pub fn save_png(&self, path: &Path) -> SeedResult<()> {
        let frame = self.frame();
        image::save_buffer_with_format(
            path,
            &frame.to_straight_rgba8(),
            frame.width,
            frame.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }

    fn set_color(&mut self, color: Rgba8) {
        self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            color.r, color.g, color.b, color.a,
        ));
    }
}

impl Surface for CpuSurface {
    fn canvas(&self) -> Canvas {
        self.canvas
    }

    fn begin_frame(&mut self) {
        self.ctx.reset();
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.clip_depth = 0;
    }

    fn set_transform(&mut self, transform: Affine) {
        self.ctx.set_transform(affine_to_cpu(transform));
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba8) {
        if color.is_transparent() {
            return;
        }
        self.set_color(color);
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            rect.x0, rect.y0, rect.x1, rect.y1,
        ));
    }

    fn fill_path(&mut self, path: &BezPath, color: Rgba8) {
        if color.is_transparent() {
            return;
        }
        self.set_color(color);
        self.ctx.fill_path(&bezpath_to_cpu(path));
    }

    fn stroke_path(&mut self, path: &BezPath, width: f64, color: Rgba8) {
        if color.is_transparent() || width <= 0.0 {
            return;
        }
        self.set_color(color);
        self.ctx.set_stroke(vello_cpu::kurbo::Stroke::new(width));
        self.ctx.stroke_path(&bezpath_to_cpu(path));
    }

    fn push_clip(&mut self, path: &BezPath) {
        self.ctx.push_clip_layer(&bezpath_to_cpu(path));
        self.clip_depth += 1;
    }

    fn pop_clip(&mut self) {
        if self.clip_depth == 0 {
            tracing::warn!("pop_clip without a matching push_clip");
            return;
        }
        self.ctx.pop_layer();
        self.clip_depth -= 1;
    }

    fn end_frame(&mut self) -> SeedResult<()> {
        while self.clip_depth > 0 {
            self.ctx.pop_layer();
            self.clip_depth -= 1;
        }
        // `vello_cpu` renders into a fresh buffer; the background fill is part of the frame.
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut self.pixmap);
        Ok(())
    }
}

/// Named canvases a host has laid out. Acquiring an unknown id yields nothing.
#[derive(Clone, Debug, Default)]
pub struct CpuSurfaces {
    canvases: BTreeMap<String, Canvas>,
}

impl CpuSurfaces {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, id: impl Into<String>, canvas: Canvas) -> &mut Self {
        self.canvases.insert(id.into(), canvas);
        self
    }
}

impl SurfaceProvider for CpuSurfaces {
    type Surface = CpuSurface;

    fn acquire(&mut self, id: &str) -> Option<CpuSurface> {
        let canvas = *self.canvases.get(id)?;
        match CpuSurface::new(canvas) {
            Ok(s) => Some(s),
            Err(err) => {
                tracing::error!(id, %err, "cannot create cpu surface");
                None
            }
        }
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: kurbo::Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}
