//! A surface that keeps the draw calls instead of rasterizing them.

use crate::{
    foundation::{
        core::{Affine, BezPath, Canvas, Rect, Rgba8},
        error::{SeedError, SeedResult},
    },
    render::surface::Surface,
};

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    SetTransform(Affine),
    FillRect { rect: Rect, color: Rgba8 },
    FillPath { path: BezPath, color: Rgba8 },
    StrokePath { path: BezPath, width: f64, color: Rgba8 },
    PushClip(BezPath),
    PopClip,
}

#[derive(Clone, Debug)]
pub struct RecordingSurface {
    canvas: Canvas,
    commands: Vec<DrawCommand>,
    frames: u64,
    open: bool,
}

impl RecordingSurface {
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            commands: Vec::new(),
            frames: 0,
            open: false,
        }
    }

    /// Commands of the current (or last finished) frame.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of frames finished so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn fills(&self) -> impl Iterator<Item = (&BezPath, Rgba8)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::FillPath { path, color } => Some((path, *color)),
            _ => None,
        })
    }

    pub fn strokes(&self) -> impl Iterator<Item = (&BezPath, f64, Rgba8)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::StrokePath { path, width, color } => Some((path, *width, *color)),
            _ => None,
        })
    }

    /// Greatest clip nesting reached in the current frame.
    pub fn max_clip_depth(&self) -> usize {
        let mut depth = 0usize;
        let mut max = 0usize;
        for c in &self.commands {
            match c {
                DrawCommand::PushClip(_) => {
                    depth += 1;
                    max = max.max(depth);
                }
                DrawCommand::PopClip => depth = depth.saturating_sub(1),
                _ => {}
            }
        }
        max
    }
}

impl Surface for RecordingSurface {
    fn canvas(&self) -> Canvas {
        self.canvas
    }

    fn begin_frame(&mut self) {
        self.commands.clear();
        self.open = true;
    }

    fn set_transform(&mut self, transform: Affine) {
        self.commands.push(DrawCommand::SetTransform(transform));
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba8) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn fill_path(&mut self, path: &BezPath, color: Rgba8) {
        self.commands.push(DrawCommand::FillPath {
            path: path.clone(),
            color,
        });
    }

    fn stroke_path(&mut self, path: &BezPath, width: f64, color: Rgba8) {
        self.commands.push(DrawCommand::StrokePath {
            path: path.clone(),
            width,
            color,
        });
    }

    fn push_clip(&mut self, path: &BezPath) {
        self.commands.push(DrawCommand::PushClip(path.clone()));
    }

    fn pop_clip(&mut self) {
        self.commands.push(DrawCommand::PopClip);
    }

    fn end_frame(&mut self) -> SeedResult<()> {
        if !self.open {
            return Err(SeedError::render("end_frame without begin_frame"));
        }
        let pushes = self
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::PushClip(_)))
            .count();
        let pops = self
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::PopClip))
            .count();
        if pushes != pops {
            return Err(SeedError::render(format!(
                "unbalanced clips: {pushes} pushed, {pops} popped"
            )));
        }
        self.open = false;
        self.frames += 1;
        Ok(())
    }
}
