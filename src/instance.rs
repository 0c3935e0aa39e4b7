//! The per-surface handle an embedding shell drives.

use crate::{
    anim::{AnimationPhase, FrameHandle, FrameScheduler, RenderState},
    config::PatternConfig,
    foundation::error::{SeedError, SeedResult},
    render::{PatternRenderer, Surface, SurfaceProvider},
};

/// One rendered pattern: owns its surface, configuration, rotation and frame request.
///
/// Dropping the handle cancels any outstanding frame request.
pub struct SeedOfLife<S: Surface, F: FrameScheduler> {
    id: String,
    surface: S,
    scheduler: F,
    renderer: PatternRenderer,
    state: RenderState,
    draw_count: u64,
}

impl<S: Surface, F: FrameScheduler> SeedOfLife<S, F> {
    /// Looks up surface `id` and paints the first frame. A missing surface or an invalid
    /// configuration is logged and yields `None`.
    pub fn init<P>(provider: &mut P, id: &str, config: PatternConfig, scheduler: F) -> Option<Self>
    where
        P: SurfaceProvider<Surface = S>,
    {
        match Self::try_init(provider, id, config, scheduler) {
            Ok(instance) => Some(instance),
            Err(err) => {
                tracing::error!(id, %err, "seed of life initialization aborted");
                None
            }
        }
    }

    pub fn try_init<P>(
        provider: &mut P,
        id: &str,
        config: PatternConfig,
        scheduler: F,
    ) -> SeedResult<Self>
    where
        P: SurfaceProvider<Surface = S>,
    {
        config.validate()?;
        let surface = provider
            .acquire(id)
            .ok_or_else(|| SeedError::missing_surface(id))?;
        Self::from_surface(id, surface, config, scheduler)
    }

    pub fn from_surface(
        id: &str,
        surface: S,
        config: PatternConfig,
        scheduler: F,
    ) -> SeedResult<Self> {
        config.validate()?;
        let mut instance = Self {
            id: id.to_owned(),
            surface,
            scheduler,
            renderer: PatternRenderer::new(config.normalized()),
            state: RenderState::default(),
            draw_count: 0,
        };
        instance.redraw()?;

        let canvas = instance.surface.canvas();
        tracing::info!(
            id,
            width = canvas.width,
            height = canvas.height,
            radius = instance.renderer.config().radius_for_width(canvas.width),
            "seed of life initialized"
        );
        Ok(instance)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn rotation(&self) -> f64 {
        self.state.rotation
    }

    pub fn phase(&self) -> AnimationPhase {
        self.state.phase
    }

    pub fn is_animating(&self) -> bool {
        self.state.is_animating()
    }

    pub fn state(&self) -> &RenderState {
        &self.state
    }

    /// Frames painted since initialization, by any trigger.
    pub fn draw_count(&self) -> u64 {
        self.draw_count
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn scheduler(&self) -> &F {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut F {
        &mut self.scheduler
    }

    pub fn renderer(&self) -> &PatternRenderer {
        &self.renderer
    }

    pub fn config(&self) -> &PatternConfig {
        self.renderer.config()
    }

    /// Repaints at the current rotation.
    pub fn redraw(&mut self) -> SeedResult<()> {
        self.renderer.render_frame(
            &mut self.surface,
            self.state.rotation,
            self.state.is_animating(),
        )?;
        self.draw_count += 1;
        Ok(())
    }

    /// Starts the animation. Returns `false` when already animating or animation is disabled.
    pub fn start_animation(&mut self) -> bool {
        if !self.config().animation.enabled {
            tracing::warn!(id = %self.id, "animation disabled by configuration");
            return false;
        }
        let started = self.state.start(&mut self.scheduler);
        if started {
            tracing::info!(id = %self.id, rotation = self.state.rotation, "animation started");
        }
        started
    }

    /// Stops the animation and cancels the outstanding frame. The last frame stays on screen.
    pub fn stop_animation(&mut self) -> bool {
        let stopped = self.state.stop(&mut self.scheduler);
        if stopped {
            tracing::info!(
                id = %self.id,
                frames = self.state.frames_advanced,
                "animation stopped"
            );
        }
        stopped
    }

    pub fn toggle_animation(&mut self) -> bool {
        if self.is_animating() {
            self.stop_animation();
        } else {
            self.start_animation();
        }
        self.is_animating()
    }

    /// Stops any animation and repaints at rotation 0.
    pub fn reset(&mut self) -> SeedResult<()> {
        self.state.stop(&mut self.scheduler);
        self.state.rotation = 0.0;
        self.state.frames_advanced = 0;
        self.state.drag_origin = None;
        tracing::info!(id = %self.id, "reset to original position");
        self.redraw()
    }

    /// Handles a fired frame request: advance, repaint, request the next frame.
    ///
    /// Returns `Ok(false)` without painting for stale handles or when idle. A paint failure
    /// stops the animation.
    pub fn on_frame(&mut self, handle: FrameHandle) -> SeedResult<bool> {
        let step = self.config().animation.step_rad;
        if !self.state.advance(handle, step) {
            tracing::debug!(id = %self.id, ?handle, "ignoring stale frame");
            return Ok(false);
        }

        if let Err(err) = self.redraw() {
            self.state.stop(&mut self.scheduler);
            return Err(err);
        }
        self.state.reschedule(&mut self.scheduler);

        let frames = self.state.frames_advanced;
        if frames % 60 == 0 {
            tracing::debug!(id = %self.id, frames, rotation = self.state.rotation, "animating");
        }
        Ok(true)
    }

    pub fn pointer_down(&mut self, x: f64) {
        if !self.state.pointer_down(x) {
            tracing::debug!(id = %self.id, "drag ignored while animating");
        }
    }

    /// Rotates with the drag and repaints immediately. Returns whether the rotation changed.
    pub fn pointer_move(&mut self, x: f64) -> SeedResult<bool> {
        let rate = self.config().animation.drag_rad_per_px;
        if !self.state.pointer_move(x, rate) {
            return Ok(false);
        }
        self.redraw()?;
        Ok(true)
    }

    pub fn pointer_up(&mut self) {
        self.state.pointer_up();
    }

    /// Updates the ghost/foreground double pass. Opacities are clamped into `[0, 1]`. Repaints
    /// when idle; a running animation picks the change up on its next frame.
    pub fn set_layer_effect(
        &mut self,
        enabled: bool,
        background_opacity: Option<f64>,
        foreground_opacity: Option<f64>,
    ) -> SeedResult<()> {
        self.renderer.set_layer_effect_enabled(enabled);
        self.renderer
            .set_layer_opacities(background_opacity, foreground_opacity);
        let fx = self.config().layer_effect;
        tracing::info!(
            id = %self.id,
            enabled,
            background = fx.background_opacity,
            foreground = fx.foreground_opacity,
            "layer effect updated"
        );
        if !self.is_animating() {
            self.redraw()?;
        }
        Ok(())
    }

    /// Updates the static and foreground opacities, keeping the layer effect toggle.
    pub fn set_opacity(&mut self, background: f64, foreground: f64) -> SeedResult<()> {
        let enabled = self.config().layer_effect.enabled;
        self.set_layer_effect(enabled, Some(background), Some(foreground))
    }

    /// Swaps in a new configuration between passes and repaints.
    pub fn replace_config(&mut self, config: PatternConfig) -> SeedResult<()> {
        config.validate()?;
        self.renderer.set_config(config.normalized());
        if !self.config().animation.enabled && self.is_animating() {
            self.stop_animation();
        }
        self.redraw()
    }

    /// Stops the animation and cancels any pending frame. Idempotent.
    pub fn teardown(&mut self) {
        if self.state.pending_frame.is_some() || self.is_animating() {
            tracing::debug!(id = %self.id, "teardown cancels pending frame");
        }
        self.state.stop(&mut self.scheduler);
        self.state.drag_origin = None;
    }
}

impl<S: Surface, F: FrameScheduler> Drop for SeedOfLife<S, F> {
    fn drop(&mut self) {
        self.teardown();
    }
}
