// The reveal controller: pointer/touch input in, animated radius, live preview and
// permanent reveal marks out.
// Nothing here touches a window. The host feeds events and frame timestamps and reads
// the preview, cursor and canvas back when composing the screen.

use crate::animation::{Frame, RadiusAnimator};
use crate::canvas::{RevealCanvas, paint_reveal};
use crate::cover::CoverLayer;
use crate::input::PointerEvent;
use crate::mask::RadialGradient;
use crate::preview::{CursorIndicator, LivePreview};
use crate::types::{ContainerRect, Point};
use image::RgbaImage;
use tracing::debug;

/// Tunables for the effect. Defaults reproduce the stock look.
#[derive(Debug, Clone, PartialEq)]
pub struct RevealSettings {
    /// Radius the hover reveal grows to.
    pub base_radius: f32,
    /// Permanent paints use this fraction of the animated radius.
    pub paint_scale: f32,
    /// Fixed radius for touch reveals (no ramp-up).
    pub touch_radius: f32,
    pub animation_ms: f64,
    pub gradient: RadialGradient,
}

impl Default for RevealSettings {
    fn default() -> Self {
        Self {
            base_radius: 120.0,
            paint_scale: 0.8,
            touch_radius: 80.0,
            animation_ms: 300.0,
            gradient: RadialGradient::default(),
        }
    }
}

/// Normalized pointer position (percent of the container) and whether it hovers it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerState {
    pub x_pct: f32,
    pub y_pct: f32,
    pub inside: bool,
    /// A touch (or held button) is down; the preview stays at the touch radius.
    pub touching: bool,
}

pub struct RevealController {
    settings: RevealSettings,
    rect: ContainerRect,
    pointer: PointerState,
    animator: RadiusAnimator,
    preview: LivePreview,
    cursor: CursorIndicator,
    canvas: RevealCanvas,
    hidden: CoverLayer,
    paints: u64,
}

impl RevealController {
    /// A controller for a container at the origin of `width`×`height` pixels.
    pub fn new(settings: RevealSettings, width: u32, height: u32) -> Self {
        let animator = RadiusAnimator::new(settings.animation_ms);
        Self {
            settings,
            rect: ContainerRect::new(0.0, 0.0, width as f32, height as f32),
            pointer: PointerState { x_pct: 50.0, y_pct: 50.0, inside: false, touching: false },
            animator,
            preview: LivePreview::default(),
            cursor: CursorIndicator::default(),
            canvas: RevealCanvas::new(width as usize, height as usize),
            hidden: CoverLayer::default(),
            paints: 0,
        }
    }

    /// Hand over the decoded hidden image; paints stay no-ops until this happens.
    pub fn set_hidden_image(&mut self, image: RgbaImage) {
        let (w, h) = (self.canvas.width() as u32, self.canvas.height() as u32);
        self.hidden.set_source(image, w, h);
        debug!(width = w, height = h, "hidden image fitted to canvas");
    }

    /// Route one translated input event.
    pub fn handle(&mut self, event: PointerEvent, now_ms: f64) {
        match event {
            PointerEvent::Enter(p) => self.on_pointer_enter(p, now_ms),
            PointerEvent::Move(p) => self.on_pointer_move(p),
            PointerEvent::Leave => self.on_pointer_leave(now_ms),
            PointerEvent::TouchStart(p) => self.on_touch_start(p),
            PointerEvent::TouchMove(p) => self.on_touch_move(p),
            PointerEvent::TouchEnd => self.on_touch_end(),
        }
    }

    pub fn on_pointer_enter(&mut self, client: Point, now_ms: f64) {
        self.pointer.inside = true;
        self.cursor.visible = true;
        self.animate_radius(self.settings.base_radius, now_ms);
        self.update_cursor(client);
    }

    pub fn on_pointer_move(&mut self, client: Point) {
        if self.pointer.inside {
            self.update_cursor(client);
        }
    }

    pub fn on_pointer_leave(&mut self, now_ms: f64) {
        self.pointer.inside = false;
        self.cursor.visible = false;
        self.animate_radius(0.0, now_ms);
    }

    pub fn on_touch_start(&mut self, client: Point) {
        self.pointer.touching = true;
        self.on_touch_move(client);
    }

    pub fn on_touch_move(&mut self, client: Point) {
        self.track_position(client);
        self.preview.size = self.settings.touch_radius;
        self.cursor.position = client;
        self.paint_reveal(self.rect.to_canvas(client), self.settings.touch_radius);
    }

    pub fn on_touch_end(&mut self) {
        self.pointer.touching = false;
        self.preview.size = 0.0;
    }

    /// Start (or redirect) the radius toward `target` over the configured duration.
    pub fn animate_radius(&mut self, target: f32, now_ms: f64) {
        debug!(from = self.animator.radius(), target, "animating reveal radius");
        self.animator.animate_to(target, now_ms);
    }

    /// One display refresh: sample the radius and mirror it into the preview.
    /// A held touch keeps its fixed preview size.
    pub fn tick(&mut self, now_ms: f64) -> Option<Frame> {
        let frame = self.animator.tick(now_ms)?;
        if self.pointer.touching {
            return Some(frame);
        }
        if self.pointer.inside || frame.target == 0.0 {
            self.preview.size = frame.radius;
        }
        Some(frame)
    }

    /// Stencil the hidden image through the soft mask at a canvas-space point.
    /// Returns false (and draws nothing) while the hidden image is still loading.
    pub fn paint_reveal(&mut self, at: Point, radius: f32) -> bool {
        if !self.hidden.is_loaded() {
            return false;
        }
        let canvas = std::mem::take(&mut self.canvas);
        self.canvas = paint_reveal(canvas, &self.settings.gradient, at, radius);
        self.paints += 1;
        true
    }

    /// Match the container's new size. Wipes every permanent reveal.
    pub fn resize_canvas(&mut self, width: u32, height: u32) {
        self.rect.width = width as f32;
        self.rect.height = height as f32;
        self.canvas = RevealCanvas::new(width as usize, height as usize);
        self.hidden.refit(width, height);
        debug!(width, height, "reveal canvas reset");
    }

    pub fn radius(&self) -> f32 {
        self.animator.radius()
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    pub fn preview(&self) -> LivePreview {
        self.preview
    }

    pub fn cursor(&self) -> CursorIndicator {
        self.cursor
    }

    pub fn gradient(&self) -> &RadialGradient {
        &self.settings.gradient
    }

    pub fn canvas(&self) -> &RevealCanvas {
        &self.canvas
    }

    /// The hidden image fitted to the canvas, once loaded.
    pub fn hidden_stencil(&self) -> Option<&RgbaImage> {
        self.hidden.fitted()
    }

    /// Number of paints that actually reached the canvas.
    pub fn paint_count(&self) -> u64 {
        self.paints
    }

    /// The permanent layer as an RGBA image, if the hidden image is loaded.
    pub fn reveal_layer(&self) -> Option<RgbaImage> {
        self.hidden.fitted().map(|stencil| self.canvas.to_rgba(stencil))
    }

    fn track_position(&mut self, client: Point) {
        let (x, y) = self.rect.to_percent(client);
        self.pointer.x_pct = x;
        self.pointer.y_pct = y;
        self.preview.x_pct = x;
        self.preview.y_pct = y;
    }

    fn update_cursor(&mut self, client: Point) {
        self.track_position(client);
        let radius = self.animator.radius();
        self.preview.size = radius;

        if self.pointer.inside && radius > 0.0 {
            let at = self.rect.to_canvas(client);
            self.paint_reveal(at, radius * self.settings.paint_scale);
        }

        self.cursor.position = client;
    }
}
