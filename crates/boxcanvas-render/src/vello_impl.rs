//! Vello-based renderer implementation.

use crate::renderer::{ElementRenderer, RenderContext, Renderer, render_canvas};
use boxcanvas_core::selection::{HANDLE_SIZE, Handle};
use kurbo::{Affine, Rect, Shape as KurboShape, Stroke};
use peniko::{Color, Fill};
use vello::Scene;

/// Border width of an element.
const ELEMENT_STROKE_WIDTH: f64 = 1.0;
/// Width of the selection outline.
const SELECTION_STROKE_WIDTH: f64 = 1.5;

/// Vello-based renderer for GPU-accelerated 2D graphics.
pub struct VelloRenderer {
    /// The Vello scene being built.
    scene: Scene,
    /// Transform from canvas (logical) to physical pixels.
    transform: Affine,
    element_fill: Color,
    element_stroke: Color,
    /// Selection highlight color.
    selection_color: Color,
}

impl Default for VelloRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl VelloRenderer {
    /// Create a new Vello renderer.
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
            transform: Affine::IDENTITY,
            element_fill: Color::from_rgba8(226, 232, 240, 255),
            element_stroke: Color::from_rgba8(71, 85, 105, 255),
            selection_color: Color::from_rgba8(59, 130, 246, 255),
        }
    }

    /// Get the built scene for rendering.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }
}

impl Renderer for VelloRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) {
        self.scene.reset();
        self.transform = Affine::scale(ctx.scale_factor);
        self.element_fill = ctx.element_fill;
        self.element_stroke = ctx.element_stroke;
        self.selection_color = ctx.selection_color;

        render_canvas(self, ctx.canvas);
    }
}

impl ElementRenderer for VelloRenderer {
    fn render_element(&mut self, rect: Rect) {
        let path = rect.to_path(0.1);
        self.scene
            .fill(Fill::NonZero, self.transform, self.element_fill, None, &path);
        self.scene.stroke(
            &Stroke::new(ELEMENT_STROKE_WIDTH),
            self.transform,
            self.element_stroke,
            None,
            &path,
        );
    }

    fn render_selection_outline(&mut self, bounds: Rect) {
        let stroke = Stroke::new(SELECTION_STROKE_WIDTH).with_dashes(0.0, &[4.0, 4.0]);

        self.scene.stroke(
            &stroke,
            self.transform,
            self.selection_color,
            None,
            &bounds.to_path(0.1),
        );
    }

    fn render_handle(&mut self, handle: &Handle) {
        let half = HANDLE_SIZE / 2.0;
        let pos = handle.position;
        let rect = Rect::new(pos.x - half, pos.y - half, pos.x + half, pos.y + half);
        let path = rect.to_path(0.1);

        // White fill
        self.scene
            .fill(Fill::NonZero, self.transform, Color::WHITE, None, &path);

        // Blue border
        self.scene.stroke(
            &Stroke::new(SELECTION_STROKE_WIDTH),
            self.transform,
            self.selection_color,
            None,
            &path,
        );
    }
}
