//! Renderer trait abstraction.

use boxcanvas_core::canvas::Canvas;
use boxcanvas_core::selection::{Handle, get_handles};
use kurbo::Rect;
use peniko::Color;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Initialization failed: {0}")]
    InitFailed(String),
    #[error("Render failed: {0}")]
    RenderFailed(String),
    #[error("Surface error: {0}")]
    Surface(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// The canvas to render.
    pub canvas: &'a Canvas,
    /// Device pixel ratio (for HiDPI).
    pub scale_factor: f64,
    /// Background color.
    pub background_color: Color,
    /// Element fill color.
    pub element_fill: Color,
    /// Element border color.
    pub element_stroke: Color,
    /// Selection highlight color.
    pub selection_color: Color,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(canvas: &'a Canvas) -> Self {
        Self {
            canvas,
            scale_factor: 1.0,
            background_color: Color::from_rgba8(250, 250, 250, 255),
            element_fill: Color::from_rgba8(226, 232, 240, 255),
            element_stroke: Color::from_rgba8(71, 85, 105, 255),
            selection_color: Color::from_rgba8(59, 130, 246, 255), // Blue
        }
    }

    /// Set the scale factor for HiDPI.
    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }
}

/// Trait for rendering backends.
///
/// Implementations can use Vello, wgpu directly, or other rendering engines.
pub trait Renderer {
    /// Build the scene/command buffer for a frame.
    ///
    /// This method is called once per frame and should prepare all drawing commands.
    fn build_scene(&mut self, ctx: &RenderContext);

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.background_color
    }
}

/// Drawing primitives a backend provides for canvas elements.
pub trait ElementRenderer {
    /// Draw an element's rectangle.
    fn render_element(&mut self, rect: Rect);

    /// Draw the outline around the selected element.
    fn render_selection_outline(&mut self, bounds: Rect);

    /// Draw one resize handle.
    fn render_handle(&mut self, handle: &Handle);
}

/// Walk the canvas in paint order.
///
/// Elements are drawn in insertion order; the selection outline and its
/// handles go on top of everything.
pub fn render_canvas<R: ElementRenderer + ?Sized>(renderer: &mut R, canvas: &Canvas) {
    for (_, element) in canvas.elements_ordered() {
        renderer.render_element(element.rect());
    }

    if let Some(id) = canvas.selected() {
        let bounds = canvas.element(id).rect();
        renderer.render_selection_outline(bounds);
        for handle in get_handles(bounds) {
            renderer.render_handle(&handle);
        }
    }
}
