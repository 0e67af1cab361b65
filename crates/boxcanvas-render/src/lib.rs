//! BoxCanvas Render Library
//!
//! Renderer abstraction and implementations for BoxCanvas.
//! The default implementation uses Vello for GPU-accelerated rendering.

mod renderer;

#[cfg(feature = "vello-renderer")]
mod vello_impl;

pub use renderer::{ElementRenderer, RenderContext, RenderResult, Renderer, RendererError, render_canvas};

#[cfg(feature = "vello-renderer")]
pub use vello_impl::VelloRenderer;
