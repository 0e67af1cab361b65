//! Core application state and lifecycle.

use boxcanvas_core::canvas::Canvas;
use boxcanvas_core::input::{InputState, Modifiers, MouseButton, PointerEvent};
use boxcanvas_core::profile::{ConfigError, ProfileConfig, ProfileError, ProfileEvent, ProfileLoader};
use boxcanvas_render::{RenderContext, RenderResult, Renderer, RendererError, VelloRenderer};
use kurbo::Point;
use peniko::Color;
use std::sync::Arc;
use thiserror::Error;
use vello::util::RenderSurface;
use vello::wgpu::PresentMode;
use vello::{AaConfig, RenderParams, RendererOptions};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, MouseButton as WinitMouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowId};

use crate::event_handler::EventHandler;
use crate::shortcuts::{ShortcutAction, ShortcutRegistry};
use crate::ui::{UiAction, UiState, canvas_cursor, render_ui};

/// Errors that stop the application.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("Failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("Profile loader error: {0}")]
    Profile(#[from] ProfileError),
    #[error(transparent)]
    Renderer(#[from] RendererError),
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub title: String,
    /// Initial window size in logical pixels.
    pub width: u32,
    pub height: u32,
    pub background_color: Color,
    /// Where the profile panel fetches its data.
    pub profile: ProfileConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "BoxCanvas".to_string(),
            width: 1280,
            height: 800,
            background_color: Color::from_rgba8(250, 250, 250, 255),
            profile: ProfileConfig::default(),
        }
    }
}

impl AppConfig {
    /// Default configuration with the profile settings read from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            profile: ProfileConfig::from_env()?,
            ..Self::default()
        })
    }
}

/// Runtime state for the application.
struct AppState {
    // Windowing
    window: Arc<Window>,
    surface: RenderSurface<'static>,

    // Rendering
    vello_renderer: vello::Renderer,
    canvas_renderer: VelloRenderer,
    /// Canvas revision and scale factor the current scene was built for.
    scene_key: Option<(u64, f64)>,
    background_color: Color,
    /// Copies the Rgba8Unorm target onto the surface format.
    texture_blitter: vello::wgpu::util::TextureBlitter,

    // egui
    egui_ctx: egui::Context,
    egui_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
    ui_state: UiState,
    /// Cursor requested by the canvas, applied when egui does not claim the pointer.
    canvas_cursor: egui::CursorIcon,

    // State
    canvas: Canvas,
    input: InputState,
    event_handler: EventHandler,
    profile: ProfileLoader,
}

/// Main application struct.
pub struct App {
    config: AppConfig,
    state: Option<AppState>,
    render_cx: Option<vello::util::RenderContext>,
    /// Loader handed to the state once the window exists.
    pending_profile: Option<ProfileLoader>,
    /// Error that made `resumed` exit the event loop.
    init_error: Option<AppError>,
}

impl App {
    /// Create a new application with custom configuration.
    pub fn with_config(config: AppConfig, profile: ProfileLoader) -> Self {
        Self {
            config,
            state: None,
            render_cx: None,
            pending_profile: Some(profile),
            init_error: None,
        }
    }

    /// Run the application until the window is closed.
    pub fn run(config: AppConfig) -> Result<(), AppError> {
        let event_loop = EventLoop::new()?;
        let profile = ProfileLoader::from_config(&config.profile)?;
        let mut app = App::with_config(config, profile);

        event_loop.run_app(&mut app)?;

        match app.init_error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Create the window, the GPU surface and everything drawn on it.
    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<AppState, AppError> {
        log::info!("Creating window...");

        let window_attrs = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));
        let window = Arc::new(event_loop.create_window(window_attrs)?);

        let size = window.inner_size();
        let (width, height) = if size.width == 0 || size.height == 0 {
            (self.config.width, self.config.height)
        } else {
            (size.width, size.height)
        };
        log::info!("Surface size: {}x{}", width, height);

        let render_cx = self.render_cx.get_or_insert_with(vello::util::RenderContext::new);
        let surface = pollster::block_on(render_cx.create_surface(
            window.clone(),
            width,
            height,
            PresentMode::AutoVsync,
        ))
        .map_err(|e| RendererError::Surface(e.to_string()))?;

        let device = &render_cx.devices[surface.dev_id].device;
        let vello_renderer = vello::Renderer::new(device, RendererOptions::default())
            .map_err(|e| RendererError::InitFailed(e.to_string()))?;

        // Vello renders to Rgba8Unorm, the surface may be Bgra8Unorm
        let texture_blitter = vello::wgpu::util::TextureBlitter::new(device, surface.config.format);

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(
            device,
            surface.config.format,
            egui_wgpu::RendererOptions::default(),
        );

        let profile = match self.pending_profile.take() {
            Some(profile) => profile,
            None => ProfileLoader::from_config(&self.config.profile)?,
        };

        log::info!("BoxCanvas initialized - {}x{}", width, height);

        Ok(AppState {
            window,
            surface,
            vello_renderer,
            canvas_renderer: VelloRenderer::new(),
            scene_key: None,
            background_color: self.config.background_color,
            texture_blitter,
            egui_ctx,
            egui_state,
            egui_renderer,
            ui_state: UiState::default(),
            canvas_cursor: egui::CursorIcon::Default,
            canvas: Canvas::new(),
            input: InputState::new(),
            event_handler: EventHandler::new(),
            profile,
        })
    }
}

/// Canvas position of a physical cursor position.
fn to_canvas_point(position: winit::dpi::PhysicalPosition<f64>, scale_factor: f64) -> Point {
    let logical = position.to_logical::<f64>(scale_factor);
    Point::new(logical.x, logical.y)
}

/// Name of a key as used by the shortcut registry.
fn key_name(key: &Key) -> Option<String> {
    match key {
        Key::Named(NamedKey::Escape) => Some("Escape".to_string()),
        Key::Named(NamedKey::F5) => Some("F5".to_string()),
        Key::Character(c) => Some(c.to_uppercase()),
        _ => None,
    }
}

/// UI action triggered by a shortcut. Cancel has no toolbar counterpart.
fn shortcut_ui_action(action: ShortcutAction) -> Option<UiAction> {
    match action {
        ShortcutAction::AddRectangle => Some(UiAction::AddRectangle),
        ShortcutAction::ToggleProfile => Some(UiAction::ToggleProfile),
        ShortcutAction::RefreshWeather => Some(UiAction::RefreshWeather),
        ShortcutAction::ShowShortcuts => Some(UiAction::ShowShortcuts),
        ShortcutAction::Cancel => None,
    }
}

impl AppState {
    /// Apply an action coming from the toolbar, the profile panel or a shortcut.
    fn apply_action(&mut self, action: UiAction) {
        match action {
            UiAction::AddRectangle => {
                let id = self.canvas.add_element();
                log::info!("Added {}", id);
            }
            UiAction::ChooseUser(id) => {
                self.ui_state.chosen_user = id;
                self.profile.choose_user(id);
            }
            UiAction::RefreshWeather => {
                // Same rule as the disabled Refresh button
                if self.profile.is_loading() {
                    log::debug!("Fetch in flight, refresh ignored");
                } else if !self.profile.refresh_weather() {
                    log::debug!("Nothing to refresh");
                }
            }
            UiAction::ToggleProfile => {
                self.ui_state.show_profile = !self.ui_state.show_profile;
            }
            UiAction::ShowShortcuts => {
                self.ui_state.shortcuts_modal_open = !self.ui_state.shortcuts_modal_open;
            }
        }
    }

    /// Escape closes the shortcuts modal first, then falls through to the canvas.
    fn escape(&mut self) {
        if self.ui_state.shortcuts_modal_open {
            self.ui_state.shortcuts_modal_open = false;
        } else {
            self.event_handler.escape(&mut self.canvas);
        }
    }

    fn drain_profile_events(&mut self) {
        for event in self.profile.poll_events() {
            match event {
                ProfileEvent::UserLoaded { id } => log::info!("Loaded user {}", id),
                ProfileEvent::UserFailed { id, message } => log::warn!("User {} failed: {}", id, message),
                ProfileEvent::WeatherLoaded { id, reading } => {
                    log::info!("Weather for user {}: {}", id, reading)
                }
                ProfileEvent::WeatherFailed { id, message } => {
                    log::warn!("Weather for user {} failed: {}", id, message)
                }
            }
        }
    }

    /// Run egui, then draw the canvas with vello and composite egui on top.
    fn redraw(&mut self, render_cx: &vello::util::RenderContext) -> RenderResult<()> {
        self.drain_profile_events();

        self.ui_state.element_count = self.canvas.len();
        self.ui_state.selected = self.canvas.selected();

        let mut ui_action = None;
        let view = self.profile.view().clone();
        let egui_input = self.egui_state.take_egui_input(&self.window);
        let mut egui_output = self.egui_ctx.run(egui_input, |ctx| {
            ui_action = render_ui(ctx, &mut self.ui_state, &view);
        });
        if let Some(action) = ui_action {
            self.apply_action(action);
        }

        if !self.egui_ctx.is_pointer_over_area() && !self.egui_ctx.wants_pointer_input() {
            egui_output.platform_output.cursor_icon = self.canvas_cursor;
        }
        self.egui_state
            .handle_platform_output(&self.window, egui_output.platform_output);
        let egui_primitives = self
            .egui_ctx
            .tessellate(egui_output.shapes, egui_output.pixels_per_point);

        let width = self.surface.config.width;
        let height = self.surface.config.height;

        let render_ctx = RenderContext::new(&self.canvas)
            .with_scale_factor(self.window.scale_factor())
            .with_background(self.background_color);
        // Rebuild only when the canvas changed since the last frame
        let scene_key = Some((self.canvas.revision(), render_ctx.scale_factor));
        if self.scene_key != scene_key {
            self.canvas_renderer.build_scene(&render_ctx);
            self.scene_key = scene_key;
        }
        let scene = self.canvas_renderer.scene();

        let device_handle = &render_cx.devices[self.surface.dev_id];
        let device = &device_handle.device;
        let queue = &device_handle.queue;

        let surface_texture = self
            .surface
            .surface
            .get_current_texture()
            .map_err(|e| RendererError::Surface(e.to_string()))?;

        let params = RenderParams {
            base_color: self.canvas_renderer.background_color(&render_ctx),
            width,
            height,
            antialiasing_method: AaConfig::Area,
        };

        // Vello's compute shaders need a storage-bindable Rgba8Unorm target
        let render_texture = device.create_texture(&vello::wgpu::TextureDescriptor {
            label: Some("vello render texture"),
            size: vello::wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: vello::wgpu::TextureDimension::D2,
            format: vello::wgpu::TextureFormat::Rgba8Unorm,
            usage: vello::wgpu::TextureUsages::STORAGE_BINDING
                | vello::wgpu::TextureUsages::COPY_SRC
                | vello::wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let render_texture_view =
            render_texture.create_view(&vello::wgpu::TextureViewDescriptor::default());

        self.vello_renderer
            .render_to_texture(device, queue, scene, &render_texture_view, &params)
            .map_err(|e| RendererError::RenderFailed(e.to_string()))?;

        let surface_view = surface_texture
            .texture
            .create_view(&vello::wgpu::TextureViewDescriptor::default());

        {
            let mut blit_encoder = device.create_command_encoder(&vello::wgpu::CommandEncoderDescriptor {
                label: Some("blit encoder"),
            });
            self.texture_blitter
                .copy(device, &mut blit_encoder, &render_texture_view, &surface_view);
            queue.submit(std::iter::once(blit_encoder.finish()));
        }

        for (id, image_delta) in &egui_output.textures_delta.set {
            self.egui_renderer.update_texture(device, queue, *id, image_delta);
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [width, height],
            pixels_per_point: egui_output.pixels_per_point,
        };

        {
            let mut egui_encoder = device.create_command_encoder(&vello::wgpu::CommandEncoderDescriptor {
                label: Some("egui encoder"),
            });
            self.egui_renderer.update_buffers(
                device,
                queue,
                &mut egui_encoder,
                &egui_primitives,
                &screen_descriptor,
            );

            let render_pass = egui_encoder.begin_render_pass(&vello::wgpu::RenderPassDescriptor {
                label: Some("egui render pass"),
                color_attachments: &[Some(vello::wgpu::RenderPassColorAttachment {
                    view: &surface_view,
                    resolve_target: None,
                    ops: vello::wgpu::Operations {
                        // Keep the canvas underneath
                        load: vello::wgpu::LoadOp::Load,
                        store: vello::wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            // egui-wgpu wants a 'static render pass
            let mut render_pass = render_pass.forget_lifetime();
            self.egui_renderer
                .render(&mut render_pass, &egui_primitives, &screen_descriptor);
            drop(render_pass);

            queue.submit(std::iter::once(egui_encoder.finish()));
        }

        for id in &egui_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
        surface_texture.present();
        Ok(())
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        match self.init(event_loop) {
            Ok(state) => {
                state.window.request_redraw();
                self.state = Some(state);
            }
            Err(e) => {
                log::error!("Failed to start: {}", e);
                self.init_error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        let Some(state) = &mut self.state else {
            return;
        };

        // egui sees every event first
        let egui_response = state.egui_state.on_window_event(&state.window, &event);
        let egui_wants_input = egui_response.consumed
            || state.egui_ctx.is_pointer_over_area()
            || state.egui_ctx.wants_pointer_input()
            || state.egui_ctx.wants_keyboard_input();

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if size.width == 0 || size.height == 0 {
                    return;
                }

                if let Some(render_cx) = self.render_cx.as_mut() {
                    render_cx.resize_surface(&mut state.surface, size.width, size.height);
                }

                state.window.request_redraw();
            }

            WindowEvent::RedrawRequested => {
                if let Some(render_cx) = self.render_cx.as_ref() {
                    if let Err(e) = state.redraw(render_cx) {
                        log::warn!("Frame skipped: {}", e);
                    }
                }
                state.window.request_redraw();
            }

            WindowEvent::CursorMoved { position, .. } => {
                let point = to_canvas_point(position, state.window.scale_factor());
                state.input.handle_pointer_event(PointerEvent::Move { position: point });

                // A drag in progress keeps following the pointer over panels
                if state.event_handler.is_manipulating() {
                    state.event_handler.pointer_moved(&mut state.canvas, &state.input);
                } else if egui_wants_input {
                    state.canvas_cursor = egui::CursorIcon::Default;
                    return;
                }

                let hover = state
                    .event_handler
                    .get_cursor_for_position(&state.canvas, point);
                state.canvas_cursor = canvas_cursor(hover, state.event_handler.is_manipulating());
            }

            WindowEvent::MouseInput {
                state: button_state,
                button: WinitMouseButton::Left,
                ..
            } => {
                let position = state.input.pointer_position();
                match button_state {
                    ElementState::Pressed => {
                        if egui_wants_input {
                            return;
                        }
                        state.input.handle_pointer_event(PointerEvent::Down {
                            position,
                            button: MouseButton::Left,
                        });
                        state.event_handler.handle_press(&mut state.canvas, position);
                    }
                    ElementState::Released => {
                        state.input.handle_pointer_event(PointerEvent::Up {
                            position,
                            button: MouseButton::Left,
                        });
                        state.event_handler.handle_release(&mut state.canvas, position);
                    }
                }
            }

            WindowEvent::Focused(false) => {
                // The release of a held button or modifier is lost with focus
                state.event_handler.focus_lost(&mut state.canvas, &mut state.input);
                state.input.set_modifiers(Modifiers::default());
            }

            WindowEvent::ModifiersChanged(modifiers) => {
                let mods = modifiers.state();
                state.input.set_modifiers(Modifiers {
                    shift: mods.shift_key(),
                    ctrl: mods.control_key(),
                    alt: mods.alt_key(),
                    meta: mods.super_key(),
                });
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if egui_wants_input {
                    return;
                }
                let Some(key) = key_name(&event.logical_key) else {
                    return;
                };

                if event.state != ElementState::Pressed || event.repeat {
                    return;
                }

                let modifiers = state.input.modifiers();
                let ctrl = modifiers.command();
                // Shifted letters fall back to their unshifted binding
                let action = ShortcutRegistry::action_for(&key, ctrl, modifiers.shift)
                    .or_else(|| ShortcutRegistry::action_for(&key, ctrl, false));

                match action {
                    Some(ShortcutAction::Cancel) => state.escape(),
                    Some(shortcut) => {
                        if let Some(action) = shortcut_ui_action(shortcut) {
                            state.apply_action(action);
                        }
                    }
                    None => {}
                }
                state.window.request_redraw();
            }

            _ => {}
        }
    }
}
