//! Reusable egui widget components with Tailwind-inspired styling.
//!
//! This crate provides the styled UI components used by the BoxCanvas shell:
//!
//! - **Buttons**: Icon buttons, text buttons
//! - **Menu**: Menu items, select dropdowns, panel frames
//! - **Layout**: Section labels, field rows, separators

pub mod buttons;
pub mod layout;
pub mod menu;

pub use buttons::{IconButton, TextButton};
pub use layout::{field_row, muted_label, section_label, vertical_separator};
pub use menu::{menu_item, panel_frame, select, toolbar_frame};

/// Standard sizing constants used across widgets.
pub mod sizing {
    /// Toolbar button edge
    pub const TOOL_BUTTON: f32 = 32.0;
    /// Icon edge inside a toolbar button
    pub const ICON: f32 = 18.0;
    /// Standard corner radius
    pub const CORNER_RADIUS: u8 = 4;
    /// Panel corner radius
    pub const PANEL_RADIUS: u8 = 8;
    /// Width of side panels
    pub const PANEL_WIDTH: f32 = 240.0;
}

/// Standard colors used across widgets.
pub mod theme {
    use egui::Color32;

    /// Text color (dark gray)
    pub const TEXT: Color32 = Color32::from_rgb(60, 60, 60);
    /// Muted text color
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(120, 120, 120);
    /// Error text color (red)
    pub const ERROR: Color32 = Color32::from_rgb(220, 38, 38);
    /// Border color
    pub const BORDER: Color32 = Color32::from_rgb(220, 220, 220);
    /// Selection/active color (blue)
    pub const ACCENT: Color32 = Color32::from_rgb(59, 130, 246);
    /// Hover background
    pub const HOVER_BG: Color32 = Color32::from_rgb(245, 245, 245);
    /// Selected background
    pub const SELECTED_BG: Color32 = Color32::from_rgb(235, 245, 255);
    /// Panel background
    pub const PANEL_BG: Color32 = Color32::from_rgba_premultiplied(250, 250, 252, 250);
}

#[cfg(test)]
pub(crate) mod test_util {
    /// Run `f` inside a central panel of a headless egui frame.
    pub fn with_ui(mut f: impl FnMut(&mut egui::Ui)) {
        let ctx = egui::Context::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| f(ui));
        });
    }
}
