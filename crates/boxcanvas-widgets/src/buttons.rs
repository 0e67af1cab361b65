//! Button components: icon buttons and text buttons.

use egui::{
    Align2, Color32, CornerRadius, CursorIcon, Image, ImageSource, Pos2, Rect, Sense, Stroke,
    StrokeKind, Ui, Vec2, vec2,
};

use crate::{sizing, theme};

/// Toolbar icon button: a square that fills with the accent color while
/// `selected` and shows its label (plus shortcut) as a tooltip.
pub struct IconButton<'a> {
    icon: ImageSource<'a>,
    tooltip: &'a str,
    shortcut: Option<&'a str>,
    selected: bool,
}

impl<'a> IconButton<'a> {
    pub fn new(icon: ImageSource<'a>, tooltip: &'a str) -> Self {
        Self {
            icon,
            tooltip,
            shortcut: None,
            selected: false,
        }
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Shortcut shown next to the tooltip.
    pub fn shortcut(mut self, shortcut: &'a str) -> Self {
        self.shortcut = Some(shortcut);
        self
    }

    /// Show the button and return true if clicked.
    pub fn show(self, ui: &mut Ui) -> bool {
        let size = Vec2::splat(sizing::TOOL_BUTTON);
        let (rect, response) = ui.allocate_exact_size(size, Sense::click());

        if ui.is_rect_visible(rect) {
            let (bg_color, tint) = match (self.selected, response.hovered()) {
                (true, _) => (theme::ACCENT, Color32::WHITE),
                (false, true) => (theme::HOVER_BG, theme::TEXT),
                (false, false) => (Color32::TRANSPARENT, theme::TEXT_MUTED),
            };
            ui.painter()
                .rect_filled(rect, CornerRadius::same(sizing::CORNER_RADIUS), bg_color);

            let icon_size = Vec2::splat(sizing::ICON);
            Image::new(self.icon)
                .fit_to_exact_size(icon_size)
                .tint(tint)
                .paint_at(ui, Rect::from_center_size(rect.center(), icon_size));
        }

        let clicked = response.clicked();
        let tooltip = match self.shortcut {
            Some(shortcut) => format!("{} ({})", self.tooltip, shortcut),
            None => self.tooltip.to_string(),
        };
        response
            .on_hover_text(tooltip)
            .on_hover_cursor(CursorIcon::PointingHand);
        clicked
    }
}

/// A bordered text button with optional shortcut hint.
pub struct TextButton<'a> {
    label: &'a str,
    shortcut: Option<&'a str>,
    enabled: bool,
}

impl<'a> TextButton<'a> {
    /// Create a new text button.
    pub fn new(label: &'a str) -> Self {
        Self {
            label,
            shortcut: None,
            enabled: true,
        }
    }

    /// Add a shortcut hint.
    pub fn shortcut(mut self, shortcut: &'a str) -> Self {
        self.shortcut = Some(shortcut);
        self
    }

    /// Set whether the button reacts to clicks.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Show the button and return true if clicked.
    pub fn show(self, ui: &mut Ui) -> bool {
        let label_font = egui::FontId::proportional(12.0);
        let shortcut_font = egui::FontId::proportional(11.0);

        let mut width = text_width(ui, self.label, &label_font) + 16.0;
        if let Some(shortcut) = self.shortcut {
            width += text_width(ui, shortcut, &shortcut_font) + 8.0;
        }

        let sense = if self.enabled {
            Sense::click()
        } else {
            Sense::hover()
        };
        let (rect, response) = ui.allocate_exact_size(vec2(width, 24.0), sense);

        if ui.is_rect_visible(rect) {
            let bg_color = if self.enabled && response.hovered() {
                theme::HOVER_BG
            } else {
                Color32::TRANSPARENT
            };
            let text_color = if self.enabled {
                theme::TEXT
            } else {
                Color32::from_gray(180)
            };

            let radius = CornerRadius::same(sizing::CORNER_RADIUS);
            ui.painter().rect_filled(rect, radius, bg_color);
            ui.painter().rect_stroke(
                rect,
                radius,
                Stroke::new(1.0, theme::BORDER),
                StrokeKind::Inside,
            );

            ui.painter().text(
                Pos2::new(rect.left() + 8.0, rect.center().y),
                Align2::LEFT_CENTER,
                self.label,
                label_font,
                text_color,
            );

            if let Some(shortcut) = self.shortcut {
                ui.painter().text(
                    Pos2::new(rect.right() - 8.0, rect.center().y),
                    Align2::RIGHT_CENTER,
                    shortcut,
                    shortcut_font,
                    theme::TEXT_MUTED,
                );
            }
        }

        if !self.enabled {
            return false;
        }
        let clicked = response.clicked();
        response.on_hover_cursor(CursorIcon::PointingHand);
        clicked
    }
}

fn text_width(ui: &Ui, text: &str, font_id: &egui::FontId) -> f32 {
    let galley = ui.painter().layout_no_wrap(
        text.to_string(),
        font_id.clone(),
        Color32::PLACEHOLDER, // Color doesn't matter for sizing
    );
    galley.size().x
}
