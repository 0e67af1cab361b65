//! Menu components: menu items, select dropdowns, panel frames.

use egui::{Color32, CornerRadius, CursorIcon, Frame, Margin, Pos2, Sense, Stroke, Ui, vec2};

use crate::{sizing, theme};

/// Show a menu item with label and optional shortcut.
///
/// A `checked` item is highlighted. Returns true if clicked.
pub fn menu_item(ui: &mut Ui, label: &str, shortcut: &str, checked: bool) -> bool {
    let size = vec2(ui.available_width(), 28.0);
    let (rect, response) = ui.allocate_exact_size(size, Sense::click());

    if ui.is_rect_visible(rect) {
        let bg_color = if checked {
            theme::SELECTED_BG
        } else if response.hovered() {
            theme::HOVER_BG
        } else {
            Color32::TRANSPARENT
        };

        ui.painter()
            .rect_filled(rect, CornerRadius::same(sizing::CORNER_RADIUS), bg_color);

        let text_color = if checked { theme::ACCENT } else { theme::TEXT };

        ui.painter().text(
            Pos2::new(rect.left() + 12.0, rect.center().y),
            egui::Align2::LEFT_CENTER,
            label,
            egui::FontId::proportional(13.0),
            text_color,
        );

        if !shortcut.is_empty() {
            ui.painter().text(
                Pos2::new(rect.right() - 12.0, rect.center().y),
                egui::Align2::RIGHT_CENTER,
                shortcut,
                egui::FontId::proportional(12.0),
                theme::TEXT_MUTED,
            );
        }
    }

    let clicked = response.clicked();
    response.on_hover_cursor(CursorIcon::PointingHand);
    clicked
}

/// Show a dropdown for picking one of `options` or nothing.
///
/// The `placeholder` is shown while nothing is chosen and is also offered
/// as the first entry, which clears the choice. Returns true if the
/// choice changed.
pub fn select<T: Copy + PartialEq>(
    ui: &mut Ui,
    id_salt: &str,
    placeholder: &str,
    options: &[(T, &str)],
    current: &mut Option<T>,
) -> bool {
    let selected_text = current
        .and_then(|value| options.iter().find(|(v, _)| *v == value))
        .map(|(_, label)| *label)
        .unwrap_or(placeholder);

    let mut changed = false;
    egui::ComboBox::from_id_salt(id_salt)
        .selected_text(selected_text)
        .width(ui.available_width().min(sizing::PANEL_WIDTH - 16.0))
        .show_ui(ui, |ui| {
            if menu_item(ui, placeholder, "", current.is_none()) && current.is_some() {
                *current = None;
                changed = true;
            }
            for (value, label) in options {
                let checked = *current == Some(*value);
                if menu_item(ui, label, "", checked) && !checked {
                    *current = Some(*value);
                    changed = true;
                }
            }
        });
    changed
}

/// Create a standard panel frame with shadow.
pub fn panel_frame() -> Frame {
    Frame::new()
        .fill(theme::PANEL_BG)
        .corner_radius(CornerRadius::same(sizing::PANEL_RADIUS))
        .stroke(Stroke::new(1.0, theme::BORDER))
        .shadow(egui::epaint::Shadow {
            spread: 0,
            blur: 8,
            offset: [0, 2],
            color: Color32::from_black_alpha(15),
        })
        .inner_margin(Margin::same(8))
}

/// Create a toolbar panel frame (slightly different padding).
pub fn toolbar_frame() -> Frame {
    Frame::new()
        .fill(theme::PANEL_BG)
        .corner_radius(CornerRadius::same(sizing::PANEL_RADIUS))
        .stroke(Stroke::new(1.0, theme::BORDER))
        .shadow(egui::epaint::Shadow {
            spread: 0,
            blur: 6,
            offset: [0, 2],
            color: Color32::from_black_alpha(10),
        })
        .inner_margin(Margin::symmetric(12, 6))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::with_ui;

    #[test]
    fn test_select_unchanged_without_input() {
        let options = [(1u32, "User 1"), (2, "User 2")];
        let mut current = Some(2);
        with_ui(|ui| {
            assert!(!select(ui, "users", "Choose a user", &options, &mut current));
        });
        assert_eq!(current, Some(2));
    }

    #[test]
    fn test_menu_item_not_clicked_without_input() {
        with_ui(|ui| {
            assert!(!menu_item(ui, "User 1", "", true));
            assert!(!menu_item(ui, "User 2", "Ctrl+2", false));
        });
    }

    #[test]
    fn test_frames_margins() {
        assert_eq!(panel_frame().inner_margin, Margin::same(8));
        assert_eq!(toolbar_frame().inner_margin, Margin::symmetric(12, 6));
    }
}
