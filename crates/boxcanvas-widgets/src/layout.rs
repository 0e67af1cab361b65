//! Layout helpers: separators, section labels, field rows.

use egui::{Color32, RichText, Stroke, Ui};

use crate::theme;

/// Draw a vertical separator line (small height).
pub fn vertical_separator(ui: &mut Ui) {
    let rect = ui.available_rect_before_wrap();
    let height = 14.0;
    let x = rect.left() + 1.0;
    let top = rect.center().y - height / 2.0;
    ui.painter().line_segment(
        [egui::Pos2::new(x, top), egui::Pos2::new(x, top + height)],
        Stroke::new(1.0, Color32::from_gray(210)),
    );
    ui.add_space(3.0);
}

/// Draw a section label (small, muted text).
pub fn section_label(ui: &mut Ui, text: &str) {
    ui.label(RichText::new(text).size(10.0).color(theme::TEXT_MUTED));
}

/// Draw muted status text, e.g. a loading indicator.
pub fn muted_label(ui: &mut Ui, text: &str) {
    ui.label(RichText::new(text).size(12.0).italics().color(theme::TEXT_MUTED));
}

/// Draw a `label: value` row.
pub fn field_row(ui: &mut Ui, label: &str, value: &str) {
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 4.0;
        ui.label(RichText::new(format!("{}:", label)).size(12.0).color(theme::TEXT_MUTED));
        ui.label(RichText::new(value).size(12.0).color(theme::TEXT));
    });
}
