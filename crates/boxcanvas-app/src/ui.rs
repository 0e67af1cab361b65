//! UI components using egui.

use boxcanvas_core::geometry::ElementId;
use boxcanvas_core::profile::{ProfileView, UserId, WeatherReading, WeatherView};
use boxcanvas_core::selection::{Corner, Edge, HandleKind};
use boxcanvas_widgets::{
    IconButton, TextButton, field_row, muted_label, panel_frame, section_label, select, sizing, theme,
    toolbar_frame, vertical_separator,
};
use egui::{Align2, Color32, Context, ImageSource, Pos2, RichText, Vec2, include_image};

use crate::shortcuts::{ShortcutAction, ShortcutRegistry};

/// Users offered in the profile panel.
const USER_CHOICES: [(UserId, &str); 4] = [
    (UserId(1), "User 1"),
    (UserId(2), "User 2"),
    (UserId(3), "User 3"),
    (UserId(4), "User 4"),
];

/// UI state that persists across frames.
#[derive(Debug, Clone)]
pub struct UiState {
    /// Whether the profile panel is visible.
    pub show_profile: bool,
    /// User chosen in the profile panel.
    pub chosen_user: Option<UserId>,
    /// Whether the keyboard shortcuts modal is open.
    pub shortcuts_modal_open: bool,
    /// Number of elements on the canvas.
    pub element_count: usize,
    /// Currently selected element (mirrored from canvas).
    pub selected: Option<ElementId>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            show_profile: true,
            chosen_user: None,
            shortcuts_modal_open: false,
            element_count: 0,
            selected: None,
        }
    }
}

/// Actions triggered by UI interactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    /// Append a rectangle to the canvas.
    AddRectangle,
    /// Choose the user shown in the profile panel (None hides the profile).
    ChooseUser(Option<UserId>),
    /// Fetch the weather again.
    RefreshWeather,
    /// Show or hide the profile panel.
    ToggleProfile,
    /// Open or close the shortcuts modal.
    ShowShortcuts,
}

/// Text of the weather line.
pub fn weather_line(reading: &WeatherReading) -> String {
    format!("Weather for {}: {}", reading.city, reading)
}

/// Cursor shown over the canvas.
///
/// `hover` follows `EventHandler::get_cursor_for_position`: None is empty
/// canvas, `Some(None)` an element body, `Some(Some(handle))` a resize handle.
pub fn canvas_cursor(hover: Option<Option<HandleKind>>, manipulating: bool) -> egui::CursorIcon {
    use egui::CursorIcon;

    match hover {
        None => CursorIcon::Default,
        Some(None) if manipulating => CursorIcon::Grabbing,
        Some(None) => CursorIcon::Grab,
        Some(Some(HandleKind::Corner(Corner::TopLeft | Corner::BottomRight))) => CursorIcon::ResizeNwSe,
        Some(Some(HandleKind::Corner(Corner::TopRight | Corner::BottomLeft))) => CursorIcon::ResizeNeSw,
        Some(Some(HandleKind::Edge(Edge::Top | Edge::Bottom))) => CursorIcon::ResizeVertical,
        Some(Some(HandleKind::Edge(Edge::Left | Edge::Right))) => CursorIcon::ResizeHorizontal,
    }
}

/// Render the whole UI and return the first triggered action.
pub fn render_ui(ctx: &Context, ui_state: &mut UiState, profile: &ProfileView) -> Option<UiAction> {
    egui_extras::install_image_loaders(ctx);

    let toolbar_action = render_toolbar(ctx, ui_state);
    let profile_action = if ui_state.show_profile {
        render_profile_panel(ctx, ui_state, profile)
    } else {
        None
    };

    if ui_state.shortcuts_modal_open {
        render_shortcuts_modal(ctx, ui_state);
    }

    // Toolbar takes precedence
    toolbar_action.or(profile_action)
}

fn shortcut_label(action: ShortcutAction) -> String {
    ShortcutRegistry::label_for(action).unwrap_or_default()
}

/// Render the toolbar and return any triggered action.
fn render_toolbar(ctx: &Context, ui_state: &UiState) -> Option<UiAction> {
    let mut action = None;
    let add_shortcut = shortcut_label(ShortcutAction::AddRectangle);
    let profile_shortcut = shortcut_label(ShortcutAction::ToggleProfile);
    let help_shortcut = shortcut_label(ShortcutAction::ShowShortcuts);

    let buttons: [(ImageSource<'static>, &str, &str, bool, UiAction); 3] = [
        (
            include_image!("../assets/rectangle.svg"),
            "Add rectangle",
            add_shortcut.as_str(),
            false,
            UiAction::AddRectangle,
        ),
        (
            include_image!("../assets/user.svg"),
            "Profile",
            profile_shortcut.as_str(),
            ui_state.show_profile,
            UiAction::ToggleProfile,
        ),
        (
            include_image!("../assets/keyboard.svg"),
            "Keyboard shortcuts",
            help_shortcut.as_str(),
            ui_state.shortcuts_modal_open,
            UiAction::ShowShortcuts,
        ),
    ];

    egui::Area::new(egui::Id::new("toolbar"))
        .anchor(Align2::CENTER_TOP, Vec2::new(0.0, 12.0))
        .show(ctx, |ui| {
            toolbar_frame().show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.spacing_mut().item_spacing = Vec2::new(4.0, 0.0);

                    for (icon, label, shortcut, selected, button_action) in buttons {
                        if IconButton::new(icon, label)
                            .shortcut(shortcut)
                            .selected(selected)
                            .show(ui)
                        {
                            action = Some(button_action);
                        }
                    }

                    vertical_separator(ui);
                    let status = match ui_state.selected {
                        Some(id) => format!("{} elements, {} selected", ui_state.element_count, id),
                        None => format!("{} elements", ui_state.element_count),
                    };
                    section_label(ui, &status);
                });
            });
        });

    action
}

/// Render the user/weather profile panel.
fn render_profile_panel(ctx: &Context, ui_state: &mut UiState, profile: &ProfileView) -> Option<UiAction> {
    let mut action = None;

    egui::Area::new(egui::Id::new("profile_panel"))
        .anchor(Align2::RIGHT_TOP, Vec2::new(-12.0, 12.0))
        .show(ctx, |ui| {
            panel_frame().show(ui, |ui| {
                ui.set_width(sizing::PANEL_WIDTH);
                ui.vertical(|ui| {
                    ui.label(RichText::new("View Profile").size(14.0).strong().color(theme::TEXT));
                    ui.add_space(6.0);

                    if select(ui, "user_select", "Choose a user", &USER_CHOICES, &mut ui_state.chosen_user) {
                        action = Some(UiAction::ChooseUser(ui_state.chosen_user));
                    }
                    ui.add_space(8.0);

                    if let Some(refresh) = render_profile(ui, profile) {
                        action = Some(refresh);
                    }
                });
            });
        });

    action
}

/// Render the body of the profile panel for the current view.
fn render_profile(ui: &mut egui::Ui, profile: &ProfileView) -> Option<UiAction> {
    match profile {
        ProfileView::Hidden => None,
        ProfileView::LoadingUser(_) => {
            muted_label(ui, "Loading...");
            None
        }
        ProfileView::Failed { message, .. } => {
            ui.label(RichText::new("Something went wrong").size(12.0).strong().color(theme::ERROR));
            ui.label(RichText::new(message).size(11.0).color(theme::TEXT_MUTED));
            None
        }
        ProfileView::Loaded { user, weather } => {
            section_label(ui, "User data:");
            field_row(ui, "Name", &user.name);
            field_row(ui, "Phone", &user.phone);
            ui.add_space(6.0);

            let refresh_shortcut = shortcut_label(ShortcutAction::RefreshWeather);
            let refresh_enabled = match weather {
                WeatherView::Loading => {
                    muted_label(ui, "loading weather...");
                    false
                }
                WeatherView::Ready(reading) => {
                    ui.label(RichText::new(weather_line(reading)).size(12.0).color(theme::TEXT));
                    true
                }
                WeatherView::Failed(message) => {
                    ui.label(
                        RichText::new(format!("Weather unavailable: {}", message))
                            .size(11.0)
                            .color(theme::ERROR),
                    );
                    true
                }
            };

            ui.add_space(4.0);
            TextButton::new("Refresh")
                .shortcut(&refresh_shortcut)
                .enabled(refresh_enabled)
                .show(ui)
                .then_some(UiAction::RefreshWeather)
        }
    }
}

/// Render the keyboard shortcuts modal.
fn render_shortcuts_modal(ctx: &Context, ui_state: &mut UiState) {
    // Backdrop
    egui::Area::new(egui::Id::new("shortcuts_backdrop"))
        .fixed_pos(Pos2::ZERO)
        .order(egui::Order::Background)
        .show(ctx, |ui| {
            let screen_rect = ctx.input(|i| i.content_rect());
            let response = ui.allocate_rect(screen_rect, egui::Sense::click());
            ui.painter().rect_filled(screen_rect, 0.0, Color32::from_black_alpha(80));
            if response.clicked() {
                ui_state.shortcuts_modal_open = false;
            }
        });

    // Modal window
    egui::Area::new(egui::Id::new("shortcuts_modal"))
        .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            panel_frame().show(ui, |ui| {
                ui.set_width(360.0);
                ui.vertical(|ui| {
                    ui.label(RichText::new("Keyboard Shortcuts").size(16.0).strong());
                    ui.add_space(12.0);

                    for shortcut in ShortcutRegistry::all() {
                        ui.horizontal(|ui| {
                            ui.label(
                                RichText::new(shortcut.format())
                                    .size(12.0)
                                    .family(egui::FontFamily::Monospace)
                                    .color(Color32::from_rgb(100, 116, 139)),
                            );
                            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                                ui.label(RichText::new(shortcut.description).size(12.0).color(theme::TEXT));
                            });
                        });
                        ui.add_space(4.0);
                    }
                });
            });
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use boxcanvas_core::profile::{Address, User};

    /// Run two frames (new areas are only sized on their first frame) and
    /// return the action plus every string painted in the last one.
    fn run_frames(ui_state: &mut UiState, profile: &ProfileView) -> (Option<UiAction>, Vec<String>) {
        let ctx = Context::default();
        let mut action = None;
        let mut output = None;
        for frame in 0..2 {
            // Step time past the fade-in of new areas
            let input = egui::RawInput {
                time: Some(frame as f64),
                ..Default::default()
            };
            action = None;
            output = Some(ctx.run(input, |ctx| {
                action = render_ui(ctx, ui_state, profile);
            }));
        }

        let mut texts = Vec::new();
        for clipped in output.map(|o| o.shapes).unwrap_or_default() {
            collect_text(&clipped.shape, &mut texts);
        }
        (action, texts)
    }

    fn collect_text(shape: &egui::Shape, out: &mut Vec<String>) {
        match shape {
            egui::Shape::Text(text) => out.push(text.galley.text().to_string()),
            egui::Shape::Vec(shapes) => shapes.iter().for_each(|s| collect_text(s, out)),
            _ => {}
        }
    }

    fn run(ui_state: &mut UiState, profile: &ProfileView) -> Option<UiAction> {
        run_frames(ui_state, profile).0
    }

    fn painted(profile: &ProfileView) -> Vec<String> {
        run_frames(&mut UiState::default(), profile).1
    }

    fn has(texts: &[String], needle: &str) -> bool {
        texts.iter().any(|t| t.contains(needle))
    }

    fn user() -> User {
        User {
            id: UserId(1),
            name: "Leanne Graham".to_string(),
            username: "Bret".to_string(),
            email: String::new(),
            phone: "1-770-736-8031 x56442".to_string(),
            website: String::new(),
            address: Address {
                city: "Gwenborough".to_string(),
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_weather_line() {
        let reading = WeatherReading {
            city: "Gwenborough".to_string(),
            celsius: 21.0,
        };
        assert_eq!(weather_line(&reading), "Weather for Gwenborough: 21C");
    }

    #[test]
    fn test_canvas_cursor() {
        use egui::CursorIcon;

        assert_eq!(canvas_cursor(None, false), CursorIcon::Default);
        assert_eq!(canvas_cursor(Some(None), false), CursorIcon::Grab);
        assert_eq!(canvas_cursor(Some(None), true), CursorIcon::Grabbing);
        assert_eq!(
            canvas_cursor(Some(Some(HandleKind::Corner(Corner::BottomLeft))), true),
            CursorIcon::ResizeNeSw
        );
        assert_eq!(
            canvas_cursor(Some(Some(HandleKind::Edge(Edge::Left))), false),
            CursorIcon::ResizeHorizontal
        );
    }

    #[test]
    fn test_renders_every_profile_state() {
        let views = [
            ProfileView::Hidden,
            ProfileView::LoadingUser(UserId(1)),
            ProfileView::Failed {
                id: UserId(4),
                message: "User does not exist".to_string(),
            },
            ProfileView::Loaded {
                user: user(),
                weather: WeatherView::Loading,
            },
            ProfileView::Loaded {
                user: user(),
                weather: WeatherView::Ready(WeatherReading {
                    city: "Gwenborough".to_string(),
                    celsius: -3.0,
                }),
            },
            ProfileView::Loaded {
                user: user(),
                weather: WeatherView::Failed("timed out".to_string()),
            },
        ];

        for view in &views {
            let mut ui_state = UiState {
                shortcuts_modal_open: true,
                ..Default::default()
            };
            assert_eq!(run(&mut ui_state, view), None);
            assert!(ui_state.shortcuts_modal_open);
        }
    }

    #[test]
    fn test_failed_view_shows_fallback_only() {
        let texts = painted(&ProfileView::Failed {
            id: UserId(4),
            message: "User does not exist".to_string(),
        });
        assert!(has(&texts, "View Profile"));
        assert!(has(&texts, "Something went wrong"));
        assert!(has(&texts, "User does not exist"));
        assert!(!has(&texts, "User data:"));
        assert!(!has(&texts, "Leanne Graham"));
    }

    #[test]
    fn test_loaded_view_shows_user_and_weather() {
        let texts = painted(&ProfileView::Loaded {
            user: user(),
            weather: WeatherView::Ready(WeatherReading {
                city: "Gwenborough".to_string(),
                celsius: -3.0,
            }),
        });
        assert!(has(&texts, "User data:"));
        assert!(has(&texts, "Leanne Graham"));
        assert!(has(&texts, "1-770-736-8031 x56442"));
        assert!(has(&texts, "Weather for Gwenborough: -3C"));
        assert!(has(&texts, "Refresh"));
        assert!(!has(&texts, "Something went wrong"));
    }

    #[test]
    fn test_loading_views() {
        let texts = painted(&ProfileView::LoadingUser(UserId(1)));
        assert!(has(&texts, "Loading..."));
        assert!(!has(&texts, "User data:"));

        let texts = painted(&ProfileView::Loaded {
            user: user(),
            weather: WeatherView::Loading,
        });
        assert!(has(&texts, "Leanne Graham"));
        assert!(has(&texts, "loading weather..."));
        assert!(!has(&texts, "Weather for"));
    }

    #[test]
    fn test_hidden_panel_keeps_choice() {
        let mut ui_state = UiState {
            show_profile: false,
            chosen_user: Some(UserId(2)),
            ..Default::default()
        };
        assert_eq!(run(&mut ui_state, &ProfileView::LoadingUser(UserId(2))), None);
        assert_eq!(ui_state.chosen_user, Some(UserId(2)));
    }
}
