//! Keyboard shortcut registry and documentation.

/// What a shortcut does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    AddRectangle,
    ToggleProfile,
    RefreshWeather,
    Cancel,
    ShowShortcuts,
}

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    pub ctrl: bool,
    pub shift: bool,
    pub description: &'static str,
    pub action: ShortcutAction,
}

impl Shortcut {
    pub const fn new(
        key: &'static str,
        ctrl: bool,
        shift: bool,
        description: &'static str,
        action: ShortcutAction,
    ) -> Self {
        Self {
            key,
            ctrl,
            shift,
            description,
            action,
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+S").
    pub fn format(&self) -> String {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl");
        }
        if self.shift {
            parts.push("Shift");
        }
        parts.push(self.key);
        parts.join("+")
    }

    /// Check whether a key press triggers this shortcut.
    ///
    /// Letter keys match case-insensitively.
    pub fn matches(&self, key: &str, ctrl: bool, shift: bool) -> bool {
        self.key.eq_ignore_ascii_case(key) && self.ctrl == ctrl && self.shift == shift
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        vec![
            Shortcut::new("R", false, false, "Add rectangle", ShortcutAction::AddRectangle),
            Shortcut::new("P", false, false, "Show or hide the profile panel", ShortcutAction::ToggleProfile),
            Shortcut::new("F5", false, false, "Refresh weather", ShortcutAction::RefreshWeather),
            Shortcut::new(
                "Escape",
                false,
                false,
                "Cancel drag or resize, otherwise clear selection",
                ShortcutAction::Cancel,
            ),
            Shortcut::new("?", false, true, "Show keyboard shortcuts", ShortcutAction::ShowShortcuts),
        ]
    }

    /// Find the action bound to a key press.
    pub fn action_for(key: &str, ctrl: bool, shift: bool) -> Option<ShortcutAction> {
        Self::all()
            .into_iter()
            .find(|shortcut| shortcut.matches(key, ctrl, shift))
            .map(|shortcut| shortcut.action)
    }

    /// Display string of the shortcut bound to `action`.
    pub fn label_for(action: ShortcutAction) -> Option<String> {
        Self::all()
            .into_iter()
            .find(|shortcut| shortcut.action == action)
            .map(|shortcut| shortcut.format())
    }

    /// Log all shortcuts.
    pub fn log_all() {
        for shortcut in Self::all() {
            log::info!("  {:12} {}", shortcut.format(), shortcut.description);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format() {
        let shortcut = Shortcut::new("S", true, true, "Save", ShortcutAction::Cancel);
        assert_eq!(shortcut.format(), "Ctrl+Shift+S");
        assert_eq!(ShortcutRegistry::label_for(ShortcutAction::AddRectangle).as_deref(), Some("R"));
    }

    #[test]
    fn test_action_lookup() {
        assert_eq!(
            ShortcutRegistry::action_for("r", false, false),
            Some(ShortcutAction::AddRectangle)
        );
        assert_eq!(
            ShortcutRegistry::action_for("Escape", false, false),
            Some(ShortcutAction::Cancel)
        );
        assert_eq!(
            ShortcutRegistry::action_for("?", false, true),
            Some(ShortcutAction::ShowShortcuts)
        );
        // Modifiers must match exactly
        assert_eq!(ShortcutRegistry::action_for("R", true, false), None);
        assert_eq!(ShortcutRegistry::action_for("Q", false, false), None);
    }

    #[test]
    fn test_keys_unique() {
        let all = ShortcutRegistry::all();
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert!(!(a.matches(b.key, b.ctrl, b.shift)), "{} bound twice", a.format());
            }
        }
    }
}
