//! Navbar buttons and their per-control settings

use serde::{Deserialize, Serialize};

/// Something the host should do in response to a navbar button.
/// The navbar only reports these; zoom, fullscreen and layout changes
/// belong to the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavbarAction {
    FlipLeft,
    FlipRight,
    OnePage,
    TwoPage,
    Thumbnail,
    ZoomOut,
    ZoomIn,
    Fullscreen,
    ToggleToolbars,
}

impl NavbarAction {
    /// Short glyph used on the terminal bar
    pub fn glyph(&self) -> &'static str {
        match self {
            NavbarAction::FlipLeft => "◀",
            NavbarAction::FlipRight => "▶",
            NavbarAction::OnePage => "▯",
            NavbarAction::TwoPage => "▯▯",
            NavbarAction::Thumbnail => "▦",
            NavbarAction::ZoomOut => "−",
            NavbarAction::ZoomIn => "+",
            NavbarAction::Fullscreen => "⛶",
            NavbarAction::ToggleToolbars => "▾",
        }
    }

    pub fn default_label(&self) -> &'static str {
        match self {
            NavbarAction::FlipLeft => "Flip left",
            NavbarAction::FlipRight => "Flip right",
            NavbarAction::OnePage => "One-page view",
            NavbarAction::TwoPage => "Two-page view",
            NavbarAction::Thumbnail => "Thumbnail view",
            NavbarAction::ZoomOut => "Zoom out",
            NavbarAction::ZoomIn => "Zoom in",
            NavbarAction::Fullscreen => "Toggle fullscreen",
            NavbarAction::ToggleToolbars => "Toggle toolbars",
        }
    }
}

/// Visibility and tooltip label of an optional control
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlOption {
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Default for ControlOption {
    fn default() -> Self {
        Self {
            visible: true,
            label: None,
        }
    }
}

fn default_true() -> bool {
    true
}

/// The optional view-mode controls; the rest of the bar is fixed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlsConfig {
    #[serde(default)]
    pub one_page: ControlOption,
    #[serde(default)]
    pub two_page: ControlOption,
    #[serde(default)]
    pub thumbnail: ControlOption,
}

impl ControlsConfig {
    fn option_for(&self, action: NavbarAction) -> Option<&ControlOption> {
        match action {
            NavbarAction::OnePage => Some(&self.one_page),
            NavbarAction::TwoPage => Some(&self.two_page),
            NavbarAction::Thumbnail => Some(&self.thumbnail),
            _ => None,
        }
    }

    pub fn is_visible(&self, action: NavbarAction) -> bool {
        self.option_for(action).is_none_or(|o| o.visible)
    }

    pub fn label(&self, action: NavbarAction) -> String {
        self.option_for(action)
            .and_then(|o| o.label.clone())
            .unwrap_or_else(|| action.default_label().to_string())
    }
}

/// A button as laid out on the bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavbarButton {
    pub action: NavbarAction,
    pub label: String,
}

/// Buttons of the full navbar, in display order
pub fn desktop_buttons(controls: &ControlsConfig) -> Vec<NavbarButton> {
    [
        NavbarAction::FlipLeft,
        NavbarAction::FlipRight,
        NavbarAction::OnePage,
        NavbarAction::TwoPage,
        NavbarAction::Thumbnail,
        NavbarAction::ZoomOut,
        NavbarAction::ZoomIn,
        NavbarAction::Fullscreen,
    ]
    .into_iter()
    .filter(|action| controls.is_visible(*action))
    .map(|action| NavbarButton {
        action,
        label: controls.label(action),
    })
    .collect()
}

/// Buttons of the embedded navbar
pub fn embed_buttons() -> Vec<NavbarButton> {
    [
        NavbarAction::FlipLeft,
        NavbarAction::FlipRight,
        NavbarAction::Fullscreen,
    ]
    .into_iter()
    .map(|action| NavbarButton {
        action,
        label: action.default_label().to_string(),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_controls_visible_by_default() {
        let buttons = desktop_buttons(&ControlsConfig::default());
        assert_eq!(buttons.len(), 8);
        assert_eq!(buttons[0].action, NavbarAction::FlipLeft);
        assert_eq!(buttons[7].action, NavbarAction::Fullscreen);
    }

    #[test]
    fn test_hidden_controls_are_left_out() {
        let controls = ControlsConfig {
            two_page: ControlOption {
                visible: false,
                label: None,
            },
            thumbnail: ControlOption {
                visible: false,
                label: None,
            },
            ..Default::default()
        };
        let actions: Vec<_> = desktop_buttons(&controls)
            .into_iter()
            .map(|b| b.action)
            .collect();
        assert!(!actions.contains(&NavbarAction::TwoPage));
        assert!(!actions.contains(&NavbarAction::Thumbnail));
        assert!(actions.contains(&NavbarAction::OnePage));
    }

    #[test]
    fn test_custom_label_overrides_default() {
        let controls = ControlsConfig {
            one_page: ControlOption {
                visible: true,
                label: Some("Single".to_string()),
            },
            ..Default::default()
        };
        assert_eq!(controls.label(NavbarAction::OnePage), "Single");
        assert_eq!(controls.label(NavbarAction::ZoomIn), "Zoom in");
    }

    #[test]
    fn test_embed_bar_has_flip_and_fullscreen_only() {
        let actions: Vec<_> = embed_buttons().into_iter().map(|b| b.action).collect();
        assert_eq!(
            actions,
            vec![
                NavbarAction::FlipLeft,
                NavbarAction::FlipRight,
                NavbarAction::Fullscreen
            ]
        );
    }
}
