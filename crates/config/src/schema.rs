use serde::{Deserialize, Serialize};

/// Root configuration structure parsed from `hyprbars.toml`.
///
/// ```toml
/// hyprbars-button = [
///     "rgb(ff4040), 10, 󰖭, hyprctl dispatch killactive",
///     "rgb(eeee11), 10, , hyprctl dispatch fullscreen 1",
/// ]
///
/// [hyprbars]
/// bar_height = 20
///
/// [[window_rule]]
/// class = "firefox"
/// no_bar = true
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BarsConfig {
    /// Bar-wide settings.
    pub hyprbars: HyprbarsConfig,
    /// Button directives, one per button, in visual order from the aligned edge.
    #[serde(rename = "hyprbars-button")]
    pub buttons: Vec<String>,
    /// Per-class overrides.
    #[serde(rename = "window_rule")]
    pub window_rules: Vec<WindowRuleConfig>,
}

/// Bar-wide tunables.  Colours are kept as strings here and compiled by
/// `hyprbars-theme`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HyprbarsConfig {
    /// Master switch; a disabled engine draws nothing and ignores input.
    pub enabled: bool,
    pub bar_color: String,
    /// Bar height in logical pixels.
    pub bar_height: u32,
    /// Title text colour.  Also accepted under Hyprland's `"col.text"` key.
    #[serde(alias = "col.text")]
    pub text_color: String,
    pub bar_text_size: u32,
    pub bar_title_enabled: bool,
    pub bar_blur: bool,
    pub bar_text_font: String,
    pub bar_text_align: TextAlign,
    /// Treat the bar as part of the window (input focus, reserved space).
    pub bar_part_of_window: bool,
    /// Draw the bar above the window border instead of inside it.
    pub bar_precedence_over_border: bool,
    pub bar_buttons_alignment: ButtonAlignment,
    /// Inset of the button row from the bar edges.
    pub bar_padding: u32,
    /// Gap between consecutive buttons.
    pub bar_button_padding: u32,
    pub bar_button_shape: ButtonShape,
    /// Only draw button icons while the button is hovered.
    pub icon_on_hover: bool,
    /// Button colour for unfocused windows.  Empty = use each button's colour.
    pub inactive_button_color: String,
    /// Shell command run on a double click in the bar.  Empty = disabled.
    pub on_double_click: String,
}

impl Default for HyprbarsConfig {
    fn default() -> Self {
        Self {
            enabled:                    true,
            bar_color:                  "rgba(33333388)".to_string(),
            bar_height:                 15,
            text_color:                 "rgba(ffffffff)".to_string(),
            bar_text_size:              10,
            bar_title_enabled:          true,
            bar_blur:                   false,
            bar_text_font:              "Sans".to_string(),
            bar_text_align:             TextAlign::Center,
            bar_part_of_window:         true,
            bar_precedence_over_border: false,
            bar_buttons_alignment:      ButtonAlignment::Right,
            bar_padding:                7,
            bar_button_padding:         5,
            bar_button_shape:           ButtonShape::Rect,
            icon_on_hover:              false,
            inactive_button_color:      String::new(),
            on_double_click:            String::new(),
        }
    }
}

/// Title alignment inside the bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    #[default]
    Center,
}

/// Which bar edge the button row hugs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ButtonAlignment {
    Left,
    #[default]
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ButtonShape {
    #[default]
    Rect,
    Circle,
}

/// Overrides applied to windows whose class matches exactly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowRuleConfig {
    pub class: String,
    /// Hide the bar for matching windows.
    pub no_bar: bool,
    pub bar_color: Option<String>,
    pub title_color: Option<String>,
}
