use crate::colors::Color;
use hyprbars_config::{ButtonShape, TextAlign};

/// Visual settings for the bar surface and its title.
#[derive(Debug, Clone)]
pub struct BarStyle {
    pub background:    Color,
    pub blur:          bool,
    pub text_color:    Color,
    pub text_size:     f32,
    pub font:          String,
    pub title_enabled: bool,
    pub text_align:    TextAlign,
}

/// Visual settings shared by every bar button.
#[derive(Debug, Clone)]
pub struct ButtonStyle {
    pub shape: ButtonShape,
    /// Replaces each button's colour on unfocused windows.  `None` = unset.
    pub inactive_color: Option<Color>,
    /// Draw icons only on the hovered button.
    pub icon_on_hover: bool,
}
