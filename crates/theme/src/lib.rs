pub mod colors;
pub mod style;

pub use colors::Color;
pub use style::{BarStyle, ButtonStyle};

use hyprbars_config::HyprbarsConfig;

/// Compiled theme derived from [`HyprbarsConfig`].
///
/// All colours are pre-parsed into normalised `[0, 1]` RGBA.
/// Calling [`Theme::from_config`] is infallible: invalid colour strings fall
/// back to the plugin defaults with a warning.
#[derive(Debug, Clone)]
pub struct Theme {
    pub bar:     BarStyle,
    pub buttons: ButtonStyle,
}

impl Theme {
    /// Build a [`Theme`] from the config file's `[hyprbars]` section.
    pub fn from_config(cfg: &HyprbarsConfig) -> Self {
        Self {
            bar: BarStyle {
                background:    color_or("bar_color", &cfg.bar_color, Color::BAR_DEFAULT),
                blur:          cfg.bar_blur,
                text_color:    color_or("col.text", &cfg.text_color, Color::WHITE),
                text_size:     cfg.bar_text_size as f32,
                font:          cfg.bar_text_font.clone(),
                title_enabled: cfg.bar_title_enabled,
                text_align:    cfg.bar_text_align,
            },
            buttons: ButtonStyle {
                shape: cfg.bar_button_shape,
                inactive_color: if cfg.inactive_button_color.trim().is_empty() {
                    None
                } else {
                    let parsed = Color::parse(&cfg.inactive_button_color);
                    if parsed.is_none() {
                        tracing::warn!(
                            "invalid inactive_button_color '{}'; leaving it unset",
                            cfg.inactive_button_color
                        );
                    }
                    parsed
                },
                icon_on_hover: cfg.icon_on_hover,
            },
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&HyprbarsConfig::default())
    }
}

fn color_or(key: &str, raw: &str, fallback: Color) -> Color {
    Color::parse(raw).unwrap_or_else(|| {
        tracing::warn!("invalid {key} '{raw}'; using default");
        fallback
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_compile_without_fallbacks() {
        let theme = Theme::default();
        assert_eq!(theme.bar.text_color, Color::WHITE);
        assert!(theme.buttons.inactive_color.is_none());
        assert_eq!(theme.bar.text_size, 10.0);
    }

    #[test]
    fn invalid_colours_fall_back() {
        let cfg = HyprbarsConfig {
            bar_color: "not a colour".into(),
            inactive_button_color: "rgb(nope)".into(),
            ..Default::default()
        };
        let theme = Theme::from_config(&cfg);
        assert_eq!(theme.bar.background, Color::BAR_DEFAULT);
        assert!(theme.buttons.inactive_color.is_none());
    }

    #[test]
    fn inactive_colour_is_parsed_when_set() {
        let cfg = HyprbarsConfig {
            inactive_button_color: "rgb(000000)".into(),
            ..Default::default()
        };
        assert_eq!(Theme::from_config(&cfg).buttons.inactive_color, Some(Color::BLACK));
    }
}
