use crate::error::ButtonParseError;
use hyprbars_theme::Color;
use std::str::FromStr;

/// One clickable bar button, as declared by a directive:
///
/// ```text
/// hyprbars-button = <bgcolor>, <size>, <icon>, <command>[, <fgcolor>]
/// ```
///
/// `size` is either a single number (square button) or `WIDTHxHEIGHT`.
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonSpec {
    /// Shell command run on click.  Empty = the button does nothing.
    pub command: String,
    /// `true` when the directive supplied a foreground colour.
    pub has_custom_foreground: bool,
    pub foreground: Color,
    pub background: Color,
    pub width: f64,
    pub height: f64,
    /// Icon path or glyph.  Empty = plain button.
    pub icon: String,
    /// Size of the fallback glyph when the icon is drawn as text.
    pub font_size: f64,
}

impl ButtonSpec {
    /// Parse one directive value.
    pub fn parse(directive: &str) -> Result<Self, ButtonParseError> {
        let fields: Vec<&str> = directive.split(',').map(str::trim).collect();
        let field = |i: usize| fields.get(i).copied().unwrap_or("");

        let (bg, size) = (field(0), field(1));
        if bg.is_empty() || size.is_empty() {
            return Err(ButtonParseError::MissingRequired);
        }

        let (width, height) = parse_size(size)?;

        let background = Color::parse(bg).ok_or(ButtonParseError::InvalidBackground)?;

        // Commands may contain commas themselves; only an exact fifth field is
        // read as the foreground colour.
        let (command, fg) = match fields.len() {
            0..=4 => (field(3).to_string(), ""),
            5 => (field(3).to_string(), field(4)),
            // Everything after the third comma, as written.
            _ => {
                let rest = directive.splitn(4, ',').nth(3).unwrap_or("");
                (rest.trim().to_string(), "")
            }
        };

        let (has_custom_foreground, foreground) = if fg.is_empty() {
            (false, Color::WHITE)
        } else {
            (true, Color::parse(fg).ok_or(ButtonParseError::InvalidForeground)?)
        };

        Ok(Self {
            command,
            has_custom_foreground,
            foreground,
            background,
            width,
            height,
            icon: field(2).to_string(),
            font_size: width.min(height),
        })
    }

    /// Colour for the icon glyph: the custom foreground if one was given,
    /// otherwise whatever contrasts with `background`.
    pub fn glyph_color(&self, background: Color) -> Color {
        if self.has_custom_foreground {
            self.foreground
        } else {
            background.contrasting()
        }
    }
}

impl FromStr for ButtonSpec {
    type Err = ButtonParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// `"10"` → `(10, 10)`, `"12 x 8"` → `(12, 8)`.
fn parse_size(raw: &str) -> Result<(f64, f64), ButtonParseError> {
    let raw = raw.trim();

    let (width, height) = match raw.find(['x', 'X']) {
        None => {
            let side = number(raw)?;
            (side, side)
        }
        Some(sep) => {
            let left = raw[..sep].trim();
            let right = raw[sep + 1..].trim();
            if left.is_empty() || right.is_empty() {
                return Err(ButtonParseError::InvalidSizeFormat);
            }
            (number(left)?, number(right)?)
        }
    };

    if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
        return Err(ButtonParseError::NonPositiveSize);
    }
    Ok((width, height))
}

fn number(s: &str) -> Result<f64, ButtonParseError> {
    s.parse::<f64>()
        .map_err(|e| ButtonParseError::InvalidSize(format!("'{s}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_size() {
        let b = ButtonSpec::parse("rgb(ff4040), 10, X, hyprctl dispatch killactive").unwrap();
        assert_eq!((b.width, b.height), (10.0, 10.0));
        assert_eq!(b.command, "hyprctl dispatch killactive");
        assert_eq!(b.icon, "X");
        assert!(!b.has_custom_foreground);
        assert_eq!(b.foreground, Color::WHITE);
    }

    #[test]
    fn rect_size_ignores_whitespace_and_case() {
        for size in ["12x8", " 12 x 8 ", "12X8", "12 X8"] {
            let b = ButtonSpec::parse(&format!("rgb(ff4040), {size}, , ")).unwrap();
            assert_eq!((b.width, b.height), (12.0, 8.0), "size {size:?}");
        }
        let b = ButtonSpec::parse("rgb(ff4040),   7.5  , , ").unwrap();
        assert_eq!((b.width, b.height), (7.5, 7.5));
    }

    #[test]
    fn explicit_foreground_with_empty_icon_and_command() {
        let b = ButtonSpec::parse("rgb(ff0000), 12, , , rgb(00ff00)").unwrap();
        assert!(b.has_custom_foreground);
        assert_eq!(b.foreground, Color::rgba(0.0, 1.0, 0.0, 1.0));
        assert!(b.command.is_empty());
        assert!(b.icon.is_empty());
    }

    #[test]
    fn empty_required_fields() {
        assert_eq!(ButtonSpec::parse(", 12, icon, cmd"), Err(ButtonParseError::MissingRequired));
        assert_eq!(ButtonSpec::parse("rgb(ff0000), , icon, cmd"), Err(ButtonParseError::MissingRequired));
        assert_eq!(ButtonSpec::parse(""), Err(ButtonParseError::MissingRequired));
        assert_eq!(
            ButtonParseError::MissingRequired.to_string(),
            "bgcolor and size cannot be empty"
        );
    }

    #[test]
    fn empty_size_halves() {
        for size in ["x", "10x", "x10", " x "] {
            assert_eq!(
                ButtonSpec::parse(&format!("rgb(ff0000), {size}, icon, cmd")),
                Err(ButtonParseError::InvalidSizeFormat),
                "size {size:?}"
            );
        }
        assert!(ButtonParseError::InvalidSizeFormat
            .to_string()
            .starts_with("invalid widthxheight format"));
    }

    #[test]
    fn non_numeric_size_reports_reason() {
        let err = ButtonSpec::parse("rgb(ff0000), big, icon, cmd").unwrap_err();
        assert!(matches!(err, ButtonParseError::InvalidSize(_)));
        assert!(err.to_string().starts_with("failed to parse width/height"));
    }

    #[test]
    fn zero_and_negative_sizes_are_rejected() {
        assert_eq!(ButtonSpec::parse("rgb(ff0000), 0, , "), Err(ButtonParseError::NonPositiveSize));
        assert_eq!(ButtonSpec::parse("rgb(ff0000), 5x-1, , "), Err(ButtonParseError::NonPositiveSize));
        assert_eq!(ButtonSpec::parse("rgb(ff0000), inf, , "), Err(ButtonParseError::NonPositiveSize));
    }

    #[test]
    fn bad_colours() {
        assert_eq!(ButtonSpec::parse("blue, 10, , cmd"), Err(ButtonParseError::InvalidBackground));
        assert_eq!(
            ButtonSpec::parse("rgb(ff0000), 10, , cmd, nope"),
            Err(ButtonParseError::InvalidForeground)
        );
    }

    #[test]
    fn commands_may_contain_commas() {
        let b = ButtonSpec::parse("rgb(ff0000), 10, , notify-send a, b, c").unwrap();
        assert_eq!(b.command, "notify-send a, b, c");
        assert!(!b.has_custom_foreground);
    }

    #[test]
    fn command_commas_are_kept_verbatim() {
        let b = ButtonSpec::parse("rgb(ff0000), 10, , echo a,b,c").unwrap();
        assert_eq!(b.command, "echo a,b,c");
        let b = ButtonSpec::parse("rgb(ff0000), 10, ,  printf '%s,%s' x y ,z ").unwrap();
        assert_eq!(b.command, "printf '%s,%s' x y ,z");
    }

    #[test]
    fn empty_fifth_field_means_default_foreground() {
        let b = ButtonSpec::parse("rgb(ff0000), 10, , cmd, ").unwrap();
        assert!(!b.has_custom_foreground);
        assert_eq!(b.foreground, Color::WHITE);
        assert_eq!(b.command, "cmd");
    }

    #[test]
    fn glyph_colour_contrasts_unless_overridden() {
        let dark = ButtonSpec::parse("rgb(101010), 10, , ").unwrap();
        assert_eq!(dark.glyph_color(dark.background), Color::WHITE);
        let light = ButtonSpec::parse("rgb(f0f0f0), 10, , ").unwrap();
        assert_eq!(light.glyph_color(light.background), Color::BLACK);
        let custom = ButtonSpec::parse("rgb(f0f0f0), 10, , , rgb(ff0000)").unwrap();
        assert_eq!(custom.glyph_color(custom.background), Color::rgba(1.0, 0.0, 0.0, 1.0));
    }
}
