/// Normalised RGBA colour (each channel in `[0.0, 1.0]`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE:       Self = Self { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };
    pub const BLACK:       Self = Self { r: 0.0, g: 0.0, b: 0.0, a: 1.0 };
    pub const BAR_DEFAULT: Self = Self { r: 0.2, g: 0.2, b: 0.2, a: 0x88 as f32 / 255.0 }; // rgba(33333388)

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parse any colour notation accepted in the config file:
    ///
    /// | Form | Example |
    /// |---|---|
    /// | `rgb(rrggbb)` | `rgb(ff4040)` |
    /// | `rgba(rrggbbaa)` | `rgba(33333388)` |
    /// | `rgb(r, g, b)` | `rgb(255, 64, 64)` |
    /// | `rgba(r, g, b, a)` | `rgba(255, 64, 64, 0.5)` |
    /// | `0xAARRGGBB` | `0xff333333` |
    /// | `#rrggbb[aa]` | `#1e1e2e` |
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();

        if let Some(body) = functional(s, "rgba") {
            return if body.contains(',') {
                Self::from_components(body, true)
            } else if body.len() == 8 {
                Self::from_hex(body)
            } else {
                None
            };
        }
        if let Some(body) = functional(s, "rgb") {
            return if body.contains(',') {
                Self::from_components(body, false)
            } else if body.len() == 6 {
                Self::from_hex(body)
            } else {
                None
            };
        }
        if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            let argb = u32::from_str_radix(hex, 16).ok()?;
            return (hex.len() == 8).then(|| Self::from_argb(argb));
        }
        if s.starts_with('#') {
            return Self::from_hex(s);
        }
        None
    }

    /// Parse a CSS-style hex colour string (`#RRGGBB` or `#RRGGBBAA`).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }

        let byte = |s: &str| -> Option<u8> { u8::from_str_radix(s, 16).ok() };

        match hex.len() {
            6 => Some(Self {
                r: byte(&hex[0..2])? as f32 / 255.0,
                g: byte(&hex[2..4])? as f32 / 255.0,
                b: byte(&hex[4..6])? as f32 / 255.0,
                a: 1.0,
            }),
            8 => Some(Self {
                r: byte(&hex[0..2])? as f32 / 255.0,
                g: byte(&hex[2..4])? as f32 / 255.0,
                b: byte(&hex[4..6])? as f32 / 255.0,
                a: byte(&hex[6..8])? as f32 / 255.0,
            }),
            _ => None,
        }
    }

    /// Decode a packed `0xAARRGGBB` value.
    pub fn from_argb(argb: u32) -> Self {
        let channel = |shift: u32| ((argb >> shift) & 0xff) as f32 / 255.0;
        Self {
            r: channel(16),
            g: channel(8),
            b: channel(0),
            a: channel(24),
        }
    }

    /// `r, g, b` as 0–255 integers, optionally followed by alpha in `[0, 1]`.
    fn from_components(body: &str, with_alpha: bool) -> Option<Self> {
        let parts: Vec<&str> = body.split(',').map(str::trim).collect();
        if parts.len() != if with_alpha { 4 } else { 3 } {
            return None;
        }

        let channel = |s: &str| -> Option<f32> { s.parse::<u8>().ok().map(|v| v as f32 / 255.0) };
        let a = if with_alpha {
            let a = parts[3].parse::<f32>().ok()?;
            if !(0.0..=1.0).contains(&a) {
                return None;
            }
            a
        } else {
            1.0
        };

        Some(Self {
            r: channel(parts[0])?,
            g: channel(parts[1])?,
            b: channel(parts[2])?,
            a,
        })
    }

    /// Readable foreground for text drawn on top of `self`: white on dark
    /// backgrounds, black on light ones.
    #[must_use]
    pub fn contrasting(self) -> Self {
        if self.r + self.g + self.b < 1.0 {
            Self::WHITE
        } else {
            Self::BLACK
        }
    }
}

/// Strip `name(` … `)` and return the trimmed body.
fn functional<'a>(s: &'a str, name: &str) -> Option<&'a str> {
    s.strip_prefix(name)?
        .trim_start()
        .strip_prefix('(')?
        .strip_suffix(')')
        .map(str::trim)
}
