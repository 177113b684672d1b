use hyprbars_buttons::ButtonSpec;
use hyprbars_config::{ButtonAlignment, HyprbarsConfig};
use hyprbars_core::{Point, Rect};

/// The subset of settings that affects geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    pub height:         f64,
    pub padding:        f64,
    pub button_padding: f64,
    pub alignment:      ButtonAlignment,
}

impl LayoutConfig {
    pub fn from_config(cfg: &HyprbarsConfig) -> Self {
        Self {
            height:         cfg.bar_height as f64,
            padding:        cfg.bar_padding as f64,
            button_padding: cfg.bar_button_padding as f64,
            alignment:      cfg.bar_buttons_alignment,
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::from_config(&HyprbarsConfig::default())
    }
}

/// Resolved rectangle of one button.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hitbox {
    pub rect:   Rect,
    /// Index of the button in the registry.
    pub button: usize,
}

/// Output of [`layout`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BarLayout {
    pub bar:      Rect,
    /// Space left for the window title once the buttons are placed.
    pub title:    Rect,
    /// One entry per button, in registry order.
    pub hitboxes: Vec<Hitbox>,
}

impl BarLayout {
    /// Indices (into `hitboxes`) of every hitbox containing `p`.
    pub fn hitboxes_at(&self, p: Point) -> impl Iterator<Item = usize> + '_ {
        self.hitboxes
            .iter()
            .enumerate()
            .filter(move |(_, h)| h.rect.contains(p))
            .map(|(i, _)| i)
    }
}

/// Lay out the bar for a window whose content area is `window`.
///
/// The bar spans the window's width directly above its content.  Buttons
/// form a single row starting `padding` from the aligned edge, the first
/// button nearest that edge, separated by `button_padding` and vertically
/// centred.  Hitboxes are clipped to the bar, so a button that does not fit
/// ends up with an empty rect; the hitbox count always equals the button
/// count.
///
/// Pure: identical inputs give identical output.
pub fn layout(window: Rect, config: &LayoutConfig, buttons: &[ButtonSpec]) -> BarLayout {
    let bar = Rect::new(window.x, window.y - config.height, window.width, config.height);

    let mut offset = config.padding;
    let mut hitboxes = Vec::with_capacity(buttons.len());

    for (button, spec) in buttons.iter().enumerate() {
        let x = match config.alignment {
            ButtonAlignment::Right => bar.right() - offset - spec.width,
            ButtonAlignment::Left  => bar.x + offset,
        };
        let y = bar.y + (bar.height - spec.height) / 2.0;

        hitboxes.push(Hitbox {
            rect: bar.intersection(&Rect::new(x, y, spec.width, spec.height)),
            button,
        });

        offset += spec.width + config.button_padding;
    }

    // `offset` now covers the padding, every button and one gap after the
    // last button; that gap separates the title from the row.
    let reserved = offset;
    let title_width = (bar.width - reserved - config.padding).max(0.0);
    let title_x = match config.alignment {
        ButtonAlignment::Right => bar.x + config.padding,
        ButtonAlignment::Left  => bar.x + reserved.min(bar.width),
    };

    BarLayout {
        bar,
        title: Rect::new(title_x, bar.y, title_width, bar.height),
        hitboxes,
    }
}
