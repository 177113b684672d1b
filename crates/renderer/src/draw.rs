use crate::layout::BarLayout;
use hyprbars_buttons::ButtonSpec;
use hyprbars_config::{ButtonShape, TextAlign};
use hyprbars_core::Rect;
use hyprbars_theme::{Color, Theme};

/// Handle to a texture owned by the host renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u64);

/// One primitive for the host's render pass.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Rect {
        rect:  Rect,
        color: Color,
        shape: ButtonShape,
        blur:  bool,
    },
    /// `clip` is both the layout box and the clip region.
    Text {
        text:  String,
        clip:  Rect,
        color: Color,
        size:  f32,
        font:  String,
        align: TextAlign,
    },
    Texture {
        texture: TextureId,
        rect:    Rect,
    },
}

/// The host renderer's per-frame pass.  Everything pushed by this crate is
/// tagged as belonging to the bars so it can be dropped at teardown.
pub trait RenderPass {
    fn push(&mut self, command: DrawCommand);

    /// Remove every primitive this system pushed.
    fn remove_all(&mut self);
}

/// Collects commands in memory.
#[derive(Debug, Default)]
pub struct RecordingPass {
    pub commands: Vec<DrawCommand>,
}

impl RecordingPass {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl RenderPass for RecordingPass {
    fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    fn remove_all(&mut self) {
        self.commands.clear();
    }
}

/// Turns a button icon into a host texture.  Text shaping and image decoding
/// live on the host side.
pub trait IconLoader {
    /// `None` means "draw the icon as a text glyph instead".
    fn load(&mut self, icon: &str, size: f64, color: Color) -> Option<TextureId>;

    fn release(&mut self, texture: TextureId);
}

/// Loader for hosts without texture support: every icon falls back to text.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoIcons;

impl IconLoader for NoIcons {
    fn load(&mut self, _icon: &str, _size: f64, _color: Color) -> Option<TextureId> {
        None
    }

    fn release(&mut self, _texture: TextureId) {}
}

/// Everything needed to draw one bar for one frame.
#[derive(Debug, Clone, Copy)]
pub struct BarView<'a> {
    pub layout:  &'a BarLayout,
    pub buttons: &'a [ButtonSpec],
    pub theme:   &'a Theme,
    pub title:   &'a str,
    /// Whether the window has focus.
    pub active:  bool,
    /// Hovered hitbox index.
    pub hovered: Option<usize>,
    /// Loaded icon per hitbox index.
    pub icons:   &'a [Option<TextureId>],
    /// Per-window overrides from window rules.
    pub bar_color:   Option<Color>,
    pub title_color: Option<Color>,
}

/// Emit the draw commands for one bar: background, then each button with its
/// icon, then the title.
pub fn draw_bar(pass: &mut dyn RenderPass, view: &BarView<'_>) {
    let theme = view.theme;

    pass.push(DrawCommand::Rect {
        rect:  view.layout.bar,
        color: view.bar_color.unwrap_or(theme.bar.background),
        shape: ButtonShape::Rect,
        blur:  theme.bar.blur,
    });

    for (i, hitbox) in view.layout.hitboxes.iter().enumerate() {
        let Some(spec) = view.buttons.get(hitbox.button) else {
            continue;
        };
        if hitbox.rect.is_empty() {
            continue;
        }

        let color = match theme.buttons.inactive_color {
            Some(inactive) if !view.active => inactive,
            _ => spec.background,
        };
        pass.push(DrawCommand::Rect {
            rect: hitbox.rect,
            color,
            shape: theme.buttons.shape,
            blur: false,
        });

        if theme.buttons.icon_on_hover && view.hovered != Some(i) {
            continue;
        }

        if let Some(texture) = view.icons.get(i).copied().flatten() {
            pass.push(DrawCommand::Texture { texture, rect: hitbox.rect });
        } else if !spec.icon.is_empty() {
            pass.push(DrawCommand::Text {
                text:  spec.icon.clone(),
                clip:  hitbox.rect,
                color: spec.glyph_color(color),
                size:  spec.font_size as f32,
                font:  theme.bar.font.clone(),
                align: TextAlign::Center,
            });
        }
    }

    if theme.bar.title_enabled && !view.title.is_empty() && !view.layout.title.is_empty() {
        pass.push(DrawCommand::Text {
            text:  view.title.to_string(),
            clip:  view.layout.title,
            color: view.title_color.unwrap_or(theme.bar.text_color),
            size:  theme.bar.text_size,
            font:  theme.bar.font.clone(),
            align: theme.bar.text_align,
        });
    }
}
