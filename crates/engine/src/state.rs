use crate::window::WindowRules;
use hyprbars_buttons::ButtonRegistry;
use hyprbars_core::{Point, Rect, WindowId};
use hyprbars_render::{layout as compute_layout, BarLayout, IconLoader, LayoutConfig, TextureId};
use std::cell::RefCell;
use std::rc::Rc;

/// The window owns its bar through this handle; the context only holds a
/// `Weak` to it.
pub type BarHandle = Rc<RefCell<BarState>>;

/// Pointer state machine of one bar.  Indices are hitbox indices.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PointerState {
    #[default]
    Idle,
    Hovering(usize),
    Pressed { index: usize, clicks: u32 },
    /// Button held in the drag region, pointer not moved yet.
    DragPending { press: Point },
    /// Window move in progress; `last` is where the previous delta ended.
    Dragging { last: Point },
}

/// Decoration state of one window.
///
/// The cached layout is only valid while [`is_dirty`](Self::is_dirty) is
/// `false`.  [`ensure_layout`](Self::ensure_layout) is the single place that
/// revalidates it.
#[derive(Debug)]
pub struct BarState {
    window:   WindowId,
    dirty:    bool,
    layout:   Option<BarLayout>,
    /// Window geometry the cached layout was computed for.
    geometry: Option<Rect>,
    /// Registry generation the cached layout and icons were built from.
    built_from: Option<u64>,
    pub(crate) pointer: PointerState,
    /// `None` until icons are loaded; then one entry per button.
    icons:    Option<Vec<Option<TextureId>>>,
    rules:    WindowRules,
}

impl BarState {
    pub fn new(window: WindowId) -> Self {
        Self {
            window,
            dirty: true,
            layout: None,
            geometry: None,
            built_from: None,
            pointer: PointerState::Idle,
            icons: None,
            rules: WindowRules::default(),
        }
    }

    pub fn window(&self) -> WindowId {
        self.window
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Force a relayout on the next [`ensure_layout`](Self::ensure_layout).
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// The cached layout, or `None` while it is stale.
    pub fn current_layout(&self) -> Option<&BarLayout> {
        if self.dirty {
            None
        } else {
            self.layout.as_ref()
        }
    }

    /// Revalidate the cache and return the current layout.
    ///
    /// Recomputes when the bar is dirty, the window geometry changed, or the
    /// registry was rebuilt since the last computation; otherwise returns the
    /// cached layout untouched.  A registry rebuild also releases cached
    /// icons and drops pointer state that refers to old hitbox indices.
    /// Icons are loaded lazily afterwards.
    pub fn ensure_layout(
        &mut self,
        geometry: Rect,
        config: &LayoutConfig,
        registry: &ButtonRegistry,
        icons: &mut dyn IconLoader,
    ) -> &BarLayout {
        let generation = registry.generation();

        if self.built_from != Some(generation) {
            self.release_icons(icons);
            if matches!(self.pointer, PointerState::Hovering(_) | PointerState::Pressed { .. }) {
                self.pointer = PointerState::Idle;
            }
        }

        let cached = match self.layout.take() {
            Some(layout)
                if !self.dirty
                    && self.geometry == Some(geometry)
                    && self.built_from == Some(generation) =>
            {
                Some(layout)
            }
            _ => None,
        };

        let layout = cached.unwrap_or_else(|| {
            tracing::trace!(window = %self.window, buttons = registry.len(), "bar relayout");
            compute_layout(geometry, config, registry.as_slice())
        });

        self.geometry = Some(geometry);
        self.built_from = Some(generation);
        self.dirty = false;

        self.load_icons(registry, icons);
        self.layout.insert(layout)
    }

    fn load_icons(&mut self, registry: &ButtonRegistry, loader: &mut dyn IconLoader) {
        if self.icons.is_some() {
            return;
        }
        let loaded = registry
            .iter()
            .map(|spec| {
                if spec.icon.is_empty() {
                    None
                } else {
                    loader.load(&spec.icon, spec.font_size, spec.glyph_color(spec.background))
                }
            })
            .collect();
        self.icons = Some(loaded);
    }

    /// Hand every cached texture back to the loader.
    pub fn release_icons(&mut self, loader: &mut dyn IconLoader) {
        if let Some(icons) = self.icons.take() {
            icons.into_iter().flatten().for_each(|t| loader.release(t));
        }
    }

    /// Loaded icon per button (empty until the first `ensure_layout`).
    pub fn icons(&self) -> &[Option<TextureId>] {
        self.icons.as_deref().unwrap_or(&[])
    }

    pub fn pointer_state(&self) -> PointerState {
        self.pointer
    }

    pub fn hovered(&self) -> Option<usize> {
        match self.pointer {
            PointerState::Hovering(i) => Some(i),
            _ => None,
        }
    }

    pub fn pressed(&self) -> Option<usize> {
        match self.pointer {
            PointerState::Pressed { index, .. } => Some(index),
            _ => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.pointer, PointerState::DragPending { .. } | PointerState::Dragging { .. })
    }

    /// Drop any press, hover or drag in progress.
    pub fn cancel_interaction(&mut self) {
        self.pointer = PointerState::Idle;
    }

    pub fn rules(&self) -> &WindowRules {
        &self.rules
    }

    pub fn set_rules(&mut self, rules: WindowRules) {
        if rules.hidden && !self.rules.hidden {
            self.cancel_interaction();
        }
        self.rules = rules;
        self.dirty = true;
    }

    pub fn is_hidden(&self) -> bool {
        self.rules.hidden
    }
}
