use crate::interaction::handle_pointer;
use crate::state::{BarHandle, BarState};
use crate::version::check_version;
use crate::window::{WindowInfo, WindowRule};
use hyprbars_buttons::{ButtonParseError, ButtonRegistry, ButtonSpec, DirectiveError};
use hyprbars_config::{BarsConfig, HyprbarsConfig};
use hyprbars_core::{Action, PointerEvent, Result, WindowId};
use hyprbars_render::{draw_bar, BarView, IconLoader, LayoutConfig, RenderPass};
use hyprbars_theme::Theme;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use tracing::{debug, info, warn};

/// Where the host should place a bar relative to its window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecorationPositioning {
    /// Space the bar claims above the window content.
    pub reserved_top:   f64,
    /// Input on the bar counts as input on the window.
    pub part_of_window: bool,
    /// Draw over the window border instead of inside it.
    pub above_border:   bool,
}

/// Compiled settings from the `[hyprbars]` table and window rules.
#[derive(Debug, Clone)]
struct Settings {
    enabled:         bool,
    layout:          LayoutConfig,
    theme:           Theme,
    on_double_click: String,
    part_of_window:  bool,
    above_border:    bool,
    rules:           Vec<WindowRule>,
}

impl Settings {
    fn from_config(cfg: &BarsConfig) -> Self {
        let bars: &HyprbarsConfig = &cfg.hyprbars;
        Self {
            enabled:         bars.enabled,
            layout:          LayoutConfig::from_config(bars),
            theme:           Theme::from_config(bars),
            on_double_click: bars.on_double_click.trim().to_string(),
            part_of_window:  bars.bar_part_of_window,
            above_border:    bars.bar_precedence_over_border,
            rules:           cfg.window_rules.iter().map(WindowRule::compile).collect(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_config(&BarsConfig::default())
    }
}

/// Process-wide bar state, scoped to one activation.
///
/// Holds the button registry and a `Weak` reference to every live bar.
/// Windows own their bars; dropping a [`BarHandle`] is enough to destroy
/// one, and stale entries are skipped and pruned here.
#[derive(Debug, Default)]
pub struct BarsContext {
    registry: ButtonRegistry,
    bars:     Vec<Weak<RefCell<BarState>>>,
    settings: Settings,
}

impl BarsContext {
    /// A context with default settings and no buttons.
    pub fn new() -> Self {
        Self::default()
    }

    /// Activate against a running compositor.  Fails if the compositor is
    /// too old for this build.
    pub fn activate(host_version: &str) -> Result<Self> {
        check_version(host_version)?;
        info!(host_version, "hyprbars activated");
        Ok(Self::new())
    }

    /// Tear down: drop every primitive from the pass, release cached icons
    /// and forget all buttons and bars.
    pub fn deactivate(mut self, pass: &mut dyn RenderPass, icons: &mut dyn IconLoader) {
        pass.remove_all();
        for bar in self.bars.drain(..).filter_map(|w| w.upgrade()) {
            let mut bar = bar.borrow_mut();
            bar.cancel_interaction();
            bar.release_icons(icons);
        }
        self.registry.clear();
        info!("hyprbars deactivated");
    }

    // ── Configuration ─────────────────────────────────────────────────────────

    pub fn registry(&self) -> &ButtonRegistry {
        &self.registry
    }

    /// A configuration reload is starting: drop every button so the
    /// directives can be re-parsed from scratch.
    pub fn begin_reload(&mut self) {
        self.registry.clear();
        self.mark_all_dirty();
    }

    /// Parse one `hyprbars-button` directive and append it.  On error the
    /// registry is left untouched.
    pub fn add_button(&mut self, directive: &str) -> Result<(), ButtonParseError> {
        let spec = ButtonSpec::parse(directive)?;
        self.registry.push(spec);
        self.mark_all_dirty();
        Ok(())
    }

    /// Full reload: clear, recompile settings, then parse every directive.
    /// A bad directive is reported and skipped; the rest still load.
    pub fn apply_config(&mut self, cfg: &BarsConfig) -> Vec<DirectiveError> {
        self.begin_reload();
        self.settings = Settings::from_config(cfg);

        let errors: Vec<DirectiveError> = cfg
            .buttons
            .iter()
            .enumerate()
            .filter_map(|(index, directive)| {
                self.add_button(directive).err().map(|source| DirectiveError {
                    index,
                    directive: directive.clone(),
                    source,
                })
            })
            .collect();

        for e in &errors {
            warn!("{e}");
        }
        info!(
            buttons = self.registry.len(),
            rejected = errors.len(),
            "hyprbars config applied"
        );
        errors
    }

    // ── Window lifecycle ──────────────────────────────────────────────────────

    /// A window was mapped.  Returns the new bar for the window to own, or
    /// `None` if the window wants no decorations or already has a bar.
    pub fn on_window_mapped(&mut self, window: &WindowInfo) -> Option<BarHandle> {
        if !window.wants_decoration {
            debug!(window = %window.id, "window opted out of decorations");
            return None;
        }
        if self.find(window.id).is_some() {
            return None;
        }

        self.prune();

        let mut state = BarState::new(window.id);
        state.set_rules(WindowRule::resolve(&self.settings.rules, &window.class));
        let bar = Rc::new(RefCell::new(state));
        self.bars.push(Rc::downgrade(&bar));
        debug!(window = %window.id, class = %window.class, "bar attached");
        Some(bar)
    }

    /// A window was unmapped or closed.  Cancels any interaction and releases
    /// the bar's icons; the window drops its handle afterwards.  Unknown
    /// windows are ignored.
    pub fn on_window_closed(&mut self, window: WindowId, icons: &mut dyn IconLoader) -> bool {
        let Some(bar) = self.find(window) else {
            return false;
        };
        {
            let mut bar = bar.borrow_mut();
            bar.cancel_interaction();
            bar.release_icons(icons);
        }
        self.bars.retain(|w| !w.upgrade().is_some_and(|b| Rc::ptr_eq(&b, &bar)));
        self.prune();
        debug!(%window, "bar detached");
        true
    }

    /// Window rules may have changed; recompute this window's overrides.
    pub fn on_window_rules_updated(&mut self, window: &WindowInfo) -> bool {
        let Some(bar) = self.find(window.id) else {
            return false;
        };
        bar.borrow_mut()
            .set_rules(WindowRule::resolve(&self.settings.rules, &window.class));
        true
    }

    /// The live bar attached to `window`, if any.
    pub fn find(&self, window: WindowId) -> Option<BarHandle> {
        self.bars
            .iter()
            .filter_map(Weak::upgrade)
            .find(|b| b.borrow().window() == window)
    }

    /// Number of bars still alive.
    pub fn live_bars(&self) -> usize {
        self.bars.iter().filter(|w| w.strong_count() > 0).count()
    }

    /// Forget bars whose window already dropped them.
    pub fn prune(&mut self) {
        self.bars.retain(|w| w.strong_count() > 0);
    }

    pub fn mark_all_dirty(&self) {
        for bar in self.bars.iter().filter_map(Weak::upgrade) {
            bar.borrow_mut().mark_dirty();
        }
    }

    // ── Per-frame ─────────────────────────────────────────────────────────────

    /// Revalidate the bar's layout for `window` and load its icons.
    pub fn prepare(&self, bar: &BarHandle, window: &WindowInfo, icons: &mut dyn IconLoader) {
        bar.borrow_mut()
            .ensure_layout(window.geometry, &self.settings.layout, &self.registry, icons);
    }

    /// Draw the bar.  Stale (dirty) bars, hidden bars, fullscreen windows and
    /// a disabled engine draw nothing.
    pub fn render(&self, bar: &BarHandle, window: &WindowInfo, pass: &mut dyn RenderPass) {
        if !self.visible(window) {
            return;
        }
        let state = bar.borrow();
        if state.is_hidden() {
            return;
        }
        let Some(layout) = state.current_layout() else {
            debug!(window = %window.id, "skipping stale bar");
            return;
        };

        draw_bar(
            pass,
            &BarView {
                layout,
                buttons: self.registry.as_slice(),
                theme: &self.settings.theme,
                title: &window.title,
                active: window.active,
                hovered: state.hovered(),
                icons: state.icons(),
                bar_color: state.rules().bar_color,
                title_color: state.rules().title_color,
            },
        );
    }

    /// Feed a pointer event to the bar.
    pub fn pointer(&self, bar: &BarHandle, window: &WindowInfo, event: PointerEvent) -> Action {
        let mut state = bar.borrow_mut();
        if !self.visible(window) || state.is_hidden() {
            state.cancel_interaction();
            return Action::None;
        }
        handle_pointer(&mut state, event, &self.registry, &self.settings.on_double_click)
    }

    /// Space and stacking the host should give the bar.
    pub fn positioning(&self, bar: &BarHandle, window: &WindowInfo) -> DecorationPositioning {
        let shown = self.visible(window) && !bar.borrow().is_hidden();
        DecorationPositioning {
            reserved_top:   if shown { self.settings.layout.height } else { 0.0 },
            part_of_window: self.settings.part_of_window,
            above_border:   self.settings.above_border,
        }
    }

    fn visible(&self, window: &WindowInfo) -> bool {
        self.settings.enabled && !window.fullscreen
    }
}
