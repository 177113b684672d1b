use crate::dispatch::IpcDispatcher;
use crate::windows::{window_info, WindowTable};
use hyprbars_buttons::DirectiveError;
use hyprbars_config::BarsConfig;
use hyprbars_core::{Action, PointerEvent, WindowId};
use hyprbars_engine::{perform, BarsContext, DecorationPositioning, WindowInfo};
use hyprbars_ipc::ClientInfo;
use hyprbars_render::{NoIcons, RecordingPass, RenderPass};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info};

/// Daemon state: the bar context, the window mirror and the frame being
/// built.  Everything here lives on the event-loop task.
#[derive(Debug)]
pub struct Daemon {
    ctx:        BarsContext,
    windows:    WindowTable,
    dispatcher: IpcDispatcher,
    pass:       RecordingPass,
    icons:      NoIcons,
    /// Window whose bar holds a press or a drag; it gets every pointer event.
    grab:       Option<WindowId>,
    /// Window whose bar last received pointer input.
    hover:      Option<WindowId>,
    /// Where each bar sits relative to its window in the last frame.
    placements: BTreeMap<WindowId, DecorationPositioning>,
    /// Geometry is stale after a drag; re-read `j/clients`.
    refresh:    bool,
}

impl Daemon {
    pub fn new(ctx: BarsContext, dispatcher: IpcDispatcher) -> Self {
        Self {
            ctx,
            windows: WindowTable::new(),
            dispatcher,
            pass: RecordingPass::new(),
            icons: NoIcons,
            grab: None,
            hover: None,
            placements: BTreeMap::new(),
            refresh: false,
        }
    }

    pub fn context(&self) -> &BarsContext {
        &self.ctx
    }

    pub fn windows(&self) -> &WindowTable {
        &self.windows
    }

    /// The last frame.
    pub fn pass(&self) -> &RecordingPass {
        &self.pass
    }

    /// Placement of a window's bar in the last frame.
    pub fn placement(&self, id: WindowId) -> Option<DecorationPositioning> {
        self.placements.get(&id).copied()
    }

    /// Space reserved above windows by visible bars in the last frame.
    pub fn reserved_height(&self) -> f64 {
        self.placements.values().map(|p| p.reserved_top).sum()
    }

    /// Reload settings and buttons.  Rejected directives are posted as one
    /// Hyprland notification.
    pub fn apply_config(&mut self, cfg: &BarsConfig) -> Vec<DirectiveError> {
        let errors = self.ctx.apply_config(cfg);
        for tracked in self.windows.iter() {
            self.ctx.on_window_rules_updated(&tracked.info);
        }

        if !errors.is_empty() {
            let details: Vec<String> = errors.iter().map(ToString::to_string).collect();
            self.dispatcher.notify_error(details.join("; "));
        }
        errors
    }

    /// Reconcile with a fresh `j/clients` listing: new windows get bars,
    /// vanished ones are closed.
    pub fn sync_clients(&mut self, clients: &[ClientInfo]) {
        let active = self.windows.active();
        let mut seen = BTreeSet::new();

        for info in clients.iter().filter_map(|c| window_info(c, active)) {
            seen.insert(info.id);
            self.window_changed(info);
        }

        for id in self.windows.ids() {
            if !seen.contains(&id) {
                self.window_closed(id);
            }
        }
    }

    fn window_changed(&mut self, info: WindowInfo) {
        let id = info.id;
        let previous = self.windows.upsert(info);
        let Some(tracked) = self.windows.get_mut(id) else {
            return;
        };

        match previous {
            None => {
                tracked.bar = self.ctx.on_window_mapped(&tracked.info);
                info!(window = %id, class = %tracked.info.class, decorated = tracked.bar.is_some(), "window mapped");
            }
            Some(prev) if prev.class != tracked.info.class => {
                self.ctx.on_window_rules_updated(&tracked.info);
            }
            Some(_) => {}
        }
    }

    pub fn window_closed(&mut self, id: WindowId) {
        self.ctx.on_window_closed(id, &mut self.icons);
        if self.windows.remove(id).is_some() {
            info!(window = %id, "window closed");
        }
        if self.grab == Some(id) {
            self.grab = None;
        }
        if self.hover == Some(id) {
            self.hover = None;
        }
    }

    pub fn set_active(&mut self, active: Option<WindowId>) {
        self.windows.set_active(active);
    }

    /// Route one pointer event to the bar it concerns and carry out the
    /// resulting action.
    pub fn pointer(&mut self, event: PointerEvent) {
        let pos = event.pos();
        let target = self.grab.or_else(|| self.windows.bar_at(pos));

        if let Some(left) = self.hover.filter(|h| Some(*h) != target) {
            self.deliver(left, PointerEvent::Motion { pos });
        }
        self.hover = target;

        if let Some(id) = target {
            self.deliver(id, event);
        }
    }

    fn deliver(&mut self, id: WindowId, event: PointerEvent) {
        let Some(tracked) = self.windows.get(id) else {
            return;
        };
        let Some(bar) = tracked.bar.clone() else {
            return;
        };

        let action = self.ctx.pointer(&bar, &tracked.info, event);
        let holding = {
            let state = bar.borrow();
            state.pressed().is_some() || state.is_dragging()
        };
        self.grab = holding.then_some(id);

        match action {
            Action::None => return,
            Action::MoveBy { window, delta } => self.windows.translate(window, delta),
            Action::EndMove { .. } => self.refresh = true,
            _ => {}
        }
        debug!(window = %id, ?action, "bar action");
        perform(action, &mut self.dispatcher);
    }

    /// Whether window geometry should be re-read from Hyprland.  Clears the
    /// flag.
    pub fn take_refresh(&mut self) -> bool {
        std::mem::take(&mut self.refresh)
    }

    /// Lay out and draw every bar into a fresh frame.
    pub fn redraw(&mut self) {
        self.pass.remove_all();
        self.placements.clear();
        for tracked in self.windows.iter() {
            let Some(bar) = &tracked.bar else {
                continue;
            };
            self.ctx.prepare(bar, &tracked.info, &mut self.icons);
            self.ctx.render(bar, &tracked.info, &mut self.pass);

            self.placements.insert(tracked.info.id, self.ctx.positioning(bar, &tracked.info));
        }
        debug!(
            bars = self.ctx.live_bars(),
            commands = self.pass.len(),
            reserved = self.reserved_height(),
            "frame built"
        );
    }

    /// Tear the bars down.
    pub fn shutdown(mut self) {
        self.ctx.deactivate(&mut self.pass, &mut self.icons);
        info!(windows = self.windows.len(), "bars removed");
    }
}
