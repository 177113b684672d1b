use hyprbars_core::{Point, Rect, WindowId};
use hyprbars_engine::{BarHandle, WindowInfo};
use hyprbars_ipc::ClientInfo;
use std::collections::BTreeMap;

/// A Hyprland window as the daemon sees it.  The window owns its bar.
#[derive(Debug)]
pub struct TrackedWindow {
    pub info: WindowInfo,
    pub bar:  Option<BarHandle>,
}

/// Mirror of Hyprland's mapped windows.
#[derive(Debug, Default)]
pub struct WindowTable {
    windows: BTreeMap<WindowId, TrackedWindow>,
    active:  Option<WindowId>,
    /// Windows in the order they last held focus, most recent last.
    focus:   Vec<WindowId>,
}

/// Engine view of a `j/clients` entry.  Unmapped, hidden and unparsable
/// clients yield `None`.
pub fn window_info(client: &ClientInfo, active: Option<WindowId>) -> Option<WindowInfo> {
    if !client.is_visible() {
        return None;
    }
    let id = client.id()?;
    // Hyprland IPC has no per-client decoration preference, so
    // `wants_decoration` keeps its default; window rules hide bars instead.
    Some(WindowInfo {
        title: client.title.clone(),
        class: client.class.clone(),
        active: active == Some(id),
        fullscreen: client.fullscreen,
        ..WindowInfo::new(id, client.geometry())
    })
}

impl WindowTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn get(&self, id: WindowId) -> Option<&TrackedWindow> {
        self.windows.get(&id)
    }

    pub fn get_mut(&mut self, id: WindowId) -> Option<&mut TrackedWindow> {
        self.windows.get_mut(&id)
    }

    pub fn ids(&self) -> Vec<WindowId> {
        self.windows.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrackedWindow> {
        self.windows.values()
    }

    /// Insert a new window without a bar, or refresh an existing one.
    /// Returns the previous info if the window was already known.
    pub fn upsert(&mut self, mut info: WindowInfo) -> Option<WindowInfo> {
        info.active = self.active == Some(info.id);
        match self.windows.get_mut(&info.id) {
            Some(tracked) => Some(std::mem::replace(&mut tracked.info, info)),
            None => {
                self.windows.insert(info.id, TrackedWindow { info, bar: None });
                None
            }
        }
    }

    pub fn remove(&mut self, id: WindowId) -> Option<TrackedWindow> {
        if self.active == Some(id) {
            self.active = None;
        }
        self.focus.retain(|f| *f != id);
        self.windows.remove(&id)
    }

    pub fn active(&self) -> Option<WindowId> {
        self.active
    }

    pub fn set_active(&mut self, active: Option<WindowId>) {
        self.active = active;
        if let Some(id) = active {
            self.focus.retain(|f| *f != id);
            self.focus.push(id);
        }
        for (id, tracked) in &mut self.windows {
            tracked.info.active = active == Some(*id);
        }
    }

    /// Shift a window's geometry locally, ahead of Hyprland confirming it.
    pub fn translate(&mut self, id: WindowId, delta: Point) {
        if let Some(tracked) = self.windows.get_mut(&id) {
            let g = tracked.info.geometry;
            tracked.info.geometry = Rect::new(g.x + delta.x, g.y + delta.y, g.width, g.height);
        }
    }

    /// The window whose laid-out bar contains `pos`.  Where bars overlap
    /// the most recently focused window wins; windows that never held focus
    /// come last.
    pub fn bar_at(&self, pos: Point) -> Option<WindowId> {
        let hit = |tracked: &TrackedWindow| {
            tracked.bar.as_ref().is_some_and(|bar| {
                bar.borrow()
                    .current_layout()
                    .is_some_and(|layout| layout.bar.contains(pos))
            })
        };

        let recent = self.focus.iter().rev().filter_map(|id| self.windows.get(id));
        let unfocused = self.windows.values().filter(|t| !self.focus.contains(&t.info.id));
        recent.chain(unfocused).find(|t| hit(*t)).map(|t| t.info.id)
    }
}
