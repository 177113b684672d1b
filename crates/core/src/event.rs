use crate::geometry::{Point, WindowId};

/// Messages flowing through the host daemon's event loop.
///
/// Sources:
/// - Hyprland IPC socket → `Window*`, `ActiveWindowChanged`, `CompositorReloaded`
/// - Config watcher task → `ConfigReloaded`
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    // ── Hyprland IPC ──────────────────────────────────────────────────────────
    /// A window was mapped.
    WindowOpened(WindowId),
    /// A window was unmapped or closed.
    WindowClosed(WindowId),
    /// Title, geometry or floating state of a window changed.
    WindowChanged(WindowId),
    /// Focus moved (None = nothing focused).
    ActiveWindowChanged(Option<WindowId>),
    /// Hyprland reloaded its own config; window rules may have changed.
    CompositorReloaded,

    // ── Config ────────────────────────────────────────────────────────────────
    /// `hyprbars.toml` changed on disk.
    ConfigReloaded,

    // ── Internal ──────────────────────────────────────────────────────────────
    Shutdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Left,
    Right,
    Middle,
    Other(u32),
}

/// Pointer input delivered by the host, in layout space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Motion {
        pos: Point,
    },
    /// `clicks` follows the host's click-count semantics (2 or more = double click).
    Down {
        pos: Point,
        button: PointerButton,
        clicks: u32,
    },
    Up {
        pos: Point,
        button: PointerButton,
    },
}

impl PointerEvent {
    pub fn pos(&self) -> Point {
        match *self {
            Self::Motion { pos } | Self::Down { pos, .. } | Self::Up { pos, .. } => pos,
        }
    }
}

/// What a pointer event asks the host to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    None,
    /// Pointer left the drag region with the button held: start moving.
    BeginMove { window: WindowId },
    /// Drag in progress; move by `delta` since the previous motion.
    MoveBy { window: WindowId, delta: Point },
    EndMove { window: WindowId },
    /// A button command, run through the shell.
    RunCommand(String),
    /// The configured double-click action.
    DoubleClick(String),
}

impl Action {
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}
