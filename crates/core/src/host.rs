use crate::geometry::{Point, WindowId};

/// Fire-and-forget shell command launch.
///
/// Implementations must not block the caller; the bar engine runs on the
/// compositor's event thread.
pub trait CommandRunner {
    fn run(&mut self, command: &str);
}

/// The collaborator that owns window geometry.
pub trait WindowMover {
    fn begin_move(&mut self, window: WindowId);

    fn move_by(&mut self, window: WindowId, delta: Point);

    fn end_move(&mut self, _window: WindowId) {}
}
