use hyprbars_core::{CommandRunner, Point, WindowId, WindowMover};
use hyprbars_ipc::{HyprlandIpc, Request};
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Carries out bar actions as Hyprland dispatches.
///
/// Requests are queued on a channel and sent by a background task, so the
/// event loop never waits on the command socket.
#[derive(Debug)]
pub struct IpcDispatcher {
    tx:    mpsc::UnboundedSender<Request>,
    /// Sub-pixel part of the drag not yet sent.
    carry: Point,
}

impl IpcDispatcher {
    pub fn new(tx: mpsc::UnboundedSender<Request>) -> Self {
        Self { tx, carry: Point::default() }
    }

    /// Dispatcher backed by a sender task on `ipc`.
    pub fn spawn(ipc: HyprlandIpc) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<Request>();

        tokio::spawn(async move {
            while let Some(request) = rx.recv().await {
                if let Err(e) = ipc.request(&request).await {
                    warn!("Hyprland rejected '{request}': {e}");
                }
            }
            debug!("dispatcher closed");
        });

        Self::new(tx)
    }

    pub fn send(&self, request: Request) {
        if self.tx.send(request).is_err() {
            warn!("dispatcher task is gone; request dropped");
        }
    }

    /// Post a red `[hyprbars]` notification.
    pub fn notify_error(&self, message: impl Into<String>) {
        self.send(Request::error_notification(message));
    }
}

impl CommandRunner for IpcDispatcher {
    fn run(&mut self, command: &str) {
        let command = command.trim();
        if command.is_empty() {
            return;
        }
        self.send(Request::Exec(command.to_string()));
    }
}

impl WindowMover for IpcDispatcher {
    fn begin_move(&mut self, window: WindowId) {
        self.carry = Point::default();
        self.send(Request::FocusWindow(window));
    }

    fn move_by(&mut self, window: WindowId, delta: Point) {
        let x = self.carry.x + delta.x;
        let y = self.carry.y + delta.y;
        let (dx, dy) = (x.trunc(), y.trunc());
        self.carry = Point::new(x - dx, y - dy);

        if dx == 0.0 && dy == 0.0 {
            return;
        }
        self.send(Request::MoveWindowPixel { window, dx: dx as i32, dy: dy as i32 });
    }

    fn end_move(&mut self, _window: WindowId) {
        self.carry = Point::default();
    }
}
