pub mod error;
pub mod event;
pub mod geometry;
pub mod host;

pub use error::{BarsError, Result};
pub use event::{Action, Message, PointerButton, PointerEvent};
pub use geometry::{Point, Rect, WindowId};
pub use host::{CommandRunner, WindowMover};
