//! Per-window bar state, pointer interaction and the scoped context that
//! ties the button registry to every live bar.
//!
//! Everything here runs on the compositor's event thread; bars are shared as
//! `Rc<RefCell<_>>` and tracked through `Weak` references.

pub mod context;
pub mod interaction;
pub mod state;
pub mod version;
pub mod window;

pub use context::{BarsContext, DecorationPositioning};
pub use interaction::{handle_pointer, perform};
pub use state::{BarHandle, BarState, PointerState};
pub use version::{check_version, MIN_HYPRLAND_VERSION};
pub use window::{WindowInfo, WindowRule, WindowRules};
