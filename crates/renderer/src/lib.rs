//! Layout and drawing engine for window title bars.
//!
//! - [`layout`]: pure geometry, window rect + settings + buttons → bar,
//!   title area and button hitboxes.
//! - [`draw`]: turns a laid-out bar into draw primitives for the host's
//!   render pass.  No decisions are made here.

pub mod draw;
pub mod layout;

pub use draw::{draw_bar, BarView, DrawCommand, IconLoader, NoIcons, RecordingPass, RenderPass, TextureId};
pub use layout::{layout, BarLayout, Hitbox, LayoutConfig};
