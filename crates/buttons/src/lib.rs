pub mod error;
pub mod registry;
pub mod spec;

pub use error::{ButtonParseError, DirectiveError};
pub use registry::ButtonRegistry;
pub use spec::ButtonSpec;
