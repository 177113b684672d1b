pub mod client;
pub mod events;
pub mod request;

pub use client::{fetch_active_window, fetch_clients, fetch_version, HyprlandIpc};
pub use events::{parse_event, ClientInfo, HyprlandEvent, VersionInfo};
pub use request::{NotifyIcon, Request};
