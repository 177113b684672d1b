use hyprbars_core::WindowId;
use std::fmt;

/// Icon shown next to a Hyprland notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyIcon {
    None = -1,
    Warning = 0,
    Info = 1,
    Hint = 2,
    Error = 3,
    Confused = 4,
    Ok = 5,
}

/// One request on the Hyprland command socket (`socket.sock`).
///
/// `Display` renders the exact wire text.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Clients,
    ActiveWindow,
    Version,
    /// Run a shell command through Hyprland.
    Exec(String),
    FocusWindow(WindowId),
    /// Move a (floating) window by whole pixels.
    MoveWindowPixel { window: WindowId, dx: i32, dy: i32 },
    Notify {
        icon: NotifyIcon,
        duration_ms: u32,
        color: String,
        message: String,
    },
}

impl Request {
    /// Error notification as the bars post it (red, five seconds).
    pub fn error_notification(message: impl Into<String>) -> Self {
        Self::Notify {
            icon: NotifyIcon::Error,
            duration_ms: 5000,
            color: "rgb(ff3333)".into(),
            message: format!("[hyprbars] {}", message.into()),
        }
    }

    /// Whether the reply is JSON (`j/` queries) rather than `ok`.
    pub fn is_query(&self) -> bool {
        matches!(self, Self::Clients | Self::ActiveWindow | Self::Version)
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Clients => f.write_str("j/clients"),
            Self::ActiveWindow => f.write_str("j/activewindow"),
            Self::Version => f.write_str("j/version"),
            Self::Exec(cmd) => write!(f, "dispatch exec {cmd}"),
            Self::FocusWindow(window) => write!(f, "dispatch focuswindow address:{window}"),
            Self::MoveWindowPixel { window, dx, dy } => {
                write!(f, "dispatch movewindowpixel {dx} {dy},address:{window}")
            }
            Self::Notify { icon, duration_ms, color, message } => {
                write!(f, "notify {} {duration_ms} {color} {message}", *icon as i32)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_wire_format() {
        let window = WindowId(0x55d0);
        assert_eq!(Request::Exec("kitty -e htop".into()).to_string(), "dispatch exec kitty -e htop");
        assert_eq!(Request::FocusWindow(window).to_string(), "dispatch focuswindow address:0x55d0");
        assert_eq!(
            Request::MoveWindowPixel { window, dx: -4, dy: 12 }.to_string(),
            "dispatch movewindowpixel -4 12,address:0x55d0"
        );
    }

    #[test]
    fn notification_wire_format() {
        assert_eq!(
            Request::error_notification("bad button").to_string(),
            "notify 3 5000 rgb(ff3333) [hyprbars] bad button"
        );
        assert!(!Request::error_notification("x").is_query());
        assert!(Request::Clients.is_query());
    }
}
