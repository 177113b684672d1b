use hyprbars_core::{Message, Rect, WindowId};
use serde::{Deserialize, Deserializer};

/// Events from the Hyprland event socket (`socket2.sock`) that concern
/// window decorations.  Only the window address is kept; class, title and
/// geometry are re-read from `j/clients`.
#[derive(Debug, Clone, PartialEq)]
pub enum HyprlandEvent {
    WindowOpened(WindowId),
    WindowClosed(WindowId),
    TitleChanged(WindowId),
    /// `None` when focus moved to nothing.
    ActiveWindow(Option<WindowId>),
    /// Fullscreen state of the focused window.
    Fullscreen(bool),
    WindowMoved(WindowId),
    FloatingChanged(WindowId),
    ConfigReloaded,
    /// Anything else; carries the raw line for debugging.
    Unknown(String),
}

impl HyprlandEvent {
    /// Translate into a daemon message.  `active` is the currently focused
    /// window, which `fullscreen` events implicitly refer to.
    pub fn into_message(self, active: Option<WindowId>) -> Option<Message> {
        match self {
            Self::WindowOpened(window) => Some(Message::WindowOpened(window)),
            Self::WindowClosed(window) => Some(Message::WindowClosed(window)),
            Self::TitleChanged(window)
            | Self::WindowMoved(window)
            | Self::FloatingChanged(window) => Some(Message::WindowChanged(window)),
            Self::ActiveWindow(window) => Some(Message::ActiveWindowChanged(window)),
            Self::Fullscreen(_) => active.map(Message::WindowChanged),
            Self::ConfigReloaded => Some(Message::CompositorReloaded),
            Self::Unknown(_) => None,
        }
    }
}

/// Parse a raw IPC event line into a typed [`HyprlandEvent`].
///
/// Hyprland events have the format `event_name>>event_data`.
pub fn parse_event(line: &str) -> HyprlandEvent {
    let unknown = || HyprlandEvent::Unknown(line.to_string());
    let Some((event, data)) = line.split_once(">>") else {
        return unknown();
    };
    // Address of the affected window, always the first field.
    let first = || data.split(',').next().and_then(|a| WindowId::from_address(a.trim()));

    match event {
        // "address,workspace,class,title"
        "openwindow" => first().map_or_else(unknown, HyprlandEvent::WindowOpened),
        "closewindow" => first().map_or_else(unknown, HyprlandEvent::WindowClosed),
        "windowtitle" | "windowtitlev2" => first().map_or_else(unknown, HyprlandEvent::TitleChanged),
        "activewindowv2" => HyprlandEvent::ActiveWindow(first()),
        "fullscreen" => HyprlandEvent::Fullscreen(data.trim() == "1"),
        "movewindow" | "movewindowv2" => first().map_or_else(unknown, HyprlandEvent::WindowMoved),
        "changefloatingmode" => first().map_or_else(unknown, HyprlandEvent::FloatingChanged),
        "configreloaded" => HyprlandEvent::ConfigReloaded,
        _ => unknown(),
    }
}

/// One entry of `hyprctl clients -j`.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientInfo {
    pub address:  String,
    #[serde(default = "yes")]
    pub mapped:   bool,
    #[serde(default)]
    pub hidden:   bool,
    pub at:       [f64; 2],
    pub size:     [f64; 2],
    #[serde(default)]
    pub class:    String,
    #[serde(default)]
    pub title:    String,
    /// Older releases report a bool, newer ones a fullscreen mode number.
    #[serde(default, deserialize_with = "fullscreen_flag")]
    pub fullscreen: bool,
    #[serde(default)]
    pub xwayland: bool,
}

impl ClientInfo {
    pub fn id(&self) -> Option<WindowId> {
        WindowId::from_address(&self.address)
    }

    /// Window content area in global layout coordinates.
    pub fn geometry(&self) -> Rect {
        Rect::new(self.at[0], self.at[1], self.size[0], self.size[1])
    }

    /// Mapped, visible windows are the only ones that get a bar.
    pub fn is_visible(&self) -> bool {
        self.mapped && !self.hidden
    }
}

fn yes() -> bool {
    true
}

fn fullscreen_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Mode(i64),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => b,
        Flag::Mode(m) => m != 0,
    })
}

/// JSON shape returned by `hyprctl version -j`.
#[derive(Debug, Clone, Deserialize)]
pub struct VersionInfo {
    #[serde(default)]
    pub tag:     String,
    /// Only reported by newer releases.
    #[serde(default)]
    pub version: Option<String>,
}

impl VersionInfo {
    /// Best available version string.
    pub fn version_string(&self) -> &str {
        self.version.as_deref().filter(|v| !v.is_empty()).unwrap_or(&self.tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_openwindow_with_commas_in_title() {
        assert_eq!(
            parse_event("openwindow>>55d0c0ffee,2,kitty,vim a, b"),
            HyprlandEvent::WindowOpened(WindowId(0x55d0c0ffee))
        );
        assert!(matches!(parse_event("openwindow>>,2,kitty,t"), HyprlandEvent::Unknown(_)));
    }

    #[test]
    fn parse_window_events() {
        assert_eq!(parse_event("closewindow>>abc"), HyprlandEvent::WindowClosed(WindowId(0xabc)));
        assert_eq!(parse_event("windowtitlev2>>abc,new, title"), HyprlandEvent::TitleChanged(WindowId(0xabc)));
        assert_eq!(parse_event("windowtitle>>abc"), HyprlandEvent::TitleChanged(WindowId(0xabc)));
        assert!(matches!(parse_event("windowtitlev2>>zz,t"), HyprlandEvent::Unknown(_)));
        assert_eq!(parse_event("movewindowv2>>abc,3,3"), HyprlandEvent::WindowMoved(WindowId(0xabc)));
        assert_eq!(
            parse_event("changefloatingmode>>abc,1"),
            HyprlandEvent::FloatingChanged(WindowId(0xabc))
        );
        assert_eq!(parse_event("configreloaded>>"), HyprlandEvent::ConfigReloaded);
    }

    #[test]
    fn parse_active_window() {
        assert_eq!(parse_event("activewindowv2>>abc"), HyprlandEvent::ActiveWindow(Some(WindowId(0xabc))));
        assert_eq!(parse_event("activewindowv2>>"), HyprlandEvent::ActiveWindow(None));
        assert_eq!(parse_event("activewindowv2>>,"), HyprlandEvent::ActiveWindow(None));
    }

    #[test]
    fn parse_unknown_event() {
        assert!(matches!(parse_event("somefutureevent>>data"), HyprlandEvent::Unknown(_)));
        assert!(matches!(parse_event("closewindow>>not-hex"), HyprlandEvent::Unknown(_)));
        assert!(matches!(parse_event("garbage"), HyprlandEvent::Unknown(_)));
    }

    #[test]
    fn fullscreen_follows_the_focused_window() {
        let active = Some(WindowId(7));
        assert_eq!(
            HyprlandEvent::Fullscreen(true).into_message(active),
            Some(Message::WindowChanged(WindowId(7)))
        );
        assert_eq!(HyprlandEvent::Fullscreen(true).into_message(None), None);
        assert_eq!(HyprlandEvent::Unknown("x".into()).into_message(active), None);
    }

    #[test]
    fn deserialize_clients() {
        let raw = r#"[
            {"address":"0x5a","mapped":true,"hidden":false,"at":[10,40],"size":[800,600],
             "class":"kitty","title":"~","fullscreen":0,"xwayland":false,"pid":1},
            {"address":"0x5b","at":[0,0],"size":[1,1],"fullscreen":true}
        ]"#;
        let clients: Vec<ClientInfo> = serde_json::from_str(raw).unwrap();
        assert_eq!(clients[0].id(), Some(WindowId(0x5a)));
        assert_eq!(clients[0].geometry(), Rect::new(10.0, 40.0, 800.0, 600.0));
        assert!(!clients[0].fullscreen);
        assert!(clients[0].is_visible());
        assert!(clients[1].fullscreen);
    }

    #[test]
    fn version_prefers_the_numeric_field() {
        let v: VersionInfo = serde_json::from_str(r#"{"tag":"v0.45.2-12-gabc","version":"0.45.2"}"#).unwrap();
        assert_eq!(v.version_string(), "0.45.2");
        let v: VersionInfo = serde_json::from_str(r#"{"tag":"v0.41.0"}"#).unwrap();
        assert_eq!(v.version_string(), "v0.41.0");
    }
}
