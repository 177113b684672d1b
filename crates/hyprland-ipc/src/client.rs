use crate::events::{parse_event, ClientInfo, HyprlandEvent, VersionInfo};
use crate::request::Request;
use hyprbars_core::{BarsError, Result};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::UnixStream;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Hyprland IPC client.
///
/// Connects to the Hyprland event socket and streams typed [`HyprlandEvent`]s.
/// Automatically reconnects if the socket connection drops.
#[derive(Debug, Clone)]
pub struct HyprlandIpc {
    /// Path to `socket2.sock` (the event socket).
    event_socket: PathBuf,
    /// Path to `socket.sock` (the command socket).
    cmd_socket: PathBuf,
}

impl HyprlandIpc {
    /// Create a new client, discovering sockets from `$HYPRLAND_INSTANCE_SIGNATURE`.
    pub fn new() -> Result<Self> {
        let sig = std::env::var("HYPRLAND_INSTANCE_SIGNATURE").map_err(|_| {
            BarsError::Ipc("HYPRLAND_INSTANCE_SIGNATURE not set; is Hyprland running?".into())
        })?;

        let runtime_dir = std::env::var("XDG_RUNTIME_DIR")
            .unwrap_or_else(|_| "/run/user/1000".to_string());

        Ok(Self::at(PathBuf::from(format!("{runtime_dir}/hypr/{sig}"))))
    }

    /// Client for the sockets inside `base`.
    pub fn at(base: impl AsRef<Path>) -> Self {
        let base = base.as_ref();
        Self {
            event_socket: base.join(".socket2.sock"),
            cmd_socket:   base.join(".socket.sock"),
        }
    }

    /// Spawn a background task that reads from the Hyprland event socket and
    /// forwards typed [`HyprlandEvent`]s on the returned channel.
    ///
    /// The task reconnects automatically on socket errors.
    pub fn spawn_listener(&self) -> mpsc::Receiver<HyprlandEvent> {
        let (tx, rx) = mpsc::channel(64);
        let path = self.event_socket.clone();

        tokio::spawn(async move {
            loop {
                match UnixStream::connect(&path).await {
                    Ok(stream) => {
                        info!("Connected to Hyprland event socket");
                        let mut lines = BufReader::new(stream).lines();

                        while let Ok(Some(line)) = lines.next_line().await {
                            let event = parse_event(&line);
                            if let HyprlandEvent::Unknown(_) = event {
                                continue;
                            }
                            if tx.send(event).await.is_err() {
                                return; // all receivers dropped
                            }
                        }

                        warn!("Hyprland IPC connection lost; reconnecting in 2s");
                    }
                    Err(e) => {
                        error!("Cannot connect to Hyprland IPC: {e}; retrying in 2s");
                    }
                }

                tokio::time::sleep(tokio::time::Duration::from_secs(2)).await;
            }
        });

        rx
    }

    /// Send a one-shot command to Hyprland and return the raw response.
    pub async fn command(&self, cmd: &str) -> Result<String> {
        let mut stream = UnixStream::connect(&self.cmd_socket)
            .await
            .map_err(|e| BarsError::Ipc(format!("connect: {e}")))?;

        stream
            .write_all(cmd.as_bytes())
            .await
            .map_err(|e| BarsError::Ipc(format!("write: {e}")))?;

        let mut buf = String::new();
        stream
            .read_to_string(&mut buf)
            .await
            .map_err(|e| BarsError::Ipc(format!("read: {e}")))?;

        Ok(buf)
    }

    /// Send a typed request.  Dispatches that Hyprland didn't acknowledge
    /// with `ok` are reported as errors.
    pub async fn request(&self, request: &Request) -> Result<String> {
        let wire = request.to_string();
        debug!(request = %wire, "hyprland request");
        let reply = self.command(&wire).await?;

        if !request.is_query() && reply.trim() != "ok" {
            return Err(BarsError::Ipc(format!("'{wire}': {}", reply.trim())));
        }
        Ok(reply)
    }

    async fn query<T: DeserializeOwned>(&self, request: Request) -> Result<T> {
        let raw = self.request(&request).await?;
        serde_json::from_str(&raw).map_err(|e| BarsError::Ipc(format!("parse {request}: {e}")))
    }
}

/// Every client Hyprland knows about, via `hyprctl clients -j`.
pub async fn fetch_clients(ipc: &HyprlandIpc) -> Result<Vec<ClientInfo>> {
    ipc.query(Request::Clients).await
}

/// The focused window, if any.  Hyprland answers `{}` when nothing has focus.
pub async fn fetch_active_window(ipc: &HyprlandIpc) -> Result<Option<ClientInfo>> {
    let raw = ipc.request(&Request::ActiveWindow).await?;
    let value: serde_json::Value = serde_json::from_str(&raw)
        .map_err(|e| BarsError::Ipc(format!("parse activewindow: {e}")))?;
    if value.get("address").is_none() {
        return Ok(None);
    }
    serde_json::from_value(value)
        .map(Some)
        .map_err(|e| BarsError::Ipc(format!("parse activewindow: {e}")))
}

pub async fn fetch_version(ipc: &HyprlandIpc) -> Result<VersionInfo> {
    ipc.query(Request::Version).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::UnixListener;

    /// One-shot fake command socket answering every connection with `reply`.
    fn fake_socket(dir: &Path, reply: &'static str) -> mpsc::Receiver<String> {
        let listener = UnixListener::bind(dir.join(".socket.sock")).unwrap();
        let (tx, rx) = mpsc::channel(8);
        tokio::spawn(async move {
            while let Ok((mut stream, _)) = listener.accept().await {
                let mut buf = [0u8; 512];
                let n = stream.read(&mut buf).await.unwrap();
                tx.send(String::from_utf8_lossy(&buf[..n]).into_owned()).await.unwrap();
                stream.write_all(reply.as_bytes()).await.unwrap();
            }
        });
        rx
    }

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("hyprbars-ipc-{name}-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[tokio::test]
    async fn query_round_trip() {
        let dir = temp_dir("query");
        let mut seen = fake_socket(&dir, r#"{"tag":"v0.45.2","version":"0.45.2"}"#);
        let ipc = HyprlandIpc::at(&dir);

        let version = fetch_version(&ipc).await.unwrap();
        assert_eq!(version.version_string(), "0.45.2");
        assert_eq!(seen.recv().await.unwrap(), "j/version");
    }

    #[tokio::test]
    async fn rejected_dispatch_is_an_error() {
        let dir = temp_dir("dispatch");
        let _seen = fake_socket(&dir, "Invalid dispatcher");
        let ipc = HyprlandIpc::at(&dir);

        let err = ipc.request(&Request::Exec("true".into())).await.unwrap_err();
        assert!(matches!(err, BarsError::Ipc(msg) if msg.contains("Invalid dispatcher")));
    }

    #[tokio::test]
    async fn empty_active_window() {
        let dir = temp_dir("active");
        let _seen = fake_socket(&dir, "{}");
        let ipc = HyprlandIpc::at(&dir);

        assert!(fetch_active_window(&ipc).await.unwrap().is_none());
    }
}
