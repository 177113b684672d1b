//! Pointer feed.
//!
//! Hyprland doesn't forward pointer input to external clients, so the
//! compositor side (a bind script, a plugin shim) writes one event per line
//! to a Unix socket:
//!
//! ```text
//! motion 412 37
//! down 412 37 2 left
//! up 412 37
//! ```

use hyprbars_core::{Point, PointerButton, PointerEvent, Result};
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::{UnixListener, UnixStream};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// `$XDG_RUNTIME_DIR/hyprbars.sock`.
pub fn default_socket_path() -> PathBuf {
    let runtime_dir = std::env::var("XDG_RUNTIME_DIR")
        .unwrap_or_else(|_| "/run/user/1000".to_string());
    PathBuf::from(runtime_dir).join("hyprbars.sock")
}

/// Parse one line of the pointer feed.
pub fn parse_pointer_line(line: &str) -> Option<PointerEvent> {
    let mut words = line.split_whitespace();
    let kind = words.next()?;
    let x = words.next()?.parse::<f64>().ok()?;
    let y = words.next()?.parse::<f64>().ok()?;
    let pos = Point::new(x, y);

    let event = match kind {
        "motion" => PointerEvent::Motion { pos },
        "down" => {
            let clicks = match words.next() {
                Some(c) => c.parse().ok()?,
                None => 1,
            };
            let button = parse_button(words.next())?;
            PointerEvent::Down { pos, button, clicks }
        }
        "up" => PointerEvent::Up { pos, button: parse_button(words.next())? },
        _ => return None,
    };

    if words.next().is_some() {
        return None;
    }
    Some(event)
}

fn parse_button(word: Option<&str>) -> Option<PointerButton> {
    Some(match word {
        None | Some("left") => PointerButton::Left,
        Some("right") => PointerButton::Right,
        Some("middle") => PointerButton::Middle,
        Some(code) => PointerButton::Other(code.parse().ok()?),
    })
}

/// Bind the pointer socket and forward parsed events.  A stale socket file
/// from a previous run is replaced.
pub fn spawn_listener(path: impl AsRef<Path>) -> Result<mpsc::Receiver<PointerEvent>> {
    let path = path.as_ref();
    if path.exists() {
        std::fs::remove_file(path)?;
    }
    let listener = UnixListener::bind(path)?;
    info!("Listening for pointer input on '{}'", path.display());

    let (tx, rx) = mpsc::channel(64);
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((stream, _)) => {
                    tokio::spawn(read_events(stream, tx.clone()));
                }
                Err(e) => {
                    warn!("pointer socket accept failed: {e}");
                    return;
                }
            }
        }
    });

    Ok(rx)
}

async fn read_events(stream: UnixStream, tx: mpsc::Sender<PointerEvent>) {
    let mut lines = BufReader::new(stream).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match parse_pointer_line(line) {
            Some(event) => {
                if tx.send(event).await.is_err() {
                    return;
                }
            }
            None => warn!("malformed pointer event '{line}'"),
        }
    }
    debug!("pointer feed client disconnected");
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncWriteExt;

    #[test]
    fn parse_lines() {
        assert_eq!(
            parse_pointer_line("motion 10 20.5"),
            Some(PointerEvent::Motion { pos: Point::new(10.0, 20.5) })
        );
        assert_eq!(
            parse_pointer_line("down 1 2"),
            Some(PointerEvent::Down { pos: Point::new(1.0, 2.0), button: PointerButton::Left, clicks: 1 })
        );
        assert_eq!(
            parse_pointer_line("down 1 2 2 right"),
            Some(PointerEvent::Down { pos: Point::new(1.0, 2.0), button: PointerButton::Right, clicks: 2 })
        );
        assert_eq!(
            parse_pointer_line("up 1 2 274"),
            Some(PointerEvent::Up { pos: Point::new(1.0, 2.0), button: PointerButton::Other(274) })
        );
    }

    #[test]
    fn reject_malformed_lines() {
        for line in ["", "motion", "motion 1", "motion a b", "scroll 1 2", "down 1 2 x", "up 1 2 left extra"] {
            assert_eq!(parse_pointer_line(line), None, "{line:?}");
        }
    }

    #[tokio::test]
    async fn socket_forwards_events() {
        let path = std::env::temp_dir().join(format!("hyprbars-pointer-{}.sock", std::process::id()));
        let mut rx = spawn_listener(&path).unwrap();

        let mut client = UnixStream::connect(&path).await.unwrap();
        client.write_all(b"motion 1 2\nnonsense\n\nup 3 4\n").await.unwrap();
        drop(client);

        assert_eq!(rx.recv().await, Some(PointerEvent::Motion { pos: Point::new(1.0, 2.0) }));
        assert_eq!(
            rx.recv().await,
            Some(PointerEvent::Up { pos: Point::new(3.0, 4.0), button: PointerButton::Left })
        );
        let _ = std::fs::remove_file(&path);
    }
}
