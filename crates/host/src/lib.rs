//! `hyprbars` daemon.
//!
//! Wires the bar engine to a running Hyprland:
//! - Hyprland IPC event stream (window open/close/title/focus/fullscreen)
//! - `j/clients` queries to mirror window geometry
//! - Config file watcher (live reload on change)
//! - Pointer feed socket (clicks and drags on the bars)
//!
//! Button commands and window moves go back to Hyprland as dispatches.

pub mod daemon;
pub mod dispatch;
pub mod input;
pub mod windows;

pub use daemon::Daemon;
pub use dispatch::IpcDispatcher;

use hyprbars_config::{default_path, load as load_config, ConfigWatcher};
use hyprbars_core::{Message, Result};
use hyprbars_engine::BarsContext;
use hyprbars_ipc::{fetch_active_window, fetch_clients, fetch_version, HyprlandIpc, Request};
use std::path::Path;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

/// Run the daemon until Ctrl-C.
pub async fn run() -> Result<()> {
    let ipc = HyprlandIpc::new()?;

    let version = fetch_version(&ipc).await?;
    let ctx = match BarsContext::activate(version.version_string()) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("{e}");
            // Sent inline: the process exits right after.
            let notice = Request::error_notification(format!("Failure in initialization: {e}"));
            if let Err(notify_err) = ipc.request(&notice).await {
                warn!("Could not post notification: {notify_err}");
            }
            return Err(e);
        }
    };

    let config_path = default_path();
    let config = load_config(&config_path)?;

    let mut daemon = Daemon::new(ctx, IpcDispatcher::spawn(ipc.clone()));
    daemon.apply_config(&config);

    match fetch_active_window(&ipc).await {
        Ok(active) => daemon.set_active(active.and_then(|c| c.id())),
        Err(e) => warn!("Could not fetch the active window: {e}"),
    }
    refresh(&ipc, &mut daemon).await;
    daemon.redraw();

    let mut events = ipc.spawn_listener();
    let (_watcher, mut config_rx) = ConfigWatcher::spawn(&config_path);
    let mut pointer_rx = match input::spawn_listener(input::default_socket_path()) {
        Ok(rx) => rx,
        Err(e) => {
            warn!("Pointer feed unavailable: {e}; bars won't react to input");
            mpsc::channel(1).1
        }
    };

    info!(windows = daemon.windows().len(), "hyprbars running");

    loop {
        let message = tokio::select! {
            Some(event) = events.recv() => event.into_message(daemon.windows().active()),
            Some(()) = config_rx.recv() => Some(Message::ConfigReloaded),
            Some(event) = pointer_rx.recv() => {
                daemon.pointer(event);
                None
            }
            _ = tokio::signal::ctrl_c() => Some(Message::Shutdown),
        };

        match message {
            Some(Message::Shutdown) => break,
            Some(message) => handle(&ipc, &mut daemon, &config_path, message).await,
            None => {}
        }

        if daemon.take_refresh() {
            refresh(&ipc, &mut daemon).await;
        }
        daemon.redraw();
    }

    info!("Shutting down");
    daemon.shutdown();
    Ok(())
}

async fn handle(ipc: &HyprlandIpc, daemon: &mut Daemon, config_path: &Path, message: Message) {
    match message {
        Message::WindowOpened(_) | Message::WindowChanged(_) | Message::CompositorReloaded => {
            refresh(ipc, daemon).await;
        }
        Message::WindowClosed(id) => daemon.window_closed(id),
        Message::ActiveWindowChanged(active) => daemon.set_active(active),
        Message::ConfigReloaded => match load_config(config_path) {
            Ok(cfg) => {
                info!("Config reloaded");
                daemon.apply_config(&cfg);
            }
            Err(e) => warn!("Config reload failed: {e}; keeping the previous config"),
        },
        Message::Shutdown => {}
    }
}

/// Re-read every client from Hyprland.
async fn refresh(ipc: &HyprlandIpc, daemon: &mut Daemon) {
    match fetch_clients(ipc).await {
        Ok(clients) => daemon.sync_clients(&clients),
        Err(e) => warn!("Could not fetch clients: {e}"),
    }
}
