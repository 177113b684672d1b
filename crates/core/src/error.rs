use thiserror::Error;

/// Top-level error type used across the entire workspace.
#[derive(Debug, Error)]
pub enum BarsError {
    #[error("config error: {0}")]
    Config(String),

    #[error("IPC error: {0}")]
    Ipc(String),

    /// The running compositor is older than this build supports.
    /// Fatal at activation.
    #[error("version mismatch: running Hyprland {found}, need {required} or newer")]
    VersionMismatch { required: String, found: String },

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

pub type Result<T, E = BarsError> = std::result::Result<T, E>;
