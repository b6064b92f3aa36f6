//! Error types for the block producers and the signal monitor

/// Block and monitor errors
#[derive(Debug, thiserror::Error)]
pub enum BlockError {
    #[error("D-Bus error: {0}")]
    DBus(#[from] zbus::Error),

    #[error("D-Bus fdo error: {0}")]
    Fdo(#[from] zbus::fdo::Error),

    #[error("Bar protocol error: {0}")]
    Bar(#[from] capy_bar::BarError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {status}")]
    Exit {
        program: String,
        status: std::process::ExitStatus,
    },

    #[error("System bus connection lost")]
    ConnectionLost,
}
