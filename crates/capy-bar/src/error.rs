//! Error types for capy-bar

/// Bar protocol errors
#[derive(Debug, thiserror::Error)]
pub enum BarError {
    #[error("Encoding error: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Failed to run {program}: {source}")]
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
}
