use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Gateway responded {status}: {message}")]
    Gateway { status: u16, message: String },

    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Malformed gateway payload: {0}")]
    Decode(#[from] serde_json::Error),
}
