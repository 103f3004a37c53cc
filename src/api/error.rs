use reqwest::StatusCode;
use thiserror::Error;

pub const UNEXPECTED_SHAPE_MESSAGE: &str = "La API no devolvió la estructura esperada.";
pub const UNKNOWN_ERROR_MESSAGE: &str = "Error desconocido.";

/// Why a lookup produced no records. The `Display` text is what the user sees.
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("Error HTTP: {}", .0.as_u16())]
    Status(StatusCode),

    #[error("{}", UNEXPECTED_SHAPE_MESSAGE)]
    UnexpectedShape,

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("{0}")]
    Decode(#[from] serde_json::Error),
}

impl LookupError {
    /// Message for the error panel, with a fallback when the source had nothing to say.
    pub fn user_message(&self) -> String {
        or_unknown(self.to_string())
    }
}

fn or_unknown(msg: String) -> String {
    if msg.trim().is_empty() {
        UNKNOWN_ERROR_MESSAGE.to_string()
    } else {
        msg
    }
}
