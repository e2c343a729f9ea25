//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Disclosure error: {0}")]
    Disclosure(#[from] trellis_disclosure::DisclosureError),

    #[error("DOM error: {0}")]
    Dom(#[from] trellis_dom::DomError),

    #[error("Content error: {0}")]
    Content(#[from] trellis_content::ContentError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown group: {0}")]
    UnknownGroup(String),

    #[error("Unknown banner: {0}")]
    UnknownBanner(String),

    #[error("Invalid event: {0}")]
    InvalidEvent(String),
}
