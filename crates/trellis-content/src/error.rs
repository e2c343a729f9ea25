//! Content behavior error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    #[error("Language switcher needs at least one language")]
    NoLanguages,
}
