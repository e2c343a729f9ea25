//! DOM layer error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomError {
    #[error("Invalid selector: {0}")]
    InvalidSelector(String),
}
