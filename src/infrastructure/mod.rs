//! Infrastructure layer: I/O implementations and service wiring
//!
//! This layer implements I/O boundary traits and wires up services.

use std::io::{self, Read};

pub mod di;
pub mod error;
pub mod traits;

pub use error::{InfraError, InfraResult};

use crate::application::ApplicationError;

/// Read a whole document from `reader` (standard input for `-` arguments).
pub fn read_document(mut reader: impl Read) -> InfraResult<String> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|e| match e.kind() {
            io::ErrorKind::InvalidData => ApplicationError::not_utf8("standard input").into(),
            _ => InfraError::Stdin(e),
        })?;
    Ok(text)
}
