//! Application layer: services and use cases
//!
//! This layer turns documents into domain trees and depends on I/O boundary traits.

pub mod error;
pub mod services;

pub use error::{ApplicationError, ApplicationResult, IoResultExt};
