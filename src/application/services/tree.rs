//! Tree document service
//!
//! Reads a JSON document, unwraps its root member and hands the node to the builder.

use std::io;
use std::path::Path;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::config::Settings;
use crate::domain::{JsonKind, Tree, TreeBuilder};
use crate::infrastructure::traits::FileSystem;

/// Service for loading trees from JSON documents of the form `{"root": Node}`.
pub struct TreeService {
    fs: Arc<dyn FileSystem>,
    builder: TreeBuilder,
    document_key: String,
}

impl TreeService {
    /// Create a tree service configured from `settings`.
    pub fn new(fs: Arc<dyn FileSystem>, settings: &Settings) -> Self {
        let builder = TreeBuilder::new()
            .with_max_depth(settings.max_depth)
            .reject_duplicate_names(settings.reject_duplicate_names);
        Self {
            fs,
            builder,
            document_key: settings.document_key.clone(),
        }
    }

    /// Load and build the tree stored in `path`.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, path: &Path) -> ApplicationResult<Tree> {
        if !self.fs.exists(path) {
            return Err(ApplicationError::InputNotFound(path.to_path_buf()));
        }
        let text = match self.fs.read_to_string(path) {
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                return Err(ApplicationError::not_utf8(path.display()))
            }
            read => read.with_path_context("read document", path)?,
        };
        debug!("load: read {} bytes", text.len());
        self.parse_str(&text)
    }

    /// Parse JSON text and build the tree it describes.
    pub fn parse_str(&self, text: &str) -> ApplicationResult<Tree> {
        let document: Value = serde_json::from_str(text)?;
        self.build_document(&document)
    }

    /// Build the tree held under the document key of an already parsed document.
    pub fn build_document(&self, document: &Value) -> ApplicationResult<Tree> {
        let object = document
            .as_object()
            .ok_or_else(|| ApplicationError::Document {
                message: format!("document must be object: {}", JsonKind::of(document)),
            })?;
        let root = object
            .get(&self.document_key)
            .ok_or_else(|| ApplicationError::Document {
                message: format!("missing \"{}\" member", self.document_key),
            })?;
        Ok(self.builder.build(root)?)
    }
}
