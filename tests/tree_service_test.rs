//! Tests for TreeService

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use rstest::rstest;
use tempfile::TempDir;

use looptree::application::services::TreeService;
use looptree::application::ApplicationError;
use looptree::config::Settings;
use looptree::infrastructure::di::ServiceContainer;
use looptree::infrastructure::traits::{FileSystem, RealFileSystem};
use looptree::util::testing;

/// In-memory filesystem for service tests.
#[derive(Default)]
struct MemoryFileSystem {
    files: Mutex<HashMap<PathBuf, String>>,
}

impl MemoryFileSystem {
    fn with_file(path: &str, content: &str) -> Self {
        let fs = Self::default();
        fs.files
            .lock()
            .unwrap()
            .insert(PathBuf::from(path), content.to_string());
        fs
    }
}

impl FileSystem for MemoryFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))
    }

    fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.lock().unwrap().contains_key(path)
    }

    fn ensure_parent(&self, _path: &Path) -> io::Result<()> {
        Ok(())
    }
}

fn real_service() -> TreeService {
    testing::init_test_setup();
    TreeService::new(Arc::new(RealFileSystem), &Settings::default())
}

// ============================================================
// Fixtures
// ============================================================

#[test]
fn given_get_started_fixture_when_loading_then_builds_tree() {
    let tree = real_service()
        .load(Path::new("tests/resources/get_started.json"))
        .unwrap();

    assert_eq!(tree.root(), "class");
    assert_eq!(tree.children("class"), ["method", "field"]);
    assert!(tree.loops().is_empty());
}

#[test]
fn given_loop_fixture_when_loading_then_records_loop_parent() {
    let tree = real_service()
        .load(Path::new("tests/resources/loop_node.json"))
        .unwrap();

    assert_eq!(tree.root(), "package");
    assert_eq!(tree.children("package"), ["class"]);
    assert!(tree.is_loop("package"));
}

#[rstest]
#[case("tests/resources/loop_in_root.json", "[] LOOP IN ROOT")]
#[case(
    "tests/resources/bad_children.json",
    "[myroot.subnode] children must be array: OBJECT"
)]
fn given_invalid_fixture_when_loading_then_reports_configuration_error(
    #[case] fixture: &str,
    #[case] expected: &str,
) {
    let err = real_service().load(Path::new(fixture)).unwrap_err();

    assert!(matches!(err, ApplicationError::Configuration(_)));
    assert_eq!(err.to_string(), expected);
}

#[test]
fn given_sample_fixture_when_listing_then_matches_depth_first_dump() {
    let tree = real_service()
        .load(Path::new("tests/resources/sample.json"))
        .unwrap();

    assert_eq!(
        tree.listing(),
        vec![
            "root == module",
            "loops == [class, package]",
            "children(module) == [package, resource]",
            "children(package) == [class]",
            "children(class) == [method, field]",
            "children(method) == []",
            "children(field) == []",
            "children(resource) == []",
        ]
    );
    assert_eq!(tree.depth(), 4);
}

// ============================================================
// Document handling
// ============================================================

#[test]
fn given_missing_file_when_loading_then_reports_input_not_found() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("absent.json");

    let err = real_service().load(&missing).unwrap_err();

    assert!(matches!(err, ApplicationError::InputNotFound(path) if path == missing));
}

#[test]
fn given_file_in_temp_dir_when_loading_then_reads_it() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("tree.json");
    std::fs::write(&path, r#"{"root": {"name": "only"}}"#).unwrap();

    // Act
    let tree = real_service().load(&path).unwrap();

    // Assert
    assert_eq!(tree.root(), "only");
    assert_eq!(tree.node_count(), 1);
}

#[test]
fn given_non_utf8_file_when_loading_then_reports_document_error() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("latin1.json");
    std::fs::write(&path, b"{\"root\": {\"name\": \"caf\xe9\"}}").unwrap();

    // Act
    let err = real_service().load(&path).unwrap_err();

    // Assert
    assert!(matches!(err, ApplicationError::Document { .. }));
    assert_eq!(
        err.to_string(),
        format!("invalid document: {} is not valid UTF-8", path.display())
    );
}

#[test]
fn given_malformed_json_when_parsing_then_reports_json_error() {
    let err = real_service().parse_str(r#"{"root": {"name": "a""#).unwrap_err();

    assert!(matches!(err, ApplicationError::Json(_)));
    assert!(err.to_string().starts_with("invalid JSON: "));
}

#[rstest]
#[case(r#"[{"name": "a"}]"#, "invalid document: document must be object: ARRAY")]
#[case(r#"{"tree": {"name": "a"}}"#, "invalid document: missing \"root\" member")]
fn given_wrong_document_shape_when_parsing_then_reports_document_error(
    #[case] text: &str,
    #[case] expected: &str,
) {
    let err = real_service().parse_str(text).unwrap_err();

    assert!(matches!(err, ApplicationError::Document { .. }));
    assert_eq!(err.to_string(), expected);
}

// ============================================================
// Settings wiring
// ============================================================

#[test]
fn given_custom_document_key_when_parsing_then_reads_that_member() {
    let settings = Settings {
        document_key: "tree".into(),
        ..Settings::default()
    };
    let service = TreeService::new(Arc::new(RealFileSystem), &settings);

    let tree = service.parse_str(r#"{"tree": {"name": "a"}}"#).unwrap();

    assert_eq!(tree.root(), "a");
}

#[test]
fn given_duplicate_rejection_in_settings_when_parsing_then_fails() {
    let settings = Settings {
        reject_duplicate_names: true,
        ..Settings::default()
    };
    let service = TreeService::new(Arc::new(RealFileSystem), &settings);

    let err = service
        .parse_str(r#"{"root": {"name": "a", "children": [{"name": "a"}]}}"#)
        .unwrap_err();

    assert_eq!(err.to_string(), "[a.a] duplicate node name: a");
}

#[test]
fn given_max_depth_in_settings_when_parsing_then_limits_nesting() {
    let settings = Settings {
        max_depth: Some(1),
        ..Settings::default()
    };
    let service = TreeService::new(Arc::new(RealFileSystem), &settings);

    let err = service
        .parse_str(r#"{"root": {"name": "a", "children": [{"name": "b"}]}}"#)
        .unwrap_err();

    assert_eq!(err.to_string(), "[a.b] maximum depth 1 exceeded");
}

#[test]
fn given_container_with_memory_fs_when_loading_then_uses_injected_fs() {
    // Arrange
    let fs = MemoryFileSystem::with_file(
        "/virtual/tree.json",
        r#"{"root": {"name": "package", "children": [{"loop": true}]}}"#,
    );
    let container = ServiceContainer::with_deps(Settings::default(), Arc::new(fs));

    // Act
    let tree = container
        .tree_service()
        .load(Path::new("/virtual/tree.json"))
        .unwrap();

    // Assert
    assert_eq!(tree.root(), "package");
    assert!(tree.children("package").is_empty());
    assert!(tree.is_loop("package"));
}

#[test]
fn given_unreadable_file_when_loading_then_reports_operation_failed() {
    // exists() says yes but reading fails
    struct BrokenFileSystem;
    impl FileSystem for BrokenFileSystem {
        fn read_to_string(&self, _path: &Path) -> io::Result<String> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
        }
        fn write(&self, _path: &Path, _content: &str) -> io::Result<()> {
            Ok(())
        }
        fn exists(&self, _path: &Path) -> bool {
            true
        }
        fn ensure_parent(&self, _path: &Path) -> io::Result<()> {
            Ok(())
        }
    }
    let service = TreeService::new(Arc::new(BrokenFileSystem), &Settings::default());

    let err = service.load(Path::new("/locked.json")).unwrap_err();

    assert_eq!(err.to_string(), "operation failed: read document /locked.json");
}
