//! Tests for the writer registry

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use tempfile::TempDir;

use crate::dirs::{CategoryDirs, DirectoryResolver};
use crate::error::PersistError;
use crate::registry::{RegistryConfig, WriterRegistry};

fn test_registry(temp_dir: &TempDir) -> WriterRegistry {
    WriterRegistry::new(
        RegistryConfig::default(),
        Arc::new(CategoryDirs::new(temp_dir.path())),
    )
}

#[test]
fn test_resolve_creates_writer_on_first_use() {
    let temp_dir = TempDir::new().unwrap();
    let registry = test_registry(&temp_dir);
    assert!(registry.is_empty());

    registry.resolve("orders").unwrap();
    assert_eq!(registry.len(), 1);

    // Second resolution reuses the entry.
    registry.resolve("orders").unwrap();
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_aliasing_keys_share_one_writer() {
    let temp_dir = TempDir::new().unwrap();
    let registry = test_registry(&temp_dir);

    // "user-1" and "user_1" normalize to the same key and must share one
    // writer instance, and so one output stream.
    let a = registry.resolve("user-1").unwrap();
    let b = registry.resolve("user_1").unwrap();
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_distinct_keys_get_distinct_writers() {
    let temp_dir = TempDir::new().unwrap();
    let registry = test_registry(&temp_dir);

    let a = registry.resolve("orders").unwrap();
    let b = registry.resolve("payments").unwrap();
    assert!(!Arc::ptr_eq(&a, &b));
    assert_eq!(registry.len(), 2);
}

#[test]
fn test_lazy_resolution_creates_no_file() {
    let temp_dir = TempDir::new().unwrap();
    let registry = test_registry(&temp_dir);

    let writer = registry.resolve("orders").unwrap();
    assert!(!writer.lock().is_open());
    assert!(!temp_dir.path().join("orders").exists());
}

#[test]
fn test_eager_resolution_opens_file() {
    let temp_dir = TempDir::new().unwrap();
    let registry = WriterRegistry::new(
        RegistryConfig {
            lazy: false,
            ..RegistryConfig::default()
        },
        Arc::new(CategoryDirs::new(temp_dir.path())),
    );

    let writer = registry.resolve("orders").unwrap();
    assert!(writer.lock().is_open());
    assert!(temp_dir.path().join("orders").exists());
}

struct FailingResolver;

impl DirectoryResolver for FailingResolver {
    fn resolve(&self, _category: &str) -> io::Result<PathBuf> {
        Err(io::Error::new(io::ErrorKind::NotFound, "no mapping"))
    }
}

#[test]
fn test_resolution_failure_inserts_nothing() {
    let registry = WriterRegistry::new(RegistryConfig::default(), Arc::new(FailingResolver));

    let err = registry.resolve("orders").unwrap_err();
    assert!(matches!(err, PersistError::DirResolve { .. }));
    assert!(registry.is_empty());
}

#[test]
fn test_writer_init_failure_inserts_nothing() {
    let temp_dir = TempDir::new().unwrap();

    // Eager construction fails because the category directory path is a file.
    std::fs::write(temp_dir.path().join("orders"), "occupied").unwrap();
    let registry = WriterRegistry::new(
        RegistryConfig {
            lazy: false,
            ..RegistryConfig::default()
        },
        Arc::new(CategoryDirs::new(temp_dir.path())),
    );

    let err = registry.resolve("orders").unwrap_err();
    assert!(matches!(err, PersistError::WriterInit { .. }));
    assert!(registry.is_empty());
}
