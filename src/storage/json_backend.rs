use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{
    errors::{LedgerError, Result},
    utils::paths::ensure_dir,
};

use super::KeyValueStore;

const DOCUMENT_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

/// Durable store keeping one JSON document per key under a root directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        ensure_dir(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn document_path(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(format!("{key}.{DOCUMENT_EXTENSION}")))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.document_path(key)?;
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn put(&self, key: &str, value: &str) -> Result<()> {
        let path = self.document_path(key)?;
        let tmp = tmp_path(&path);
        write_atomic(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    /// Existence only; an unreadable document still counts as present.
    fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.document_path(key)?.exists())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.document_path(key)?;
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
    if valid {
        Ok(())
    } else {
        Err(LedgerError::Storage(format!("invalid storage key `{key}`")))
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_with_temp_dir() -> (JsonFileStore, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let store = JsonFileStore::new(temp.path().join("store")).expect("json store");
        (store, temp)
    }

    #[test]
    fn put_and_get_roundtrip() {
        let (store, _guard) = store_with_temp_dir();
        store.put("expense.categories", "[\"Rent\"]").expect("put");
        assert_eq!(
            store.get("expense.categories").expect("get").as_deref(),
            Some("[\"Rent\"]")
        );
        let path = store.document_path("expense.categories").unwrap();
        assert!(path.ends_with("expense.categories.json"));
        assert!(!tmp_path(&path).exists(), "temp file must be renamed away");
    }

    #[test]
    fn missing_key_reads_as_none() {
        let (store, _guard) = store_with_temp_dir();
        assert!(store.get("income.transactions").expect("get").is_none());
        store.remove("income.transactions").expect("removing absent key is fine");
    }

    #[test]
    fn put_replaces_previous_document() {
        let (store, _guard) = store_with_temp_dir();
        store.put("loan.issued", "[1]").unwrap();
        store.put("loan.issued", "[]").unwrap();
        assert_eq!(store.get("loan.issued").unwrap().as_deref(), Some("[]"));
        store.remove("loan.issued").unwrap();
        assert!(!store.contains("loan.issued").unwrap());
    }

    #[test]
    fn unreadable_document_still_counts_as_present() {
        let (store, _guard) = store_with_temp_dir();
        let path = store.document_path("income.categories").unwrap();
        fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();
        assert!(store.contains("income.categories").unwrap());
        assert!(store.get("income.categories").is_err());
    }

    #[test]
    fn rejects_path_like_keys() {
        let (store, _guard) = store_with_temp_dir();
        assert!(store.put("../escape", "{}").is_err());
        assert!(store.get("a/b").is_err());
        assert!(store.get("").is_err());
    }
}
