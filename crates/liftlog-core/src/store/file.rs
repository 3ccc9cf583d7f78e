//! File-backed key-value store.
//!
//! Directory structure:
//! ```text
//! {data_dir}/
//!   plans%3Au1.json        # value of key "plans:u1"
//!   workouts%3Au1.json     # value of key "workouts:u1"
//! ```
//!
//! Key names are percent-encoded into file names so that any key maps to a
//! single flat file. All writes go to a temp file first and are then renamed
//! over the final path.
//!
//! File names are limited to 255 bytes on common filesystems, so keys whose
//! encoding exceeds [`MAX_ENCODED_KEY_LEN`] are refused by `set` and can
//! never exist for `get` or `remove`.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use log::debug;
use tokio::fs;

use super::{KeyValueStore, StoreError, StoreResult};

const VALUE_EXTENSION: &str = ".json";
const TEMP_EXTENSION: &str = ".tmp";

/// Longest encoded key accepted; leaves room for the temp file decorations.
pub const MAX_ENCODED_KEY_LEN: usize = 200;

/// Key-value store persisting one file per key.
#[derive(Debug, Clone)]
pub struct FileStore {
    data_dir: PathBuf,
}

impl FileStore {
    /// Create a new file store rooted at `data_dir`.
    ///
    /// The directory will be created when the first key is written.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Directory holding the value files.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Encoded file stem for `key`, or `None` when it is too long to store.
    fn file_stem(key: &str) -> Option<String> {
        let encoded = encode_key(key);
        (encoded.len() <= MAX_ENCODED_KEY_LEN).then_some(encoded)
    }

    fn value_path(&self, stem: &str) -> PathBuf {
        self.data_dir.join(format!("{stem}{VALUE_EXTENSION}"))
    }

    fn temp_path(&self, stem: &str) -> PathBuf {
        self.data_dir.join(format!(
            ".{stem}.{}{TEMP_EXTENSION}",
            uuid::Uuid::new_v4().simple()
        ))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let Some(stem) = Self::file_stem(key) else {
            return Ok(None);
        };
        let path = self.value_path(&stem);

        match fs::read_to_string(&path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::io(key, &path, e)),
        }
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let stem = Self::file_stem(key).ok_or_else(|| StoreError::KeyTooLong {
            key: key.to_string(),
            encoded_len: encode_key(key).len(),
            limit: MAX_ENCODED_KEY_LEN,
        })?;

        fs::create_dir_all(&self.data_dir)
            .await
            .map_err(|e| StoreError::io(key, &self.data_dir, e))?;

        let final_path = self.value_path(&stem);
        let temp_path = self.temp_path(&stem);

        if let Err(e) = fs::write(&temp_path, value.as_bytes()).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(StoreError::io(key, &temp_path, e));
        }

        // Atomic rename
        if let Err(e) = fs::rename(&temp_path, &final_path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(StoreError::io(key, &final_path, e));
        }

        Ok(())
    }

    async fn remove(&self, key: &str) -> StoreResult<()> {
        let Some(stem) = Self::file_stem(key) else {
            return Ok(());
        };
        let path = self.value_path(&stem);

        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::io(key, &path, e)),
        }
    }

    async fn list_keys(&self) -> StoreResult<Vec<String>> {
        let mut keys = Vec::new();

        let mut entries = match fs::read_dir(&self.data_dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(keys),
            Err(e) => return Err(StoreError::listing(&self.data_dir, e)),
        };

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StoreError::listing(&self.data_dir, e))?
        {
            let file_name = entry.file_name();
            let file_name = file_name.to_string_lossy();
            let Some(encoded) = file_name.strip_suffix(VALUE_EXTENSION) else {
                continue;
            };
            if encoded.starts_with('.') {
                continue;
            }
            match decode_key(encoded) {
                Some(key) => keys.push(key),
                None => debug!("Skipping unrecognised file {file_name} in store directory"),
            }
        }

        Ok(keys)
    }
}

/// Percent-encode every byte outside `[A-Za-z0-9_-]`.
fn encode_key(key: &str) -> String {
    let mut encoded = String::with_capacity(key.len());
    for byte in key.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' {
            encoded.push(byte as char);
        } else {
            encoded.push_str(&format!("%{byte:02X}"));
        }
    }
    encoded
}

fn decode_key(encoded: &str) -> Option<String> {
    let bytes = encoded.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = encoded.get(i + 1..i + 3)?;
            decoded.push(u8::from_str_radix(hex, 16).ok()?);
            i += 3;
        } else {
            decoded.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(decoded).ok()
}
