//! Reading and writing the store as a single JSON document.

use std::{
    ffi::OsString,
    fs,
    path::{Path, PathBuf},
};

use serde::Serialize;

use crate::{EngineError, ResultEngine, Store};

pub const DEFAULT_PATH: &str = "transactions.json";

/// Loads the store from `path`.
///
/// A missing file is an empty store. A file that exists but does not hold a
/// valid store (including an empty file) is [`EngineError::MalformedData`];
/// the caller decides what to do, the file is left as it is.
pub fn load(path: impl AsRef<Path>) -> ResultEngine<Store> {
    let path = path.as_ref();
    let content = match fs::read(path) {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::info!(path = %path.display(), "no transactions file, starting empty");
            return Ok(Store::default());
        }
        Err(err) => return Err(EngineError::io("read", path, err)),
    };

    let store: Store =
        serde_json::from_slice(&content).map_err(|source| EngineError::MalformedData {
            path: path.to_path_buf(),
            source,
        })?;
    tracing::info!(
        path = %path.display(),
        categories = store.len(),
        transactions = store.transaction_count(),
        "transactions loaded"
    );
    Ok(store)
}

/// Writes the whole store to `path`, replacing the previous document.
///
/// The document goes to a sibling `.tmp` file first and is then renamed over
/// `path`, so a failed write leaves the old file intact.
pub fn save(path: impl AsRef<Path>, store: &Store) -> ResultEngine<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| EngineError::io("create directory", parent, err))?;
    }

    let payload = to_pretty_json(store).map_err(|err| EngineError::io("serialize", path, err.into()))?;
    let tmp = tmp_path(path);
    fs::write(&tmp, payload).map_err(|err| EngineError::io("write", &tmp, err))?;
    fs::rename(&tmp, path).map_err(|err| EngineError::io("rename", path, err))?;

    tracing::info!(
        path = %path.display(),
        transactions = store.transaction_count(),
        "transactions saved"
    );
    Ok(())
}

fn to_pretty_json(store: &Store) -> Result<Vec<u8>, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    store.serialize(&mut serializer)?;
    buf.push(b'\n');
    Ok(buf)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}
