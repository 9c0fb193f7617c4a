use std::{
    collections::HashMap,
    fmt,
    future::Future,
    io::{Error, ErrorKind},
    path::PathBuf,
    sync::{Arc, Mutex},
};

#[derive(Debug)]
pub enum StoreError {
    IoError(Error),
    CriticalError(String),
}

impl From<Error> for StoreError {
    fn from(err: Error) -> Self {
        StoreError::IoError(err)
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::IoError(e) => write!(f, "token store I/O error: {e}"),
            StoreError::CriticalError(msg) => write!(f, "token store error: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

/// Storage for serialized tokens, addressed by a short key.
///
/// Token managers own the (de)serialization; a store only keeps strings. The
/// default is [`FileTokenStore`]; a secrets manager can be plugged in by
/// implementing this trait.
pub trait TokenStore {
    fn load(&self, key: &str) -> impl Future<Output = Result<Option<String>, StoreError>> + Send;

    fn save(&self, key: &str, contents: &str)
    -> impl Future<Output = Result<(), StoreError>> + Send;

    fn invalidate(&self, key: &str) -> impl Future<Output = Result<(), StoreError>> + Send;
}

/// Keeps every token in `<base_dir>/<key>.json`, in plaintext.
///
/// On unix the files are restricted to the owner; anything else that can read
/// the data directory can read the tokens.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    base_dir: PathBuf,
}

impl FileTokenStore {
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    fn token_path(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StoreError::CriticalError(format!(
                "invalid token key '{key}'"
            )));
        }
        Ok(self.base_dir.join(format!("{key}.json")))
    }
}

impl TokenStore for FileTokenStore {
    async fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.token_path(key)?;
        match async_fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::IoError(e)),
        }
    }

    async fn save(&self, key: &str, contents: &str) -> Result<(), StoreError> {
        let path = self.token_path(key)?;
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        async_fs::write(&path, contents).await?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            async_fs::set_permissions(&path, std::fs::Permissions::from_mode(0o600)).await?;
        }
        Ok(())
    }

    async fn invalidate(&self, key: &str) -> Result<(), StoreError> {
        let path = self.token_path(key)?;
        match async_fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::IoError(e)),
        }
    }
}

/// Process-local store. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, StoreError> {
        self.entries
            .lock()
            .map_err(|_| StoreError::CriticalError("token store lock poisoned".to_string()))
    }
}

impl TokenStore for MemoryTokenStore {
    async fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.lock()?.get(key).cloned())
    }

    async fn save(&self, key: &str, contents: &str) -> Result<(), StoreError> {
        self.lock()?.insert(key.to_string(), contents.to_string());
        Ok(())
    }

    async fn invalidate(&self, key: &str) -> Result<(), StoreError> {
        self.lock()?.remove(key);
        Ok(())
    }
}
