use crate::api::ApiClient;
use crate::error::{ApiError, CredentialError};
use std::fs;
use std::path::PathBuf;

/// The single persistent slot holding the raw API key.
pub trait KeyStorage: Send {
    fn read(&self) -> Result<Option<String>, CredentialError>;
    fn write(&mut self, key: &str) -> Result<(), CredentialError>;
    fn remove(&mut self) -> Result<(), CredentialError>;
}

/// Key kept as the whole content of one file.
pub struct FileKeyStorage {
    path: PathBuf,
}

impl FileKeyStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn io_error(&self, source: std::io::Error) -> CredentialError {
        CredentialError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl KeyStorage for FileKeyStorage {
    fn read(&self) -> Result<Option<String>, CredentialError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => {
                let key = content.trim();
                Ok((!key.is_empty()).then(|| key.to_string()))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn write(&mut self, key: &str) -> Result<(), CredentialError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        fs::write(&self.path, key).map_err(|e| self.io_error(e))
    }

    fn remove(&mut self) -> Result<(), CredentialError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }
}

#[cfg(test)]
#[derive(Default)]
pub struct MemoryKeyStorage {
    pub slot: std::sync::Arc<std::sync::Mutex<Option<String>>>,
}

#[cfg(test)]
impl KeyStorage for MemoryKeyStorage {
    fn read(&self) -> Result<Option<String>, CredentialError> {
        Ok(self.slot.lock().unwrap().clone())
    }

    fn write(&mut self, key: &str) -> Result<(), CredentialError> {
        *self.slot.lock().unwrap() = Some(key.to_string());
        Ok(())
    }

    fn remove(&mut self) -> Result<(), CredentialError> {
        *self.slot.lock().unwrap() = None;
        Ok(())
    }
}

/// In-memory view of the stored API key plus its persistent slot.
pub struct CredentialStore {
    storage: Box<dyn KeyStorage>,
    key: Option<String>,
}

impl CredentialStore {
    pub fn new(storage: Box<dyn KeyStorage>) -> Self {
        Self { storage, key: None }
    }

    /// Read the persisted key once. Storage errors are logged and treated as
    /// "no key".
    pub fn load(&mut self) -> Option<String> {
        match self.storage.read() {
            Ok(key) => self.key = key,
            Err(e) => {
                log::warn!("Could not read stored API key: {}", e);
                self.key = None;
            }
        }
        self.key.clone()
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Probe `candidate` against the API and persist it only if accepted.
    pub async fn validate_and_store(&mut self, client: &ApiClient, candidate: &str) -> bool {
        let result = client.probe(candidate).await;
        self.store_if_accepted(candidate, &result)
    }

    /// Second half of [`validate_and_store`](Self::validate_and_store), for
    /// callers that ran the probe elsewhere. Any failure, transport included,
    /// is only logged.
    pub fn store_if_accepted(&mut self, candidate: &str, outcome: &Result<(), ApiError>) -> bool {
        if let Err(e) = outcome {
            log::error!("Error validating API key: {}", e);
            return false;
        }
        if let Err(e) = self.save(candidate) {
            log::warn!("API key accepted but not persisted: {}", e);
        }
        true
    }

    /// Adopt an already validated key.
    pub fn save(&mut self, key: &str) -> Result<(), CredentialError> {
        self.key = Some(key.to_string());
        self.storage.write(key)
    }

    pub fn clear(&mut self) -> Result<(), CredentialError> {
        self.key = None;
        self.storage.remove()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MockServer, client_for};

    fn memory_store() -> (CredentialStore, std::sync::Arc<std::sync::Mutex<Option<String>>>) {
        let storage = MemoryKeyStorage::default();
        let slot = storage.slot.clone();
        (CredentialStore::new(Box::new(storage)), slot)
    }

    #[test]
    fn test_file_storage_roundtrip_and_clear() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sub").join("api_key");
        let mut store = CredentialStore::new(Box::new(FileKeyStorage::new(path.clone())));

        assert_eq!(store.load(), None);
        store.save("abc123").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "abc123");

        let mut reopened = CredentialStore::new(Box::new(FileKeyStorage::new(path.clone())));
        assert_eq!(reopened.load().as_deref(), Some("abc123"));

        reopened.clear().unwrap();
        assert!(!path.exists());
        assert_eq!(reopened.key(), None);
        // clearing twice is fine
        reopened.clear().unwrap();
    }

    #[test]
    fn test_blank_key_file_means_no_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("api_key");
        fs::write(&path, "  \n").unwrap();
        let mut store = CredentialStore::new(Box::new(FileKeyStorage::new(path)));
        assert_eq!(store.load(), None);
    }

    #[tokio::test]
    async fn test_unauthorized_probe_persists_nothing() {
        let server = MockServer::start(401, r#"{ "status_message": "Invalid API key" }"#).await;
        let client = client_for(&server, None);
        let (mut store, slot) = memory_store();

        assert!(!store.validate_and_store(&client, "wrong").await);
        assert_eq!(store.key(), None);
        assert_eq!(*slot.lock().unwrap(), None);
    }

    #[tokio::test]
    async fn test_unreachable_host_is_a_plain_rejection() {
        let config = crate::config::AppConfig {
            api_base_url: "http://127.0.0.1:1".to_string(),
            ..Default::default()
        };
        let http = reqwest::Client::builder().no_proxy().build().unwrap();
        let client = ApiClient::with_http(http, &config);
        let (mut store, slot) = memory_store();

        assert!(!store.validate_and_store(&client, "abc").await);
        assert_eq!(*slot.lock().unwrap(), None);
    }

    #[test]
    fn test_store_if_accepted_saves_only_on_success() {
        let (mut store, slot) = memory_store();
        assert!(!store.store_if_accepted("k", &Err(ApiError::InvalidKey)));
        assert_eq!(*slot.lock().unwrap(), None);

        assert!(store.store_if_accepted("k", &Ok(())));
        assert_eq!(slot.lock().unwrap().as_deref(), Some("k"));
    }

    #[tokio::test]
    async fn test_accepted_probe_persists_key() {
        let server = MockServer::start(200, r#"{ "images": {} }"#).await;
        let client = client_for(&server, None);
        let (mut store, slot) = memory_store();

        assert!(store.validate_and_store(&client, "good").await);
        assert_eq!(store.key(), Some("good"));
        assert_eq!(slot.lock().unwrap().as_deref(), Some("good"));
    }
}
