//! Local persistence for the session token.
//!
//! Web keeps the token in `localStorage`; desktop keeps it in a file under the
//! platform data directory. Both survive restarts until logout.

use std::cell::RefCell;
use std::rc::Rc;

use crate::core::error::StorageError;

/// `localStorage` key on web.
pub const TOKEN_KEY: &str = "token";

pub trait TokenStore {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str) -> Result<(), StorageError>;
    fn clear(&self) -> Result<(), StorageError>;
}

/// The store backing the running platform.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalTokenStore;

#[cfg(target_arch = "wasm32")]
impl LocalTokenStore {
    fn storage() -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("window unavailable".into()))?
            .local_storage()
            .map_err(|_| StorageError::Unavailable("localStorage blocked".into()))?
            .ok_or_else(|| StorageError::Unavailable("localStorage missing".into()))
    }
}

#[cfg(target_arch = "wasm32")]
impl TokenStore for LocalTokenStore {
    fn load(&self) -> Option<String> {
        Self::storage()
            .ok()?
            .get_item(TOKEN_KEY)
            .ok()
            .flatten()
            .filter(|token| !token.is_empty())
    }

    fn save(&self, token: &str) -> Result<(), StorageError> {
        Self::storage()?
            .set_item(TOKEN_KEY, token)
            .map_err(|_| StorageError::Unavailable("localStorage write rejected".into()))
    }

    fn clear(&self) -> Result<(), StorageError> {
        Self::storage()?
            .remove_item(TOKEN_KEY)
            .map_err(|_| StorageError::Unavailable("localStorage write rejected".into()))
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl LocalTokenStore {
    fn token_path() -> Result<std::path::PathBuf, StorageError> {
        let dirs = directories::ProjectDirs::from("com", "Marksboard", "Marksboard")
            .ok_or_else(|| StorageError::Unavailable("no data directory".into()))?;
        Ok(dirs.data_dir().join("session-token"))
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl TokenStore for LocalTokenStore {
    fn load(&self) -> Option<String> {
        let path = Self::token_path().ok()?;
        let raw = std::fs::read_to_string(path).ok()?;
        let token = raw.trim();
        (!token.is_empty()).then(|| token.to_string())
    }

    fn save(&self, token: &str) -> Result<(), StorageError> {
        let path = Self::token_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, token)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        let path = Self::token_path()?;
        match std::fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// Process-local store; clones share the same slot.
#[derive(Debug, Default, Clone)]
pub struct MemoryTokenStore {
    slot: Rc<RefCell<Option<String>>>,
}

impl MemoryTokenStore {
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            slot: Rc::new(RefCell::new(Some(token.into()))),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.slot.borrow().clone()
    }

    fn save(&self, token: &str) -> Result<(), StorageError> {
        self.slot.borrow_mut().replace(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.slot.borrow_mut().take();
        Ok(())
    }
}
