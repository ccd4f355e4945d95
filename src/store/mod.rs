//! In-memory managed store. One `RwLock` guards the whole state, so every
//! mutating operation (notably the submit completeness check together with
//! its flag write) is serialized against concurrent catalog or matrix edits.

pub mod catalog;
pub mod clearance;
pub mod error;
pub mod models;
pub mod registry;

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use error::StoreError;
use models::{Account, CompletionKey, Requirement, Role, SignatureAsset, Student};

#[derive(Debug, Default)]
pub(crate) struct State {
    /// Insertion order is canonical catalog order.
    pub requirements: Vec<Requirement>,
    pub students: HashMap<Uuid, Student>,
    /// Sparse completion matrix; absent key means "not completed".
    pub completions: HashMap<CompletionKey, bool>,
    /// Login accounts keyed by username.
    pub accounts: HashMap<String, Account>,
    pub signature: Option<SignatureAsset>,
}

/// Shared handle to the store; cheap to clone into axum state.
#[derive(Debug, Clone, Default)]
pub struct ClearanceStore {
    pub(crate) inner: Arc<RwLock<State>>,
}

impl ClearanceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an admin login. Called at startup with credentials from config.
    pub async fn seed_admin(
        &self,
        username: &str,
        password_hash: String,
        display_name: &str,
    ) -> Result<(), StoreError> {
        let mut state = self.inner.write().await;
        if state.accounts.contains_key(username) {
            return Err(StoreError::conflict(format!(
                "account '{}' already exists",
                username
            )));
        }
        state.accounts.insert(
            username.to_string(),
            Account {
                username: username.to_string(),
                password_hash,
                display_name: display_name.to_string(),
                role: Role::Admin,
                student_id: None,
            },
        );
        Ok(())
    }

    pub async fn account(&self, username: &str) -> Option<Account> {
        self.inner.read().await.accounts.get(username).cloned()
    }

    /// Replace the active signature template, returning the previous asset
    /// so the caller can remove its file.
    pub async fn replace_signature(&self, asset: SignatureAsset) -> Option<SignatureAsset> {
        self.inner.write().await.signature.replace(asset)
    }

    pub async fn signature(&self) -> Option<SignatureAsset> {
        self.inner.read().await.signature.clone()
    }
}
