//! Requirement catalog operations.

use uuid::Uuid;

use super::error::StoreError;
use super::models::Requirement;
use super::ClearanceStore;

impl ClearanceStore {
    /// Append a requirement to the catalog. Names are trimmed, must be
    /// non-empty and are unique across the catalog.
    pub async fn add_requirement(&self, name: &str) -> Result<Requirement, StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::validation("Requirement name is required"));
        }

        let mut state = self.inner.write().await;
        if state.requirements.iter().any(|r| r.name == name) {
            return Err(StoreError::conflict(format!(
                "Requirement '{}' already exists",
                name
            )));
        }

        let requirement = Requirement {
            id: Uuid::new_v4(),
            name: name.to_string(),
        };
        state.requirements.push(requirement.clone());

        tracing::info!(requirement = %requirement.name, id = %requirement.id, "requirement added");
        Ok(requirement)
    }

    /// Remove a requirement and every completion flag referencing it.
    /// Deliberately leaves every student's submitted status untouched;
    /// only `clear_requirements` revokes submissions.
    pub async fn delete_requirement(&self, id: Uuid) -> Result<(), StoreError> {
        let mut state = self.inner.write().await;
        let idx = state
            .requirements
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| StoreError::not_found(format!("Requirement {} not found", id)))?;

        let removed = state.requirements.remove(idx);
        state.completions.retain(|key, _| key.requirement_id != id);

        tracing::info!(requirement = %removed.name, id = %id, "requirement deleted");
        Ok(())
    }

    /// Remove every requirement and completion flag, and revert every
    /// student to pending. The one place catalog edits cascade into
    /// clearance state.
    pub async fn clear_requirements(&self) {
        let mut state = self.inner.write().await;
        state.requirements.clear();
        state.completions.clear();
        for student in state.students.values_mut() {
            student.clearance_submitted = false;
            student.submitted_date = None;
        }
        tracing::info!("requirement catalog cleared; all submissions reverted to pending");
    }

    /// Requirements in insertion order.
    pub async fn requirements(&self) -> Vec<Requirement> {
        self.inner.read().await.requirements.clone()
    }
}
