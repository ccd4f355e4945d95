//! Student registry and completion matrix operations.

use uuid::Uuid;

use crate::filter::StudentFilter;

use super::error::StoreError;
use super::models::{Account, CompletionKey, NewStudent, RequirementProgress, Role, Student};
use super::ClearanceStore;

impl ClearanceStore {
    /// Register a student and their login account. The password hash is
    /// produced at the API boundary; the store never sees plaintext.
    pub async fn register_student(
        &self,
        new: NewStudent,
        password_hash: String,
    ) -> Result<Student, StoreError> {
        let username = new.username.trim().to_string();
        let name = new.name.trim().to_string();
        // Empty-string major from a form submit means "no major"
        let major = new
            .major
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty());

        if username.is_empty() {
            return Err(StoreError::validation("Student number is required"));
        }
        if name.is_empty() {
            return Err(StoreError::validation("Name is required"));
        }
        if !(1..=4).contains(&new.year) {
            return Err(StoreError::validation("Year must be between 1 and 4"));
        }
        if (3..=4).contains(&new.year) && major.is_none() {
            return Err(StoreError::validation(
                "Major is required for year 3 and 4 students",
            ));
        }

        let mut state = self.inner.write().await;
        if state.accounts.contains_key(&username) {
            return Err(StoreError::conflict("Student number already registered"));
        }

        let student = Student {
            id: Uuid::new_v4(),
            username: username.clone(),
            name: name.clone(),
            course: new.course,
            year: new.year,
            major,
            section: new.section,
            clearance_submitted: false,
            submitted_date: None,
        };

        state.accounts.insert(
            username.clone(),
            Account {
                username,
                password_hash,
                display_name: name,
                role: Role::Student,
                student_id: Some(student.id),
            },
        );
        state.students.insert(student.id, student.clone());

        tracing::info!(student = %student.username, id = %student.id, "student registered");
        Ok(student)
    }

    pub async fn student(&self, id: Uuid) -> Result<Student, StoreError> {
        self.inner
            .read()
            .await
            .students
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(format!("Student {} not found", id)))
    }

    pub async fn find_student(&self, username: &str) -> Option<Student> {
        let state = self.inner.read().await;
        state
            .students
            .values()
            .find(|s| s.username == username)
            .cloned()
    }

    /// Students matching the filter (strict AND over the provided fields),
    /// sorted by username for stable listings.
    pub async fn students(&self, filter: &StudentFilter) -> Vec<Student> {
        let state = self.inner.read().await;
        let mut matched: Vec<Student> = state
            .students
            .values()
            .filter(|s| filter.matches(s))
            .cloned()
            .collect();
        matched.sort_by(|a, b| a.username.cmp(&b.username));
        matched
    }

    /// Set one completion flag. Idempotent; never touches the student's
    /// submitted status even when this reaches or leaves 100% completion.
    pub async fn set_completion(
        &self,
        student_id: Uuid,
        requirement_id: Uuid,
        completed: bool,
    ) -> Result<(), StoreError> {
        let mut state = self.inner.write().await;
        if !state.students.contains_key(&student_id) {
            return Err(StoreError::not_found(format!(
                "Student {} not found",
                student_id
            )));
        }
        if !state.requirements.iter().any(|r| r.id == requirement_id) {
            return Err(StoreError::not_found(format!(
                "Requirement {} not found",
                requirement_id
            )));
        }

        let key = CompletionKey {
            student_id,
            requirement_id,
        };
        if completed {
            state.completions.insert(key, true);
        } else {
            // Keep the matrix sparse: false and absent are the same thing
            state.completions.remove(&key);
        }
        Ok(())
    }

    /// A student's flags against the current catalog, in catalog order.
    pub async fn student_progress(
        &self,
        student_id: Uuid,
    ) -> Result<(Student, Vec<RequirementProgress>), StoreError> {
        let state = self.inner.read().await;
        let student = state
            .students
            .get(&student_id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(format!("Student {} not found", student_id)))?;

        let progress = state
            .requirements
            .iter()
            .map(|r| RequirementProgress {
                requirement_id: r.id,
                name: r.name.clone(),
                completed: state
                    .completions
                    .get(&CompletionKey {
                        student_id,
                        requirement_id: r.id,
                    })
                    .copied()
                    .unwrap_or(false),
            })
            .collect();

        Ok((student, progress))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_student(username: &str, year: i32, major: Option<&str>) -> NewStudent {
        NewStudent {
            username: username.to_string(),
            name: "Test Student".to_string(),
            course: "IT".to_string(),
            year,
            major: major.map(str::to_string),
            section: "A".to_string(),
        }
    }

    async fn seeded_store() -> (ClearanceStore, Student) {
        let store = ClearanceStore::new();
        let student = store
            .register_student(new_student("0221-1001", 2, None), "hash".into())
            .await
            .unwrap();
        (store, student)
    }

    #[tokio::test]
    async fn year_three_requires_major() {
        let store = ClearanceStore::new();
        let err = store
            .register_student(new_student("0221-1001", 3, None), "hash".into())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));

        // Empty-string major counts as absent
        let err = store
            .register_student(new_student("0221-1001", 4, Some("  ")), "hash".into())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));

        store
            .register_student(new_student("0221-1001", 3, Some("WMAD")), "hash".into())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn duplicate_username_conflicts() {
        let (store, _) = seeded_store().await;
        let err = store
            .register_student(new_student("0221-1001", 1, None), "hash".into())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn new_students_start_pending() {
        let (_, student) = seeded_store().await;
        assert!(!student.clearance_submitted);
        assert!(student.submitted_date.is_none());
    }

    #[tokio::test]
    async fn set_completion_is_idempotent() {
        let (store, student) = seeded_store().await;
        let req = store.add_requirement("Library").await.unwrap();

        store.set_completion(student.id, req.id, true).await.unwrap();
        store.set_completion(student.id, req.id, true).await.unwrap();

        let (_, progress) = store.student_progress(student.id).await.unwrap();
        assert_eq!(progress.len(), 1);
        assert!(progress[0].completed);

        store.set_completion(student.id, req.id, false).await.unwrap();
        store.set_completion(student.id, req.id, false).await.unwrap();

        let (_, progress) = store.student_progress(student.id).await.unwrap();
        assert!(!progress[0].completed);
    }

    #[tokio::test]
    async fn set_completion_rejects_unknown_ids() {
        let (store, student) = seeded_store().await;
        let req = store.add_requirement("Library").await.unwrap();

        let err = store
            .set_completion(Uuid::new_v4(), req.id, true)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));

        let err = store
            .set_completion(student.id, Uuid::new_v4(), true)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn set_completion_never_flips_submitted() {
        let (store, student) = seeded_store().await;
        let req = store.add_requirement("Library").await.unwrap();

        store.set_completion(student.id, req.id, true).await.unwrap();
        let updated = store.student(student.id).await.unwrap();
        // 100% complete, but submission only happens through submit_clearance
        assert!(!updated.clearance_submitted);
    }
}
