//! Clearance workflow: pending -> submitted -> (admin undo) -> pending.

use chrono::Utc;
use uuid::Uuid;

use super::error::StoreError;
use super::models::{CompletionKey, ExportRow, Student};
use super::ClearanceStore;

impl ClearanceStore {
    /// Submit a student's clearance. Completeness is re-checked here, under
    /// the same write-lock acquisition that stamps the flag, so a stale or
    /// lying caller can never submit against an out-of-date matrix.
    pub async fn submit_clearance(&self, student_id: Uuid) -> Result<Student, StoreError> {
        let mut state = self.inner.write().await;

        let total = state.requirements.len();
        let completed = state
            .requirements
            .iter()
            .filter(|r| {
                state
                    .completions
                    .get(&CompletionKey {
                        student_id,
                        requirement_id: r.id,
                    })
                    .copied()
                    .unwrap_or(false)
            })
            .count();

        let student = state
            .students
            .get_mut(&student_id)
            .ok_or_else(|| StoreError::not_found(format!("Student {} not found", student_id)))?;

        if student.clearance_submitted {
            return Err(StoreError::conflict("Clearance already submitted"));
        }
        if total == 0 || completed < total {
            return Err(StoreError::precondition(format!(
                "Not all requirements complete ({}/{})",
                completed, total
            )));
        }

        student.clearance_submitted = true;
        student.submitted_date = Some(Utc::now());
        let submitted = student.clone();

        tracing::info!(student = %submitted.username, "clearance submitted");
        Ok(submitted)
    }

    /// Admin undo: revert a submitted clearance to pending.
    pub async fn undo_submission(&self, student_id: Uuid) -> Result<Student, StoreError> {
        let mut state = self.inner.write().await;
        let student = state
            .students
            .get_mut(&student_id)
            .ok_or_else(|| StoreError::not_found(format!("Student {} not found", student_id)))?;

        if !student.clearance_submitted {
            return Err(StoreError::conflict("Clearance is not submitted"));
        }

        student.clearance_submitted = false;
        student.submitted_date = None;
        let reverted = student.clone();

        tracing::info!(student = %reverted.username, "clearance submission undone");
        Ok(reverted)
    }

    /// All submitted students, most recent submission first.
    pub async fn submitted_students(&self) -> Vec<Student> {
        let state = self.inner.read().await;
        let mut submitted: Vec<Student> = state
            .students
            .values()
            .filter(|s| s.clearance_submitted)
            .cloned()
            .collect();
        submitted.sort_by(|a, b| b.submitted_date.cmp(&a.submitted_date));
        submitted
    }

    /// Export rows for every submitted student. Completed requirement names
    /// reflect the catalog as it stands now; requirements deleted after
    /// submission drop out of historical exports (no snapshot is kept).
    pub async fn export_rows(&self) -> Vec<ExportRow> {
        let state = self.inner.read().await;
        let mut rows: Vec<ExportRow> = state
            .students
            .values()
            .filter(|s| s.clearance_submitted)
            .filter_map(|s| {
                let completed_requirements = state
                    .requirements
                    .iter()
                    .filter(|r| {
                        state
                            .completions
                            .get(&CompletionKey {
                                student_id: s.id,
                                requirement_id: r.id,
                            })
                            .copied()
                            .unwrap_or(false)
                    })
                    .map(|r| r.name.clone())
                    .collect();
                s.submitted_date.map(|submitted_date| ExportRow {
                    name: s.name.clone(),
                    username: s.username.clone(),
                    course: s.course.clone(),
                    year: s.year,
                    major: s.major.clone(),
                    section: s.section.clone(),
                    completed_requirements,
                    submitted_date,
                })
            })
            .collect();
        rows.sort_by(|a, b| a.username.cmp(&b.username));
        rows
    }
}
