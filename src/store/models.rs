use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named clearance item administrators define and track. Catalog order is
/// insertion order and is the canonical display/grading order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Requirement {
    pub id: Uuid,
    pub name: String,
}

/// A registered student. Students are never deleted; clearance state lives
/// directly on the record as `clearance_submitted` + `submitted_date`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    pub id: Uuid,
    /// Login handle (the student number), unique across the registry.
    pub username: String,
    pub name: String,
    pub course: String,
    pub year: i32,
    /// Required for years 3 and 4, absent otherwise.
    pub major: Option<String>,
    pub section: String,
    pub clearance_submitted: bool,
    pub submitted_date: Option<DateTime<Utc>>,
}

/// Composite key of the sparse completion matrix: one flag per
/// (student, requirement) pair. Absence means "not completed".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CompletionKey {
    pub student_id: Uuid,
    pub requirement_id: Uuid,
}

/// One requirement with a student's completion flag, in catalog order.
#[derive(Debug, Clone, Serialize)]
pub struct RequirementProgress {
    pub requirement_id: Uuid,
    pub name: String,
    pub completed: bool,
}

/// The single shared signature template image stamped onto printed
/// certificates. At most one is active; uploading replaces it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignatureAsset {
    /// File name within the configured upload directory.
    pub file_name: String,
    pub content_type: String,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Student,
}

/// Login account, separate from the domain `Student` record. Admin accounts
/// are seeded from configuration; student accounts are created at
/// registration.
#[derive(Debug, Clone)]
pub struct Account {
    pub username: String,
    /// PHC-formatted Argon2id hash.
    pub password_hash: String,
    pub display_name: String,
    pub role: Role,
    /// Set for student accounts, linking back to the registry.
    pub student_id: Option<Uuid>,
}

/// Registration input for a new student.
#[derive(Debug, Clone, Deserialize)]
pub struct NewStudent {
    pub username: String,
    pub name: String,
    pub course: String,
    pub year: i32,
    pub major: Option<String>,
    pub section: String,
}

/// One row of the submitted-clearances export (completed requirement names
/// are restricted to the current catalog, in catalog order).
#[derive(Debug, Clone, Serialize)]
pub struct ExportRow {
    pub name: String,
    pub username: String,
    pub course: String,
    pub year: i32,
    pub major: Option<String>,
    pub section: String,
    pub completed_requirements: Vec<String>,
    pub submitted_date: DateTime<Utc>,
}
