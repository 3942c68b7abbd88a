//! Wire and domain types exchanged with the marks API.

use serde::{Deserialize, Serialize};

/// One student's marks row, keyed by `student_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub student_id: String,
    pub student_name: String,
    pub marks: f64,
    pub time_study: f64,
}

/// Aggregates computed server-side over the current record set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct SummaryStats {
    pub average_marks: f64,
    pub average_study_time: f64,
    pub highest_marks: f64,
    pub lowest_marks: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Student,
}

impl Role {
    pub fn is_admin(self) -> bool {
        matches!(self, Role::Admin)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Student => "student",
        }
    }
}

/// The authenticated user as reported by `GET /auth/me`.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub username: String,
    pub role: Role,
    /// Present for students whose account is linked to a marks row.
    pub own_record: Option<Record>,
}

/// Raw `/auth/me` payload.
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityPayload {
    pub username: String,
    pub role: Role,
    #[serde(default)]
    pub marks_details: Option<Record>,
}

impl From<IdentityPayload> for User {
    fn from(payload: IdentityPayload) -> Self {
        Self {
            username: payload.username,
            role: payload.role,
            own_record: payload.marks_details,
        }
    }
}

/// `POST /auth/login` success body; `token_type` is always `bearer` and not kept.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}

/// Body of `PATCH /marks/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordPatch {
    pub student_name: String,
    pub marks: f64,
    pub time_study: f64,
}

/// Credentials the server generated for a student account during ingest.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StudentCredential {
    pub username: String,
    #[serde(rename = "password (roll number)", default)]
    pub password: Option<String>,
}

/// Response of the upload and reload-from-source endpoints.
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct IngestSummary {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub student_credentials: Vec<StudentCredential>,
    #[serde(default)]
    pub note: Option<String>,
}
