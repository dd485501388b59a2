//! Record types exchanged between the store, the REST API and the admin pages
//!
//! Every entity has three shapes: the stored record (with its `id`), a
//! `New*` payload for creation, and a `*Patch` payload for partial updates.
//! Patch fields are all optional; an update applies only the fields present
//! and leaves the rest unchanged. Nullable columns use a double `Option` in
//! patches so that an explicit JSON `null` clears the column while an absent
//! field keeps it.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Deserialize a field that distinguishes "absent" from "explicitly null".
///
/// Absent fields fall back to `None` via `#[serde(default)]`; present fields
/// (including `null`) become `Some(inner)`.
pub fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(de).map(Some)
}

// ============================================================================
// Teacher
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Teacher {
    pub id: i64,
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewTeacher {
    pub full_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeacherPatch {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub phone: Option<Option<String>>,
}

// ============================================================================
// ClassRoom
// ============================================================================

/// A class (group of students), optionally led by one teacher
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassRoom {
    pub id: i64,
    pub name: String,
    pub schedule: Option<String>,
    pub teacher_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewClassRoom {
    pub name: String,
    #[serde(default)]
    pub schedule: Option<String>,
    #[serde(default)]
    pub teacher_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClassRoomPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub schedule: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub teacher_id: Option<Option<i64>>,
}

// ============================================================================
// Student
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: i64,
    pub full_name: String,
    pub birth_date: Option<NaiveDate>,
    pub class_id: Option<i64>,
    pub guardian_name: Option<String>,
    pub guardian_phone: Option<String>,
    pub guardian_email: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewStudent {
    pub full_name: String,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub class_id: Option<i64>,
    #[serde(default)]
    pub guardian_name: Option<String>,
    #[serde(default)]
    pub guardian_phone: Option<String>,
    #[serde(default)]
    pub guardian_email: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StudentPatch {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub birth_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "double_option")]
    pub class_id: Option<Option<i64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub guardian_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub guardian_phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub guardian_email: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub notes: Option<Option<String>>,
}

// ============================================================================
// Payment
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: i64,
    pub student_id: i64,
    pub paid_on: NaiveDate,
    pub amount: f64,
    pub method: Option<String>,
    pub reference: Option<String>,
    pub status: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewPayment {
    pub student_id: i64,
    pub paid_on: NaiveDate,
    pub amount: f64,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub reference: Option<String>,
    /// Defaults to "pending" when omitted
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentPatch {
    #[serde(default)]
    pub student_id: Option<i64>,
    #[serde(default)]
    pub paid_on: Option<NaiveDate>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default, deserialize_with = "double_option")]
    pub method: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub reference: Option<Option<String>>,
    #[serde(default)]
    pub status: Option<String>,
}

// ============================================================================
// Attendance
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attendance {
    pub id: i64,
    pub student_id: i64,
    pub day: NaiveDate,
    pub present: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewAttendance {
    pub student_id: i64,
    pub day: NaiveDate,
    pub present: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AttendancePatch {
    #[serde(default)]
    pub student_id: Option<i64>,
    #[serde(default)]
    pub day: Option<NaiveDate>,
    #[serde(default)]
    pub present: Option<bool>,
}

// ============================================================================
// Activity
// ============================================================================

/// A scheduled activity; participation is a many-to-many with students
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: i64,
    pub description: String,
    pub scheduled_on: NaiveDate,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewActivity {
    pub description: String,
    pub scheduled_on: NaiveDate,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActivityPatch {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub scheduled_on: Option<NaiveDate>,
}

// ============================================================================
// User
// ============================================================================

/// Access levels for backend users
pub const ACCESS_ADMIN: &str = "admin";
pub const ACCESS_STAFF: &str = "staff";

/// A backend login, optionally linked to a teacher.
///
/// The password hash lives only in the store; it never appears here and
/// therefore never serializes into a response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub login: String,
    pub access_level: String,
    pub teacher_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub login: String,
    pub password: String,
    /// Defaults to "staff" when omitted
    #[serde(default)]
    pub access_level: Option<String>,
    #[serde(default)]
    pub teacher_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserPatch {
    #[serde(default)]
    pub login: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub access_level: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub teacher_id: Option<Option<i64>>,
}

// ============================================================================
// Auth Types
// ============================================================================

/// Token claims for JWT access tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Audience
    pub aud: String,
    /// Expiration time (as UTC timestamp)
    pub exp: i64,
    /// Issued at (as UTC timestamp)
    pub iat: i64,
    /// Issuer
    pub iss: String,
    /// Subject (user ID)
    pub sub: String,
    /// Login name
    pub login: String,
    /// Access level
    pub access_level: String,
    /// Session ID
    pub session_id: Option<String>,
}

/// Session tokens returned by login and refresh
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub expires_at: u64,
    pub refresh_token: String,
    pub user: User,
}

// ============================================================================
// Response Types
// ============================================================================

/// Standard API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}
