//! Backend DTOs for users, testimonials and contact submissions.
//!
//! DESIGN
//! ======
//! The backend stores documents with an `_id` key and camelCase fields.
//! Optional fields default so an older record missing a column still decodes.

use serde::{Deserialize, Serialize};

/// A registered account as listed in the admin dashboard.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    /// Free-form role string; only `"admin"` is privileged.
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl User {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == crate::auth::principal::ADMIN_ROLE
    }
}

/// A client testimonial shown on the marketing site once approved.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub message: String,
    /// Star rating, 1 through 5.
    #[serde(default)]
    pub rating: Option<u8>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub approved: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// A message submitted through the public contact form.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    /// Training goal picked on the form (weight loss, strength, ...).
    #[serde(default)]
    pub goal: Option<String>,
    pub message: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Payload for `POST /contacts`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
    pub message: String,
}

/// Payload for creating or updating a testimonial.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialForm {
    pub name: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved: Option<bool>,
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
