//! Typed endpoints for users, testimonials and contacts.
//!
//! All calls go through [`BackendClient::request`], so bearer injection and
//! status handling are identical to raw requests. List endpoints accept a bare
//! array or an envelope object (`{ "data": [...] }` and friends).

use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::client::{BackendClient, ClientError, RequestOptions};
use super::types::{Contact, ContactForm, Testimonial, TestimonialForm, User};

pub const USERS_PATH: &str = "/users";
pub const TESTIMONIALS_PATH: &str = "/testimonials";
pub const CONTACTS_PATH: &str = "/contacts";

#[derive(Deserialize)]
#[serde(untagged, bound(deserialize = "T: Deserialize<'de>"))]
enum ListResponse<T> {
    Bare(Vec<T>),
    Wrapped {
        #[serde(default, alias = "users", alias = "testimonials", alias = "contacts", alias = "items")]
        data: Vec<T>,
    },
}

impl<T> ListResponse<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            Self::Bare(items) | Self::Wrapped { data: items } => items,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ItemResponse<T> {
    Bare(T),
    Wrapped { data: T },
}

impl<T> ItemResponse<T> {
    fn into_inner(self) -> T {
        match self {
            Self::Bare(item) | Self::Wrapped { data: item } => item,
        }
    }
}

/// `{base}/{id}` with `id` encoded as a single path segment.
fn item_path(base: &str, id: &str) -> String {
    format!("{base}/{}", urlencoding::encode(id))
}

impl BackendClient {
    async fn list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ClientError> {
        let body: ListResponse<T> = self.request_json(path, RequestOptions::get()).await?;
        Ok(body.into_vec())
    }

    async fn item<T: DeserializeOwned>(&self, path: &str, options: RequestOptions) -> Result<T, ClientError> {
        let body: ItemResponse<T> = self.request_json(path, options).await?;
        Ok(body.into_inner())
    }

    /// Discard the response body of a mutation.
    async fn send(&self, path: &str, options: RequestOptions) -> Result<(), ClientError> {
        self.request(path, options).await.map(|_| ())
    }

    // ---- users ----

    /// `GET /users`
    ///
    /// # Errors
    ///
    /// See [`BackendClient::request`].
    pub async fn list_users(&self) -> Result<Vec<User>, ClientError> {
        self.list(USERS_PATH).await
    }

    /// `GET /users/{id}`
    ///
    /// # Errors
    ///
    /// See [`BackendClient::request`].
    pub async fn get_user(&self, id: &str) -> Result<User, ClientError> {
        self.item(&item_path(USERS_PATH, id), RequestOptions::get()).await
    }

    /// `DELETE /users/{id}`
    ///
    /// # Errors
    ///
    /// See [`BackendClient::request`].
    pub async fn delete_user(&self, id: &str) -> Result<(), ClientError> {
        self.send(&item_path(USERS_PATH, id), RequestOptions::delete()).await
    }

    // ---- testimonials ----

    /// `GET /testimonials`
    ///
    /// # Errors
    ///
    /// See [`BackendClient::request`].
    pub async fn list_testimonials(&self) -> Result<Vec<Testimonial>, ClientError> {
        self.list(TESTIMONIALS_PATH).await
    }

    /// `POST /testimonials`
    ///
    /// # Errors
    ///
    /// See [`BackendClient::request`].
    pub async fn create_testimonial(&self, form: &TestimonialForm) -> Result<Testimonial, ClientError> {
        let body = serde_json::to_value(form)?;
        self.item(TESTIMONIALS_PATH, RequestOptions::post(body)).await
    }

    /// `PUT /testimonials/{id}`
    ///
    /// # Errors
    ///
    /// See [`BackendClient::request`].
    pub async fn update_testimonial(&self, id: &str, form: &TestimonialForm) -> Result<Testimonial, ClientError> {
        let body = serde_json::to_value(form)?;
        self.item(&item_path(TESTIMONIALS_PATH, id), RequestOptions::put(body)).await
    }

    /// `DELETE /testimonials/{id}`
    ///
    /// # Errors
    ///
    /// See [`BackendClient::request`].
    pub async fn delete_testimonial(&self, id: &str) -> Result<(), ClientError> {
        self.send(&item_path(TESTIMONIALS_PATH, id), RequestOptions::delete()).await
    }

    // ---- contacts ----

    /// `GET /contacts`
    ///
    /// # Errors
    ///
    /// See [`BackendClient::request`].
    pub async fn list_contacts(&self) -> Result<Vec<Contact>, ClientError> {
        self.list(CONTACTS_PATH).await
    }

    /// `POST /contacts` from the public contact form. The response body is
    /// not relied upon.
    ///
    /// # Errors
    ///
    /// See [`BackendClient::request`].
    pub async fn submit_contact(&self, form: &ContactForm) -> Result<(), ClientError> {
        let body = serde_json::to_value(form)?;
        self.send(CONTACTS_PATH, RequestOptions::post(body)).await
    }

    /// `DELETE /contacts/{id}`
    ///
    /// # Errors
    ///
    /// See [`BackendClient::request`].
    pub async fn delete_contact(&self, id: &str) -> Result<(), ClientError> {
        self.send(&item_path(CONTACTS_PATH, id), RequestOptions::delete()).await
    }
}

#[cfg(test)]
#[path = "resources_test.rs"]
mod tests;
