//! Aggregate data behind the admin dashboard's stats cards.
//!
//! DESIGN
//! ======
//! Users and testimonials are fetched concurrently. A failed branch is logged
//! and replaced with an empty list so the dashboard always renders; the
//! failure is still visible to callers through [`DashboardData::degraded`].

use serde::Serialize;

use crate::api::client::{BackendClient, ClientError};
use crate::api::types::{Testimonial, User};

/// Raw collections for the dashboard, with the names of failed branches.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardData {
    pub users: Vec<User>,
    pub testimonials: Vec<Testimonial>,
    /// Endpoints that failed and were replaced by empty lists.
    pub degraded: Vec<&'static str>,
}

/// Numbers shown on the stats cards.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_users: usize,
    pub admin_users: usize,
    pub total_testimonials: usize,
    pub approved_testimonials: usize,
    /// Mean of rated testimonials, `None` when nothing is rated.
    pub average_rating: Option<f64>,
}

impl DashboardStats {
    #[must_use]
    pub fn from_data(data: &DashboardData) -> Self {
        let ratings: Vec<f64> = data
            .testimonials
            .iter()
            .filter_map(|t| t.rating)
            .map(f64::from)
            .collect();
        #[allow(clippy::cast_precision_loss)]
        let average_rating = (!ratings.is_empty()).then(|| ratings.iter().sum::<f64>() / ratings.len() as f64);

        Self {
            total_users: data.users.len(),
            admin_users: data.users.iter().filter(|u| u.is_admin()).count(),
            total_testimonials: data.testimonials.len(),
            approved_testimonials: data.testimonials.iter().filter(|t| t.approved).count(),
            average_rating,
        }
    }
}

fn or_empty<T>(endpoint: &'static str, result: Result<Vec<T>, ClientError>, degraded: &mut Vec<&'static str>) -> Vec<T> {
    match result {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!(endpoint, error = %e, "dashboard fetch failed; showing empty collection");
            degraded.push(endpoint);
            Vec::new()
        }
    }
}

/// Fetch users and testimonials in parallel, substituting empty lists for
/// failed branches.
pub async fn fetch_dashboard(client: &BackendClient) -> DashboardData {
    let (users, testimonials) = tokio::join!(client.list_users(), client.list_testimonials());

    let mut degraded = Vec::new();
    let users = or_empty("users", users, &mut degraded);
    let testimonials = or_empty("testimonials", testimonials, &mut degraded);
    DashboardData { users, testimonials, degraded }
}

/// [`fetch_dashboard`] reduced to card numbers.
pub async fn fetch_dashboard_stats(client: &BackendClient) -> DashboardStats {
    DashboardStats::from_data(&fetch_dashboard(client).await)
}

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod tests;
