//! `GET /auth/profile/`.

use super::{ApiClient, RequestOptions};
use crate::error::Result;
use crate::models::UserProfile;

pub struct ProfileApi<'a> {
    client: &'a ApiClient,
}

impl<'a> ProfileApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub fn get(&self) -> Result<UserProfile> {
        self.client.fetch("/auth/profile/", RequestOptions::get())
    }

    /// The profile, or `None` when the request fails.
    pub fn load(&self) -> Option<UserProfile> {
        self.get()
            .map_err(|e| tracing::error!("Error loading user profile: {}", e))
            .ok()
    }
}
