//! Consultation endpoint wrappers.
//!
//! Visitor-facing CRUD plus the admin moderation surface (soft-deleted
//! listing, restore, force delete, bulk variants) and comment management.
//! Paths mirror the backend exactly; post ids are percent-encoded before
//! they enter a path segment.

use serde_json::json;

use crate::board::types::{
    Comment, Consultation, ConsultationQuery, ConsultationUpdate, NewConsultation,
};
use crate::client::{ApiClient, Paged};
use crate::error::{GreenroomError, Result};

/// Consultation endpoint wrappers.
pub struct ConsultationApi<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    /// Access the consultation endpoints.
    pub fn consultations(&self) -> ConsultationApi<'_> {
        ConsultationApi { client: self }
    }
}

fn id_path(prefix: &str, id: &str, suffix: &str) -> String {
    format!("{}/{}{}", prefix, urlencoding::encode(id), suffix)
}

impl ConsultationApi<'_> {
    /// `POST /consultations` — create a post after client-side validation.
    pub async fn create(&self, new: &NewConsultation) -> Result<Consultation> {
        new.validate_request()?;
        let envelope = self
            .client
            .post_json::<Consultation, _>("consultations", new)
            .await?;
        Ok(envelope.data)
    }

    /// `GET /consultations` — list posts with paging and search.
    pub async fn list(&self, query: &ConsultationQuery) -> Result<Paged<Consultation>> {
        let envelope = self
            .client
            .get_json_query::<Vec<Consultation>, _>("consultations", query)
            .await?;
        Ok(envelope.into())
    }

    /// `GET /consultations/{id}` — fetch a single post.
    ///
    /// A secret post fetched without authorization arrives as a redacted
    /// stub with `need_password` set; the backend never includes body
    /// fields in that response.
    pub async fn get(&self, id: &str) -> Result<Consultation> {
        let envelope = self
            .client
            .get_json::<Consultation>(&id_path("consultations", id, ""))
            .await?;
        Ok(envelope.data)
    }

    /// `POST /consultations/{id}/check-password` — verify a secret post's
    /// password and receive the full payload.
    ///
    /// A rejection surfaces as [`GreenroomError::AuthFailed`] carrying the
    /// backend's message verbatim (empty when the backend gave none).
    pub async fn check_password(&self, id: &str, password: &str) -> Result<Consultation> {
        let body = json!({ "password": password });
        let result = self
            .client
            .post_json::<Consultation, _>(&id_path("consultations", id, "/check-password"), &body)
            .await;
        match result {
            Ok(envelope) => Ok(envelope.data),
            Err(GreenroomError::Api { message, .. }) => Err(GreenroomError::AuthFailed(message)),
            Err(e) => Err(e),
        }
    }

    /// `PATCH /consultations/{id}` — edit a post.
    pub async fn update(&self, id: &str, update: &ConsultationUpdate) -> Result<Consultation> {
        let envelope = self
            .client
            .patch_json::<Consultation, _>(&id_path("consultations", id, ""), update)
            .await?;
        Ok(envelope.data)
    }

    /// `DELETE /consultations/{id}` — soft-delete a post.
    ///
    /// The password is forwarded when held; the backend enforces it for
    /// secret posts.
    pub async fn delete(&self, id: &str, password: Option<&str>) -> Result<()> {
        let body = match password {
            Some(password) => json!({ "password": password }),
            None => json!({}),
        };
        self.client
            .delete_json(&id_path("consultations", id, ""), Some(&body))
            .await
    }

    /// `GET /consultations/{id}/comments` — admin replies on a post.
    pub async fn comments(&self, id: &str) -> Result<Vec<Comment>> {
        let envelope = self
            .client
            .get_json::<Vec<Comment>>(&id_path("consultations", id, "/comments"))
            .await?;
        Ok(envelope.data)
    }

    /// `POST /consultations/{id}/comments` — create an admin reply.
    pub async fn create_comment(&self, id: &str, content: &str) -> Result<Comment> {
        let body = json!({ "content": content });
        let envelope = self
            .client
            .post_json::<Comment, _>(&id_path("consultations", id, "/comments"), &body)
            .await?;
        Ok(envelope.data)
    }

    /// `PATCH /comments/{id}` — edit an admin reply.
    pub async fn update_comment(&self, comment_id: &str, content: &str) -> Result<Comment> {
        let body = json!({ "content": content });
        let envelope = self
            .client
            .patch_json::<Comment, _>(&id_path("comments", comment_id, ""), &body)
            .await?;
        Ok(envelope.data)
    }

    /// `DELETE /comments/{id}` — remove an admin reply.
    pub async fn delete_comment(&self, comment_id: &str) -> Result<()> {
        self.client
            .delete_json::<serde_json::Value>(&id_path("comments", comment_id, ""), None)
            .await
    }

    /// `GET /consultations/deleted` — soft-deleted posts (admin).
    pub async fn deleted(&self, query: &ConsultationQuery) -> Result<Paged<Consultation>> {
        let envelope = self
            .client
            .get_json_query::<Vec<Consultation>, _>("consultations/deleted", query)
            .await?;
        Ok(envelope.into())
    }

    /// `POST /consultations/{id}/restore` — restore a soft-deleted post (admin).
    pub async fn restore(&self, id: &str) -> Result<()> {
        self.client
            .post_empty(&id_path("consultations", id, "/restore"))
            .await
    }

    /// `DELETE /consultations/{id}/force` — permanently delete a post (admin).
    pub async fn force_delete(&self, id: &str) -> Result<()> {
        self.client
            .delete_json::<serde_json::Value>(&id_path("consultations", id, "/force"), None)
            .await
    }

    /// `POST /consultations/bulk-restore` — restore several posts (admin).
    pub async fn bulk_restore(&self, ids: &[String]) -> Result<()> {
        let body = json!({ "ids": ids });
        self.client
            .post_empty_json("consultations/bulk-restore", &body)
            .await
    }

    /// `DELETE /consultations/bulk-force` — permanently delete several posts (admin).
    pub async fn bulk_force_delete(&self, ids: &[String]) -> Result<()> {
        let body = json!({ "ids": ids });
        self.client
            .delete_json("consultations/bulk-force", Some(&body))
            .await
    }
}
