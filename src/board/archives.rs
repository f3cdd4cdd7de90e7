//! Read-only archive boards: notices, resources, galleries, passers.
//!
//! These boards are published by the academy's admins; the public client
//! only lists and reads them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::{ApiClient, Paged};
use crate::error::Result;

/// Page/limit query shared by every archive board.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct PageQuery {
    /// Page number (1-based).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Items per page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl PageQuery {
    /// Create an empty query (backend defaults apply).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page number.
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Set the page size.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Announcement post.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    /// Backend-assigned identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Title.
    pub title: String,
    /// Body (HTML from the CMS editor).
    pub content: String,
    /// Optional list thumbnail.
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    /// View counter.
    #[serde(default)]
    pub view_count: u64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Entrance-exam resource post.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    /// Backend-assigned identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Title.
    pub title: String,
    /// Body (HTML from the CMS editor).
    pub content: String,
    /// Optional list thumbnail.
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    /// View counter.
    #[serde(default)]
    pub view_count: u64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Photo gallery entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryItem {
    /// Backend-assigned identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Caption.
    pub title: String,
    /// Photo URL.
    pub image_url: String,
    /// View counter.
    #[serde(default)]
    pub view_count: u64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Exam-passer listing (photos of admitted students).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Passer {
    /// Backend-assigned identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Title (usually school and year).
    pub title: String,
    /// List thumbnail.
    pub thumbnail_url: String,
    /// Detail photos.
    #[serde(default)]
    pub image_urls: Vec<String>,
    /// View counter.
    #[serde(default)]
    pub view_count: u64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

macro_rules! archive_api {
    ($api:ident, $accessor:ident, $item:ty, $path:literal, $doc:literal) => {
        #[doc = $doc]
        pub struct $api<'a> {
            client: &'a ApiClient,
        }

        impl ApiClient {
            #[doc = concat!("Access the `", $path, "` endpoints.")]
            pub fn $accessor(&self) -> $api<'_> {
                $api { client: self }
            }
        }

        impl $api<'_> {
            #[doc = concat!("`GET /", $path, "` — list entries with paging.")]
            pub async fn list(&self, query: &PageQuery) -> Result<Paged<$item>> {
                let envelope = self
                    .client
                    .get_json_query::<Vec<$item>, _>($path, query)
                    .await?;
                Ok(envelope.into())
            }

            #[doc = concat!("`GET /", $path, "/{id}` — fetch a single entry.")]
            pub async fn get(&self, id: &str) -> Result<$item> {
                let path = format!("{}/{}", $path, urlencoding::encode(id));
                let envelope = self.client.get_json::<$item>(&path).await?;
                Ok(envelope.data)
            }
        }
    };
}

archive_api!(NoticeApi, notices, Notice, "notices", "Notice endpoint wrappers.");
archive_api!(
    ResourceApi,
    resources,
    Resource,
    "resources",
    "Resource-archive endpoint wrappers."
);
archive_api!(
    GalleryApi,
    galleries,
    GalleryItem,
    "galleries",
    "Photo-gallery endpoint wrappers."
);
archive_api!(PasserApi, passers, Passer, "passers", "Passer endpoint wrappers.");
