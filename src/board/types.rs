//! Community post model for greenroom.
//!
//! This module defines the consultation (community post) entity and its
//! request/query types. Field names mirror the backend wire format: ids are
//! `_id`, everything else camelCase.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{GreenroomError, Result};

/// Board a consultation belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BoardType {
    /// Course inquiries.
    #[default]
    Inquiry,
    /// Audition consultations.
    Audition,
    /// Real-time consultation requests from the home page.
    Realtime,
}

impl BoardType {
    /// Wire string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            BoardType::Inquiry => "INQUIRY",
            BoardType::Audition => "AUDITION",
            BoardType::Realtime => "REALTIME",
        }
    }
}

impl fmt::Display for BoardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BoardType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "INQUIRY" => Ok(BoardType::Inquiry),
            "AUDITION" => Ok(BoardType::Audition),
            "REALTIME" => Ok(BoardType::Realtime),
            _ => Err(format!("unknown board type: {s}")),
        }
    }
}

/// Whether an admin has replied to a consultation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConsultationStatus {
    /// Awaiting an admin reply.
    #[default]
    Pending,
    /// An admin reply exists.
    Answered,
}

/// Admin reply attached to a consultation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Backend-assigned identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Reply body.
    pub content: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Community post (wire name: consultation).
///
/// A secret post fetched without authorization arrives as a redacted stub:
/// `content` and `comments` are absent and `need_password` is true. The
/// backend never sends body fields alongside `need_password = true`, and
/// the password hash never appears in any payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Consultation {
    /// Backend-assigned identifier, immutable.
    #[serde(rename = "_id")]
    pub id: String,
    /// Author's display identifier.
    pub writer_id: String,
    /// Post title (visible even on redacted stubs).
    pub title: String,
    /// Post body; absent while unauthorized.
    #[serde(default)]
    pub content: Option<String>,
    /// Whether the author marked the post private at creation.
    #[serde(default)]
    pub is_secret: bool,
    /// Reply status.
    #[serde(default)]
    pub status: ConsultationStatus,
    /// Board the post belongs to.
    #[serde(default)]
    pub board_type: BoardType,
    /// View counter; absent on redacted stubs.
    #[serde(default)]
    pub view_count: Option<u64>,
    /// Admin replies; absent while unauthorized.
    #[serde(default)]
    pub comments: Option<Vec<Comment>>,
    /// Transient response-only flag: true when the post is secret and the
    /// requester has not authenticated for this view session.
    #[serde(default)]
    pub need_password: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp; absent on redacted stubs.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Consultation {
    /// Whether this payload is a redacted stub awaiting a password.
    pub fn is_locked_stub(&self) -> bool {
        self.need_password
    }
}

/// Data for creating a new consultation.
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewConsultation {
    /// Author's display identifier.
    #[validate(length(min = 1, message = "writer id is required"))]
    pub writer_id: String,
    /// Post title.
    #[validate(length(min = 1, max = 200, message = "title is required"))]
    pub title: String,
    /// Post body.
    #[validate(length(min = 1, message = "content is required"))]
    pub content: String,
    /// Mark the post private; requires a password.
    pub is_secret: bool,
    /// Access password, required when `is_secret` is set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Board to post to.
    pub board_type: BoardType,
}

impl NewConsultation {
    /// Create a public post with the required fields.
    pub fn new(
        writer_id: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            writer_id: writer_id.into(),
            title: title.into(),
            content: content.into(),
            is_secret: false,
            password: None,
            board_type: BoardType::Inquiry,
        }
    }

    /// Mark the post secret with the given access password.
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.is_secret = true;
        self.password = Some(password.into());
        self
    }

    /// Set the board type.
    pub fn with_board_type(mut self, board_type: BoardType) -> Self {
        self.board_type = board_type;
        self
    }

    /// Run all client-side checks, including the secret/password pairing
    /// the derive cannot express.
    pub fn validate_request(&self) -> Result<()> {
        self.validate()?;
        if self.is_secret
            && self
                .password
                .as_deref()
                .map(|p| p.trim().is_empty())
                .unwrap_or(true)
        {
            return Err(GreenroomError::Validation(
                "secret posts require a password".to_string(),
            ));
        }
        Ok(())
    }
}

/// Data for updating an existing consultation.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsultationUpdate {
    /// New title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Password authorizing the edit of a secret post.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl ConsultationUpdate {
    /// Create an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set new title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set new content.
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Attach the post password.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Check if any fields are set.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }
}

/// Query parameters for listing consultations.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsultationQuery {
    /// Page number (1-based).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Items per page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Restrict to a single board.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub board_type: Option<BoardType>,
    /// Field to search ("title", "writerId", ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_type: Option<String>,
    /// Search keyword.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
}

impl ConsultationQuery {
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

    /// Restrict to a board.
    pub fn board_type(mut self, board_type: BoardType) -> Self {
        self.board_type = Some(board_type);
        self
    }

    /// Search a field for a keyword.
    pub fn search(mut self, search_type: impl Into<String>, keyword: impl Into<String>) -> Self {
        self.search_type = Some(search_type.into());
        self.keyword = Some(keyword.into());
        self
    }
}
