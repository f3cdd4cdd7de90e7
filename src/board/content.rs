//! CMS-driven home page content.

use serde::Deserialize;

use crate::client::ApiClient;
use crate::error::Result;

/// Hero banner at the top of the home page.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroSection {
    /// Background image URL.
    pub image_url: String,
    /// Small line above the title.
    pub subtitle: String,
    /// Main headline.
    pub title: String,
    /// Call-to-action label.
    pub button_text: String,
    /// Call-to-action link.
    pub button_link: String,
}

/// Per-school pass count shown on the home page.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchoolPasser {
    /// Backend-assigned identifier, absent on drafts.
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    /// School logo or photo.
    pub thumbnail_url: String,
    /// School name.
    pub school: String,
    /// Number of students admitted.
    pub count: u32,
    /// Link to the passer board.
    pub link: String,
    /// Display order.
    pub order: i32,
}

/// Embedded YouTube video card.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YoutubeVideo {
    /// Backend-assigned identifier, absent on drafts.
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    /// Video thumbnail.
    pub thumbnail_url: String,
    /// Video title.
    pub title: String,
    /// Short description.
    pub description: String,
    /// Video link.
    pub link: String,
    /// Display order.
    pub order: i32,
}

/// Instructor profile card.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instructor {
    /// Backend-assigned identifier, absent on drafts.
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    /// Portrait URL.
    pub image_url: String,
    /// Instructor name.
    pub name: String,
    /// Short bio.
    pub description: String,
    /// Profile link.
    pub link: String,
    /// Display order.
    pub order: i32,
}

/// Instagram feed card.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstagramPost {
    /// Backend-assigned identifier, absent on drafts.
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    /// Post image.
    pub image_url: String,
    /// Caption.
    pub title: String,
    /// Post link.
    pub link: String,
    /// Display order.
    pub order: i32,
}

/// Full home-page content document.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeContent {
    /// Hero banner.
    pub hero_section: HeroSection,
    /// Per-school pass counts.
    #[serde(default)]
    pub school_passers: Vec<SchoolPasser>,
    /// YouTube video cards.
    #[serde(default)]
    pub youtube_videos: Vec<YoutubeVideo>,
    /// Instructor cards.
    #[serde(default)]
    pub instructors: Vec<Instructor>,
    /// Instagram cards.
    #[serde(default)]
    pub instagram_posts: Vec<InstagramPost>,
}

/// Home-content endpoint wrapper.
pub struct ContentApi<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    /// Access the home-content endpoint.
    pub fn content(&self) -> ContentApi<'_> {
        ContentApi { client: self }
    }
}

impl ContentApi<'_> {
    /// `GET /content` — the CMS document driving the home page.
    pub async fn home(&self) -> Result<HomeContent> {
        let envelope = self.client.get_json::<HomeContent>("content").await?;
        Ok(envelope.data)
    }
}
