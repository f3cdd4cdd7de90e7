//! Board module for greenroom.
//!
//! This module provides the typed API surface for the academy's boards:
//! - Consultations (inquiries, audition consultations) with full CRUD,
//!   password verification for secret posts and admin moderation
//! - Read-only archives (notices, resources, galleries, passers)
//! - CMS-driven home page content

mod archives;
mod consultations;
mod content;
mod types;

pub use archives::{
    GalleryApi, GalleryItem, Notice, NoticeApi, PageQuery, Passer, PasserApi, Resource,
    ResourceApi,
};
pub use consultations::ConsultationApi;
pub use content::{
    ContentApi, HeroSection, HomeContent, InstagramPost, Instructor, SchoolPasser, YoutubeVideo,
};
pub use types::{
    BoardType, Comment, Consultation, ConsultationQuery, ConsultationStatus, ConsultationUpdate,
    NewConsultation,
};
