//! greenroom - acting academy board client
//!
//! Typed async client for the academy's web backend: community boards
//! (inquiries, audition consultations), read-only archives (notices,
//! resources, galleries, passers), CMS home content and S3-backed image
//! management, plus the secret-post access gate that mediates
//! password-protected posts.

pub mod board;
pub mod client;
pub mod config;
pub mod datetime;
pub mod error;
pub mod gate;
pub mod images;
pub mod logging;

pub use board::{
    BoardType, Comment, Consultation, ConsultationApi, ConsultationQuery, ConsultationStatus,
    ConsultationUpdate, GalleryItem, HomeContent, NewConsultation, Notice, PageQuery, Passer,
    Resource,
};
pub use client::{
    AdminUser, ApiClient, ApiEnvelope, AuthApi, LoginCredentials, Paged, Pagination, RegisterData,
    Session,
};
pub use config::{ClientConfig, ErrorDetailMode, LoggingConfig};
pub use error::{GreenroomError, Result};
pub use gate::{
    GateCanceller, GateState, LoadOutcome, SecretPostGate, SubmitOutcome, MSG_CONNECTION_FAILED,
    MSG_PASSWORD_MISMATCH, MSG_PASSWORD_REQUIRED, MSG_POST_NOT_FOUND,
};
pub use images::{s3_image_url, to_nfd, ImageApi, ImageListItem, ImageUploadResult};
