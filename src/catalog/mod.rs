//! Collaborator interface for the authenticated catalog API.
//!
//! The decoder consumes only a resolved relative file path; listing and
//! authentication live behind [`CatalogApi`], implemented by whatever HTTP
//! client the application already uses. This module defines the trait and
//! the exact wire payloads, nothing transport-specific.

mod types;

use thiserror::Error;

pub use types::{
    FileListRequest, FileListResponse, FileRecord, LoginRequest, LoginResponse, SessionToken,
};

/// Errors surfaced by a catalog client implementation.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Login rejected or session token expired.
    #[error("authentication failed")]
    AuthFailed,

    /// Response body did not parse as the expected payload.
    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Underlying HTTP transport failure.
    #[error("transport error: {0}")]
    Io(#[from] std::io::Error),
}

/// The authenticated JSON API the downloader's caller depends on.
pub trait CatalogApi {
    /// Authenticate and obtain a session token.
    fn login(&mut self) -> Result<SessionToken, CatalogError>;

    /// List one page of a category's files.
    fn list_category_files(
        &mut self,
        category_id: u8,
        page: u16,
        per_page: u16,
    ) -> Result<Vec<FileRecord>, CatalogError>;
}
