//! Wire payloads for the authenticated catalog API.
//!
//! Field names are PascalCase on the wire, matching the vendor's JSON.

use serde::{Deserialize, Serialize};

/// Login request body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct LoginRequest<'a> {
    /// Account email address.
    pub email: &'a str,
    /// MD5 of the account password; the plaintext never goes on the wire.
    pub password: &'a str,
}

/// Login response body.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LoginResponse {
    /// Numeric account identifier.
    pub user_id: i64,
    /// Session token echoed into every authenticated request.
    pub token: i64,
}

/// Authenticated session obtained from a successful login.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionToken {
    /// Numeric account identifier.
    pub user_id: i64,
    /// Session token.
    pub token: i64,
}

impl From<LoginResponse> for SessionToken {
    fn from(response: LoginResponse) -> Self {
        Self {
            user_id: response.user_id,
            token: response.token,
        }
    }
}

/// Paginated category file listing request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct FileListRequest {
    /// 1-based index of the first entry.
    pub start_num: u16,
    /// 1-based index of the last entry (inclusive).
    pub end_num: u16,
    /// Category to list.
    pub classify: u8,
    /// API version the vendor app sends.
    pub version: u8,
    /// File size class (1 = 16x16 animation).
    pub file_size: u8,
    /// File type class (1 = animation).
    pub file_type: u8,
    /// Refresh cursor, always zero for plain pagination.
    pub refresh_index: u8,
    /// Sort order, always zero for the default order.
    pub file_sort: u8,
}

impl FileListRequest {
    /// Build the request for one page of a category.
    pub fn for_page(category_id: u8, page: u16, per_page: u16) -> Self {
        let start_num = (page.saturating_sub(1)) * per_page + 1;
        let end_num = start_num + per_page - 1;
        Self {
            start_num,
            end_num,
            classify: category_id,
            version: 12,
            file_size: 1,
            file_type: 1,
            refresh_index: 0,
            file_sort: 0,
        }
    }
}

/// One catalog entry: enough to resolve and download the container.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FileRecord {
    /// Gallery identifier.
    pub gallery_id: i64,
    /// Relative file path on the file host.
    pub file_id: String,
}

/// Category file listing response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FileListResponse {
    /// The page of catalog entries.
    #[serde(default)]
    pub file_list: Vec<FileRecord>,
}
