//! Download request construction.

use crate::core::{FILE_HOST, USER_AGENT};

/// A GET request for a container file, addressed by its resolved relative
/// path (the catalog client resolves paths; the decoder never sees
/// credentials).
///
/// The request carries only the headers the file host expects: `Host`,
/// `User-Agent`, and `Connection: close` so the server terminates the
/// stream after the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    host: String,
    path: String,
    user_agent: String,
}

impl DownloadRequest {
    /// Request `path` from the vendor file host.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            host: FILE_HOST.to_string(),
            path: path.into(),
            user_agent: USER_AGENT.to_string(),
        }
    }

    /// Override the target host.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Override the user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// The target host.
    pub fn host_name(&self) -> &str {
        &self.host
    }

    /// Serialize the request to the bytes sent on the wire.
    pub fn to_bytes(&self) -> Vec<u8> {
        let path = self.path.trim_start_matches('/');
        format!(
            "GET /{path} HTTP/1.1\r\nHost: {host}\r\nUser-Agent: {agent}\r\nConnection: close\r\n\r\n",
            host = self.host,
            agent = self.user_agent,
        )
        .into_bytes()
    }
}
