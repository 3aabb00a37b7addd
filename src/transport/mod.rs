//! Transport adapter: request construction and the tokio TCP driver.
//!
//! The decoder never touches sockets; this module owns them and feeds the
//! decoder's event vocabulary. Whether the stream is plain TCP or TLS makes
//! no difference to decoding.

mod request;
mod tcp;

pub use request::DownloadRequest;
pub use tcp::TcpTransport;
