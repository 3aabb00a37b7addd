//! # pixelbean
//!
//! Streaming downloader and decoder for "pixel bean" containers: the
//! vendor's binary format for LED-matrix animations (a 4-byte plaintext
//! header followed by an AES-128-CBC encrypted frame payload).
//!
//! The crate's center is an incremental decode state machine that never
//! buffers the whole file: bytes are decrypted as they arrive, whatever the
//! network fragmentation, into a fixed-capacity caller-owned frame buffer.
//! Around it sit an idle watchdog, an at-most-once completion notifier, and
//! a tokio TCP adapter.
//!
//! - **Incremental**: tolerates arbitrary chunk boundaries; cipher chaining
//!   state survives across calls
//! - **Bounded**: one frame of ciphertext and one of plaintext are the only
//!   accumulators; oversized containers are skipped up front
//! - **Deterministic**: explicit per-download sessions, no global state,
//!   timestamps injected into every handler
//!
//! ## Feature Flags
//!
//! - `transport` (default): download request builder and tokio TCP adapter
//! - `catalog` (default): typed payloads for the vendor's JSON catalog API
//!
//! ## Modules
//!
//! - [`core`]: constants, configuration, and error types (always included)
//! - [`crypto`]: cipher context and key providers (always included)
//! - [`decoder`]: the streaming decode state machine (always included)
//! - [`download`]: event dispatch, watchdog, completion notifier
//! - [`transport`]: socket driver (requires `transport` feature)
//! - [`catalog`]: catalog API interface (requires `catalog` feature)
//!
//! ## Example Usage
//!
//! ```rust
//! use std::time::Instant;
//! use pixelbean::prelude::*;
//!
//! let config = DecoderConfigBuilder::new().max_frames(16).build()?;
//! let decoder = StreamDecoder::new(config.clone());
//!
//! // The caller owns the frame store for the whole download.
//! let mut store = FrameStore::new(&config);
//! let mut download = Download::start(
//!     decoder,
//!     &VendorKeys,
//!     Box::new(|header| println!("decoded {} frames", header.total_frames)),
//!     Box::new(|error| eprintln!("download failed: {error}")),
//! );
//!
//! // Feed transport events as they arrive; the response preamble is
//! // consumed incrementally, so fragmentation does not matter.
//! let preamble = b"HTTP/1.1 200 OK\r\n\r\n".to_vec();
//! download.handle_event(&mut store, TransportEvent::Data(preamble), Instant::now());
//! # Ok::<(), pixelbean::ConfigError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Core module (always included)
pub mod core;

// Cipher context and key handling (always included)
pub mod crypto;

// Streaming decode state machine (always included)
pub mod decoder;

// Download orchestration (always included)
pub mod download;

// Transport adapter (feature-gated)
#[cfg(feature = "transport")]
#[cfg_attr(docsrs, doc(cfg(feature = "transport")))]
pub mod transport;

// Catalog API interface (feature-gated)
#[cfg(feature = "catalog")]
#[cfg_attr(docsrs, doc(cfg(feature = "catalog")))]
pub mod catalog;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::core::{ConfigError, DecoderConfig, DecoderConfigBuilder, DownloadError};
    pub use crate::crypto::{KeyProvider, StaticKeys, VendorKeys};
    pub use crate::decoder::{
        DecodeAction, FileHeader, FrameStore, Session, StreamDecoder, StreamState,
    };
    pub use crate::download::{Download, TransportCommand, TransportEvent};

    #[cfg(feature = "transport")]
    pub use crate::transport::{DownloadRequest, TcpTransport};

    #[cfg(feature = "catalog")]
    pub use crate::catalog::{CatalogApi, FileRecord, SessionToken};
}

// Re-export commonly used items at crate root
pub use crate::core::{ConfigError, DecoderConfig, DecoderConfigBuilder, DownloadError};
pub use crate::decoder::{FileHeader, FrameStore, StreamDecoder, StreamState};
pub use crate::download::{Download, TransportCommand, TransportEvent};
