//! Streaming decode of pixel-bean containers.
//!
//! The decoder is an incremental state machine: the transport delivers raw
//! byte chunks in whatever fragmentation the network produced, and the
//! decoder consumes the response preamble, parses the plaintext file
//! header, then decrypts the body block by block into a caller-owned
//! [`FrameStore`]. No full-file buffering ever happens; the only
//! accumulators are one frame's worth of ciphertext and plaintext.

mod buffers;
mod header;
mod machine;
mod scanner;
mod session;
mod store;

pub use header::FileHeader;
pub use machine::{DecodeAction, StreamDecoder};
pub use session::{Session, StreamState};
pub use store::FrameStore;
