//! Container and vendor constants for the pixel-bean format.
//!
//! These values are fixed by the vendor file format and MUST NOT be changed.

use std::time::Duration;

// =============================================================================
// CONTAINER FORMAT
// =============================================================================

/// AES cipher block size. Frame sizes are always a multiple of this.
pub const CIPHER_BLOCK_SIZE: usize = 16;

/// Plaintext file header size (kind + total_frames + speed).
pub const FILE_HEADER_SIZE: usize = 4;

/// Bytes per pixel (packed RGB, no alpha).
pub const BYTES_PER_PIXEL: usize = 3;

/// Default LED matrix edge length in pixels.
pub const DEFAULT_MATRIX_SIZE: usize = 16;

/// Default frame payload size: 16x16 RGB, 768 bytes (48 cipher blocks).
pub const DEFAULT_FRAME_SIZE: usize = DEFAULT_MATRIX_SIZE * DEFAULT_MATRIX_SIZE * BYTES_PER_PIXEL;

/// Default frame-store capacity in frames.
pub const DEFAULT_MAX_FRAMES: usize = 60;

// =============================================================================
// TIMING
// =============================================================================

/// Default idle watchdog threshold: abort after this long without a byte.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(10);

/// Default deadline for the transport to acknowledge the sent request.
pub const DEFAULT_ACK_TIMEOUT: Duration = Duration::from_secs(5);

/// Default idle-poll interval driving the watchdog.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

// =============================================================================
// VENDOR ENDPOINTS
// =============================================================================

/// API host for the authenticated JSON endpoints.
pub const API_HOST: &str = "app.divoom-gz.com";

/// File host serving the animation containers.
pub const FILE_HOST: &str = "f.divoom-gz.com";

/// Plain-HTTP port used by both hosts.
pub const VENDOR_PORT: u16 = 80;

/// User-agent the vendor servers expect.
pub const USER_AGENT: &str = "Aurabox/3.1.10 (iPad; iOS 14.8; Scale/2.00)";

/// Login endpoint path.
pub const ENDPOINT_USER_LOGIN: &str = "/UserLogin";

/// Paginated category file listing endpoint path.
pub const ENDPOINT_CATEGORY_FILE_LIST: &str = "/GetCategoryFileListV2";

// =============================================================================
// LEGACY ERROR CODES
// =============================================================================

/// Wire code the original firmware reported for a disconnect without
/// completion. Kept for callers migrating from the untyped callback.
pub const LEGACY_CODE_DISCONNECTED: i8 = -1;

/// Wire code the original firmware reported for an ack timeout.
pub const LEGACY_CODE_ACK_TIMEOUT: i8 = -2;
