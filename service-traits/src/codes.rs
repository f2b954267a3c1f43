//! Raw codes, tags, and sentinels from the native service headers.
//!
//! These values are wire-level facts about the service ABI. Classification
//! into a typed fault taxonomy happens on the client side, which also
//! handles codes this table does not know about yet.

/// A status code as returned by every fallible service call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RawStatus(pub i32);

impl RawStatus {
    pub const OK: RawStatus = RawStatus(status::OK);

    pub fn is_ok(self) -> bool {
        self.0 == status::OK
    }

    pub fn code(self) -> i32 {
        self.0
    }
}

/// Status codes defined by the current service headers.
pub mod status {
    pub const OK: i32 = 0;
    pub const BAD_API_VERSION: i32 = 1;
    pub const INIT_FAILED: i32 = 2;
    pub const INVALID_ARGUMENT: i32 = 3;
    pub const PERMISSION_DENIED: i32 = 4;
    pub const NETWORK_DISABLED: i32 = 5;
    pub const SERVICE_UNAVAILABLE: i32 = 6;
    pub const OTHER_TRANSIENT: i32 = 7;
    pub const OTHER_PERMANENT: i32 = 8;
    pub const IS_LOADING: i32 = 9;
    pub const NO_CREDENTIALS: i32 = 10;
    pub const RATE_LIMITED: i32 = 11;
    pub const NO_SUCH_OBJECT: i32 = 12;
    pub const READ_ONLY: i32 = 13;
    pub const SYSTEM_FAILURE: i32 = 14;
}

/// Per-index entry tags reported by a playlist container.
pub mod tag {
    pub const PLAYLIST: i32 = 0;
    pub const START_FOLDER: i32 = 1;
    pub const END_FOLDER: i32 = 2;
    /// Defined by the headers but carries no data the client can decode.
    pub const PLACEHOLDER: i32 = 3;
}

/// Offline synchronization states for a playlist.
pub mod offline_status {
    pub const NO: i32 = 0;
    pub const YES: i32 = 1;
    pub const DOWNLOADING: i32 = 2;
    pub const WAITING: i32 = 3;
}

/// Container length before the service has learned it.
pub const LENGTH_UNKNOWN: i32 = -1;

/// Image identifiers are fixed-length binary blobs.
pub const IMAGE_ID_LEN: usize = 20;
