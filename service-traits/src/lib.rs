//! # Native Media Service Contract
//!
//! The contract between the client crates and the external native media
//! service. The service is a callback-driven, reference-counted library:
//! it hands out opaque handles (sessions, playlists, playlist containers,
//! users, images, links) and reports asynchronous state changes through
//! callbacks fired from its internal event-processing thread.
//!
//! ## Overview
//!
//! - [`refs`] - opaque, category-typed references to native objects
//! - [`codes`] - raw status codes, entry tags, and sentinels from the
//!   service headers
//! - [`MediaService`](service::MediaService) - one method per native entry
//!   point the client calls
//! - [`SessionCallbacks`](callbacks::SessionCallbacks) - the notification
//!   surface the client registers per session
//!
//! ## Ownership contract
//!
//! Every reference-returning method documents whether the return is
//! *owned* (the caller receives an existing reference and must release it
//! exactly once) or *borrowed* (the producing object retains its own
//! reference; the caller must add one before retaining it). Getting this
//! wrong either leaks the object or frees it while in use, so the client's
//! handle wrapper is the only place that should consume these methods
//! directly.
//!
//! ## Thread safety
//!
//! All service entry points are individually thread-safe, with the single
//! exception that callbacks arrive on the service's own processing thread,
//! which the embedding application must drive. `MediaService` therefore
//! requires `Send + Sync`.

pub mod callbacks;
pub mod codes;
pub mod refs;
pub mod service;

pub use callbacks::SessionCallbacks;
pub use codes::{RawStatus, IMAGE_ID_LEN, LENGTH_UNKNOWN};
pub use refs::{ContainerRef, ImageRef, LinkRef, ObjRef, PlaylistRef, SessionRef, UserRef};
pub use service::MediaService;

#[cfg(feature = "mockall")]
pub use service::MockMediaService;
