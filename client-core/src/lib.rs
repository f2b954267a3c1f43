//! # Client Core
//!
//! Safe, idiomatic client layer over the native media service. The native
//! library hands out reference-counted opaque pointers, reports progress
//! through one coarse callback, and answers most questions with
//! placeholder values until objects finish loading in the background.
//! This crate hides all of that behind owned Rust types:
//!
//! - [`Handle`] pairs every native reference with exactly one count,
//!   released on drop.
//! - [`LoadNotifier`] bridges the coarse callback into blocking
//!   [`load`](Playlist::load) waits with a single overall deadline.
//! - [`Session`], [`Playlist`], [`PlaylistContainer`], [`User`],
//!   [`Link`], and [`Image`] are thin views: every attribute access asks
//!   the service again, so readers always see current data.
//!
//! ## Usage
//!
//! ```no_run
//! use std::time::Duration;
//! # fn connect_service() -> std::sync::Arc<dyn service_traits::MediaService> { unimplemented!() }
//! use client_core::{Session, SessionConfig};
//!
//! # fn main() -> client_core::Result<()> {
//! let session = Session::connect(connect_service(), &SessionConfig::default())?;
//! let playlist = session.playlist("media:playlist:example")?;
//! playlist.load(Some(Duration::from_secs(10)))?;
//! println!("{}", playlist.name().unwrap_or_default());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod container;
pub mod error;
pub mod handle;
pub mod image;
pub mod link;
pub mod logging;
pub mod playlist;
pub mod session;
pub mod sync;
pub mod user;

pub use config::SessionConfig;
pub use container::{
    BoundaryKind, ContainerEntry, PlaylistContainer, PlaylistFolder, FOLDER_NAME_CAPACITY,
};
pub use error::{Error, Result, Status};
pub use handle::{Handle, HandleKind};
pub use image::Image;
pub use link::Link;
pub use playlist::{Playlist, PlaylistOfflineStatus};
pub use session::Session;
pub use sync::LoadNotifier;
pub use user::User;
