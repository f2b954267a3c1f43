//! The native service entry points, one trait method per native call.
//!
//! Implementations are either the FFI layer over the real service library
//! or the in-memory `service-shims` crate. Ownership of returned
//! references follows each method's doc comment: *owned* returns transfer
//! an existing reference to the caller, *borrowed* returns stay owned by
//! the producing object.

use std::sync::Arc;

use crate::callbacks::SessionCallbacks;
use crate::codes::{RawStatus, IMAGE_ID_LEN, LENGTH_UNKNOWN};
use crate::refs::{ContainerRef, ImageRef, LinkRef, PlaylistRef, SessionRef, UserRef};

#[cfg_attr(any(test, feature = "mockall"), mockall::automock)]
pub trait MediaService: Send + Sync {
    /// Human-readable message for a status code, as UTF-8.
    fn status_message(&self, code: i32) -> String;

    // ── Session ─────────────────────────────────────────────────────────

    /// Creates a native session. Owned; release with [`session_release`].
    ///
    /// [`session_release`]: MediaService::session_release
    fn session_create(
        &self,
        cache_location: &str,
        user_agent: &str,
    ) -> Result<SessionRef, RawStatus>;

    fn session_release(&self, session: SessionRef);

    /// Registers the notification callbacks for this session. Callbacks
    /// fire on the service's event-processing thread.
    fn session_set_callbacks(&self, session: SessionRef, callbacks: Arc<dyn SessionCallbacks>);

    /// The signed-in user's root playlist container, or `None` before
    /// login completes. Borrowed: the session retains its own reference.
    fn session_playlist_container(&self, session: SessionRef) -> Option<ContainerRef>;

    /// The signed-in user, or `None` before login completes. Borrowed.
    fn session_user(&self, session: SessionRef) -> Option<UserRef>;

    // ── Playlist ────────────────────────────────────────────────────────

    fn playlist_add_ref(&self, playlist: PlaylistRef);

    fn playlist_release(&self, playlist: PlaylistRef);

    fn playlist_is_loaded(&self, playlist: PlaylistRef) -> bool;

    /// The playlist name; empty string until loaded or when unset.
    fn playlist_name(&self, playlist: PlaylistRef) -> String;

    fn playlist_rename(&self, playlist: PlaylistRef, name: &str) -> RawStatus;

    /// Borrowed: the playlist retains its own reference.
    fn playlist_owner(&self, playlist: PlaylistRef) -> Option<UserRef>;

    fn playlist_is_collaborative(&self, playlist: PlaylistRef) -> bool;

    fn playlist_set_collaborative(&self, playlist: PlaylistRef, collaborative: bool) -> RawStatus;

    fn playlist_set_autolink(&self, playlist: PlaylistRef, autolink: bool) -> RawStatus;

    /// `None` when the playlist has no description set.
    fn playlist_description(&self, playlist: PlaylistRef) -> Option<String>;

    /// Writes the playlist's image id into `image_id`. `false` when the
    /// playlist has no image (the buffer content is then unspecified).
    fn playlist_image_id(&self, playlist: PlaylistRef, image_id: &mut [u8; IMAGE_ID_LEN]) -> bool;

    /// Local changes not yet acknowledged by the service backend.
    fn playlist_has_pending_changes(&self, playlist: PlaylistRef) -> bool;

    fn playlist_is_in_ram(&self, session: SessionRef, playlist: PlaylistRef) -> bool;

    fn playlist_set_in_ram(
        &self,
        session: SessionRef,
        playlist: PlaylistRef,
        in_ram: bool,
    ) -> RawStatus;

    fn playlist_set_offline_mode(
        &self,
        session: SessionRef,
        playlist: PlaylistRef,
        offline: bool,
    ) -> RawStatus;

    /// Raw offline status value (see [`codes::offline_status`]).
    ///
    /// [`codes::offline_status`]: crate::codes::offline_status
    fn playlist_offline_status(&self, session: SessionRef, playlist: PlaylistRef) -> i32;

    /// Offline download progress, 0-100.
    fn playlist_offline_download_completed(
        &self,
        session: SessionRef,
        playlist: PlaylistRef,
    ) -> i32;

    // ── Playlist container ──────────────────────────────────────────────

    fn container_add_ref(&self, container: ContainerRef);

    fn container_release(&self, container: ContainerRef);

    fn container_is_loaded(&self, container: ContainerRef) -> bool;

    /// Number of entries, or [`LENGTH_UNKNOWN`] before the container has
    /// loaded its index.
    fn container_len(&self, container: ContainerRef) -> i32;

    /// The entry tag at `index` (see [`codes::tag`]).
    ///
    /// [`codes::tag`]: crate::codes::tag
    fn container_entry_type(&self, container: ContainerRef, index: usize) -> i32;

    /// The playlist at `index` when the tag says so. Borrowed: the
    /// container retains its own reference.
    fn container_playlist(&self, container: ContainerRef, index: usize) -> Option<PlaylistRef>;

    fn container_folder_id(&self, container: ContainerRef, index: usize) -> u64;

    /// Writes the NUL-terminated folder name at `index` into `buffer`,
    /// truncating when the name does not fit. Fixed-buffer contract: the
    /// service never resizes.
    fn container_folder_name(
        &self,
        container: ContainerRef,
        index: usize,
        buffer: &mut [u8],
    ) -> RawStatus;

    /// Borrowed: the container retains its own reference.
    fn container_owner(&self, container: ContainerRef) -> Option<UserRef>;

    // ── User ────────────────────────────────────────────────────────────

    fn user_add_ref(&self, user: UserRef);

    fn user_release(&self, user: UserRef);

    fn user_is_loaded(&self, user: UserRef) -> bool;

    fn user_canonical_name(&self, user: UserRef) -> String;

    /// Falls back to the canonical name until the user is loaded.
    fn user_display_name(&self, user: UserRef) -> String;

    // ── Image ───────────────────────────────────────────────────────────

    /// Instantiates an image from its id. Owned.
    fn image_create(
        &self,
        session: SessionRef,
        image_id: &[u8; IMAGE_ID_LEN],
    ) -> Option<ImageRef>;

    fn image_add_ref(&self, image: ImageRef);

    fn image_release(&self, image: ImageRef);

    fn image_is_loaded(&self, image: ImageRef) -> bool;

    /// Raw encoded image bytes; empty until loaded.
    fn image_data(&self, image: ImageRef) -> Vec<u8>;

    // ── Link ────────────────────────────────────────────────────────────

    /// Parses a URI. Owned; `None` when the service does not recognize it.
    fn link_create_from_string(&self, uri: &str) -> Option<LinkRef>;

    fn link_add_ref(&self, link: LinkRef);

    fn link_release(&self, link: LinkRef);

    fn link_as_string(&self, link: LinkRef) -> String;

    /// The playlist a playlist-link points at. Borrowed.
    fn link_as_playlist(&self, link: LinkRef) -> Option<PlaylistRef>;

    /// The user a user-link points at. Borrowed.
    fn link_as_user(&self, link: LinkRef) -> Option<UserRef>;

    /// Link for a playlist; `None` until the playlist is linkable. Owned.
    fn link_from_playlist(&self, playlist: PlaylistRef) -> Option<LinkRef>;

    /// Link for a user. Owned.
    fn link_from_user(&self, user: UserRef) -> Option<LinkRef>;
}
