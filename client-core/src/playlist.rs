//! Playlists.
//!
//! A [`Playlist`] is a thin view over the native object: attribute reads
//! go straight to the service on every call and mutations return once the
//! service accepts them, with backend acknowledgement tracked separately
//! through [`Playlist::has_pending_changes`].

use std::fmt;
use std::time::Duration;

use service_traits::codes::{offline_status, IMAGE_ID_LEN};
use service_traits::refs::{PlaylistKind, PlaylistRef};

use crate::error::{check, Error, Result};
use crate::handle::Handle;
use crate::image::Image;
use crate::link::Link;
use crate::session::Session;
use crate::user::User;

/// Offline synchronization state of a playlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaylistOfflineStatus {
    /// Not marked for offline use.
    No,
    /// Synchronized and available offline.
    Yes,
    /// Download in progress.
    Downloading,
    /// Marked for offline use, download not started yet.
    Waiting,
}

impl PlaylistOfflineStatus {
    fn from_raw(raw: i32) -> Result<Self> {
        match raw {
            offline_status::NO => Ok(Self::No),
            offline_status::YES => Ok(Self::Yes),
            offline_status::DOWNLOADING => Ok(Self::Downloading),
            offline_status::WAITING => Ok(Self::Waiting),
            other => Err(Error::ContractViolation(format!(
                "unrecognized offline status {other}"
            ))),
        }
    }
}

/// A view over one native playlist. Clones share the native object.
#[derive(Clone)]
pub struct Playlist {
    session: Session,
    handle: Handle<PlaylistKind>,
}

impl Playlist {
    /// Resolves `uri` through the link machinery.
    pub fn from_uri(session: &Session, uri: &str) -> Result<Self> {
        let link = Link::new(session, uri)?;
        link.as_playlist()
            .ok_or_else(|| Error::InvalidLink(format!("not a playlist URI: {uri}")))
    }

    /// Wraps a borrowed reference, taking our own count.
    pub(crate) fn retain(session: Session, raw: PlaylistRef) -> Self {
        let handle = Handle::acquire(session.service().clone(), raw);
        Self { session, handle }
    }

    pub fn is_loaded(&self) -> bool {
        self.handle.with(|svc, raw| svc.playlist_is_loaded(raw))
    }

    /// Blocks until the playlist is loaded. `None` waits indefinitely.
    ///
    /// Attribute reads on an unloaded playlist do not fail, they return
    /// the service's placeholder values; call this first when real data
    /// is required.
    pub fn load(&self, timeout: Option<Duration>) -> Result<&Self> {
        self.session
            .wait_for_load(timeout, || self.is_loaded())?;
        Ok(self)
    }

    /// The playlist name. `None` when unloaded or unnamed; the service
    /// reports both as the empty string.
    pub fn name(&self) -> Option<String> {
        let name = self.handle.with(|svc, raw| svc.playlist_name(raw));
        if name.is_empty() {
            None
        } else {
            Some(name)
        }
    }

    pub fn rename(&self, name: &str) -> Result<()> {
        let status = self.handle.with(|svc, raw| svc.playlist_rename(raw, name));
        check(self.session.service(), status)
    }

    /// The playlist owner, once known.
    pub fn owner(&self) -> Option<User> {
        let raw = self.handle.with(|svc, raw| svc.playlist_owner(raw))?;
        Some(User::retain(self.session.clone(), raw))
    }

    pub fn is_collaborative(&self) -> bool {
        self.handle
            .with(|svc, raw| svc.playlist_is_collaborative(raw))
    }

    pub fn set_collaborative(&self, collaborative: bool) -> Result<()> {
        let status = self
            .handle
            .with(|svc, raw| svc.playlist_set_collaborative(raw, collaborative));
        check(self.session.service(), status)
    }

    /// Whether link resolution may substitute equivalent tracks the
    /// account can actually play.
    pub fn set_autolink_tracks(&self, autolink: bool) -> Result<()> {
        let status = self
            .handle
            .with(|svc, raw| svc.playlist_set_autolink(raw, autolink));
        check(self.session.service(), status)
    }

    pub fn description(&self) -> Option<String> {
        self.handle.with(|svc, raw| svc.playlist_description(raw))
    }

    /// The playlist's cover image, when one is set.
    pub fn image(&self) -> Option<Image> {
        let mut image_id = [0u8; IMAGE_ID_LEN];
        let has_image = self
            .handle
            .with(|svc, raw| svc.playlist_image_id(raw, &mut image_id));
        if !has_image {
            return None;
        }
        let raw_image = self
            .session
            .service()
            .image_create(self.session.raw(), &image_id)?;
        // image_create transfers its reference
        Some(Image::adopt(self.session.clone(), raw_image))
    }

    /// Local changes the backend has not acknowledged yet.
    pub fn has_pending_changes(&self) -> bool {
        self.handle
            .with(|svc, raw| svc.playlist_has_pending_changes(raw))
    }

    /// Whether this session keeps the playlist's index in RAM.
    pub fn is_in_ram(&self) -> bool {
        self.handle
            .with(|svc, raw| svc.playlist_is_in_ram(self.session.raw(), raw))
    }

    pub fn set_in_ram(&self, in_ram: bool) -> Result<()> {
        let status = self
            .handle
            .with(|svc, raw| svc.playlist_set_in_ram(self.session.raw(), raw, in_ram));
        check(self.session.service(), status)
    }

    /// Marks the playlist for offline synchronization, or clears the mark.
    pub fn set_offline_mode(&self, offline: bool) -> Result<()> {
        let status = self
            .handle
            .with(|svc, raw| svc.playlist_set_offline_mode(self.session.raw(), raw, offline));
        check(self.session.service(), status)
    }

    pub fn offline_status(&self) -> Result<PlaylistOfflineStatus> {
        let raw = self
            .handle
            .with(|svc, raw| svc.playlist_offline_status(self.session.raw(), raw));
        PlaylistOfflineStatus::from_raw(raw)
    }

    /// Download progress in percent. `None` unless a download is running.
    pub fn offline_download_completed(&self) -> Result<Option<u8>> {
        if self.offline_status()? != PlaylistOfflineStatus::Downloading {
            return Ok(None);
        }
        let percent = self
            .handle
            .with(|svc, raw| svc.playlist_offline_download_completed(self.session.raw(), raw));
        Ok(Some(percent.clamp(0, 100) as u8))
    }

    /// A link for this playlist. Fails until the playlist is linkable,
    /// which requires it to be loaded.
    pub fn link(&self) -> Result<Link> {
        Link::from_playlist(self)
    }

    pub(crate) fn session(&self) -> &Session {
        &self.session
    }

    pub(crate) fn raw(&self) -> PlaylistRef {
        self.handle.raw()
    }
}

impl fmt::Display for Playlist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.link() {
            Ok(link) => write!(f, "{}", link.uri()),
            Err(_) => f.write_str("<unlinked playlist>"),
        }
    }
}

impl fmt::Debug for Playlist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Playlist({:#x})", self.handle.raw().addr())
    }
}
