//! Links: the URI form of service objects.

use std::fmt;

use service_traits::refs::{LinkKind, LinkRef};

use crate::error::{Error, Result};
use crate::handle::Handle;
use crate::playlist::Playlist;
use crate::session::Session;
use crate::user::User;

/// A parsed object URI. Clones share the native object.
#[derive(Clone)]
pub struct Link {
    session: Session,
    handle: Handle<LinkKind>,
}

impl Link {
    /// Parses `uri`; fails when the service does not recognize it.
    pub fn new(session: &Session, uri: &str) -> Result<Self> {
        let raw = session
            .service()
            .link_create_from_string(uri)
            .ok_or_else(|| Error::InvalidLink(uri.to_owned()))?;
        Ok(Self::adopt(session.clone(), raw))
    }

    pub(crate) fn from_playlist(playlist: &Playlist) -> Result<Self> {
        let session = playlist.session().clone();
        let raw = session
            .service()
            .link_from_playlist(playlist.raw())
            .ok_or_else(|| Error::InvalidLink("playlist is not yet linkable".to_owned()))?;
        Ok(Self::adopt(session, raw))
    }

    pub(crate) fn from_user(user: &User) -> Result<Self> {
        let session = user.session().clone();
        let raw = session
            .service()
            .link_from_user(user.raw())
            .ok_or_else(|| Error::InvalidLink("user is not linkable".to_owned()))?;
        Ok(Self::adopt(session, raw))
    }

    fn adopt(session: Session, raw: LinkRef) -> Self {
        let handle = Handle::adopt(session.service().clone(), raw);
        Self { session, handle }
    }

    /// The canonical URI string.
    pub fn uri(&self) -> String {
        self.handle.with(|svc, raw| svc.link_as_string(raw))
    }

    /// The playlist this link points at, for playlist links.
    pub fn as_playlist(&self) -> Option<Playlist> {
        let raw = self.handle.with(|svc, raw| svc.link_as_playlist(raw))?;
        // borrowed from the link; take our own count
        Some(Playlist::retain(self.session.clone(), raw))
    }

    /// The user this link points at, for user links.
    pub fn as_user(&self) -> Option<User> {
        let raw = self.handle.with(|svc, raw| svc.link_as_user(raw))?;
        Some(User::retain(self.session.clone(), raw))
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.uri())
    }
}

impl fmt::Debug for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Link({:#x})", self.handle.raw().addr())
    }
}
