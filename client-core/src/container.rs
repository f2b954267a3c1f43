//! The root playlist container and its per-index entry decoder.
//!
//! The container is a flat list of tagged entries: playlists plus the
//! folder-boundary markers that express the user's folder tree. Nothing is
//! cached on this side; every access re-asks the service, so entries
//! observed while the index is still loading simply resolve to whatever
//! the service knows at that moment.

use std::fmt;
use std::time::Duration;

use service_traits::codes::tag;
use service_traits::refs::{ContainerKind, ContainerRef};

use crate::error::{check, Error, Result};
use crate::handle::Handle;
use crate::playlist::Playlist;
use crate::session::Session;
use crate::user::User;

/// Folder names longer than this are truncated by the fixed-buffer
/// contract of the native call.
pub const FOLDER_NAME_CAPACITY: usize = 256;

/// Which side of a folder an entry marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryKind {
    Start,
    End,
}

/// A folder boundary inside the container's flat entry list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistFolder {
    pub id: u64,
    /// As reported at this marker. End markers usually report an empty
    /// name, but the value is the service's to choose.
    pub name: String,
    pub kind: BoundaryKind,
}

/// One decoded container entry.
#[derive(Debug, Clone)]
pub enum ContainerEntry {
    Playlist(Playlist),
    Folder(PlaylistFolder),
}

/// The signed-in user's playlist container.
#[derive(Clone)]
pub struct PlaylistContainer {
    session: Session,
    handle: Handle<ContainerKind>,
}

impl PlaylistContainer {
    /// Wraps a borrowed container reference, taking our own count.
    pub(crate) fn retain(session: Session, raw: ContainerRef) -> Self {
        let handle = Handle::acquire(session.service().clone(), raw);
        Self { session, handle }
    }

    pub fn is_loaded(&self) -> bool {
        self.handle.with(|svc, raw| svc.container_is_loaded(raw))
    }

    /// Blocks until the container is loaded. `None` waits indefinitely.
    pub fn load(&self, timeout: Option<Duration>) -> Result<&Self> {
        self.session
            .wait_for_load(timeout, || self.is_loaded())?;
        Ok(self)
    }

    /// Number of entries right now. Zero while the index is unknown.
    pub fn len(&self) -> usize {
        let raw_len = self.handle.with(|svc, raw| svc.container_len(raw));
        // the unknown-length sentinel is negative
        usize::try_from(raw_len).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Decodes the entry at `index`. The length is re-queried on every
    /// call, so a shrinking container yields [`Error::IndexOutOfRange`]
    /// rather than a stale read.
    pub fn entry(&self, index: usize) -> Result<ContainerEntry> {
        let len = self.len();
        if index >= len {
            return Err(Error::IndexOutOfRange { index, len });
        }

        let entry_tag = self
            .handle
            .with(|svc, raw| svc.container_entry_type(raw, index));
        match entry_tag {
            tag::PLAYLIST => {
                let raw_playlist = self
                    .handle
                    .with(|svc, raw| svc.container_playlist(raw, index))
                    .ok_or_else(|| {
                        Error::ContractViolation(format!(
                            "entry {index} tagged as playlist but none returned"
                        ))
                    })?;
                // the container keeps its own reference; take ours on top
                Ok(ContainerEntry::Playlist(Playlist::retain(
                    self.session.clone(),
                    raw_playlist,
                )))
            }
            tag::START_FOLDER | tag::END_FOLDER => {
                let id = self
                    .handle
                    .with(|svc, raw| svc.container_folder_id(raw, index));
                let kind = if entry_tag == tag::START_FOLDER {
                    BoundaryKind::Start
                } else {
                    BoundaryKind::End
                };
                // both markers carry the name slot; end markers are
                // usually blank but the service decides that, not us
                let mut buffer = [0u8; FOLDER_NAME_CAPACITY];
                self.handle.with(|svc, raw| {
                    check(
                        self.session.service(),
                        svc.container_folder_name(raw, index, &mut buffer),
                    )
                })?;
                let name = decode_fixed_buffer(&buffer);
                Ok(ContainerEntry::Folder(PlaylistFolder { id, name, kind }))
            }
            other => Err(Error::ContractViolation(format!(
                "entry {index} has undecodable tag {other}"
            ))),
        }
    }

    /// Decodes every current entry front to back.
    pub fn entries(&self) -> impl Iterator<Item = Result<ContainerEntry>> + '_ {
        (0..self.len()).map(move |index| self.entry(index))
    }

    /// The container's owner, when the service knows one.
    pub fn owner(&self) -> Option<User> {
        let raw = self.handle.with(|svc, raw| svc.container_owner(raw))?;
        Some(User::retain(self.session.clone(), raw))
    }
}

impl fmt::Display for PlaylistContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.owner().and_then(|owner| owner.link().ok()) {
            Some(link) => write!(f, "container of {}", link.uri()),
            None => f.write_str("<unowned container>"),
        }
    }
}

impl fmt::Debug for PlaylistContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PlaylistContainer({:#x})", self.handle.raw().addr())
    }
}

/// Decodes a NUL-terminated fixed buffer as UTF-8, lossily.
fn decode_fixed_buffer(buffer: &[u8]) -> String {
    let end = buffer.iter().position(|&b| b == 0).unwrap_or(buffer.len());
    String::from_utf8_lossy(&buffer[..end]).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_buffer_stops_at_the_terminator() {
        let mut buffer = [0u8; 16];
        buffer[..4].copy_from_slice(b"Rock");
        assert_eq!(decode_fixed_buffer(&buffer), "Rock");
    }

    #[test]
    fn unterminated_buffer_reads_to_the_end() {
        let buffer = [b'x'; 4];
        assert_eq!(decode_fixed_buffer(&buffer), "xxxx");
    }

    #[test]
    fn invalid_utf8_is_replaced_not_rejected() {
        let buffer = [0xf0, 0x28, 0x8c, 0x28, 0x00];
        let decoded = decode_fixed_buffer(&buffer);
        assert!(decoded.contains('\u{fffd}'));
    }
}
