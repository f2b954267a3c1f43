//! Users.

use std::fmt;
use std::time::Duration;

use service_traits::refs::{UserKind, UserRef};

use crate::error::Result;
use crate::handle::Handle;
use crate::link::Link;
use crate::session::Session;

/// A view over one native user. Clones share the native object.
#[derive(Clone)]
pub struct User {
    session: Session,
    handle: Handle<UserKind>,
}

impl User {
    pub(crate) fn retain(session: Session, raw: UserRef) -> Self {
        let handle = Handle::acquire(session.service().clone(), raw);
        Self { session, handle }
    }

    pub fn is_loaded(&self) -> bool {
        self.handle.with(|svc, raw| svc.user_is_loaded(raw))
    }

    /// Blocks until the user is loaded. `None` waits indefinitely.
    pub fn load(&self, timeout: Option<Duration>) -> Result<&Self> {
        self.session
            .wait_for_load(timeout, || self.is_loaded())?;
        Ok(self)
    }

    /// The stable account name.
    pub fn canonical_name(&self) -> String {
        self.handle.with(|svc, raw| svc.user_canonical_name(raw))
    }

    /// The presentation name; the canonical name until loaded.
    pub fn display_name(&self) -> String {
        self.handle.with(|svc, raw| svc.user_display_name(raw))
    }

    pub fn link(&self) -> Result<Link> {
        Link::from_user(self)
    }

    pub(crate) fn raw(&self) -> UserRef {
        self.handle.raw()
    }

    pub(crate) fn session(&self) -> &Session {
        &self.session
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical_name())
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "User({:#x})", self.handle.raw().addr())
    }
}
