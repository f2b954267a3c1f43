//! Session lifecycle and callback wiring.
//!
//! One [`Session`] wraps one native session. It registers a callback hook
//! that funnels the service's coarse `metadata_updated` signal into the
//! session's [`LoadNotifier`], which every load-wait in this crate blocks
//! on. The session is cheaply cloneable; the native session is released
//! when the last clone drops.

use std::sync::Arc;
use std::time::Duration;

use service_traits::refs::SessionRef;
use service_traits::{MediaService, SessionCallbacks};
use tracing::{debug, info};

use crate::config::SessionConfig;
use crate::container::PlaylistContainer;
use crate::error::{Error, Result};
use crate::playlist::Playlist;
use crate::sync::LoadNotifier;
use crate::user::User;

/// Forwards service callbacks into the notifier.
struct NotifierHook {
    notifier: Arc<LoadNotifier>,
}

impl SessionCallbacks for NotifierHook {
    fn metadata_updated(&self) {
        self.notifier.notify_all();
    }

    fn connection_state_updated(&self) {
        self.notifier.notify_all();
    }

    fn log_message(&self, message: &str) {
        debug!(target: "client_core::service", "{}", message.trim_end());
    }
}

struct SessionInner {
    svc: Arc<dyn MediaService>,
    raw: SessionRef,
    notifier: Arc<LoadNotifier>,
}

impl Drop for SessionInner {
    fn drop(&mut self) {
        self.svc.session_release(self.raw);
    }
}

/// A connected client session. Clones share the same native session.
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

impl Session {
    /// Creates a native session and wires up callback delivery.
    pub fn connect(svc: Arc<dyn MediaService>, config: &SessionConfig) -> Result<Self> {
        let cache_location = config.cache_location.to_string_lossy();
        let raw = svc
            .session_create(cache_location.as_ref(), &config.user_agent)
            .map_err(|status| Error::from_raw(&svc, status))?;

        let notifier = Arc::new(LoadNotifier::new());
        svc.session_set_callbacks(
            raw,
            Arc::new(NotifierHook {
                notifier: Arc::clone(&notifier),
            }),
        );
        info!(user_agent = %config.user_agent, "session connected");

        Ok(Self {
            inner: Arc::new(SessionInner { svc, raw, notifier }),
        })
    }

    /// The signed-in user's root playlist container, or `None` before
    /// login completes.
    pub fn playlist_container(&self) -> Option<PlaylistContainer> {
        let raw = self.inner.svc.session_playlist_container(self.inner.raw)?;
        Some(PlaylistContainer::retain(self.clone(), raw))
    }

    /// The signed-in user, or `None` before login completes.
    pub fn current_user(&self) -> Option<User> {
        let raw = self.inner.svc.session_user(self.inner.raw)?;
        Some(User::retain(self.clone(), raw))
    }

    /// Resolves a playlist URI.
    pub fn playlist(&self, uri: &str) -> Result<Playlist> {
        Playlist::from_uri(self, uri)
    }

    pub(crate) fn service(&self) -> &Arc<dyn MediaService> {
        &self.inner.svc
    }

    /// The underlying native reference, for callers that need to talk to
    /// the service directly.
    pub fn raw(&self) -> SessionRef {
        self.inner.raw
    }

    pub(crate) fn notifier(&self) -> &LoadNotifier {
        &self.inner.notifier
    }

    /// Blocks until `loaded()` holds or `timeout` elapses.
    pub(crate) fn wait_for_load(
        &self,
        timeout: Option<Duration>,
        loaded: impl FnMut() -> bool,
    ) -> Result<()> {
        self.notifier().wait_until(timeout, loaded)
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Session({:#x})", self.inner.raw.addr())
    }
}
