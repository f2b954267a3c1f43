//! Owned wrappers around native references.
//!
//! A [`Handle`] pairs an [`ObjRef`] with the service that minted it and
//! owns exactly one native reference: construction either adopts a
//! reference the service already transferred ([`Handle::adopt`]) or takes
//! a new one on a borrowed reference ([`Handle::acquire`]). Cloning takes
//! another reference, dropping releases one. Balanced by construction, so
//! leaks and double-releases cannot be written by callers.

use std::fmt;
use std::sync::Arc;

use service_traits::refs::{
    ContainerKind, ImageKind, LinkKind, ObjRef, PlaylistKind, UserKind,
};
use service_traits::MediaService;
use tracing::trace;

/// Ties a reference category to its add-ref/release entry points.
pub trait HandleKind: Sized + 'static {
    const NAME: &'static str;

    fn add_ref(svc: &dyn MediaService, raw: ObjRef<Self>);
    fn release(svc: &dyn MediaService, raw: ObjRef<Self>);
}

impl HandleKind for PlaylistKind {
    const NAME: &'static str = "playlist";

    fn add_ref(svc: &dyn MediaService, raw: ObjRef<Self>) {
        svc.playlist_add_ref(raw);
    }

    fn release(svc: &dyn MediaService, raw: ObjRef<Self>) {
        svc.playlist_release(raw);
    }
}

impl HandleKind for ContainerKind {
    const NAME: &'static str = "container";

    fn add_ref(svc: &dyn MediaService, raw: ObjRef<Self>) {
        svc.container_add_ref(raw);
    }

    fn release(svc: &dyn MediaService, raw: ObjRef<Self>) {
        svc.container_release(raw);
    }
}

impl HandleKind for UserKind {
    const NAME: &'static str = "user";

    fn add_ref(svc: &dyn MediaService, raw: ObjRef<Self>) {
        svc.user_add_ref(raw);
    }

    fn release(svc: &dyn MediaService, raw: ObjRef<Self>) {
        svc.user_release(raw);
    }
}

impl HandleKind for ImageKind {
    const NAME: &'static str = "image";

    fn add_ref(svc: &dyn MediaService, raw: ObjRef<Self>) {
        svc.image_add_ref(raw);
    }

    fn release(svc: &dyn MediaService, raw: ObjRef<Self>) {
        svc.image_release(raw);
    }
}

impl HandleKind for LinkKind {
    const NAME: &'static str = "link";

    fn add_ref(svc: &dyn MediaService, raw: ObjRef<Self>) {
        svc.link_add_ref(raw);
    }

    fn release(svc: &dyn MediaService, raw: ObjRef<Self>) {
        svc.link_release(raw);
    }
}

/// An owned native reference of category `K`.
pub struct Handle<K: HandleKind> {
    raw: ObjRef<K>,
    svc: Arc<dyn MediaService>,
}

impl<K: HandleKind> Handle<K> {
    /// Takes over a reference the service already transferred to us.
    /// No add-ref happens; the count stays as the service left it.
    pub fn adopt(svc: Arc<dyn MediaService>, raw: ObjRef<K>) -> Self {
        trace!(kind = K::NAME, raw = raw.addr(), "handle adopted");
        Self { raw, svc }
    }

    /// Wraps a borrowed reference, taking a new count of our own.
    pub fn acquire(svc: Arc<dyn MediaService>, raw: ObjRef<K>) -> Self {
        K::add_ref(svc.as_ref(), raw);
        trace!(kind = K::NAME, raw = raw.addr(), "handle acquired");
        Self { raw, svc }
    }

    /// Runs `f` with the raw reference. The handle stays alive for the
    /// whole call, so the reference cannot be released mid-use.
    pub fn with<R>(&self, f: impl FnOnce(&dyn MediaService, ObjRef<K>) -> R) -> R {
        f(self.svc.as_ref(), self.raw)
    }

    pub fn raw(&self) -> ObjRef<K> {
        self.raw
    }
}

impl<K: HandleKind> Clone for Handle<K> {
    fn clone(&self) -> Self {
        Self::acquire(Arc::clone(&self.svc), self.raw)
    }
}

impl<K: HandleKind> Drop for Handle<K> {
    fn drop(&mut self) {
        trace!(kind = K::NAME, raw = self.raw.addr(), "handle released");
        K::release(self.svc.as_ref(), self.raw);
    }
}

impl<K: HandleKind> fmt::Debug for Handle<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle<{}>({:#x})", K::NAME, self.raw.addr())
    }
}
