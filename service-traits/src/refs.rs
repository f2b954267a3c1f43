//! Opaque references to native service objects.
//!
//! The native service deals in raw pointers to opaque structs, one pointer
//! category per object kind. `ObjRef<K>` keeps those pointers non-null and
//! category-typed so a playlist reference can never be passed where the
//! service expects a container. A reference carries no ownership: pairing
//! it with the service's add-ref/release calls is the client's job.

use std::ffi::c_void;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::ptr::NonNull;

/// Marker for native session handles.
pub enum SessionKind {}
/// Marker for native playlist handles.
pub enum PlaylistKind {}
/// Marker for native playlist-container handles.
pub enum ContainerKind {}
/// Marker for native user handles.
pub enum UserKind {}
/// Marker for native image handles.
pub enum ImageKind {}
/// Marker for native link handles.
pub enum LinkKind {}

/// A non-null pointer to a native object of category `K`.
///
/// Plain address, `Copy`, no lifecycle of its own.
pub struct ObjRef<K> {
    ptr: NonNull<c_void>,
    _kind: PhantomData<fn() -> K>,
}

impl<K> ObjRef<K> {
    /// Wraps a raw pointer returned by the service. `None` for null.
    pub fn from_ptr(ptr: *mut c_void) -> Option<Self> {
        NonNull::new(ptr).map(|ptr| Self {
            ptr,
            _kind: PhantomData,
        })
    }

    /// The raw pointer, for handing back to the service.
    pub fn as_ptr(self) -> *mut c_void {
        self.ptr.as_ptr()
    }

    /// Stable identity of the underlying native object.
    pub fn addr(self) -> usize {
        self.ptr.as_ptr() as usize
    }
}

impl<K> Clone for ObjRef<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for ObjRef<K> {}

impl<K> PartialEq for ObjRef<K> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr == other.ptr
    }
}

impl<K> Eq for ObjRef<K> {}

impl<K> Hash for ObjRef<K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ptr.hash(state);
    }
}

impl<K> fmt::Debug for ObjRef<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjRef({:#x})", self.addr())
    }
}

// The service guarantees all entry points are callable from any thread;
// a reference is just an address with no interior access of its own.
unsafe impl<K> Send for ObjRef<K> {}
unsafe impl<K> Sync for ObjRef<K> {}

pub type SessionRef = ObjRef<SessionKind>;
pub type PlaylistRef = ObjRef<PlaylistKind>;
pub type ContainerRef = ObjRef<ContainerKind>;
pub type UserRef = ObjRef<UserKind>;
pub type ImageRef = ObjRef<ImageKind>;
pub type LinkRef = ObjRef<LinkKind>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_pointer_is_rejected() {
        assert!(PlaylistRef::from_ptr(std::ptr::null_mut()).is_none());
    }

    #[test]
    fn identity_round_trips() {
        let r = PlaylistRef::from_ptr(0x1234 as *mut c_void).unwrap();
        assert_eq!(r.addr(), 0x1234);
        assert_eq!(r, r);
    }
}
