//! Cover images.

use std::fmt;
use std::time::Duration;

use service_traits::refs::{ImageKind, ImageRef};

use crate::error::Result;
use crate::handle::Handle;
use crate::session::Session;

/// A view over one native image. Clones share the native object.
#[derive(Clone)]
pub struct Image {
    session: Session,
    handle: Handle<ImageKind>,
}

impl Image {
    pub(crate) fn adopt(session: Session, raw: ImageRef) -> Self {
        let handle = Handle::adopt(session.service().clone(), raw);
        Self { session, handle }
    }

    pub fn is_loaded(&self) -> bool {
        self.handle.with(|svc, raw| svc.image_is_loaded(raw))
    }

    /// Blocks until the image is loaded. `None` waits indefinitely.
    pub fn load(&self, timeout: Option<Duration>) -> Result<&Self> {
        self.session
            .wait_for_load(timeout, || self.is_loaded())?;
        Ok(self)
    }

    /// The raw encoded image bytes. Empty until loaded.
    pub fn data(&self) -> Vec<u8> {
        self.handle.with(|svc, raw| svc.image_data(raw))
    }
}

impl fmt::Debug for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Image({:#x})", self.handle.raw().addr())
    }
}
