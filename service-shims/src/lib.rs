//! # In-Memory Media Service
//!
//! A hermetic [`MediaService`] implementation backed by plain Rust state.
//! It mirrors the native library's observable semantics (reference
//! counting with free-at-zero, coarse metadata callbacks, fixed-buffer
//! name writes, the unknown-length container sentinel) without any native
//! code, so client behavior can be exercised deterministically.
//!
//! ## Usage
//!
//! ```
//! use service_shims::InMemoryMediaService;
//! use service_traits::MediaService;
//!
//! let svc = InMemoryMediaService::new();
//! let playlist = svc.create_playlist("media:playlist:demo", "Demo");
//! assert_eq!(svc.refcount(playlist), 1);
//! svc.playlist_release(playlist);
//! assert_eq!(svc.refcount(playlist), 0);
//! ```
//!
//! ## Contract fidelity
//!
//! - `create_*` returns an *owned* reference (count 1); releasing the last
//!   reference frees the object and releases everything it retained.
//! - Using a freed reference panics, which is the shim's stand-in for the
//!   undefined behavior the native library exhibits.
//! - `set_*_loaded` fires `metadata_updated` on every registered callback
//!   set, from the mutating thread, outside the state lock. This is the
//!   same ordering the native event-processing thread provides.
//! - Failure injection: [`fail_next_call`](InMemoryMediaService::fail_next_call)
//!   makes the next mutating call return the given status.

use std::collections::HashMap;
use std::ffi::c_void;
use std::sync::Arc;

use parking_lot::Mutex;
use service_traits::codes::{offline_status, RawStatus, IMAGE_ID_LEN, LENGTH_UNKNOWN};
use service_traits::refs::{ContainerRef, ImageRef, LinkRef, ObjRef, PlaylistRef, SessionRef, UserRef};
use service_traits::{MediaService, SessionCallbacks};
use tracing::trace;

fn mint<K>(id: usize) -> ObjRef<K> {
    match ObjRef::from_ptr(id as *mut c_void) {
        Some(r) => r,
        // ids are minted starting at 1
        None => unreachable!("shim object ids are non-zero"),
    }
}

#[derive(Debug, Clone)]
struct PlaylistState {
    uri: String,
    name: String,
    loaded: bool,
    collaborative: bool,
    autolink: bool,
    description: Option<String>,
    image_id: Option<[u8; IMAGE_ID_LEN]>,
    pending_changes: bool,
    in_ram: bool,
    offline_mode: bool,
    offline_status: i32,
    offline_progress: i32,
    owner: usize,
}

#[derive(Debug, Clone)]
struct Entry {
    tag: i32,
    playlist: usize,
    folder_id: u64,
    folder_name: String,
}

#[derive(Debug, Clone)]
struct ContainerState {
    loaded: bool,
    /// `None` models the service not having learned the index yet.
    entries: Option<Vec<Entry>>,
    owner: usize,
}

#[derive(Debug, Clone)]
struct UserState {
    uri: String,
    canonical_name: String,
    display_name: String,
    loaded: bool,
}

#[derive(Debug, Clone)]
struct SessionState {
    container: usize,
    user: usize,
}

#[derive(Debug, Clone)]
enum Kind {
    Session(SessionState),
    Playlist(PlaylistState),
    Container(ContainerState),
    User(UserState),
    Image { loaded: bool, data: Vec<u8> },
    Link { uri: String, target: LinkTarget },
}

#[derive(Debug, Clone, Copy)]
enum LinkTarget {
    Playlist(usize),
    User(usize),
}

#[derive(Debug)]
struct Object {
    refs: u32,
    kind: Kind,
}

impl Kind {
    /// Ids this object holds its own references on.
    fn retained_ids(&self) -> Vec<usize> {
        match self {
            Kind::Session(s) => [s.container, s.user].into_iter().filter(|&id| id != 0).collect(),
            Kind::Playlist(p) => {
                if p.owner != 0 {
                    vec![p.owner]
                } else {
                    Vec::new()
                }
            }
            Kind::Container(c) => {
                let mut ids: Vec<usize> = c
                    .entries
                    .iter()
                    .flatten()
                    .filter(|e| e.playlist != 0)
                    .map(|e| e.playlist)
                    .collect();
                if c.owner != 0 {
                    ids.push(c.owner);
                }
                ids
            }
            Kind::User(_) | Kind::Image { .. } | Kind::Link { .. } => Vec::new(),
        }
    }
}

#[derive(Default)]
struct State {
    next_id: usize,
    objects: HashMap<usize, Object>,
    uris: HashMap<String, LinkTarget>,
    images: HashMap<[u8; IMAGE_ID_LEN], Vec<u8>>,
    callbacks: Vec<Arc<dyn SessionCallbacks>>,
    fail_next: Option<RawStatus>,
}

impl State {
    fn insert(&mut self, kind: Kind) -> usize {
        self.next_id += 1;
        let id = self.next_id;
        self.objects.insert(id, Object { refs: 1, kind });
        id
    }

    fn add_ref(&mut self, id: usize) {
        match self.objects.get_mut(&id) {
            Some(obj) => obj.refs += 1,
            None => panic!("add_ref on freed object {id:#x}"),
        }
    }

    fn release(&mut self, id: usize) {
        let freed = {
            let obj = self
                .objects
                .get_mut(&id)
                .unwrap_or_else(|| panic!("release on freed object {id:#x}"));
            obj.refs -= 1;
            obj.refs == 0
        };
        if freed {
            trace!(id, "shim object freed");
            if let Some(obj) = self.objects.remove(&id) {
                for child in obj.kind.retained_ids() {
                    self.release(child);
                }
            }
        }
    }

    fn playlist(&self, id: usize) -> &PlaylistState {
        match self.objects.get(&id).map(|o| &o.kind) {
            Some(Kind::Playlist(p)) => p,
            _ => panic!("{id:#x} is not a live playlist"),
        }
    }

    fn playlist_mut(&mut self, id: usize) -> &mut PlaylistState {
        match self.objects.get_mut(&id).map(|o| &mut o.kind) {
            Some(Kind::Playlist(p)) => p,
            _ => panic!("{id:#x} is not a live playlist"),
        }
    }

    fn container(&self, id: usize) -> &ContainerState {
        match self.objects.get(&id).map(|o| &o.kind) {
            Some(Kind::Container(c)) => c,
            _ => panic!("{id:#x} is not a live container"),
        }
    }

    fn container_mut(&mut self, id: usize) -> &mut ContainerState {
        match self.objects.get_mut(&id).map(|o| &mut o.kind) {
            Some(Kind::Container(c)) => c,
            _ => panic!("{id:#x} is not a live container"),
        }
    }

    fn user(&self, id: usize) -> &UserState {
        match self.objects.get(&id).map(|o| &o.kind) {
            Some(Kind::User(u)) => u,
            _ => panic!("{id:#x} is not a live user"),
        }
    }

    fn session(&self, id: usize) -> &SessionState {
        match self.objects.get(&id).map(|o| &o.kind) {
            Some(Kind::Session(s)) => s,
            _ => panic!("{id:#x} is not a live session"),
        }
    }

    fn entry(&self, container: usize, index: usize) -> &Entry {
        let entries = self
            .container(container)
            .entries
            .as_ref()
            .unwrap_or_else(|| panic!("container {container:#x} has no index yet"));
        entries
            .get(index)
            .unwrap_or_else(|| panic!("entry index {index} out of bounds"))
    }

    fn take_injected(&mut self) -> Option<RawStatus> {
        self.fail_next.take()
    }
}

/// The in-memory service. Share it as `Arc<InMemoryMediaService>`; all
/// state sits behind one lock and every entry point is callable from any
/// thread.
#[derive(Default)]
pub struct InMemoryMediaService {
    state: Mutex<State>,
}

impl InMemoryMediaService {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Fires `metadata_updated` on every registered callback set.
    pub fn fire_metadata_updated(&self) {
        let callbacks: Vec<_> = self.state.lock().callbacks.clone();
        for cb in callbacks {
            cb.metadata_updated();
        }
    }

    /// Makes the next mutating call return `status` instead of succeeding.
    pub fn fail_next_call(&self, status: RawStatus) {
        self.state.lock().fail_next = Some(status);
    }

    /// Current native reference count; zero once the object is freed.
    pub fn refcount<K>(&self, r: ObjRef<K>) -> u32 {
        self.state
            .lock()
            .objects
            .get(&r.addr())
            .map(|o| o.refs)
            .unwrap_or(0)
    }

    /// Number of live native objects of any category.
    pub fn live_objects(&self) -> usize {
        self.state.lock().objects.len()
    }

    // ── Authoring: playlists ────────────────────────────────────────────

    /// Registers a playlist under `uri`. Owned reference (count 1).
    pub fn create_playlist(&self, uri: &str, name: &str) -> PlaylistRef {
        let mut state = self.state.lock();
        let id = state.insert(Kind::Playlist(PlaylistState {
            uri: uri.to_owned(),
            name: name.to_owned(),
            loaded: false,
            collaborative: false,
            autolink: false,
            description: None,
            image_id: None,
            pending_changes: false,
            in_ram: false,
            offline_mode: false,
            offline_status: offline_status::NO,
            offline_progress: 0,
            owner: 0,
        }));
        state.uris.insert(uri.to_owned(), LinkTarget::Playlist(id));
        mint(id)
    }

    pub fn set_playlist_loaded(&self, playlist: PlaylistRef, loaded: bool) {
        self.set_playlist_loaded_silent(playlist, loaded);
        self.fire_metadata_updated();
    }

    /// Flips the loaded flag without firing callbacks, for modeling
    /// batched updates delivered under a single notification.
    pub fn set_playlist_loaded_silent(&self, playlist: PlaylistRef, loaded: bool) {
        self.state.lock().playlist_mut(playlist.addr()).loaded = loaded;
    }

    pub fn set_playlist_owner(&self, playlist: PlaylistRef, owner: UserRef) {
        let mut state = self.state.lock();
        state.add_ref(owner.addr());
        let previous = std::mem::replace(&mut state.playlist_mut(playlist.addr()).owner, owner.addr());
        if previous != 0 {
            state.release(previous);
        }
    }

    pub fn set_playlist_description(&self, playlist: PlaylistRef, description: Option<&str>) {
        self.state.lock().playlist_mut(playlist.addr()).description =
            description.map(str::to_owned);
    }

    /// Associates an image id with the playlist; pair with
    /// [`register_image`](Self::register_image).
    pub fn set_playlist_image(&self, playlist: PlaylistRef, image_id: [u8; IMAGE_ID_LEN]) {
        self.state.lock().playlist_mut(playlist.addr()).image_id = Some(image_id);
    }

    pub fn set_playlist_pending_changes(&self, playlist: PlaylistRef, pending: bool) {
        self.state.lock().playlist_mut(playlist.addr()).pending_changes = pending;
    }

    pub fn set_playlist_offline_status(&self, playlist: PlaylistRef, raw: i32) {
        self.state.lock().playlist_mut(playlist.addr()).offline_status = raw;
    }

    pub fn set_playlist_offline_progress(&self, playlist: PlaylistRef, percent: i32) {
        self.state.lock().playlist_mut(playlist.addr()).offline_progress = percent;
    }

    // ── Authoring: containers ───────────────────────────────────────────

    /// An empty container with a loaded (zero-length) index. Owned.
    pub fn create_container(&self) -> ContainerRef {
        let id = self.state.lock().insert(Kind::Container(ContainerState {
            loaded: false,
            entries: Some(Vec::new()),
            owner: 0,
        }));
        mint(id)
    }

    /// A container still reporting the unknown-length sentinel. Owned.
    pub fn create_container_unknown_length(&self) -> ContainerRef {
        let id = self.state.lock().insert(Kind::Container(ContainerState {
            loaded: false,
            entries: None,
            owner: 0,
        }));
        mint(id)
    }

    pub fn set_container_loaded(&self, container: ContainerRef, loaded: bool) {
        self.state.lock().container_mut(container.addr()).loaded = loaded;
        self.fire_metadata_updated();
    }

    pub fn set_container_owner(&self, container: ContainerRef, owner: UserRef) {
        let mut state = self.state.lock();
        state.add_ref(owner.addr());
        let previous = std::mem::replace(&mut state.container_mut(container.addr()).owner, owner.addr());
        if previous != 0 {
            state.release(previous);
        }
    }

    /// Appends a playlist entry; the container retains its own reference.
    pub fn push_playlist_entry(&self, container: ContainerRef, playlist: PlaylistRef) {
        let mut state = self.state.lock();
        state.add_ref(playlist.addr());
        self.push_entry_locked(
            &mut state,
            container,
            Entry {
                tag: service_traits::codes::tag::PLAYLIST,
                playlist: playlist.addr(),
                folder_id: 0,
                folder_name: String::new(),
            },
        );
    }

    pub fn push_folder_start(&self, container: ContainerRef, id: u64, name: &str) {
        let mut state = self.state.lock();
        self.push_entry_locked(
            &mut state,
            container,
            Entry {
                tag: service_traits::codes::tag::START_FOLDER,
                playlist: 0,
                folder_id: id,
                folder_name: name.to_owned(),
            },
        );
    }

    /// End markers usually carry an empty name; pass one to model a
    /// service that reports the name on both boundaries.
    pub fn push_folder_end(&self, container: ContainerRef, id: u64, name: &str) {
        let mut state = self.state.lock();
        self.push_entry_locked(
            &mut state,
            container,
            Entry {
                tag: service_traits::codes::tag::END_FOLDER,
                playlist: 0,
                folder_id: id,
                folder_name: name.to_owned(),
            },
        );
    }

    /// Appends an entry with the placeholder tag the client cannot decode.
    pub fn push_placeholder_entry(&self, container: ContainerRef) {
        let mut state = self.state.lock();
        self.push_entry_locked(
            &mut state,
            container,
            Entry {
                tag: service_traits::codes::tag::PLACEHOLDER,
                playlist: 0,
                folder_id: 0,
                folder_name: String::new(),
            },
        );
    }

    fn push_entry_locked(&self, state: &mut State, container: ContainerRef, entry: Entry) {
        state
            .container_mut(container.addr())
            .entries
            .get_or_insert_with(Vec::new)
            .push(entry);
    }

    // ── Authoring: users, images, sessions ──────────────────────────────

    /// Registers a user under `uri`. Owned.
    pub fn create_user(&self, uri: &str, canonical_name: &str, display_name: &str) -> UserRef {
        let mut state = self.state.lock();
        let id = state.insert(Kind::User(UserState {
            uri: uri.to_owned(),
            canonical_name: canonical_name.to_owned(),
            display_name: display_name.to_owned(),
            loaded: false,
        }));
        state.uris.insert(uri.to_owned(), LinkTarget::User(id));
        mint(id)
    }

    pub fn set_user_loaded(&self, user: UserRef, loaded: bool) {
        match self.state.lock().objects.get_mut(&user.addr()).map(|o| &mut o.kind) {
            Some(Kind::User(u)) => u.loaded = loaded,
            _ => panic!("{:#x} is not a live user", user.addr()),
        }
        self.fire_metadata_updated();
    }

    /// Registers image bytes under a fixed-length id so that
    /// `image_create` can find them.
    pub fn register_image(&self, image_id: [u8; IMAGE_ID_LEN], data: Vec<u8>) {
        self.state.lock().images.insert(image_id, data);
    }

    /// Wires a session's root container; the session retains a reference.
    pub fn attach_session_container(&self, session: SessionRef, container: ContainerRef) {
        let mut state = self.state.lock();
        state.add_ref(container.addr());
        match state.objects.get_mut(&session.addr()).map(|o| &mut o.kind) {
            Some(Kind::Session(s)) => s.container = container.addr(),
            _ => panic!("{:#x} is not a live session", session.addr()),
        }
    }

    /// Wires a session's signed-in user; the session retains a reference.
    pub fn attach_session_user(&self, session: SessionRef, user: UserRef) {
        let mut state = self.state.lock();
        state.add_ref(user.addr());
        match state.objects.get_mut(&session.addr()).map(|o| &mut o.kind) {
            Some(Kind::Session(s)) => s.user = user.addr(),
            _ => panic!("{:#x} is not a live session", session.addr()),
        }
    }
}

impl MediaService for InMemoryMediaService {
    fn status_message(&self, code: i32) -> String {
        use service_traits::codes::status;
        let text = match code {
            status::OK => "no error",
            status::BAD_API_VERSION => "client uses an unsupported API version",
            status::INIT_FAILED => "service initialization failed",
            status::INVALID_ARGUMENT => "invalid argument",
            status::PERMISSION_DENIED => "permission denied",
            status::NETWORK_DISABLED => "network disabled",
            status::SERVICE_UNAVAILABLE => "service unavailable",
            status::OTHER_TRANSIENT => "transient failure",
            status::OTHER_PERMANENT => "permanent failure",
            status::IS_LOADING => "object still loading",
            status::NO_CREDENTIALS => "no credentials stored",
            status::RATE_LIMITED => "rate limited",
            status::NO_SUCH_OBJECT => "no such object",
            status::READ_ONLY => "object is read-only",
            status::SYSTEM_FAILURE => "system failure",
            _ => return format!("unrecognized status code {code}"),
        };
        text.to_owned()
    }

    fn session_create(
        &self,
        _cache_location: &str,
        _user_agent: &str,
    ) -> Result<SessionRef, RawStatus> {
        let mut state = self.state.lock();
        if let Some(status) = state.take_injected() {
            return Err(status);
        }
        let id = state.insert(Kind::Session(SessionState {
            container: 0,
            user: 0,
        }));
        Ok(mint(id))
    }

    fn session_release(&self, session: SessionRef) {
        self.state.lock().release(session.addr());
    }

    fn session_set_callbacks(&self, _session: SessionRef, callbacks: Arc<dyn SessionCallbacks>) {
        self.state.lock().callbacks.push(callbacks);
    }

    fn session_playlist_container(&self, session: SessionRef) -> Option<ContainerRef> {
        let state = self.state.lock();
        match state.session(session.addr()).container {
            0 => None,
            id => Some(mint(id)),
        }
    }

    fn session_user(&self, session: SessionRef) -> Option<UserRef> {
        let state = self.state.lock();
        match state.session(session.addr()).user {
            0 => None,
            id => Some(mint(id)),
        }
    }

    fn playlist_add_ref(&self, playlist: PlaylistRef) {
        self.state.lock().add_ref(playlist.addr());
    }

    fn playlist_release(&self, playlist: PlaylistRef) {
        self.state.lock().release(playlist.addr());
    }

    fn playlist_is_loaded(&self, playlist: PlaylistRef) -> bool {
        self.state.lock().playlist(playlist.addr()).loaded
    }

    fn playlist_name(&self, playlist: PlaylistRef) -> String {
        let state = self.state.lock();
        let p = state.playlist(playlist.addr());
        if p.loaded {
            p.name.clone()
        } else {
            String::new()
        }
    }

    fn playlist_rename(&self, playlist: PlaylistRef, name: &str) -> RawStatus {
        {
            let mut state = self.state.lock();
            if let Some(status) = state.take_injected() {
                return status;
            }
            let p = state.playlist_mut(playlist.addr());
            p.name = name.to_owned();
            p.pending_changes = true;
        }
        self.fire_metadata_updated();
        RawStatus::OK
    }

    fn playlist_owner(&self, playlist: PlaylistRef) -> Option<UserRef> {
        match self.state.lock().playlist(playlist.addr()).owner {
            0 => None,
            id => Some(mint(id)),
        }
    }

    fn playlist_is_collaborative(&self, playlist: PlaylistRef) -> bool {
        self.state.lock().playlist(playlist.addr()).collaborative
    }

    fn playlist_set_collaborative(&self, playlist: PlaylistRef, collaborative: bool) -> RawStatus {
        let mut state = self.state.lock();
        if let Some(status) = state.take_injected() {
            return status;
        }
        state.playlist_mut(playlist.addr()).collaborative = collaborative;
        RawStatus::OK
    }

    fn playlist_set_autolink(&self, playlist: PlaylistRef, autolink: bool) -> RawStatus {
        let mut state = self.state.lock();
        if let Some(status) = state.take_injected() {
            return status;
        }
        state.playlist_mut(playlist.addr()).autolink = autolink;
        RawStatus::OK
    }

    fn playlist_description(&self, playlist: PlaylistRef) -> Option<String> {
        self.state.lock().playlist(playlist.addr()).description.clone()
    }

    fn playlist_image_id(&self, playlist: PlaylistRef, image_id: &mut [u8; IMAGE_ID_LEN]) -> bool {
        match self.state.lock().playlist(playlist.addr()).image_id {
            Some(id) => {
                image_id.copy_from_slice(&id);
                true
            }
            None => false,
        }
    }

    fn playlist_has_pending_changes(&self, playlist: PlaylistRef) -> bool {
        self.state.lock().playlist(playlist.addr()).pending_changes
    }

    fn playlist_is_in_ram(&self, _session: SessionRef, playlist: PlaylistRef) -> bool {
        self.state.lock().playlist(playlist.addr()).in_ram
    }

    fn playlist_set_in_ram(
        &self,
        _session: SessionRef,
        playlist: PlaylistRef,
        in_ram: bool,
    ) -> RawStatus {
        let mut state = self.state.lock();
        if let Some(status) = state.take_injected() {
            return status;
        }
        state.playlist_mut(playlist.addr()).in_ram = in_ram;
        RawStatus::OK
    }

    fn playlist_set_offline_mode(
        &self,
        _session: SessionRef,
        playlist: PlaylistRef,
        offline: bool,
    ) -> RawStatus {
        let mut state = self.state.lock();
        if let Some(status) = state.take_injected() {
            return status;
        }
        let p = state.playlist_mut(playlist.addr());
        p.offline_mode = offline;
        p.offline_status = if offline {
            offline_status::WAITING
        } else {
            offline_status::NO
        };
        RawStatus::OK
    }

    fn playlist_offline_status(&self, _session: SessionRef, playlist: PlaylistRef) -> i32 {
        self.state.lock().playlist(playlist.addr()).offline_status
    }

    fn playlist_offline_download_completed(
        &self,
        _session: SessionRef,
        playlist: PlaylistRef,
    ) -> i32 {
        self.state.lock().playlist(playlist.addr()).offline_progress
    }

    fn container_add_ref(&self, container: ContainerRef) {
        self.state.lock().add_ref(container.addr());
    }

    fn container_release(&self, container: ContainerRef) {
        self.state.lock().release(container.addr());
    }

    fn container_is_loaded(&self, container: ContainerRef) -> bool {
        self.state.lock().container(container.addr()).loaded
    }

    fn container_len(&self, container: ContainerRef) -> i32 {
        match &self.state.lock().container(container.addr()).entries {
            Some(entries) => entries.len() as i32,
            None => LENGTH_UNKNOWN,
        }
    }

    fn container_entry_type(&self, container: ContainerRef, index: usize) -> i32 {
        self.state.lock().entry(container.addr(), index).tag
    }

    fn container_playlist(&self, container: ContainerRef, index: usize) -> Option<PlaylistRef> {
        match self.state.lock().entry(container.addr(), index).playlist {
            0 => None,
            id => Some(mint(id)),
        }
    }

    fn container_folder_id(&self, container: ContainerRef, index: usize) -> u64 {
        self.state.lock().entry(container.addr(), index).folder_id
    }

    fn container_folder_name(
        &self,
        container: ContainerRef,
        index: usize,
        buffer: &mut [u8],
    ) -> RawStatus {
        let state = self.state.lock();
        let name = &state.entry(container.addr(), index).folder_name;
        write_fixed_buffer(buffer, name);
        RawStatus::OK
    }

    fn container_owner(&self, container: ContainerRef) -> Option<UserRef> {
        match self.state.lock().container(container.addr()).owner {
            0 => None,
            id => Some(mint(id)),
        }
    }

    fn user_add_ref(&self, user: UserRef) {
        self.state.lock().add_ref(user.addr());
    }

    fn user_release(&self, user: UserRef) {
        self.state.lock().release(user.addr());
    }

    fn user_is_loaded(&self, user: UserRef) -> bool {
        self.state.lock().user(user.addr()).loaded
    }

    fn user_canonical_name(&self, user: UserRef) -> String {
        self.state.lock().user(user.addr()).canonical_name.clone()
    }

    fn user_display_name(&self, user: UserRef) -> String {
        let state = self.state.lock();
        let u = state.user(user.addr());
        if u.loaded && !u.display_name.is_empty() {
            u.display_name.clone()
        } else {
            u.canonical_name.clone()
        }
    }

    fn image_create(
        &self,
        _session: SessionRef,
        image_id: &[u8; IMAGE_ID_LEN],
    ) -> Option<ImageRef> {
        let mut state = self.state.lock();
        let data = state.images.get(image_id)?.clone();
        let id = state.insert(Kind::Image { loaded: true, data });
        Some(mint(id))
    }

    fn image_add_ref(&self, image: ImageRef) {
        self.state.lock().add_ref(image.addr());
    }

    fn image_release(&self, image: ImageRef) {
        self.state.lock().release(image.addr());
    }

    fn image_is_loaded(&self, image: ImageRef) -> bool {
        match self.state.lock().objects.get(&image.addr()).map(|o| &o.kind) {
            Some(Kind::Image { loaded, .. }) => *loaded,
            _ => panic!("{:#x} is not a live image", image.addr()),
        }
    }

    fn image_data(&self, image: ImageRef) -> Vec<u8> {
        match self.state.lock().objects.get(&image.addr()).map(|o| &o.kind) {
            Some(Kind::Image { data, .. }) => data.clone(),
            _ => panic!("{:#x} is not a live image", image.addr()),
        }
    }

    fn link_create_from_string(&self, uri: &str) -> Option<LinkRef> {
        let mut state = self.state.lock();
        let target = *state.uris.get(uri)?;
        let id = state.insert(Kind::Link {
            uri: uri.to_owned(),
            target,
        });
        Some(mint(id))
    }

    fn link_add_ref(&self, link: LinkRef) {
        self.state.lock().add_ref(link.addr());
    }

    fn link_release(&self, link: LinkRef) {
        self.state.lock().release(link.addr());
    }

    fn link_as_string(&self, link: LinkRef) -> String {
        match self.state.lock().objects.get(&link.addr()).map(|o| &o.kind) {
            Some(Kind::Link { uri, .. }) => uri.clone(),
            _ => panic!("{:#x} is not a live link", link.addr()),
        }
    }

    fn link_as_playlist(&self, link: LinkRef) -> Option<PlaylistRef> {
        let state = self.state.lock();
        match state.objects.get(&link.addr()).map(|o| &o.kind) {
            Some(Kind::Link {
                target: LinkTarget::Playlist(id),
                ..
            }) if state.objects.contains_key(id) => Some(mint(*id)),
            Some(Kind::Link { .. }) => None,
            _ => panic!("{:#x} is not a live link", link.addr()),
        }
    }

    fn link_as_user(&self, link: LinkRef) -> Option<UserRef> {
        let state = self.state.lock();
        match state.objects.get(&link.addr()).map(|o| &o.kind) {
            Some(Kind::Link {
                target: LinkTarget::User(id),
                ..
            }) if state.objects.contains_key(id) => Some(mint(*id)),
            Some(Kind::Link { .. }) => None,
            _ => panic!("{:#x} is not a live link", link.addr()),
        }
    }

    fn link_from_playlist(&self, playlist: PlaylistRef) -> Option<LinkRef> {
        let mut state = self.state.lock();
        let p = state.playlist(playlist.addr());
        // an unloaded playlist is not linkable yet
        if !p.loaded {
            return None;
        }
        let uri = p.uri.clone();
        let id = state.insert(Kind::Link {
            uri,
            target: LinkTarget::Playlist(playlist.addr()),
        });
        Some(mint(id))
    }

    fn link_from_user(&self, user: UserRef) -> Option<LinkRef> {
        let mut state = self.state.lock();
        let uri = state.user(user.addr()).uri.clone();
        let id = state.insert(Kind::Link {
            uri,
            target: LinkTarget::User(user.addr()),
        });
        Some(mint(id))
    }
}

/// Writes `name` NUL-terminated into `buffer`, truncating to fit.
fn write_fixed_buffer(buffer: &mut [u8], name: &str) {
    if buffer.is_empty() {
        return;
    }
    let max = buffer.len() - 1;
    let bytes = name.as_bytes();
    let n = bytes.len().min(max);
    buffer[..n].copy_from_slice(&bytes[..n]);
    buffer[n] = 0;
}
