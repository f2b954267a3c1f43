//! Attribute access on playlists, users, and their collaborators.

use std::sync::Arc;

use client_core::{Error, Link, PlaylistOfflineStatus, Session, SessionConfig, Status};
use service_shims::InMemoryMediaService;
use service_traits::codes::{offline_status, status, RawStatus, IMAGE_ID_LEN};

fn connect(shim: &Arc<InMemoryMediaService>) -> Session {
    Session::connect(shim.clone(), &SessionConfig::default()).unwrap()
}

#[test]
fn name_is_none_until_loaded() {
    let shim = InMemoryMediaService::new();
    let session = connect(&shim);

    let raw = shim.create_playlist("media:playlist:a", "Morning Mix");
    let playlist = session.playlist("media:playlist:a").unwrap();
    assert_eq!(playlist.name(), None);

    shim.set_playlist_loaded_silent(raw, true);
    assert_eq!(playlist.name().as_deref(), Some("Morning Mix"));
}

#[test]
fn non_ascii_names_survive() {
    let shim = InMemoryMediaService::new();
    let session = connect(&shim);

    let raw = shim.create_playlist("media:playlist:a", "Grüße 日本語");
    shim.set_playlist_loaded_silent(raw, true);
    let playlist = session.playlist("media:playlist:a").unwrap();
    assert_eq!(playlist.name().as_deref(), Some("Grüße 日本語"));
}

#[test]
fn rename_updates_and_marks_pending() {
    let shim = InMemoryMediaService::new();
    let session = connect(&shim);

    let raw = shim.create_playlist("media:playlist:a", "Old");
    shim.set_playlist_loaded_silent(raw, true);
    let playlist = session.playlist("media:playlist:a").unwrap();

    assert!(!playlist.has_pending_changes());
    playlist.rename("New").unwrap();
    assert_eq!(playlist.name().as_deref(), Some("New"));
    assert!(playlist.has_pending_changes());
}

#[test]
fn rename_round_trips_multi_byte_names() {
    let shim = InMemoryMediaService::new();
    let session = connect(&shim);

    let raw = shim.create_playlist("media:playlist:a", "Plain");
    shim.set_playlist_loaded_silent(raw, true);
    let playlist = session.playlist("media:playlist:a").unwrap();

    playlist.rename("Grüße 日本語").unwrap();
    assert_eq!(playlist.name().as_deref(), Some("Grüße 日本語"));
}

#[test]
fn rename_fault_carries_status_and_message() {
    let shim = InMemoryMediaService::new();
    let session = connect(&shim);

    shim.create_playlist("media:playlist:a", "A");
    let playlist = session.playlist("media:playlist:a").unwrap();

    shim.fail_next_call(RawStatus(status::READ_ONLY));
    match playlist.rename("B").unwrap_err() {
        Error::Service { status, message } => {
            assert_eq!(status, Status::ReadOnly);
            assert_eq!(message, "object is read-only");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn collaborative_and_in_ram_round_trip() {
    let shim = InMemoryMediaService::new();
    let session = connect(&shim);

    shim.create_playlist("media:playlist:a", "A");
    let playlist = session.playlist("media:playlist:a").unwrap();

    assert!(!playlist.is_collaborative());
    playlist.set_collaborative(true).unwrap();
    assert!(playlist.is_collaborative());

    assert!(!playlist.is_in_ram());
    playlist.set_in_ram(true).unwrap();
    assert!(playlist.is_in_ram());

    playlist.set_autolink_tracks(true).unwrap();
}

#[test]
fn description_defaults_to_none() {
    let shim = InMemoryMediaService::new();
    let session = connect(&shim);

    let raw = shim.create_playlist("media:playlist:a", "A");
    let playlist = session.playlist("media:playlist:a").unwrap();
    assert_eq!(playlist.description(), None);

    shim.set_playlist_description(raw, Some("Late night drive"));
    assert_eq!(playlist.description().as_deref(), Some("Late night drive"));
}

#[test]
fn offline_progress_is_gated_on_downloading() {
    let shim = InMemoryMediaService::new();
    let session = connect(&shim);

    let raw = shim.create_playlist("media:playlist:a", "A");
    let playlist = session.playlist("media:playlist:a").unwrap();
    assert_eq!(playlist.offline_status().unwrap(), PlaylistOfflineStatus::No);
    assert_eq!(playlist.offline_download_completed().unwrap(), None);

    playlist.set_offline_mode(true).unwrap();
    assert_eq!(
        playlist.offline_status().unwrap(),
        PlaylistOfflineStatus::Waiting
    );
    assert_eq!(playlist.offline_download_completed().unwrap(), None);

    shim.set_playlist_offline_status(raw, offline_status::DOWNLOADING);
    shim.set_playlist_offline_progress(raw, 40);
    assert_eq!(
        playlist.offline_status().unwrap(),
        PlaylistOfflineStatus::Downloading
    );
    assert_eq!(playlist.offline_download_completed().unwrap(), Some(40));

    shim.set_playlist_offline_progress(raw, 150);
    assert_eq!(playlist.offline_download_completed().unwrap(), Some(100));
}

#[test]
fn unknown_offline_status_is_a_contract_violation() {
    let shim = InMemoryMediaService::new();
    let session = connect(&shim);

    let raw = shim.create_playlist("media:playlist:a", "A");
    shim.set_playlist_offline_status(raw, 42);
    let playlist = session.playlist("media:playlist:a").unwrap();
    assert!(matches!(
        playlist.offline_status(),
        Err(Error::ContractViolation(_))
    ));
}

#[test]
fn image_resolves_through_the_image_registry() {
    let shim = InMemoryMediaService::new();
    let session = connect(&shim);

    let raw = shim.create_playlist("media:playlist:a", "A");
    let playlist = session.playlist("media:playlist:a").unwrap();
    assert!(playlist.image().is_none());

    let image_id = [7u8; IMAGE_ID_LEN];
    shim.register_image(image_id, vec![0xff, 0xd8, 0xff]);
    shim.set_playlist_image(raw, image_id);

    let image = playlist.image().unwrap();
    assert!(image.is_loaded());
    assert_eq!(image.data(), vec![0xff, 0xd8, 0xff]);

    drop(image);
    // the playlist and its author hold the only remaining counts
    assert_eq!(shim.refcount(raw), 2);
}

#[test]
fn display_uses_the_link_uri_once_linkable() {
    let shim = InMemoryMediaService::new();
    let session = connect(&shim);

    let raw = shim.create_playlist("media:playlist:a", "A");
    let playlist = session.playlist("media:playlist:a").unwrap();
    assert_eq!(playlist.to_string(), "<unlinked playlist>");

    shim.set_playlist_loaded_silent(raw, true);
    assert_eq!(playlist.to_string(), "media:playlist:a");
    assert_eq!(playlist.link().unwrap().uri(), "media:playlist:a");
}

#[test]
fn owners_resolve_to_users() {
    let shim = InMemoryMediaService::new();
    let session = connect(&shim);

    let user_raw = shim.create_user("media:user:alice", "alice", "Alice A.");
    let playlist_raw = shim.create_playlist("media:playlist:a", "A");
    shim.set_playlist_owner(playlist_raw, user_raw);

    let playlist = session.playlist("media:playlist:a").unwrap();
    let owner = playlist.owner().unwrap();
    assert_eq!(owner.canonical_name(), "alice");
    // display falls back until the user loads
    assert_eq!(owner.display_name(), "alice");
    assert_eq!(owner.to_string(), "alice");

    shim.set_user_loaded(user_raw, true);
    assert_eq!(owner.display_name(), "Alice A.");
    assert_eq!(owner.link().unwrap().uri(), "media:user:alice");
}

#[test]
fn current_user_appears_after_login() {
    let shim = InMemoryMediaService::new();
    let session = connect(&shim);
    assert!(session.current_user().is_none());
    assert!(session.playlist_container().is_none());

    let user_raw = shim.create_user("media:user:alice", "alice", "Alice A.");
    shim.attach_session_user(session.raw(), user_raw);

    let user = session.current_user().unwrap();
    assert_eq!(user.canonical_name(), "alice");
}

#[test]
fn user_links_resolve_back_to_users() {
    let shim = InMemoryMediaService::new();
    let session = connect(&shim);
    shim.create_user("media:user:alice", "alice", "Alice A.");

    let link = Link::new(&session, "media:user:alice").unwrap();
    assert!(link.as_playlist().is_none());
    let user = link.as_user().unwrap();
    assert_eq!(user.canonical_name(), "alice");
}

#[test]
fn container_displays_through_its_owner() {
    let shim = InMemoryMediaService::new();
    let session = connect(&shim);

    let container_raw = shim.create_container();
    shim.attach_session_container(session.raw(), container_raw);
    let container = session.playlist_container().unwrap();
    assert_eq!(container.to_string(), "<unowned container>");
    assert!(container.owner().is_none());

    let user_raw = shim.create_user("media:user:alice", "alice", "Alice A.");
    shim.set_container_owner(container_raw, user_raw);
    let owner = container.owner().unwrap();
    assert_eq!(owner.canonical_name(), "alice");
    assert_eq!(container.to_string(), "container of media:user:alice");
}

#[test]
fn unknown_uris_fail_as_invalid_links() {
    let shim = InMemoryMediaService::new();
    let session = connect(&shim);
    match session.playlist("media:playlist:missing").unwrap_err() {
        Error::InvalidLink(uri) => assert_eq!(uri, "media:playlist:missing"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn user_uris_are_not_playlists() {
    let shim = InMemoryMediaService::new();
    let session = connect(&shim);
    shim.create_user("media:user:alice", "alice", "Alice A.");
    match session.playlist("media:user:alice").unwrap_err() {
        Error::InvalidLink(message) => assert!(message.contains("not a playlist URI")),
        other => panic!("unexpected error: {other:?}"),
    }
}
