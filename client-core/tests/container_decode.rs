//! Decoding the root container's tagged entry list.

use std::sync::Arc;

use client_core::{
    BoundaryKind, ContainerEntry, Error, PlaylistContainer, Session, SessionConfig,
    FOLDER_NAME_CAPACITY,
};
use service_shims::InMemoryMediaService;
use service_traits::refs::ContainerRef;

fn connect(shim: &Arc<InMemoryMediaService>) -> Session {
    Session::connect(shim.clone(), &SessionConfig::default()).unwrap()
}

fn root_container(
    shim: &Arc<InMemoryMediaService>,
    session: &Session,
    raw: ContainerRef,
) -> PlaylistContainer {
    shim.attach_session_container(session.raw(), raw);
    session.playlist_container().unwrap()
}

#[test]
fn mixed_entries_decode_by_tag() {
    let shim = InMemoryMediaService::new();
    let session = connect(&shim);

    let rock = shim.create_playlist("media:playlist:rock", "Rock Anthems");
    shim.set_playlist_loaded_silent(rock, true);
    let jazz = shim.create_playlist("media:playlist:jazz", "Jazz");
    shim.set_playlist_loaded_silent(jazz, true);

    let raw = shim.create_container();
    shim.push_playlist_entry(raw, rock);
    shim.push_folder_start(raw, 7, "Favorites");
    shim.push_playlist_entry(raw, jazz);
    shim.push_folder_end(raw, 7, "");

    let container = root_container(&shim, &session, raw);
    assert_eq!(container.len(), 4);
    assert!(!container.is_empty());

    match container.entry(0).unwrap() {
        ContainerEntry::Playlist(p) => assert_eq!(p.name().as_deref(), Some("Rock Anthems")),
        other => panic!("expected playlist, got {other:?}"),
    }
    match container.entry(1).unwrap() {
        ContainerEntry::Folder(folder) => {
            assert_eq!(folder.id, 7);
            assert_eq!(folder.name, "Favorites");
            assert_eq!(folder.kind, BoundaryKind::Start);
        }
        other => panic!("expected folder start, got {other:?}"),
    }
    match container.entry(2).unwrap() {
        ContainerEntry::Playlist(p) => assert_eq!(p.name().as_deref(), Some("Jazz")),
        other => panic!("expected playlist, got {other:?}"),
    }
    match container.entry(3).unwrap() {
        ContainerEntry::Folder(folder) => {
            assert_eq!(folder.id, 7);
            assert_eq!(folder.name, "");
            assert_eq!(folder.kind, BoundaryKind::End);
        }
        other => panic!("expected folder end, got {other:?}"),
    }
}

#[test]
fn decoded_playlists_outlive_the_container_view() {
    let shim = InMemoryMediaService::new();
    let session = connect(&shim);

    let rock = shim.create_playlist("media:playlist:rock", "Rock");
    let raw = shim.create_container();
    shim.push_playlist_entry(raw, rock);

    let container = root_container(&shim, &session, raw);
    let entry = container.entry(0).unwrap();
    // author + container entry + decoded view
    assert_eq!(shim.refcount(rock), 3);

    drop(container);
    assert_eq!(shim.refcount(rock), 3);

    match &entry {
        ContainerEntry::Playlist(p) => assert!(!p.is_loaded()),
        other => panic!("expected playlist, got {other:?}"),
    }
    drop(entry);
    assert_eq!(shim.refcount(rock), 2);
}

#[test]
fn out_of_range_indices_are_rejected() {
    let shim = InMemoryMediaService::new();
    let session = connect(&shim);

    let raw = shim.create_container();
    shim.push_playlist_entry(raw, shim.create_playlist("media:playlist:a", "A"));

    let container = root_container(&shim, &session, raw);
    match container.entry(5).unwrap_err() {
        Error::IndexOutOfRange { index, len } => {
            assert_eq!(index, 5);
            assert_eq!(len, 1);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn unknown_length_reads_as_empty() {
    let shim = InMemoryMediaService::new();
    let session = connect(&shim);

    let raw = shim.create_container_unknown_length();
    let container = root_container(&shim, &session, raw);

    assert_eq!(container.len(), 0);
    assert!(container.is_empty());
    assert!(matches!(
        container.entry(0),
        Err(Error::IndexOutOfRange { index: 0, len: 0 })
    ));
    assert_eq!(container.entries().count(), 0);
}

#[test]
fn overlong_folder_names_are_truncated() {
    let shim = InMemoryMediaService::new();
    let session = connect(&shim);

    let long_name = "n".repeat(FOLDER_NAME_CAPACITY + 50);
    let raw = shim.create_container();
    shim.push_folder_start(raw, 1, &long_name);

    let container = root_container(&shim, &session, raw);
    match container.entry(0).unwrap() {
        ContainerEntry::Folder(folder) => {
            assert_eq!(folder.name.len(), FOLDER_NAME_CAPACITY - 1);
            assert!(long_name.starts_with(&folder.name));
        }
        other => panic!("expected folder, got {other:?}"),
    }
}

#[test]
fn end_markers_report_the_name_the_service_gives_them() {
    let shim = InMemoryMediaService::new();
    let session = connect(&shim);

    let raw = shim.create_container();
    shim.push_folder_start(raw, 9, "Road Trips");
    shim.push_folder_end(raw, 9, "Road Trips");

    let container = root_container(&shim, &session, raw);
    match container.entry(1).unwrap() {
        ContainerEntry::Folder(folder) => {
            assert_eq!(folder.kind, BoundaryKind::End);
            assert_eq!(folder.id, 9);
            assert_eq!(folder.name, "Road Trips");
        }
        other => panic!("expected folder end, got {other:?}"),
    }
}

#[test]
fn undecodable_tags_surface_as_contract_violations() {
    let shim = InMemoryMediaService::new();
    let session = connect(&shim);

    let raw = shim.create_container();
    shim.push_placeholder_entry(raw);

    let container = root_container(&shim, &session, raw);
    match container.entry(0).unwrap_err() {
        Error::ContractViolation(message) => assert!(message.contains("tag")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn container_load_waits_for_the_index() {
    let shim = InMemoryMediaService::new();
    let session = connect(&shim);

    let raw = shim.create_container();
    let container = root_container(&shim, &session, raw);
    assert!(!container.is_loaded());

    let loader = {
        let shim = Arc::clone(&shim);
        std::thread::spawn(move || {
            std::thread::sleep(std::time::Duration::from_millis(30));
            shim.set_container_loaded(raw, true);
        })
    };

    container
        .load(Some(std::time::Duration::from_secs(5)))
        .unwrap();
    assert!(container.is_loaded());
    loader.join().unwrap();
}

#[test]
fn entries_iterates_front_to_back() {
    let shim = InMemoryMediaService::new();
    let session = connect(&shim);

    let raw = shim.create_container();
    shim.push_folder_start(raw, 1, "One");
    shim.push_folder_end(raw, 1, "");

    let container = root_container(&shim, &session, raw);
    let decoded: Vec<_> = container.entries().collect::<Result<_, _>>().unwrap();
    assert_eq!(decoded.len(), 2);
    match (&decoded[0], &decoded[1]) {
        (ContainerEntry::Folder(start), ContainerEntry::Folder(end)) => {
            assert_eq!(start.kind, BoundaryKind::Start);
            assert_eq!(end.kind, BoundaryKind::End);
        }
        other => panic!("expected two folder boundaries, got {other:?}"),
    }
}
