//! Load waits against the callback-driven notifier.

use std::sync::Arc;
use std::time::{Duration, Instant};

use client_core::{Error, Session, SessionConfig};
use service_shims::InMemoryMediaService;

fn connect(shim: &Arc<InMemoryMediaService>) -> Session {
    client_core::logging::try_init("warn");
    Session::connect(shim.clone(), &SessionConfig::default()).unwrap()
}

#[test]
fn load_returns_immediately_when_already_loaded() {
    let shim = InMemoryMediaService::new();
    let session = connect(&shim);

    let raw = shim.create_playlist("media:playlist:a", "A");
    shim.set_playlist_loaded_silent(raw, true);

    let playlist = session.playlist("media:playlist:a").unwrap();
    let started = Instant::now();
    playlist.load(Some(Duration::from_secs(5))).unwrap();
    assert!(started.elapsed() < Duration::from_secs(1));
}

#[test]
fn load_times_out_with_the_requested_budget() {
    let shim = InMemoryMediaService::new();
    let session = connect(&shim);

    shim.create_playlist("media:playlist:a", "A");
    let playlist = session.playlist("media:playlist:a").unwrap();

    let budget = Duration::from_millis(100);
    let started = Instant::now();
    let err = playlist.load(Some(budget)).unwrap_err();
    assert!(started.elapsed() >= budget);
    assert!(started.elapsed() < Duration::from_secs(2));
    match err {
        Error::LoadTimeout { waited } => assert_eq!(waited, budget),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn load_wakes_when_another_thread_finishes_the_load() {
    let shim = InMemoryMediaService::new();
    let session = connect(&shim);

    let raw = shim.create_playlist("media:playlist:a", "A");
    let playlist = session.playlist("media:playlist:a").unwrap();

    let loader = {
        let shim = Arc::clone(&shim);
        std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(50));
            shim.set_playlist_loaded(raw, true);
        })
    };

    playlist.load(Some(Duration::from_secs(5))).unwrap();
    assert!(playlist.is_loaded());
    loader.join().unwrap();
}

#[test]
fn one_notification_wakes_every_pending_load() {
    let shim = InMemoryMediaService::new();
    let session = connect(&shim);

    let raw_a = shim.create_playlist("media:playlist:a", "A");
    let raw_b = shim.create_playlist("media:playlist:b", "B");
    let a = session.playlist("media:playlist:a").unwrap();
    let b = session.playlist("media:playlist:b").unwrap();

    let waiters: Vec<_> = [a, b]
        .into_iter()
        .map(|playlist| {
            std::thread::spawn(move || playlist.load(Some(Duration::from_secs(5))).map(|_| ()))
        })
        .collect();

    std::thread::sleep(Duration::from_millis(50));
    shim.set_playlist_loaded_silent(raw_a, true);
    shim.set_playlist_loaded_silent(raw_b, true);
    shim.fire_metadata_updated();

    for waiter in waiters {
        waiter.join().unwrap().unwrap();
    }
}

#[test]
fn unrelated_notifications_do_not_reset_the_deadline() {
    let shim = InMemoryMediaService::new();
    let session = connect(&shim);

    shim.create_playlist("media:playlist:a", "A");
    let playlist = session.playlist("media:playlist:a").unwrap();

    let noise = {
        let shim = Arc::clone(&shim);
        std::thread::spawn(move || {
            for _ in 0..20 {
                std::thread::sleep(Duration::from_millis(10));
                shim.fire_metadata_updated();
            }
        })
    };

    let started = Instant::now();
    let err = playlist.load(Some(Duration::from_millis(60))).unwrap_err();
    assert!(matches!(err, Error::LoadTimeout { .. }));
    assert!(started.elapsed() < Duration::from_millis(250));
    noise.join().unwrap();
}
