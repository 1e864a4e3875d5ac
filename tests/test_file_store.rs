use chrono::NaiveDate;
use std::path::PathBuf;

use simrace_booking::domain::id::{ReservationId, ResourceId, UserId};
use simrace_booking::domain::reservation::{Reservation, ReservationPatch, ReservationStatus};
use simrace_booking::domain::store::{JsonFileStore, ReservationStore};

fn scratch_path() -> PathBuf {
    std::env::temp_dir().join(format!("simrace-booking-test-{}.json", uuid::Uuid::new_v4()))
}

fn reservation(start_minutes: i64) -> Reservation {
    Reservation {
        id: ReservationId::generate(),
        resource_id: ResourceId::new("sim-01"),
        user_id: UserId::new("driver-1"),
        date: NaiveDate::from_ymd_opt(2026, 8, 24).unwrap(),
        start_minutes,
        duration_minutes: 60,
        status: ReservationStatus::Confirmed,
        participants: 1,
        price: 25.0,
    }
}

#[test]
fn a_missing_store_file_starts_empty() {
    let path = scratch_path();

    let store = JsonFileStore::open(&path).expect("open on a missing file");
    assert!(store.list(None, None).unwrap().is_empty());

    let _ = std::fs::remove_file(&path);
}

#[test]
fn appended_reservations_survive_a_reopen() {
    let path = scratch_path();
    let booked = reservation(18 * 60);
    let id = booked.id;

    {
        let store = JsonFileStore::open(&path).expect("open");
        store.append(booked).expect("append must persist before returning");
    }

    let reopened = JsonFileStore::open(&path).expect("reopen");
    let listed = reopened.list(None, None).unwrap();

    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, id);
    assert_eq!(listed[0].start_minutes, 18 * 60);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn the_rewrite_leaves_no_scratch_file_behind() {
    let path = scratch_path();

    let store = JsonFileStore::open(&path).expect("open");
    store.append(reservation(18 * 60)).expect("append");

    assert!(path.exists());
    assert!(!path.with_extension("json.tmp").exists());

    let _ = std::fs::remove_file(&path);
}

#[test]
fn a_failed_persist_rolls_a_fresh_append_back() {
    let path = scratch_path();

    let store = JsonFileStore::open(&path).expect("open");

    // A directory at the store path makes the rewrite fail
    std::fs::create_dir_all(&path).expect("block the store path");

    assert!(store.append(reservation(18 * 60)).is_err());
    assert!(store.list(None, None).unwrap().is_empty(), "A booking that never became durable must not stay cached.");

    let _ = std::fs::remove_dir_all(&path);
    let _ = std::fs::remove_file(path.with_extension("json.tmp"));
}

#[test]
fn a_failed_persist_leaves_updates_unapplied() {
    let path = scratch_path();
    let booked = reservation(18 * 60);
    let id = booked.id;

    let store = JsonFileStore::open(&path).expect("open");
    store.append(booked).expect("append");

    std::fs::remove_file(&path).expect("unblock");
    std::fs::create_dir_all(&path).expect("block the store path");

    assert!(store.update(id, ReservationPatch::set_status(ReservationStatus::Cancelled)).is_err());
    assert_eq!(store.get(id).unwrap().unwrap().status, ReservationStatus::Confirmed);

    let _ = std::fs::remove_dir_all(&path);
    let _ = std::fs::remove_file(path.with_extension("json.tmp"));
}

#[test]
fn soft_cancel_survives_a_reopen() {
    let path = scratch_path();
    let booked = reservation(18 * 60);
    let id = booked.id;

    {
        let store = JsonFileStore::open(&path).expect("open");
        store.append(booked).expect("append");
        store.update(id, ReservationPatch::set_status(ReservationStatus::Cancelled)).expect("update");
    }

    let reopened = JsonFileStore::open(&path).expect("reopen");

    // Soft-cancel: the record is kept with cancelled status
    assert_eq!(reopened.get(id).unwrap().unwrap().status, ReservationStatus::Cancelled);

    let _ = std::fs::remove_file(&path);
}
