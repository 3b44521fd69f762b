use chrono::NaiveDate;

use habit_core::NewHabit;
use habit_store::{HabitService, JsonFileStore};
use tempfile::tempdir;

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

#[tokio::test]
async fn seed_mutate_and_reload_through_real_files() {
    init_tracing();
    let dir = tempdir().expect("tempdir");
    let uid = "asli";

    {
        let service = HabitService::new(JsonFileStore::new(dir.path()));
        let habits = service.initialize(uid).await.expect("initialize");
        assert_eq!(habits.len(), 3);

        let habits = service
            .add_habit(
                uid,
                NewHabit::new("Kitap Okuma")
                    .icon("📚")
                    .starting(date(2024, 1, 1)),
            )
            .await
            .expect("add habit");
        let key = habits[3].key.clone();

        service
            .set_day(uid, &key, date(2024, 1, 1), true)
            .await
            .expect("mark day");
        service
            .set_day(uid, &key, date(2024, 1, 3), true)
            .await
            .expect("mark day");
    }

    // The seed and every mutation must have hit the disk.
    let registry_file = dir.path().join(uid).join("registry.json");
    let marks_file = dir.path().join(uid).join("marks.json");
    let raw = std::fs::read_to_string(&registry_file).expect("registry file");
    assert!(raw.contains("Kitap Okuma"));
    assert!(raw.contains("startDate"));
    assert!(std::fs::read_to_string(&marks_file)
        .expect("marks file")
        .contains("2024-01-01"));

    // A fresh service over the same directory resolves the persisted state.
    let service = HabitService::new(JsonFileStore::new(dir.path()));
    let habits = service.initialize(uid).await.expect("reload");
    assert_eq!(habits.len(), 4);
    let key = habits[3].key.clone();

    let stats = service
        .progress(uid, &key, date(2024, 1, 4))
        .await
        .expect("progress");
    assert_eq!(stats.window_len, 4);
    assert_eq!(stats.done, 2);
    assert_eq!(stats.percent, 50);
}

#[tokio::test]
async fn remove_leaves_no_trace_on_disk() {
    init_tracing();
    let dir = tempdir().expect("tempdir");
    let uid = "deniz";

    let service = HabitService::new(JsonFileStore::new(dir.path()));
    service.initialize(uid).await.expect("initialize");
    let habits = service
        .add_habit(uid, NewHabit::new("Kitap").starting(date(2024, 1, 1)))
        .await
        .expect("add habit");
    let key = habits[3].key.clone();
    service
        .set_day(uid, &key, date(2024, 1, 2), true)
        .await
        .expect("mark day");
    service
        .set_day(uid, "su", date(2024, 1, 2), true)
        .await
        .expect("mark default habit");

    service.remove_habit(uid, &key).await.expect("remove");

    // Reload from disk: the habit and its marks are gone, other marks stay.
    let service = HabitService::new(JsonFileStore::new(dir.path()));
    let habits = service.initialize(uid).await.expect("reload");
    assert!(habits.iter().all(|habit| habit.key != key));
    assert!(!service
        .is_done(uid, &key, date(2024, 1, 2))
        .await
        .expect("is_done"));
    assert!(service
        .is_done(uid, "su", date(2024, 1, 2))
        .await
        .expect("is_done"));
}

#[tokio::test]
async fn two_users_keep_independent_state() {
    init_tracing();
    let dir = tempdir().expect("tempdir");

    let service = HabitService::new(JsonFileStore::new(dir.path()));
    let asli = service
        .add_habit("asli", NewHabit::new("Kitap").starting(date(2024, 1, 1)))
        .await
        .expect("add for asli");
    assert_eq!(asli.len(), 4);

    let deniz = service.initialize("deniz").await.expect("initialize deniz");
    assert_eq!(deniz.len(), 3);
}
