//! Store-level tests against a private in-memory SQLite database.

use core_types::{CamperChanges, NewCamper, NewSignup};
use database::{DbError, DbRepository, connect_in_memory, run_migrations};

async fn fresh_repository() -> DbRepository {
    let pool = connect_in_memory().await.unwrap();
    run_migrations(&pool).await.unwrap();
    DbRepository::new(pool)
}

fn camper(name: &str, age: i64) -> NewCamper {
    NewCamper { name: name.to_string(), age }
}

#[tokio::test]
async fn inserted_camper_is_retrievable_by_its_id() {
    let repo = fresh_repository().await;

    let mut uow = repo.begin().await.unwrap();
    let created = uow.insert_camper(&camper("Alex", 12)).await.unwrap();
    uow.commit().await.unwrap();

    let mut uow = repo.begin().await.unwrap();
    let found = uow.find_camper(created.id).await.unwrap();
    assert_eq!(found, Some(created));
}

#[tokio::test]
async fn dropped_unit_of_work_rolls_back() {
    let repo = fresh_repository().await;

    {
        let mut uow = repo.begin().await.unwrap();
        uow.insert_camper(&camper("Ghost", 10)).await.unwrap();
    }

    let mut uow = repo.begin().await.unwrap();
    assert!(uow.list_campers().await.unwrap().is_empty());
}

#[tokio::test]
async fn explicit_rollback_discards_writes() {
    let repo = fresh_repository().await;

    let mut uow = repo.begin().await.unwrap();
    uow.insert_activity("Archery").await.unwrap();
    uow.rollback().await.unwrap();

    let mut uow = repo.begin().await.unwrap();
    assert!(uow.list_activities().await.unwrap().is_empty());
}

#[tokio::test]
async fn listings_follow_insertion_order() {
    let repo = fresh_repository().await;

    let mut uow = repo.begin().await.unwrap();
    for (name, age) in [("Caleb", 9), ("Ada", 15), ("Bea", 11)] {
        uow.insert_camper(&camper(name, age)).await.unwrap();
    }
    let names: Vec<String> = uow
        .list_campers()
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, ["Caleb", "Ada", "Bea"]);
}

#[tokio::test]
async fn ids_are_not_reused_after_delete() {
    let repo = fresh_repository().await;

    let mut uow = repo.begin().await.unwrap();
    let first = uow.insert_activity("Canoeing").await.unwrap();
    assert!(uow.delete_activity(first.id).await.unwrap());
    let second = uow.insert_activity("Hiking").await.unwrap();
    uow.commit().await.unwrap();

    assert!(second.id > first.id);
}

#[tokio::test]
async fn update_touches_only_supplied_fields() {
    let repo = fresh_repository().await;

    let mut uow = repo.begin().await.unwrap();
    let created = uow.insert_camper(&camper("Alex", 12)).await.unwrap();
    let changes = CamperChanges { name: None, age: Some(13) };
    let updated = uow.update_camper(created.id, &changes).await.unwrap().unwrap();

    assert_eq!(updated.name, "Alex");
    assert_eq!(updated.age, 13);
}

#[tokio::test]
async fn update_of_missing_camper_returns_none() {
    let repo = fresh_repository().await;

    let mut uow = repo.begin().await.unwrap();
    let changes = CamperChanges { name: Some("Nobody".into()), age: None };
    assert_eq!(uow.update_camper(999, &changes).await.unwrap(), None);
}

#[tokio::test]
async fn camper_signups_are_joined_with_their_activity() {
    let repo = fresh_repository().await;

    let mut uow = repo.begin().await.unwrap();
    let alex = uow.insert_camper(&camper("Alex", 12)).await.unwrap();
    let archery = uow.insert_activity("Archery").await.unwrap();
    let swim = uow.insert_activity("Swimming").await.unwrap();
    for (activity_id, time) in [(archery.id, 9), (swim.id, 14)] {
        uow.insert_signup(&NewSignup { camper_id: alex.id, activity_id, time })
            .await
            .unwrap();
    }

    let signups = uow.camper_signups(alex.id).await.unwrap();
    assert_eq!(signups.len(), 2);
    assert_eq!(signups[0].activity, archery);
    assert_eq!(signups[0].signup.time, 9);
    assert_eq!(signups[1].activity, swim);
}

#[tokio::test]
async fn signup_with_dangling_reference_is_an_integrity_violation() {
    let repo = fresh_repository().await;

    let mut uow = repo.begin().await.unwrap();
    let archery = uow.insert_activity("Archery").await.unwrap();
    let result = uow
        .insert_signup(&NewSignup { camper_id: 42, activity_id: archery.id, time: 10 })
        .await;

    assert!(matches!(result, Err(DbError::IntegrityViolation(_))));
}

#[tokio::test]
async fn schema_rejects_out_of_range_values() {
    let repo = fresh_repository().await;

    let mut uow = repo.begin().await.unwrap();
    let too_young = uow.insert_camper(&camper("Tiny", 5)).await;
    assert!(matches!(too_young, Err(DbError::IntegrityViolation(_))));
}

#[tokio::test]
async fn deleting_an_activity_cascades_to_its_signups() {
    let repo = fresh_repository().await;

    let mut uow = repo.begin().await.unwrap();
    let alex = uow.insert_camper(&camper("Alex", 12)).await.unwrap();
    let archery = uow.insert_activity("Archery").await.unwrap();
    let swim = uow.insert_activity("Swimming").await.unwrap();
    let doomed = uow
        .insert_signup(&NewSignup { camper_id: alex.id, activity_id: archery.id, time: 9 })
        .await
        .unwrap();
    let kept = uow
        .insert_signup(&NewSignup { camper_id: alex.id, activity_id: swim.id, time: 11 })
        .await
        .unwrap();
    uow.commit().await.unwrap();

    let mut uow = repo.begin().await.unwrap();
    assert!(uow.delete_activity(archery.id).await.unwrap());
    uow.commit().await.unwrap();

    let mut uow = repo.begin().await.unwrap();
    assert_eq!(uow.find_activity(archery.id).await.unwrap(), None);
    assert_eq!(uow.find_signup(doomed.id).await.unwrap(), None);
    assert_eq!(uow.find_signup(kept.id).await.unwrap(), Some(kept));
    assert_eq!(uow.count_signups().await.unwrap(), 1);
}

#[tokio::test]
async fn deleting_a_missing_activity_reports_false() {
    let repo = fresh_repository().await;

    let mut uow = repo.begin().await.unwrap();
    assert!(!uow.delete_activity(7).await.unwrap());
}

#[tokio::test]
async fn clear_empties_every_table() {
    let repo = fresh_repository().await;

    let mut uow = repo.begin().await.unwrap();
    let alex = uow.insert_camper(&camper("Alex", 12)).await.unwrap();
    let archery = uow.insert_activity("Archery").await.unwrap();
    uow.insert_signup(&NewSignup { camper_id: alex.id, activity_id: archery.id, time: 8 })
        .await
        .unwrap();
    uow.clear().await.unwrap();

    assert!(uow.list_campers().await.unwrap().is_empty());
    assert!(uow.list_activities().await.unwrap().is_empty());
    assert_eq!(uow.count_signups().await.unwrap(), 0);
}
