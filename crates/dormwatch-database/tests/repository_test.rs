//! Repository tests against a live PostgreSQL instance.
//!
//! Each test is skipped unless `DORMWATCH_TEST_DATABASE_URL` points at
//! a disposable database. Rows are created with fresh UUID-based keys
//! so tests can run concurrently against the same instance.

use sqlx::PgPool;
use uuid::Uuid;

use dormwatch_database::migration;
use dormwatch_database::repositories::{
    MarkerRepository, NotificationRepository, UserRepository,
};
use dormwatch_entity::marker::CreateMarker;
use dormwatch_entity::notification::{CreateNotification, NotificationKind, NotificationStatus};
use dormwatch_entity::user::{CreateUser, User, UserRole};

async fn test_pool() -> Option<PgPool> {
    let url = std::env::var("DORMWATCH_TEST_DATABASE_URL").ok()?;
    let pool = PgPool::connect(&url).await.expect("connect test database");
    migration::run_migrations(&pool)
        .await
        .expect("run migrations");
    Some(pool)
}

async fn create_user(repo: &UserRepository, role: UserRole) -> User {
    repo.create(&CreateUser {
        login: format!("user_{}", Uuid::new_v4().simple()),
        password_hash: "$argon2id$test".into(),
        role,
        full_name: "Test User".into(),
        phone_number: String::new(),
        telegram_tag: String::new(),
    })
    .await
    .expect("create user")
}

fn create_marker_input(key_prefix: &str, label: &str) -> CreateMarker {
    CreateMarker {
        marker_id: format!("{key_prefix}-{}", Uuid::new_v4().simple()),
        position: vec![30.32, 59.94],
        label: label.into(),
    }
}

#[tokio::test]
async fn test_fan_out_creates_one_unread_record_per_recipient() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let users = UserRepository::new(pool.clone());
    let notifications = NotificationRepository::new(pool.clone());

    let sender = create_user(&users, UserRole::Dgis).await;
    let first = create_user(&users, UserRole::Supervisor).await;
    let second = create_user(&users, UserRole::Supervisor).await;

    let recipients = vec![first.id, second.id];
    let (notification, delivered) = notifications
        .create_and_fan_out(
            &CreateNotification {
                kind: NotificationKind::General,
                title: "Inspection".into(),
                message: "Friday 10:00".into(),
                sender_id: sender.id,
                recipient_ids: Some(recipients.clone()),
            },
            &recipients,
        )
        .await
        .expect("fan out");

    assert_eq!(delivered, 2);
    assert_eq!(notifications.count_unread(sender.id).await.unwrap(), 0);

    for recipient in [first.id, second.id] {
        assert_eq!(notifications.count_unread(recipient).await.unwrap(), 1);

        let records = notifications
            .list_for_user(recipient, &[], 0, 0)
            .await
            .expect("list records");
        assert_eq!(records.len(), 1);
        assert!(records[0].is_unread());
        // The whole batch shares the template's timestamp.
        assert_eq!(records[0].created_at, notification.created_at);
    }
}

#[tokio::test]
async fn test_mark_read_transitions_exactly_once() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let users = UserRepository::new(pool.clone());
    let notifications = NotificationRepository::new(pool.clone());

    let sender = create_user(&users, UserRole::Starosta).await;
    let recipient = create_user(&users, UserRole::Supervisor).await;

    let (_, delivered) = notifications
        .create_and_fan_out(
            &CreateNotification {
                kind: NotificationKind::Personal,
                title: "Reminder".into(),
                message: "Report due".into(),
                sender_id: sender.id,
                recipient_ids: Some(vec![recipient.id]),
            },
            &[recipient.id],
        )
        .await
        .expect("fan out");
    assert_eq!(delivered, 1);

    let record_id = notifications
        .list_for_user(recipient.id, &[NotificationStatus::Unread], 0, 0)
        .await
        .expect("list unread")[0]
        .id;

    let (first, transitioned) = notifications.mark_read(record_id).await.expect("mark read");
    assert!(transitioned);
    assert_eq!(first.status, NotificationStatus::Read);
    assert!(first.read_at.is_some());

    // Second call reports no transition and leaves the row untouched,
    // which is what keeps the caller from publishing twice.
    let (second, transitioned) = notifications.mark_read(record_id).await.expect("mark read");
    assert!(!transitioned);
    assert_eq!(second.read_at, first.read_at);

    assert_eq!(notifications.count_unread(recipient.id).await.unwrap(), 0);
}

#[tokio::test]
async fn test_delete_returns_record_then_none() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let users = UserRepository::new(pool.clone());
    let notifications = NotificationRepository::new(pool.clone());

    let sender = create_user(&users, UserRole::Chairman).await;
    let recipient = create_user(&users, UserRole::Supervisor).await;

    notifications
        .create_and_fan_out(
            &CreateNotification {
                kind: NotificationKind::System,
                title: "Notice".into(),
                message: "Maintenance".into(),
                sender_id: sender.id,
                recipient_ids: Some(vec![recipient.id]),
            },
            &[recipient.id],
        )
        .await
        .expect("fan out");

    let record_id = notifications
        .list_for_user(recipient.id, &[], 0, 0)
        .await
        .expect("list records")[0]
        .id;

    let deleted = notifications
        .delete_user_notification(record_id)
        .await
        .expect("delete");
    assert!(deleted.is_some());

    let again = notifications
        .delete_user_notification(record_id)
        .await
        .expect("delete twice");
    assert!(again.is_none());
    assert_eq!(notifications.count_unread(recipient.id).await.unwrap(), 0);
}

#[tokio::test]
async fn test_marker_assignment_keeps_both_sides_and_reverts_building() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let users = UserRepository::new(pool.clone());
    let markers = MarkerRepository::new(pool.clone());

    let user = create_user(&users, UserRole::Supervisor).await;
    // Business keys sort "a..." < "b...", so the recompute after a
    // removal must fall back to the first marker.
    let first = markers
        .create(&create_marker_input("a", "6.1"))
        .await
        .expect("create marker");
    let second = markers
        .create(&create_marker_input("b", "6.2"))
        .await
        .expect("create marker");

    markers.assign_user(first.id, user.id).await.expect("assign");
    markers
        .assign_user(second.id, user.id)
        .await
        .expect("assign");

    let reloaded = users.find_by_id(user.id).await.unwrap().unwrap();
    assert!(reloaded.assigned_markers.contains(&first.id));
    assert!(reloaded.assigned_markers.contains(&second.id));
    // Last assignment wins.
    assert_eq!(reloaded.building.as_deref(), Some("6.2"));

    for marker_id in [first.id, second.id] {
        let marker = markers.find_by_id(marker_id).await.unwrap().unwrap();
        assert_eq!(marker.assigned_user_ids, vec![user.id]);
    }

    // Re-assignment is a set operation, not an append.
    markers.assign_user(first.id, user.id).await.expect("assign");
    let marker = markers.find_by_id(first.id).await.unwrap().unwrap();
    assert_eq!(marker.assigned_user_ids, vec![user.id]);

    markers
        .remove_user(second.id, user.id)
        .await
        .expect("remove");
    let reloaded = users.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(reloaded.assigned_markers, vec![first.id]);
    // Building reverts to the remaining marker's label.
    assert_eq!(reloaded.building.as_deref(), Some("6.1"));

    markers.remove_user(first.id, user.id).await.expect("remove");
    let reloaded = users.find_by_id(user.id).await.unwrap().unwrap();
    assert!(reloaded.assigned_markers.is_empty());
    assert_eq!(reloaded.building, None);

    let marker = markers.find_by_id(first.id).await.unwrap().unwrap();
    assert!(marker.assigned_user_ids.is_empty());
}
