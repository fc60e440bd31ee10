//! Storage tests against an in-memory SQLite database.
//!
//! Every test gets its own fresh database with all migrations applied.

use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{EntityTrait, PaginatorTrait};
use uuid::Uuid;

use common::{AppError, DatabaseConfig};
use domain::{Child, Guardian, NewChild, NewGodparent, NewGuardian, NewMessage};
use forms::{ChildIntake, LoginData, SignUpData};

use kido_service_lib::infra::Database;
use kido_service_lib::repository::entities::{godparent, guardian};
use kido_service_lib::repository::{
    ChildRepository, ChildStore, GodparentRepository, GodparentStore, GuardianRepository,
    GuardianStore, MessageRepository, MessageStore,
};
use kido_service_lib::AppServices;

async fn setup() -> Database {
    Database::connect(&DatabaseConfig::single("sqlite::memory:"))
        .await
        .expect("in-memory database")
}

fn raw(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn child(first_name: &str, last_name: &str) -> Child {
    Child::new(NewChild {
        pic_url: None,
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        nick_name: first_name.to_string(),
        birth_date: Utc::now() - chrono::Duration::days(8 * 365),
        nationality: Some("Guatemalan".to_string()),
        school_year: None,
        situation: None,
        latitude: None,
        longitude: None,
        activity: Some(true),
    })
    .unwrap()
}

fn new_godparent() -> NewGodparent {
    NewGodparent {
        first_name: "Maria".to_string(),
        last_name: "Smith".to_string(),
        email: None,
    }
}

fn guardian() -> Guardian {
    Guardian::new(NewGuardian {
        guardian_type: Some("mother".to_string()),
        guardian_fname: Some("Rosa".to_string()),
        guardian_lname: Some("Mendez".to_string()),
    })
    .unwrap()
}

#[tokio::test]
async fn test_connect_applies_every_migration() {
    let db = setup().await;
    let states = db.migration_status().await.unwrap();

    assert_eq!(states.len(), 3);
    assert!(states.iter().all(|s| s.applied));
    db.ping().await.unwrap();
}

#[tokio::test]
async fn test_register_then_login() {
    let db = setup().await;
    let services = AppServices::new(&db);

    let signup = SignUpData::validate(&raw(&[
        ("first_name", "Ana"),
        ("last_name", "Lopez"),
        ("email", "Ana@Example.com"),
        ("password", "secret-pass"),
        ("confirm", "secret-pass"),
    ]))
    .unwrap();
    let user = services.accounts.register(signup).await.unwrap();
    assert_eq!(user.email.as_deref(), Some("ana@example.com"));

    let login = LoginData::validate(&raw(&[
        ("email", "ANA@example.com"),
        ("password", "secret-pass"),
    ]))
    .unwrap();
    let logged_in = services.accounts.login(login).await.unwrap();
    assert_eq!(logged_in.id, user.id);

    let wrong = LoginData::validate(&raw(&[
        ("email", "ana@example.com"),
        ("password", "not-the-one"),
    ]))
    .unwrap();
    let result = services.accounts.login(wrong).await;
    assert!(matches!(result, Err(AppError::InvalidCredentials)));
}

#[tokio::test]
async fn test_register_duplicate_email_is_conflict() {
    let db = setup().await;
    let services = AppServices::new(&db);

    let form = raw(&[
        ("first_name", "Ana"),
        ("last_name", "Lopez"),
        ("email", "ana@example.com"),
        ("password", "secret-pass"),
        ("confirm", "secret-pass"),
    ]);

    services
        .accounts
        .register(SignUpData::validate(&form).unwrap())
        .await
        .unwrap();
    let result = services
        .accounts
        .register(SignUpData::validate(&form).unwrap())
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn test_duplicate_guardian_link_is_constraint_violation() {
    let db = setup().await;
    let children = ChildStore::new(db.get_connection());
    let guardians = GuardianStore::new(db.get_connection());

    let c = children.create(&child("Lucia", "Mendez")).await.unwrap();
    let g = guardians.create(&guardian()).await.unwrap();

    children.link_guardian(c.id, g.id).await.unwrap();
    let result = children.link_guardian(c.id, g.id).await;

    assert!(matches!(result, Err(AppError::ConstraintViolation(_))));
    assert_eq!(children.guardians(c.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_link_to_missing_child_is_constraint_violation() {
    let db = setup().await;
    let children = ChildStore::new(db.get_connection());
    let guardians = GuardianStore::new(db.get_connection());

    let g = guardians.create(&guardian()).await.unwrap();
    let result = children.link_guardian(Uuid::new_v4(), g.id).await;

    assert!(matches!(result, Err(AppError::ConstraintViolation(_))));
}

#[tokio::test]
async fn test_deleting_child_removes_links_only() {
    let db = setup().await;
    let children = ChildStore::new(db.get_connection());
    let guardians = GuardianStore::new(db.get_connection());

    let c = children.create(&child("Lucia", "Mendez")).await.unwrap();
    let g = guardians.create(&guardian()).await.unwrap();
    children.link_guardian(c.id, g.id).await.unwrap();

    children.delete(c.id).await.unwrap();

    assert!(children.find_by_id(c.id).await.unwrap().is_none());
    assert!(guardians.find_by_id(g.id).await.unwrap().is_some());
    assert!(guardians.children(g.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_find_by_fullname() {
    let db = setup().await;
    let children = ChildStore::new(db.get_connection());

    children.create(&child("Lucia", "Mendez")).await.unwrap();
    children.create(&child("Lucia", "Perez")).await.unwrap();

    let found = children.find_by_fullname("Lucia Mendez").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].last_name, "Mendez");

    assert!(children.find_by_fullname("Lucia").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_intake_with_relatives() {
    let db = setup().await;
    let services = AppServices::new(&db);

    let intake = ChildIntake::validate(&raw(&[
        ("first_name", "Lucia"),
        ("last_name", "Mendez"),
        ("birth_date", "2015-04-12"),
        ("guardian_type", "grandmother"),
        ("guardian_fname", "Rosa"),
        ("godparent_fname", "Maria"),
        ("godparent_lname", "Smith"),
        ("godparent_email", "Maria@Kido.org"),
        ("latitude", "14.6349"),
    ]))
    .unwrap();

    let c = services.children.intake(intake).await.unwrap();

    let guardians = services.children.guardians(c.id).await.unwrap();
    assert_eq!(guardians.len(), 1);
    assert_eq!(guardians[0].guardian_fname.as_deref(), Some("Rosa"));

    let godparents = services.children.godparents(c.id).await.unwrap();
    assert_eq!(godparents.len(), 1);
    assert_eq!(godparents[0].email.as_deref(), Some("maria@kido.org"));

    let snapshot = services.children.snapshot(c.id).await.unwrap();
    assert_eq!(snapshot.nick_name, "Lucia");
    assert_eq!(snapshot.latitude, Some(14.6349));
}

#[tokio::test]
async fn test_message_outcome_is_persisted() {
    let db = setup().await;
    let services = AppServices::new(&db);
    let children = ChildStore::new(db.get_connection());

    let c = children.create(&child("Lucia", "Mendez")).await.unwrap();
    let godparent = services
        .children
        .add_godparent(c.id, new_godparent())
        .await
        .unwrap();

    let message = services
        .messages
        .compose(NewMessage {
            godparent_id: godparent.id,
            child_id: c.id,
            subject: Some("School report".to_string()),
            text_content: "Lucia finished second grade.".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(services.messages.pending().await.unwrap().len(), 1);

    services
        .messages
        .record_failure(message.id, "mailbox unavailable")
        .await
        .unwrap();

    let stored = services.messages.get_message(message.id).await.unwrap();
    assert_eq!(stored.sent_ok, Some(false));
    assert_eq!(stored.error.as_deref(), Some("mailbox unavailable"));
    assert!(services.messages.pending().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_parents_with_messages_cannot_be_deleted() {
    let db = setup().await;
    let services = AppServices::new(&db);
    let children = ChildStore::new(db.get_connection());
    let godparents = GodparentStore::new(db.get_connection());

    let c = children.create(&child("Lucia", "Mendez")).await.unwrap();
    let godparent = services
        .children
        .add_godparent(c.id, new_godparent())
        .await
        .unwrap();
    let message = services
        .messages
        .compose(NewMessage {
            godparent_id: godparent.id,
            child_id: c.id,
            subject: None,
            text_content: "Lucia says thank you.".to_string(),
        })
        .await
        .unwrap();

    let result = children.delete(c.id).await;
    assert!(matches!(result, Err(AppError::ConstraintViolation(_))));

    let result = godparents.delete(godparent.id).await;
    assert!(matches!(result, Err(AppError::ConstraintViolation(_))));

    assert!(services.messages.get_message(message.id).await.is_ok());
    assert!(children.find_by_id(c.id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_failed_add_leaves_no_orphan_rows() {
    let db = setup().await;
    let services = AppServices::new(&db);
    let conn = db.get_connection();

    let missing_child = Uuid::new_v4();

    let result = services
        .children
        .add_guardian(
            missing_child,
            NewGuardian {
                guardian_type: Some("uncle".to_string()),
                guardian_fname: Some("Jose".to_string()),
                guardian_lname: None,
            },
        )
        .await;
    assert!(matches!(result, Err(AppError::ConstraintViolation(_))));

    let result = services
        .children
        .add_godparent(missing_child, new_godparent())
        .await;
    assert!(matches!(result, Err(AppError::ConstraintViolation(_))));

    assert_eq!(guardian::Entity::find().count(&conn).await.unwrap(), 0);
    assert_eq!(godparent::Entity::find().count(&conn).await.unwrap(), 0);
}

#[tokio::test]
async fn test_second_resolution_of_a_message_is_conflict() {
    let db = setup().await;
    let services = AppServices::new(&db);
    let messages = MessageStore::new(db.get_connection());
    let children = ChildStore::new(db.get_connection());

    let c = children.create(&child("Lucia", "Mendez")).await.unwrap();
    let godparent = services
        .children
        .add_godparent(c.id, new_godparent())
        .await
        .unwrap();
    let pending = services
        .messages
        .compose(NewMessage {
            godparent_id: godparent.id,
            child_id: c.id,
            subject: None,
            text_content: "Report card attached.".to_string(),
        })
        .await
        .unwrap();

    // Two callers that both read the message while it was pending
    let mut sent = pending.clone();
    sent.record_sent(Utc::now()).unwrap();
    let mut failed = pending.clone();
    failed.record_failure(Utc::now(), "smtp timeout").unwrap();

    messages.save_outcome(&sent).await.unwrap();
    let result = messages.save_outcome(&failed).await;
    assert!(matches!(result, Err(AppError::Conflict(_))));

    let stored = messages.find_by_id(pending.id).await.unwrap().unwrap();
    assert_eq!(stored.sent_ok, Some(true));
    assert!(stored.error.is_none());
}
