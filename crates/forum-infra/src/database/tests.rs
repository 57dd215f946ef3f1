use std::time::Duration;

use chrono::{NaiveDate, Utc};
use sea_orm::{DatabaseBackend, DbConn, MockDatabase};

use forum_core::domain::{
    CommentFilter, NewComment, NewPost, NewUser, PostChanges, PostFilter, Role, UserChanges,
    UserFilter,
};
use forum_core::error::RepoError;
use forum_core::ports::{BaseRepository, CommentRepository, PostRepository, UserRepository};

use crate::database::entity::user::{self, UserRole};
use crate::database::{DatabaseConfig, UnitOfWork, connect, ensure_schema};

async fn sqlite_store() -> DbConn {
    let db = connect(&DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        min_connections: 1,
    })
    .await
    .unwrap();
    ensure_schema(&db).await.unwrap();
    db
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn new_user(first: &str, last: &str, email: &str, birth_date: NaiveDate) -> NewUser {
    NewUser {
        first_name: first.to_string(),
        last_name: last.to_string(),
        birth_date,
        email: email.to_string(),
        active: true,
        role: Role::User,
    }
}

fn new_post(user_id: i64, title: &str) -> NewPost {
    NewPost {
        title: title.to_string(),
        body: "body".to_string(),
        link: None,
        user_id,
    }
}

fn new_comment(user_id: i64, post_id: i64) -> NewComment {
    NewComment {
        body: "nice".to_string(),
        user_id,
        post_id,
    }
}

#[tokio::test]
async fn test_find_user_by_id_maps_row() {
    let now = Utc::now();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![user::Model {
            id: 1,
            first_name: "Ada".to_owned(),
            last_name: "Lovelace".to_owned(),
            birth_date: date(1815, 12, 10),
            email: "ada@example.com".to_owned(),
            active: true,
            role: UserRole::Admin,
            created_at: now.into(),
            updated_at: now.into(),
        }]])
        .into_connection();

    let uow = UnitOfWork::begin(&db).await.unwrap();
    let user = uow.users().find_by_id(1).await.unwrap().unwrap();

    assert_eq!(user.id, 1);
    assert_eq!(user.email, "ada@example.com");
    assert_eq!(user.role, Role::Admin);
    assert_eq!(user.birth_date, date(1815, 12, 10));
}

#[tokio::test]
async fn test_create_assigns_id_and_timestamps() {
    let db = sqlite_store().await;
    let uow = UnitOfWork::begin(&db).await.unwrap();

    let user = uow
        .users()
        .create(new_user("Ada", "Lovelace", "ada@example.com", date(1815, 12, 10)))
        .await
        .unwrap();
    uow.commit().await.unwrap();

    assert!(user.id > 0);
    assert!(user.active);
    assert_eq!(user.created_at, user.updated_at);
}

#[tokio::test]
async fn test_duplicate_email_is_unique_violation() {
    let db = sqlite_store().await;

    let uow = UnitOfWork::begin(&db).await.unwrap();
    let original = uow
        .users()
        .create(new_user("Ada", "Lovelace", "ada@example.com", date(1815, 12, 10)))
        .await
        .unwrap();
    uow.commit().await.unwrap();

    let uow = UnitOfWork::begin(&db).await.unwrap();
    let err = uow
        .users()
        .create(new_user("Other", "Person", "ada@example.com", date(1990, 1, 1)))
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::UniqueViolation(_)), "got {err:?}");
    uow.rollback().await.unwrap();

    let uow = UnitOfWork::begin(&db).await.unwrap();
    let all = uow.users().list(&UserFilter::default()).await.unwrap();
    assert_eq!(all, vec![original]);
}

#[tokio::test]
async fn test_email_uniqueness_is_case_sensitive() {
    let db = sqlite_store().await;
    let uow = UnitOfWork::begin(&db).await.unwrap();

    uow.users()
        .create(new_user("Ada", "Lovelace", "ada@example.com", date(1815, 12, 10)))
        .await
        .unwrap();
    uow.users()
        .create(new_user("Ada", "Lovelace", "Ada@example.com", date(1815, 12, 10)))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_partial_update_keeps_absent_fields() {
    let db = sqlite_store().await;
    let uow = UnitOfWork::begin(&db).await.unwrap();

    let before = uow
        .users()
        .create(new_user("Ada", "Lovelace", "ada@example.com", date(1815, 12, 10)))
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_millis(10)).await;

    let after = uow
        .users()
        .update(
            before.id,
            UserChanges {
                last_name: Some("King".to_string()),
                role: Some(Role::Admin),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(after.last_name, "King");
    assert_eq!(after.role, Role::Admin);
    assert_eq!(after.first_name, before.first_name);
    assert_eq!(after.birth_date, before.birth_date);
    assert_eq!(after.email, before.email);
    assert_eq!(after.active, before.active);
    assert_eq!(after.created_at, before.created_at);
    assert!(after.updated_at > before.updated_at);
}

#[tokio::test]
async fn test_post_link_can_be_cleared_or_kept() {
    let db = sqlite_store().await;
    let uow = UnitOfWork::begin(&db).await.unwrap();

    let author = uow
        .users()
        .create(new_user("Ada", "Lovelace", "ada@example.com", date(1815, 12, 10)))
        .await
        .unwrap();
    let post = uow
        .posts()
        .create(NewPost {
            link: Some("https://example.com".to_string()),
            ..new_post(author.id, "Notes")
        })
        .await
        .unwrap();

    let kept = uow
        .posts()
        .update(
            post.id,
            PostChanges {
                title: Some("Notes on the engine".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(kept.link.as_deref(), Some("https://example.com"));

    let cleared = uow
        .posts()
        .update(
            post.id,
            PostChanges {
                link: Some(None),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(cleared.link, None);
    assert_eq!(cleared.title, "Notes on the engine");
}

#[tokio::test]
async fn test_deleting_user_cascades_to_posts_and_comments() {
    let db = sqlite_store().await;
    let uow = UnitOfWork::begin(&db).await.unwrap();

    let doomed = uow
        .users()
        .create(new_user("Ada", "Lovelace", "ada@example.com", date(1815, 12, 10)))
        .await
        .unwrap();
    let survivor = uow
        .users()
        .create(new_user("Charles", "Babbage", "cb@example.com", date(1791, 12, 26)))
        .await
        .unwrap();

    let doomed_post_a = uow.posts().create(new_post(doomed.id, "a")).await.unwrap();
    uow.posts().create(new_post(doomed.id, "b")).await.unwrap();
    let survivor_post = uow.posts().create(new_post(survivor.id, "c")).await.unwrap();

    // Gone with the user's posts, gone with the user, and one that stays.
    uow.comments()
        .create(new_comment(survivor.id, doomed_post_a.id))
        .await
        .unwrap();
    uow.comments()
        .create(new_comment(doomed.id, survivor_post.id))
        .await
        .unwrap();
    uow.comments()
        .create(new_comment(doomed.id, doomed_post_a.id))
        .await
        .unwrap();
    let kept_comment = uow
        .comments()
        .create(new_comment(survivor.id, survivor_post.id))
        .await
        .unwrap();
    uow.commit().await.unwrap();

    let uow = UnitOfWork::begin(&db).await.unwrap();
    uow.users().delete(doomed.id).await.unwrap();
    uow.commit().await.unwrap();

    let uow = UnitOfWork::begin(&db).await.unwrap();
    let users = uow.users().list(&UserFilter::default()).await.unwrap();
    let posts = uow.posts().list(&PostFilter::default()).await.unwrap();
    let comments = uow.comments().list(&CommentFilter::default()).await.unwrap();

    assert_eq!(users.iter().map(|u| u.id).collect::<Vec<_>>(), vec![survivor.id]);
    assert_eq!(posts.iter().map(|p| p.id).collect::<Vec<_>>(), vec![survivor_post.id]);
    assert_eq!(comments.iter().map(|c| c.id).collect::<Vec<_>>(), vec![kept_comment.id]);
}

#[tokio::test]
async fn test_dropped_unit_of_work_rolls_back() {
    let db = sqlite_store().await;

    {
        let uow = UnitOfWork::begin(&db).await.unwrap();
        uow.users()
            .create(new_user("Ada", "Lovelace", "ada@example.com", date(1815, 12, 10)))
            .await
            .unwrap();
    }

    let uow = UnitOfWork::begin(&db).await.unwrap();
    let all = uow.users().list(&UserFilter::default()).await.unwrap();
    assert!(all.is_empty());
}

#[tokio::test]
async fn test_delete_missing_row_is_not_found() {
    let db = sqlite_store().await;
    let uow = UnitOfWork::begin(&db).await.unwrap();

    let err = uow.comments().delete(42).await.unwrap_err();
    assert!(matches!(err, RepoError::NotFound));
}

#[tokio::test]
async fn test_user_filters_combine() {
    let db = sqlite_store().await;
    let uow = UnitOfWork::begin(&db).await.unwrap();
    let users = uow.users();

    let before_range = users
        .create(new_user("Anna", "Early", "a@example.com", date(1989, 12, 31)))
        .await
        .unwrap();
    let range_start = users
        .create(new_user("Joanna", "Start", "b@example.com", date(1990, 1, 1)))
        .await
        .unwrap();
    let range_end = users
        .create(new_user("Hannah", "End", "c@example.com", date(1999, 12, 31)))
        .await
        .unwrap();
    users
        .create(new_user("Bob", "Late", "d@example.com", date(2000, 1, 1)))
        .await
        .unwrap();

    let in_nineties = users
        .list(&UserFilter {
            birth_from: Some(date(1990, 1, 1)),
            birth_to: Some(date(1999, 12, 31)),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(
        in_nineties.iter().map(|u| u.id).collect::<Vec<_>>(),
        vec![range_start.id, range_end.id]
    );

    let named = users
        .list(&UserFilter {
            name: Some("ANN".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(
        named.iter().map(|u| u.id).collect::<Vec<_>>(),
        vec![before_range.id, range_start.id, range_end.id]
    );

    let narrowed = users
        .list(&UserFilter {
            name: Some("ann".to_string()),
            surname: Some("end".to_string()),
            active: Some(true),
            role: Some(Role::User),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(narrowed.iter().map(|u| u.id).collect::<Vec<_>>(), vec![range_end.id]);

    let admins = users
        .list(&UserFilter {
            role: Some(Role::Admin),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(admins.is_empty());
}

#[tokio::test]
async fn test_post_and_comment_filters() {
    let db = sqlite_store().await;
    let uow = UnitOfWork::begin(&db).await.unwrap();

    let ada = uow
        .users()
        .create(new_user("Ada", "Lovelace", "ada@example.com", date(1815, 12, 10)))
        .await
        .unwrap();
    let bob = uow
        .users()
        .create(new_user("Bob", "Builder", "bob@example.com", date(1980, 5, 5)))
        .await
        .unwrap();

    let engine = uow.posts().create(new_post(ada.id, "Analytical Engine")).await.unwrap();
    uow.posts().create(new_post(bob.id, "Engine repair")).await.unwrap();
    uow.posts().create(new_post(ada.id, "Poetry")).await.unwrap();

    let ada_engines = uow
        .posts()
        .list(&PostFilter {
            title: Some("engine".to_string()),
            user_id: Some(ada.id),
        })
        .await
        .unwrap();
    assert_eq!(ada_engines.iter().map(|p| p.id).collect::<Vec<_>>(), vec![engine.id]);

    let first = uow.comments().create(new_comment(bob.id, engine.id)).await.unwrap();
    uow.comments().create(new_comment(ada.id, engine.id)).await.unwrap();

    let bobs_on_engine = uow
        .comments()
        .list(&CommentFilter {
            user_id: Some(bob.id),
            post_id: Some(engine.id),
        })
        .await
        .unwrap();
    assert_eq!(bobs_on_engine.iter().map(|c| c.id).collect::<Vec<_>>(), vec![first.id]);
}
