mod common;

use crate::common::*;
use mobile_chat_lib::libs::config::ChatConfig;
use mobile_chat_lib::libs::notice::{BackgroundNotice, NoticeSink};
use mobile_chat_lib::libs::uniffi::models::{Message, Profile};
use mobile_chat_lib::libs::uniffi::session::ChatSession;
use mobile_chat_lib::{default_config, parse_config, DatabaseError};
use std::fs;
use std::sync::{Arc, Mutex};
use std::time::Duration;

fn config(db: &TestDb, seed: bool) -> ChatConfig {
    ChatConfig {
        database_path: db.path.clone(),
        seed_sample_data: seed,
        ..ChatConfig::default()
    }
}

#[tokio::test]
async fn test_open_seeds_before_first_read() {
    let db = TestDb::new();
    let session = ChatSession::open(config(&db, true)).unwrap();

    let conversation = session.load_conversation().await.unwrap();

    assert_eq!(conversation.len(), sample().len());
    assert_eq!(conversation[0].author, sample()[0].author);
    match session.load_profile().await.unwrap() {
        Profile::Current { name, profile_picture_path } => {
            assert_eq!(name, Some(sample()[0].author.clone()));
            assert_eq!(profile_picture_path, None);
        }
        Profile::NoUser => panic!("seeding should create a user"),
    }
}

#[tokio::test]
async fn test_open_without_seeding_has_no_user() {
    let db = TestDb::new();
    let session = ChatSession::open(config(&db, false)).unwrap();

    assert_eq!(session.load_profile().await.unwrap(), Profile::NoUser);
    assert!(session.load_conversation().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_send_message_uses_current_user() {
    let db = TestDb::new();
    let session = ChatSession::open(config(&db, false)).unwrap();
    session.update_profile_name("Frank".to_string()).await.unwrap();

    let conversation = session.send_message("hello".to_string()).await.unwrap();

    assert_eq!(
        conversation,
        vec![Message {
            author: "Frank".to_string(),
            body: "hello".to_string()
        }]
    );
}

#[tokio::test]
async fn test_send_message_without_user_is_ignored() {
    let db = TestDb::new();
    let session = ChatSession::open(config(&db, false)).unwrap();

    let conversation = session.send_message("hello".to_string()).await.unwrap();

    assert!(conversation.is_empty());
}

#[tokio::test]
async fn test_next_state_follows_posted_updates() {
    let db = TestDb::new();
    let session = ChatSession::open(config(&db, false)).unwrap();

    session.post_profile_name("Gina".to_string()).unwrap();
    session.post_profile_picture("/files/g.jpg".to_string()).unwrap();

    let expected = Profile::Current {
        name: Some("Gina".to_string()),
        profile_picture_path: Some("/files/g.jpg".to_string()),
    };

    let snapshot = tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            let snapshot = session.next_state().await.unwrap();
            if snapshot.profile == expected {
                break snapshot;
            }
        }
    })
    .await
    .expect("Timed out waiting for profile update");

    assert_eq!(snapshot.last_error, None);
    assert_eq!(session.current_state().profile, expected);
}

#[tokio::test]
async fn test_import_profile_picture_copies_and_updates() {
    let db = TestDb::new();
    let session = ChatSession::open(config(&db, true)).unwrap();
    let source = db.dir.path().join("picked.jpg");
    fs::write(&source, b"jpeg bytes").unwrap();
    let files_dir = db.dir.path().join("files");

    let profile = session
        .import_profile_picture(
            source.to_string_lossy().into_owned(),
            files_dir.to_string_lossy().into_owned(),
        )
        .await
        .unwrap();

    let Profile::Current { name, profile_picture_path } = profile else {
        panic!("expected the seeded user");
    };
    let saved = profile_picture_path.expect("picture should be set");
    assert!(saved.starts_with(&*files_dir.to_string_lossy()));
    assert_eq!(fs::read(&saved).unwrap(), b"jpeg bytes");
    assert_eq!(name, Some(sample()[0].author.clone()));
}

#[tokio::test]
async fn test_import_missing_picture_is_an_error() {
    let db = TestDb::new();
    let session = ChatSession::open(config(&db, true)).unwrap();

    let result = session
        .import_profile_picture(
            db.dir.path().join("gone.jpg").to_string_lossy().into_owned(),
            db.dir.path().to_string_lossy().into_owned(),
        )
        .await;

    assert!(matches!(result, Err(DatabaseError::StorageError(_))));
}

#[tokio::test]
async fn test_completion_failure_is_text() {
    let db = TestDb::new();
    let mut config = config(&db, false);
    config.completion.api_url = "http://127.0.0.1:9/v1/chat/completions".to_string();
    config.completion.timeout_secs = 2;
    let session = ChatSession::open(config).unwrap();

    let reply = session.request_completion(Some("hi".to_string())).await;

    assert!(reply.starts_with("Error:"), "{reply}");
}

// Records what the host would have shown, then refuses to show it.
struct RefusingSink(Arc<Mutex<Vec<BackgroundNotice>>>);

impl NoticeSink for RefusingSink {
    fn post_notice(&self, notice: BackgroundNotice) -> bool {
        self.0.lock().unwrap().push(notice);
        false
    }
}

#[tokio::test]
async fn test_backgrounding_posts_notice_even_if_host_refuses() {
    let db = TestDb::new();
    let session = ChatSession::open(config(&db, false)).unwrap();
    let seen = Arc::new(Mutex::new(Vec::new()));

    session.app_backgrounded(Box::new(RefusingSink(seen.clone())));

    let notices = seen.lock().unwrap();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].body, "Don't forget to check your new messages!");
}

#[test]
fn test_bad_database_file_fails_to_open() {
    let db = TestDb::new();
    fs::write(&db.path, b"this is not sqlite, just some bytes padding it out a bit").unwrap();

    let result = ChatSession::open(config(&db, true));

    assert!(matches!(result, Err(DatabaseError::InitializationError(_))));
}

#[test]
fn test_config_helpers() {
    let config = default_config("/data/user/0/app/databases".to_string());
    assert!(config.database_path.ends_with("UserDB"));
    assert!(config.seed_sample_data);

    let parsed = parse_config(r#"{ "seed_sample_data": false }"#.to_string()).unwrap();
    assert!(!parsed.seed_sample_data);

    assert!(matches!(
        parse_config("not json".to_string()),
        Err(DatabaseError::ConfigError(_))
    ));
}
