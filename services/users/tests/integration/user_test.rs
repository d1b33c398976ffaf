use usermgmt_users::domain::repository::RecordRepository;
use usermgmt_users::error::ServiceError;
use usermgmt_users::usecase::user::{
    ClearRecordsUseCase, CreateRecordUseCase, GetRecordUseCase, ImportRecordsUseCase,
    ListRecordsUseCase, RecordQuery, UpdateRecordUseCase,
};

use crate::helpers::{InMemoryRecordRepo, draft};

#[tokio::test]
async fn create_then_get_round_trips() {
    let repo = InMemoryRecordRepo::empty();
    let d = draft("Alice Smith", "alice@x.com");

    let id = CreateRecordUseCase { repo: repo.clone() }
        .execute(d.clone())
        .await
        .unwrap();
    let record = GetRecordUseCase { repo }.execute(id).await.unwrap();

    assert_eq!(record.id, id);
    assert_eq!(record.name, d.name);
    assert_eq!(record.dob, d.dob);
    assert_eq!(record.email, d.email);
    assert_eq!(record.password, d.password);
    assert_eq!(record.phone, d.phone);
    assert_eq!(record.gender, d.gender);
    assert_eq!(record.address, d.address);
}

#[tokio::test]
async fn duplicate_email_create_is_rejected() {
    let repo = InMemoryRecordRepo::empty();
    repo.create(&draft("Alice Smith", "alice@x.com"))
        .await
        .unwrap();

    let records = repo.records_handle();
    let result = CreateRecordUseCase { repo }
        .execute(draft("Another Alice", "alice@x.com"))
        .await;

    assert!(matches!(result, Err(ServiceError::DuplicateEmail)));
    // Nothing was allocated for the rejected draft.
    assert_eq!(records.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn update_of_non_email_fields_preserves_created_at() {
    let repo = InMemoryRecordRepo::empty();
    let id = repo.create(&draft("Alice Smith", "alice@x.com")).await.unwrap();
    let created_at = repo.find_by_id(id).await.unwrap().unwrap().created_at;

    let mut updated = draft("Alice Jones", "alice@x.com");
    updated.address = "2 Side St".into();
    UpdateRecordUseCase { repo: repo.clone() }
        .execute(id, updated)
        .await
        .unwrap();

    let record = repo.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(record.name, "Alice Jones");
    assert_eq!(record.address, "2 Side St");
    assert_eq!(record.created_at, created_at);
}

#[tokio::test]
async fn update_to_taken_email_is_a_conflict() {
    let repo = InMemoryRecordRepo::empty();
    let id = repo.create(&draft("Alice Smith", "alice@x.com")).await.unwrap();
    repo.create(&draft("Bob Brown", "bob@x.com")).await.unwrap();

    let result = UpdateRecordUseCase { repo: repo.clone() }
        .execute(id, draft("Alice Smith", "bob@x.com"))
        .await;

    assert!(matches!(result, Err(ServiceError::DuplicateEmail)));
    // The update was not applied.
    let record = repo.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(record.email, "alice@x.com");
}

#[tokio::test]
async fn update_of_unknown_id_is_not_found() {
    let repo = InMemoryRecordRepo::empty();
    let result = UpdateRecordUseCase { repo }
        .execute(42, draft("Nobody", "nobody@x.com"))
        .await;
    assert!(matches!(result, Err(ServiceError::RecordNotFound)));
}

#[tokio::test]
async fn bulk_import_skips_colliding_emails() {
    let repo = InMemoryRecordRepo::empty();
    repo.create(&draft("Alice Smith", "alice@x.com")).await.unwrap();
    repo.create(&draft("Bob Brown", "bob@x.com")).await.unwrap();

    let imported = ImportRecordsUseCase { repo: repo.clone() }
        .execute(vec![
            draft("Alice Again", "alice@x.com"),
            draft("Bob Again", "bob@x.com"),
            draft("Carol White", "carol@x.com"),
            draft("Dan Green", "dan@x.com"),
            draft("Eve Black", "eve@x.com"),
        ])
        .await
        .unwrap();

    assert_eq!(imported, 3);
    assert_eq!(repo.count().await.unwrap(), 5);
}

#[tokio::test]
async fn clear_then_count_is_zero() {
    let repo = InMemoryRecordRepo::empty();
    for i in 0..7 {
        repo.create(&draft("Someone", &format!("user{i}@x.com")))
            .await
            .unwrap();
    }

    ClearRecordsUseCase { repo: repo.clone() }.execute().await.unwrap();
    assert_eq!(repo.count().await.unwrap(), 0);
}

#[tokio::test]
async fn search_matches_name_case_insensitively_and_phone_verbatim() {
    let repo = InMemoryRecordRepo::empty();
    let mut alice = draft("Alice Smith", "alice@x.com");
    alice.phone = "555-0123".into();
    repo.create(&alice).await.unwrap();
    let mut bob = draft("Bob Brown", "bob@x.com");
    bob.phone = "555-9876".into();
    repo.create(&bob).await.unwrap();

    let usecase = ListRecordsUseCase { repo };

    let by_name = usecase
        .execute(RecordQuery::Search("alice".into()))
        .await
        .unwrap();
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].name, "Alice Smith");

    // "123" appears verbatim in "555-0123"; "5550" does not.
    let by_phone = usecase
        .execute(RecordQuery::Search("123".into()))
        .await
        .unwrap();
    assert_eq!(by_phone.len(), 1);
    assert_eq!(by_phone[0].email, "alice@x.com");

    let normalized = usecase
        .execute(RecordQuery::Search("5550".into()))
        .await
        .unwrap();
    assert!(normalized.is_empty());
}
