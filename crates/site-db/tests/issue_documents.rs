use chrono::{TimeDelta, Utc};
use pretty_assertions::assert_eq;
use rstest::rstest;
use site_core::entities::IssueDraft;
use site_core::enums::IssueStatus;
use site_core::ids::{PREFIX_ISSUE, is_valid_id};
use site_db::{IssueDocuments, SiteDb};

async fn memory_db() -> SiteDb {
    SiteDb::open_local(":memory:").await.unwrap()
}

fn crane() -> IssueDraft {
    IssueDraft::new("Crane malfunction", IssueStatus::Pending, "Shaheer Syed")
}

#[tokio::test]
async fn create_assigns_id_and_timestamp() {
    let db = memory_db().await;
    let before = Utc::now();
    let issue = db.create(&crane(), None, Utc::now()).await.unwrap();

    assert!(is_valid_id(&issue.id, PREFIX_ISSUE));
    assert!(issue.matches_draft(&crane()));
    assert!(issue.timestamp >= before - TimeDelta::milliseconds(1));
    assert_eq!(issue.image_url, None);
}

#[tokio::test]
async fn created_issue_reads_back_identically() {
    let db = memory_db().await;
    let created = db
        .create(
            &crane(),
            Some("https://photos.duplex.test/issue-photos/1-ab-crane.jpg"),
            Utc::now(),
        )
        .await
        .unwrap();

    let listed = db.list_all().await.unwrap();
    assert_eq!(listed, vec![created.clone()]);
    assert_eq!(db.get_issue(&created.id).await.unwrap(), created);
}

#[tokio::test]
async fn list_all_preserves_insertion_order() {
    let db = memory_db().await;
    let now = Utc::now();
    let mut expected = Vec::new();
    for (i, description) in ["Scaffold loose", "Water leak", "Crane malfunction"]
        .into_iter()
        .enumerate()
    {
        let draft = IssueDraft::new(description, IssueStatus::Pending, "Site Supervisor");
        let at = now + TimeDelta::seconds(i64::try_from(i).unwrap());
        expected.push(db.create(&draft, None, at).await.unwrap().id);
    }

    let ids: Vec<String> = db.list_all().await.unwrap().into_iter().map(|i| i.id).collect();
    assert_eq!(ids, expected);
}

#[tokio::test]
async fn timestamps_never_go_backwards() {
    let db = memory_db().await;
    let now = Utc::now();
    let first = db.create(&crane(), None, now).await.unwrap();
    // A submission clocked earlier than the newest record is clamped forward.
    let second = db
        .create(&crane(), None, now - TimeDelta::minutes(10))
        .await
        .unwrap();
    assert_eq!(second.timestamp, first.timestamp);

    let listed = db.list_all().await.unwrap();
    assert!(listed.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
}

#[tokio::test]
async fn create_stores_text_as_entered() {
    let db = memory_db().await;
    let draft = IssueDraft::new("  Water leak  ", IssueStatus::InProgress, " Safety Officer ");
    let issue = db.create(&draft, None, Utc::now()).await.unwrap();
    assert_eq!(issue.description, "  Water leak  ");
    assert_eq!(issue.logger_name, " Safety Officer ");
    assert!(issue.matches_draft(&draft));

    let stored = db.get_issue(&issue.id).await.unwrap();
    assert_eq!(stored, issue);
}

#[rstest]
#[case(IssueDraft::new("", IssueStatus::Pending, "Shaheer Syed"))]
#[case(IssueDraft::new("Crane malfunction", IssueStatus::Pending, "   "))]
#[tokio::test]
async fn create_rejects_incomplete_drafts(#[case] draft: IssueDraft) {
    let db = memory_db().await;
    assert!(db.create(&draft, None, Utc::now()).await.is_err());
    assert!(db.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn empty_image_url_is_stored_as_absent() {
    let db = memory_db().await;
    let issue = db.create(&crane(), Some(""), Utc::now()).await.unwrap();
    assert_eq!(issue.image_url, None);
    assert_eq!(db.list_all().await.unwrap()[0].image_url, None);
}

#[tokio::test]
async fn delete_removes_only_the_target() {
    let db = memory_db().await;
    let keep = db.create(&crane(), None, Utc::now()).await.unwrap();
    let gone = db.create(&crane(), None, Utc::now()).await.unwrap();

    assert!(db.delete(&gone.id).await.unwrap());
    assert!(!db.delete(&gone.id).await.unwrap(), "second delete finds nothing");
    assert_eq!(db.list_all().await.unwrap(), vec![keep]);
}

#[tokio::test]
async fn records_survive_reopen() {
    let tmp = tempfile::TempDir::new().unwrap();
    let path = tmp.path().join("issues.db");
    let path = path.to_str().unwrap();

    let created = {
        let db = SiteDb::open_local(path).await.unwrap();
        db.create(&crane(), None, Utc::now()).await.unwrap()
    };

    let db = SiteDb::open_local(path).await.unwrap();
    assert_eq!(db.list_all().await.unwrap(), vec![created]);
}
