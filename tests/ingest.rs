use mailsink::models::record::{AttachmentBody, MailRecord, Recipient};
use mailsink::store::{self, SortDir};
use mailsink::{assemble, db, sanitize};
use sqlx::SqlitePool;

async fn test_pool() -> SqlitePool {
    // A single connection keeps the in-memory database alive and shared.
    db::connect("sqlite://:memory:", 1).await.expect("connect memory sqlite")
}

fn sample_record() -> MailRecord {
    let eml = concat!(
        "From: Jane Doe <jane@example.com>\r\n",
        "To: <you@example.test>\r\n",
        "Subject: =?UTF-8?B?SGVsbG8=?=\r\n",
        " =?UTF-8?B?V29ybGQ=?=\r\n",
        "Date: Tue, 1 Jul 2003 10:52:37 +0200\r\n",
        "Content-Type: multipart/mixed; boundary=BOUND\r\n",
        "\r\n",
        "--BOUND\r\n",
        "Content-Type: text/plain; charset=utf-8\r\n\r\n",
        "First part\r\n",
        "--BOUND\r\n",
        "Content-Type: text/html; charset=utf-8\r\n\r\n",
        "<p>Second part</p>\r\n",
        "--BOUND\r\n",
        "Content-Type: application/pdf\r\n",
        "Content-Disposition: attachment; filename=\"x.pdf\"\r\n\r\n",
        "PDFBYTES\r\n",
        "--BOUND--\r\n",
    );
    assemble::assemble(eml.as_bytes(), "utf-8").expect("assemble")
}

async fn count(pool: &SqlitePool, table: &str) -> i64 {
    let sql = format!("SELECT COUNT(*) FROM {table}");
    let (n,): (i64,) = sqlx::query_as(&sql).fetch_one(pool).await.unwrap();
    n
}

#[tokio::test]
async fn two_parts_one_attachment_share_the_message_id() {
    let pool = test_pool().await;
    let record = sample_record();
    assert_eq!(record.parts.len(), 2);
    assert_eq!(record.attachments.len(), 1);

    let id = store::insert_record(&pool, &record).await.expect("insert");

    assert_eq!(count(&pool, "emails").await, 1);
    assert_eq!(count(&pool, "email_parts").await, 2);
    assert_eq!(count(&pool, "email_attachments").await, 1);

    let (part_refs,): (i64,) =
        sqlx::query_as("SELECT COUNT(DISTINCT email_id) FROM email_parts WHERE email_id = ?")
            .bind(id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(part_refs, 1);
}

#[tokio::test]
async fn failed_transaction_leaves_all_tables_empty() {
    let pool = test_pool().await;
    let mut record = sample_record();
    // Corrupt transit payload forces a failure after the emails row went in.
    record.attachments.push(AttachmentBody {
        filename: "bad.bin".into(),
        content_type: "application/octet-stream".into(),
        content: "%%% not base64 %%%".into(),
    });

    assert!(store::insert_record(&pool, &record).await.is_err());

    assert_eq!(count(&pool, "emails").await, 0);
    assert_eq!(count(&pool, "email_parts").await, 0);
    assert_eq!(count(&pool, "email_attachments").await, 0);
}

#[tokio::test]
async fn end_to_end_folded_subject_and_attachment_round_trip() {
    let pool = test_pool().await;
    let record = sample_record();

    assert_eq!(record.subject, "Hello World");
    assert!(!record.subject.contains('\n'));

    store::insert_record(&pool, &record).await.expect("insert");

    let stored = store::fetch_stored(&pool, "you@example.test", SortDir::Desc, None, 0)
        .await
        .expect("fetch");
    assert_eq!(stored.len(), 1);
    let msg = &stored[0];
    assert_eq!(msg.email.subject.as_deref(), Some("Hello World"));
    assert_eq!(msg.email.from_email.as_deref(), Some("jane@example.com"));
    assert_eq!(msg.email.from_name.as_deref(), Some("Jane Doe"));
    assert_eq!(msg.attachments.len(), 1);
    // Bytes at rest equal the original payload.
    assert_eq!(msg.attachments[0].content, b"PDFBYTES");
    assert_eq!(msg.attachments[0].filename, "x.pdf");
}

#[tokio::test]
async fn empty_recipient_sequences_store_null_columns() {
    let pool = test_pool().await;
    let eml = "Subject: bare\r\n\r\nbody";
    let record = assemble::assemble(eml.as_bytes(), "utf-8").unwrap();
    assert!(record.from.is_empty());

    store::insert_record(&pool, &record).await.unwrap();
    let (from_email, from_name): (Option<String>, Option<String>) =
        sqlx::query_as("SELECT from_email, from_name FROM emails")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(from_email, None);
    assert_eq!(from_name, None);
}

#[tokio::test]
async fn only_the_first_recipient_is_persisted() {
    let pool = test_pool().await;
    let record = MailRecord {
        to: vec![
            Recipient { name: "First".into(), email: Some("first@example.test".into()) },
            Recipient { name: "Second".into(), email: Some("second@example.test".into()) },
        ],
        ..sample_record()
    };
    store::insert_record(&pool, &record).await.unwrap();
    let (to_email,): (Option<String>,) = sqlx::query_as("SELECT to_email FROM emails")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(to_email.as_deref(), Some("first@example.test"));
}

#[tokio::test]
async fn delete_cascades_and_reports_not_found() {
    let pool = test_pool().await;
    let id = store::insert_record(&pool, &sample_record()).await.unwrap();

    assert!(store::delete_message(&pool, id).await.unwrap());
    assert_eq!(count(&pool, "emails").await, 0);
    assert_eq!(count(&pool, "email_parts").await, 0);
    assert_eq!(count(&pool, "email_attachments").await, 0);

    // Second delete affects zero rows.
    assert!(!store::delete_message(&pool, id).await.unwrap());
}

#[tokio::test]
async fn delete_all_empties_every_table() {
    let pool = test_pool().await;
    store::insert_record(&pool, &sample_record()).await.unwrap();
    store::insert_record(&pool, &sample_record()).await.unwrap();

    let removed = store::delete_all(&pool).await.unwrap();
    assert_eq!(removed, 2);
    assert_eq!(count(&pool, "email_parts").await, 0);
    assert_eq!(count(&pool, "email_attachments").await, 0);
}

#[tokio::test]
async fn retrieval_sanitizer_is_idempotent_on_stored_records() {
    let pool = test_pool().await;
    store::insert_record(&pool, &sample_record()).await.unwrap();
    let stored = store::fetch_stored(&pool, "you@example.test", SortDir::Asc, None, 0)
        .await
        .unwrap();

    let once = sanitize::sanitize_stored(&stored[0]).unwrap();
    // Re-running the string passes over the sanitized output changes nothing.
    let again = sanitize::underscore_keys(sanitize::strip_specials(once.clone()));
    assert_eq!(once, again);

    // Keys came back underscored, headers as structured mappings.
    assert!(once["email"]["raw_headers"].is_object());
    assert!(once["email"]["raw_headers"].get("reply-to").is_none());
}

#[tokio::test]
async fn sort_and_pagination_follow_received_time() {
    let pool = test_pool().await;
    let base = sample_record();
    for offset in 0..3i64 {
        let record = MailRecord {
            received: base.received + chrono::Duration::hours(offset),
            subject: format!("msg {offset}"),
            ..base.clone()
        };
        store::insert_record(&pool, &record).await.unwrap();
    }

    assert_eq!(store::count_stored(&pool, "you@example.test").await.unwrap(), 3);

    let asc = store::fetch_stored(&pool, "you@example.test", SortDir::Asc, None, 0)
        .await
        .unwrap();
    assert_eq!(asc[0].email.subject.as_deref(), Some("msg 0"));

    let page = store::fetch_stored(&pool, "you@example.test", SortDir::Desc, Some(1), 1)
        .await
        .unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].email.subject.as_deref(), Some("msg 1"));
}

#[tokio::test]
async fn run_writes_the_json_artifact_even_without_storage() {
    use mailsink::app::{self, RunOptions};
    use mailsink::source::ContentSource;

    let dir = tempfile::tempdir().unwrap();
    let eml_path = dir.path().join("in.eml");
    tokio::fs::write(&eml_path, "Subject: artifact\r\n\r\nbody")
        .await
        .unwrap();

    let opts = RunOptions {
        source: ContentSource::File(eml_path),
        encoding: "utf-8".into(),
        output_dir: dir.path().to_path_buf(),
        // Unreachable store: failure must be logged, not fatal.
        database_url: "mysql://nobody@localhost:1/none".into(),
        max_connections: 1,
    };
    app::run(opts).await.expect("run succeeds without storage");

    let artifact = tokio::fs::read_to_string(dir.path().join("email.json"))
        .await
        .unwrap();
    let v: serde_json::Value = serde_json::from_str(&artifact).unwrap();
    assert_eq!(v["subject"], "artifact");
    assert_eq!(v["encoding"], "utf-8");
}
