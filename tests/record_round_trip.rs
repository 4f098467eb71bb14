//! End-to-end exercises of the insert / populate / update paths against the
//! mock store client.

use recbase::mock::{CollectingReporter, MockStore, StatementKind};
use recbase::sea_query::Value;
use recbase::{
    ColumnKind, DateTimeField, FieldDeclaration, FieldValue, Record, RecordDescriptor, Row,
    Session, StoreContext,
};

static ARTICLE_FIELDS: [FieldDeclaration; 8] = [
    FieldDeclaration::new("id", ColumnKind::Integer),
    FieldDeclaration::new("created", ColumnKind::DateTime),
    FieldDeclaration::new("modified", ColumnKind::DateTime),
    FieldDeclaration::new("deleted", ColumnKind::DateTime),
    FieldDeclaration::new("title", ColumnKind::Text),
    FieldDeclaration::new("score", ColumnKind::Float),
    FieldDeclaration::new("user_id", ColumnKind::Integer),
    FieldDeclaration::new("drafts", ColumnKind::Collection),
];

static ARTICLE: RecordDescriptor = RecordDescriptor {
    type_name: "Press_Models_Articles",
    fields: &ARTICLE_FIELDS,
    populate_key: Some("id"),
    foreign_keys: &["user_id"],
};

#[test]
fn insert_then_populate_round_trips_field_values() {
    let store = MockStore::new().with_generated_id(31);
    let session = Session::new(8);
    let reporter = CollectingReporter::new();
    let ctx = StoreContext::new(&store, &session, &reporter);

    let mut article = Record::new(&ARTICLE);
    article.set("title", "Launch day").unwrap();
    article.set("score", 4.5f64).unwrap();

    let id = article.insert(&ctx).unwrap();
    assert_eq!(id, 31);
    assert_eq!(article.id(), 31);

    // The store's view of the row, as a later select would return it.
    store.push_select_result(vec![Row::from_pairs(vec![
        ("id", Value::BigInt(Some(31))),
        (
            "created",
            Value::String(Some("2024-05-01 12:30:00".to_string())),
        ),
        ("title", Value::String(Some("Launch day".to_string()))),
        ("score", Value::Double(Some(4.5))),
        ("user_id", Value::BigInt(Some(8))),
    ])]);

    let mut probe = Record::new(&ARTICLE);
    probe.set("id", id).unwrap();
    let mut fetched = Record::new(&ARTICLE);
    let found = probe.populate(&mut fetched, &[], &ctx).unwrap();
    assert!(found);

    assert_eq!(fetched.id(), 31);
    assert_eq!(
        fetched.get("title"),
        Some(&FieldValue::Text("Launch day".to_string()))
    );
    assert_eq!(fetched.get("score"), Some(&FieldValue::Float(4.5)));
    assert_eq!(fetched.get("user_id"), Some(&FieldValue::Integer(8)));

    // The row's creation moment lands on the probing record, not the target.
    assert!(matches!(
        probe.get("created"),
        Some(&FieldValue::DateTime(DateTimeField::At(_)))
    ));
}

#[test]
fn insert_applies_session_and_timestamp_overrides() {
    let store = MockStore::new();
    let session = Session::new(77);
    let reporter = CollectingReporter::new();
    let ctx = StoreContext::new(&store, &session, &reporter);

    let mut article = Record::new(&ARTICLE);
    article.set("user_id", 5i64).unwrap();
    article.insert(&ctx).unwrap();

    let statements = store.statements();
    assert_eq!(statements.len(), 1);
    let statement = &statements[0];
    assert_eq!(statement.kind, StatementKind::Insert);
    assert!(statement.sql.contains("NOW()"));
    assert!(!statement.sql.contains("\"id\","));
    assert!(!statement.sql.contains("drafts"));
    assert!(statement.values.0.contains(&Value::BigInt(Some(77))));
    assert!(!statement.values.0.contains(&Value::BigInt(Some(5))));
}

#[test]
fn update_pushes_every_column_scoped_by_id() {
    let store = MockStore::new().with_generated_id(12);
    let session = Session::new(1);
    let reporter = CollectingReporter::new();
    let ctx = StoreContext::new(&store, &session, &reporter);

    let mut article = Record::new(&ARTICLE);
    article.set("title", "Before").unwrap();
    article.insert(&ctx).unwrap();
    article.set("title", "After").unwrap();
    article.update(&ctx).unwrap();

    let statements = store.statements();
    let update = statements.last().unwrap();
    assert_eq!(update.kind, StatementKind::Write);
    assert!(update.sql.starts_with("UPDATE \"articles\" SET"));
    assert!(update.sql.contains("\"id\" ="));
    assert!(update.sql.contains("WHERE \"id\" ="));
    assert!(update
        .values
        .0
        .contains(&Value::String(Some("After".to_string()))));
}

#[test]
fn populate_validation_failures_never_reach_the_store() {
    let store = MockStore::new();
    let session = Session::new(1);
    let reporter = CollectingReporter::new();
    let ctx = StoreContext::new(&store, &session, &reporter);

    let mut probe = Record::new(&ARTICLE);
    probe.set("id", 3i64).unwrap();
    let mut target = Record::new(&ARTICLE);
    assert!(probe
        .populate(&mut target, &[("drop table", "articles")], &ctx)
        .is_err());
    assert!(store.statements().is_empty());

    let reports = reporter.reports();
    assert_eq!(reports.len(), 1);
    assert!(reports[0].fatal);
    assert_eq!(reports[0].type_name, "Press_Models_Articles");
    assert_eq!(reports[0].operation, "populate");
}

#[test]
fn reinserting_submits_a_second_statement() {
    let store = MockStore::new();
    let session = Session::new(1);
    let reporter = CollectingReporter::new();
    let ctx = StoreContext::new(&store, &session, &reporter);

    let mut article = Record::new(&ARTICLE);
    article.set("title", "Twice").unwrap();
    let first = article.insert(&ctx).unwrap();
    let second = article.insert(&ctx).unwrap();
    assert_ne!(first, second);
    assert_eq!(store.statements().len(), 2);
}
