mod common;

use std::time::Duration;

use airtable::mapper::encode_record;
use airtable::{
    AirtableError, Attachment, CodecError, Date, FieldKind, FormulaResult, ListOptions,
    QueryParams, Rating, Record,
};
use chrono::{NaiveDate, TimeZone, Utc};
use common::{client_for, fixtures, table_path, MainTestRecord};
use serde_json::json;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

const RECORD_ID: &str = "recfUW0mFSobdU9PX";

fn record(id: &str, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "createdTime": "2018-03-01T18:30:07.000Z",
        "fields": { "Name": name, "When?": "2018-03-05" }
    })
}

async fn mount_two_pages(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(table_path("Main")))
        .and(query_param("view", "Grid view"))
        .and(query_param_is_missing("offset"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "records": [record("rec1", "Bob"), record("rec2", "Ada")],
            "offset": "abc"
        })))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(table_path("Main")))
        .and(query_param("view", "Grid view"))
        .and(query_param("offset", "abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "records": [record("rec3", "Eve")]
        })))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn list_follows_the_cursor() {
    let server = MockServer::start().await;
    mount_two_pages(&server).await;

    let client = client_for(&server);
    let table = client.table::<MainTestRecord>("Main").unwrap();
    let records = table
        .list(&ListOptions::new().view("Grid view"))
        .await
        .unwrap();

    let names: Vec<_> = records.iter().map(|r| r.name.0.as_str()).collect();
    assert_eq!(names, ["Bob", "Ada", "Eve"]);
    let ids: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["rec1", "rec2", "rec3"]);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    let second = requests[1].url.query().unwrap();
    assert!(second.contains("offset=abc"), "{second}");
    assert!(second.contains("view=Grid+view"), "{second}");
}

#[tokio::test]
async fn list_replaces_a_stale_caller_offset() {
    let server = MockServer::start().await;
    mount_two_pages(&server).await;

    let options: QueryParams = [("view", "Grid view"), ("offset", "stale")]
        .into_iter()
        .collect();

    let client = client_for(&server);
    let table = client.table::<MainTestRecord>("Main").unwrap();
    let records = table.list(&options).await.unwrap();
    assert_eq!(records.len(), 3);
}

#[tokio::test]
async fn list_does_not_stop_on_a_full_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("pageSize", "2"))
        .and(query_param_is_missing("offset"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "records": [record("rec1", "Bob"), record("rec2", "Ada")],
            "offset": "itr1/rec2"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(query_param("pageSize", "2"))
        .and(query_param("offset", "itr1/rec2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "records": [record("rec3", "Eve"), record("rec4", "Kim")],
            "offset": ""
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let table = client.table::<MainTestRecord>("Main").unwrap();
    let records = table
        .list(&ListOptions::new().page_size(2))
        .await
        .unwrap();
    assert_eq!(records.len(), 4);
}

#[tokio::test]
async fn pages_stream_yields_each_page() {
    use futures::TryStreamExt;

    let server = MockServer::start().await;
    mount_two_pages(&server).await;

    let client = client_for(&server);
    let table = client.table::<MainTestRecord>("Main").unwrap();
    let options = ListOptions::new().view("Grid view");
    let pages: Vec<Vec<MainTestRecord>> = table.pages(&options).try_collect().await.unwrap();

    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0].len(), 2);
    assert_eq!(pages[1].len(), 1);
}

#[tokio::test]
async fn list_stops_at_the_first_bad_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "records": [{ "id": "rec1", "fields": { "When?": "someday" } }],
            "offset": "abc"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let table = client.table::<MainTestRecord>("Main").unwrap();
    let err = table.list(&QueryParams::new()).await.unwrap_err();
    assert_eq!(err.field_error().unwrap().column, "When?");
}

#[tokio::test]
async fn cancelled_list_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "records": [] })))
        .expect(0)
        .mount(&server)
        .await;

    let token = CancellationToken::new();
    token.cancel();

    let client = client_for(&server);
    let table = client.table::<MainTestRecord>("Main").unwrap();
    let err = table
        .list_with_cancel(&QueryParams::new(), &token)
        .await
        .unwrap_err();
    assert!(matches!(err, AirtableError::Cancelled));
}

#[tokio::test]
async fn cancel_interrupts_a_slow_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "records": [] }))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let token = CancellationToken::new();
    let canceller = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        canceller.cancel();
    });

    let client = client_for(&server);
    let table = client.table::<MainTestRecord>("Main").unwrap();
    let err = table
        .list_with_cancel(&QueryParams::new(), &token)
        .await
        .unwrap_err();
    assert!(matches!(err, AirtableError::Cancelled));
}

#[tokio::test]
async fn get_decodes_every_column_kind() {
    let fixtures = fixtures();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{}/{RECORD_ID}", table_path("Main"))))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(fixtures.bytes("get-record.json")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let table = client.table::<MainTestRecord>("Main").unwrap();
    let mut main = MainTestRecord::default();
    table.get(RECORD_ID, &QueryParams::new(), &mut main).await.unwrap();

    assert_eq!(main.id, RECORD_ID);
    assert_eq!(
        main.created_time,
        Some(Utc.with_ymd_and_hms(2018, 3, 1, 18, 30, 7).unwrap())
    );
    assert_eq!(main.when, Date::Day(NaiveDate::from_ymd_opt(2018, 3, 5).unwrap()));
    assert_eq!(main.rating, Rating(4));
    assert_eq!(main.name.0.as_str(), "Bob");
    assert_eq!(main.notes.lines().count(), 2);
    assert_eq!(main.attachments.0[0].filename, "bob.jpg");
    assert_eq!(main.attachments.0[0].mime_type.as_deref(), Some("image/jpeg"));
    assert!(main.check.0);
    assert_eq!(main.animals.0, ["Cat", "Dog"]);
    assert_eq!(main.cats.ids().count(), 2);
    assert_eq!(main.formula, FormulaResult::Text("Bob (4)".to_string()));

    // every writable column encodes back to its wire value
    let mut expected = fixtures.json("get-record.json");
    expected["fields"].as_object_mut().unwrap().remove("Formula");
    let encoded = serde_json::to_value(encode_record(&MainTestRecord::descriptor(), &main)).unwrap();
    assert_eq!(encoded, expected);
}

#[tokio::test]
async fn get_reports_the_bad_column() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": RECORD_ID,
            "fields": { "Name": "Bob", "When?": "not a date" }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let table = client.table::<MainTestRecord>("Main").unwrap();
    let mut main = MainTestRecord::default();
    let err = table
        .get(RECORD_ID, &QueryParams::new(), &mut main)
        .await
        .unwrap_err();

    let field = err.field_error().expect("field decode error");
    assert_eq!(field.column, "When?");
    assert_eq!(field.kind, FieldKind::Date);
    assert!(matches!(field.source, CodecError::InvalidDate { .. }));
    assert!(err.to_string().contains("When?"));
}

#[tokio::test]
async fn get_with_missing_columns_resets_the_destination() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": RECORD_ID,
            "createdTime": "2018-03-01T18:30:07.000Z",
            "fields": { "Name": "Bob" }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let table = client.table::<MainTestRecord>("Main").unwrap();

    let mut main = MainTestRecord {
        animals: airtable::MultipleSelect(vec!["Stale".to_string()]),
        attachments: Attachment(vec![Default::default()]),
        seen_locally: true,
        ..Default::default()
    };
    table.get(RECORD_ID, &QueryParams::new(), &mut main).await.unwrap();

    assert!(main.animals.0.is_empty());
    assert!(main.attachments.0.is_empty());
    assert!(!main.check.0);
    assert_eq!(main.formula, FormulaResult::Empty);
    assert!(main.seen_locally, "skipped fields are untouched");
}

#[tokio::test]
async fn fetch_escapes_path_segments() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v0/appTEST/Pets%20%2F%20Owners/rec1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(record("rec1", "Bob")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let table = client.table::<MainTestRecord>("Pets / Owners").unwrap();
    let main = table.fetch("rec1", &QueryParams::new()).await.unwrap();
    assert_eq!(main.name.0.as_str(), "Bob");
}

#[tokio::test]
async fn get_not_found_is_a_request_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": { "type": "MODEL_ID_NOT_FOUND", "message": "Could not find a record with ID \"recNope\"." }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let table = client.table::<MainTestRecord>("Main").unwrap();
    let err = table.fetch("recNope", &QueryParams::new()).await.unwrap_err();

    let request = err.request_error().unwrap();
    assert!(request.is_not_found());
    assert_eq!(request.error_type.as_deref(), Some("MODEL_ID_NOT_FOUND"));
}
