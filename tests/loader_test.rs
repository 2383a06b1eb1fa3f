mod common;

use std::io::Write;

use nutrition_tui::browser::Browser;
use nutrition_tui::loader::{fetch_dataset, load_cmd, DataSource, DatasetLoadedMsg};
use nutrition_tui::{paginator, table, LoadError};

const DOCUMENT: &str = r#"{
    "headers": ["Food", "Energy", "Protein"],
    "data": [
        ["Egg", 70, 6.3],
        ["Rice", 130, null],
        ["Natto", 200.0, 16.5]
    ]
}"#;

#[tokio::test]
async fn fetches_over_http() {
    let (base, server) = common::serve_once(200, DOCUMENT).await;
    let source = DataSource::from(format!("{base}/static/nutrition_data.json").as_str());

    let dataset = fetch_dataset(&reqwest::Client::new(), &source).await.unwrap();

    assert_eq!(dataset.headers(), &["Food", "Energy", "Protein"]);
    assert_eq!(dataset.rows()[0].cells, vec!["Egg", "70", "6.3"]);
    assert_eq!(dataset.rows()[1].cells, vec!["Rice", "130", ""]);
    assert_eq!(dataset.rows()[2].cells, vec!["Natto", "200", "16.5"]);

    let request = server.await.unwrap();
    assert!(request.starts_with("GET /static/nutrition_data.json"));
}

#[tokio::test]
async fn non_success_status_is_a_load_error() {
    let (base, _server) = common::serve_once(404, "{}").await;
    let source = DataSource::Url(format!("{base}/missing.json"));

    let err = fetch_dataset(&reqwest::Client::new(), &source)
        .await
        .unwrap_err();

    assert!(matches!(err, LoadError::Status { status: 404, .. }));
    assert_eq!(err.to_string(), "Network response was not ok: Not Found");
}

#[tokio::test]
async fn malformed_json_is_a_parse_error() {
    let (base, _server) = common::serve_once(200, "{\"headers\": [").await;
    let source = DataSource::Url(format!("{base}/data.json"));

    let err = fetch_dataset(&reqwest::Client::new(), &source)
        .await
        .unwrap_err();

    assert!(matches!(err, LoadError::Parse(_)));
}

#[tokio::test]
async fn ragged_rows_are_rejected() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"headers": ["Food", "Energy"], "data": [["Egg", 70], ["Rice"]]}}"#).unwrap();
    let source = DataSource::File(file.path().to_path_buf());

    let err = fetch_dataset(&reqwest::Client::new(), &source)
        .await
        .unwrap_err();

    assert!(matches!(err, LoadError::Invalid(_)));
}

#[tokio::test]
async fn unreachable_server_is_an_http_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let source = DataSource::Url(format!("http://{addr}/data.json"));
    let err = fetch_dataset(&reqwest::Client::new(), &source)
        .await
        .unwrap_err();

    assert!(matches!(err, LoadError::Http(_)));
}

#[tokio::test]
async fn startup_fetch_renders_first_page() {
    let rows: Vec<String> = (0..25).map(|i| format!("[\"Food {i}\", {i}]")).collect();
    let document = format!(
        "{{\"headers\": [\"Food\", \"Energy\"], \"data\": [{}]}}",
        rows.join(",")
    );
    let (base, _server) = common::serve_once(200, &document).await;

    let msg = load_cmd(reqwest::Client::new(), DataSource::Url(format!("{base}/data.json")))
        .await
        .unwrap();
    assert!(msg.downcast_ref::<DatasetLoadedMsg>().is_some());

    let mut browser = Browser::new(table::Model::new(), paginator::Model::new());
    browser.update(msg);

    assert_eq!(browser.surface().header(), &["Food", "Energy"]);
    assert_eq!(browser.surface().body().len(), 10);
    assert_eq!(browser.paginator().total_pages(), 3);
}

#[tokio::test]
async fn bundled_dataset_loads() {
    let source = DataSource::from("static/nutrition_data.json");
    let dataset = fetch_dataset(&reqwest::Client::new(), &source).await.unwrap();

    assert_eq!(dataset.headers()[0], "Food");
    assert!(dataset.len() > 10);
}
