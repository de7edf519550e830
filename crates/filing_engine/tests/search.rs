use filing_engine::{
    ClientSettings, FailureKind, ReportEntry, ReqwestSearchClient, SearchClient, SearchQuery,
};
use pretty_assertions::assert_eq;
use reqwest::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ReqwestSearchClient {
    let base = Url::parse(&server.uri()).expect("mock uri");
    ReqwestSearchClient::new(&ClientSettings::new(base)).expect("client")
}

fn query(year: Option<&str>) -> SearchQuery {
    SearchQuery {
        query: "2330".to_string(),
        report_type: "annual".to_string(),
        year: year.map(str::to_string),
    }
}

#[tokio::test]
async fn search_sends_parameters_and_parses_reports() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/reports"))
        .and(query_param("query", "2330"))
        .and(query_param("report_type", "annual"))
        .and(query_param("year", "2023"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{
                "stock_id": "2330",
                "stock_name": "台积电",
                "report_type": "ndbg",
                "report_type_label": "年报",
                "year": 2023,
                "reports": [
                    {"id": "r2", "date": "2024-03-01", "title": "2023年报", "detail_url": "x"},
                    {"id": "r1", "date": "2023-03-01", "title": "2022年报"}
                ]
            }"#,
            "application/json",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server)
        .search(&query(Some("2023")))
        .await
        .expect("search ok");

    assert_eq!(response.stock_id, "2330");
    assert_eq!(response.stock_name, "台积电");
    assert_eq!(response.report_type_label.as_deref(), Some("年报"));
    assert_eq!(
        response.into_reports(),
        vec![
            ReportEntry {
                id: "r2".to_string(),
                date: "2024-03-01".to_string(),
                title: "2023年报".to_string(),
            },
            ReportEntry {
                id: "r1".to_string(),
                date: "2023-03-01".to_string(),
                title: "2022年报".to_string(),
            },
        ]
    );
}

#[tokio::test]
async fn year_is_omitted_when_unfiltered() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/reports"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"stock_id": "2330", "stock_name": "台积电"}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let response = client_for(&server).search(&query(None)).await.expect("ok");
    assert!(response.reports().is_empty());
    assert_eq!(response.report_type_label, None);

    let requests = server.received_requests().await.expect("recording");
    assert_eq!(requests.len(), 1);
    assert!(requests[0]
        .url
        .query_pairs()
        .all(|(key, _)| key != "year"));
}

#[tokio::test]
async fn error_status_carries_backend_detail() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/reports"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_raw(r#"{"detail":"rate limited"}"#, "application/json"),
        )
        .mount(&server)
        .await;

    let err = client_for(&server).search(&query(None)).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(500));
    assert_eq!(err.detail.as_deref(), Some("rate limited"));
}

#[tokio::test]
async fn error_status_without_json_has_no_detail() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/reports"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let err = client_for(&server).search(&query(None)).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(502));
    assert_eq!(err.detail, None);
}

#[tokio::test]
async fn validation_error_list_is_not_used_as_detail() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/reports"))
        .respond_with(ResponseTemplate::new(422).set_body_raw(
            r#"{"detail":[{"loc":["query","year"],"msg":"not an int"}]}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let err = client_for(&server).search(&query(None)).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(422));
    assert_eq!(err.detail, None);
}

#[tokio::test]
async fn malformed_success_body_is_a_decode_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/reports"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).search(&query(None)).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Decode);
    assert_eq!(err.detail, None);
}

#[tokio::test]
async fn unreachable_backend_is_a_network_failure() {
    let server = MockServer::start().await;
    let base = Url::parse(&server.uri()).expect("mock uri");
    drop(server);

    let client = ReqwestSearchClient::new(&ClientSettings::new(base)).expect("client");
    let err = client.search(&query(None)).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Network);
    assert_eq!(err.detail, None);
}
