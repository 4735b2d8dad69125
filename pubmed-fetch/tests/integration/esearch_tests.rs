//! Integration tests for the ESearch API using mocked HTTP responses
//!
//! These tests verify PMID searches in both JSON and XML format without
//! making real API calls. They use wiremock to simulate NCBI responses.

use pubmed_fetch::{ClientConfig, PubMedClient, PubMedError, ResponseFormat};
use tracing_test::traced_test;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper: JSON response from ESearch
fn esearch_json_response(pmids: &[&str], total_count: usize) -> String {
    let id_list: Vec<String> = pmids.iter().map(|id| format!("\"{}\"", id)).collect();
    format!(
        r#"{{
            "esearchresult": {{
                "count": "{}",
                "retmax": "{}",
                "retstart": "0",
                "idlist": [{}]
            }}
        }}"#,
        total_count,
        pmids.len(),
        id_list.join(",")
    )
}

/// Helper: XML response from ESearch
fn esearch_xml_response(pmids: &[&str], total_count: usize) -> String {
    let id_elements: Vec<String> = pmids.iter().map(|id| format!("<Id>{}</Id>", id)).collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" ?>
<eSearchResult>
    <Count>{}</Count>
    <RetMax>{}</RetMax>
    <RetStart>0</RetStart>
    <IdList>{}</IdList>
</eSearchResult>"#,
        total_count,
        pmids.len(),
        id_elements.join("")
    )
}

/// Helper: create a client pointing at a mock server
fn create_test_client(base_url: &str) -> PubMedClient {
    let config = ClientConfig::new().with_base_url(base_url);
    PubMedClient::with_config(config)
}

// ================================================================================================
// JSON Format Tests
// ================================================================================================

/// Test JSON search returns PMIDs in response order
#[tokio::test]
#[traced_test]
async fn test_search_json_returns_pmids_in_order() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .and(query_param("db", "pubmed"))
        .and(query_param("term", "cancer immunotherapy"))
        .and(query_param("retmode", "json"))
        .and(query_param("retmax", "10"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(esearch_json_response(&["333", "111", "222"], 3)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());

    let pmids = client
        .search_pmids("cancer immunotherapy", 10, ResponseFormat::Json)
        .await
        .expect("JSON search should succeed");

    assert_eq!(pmids, vec!["333", "111", "222"]);
}

/// Test JSON search passes the requested limit as retmax
#[tokio::test]
#[traced_test]
async fn test_search_json_respects_limit() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .and(query_param("retmax", "3"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(esearch_json_response(&["111", "222", "333"], 500)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());

    let pmids = client
        .search_pmids("asthma", 3, ResponseFormat::Json)
        .await
        .expect("search should succeed");

    assert_eq!(pmids.len(), 3);
}

/// Test empty result list is reported as NoResults
#[tokio::test]
#[traced_test]
async fn test_search_json_no_results() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .respond_with(ResponseTemplate::new(200).set_body_string(esearch_json_response(&[], 0)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());

    let result = client
        .search_pmids("zzzznonexistentquery", 10, ResponseFormat::Json)
        .await;

    match result {
        Err(PubMedError::NoResults { query }) => {
            assert_eq!(query, "zzzznonexistentquery");
        }
        other => panic!("expected NoResults, got {:?}", other),
    }
}

/// Test HTTP 500 surfaces as ApiError and is not retried by default
#[tokio::test]
#[traced_test]
async fn test_search_server_error_no_retry_by_default() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());

    let result = client.search_pmids("cancer", 10, ResponseFormat::Json).await;

    match result {
        Err(PubMedError::ApiError { status, .. }) => assert_eq!(status, 500),
        other => panic!("expected ApiError, got {:?}", other),
    }
}

/// Test in-band ERROR field in an otherwise successful response
#[tokio::test]
#[traced_test]
async fn test_search_json_in_band_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{
                "esearchresult": {
                    "ERROR": "Invalid db name specified: pubmedd",
                    "idlist": []
                }
            }"#,
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());

    let result = client.search_pmids("cancer", 10, ResponseFormat::Json).await;

    match result {
        Err(PubMedError::ApiError { status, message }) => {
            assert_eq!(status, 200);
            assert!(message.contains("Invalid db name specified"));
        }
        other => panic!("expected ApiError, got {:?}", other),
    }
}

// ================================================================================================
// XML Format Tests
// ================================================================================================

/// Test XML search requests retmode=xml and preserves PMID order
#[tokio::test]
#[traced_test]
async fn test_search_xml_returns_pmids_in_order() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .and(query_param("retmode", "xml"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(esearch_xml_response(&["555", "444", "666"], 3)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());

    let pmids = client
        .search_pmids("crispr", 10, ResponseFormat::Xml)
        .await
        .expect("XML search should succeed");

    assert_eq!(pmids, vec!["555", "444", "666"]);
}

/// Test empty XML IdList is reported as NoResults
#[tokio::test]
#[traced_test]
async fn test_search_xml_no_results() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .respond_with(ResponseTemplate::new(200).set_body_string(esearch_xml_response(&[], 0)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());

    let result = client.search_pmids("nothing", 10, ResponseFormat::Xml).await;

    assert!(matches!(result, Err(PubMedError::NoResults { .. })));
}

/// Test XML ERROR element is surfaced as ApiError
#[tokio::test]
#[traced_test]
async fn test_search_xml_error_element() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<?xml version="1.0" encoding="UTF-8" ?>
<eSearchResult>
    <Count>0</Count>
    <ERROR>Empty term and query_key - nothing todo</ERROR>
</eSearchResult>"#,
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());

    let result = client.search_pmids("", 10, ResponseFormat::Xml).await;

    match result {
        Err(PubMedError::ApiError { status, message }) => {
            assert_eq!(status, 200);
            assert!(message.contains("nothing todo"));
        }
        other => panic!("expected ApiError, got {:?}", other),
    }
}

/// Test malformed XML is reported as XmlError
#[tokio::test]
#[traced_test]
async fn test_search_xml_malformed_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<eSearchResult><IdList><Id>111</WrongClose></IdList>"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());

    let result = client.search_pmids("cancer", 10, ResponseFormat::Xml).await;

    assert!(matches!(result, Err(PubMedError::XmlError(_))));
}

/// Test special characters in the query are URL-encoded
#[tokio::test]
#[traced_test]
async fn test_search_encodes_query() {
    let mock_server = MockServer::start().await;

    // wiremock matches query parameters after percent-decoding
    Mock::given(method("GET"))
        .and(path("/esearch.fcgi"))
        .and(query_param("term", "BRCA1 & p53"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(esearch_json_response(&["777"], 1)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());

    let pmids = client
        .search_pmids("BRCA1 & p53", 10, ResponseFormat::Json)
        .await
        .expect("encoded search should succeed");

    assert_eq!(pmids, vec!["777"]);
}
