//! Address lookup API over real HTTP.

use std::collections::HashSet;

use erp_dashboard_core::AddressCatalog;
use erp_dashboard_integration_tests::TestServer;
use reqwest::StatusCode;
use serde_json::{Value, json};

async fn get_json(server: &TestServer, path: &str) -> (StatusCode, Value) {
    let resp = server
        .client
        .get(server.url(path))
        .send()
        .await
        .expect("Request failed");
    let status = resp.status();
    let body = resp.json::<Value>().await.expect("Body is not JSON");
    (status, body)
}

fn data(body: &Value) -> &Vec<Value> {
    body["data"].as_array().expect("data is not an array")
}

#[tokio::test]
async fn test_provinces_are_projected() {
    let server = TestServer::start().await;
    let (status, body) = get_json(&server, "/address/provinces").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let provinces = data(&body);
    assert!(!provinces.is_empty());
    for province in provinces {
        assert_eq!(province["type"], "province");
        let keys: HashSet<&str> = province
            .as_object()
            .expect("province is not an object")
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, HashSet::from(["code", "name", "type"]));
    }

    server.stop().await;
}

#[tokio::test]
async fn test_provinces_are_stable_across_calls() {
    let server = TestServer::start().await;
    let (_, first) = get_json(&server, "/address/provinces").await;
    let (_, second) = get_json(&server, "/address/provinces").await;
    assert_eq!(first, second);
    server.stop().await;
}

#[tokio::test]
async fn test_cities_belong_to_their_province() {
    let server = TestServer::start().await;
    let (_, body) = get_json(&server, "/address/provinces").await;

    for province in data(&body) {
        let code = province["code"].as_str().expect("code is not a string");
        let (status, cities) =
            get_json(&server, &format!("/address/cities?provinceCode={code}")).await;
        assert_eq!(status, StatusCode::OK);
        for city in data(&cities) {
            assert_eq!(city["type"], "city");
            assert_eq!(city["parentCode"], code);
        }
    }

    server.stop().await;
}

#[tokio::test]
async fn test_districts_of_guangzhou() {
    let server = TestServer::start().await;
    let (status, body) = get_json(&server, "/address/districts?cityCode=440100").await;

    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = data(&body)
        .iter()
        .filter_map(|d| d["name"].as_str())
        .collect();
    assert_eq!(names, ["荔湾区", "越秀区", "天河区", "番禺区"]);

    server.stop().await;
}

#[tokio::test]
async fn test_unknown_codes_return_empty_lists() {
    let server = TestServer::start().await;

    let (status, body) = get_json(&server, "/address/cities?provinceCode=unknown-code").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true, "data": []}));

    let (status, body) = get_json(&server, "/address/districts?cityCode=unknown-code").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true, "data": []}));

    server.stop().await;
}

#[tokio::test]
async fn test_node_lookup() {
    let server = TestServer::start().await;

    let (status, body) = get_json(&server, "/address/nodes/440305").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"],
        json!({"code": "440305", "name": "南山区", "type": "district", "parentCode": "440300"})
    );

    let (status, body) = get_json(&server, "/address/nodes/000000").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);

    server.stop().await;
}

#[tokio::test]
async fn test_custom_catalog() {
    let catalog = AddressCatalog::from_json(
        r#"[{"code": "650000", "name": "新疆维吾尔自治区",
             "cities": [{"code": "650100", "name": "乌鲁木齐市"}]}]"#,
    )
    .expect("Catalog should parse");
    let server = TestServer::start_with_catalog(catalog).await;

    let (_, body) = get_json(&server, "/address/provinces").await;
    assert_eq!(
        body["data"],
        json!([{"code": "650000", "name": "新疆维吾尔自治区", "type": "province"}])
    );

    server.stop().await;
}

#[tokio::test]
async fn test_dataset_unavailable() {
    let server = TestServer::start_without_dataset().await;

    let (status, body) = get_json(&server, "/address/provinces").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "获取地址数据失败");

    let resp = server
        .client
        .get(server.url("/health/ready"))
        .send()
        .await
        .expect("Request failed");
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

    server.stop().await;
}

#[tokio::test]
async fn test_missing_dataset_file_is_reported_not_fatal() {
    let config = erp_dashboard_server::config::ServerConfig {
        address_dataset: Some("/nonexistent/regions.json".into()),
        ..Default::default()
    };
    let server = TestServer::start_with(config).await;

    let resp = server
        .client
        .get(server.url("/health"))
        .send()
        .await
        .expect("Request failed");
    assert_eq!(resp.status(), StatusCode::OK);

    let (status, _) = get_json(&server, "/address/provinces").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    server.stop().await;
}
