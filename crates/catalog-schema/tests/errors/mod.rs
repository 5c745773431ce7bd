use serde_json::json;
use wiremock::{
    matchers::{method, path},
    Mock, ResponseTemplate,
};

use crate::TestCatalog;

#[tokio::test]
async fn server_errors_are_network_errors() {
    let catalog = TestCatalog::start().await;

    Mock::given(method("GET"))
        .and(path("/items"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&catalog.upstream)
        .await;

    let response = catalog.execute("{ items { itemId } }").await;

    let expected = json!({
        "data": { "items": null },
        "errors": [{
            "message": "Cannot connect with server, please try again later",
            "locations": [{ "line": 1, "column": 3 }],
            "path": ["items"],
            "extensions": { "code": "NETWORK_ERROR" }
        }]
    });

    assert_eq!(expected, response);
}

#[tokio::test]
async fn unreachable_upstream_is_a_network_error() {
    let address = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();

    let fetcher = catalog_upstream::NativeFetcher::runtime_fetcher(format!("http://{address}").parse().unwrap());
    let schema = catalog_schema::build_schema(fetcher);

    let response = serde_json::to_value(schema.execute("{ states }").await).unwrap();

    assert_eq!(json!({ "states": null }), response["data"]);
    assert_eq!(
        json!("Cannot connect with server, please try again later"),
        response["errors"][0]["message"]
    );
    assert_eq!(json!("NETWORK_ERROR"), response["errors"][0]["extensions"]["code"]);
}

#[tokio::test]
async fn upstream_error_bodies_become_the_message() {
    let catalog = TestCatalog::start().await;

    Mock::given(method("GET"))
        .and(path("/items/5"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "error": "not found" })))
        .mount(&catalog.upstream)
        .await;

    let response = catalog.execute("{ item(id: 5) { itemId } }").await;

    let errors = response["errors"].as_array().unwrap();

    assert_eq!(json!({ "item": null }), response["data"]);
    assert_eq!(1, errors.len());
    assert_eq!(json!(r#"{"error":"not found"}"#), errors[0]["message"]);
    assert!(errors[0].get("extensions").is_none());
}

#[tokio::test]
async fn unusable_success_bodies_are_unexpected() {
    let catalog = TestCatalog::start().await;

    Mock::given(method("GET"))
        .and(path("/items"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&catalog.upstream)
        .await;

    let response = catalog.execute("{ filteredItems(name: \"lamp\") { itemId } }").await;

    assert_eq!(json!({ "filteredItems": null }), response["data"]);
    assert_eq!(
        json!("Unexpected server error, please try again later"),
        response["errors"][0]["message"]
    );
}

#[tokio::test]
async fn failing_field_does_not_hide_its_siblings() {
    let catalog = TestCatalog::start().await.with_items(crate::catalog()).await;

    Mock::given(method("GET"))
        .and(path("/items/99"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&catalog.upstream)
        .await;

    let response = catalog.execute("{ states item(id: 99) { itemId } }").await;

    assert_eq!(json!({ "states": ["NY", "CA"], "item": null }), response["data"]);
    assert_eq!(json!(["item"]), response["errors"][0]["path"]);
}

#[tokio::test]
async fn every_failing_field_is_null() {
    let catalog = TestCatalog::start().await;

    Mock::given(method("GET"))
        .and(path("/items"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&catalog.upstream)
        .await;

    let response = catalog.execute("{ items { itemId } states }").await;
    let mut paths: Vec<String> = response["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|error| error["path"].to_string())
        .collect();
    paths.sort();

    assert_eq!(json!({ "items": null, "states": null }), response["data"]);
    assert_eq!(vec![r#"["items"]"#, r#"["states"]"#], paths);
}
