use std::sync::{Arc, Mutex};

use indoc::indoc;
use serde_json::{json, Value};
use wiremock::{
    matchers::{body_json, method, path, path_regex},
    Mock, Request, Respond, ResponseTemplate,
};

use crate::TestCatalog;

const ADD_ITEM: &str = indoc! {r#"
    mutation AddItem($item: ItemInput!) {
      addItem(newItem: $item) {
        itemId
        itemName
        location { state phoneNumber }
      }
    }
"#};

/// A tiny in-memory upstream: `POST /items` stores, `GET /items/{id}` reads back.
#[derive(Clone, Default)]
struct Store {
    items: Arc<Mutex<Vec<Value>>>,
}

impl Respond for Store {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let mut items = self.items.lock().unwrap();

        if request.method.as_str() == "POST" {
            let item: Value = serde_json::from_slice(&request.body).unwrap();
            items.push(item.clone());

            return ResponseTemplate::new(201).set_body_json(item);
        }

        let id = request.url.path().trim_start_matches("/items/");

        match items.iter().find(|item| item["itemId"].to_string() == id) {
            Some(item) => ResponseTemplate::new(200).set_body_json(item),
            None => ResponseTemplate::new(404).set_body_json(json!({ "error": "not found" })),
        }
    }
}

#[tokio::test]
async fn add_item_posts_the_input() {
    let catalog = TestCatalog::start().await;

    Mock::given(method("POST"))
        .and(path("/items"))
        .and(body_json(json!({
            "itemId": 7,
            "itemName": "Stool",
            "location": { "locationId": 3, "state": "TX", "phoneNumber": "555-0199" }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "itemId": 7,
            "itemName": "Stool",
            "location": { "locationId": 3, "state": "TX", "phoneNumber": "555-0199" }
        })))
        .expect(1)
        .mount(&catalog.upstream)
        .await;

    let variables = json!({
        "item": {
            "itemId": 7,
            "itemName": "Stool",
            "location": { "locationId": 3, "state": "TX", "phoneNumber": "555-0199" }
        }
    });

    let response = catalog.execute_with_variables(ADD_ITEM, variables).await;

    let expected = json!({
        "data": {
            "addItem": {
                "itemId": 7,
                "itemName": "Stool",
                "location": { "state": "TX", "phoneNumber": "555-0199" }
            }
        }
    });

    assert_eq!(expected, response);
}

#[tokio::test]
async fn added_item_can_be_read_back() {
    let catalog = TestCatalog::start().await;
    let store = Store::default();

    Mock::given(method("POST"))
        .and(path("/items"))
        .respond_with(store.clone())
        .mount(&catalog.upstream)
        .await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/items/\d+$"))
        .respond_with(store)
        .mount(&catalog.upstream)
        .await;

    let variables = json!({
        "item": {
            "itemId": 42,
            "itemName": "Filing Cabinet",
            "description": "Four drawers",
            "location": { "locationId": 5, "state": "WA", "address": "9 Pine St" }
        }
    });

    let added = catalog.execute_with_variables(ADD_ITEM, variables).await;
    assert_eq!(json!(42), added["data"]["addItem"]["itemId"]);

    let query = "{ item(id: 42) { itemId itemName description location { locationId state address phoneNumber } } }";
    let read = catalog.execute(query).await;

    let expected = json!({
        "data": {
            "item": {
                "itemId": 42,
                "itemName": "Filing Cabinet",
                "description": "Four drawers",
                "location": { "locationId": 5, "state": "WA", "address": "9 Pine St", "phoneNumber": null }
            }
        }
    });

    assert_eq!(expected, read);
}

#[tokio::test]
async fn update_item_patches_by_id() {
    let catalog = TestCatalog::start().await;

    Mock::given(method("PATCH"))
        .and(path("/items/12"))
        .and(body_json(json!({
            "itemId": 12,
            "itemName": "Desk Chair",
            "location": { "locationId": 11, "state": "CA" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "itemId": 12, "itemName": "Desk Chair" })))
        .expect(1)
        .mount(&catalog.upstream)
        .await;

    let query = indoc! {r#"
        mutation {
          updateItem(
            id: 12
            newItem: { itemId: 12, itemName: "Desk Chair", location: { locationId: 11, state: "CA" } }
          ) {
            itemId
            itemName
          }
        }
    "#};

    let response = catalog.execute(query).await;

    assert_eq!(
        json!({ "data": { "updateItem": { "itemId": 12, "itemName": "Desk Chair" } } }),
        response
    );
}

#[tokio::test]
async fn delete_item_returns_the_upstream_answer() {
    let catalog = TestCatalog::start().await;

    Mock::given(method("DELETE"))
        .and(path("/items/21"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "itemId": 21, "itemName": "LAMP SHADE" })))
        .expect(1)
        .mount(&catalog.upstream)
        .await;

    let response = catalog.execute("mutation { deleteItem(id: 21) { itemId itemName } }").await;

    assert_eq!(
        json!({ "data": { "deleteItem": { "itemId": 21, "itemName": "LAMP SHADE" } } }),
        response
    );
}

#[tokio::test]
async fn deleting_a_missing_item_reports_the_upstream_error() {
    let catalog = TestCatalog::start().await;

    Mock::given(method("DELETE"))
        .and(path("/items/999"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "error": "not found" })))
        .mount(&catalog.upstream)
        .await;

    let response = catalog.execute("mutation { deleteItem(id: 999) { itemId } }").await;

    assert_eq!(json!({ "deleteItem": null }), response["data"]);
    assert_eq!(json!(r#"{"error":"not found"}"#), response["errors"][0]["message"]);
    assert_eq!(json!(["deleteItem"]), response["errors"][0]["path"]);
}

#[tokio::test]
async fn missing_required_input_is_rejected_before_the_upstream() {
    let catalog = TestCatalog::start().await;

    let response = catalog
        .execute_with_variables(ADD_ITEM, json!({ "item": { "itemId": 1 } }))
        .await;
    let requests = catalog.upstream.received_requests().await.unwrap();

    assert!(response["errors"].as_array().is_some_and(|errors| !errors.is_empty()));
    assert!(requests.is_empty());
}

#[tokio::test]
async fn item_without_location_is_rejected_before_the_upstream() {
    let catalog = TestCatalog::start().await;

    let variables = json!({ "item": { "itemId": 7, "itemName": "Stool" } });

    let response = catalog.execute_with_variables(ADD_ITEM, variables).await;
    let requests = catalog.upstream.received_requests().await.unwrap();

    assert_eq!(json!(null), response["data"]);

    let message = response["errors"][0]["message"].as_str().unwrap().to_lowercase();

    assert!(message.contains("location"), "{response}");
    assert!(requests.is_empty());
}
