use async_graphql::{Context, Object, Result};
use catalog_upstream::FetchRequest;

use crate::{
    error::{fetch, report},
    Item, ItemInput,
};

#[derive(Default)]
pub struct Mutation;

#[Object]
impl Mutation {
    /// Creates an item and returns it as stored by the upstream.
    async fn add_item(&self, ctx: &Context<'_>, new_item: ItemInput) -> Result<Option<Item>> {
        send_item(ctx, FetchRequest::post("/items"), &new_item).await
    }

    async fn update_item(&self, ctx: &Context<'_>, id: i32, new_item: ItemInput) -> Result<Option<Item>> {
        send_item(ctx, FetchRequest::patch(format!("/items/{id}")), &new_item).await
    }

    /// Deletes an item. Returns what the upstream answers with, usually the removed record.
    async fn delete_item(&self, ctx: &Context<'_>, id: i32) -> Result<Option<Item>> {
        fetch::<Option<Item>>(ctx, FetchRequest::delete(format!("/items/{id}")))
            .await
            .map(Option::flatten)
    }
}

async fn send_item(ctx: &Context<'_>, request: FetchRequest, item: &ItemInput) -> Result<Option<Item>> {
    let request = match request.with_json(item) {
        Ok(request) => request,
        Err(error) => {
            report(ctx, error);
            return Ok(None);
        }
    };

    fetch::<Option<Item>>(ctx, request).await.map(Option::flatten)
}
