use async_graphql::{Context, Object, Result};
use catalog_upstream::FetchRequest;

use crate::{
    error::fetch,
    filter::{distinct_states, ItemFilter},
    item::ItemList,
    Item,
};

/// Path segment sent for `item` when no id is given.
const MISSING_ID: &str = "undefined";

#[derive(Default)]
pub struct Query;

#[Object]
impl Query {
    /// Lists catalog items. `search` is forwarded to the upstream as is.
    async fn items(&self, ctx: &Context<'_>, search: Option<String>) -> Result<Option<Vec<Option<Item>>>> {
        let mut request = FetchRequest::get("/items");

        if let Some(search) = search.filter(|search| !search.is_empty()) {
            request = request.with_query("search", search);
        }

        list_items(ctx, request).await
    }

    /// A single item by id.
    async fn item(&self, ctx: &Context<'_>, id: Option<i32>) -> Result<Option<Item>> {
        let id = id.map_or_else(|| MISSING_ID.to_string(), |id| id.to_string());

        fetch::<Option<Item>>(ctx, FetchRequest::get(format!("/items/{id}")))
            .await
            .map(Option::flatten)
    }

    /// All items, narrowed down locally. Filters left out match everything.
    async fn filtered_items(
        &self,
        ctx: &Context<'_>,
        id: Option<i32>,
        name: Option<String>,
        state: Option<String>,
    ) -> Result<Option<Vec<Option<Item>>>> {
        let filter = ItemFilter { id, name, state };

        let Some(items) = list_items(ctx, FetchRequest::get("/items")).await? else {
            return Ok(None);
        };

        let total = items.len();
        let items = filter.apply(items);
        tracing::debug!(total, matched = items.len(), "filtered catalog items");

        Ok(Some(items))
    }

    /// The states items are located in, in order of first appearance.
    async fn states(&self, ctx: &Context<'_>) -> Result<Option<Vec<String>>> {
        let items = list_items(ctx, FetchRequest::get("/items")).await?;

        Ok(items.map(|items| distinct_states(items.iter().flatten())))
    }
}

/// `None` when the upstream call failed and the error is already recorded.
async fn list_items(ctx: &Context<'_>, request: FetchRequest) -> Result<Option<Vec<Option<Item>>>> {
    let items = fetch::<Option<ItemList>>(ctx, request).await?;

    Ok(items.map(|items| items.unwrap_or_default().0))
}
