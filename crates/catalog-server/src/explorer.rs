use async_graphql::http::GraphiQLSource;
use axum::{
    response::Html,
    routing::{get, MethodRouter},
};

/// A GraphiQL page talking to the GraphQL endpoint at `endpoint`.
pub(crate) fn route(endpoint: &str) -> MethodRouter {
    let page = Html(GraphiQLSource::build().endpoint(endpoint).title("Item catalog").finish());

    get(move || {
        let page = page.clone();
        async move { page }
    })
}
