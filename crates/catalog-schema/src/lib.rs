//! The item catalog GraphQL schema.
//!
//! Every field resolves through one call to the upstream REST service, reached through
//! the [`Fetcher`] registered as schema data. Upstream failures come back as field errors
//! classified by [`catalog_upstream::ClassifiedError`].

#![cfg_attr(test, allow(unused_crate_dependencies))]

mod error;
mod filter;
mod item;
mod mutation;
mod query;

use async_graphql::{EmptySubscription, Schema, SchemaBuilder};
use catalog_upstream::Fetcher;

pub use error::UpstreamError;
pub use filter::{distinct_states, ItemFilter};
pub use item::{Item, ItemInput, Location, LocationInput};
pub use mutation::Mutation;
pub use query::Query;

pub type CatalogSchema = Schema<Query, Mutation, EmptySubscription>;

/// Starts a schema wired to the given upstream. Callers can adjust it (introspection,
/// limits) before finishing.
pub fn schema_builder(fetcher: Fetcher) -> SchemaBuilder<Query, Mutation, EmptySubscription> {
    Schema::build(Query, Mutation, EmptySubscription).data(fetcher)
}

pub fn build_schema(fetcher: Fetcher) -> CatalogSchema {
    schema_builder(fetcher).finish()
}
