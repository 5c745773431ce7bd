//! Transport to the upstream item catalog REST service.
//!
//! Resolvers talk to the upstream through a [`Fetcher`], which hands the request to a
//! [`FetcherInner`] implementation and turns the outcome into either the parsed JSON body
//! or a [`ClassifiedError`]. [`NativeFetcher`] is the reqwest backed implementation used
//! by the server.

#![cfg_attr(test, allow(unused_crate_dependencies))]

mod error;
mod fetch;
mod native;

pub use error::{ClassifiedError, ErrorKind, FetchError, FetchResult, NETWORK_ERROR_MESSAGE, UNEXPECTED_ERROR_MESSAGE};
pub use fetch::{FetchRequest, FetchResponse, Fetcher, FetcherInner, UpstreamMethod};
pub use native::NativeFetcher;
