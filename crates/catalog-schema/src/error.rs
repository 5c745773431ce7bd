use async_graphql::{Context, ErrorExtensions};
use catalog_upstream::{ClassifiedError, FetchRequest, Fetcher};
use serde::de::DeserializeOwned;

/// A classified upstream failure, reported as a GraphQL field error.
///
/// Network errors carry `extensions.code = "NETWORK_ERROR"`. Other kinds only carry their
/// message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamError(pub ClassifiedError);

impl ErrorExtensions for UpstreamError {
    fn extend(&self) -> async_graphql::Error {
        let error = async_graphql::Error::new(self.0.message.clone());

        match self.0.kind.extension_code() {
            Some(code) => error.extend_with(|_, extensions| extensions.set("code", code)),
            None => error,
        }
    }
}

/// Sends one request to the upstream registered in the schema data.
///
/// A classified failure is recorded as an error on the current field, which then
/// resolves to `None` so that sibling fields keep their data.
pub(crate) async fn fetch<T>(ctx: &Context<'_>, request: FetchRequest) -> async_graphql::Result<Option<T>>
where
    T: DeserializeOwned,
{
    let fetcher = ctx.data::<Fetcher>()?;

    match fetcher.call_as(request).await {
        Ok(value) => Ok(Some(value)),
        Err(error) => {
            report(ctx, error);
            Ok(None)
        }
    }
}

/// Records `error` against the field being resolved.
pub(crate) fn report(ctx: &Context<'_>, error: ClassifiedError) {
    let error = UpstreamError(error).extend().into_server_error(ctx.item.pos);
    ctx.add_error(ctx.set_error_path(error));
}
