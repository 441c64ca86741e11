use futures::stream::BoxStream;

use crate::collector::FetchResult;

/// A domain operation yielding its results asynchronously.
///
/// The returned stream emits at least one result before completing.
pub trait UseCase: Send + Sync + 'static {
    type Params: Send + 'static;
    type Output: Send + 'static;

    fn invoke(&self, params: Self::Params) -> BoxStream<'static, FetchResult<Self::Output>>;
}

/// Params for paged listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    pub page: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovieDetailParams {
    pub movie_id: i32,
}
