//! Cached catalog values.

use std::sync::Arc;

use crate::documents::{Category, Food};

/// Values held in the catalog cache.
///
/// Wrapped in `Arc` so cache hits clone a pointer, not the vectors.
#[derive(Clone)]
pub(crate) enum CacheValue {
    Foods(Arc<Vec<Food>>),
    Categories(Arc<Vec<Category>>),
}
