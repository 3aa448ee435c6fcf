//! Query parameter types for API handlers.

use serde::Deserialize;

/// `?search=&state=&limit=&offset=` for the workshop list.
///
/// `limit` and `offset` are clamped in the handler via `clamp_limit` /
/// `clamp_offset`; blank `search` and `state` add no filter.
#[derive(Debug, Default, Deserialize)]
pub struct ListWorkshopsParams {
    pub search: Option<String>,
    pub state: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
