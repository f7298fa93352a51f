//! Page aggregation
//!
//! Drives a paged list endpoint across all pages of a collection.
//!
//! ## Cursor Protocol
//!
//! 1. The first request asks for page 0
//! 2. Each response reports `nextPage` and `lastPage`
//! 3. The next request asks for the previously returned `nextPage`
//! 4. Aggregation stops once the page just requested equals `lastPage`
//!
//! `lastPage` is inclusive, so the last page is always fetched. If the server
//! asks for a page that does not come after the one just fetched, the cursor
//! is not advancing and the aggregation fails with [`Error::Protocol`] instead
//! of looping forever.

use std::future::Future;

use tracing::debug;

use crate::error::{Error, Result};
use crate::model::PagedResponse;

/// Page index of the first request
pub const FIRST_PAGE: i32 = 0;

/// Fetch every page through `fetch_page` and concatenate the items in order
///
/// `fetch_page` receives the page index to request. Errors from any page abort
/// the aggregation.
pub async fn collect_pages<T, F, Fut>(mut fetch_page: F) -> Result<Vec<T>>
where
    F: FnMut(i32) -> Fut,
    Fut: Future<Output = Result<PagedResponse<T>>>,
{
    let mut items = Vec::new();
    let mut page = FIRST_PAGE;

    loop {
        let response = fetch_page(page).await?;
        debug!(
            "Fetched page {} ({} item(s), nextPage={}, lastPage={})",
            page,
            response.data.len(),
            response.next_page,
            response.last_page
        );
        items.extend(response.data);

        if page == response.last_page {
            break;
        }

        if response.next_page <= page {
            return Err(Error::protocol(format!(
                "pagination cursor did not advance: requested page {}, server reported nextPage={} and lastPage={}",
                page, response.next_page, response.last_page
            )));
        }

        page = response.next_page;
    }

    Ok(items)
}
