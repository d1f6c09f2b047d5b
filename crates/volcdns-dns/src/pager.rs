//! Page-number pagination over provider list APIs

use std::future::Future;

use crate::errors::DnsError;

/// One page of results together with the provider-reported total
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: usize) -> Self {
        Self { items, total }
    }
}

/// Fetch every page, starting at page 1, and concatenate the items
///
/// Stops once `page * page_size` reaches the reported total, not when a short
/// page comes back. The first failing page aborts the whole walk and nothing
/// collected so far is returned.
pub async fn query_all<T, F, Fut>(page_size: usize, mut fetch: F) -> Result<Vec<T>, DnsError>
where
    F: FnMut(usize, usize) -> Fut,
    Fut: Future<Output = Result<Page<T>, DnsError>>,
{
    if page_size == 0 {
        return Err(DnsError::InvalidArgument(
            "page size must be greater than 0".to_string(),
        ));
    }

    let mut all = Vec::new();
    let mut page_number = 1;
    loop {
        let page = fetch(page_number, page_size).await?;
        all.extend(page.items);
        if page_number * page_size >= page.total {
            break;
        }
        page_number += 1;
    }

    Ok(all)
}
