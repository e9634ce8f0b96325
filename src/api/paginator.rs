use futures::{stream, Stream, TryStreamExt};
use reqwest::Url;
use serde::de::DeserializeOwned;

use super::FetchJson;
use crate::{models::Page, AppError, AppResult};

/// Lazily walks a paginated collection starting at `start`.
///
/// Yields the items of one page per element. Each page is requested only after the
/// previous one has been decoded, since its URL comes from the previous page's
/// `links.next`. The stream ends after a page without a next locator, or right after
/// the first error.
pub fn pages<'a, T, F>(fetcher: &'a F, start: Url) -> impl Stream<Item = AppResult<Vec<T>>> + 'a
where
    T: DeserializeOwned + 'a,
    F: FetchJson + 'a,
{
    stream::try_unfold(Some(start), move |cursor| async move {
        match cursor {
            Some(url) => fetch_page::<T, F>(fetcher, url).await.map(Some),
            None => Ok(None),
        }
    })
}

/// Fetches every page of a collection and concatenates the items in page order.
pub async fn fetch_all<T, F>(fetcher: &F, start: Url) -> AppResult<Vec<T>>
where
    T: DeserializeOwned,
    F: FetchJson,
{
    let collection = start.path().to_string();

    let (page_count, items) = pages(fetcher, start)
        .try_fold((0usize, Vec::new()), |(page_count, mut items), page| async move {
            items.extend(page);
            Ok::<_, AppError>((page_count + 1, items))
        })
        .await?;

    tracing::info!(collection = %collection, pages = page_count, items = items.len(), "Collection fetched");

    Ok(items)
}

async fn fetch_page<T, F>(fetcher: &F, url: Url) -> AppResult<(Vec<T>, Option<Url>)>
where
    T: DeserializeOwned,
    F: FetchJson,
{
    let body = fetcher.fetch_json(&url).await?;

    let page: Page<T> = serde_json::from_value(body).map_err(|e| AppError::Decode {
        url: url.to_string(),
        message: e.to_string(),
    })?;

    // Absolute locators are taken verbatim, relative ones resolve against this page
    let next = match page.next_locator() {
        Some(locator) => Some(url.join(locator).map_err(|e| AppError::Decode {
            url: url.to_string(),
            message: format!("invalid next link {:?}: {}", locator, e),
        })?),
        None => None,
    };

    if next.as_ref() == Some(&url) {
        return Err(AppError::Decode {
            url: url.to_string(),
            message: "next link points back at the same page".to_string(),
        });
    }

    tracing::debug!(url = %url, items = page.data.len(), has_next = next.is_some(), "Fetched page");

    Ok((page.data, next))
}
