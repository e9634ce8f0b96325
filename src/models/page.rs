use serde::Deserialize;

/// One page of a paginated collection: `{ "data": [...], "links": { "next": ... } }`.
#[derive(Debug, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub links: Option<PageLinks>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PageLinks {
    #[serde(default)]
    pub next: Option<String>,
}

impl<T> Page<T> {
    /// Locator of the following page. Missing, null and empty all mean this is the last page.
    pub fn next_locator(&self) -> Option<&str> {
        self.links
            .as_ref()
            .and_then(|links| links.next.as_deref())
            .filter(|next| !next.is_empty())
    }
}
