//! Live-source endpoint URL construction.
//!
//! The provider exposes two bases: a catalog endpoint that serves
//! trending batches (also parameterized for keyword search) and a
//! search endpoint used for category browsing. Query values are
//! percent-encoded; the bases come from configuration.

/// URL builders for the live source.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub catalog_url: String,
    pub search_url: String,
}

fn encode(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

impl Endpoints {
    pub fn new(catalog_url: impl Into<String>, search_url: impl Into<String>) -> Self {
        Self { catalog_url: catalog_url.into(), search_url: search_url.into() }
    }

    /// Catalog batch of the given size. Serves trending pages and the
    /// broad batches behind details/streams resolution.
    pub fn catalog(&self, count: usize) -> String {
        format!("{}?count={count}", self.catalog_url)
    }

    /// Keyword search against the catalog endpoint.
    pub fn search(&self, term: &str, count: usize, offset: usize) -> String {
        format!("{}/?search={}&count={count}&offset={offset}", self.catalog_url, encode(term))
    }

    /// Category browse against the search endpoint.
    pub fn category(&self, genre: &str, count: usize) -> String {
        format!("{}?q={}&count={count}", self.search_url, encode(genre))
    }
}
