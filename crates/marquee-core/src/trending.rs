//! Search-count bookkeeping and the trending rail.
//!
//! Every successful search bumps two counters: a per-term row in the
//! search-history collection and a per-movie row (the first hit) in the
//! trending collection. Counters are read-incremented-written from the
//! client, so concurrent searches can lose updates; the numbers only rank
//! a top-10 list, and approximate counts are acceptable. Bookkeeping
//! failures are logged and swallowed - they never break search itself.

use crate::baas::{BaasClient, Document, DocumentQuery};
use crate::config::BaasConfig;
use crate::error::BaasError;
use crate::omdb::Movie;
use crate::time::unix_now;
use crate::watchlist::FALLBACK_POSTER;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;

/// Size of the trending rail.
pub const TRENDING_LIMIT: usize = 10;

/// One counter row. The search-history and trending collections share
/// this shape; only the key attribute differs (`search_term` vs
/// `movie_imdb_id`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchCountEntry {
    pub search_term: String,
    pub count: u64,
    pub movie_title: String,
    pub movie_poster: String,
    pub movie_imdb_id: String,
    /// Unix seconds of the last search that touched this row.
    pub searched_at: u64,
}

/// Async surface of one counter collection.
#[async_trait::async_trait(?Send)]
pub trait CounterCollection {
    async fn find_by(
        &self,
        attribute: &str,
        value: &str,
    ) -> Result<Option<Document<SearchCountEntry>>, BaasError>;
    async fn create(
        &self,
        entry: &SearchCountEntry,
    ) -> Result<Document<SearchCountEntry>, BaasError>;
    async fn bump(&self, document_id: &str, count: u64, searched_at: u64)
        -> Result<(), BaasError>;
    async fn top_by_count(
        &self,
        limit: usize,
    ) -> Result<Vec<Document<SearchCountEntry>>, BaasError>;
}

/// Terms are compared lowercased and trimmed; "Matrix" and " matrix "
/// share a counter.
pub fn normalize_term(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Records one successful search against both counter collections.
pub async fn record_search<C: CounterCollection + ?Sized>(
    history: &C,
    trending: &C,
    raw_term: &str,
    first_hit: &Movie,
) {
    let term = normalize_term(raw_term);
    if term.is_empty() {
        return;
    }
    let now = unix_now();

    if let Err(err) = bump_or_create(history, "search_term", &term, &term, first_hit, now).await {
        warn!("failed to record search term '{}': {}", term, err);
    }
    if let Err(err) = bump_or_create(
        trending,
        "movie_imdb_id",
        &first_hit.imdb_id,
        &term,
        first_hit,
        now,
    )
    .await
    {
        warn!(
            "failed to record trending movie '{}': {}",
            first_hit.imdb_id, err
        );
    }
}

/// Read-increment-write on one counter row, creating it on first sight.
/// Not atomic: two clients can read the same count and both write count+1.
async fn bump_or_create<C: CounterCollection + ?Sized>(
    collection: &C,
    key_attribute: &str,
    key: &str,
    term: &str,
    movie: &Movie,
    now: u64,
) -> Result<(), BaasError> {
    match collection.find_by(key_attribute, key).await? {
        Some(existing) => {
            collection
                .bump(&existing.id, existing.data.count + 1, now)
                .await
        }
        None => {
            let entry = SearchCountEntry {
                search_term: term.to_string(),
                count: 1,
                movie_title: movie.title.clone(),
                movie_poster: movie
                    .poster
                    .clone()
                    .unwrap_or_else(|| FALLBACK_POSTER.to_string()),
                movie_imdb_id: movie.imdb_id.clone(),
                searched_at: now,
            };
            collection.create(&entry).await.map(|_| ())
        }
    }
}

/// Top entries by search count, highest first. Errors yield an empty rail
/// rather than breaking the page.
pub async fn trending_movies<C: CounterCollection + ?Sized>(
    trending: &C,
) -> Vec<Document<SearchCountEntry>> {
    match trending.top_by_count(TRENDING_LIMIT).await {
        Ok(documents) => documents,
        Err(err) => {
            warn!("failed to fetch trending movies: {}", err);
            Vec::new()
        }
    }
}

/// Counter collection persisted in the hosted document store.
#[derive(Debug, Clone)]
pub struct BaasCounters {
    client: BaasClient,
    database_id: String,
    collection_id: String,
}

impl BaasCounters {
    /// The per-term collection (search history).
    pub fn search_history(client: BaasClient, config: &BaasConfig) -> Self {
        Self {
            client,
            database_id: config.database_id.clone(),
            collection_id: config.search_history_collection_id.clone(),
        }
    }

    /// The per-movie collection (trending).
    pub fn trending(client: BaasClient, config: &BaasConfig) -> Self {
        Self {
            client,
            database_id: config.database_id.clone(),
            collection_id: config.trending_collection_id.clone(),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl CounterCollection for BaasCounters {
    async fn find_by(
        &self,
        attribute: &str,
        value: &str,
    ) -> Result<Option<Document<SearchCountEntry>>, BaasError> {
        let page = self
            .client
            .list_documents::<SearchCountEntry>(
                &self.database_id,
                &self.collection_id,
                &[
                    DocumentQuery::equal(attribute, value),
                    DocumentQuery::limit(1),
                ],
            )
            .await?;
        Ok(page.documents.into_iter().next())
    }

    async fn create(
        &self,
        entry: &SearchCountEntry,
    ) -> Result<Document<SearchCountEntry>, BaasError> {
        self.client
            .create_document(&self.database_id, &self.collection_id, entry)
            .await
    }

    async fn bump(
        &self,
        document_id: &str,
        count: u64,
        searched_at: u64,
    ) -> Result<(), BaasError> {
        self.client
            .update_document::<SearchCountEntry>(
                &self.database_id,
                &self.collection_id,
                document_id,
                &json!({"count": count, "searched_at": searched_at}),
            )
            .await
            .map(|_| ())
    }

    async fn top_by_count(
        &self,
        limit: usize,
    ) -> Result<Vec<Document<SearchCountEntry>>, BaasError> {
        let page = self
            .client
            .list_documents::<SearchCountEntry>(
                &self.database_id,
                &self.collection_id,
                &[
                    DocumentQuery::order_desc("count"),
                    DocumentQuery::limit(limit),
                ],
            )
            .await?;
        Ok(page.documents)
    }
}

/// In-memory counter collection used by unit tests.
#[derive(Debug, Default)]
pub struct MemoryCounters {
    rows: std::sync::Mutex<Vec<Document<SearchCountEntry>>>,
    next_id: std::sync::atomic::AtomicU64,
}

impl MemoryCounters {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait(?Send)]
impl CounterCollection for MemoryCounters {
    async fn find_by(
        &self,
        attribute: &str,
        value: &str,
    ) -> Result<Option<Document<SearchCountEntry>>, BaasError> {
        let rows = self.rows.lock().expect("counter lock poisoned");
        Ok(rows
            .iter()
            .find(|doc| match attribute {
                "search_term" => doc.data.search_term == value,
                "movie_imdb_id" => doc.data.movie_imdb_id == value,
                _ => false,
            })
            .cloned())
    }

    async fn create(
        &self,
        entry: &SearchCountEntry,
    ) -> Result<Document<SearchCountEntry>, BaasError> {
        let id = self
            .next_id
            .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        let doc = Document {
            id: format!("mem_{}", id),
            created_at: String::new(),
            data: entry.clone(),
        };
        self.rows
            .lock()
            .expect("counter lock poisoned")
            .push(doc.clone());
        Ok(doc)
    }

    async fn bump(
        &self,
        document_id: &str,
        count: u64,
        searched_at: u64,
    ) -> Result<(), BaasError> {
        let mut rows = self.rows.lock().expect("counter lock poisoned");
        match rows.iter_mut().find(|doc| doc.id == document_id) {
            Some(doc) => {
                doc.data.count = count;
                doc.data.searched_at = searched_at;
                Ok(())
            }
            None => Err(BaasError::Api {
                code: 404,
                message: "document not found".into(),
            }),
        }
    }

    async fn top_by_count(
        &self,
        limit: usize,
    ) -> Result<Vec<Document<SearchCountEntry>>, BaasError> {
        let mut rows = self
            .rows
            .lock()
            .expect("counter lock poisoned")
            .clone();
        rows.sort_by(|a, b| b.data.count.cmp(&a.data.count));
        rows.truncate(limit);
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(imdb_id: &str, title: &str) -> Movie {
        Movie {
            imdb_id: imdb_id.to_string(),
            title: title.to_string(),
            year: "2021".to_string(),
            poster: None,
            media_type: "movie".to_string(),
        }
    }

    #[test]
    fn test_normalize_term() {
        assert_eq!(normalize_term("  The Matrix "), "the matrix");
        assert_eq!(normalize_term(""), "");
    }

    #[tokio::test]
    async fn test_record_search_creates_then_increments() {
        let history = MemoryCounters::new();
        let trending = MemoryCounters::new();
        let hit = movie("tt1160419", "Dune");

        record_search(&history, &trending, "Dune", &hit).await;
        record_search(&history, &trending, " dune ", &hit).await;

        let row = history.find_by("search_term", "dune").await.unwrap().unwrap();
        assert_eq!(row.data.count, 2);
        assert_eq!(row.data.movie_poster, FALLBACK_POSTER);

        let row = trending
            .find_by("movie_imdb_id", "tt1160419")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(row.data.count, 2);
    }

    #[tokio::test]
    async fn test_record_search_ignores_empty_terms() {
        let history = MemoryCounters::new();
        let trending = MemoryCounters::new();
        record_search(&history, &trending, "   ", &movie("tt1", "X")).await;
        assert!(history.top_by_count(10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_trending_orders_by_count_and_caps() {
        let trending = MemoryCounters::new();
        let history = MemoryCounters::new();

        for i in 0..12 {
            let hit = movie(&format!("tt{:07}", i), &format!("Movie {}", i));
            // Movie i gets i+1 searches.
            for _ in 0..=i {
                record_search(&history, &trending, &format!("movie {}", i), &hit).await;
            }
        }

        let rail = trending_movies(&trending).await;
        assert_eq!(rail.len(), TRENDING_LIMIT);
        assert_eq!(rail[0].data.count, 12);
        let counts: Vec<u64> = rail.iter().map(|doc| doc.data.count).collect();
        let mut sorted = counts.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(counts, sorted);
    }
}
