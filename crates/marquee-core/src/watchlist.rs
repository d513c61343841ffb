//! Per-user watchlist membership over the document store.
//!
//! One entry per (user, movie) pair, denormalized so the watchlist page
//! renders without re-querying the movie API. Uniqueness is enforced only
//! by a client-side existence check before insert: two concurrent toggles
//! can still race into a duplicate entry or a delete-after-delete error.
//! The UI guards the common case with an in-flight flag and surfaces the
//! rest as an alert; there is no server-side constraint.

use crate::baas::{BaasClient, Document, DocumentQuery};
use crate::config::BaasConfig;
use crate::error::BaasError;
use crate::omdb::Movie;
use serde::{Deserialize, Serialize};

/// Poster shipped with the app bundle, used when the API has none.
pub const FALLBACK_POSTER: &str = "/fallback.png";

/// Denormalized copy of a movie, keyed by owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchlistEntry {
    pub user_id: String,
    pub movie_imdb_id: String,
    pub movie_title: String,
    pub movie_poster: String,
    pub movie_year: String,
}

impl WatchlistEntry {
    pub fn from_movie(user_id: &str, movie: &Movie) -> Self {
        Self {
            user_id: user_id.to_string(),
            movie_imdb_id: movie.imdb_id.clone(),
            movie_title: movie.title.clone(),
            movie_poster: movie
                .poster
                .clone()
                .unwrap_or_else(|| FALLBACK_POSTER.to_string()),
            movie_year: movie.year.clone(),
        }
    }
}

/// Outcome of a membership toggle.
#[derive(Debug, Clone, PartialEq)]
pub enum WatchlistChange {
    Added { document_id: String },
    Removed,
}

/// Async CRUD surface of the watchlist collection.
///
/// Implemented by [`BaasWatchlist`] against the hosted document store and
/// by [`InMemoryWatchlist`] for tests. `?Send` because browser futures are
/// not `Send`.
#[async_trait::async_trait(?Send)]
pub trait WatchlistStore {
    async fn add(&self, user_id: &str, movie: &Movie)
        -> Result<Document<WatchlistEntry>, BaasError>;
    async fn remove(&self, document_id: &str) -> Result<(), BaasError>;
    async fn list(&self, user_id: &str) -> Result<Vec<Document<WatchlistEntry>>, BaasError>;
    async fn find(
        &self,
        user_id: &str,
        imdb_id: &str,
    ) -> Result<Option<Document<WatchlistEntry>>, BaasError>;
}

/// Toggles membership for `(user, movie)`.
///
/// Check existence, then delete or insert: a two-round-trip
/// read-modify-write with no concurrency control. Toggling twice returns
/// the entry to its original state absent concurrent modification.
pub async fn toggle<S: WatchlistStore + ?Sized>(
    store: &S,
    user_id: &str,
    movie: &Movie,
) -> Result<WatchlistChange, BaasError> {
    match store.find(user_id, &movie.imdb_id).await? {
        Some(existing) => {
            store.remove(&existing.id).await?;
            Ok(WatchlistChange::Removed)
        }
        None => {
            let doc = store.add(user_id, movie).await?;
            Ok(WatchlistChange::Added {
                document_id: doc.id,
            })
        }
    }
}

/// Toggles membership on behalf of an optional viewer.
///
/// With no signed-in viewer the store is never touched and `Ok(None)` is
/// returned; the UI turns that into a login prompt.
pub async fn toggle_for_viewer<S: WatchlistStore + ?Sized>(
    store: &S,
    viewer: Option<&str>,
    movie: &Movie,
) -> Result<Option<WatchlistChange>, BaasError> {
    match viewer {
        Some(user_id) => toggle(store, user_id, movie).await.map(Some),
        None => Ok(None),
    }
}

/// Watchlist persisted in the hosted document store.
#[derive(Debug, Clone)]
pub struct BaasWatchlist {
    client: BaasClient,
    database_id: String,
    collection_id: String,
}

impl BaasWatchlist {
    pub fn new(client: BaasClient, config: &BaasConfig) -> Self {
        Self {
            client,
            database_id: config.database_id.clone(),
            collection_id: config.watchlist_collection_id.clone(),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl WatchlistStore for BaasWatchlist {
    async fn add(
        &self,
        user_id: &str,
        movie: &Movie,
    ) -> Result<Document<WatchlistEntry>, BaasError> {
        let entry = WatchlistEntry::from_movie(user_id, movie);
        self.client
            .create_document(&self.database_id, &self.collection_id, &entry)
            .await
    }

    async fn remove(&self, document_id: &str) -> Result<(), BaasError> {
        self.client
            .delete_document(&self.database_id, &self.collection_id, document_id)
            .await
    }

    async fn list(&self, user_id: &str) -> Result<Vec<Document<WatchlistEntry>>, BaasError> {
        let page = self
            .client
            .list_documents::<WatchlistEntry>(
                &self.database_id,
                &self.collection_id,
                &[DocumentQuery::equal("user_id", user_id)],
            )
            .await?;
        Ok(page.documents)
    }

    async fn find(
        &self,
        user_id: &str,
        imdb_id: &str,
    ) -> Result<Option<Document<WatchlistEntry>>, BaasError> {
        let page = self
            .client
            .list_documents::<WatchlistEntry>(
                &self.database_id,
                &self.collection_id,
                &[
                    DocumentQuery::equal("user_id", user_id),
                    DocumentQuery::equal("movie_imdb_id", imdb_id),
                    DocumentQuery::limit(1),
                ],
            )
            .await?;
        Ok(page.documents.into_iter().next())
    }
}

/// In-memory store used by unit tests and native development builds.
#[derive(Debug, Default)]
pub struct InMemoryWatchlist {
    entries: std::sync::Mutex<Vec<Document<WatchlistEntry>>>,
    next_id: std::sync::atomic::AtomicU64,
}

impl InMemoryWatchlist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().expect("watchlist lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait::async_trait(?Send)]
impl WatchlistStore for InMemoryWatchlist {
    async fn add(
        &self,
        user_id: &str,
        movie: &Movie,
    ) -> Result<Document<WatchlistEntry>, BaasError> {
        let id = self
            .next_id
            .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        let doc = Document {
            id: format!("mem_{}", id),
            created_at: String::new(),
            data: WatchlistEntry::from_movie(user_id, movie),
        };
        self.entries
            .lock()
            .expect("watchlist lock poisoned")
            .push(doc.clone());
        Ok(doc)
    }

    async fn remove(&self, document_id: &str) -> Result<(), BaasError> {
        let mut entries = self.entries.lock().expect("watchlist lock poisoned");
        let before = entries.len();
        entries.retain(|doc| doc.id != document_id);
        if entries.len() == before {
            return Err(BaasError::Api {
                code: 404,
                message: format!("Document with the requested ID '{}' could not be found", document_id),
            });
        }
        Ok(())
    }

    async fn list(&self, user_id: &str) -> Result<Vec<Document<WatchlistEntry>>, BaasError> {
        let entries = self.entries.lock().expect("watchlist lock poisoned");
        Ok(entries
            .iter()
            .filter(|doc| doc.data.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find(
        &self,
        user_id: &str,
        imdb_id: &str,
    ) -> Result<Option<Document<WatchlistEntry>>, BaasError> {
        let entries = self.entries.lock().expect("watchlist lock poisoned");
        Ok(entries
            .iter()
            .find(|doc| doc.data.user_id == user_id && doc.data.movie_imdb_id == imdb_id)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(imdb_id: &str, poster: Option<&str>) -> Movie {
        Movie {
            imdb_id: imdb_id.to_string(),
            title: "Arrival".to_string(),
            year: "2016".to_string(),
            poster: poster.map(str::to_string),
            media_type: "movie".to_string(),
        }
    }

    #[test]
    fn test_entry_substitutes_fallback_poster() {
        let entry = WatchlistEntry::from_movie("user_1", &movie("tt2543164", None));
        assert_eq!(entry.movie_poster, FALLBACK_POSTER);

        let entry = WatchlistEntry::from_movie(
            "user_1",
            &movie("tt2543164", Some("https://img.example/arrival.jpg")),
        );
        assert_eq!(entry.movie_poster, "https://img.example/arrival.jpg");
    }

    #[tokio::test]
    async fn test_toggle_adds_then_removes() {
        let store = InMemoryWatchlist::new();
        let movie = movie("tt2543164", None);

        let change = toggle(&store, "user_1", &movie).await.unwrap();
        assert!(matches!(change, WatchlistChange::Added { .. }));
        assert_eq!(store.len(), 1);

        // Toggling twice returns the item to its original state.
        let change = toggle(&store, "user_1", &movie).await.unwrap();
        assert_eq!(change, WatchlistChange::Removed);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_membership_is_per_user() {
        let store = InMemoryWatchlist::new();
        let movie = movie("tt2543164", None);

        toggle(&store, "user_1", &movie).await.unwrap();
        let change = toggle(&store, "user_2", &movie).await.unwrap();

        // Second user's toggle adds rather than removing the first user's entry.
        assert!(matches!(change, WatchlistChange::Added { .. }));
        assert_eq!(store.len(), 2);
        assert_eq!(store.list("user_1").await.unwrap().len(), 1);
        assert_eq!(store.list("user_2").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_signed_out_toggle_never_touches_the_store() {
        let store = InMemoryWatchlist::new();
        let movie = movie("tt2543164", None);

        let change = toggle_for_viewer(&store, None, &movie).await.unwrap();
        assert_eq!(change, None);
        assert!(store.is_empty());

        let change = toggle_for_viewer(&store, Some("user_1"), &movie)
            .await
            .unwrap();
        assert!(matches!(change, Some(WatchlistChange::Added { .. })));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_remove_missing_document_errors() {
        let store = InMemoryWatchlist::new();
        let result = store.remove("mem_999").await;
        assert!(matches!(result, Err(BaasError::Api { code: 404, .. })));
    }
}
