//! Integration tests exercising the glue layer end to end against the
//! in-memory stores.

use marquee_core::omdb::Movie;
use marquee_core::trending::{record_search, trending_movies, MemoryCounters};
use marquee_core::watchlist::{toggle, InMemoryWatchlist, WatchlistChange, WatchlistStore};

fn movie(imdb_id: &str, title: &str, poster: Option<&str>) -> Movie {
    Movie {
        imdb_id: imdb_id.to_string(),
        title: title.to_string(),
        year: "1999".to_string(),
        poster: poster.map(str::to_string),
        media_type: "movie".to_string(),
    }
}

#[tokio::test]
async fn watchlist_round_trip() {
    let store = InMemoryWatchlist::new();
    let matrix = movie("tt0133093", "The Matrix", Some("https://img.example/m.jpg"));
    let inception = movie("tt1375666", "Inception", None);

    // Add two movies for one user.
    let change = toggle(&store, "user_1", &matrix).await.unwrap();
    let WatchlistChange::Added { document_id } = change else {
        panic!("expected Added");
    };
    toggle(&store, "user_1", &inception).await.unwrap();

    let entries = store.list("user_1").await.unwrap();
    assert_eq!(entries.len(), 2);
    assert!(entries.iter().any(|doc| doc.id == document_id));

    // Membership check finds the denormalized copy.
    let found = store.find("user_1", "tt0133093").await.unwrap().unwrap();
    assert_eq!(found.data.movie_title, "The Matrix");

    // Removing by document id prunes exactly one entry.
    store.remove(&found.id).await.unwrap();
    assert_eq!(store.list("user_1").await.unwrap().len(), 1);
    assert!(store.find("user_1", "tt0133093").await.unwrap().is_none());
}

#[tokio::test]
async fn search_counts_feed_the_trending_rail() {
    let history = MemoryCounters::new();
    let trending = MemoryCounters::new();

    let dune = movie("tt1160419", "Dune", None);
    let matrix = movie("tt0133093", "The Matrix", None);

    record_search(&history, &trending, "Dune", &dune).await;
    record_search(&history, &trending, "dune", &dune).await;
    record_search(&history, &trending, "Matrix", &matrix).await;

    let rail = trending_movies(&trending).await;
    assert_eq!(rail.len(), 2);
    assert_eq!(rail[0].data.movie_imdb_id, "tt1160419");
    assert_eq!(rail[0].data.count, 2);
    assert_eq!(rail[1].data.count, 1);
}
