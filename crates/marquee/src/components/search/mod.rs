//! Search components: the input card, the movie result card, and the
//! no-results state.

mod empty_state;
mod movie_card;
mod search_card;

pub use empty_state::EmptyState;
pub use movie_card::MovieCard;
pub use search_card::SearchCard;
