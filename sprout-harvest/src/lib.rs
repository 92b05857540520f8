pub mod competition;
pub mod error;
pub mod explorer;
pub mod suggest;
pub mod trends;

pub use competition::{CompetitionClient, CompetitionFigures};
pub use error::HarvestError;
pub use explorer::Explorer;
pub use suggest::{AutocompleteClient, SuggestionSource};
pub use trends::{InterestClient, TrendSource};
