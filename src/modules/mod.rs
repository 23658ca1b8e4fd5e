pub mod catalog;
pub mod navigation;
pub mod reviews;
pub mod watchlist;
