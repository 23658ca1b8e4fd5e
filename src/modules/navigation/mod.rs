pub mod commands;
pub mod history;

pub use history::{NavigationHistory, HOME_PAGE};
