pub mod episode_ledger;
pub mod title_record;

pub use episode_ledger::{Episode, EpisodeLedger};
pub use title_record::{TitleDraft, TitleRecord};
