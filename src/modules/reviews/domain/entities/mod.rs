pub mod review_book;
pub mod review_record;

pub use review_book::ReviewBook;
pub use review_record::ReviewRecord;
