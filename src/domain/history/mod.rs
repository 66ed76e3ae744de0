pub mod model;
pub mod repository;

pub use model::HistoryRecord;
pub use repository::HistoryRepository;
