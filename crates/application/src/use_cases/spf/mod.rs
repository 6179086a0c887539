pub mod analyze;
pub mod expand_record;
pub mod fetch_record;
pub mod flatten_record;

pub use analyze::AnalyzeSpfUseCase;
pub use expand_record::{ExpandSpfRecordUseCase, ExpandedRecord};
pub use fetch_record::FetchSpfRecordUseCase;
pub use flatten_record::{FlattenSpfRecordUseCase, FlattenedRecord};
