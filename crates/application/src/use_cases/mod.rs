pub mod spf;

// Re-export use cases
pub use spf::{
    AnalyzeSpfUseCase, ExpandSpfRecordUseCase, ExpandedRecord, FetchSpfRecordUseCase,
    FlattenSpfRecordUseCase, FlattenedRecord,
};
