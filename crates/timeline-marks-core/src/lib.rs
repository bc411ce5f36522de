pub mod aggregate;
pub mod config;
pub mod entries;
pub mod error;
mod frame;
pub mod model;
pub mod spans;
mod transform;

pub use config::{EditorField, MalformedEntries, TimelineConfig, PERCENTILE_CHOICES};
pub use entries::EntryRecord;
pub use error::{ConfigError, EntryPayloadError, Result, TransformError};
pub use model::{
    ColumnInfo, ColumnMetadata, ColumnarData, Domain, Group, Segment, Series, TimeRange,
    TimelineData,
};
pub use spans::SpanBoundary;
pub use transform::{transform, TimelineInput};

#[cfg(test)]
mod tests;
