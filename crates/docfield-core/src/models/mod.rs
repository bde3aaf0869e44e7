//! Data models shared by the extraction pipeline.

pub mod config;
pub mod document;
pub mod result;
pub mod rule;

pub use config::{ExtractConfig, ResolutionPolicy, TableConfig, TableStrategy};
pub use document::Document;
pub use result::ExtractionResult;
pub use rule::{ExtractionRule, RuleStrategy};
