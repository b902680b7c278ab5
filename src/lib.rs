//! # fix-hooks
//!
//! Repairs a generated component file whose hook declarations were emitted
//! more than once. The file is treated as plain lines: for each configured
//! pattern the first matching line is kept and every later matching line is
//! dropped. Nothing else in the file is touched.

pub mod builders;
pub mod core;
pub mod error;
pub mod utils;

pub use builders::patterns::{DedupPattern, PatternType};
pub use crate::core::config::{ConfigManager, ConfigProvider, FixConfig};
pub use crate::core::document::Document;
pub use crate::core::engine::{DedupEngine, DedupOutcome, dedup_lines};
pub use error::{FixError, FixResult};
