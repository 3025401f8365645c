//! Single-pass preprocessing pipeline for tabular record files.
//!
//! Loads a delimited record file, imputes missing values, extracts the
//! embedded JSON profile column into scalar columns, derives bucketed
//! features, aggregates per-department statistics, and writes the resulting
//! tables back to disk. Each stage is a pure function from one immutable
//! table to the next; there is no shared mutable state and no retry logic —
//! any stage failure aborts the run.
//!
//! # Quick Start
//!
//! ```no_run
//! use prep_core::pipeline::{run_pipeline, PipelineConfig};
//!
//! let config = PipelineConfig::new("mock_data.csv", "output");
//! let report = run_pipeline(&config)?;
//! println!(
//!     "processed {} rows across {} departments",
//!     report.rows_processed, report.departments
//! );
//! # Ok::<(), prep_core::error::PipelineError>(())
//! ```
//!
//! # Architecture
//!
//! - [`loader`]: CSV loading against the declared [`schema`]
//! - [`cleaner`]: median imputation and the department sentinel
//! - [`extract`]: profile JSON → `address` / `phone` / `email` columns
//! - [`features`]: bucketed categories and address length
//! - [`aggregate`]: per-department means
//! - [`quality`]: missing-value report and quality metrics
//! - [`feature_export`]: flat feature table keyed by row index
//! - [`output`]: atomic CSV / JSON / Parquet writers
//! - [`pipeline`]: the forward pass wiring the stages together

pub mod aggregate;
pub mod cleaner;
pub mod error;
pub mod extract;
pub mod feature_export;
pub mod features;
pub mod loader;
pub mod output;
pub mod pipeline;
pub mod quality;
pub mod schema;
pub mod table;

pub use error::PipelineError;
pub use pipeline::{run_pipeline, PipelineConfig, PipelineReport};
pub use table::{AgeGroup, CleanedRecord, DepartmentStat, DerivedRecord, RawRecord, SalaryCategory};
