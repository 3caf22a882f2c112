#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Forensic strategy report formatting.
//!
//! A forensic report summarizes a machine-learning trading pipeline run:
//! data preparation, ensemble diversity, feature importance, and
//! multiple-testing-corrected performance. The pipeline stages themselves
//! run outside this crate; their outputs arrive as [`PipelineMetrics`]
//! supplied by the caller, and every metric taken on faith is rendered with
//! an explicit `[unverified]` marker. The one quantity computed here is the
//! expected-maximum-Sharpe correction from [`ronda_eval::deflation`].

pub mod report;

pub use report::{ForensicReport, PipelineMetrics, ReportConfig};
