//! Consistency checking and automated amendment for property valuation reports.
//!
//! [`check_report_contradictions`] finds contradictions and warnings in a
//! report snapshot, [`run_automated_amendment`] repairs what it can on a copy,
//! and [`generate_contradiction_report`] renders a check result as text.

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod review;
pub mod services;

pub use error::{ReportGuardError, Result};
pub use models::{
    Amendment, AmendmentResult, AmendmentType, Confidence, Contradiction, ContradictionKind,
    ContradictionResult, ReportData, Warning, WarningKind,
};
pub use review::{
    check_report_contradictions, generate_contradiction_report, run_automated_amendment,
    ContradictionAmender,
};
pub use services::{ReviewOutcome, ReviewService};
