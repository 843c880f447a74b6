pub mod amender;
pub mod checker;
pub mod narrative;
pub mod report;

pub use amender::{run_automated_amendment, ContradictionAmender};
pub use checker::check_report_contradictions;
pub use report::generate_contradiction_report;
