mod amendment;
mod contradiction;
mod report;

pub use amendment::*;
pub use contradiction::*;
pub use report::*;
