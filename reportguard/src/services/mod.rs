mod review;

pub use review::{ReviewOutcome, ReviewService};
