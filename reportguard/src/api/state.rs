use std::sync::Arc;

use crate::config::Config;
use crate::services::ReviewService;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub review: ReviewService,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let review = ReviewService::new(config.review.clone());
        Self {
            config: Arc::new(config),
            review,
        }
    }
}
