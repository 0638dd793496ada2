use std::sync::Arc;

use crate::{client::PlagiarismService, config::AppConfig, handler::SubmissionHandler};

/// Servicio de plagio compartido entre peticiones.
pub type SharedService = Arc<dyn PlagiarismService>;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub handler: Arc<SubmissionHandler<SharedService>>,
}
