pub mod action_service;
pub mod edit_service;
pub mod export_service;
pub mod query_service;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::usecase::ports::backend::OrganizerBackend;

use action_service::ActionService;
use edit_service::EditService;
use export_service::ExportService;
use query_service::QueryService;

/// Everything the views need, shared through the UI context.
#[derive(Clone)]
pub struct Services {
    pub query: Arc<QueryService>,
    pub actions: Arc<ActionService>,
    pub edits: Arc<EditService>,
    pub export: Arc<ExportService>,
    pub banner_ttl: Duration,
}

impl Services {
    pub fn new(
        backend: Arc<dyn OrganizerBackend>,
        export_dir: PathBuf,
        banner_ttl: Duration,
    ) -> Self {
        Self {
            query: Arc::new(QueryService::new(backend.clone())),
            actions: Arc::new(ActionService::new(backend.clone())),
            edits: Arc::new(EditService::new(backend)),
            export: Arc::new(ExportService::new(export_dir)),
            banner_ttl,
        }
    }
}
