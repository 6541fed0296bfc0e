use std::sync::Arc;

use cloudqr_core::application::CloudQrService;

use crate::args::Args;

use super::templates::Templates;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: CloudQrService,
    pub templates: Arc<Templates>,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: CloudQrService, templates: Templates) -> Self {
        Self {
            args,
            service,
            templates: Arc::new(templates),
        }
    }
}
