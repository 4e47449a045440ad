//! Shared, immutable application state.

use std::sync::Arc;

use surat_core::SuratConfig;
use surat_google::LetterService;

use crate::Result;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<LetterService>,
    pub config: Arc<SuratConfig>,
}

impl AppState {
    pub fn new(config: SuratConfig) -> Result<Self> {
        let service = LetterService::new(&config)?;
        Ok(Self {
            service: Arc::new(service),
            config: Arc::new(config),
        })
    }
}
