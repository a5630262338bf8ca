use std::sync::Arc;

use super::{
    config::Config,
    store::{RecordStore, RestStore},
};

pub struct State {
    pub config: Config,
    pub store: Arc<dyn RecordStore>,
}

impl State {
    pub fn new(config: Config) -> Arc<Self> {
        let store = Arc::new(RestStore::new(&config.supabase_url, &config.supabase_key));

        Self::with_store(config, store)
    }

    pub fn with_store(config: Config, store: Arc<dyn RecordStore>) -> Arc<Self> {
        Arc::new(Self { config, store })
    }
}
