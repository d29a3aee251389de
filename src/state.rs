use std::sync::Arc;

use crate::config::Config;
use crate::db::DbPool;
use crate::taxonomy::Taxonomy;
use crate::web::i18n::Translations;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db: DbPool,
    pub translations: Arc<Translations>,
    pub taxonomy: Arc<Taxonomy>,
}

impl AppState {
    pub fn new(config: Config, db: DbPool, translations: Translations) -> Self {
        let taxonomy = Taxonomy::from(&config.taxonomy);
        Self {
            config: Arc::new(config),
            db,
            translations: Arc::new(translations),
            taxonomy: Arc::new(taxonomy),
        }
    }
}
