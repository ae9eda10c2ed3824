use std::sync::Arc;

use crate::catalog::EntityKind;
use crate::config::AppConfig;
use crate::locator::LocatorStore;
use crate::notifier::Notifier;
use crate::repository::Repository;
use crate::resolver::Resolver;
use crate::store::DocumentStore;
use crate::upload::UploadGateway;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub store: Arc<dyn DocumentStore>,
    pub uploads: UploadGateway,
    pub locator: LocatorStore,
    pub resolver: Resolver,
    pub notifier: Notifier,
}

impl AppState {
    pub fn new(config: AppConfig, store: Arc<dyn DocumentStore>, uploads: UploadGateway) -> Self {
        Self {
            config,
            locator: LocatorStore::new(store.clone()),
            resolver: Resolver::new(store.clone()),
            notifier: Notifier::new(store.clone()),
            uploads,
            store,
        }
    }

    pub fn repo(&self, kind: EntityKind) -> Repository {
        Repository::new(self.store.clone(), kind)
    }
}
