use models::ResourceKind;
use service::errors::ServiceError;
use service::resources::ResourceManager;
use service::storage::DocumentStore;

/// One resource manager per collection, each bound to its handle at startup.
#[derive(Clone)]
pub struct ServerState {
    pub users: ResourceManager,
    pub dishes: ResourceManager,
}

impl ServerState {
    pub async fn open(store: &dyn DocumentStore) -> Result<Self, ServiceError> {
        Ok(Self {
            users: ResourceManager::open(ResourceKind::USERS, store).await?,
            dishes: ResourceManager::open(ResourceKind::DISHES, store).await?,
        })
    }

    pub fn managers(&self) -> [&ResourceManager; 2] {
        [&self.users, &self.dishes]
    }
}
