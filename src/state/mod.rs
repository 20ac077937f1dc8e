use crate::store::mongo::MongoStore;

#[derive(Clone)]
pub struct AppState {
    pub store: MongoStore,
}

impl AppState {
    pub fn new(store: MongoStore) -> Self {
        Self { store }
    }
}
