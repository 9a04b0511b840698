pub mod models;
pub mod pool;
pub mod store;

pub use models::MenuRecord;
pub use pool::DbPool;
pub use store::{MenuStore, PgMenuStore};
