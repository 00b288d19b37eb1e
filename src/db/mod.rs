pub mod pool;
pub mod postgres;
pub mod store;

pub use pool::create_pool;
pub use postgres::PgStore;
pub use store::Store;
