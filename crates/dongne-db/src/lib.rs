pub mod chatrooms;
pub mod messages;
pub mod migrate;
pub mod posts;
pub mod types;

pub use sqlx::postgres::PgPool;
pub use types::*;
