pub mod artifacts;
pub mod redis;

pub use artifacts::{load_catalog, load_similarity};
pub use self::redis::create_redis_client;
pub use self::redis::Cache;
pub use self::redis::CacheKey;
pub use self::redis::CacheWriterHandle;
