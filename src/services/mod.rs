// Service exports
pub mod memory;
pub mod redis_store;
pub mod store;
pub mod swipes;

pub use memory::MemoryStore;
pub use redis_store::RedisStore;
pub use store::SwipeStore;
pub use swipes::MatchService;
