pub mod hashmap_otp_store;
pub mod hashmap_user_store;
pub mod postgres_user_store;
pub mod redis_otp_store;

pub use hashmap_otp_store::HashMapOtpStore;
pub use hashmap_user_store::HashMapUserStore;
pub use postgres_user_store::PostgresUserStore;
pub use redis_otp_store::RedisOtpStore;
