//! Configuration structs

mod app_config;

pub use app_config::{
    AdminSeedConfig, AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig,
    Environment, GatewayConfig, JwtConfig, RateLimitConfig, RedisConfig, ServerConfig,
};
