//! Startup configuration
//!
//! Read once from the environment; every crate receives its own immutable
//! piece behind an `Arc`.

use std::net::SocketAddr;
use std::time::Duration;

use auth::AuthConfig;
use cors::CorsConfig;
use platform::config::{
    ConfigResult, env_bool, env_list, env_or, env_parse, env_required, env_secret,
    env_secret_or_dev,
};
use pow::{Difficulty, PowConfig};

pub struct AppConfig {
    pub database_url: String,
    pub listen_addr: SocketAddr,
    pub auth: AuthConfig,
    pub pow: PowConfig,
    pub cors: CorsConfig,
}

impl AppConfig {
    pub fn from_env() -> ConfigResult<Self> {
        Ok(Self {
            database_url: env_required("DATABASE_URL")?,
            listen_addr: env_parse("LISTEN_ADDR", default_listen_addr())?,
            auth: auth_config()?,
            pow: pow_config()?,
            cors: cors_config()?,
        })
    }
}

fn default_listen_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 31113))
}

fn auth_config() -> ConfigResult<AuthConfig> {
    let base = if cfg!(debug_assertions) {
        AuthConfig::development()
    } else {
        AuthConfig::default()
    };
    let mut config = base.with_cookie_name(env_or("SESSION_COOKIE_NAME", "session_id"));

    // Absent secret disables the bearer path.
    if let Some(secret) = env_secret("LEGACY_JWT_SECRET")? {
        config = config.with_legacy_jwt_secret(secret);
    }

    Ok(config)
}

fn pow_config() -> ConfigResult<PowConfig> {
    let base = if cfg!(debug_assertions) {
        PowConfig::development()
    } else {
        PowConfig::default()
    };
    let difficulty: Difficulty = env_parse("POW_DIFFICULTY_BITS", base.difficulty)?;
    let ttl_secs: u64 = env_parse("POW_CHALLENGE_TTL_SECS", base.challenge_ttl.as_secs())?;
    let sweep_secs: u64 = env_parse("POW_SWEEP_INTERVAL_SECS", base.sweep_interval.as_secs())?;

    Ok(PowConfig {
        enabled: env_bool("POW_ENABLED", true)?,
        ip_hash_salt: env_secret_or_dev("POW_IP_HASH_SALT", 32)?,
        ..base
    }
    .with_difficulty(difficulty)
    .with_challenge_ttl(Duration::from_secs(ttl_secs))
    .with_sweep_interval(Duration::from_secs(sweep_secs)))
}

fn cors_config() -> ConfigResult<CorsConfig> {
    let mut config = if cfg!(debug_assertions) {
        CorsConfig::development()
    } else {
        CorsConfig::default()
    };

    if let Some(origins) = env_list("CORS_ALLOWED_ORIGINS") {
        config = config.with_allowed_origins(origins);
    }
    if let Some(headers) = env_list("CORS_ALLOWED_HEADERS") {
        config = config.with_allowed_headers(headers);
    }
    if let Some(methods) = env_list("CORS_ALLOWED_METHODS") {
        config = config.with_allowed_methods(methods);
    }
    let ttl_secs: u64 = env_parse("CUSTOM_DOMAIN_CACHE_TTL_SECS", config.cache_ttl.as_secs())?;
    let capacity: usize = env_parse("CUSTOM_DOMAIN_CACHE_CAPACITY", config.cache_capacity)?;

    Ok(config
        .with_cache_ttl(Duration::from_secs(ttl_secs))
        .with_cache_capacity(capacity))
}

