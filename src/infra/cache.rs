//! Redis-backed counters for request rate limiting.
//!
//! Redis is optional. When no `REDIS_URL` is configured the server runs
//! without a cache and rate limiting is skipped.

use redis::{aio::ConnectionManager, AsyncCommands, Client, RedisError};

use crate::config::CACHE_PREFIX_RATE_LIMIT;
use crate::errors::AppResult;

/// Outcome of one rate limit check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitStatus {
    /// Requests seen in the current window, this one included
    pub count: u64,
    pub allowed: bool,
    /// Seconds until the window resets
    pub reset_in: u64,
}

/// Redis connection wrapper.
#[derive(Clone)]
pub struct Cache {
    connection: ConnectionManager,
}

impl Cache {
    /// Connect to Redis, returning an error instead of panicking.
    pub async fn try_connect(redis_url: &str) -> Result<Self, RedisError> {
        let client = Client::open(redis_url)?;
        let connection = ConnectionManager::new(client).await?;

        tracing::info!("Redis cache connected");
        Ok(Self { connection })
    }

    /// Round-trip a PING, used by the health endpoint.
    pub async fn ping(&self) -> AppResult<()> {
        let mut conn = self.connection.clone();
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }

    /// Count one request for `identifier` in a fixed window.
    ///
    /// The window starts with the first request; the counter expires with it.
    pub async fn check_rate_limit(
        &self,
        identifier: &str,
        max_requests: u64,
        window_seconds: u64,
    ) -> AppResult<RateLimitStatus> {
        let key = format!("{}{}", CACHE_PREFIX_RATE_LIMIT, identifier);
        let mut conn = self.connection.clone();

        let count: u64 = conn.incr(&key, 1u64).await?;
        if count == 1 {
            let _: () = conn.expire(&key, window_seconds as i64).await?;
        }

        let ttl: i64 = conn.ttl(&key).await?;
        // -1 means the key lost its expiry (e.g. a crash between INCR and EXPIRE)
        if ttl == -1 {
            let _: () = conn.expire(&key, window_seconds as i64).await?;
        }
        let reset_in = if ttl > 0 { ttl as u64 } else { window_seconds };

        Ok(RateLimitStatus {
            count,
            allowed: count <= max_requests,
            reset_in,
        })
    }
}
