use redis::{AsyncCommands, Client};
use shared::config::RedisConfig;
use shared::error::{AppError, AppResult};

pub mod model;

pub struct RedisClient {
    client: Client,
}

impl RedisClient {
    pub fn new(config: &RedisConfig) -> AppResult<Self> {
        let client = Client::open(format!("redis://{}:{}", config.host, config.port))?;
        Ok(Self { client })
    }

    pub async fn get<T: RedisKey>(&self, key: &T) -> AppResult<Option<T::Value>> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let result: Option<String> = conn.get(key.inner()).await?;
        result.map(T::Value::try_from).transpose()
    }
}

/// Typed key into the shared key-value store.
pub trait RedisKey {
    type Value: TryFrom<String, Error = AppError>;

    fn inner(&self) -> String;
}
