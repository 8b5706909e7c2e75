use anyhow::Result;

pub struct AppConfig {
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub mailer: MailerConfig,
}

impl AppConfig {
    pub fn new() -> Result<Self> {
        let database = DatabaseConfig {
            host: std::env::var("DATABASE_HOST")?,
            port: std::env::var("DATABASE_PORT")?.parse()?,
            username: std::env::var("DATABASE_USERNAME")?,
            password: std::env::var("DATABASE_PASSWORD")?,
            database: std::env::var("DATABASE_NAME")?,
        };
        let redis = RedisConfig {
            host: std::env::var("REDIS_HOST")?,
            port: std::env::var("REDIS_PORT")?.parse()?,
        };
        let mailer = MailerConfig {
            endpoint: std::env::var("MAILER_ENDPOINT")?,
            access_token: std::env::var("MAILER_ACCESS_TOKEN")?,
            sender: std::env::var("MAILER_SENDER")?,
        };
        Ok(Self {
            database,
            redis,
            mailer,
        })
    }
}

pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
}

pub struct RedisConfig {
    pub host: String,
    pub port: u16,
}

/// Settings for the HTTP mail gateway the notification dispatcher posts to.
pub struct MailerConfig {
    pub endpoint: String,
    pub access_token: String,
    pub sender: String,
}
