use async_trait::async_trait;
use shared::error::AppResult;

/// Seam for the external mail transport. Dispatch through this trait is
/// best-effort; callers log failures and move on.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> AppResult<()>;
}
