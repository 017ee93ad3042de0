use async_trait::async_trait;
use color_eyre::Result;
use tracing::info;

use super::FormData;

/// Receives a validated copy of the form once the user submits.
///
/// The controller only waits for completion. An error does not keep the
/// modal open, it is logged and reported to the caller of `submit`.
#[async_trait]
pub trait SubmitHandler: Send + Sync {
    async fn submit(&self, form: FormData) -> Result<()>;
}

/// Default handler of the app: records the entry in the log.
pub struct LogSubmitHandler;

#[async_trait]
impl SubmitHandler for LogSubmitHandler {
    async fn submit(&self, form: FormData) -> Result<()> {
        let payload = serde_json::to_string(&form)?;
        info!(%payload, "Giveaway entry submitted");
        Ok(())
    }
}
