use std::sync::Arc;
use std::time::Duration;

use time::OffsetDateTime;

use crate::configs::{Retention, Storage};
use crate::repositories::ReadingRepository;

/// Background sweeper enforcing the configured bound on the readings table,
/// by age, row count, or both.
pub struct RetentionService {
    repository: ReadingRepository,
    policy: Retention,
}

impl RetentionService {
    pub fn new(storage: Arc<Storage>, policy: Retention) -> Self {
        Self {
            repository: ReadingRepository::new(storage),
            policy,
        }
    }

    pub async fn run(&self) {
        let mut ticker = tokio::time::interval(Duration::from_secs(self.policy.interval_secs));

        loop {
            ticker.tick().await;

            match self.sweep().await {
                Ok(0) => {}
                Ok(removed) => tracing::info!(removed, "retention sweep evicted readings"),
                Err(e) => tracing::error!("retention sweep failed: {e}"),
            }
        }
    }

    async fn sweep(&self) -> Result<u64, sqlx::Error> {
        let mut removed = 0;

        if let Some(max_age_secs) = self.policy.max_age_secs {
            let cutoff = OffsetDateTime::now_utc() - time::Duration::seconds(max_age_secs);
            removed += self.repository.delete_older_than(cutoff).await?;
        }

        if let Some(max_rows) = self.policy.max_rows {
            removed += self.repository.trim_to_cap(max_rows).await?;
        }

        Ok(removed)
    }
}
