//! Primary/fallback session termination

use async_trait::async_trait;
use tracing::{error, info, warn};

use crate::{HostResult, SessionTerminator};

/// Tries `primary`, then `fallback` if the primary strategy fails.
///
/// Each failure is logged here. The fallback's error is returned so the
/// caller can log the request as failed; nothing is retried.
pub struct FallbackTerminator<P, F> {
    primary: P,
    fallback: F,
}

impl<P, F> FallbackTerminator<P, F>
where
    P: SessionTerminator,
    F: SessionTerminator,
{
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

#[async_trait]
impl<P, F> SessionTerminator for FallbackTerminator<P, F>
where
    P: SessionTerminator,
    F: SessionTerminator,
{
    fn name(&self) -> &'static str {
        "fallback"
    }

    async fn terminate(&self) -> HostResult<()> {
        let primary_err = match self.primary.terminate().await {
            Ok(()) => {
                info!(strategy = self.primary.name(), "Session terminated");
                return Ok(());
            }
            Err(e) => e,
        };
        warn!(
            strategy = self.primary.name(),
            error = %primary_err,
            "Primary session termination failed, trying fallback"
        );

        match self.fallback.terminate().await {
            Ok(()) => {
                info!(strategy = self.fallback.name(), "Session terminated");
                Ok(())
            }
            Err(e) => {
                error!(
                    strategy = self.fallback.name(),
                    error = %e,
                    "Fallback session termination failed"
                );
                Err(e)
            }
        }
    }
}
