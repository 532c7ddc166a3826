//! Health service - readiness probes for the backing stores

use tracing::warn;

use crate::dto::ReadinessResponse;

use super::context::ServiceContext;

/// Health service
pub struct HealthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> HealthService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Probe both stores
    pub async fn readiness(&self) -> ReadinessResponse {
        let (log, stats) = tokio::join!(
            self.ctx.log_store().health_check(),
            self.ctx.stats_store().health_check()
        );

        if let Err(e) = &log {
            warn!(error = %e, "Reaction log health check failed");
        }
        if let Err(e) = &stats {
            warn!(error = %e, "Stats store health check failed");
        }

        ReadinessResponse::ready(log.is_ok(), stats.is_ok())
    }
}
