use async_trait::async_trait;
use tracing::info;

use lm_core::ports::PaymentRedirectPort;

/// Opener that only records the URL; used when no browser should be launched.
#[derive(Debug, Default, Clone)]
pub struct LoggingPaymentOpener;

#[async_trait]
impl PaymentRedirectPort for LoggingPaymentOpener {
    async fn open_external(&self, url: &str) -> anyhow::Result<()> {
        info!(url = %url, "payment page requested (browser launch disabled)");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn open_external_always_succeeds() {
        let opener = LoggingPaymentOpener;
        assert!(opener.open_external("https://pay.example").await.is_ok());
    }
}
