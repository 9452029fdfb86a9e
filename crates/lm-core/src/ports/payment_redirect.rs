use async_trait::async_trait;

/// Opens the external payment page in a new browsing context.
///
/// No response from the payment provider is awaited; the result only reports
/// whether the hand-off itself worked.
#[async_trait]
pub trait PaymentRedirectPort: Send + Sync {
    async fn open_external(&self, url: &str) -> anyhow::Result<()>;
}
