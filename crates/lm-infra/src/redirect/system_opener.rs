use std::ffi::OsString;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info};

use lm_core::ports::PaymentRedirectPort;

#[derive(Debug, thiserror::Error)]
pub enum OpenError {
    #[error("refusing to open non-http url: {0}")]
    UnsupportedScheme(String),
    #[error("failed to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{program} exited with {status}")]
    Exit {
        program: String,
        status: std::process::ExitStatus,
    },
}

/// Opens the payment page with the platform's default URL handler.
///
/// 使用系统默认浏览器打开支付页面。
#[derive(Debug, Clone)]
pub struct SystemPaymentOpener {
    program: OsString,
    leading_args: Vec<OsString>,
}

impl SystemPaymentOpener {
    /// Opener for the current platform.
    pub fn for_current_platform() -> Self {
        Self::for_target_os(std::env::consts::OS)
    }

    /// Windows goes through `url.dll` rather than `cmd /C start`, which would
    /// split the url at `&`.
    fn for_target_os(os: &str) -> Self {
        match os {
            "macos" => Self::with_command("open", Vec::<OsString>::new()),
            "windows" => Self::with_command("rundll32", ["url.dll,FileProtocolHandler"]),
            _ => Self::with_command("xdg-open", Vec::<OsString>::new()),
        }
    }

    pub fn with_command<I, S>(program: impl Into<OsString>, leading_args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        Self {
            program: program.into(),
            leading_args: leading_args.into_iter().map(Into::into).collect(),
        }
    }

    fn program_name(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }
}

impl Default for SystemPaymentOpener {
    fn default() -> Self {
        Self::for_current_platform()
    }
}

#[async_trait]
impl PaymentRedirectPort for SystemPaymentOpener {
    async fn open_external(&self, url: &str) -> anyhow::Result<()> {
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(OpenError::UnsupportedScheme(url.to_string()).into());
        }

        debug!(program = %self.program_name(), url = %url, "launching url handler");
        let status = Command::new(&self.program)
            .args(&self.leading_args)
            .arg(url)
            .status()
            .await
            .map_err(|source| OpenError::Launch {
                program: self.program_name(),
                source,
            })?;

        if !status.success() {
            return Err(OpenError::Exit {
                program: self.program_name(),
                status,
            }
            .into());
        }

        info!(url = %url, "payment page handed to system browser");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn windows_opener_passes_url_as_single_argument() {
        let opener = SystemPaymentOpener::for_target_os("windows");
        assert_eq!(opener.program, OsString::from("rundll32"));
        assert_eq!(
            opener.leading_args,
            vec![OsString::from("url.dll,FileProtocolHandler")]
        );
    }

    #[test]
    fn unix_like_platforms_use_native_handlers() {
        assert_eq!(
            SystemPaymentOpener::for_target_os("macos").program,
            OsString::from("open")
        );
        assert_eq!(
            SystemPaymentOpener::for_target_os("linux").program,
            OsString::from("xdg-open")
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn succeeds_when_handler_exits_cleanly() {
        let opener = SystemPaymentOpener::with_command("true", Vec::<OsString>::new());
        opener.open_external("https://pay.example").await.unwrap();
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn reports_failing_handler() {
        let opener = SystemPaymentOpener::with_command("false", Vec::<OsString>::new());
        let err = opener.open_external("https://pay.example").await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<OpenError>(),
            Some(OpenError::Exit { .. })
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn reports_missing_handler() {
        let opener =
            SystemPaymentOpener::with_command("lm-no-such-opener", Vec::<OsString>::new());
        let err = opener.open_external("https://pay.example").await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<OpenError>(),
            Some(OpenError::Launch { .. })
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn rejects_non_http_urls() {
        let opener = SystemPaymentOpener::with_command("true", Vec::<OsString>::new());
        let err = opener.open_external("file:///etc/passwd").await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<OpenError>(),
            Some(OpenError::UnsupportedScheme(_))
        ));
    }
}
