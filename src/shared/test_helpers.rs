#[cfg(test)]
use crate::core::config::{AssetConfig, AssetStrategy, MailConfig, MailTransportKind};
#[cfg(test)]
use crate::modules::mail::{MailDispatcher, MailError, OutgoingEmail};
#[cfg(test)]
use async_trait::async_trait;
#[cfg(test)]
use std::sync::Mutex;
#[cfg(test)]
use std::time::Duration;

#[cfg(test)]
pub fn test_mail_config() -> MailConfig {
    MailConfig {
        transport: MailTransportKind::Smtp,
        host: "localhost".to_string(),
        port: 2525,
        tls: false,
        username: "reports@example.com".to_string(),
        password: "secret".to_string(),
        from_name: "SongScape AI".to_string(),
        recipient: "label@example.com".to_string(),
    }
}

#[cfg(test)]
pub fn test_asset_config(base_url: &str, strategy: AssetStrategy) -> AssetConfig {
    AssetConfig {
        base_url: base_url.trim_end_matches('/').to_string(),
        strategy,
        fetch_timeout: Duration::from_secs(5),
    }
}

/// Base64-alphabet payload of exactly `len` characters
#[cfg(test)]
pub fn encoded_payload(len: usize) -> String {
    "A".repeat(len)
}

/// Dispatcher that records every email instead of sending it
#[cfg(test)]
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<OutgoingEmail>>,
    fail_with: Option<String>,
}

#[cfg(test)]
impl RecordingMailer {
    pub fn failing(message: &str) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail_with: Some(message.to_string()),
        }
    }

    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[cfg(test)]
#[async_trait]
impl MailDispatcher for RecordingMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        self.sent.lock().unwrap().push(email.clone());
        match &self.fail_with {
            Some(message) => Err(MailError::Transport(message.clone())),
            None => Ok(()),
        }
    }

    fn transport_name(&self) -> &'static str {
        "recording"
    }
}
