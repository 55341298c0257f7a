//! lettre-backed mail delivery (SMTP relay or `.eml` files on disk)

use async_trait::async_trait;
use lettre::message::{header::ContentType, Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncFileTransport, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::path::Path;
use tracing::{debug, error, info, warn};

use crate::core::config::{MailConfig, MailTransportKind};
use crate::modules::mail::backend::{MailDispatcher, MailError, OutgoingEmail};

enum Transport {
    Smtp(AsyncSmtpTransport<Tokio1Executor>),
    File(AsyncFileTransport<Tokio1Executor>),
}

pub struct LettreMailer {
    transport: Transport,
}

impl LettreMailer {
    pub fn new(config: &MailConfig) -> Result<Self, MailError> {
        let transport = match &config.transport {
            MailTransportKind::Smtp => Transport::Smtp(build_smtp_transport(config)?),
            MailTransportKind::File { dir } => Transport::File(build_file_transport(dir)?),
        };

        Ok(Self { transport })
    }
}

fn build_smtp_transport(
    config: &MailConfig,
) -> Result<AsyncSmtpTransport<Tokio1Executor>, MailError> {
    if !config.tls {
        warn!("SMTP TLS is disabled - this is not recommended for production");
    }

    let builder = if config.tls {
        AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| MailError::Transport(format!("SMTP TLS relay error: {}", e)))?
    } else {
        AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
    };

    Ok(builder
        .port(config.port)
        .credentials(Credentials::new(
            config.username.clone(),
            config.password.clone(),
        ))
        .build())
}

fn build_file_transport(dir: &Path) -> Result<AsyncFileTransport<Tokio1Executor>, MailError> {
    if !dir.exists() {
        std::fs::create_dir_all(dir).map_err(|e| {
            MailError::Transport(format!("create emails directory {}: {}", dir.display(), e))
        })?;
    }
    Ok(AsyncFileTransport::<Tokio1Executor>::new(dir))
}

/// Build a `lettre::Message` from an [`OutgoingEmail`]
fn build_message(email: &OutgoingEmail) -> Result<Message, MailError> {
    let from: Mailbox = email
        .from
        .parse()
        .map_err(|e| MailError::InvalidAddress(format!("from '{}': {}", email.from, e)))?;
    let to: Mailbox = email
        .to
        .parse()
        .map_err(|e| MailError::InvalidAddress(format!("to '{}': {}", email.to, e)))?;

    let builder = Message::builder().from(from).to(to).subject(&email.subject);
    let html = SinglePart::html(email.html_body.clone());

    let message = if email.attachments.is_empty() {
        builder.singlepart(html)
    } else {
        let mut parts = MultiPart::mixed().singlepart(html);
        for attachment in &email.attachments {
            let content_type = ContentType::parse(&attachment.content_type).map_err(|e| {
                MailError::Build(format!(
                    "content type '{}' for {}: {}",
                    attachment.content_type, attachment.filename, e
                ))
            })?;
            parts = parts.singlepart(
                Attachment::new(attachment.filename.clone())
                    .body(attachment.content.clone(), content_type),
            );
        }
        builder.multipart(parts)
    };

    message.map_err(|e| MailError::Build(e.to_string()))
}

#[async_trait]
impl MailDispatcher for LettreMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        debug!(to = %email.to, subject = %email.subject, "building report email");
        let message = build_message(email)?;

        info!(
            to = %email.to,
            subject = %email.subject,
            attachments = email.attachments.len(),
            transport = self.transport_name(),
            "sending report email"
        );

        match &self.transport {
            Transport::Smtp(smtp) => {
                smtp.send(message).await.map_err(|e| {
                    error!(error = %e, "SMTP send failed");
                    MailError::Transport(format!("send SMTP email: {}", e))
                })?;
            }
            Transport::File(file) => {
                file.send(message).await.map_err(|e| {
                    error!(error = %e, "file transport send failed");
                    MailError::Transport(format!("send file email: {}", e))
                })?;
            }
        }

        Ok(())
    }

    fn transport_name(&self) -> &'static str {
        match self.transport {
            Transport::Smtp(_) => "smtp",
            Transport::File(_) => "file",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::mail::backend::EmailAttachment;

    fn test_email() -> OutgoingEmail {
        OutgoingEmail {
            from: "\"SongScape AI\" <reports@example.com>".to_string(),
            to: "label@example.com".to_string(),
            subject: "Test Song Analysis Report".to_string(),
            html_body: "<p>report</p>".to_string(),
            attachments: vec![],
        }
    }

    fn file_config(dir: &Path) -> MailConfig {
        MailConfig {
            transport: MailTransportKind::File {
                dir: dir.to_path_buf(),
            },
            host: "localhost".to_string(),
            port: 2525,
            tls: false,
            username: "reports@example.com".to_string(),
            password: String::new(),
            from_name: "SongScape AI".to_string(),
            recipient: "label@example.com".to_string(),
        }
    }

    #[test]
    fn test_build_message_html_only() {
        assert!(build_message(&test_email()).is_ok());
    }

    #[test]
    fn test_build_message_with_csv_attachment() {
        let mut email = test_email();
        email.attachments.push(EmailAttachment {
            filename: "TikTokPerformance.csv".to_string(),
            content_type: "text/csv".to_string(),
            content: b"date,views\n2024-01-01,10\n".to_vec(),
        });

        let message = build_message(&email).unwrap();
        let raw = String::from_utf8_lossy(&message.formatted()).to_string();
        assert!(raw.contains("multipart/mixed"));
        assert!(raw.contains("TikTokPerformance.csv"));
    }

    #[test]
    fn test_build_message_invalid_recipient() {
        let mut email = test_email();
        email.to = "not-an-address".to_string();
        let err = build_message(&email).unwrap_err();
        assert!(matches!(err, MailError::InvalidAddress(_)));
    }

    #[test]
    fn test_build_message_invalid_attachment_type() {
        let mut email = test_email();
        email.attachments.push(EmailAttachment {
            filename: "x.bin".to_string(),
            content_type: "not a mime type".to_string(),
            content: vec![1, 2, 3],
        });
        let err = build_message(&email).unwrap_err();
        assert!(matches!(err, MailError::Build(_)));
    }

    #[tokio::test]
    async fn test_smtp_transport_without_tls_builds() {
        let mut config = file_config(Path::new("unused"));
        config.transport = MailTransportKind::Smtp;
        let mailer = LettreMailer::new(&config).unwrap();
        assert_eq!(mailer.transport_name(), "smtp");
    }

    #[tokio::test]
    async fn test_file_transport_writes_eml() {
        let dir = tempfile::tempdir().unwrap();
        let mailer = LettreMailer::new(&file_config(dir.path())).unwrap();
        assert_eq!(mailer.transport_name(), "file");

        mailer.send(&test_email()).await.unwrap();

        let written: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .flatten()
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "eml"))
            .collect();
        assert_eq!(written.len(), 1);
    }
}
