use async_trait::async_trait;
use thiserror::Error;

/// File attached to an outgoing email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAttachment {
    pub filename: String,
    /// MIME type, e.g. `text/csv`
    pub content_type: String,
    pub content: Vec<u8>,
}

/// A fully composed email, ready to hand to a transport in one call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    /// `From` header, either `addr` or `"Name" <addr>`
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html_body: String,
    pub attachments: Vec<EmailAttachment>,
}

#[derive(Debug, Error)]
pub enum MailError {
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("failed to build email: {0}")]
    Build(String),

    #[error("transport error: {0}")]
    Transport(String),
}

/// Delivery seam for composed reports.
///
/// Failures are reported as-is; callers decide whether the request fails.
/// Implementations never retry.
#[async_trait]
pub trait MailDispatcher: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError>;

    /// Short name for logs (`"smtp"`, `"file"`)
    fn transport_name(&self) -> &'static str;
}
