//! Mail module for report delivery
//!
//! Provides the [`MailDispatcher`] seam and a lettre implementation
//! supporting SMTP relays and file output.

mod backend;
mod lettre_mailer;

pub use backend::{EmailAttachment, MailDispatcher, MailError, OutgoingEmail};
pub use lettre_mailer::LettreMailer;
