//! Email notification channel (SMTP submission over STARTTLS).

use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::error::Result;
use crate::models::Filing;
use crate::notify::Channel;

/// Body template; placeholders are the [`Filing::format`] set.
const BODY_TEMPLATE: &str = "\
Case: {case} ({court})
Document #: {num}
Description: {description}
Link: {link}
Time: {time}
";

const SUBJECT: &str = "New PACER entry found by RSS Scraper";

/// Credentials and addressing for the email channel.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// SMTP relay host to submit through, e.g. "smtp.gmail.com"
    pub relay: String,

    /// Submission port (STARTTLS)
    pub port: u16,

    /// Account to authenticate with and send from
    pub account: String,

    /// SMTP password for the account
    pub password: String,

    /// Recipient address
    pub to: String,
}

/// Channel that mails each filing to a fixed recipient.
pub struct EmailChannel {
    config: EmailConfig,
}

impl EmailChannel {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    fn build_message(&self, filing: &Filing) -> Result<Message> {
        let from: Mailbox = format!("PACER RSS Scraper <{}>", self.config.account).parse()?;
        let to: Mailbox = self.config.to.parse()?;

        Ok(Message::builder()
            .from(from)
            .to(to)
            .subject(SUBJECT)
            .body(filing.format(BODY_TEMPLATE))?)
    }
}

#[async_trait]
impl Channel for EmailChannel {
    fn name(&self) -> &'static str {
        "email"
    }

    async fn deliver(&self, filing: &Filing) -> Result<()> {
        let message = self.build_message(filing)?;

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.relay)?
            .port(self.config.port)
            .credentials(Credentials::new(
                self.config.account.clone(),
                self.config.password.clone(),
            ))
            .build();

        mailer.send(message).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn channel() -> EmailChannel {
        EmailChannel::new(EmailConfig {
            relay: "smtp.gmail.com".to_string(),
            port: 587,
            account: "watcher@example.com".to_string(),
            password: "hunter2".to_string(),
            to: "alerts@example.com".to_string(),
        })
    }

    fn filing() -> Filing {
        Filing {
            document_number: "23".to_string(),
            link: "https://ecf.ilnd.uscourts.gov/doc1/067112345678".to_string(),
            case_title: "Duffy v. Godfread et al".to_string(),
            court: "ilnd".to_string(),
            description: "Order".to_string(),
            time: Utc.timestamp_opt(1381154400, 0).unwrap(),
        }
    }

    #[test]
    fn test_message_carries_filing_fields() {
        let message = channel().build_message(&filing()).unwrap();
        let rendered = String::from_utf8(message.formatted()).unwrap();

        assert!(rendered.contains(SUBJECT));
        assert!(rendered.contains("Case: Duffy v. Godfread et al (ilnd)"));
        assert!(rendered.contains("Document #: 23"));
        assert!(rendered.contains("Time: Mon Oct 07 14:00:00 2013"));
    }

    #[test]
    fn test_bad_recipient_is_an_error() {
        let mut config = channel().config;
        config.to = "not an address".to_string();
        let channel = EmailChannel::new(config);

        assert!(channel.build_message(&filing()).is_err());
    }
}
