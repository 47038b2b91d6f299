//! Social-media notification channel.
//!
//! Posts one short status per filing to an OAuth 1.0a status-update
//! endpoint (Twitter API v1.1 shape).

use async_trait::async_trait;
use chrono::Utc;
use rand::distributions::Alphanumeric;
use rand::Rng;
use reqwest::Client;

use crate::error::{AppError, Result};
use crate::models::Filing;
use crate::notify::oauth::{self, OauthCredentials};
use crate::notify::Channel;

/// Default status-update endpoint.
pub const DEFAULT_STATUS_URL: &str = "https://api.twitter.com/1.1/statuses/update.json";

/// Channel that posts a short status for each filing.
pub struct SocialChannel {
    client: Client,
    credentials: OauthCredentials,
    status_url: String,
}

impl SocialChannel {
    pub fn new(credentials: OauthCredentials) -> Self {
        Self {
            client: Client::new(),
            credentials,
            status_url: DEFAULT_STATUS_URL.to_string(),
        }
    }

    /// Point the channel at a different status endpoint.
    pub fn with_status_url(mut self, url: impl Into<String>) -> Self {
        self.status_url = url.into();
        self
    }

    /// Compose the status text for a filing. Case title and
    /// description are truncated to keep the whole status inside a
    /// short-post budget.
    fn compose(filing: &Filing) -> String {
        format!(
            "New #PACER doc in {} ({}): #{} {}. {}",
            truncate(&filing.case_title, 35),
            filing.court,
            filing.document_number,
            truncate(&filing.description, 45),
            filing.link,
        )
    }
}

/// Truncate to `max` characters, ellipsis included, when over budget.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let kept: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        text.to_string()
    }
}

#[async_trait]
impl Channel for SocialChannel {
    fn name(&self) -> &'static str {
        "social"
    }

    async fn deliver(&self, filing: &Filing) -> Result<()> {
        let status = Self::compose(filing);
        let form = vec![("status".to_string(), status.clone())];

        let nonce: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(32)
            .map(char::from)
            .collect();
        let header = oauth::authorization_header(
            &self.credentials,
            "POST",
            &self.status_url,
            &form,
            Utc::now().timestamp(),
            &nonce,
        );

        let response = self
            .client
            .post(&self.status_url)
            .header(reqwest::header::AUTHORIZATION, header)
            .form(&[("status", status.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::delivery(
                "social",
                format!("status update returned {}", response.status()),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_truncate_within_budget_is_unchanged() {
        assert_eq!(truncate("short", 35), "short");
        let exactly = "a".repeat(35);
        assert_eq!(truncate(&exactly, 35), exactly);
    }

    #[test]
    fn test_truncate_over_budget_keeps_length() {
        let long = "a".repeat(50);
        let cut = truncate(&long, 35);
        assert_eq!(cut.chars().count(), 35);
        assert!(cut.ends_with("..."));
    }

    #[test]
    fn test_compose() {
        let filing = Filing {
            document_number: "23".to_string(),
            link: "https://ecf.ilnd.uscourts.gov/doc1/067112345678".to_string(),
            case_title: "Duffy v. Godfread et al".to_string(),
            court: "ilnd".to_string(),
            description: "Order".to_string(),
            time: Utc.timestamp_opt(1381154400, 0).unwrap(),
        };
        let status = SocialChannel::compose(&filing);

        assert_eq!(
            status,
            "New #PACER doc in Duffy v. Godfread et al (ilnd): #23 Order. \
             https://ecf.ilnd.uscourts.gov/doc1/067112345678"
        );
    }

    #[test]
    fn test_compose_truncates_long_fields() {
        let filing = Filing {
            document_number: "1".to_string(),
            link: "https://ecf.cand.uscourts.gov/doc1/1".to_string(),
            case_title: "An Unreasonably Long Case Caption That Keeps Going".to_string(),
            court: "cand".to_string(),
            description: "A very long description of a docket entry that rambles on".to_string(),
            time: Utc.timestamp_opt(1381154400, 0).unwrap(),
        };
        let status = SocialChannel::compose(&filing);

        // 35-char budget for the case, 45 for the description
        assert!(status.contains("An Unreasonably Long Case Captio... (cand)"));
        assert!(!status.contains("Keeps Going"));
        assert!(!status.contains("rambles on"));
    }
}
