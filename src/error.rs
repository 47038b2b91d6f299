// src/error.rs

//! Unified error handling for the docketwatch application.

use std::fmt;

use thiserror::Error;

/// Result type alias for docketwatch operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// A court feed was served with a non-success status
    #[error("getting {court} RSS feed failed with status {status}")]
    Fetch { court: String, status: u16 },

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Feed XML could not be read
    #[error("feed parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Mailbox address could not be parsed
    #[error("address error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// Email message could not be assembled
    #[error("email error: {0}")]
    Email(#[from] lettre::error::Error),

    /// SMTP submission failed
    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    /// A notification channel failed to deliver
    #[error("delivery error via {channel}: {message}")]
    Delivery {
        channel: &'static str,
        message: String,
    },
}

impl AppError {
    /// Create a feed fetch error for a court.
    pub fn fetch(court: impl Into<String>, status: u16) -> Self {
        Self::Fetch {
            court: court.into(),
            status,
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a delivery error for a channel.
    pub fn delivery(channel: &'static str, message: impl fmt::Display) -> Self {
        Self::Delivery {
            channel,
            message: message.to_string(),
        }
    }
}
