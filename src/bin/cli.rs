//! docketwatch CLI
//!
//! Periodic entry point: meant to be invoked from a scheduler (cron
//! or similar), one non-overlapping invocation at a time.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use docketwatch::{
    error::Result,
    feed::HttpFeedSource,
    models::Config,
    notify::oauth::OauthCredentials,
    notify::{EmailChannel, EmailConfig, Notifier, SocialChannel},
    scrape::Scraper,
    state::{FileStateStore, StateStore},
};

/// docketwatch - PACER docket RSS watcher
#[derive(Parser, Debug)]
#[command(
    name = "docketwatch",
    version,
    about = "Watches PACER docket RSS feeds for new filings in followed cases"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Directory holding the watermark and kill-switch files
    #[arg(short, long, default_value = "state")]
    state_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Poll every watched court once and notify on new matches
    Run {
        #[command(flatten)]
        channels: ChannelArgs,
    },

    /// Validate the configuration file
    Validate,

    /// Show the persisted watermark and kill-switch state
    Status,

    /// Engage the kill switch so later runs exit immediately
    Disable,

    /// Clear the kill switch
    Enable,
}

/// Notification channel selection and credentials.
#[derive(Args, Debug)]
struct ChannelArgs {
    /// Send an email for each new match
    #[arg(long)]
    email: bool,

    /// Account to authenticate with and send from
    #[arg(long, env = "DOCKETWATCH_EMAIL_FROM", required_if_eq("email", "true"))]
    email_from: Option<String>,

    /// SMTP password for the sending account
    #[arg(
        long,
        env = "DOCKETWATCH_EMAIL_PASS",
        hide_env_values = true,
        required_if_eq("email", "true")
    )]
    email_pass: Option<String>,

    /// Recipient address
    #[arg(long, env = "DOCKETWATCH_EMAIL_TO", required_if_eq("email", "true"))]
    email_to: Option<String>,

    /// SMTP relay to submit through
    #[arg(long, default_value = "smtp.gmail.com")]
    smtp_relay: String,

    /// SMTP submission port (STARTTLS)
    #[arg(long, default_value_t = 587)]
    smtp_port: u16,

    /// Post a status for each new match
    #[arg(long)]
    social: bool,

    /// OAuth access token
    #[arg(long, env = "DOCKETWATCH_SOCIAL_TOKEN", required_if_eq("social", "true"))]
    social_token: Option<String>,

    /// OAuth access token secret
    #[arg(
        long,
        env = "DOCKETWATCH_SOCIAL_TOKEN_SECRET",
        hide_env_values = true,
        required_if_eq("social", "true")
    )]
    social_token_secret: Option<String>,

    /// OAuth consumer key
    #[arg(
        long,
        env = "DOCKETWATCH_SOCIAL_CONSUMER_KEY",
        required_if_eq("social", "true")
    )]
    social_consumer_key: Option<String>,

    /// OAuth consumer secret
    #[arg(
        long,
        env = "DOCKETWATCH_SOCIAL_CONSUMER_SECRET",
        hide_env_values = true,
        required_if_eq("social", "true")
    )]
    social_consumer_secret: Option<String>,
}

impl ChannelArgs {
    /// Build the notifier from the enabled channel flags. clap has
    /// already required the credentials that go with each flag.
    fn into_notifier(self) -> Notifier {
        let mut notifier = Notifier::new();

        if self.email {
            if let (Some(account), Some(password), Some(to)) =
                (self.email_from, self.email_pass, self.email_to)
            {
                notifier = notifier.with_channel(Box::new(EmailChannel::new(EmailConfig {
                    relay: self.smtp_relay,
                    port: self.smtp_port,
                    account,
                    password,
                    to,
                })));
            }
        }

        if self.social {
            if let (Some(token), Some(token_secret), Some(consumer_key), Some(consumer_secret)) = (
                self.social_token,
                self.social_token_secret,
                self.social_consumer_key,
                self.social_consumer_secret,
            ) {
                notifier = notifier.with_channel(Box::new(SocialChannel::new(OauthCredentials {
                    token,
                    token_secret,
                    consumer_key,
                    consumer_secret,
                })));
            }
        }

        notifier
    }
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let state = FileStateStore::new(&cli.state_dir);

    match cli.command {
        Command::Run { channels } => {
            if state.kill_switch_engaged().await {
                log::warn!("Kill switch set. Not scraping.");
                return Ok(());
            }

            let config = Config::load_or_default(&cli.config);
            config.validate()?;

            let notifier = channels.into_notifier();
            if notifier.channel_count() == 0 {
                log::info!("No notification channels enabled; matches will only be logged.");
            }

            let source = HttpFeedSource::new(&config.scraper)?;
            let scraper = Scraper::new(&source, &state);
            let outcome = scraper.run(&config.watchlist, &notifier).await?;

            log::info!(
                "Checked {} court(s): {} entries scanned, {} match(es), {} delivery failure(s)",
                outcome.courts,
                outcome.entries_scanned,
                outcome.matches,
                outcome.delivery_failures
            );
        }

        Command::Validate => {
            let config = Config::load(&cli.config)?;
            config.validate()?;
            log::info!(
                "Config OK: watching {} court(s) via {}",
                config.watchlist.court_count(),
                config.scraper.feed_url
            );
        }

        Command::Status => {
            log::info!("State directory: {}", cli.state_dir.display());
            let watermark = state.watermark().await;
            if watermark == 0 {
                log::info!("Watermark: never set");
            } else {
                log::info!("Watermark: {}", watermark);
            }
            log::info!(
                "Kill switch: {}",
                if state.kill_switch_engaged().await {
                    "engaged"
                } else {
                    "off"
                }
            );
        }

        Command::Disable => {
            state.engage_kill_switch().await?;
            log::info!("Kill switch engaged; runs will exit immediately until 'enable'.");
        }

        Command::Enable => {
            state.clear_kill_switch().await?;
            log::info!("Kill switch cleared.");
        }
    }

    Ok(())
}
