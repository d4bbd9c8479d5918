//! Price Tracker - Amazon price-drop alerts
//!
//! Watches one product through a RapidAPI price endpoint and sends a single
//! email once the price falls a chosen percentage below where it started.

pub mod asin;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod notifier;
pub mod prompt;
pub mod provider;
pub mod tracker;

pub use asin::{extract_asin, Asin};
pub use config::{Config, SmtpSettings};
pub use error::{ConfigError, FetchError, InputError, NotifyError, Result, TrackerError};
pub use fetcher::{PriceFetcher, PriceSource};
pub use notifier::{EmailNotifier, Notifier};
pub use provider::ProviderProfile;
pub use tracker::{TokioSleeper, TrackOutcome, Tracker, TrackingRequest};
