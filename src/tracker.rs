//! Tracking loop
//!
//! Resolving -> Baselining -> Polling -> done. The target price is fixed
//! from the first successful lookup; every later lookup either skips the
//! round (unavailable), keeps polling (still too expensive) or sends the
//! alert and stops.

use crate::asin::{extract_asin, Asin};
use crate::error::{InputError, Result};
use crate::fetcher::PriceSource;
use crate::notifier::{alert_body, Notifier, ALERT_SUBJECT};
use std::future::Future;
use std::time::Duration;

/// Wait between price checks when none is given
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(3600);

/// What to watch and whom to tell. Fixed for the whole run.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackingRequest {
    pub url: String,
    pub drop_percent: f64,
    pub recipient: String,
    pub interval: Duration,
    /// `None` polls until the price drops or the user stops the tracker
    pub max_checks: Option<u32>,
}

impl TrackingRequest {
    /// `drop_percent` must be finite and above zero.
    pub fn new(
        url: impl Into<String>,
        drop_percent: f64,
        recipient: impl Into<String>,
    ) -> std::result::Result<Self, InputError> {
        if !drop_percent.is_finite() || drop_percent <= 0.0 {
            return Err(InputError::InvalidDrop(drop_percent));
        }

        Ok(Self {
            url: url.into(),
            drop_percent,
            recipient: recipient.into(),
            interval: DEFAULT_INTERVAL,
            max_checks: None,
        })
    }

    pub fn with_interval(mut self, interval: Duration) -> std::result::Result<Self, InputError> {
        if interval.is_zero() {
            return Err(InputError::ZeroInterval);
        }
        self.interval = interval;
        Ok(self)
    }

    pub fn with_max_checks(mut self, max_checks: Option<u32>) -> Self {
        self.max_checks = max_checks;
        self
    }
}

/// Price at or below which the alert fires
pub fn target_price(baseline: f64, drop_percent: f64) -> f64 {
    baseline * (1.0 - drop_percent / 100.0)
}

/// Waits between polling rounds
pub trait Sleeper {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()>;
}

/// Wall-clock sleeper backed by the tokio timer
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await
    }
}

/// How a tracking run ended
#[derive(Debug, Clone, PartialEq)]
pub enum TrackOutcome {
    /// No ASIN in the URL; nothing was fetched
    NoIdentifier,
    /// The first lookup failed, so there is no baseline to compare against
    BaselineUnavailable,
    /// The alert was sent
    Notified { price: f64, baseline: f64 },
    /// Stopped by the user
    Cancelled,
    /// `max_checks` rounds passed without a drop
    Exhausted { checks: u32 },
}

enum State {
    Resolving,
    Baselining(Asin),
    Polling {
        asin: Asin,
        baseline: f64,
        target: f64,
        checks: u32,
    },
    Done(TrackOutcome),
}

/// Drives one tracking run over a price source, notifier and sleeper
pub struct Tracker<S, N, Z> {
    source: S,
    notifier: N,
    sleeper: Z,
}

impl<S, N, Z> Tracker<S, N, Z>
where
    S: PriceSource,
    N: Notifier,
    Z: Sleeper,
{
    pub fn new(source: S, notifier: N, sleeper: Z) -> Self {
        Self {
            source,
            notifier,
            sleeper,
        }
    }

    /// Run until the alert is sent, the run fails, or `cancel` resolves.
    ///
    /// `cancel` is raced against every lookup and every wait, but not against
    /// the email send. Only a failed send is returned as an error.
    pub async fn run<C>(&self, request: &TrackingRequest, cancel: C) -> Result<TrackOutcome>
    where
        C: Future<Output = ()>,
    {
        tokio::pin!(cancel);
        let mut state = State::Resolving;

        loop {
            state = match state {
                State::Resolving => match extract_asin(&request.url) {
                    Some(asin) => {
                        log::info!("Tracking ASIN {}", asin);
                        State::Baselining(asin)
                    }
                    None => {
                        println!("Could not find an ASIN in that URL - please double check it.");
                        State::Done(TrackOutcome::NoIdentifier)
                    }
                },

                State::Baselining(asin) => {
                    println!("Fetching current price...");
                    let price = tokio::select! {
                        biased;
                        _ = &mut cancel => None,
                        price = self.source.current_price(&asin) => Some(price),
                    };

                    match price {
                        None => State::Done(self.cancelled()),
                        Some(None) => {
                            println!("Sorry, couldn't retrieve the price (maybe try again later?).");
                            State::Done(TrackOutcome::BaselineUnavailable)
                        }
                        Some(Some(baseline)) => {
                            let target = target_price(baseline, request.drop_percent);
                            println!("Current price:  ${:.2}", baseline);
                            println!(
                                "Alert below:    ${:.2}  (-{}%)",
                                target, request.drop_percent
                            );
                            println!("\nTracking...  (press Ctrl+C to stop)");
                            log::info!(
                                "Checking every {}s for a price <= {:.2}",
                                request.interval.as_secs(),
                                target
                            );
                            State::Polling {
                                asin,
                                baseline,
                                target,
                                checks: 0,
                            }
                        }
                    }
                }

                State::Polling {
                    asin,
                    baseline,
                    target,
                    checks,
                } => {
                    if request.max_checks.is_some_and(|max| checks >= max) {
                        println!("No price drop after {} checks.  Tracker stopped.", checks);
                        State::Done(TrackOutcome::Exhausted { checks })
                    } else {
                        let observed = tokio::select! {
                            biased;
                            _ = &mut cancel => None,
                            price = self.poll_once(&asin, request.interval) => Some(price),
                        };
                        let checks = checks + 1;

                        match observed {
                            None => State::Done(self.cancelled()),
                            Some(None) => {
                                log::info!("Check {}: price unavailable, skipping", checks);
                                State::Polling {
                                    asin,
                                    baseline,
                                    target,
                                    checks,
                                }
                            }
                            Some(Some(price)) => {
                                println!("Checked: ${:.2}", price);
                                if price <= target {
                                    let body = alert_body(price, baseline, &request.url);
                                    self.notifier
                                        .send(&request.recipient, ALERT_SUBJECT, &body)
                                        .await?;
                                    println!("Price drop found - email sent!  Tracker stopped.");
                                    State::Done(TrackOutcome::Notified { price, baseline })
                                } else {
                                    State::Polling {
                                        asin,
                                        baseline,
                                        target,
                                        checks,
                                    }
                                }
                            }
                        }
                    }
                }

                State::Done(outcome) => return Ok(outcome),
            };
        }
    }

    async fn poll_once(&self, asin: &Asin, interval: Duration) -> Option<f64> {
        self.sleeper.sleep(interval).await;
        self.source.current_price(asin).await
    }

    fn cancelled(&self) -> TrackOutcome {
        println!("\nTracker stopped by user.");
        TrackOutcome::Cancelled
    }
}

#[cfg(test)]
#[path = "tracker_tests.rs"]
mod tests;
