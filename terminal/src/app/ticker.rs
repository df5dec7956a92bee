//! # Price Ticker
//!
//! Periodic quote refresh on a tokio interval. Results go out on the event
//! channel; the task stops on [`PriceTicker::stop`] or when the ticker is
//! dropped.

use async_channel::Sender;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::app::events::AppEvent;
use crate::core::service::MarketApi;
use crate::services::api::StockFilter;

/// Shortest refresh period the ticker accepts.
pub const MIN_TICK: Duration = Duration::from_secs(1);

pub struct PriceTicker {
    handle: Option<JoinHandle<()>>,
}

impl PriceTicker {
    /// Refresh `symbols` every `period` (all stocks when `symbols` is empty).
    /// Periods shorter than [`MIN_TICK`] are raised to it.
    pub fn start(
        api: Arc<dyn MarketApi>,
        symbols: Vec<String>,
        period: Duration,
        events: Sender<AppEvent>,
    ) -> Self {
        let period = period.max(MIN_TICK);
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            // a slow backend must not cause a burst of catch-up requests
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                let event = match api.refresh_stocks(&StockFilter::default()).await {
                    Ok(mut stocks) => {
                        if !symbols.is_empty() {
                            stocks.retain(|s| symbols.contains(&s.symbol));
                        }
                        tracing::debug!(count = stocks.len(), "Ticker refreshed quotes");
                        AppEvent::QuotesUpdated(stocks)
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Ticker refresh failed");
                        AppEvent::RefreshFailed(e.to_string())
                    }
                };
                if events.send(event).await.is_err() {
                    tracing::debug!("Event receiver dropped, stopping ticker");
                    break;
                }
            }
        });

        Self { handle: Some(handle) }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl Drop for PriceTicker {
    fn drop(&mut self) {
        self.stop();
    }
}
