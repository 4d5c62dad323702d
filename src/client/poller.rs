//! Background order-tracking poller
//!
//! Mirrors the tracking page's refresh loop: fetch the order, and while it
//! is still in progress call the auto-update endpoint so the time-based
//! policy gets a chance to advance it. Each snapshot is published on a
//! watch channel; consumers watch that instead of making their own
//! requests.

use crate::core::order::{Order, OrderStatus};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use uuid::Uuid;

/// Default polling interval, matching the tracking page's refresh rate
const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct PollerConfig {
    /// Server base URL, e.g. `http://127.0.0.1:5003`
    pub base_url: String,
    pub interval: Duration,
}

impl PollerConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            interval: DEFAULT_INTERVAL,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }
}

/// Polls one order until it reaches a settled status.
///
/// Dropping the poller aborts the background task.
pub struct OrderPoller {
    handle: JoinHandle<()>,
    rx: watch::Receiver<Option<Order>>,
}

impl OrderPoller {
    /// Start polling. The first fetch happens immediately; afterwards the
    /// order is re-fetched on the configured interval until its status is
    /// `delivered`, `completed`, or `cancelled`.
    pub fn spawn(client: reqwest::Client, config: PollerConfig, order_id: Uuid) -> Self {
        let (tx, rx) = watch::channel(None);
        let handle = tokio::spawn(poll_loop(client, config, order_id, tx));
        Self { handle, rx }
    }

    /// A watch handle that yields each fresh snapshot
    pub fn subscribe(&self) -> watch::Receiver<Option<Order>> {
        self.rx.clone()
    }

    /// The most recent snapshot, `None` before the first successful fetch
    pub fn latest(&self) -> Option<Order> {
        self.rx.borrow().clone()
    }
}

impl Drop for OrderPoller {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn is_settled(status: OrderStatus) -> bool {
    matches!(
        status,
        OrderStatus::Delivered | OrderStatus::Completed | OrderStatus::Cancelled
    )
}

async fn poll_loop(
    client: reqwest::Client,
    config: PollerConfig,
    order_id: Uuid,
    tx: watch::Sender<Option<Order>>,
) {
    let fetch_url = format!("{}/api/orders/{}", config.base_url, order_id);
    let advance_url = format!(
        "{}/api/orders/{}/auto-update-status",
        config.base_url, order_id
    );
    let mut interval = tokio::time::interval(config.interval);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        // First tick fires immediately
        interval.tick().await;

        match poll_once(&client, &fetch_url, &advance_url).await {
            Ok(order) => {
                let settled = is_settled(order.status);
                if tx.send(Some(order)).is_err() {
                    // No one is watching anymore
                    return;
                }
                if settled {
                    tracing::debug!(%order_id, "order settled, poller stopping");
                    return;
                }
            }
            Err(err) => {
                tracing::warn!(%order_id, error = %err, "order poll failed");
            }
        }
    }
}

/// Fetch the order; while it is in progress, also invoke the auto-update
/// endpoint and adopt its result.
async fn poll_once(
    client: &reqwest::Client,
    fetch_url: &str,
    advance_url: &str,
) -> reqwest::Result<Order> {
    let order = get_json(client, fetch_url).await?;
    if !order.status.is_in_progress() {
        return Ok(order);
    }

    client
        .post(advance_url)
        .send()
        .await?
        .error_for_status()?
        .json::<Order>()
        .await
}

async fn get_json(client: &reqwest::Client, url: &str) -> reqwest::Result<Order> {
    client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .json::<Order>()
        .await
}
