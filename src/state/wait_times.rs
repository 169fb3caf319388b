//! Live Wait-Time Feed
//!
//! Decodes the emergency department broadcast, keeps the latest rows in
//! global state and derives the high-wait alert. Each frame replaces the
//! whole board; nothing is merged incrementally.

use leptos::SignalSet;

use crate::channel::timer::BrowserTimer;
use crate::channel::transport::WebSocketConnector;
use crate::channel::{
    Bridge, Channel, ChannelConfig, ChannelHandlers, DecodeError, RetryPolicy, Subscription,
};
use crate::state::global::GlobalState;

/// One emergency department row from the broadcast. Wait time and note are
/// display text straight from the upstream source; when either is missing
/// the row is kept with an "N/A" placeholder instead of being dropped.
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
pub struct WaitTimeRow {
    pub name: String,
    #[serde(default = "not_available", deserialize_with = "text_or_na")]
    pub wait_time: String,
    #[serde(default = "not_available", deserialize_with = "text_or_na")]
    pub note: String,
}

fn not_available() -> String {
    "N/A".to_string()
}

fn text_or_na<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize;

    let value = Option::<String>::deserialize(deserializer)?;
    Ok(match value {
        Some(text) if !text.trim().is_empty() => text,
        _ => not_available(),
    })
}

/// Decode one broadcast frame: a JSON array that replaces all prior rows.
pub fn decode_rows(raw: &str) -> Result<Vec<WaitTimeRow>, DecodeError> {
    Ok(serde_json::from_str(raw)?)
}

/// Minutes above which a facility triggers the high-wait alert.
pub const HIGH_WAIT_THRESHOLD_MIN: u32 = 240;

/// Parse display text like "4 hr 58 min" into total minutes. A missing
/// unit counts as zero, so "45 min" and "2 hr" both parse.
pub fn wait_minutes(text: &str) -> u32 {
    number_before(text, "hr") * 60 + number_before(text, "min")
}

/// The integer immediately preceding the first occurrence of `marker`.
fn number_before(text: &str, marker: &str) -> u32 {
    let Some(idx) = text.find(marker) else {
        return 0;
    };
    let digits: Vec<char> = text[..idx]
        .trim_end()
        .chars()
        .rev()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.iter().rev().collect::<String>().parse().unwrap_or(0)
}

/// Alert text when any facility's wait crosses the threshold, recomputed
/// from scratch on every frame.
pub fn high_wait_alert(rows: &[WaitTimeRow]) -> Option<String> {
    rows.iter()
        .find(|row| wait_minutes(&row.wait_time) > HIGH_WAIT_THRESHOLD_MIN)
        .map(|row| format!("High wait alert: {} > 4 hours!", row.name))
}

/// Page-scoped handle on the live wait-time channel. Opened on mount,
/// closed in `on_cleanup`.
pub struct WaitTimesFeed {
    channel: Channel,
    _subscription: Subscription,
}

impl WaitTimesFeed {
    /// Connect to the broadcast endpoint and mirror every update into
    /// `state`. The board retries on a flat 3s cadence; stale rows stay
    /// visible while it reconnects.
    pub fn connect(state: GlobalState, ws_base: &str) -> Self {
        let bridge: Bridge<WaitTimeRow> = Bridge::new();

        let subscription = bridge.subscribe({
            let bridge = bridge.clone();
            let state = state.clone();
            move || {
                let snapshot = bridge.snapshot();
                state.wait_status.set(snapshot.state);
                state.wait_alert.set(high_wait_alert(&snapshot.messages));
                state.wait_rows.set(snapshot.messages);
            }
        });

        let channel = Channel::open(
            ChannelConfig {
                url: format!("{}/ws/ed-waits", ws_base),
                policy: RetryPolicy::fixed(),
            },
            Box::new(WebSocketConnector),
            Box::new(BrowserTimer),
            ChannelHandlers {
                on_state: {
                    let bridge = bridge.clone();
                    Box::new(move |connection_state| bridge.set_state(connection_state))
                },
                on_message: {
                    let state = state.clone();
                    Box::new(move |raw| match decode_rows(&raw) {
                        Ok(rows) => {
                            state
                                .last_update
                                .set(Some(chrono::Utc::now().timestamp_millis()));
                            bridge.replace(rows);
                        }
                        Err(e) => {
                            web_sys::console::error_1(
                                &format!("wait-time frame dropped: {}", e).into(),
                            );
                        }
                    })
                },
                on_error: Box::new(|reason| {
                    web_sys::console::error_1(&format!("wait-time socket error: {}", reason).into());
                }),
            },
        );

        WaitTimesFeed {
            channel,
            _subscription: subscription,
        }
    }

    pub fn close(&self) {
        self.channel.close();
    }
}
