//! Triage Chat Feed
//!
//! Carries the patient's symptom reports to the AI triage service and
//! appends its replies to the transcript. The scoring itself happens
//! server-side; this end only renders what comes back.

use leptos::{SignalSet, SignalUpdate};

use crate::channel::timer::BrowserTimer;
use crate::channel::transport::WebSocketConnector;
use crate::channel::{
    Bridge, Channel, ChannelConfig, ChannelHandlers, DecodeError, RetryPolicy, Subscription,
};
use crate::state::global::GlobalState;

/// Who authored a transcript entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sender {
    Patient,
    Assistant,
}

/// One transcript entry.
#[derive(Clone, Debug, PartialEq)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
}

impl ChatMessage {
    pub fn patient(text: impl Into<String>) -> Self {
        ChatMessage {
            sender: Sender::Patient,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        ChatMessage {
            sender: Sender::Assistant,
            text: text.into(),
        }
    }
}

/// Opening line seeded into every new transcript.
pub const GREETING: &str = "Hi! I'm HealthFlow AI. How can I help you today?";

/// One reply frame from the triage service. Everything beyond the human
/// response text is optional scoring detail.
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
pub struct TriageReply {
    pub response: String,
    #[serde(default)]
    pub recommended_level: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub reasons: Vec<String>,
    #[serde(default)]
    pub suggested_action: Option<String>,
    #[serde(default)]
    pub received_at: String,
    #[serde(default)]
    pub meta: serde_json::Map<String, serde_json::Value>,
}

/// Decode one reply frame.
pub fn decode_reply(raw: &str) -> Result<TriageReply, DecodeError> {
    Ok(serde_json::from_str(raw)?)
}

/// Outbound symptom report.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TriageRequest {
    pub symptoms: String,
    pub age: u32,
    pub known_conditions: Vec<String>,
}

impl TriageRequest {
    /// The chat only collects free-text symptoms; age and known conditions
    /// use the service defaults.
    pub fn from_symptoms(symptoms: impl Into<String>) -> Self {
        TriageRequest {
            symptoms: symptoms.into(),
            age: 35,
            known_conditions: Vec::new(),
        }
    }

    /// Serialize to a frame. A plain struct of strings and numbers always
    /// serializes, so there is no failure path to surface.
    pub fn to_frame(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Page-scoped handle on the triage chat channel. Opened on mount, closed
/// in `on_cleanup`.
pub struct TriageFeed {
    channel: Channel,
    _subscription: Subscription,
}

impl TriageFeed {
    /// Connect to the triage endpoint and append every reply to the
    /// transcript. The chat backs off exponentially between reconnects.
    pub fn connect(state: GlobalState, ws_base: &str) -> Self {
        let bridge: Bridge<TriageReply> = Bridge::new();

        let subscription = bridge.subscribe({
            let bridge = bridge.clone();
            let state = state.clone();
            move || {
                state.triage_status.set(bridge.state());
            }
        });

        let channel = Channel::open(
            ChannelConfig {
                url: format!("{}/ws/triage", ws_base),
                policy: RetryPolicy::exponential(),
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
                    Box::new(move |raw| match decode_reply(&raw) {
                        Ok(reply) => {
                            if let Some(level) = &reply.recommended_level {
                                web_sys::console::log_1(
                                    &format!(
                                        "triage level: {} (score {:?}, reasons {:?})",
                                        level, reply.score, reply.reasons
                                    )
                                    .into(),
                                );
                            }
                            state
                                .chat
                                .update(|chat| chat.push(ChatMessage::assistant(&reply.response)));
                            bridge.push(reply);
                        }
                        Err(e) => {
                            web_sys::console::error_1(
                                &format!("triage frame dropped: {}", e).into(),
                            );
                        }
                    })
                },
                on_error: Box::new(|reason| {
                    web_sys::console::error_1(&format!("triage socket error: {}", reason).into());
                }),
            },
        );

        TriageFeed {
            channel,
            _subscription: subscription,
        }
    }

    /// Send the patient's symptoms and echo them into the transcript. The
    /// report is dropped with a console note unless the channel is open;
    /// nothing is queued for retry.
    pub fn send_symptoms(&self, state: &GlobalState, symptoms: &str) {
        let text = symptoms.trim();
        if text.is_empty() {
            return;
        }
        let request = TriageRequest::from_symptoms(text);
        match self.channel.send(&request.to_frame()) {
            Ok(()) => {
                state
                    .chat
                    .update(|chat| chat.push(ChatMessage::patient(text)));
            }
            Err(e) => {
                web_sys::console::log_1(&format!("symptoms not sent: {}", e).into());
            }
        }
    }

    pub fn close(&self) {
        self.channel.close();
    }
}
