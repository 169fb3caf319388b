//! Reconnecting Channel
//!
//! Owns one connection lifecycle end to end. Consumers see three calls
//! (`open`, `send`, `close`) and one handler record; everything else,
//! including recovery after drops, happens inside.
//!
//! State machine: `Connecting -> Open -> Closed -> Retrying -> Connecting`,
//! repeating until `close()` is called. There is no retry ceiling; the
//! channel keeps trying for as long as the consumer holds it open.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::retry::RetryPolicy;
use super::timer::{Timer, TimerHandle};
use super::transport::{Connector, Transport, TransportEvents};
use super::{ChannelError, ConnectionState};

/// Everything the channel reports, bound at a single call site.
pub struct ChannelHandlers {
    pub on_state: Box<dyn Fn(ConnectionState)>,
    pub on_message: Box<dyn Fn(String)>,
    pub on_error: Box<dyn Fn(String)>,
}

/// Endpoint plus reconnect profile.
pub struct ChannelConfig {
    pub url: String,
    pub policy: RetryPolicy,
}

/// Handle on a reconnecting channel. Dropping it tears the connection down.
pub struct Channel {
    inner: Rc<Inner>,
}

struct Inner {
    config: ChannelConfig,
    connector: Box<dyn Connector>,
    timer: Box<dyn Timer>,
    handlers: ChannelHandlers,
    state: Cell<ConnectionState>,
    transport: RefCell<Option<Box<dyn Transport>>>,
    attempts: Cell<u32>,
    pending_retry: RefCell<Option<Box<dyn TimerHandle>>>,
    closed: Cell<bool>,
}

impl Channel {
    /// Open a channel against `config.url` and start connecting immediately.
    pub fn open(
        config: ChannelConfig,
        connector: Box<dyn Connector>,
        timer: Box<dyn Timer>,
        handlers: ChannelHandlers,
    ) -> Self {
        let inner = Rc::new(Inner {
            config,
            connector,
            timer,
            handlers,
            state: Cell::new(ConnectionState::Connecting),
            transport: RefCell::new(None),
            attempts: Cell::new(0),
            pending_retry: RefCell::new(None),
            closed: Cell::new(false),
        });
        connect(&inner);
        Channel { inner }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ConnectionState {
        self.inner.state.get()
    }

    /// Transmit one frame. Fails with [`ChannelError::NotConnected`] unless
    /// the channel is `Open`; nothing is buffered for later delivery, so a
    /// caller that ignores the error gets drop-on-the-floor semantics.
    pub fn send(&self, payload: &str) -> Result<(), ChannelError> {
        if self.inner.state.get() != ConnectionState::Open {
            return Err(ChannelError::NotConnected);
        }
        let transport = self.inner.transport.borrow();
        match transport.as_ref() {
            Some(transport) => transport.send_text(payload),
            None => Err(ChannelError::NotConnected),
        }
    }

    /// Tear the channel down: cancel any pending reconnect, close the live
    /// transport and emit a final `Closed` state so subscribers are not left
    /// holding a stale view. Safe to call repeatedly.
    pub fn close(&self) {
        let inner = &self.inner;
        if inner.closed.replace(true) {
            return;
        }
        inner.pending_retry.borrow_mut().take();
        if let Some(transport) = inner.transport.borrow_mut().take() {
            transport.close();
        }
        set_state(inner, ConnectionState::Closed);
    }
}

impl Drop for Channel {
    fn drop(&mut self) {
        self.close();
    }
}

fn set_state(inner: &Inner, state: ConnectionState) {
    inner.state.set(state);
    (inner.handlers.on_state)(state);
}

fn connect(inner: &Rc<Inner>) {
    set_state(inner, ConnectionState::Connecting);

    let events = TransportEvents {
        on_open: {
            let weak = Rc::downgrade(inner);
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    transport_opened(&inner);
                }
            })
        },
        on_message: {
            let weak = Rc::downgrade(inner);
            Box::new(move |text| {
                if let Some(inner) = weak.upgrade() {
                    if !inner.closed.get() {
                        (inner.handlers.on_message)(text);
                    }
                }
            })
        },
        on_error: {
            let weak = Rc::downgrade(inner);
            Box::new(move |reason| {
                // Errors are informational; the close event that follows
                // drives the retry.
                if let Some(inner) = weak.upgrade() {
                    (inner.handlers.on_error)(reason);
                }
            })
        },
        on_close: {
            let weak = Rc::downgrade(inner);
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    transport_closed(&inner);
                }
            })
        },
    };

    match inner.connector.connect(&inner.config.url, events) {
        Ok(transport) => {
            *inner.transport.borrow_mut() = Some(transport);
        }
        Err(e) => {
            (inner.handlers.on_error)(e.to_string());
            transport_closed(inner);
        }
    }
}

fn transport_opened(inner: &Rc<Inner>) {
    if inner.closed.get() {
        return;
    }
    inner.attempts.set(0);
    set_state(inner, ConnectionState::Open);
}

fn transport_closed(inner: &Rc<Inner>) {
    if inner.closed.get() {
        return;
    }
    inner.transport.borrow_mut().take();
    set_state(inner, ConnectionState::Closed);
    schedule_retry(inner);
}

fn schedule_retry(inner: &Rc<Inner>) {
    // Invariant: at most one pending reconnect per channel.
    if inner.pending_retry.borrow().is_some() {
        return;
    }

    let attempt = inner.attempts.get() + 1;
    inner.attempts.set(attempt);
    let delay_ms = inner.config.policy.delay_ms(attempt);

    set_state(inner, ConnectionState::Retrying);

    let weak = Rc::downgrade(inner);
    let handle = inner.timer.schedule(
        delay_ms,
        Box::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.pending_retry.borrow_mut().take();
                if inner.closed.get() {
                    return;
                }
                connect(&inner);
            }
        }),
    );
    *inner.pending_retry.borrow_mut() = Some(handle);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct FakeHub {
        events: RefCell<Vec<TransportEvents>>,
        sent: RefCell<Vec<String>>,
        fail_connect: Cell<bool>,
        closed_transports: Cell<u32>,
    }

    impl FakeHub {
        fn connects(&self) -> usize {
            self.events.borrow().len()
        }

        fn fire_open(&self) {
            let events = self.events.borrow();
            (events.last().expect("no transport").on_open)();
        }

        fn fire_message(&self, text: &str) {
            let events = self.events.borrow();
            (events.last().expect("no transport").on_message)(text.to_string());
        }

        fn fire_error(&self, reason: &str) {
            let events = self.events.borrow();
            (events.last().expect("no transport").on_error)(reason.to_string());
        }

        fn fire_close(&self) {
            let events = self.events.borrow();
            (events.last().expect("no transport").on_close)();
        }
    }

    struct FakeConnector {
        hub: Rc<FakeHub>,
    }

    impl Connector for FakeConnector {
        fn connect(
            &self,
            _url: &str,
            events: TransportEvents,
        ) -> Result<Box<dyn Transport>, ChannelError> {
            if self.hub.fail_connect.get() {
                return Err(ChannelError::Transport("connection refused".to_string()));
            }
            self.hub.events.borrow_mut().push(events);
            Ok(Box::new(FakeTransport {
                hub: Rc::clone(&self.hub),
            }))
        }
    }

    struct FakeTransport {
        hub: Rc<FakeHub>,
    }

    impl Transport for FakeTransport {
        fn send_text(&self, text: &str) -> Result<(), ChannelError> {
            self.hub.sent.borrow_mut().push(text.to_string());
            Ok(())
        }

        fn close(&self) {
            self.hub
                .closed_transports
                .set(self.hub.closed_transports.get() + 1);
        }
    }

    struct FakeTask {
        delay_ms: u32,
        callback: Option<Box<dyn FnOnce()>>,
        cancelled: Rc<Cell<bool>>,
    }

    #[derive(Clone, Default)]
    struct FakeTimer {
        tasks: Rc<RefCell<Vec<FakeTask>>>,
    }

    struct FakeHandle {
        cancelled: Rc<Cell<bool>>,
    }

    impl TimerHandle for FakeHandle {}

    impl Drop for FakeHandle {
        fn drop(&mut self) {
            self.cancelled.set(true);
        }
    }

    impl Timer for FakeTimer {
        fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Box<dyn TimerHandle> {
            let cancelled = Rc::new(Cell::new(false));
            self.tasks.borrow_mut().push(FakeTask {
                delay_ms,
                callback: Some(callback),
                cancelled: Rc::clone(&cancelled),
            });
            Box::new(FakeHandle { cancelled })
        }
    }

    impl FakeTimer {
        fn pending_delays(&self) -> Vec<u32> {
            self.tasks
                .borrow()
                .iter()
                .filter(|task| task.callback.is_some() && !task.cancelled.get())
                .map(|task| task.delay_ms)
                .collect()
        }

        fn cancelled_count(&self) -> usize {
            self.tasks
                .borrow()
                .iter()
                .filter(|task| task.cancelled.get())
                .count()
        }

        /// Fires the next unfired task even if its handle was dropped, so
        /// tests can exercise the channel's own post-close guard.
        fn fire_next(&self) {
            let callback = {
                let mut tasks = self.tasks.borrow_mut();
                tasks
                    .iter_mut()
                    .find(|task| task.callback.is_some())
                    .and_then(|task| task.callback.take())
            };
            callback.expect("no pending timer")();
        }
    }

    struct Harness {
        channel: Channel,
        hub: Rc<FakeHub>,
        timer: FakeTimer,
        states: Rc<RefCell<Vec<ConnectionState>>>,
        errors: Rc<RefCell<Vec<String>>>,
        messages: Rc<RefCell<Vec<String>>>,
    }

    fn harness(policy: RetryPolicy) -> Harness {
        let hub = Rc::new(FakeHub::default());
        let timer = FakeTimer::default();
        let states = Rc::new(RefCell::new(Vec::new()));
        let errors = Rc::new(RefCell::new(Vec::new()));
        let messages = Rc::new(RefCell::new(Vec::new()));

        let channel = Channel::open(
            ChannelConfig {
                url: "ws://test/ws".to_string(),
                policy,
            },
            Box::new(FakeConnector {
                hub: Rc::clone(&hub),
            }),
            Box::new(timer.clone()),
            ChannelHandlers {
                on_state: {
                    let states = Rc::clone(&states);
                    Box::new(move |state| states.borrow_mut().push(state))
                },
                on_message: {
                    let messages = Rc::clone(&messages);
                    Box::new(move |text| messages.borrow_mut().push(text))
                },
                on_error: {
                    let errors = Rc::clone(&errors);
                    Box::new(move |reason| errors.borrow_mut().push(reason))
                },
            },
        );

        Harness {
            channel,
            hub,
            timer,
            states,
            errors,
            messages,
        }
    }

    #[test]
    fn opens_in_connecting_state() {
        let h = harness(RetryPolicy::exponential());
        assert_eq!(h.channel.state(), ConnectionState::Connecting);
        assert_eq!(h.hub.connects(), 1);
    }

    #[test]
    fn transitions_to_open_and_delivers_in_order() {
        let h = harness(RetryPolicy::exponential());
        h.hub.fire_open();
        assert_eq!(h.channel.state(), ConnectionState::Open);

        h.hub.fire_message("first");
        h.hub.fire_message("second");
        assert_eq!(*h.messages.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn send_before_open_writes_nothing() {
        let h = harness(RetryPolicy::exponential());
        let result = h.channel.send("early");
        assert!(matches!(result, Err(ChannelError::NotConnected)));
        assert!(h.hub.sent.borrow().is_empty());
    }

    #[test]
    fn send_while_open_transmits() {
        let h = harness(RetryPolicy::exponential());
        h.hub.fire_open();
        h.channel.send("hello").unwrap();
        assert_eq!(*h.hub.sent.borrow(), vec!["hello"]);
    }

    #[test]
    fn close_event_schedules_backed_off_retry() {
        let h = harness(RetryPolicy::exponential());
        h.hub.fire_open();
        h.hub.fire_close();

        assert_eq!(h.channel.state(), ConnectionState::Retrying);
        assert_eq!(h.timer.pending_delays(), vec![2_000]);

        h.timer.fire_next();
        assert_eq!(h.channel.state(), ConnectionState::Connecting);
        assert_eq!(h.hub.connects(), 2);
    }

    #[test]
    fn backoff_grows_across_failed_reconnects() {
        let h = harness(RetryPolicy::exponential());
        h.hub.fire_open();

        let mut expected = Vec::new();
        for delay in [2_000, 4_000, 8_000, 16_000, 30_000, 30_000] {
            h.hub.fire_close();
            expected.push(delay);
            h.timer.fire_next();
        }
        let delays: Vec<u32> = h.timer.tasks.borrow().iter().map(|t| t.delay_ms).collect();
        assert_eq!(delays, expected);
    }

    #[test]
    fn successful_open_resets_backoff() {
        let h = harness(RetryPolicy::exponential());
        h.hub.fire_open();
        h.hub.fire_close();
        h.timer.fire_next();
        h.hub.fire_close();
        h.timer.fire_next();

        // Third transport succeeds; the next drop starts over from the base.
        h.hub.fire_open();
        h.hub.fire_close();
        assert_eq!(h.timer.pending_delays(), vec![2_000]);
    }

    #[test]
    fn fixed_policy_keeps_flat_delay() {
        let h = harness(RetryPolicy::fixed());
        h.hub.fire_open();
        h.hub.fire_close();
        h.timer.fire_next();
        h.hub.fire_close();
        h.timer.fire_next();
        h.hub.fire_close();

        let delays: Vec<u32> = h.timer.tasks.borrow().iter().map(|t| t.delay_ms).collect();
        assert_eq!(delays, vec![3_000, 3_000, 3_000]);
    }

    #[test]
    fn duplicate_close_events_schedule_one_retry() {
        let h = harness(RetryPolicy::exponential());
        h.hub.fire_open();
        h.hub.fire_close();
        h.hub.fire_close();
        assert_eq!(h.timer.pending_delays().len(), 1);
    }

    #[test]
    fn error_event_reports_without_retrying() {
        let h = harness(RetryPolicy::exponential());
        h.hub.fire_open();
        h.hub.fire_error("tls handshake failed");

        assert_eq!(*h.errors.borrow(), vec!["tls handshake failed"]);
        assert_eq!(h.channel.state(), ConnectionState::Open);
        assert!(h.timer.pending_delays().is_empty());
    }

    #[test]
    fn connector_failure_is_reported_and_retried() {
        let hub = Rc::new(FakeHub::default());
        hub.fail_connect.set(true);
        let timer = FakeTimer::default();
        let errors = Rc::new(RefCell::new(Vec::new()));

        let channel = Channel::open(
            ChannelConfig {
                url: "ws://test/ws".to_string(),
                policy: RetryPolicy::exponential(),
            },
            Box::new(FakeConnector {
                hub: Rc::clone(&hub),
            }),
            Box::new(timer.clone()),
            ChannelHandlers {
                on_state: Box::new(|_| {}),
                on_message: Box::new(|_| {}),
                on_error: {
                    let errors = Rc::clone(&errors);
                    Box::new(move |reason| errors.borrow_mut().push(reason))
                },
            },
        );

        assert_eq!(channel.state(), ConnectionState::Retrying);
        assert_eq!(errors.borrow().len(), 1);
        assert_eq!(timer.pending_delays(), vec![2_000]);

        hub.fail_connect.set(false);
        timer.fire_next();
        assert_eq!(hub.connects(), 1);
        hub.fire_open();
        assert_eq!(channel.state(), ConnectionState::Open);
    }

    #[test]
    fn close_cancels_pending_retry() {
        let h = harness(RetryPolicy::exponential());
        h.hub.fire_open();
        h.hub.fire_close();
        assert_eq!(h.timer.pending_delays().len(), 1);

        h.channel.close();
        assert_eq!(h.timer.cancelled_count(), 1);
        assert_eq!(h.channel.state(), ConnectionState::Closed);
    }

    #[test]
    fn retry_firing_after_close_is_a_no_op() {
        let h = harness(RetryPolicy::exponential());
        h.hub.fire_open();
        h.hub.fire_close();
        h.channel.close();

        // Even if the timer somehow fires, the closed guard holds.
        h.timer.fire_next();
        assert_eq!(h.hub.connects(), 1);
        assert_eq!(h.channel.state(), ConnectionState::Closed);
    }

    #[test]
    fn close_is_idempotent_and_emits_one_final_state() {
        let h = harness(RetryPolicy::exponential());
        h.hub.fire_open();
        h.channel.close();
        h.channel.close();

        let closed_emissions = h
            .states
            .borrow()
            .iter()
            .filter(|s| **s == ConnectionState::Closed)
            .count();
        assert_eq!(closed_emissions, 1);
        assert_eq!(*h.states.borrow().last().unwrap(), ConnectionState::Closed);
        assert_eq!(h.hub.closed_transports.get(), 1);
    }

    #[test]
    fn transport_close_event_after_explicit_close_is_ignored() {
        let h = harness(RetryPolicy::exponential());
        h.hub.fire_open();
        h.channel.close();

        // The browser still delivers the close event for the socket we shut.
        h.hub.fire_close();
        assert!(h.timer.pending_delays().is_empty());
        assert_eq!(h.channel.state(), ConnectionState::Closed);
    }

    #[test]
    fn send_after_close_is_rejected() {
        let h = harness(RetryPolicy::exponential());
        h.hub.fire_open();
        h.channel.close();
        assert!(matches!(
            h.channel.send("late"),
            Err(ChannelError::NotConnected)
        ));
        assert!(h.hub.sent.borrow().is_empty());
    }

    #[test]
    fn dropping_the_handle_closes_the_channel() {
        let h = harness(RetryPolicy::exponential());
        h.hub.fire_open();
        let states = Rc::clone(&h.states);
        drop(h.channel);
        assert_eq!(*states.borrow().last().unwrap(), ConnectionState::Closed);
    }
}
