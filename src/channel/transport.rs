//! Transport Seam
//!
//! Thin abstraction over the browser WebSocket so the channel state machine
//! stays testable outside a browser. The real implementation wires the four
//! socket callbacks the same way the rest of the app would: `Closure`s that
//! are handed to the socket and forgotten.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CloseEvent, MessageEvent, WebSocket};

use super::ChannelError;

/// Callbacks fired by a live transport. All run on the browser event loop.
pub struct TransportEvents {
    pub on_open: Box<dyn Fn()>,
    pub on_message: Box<dyn Fn(String)>,
    pub on_error: Box<dyn Fn(String)>,
    pub on_close: Box<dyn Fn()>,
}

/// One live bidirectional connection.
pub trait Transport {
    fn send_text(&self, text: &str) -> Result<(), ChannelError>;
    fn close(&self);
}

/// Opens transports. A channel owns exactly one live transport at a time.
pub trait Connector {
    fn connect(&self, url: &str, events: TransportEvents)
        -> Result<Box<dyn Transport>, ChannelError>;
}

/// Browser WebSocket connector.
pub struct WebSocketConnector;

impl Connector for WebSocketConnector {
    fn connect(
        &self,
        url: &str,
        events: TransportEvents,
    ) -> Result<Box<dyn Transport>, ChannelError> {
        let ws = WebSocket::new(url).map_err(|e| ChannelError::Transport(format!("{:?}", e)))?;

        let on_open = events.on_open;
        let open = Closure::wrap(Box::new(move |_: JsValue| on_open()) as Box<dyn FnMut(JsValue)>);
        ws.set_onopen(Some(open.as_ref().unchecked_ref()));
        open.forget();

        let on_message = events.on_message;
        let message = Closure::wrap(Box::new(move |event: MessageEvent| {
            if let Ok(text) = event.data().dyn_into::<js_sys::JsString>() {
                on_message(String::from(text));
            }
        }) as Box<dyn FnMut(MessageEvent)>);
        ws.set_onmessage(Some(message.as_ref().unchecked_ref()));
        message.forget();

        let on_error = events.on_error;
        let error = Closure::wrap(Box::new(move |e: JsValue| {
            on_error(format!("{:?}", e));
        }) as Box<dyn FnMut(JsValue)>);
        ws.set_onerror(Some(error.as_ref().unchecked_ref()));
        error.forget();

        let on_close = events.on_close;
        let close = Closure::wrap(Box::new(move |event: CloseEvent| {
            web_sys::console::log_1(
                &format!(
                    "socket closed: code={}, reason={}",
                    event.code(),
                    event.reason()
                )
                .into(),
            );
            on_close();
        }) as Box<dyn FnMut(CloseEvent)>);
        ws.set_onclose(Some(close.as_ref().unchecked_ref()));
        close.forget();

        Ok(Box::new(BrowserSocket { ws }))
    }
}

struct BrowserSocket {
    ws: WebSocket,
}

impl Transport for BrowserSocket {
    fn send_text(&self, text: &str) -> Result<(), ChannelError> {
        self.ws
            .send_with_str(text)
            .map_err(|e| ChannelError::Transport(format!("{:?}", e)))
    }

    fn close(&self) {
        let _ = self.ws.close();
    }
}
