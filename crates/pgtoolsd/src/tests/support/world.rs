//! BDD world: a scripted client session run through the server loop.

use std::cell::RefCell;
use std::io::Cursor;

use pgtools_config::Config;
use serde_json::{Value, json};

use crate::server::{ServeError, ServeOutcome, Server};
use crate::transport::SharedSink;

use super::factory::FakeFactory;
use super::frames::{decode_frames, encode_frame, encode_frames};

/// Scenario world shared across session steps.
pub(crate) struct SessionWorld {
    input: Vec<u8>,
    next_id: i64,
    factory: FakeFactory,
    output: SharedSink,
    outcome: Option<Result<ServeOutcome, ServeError>>,
}

impl SessionWorld {
    fn new() -> Self {
        Self {
            input: Vec::new(),
            next_id: 0,
            factory: FakeFactory::default(),
            output: SharedSink::new(),
            outcome: None,
        }
    }

    /// Factory the session opens connections through.
    pub(crate) fn factory(&self) -> &FakeFactory {
        &self.factory
    }

    /// Queues a request with the next numeric id.
    pub(crate) fn send(&mut self, method: &str, params: Option<Value>) {
        let mut request = json!({"jsonrpc": "2.0", "id": self.next_id, "method": method});
        if let Some(params) = params {
            request["params"] = params;
        }
        self.next_id += 1;
        self.input.extend(encode_frames(&[request]));
    }

    /// Queues a message as-is, without assigning an id.
    pub(crate) fn send_message(&mut self, message: &Value) {
        self.input.extend(encode_frames(std::slice::from_ref(message)));
    }

    /// Queues a frame whose body is `body` verbatim.
    pub(crate) fn send_body(&mut self, body: &str) {
        self.input.extend(encode_frame(body));
    }

    /// Runs every queued request through a fresh server.
    pub(crate) fn run(&mut self) {
        let mut server = Server::new(
            Cursor::new(self.input.clone()),
            self.output.clone(),
            &Config::default(),
            self.factory.clone(),
        );
        self.outcome = Some(server.serve());
    }

    /// How the loop ended.
    pub(crate) fn outcome(&self) -> &Result<ServeOutcome, ServeError> {
        self.outcome.as_ref().expect("session has not run")
    }

    /// Raw bytes written to the output stream, as text.
    pub(crate) fn raw_output(&self) -> String {
        self.output.text()
    }

    /// Every frame written to the output stream.
    pub(crate) fn messages(&self) -> Vec<Value> {
        decode_frames(&self.output.contents())
    }

    /// Messages that answer a request.
    pub(crate) fn responses(&self) -> Vec<Value> {
        self.messages()
            .into_iter()
            .filter(|message| message.get("id").is_some())
            .collect()
    }

    /// Server-initiated notifications.
    pub(crate) fn events(&self) -> Vec<Value> {
        self.messages()
            .into_iter()
            .filter(|message| message.get("method").is_some())
            .collect()
    }

    /// Response carrying `id`.
    pub(crate) fn response(&self, id: i64) -> Option<Value> {
        self.responses()
            .into_iter()
            .find(|response| response["id"] == json!(id))
    }
}

/// Builds an empty session world.
pub(crate) fn session_world() -> RefCell<SessionWorld> {
    RefCell::new(SessionWorld::new())
}
