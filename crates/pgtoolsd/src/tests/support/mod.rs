//! Shared fixtures and test doubles.

mod factory;
mod frames;
mod reporter;
mod world;

use std::time::Duration;

use serde_json::json;

use crate::context::ServerContext;
use crate::dispatch::Params;
use crate::methods::INITIALIZE;
use crate::transport::{FrameWriter, SharedSink};

pub(crate) use self::factory::{FakeFactory, connect_params};
pub(crate) use self::frames::{decode_frames, encode_frames};
pub(crate) use self::reporter::{HealthEvent, RecordingHealthReporter};
pub(crate) use self::world::{SessionWorld, session_world};

/// How long [`slow_factory`] takes to open a connection.
const SLOW_OPEN: Duration = Duration::from_millis(200);

/// A fresh context with only `initialize` bound, writing into a sink.
pub(crate) fn test_context() -> (ServerContext, SharedSink) {
    test_context_with(FakeFactory::default())
}

/// Like [`test_context`], opening connections through `factory`.
pub(crate) fn test_context_with(factory: FakeFactory) -> (ServerContext, SharedSink) {
    let sink = SharedSink::new();
    let writer = FrameWriter::new(sink.clone(), pgtools_config::FrameTerminator::Crlf);
    (ServerContext::new(writer, factory), sink)
}

/// A fake driver whose connection attempts are still running when the next
/// few requests arrive.
pub(crate) fn slow_factory() -> FakeFactory {
    let factory = FakeFactory::default();
    factory.delay_opens(SLOW_OPEN);
    factory
}

/// A context that has already handled `initialize`.
pub(crate) fn initialized_context() -> (ServerContext, SharedSink) {
    let (context, sink) = test_context();
    let params = Params::from_value(Some(json!({}))).expect("params");
    context
        .dispatch()
        .lookup(INITIALIZE)
        .expect("initialize bound")
        .call(&context, params)
        .expect("initialize");
    (context, sink)
}
