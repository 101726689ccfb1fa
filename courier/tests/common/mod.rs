#![allow(dead_code)]

use courier::{BusResult, Context, Message};
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

// ============================================================================
// Test Message Types
// ============================================================================

#[derive(Clone, Debug, PartialEq, Message)]
pub struct CreateUserCmd {
    pub name: String,
    pub result: Option<u64>,
}

impl CreateUserCmd {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            result: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Message)]
pub struct UserCreated {
    pub id: u64,
}

#[derive(Clone, Debug, PartialEq, Message)]
pub struct OrgDeleted {
    pub id: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Message)]
pub struct GetOrgQuery {
    pub id: u64,
    pub result: Option<String>,
}

// ============================================================================
// Test Handlers
// ============================================================================

/// A handler that records every command it sees and answers with a fixed id.
pub struct RecordingHandler {
    pub seen: Arc<Mutex<Vec<CreateUserCmd>>>,
    pub answer: u64,
}

impl RecordingHandler {
    pub fn new(answer: u64) -> Self {
        Self {
            seen: Arc::new(Mutex::new(Vec::new())),
            answer,
        }
    }
}

impl courier::Handler<CreateUserCmd> for RecordingHandler {
    fn handle(&self, cmd: &mut CreateUserCmd) -> BusResult {
        self.seen.lock().unwrap().push(cmd.clone());
        cmd.result = Some(self.answer);
        Ok(())
    }
}

/// A context handler that counts calls and reports the context it was given.
pub struct ContextProbe {
    pub calls: Arc<AtomicUsize>,
    pub last: Arc<Mutex<Option<Context>>>,
}

impl ContextProbe {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
            last: Arc::new(Mutex::new(None)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl courier::CtxHandler<GetOrgQuery> for ContextProbe {
    fn handle(&self, ctx: &Context, query: &mut GetOrgQuery) -> BusResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some(ctx.clone());
        if let Some(err) = ctx.err() {
            return Err(Box::new(err));
        }
        query.result = Some(format!("org-{}", query.id));
        Ok(())
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "courier_std=debug".into()),
        )
        .with_test_writer()
        .try_init();
}
