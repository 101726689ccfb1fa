//! The process-wide default bus.

#![cfg(feature = "global")]

mod common;

use common::{CreateUserCmd, GetOrgQuery, UserCreated};
use courier::testing::OrderLog;
use courier::{BusResult, Context, global};
use std::sync::{Mutex, MutexGuard};

// Tests in this file share one global bus.
static SERIAL: Mutex<()> = Mutex::new(());

fn fresh_bus() -> MutexGuard<'static, ()> {
    let guard = SERIAL.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    global::reset();
    guard
}

#[test]
fn dispatch_and_publish_through_global_bus() {
    let _guard = fresh_bus();
    let log = OrderLog::new();

    global::add_handler(|cmd: &mut CreateUserCmd| -> BusResult {
        cmd.result = Some(1);
        global::publish(&UserCreated { id: 1 })?;
        Ok(())
    });
    global::add_event_listener(log.listener::<UserCreated>("L1"));
    global::add_wildcard_listener(log.wildcard("W1"));

    let mut cmd = CreateUserCmd::named("a");
    global::dispatch(&mut cmd).unwrap();

    assert_eq!(cmd.result, Some(1));
    assert_eq!(log.entries(), vec!["L1", "W1"]);
}

#[test]
fn dispatch_ctx_through_global_bus() {
    let _guard = fresh_bus();

    global::add_ctx_handler(|ctx: &Context, query: &mut GetOrgQuery| -> BusResult {
        if let Some(err) = ctx.err() {
            return Err(Box::new(err));
        }
        query.result = Some("acme".to_string());
        Ok(())
    });

    let mut query = GetOrgQuery::default();
    global::dispatch_ctx(&Context::background(), &mut query).unwrap();
    assert_eq!(query.result.as_deref(), Some("acme"));

    let ctx = Context::background().with_cancel();
    ctx.cancel();
    assert!(global::dispatch_ctx(&ctx, &mut GetOrgQuery::default()).is_err());
}

#[test]
fn reset_clears_everything() {
    let _guard = fresh_bus();
    let log = OrderLog::new();

    global::add_handler(|_: &mut CreateUserCmd| -> BusResult { Ok(()) });
    global::add_event_listener(log.listener::<UserCreated>("L1"));
    assert!(global::with_bus(|bus| bus.has_handler::<CreateUserCmd>()));

    global::reset();

    let err = global::dispatch(&mut CreateUserCmd::named("a")).unwrap_err();
    assert!(err.is_handler_not_found());
    global::publish(&UserCreated { id: 1 }).unwrap();
    assert!(log.entries().is_empty());
    assert!(global::with_bus(|bus| bus.is_empty()));
}
