//! A built bus shared across threads and tasks.

mod common;

use common::{CreateUserCmd, UserCreated};
use courier::testing::RecordingListener;
use courier::{Bus, BusResult};
use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

fn user_bus(created: RecordingListener<UserCreated>) -> Bus {
    let next_id = Arc::new(AtomicU64::new(1));
    Bus::builder()
        .handler(move |cmd: &mut CreateUserCmd| -> BusResult {
            cmd.result = Some(next_id.fetch_add(1, Ordering::SeqCst));
            Ok(())
        })
        .listener(created)
        .build()
}

#[test]
fn shared_across_threads() {
    let created = RecordingListener::<UserCreated>::new();
    let bus = Arc::new(user_bus(created.clone()));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let bus = bus.clone();
            std::thread::spawn(move || {
                let mut cmd = CreateUserCmd::named(&format!("user-{i}"));
                bus.dispatch(&mut cmd).unwrap();
                let id = cmd.result.unwrap();
                bus.publish(&UserCreated { id }).unwrap();
                id
            })
        })
        .collect();

    let mut ids: Vec<u64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    ids.sort_unstable();

    assert_eq!(ids, (1..=8).collect::<Vec<_>>());
    assert_eq!(created.count(), 8);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn shared_across_tasks() {
    let created = RecordingListener::<UserCreated>::new();
    let bus = Arc::new(user_bus(created.clone()));

    let mut tasks = Vec::new();
    for i in 0..16 {
        let bus = bus.clone();
        tasks.push(tokio::spawn(async move {
            let mut cmd = CreateUserCmd::named(&format!("user-{i}"));
            bus.dispatch(&mut cmd).unwrap();
            bus.publish(&UserCreated {
                id: cmd.result.unwrap(),
            })
            .unwrap();
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }

    let mut ids: Vec<u64> = created.events().into_iter().map(|e| e.id).collect();
    ids.sort_unstable();
    assert_eq!(ids, (1..=16).collect::<Vec<_>>());
}
