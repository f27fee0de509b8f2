use super::*;
use std::pin::Pin;

type Interrupt = Pin<Box<dyn Future<Output = std::io::Result<()>> + Send>>;

fn fired() -> Interrupt {
    Box::pin(std::future::ready(Ok(())))
}

fn never() -> Interrupt {
    Box::pin(std::future::pending())
}

#[tokio::test]
async fn first_interrupt_cancels_and_waits_for_the_task() {
    let cancel = CancelToken::new();
    let seen = cancel.clone();
    let task = tokio::task::spawn_blocking(move || {
        while !seen.is_cancelled() {
            std::thread::sleep(std::time::Duration::from_millis(1));
        }
        "stopped"
    });

    let mut calls = 0;
    let outcome = supervise(task, &cancel, || {
        calls += 1;
        if calls == 1 { fired() } else { never() }
    })
    .await
    .unwrap();

    assert!(cancel.is_cancelled());
    assert!(matches!(outcome, Supervised::Done("stopped")));
}

#[tokio::test]
async fn second_interrupt_abandons_a_stuck_task() {
    let cancel = CancelToken::new();
    let (release, wait) = std::sync::mpsc::channel::<()>();
    let task = tokio::task::spawn_blocking(move || {
        let _ = wait.recv();
    });

    let outcome = supervise(task, &cancel, fired).await.unwrap();

    assert!(cancel.is_cancelled());
    assert!(matches!(outcome, Supervised::Abandoned));
    release.send(()).unwrap();
}

#[tokio::test]
async fn finished_task_needs_no_interrupt() {
    let cancel = CancelToken::new();
    let task = tokio::task::spawn_blocking(|| 42);

    let outcome = supervise(task, &cancel, never).await.unwrap();

    assert!(!cancel.is_cancelled());
    assert!(matches!(outcome, Supervised::Done(42)));
}
