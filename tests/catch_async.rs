//! Asynchronous capturing adapters.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use poltergeist::{capture_async, catch_async, Failure, Outcome, Raised};
use thiserror::Error;

#[derive(Debug, Error, Failure, PartialEq)]
#[error("{0}")]
struct ValueFailure(String);

#[derive(Debug, Error, Failure)]
#[error("{0}")]
struct OtherFailure(String);

async fn raises() -> Result<String, ValueFailure> {
    tokio::task::yield_now().await;
    Err(ValueFailure("abc".into()))
}

async fn returns() -> Result<String, ValueFailure> {
    tokio::task::yield_now().await;
    Ok("abc".into())
}

// ============================================================
// Function form
// ============================================================

#[tokio::test]
async fn captures_listed_kind() {
    let outcome = catch_async::<(ValueFailure,)>().call(raises()).await.unwrap();
    assert_eq!(outcome, Outcome::Err(ValueFailure("abc".into())));
}

#[tokio::test]
async fn propagates_unlisted_kind() {
    let raised = catch_async::<(OtherFailure,)>().call(raises()).await.unwrap_err();
    assert!(raised.is::<ValueFailure>());
}

#[tokio::test]
async fn wraps_success() {
    let outcome = catch_async::<(ValueFailure,)>().call(returns()).await.unwrap();
    assert_eq!(outcome, Outcome::Ok("abc".to_string()));
}

#[tokio::test]
async fn wrapped_async_function() {
    let halve = catch_async::<(ValueFailure,)>().wrap(|n: u32| async move {
        tokio::task::yield_now().await;
        if n % 2 == 1 {
            return Err(ValueFailure(format!("{} is odd", n)));
        }
        Ok(n / 2)
    });

    assert_eq!(halve(8).await.unwrap(), Outcome::Ok(4));
    assert_eq!(
        halve(3).await.unwrap(),
        Outcome::Err(ValueFailure("3 is odd".into()))
    );
}

// ============================================================
// Attribute form
// ============================================================

/// Reads a counter after a few suspensions.
#[catch_async(ValueFailure)]
async fn tally(steps: usize, fail_at: Option<usize>) -> Result<usize, ValueFailure> {
    let mut done = 0;
    for step in 0..steps {
        if Some(step) == fail_at {
            return Err(ValueFailure(format!("step {}", step)));
        }
        tokio::task::yield_now().await;
        done += 1;
    }
    Ok(done)
}

#[catch_async(OtherFailure, ValueFailure)]
async fn either(pick_other: bool) -> Result<(), Raised> {
    tokio::task::yield_now().await;
    if pick_other {
        Err(OtherFailure("other".into()).into())
    } else {
        raises().await?;
        Ok(())
    }
}

#[tokio::test]
async fn attribute_resumes_across_suspensions() {
    assert_eq!(tally(3, None).await.unwrap(), Outcome::Ok(3));
    assert_eq!(
        tally(3, Some(2)).await.unwrap(),
        Outcome::Err(ValueFailure("step 2".into()))
    );
}

#[tokio::test]
async fn attribute_with_several_kinds() {
    let other = either(true).await.unwrap().err().unwrap();
    assert!(other.is::<OtherFailure>());

    let value = either(false).await.unwrap().err().unwrap();
    assert_eq!(value.downcast_ref::<ValueFailure>(), Some(&ValueFailure("abc".into())));
}

#[tokio::test]
async fn capture_async_block() {
    let outcome = capture_async!(ValueFailure => { returns().await? }).await.unwrap();
    assert_eq!(outcome.unwrap(), "abc");

    let raised = capture_async!(OtherFailure => { raises().await? }).await.unwrap_err();
    assert!(raised.is::<ValueFailure>());
}

#[tokio::test]
async fn runs_on_spawned_task() {
    let handle = tokio::spawn(catch_async::<(ValueFailure,)>().call(raises()));
    let outcome = handle.await.unwrap().unwrap();
    assert!(outcome.is_err());
}

// ============================================================
// Cancellation
// ============================================================

struct DropFlag(Arc<AtomicBool>);

impl Drop for DropFlag {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

#[tokio::test]
async fn dropping_capture_drops_inner_future() {
    let dropped = Arc::new(AtomicBool::new(false));
    let polled = Arc::new(AtomicUsize::new(0));

    let guard = DropFlag(dropped.clone());
    let counter = polled.clone();
    let slow = catch_async::<(ValueFailure,)>().call(async move {
        let _guard = guard;
        counter.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok::<_, ValueFailure>(())
    });

    let elapsed = tokio::time::timeout(Duration::from_millis(10), slow).await;
    assert!(elapsed.is_err());
    assert_eq!(polled.load(Ordering::SeqCst), 1);
    assert!(dropped.load(Ordering::SeqCst));
}
