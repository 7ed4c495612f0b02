// SPDX-FileCopyrightText: 2026 Medley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Single-settlement abortable operations.
//!
//! [`AbortableOperation`] wraps one unit of asynchronous work (a network
//! fetch, a transmux, a manifest parse) behind a uniform completion and
//! cancellation contract. The work observes a [`CancellationToken`] at its
//! own safe points; abort is suppression of further work, never rollback of
//! partial side effects.

use std::fmt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::FutureExt;
use strum::Display;
use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use medley_core::MedleyError;

/// Lifecycle state of an [`AbortableOperation`].
///
/// Transitions are linear and monotonic: `Pending` moves to exactly one of
/// the terminal states and never changes again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum OperationState {
    /// Work is in flight; the result is unsettled.
    Pending,
    /// Work completed normally.
    Fulfilled,
    /// Work raised an error of its own.
    Failed,
    /// Work stopped cooperatively after `abort()` was requested.
    Aborted,
}

impl OperationState {
    /// Returns true for the three terminal states.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, OperationState::Pending)
    }
}

type FinallyCallback = Box<dyn FnOnce(bool) + Send>;

struct OpCell {
    state: OperationState,
    callbacks: Vec<FinallyCallback>,
}

/// State shared between an operation, its driver task, and abort handles.
pub(crate) struct Shared {
    /// Cooperative cancellation signal handed to the work.
    abort_token: CancellationToken,
    /// Latch cancelled once the work has actually ceased (terminal state).
    done: CancellationToken,
    cell: Mutex<OpCell>,
}

impl Shared {
    fn pending() -> Self {
        Self {
            abort_token: CancellationToken::new(),
            done: CancellationToken::new(),
            cell: Mutex::new(OpCell {
                state: OperationState::Pending,
                callbacks: Vec::new(),
            }),
        }
    }

    fn settled(state: OperationState) -> Self {
        let shared = Self::pending();
        shared.cell().state = state;
        shared.done.cancel();
        shared
    }

    // Callbacks never run under this lock, so it cannot be poisoned by them;
    // recover the guard rather than panic if it ever is.
    fn cell(&self) -> MutexGuard<'_, OpCell> {
        self.cell.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn state(&self) -> OperationState {
        self.cell().state
    }

    /// Requests cancellation and waits for the work to actually cease.
    ///
    /// Resolves immediately if the operation is already terminal; otherwise
    /// resolves at the terminal transition, whichever state that turns out
    /// to be. This future never fails.
    pub(crate) async fn request_abort(&self) {
        self.abort_token.cancel();
        self.done.cancelled().await;
    }

    /// Records the terminal state and fires pending `finally` callbacks.
    fn settle(&self, state: OperationState) {
        debug_assert!(state.is_terminal());
        let callbacks = {
            let mut cell = self.cell();
            // Settlement happens at most once; the driver is the only writer.
            cell.state = state;
            std::mem::take(&mut cell.callbacks)
        };
        let succeeded = state == OperationState::Fulfilled;
        for callback in callbacks {
            run_finally(callback, succeeded);
        }
        debug!(state = %state, "operation settled");
    }
}

/// Runs one `finally` callback, swallowing any panic it raises.
///
/// Panic policy: a panicking callback is logged at `warn` and otherwise
/// ignored, so later callbacks and waiters are unaffected.
fn run_finally(callback: FinallyCallback, succeeded: bool) {
    if std::panic::catch_unwind(AssertUnwindSafe(|| callback(succeeded))).is_err() {
        warn!("finally callback panicked; ignoring");
    }
}

/// One unit of asynchronous work with a single-settlement result and a
/// cooperative cancellation signal.
///
/// The operation settles exactly once, into [`OperationState::Fulfilled`],
/// [`OperationState::Failed`], or [`OperationState::Aborted`]. Aborted work
/// surfaces as a rejection carrying [`MedleyError::Aborted`], never as a
/// silent no-op.
pub struct AbortableOperation<T> {
    shared: Arc<Shared>,
    result: oneshot::Receiver<Result<T, MedleyError>>,
}

impl<T: Send + 'static> AbortableOperation<T> {
    /// Spawns `work` on the runtime and returns the operation wrapping it.
    ///
    /// The closure receives the operation's [`CancellationToken`] and must
    /// observe it at its own safe points; returning
    /// `Err(MedleyError::Aborted)` settles the operation as `Aborted`. Work
    /// that ignores the token simply proceeds to its natural terminal state.
    pub fn spawn<F, Fut>(work: F) -> Self
    where
        F: FnOnce(CancellationToken) -> Fut,
        Fut: Future<Output = Result<T, MedleyError>> + Send + 'static,
    {
        let shared = Arc::new(Shared::pending());
        let (tx, rx) = oneshot::channel();
        let fut = work(shared.abort_token.clone());

        let driver = Arc::clone(&shared);
        tokio::spawn(async move {
            let outcome = match AssertUnwindSafe(fut).catch_unwind().await {
                Ok(outcome) => outcome,
                Err(_) => Err(MedleyError::Internal("operation work panicked".into())),
            };
            let state = match &outcome {
                Ok(_) => OperationState::Fulfilled,
                Err(e) if e.is_aborted() => OperationState::Aborted,
                Err(_) => OperationState::Failed,
            };
            driver.settle(state);
            // The receiver may have been dropped; that is not an error.
            let _ = tx.send(outcome);
            driver.done.cancel();
        });

        Self { shared, result: rx }
    }

    /// An operation that is already `Fulfilled` with `value`.
    pub fn fulfilled(value: T) -> Self {
        Self::settled(OperationState::Fulfilled, Ok(value))
    }

    /// An operation that is already `Failed` with `error`.
    pub fn failed(error: MedleyError) -> Self {
        Self::settled(OperationState::Failed, Err(error))
    }

    /// An operation that is already `Aborted`.
    pub fn aborted() -> Self {
        Self::settled(OperationState::Aborted, Err(MedleyError::Aborted))
    }

    fn settled(state: OperationState, outcome: Result<T, MedleyError>) -> Self {
        let shared = Arc::new(Shared::settled(state));
        let (tx, rx) = oneshot::channel();
        let _ = tx.send(outcome);
        Self { shared, result: rx }
    }

    /// Current lifecycle state, a consistent snapshot.
    pub fn state(&self) -> OperationState {
        self.shared.state()
    }

    /// Requests cooperative cancellation and waits for the work to cease.
    ///
    /// Idempotent: calling this on an already-terminal operation (or calling
    /// it twice) resolves immediately and never fails. If the work ignores
    /// the signal, this resolves once the operation reaches its natural
    /// terminal state.
    pub async fn abort(&self) {
        self.shared.request_abort().await;
    }

    /// A clonable handle carrying only the abort capability.
    ///
    /// Lets an external controller (e.g. a timeout timer) abort the
    /// operation while the owner awaits [`AbortableOperation::wait`].
    pub fn abort_handle(&self) -> crate::AbortHandle {
        crate::AbortHandle::new(Arc::clone(&self.shared))
    }

    /// Registers a cleanup callback run exactly once at the terminal
    /// transition, with `succeeded = true` only for `Fulfilled`; both
    /// `Failed` and `Aborted` pass `false`.
    ///
    /// Chains fluently. On an already-terminal operation the callback fires
    /// promptly rather than being skipped. A panicking callback is caught,
    /// logged, and otherwise ignored.
    pub fn finally<C>(self, callback: C) -> Self
    where
        C: FnOnce(bool) + Send + 'static,
    {
        {
            let mut cell = self.shared.cell();
            if cell.state.is_terminal() {
                let succeeded = cell.state == OperationState::Fulfilled;
                drop(cell);
                run_finally(Box::new(callback), succeeded);
            } else {
                cell.callbacks.push(Box::new(callback));
            }
        }
        self
    }

    /// Waits for settlement and yields the operation's outcome.
    ///
    /// An aborted operation yields `Err(MedleyError::Aborted)`.
    pub async fn wait(self) -> Result<T, MedleyError> {
        match self.result.await {
            Ok(outcome) => outcome,
            // Only reachable if the runtime tears the driver task down.
            Err(_) => Err(MedleyError::Internal(
                "operation driver dropped without settling".into(),
            )),
        }
    }
}

impl<T> fmt::Debug for AbortableOperation<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AbortableOperation")
            .field("state", &self.shared.state())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use super::*;

    /// Work that honors the token: sleeps until cancelled or until `delay`.
    fn cancellable_sleep(
        delay: Duration,
    ) -> impl FnOnce(CancellationToken) -> futures::future::BoxFuture<'static, Result<u32, MedleyError>>
    {
        move |token| {
            Box::pin(async move {
                tokio::select! {
                    _ = token.cancelled() => Err(MedleyError::Aborted),
                    _ = tokio::time::sleep(delay) => Ok(42),
                }
            })
        }
    }

    #[tokio::test]
    async fn successful_work_settles_fulfilled() {
        let op = AbortableOperation::spawn(|_token| async { Ok(7u32) });
        assert_eq!(op.wait().await.unwrap(), 7);
    }

    #[tokio::test]
    async fn failing_work_settles_failed_with_its_own_error() {
        let op = AbortableOperation::<u32>::spawn(|_token| async {
            Err(MedleyError::Plugin {
                message: "bad segment".into(),
                source: None,
            })
        });
        let err = op.wait().await.unwrap_err();
        assert!(!err.is_aborted());
        assert!(matches!(err, MedleyError::Plugin { .. }));
    }

    #[tokio::test]
    async fn abort_settles_aborted_and_rejects_the_waiter() {
        let op = AbortableOperation::spawn(cancellable_sleep(Duration::from_secs(30)));
        op.abort().await;
        assert_eq!(op.state(), OperationState::Aborted);
        assert!(op.wait().await.unwrap_err().is_aborted());
    }

    #[tokio::test]
    async fn abort_is_idempotent_and_resolves_after_terminal() {
        let op = AbortableOperation::spawn(cancellable_sleep(Duration::from_secs(30)));
        op.abort().await;
        // Second call, and a call through a cloned handle, both resolve.
        op.abort().await;
        op.abort_handle().clone().abort().await;
        assert_eq!(op.state(), OperationState::Aborted);
    }

    #[tokio::test]
    async fn abort_on_finished_operation_is_a_prompt_no_op() {
        let op = AbortableOperation::spawn(|_token| async { Ok(1u32) });
        let value = op.wait().await.unwrap();
        assert_eq!(value, 1);

        let op = AbortableOperation::fulfilled(2u32);
        op.abort().await;
        assert_eq!(op.state(), OperationState::Fulfilled);
        assert_eq!(op.wait().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn work_that_ignores_abort_still_reaches_its_natural_state() {
        let op = AbortableOperation::spawn(|_token| async {
            // Deliberately never looks at the token.
            tokio::time::sleep(Duration::from_millis(20)).await;
            Ok(9u32)
        });
        // Resolves only once the work actually ceased, which here means it
        // ran to natural completion.
        op.abort().await;
        assert_eq!(op.state(), OperationState::Fulfilled);
        assert_eq!(op.wait().await.unwrap(), 9);
    }

    #[tokio::test]
    async fn finally_fires_exactly_once_with_success_flag() {
        let calls = Arc::new(AtomicUsize::new(0));
        let successes = Arc::new(AtomicUsize::new(0));

        let calls_cb = Arc::clone(&calls);
        let successes_cb = Arc::clone(&successes);
        let op = AbortableOperation::spawn(|_token| async { Ok(5u32) }).finally(move |ok| {
            calls_cb.fetch_add(1, Ordering::SeqCst);
            if ok {
                successes_cb.fetch_add(1, Ordering::SeqCst);
            }
        });

        op.wait().await.unwrap();
        tokio::task::yield_now().await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(successes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn finally_receives_false_for_aborted_and_failed() {
        let flags = Arc::new(Mutex::new(Vec::new()));

        let f = Arc::clone(&flags);
        let op = AbortableOperation::spawn(cancellable_sleep(Duration::from_secs(30)))
            .finally(move |ok| f.lock().unwrap().push(ok));
        op.abort().await;
        assert!(op.wait().await.unwrap_err().is_aborted());

        let f = Arc::clone(&flags);
        AbortableOperation::<u32>::spawn(|_token| async {
            Err(MedleyError::Internal("broken".into()))
        })
        .finally(move |ok| f.lock().unwrap().push(ok))
        .wait()
        .await
        .unwrap_err();

        assert_eq!(*flags.lock().unwrap(), vec![false, false]);
    }

    #[tokio::test]
    async fn finally_on_already_terminal_operation_fires_promptly() {
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_cb = Arc::clone(&calls);

        let op = AbortableOperation::fulfilled(1u32).finally(move |ok| {
            assert!(ok);
            calls_cb.fetch_add(1, Ordering::SeqCst);
        });
        // Fires during the finally() call itself, before any await.
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(op.wait().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn panicking_finally_callback_is_swallowed() {
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_cb = Arc::clone(&calls);

        let op = AbortableOperation::<u32>::aborted()
            .finally(|_ok| panic!("cleanup went sideways"))
            .finally(move |ok| {
                assert!(!ok);
                calls_cb.fetch_add(1, Ordering::SeqCst);
            });
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(op.wait().await.unwrap_err().is_aborted());
    }

    #[tokio::test]
    async fn pre_settled_constructors_report_their_state() {
        assert_eq!(
            AbortableOperation::fulfilled(0u32).state(),
            OperationState::Fulfilled
        );
        assert_eq!(
            AbortableOperation::<u32>::failed(MedleyError::Internal("x".into())).state(),
            OperationState::Failed
        );
        assert_eq!(
            AbortableOperation::<u32>::aborted().state(),
            OperationState::Aborted
        );
        assert!(!OperationState::Pending.is_terminal());
    }

    #[tokio::test]
    async fn abort_racing_completion_settles_exactly_one_state() {
        // Whichever side wins, the terminal state and the waiter's outcome
        // must agree, and the abort future must still resolve.
        for i in 0..50u64 {
            let op = AbortableOperation::spawn(cancellable_sleep(Duration::from_micros(i * 20)));
            let handle = op.abort_handle();
            let aborter = tokio::spawn(async move {
                handle.abort().await;
                handle.state()
            });

            let state = match op.wait().await {
                Ok(42) => OperationState::Fulfilled,
                Ok(other) => panic!("unexpected value {other}"),
                Err(e) if e.is_aborted() => OperationState::Aborted,
                Err(e) => panic!("unexpected error {e}"),
            };
            assert_eq!(aborter.await.unwrap(), state);
        }
    }

    #[tokio::test]
    async fn abort_handle_aborts_while_owner_waits() {
        let op = AbortableOperation::spawn(cancellable_sleep(Duration::from_secs(30)));
        let handle = op.abort_handle();

        let aborter = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            handle.abort().await;
            handle.state()
        });

        assert!(op.wait().await.unwrap_err().is_aborted());
        assert_eq!(aborter.await.unwrap(), OperationState::Aborted);
    }
}
