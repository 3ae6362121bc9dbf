use std::future::Future;
use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::sync::oneshot;

use crate::error::{Error, Result};

/// Completion of a single transport write.
///
/// Resolves exactly once, after the transport has taken the bytes.
#[derive(Debug)]
pub struct WriteCompletion {
    state: State,
}

#[derive(Debug)]
enum State {
    Ready(Option<io::Result<()>>),
    Pending(oneshot::Receiver<io::Result<()>>),
}

/// Producer half of a pending [`WriteCompletion`].
///
/// Dropping the signal without calling [`complete`](Self::complete) resolves
/// the completion with `BrokenPipe`.
#[derive(Debug)]
pub struct CompletionSignal(oneshot::Sender<io::Result<()>>);

impl WriteCompletion {
    /// A write that finished synchronously.
    #[must_use]
    pub fn ready(result: io::Result<()>) -> Self {
        Self {
            state: State::Ready(Some(result)),
        }
    }

    /// A write that finishes later, when the signal is completed.
    #[must_use]
    pub fn pending() -> (CompletionSignal, Self) {
        let (tx, rx) = oneshot::channel();
        (
            CompletionSignal(tx),
            Self {
                state: State::Pending(rx),
            },
        )
    }

    /// Take the result without waiting, if it is available.
    pub fn try_take(&mut self) -> Option<io::Result<()>> {
        match &mut self.state {
            State::Ready(result) => result.take(),
            State::Pending(rx) => match rx.try_recv() {
                Ok(result) => Some(result),
                Err(oneshot::error::TryRecvError::Empty) => None,
                Err(oneshot::error::TryRecvError::Closed) => Some(Err(dropped())),
            },
        }
    }
}

impl CompletionSignal {
    /// Report the outcome of the write.
    pub fn complete(self, result: io::Result<()>) {
        // The completion side may already be gone; nobody is waiting then.
        let _ = self.0.send(result);
    }
}

impl Future for WriteCompletion {
    type Output = io::Result<()>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match &mut self.get_mut().state {
            State::Ready(result) => Poll::Ready(result.take().unwrap_or(Ok(()))),
            State::Pending(rx) => match Pin::new(rx).poll(cx) {
                Poll::Ready(Ok(result)) => Poll::Ready(result),
                Poll::Ready(Err(_)) => Poll::Ready(Err(dropped())),
                Poll::Pending => Poll::Pending,
            },
        }
    }
}

fn dropped() -> io::Error {
    io::Error::new(
        io::ErrorKind::BrokenPipe,
        "write completion dropped by transport",
    )
}

/// Join over every transport write issued for one logical send.
///
/// Resolves once, after all joined writes have completed. The first failure
/// wins; later writes are still awaited so the result reflects the whole
/// operation.
#[derive(Debug, Default)]
#[must_use = "a send completion reports write failures only when awaited or checked"]
pub struct SendCompletion {
    pending: Vec<WriteCompletion>,
    joined: usize,
    error: Option<Error>,
    done: bool,
}

impl SendCompletion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one more write to the join.
    pub fn push(&mut self, completion: WriteCompletion) {
        self.joined += 1;
        self.pending.push(completion);
    }

    /// Fold another join into this one.
    pub fn join(&mut self, mut other: SendCompletion) {
        self.joined += other.joined;
        self.pending.append(&mut other.pending);
        if self.error.is_none() {
            self.error = other.error.take();
        }
    }

    /// Number of writes joined, including those already finished.
    #[must_use]
    pub fn joined(&self) -> usize {
        self.joined
    }

    /// Number of writes not yet observed as finished.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    /// Check for completion without waiting.
    ///
    /// Returns `None` while any joined write is still outstanding.
    pub fn try_complete(&mut self) -> Option<Result<()>> {
        let error = &mut self.error;
        self.pending.retain_mut(|write| match write.try_take() {
            Some(result) => {
                record(error, result);
                false
            }
            None => true,
        });
        self.finish()
    }

    fn finish(&mut self) -> Option<Result<()>> {
        if !self.pending.is_empty() {
            return None;
        }
        self.done = true;
        Some(match &self.error {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        })
    }
}

fn record(slot: &mut Option<Error>, result: io::Result<()>) {
    if let Err(err) = result {
        if slot.is_none() {
            *slot = Some(Error::from(err));
        }
    }
}

impl Future for SendCompletion {
    type Output = Result<()>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        let error = &mut this.error;
        this.pending
            .retain_mut(|write| match Pin::new(write).poll(cx) {
                Poll::Ready(result) => {
                    record(error, result);
                    false
                }
                Poll::Pending => true,
            });
        match this.finish() {
            Some(result) => Poll::Ready(result),
            None => Poll::Pending,
        }
    }
}

#[cfg(feature = "async-tokio")]
impl futures_core::future::FusedFuture for SendCompletion {
    fn is_terminated(&self) -> bool {
        self.done
    }
}
