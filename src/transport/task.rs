use std::io;

use bytes::Bytes;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::{CompletionSignal, Transport, WriteCompletion};

struct Job {
    bytes: Bytes,
    done: CompletionSignal,
}

/// Transport that hands bytes to a spawned writer task.
///
/// Each `write` copies the bytes into a [`Bytes`] and queues them; the task
/// writes queued chunks in order and completes each one once
/// `write_all` returns. Submission fails only when the task has stopped.
#[derive(Debug, Clone)]
pub struct TaskTransport {
    tx: mpsc::UnboundedSender<Job>,
}

/// Handle to the writer task; resolves to the stream once every
/// [`TaskTransport`] clone has been dropped and the queue drained.
pub type WriterTask<W> = JoinHandle<io::Result<W>>;

/// Spawn a writer task owning `io`. Must be called within a Tokio runtime.
pub fn spawn_writer<W>(io: W) -> (TaskTransport, WriterTask<W>)
where
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel();
    let handle = tokio::spawn(run(io, rx));
    (TaskTransport { tx }, handle)
}

impl Transport for TaskTransport {
    fn write(&mut self, bytes: &[u8]) -> io::Result<WriteCompletion> {
        let (done, completion) = WriteCompletion::pending();
        let job = Job {
            bytes: Bytes::copy_from_slice(bytes),
            done,
        };
        self.tx.send(job).map_err(|_| {
            io::Error::new(io::ErrorKind::BrokenPipe, "writer task has stopped")
        })?;
        Ok(completion)
    }
}

impl std::fmt::Debug for Job {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Job").field("len", &self.bytes.len()).finish()
    }
}

async fn run<W>(mut io: W, mut rx: mpsc::UnboundedReceiver<Job>) -> io::Result<W>
where
    W: AsyncWrite + Unpin,
{
    while let Some(job) = rx.recv().await {
        if let Err(err) = io.write_all(&job.bytes).await {
            log::debug!("writer task stopping after write error: {err}");
            fail_queued(&mut rx, &err);
            job.done.complete(Err(err));
            return Err(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "writer task stopped after write error",
            ));
        }
        job.done.complete(Ok(()));

        // Flush once the queue is drained so bursts share one flush.
        if rx.is_empty() {
            io.flush().await?;
        }
    }

    io.flush().await?;
    log::debug!("writer task finished: all transports dropped");
    Ok(io)
}

fn fail_queued(rx: &mut mpsc::UnboundedReceiver<Job>, err: &io::Error) {
    rx.close();
    while let Ok(job) = rx.try_recv() {
        job.done.complete(Err(io::Error::new(err.kind(), err.to_string())));
    }
}
