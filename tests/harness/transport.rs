use std::io;

use rsws_sender::transport::{CompletionSignal, Transport, WriteCompletion};

/// Records every submission; completions resolve immediately or on demand.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    pub writes: Vec<Vec<u8>>,
    deferred: bool,
    signals: Vec<CompletionSignal>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Completions stay pending until [`complete_next`](Self::complete_next).
    pub fn deferred() -> Self {
        Self {
            deferred: true,
            ..Self::default()
        }
    }

    /// Resolve the oldest pending write.
    pub fn complete_next(&mut self, result: io::Result<()>) {
        let signal = self.signals.remove(0);
        signal.complete(result);
    }

    pub fn pending(&self) -> usize {
        self.signals.len()
    }

    /// All submitted bytes in order.
    pub fn wire(&self) -> Vec<u8> {
        self.writes.concat()
    }
}

impl Transport for RecordingTransport {
    fn write(&mut self, bytes: &[u8]) -> io::Result<WriteCompletion> {
        self.writes.push(bytes.to_vec());
        if self.deferred {
            let (signal, completion) = WriteCompletion::pending();
            self.signals.push(signal);
            Ok(completion)
        } else {
            Ok(WriteCompletion::ready(Ok(())))
        }
    }
}

/// Accepts `accept` submissions, then refuses every further one.
#[derive(Debug)]
pub struct FailingTransport {
    pub writes: Vec<Vec<u8>>,
    accept: usize,
}

impl FailingTransport {
    pub fn after(accept: usize) -> Self {
        Self {
            writes: Vec::new(),
            accept,
        }
    }
}

impl Transport for FailingTransport {
    fn write(&mut self, bytes: &[u8]) -> io::Result<WriteCompletion> {
        if self.writes.len() >= self.accept {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "transport closed"));
        }
        self.writes.push(bytes.to_vec());
        Ok(WriteCompletion::ready(Ok(())))
    }
}
