//! Byte transport seam used by the sender.
//!
//! A [`Transport`] accepts bytes synchronously and reports completion later
//! through a [`WriteCompletion`]. The sender joins the completions of every
//! write belonging to one logical send into a [`SendCompletion`].

mod completion;

#[cfg(feature = "async-tokio")]
mod task;

use std::io;

pub use completion::{CompletionSignal, SendCompletion, WriteCompletion};

#[cfg(feature = "async-tokio")]
pub use task::{TaskTransport, WriterTask, spawn_writer};

/// Destination for encoded frame bytes.
///
/// `write` must take the bytes before returning (copy, queue, or write them
/// out): the sender reuses the buffer behind `bytes` for the next frame.
/// Submissions are ordered; bytes from consecutive calls must reach the wire
/// in call order.
pub trait Transport {
    /// Submit bytes for transmission.
    ///
    /// # Errors
    ///
    /// An error means the bytes were not accepted. Failures that happen after
    /// acceptance are reported through the returned completion instead.
    fn write(&mut self, bytes: &[u8]) -> io::Result<WriteCompletion>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn write(&mut self, bytes: &[u8]) -> io::Result<WriteCompletion> {
        (**self).write(bytes)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn write(&mut self, bytes: &[u8]) -> io::Result<WriteCompletion> {
        (**self).write(bytes)
    }
}

/// Transport over any blocking [`std::io::Write`].
///
/// Writes complete synchronously, so every completion is already resolved.
#[derive(Debug, Default)]
pub struct WriteTransport<W> {
    io: W,
}

impl<W: io::Write> WriteTransport<W> {
    pub fn new(io: W) -> Self {
        Self { io }
    }

    pub fn get_ref(&self) -> &W {
        &self.io
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.io
    }

    pub fn into_inner(self) -> W {
        self.io
    }
}

impl<W: io::Write> Transport for WriteTransport<W> {
    fn write(&mut self, bytes: &[u8]) -> io::Result<WriteCompletion> {
        self.io.write_all(bytes)?;
        Ok(WriteCompletion::ready(Ok(())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_transport_appends_in_order() {
        let mut transport = WriteTransport::new(Vec::new());
        let mut a = transport.write(&[0x81, 0x02]).unwrap();
        let mut b = transport.write(b"hi").unwrap();

        assert!(matches!(a.try_take(), Some(Ok(()))));
        assert!(matches!(b.try_take(), Some(Ok(()))));
        assert_eq!(transport.into_inner(), b"\x81\x02hi");
    }

    #[test]
    fn test_write_transport_surfaces_io_error() {
        struct Full;
        impl io::Write for Full {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::WriteZero, "full"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let mut transport = WriteTransport::new(Full);
        assert!(transport.write(b"x").is_err());
    }

    #[test]
    fn test_transport_through_mut_ref_and_box() {
        fn submit<T: Transport>(mut transport: T, bytes: &[u8]) {
            transport.write(bytes).unwrap();
        }

        let mut inner = WriteTransport::new(Vec::new());
        submit(&mut inner, b"a");
        submit(Box::new(&mut inner) as Box<dyn Transport + '_>, b"b");
        assert_eq!(inner.get_ref(), b"ab");
    }
}
