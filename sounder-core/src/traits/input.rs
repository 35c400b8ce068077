//! Raw character input

/// Non-blocking byte source
///
/// Represents a transport with its own buffering and flow control (a UART
/// receive ring, a USB CDC endpoint). Bytes left unread stay in the
/// transport's buffer; that is how the keyer applies back-pressure.
pub trait ByteSource {
    /// Number of bytes that can be read right now without waiting
    fn bytes_available(&mut self) -> usize;

    /// Take one byte, or `None` if nothing is buffered
    fn read_one(&mut self) -> Option<u8>;
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn bytes_available(&mut self) -> usize {
        (**self).bytes_available()
    }

    fn read_one(&mut self) -> Option<u8> {
        (**self).read_one()
    }
}
