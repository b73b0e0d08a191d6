use core::ffi::CStr;
use core::fmt;

/// Payload bytes per chunk; one more byte is reserved for the terminating NUL.
pub const CHUNK_CAPACITY: usize = 63;

/// A `fmt::Write` sink that hands text to a C-string consumer in
/// NUL-terminated chunks of at most [`CHUNK_CAPACITY`] bytes.
///
/// Embedded NUL bytes would cut a chunk short on the C side and are dropped.
/// Call [`flush`](Self::flush) when done; pending bytes are not emitted on drop.
pub struct ChunkWriter<F>
where
    F: FnMut(&CStr),
{
    buf: [u8; CHUNK_CAPACITY + 1],
    len: usize,
    emit: F,
}

impl<F> ChunkWriter<F>
where
    F: FnMut(&CStr),
{
    #[must_use]
    pub const fn new(emit: F) -> Self {
        Self {
            buf: [0; CHUNK_CAPACITY + 1],
            len: 0,
            emit,
        }
    }

    /// Emit any buffered bytes.
    pub fn flush(&mut self) {
        if self.len == 0 {
            return;
        }

        self.buf[self.len] = 0;
        if let Ok(chunk) = CStr::from_bytes_with_nul(&self.buf[..=self.len]) {
            (self.emit)(chunk);
        }
        self.len = 0;
    }

    fn push(&mut self, byte: u8) {
        if byte == 0 {
            return;
        }
        if self.len == CHUNK_CAPACITY {
            self.flush();
        }
        self.buf[self.len] = byte;
        self.len += 1;
    }
}

impl<F> fmt::Write for ChunkWriter<F>
where
    F: FnMut(&CStr),
{
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for b in s.bytes() {
            self.push(b);
        }
        Ok(())
    }
}
