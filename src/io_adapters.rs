use std::io::{Result as IoResult, Write};

/// Memory-backed writer that holds a command's output until it is done.
///
/// Everything written is kept in memory and handed to the wrapped sink in one
/// piece when the capture is finished or dropped, so a command's output never
/// interleaves with the next prompt, whether the command succeeded or not.
pub struct OutputCapture<'a> {
    sink: &'a mut dyn Write,
    buf: Vec<u8>,
}

impl<'a> OutputCapture<'a> {
    pub fn new(sink: &'a mut dyn Write) -> Self {
        Self {
            sink,
            buf: Vec::new(),
        }
    }

    /// Release the captured output, reporting write errors.
    pub fn finish(mut self) -> IoResult<()> {
        self.release()
    }

    fn release(&mut self) -> IoResult<()> {
        if self.buf.is_empty() {
            return Ok(());
        }
        let buf = std::mem::take(&mut self.buf);
        self.sink.write_all(&buf)?;
        self.sink.flush()
    }
}

impl Write for OutputCapture<'_> {
    fn write(&mut self, data: &[u8]) -> IoResult<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    // Output is only released as a whole.
    fn flush(&mut self) -> IoResult<()> {
        Ok(())
    }
}

impl Drop for OutputCapture<'_> {
    fn drop(&mut self) {
        if let Err(e) = self.release() {
            tracing::warn!(error = %e, "failed to write command output");
        }
    }
}
