use std::io;
use wasm_bindgen::JsValue;

/// Line sink for the fmt layer. Buffers one formatted event and hands it to
/// the devtools console when flushed or dropped.
#[derive(Debug, Default)]
pub(crate) struct ConsoleWriter {
    buffer: Vec<u8>,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.buffer.is_empty() {
            return Ok(());
        }
        let line = String::from_utf8_lossy(&self.buffer).into_owned();
        self.buffer.clear();
        web_sys::console::log_1(&JsValue::from_str(line.trim_end()));
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let _ = io::Write::flush(self);
    }
}
