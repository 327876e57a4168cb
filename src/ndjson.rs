use crate::util::open_with_backoff;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};
use zstd::stream::read::Decoder;

/// A `Read` wrapper that counts on-disk bytes read.
struct CountingReader<R: Read> {
    inner: R,
    counter: Arc<AtomicU64>,
}
impl<R: Read> Read for CountingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.counter.fetch_add(n as u64, Ordering::Relaxed);
        Ok(n)
    }
}

/// Minimal NDJSON reader with buffering and line-ending trimming.
/// Files ending in `.zst` are decoded transparently.
pub struct NdjsonReader {
    rdr: Box<dyn BufRead>,
    counter: Arc<AtomicU64>,
    reported: u64,
}

impl NdjsonReader {
    pub fn open(path: &Path, buf_bytes: usize) -> io::Result<Self> {
        let f = open_with_backoff(path, 16, 50)?;
        let counter = Arc::new(AtomicU64::new(0));
        let cnt = CountingReader { inner: f, counter: counter.clone() };
        let cap = buf_bytes.max(8 * 1024);

        let is_zst = path.extension().map_or(false, |e| e.eq_ignore_ascii_case("zst"));
        let rdr: Box<dyn BufRead> = if is_zst {
            let mut decoder = Decoder::new(cnt)?;
            decoder.window_log_max(31)?;
            Box::new(BufReader::with_capacity(cap, decoder))
        } else {
            Box::new(BufReader::with_capacity(cap, cnt))
        };
        Ok(Self { rdr, counter, reported: 0 })
    }

    /// Read the next line into `buf` as raw bytes. Returns the number of bytes
    /// read (0 on EOF). Strips trailing `\r?\n`. No UTF-8 check happens here,
    /// so a bad line surfaces as a JSON error for that line.
    pub fn read_line(&mut self, buf: &mut Vec<u8>) -> io::Result<usize> {
        buf.clear();
        let n = self.rdr.read_until(b'\n', buf)?;
        if n == 0 { return Ok(0); }
        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') { buf.pop(); }
        }
        Ok(n)
    }

    /// On-disk bytes consumed since the previous call.
    pub fn take_progress(&mut self) -> u64 {
        let cur = self.counter.load(Ordering::Relaxed);
        let delta = cur.saturating_sub(self.reported);
        self.reported = cur;
        delta
    }
}
