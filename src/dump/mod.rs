use anyhow::Result;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use tracing::{debug, info};

use crate::config::FileTarget;

/// Splits a byte stream into lines on `\n`, `\r\n` or a lone `\r`.
///
/// Terminators are stripped. A trailing line without a terminator is still
/// yielded. Any line longer than `max_line_len` bytes fails with
/// `InvalidData` before it is fully buffered.
pub struct LineScanner<R> {
    reader: R,
    max_line_len: usize,
    skip_lf: bool,
}

impl<R: BufRead> LineScanner<R> {
    pub fn new(reader: R, max_line_len: usize) -> Self {
        Self {
            reader,
            max_line_len,
            skip_lf: false,
        }
    }

    pub fn next_line(&mut self, line: &mut Vec<u8>) -> io::Result<bool> {
        let max = self.max_line_len;
        line.clear();

        loop {
            let available = match self.reader.fill_buf() {
                Ok(buf) => buf,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };

            if available.is_empty() {
                return Ok(!line.is_empty());
            }

            // second half of a \r\n split across reads
            if self.skip_lf {
                self.skip_lf = false;
                if available[0] == b'\n' {
                    self.reader.consume(1);
                    continue;
                }
            }

            match available.iter().position(|&b| b == b'\n' || b == b'\r') {
                Some(pos) => {
                    if line.len() + pos > max {
                        return Err(line_too_long(max));
                    }
                    let cr = available[pos] == b'\r';
                    line.extend_from_slice(&available[..pos]);
                    self.reader.consume(pos + 1);
                    self.skip_lf = cr;
                    return Ok(true);
                }
                None => {
                    let n = available.len();
                    if line.len() + n > max {
                        return Err(line_too_long(max));
                    }
                    line.extend_from_slice(available);
                    self.reader.consume(n);
                }
            }
        }
    }
}

fn line_too_long(max: usize) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidData,
        format!("line exceeds maximum length of {} bytes", max),
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DumpOutcome {
    Complete { lines: usize },
    Failed { lines: usize },
}

impl DumpOutcome {
    pub fn lines(&self) -> usize {
        match self {
            DumpOutcome::Complete { lines } | DumpOutcome::Failed { lines } => *lines,
        }
    }
}

// Open and read failures go into the report; Err is only for writes to `out`.
pub fn dump_file<W: Write>(
    out: &mut W,
    target: &FileTarget,
    max_line_len: usize,
) -> Result<DumpOutcome> {
    writeln!(out, "\n{} ({}):", target.label, target.path.display())?;

    let file = match File::open(&target.path) {
        Ok(file) => file,
        Err(e) => {
            info!("Could not open {}: {}", target.path.display(), e);
            write_failure(out, target, &e)?;
            return Ok(DumpOutcome::Failed { lines: 0 });
        }
    };

    let mut scanner = LineScanner::new(BufReader::new(file), max_line_len);
    let mut line = Vec::new();
    let mut lines = 0;

    loop {
        match scanner.next_line(&mut line) {
            Ok(true) => {
                out.write_all(&line)?;
                out.write_all(b"\n")?;
                lines += 1;
            }
            Ok(false) => break,
            Err(e) => {
                info!("Stopped reading {} after {} lines: {}", target.path.display(), lines, e);
                write_failure(out, target, &e)?;
                return Ok(DumpOutcome::Failed { lines });
            }
        }
    }

    debug!("Dumped {} lines from {}", lines, target.path.display());
    Ok(DumpOutcome::Complete { lines })
}

fn write_failure<W: Write>(out: &mut W, target: &FileTarget, error: &io::Error) -> Result<()> {
    writeln!(out, "Failed to read {}: {}", target.path.display(), error)?;
    Ok(())
}
