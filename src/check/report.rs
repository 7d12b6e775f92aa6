use std::io::{self, Write};

use super::types::{HostResult, Outcome};

/// Streams per-host verdicts: successes print as they arrive, failures are
/// held back and flushed as one block after the last host, so failures are
/// always grouped at the end of the output.
pub struct Reporter<W: Write> {
    out: W,
    failures: Vec<String>,
}

impl<W: Write> Reporter<W> {
    /// Prints the `Checking <N> hosts` header.
    pub fn new(mut out: W, host_count: usize) -> io::Result<Self> {
        writeln!(out, "Checking {} hosts", host_count)?;
        Ok(Self {
            out,
            failures: Vec::new(),
        })
    }

    pub fn record(&mut self, result: &HostResult) -> io::Result<()> {
        match &result.outcome {
            Outcome::Pass => writeln!(self.out, "✅\t{}", result.host),
            Outcome::Fail(reason) => {
                self.failures.push(format!("❗️\t{}\t{}", result.host, reason));
                Ok(())
            }
        }
    }

    /// Flushes the buffered failure block. Call after the last host.
    pub fn finish(mut self) -> io::Result<()> {
        for line in &self.failures {
            writeln!(self.out, "{}", line)?;
        }
        Ok(())
    }
}
