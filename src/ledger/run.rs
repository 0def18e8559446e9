//! Whole-input driver: reads records in order, applies them and writes answers.

use super::query::QueryAnswer;
use super::Ledger;
use crate::error::{LedgerError, Result};
use crate::format::AnswerWriter;
use crate::record::{Record, parse_record};
use crate::stats::LedgerStats;
use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::time::Instant;

/// Outcome of a completed run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Lines read, blank ones included
    pub lines: u64,
    pub stats: LedgerStats,
    pub elapsed_micros: u64,
}

impl Ledger {
    /// Apply one input line.
    ///
    /// Events are ingested and yield `Ok(None)`; queries are answered against
    /// everything ingested so far. Blank lines are skipped. Parse failures
    /// are counted and returned; they leave the ledger otherwise unchanged.
    pub fn process_line(&mut self, line: &str) -> Result<Option<QueryAnswer<'_>>> {
        if line.trim().is_empty() {
            self.inner.stats.record_blank();
            return Ok(None);
        }

        let record = match parse_record(line, self.inner.config.missing_field_value) {
            Ok(record) => record,
            Err(e) => {
                self.inner.stats.record_malformed();
                return Err(e);
            }
        };

        match record {
            Record::Event(event) => {
                self.ingest(event);
                Ok(None)
            }
            Record::Query(query) => Ok(Some(self.answer(query))),
        }
    }

    /// Process every line of `input` in order, writing each answer to `output`
    /// as soon as it is produced.
    ///
    /// Malformed records are logged and skipped. Only I/O failures end the
    /// run early.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, output: W) -> Result<RunSummary> {
        let started = Instant::now();
        let mut writer = AnswerWriter::new(output, self.inner.config.output.clone());
        let mut buf = Vec::new();
        let mut lines = 0u64;

        loop {
            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            lines += 1;

            let line = String::from_utf8_lossy(&buf);
            match self.process_line(&line) {
                Ok(Some(answer)) => writer.write_answer(&answer)?,
                Ok(None) => {}
                Err(e) if e.is_recoverable() => {
                    log::warn!("Skipping line {}: {}", lines, e);
                }
                Err(e) => return Err(e),
            }
        }

        writer.flush()?;

        let summary = RunSummary {
            lines,
            stats: self.stats(),
            elapsed_micros: u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX),
        };

        log::info!(
            "Processed {} line(s): {} event(s) indexed, {} discarded, {} malformed, {} quer(ies) answered",
            summary.lines,
            summary.stats.events_indexed,
            summary.stats.events_discarded,
            summary.stats.malformed_records,
            summary.stats.queries()
        );

        Ok(summary)
    }

    /// Open `path` and [`run`](Self::run) it.
    pub fn run_path<P: AsRef<Path>, W: Write>(&mut self, path: P, output: W) -> Result<RunSummary> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| LedgerError::UnopenableInput {
            path: path.to_path_buf(),
            source,
        })?;

        log::debug!("Reading records from {}", path.display());
        self.run(BufReader::new(file), output)
    }
}
