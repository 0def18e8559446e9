//! Output formatting layer.
//!
//! The query engine hands back events; this module is the only place that
//! turns them into text. Integers are zero-padded to the widths in
//! [`OutputConfig`], strings are printed verbatim and fields are separated
//! by single spaces. Padding is plain left fill with `'0'`, so a negative
//! value keeps its sign after the fill (`-1` at width 3 is `0-1`).

use crate::config::OutputConfig;
use crate::event::{Event, EventPayload};
use crate::ledger::QueryAnswer;
use crate::record::QueryTarget;
use std::fmt;
use std::io::{self, Write};

/// Display adapter rendering one event line.
pub struct EventLine<'a> {
    event: &'a Event,
    output: &'a OutputConfig,
}

impl<'a> EventLine<'a> {
    pub fn new(event: &'a Event, output: &'a OutputConfig) -> Self {
        Self { event, output }
    }
}

impl fmt::Display for EventLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tw = self.output.timestamp_width;
        let w = self.output.field_width;
        let ev = self.event;

        write!(
            f,
            "{:0>tw$} EV {} {:0>w$}",
            ev.timestamp(),
            ev.code(),
            ev.package_id()
        )?;

        match ev.payload() {
            EventPayload::Register(reg) => write!(
                f,
                " {} {} {:0>w$} {:0>w$}",
                reg.sender, reg.recipient, reg.origin, reg.destination
            ),
            EventPayload::Store(slot) | EventPayload::Remove(slot) | EventPayload::Unload(slot) => {
                write!(f, " {:0>w$} {:0>w$}", slot.facility, slot.section)
            }
            EventPayload::Transit {
                origin,
                destination,
            } => write!(f, " {:0>w$} {:0>w$}", origin, destination),
            EventPayload::Deliver { destination } => write!(f, " {:0>w$}", destination),
            EventPayload::Unknown { .. } => Ok(()),
        }
    }
}

/// Display adapter for the header line of an answer.
pub struct AnswerHeader<'a> {
    answer: &'a QueryAnswer<'a>,
    output: &'a OutputConfig,
}

impl<'a> AnswerHeader<'a> {
    pub fn new(answer: &'a QueryAnswer<'a>, output: &'a OutputConfig) -> Self {
        Self { answer, output }
    }
}

impl fmt::Display for AnswerHeader<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tw = self.output.timestamp_width;
        write!(f, "{:0>tw$} ", self.answer.timestamp)?;
        match &self.answer.target {
            QueryTarget::Client(name) => write!(f, "CL {}", name),
            QueryTarget::Package(id) => write!(f, "PC {}", id),
        }
    }
}

/// Writes answers to the result sink.
pub struct AnswerWriter<W: Write> {
    sink: W,
    output: OutputConfig,
}

impl<W: Write> AnswerWriter<W> {
    pub fn new(sink: W, output: OutputConfig) -> Self {
        Self { sink, output }
    }

    /// Header, count, then one line per event in answer order.
    pub fn write_answer(&mut self, answer: &QueryAnswer<'_>) -> io::Result<()> {
        writeln!(self.sink, "{}", AnswerHeader::new(answer, &self.output))?;
        writeln!(self.sink, "{}", answer.events.len())?;
        for event in &answer.events {
            writeln!(self.sink, "{}", EventLine::new(event, &self.output))?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.sink.flush()
    }

    pub fn into_inner(self) -> W {
        self.sink
    }
}

/// Render a whole answer into a string.
pub fn render_answer(answer: &QueryAnswer<'_>, output: &OutputConfig) -> String {
    let mut writer = AnswerWriter::new(Vec::new(), output.clone());
    // Writing into a Vec cannot fail.
    let _ = writer.write_answer(answer);
    String::from_utf8_lossy(&writer.into_inner()).into_owned()
}
