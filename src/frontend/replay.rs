//! Scripted [`EventSource`] that replays input from JSON lines.
//!
//! # Wire format
//!
//! Each line is the input of one frame: either a JSON array of events or a
//! single event.  Blank lines are frames without input.  Lines starting
//! with `#` are comments and do not count as frames.
//!
//! ```text
//! # grab the first control point and drag it left
//! [{"PointerDown":{"x":200,"y":500}}]
//! {"PointerMove":{"x":150,"y":500}}
//!
//! "PointerUp"
//! ```
//!
//! End of input produces a single [`InputEvent::Quit`].

use crate::event::InputEvent;
use crate::traits::EventSource;
use log::{debug, info};
use serde::Deserialize;
use std::io::BufRead;

/// Errors produced by the replay source.
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: {source}")]
    Json {
        line: usize,
        source: serde_json::Error,
    },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ScriptLine {
    Batch(Vec<InputEvent>),
    Single(InputEvent),
}

/// An [`EventSource`] reading a replay script from any [`BufRead`].
pub struct ReplaySource<R> {
    reader: R,
    line: usize,
    finished: bool,
}

impl<R: BufRead> ReplaySource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: 0,
            finished: false,
        }
    }

    /// Number of lines consumed so far.
    pub fn lines_read(&self) -> usize {
        self.line
    }
}

impl<R: BufRead> EventSource for ReplaySource<R> {
    type Error = ReplayError;

    fn poll(&mut self) -> Result<Vec<InputEvent>, ReplayError> {
        if self.finished {
            return Ok(Vec::new());
        }
        let mut buf = String::new();
        loop {
            buf.clear();
            if self.reader.read_line(&mut buf)? == 0 {
                info!("replay finished after {} lines", self.line);
                self.finished = true;
                return Ok(vec![InputEvent::Quit]);
            }
            self.line += 1;
            let trimmed = buf.trim();
            if trimmed.starts_with('#') {
                continue;
            }
            if trimmed.is_empty() {
                return Ok(Vec::new());
            }
            let parsed: ScriptLine =
                serde_json::from_str(trimmed).map_err(|source| ReplayError::Json {
                    line: self.line,
                    source,
                })?;
            let events = match parsed {
                ScriptLine::Batch(events) => events,
                ScriptLine::Single(event) => vec![event],
            };
            debug!("replay line {}: {} event(s)", self.line, events.len());
            return Ok(events);
        }
    }
}
