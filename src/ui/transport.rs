// Copyright 2025 Eric Jingryd (tidynest@proton.me)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Event transport
//!
//! Connects an `AppContext` to the outside world: input changes come in
//! as parsed events or text lines, and every dispatch is handed to an
//! `OutputSink` standing in for the rendering layer.
//!
//! Malformed lines and events naming unknown nodes or properties are
//! logged and skipped, so one bad event never stops the stream.

use colored::*;
use log::warn;
use std::io::BufRead;

use crate::core::{parse_event, Dispatch, HandlerError, InputEvent, OutputChange};
use crate::ui::app::{AppContext, AppError};

/// Receiver of everything the registry produces
pub trait OutputSink {
    fn output_changed(&mut self, change: &OutputChange);

    fn handler_failed(&mut self, failure: &HandlerError);

    /// Forwards a whole dispatch, changes first
    fn deliver(&mut self, dispatch: &Dispatch) {
        for change in &dispatch.changes {
            self.output_changed(change);
        }
        for failure in &dispatch.failures {
            self.handler_failed(failure);
        }
    }
}

/// Keeps every change and failure, in delivery order
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordingSink {
    pub changes: Vec<OutputChange>,
    pub failures: Vec<HandlerError>,
}

impl OutputSink for RecordingSink {
    fn output_changed(&mut self, change: &OutputChange) {
        self.changes.push(change.clone());
    }

    fn handler_failed(&mut self, failure: &HandlerError) {
        self.failures.push(failure.clone());
    }
}

/// Prints changes and failures to the terminal
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleSink;

impl OutputSink for ConsoleSink {
    fn output_changed(&mut self, change: &OutputChange) {
        println!(
            "{} {} = {}",
            "✓".green(),
            change.target.to_string().cyan(),
            change.value
        );
    }

    fn handler_failed(&mut self, failure: &HandlerError) {
        eprintln!("{} {}", "✗".red().bold(), failure);
    }
}

/// Counts for one transport run
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct TransportSummary {
    /// Events delivered to the registry
    pub events: usize,
    /// Lines or events dropped as malformed or unknown
    pub skipped: usize,
    pub changes: usize,
    pub failures: usize,
}

/// Feeds events to a running context
///
/// # Errors
///
/// `AppError::InvalidState` if the context is not running. Events the
/// registry rejects are skipped, not returned.
pub fn run_events<I, S>(
    ctx: &mut AppContext,
    events: I,
    sink: &mut S,
) -> Result<TransportSummary, AppError>
where
    I: IntoIterator<Item = InputEvent>,
    S: OutputSink + ?Sized,
{
    let mut summary = TransportSummary::default();

    for event in events {
        deliver(ctx, event, sink, &mut summary)?;
    }

    Ok(summary)
}

/// Reads `<node-id>.<property> = <value>` lines and feeds them to a
/// running context
///
/// Blank lines and `#` comments are ignored; malformed lines are skipped
/// with a warning.
pub fn run_lines<R, S>(
    ctx: &mut AppContext,
    reader: R,
    sink: &mut S,
) -> Result<TransportSummary, AppError>
where
    R: BufRead,
    S: OutputSink + ?Sized,
{
    let mut summary = TransportSummary::default();

    for (line_num, line) in reader.lines().enumerate() {
        let line = line?;
        match parse_event(&line, line_num + 1) {
            Ok(Some(event)) => deliver(ctx, event, sink, &mut summary)?,
            Ok(None) => {}
            Err(e) => {
                warn!("Skipping line: {}", e);
                summary.skipped += 1;
            }
        }
    }

    Ok(summary)
}

fn deliver<S: OutputSink + ?Sized>(
    ctx: &mut AppContext,
    event: InputEvent,
    sink: &mut S,
    summary: &mut TransportSummary,
) -> Result<(), AppError> {
    let source = event.source.clone();

    match ctx.handle_event(event) {
        Ok(dispatch) => {
            summary.events += 1;
            summary.changes += dispatch.changes.len();
            summary.failures += dispatch.failures.len();
            sink.deliver(&dispatch);
            Ok(())
        }
        Err(AppError::Registry(e)) => {
            warn!("Skipping event for {}: {}", source, e);
            summary.skipped += 1;
            Ok(())
        }
        Err(e) => Err(e),
    }
}
