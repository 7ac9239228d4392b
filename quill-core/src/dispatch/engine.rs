//! Dispatch engine
//!
//! Runs one received line at a time through the full pipeline:
//!
//! ```text
//! line -> classify -> (synthesize) -> normalize -> split
//!      -> per command: parse -> halt gate -> G53 override -> executor -> reply
//! ```
//!
//! The engine owns the modal context, the machine mode and the variable
//! table. Every reply goes to the sink passed with the line, in order.

use quill_protocol::{Reply, ReplySink};

use super::error::{DispatchError, LineError};
use super::machine_coords::{self, Resolution};
use super::synthesize::synthesize;
use crate::command::{Command, VariableTable};
use crate::config::{AckPolicy, DispatchConfig};
use crate::line::{classify, normalize, trim_blanks, LineClass, Splitter};
use crate::safety::{HaltGate, Verdict};
use crate::state::{HaltCause, MachineMode, ModalContext, ModeEvent};
use crate::traits::{CoordinateMode, Executor, HaltControl, Status};

/// A line received from the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawLine<'a> {
    /// Line text without its terminator
    pub text: &'a str,
    /// Line number supplied by the transport
    pub line_number: Option<u32>,
}

impl<'a> RawLine<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            line_number: None,
        }
    }

    pub fn with_line_number(mut self, line_number: u32) -> Self {
        self.line_number = Some(line_number);
        self
    }
}

/// Whether the engine took responsibility for a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Disposition {
    /// Line was handled and acknowledged
    Consumed,
    /// Line belongs to another interpreter; nothing was sent
    NotConsumed,
}

/// Whether to keep splitting the current line
enum Flow {
    Continue,
    Stop,
}

/// Command ingestion and dispatch engine
pub struct DispatchEngine<E, H> {
    executor: E,
    halt: H,
    config: DispatchConfig,
    gate: HaltGate,
    modal: ModalContext,
    mode: MachineMode,
    variables: VariableTable,
    last_error: Option<DispatchError>,
}

impl<E: Executor, H: HaltControl> DispatchEngine<E, H> {
    /// Create an engine in normal mode
    pub fn new(executor: E, halt: H, config: DispatchConfig) -> Self {
        Self {
            executor,
            halt,
            gate: HaltGate::default(),
            modal: ModalContext::new(config.initial_motion),
            mode: MachineMode::Normal,
            variables: VariableTable::new(),
            last_error: None,
            config,
        }
    }

    /// Replace the halt gate
    pub fn with_gate(mut self, gate: HaltGate) -> Self {
        self.gate = gate;
        self
    }

    pub fn mode(&self) -> MachineMode {
        self.mode
    }

    pub fn modal(&self) -> &ModalContext {
        &self.modal
    }

    pub fn variables(&self) -> &VariableTable {
        &self.variables
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Most recent error seen while dispatching
    pub fn last_error(&self) -> Option<DispatchError> {
        self.last_error
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    pub fn executor_mut(&mut self) -> &mut E {
        &mut self.executor
    }

    pub fn halt_control(&self) -> &H {
        &self.halt
    }

    /// Latch the halt from outside the dispatcher
    ///
    /// The halt control is not notified; it is expected to be the caller.
    pub fn halt(&mut self, cause: HaltCause) {
        self.apply(ModeEvent::Halt(cause));
    }

    /// Process one received line
    pub fn process_line<S: ReplySink + ?Sized>(
        &mut self,
        line: RawLine<'_>,
        sink: &mut S,
    ) -> Disposition {
        let trimmed = trim_blanks(line.text);

        // Parameter-only lines are rewritten once; the result always starts
        // with a G word and cannot trigger this again.
        let rewritten;
        let text = match classify(trimmed) {
            LineClass::Parameters(trigger) => match synthesize(trimmed, trigger, &self.modal) {
                Ok(synthesized) => {
                    rewritten = synthesized;
                    rewritten.as_str()
                }
                Err(e) => {
                    self.reject(e, sink);
                    return Disposition::Consumed;
                }
            },
            _ => trimmed,
        };

        match classify(text) {
            LineClass::Empty => sink.send(&Reply::EmptyLine),
            LineClass::Foreign => return Disposition::NotConsumed,
            LineClass::Comment => sink.send(&Reply::Blank),
            LineClass::Unrecognized | LineClass::Parameters(_) => {
                sink.send(&Reply::Ignored(text))
            }
            LineClass::Commands => match normalize(text) {
                Ok(normalized) if normalized.is_empty() => sink.send(&Reply::Blank),
                Ok(normalized) => self.run_commands(&normalized, line.line_number, sink),
                Err(e) => {
                    self.reject(e.into(), sink);
                }
            },
        }
        Disposition::Consumed
    }

    fn run_commands<S: ReplySink + ?Sized>(
        &mut self,
        line: &str,
        line_number: Option<u32>,
        sink: &mut S,
    ) {
        let mut splitter = Splitter::new(line);
        while let Some(segment) = splitter.next() {
            if let Flow::Stop = self.run_segment(segment, &mut splitter, line_number, sink) {
                break;
            }
        }
    }

    /// Run one command segment; `splitter` holds the rest of the line
    fn run_segment<S: ReplySink + ?Sized>(
        &mut self,
        segment: &str,
        splitter: &mut Splitter<'_>,
        line_number: Option<u32>,
        sink: &mut S,
    ) -> Flow {
        let mut command = match Command::parse(segment, &self.variables, line_number) {
            Ok(command) => command,
            Err(e) => return self.reject(e.into(), sink),
        };

        if let Some(assignment) = command.assignment() {
            if let Err(e) = self.variables.set(assignment.index, assignment.value) {
                return self.reject(e.into(), sink);
            }
        }

        match self.gate.inspect(self.mode, &command) {
            Verdict::Pass => {}
            Verdict::Reset => {
                self.apply(ModeEvent::Reset);
                sink.send(&Reply::HomeWarning);
                sink.send(&Reply::Blank);
                return Flow::Stop;
            }
            Verdict::Locked => {
                self.last_error = Some(DispatchError::AlarmLocked);
                sink.send(&Reply::AlarmLock);
                return Flow::Stop;
            }
        }

        let mut coords = CoordinateMode::Work;
        if machine_coords::is_machine_override(&command) {
            let resolution =
                match machine_coords::resolve(command, splitter, &self.modal, &self.variables) {
                    Ok(resolution) => resolution,
                    Err(e) => return self.reject(e.into(), sink),
                };
            command = match resolution {
                Resolution::Resolved(resolved) => resolved,
                Resolution::Invalid => {
                    self.last_error = Some(DispatchError::InvalidOverride);
                    sink.send(&Reply::InvalidOverride);
                    return Flow::Stop;
                }
            };
            coords = CoordinateMode::Machine;
        }

        // Observed after override resolution so G53 sees the previous mode
        if let Some(mode) = command.motion() {
            self.modal.observe(mode.gcode());
        }

        let outcome = self.executor.dispatch(&command, coords);
        match outcome.status {
            Status::Error => {
                self.last_error = Some(DispatchError::ExecutorFailure);
                sink.send(&Reply::Failure(outcome.text()));
                sink.send(&Reply::EnteringHalt);
                self.apply(ModeEvent::Halt(HaltCause::CommandFailed));
                Flow::Stop
            }
            Status::Ok => {
                if outcome.add_newline {
                    sink.send(&Reply::Newline);
                }
                match outcome.text() {
                    Some(text) => sink.send(&Reply::OkWith(text)),
                    None if self.defers_ok(splitter) => {}
                    None => sink.send(&Reply::Ok),
                }
                Flow::Continue
            }
        }
    }

    /// Check if a plain `ok` waits for the last command of the line
    fn defers_ok(&self, splitter: &Splitter<'_>) -> bool {
        self.config.ack == AckPolicy::PerLine && !splitter.is_exhausted()
    }

    fn reject<S: ReplySink + ?Sized>(&mut self, e: LineError, sink: &mut S) -> Flow {
        self.last_error = Some(e.into());
        sink.send(&Reply::Rejected(e.reason()));
        Flow::Stop
    }

    /// Apply a mode event, notifying the halt control of latches and
    /// clears the dispatcher caused
    fn apply(&mut self, event: ModeEvent) {
        let previous = self.mode;
        self.mode = self.mode.transition(event);
        if !event.is_dispatch_event() || self.mode == previous {
            return;
        }

        match event {
            ModeEvent::Halt(cause) => self.halt.on_halt(cause),
            ModeEvent::Reset => self.halt.on_clear(),
        }
    }
}
