//! The command interpreter.
//!
//! A [`Console`] owns the [`Registry`] and turns one line of input at a time
//! into registry operations. User mistakes become `** ... **` lines in the
//! output and never end the session; only an [`HbnbError`] from the
//! persistence layer escapes [`Console::execute`].
//!
//! ```
//! use hbnb::console::{Console, Flow};
//! use hbnb::construct::Registry;
//! use hbnb::persist::PersistenceMode;
//! let mut console = Console::new(Registry::new(PersistenceMode::InMemory));
//! let id = console.execute_collect("create State").unwrap().lines.remove(0);
//! let shown = console.execute_collect(&format!("State.show({id})")).unwrap();
//! assert!(shown.lines[0].starts_with("[State]"));
//! assert_eq!(console.execute_collect("quit").unwrap().flow, Flow::Stop);
//! ```

use std::io::Write;

use tracing::debug;

use crate::command::{self, Action, Parsed, ParsedCommand};
use crate::construct::{Kind, Registry, is_reserved};
use crate::datatype::AttrValue;
use crate::error::{Complaint, HbnbError, Result};
use crate::help;

/// Whether the host loop should read another line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

/// What one line of input produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Output {
    pub flow: Flow,
    pub lines: Vec<String>,
}

// Either something to tell the user, or something that ends the session.
enum Failure {
    Complaint(Complaint),
    Fatal(HbnbError),
}

impl From<Complaint> for Failure {
    fn from(c: Complaint) -> Self {
        Failure::Complaint(c)
    }
}

impl From<HbnbError> for Failure {
    fn from(e: HbnbError) -> Self {
        Failure::Fatal(e)
    }
}

type Outcome = std::result::Result<(), Failure>;

pub struct Console {
    registry: Registry,
}

impl Console {
    pub fn new(registry: Registry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn into_registry(self) -> Registry {
        self.registry
    }

    /// Runs one line and writes whatever it printed to `out`.
    pub fn execute<W: Write>(&mut self, line: &str, out: &mut W) -> Result<Flow> {
        let output = self.execute_collect(line)?;
        for printed in &output.lines {
            writeln!(out, "{printed}")?;
        }
        Ok(output.flow)
    }

    /// Runs one line and hands back the printed lines instead of writing them.
    pub fn execute_collect(&mut self, line: &str) -> Result<Output> {
        let mut lines = Vec::new();
        let flow = match command::parse(line) {
            Parsed::Empty => Flow::Continue,
            Parsed::Unknown(input) => {
                lines.push(format!("*** Unknown command: {input}"));
                Flow::Continue
            }
            Parsed::Command(command) => self.dispatch(&command, &mut lines)?,
        };
        Ok(Output { flow, lines })
    }

    fn dispatch(&mut self, command: &ParsedCommand, lines: &mut Vec<String>) -> Result<Flow> {
        debug!(action = command.action.name(), kind = ?command.kind, id = ?command.id, "dispatching");
        let outcome = match command.action {
            Action::Quit | Action::EndOfInput => return Ok(Flow::Stop),
            Action::Help => {
                help(command, lines);
                Ok(())
            }
            Action::Create => self.create(command, lines),
            Action::Show => self.show(command, lines),
            Action::Destroy => self.destroy(command),
            Action::All => self.all(command, lines),
            Action::Update => self.update(command),
            Action::Count => {
                self.count(command, lines);
                Ok(())
            }
        };
        match outcome {
            Ok(()) => Ok(Flow::Continue),
            Err(Failure::Complaint(complaint)) => {
                lines.push(complaint.to_string());
                Ok(Flow::Continue)
            }
            Err(Failure::Fatal(e)) => Err(e),
        }
    }

    // Validation stages run in a fixed order and the first failing one wins:
    // kind present, kind known, id present, record exists.
    fn kind(command: &ParsedCommand) -> std::result::Result<Kind, Complaint> {
        let name = command.kind.as_deref().ok_or(Complaint::ClassNameMissing)?;
        name.parse().map_err(|_| Complaint::ClassDoesNotExist)
    }

    fn locate<'c>(&self, command: &'c ParsedCommand) -> std::result::Result<(Kind, &'c str), Complaint> {
        let kind = Self::kind(command)?;
        let id = command.id.as_deref().ok_or(Complaint::InstanceIdMissing)?;
        if !self.registry.contains(kind, id) {
            return Err(Complaint::NoInstanceFound);
        }
        Ok((kind, id))
    }

    fn create(&mut self, command: &ParsedCommand, lines: &mut Vec<String>) -> Outcome {
        let kind = Self::kind(command)?;
        let id = self.registry.create(kind)?;
        lines.push(id);
        Ok(())
    }

    fn show(&self, command: &ParsedCommand, lines: &mut Vec<String>) -> Outcome {
        let (kind, id) = self.locate(command)?;
        if let Some(record) = self.registry.get(kind, id) {
            lines.push(record.to_string());
        }
        Ok(())
    }

    fn destroy(&mut self, command: &ParsedCommand) -> Outcome {
        let (kind, id) = self.locate(command)?;
        if self.registry.delete(kind, id) {
            self.registry.persist()?;
            debug!(%kind, id, "record destroyed");
        }
        Ok(())
    }

    fn all(&self, command: &ParsedCommand, lines: &mut Vec<String>) -> Outcome {
        if command.kind.is_none() {
            lines.extend(self.registry.all().values().map(ToString::to_string));
            return Ok(());
        }
        let kind = Self::kind(command)?;
        lines.extend(self.registry.of_kind(kind).map(ToString::to_string));
        Ok(())
    }

    // An unknown kind counts as zero rather than being an error.
    fn count(&self, command: &ParsedCommand, lines: &mut Vec<String>) {
        let count = Self::kind(command)
            .map(|kind| self.registry.count(kind))
            .unwrap_or(0);
        lines.push(count.to_string());
    }

    fn update(&mut self, command: &ParsedCommand) -> Outcome {
        let (kind, id) = self.locate(command)?;
        let attribute = command.attribute.as_deref().ok_or(Complaint::AttributeNameMissing)?;
        let raw = command.value.as_deref().ok_or(Complaint::ValueMissing)?;
        if is_reserved(attribute) {
            debug!(attribute, "reserved attribute left unchanged");
            return Ok(());
        }
        let Some(record) = self.registry.get_mut(kind, id) else {
            return Err(Complaint::NoInstanceFound.into());
        };
        let value = AttrValue::coerce(raw, record.value_type(attribute));
        debug!(%kind, id, attribute, data_type = value.type_tag().as_str(), "updating");
        record.set(attribute, value);
        record.touch();
        self.registry.persist()?;
        Ok(())
    }
}

fn help(command: &ParsedCommand, lines: &mut Vec<String>) {
    match command.topic() {
        None => lines.extend(help::index()),
        Some(topic) => match help::topic(topic) {
            Some(text) => lines.extend(text.lines().map(str::to_string)),
            None => lines.push(format!("*** No help on {topic}")),
        },
    }
}
