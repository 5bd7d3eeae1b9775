//! Parsing of console input.
//!
//! Both syntaxes compile to the same [`ParsedCommand`], so everything after
//! parsing is shared and the two forms cannot drift apart:
//!
//! ```
//! use hbnb::command::{parse, Parsed};
//! let spaced = parse("update Place 42 max_guest 3");
//! let dotted = parse("Place.update(42, \"max_guest\", 3)");
//! assert_eq!(spaced, dotted);
//! assert!(matches!(spaced, Parsed::Command(_)));
//! ```
//!
//! Identifiers (kind, id and attribute name) lose one layer of quotes here.
//! A bracketed list such as `["a", "b"]` is a single value in both forms.
//! Values are passed on verbatim and only unquoted when they are coerced,
//! because whether quotes matter depends on the attribute's type.

use pest::Parser;
use pest::iterators::Pair;
use pest_derive::Parser;
use tracing::debug;

use crate::datatype::strip_quotes;

#[derive(Parser)]
#[grammar = "command.pest"]
struct CommandParser;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Help,
    Quit,
    EndOfInput,
    Create,
    Show,
    Destroy,
    All,
    Update,
    Count,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Help => "help",
            Self::Quit => "quit",
            Self::EndOfInput => "EOF",
            Self::Create => "create",
            Self::Show => "show",
            Self::Destroy => "destroy",
            Self::All => "all",
            Self::Update => "update",
            Self::Count => "count",
        }
    }

    // count only exists in the dotted form
    fn from_verb(verb: &str) -> Option<Self> {
        match verb {
            "help" | "?" => Some(Self::Help),
            "quit" => Some(Self::Quit),
            "EOF" => Some(Self::EndOfInput),
            "create" => Some(Self::Create),
            "show" => Some(Self::Show),
            "destroy" => Some(Self::Destroy),
            "all" => Some(Self::All),
            "update" => Some(Self::Update),
            _ => None,
        }
    }

    // help, quit and EOF have no dotted form
    fn from_dotted(name: &str) -> Option<Self> {
        match name {
            "create" => Some(Self::Create),
            "show" => Some(Self::Show),
            "destroy" => Some(Self::Destroy),
            "all" => Some(Self::All),
            "update" => Some(Self::Update),
            "count" => Some(Self::Count),
            _ => None,
        }
    }
}

/// One command with its positional arguments. Missing arguments stay `None`
/// so that validation can report the first one absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub action: Action,
    pub kind: Option<String>,
    pub id: Option<String>,
    pub attribute: Option<String>,
    pub value: Option<String>,
}

impl ParsedCommand {
    pub fn new(action: Action) -> Self {
        Self {
            action,
            kind: None,
            id: None,
            attribute: None,
            value: None,
        }
    }

    /// `help` keeps its topic where other commands keep the kind.
    pub fn topic(&self) -> Option<&str> {
        self.kind.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parsed {
    /// Blank input.
    Empty,
    Command(ParsedCommand),
    /// Anything not understood, carrying the trimmed input line.
    Unknown(String),
}

pub fn parse(line: &str) -> Parsed {
    let line = line.trim();
    if line.is_empty() {
        return Parsed::Empty;
    }
    let pairs = match CommandParser::parse(Rule::line, line) {
        Ok(pairs) => pairs,
        Err(e) => {
            debug!(error = %e, "input did not parse");
            return Parsed::Unknown(line.to_string());
        }
    };
    for pair in pairs {
        let command = match pair.as_rule() {
            Rule::dotted => dotted(pair),
            Rule::spaced => spaced(pair),
            _ => continue,
        };
        return match command {
            Some(command) => Parsed::Command(command),
            None => Parsed::Unknown(line.to_string()),
        };
    }
    Parsed::Unknown(line.to_string())
}

fn identifier(raw: &str) -> Option<String> {
    let unquoted = strip_quotes(raw.trim());
    (!unquoted.is_empty()).then(|| unquoted.into_owned())
}

fn spaced(pair: Pair<Rule>) -> Option<ParsedCommand> {
    let mut words = pair.into_inner();
    let action = Action::from_verb(words.next()?.as_str())?;
    let mut command = ParsedCommand::new(action);
    command.kind = words.next().and_then(|w| identifier(w.as_str()));
    command.id = words.next().and_then(|w| identifier(w.as_str()));
    command.attribute = words.next().and_then(|w| identifier(w.as_str()));
    command.value = words.next().map(|w| w.as_str().to_string());
    Some(command)
}

fn dotted(pair: Pair<Rule>) -> Option<ParsedCommand> {
    let mut inner = pair.into_inner();
    let kind = inner.next()?.as_str().to_string();
    let action = Action::from_dotted(inner.next()?.as_str())?;
    let mut command = ParsedCommand::new(action);
    command.kind = Some(kind);

    let mut arguments = inner.next().map(|list| list.into_inner()).into_iter().flatten();
    command.id = arguments.next().and_then(|a| identifier(a.as_str()));
    match arguments.next() {
        // a mapping supplies name and value together; only its first pair counts
        Some(arg) if arg.as_rule() == Rule::mapping => {
            if let Some(first) = arg.into_inner().next() {
                let mut items = first.into_inner();
                command.attribute = items.next().and_then(|k| identifier(k.as_str()));
                command.value = items.next().map(|v| v.as_str().trim().to_string());
            }
        }
        Some(arg) => {
            command.attribute = identifier(arg.as_str());
            command.value = arguments.next().map(|v| v.as_str().trim().to_string());
        }
        None => (),
    }
    Some(command)
}
