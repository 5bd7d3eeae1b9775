//! hbnb – an interactive console over a small store of rental-listing records.
//!
//! Every record belongs to one of a fixed set of kinds (`BaseModel`, `User`,
//! `State`, `City`, `Amenity`, `Place`, `Review`) and consists of:
//! * an opaque `id`, a UUID assigned at creation and never changed,
//! * `created_at` and `updated_at` timestamps (microsecond precision),
//! * an open bag of attributes holding text, integers, floats or lists of text.
//!
//! Live records are kept by a [`construct::Registry`] under the key
//! `"<Kind>.<id>"`. The registry is mirrored to one JSON file: every change
//! rewrites the whole file and startup reads it back in full.
//!
//! ## Modules
//! * [`construct`] – kinds, records and the registry that keeps them.
//! * [`datatype`] – the [`datatype::AttrValue`] attribute type and input coercion.
//! * [`schema`] – default attributes per kind, used for type inference.
//! * [`persist`] – whole-snapshot JSON persistence.
//! * [`command`] – the pest grammar for both console syntaxes.
//! * [`console`] – the interpreter that validates and runs parsed commands.
//! * [`help`] – help texts.
//! * [`settings`] – configuration from file and environment.
//!
//! ## Console syntax
//! Every command except `help`, `quit` and `EOF` can be written in two ways
//! with identical results:
//!
//! ```text
//! (hbnb) create Place
//! 2f1c...
//! (hbnb) update Place 2f1c... max_guest 3
//! (hbnb) Place.update("2f1c...", "max_guest", 3)
//! (hbnb) Place.count()
//! 1
//! ```
//!
//! `count` only exists in the dotted form.
//!
//! ## Quick Start
//! ```
//! use hbnb::{console::Console, construct::{Kind, Registry}, persist::PersistenceMode};
//! let mut console = Console::new(Registry::new(PersistenceMode::InMemory));
//! let id = console.execute_collect("create Place").unwrap().lines.remove(0);
//! console.execute_collect(&format!("update Place {id} max_guest 3")).unwrap();
//! let place = console.registry().get(Kind::Place, &id).unwrap();
//! assert_eq!(place.get("max_guest").and_then(|v| v.as_integer()), Some(3));
//! ```

pub mod command;
pub mod console;
pub mod construct;
pub mod datatype;
pub mod error;
pub mod help;
pub mod persist;
pub mod schema;
pub mod settings;
