// used for timestamps on every record
use chrono::{NaiveDateTime, SubsecRound, Utc};

// insertion ordered maps, so listings and the stored file follow creation order
use indexmap::IndexMap;

// used to serialize records into the backing file
use serde::{Deserialize, Serialize};

// used to print out readable forms of a construct
use std::fmt;
use std::str::FromStr;

use tracing::{debug, info};
use uuid::Uuid;

// our own stuff that we need
use crate::datatype::{AttrValue, ValueType};
use crate::error::{HbnbError, Result};
use crate::persist::{PersistenceMode, Persistor, Snapshot};
use crate::schema::{self, Field};

/// Timestamps are written with microsecond precision, which is also the
/// precision they are taken with, so a stored record reads back unchanged.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";
// accepts stored timestamps with or without a fraction
const TIMESTAMP_PARSE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Names a record carries outside of its attribute bag.
pub const RESERVED: [&str; 4] = ["id", "created_at", "updated_at", "__class__"];

pub fn is_reserved(name: &str) -> bool {
    RESERVED.contains(&name)
}

/// Constructor used when a stored object is turned back into a record.
pub type Factory = fn(RecordFields) -> Record;

// Generates the closed set of kinds together with the name -> constructor
// table that reload dispatches through.
macro_rules! kinds {
    ($($kind:ident),+ $(,)?) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Kind {
            $($kind),+
        }

        impl Kind {
            pub const ALL: &'static [Kind] = &[$(Kind::$kind),+];

            pub fn name(&self) -> &'static str {
                match self {
                    $(Kind::$kind => stringify!($kind)),+
                }
            }
        }

        static FACTORIES: &[(&str, Factory)] = &[
            $((stringify!($kind), {
                fn restore(fields: RecordFields) -> Record {
                    Record::restore(Kind::$kind, fields)
                }
                restore as Factory
            })),+
        ];
    };
}

kinds!(BaseModel, User, State, City, Amenity, Place, Review);

impl Kind {
    /// The constructor registered for a stored class name, if the name is known.
    pub fn factory(name: &str) -> Option<Factory> {
        FACTORIES
            .iter()
            .find(|(known, _)| *known == name)
            .map(|(_, factory)| *factory)
    }

    pub fn schema(&self) -> &'static [Field] {
        schema::fields(*self)
    }
}

impl FromStr for Kind {
    type Err = HbnbError;
    fn from_str(s: &str) -> Result<Self> {
        Kind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| HbnbError::UnknownKind { kind: s.to_string() })
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Registry key of a record.
pub fn key(kind: Kind, id: &str) -> String {
    format!("{}.{}", kind.name(), id)
}

fn now() -> NaiveDateTime {
    Utc::now().naive_utc().trunc_subsecs(6)
}

fn parse_timestamp(field: &str, value: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_PARSE_FORMAT).map_err(|e| HbnbError::DataCorruption {
        message: format!("bad {field} '{value}': {e}"),
    })
}

// ------------- Record -------------

/// Everything needed to rebuild a record verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordFields {
    pub id: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub attributes: IndexMap<String, AttrValue>,
}

/// The flat object a record becomes in the backing file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord {
    #[serde(rename = "__class__")]
    pub class: String,
    pub id: String,
    pub created_at: String,
    pub updated_at: String,
    #[serde(flatten)]
    pub attributes: IndexMap<String, AttrValue>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    kind: Kind,
    id: String,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
    attributes: IndexMap<String, AttrValue>,
}

impl Record {
    /// A brand new record with a fresh identity. Registering it is up to the
    /// caller, see [`Registry::create`].
    pub fn new(kind: Kind) -> Self {
        let stamp = now();
        Self {
            kind,
            id: Uuid::new_v4().to_string(),
            created_at: stamp,
            updated_at: stamp,
            attributes: IndexMap::new(),
        }
    }

    /// A record rebuilt from stored data, identity and timestamps untouched.
    pub fn restore(kind: Kind, fields: RecordFields) -> Self {
        Self {
            kind,
            id: fields.id,
            created_at: fields.created_at,
            updated_at: fields.updated_at,
            attributes: fields.attributes,
        }
    }

    /// Inverse of [`Record::serialize`]. The stored class name picks the
    /// constructor; an unknown one is fatal.
    pub fn reconstruct(stored: StoredRecord) -> Result<Self> {
        let factory = Kind::factory(&stored.class)
            .ok_or_else(|| HbnbError::UnknownKind { kind: stored.class.clone() })?;
        let fields = RecordFields {
            created_at: parse_timestamp("created_at", &stored.created_at)?,
            updated_at: parse_timestamp("updated_at", &stored.updated_at)?,
            id: stored.id,
            attributes: stored.attributes,
        };
        Ok(factory(fields))
    }

    pub fn serialize(&self) -> StoredRecord {
        StoredRecord {
            class: self.kind.name().to_string(),
            id: self.id.clone(),
            created_at: self.created_at.format(TIMESTAMP_FORMAT).to_string(),
            updated_at: self.updated_at.format(TIMESTAMP_FORMAT).to_string(),
            attributes: self.attributes.clone(),
        }
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }
    pub fn id(&self) -> &str {
        &self.id
    }
    pub fn key(&self) -> String {
        key(self.kind, &self.id)
    }
    pub fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }
    pub fn updated_at(&self) -> NaiveDateTime {
        self.updated_at
    }
    pub fn attributes(&self) -> &IndexMap<String, AttrValue> {
        &self.attributes
    }

    /// Only what has been set on this record.
    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.attributes.get(name)
    }

    /// What has been set, or else the kind's default.
    pub fn attribute(&self, name: &str) -> Option<AttrValue> {
        self.attributes
            .get(name)
            .cloned()
            .or_else(|| schema::lookup(self.kind, name).map(|f| f.shape.value()))
    }

    /// Type that input for `name` should be parsed as: the current value's
    /// type, else the default's, else text.
    pub fn value_type(&self, name: &str) -> ValueType {
        self.attributes
            .get(name)
            .map(AttrValue::type_tag)
            .or_else(|| schema::lookup(self.kind, name).map(|f| f.shape.value_type()))
            .unwrap_or(ValueType::Text)
    }

    /// Sets an attribute. Reserved names are refused and `false` is returned.
    pub fn set(&mut self, name: &str, value: AttrValue) -> bool {
        if is_reserved(name) {
            return false;
        }
        self.attributes.insert(name.to_string(), value);
        true
    }

    /// Marks the record as modified. Never moves `updated_at` before
    /// `created_at`, even if the clock stepped back.
    pub fn touch(&mut self) {
        self.updated_at = now().max(self.created_at);
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "[{}] ({}) {{\"id\": {:?}, \"created_at\": \"{}\", \"updated_at\": \"{}\"",
            self.kind,
            self.id,
            self.id,
            self.created_at.format(TIMESTAMP_FORMAT),
            self.updated_at.format(TIMESTAMP_FORMAT)
        )?;
        for (name, value) in &self.attributes {
            write!(f, ", {:?}: {}", name, value)?;
        }
        write!(f, "}}")
    }
}

// ------------- Registry -------------

/// Keeps every live record under `"<Kind>.<id>"` and mirrors the whole set to
/// the backing file after each change.
#[derive(Debug)]
pub struct Registry {
    records: IndexMap<String, Record>,
    persistor: Persistor,
}

impl Registry {
    /// An empty registry. Nothing is read from disk, see [`Registry::open`].
    pub fn new(mode: PersistenceMode) -> Self {
        Self {
            records: IndexMap::new(),
            persistor: Persistor::new(mode),
        }
    }

    /// A registry restored from whatever the backing file holds.
    pub fn open(mode: PersistenceMode) -> Result<Self> {
        let mut registry = Self::new(mode);
        registry.load()?;
        Ok(registry)
    }

    pub fn persistor(&self) -> &Persistor {
        &self.persistor
    }

    /// Read only view of every live record.
    pub fn all(&self) -> &IndexMap<String, Record> {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn register(&mut self, record: Record) -> Result<()> {
        if record.id.is_empty() {
            return Err(HbnbError::Invariant(format!(
                "{} record registered without an id",
                record.kind
            )));
        }
        self.records.insert(record.key(), record);
        Ok(())
    }

    pub fn get(&self, kind: Kind, id: &str) -> Option<&Record> {
        self.records.get(&key(kind, id))
    }

    pub fn get_mut(&mut self, kind: Kind, id: &str) -> Option<&mut Record> {
        self.records.get_mut(&key(kind, id))
    }

    pub fn contains(&self, kind: Kind, id: &str) -> bool {
        self.records.contains_key(&key(kind, id))
    }

    pub fn of_kind(&self, kind: Kind) -> impl Iterator<Item = &Record> {
        self.records.values().filter(move |r| r.kind == kind)
    }

    pub fn count(&self, kind: Kind) -> usize {
        self.of_kind(kind).count()
    }

    /// Removes a record if present. The caller persists afterwards.
    pub fn delete(&mut self, kind: Kind, id: &str) -> bool {
        self.records.shift_remove(&key(kind, id)).is_some()
    }

    /// Creates, registers and persists a new record, handing back its id.
    pub fn create(&mut self, kind: Kind) -> Result<String> {
        let record = Record::new(kind);
        let id = record.id.clone();
        self.register(record)?;
        self.persist()?;
        debug!(%kind, %id, "record created");
        Ok(id)
    }

    /// Rewrites the backing file from the full set of records.
    pub fn persist(&self) -> Result<()> {
        let snapshot: Snapshot = self
            .records
            .iter()
            .map(|(k, record)| (k.clone(), record.serialize()))
            .collect();
        self.persistor.write_snapshot(&snapshot)
    }

    /// Reads the backing file and registers every record in it. Either every
    /// stored record comes back or none does.
    pub fn load(&mut self) -> Result<()> {
        let Some(snapshot) = self.persistor.read_snapshot()? else {
            return Ok(());
        };
        let mut restored = IndexMap::with_capacity(snapshot.len());
        for (stored_key, stored) in snapshot {
            let record = Record::reconstruct(stored)?;
            if record.id.is_empty() || record.key() != stored_key {
                return Err(HbnbError::DataCorruption {
                    message: format!(
                        "entry '{stored_key}' holds a {} with id '{}'",
                        record.kind, record.id
                    ),
                });
            }
            restored.insert(stored_key, record);
        }
        info!(records = restored.len(), "registry restored");
        self.records.extend(restored);
        Ok(())
    }
}
