//! Default attributes per kind.
//!
//! The defaults never enter a record's attribute bag by themselves. They are
//! what a record reports for an attribute it was never given, and they decide
//! how `update` parses input for such an attribute.

use crate::construct::Kind;
use crate::datatype::{AttrValue, ValueType};

/// One default attribute of a kind.
#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub name: &'static str,
    pub shape: Shape,
}

/// Static form of a default value, so the schema can live in constants.
#[derive(Debug, Clone, Copy)]
pub enum Shape {
    Text,
    Integer,
    Float,
    List,
}

impl Shape {
    pub fn value_type(&self) -> ValueType {
        match self {
            Self::Text => ValueType::Text,
            Self::Integer => ValueType::Integer,
            Self::Float => ValueType::Float,
            Self::List => ValueType::List,
        }
    }

    pub fn value(&self) -> AttrValue {
        match self {
            Self::Text => AttrValue::Text(String::new()),
            Self::Integer => AttrValue::Integer(0),
            Self::Float => AttrValue::Float(0.0),
            Self::List => AttrValue::List(Vec::new()),
        }
    }
}

const fn field(name: &'static str, shape: Shape) -> Field {
    Field { name, shape }
}

const USER: &[Field] = &[
    field("email", Shape::Text),
    field("password", Shape::Text),
    field("first_name", Shape::Text),
    field("last_name", Shape::Text),
];

const STATE: &[Field] = &[field("name", Shape::Text)];

const CITY: &[Field] = &[field("state_id", Shape::Text), field("name", Shape::Text)];

const AMENITY: &[Field] = &[field("name", Shape::Text)];

const PLACE: &[Field] = &[
    field("city_id", Shape::Text),
    field("user_id", Shape::Text),
    field("name", Shape::Text),
    field("description", Shape::Text),
    field("number_rooms", Shape::Integer),
    field("number_bathrooms", Shape::Integer),
    field("max_guest", Shape::Integer),
    field("price_by_night", Shape::Integer),
    field("latitude", Shape::Float),
    field("longitude", Shape::Float),
    field("amenity_ids", Shape::List),
];

const REVIEW: &[Field] = &[
    field("place_id", Shape::Text),
    field("user_id", Shape::Text),
    field("text", Shape::Text),
];

pub fn fields(kind: Kind) -> &'static [Field] {
    match kind {
        Kind::BaseModel => &[],
        Kind::User => USER,
        Kind::State => STATE,
        Kind::City => CITY,
        Kind::Amenity => AMENITY,
        Kind::Place => PLACE,
        Kind::Review => REVIEW,
    }
}

pub fn lookup(kind: Kind, name: &str) -> Option<&'static Field> {
    fields(kind).iter().find(|f| f.name == name)
}
