//! Static descriptions of property value types.
//!
//! Every type that can appear as a mapped property implements [`ValueShape`].
//! The derive macros rely on these impls instead of runtime reflection: a
//! field of type `Vec<String>` becomes `<Vec<String> as ValueShape>::shape()`.

use std::{
    any::{TypeId, type_name},
    borrow::Cow,
    collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque},
    fmt,
    rc::Rc,
    sync::Arc,
    time::SystemTime,
};

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use uuid::Uuid;

use super::model::{EntityModel, RelationalEntity};

/// Whether a date/time value carries zone information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemporalKind {
    Date,
    Time,
    DateTime,
    /// A point on the timeline without a zone (e.g. `SystemTime`).
    Instant,
    /// Date/time bound to a time zone or offset.
    Zoned,
}

impl TemporalKind {
    pub fn has_zone(self) -> bool {
        matches!(self, TemporalKind::Zoned)
    }
}

/// Scalar value types a single column can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimpleType {
    Bool,
    I8,
    I16,
    I32,
    I64,
    I128,
    U8,
    U16,
    U32,
    U64,
    U128,
    F32,
    F64,
    Char,
    Text,
    Uuid,
    Temporal(TemporalKind),
    /// A fieldless enum, identified by its type name.
    Enum(&'static str),
}

/// Reference to a type that is itself a mapped entity.
#[derive(Clone, Copy)]
pub struct EntityType {
    type_id: TypeId,
    name: &'static str,
    model: fn() -> EntityModel,
}

impl EntityType {
    pub fn of<T: RelationalEntity + 'static>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            name: short_type_name(type_name::<T>()),
            model: T::entity_model,
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn model(&self) -> EntityModel {
        (self.model)()
    }
}

impl PartialEq for EntityType {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for EntityType {}

impl fmt::Debug for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EntityType").field(&self.name).finish()
    }
}

/// The structural description of a property value type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeShape {
    Simple(SimpleType),
    Entity(EntityType),
    /// Arrays, vectors, slices and sets. `ordered` is false for sets.
    Sequence {
        element: Box<TypeShape>,
        ordered: bool,
    },
    Map {
        key: Box<TypeShape>,
        value: Box<TypeShape>,
    },
}

impl TypeShape {
    fn sequence(element: TypeShape, ordered: bool) -> Self {
        TypeShape::Sequence {
            element: Box::new(element),
            ordered,
        }
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self, TypeShape::Sequence { .. })
    }

    pub fn is_map(&self) -> bool {
        matches!(self, TypeShape::Map { .. })
    }

    /// The element type of a sequence, the value type of a map, or the type itself.
    pub fn actual(&self) -> &TypeShape {
        match self {
            TypeShape::Sequence { element, .. } => element,
            TypeShape::Map { value, .. } => value,
            other => other,
        }
    }

    pub fn as_entity(&self) -> Option<&EntityType> {
        match self {
            TypeShape::Entity(entity) => Some(entity),
            _ => None,
        }
    }
}

/// Implemented by every type that can be the value of a mapped property.
pub trait ValueShape {
    fn shape() -> TypeShape;
}

fn short_type_name(full: &'static str) -> &'static str {
    full.rsplit("::").next().unwrap_or(full)
}

macro_rules! simple_shape {
    ($($ty:ty => $simple:expr),* $(,)?) => {
        $(
            impl ValueShape for $ty {
                fn shape() -> TypeShape {
                    TypeShape::Simple($simple)
                }
            }
        )*
    };
}

simple_shape! {
    bool => SimpleType::Bool,
    i8 => SimpleType::I8,
    i16 => SimpleType::I16,
    i32 => SimpleType::I32,
    i64 => SimpleType::I64,
    i128 => SimpleType::I128,
    isize => SimpleType::I64,
    u8 => SimpleType::U8,
    u16 => SimpleType::U16,
    u32 => SimpleType::U32,
    u64 => SimpleType::U64,
    u128 => SimpleType::U128,
    usize => SimpleType::U64,
    f32 => SimpleType::F32,
    f64 => SimpleType::F64,
    char => SimpleType::Char,
    str => SimpleType::Text,
    String => SimpleType::Text,
    Uuid => SimpleType::Uuid,
    NaiveDate => SimpleType::Temporal(TemporalKind::Date),
    NaiveTime => SimpleType::Temporal(TemporalKind::Time),
    NaiveDateTime => SimpleType::Temporal(TemporalKind::DateTime),
    SystemTime => SimpleType::Temporal(TemporalKind::Instant),
}

impl<Tz: TimeZone> ValueShape for DateTime<Tz> {
    fn shape() -> TypeShape {
        TypeShape::Simple(SimpleType::Temporal(TemporalKind::Zoned))
    }
}

impl ValueShape for Cow<'_, str> {
    fn shape() -> TypeShape {
        TypeShape::Simple(SimpleType::Text)
    }
}

// Wrappers are transparent: the column holds the wrapped value.
impl<T: ValueShape> ValueShape for Option<T> {
    fn shape() -> TypeShape {
        T::shape()
    }
}

impl<T: ValueShape + ?Sized> ValueShape for &T {
    fn shape() -> TypeShape {
        T::shape()
    }
}

impl<T: ValueShape + ?Sized> ValueShape for Box<T> {
    fn shape() -> TypeShape {
        T::shape()
    }
}

impl<T: ValueShape + ?Sized> ValueShape for Rc<T> {
    fn shape() -> TypeShape {
        T::shape()
    }
}

impl<T: ValueShape + ?Sized> ValueShape for Arc<T> {
    fn shape() -> TypeShape {
        T::shape()
    }
}

impl<T: ValueShape> ValueShape for [T] {
    fn shape() -> TypeShape {
        TypeShape::sequence(T::shape(), true)
    }
}

impl<T: ValueShape, const N: usize> ValueShape for [T; N] {
    fn shape() -> TypeShape {
        TypeShape::sequence(T::shape(), true)
    }
}

impl<T: ValueShape> ValueShape for Vec<T> {
    fn shape() -> TypeShape {
        TypeShape::sequence(T::shape(), true)
    }
}

impl<T: ValueShape> ValueShape for VecDeque<T> {
    fn shape() -> TypeShape {
        TypeShape::sequence(T::shape(), true)
    }
}

impl<T: ValueShape, S> ValueShape for HashSet<T, S> {
    fn shape() -> TypeShape {
        TypeShape::sequence(T::shape(), false)
    }
}

impl<T: ValueShape> ValueShape for BTreeSet<T> {
    fn shape() -> TypeShape {
        TypeShape::sequence(T::shape(), false)
    }
}

impl<K: ValueShape, V: ValueShape, S> ValueShape for HashMap<K, V, S> {
    fn shape() -> TypeShape {
        TypeShape::Map {
            key: Box::new(K::shape()),
            value: Box::new(V::shape()),
        }
    }
}

impl<K: ValueShape, V: ValueShape> ValueShape for BTreeMap<K, V> {
    fn shape() -> TypeShape {
        TypeShape::Map {
            key: Box::new(K::shape()),
            value: Box::new(V::shape()),
        }
    }
}
