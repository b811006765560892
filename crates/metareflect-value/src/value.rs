//! Dynamic value model
//!
//! Annotation payloads are arbitrary values: primitives, function
//! references, and shared composites (dates, patterns, errors, arrays,
//! maps, sets, binary buffers, and class-tagged objects).
//!
//! Composite variants live behind an `Arc`, so cloning a `Value` keeps
//! the identity of the underlying composite. Two separately built
//! composites are never identical even when structurally equal.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use indexmap::IndexMap;
use once_cell::sync::OnceCell;
use regex::{Regex, RegexBuilder};

use crate::equality::same_value_zero;
use crate::error::{Result, ValueError};

static NEXT_SYMBOL: AtomicU64 = AtomicU64::new(1);
static NEXT_OBJECT: AtomicU64 = AtomicU64::new(1);
static NEXT_CLOSURE: AtomicU64 = AtomicU64::new(1);

// ============================================================================
// Class references
// ============================================================================

/// Identifier of a class in a class registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(pub u32);

impl ClassId {
    /// The root `Object` class every chain terminates at
    pub const OBJECT: ClassId = ClassId(0);

    /// Position of the class in a registry arena
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClassId({})", self.0)
    }
}

/// A class as seen from a value: its id and its constructor name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassRef {
    /// Registry id
    pub id: ClassId,
    /// Constructor name
    pub name: Arc<str>,
}

impl ClassRef {
    /// Create a class reference
    pub fn new(id: ClassId, name: impl Into<Arc<str>>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// The root `Object` class
    pub fn object() -> Self {
        Self::new(ClassId::OBJECT, "Object")
    }
}

// ============================================================================
// Symbols and functions
// ============================================================================

/// A unique symbol; equality is identity, the description is informational
#[derive(Debug, Clone)]
pub struct Symbol {
    id: u64,
    description: Option<Arc<str>>,
}

impl Symbol {
    /// Create a fresh symbol with a description
    pub fn new(description: impl Into<Arc<str>>) -> Self {
        Self {
            id: NEXT_SYMBOL.fetch_add(1, Ordering::Relaxed),
            description: Some(description.into()),
        }
    }

    /// Create a fresh symbol without a description
    pub fn anonymous() -> Self {
        Self {
            id: NEXT_SYMBOL.fetch_add(1, Ordering::Relaxed),
            description: None,
        }
    }

    /// The symbol description, if any
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Symbol {}

impl std::hash::Hash for Symbol {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.description.as_deref().unwrap_or(""))
    }
}

/// Identity of a callable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionId {
    /// Host-provided constructor such as `String` or `Number`
    Builtin(&'static str),
    /// Constructor of a registered class
    Constructor(ClassId),
    /// Any other function, identified by allocation order
    Closure(u64),
}

/// Reference to a callable; equality is identity
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FunctionRef {
    id: FunctionId,
    name: Arc<str>,
}

impl FunctionRef {
    /// A host-provided constructor
    pub fn builtin(name: &'static str) -> Self {
        Self {
            id: FunctionId::Builtin(name),
            name: name.into(),
        }
    }

    /// The constructor of a registered class
    pub fn constructor(class: &ClassRef) -> Self {
        Self {
            id: FunctionId::Constructor(class.id),
            name: class.name.clone(),
        }
    }

    /// A fresh function with its own identity
    pub fn closure(name: impl Into<Arc<str>>) -> Self {
        Self {
            id: FunctionId::Closure(NEXT_CLOSURE.fetch_add(1, Ordering::Relaxed)),
            name: name.into(),
        }
    }

    /// Function identity
    pub fn id(&self) -> FunctionId {
        self.id
    }

    /// Function name; empty for anonymous closures
    pub fn name(&self) -> &str {
        &self.name
    }
}

// ============================================================================
// Composites
// ============================================================================

/// A point in time, or the invalid date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateValue(Option<DateTime<Utc>>);

impl DateValue {
    /// A valid date
    pub fn new(at: DateTime<Utc>) -> Self {
        Self(Some(at))
    }

    /// The invalid date
    pub fn invalid() -> Self {
        Self(None)
    }

    /// Parse RFC 3339 or a bare `YYYY-MM-DD` (midnight UTC); anything else is invalid
    pub fn parse(text: &str) -> Self {
        if let Ok(at) = DateTime::parse_from_rfc3339(text) {
            return Self(Some(at.with_timezone(&Utc)));
        }
        let midnight = NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc());
        Self(midnight)
    }

    /// Milliseconds since the epoch; `None` for the invalid date
    pub fn timestamp_millis(&self) -> Option<i64> {
        self.0.map(|at| at.timestamp_millis())
    }

    /// Whether this is a real timestamp
    pub fn is_valid(&self) -> bool {
        self.0.is_some()
    }
}

const PATTERN_FLAGS: &str = "dgimsuvy";

/// A pattern with its source text and flags
///
/// Flags are kept in `dgimsuvy` order so the canonical form does not
/// depend on how they were written. The source is compiled on first match.
#[derive(Debug, Clone)]
pub struct PatternValue {
    source: String,
    flags: String,
    regex: OnceCell<Regex>,
}

impl PatternValue {
    /// Build a pattern; flags follow the `dgimsuvy` alphabet, each at most once
    pub fn new(source: impl Into<String>, flags: impl Into<String>) -> Result<Self> {
        let source = source.into();
        let written = flags.into();

        for (i, flag) in written.char_indices() {
            if !PATTERN_FLAGS.contains(flag) || written[..i].contains(flag) {
                return Err(ValueError::InvalidPatternFlags { flags: written });
            }
        }
        let flags = PATTERN_FLAGS
            .chars()
            .filter(|flag| written.contains(*flag))
            .collect();

        Ok(Self {
            source,
            flags,
            regex: OnceCell::new(),
        })
    }

    /// Pattern source text
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Pattern flags in canonical order
    pub fn flags(&self) -> &str {
        &self.flags
    }

    /// Canonical `/source/flags` form
    pub fn canonical(&self) -> String {
        let source = if self.source.is_empty() {
            "(?:)"
        } else {
            &self.source
        };
        format!("/{}/{}", source, self.flags)
    }

    /// Test the pattern against a string
    ///
    /// Fails when the source uses syntax the matcher does not support
    /// (lookaround, backreferences).
    pub fn is_match(&self, haystack: &str) -> Result<bool> {
        let regex = self.regex.get_or_try_init(|| {
            RegexBuilder::new(&self.source)
                .case_insensitive(self.flags.contains('i'))
                .multi_line(self.flags.contains('m'))
                .dot_matches_new_line(self.flags.contains('s'))
                .build()
                .map_err(|e| ValueError::InvalidPattern {
                    pattern: self.source.clone(),
                    reason: e.to_string(),
                })
        })?;
        Ok(regex.is_match(haystack))
    }
}

/// An error object; only `name` and `message` take part in equality
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorValue {
    /// Error class name, e.g. `Error` or `TypeError`
    pub name: String,
    /// Human-readable message
    pub message: String,
    /// Captured stack, if any
    pub stack: Option<String>,
}

impl ErrorValue {
    /// A plain `Error`
    pub fn new(message: impl Into<String>) -> Self {
        Self::named("Error", message)
    }

    /// An error with an explicit class name
    pub fn named(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            stack: None,
        }
    }

    /// Attach a stack trace
    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }
}

/// Insertion-ordered map with SameValueZero key lookup
#[derive(Debug, Clone, Default)]
pub struct MapValue {
    entries: Vec<(Value, Value)>,
}

impl MapValue {
    /// An empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the entry for `key`
    pub fn insert(&mut self, key: Value, value: Value) {
        match self.entries.iter_mut().find(|(k, _)| same_value_zero(k, &key)) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Look up a key
    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| same_value_zero(k, key))
            .map(|(_, v)| v)
    }

    /// Whether the key is present
    pub fn contains_key(&self, key: &Value) -> bool {
        self.get(key).is_some()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&Value, &Value)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }
}

impl FromIterator<(Value, Value)> for MapValue {
    fn from_iter<I: IntoIterator<Item = (Value, Value)>>(iter: I) -> Self {
        let mut map = MapValue::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

/// Insertion-ordered set with SameValueZero membership
#[derive(Debug, Clone, Default)]
pub struct SetValue {
    items: Vec<Value>,
}

impl SetValue {
    /// An empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an element; returns false if it was already present
    pub fn insert(&mut self, item: Value) -> bool {
        if self.contains(&item) {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Membership test
    pub fn contains(&self, item: &Value) -> bool {
        self.items.iter().any(|v| same_value_zero(v, item))
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Elements in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.items.iter()
    }
}

impl FromIterator<Value> for SetValue {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        let mut set = SetValue::new();
        for item in iter {
            set.insert(item);
        }
        set
    }
}

/// Element type of a binary buffer view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// `Int8Array`
    Int8,
    /// `Uint8Array`
    Uint8,
    /// `Int16Array`
    Int16,
    /// `Uint16Array`
    Uint16,
    /// `Int32Array`
    Int32,
    /// `Uint32Array`
    Uint32,
    /// `Float32Array`
    Float32,
    /// `Float64Array`
    Float64,
    /// `BigInt64Array`
    BigInt64,
    /// `BigUint64Array`
    BigUint64,
    /// Untyped `DataView`
    DataView,
}

impl ElementKind {
    /// Width of one element in bytes
    pub fn width(self) -> usize {
        match self {
            ElementKind::Int8 | ElementKind::Uint8 | ElementKind::DataView => 1,
            ElementKind::Int16 | ElementKind::Uint16 => 2,
            ElementKind::Int32 | ElementKind::Uint32 | ElementKind::Float32 => 4,
            ElementKind::Float64 | ElementKind::BigInt64 | ElementKind::BigUint64 => 8,
        }
    }

    /// Constructor name of views of this kind
    pub fn constructor_name(self) -> &'static str {
        match self {
            ElementKind::Int8 => "Int8Array",
            ElementKind::Uint8 => "Uint8Array",
            ElementKind::Int16 => "Int16Array",
            ElementKind::Uint16 => "Uint16Array",
            ElementKind::Int32 => "Int32Array",
            ElementKind::Uint32 => "Uint32Array",
            ElementKind::Float32 => "Float32Array",
            ElementKind::Float64 => "Float64Array",
            ElementKind::BigInt64 => "BigInt64Array",
            ElementKind::BigUint64 => "BigUint64Array",
            ElementKind::DataView => "DataView",
        }
    }
}

/// A fixed-width view over a shared byte buffer
#[derive(Debug, Clone)]
pub struct BufferView {
    buffer: Arc<[u8]>,
    byte_offset: usize,
    byte_length: usize,
    element: ElementKind,
}

impl BufferView {
    /// View `byte_length` bytes of `buffer` starting at `byte_offset`
    pub fn new(
        buffer: Arc<[u8]>,
        byte_offset: usize,
        byte_length: usize,
        element: ElementKind,
    ) -> Result<Self> {
        let end = byte_offset.checked_add(byte_length);
        if end.map_or(true, |end| end > buffer.len()) {
            return Err(ValueError::BufferOutOfRange {
                offset: byte_offset,
                length: byte_length,
                buffer_length: buffer.len(),
            });
        }
        let width = element.width();
        if byte_offset % width != 0 || byte_length % width != 0 {
            return Err(ValueError::MisalignedBuffer {
                element: element.constructor_name(),
                offset: byte_offset,
                length: byte_length,
            });
        }
        Ok(Self {
            buffer,
            byte_offset,
            byte_length,
            element,
        })
    }

    /// A view over a whole freshly allocated buffer
    pub fn from_bytes(element: ElementKind, bytes: Vec<u8>) -> Result<Self> {
        let length = bytes.len();
        Self::new(bytes.into(), 0, length, element)
    }

    /// An `Int32Array` holding `values` in little-endian order
    pub fn from_i32s(values: &[i32]) -> Self {
        let bytes: Vec<u8> = values.iter().flat_map(|v| v.to_le_bytes()).collect();
        let length = bytes.len();
        Self {
            buffer: bytes.into(),
            byte_offset: 0,
            byte_length: length,
            element: ElementKind::Int32,
        }
    }

    /// A `Float64Array` holding `values` in little-endian order
    pub fn from_f64s(values: &[f64]) -> Self {
        let bytes: Vec<u8> = values.iter().flat_map(|v| v.to_le_bytes()).collect();
        let length = bytes.len();
        Self {
            buffer: bytes.into(),
            byte_offset: 0,
            byte_length: length,
            element: ElementKind::Float64,
        }
    }

    /// The viewed bytes
    pub fn bytes(&self) -> &[u8] {
        &self.buffer[self.byte_offset..self.byte_offset + self.byte_length]
    }

    /// Offset of the view into its backing buffer
    pub fn byte_offset(&self) -> usize {
        self.byte_offset
    }

    /// Length of the view in bytes
    pub fn byte_length(&self) -> usize {
        self.byte_length
    }

    /// Length of the backing buffer in bytes
    pub fn buffer_length(&self) -> usize {
        self.buffer.len()
    }

    /// Element type
    pub fn element(&self) -> ElementKind {
        self.element
    }
}

/// Identity token of an object, stable for its lifetime and never reused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(u64);

impl ObjectId {
    fn next() -> Self {
        Self(NEXT_OBJECT.fetch_add(1, Ordering::Relaxed))
    }
}

/// A class-tagged object with ordered string fields and symbol fields
///
/// Not `Clone`: every object carries its own identity token.
#[derive(Debug)]
pub struct ObjectValue {
    id: ObjectId,
    class: ClassRef,
    fields: IndexMap<String, Value>,
    symbols: IndexMap<Symbol, Value>,
}

impl ObjectValue {
    /// An empty instance of `class`
    pub fn new(class: ClassRef) -> Self {
        Self {
            id: ObjectId::next(),
            class,
            fields: IndexMap::new(),
            symbols: IndexMap::new(),
        }
    }

    /// An empty plain object
    pub fn plain() -> Self {
        Self::new(ClassRef::object())
    }

    /// Builder form of [`ObjectValue::set`]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    /// Builder form of [`ObjectValue::set_symbol`]
    pub fn with_symbol(mut self, key: Symbol, value: impl Into<Value>) -> Self {
        self.set_symbol(key, value);
        self
    }

    /// Set a string-keyed field, keeping its original position if present
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Set a symbol-keyed field
    pub fn set_symbol(&mut self, key: Symbol, value: impl Into<Value>) {
        self.symbols.insert(key, value.into());
    }

    /// Read a string-keyed field
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Read a symbol-keyed field
    pub fn get_symbol(&self, key: &Symbol) -> Option<&Value> {
        self.symbols.get(key)
    }

    /// Identity token
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// Class of the object
    pub fn class(&self) -> &ClassRef {
        &self.class
    }

    /// String-keyed fields in insertion order
    pub fn fields(&self) -> &IndexMap<String, Value> {
        &self.fields
    }

    /// Symbol-keyed fields in insertion order
    pub fn symbols(&self) -> &IndexMap<Symbol, Value> {
        &self.symbols
    }

    /// Own string field names in insertion order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

// ============================================================================
// Value
// ============================================================================

/// A dynamically typed value
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// The absent value
    #[default]
    Undefined,
    /// The explicit empty value
    Null,
    /// Boolean
    Bool(bool),
    /// IEEE 754 double
    Number(f64),
    /// String
    String(Arc<str>),
    /// Unique symbol
    Symbol(Symbol),
    /// Callable reference
    Function(FunctionRef),
    /// Date
    Date(Arc<DateValue>),
    /// Pattern
    Pattern(Arc<PatternValue>),
    /// Error
    Error(Arc<ErrorValue>),
    /// Ordered sequence
    Array(Arc<Vec<Value>>),
    /// Key-value map
    Map(Arc<MapValue>),
    /// Unique-value set
    Set(Arc<SetValue>),
    /// Binary buffer view
    Buffer(Arc<BufferView>),
    /// General object
    Object(Arc<ObjectValue>),
}

impl Value {
    /// A string value
    pub fn string(s: impl Into<Arc<str>>) -> Self {
        Value::String(s.into())
    }

    /// An array value
    pub fn array(items: impl IntoIterator<Item = Value>) -> Self {
        Value::Array(Arc::new(items.into_iter().collect()))
    }

    /// A plain object from `(field, value)` pairs
    pub fn object<K: Into<String>>(fields: impl IntoIterator<Item = (K, Value)>) -> Self {
        let mut object = ObjectValue::plain();
        for (key, value) in fields {
            object.set(key, value);
        }
        Value::Object(Arc::new(object))
    }

    /// A map value
    pub fn map(entries: impl IntoIterator<Item = (Value, Value)>) -> Self {
        Value::Map(Arc::new(entries.into_iter().collect()))
    }

    /// A set value
    pub fn set(items: impl IntoIterator<Item = Value>) -> Self {
        Value::Set(Arc::new(items.into_iter().collect()))
    }

    /// A valid date
    pub fn date(at: DateTime<Utc>) -> Self {
        Value::Date(Arc::new(DateValue::new(at)))
    }

    /// A date parsed from text; unparseable text yields the invalid date
    pub fn parse_date(text: &str) -> Self {
        Value::Date(Arc::new(DateValue::parse(text)))
    }

    /// The invalid date
    pub fn invalid_date() -> Self {
        Value::Date(Arc::new(DateValue::invalid()))
    }

    /// A pattern value
    pub fn pattern(source: impl Into<String>, flags: impl Into<String>) -> Result<Self> {
        Ok(Value::Pattern(Arc::new(PatternValue::new(source, flags)?)))
    }

    /// An error with an explicit class name
    pub fn error(name: impl Into<String>, message: impl Into<String>) -> Self {
        Value::Error(Arc::new(ErrorValue::named(name, message)))
    }

    /// Whether this is `undefined` or `null`
    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Undefined | Value::Null)
    }

    /// String contents, if this is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric value, if this is a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Boolean value, if this is a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Function reference, if this is a function
    pub fn as_function(&self) -> Option<&FunctionRef> {
        match self {
            Value::Function(f) => Some(f),
            _ => None,
        }
    }

    /// Object, if this is a general object
    pub fn as_object(&self) -> Option<&ObjectValue> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Elements, if this is an array
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Read a string-keyed field of an object
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|o| o.get(key))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s.into())
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(Arc::new(items))
    }
}

impl From<Symbol> for Value {
    fn from(s: Symbol) -> Self {
        Value::Symbol(s)
    }
}

impl From<FunctionRef> for Value {
    fn from(f: FunctionRef) -> Self {
        Value::Function(f)
    }
}

impl From<DateValue> for Value {
    fn from(d: DateValue) -> Self {
        Value::Date(Arc::new(d))
    }
}

impl From<PatternValue> for Value {
    fn from(p: PatternValue) -> Self {
        Value::Pattern(Arc::new(p))
    }
}

impl From<ErrorValue> for Value {
    fn from(e: ErrorValue) -> Self {
        Value::Error(Arc::new(e))
    }
}

impl From<MapValue> for Value {
    fn from(m: MapValue) -> Self {
        Value::Map(Arc::new(m))
    }
}

impl From<SetValue> for Value {
    fn from(s: SetValue) -> Self {
        Value::Set(Arc::new(s))
    }
}

impl From<BufferView> for Value {
    fn from(b: BufferView) -> Self {
        Value::Buffer(Arc::new(b))
    }
}

impl From<ObjectValue> for Value {
    fn from(o: ObjectValue) -> Self {
        Value::Object(Arc::new(o))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Undefined, Into::into)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "undefined"),
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) if n.is_nan() => write!(f, "NaN"),
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "{:?}", s),
            Value::Symbol(s) => write!(f, "{}", s),
            Value::Function(func) => write!(f, "[Function {}]", func.name()),
            Value::Date(d) => match d.0 {
                Some(at) => write!(f, "{}", at.to_rfc3339()),
                None => write!(f, "Invalid Date"),
            },
            Value::Pattern(p) => write!(f, "{}", p.canonical()),
            Value::Error(e) => write!(f, "{}: {}", e.name, e.message),
            Value::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Map(m) => write!(f, "Map({})", m.len()),
            Value::Set(s) => write!(f, "Set({})", s.len()),
            Value::Buffer(b) => write!(f, "{}({})", b.element.constructor_name(), b.byte_length),
            Value::Object(o) => {
                if o.class.id != ClassId::OBJECT {
                    write!(f, "{} ", o.class.name)?;
                }
                write!(f, "{{")?;
                for (i, (key, value)) in o.fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, " {}: {}", key, value)?;
                }
                if !o.fields.is_empty() {
                    write!(f, " ")?;
                }
                write!(f, "}}")
            }
        }
    }
}
