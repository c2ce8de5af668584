//! Argument values and parameter declarations

use std::fmt;

use indexmap::IndexMap;

/// A runtime value produced by flag mapping.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    /// Boolean flag value
    Bool(bool),

    /// Signed integer value
    Int(i64),

    /// Floating point value
    Float(f64),

    /// String value
    Str(String),
}

impl ArgValue {
    /// The value as a bool, if it is one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ArgValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The value as an integer, if it is one.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ArgValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// The value as a float, if it is one.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            ArgValue::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// The value as a string slice, if it is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ArgValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Human-readable name of the value's kind.
    pub fn type_name(&self) -> &'static str {
        match self {
            ArgValue::Bool(_) => "bool",
            ArgValue::Int(_) => "int",
            ArgValue::Float(_) => "float",
            ArgValue::Str(_) => "str",
        }
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgValue::Bool(b) => write!(f, "{}", b),
            ArgValue::Int(n) => write!(f, "{}", n),
            ArgValue::Float(n) => write!(f, "{}", n),
            ArgValue::Str(s) => write!(f, "{}", s),
        }
    }
}

/// Declared kind of a command parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Boolean flag
    Bool,

    /// Signed integer
    Int,

    /// Floating point number
    Float,

    /// Free-form string
    Str,
}

impl ParamKind {
    /// Human-readable name of the kind.
    pub fn name(&self) -> &'static str {
        match self {
            ParamKind::Bool => "bool",
            ParamKind::Int => "int",
            ParamKind::Float => "float",
            ParamKind::Str => "str",
        }
    }
}

/// A declared keyword parameter of a command.
///
/// Commands declare their parameters up front; mappers match flag tokens
/// against these declarations. A parameter without a default is required.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
    /// Parameter name (matched case-insensitively against flag tokens)
    pub name: String,

    /// Declared kind
    pub kind: ParamKind,

    /// Default value, filled in when the flag is not supplied
    pub default: Option<ArgValue>,
}

impl ParamSpec {
    /// Declare a required parameter (no default).
    pub fn required(name: impl Into<String>, kind: ParamKind) -> Self {
        Self {
            name: name.into(),
            kind,
            default: None,
        }
    }

    /// Declare an optional parameter with a default value.
    pub fn optional(name: impl Into<String>, kind: ParamKind, default: ArgValue) -> Self {
        Self {
            name: name.into(),
            kind,
            default: Some(default),
        }
    }

    /// Whether this parameter must be supplied.
    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }
}

/// Mapped arguments handed to a command handler.
///
/// Flags preserve insertion order (declaration order after defaults are
/// filled in), so output that iterates them is stable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
    /// Positional arguments, in input order
    pub positional: Vec<String>,

    /// Named flag values
    pub flags: IndexMap<String, ArgValue>,
}

impl Args {
    /// Create an empty argument set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a flag by name.
    pub fn flag(&self, name: &str) -> Option<&ArgValue> {
        self.flags.get(name)
    }

    /// Whether no arguments were supplied at all.
    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.flags.is_empty()
    }
}

/// Whether a word reads as an affirmative.
///
/// Case-insensitive membership in `y`, `yes`, `true`.
pub fn is_truthy(word: &str) -> bool {
    matches!(word.to_ascii_lowercase().as_str(), "y" | "yes" | "true")
}
