//! Flag-to-argument mapping
//!
//! A [`FlagMapper`] turns the raw tokens left after command resolution into
//! the named, typed [`Args`] a handler receives. Each command picks its
//! mapper at registration time, so different commands on the same shell can
//! speak different flag dialects.
//!
//! The keyword mappers share one wire format: a token is either `name=value`
//! or (for [`BoolMapper`]) a bare `name`. Flag names are matched
//! case-insensitively against the command's declared parameters and stored
//! under the declared name.

use indexmap::IndexMap;

use crate::args::{is_truthy, ArgValue, Args, ParamKind, ParamSpec};
use crate::error::MapError;

/// Maps raw input tokens onto a command's declared parameters.
pub trait FlagMapper: Send + Sync {
    /// Map `tokens` against `params`, producing the handler's arguments.
    fn map(&self, params: &[ParamSpec], tokens: &[String]) -> Result<Args, MapError>;

    /// Mapper name for diagnostics.
    fn name(&self) -> &'static str;
}

/// The default mapper: every token becomes a positional argument.
///
/// Declared parameters are ignored; no flags are produced.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl FlagMapper for Passthrough {
    fn map(&self, _params: &[ParamSpec], tokens: &[String]) -> Result<Args, MapError> {
        Ok(Args {
            positional: tokens.to_vec(),
            flags: IndexMap::new(),
        })
    }

    fn name(&self) -> &'static str {
        "Passthrough"
    }
}

/// Maps bare flags and `name=value` tokens onto boolean parameters.
///
/// A bare `name` sets the flag to `true`; `name=value` truthy-parses the
/// value. Every matched parameter must be declared [`ParamKind::Bool`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BoolMapper;

impl FlagMapper for BoolMapper {
    fn map(&self, params: &[ParamSpec], tokens: &[String]) -> Result<Args, MapError> {
        let mut flags = IndexMap::new();
        for token in tokens {
            let (name, value) = split_token(token);
            let param = match_param(params, &name)?;
            if param.kind != ParamKind::Bool {
                return Err(kind_mismatch(param, self.name()));
            }
            let mapped = match value {
                None => true,
                Some(raw) => is_truthy(raw),
            };
            insert_once(&mut flags, param, ArgValue::Bool(mapped))?;
        }
        finish(params, flags)
    }

    fn name(&self) -> &'static str {
        "BoolMapper"
    }
}

/// Maps `name=value` tokens onto string parameters, verbatim.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringMapper;

impl FlagMapper for StringMapper {
    fn map(&self, params: &[ParamSpec], tokens: &[String]) -> Result<Args, MapError> {
        let mut flags = IndexMap::new();
        for token in tokens {
            let (name, value) = split_token(token);
            let raw = value.ok_or_else(|| MapError::UnexpectedPositional {
                token: token.clone(),
            })?;
            let param = match_param(params, &name)?;
            if param.kind != ParamKind::Str {
                return Err(kind_mismatch(param, self.name()));
            }
            insert_once(&mut flags, param, ArgValue::Str(raw.to_string()))?;
        }
        finish(params, flags)
    }

    fn name(&self) -> &'static str {
        "StringMapper"
    }
}

/// Maps `name=value` tokens, parsing each value as its declared kind.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypedMapper;

impl FlagMapper for TypedMapper {
    fn map(&self, params: &[ParamSpec], tokens: &[String]) -> Result<Args, MapError> {
        let mut flags = IndexMap::new();
        for token in tokens {
            let (name, value) = split_token(token);
            let raw = value.ok_or_else(|| MapError::UnexpectedPositional {
                token: token.clone(),
            })?;
            let param = match_param(params, &name)?;
            let mapped = parse_value(param, raw)?;
            insert_once(&mut flags, param, mapped)?;
        }
        finish(params, flags)
    }

    fn name(&self) -> &'static str {
        "TypedMapper"
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Shared Mapping Machinery
// ═══════════════════════════════════════════════════════════════════════

/// Split a token into a lowercase flag name and an optional raw value.
fn split_token(token: &str) -> (String, Option<&str>) {
    match token.split_once('=') {
        Some((name, value)) => (name.to_ascii_lowercase(), Some(value)),
        None => (token.to_ascii_lowercase(), None),
    }
}

/// Find the declared parameter for a flag name.
fn match_param<'p>(params: &'p [ParamSpec], name: &str) -> Result<&'p ParamSpec, MapError> {
    params
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(name))
        .ok_or_else(|| MapError::UnknownFlag {
            flag: name.to_string(),
        })
}

/// Insert a mapped value, rejecting a second assignment to the same flag.
fn insert_once(
    flags: &mut IndexMap<String, ArgValue>,
    param: &ParamSpec,
    value: ArgValue,
) -> Result<(), MapError> {
    if flags.contains_key(&param.name) {
        return Err(MapError::DuplicateFlag {
            flag: param.name.clone(),
        });
    }
    flags.insert(param.name.clone(), value);
    Ok(())
}

/// Fill in defaults and check for missing required flags.
fn finish(params: &[ParamSpec], mut flags: IndexMap<String, ArgValue>) -> Result<Args, MapError> {
    for param in params {
        if flags.contains_key(&param.name) {
            continue;
        }
        match &param.default {
            Some(value) => {
                flags.insert(param.name.clone(), value.clone());
            }
            None => {
                return Err(MapError::MissingFlag {
                    flag: param.name.clone(),
                })
            }
        }
    }
    Ok(Args {
        positional: Vec::new(),
        flags,
    })
}

fn kind_mismatch(param: &ParamSpec, mapper: &'static str) -> MapError {
    MapError::KindMismatch {
        flag: param.name.clone(),
        kind: param.kind.name(),
        mapper,
    }
}

/// Parse a raw value according to the parameter's declared kind.
fn parse_value(param: &ParamSpec, raw: &str) -> Result<ArgValue, MapError> {
    match param.kind {
        ParamKind::Bool => match parse_bool(raw) {
            Some(b) => Ok(ArgValue::Bool(b)),
            None => Err(invalid_value(param, "a boolean", raw)),
        },
        ParamKind::Int => raw
            .parse::<i64>()
            .map(ArgValue::Int)
            .map_err(|_| invalid_value(param, "an integer", raw)),
        ParamKind::Float => raw
            .parse::<f64>()
            .map(ArgValue::Float)
            .map_err(|_| invalid_value(param, "a number", raw)),
        ParamKind::Str => Ok(ArgValue::Str(raw.to_string())),
    }
}

/// Strict boolean parse: affirmatives, negatives, nothing else.
fn parse_bool(raw: &str) -> Option<bool> {
    if is_truthy(raw) {
        Some(true)
    } else if matches!(raw.to_ascii_lowercase().as_str(), "n" | "no" | "false") {
        Some(false)
    } else {
        None
    }
}

fn invalid_value(param: &ParamSpec, expected: &'static str, raw: &str) -> MapError {
    MapError::InvalidValue {
        flag: param.name.clone(),
        expected,
        got: raw.to_string(),
    }
}
