//! Method selectors.
//!
//! Each pipeline stage that has interchangeable algorithms is configured by
//! a closed selector enum. Strings coming from a CLI flag or an override
//! file are parsed at the boundary with [`FromStr`]; an unknown value fails
//! with [`CompileError::UnsupportedMethod`] listing the accepted values.
//!
//! | Selector | Values |
//! |----------|--------|
//! | [`LayoutMethod`] | `trivial`, `dense`, `noise_adaptive`, `sabre` |
//! | [`RoutingMethod`] | `basic`, `lookahead`, `stochastic`, `sabre`, `none` |
//! | [`TranslationMethod`] | `unroller`, `translator`, `synthesis` |
//! | [`SchedulingMethod`] | `alap`, `asap` (aliases `as_late_as_possible`, `as_soon_as_possible`) |
//! | [`UnitarySynthesisMethod`] | `default` or any plugin name |

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{CompileError, CompileResult};

fn unsupported(selector: &'static str, value: &str, valid: &'static [&'static str]) -> CompileError {
    CompileError::UnsupportedMethod {
        selector,
        value: value.to_string(),
        valid,
    }
}

/// Initial placement algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutMethod {
    /// Virtual qubit `i` on physical qubit `i`.
    Trivial,
    /// Densest connected subgraph.
    Dense,
    /// Lowest-error qubits, using the device property table.
    NoiseAdaptive,
    /// Bidirectional SWAP-based search.
    Sabre,
}

impl LayoutMethod {
    /// Accepted spellings.
    pub const VALID: &'static [&'static str] = &["trivial", "dense", "noise_adaptive", "sabre"];

    /// Canonical spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Trivial => "trivial",
            Self::Dense => "dense",
            Self::NoiseAdaptive => "noise_adaptive",
            Self::Sabre => "sabre",
        }
    }
}

impl FromStr for LayoutMethod {
    type Err = CompileError;

    fn from_str(s: &str) -> CompileResult<Self> {
        match s {
            "trivial" => Ok(Self::Trivial),
            "dense" => Ok(Self::Dense),
            "noise_adaptive" => Ok(Self::NoiseAdaptive),
            "sabre" => Ok(Self::Sabre),
            other => Err(unsupported("layout_method", other, Self::VALID)),
        }
    }
}

/// SWAP insertion algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutingMethod {
    /// Shortest-path SWAP chains.
    Basic,
    /// Bounded look-ahead tree search.
    Lookahead,
    /// Randomized trials, best kept.
    Stochastic,
    /// Heuristic front-layer search.
    Sabre,
    /// No routing; the circuit must already fit the coupling map.
    None,
}

impl RoutingMethod {
    /// Accepted spellings.
    pub const VALID: &'static [&'static str] = &["basic", "lookahead", "stochastic", "sabre", "none"];

    /// Canonical spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Lookahead => "lookahead",
            Self::Stochastic => "stochastic",
            Self::Sabre => "sabre",
            Self::None => "none",
        }
    }
}

impl FromStr for RoutingMethod {
    type Err = CompileError;

    fn from_str(s: &str) -> CompileResult<Self> {
        match s {
            "basic" => Ok(Self::Basic),
            "lookahead" => Ok(Self::Lookahead),
            "stochastic" => Ok(Self::Stochastic),
            "sabre" => Ok(Self::Sabre),
            "none" => Ok(Self::None),
            other => Err(unsupported("routing_method", other, Self::VALID)),
        }
    }
}

/// Basis translation algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TranslationMethod {
    /// Recursive definition expansion.
    Unroller,
    /// Equivalence-library search.
    Translator,
    /// Block collection followed by unitary resynthesis.
    Synthesis,
}

impl TranslationMethod {
    /// Accepted spellings.
    pub const VALID: &'static [&'static str] = &["unroller", "translator", "synthesis"];

    /// Canonical spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unroller => "unroller",
            Self::Translator => "translator",
            Self::Synthesis => "synthesis",
        }
    }
}

impl FromStr for TranslationMethod {
    type Err = CompileError;

    fn from_str(s: &str) -> CompileResult<Self> {
        match s {
            "unroller" => Ok(Self::Unroller),
            "translator" => Ok(Self::Translator),
            "synthesis" => Ok(Self::Synthesis),
            other => Err(unsupported("translation_method", other, Self::VALID)),
        }
    }
}

/// Instruction scheduling policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SchedulingMethod {
    /// As late as possible.
    Alap,
    /// As soon as possible.
    Asap,
}

impl SchedulingMethod {
    /// Accepted spellings.
    pub const VALID: &'static [&'static str] =
        &["alap", "as_late_as_possible", "asap", "as_soon_as_possible"];

    /// Canonical spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Alap => "alap",
            Self::Asap => "asap",
        }
    }
}

impl FromStr for SchedulingMethod {
    type Err = CompileError;

    fn from_str(s: &str) -> CompileResult<Self> {
        match s {
            "alap" | "as_late_as_possible" => Ok(Self::Alap),
            "asap" | "as_soon_as_possible" => Ok(Self::Asap),
            other => Err(unsupported("scheduling_method", other, Self::VALID)),
        }
    }
}

/// Unitary synthesis back end.
///
/// Plugin names are open-ended, so any non-empty string other than
/// `default` selects a plugin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum UnitarySynthesisMethod {
    /// Built-in decomposer.
    #[default]
    Default,
    /// Named plugin.
    Plugin(String),
}

impl UnitarySynthesisMethod {
    /// Accepted spellings, besides plugin names.
    pub const VALID: &'static [&'static str] = &["default", "<plugin name>"];

    /// Canonical spelling.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Default => "default",
            Self::Plugin(name) => name,
        }
    }

    /// Whether this is the built-in decomposer.
    pub fn is_default(&self) -> bool {
        matches!(self, Self::Default)
    }
}

impl FromStr for UnitarySynthesisMethod {
    type Err = CompileError;

    fn from_str(s: &str) -> CompileResult<Self> {
        let name = s.trim();
        if name.is_empty() || name.chars().any(char::is_whitespace) {
            return Err(unsupported("unitary_synthesis_method", s, Self::VALID));
        }
        if name == "default" {
            Ok(Self::Default)
        } else {
            Ok(Self::Plugin(name.to_string()))
        }
    }
}

impl Serialize for UnitarySynthesisMethod {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

macro_rules! impl_display {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

impl_display!(
    LayoutMethod,
    RoutingMethod,
    TranslationMethod,
    SchedulingMethod,
    UnitarySynthesisMethod
);
