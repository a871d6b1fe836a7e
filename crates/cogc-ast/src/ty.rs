//! The type-kind lattice.
//!
//! `Ty` is intentionally independent of the statement/expression AST
//! (it has no notion of "node"): it exists to answer "what basic kind
//! does this expression reduce to" during parsing, and "what TL
//! construct does this lower to" during transpilation.

use crate::expr::Expr;
use cogc_util::Symbol;

/// A basic, unstructured value kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Basic {
    Ascii,
    Bool,
    Utf8,
    Int8,
    Int16,
    Int32,
    Int64,
    Int128,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Uint128,
    Float16,
    Float32,
    Float64,
    Complex32,
    Complex64,
    Complex128,
    /// "type is not yet known" — the placeholder global-discovery gives
    /// a symbol before its initialiser has been parsed.
    None,
    /// The dynamically-scoped-variable carrier type; never user-written.
    Context,
}

impl Basic {
    pub fn is_integer(self) -> bool {
        matches!(
            self,
            Basic::Int8
                | Basic::Int16
                | Basic::Int32
                | Basic::Int64
                | Basic::Int128
                | Basic::Uint8
                | Basic::Uint16
                | Basic::Uint32
                | Basic::Uint64
                | Basic::Uint128
        )
    }

    pub fn is_float(self) -> bool {
        matches!(self, Basic::Float16 | Basic::Float32 | Basic::Float64)
    }

    pub fn is_numeric(self) -> bool {
        self.is_integer() || self.is_float()
    }

    pub fn is_string(self) -> bool {
        matches!(self, Basic::Ascii | Basic::Utf8)
    }

    /// Integer width widening order, narrowest first. Used by literal
    /// equalisation to decide which side of a mismatched infix
    /// expression is the "reference" (wider) side.
    pub fn integer_rank(self) -> Option<u8> {
        Some(match self {
            Basic::Int8 => 0,
            Basic::Int16 => 1,
            Basic::Int32 => 2,
            Basic::Int64 => 3,
            Basic::Int128 => 4,
            Basic::Uint8 => 0,
            Basic::Uint16 => 1,
            Basic::Uint32 => 2,
            Basic::Uint64 => 3,
            Basic::Uint128 => 4,
            _ => return None,
        })
    }

    pub fn is_signed(self) -> bool {
        matches!(
            self,
            Basic::Int8 | Basic::Int16 | Basic::Int32 | Basic::Int64 | Basic::Int128
        )
    }

    pub fn float_rank(self) -> Option<u8> {
        Some(match self {
            Basic::Float16 => 0,
            Basic::Float32 => 1,
            Basic::Float64 => 2,
            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            Basic::Ascii => "ascii",
            Basic::Bool => "bool",
            Basic::Utf8 => "utf8",
            Basic::Int8 => "int8",
            Basic::Int16 => "int16",
            Basic::Int32 => "int32",
            Basic::Int64 => "int64",
            Basic::Int128 => "int128",
            Basic::Uint8 => "uint8",
            Basic::Uint16 => "uint16",
            Basic::Uint32 => "uint32",
            Basic::Uint64 => "uint64",
            Basic::Uint128 => "uint128",
            Basic::Float16 => "float16",
            Basic::Float32 => "float32",
            Basic::Float64 => "float64",
            Basic::Complex32 => "complex32",
            Basic::Complex64 => "complex64",
            Basic::Complex128 => "complex128",
            Basic::None => "<none>",
            Basic::Context => "context",
        }
    }
}

/// A struct field: name, type, and whether it is capitalised on export.
#[derive(Clone, Debug)]
pub struct Field {
    pub name: Symbol,
    pub ty: Ty,
    pub exported: bool,
}

/// A procedure/function parameter.
#[derive(Clone, Debug)]
pub struct Param {
    pub name: Symbol,
    pub ty: Ty,
    pub optional: bool,
    pub default: Option<Expr>,
}

/// A procedure or function signature.
#[derive(Clone, Debug)]
pub struct ProcSig {
    pub params: Vec<Param>,
    pub return_ty: Option<Box<Ty>>,
    /// `func` forbids a leading `ctx` parameter and mandates a return;
    /// `proc` allows both side effects and an absent return.
    pub is_function: bool,
}

/// An enum's `(variant name, constant expression)` entry.
#[derive(Clone, Debug)]
pub struct EnumVariant {
    pub name: Symbol,
    pub value: Expr,
}

/// A named constraint set for a reserved-for-future generic type
/// parameter, e.g. `int` ranging over `{int8..int128}`.
#[derive(Clone, Debug)]
pub struct GenericConstraint {
    pub name: Symbol,
    pub members: Vec<Basic>,
}

/// The full type-kind lattice.
#[derive(Clone, Debug)]
pub enum Ty {
    Basic(Basic),
    /// A named reference to another type. `underlying()` chases the
    /// alias chain; the alias name is kept so the emitter can still
    /// print it.
    Alias(Symbol, Box<Ty>),
    /// Wraps exactly one value type. Nesting is rejected at construction.
    Option(Box<Ty>),
    Array(Box<Ty>, Box<Expr>),
    Slice(Box<Ty>),
    Map(Box<Ty>, Box<Ty>),
    Set(Box<Ty>),
    Struct(Vec<Field>),
    /// 2..=8 ordered types; any other arity is a construction error.
    Tuple(Vec<Ty>),
    /// Exactly two arms, `either` and `or`.
    Union(Box<Ty>, Box<Ty>),
    Enum(Box<Ty>, Vec<EnumVariant>),
    Procedure(ProcSig),
    Generic(GenericConstraint),
}

impl Ty {
    pub const NONE: Ty = Ty::Basic(Basic::None);

    /// Chases alias references to the type they ultimately name.
    pub fn underlying(&self) -> &Ty {
        match self {
            Ty::Alias(_, inner) => inner.underlying(),
            other => other,
        }
    }

    pub fn is_option(&self) -> bool {
        matches!(self.underlying(), Ty::Option(_))
    }

    pub fn is_union(&self) -> bool {
        matches!(self.underlying(), Ty::Union(_, _))
    }

    pub fn as_basic(&self) -> Option<Basic> {
        match self.underlying() {
            Ty::Basic(b) => Some(*b),
            _ => None,
        }
    }
}
