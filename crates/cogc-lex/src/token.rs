//! Token vocabulary shared by the lexer and parser.

use cogc_util::Position;
use std::fmt;

/// The kind of a single token. Two-character operators (`:=`, `==`, ...)
/// are their own variants; the lexer is responsible for recognising the
/// second byte, the parser never sees `:` followed by `=` as two tokens.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Delimiters
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    Dot,
    Colon,
    Semicolon,
    Question,
    Tilde,
    Pipe,

    // Operators
    Plus,
    Minus,
    Asterisk,
    Slash,
    Not,
    NotEqual,
    Assign,
    Equal,
    Gt,
    GtEqual,
    Lt,
    LtEqual,
    Declaration, // :=
    And,         // &&
    Or,          // ||

    // Literals
    Identifier,
    Bool,
    StringLiteral,
    IntLiteral,
    FloatLiteral,

    // Basic type keywords
    Ascii,
    Utf8,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Uint128,
    Int8,
    Int16,
    Int32,
    Int64,
    Int128,
    Float16,
    Float32,
    Float64,
    Complex32,
    Complex64,
    Complex128,
    ContextKw,

    // Boolean keywords
    True,
    False,

    // Control-flow keywords
    If,
    Else,
    Switch,
    Case,
    Default,
    Return,
    Break,

    // Callable keywords
    Function,  // func
    Procedure, // proc
    Builtin,   // @name

    // Declarative keywords
    Struct,
    Enum,
    Map,
    Set,
    Tuple,
    Union,

    // Import/module keywords
    Package,
    Export,
    GoImport,

    // Qualifiers
    Var,
    Dyn,

    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::Comma => ",",
            TokenKind::Dot => ".",
            TokenKind::Colon => ":",
            TokenKind::Semicolon => ";",
            TokenKind::Question => "?",
            TokenKind::Tilde => "~",
            TokenKind::Pipe => "|",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Asterisk => "*",
            TokenKind::Slash => "/",
            TokenKind::Not => "!",
            TokenKind::NotEqual => "!=",
            TokenKind::Assign => "=",
            TokenKind::Equal => "==",
            TokenKind::Gt => ">",
            TokenKind::GtEqual => ">=",
            TokenKind::Lt => "<",
            TokenKind::LtEqual => "<=",
            TokenKind::Declaration => ":=",
            TokenKind::And => "&&",
            TokenKind::Or => "||",
            TokenKind::Identifier => "identifier",
            TokenKind::Bool => "bool",
            TokenKind::StringLiteral => "string_literal",
            TokenKind::IntLiteral => "int_literal",
            TokenKind::FloatLiteral => "float_literal",
            TokenKind::Ascii => "ascii",
            TokenKind::Utf8 => "utf8",
            TokenKind::Uint8 => "uint8",
            TokenKind::Uint16 => "uint16",
            TokenKind::Uint32 => "uint32",
            TokenKind::Uint64 => "uint64",
            TokenKind::Uint128 => "uint128",
            TokenKind::Int8 => "int8",
            TokenKind::Int16 => "int16",
            TokenKind::Int32 => "int32",
            TokenKind::Int64 => "int64",
            TokenKind::Int128 => "int128",
            TokenKind::Float16 => "float16",
            TokenKind::Float32 => "float32",
            TokenKind::Float64 => "float64",
            TokenKind::Complex32 => "complex32",
            TokenKind::Complex64 => "complex64",
            TokenKind::Complex128 => "complex128",
            TokenKind::ContextKw => "context",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::Switch => "switch",
            TokenKind::Case => "case",
            TokenKind::Default => "default",
            TokenKind::Return => "return",
            TokenKind::Break => "break",
            TokenKind::Function => "func",
            TokenKind::Procedure => "proc",
            TokenKind::Builtin => "@",
            TokenKind::Struct => "struct",
            TokenKind::Enum => "enum",
            TokenKind::Map => "map",
            TokenKind::Set => "set",
            TokenKind::Tuple => "tuple",
            TokenKind::Union => "union",
            TokenKind::Package => "package",
            TokenKind::Export => "export",
            TokenKind::GoImport => "goimport",
            TokenKind::Var => "var",
            TokenKind::Dyn => "dyn",
            TokenKind::Eof => "EOF",
        };
        write!(f, "{text}")
    }
}

/// A single lexed token: its kind, its literal text (if any), and its
/// source position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
    pub position: Position,
}

impl Token {
    pub fn new(kind: TokenKind, literal: impl Into<String>, position: Position) -> Self {
        Self {
            kind,
            literal: literal.into(),
            position,
        }
    }

    pub fn bare(kind: TokenKind, position: Position) -> Self {
        Self::new(kind, "", position)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.literal.is_empty() {
            write!(f, "{}: {}", self.position, self.kind)
        } else if self.kind == TokenKind::Builtin {
            write!(f, "{}: @{}", self.position, self.literal)
        } else {
            write!(f, "{}: {}: {}", self.position, self.kind, self.literal)
        }
    }
}

/// Looks up the keyword a bare identifier spelling names, if any.
pub fn keyword(text: &str) -> Option<TokenKind> {
    use TokenKind::*;
    Some(match text {
        "bool" => Bool,
        "ascii" => Ascii,
        "utf8" => Utf8,
        "uint8" => Uint8,
        "uint16" => Uint16,
        "uint32" => Uint32,
        "uint64" => Uint64,
        "uint128" => Uint128,
        "int8" => Int8,
        "int16" => Int16,
        "int32" => Int32,
        "int64" => Int64,
        "int128" => Int128,
        "float16" => Float16,
        "float32" => Float32,
        "float64" => Float64,
        "complex32" => Complex32,
        "complex64" => Complex64,
        "complex128" => Complex128,
        "context" => ContextKw,
        "true" => True,
        "false" => False,
        "if" => If,
        "else" => Else,
        "switch" => Switch,
        "case" => Case,
        "default" => Default,
        "return" => Return,
        "break" => Break,
        "func" => Function,
        "proc" => Procedure,
        "struct" => Struct,
        "enum" => Enum,
        "map" => Map,
        "set" => Set,
        "tuple" => Tuple,
        "union" => Union,
        "package" => Package,
        "export" => Export,
        "goimport" => GoImport,
        "var" => Var,
        "dyn" => Dyn,
        _ => return None,
    })
}
