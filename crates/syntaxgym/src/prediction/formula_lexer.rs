//! # Formula Lexer

use logos::Logos;

/// Lexical tokens of a prediction formula.
///
/// | Source          | Token       |
/// |-----------------|-------------|
/// | `(3;%cond%)`    | `RegionRef` |
/// | `(*;%cond%)`    | `RegionRef` |
/// | `1.5`, `2e-3`   | `Number`    |
///
/// A region reference is lexed as a unit, so `(` alone is always grouping.
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
pub enum FormulaToken {
    /// A region reference; whitespace is allowed inside.
    #[regex(r"\([ \t]*([0-9]+|\*)[ \t]*;[ \t]*%[A-Za-z0-9_\-]+%[ \t]*\)")]
    RegionRef,

    /// An unsigned float literal.
    #[regex(r"[0-9]+(\.[0-9]*)?([eE][+\-]?[0-9]+)?|\.[0-9]+([eE][+\-]?[0-9]+)?")]
    Number,

    /// `+`
    #[token("+")]
    Plus,

    /// `-`
    #[token("-")]
    Minus,

    /// `<`
    #[token("<")]
    Less,

    /// `>`
    #[token(">")]
    Greater,

    /// `=`
    #[token("=")]
    Equal,

    /// `&`
    #[token("&")]
    And,

    /// `|`
    #[token("|")]
    Or,

    /// `(`
    #[token("(")]
    LParen,

    /// `)`
    #[token(")")]
    RParen,

    /// Whitespace; dropped by the parser.
    #[regex(r"[ \t\r\n]+")]
    Whitespace,
}
