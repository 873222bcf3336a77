//! Intermediate representation of the generated Go code.
//!
//! Only the handful of constructs a board template function needs are
//! modelled. Every identifier goes through [`Ident`], which is the single
//! place where names are checked for legality.

use std::fmt;

use log::warn;
use unicode_general_category::{get_general_category, GeneralCategory};

use crate::Error;

const GO_KEYWORDS: &[&str] = &[
    "break",
    "case",
    "chan",
    "const",
    "continue",
    "default",
    "defer",
    "else",
    "fallthrough",
    "for",
    "func",
    "go",
    "goto",
    "if",
    "import",
    "interface",
    "map",
    "package",
    "range",
    "return",
    "select",
    "struct",
    "switch",
    "type",
    "var",
];

/// Name used when sanitizing leaves nothing behind.
const FALLBACK_IDENT: &str = "untitled";

/// A legal Go identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ident(String);

impl Ident {
    /// Validates the given name, failing if it is not a legal identifier.
    pub fn new<S: Into<String>>(name: S) -> Result<Self, Error> {
        let name = name.into();
        if is_legal(&name) {
            Ok(Self(name))
        } else {
            Err(Error::InvalidIdentifier(name))
        }
    }

    /// Turns arbitrary text into a legal identifier by dropping the
    /// characters that cannot appear in one.
    pub fn sanitize(raw: &str) -> Self {
        let mut name = raw
            .chars()
            .filter(|&c| is_ident_char(c))
            .collect::<String>();
        if name.chars().next().map_or(false, is_digit) {
            name.insert(0, '_');
        }
        if name.is_empty() {
            name = FALLBACK_IDENT.to_string();
        }
        if GO_KEYWORDS.contains(&name.as_str()) {
            name.push('_');
        }
        if name != raw {
            warn!("\"{}\" is not a legal identifier, using \"{}\"", raw, name);
        }
        Self(name)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Go letters are the Lu, Ll, Lt, Lm and Lo categories plus `_`. Digits are
// Nd only, so marks and other numerics (`½`, `²`, `Ⅻ`) are rejected.
fn is_letter(c: char) -> bool {
    c == '_'
        || matches!(
            get_general_category(c),
            GeneralCategory::UppercaseLetter
                | GeneralCategory::LowercaseLetter
                | GeneralCategory::TitlecaseLetter
                | GeneralCategory::ModifierLetter
                | GeneralCategory::OtherLetter
        )
}

fn is_digit(c: char) -> bool {
    get_general_category(c) == GeneralCategory::DecimalNumber
}

pub(crate) fn is_ident_char(c: char) -> bool {
    is_letter(c) || is_digit(c)
}

fn is_legal(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if is_letter(first) => {}
        _ => return false,
    }
    chars.all(is_ident_char) && !GO_KEYWORDS.contains(&name)
}

/// A named field inside a struct literal.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: &'static str,
    pub value: Expr,
}

impl Field {
    pub fn new(name: &'static str, value: Expr) -> Self {
        Self { name, value }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A string literal.
    Str(String),
    Int(u64),
    Bool(bool),
    /// A qualified constant, emitted verbatim (e.g. `api.AggregateOp_COUNT`).
    Symbol(String),
    /// A local variable declared earlier in the function.
    Local(Ident),
    Call(&'static str, Vec<Expr>),
    AddrOf(Box<Expr>),
    /// A struct literal. The type is left out inside slice literals, where
    /// Go infers it.
    Struct(Option<&'static str>, Vec<Field>),
    /// A slice literal of the given element type.
    List(&'static str, Vec<Expr>),
}

impl Expr {
    pub fn str<S: Into<String>>(s: S) -> Self {
        Self::Str(s.into())
    }

    pub fn symbol<S: Into<String>>(s: S) -> Self {
        Self::Symbol(s.into())
    }

    pub fn addr_of(inner: Expr) -> Self {
        Self::AddrOf(Box::new(inner))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// `name := value`
    Define(Ident, Expr),
    Return(Expr),
    /// An empty line, for readability.
    Blank,
}

/// A function without parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub name: Ident,
    pub result: &'static str,
    pub body: Vec<Stmt>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn accepts_legal_identifiers() {
        for name in ["qs1", "queryTemplates", "_private", "Column_ServiceName", "größe"] {
            assert_eq!(Ident::new(name).unwrap().as_str(), name);
        }
    }

    #[test]
    fn rejects_illegal_identifiers() {
        for name in [
            "", "1st", "has space", "dash-ed", "func", "a.b", "board½", "levelⅫ", "x²", "e\u{301}",
        ] {
            assert!(
                matches!(Ident::new(name), Err(Error::InvalidIdentifier(_))),
                "{:?} should be rejected",
                name
            );
        }
    }

    #[test]
    fn sanitize_drops_illegal_characters() {
        assert_eq!(Ident::sanitize("serviceHealth").as_str(), "serviceHealth");
        assert_eq!(Ident::sanitize("api-latency (p99)").as_str(), "apilatencyp99");
        assert_eq!(Ident::sanitize("2024Review").as_str(), "_2024Review");
        assert_eq!(Ident::sanitize("!!!").as_str(), "untitled");
        assert_eq!(Ident::sanitize("type").as_str(), "type_");
        assert_eq!(Ident::sanitize("Board ½").as_str(), "Board");
        assert_eq!(Ident::sanitize("Level Ⅻ").as_str(), "Level");
        assert_eq!(Ident::sanitize("x²").as_str(), "x");
        assert_eq!(Ident::sanitize("٣rd").as_str(), "_٣rd");
    }

    #[test]
    fn sanitized_identifiers_are_legal() {
        for raw in [
            "", " ", "a b c", "9", "héllo wörld", "x.y/z", "go", "Board ½", "Level Ⅻ", "x²", "½",
            "e\u{301}t\u{e9}", "ǅemal",
        ] {
            let ident = Ident::sanitize(raw);
            assert!(Ident::new(ident.as_str()).is_ok(), "{:?} -> {:?}", raw, ident);
        }
    }
}
