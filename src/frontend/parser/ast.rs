//! Abstract Syntax Tree types
//!
//! Every node owns its children; nothing is shared and nothing is mutated
//! after the parser builds it. Source order of sequences is preserved.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ident(pub String);

impl Ident {
    #[inline]
    pub fn new(name: impl Into<String>) -> Self {
        Ident(name.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Ident {
    fn from(name: &str) -> Self {
        Ident(name.to_string())
    }
}

/// Type annotation: `:T`, `:*T` or `:**T`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Anno {
    Single(Box<Term>),
    List(Box<Term>),
    Dict(Box<Term>),
}

impl Anno {
    /// The annotated type term
    pub fn term(&self) -> &Term {
        match self {
            Anno::Single(t) | Anno::List(t) | Anno::Dict(t) => t,
        }
    }
}

/// Declaration-site parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Param {
    pub name: Ident,
    pub anno: Option<Anno>,
}

/// Named argument or field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum KwArg {
    /// `name anno? = value`
    WithRename {
        name: Ident,
        anno: Option<Anno>,
        value: Box<Term>,
    },
    /// `name`, shorthand for `name = name`
    WithoutRename { name: Ident },
}

impl KwArg {
    pub fn name(&self) -> &Ident {
        match self {
            KwArg::WithRename { name, .. } | KwArg::WithoutRename { name } => name,
        }
    }
}

/// Applier argument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Arg {
    Kw(KwArg),
    Pos(Term),
}

/// Body introduced by `=>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FatArrow {
    Blocked(Vec<Term>),
    Single(Box<Term>),
}

/// Guarded branch of a `case`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct When {
    pub cond: Term,
    pub body: FatArrow,
}

/// `let` binding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LetForm {
    Initialized {
        id: Ident,
        anno: Option<Anno>,
        value: Box<Term>,
    },
    Uninitialized { id: Ident },
}

impl LetForm {
    pub fn id(&self) -> &Ident {
        match self {
            LetForm::Initialized { id, .. } | LetForm::Uninitialized { id } => id,
        }
    }
}

/// `for` loop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ForForm {
    /// `for id in iter { body }`
    ForEach {
        id: Ident,
        iter: Box<Term>,
        body: Vec<Term>,
    },
    /// `for { body }`
    Loop { body: Vec<Term> },
    /// `for cond { body }`
    While { cond: Box<Term>, body: Vec<Term> },
}

/// Spread flavor of a deref
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DerefKind {
    /// `*term`
    Tuple,
    /// `**term`
    Dict,
}

/// Term
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Term {
    Block(Vec<Term>),
    Generic {
        params: Vec<Param>,
        body: FatArrow,
    },
    Let(LetForm),
    For(ForForm),
    StructOf {
        name: Option<Ident>,
        params: Vec<Param>,
    },
    Struct {
        name: Option<Ident>,
        fields: Vec<KwArg>,
    },
    EnumOf {
        name: Option<Ident>,
        params: Vec<Param>,
    },
    Enum {
        name: Option<Ident>,
        fields: Vec<KwArg>,
    },
    TraitOf {
        name: Option<Ident>,
        params: Vec<Param>,
    },
    Trait {
        name: Option<Ident>,
        lets: Vec<LetForm>,
    },
    FunOf {
        params: Vec<Term>,
        ret: Box<Term>,
    },
    Fun {
        params: Vec<Param>,
        ret: Option<Box<Term>>,
        body: FatArrow,
    },
    KindOf {
        name: Option<Ident>,
        params: Vec<Param>,
    },
    Kind {
        name: Option<Ident>,
        fields: Vec<KwArg>,
    },
    Case(Vec<When>),
    Deref(DerefKind, Box<Term>),
    Bool(bool),
    Ident(Ident),
    Integer(i64),
    Decimal(f64),
    String(String),
    Char(char),

    // Postfix chain, folded left to right onto the head
    /// `target.name`
    Select {
        target: Box<Term>,
        name: Ident,
    },
    /// `target[args]`
    ImplicitApply {
        target: Box<Term>,
        args: Vec<Arg>,
    },
    /// `target(args)`
    PositionalApply {
        target: Box<Term>,
        args: Vec<Arg>,
    },
    /// `target{kwargs}`
    NamedApply {
        target: Box<Term>,
        args: Vec<KwArg>,
    },
    /// `target = value`
    Assign {
        target: Box<Term>,
        value: Box<Term>,
    },
}

impl Term {
    /// Reference to an identifier
    pub fn ident(name: impl Into<String>) -> Term {
        Term::Ident(Ident(name.into()))
    }
}

/// Program: ordered top-level terms
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Program {
    pub terms: Vec<Term>,
}

impl Program {
    #[inline]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}
