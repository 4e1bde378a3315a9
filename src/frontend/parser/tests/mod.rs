//! Parser tests module


use crate::frontend::lexer::tokenize;
use crate::frontend::parser::ast::*;
use crate::frontend::parser::{parse_program, parse_term, SyntaxError};

/// Parse a whole program, panicking on any error
pub(crate) fn program(source: &str) -> Program {
    let tokens = tokenize(source).unwrap();
    parse_program(&tokens).unwrap_or_else(|e| panic!("{:?} failed to parse: {}", source, e))
}

/// Parse a single term spanning the whole source
pub(crate) fn term(source: &str) -> Term {
    let tokens = tokenize(source).unwrap();
    parse_term(&tokens).unwrap_or_else(|e| panic!("{:?} failed to parse: {}", source, e))
}

/// Expect `source` to lex but fail to parse
pub(crate) fn syntax_error(source: &str) -> SyntaxError {
    let tokens = tokenize(source).unwrap();
    match parse_program(&tokens) {
        Ok(program) => panic!("{:?} parsed unexpectedly: {:?}", source, program),
        Err(e) => e,
    }
}

pub(crate) fn id(name: &str) -> Term {
    Term::ident(name)
}

pub(crate) fn int(n: i64) -> Term {
    Term::Integer(n)
}

pub(crate) fn boxed(term: Term) -> Box<Term> {
    Box::new(term)
}

pub(crate) fn param(name: &str) -> Param {
    Param {
        name: Ident::new(name),
        anno: None,
    }
}

pub(crate) fn typed_param(name: &str, anno: Anno) -> Param {
    Param {
        name: Ident::new(name),
        anno: Some(anno),
    }
}

pub(crate) fn pos(term: Term) -> Arg {
    Arg::Pos(term)
}

pub(crate) fn kw(name: &str, value: Term) -> KwArg {
    KwArg::WithRename {
        name: Ident::new(name),
        anno: None,
        value: Box::new(value),
    }
}

pub(crate) fn bare(name: &str) -> KwArg {
    KwArg::WithoutRename {
        name: Ident::new(name),
    }
}

pub(crate) fn call(target: Term, args: Vec<Arg>) -> Term {
    Term::PositionalApply {
        target: Box::new(target),
        args,
    }
}

pub(crate) fn select(target: Term, name: &str) -> Term {
    Term::Select {
        target: Box::new(target),
        name: Ident::new(name),
    }
}
