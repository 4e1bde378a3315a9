//! Head terms: literals, blocks, generics, derefs and the `(`-led function forms

use super::super::lexer::tokens::*;
use super::ast::*;
use super::state::*;
use super::{Rule, SyntaxError};
use tracing::trace;

impl<'a> ParserState<'a> {
    /// Parse a full term: a head followed by its postfix chain
    pub fn parse_term(&mut self) -> Result<Term, SyntaxError> {
        self.parse_term_with(Restrictions::NONE)
    }

    /// Parse a term whose top-level postfix chain obeys `restrictions`
    pub fn parse_term_with(&mut self, restrictions: Restrictions) -> Result<Term, SyntaxError> {
        self.descend()?;
        let head = self.parse_head(restrictions)?;
        let term = self.parse_postfix_chain(head, restrictions)?;
        self.ascend();
        Ok(term)
    }

    fn parse_head(&mut self, restrictions: Restrictions) -> Result<Term, SyntaxError> {
        match self.kind() {
            TokenKind::KwBlock => {
                self.bump();
                Ok(Term::Block(self.parse_blocked(Rule::Block)?))
            }
            TokenKind::LBracket => self.parse_generic(restrictions),
            TokenKind::KwLet => self.parse_let(restrictions).map(Term::Let),
            TokenKind::KwFor => self.parse_for().map(Term::For),
            TokenKind::KwStructOf
            | TokenKind::KwEnumOf
            | TokenKind::KwTraitOf
            | TokenKind::KwKindOf => self.parse_param_decl(),
            TokenKind::KwStruct | TokenKind::KwEnum | TokenKind::KwKind => self.parse_field_decl(),
            TokenKind::KwTrait => self.parse_trait(),
            TokenKind::LParen => self.parse_function(restrictions),
            TokenKind::KwCase => self.parse_case(),
            TokenKind::Star | TokenKind::StarStar => self.parse_deref(restrictions),
            kind if kind.is_literal() => self.parse_literal(),
            _ => Err(self.unexpected(Rule::Term, TERM_START)),
        }
    }

    fn parse_literal(&mut self) -> Result<Term, SyntaxError> {
        let token = match self.current() {
            Some(token) => token,
            None => return Err(self.unexpected(Rule::Term, TERM_START)),
        };
        let term = match (token.kind, &token.literal) {
            (TokenKind::Ident, _) => Term::ident(token.lexeme.as_str()),
            (TokenKind::Bool, Some(Literal::Bool(b))) => Term::Bool(*b),
            (TokenKind::Integer, Some(Literal::Int(n))) => Term::Integer(*n),
            (TokenKind::Decimal, Some(Literal::Float(x))) => Term::Decimal(*x),
            (TokenKind::String, Some(Literal::String(s))) => Term::String(s.clone()),
            (TokenKind::Char, Some(Literal::Char(c))) => Term::Char(*c),
            // A literal token that carries no decoded value cannot come
            // from the tokenizer
            _ => return Err(self.unexpected(Rule::Term, TERM_START)),
        };
        self.bump();
        Ok(term)
    }

    /// Parse `'{' term* '}'`
    pub(crate) fn parse_blocked(&mut self, rule: Rule) -> Result<Vec<Term>, SyntaxError> {
        self.expect(TokenKind::LBrace, rule)?;
        let mut terms = Vec::new();
        loop {
            if self.skip(TokenKind::RBrace) {
                return Ok(terms);
            }
            if !self.can_start_term() {
                return Err(self.unexpected(Rule::Blocked, term_start_or(&[TokenKind::RBrace])));
            }
            terms.push(self.parse_term()?);
        }
    }

    /// Parse `'=>' (blocked | term)`
    pub(crate) fn parse_fat_arrow(
        &mut self,
        restrictions: Restrictions,
    ) -> Result<FatArrow, SyntaxError> {
        self.expect(TokenKind::FatArrow, Rule::FatArrow)?;
        if self.at(TokenKind::LBrace) {
            Ok(FatArrow::Blocked(self.parse_blocked(Rule::FatArrow)?))
        } else {
            Ok(FatArrow::Single(Box::new(self.parse_term_with(restrictions)?)))
        }
    }

    fn parse_deref(&mut self, restrictions: Restrictions) -> Result<Term, SyntaxError> {
        let kind = if self.at(TokenKind::StarStar) {
            DerefKind::Dict
        } else {
            DerefKind::Tuple
        };
        self.bump();
        let operand = self.parse_term_with(restrictions)?;
        Ok(Term::Deref(kind, Box::new(operand)))
    }

    /// Parse `'[' param* ']' fatArrow`
    fn parse_generic(&mut self, restrictions: Restrictions) -> Result<Term, SyntaxError> {
        self.expect(TokenKind::LBracket, Rule::Generic)?;
        let params = self.parse_params_until(TokenKind::RBracket, Rule::Generic)?;
        let body = self.parse_fat_arrow(restrictions)?;
        Ok(Term::Generic { params, body })
    }

    /// Parse `param*` followed by `close`
    pub(crate) fn parse_params_until(
        &mut self,
        close: TokenKind,
        rule: Rule,
    ) -> Result<Vec<Param>, SyntaxError> {
        let mut params = Vec::new();
        loop {
            if self.skip(close) {
                return Ok(params);
            }
            if !self.at(TokenKind::Ident) {
                return Err(self.unexpected(rule, [TokenKind::Ident, close]));
            }
            params.push(self.parse_param()?);
        }
    }

    /// Parse `'(' term* ')'`, the parameter types of a `funof`
    fn parse_type_list(&mut self) -> Result<Vec<Term>, SyntaxError> {
        self.expect(TokenKind::LParen, Rule::FunOf)?;
        let mut types = Vec::new();
        loop {
            if self.skip(TokenKind::RParen) {
                return Ok(types);
            }
            if !self.can_start_term() {
                return Err(self.unexpected(Rule::FunOf, term_start_or(&[TokenKind::RParen])));
            }
            types.push(self.parse_term()?);
        }
    }

    /// Parse a `fun` or a `funof`.
    ///
    /// Both start with a parenthesised list, so the token after the matching
    /// `)` decides: `=>` is a `fun` without a return type, `->` is followed by
    /// a return term and then either `=>` (a `fun`) or anything else (a
    /// `funof`). The return term is parsed once and reused.
    fn parse_function(&mut self, restrictions: Restrictions) -> Result<Term, SyntaxError> {
        let open = self.checkpoint();
        let close = match self.matching_close() {
            Some(close) => close,
            None => {
                // Unbalanced: let the list parser report where it breaks
                self.parse_type_list()?;
                return Err(self.unexpected(Rule::FunOf, [TokenKind::Arrow]));
            }
        };

        match self.kind_at(close + 1) {
            TokenKind::FatArrow => {
                self.bump();
                let params = self.parse_params_until(TokenKind::RParen, Rule::Fun)?;
                let body = self.parse_fat_arrow(restrictions)?;
                Ok(Term::Fun {
                    params,
                    ret: None,
                    body,
                })
            }
            TokenKind::Arrow => {
                self.seek(close + 2);
                let ret = Box::new(self.parse_term_with(restrictions)?);
                let after_ret = self.checkpoint();
                let is_fun = !restrictions.prefer_funof && self.at(TokenKind::FatArrow);
                trace!(
                    "parenthesised list closing at token {} is a {}",
                    close,
                    if is_fun { "fun" } else { "funof" }
                );
                self.restore(open);

                if is_fun {
                    self.bump();
                    let params = self.parse_params_until(TokenKind::RParen, Rule::Fun)?;
                    self.expect(TokenKind::Arrow, Rule::Fun)?;
                    self.restore(after_ret);
                    let body = self.parse_fat_arrow(restrictions)?;
                    Ok(Term::Fun {
                        params,
                        ret: Some(ret),
                        body,
                    })
                } else {
                    let params = self.parse_type_list()?;
                    self.expect(TokenKind::Arrow, Rule::FunOf)?;
                    self.restore(after_ret);
                    Ok(Term::FunOf { params, ret })
                }
            }
            _ => {
                self.parse_type_list()?;
                Err(self.unexpected(Rule::FunOf, [TokenKind::Arrow, TokenKind::FatArrow]))
            }
        }
    }
}
