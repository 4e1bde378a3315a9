//! Keyword-led forms: let, for, the struct/enum/trait/kind families and case

use super::super::lexer::tokens::*;
use super::ast::*;
use super::state::*;
use super::{Rule, SyntaxError};
use tracing::trace;

impl<'a> ParserState<'a> {
    /// Parse `'let' IDENT anno? '=' term | 'let' IDENT`
    pub(crate) fn parse_let(&mut self, restrictions: Restrictions) -> Result<LetForm, SyntaxError> {
        self.expect(TokenKind::KwLet, Rule::Let)?;
        let id = Ident::new(self.expect_ident(Rule::Let)?);

        if !self.at(TokenKind::Colon) && !self.at(TokenKind::Eq) {
            return Ok(LetForm::Uninitialized { id });
        }

        let anno = if self.at(TokenKind::Colon) {
            Some(self.parse_anno(Restrictions::NO_ASSIGN)?)
        } else {
            None
        };
        self.expect(TokenKind::Eq, Rule::Let)?;
        let value = self.parse_term_with(restrictions)?;
        Ok(LetForm::Initialized {
            id,
            anno,
            value: Box::new(value),
        })
    }

    /// Parse one of the three `for` forms
    pub(crate) fn parse_for(&mut self) -> Result<ForForm, SyntaxError> {
        self.expect(TokenKind::KwFor, Rule::For)?;

        if self.at(TokenKind::Ident) && self.nth_kind(1) == TokenKind::KwIn {
            let id = Ident::new(self.expect_ident(Rule::For)?);
            self.bump();
            let iter = self.parse_loop_head()?;
            let body = self.parse_blocked(Rule::For)?;
            return Ok(ForForm::ForEach {
                id,
                iter: Box::new(iter),
                body,
            });
        }

        if self.at(TokenKind::LBrace) {
            let body = self.parse_blocked(Rule::For)?;
            return Ok(ForForm::Loop { body });
        }

        let cond = self.parse_loop_head()?;
        let body = self.parse_blocked(Rule::For)?;
        Ok(ForForm::While {
            cond: Box::new(cond),
            body,
        })
    }

    /// Parse the term between `for` (or `in`) and the loop body.
    ///
    /// The term may swallow the body as a trailing named applier. When no
    /// `{` is left afterwards, that applier is handed back as the body.
    fn parse_loop_head(&mut self) -> Result<Term, SyntaxError> {
        let start = self.checkpoint();
        let term = self.parse_term()?;
        if self.at(TokenKind::LBrace) {
            return Ok(term);
        }

        let body_open = self
            .position()
            .checked_sub(1)
            .and_then(|close| self.matching_open(close));
        match (term, body_open) {
            (Term::NamedApply { target, .. }, Some(open)) => {
                trace!("loop body reclaimed from named applier at token {}", open);
                self.seek(open);
                Ok(*target)
            }
            _ => {
                self.restore(start);
                self.parse_term_with(Restrictions::NO_NAMED_APPLIER)
            }
        }
    }

    /// Parse `structof`, `enumof`, `traitof` or `kindof`: `IDENT? '{' param* '}'`
    pub(crate) fn parse_param_decl(&mut self) -> Result<Term, SyntaxError> {
        let rule = match self.kind() {
            TokenKind::KwStructOf => Rule::StructOf,
            TokenKind::KwEnumOf => Rule::EnumOf,
            TokenKind::KwTraitOf => Rule::TraitOf,
            TokenKind::KwKindOf => Rule::KindOf,
            _ => {
                return Err(self.unexpected(
                    Rule::Term,
                    [
                        TokenKind::KwStructOf,
                        TokenKind::KwEnumOf,
                        TokenKind::KwTraitOf,
                        TokenKind::KwKindOf,
                    ],
                ))
            }
        };
        self.bump();
        let name = self.parse_decl_name(rule)?;
        let params = self.parse_params_until(TokenKind::RBrace, rule)?;

        Ok(match rule {
            Rule::StructOf => Term::StructOf { name, params },
            Rule::EnumOf => Term::EnumOf { name, params },
            Rule::TraitOf => Term::TraitOf { name, params },
            _ => Term::KindOf { name, params },
        })
    }

    /// Parse `struct`, `enum` or `kind`: `IDENT? '{' kwArg* '}'`
    pub(crate) fn parse_field_decl(&mut self) -> Result<Term, SyntaxError> {
        let rule = match self.kind() {
            TokenKind::KwStruct => Rule::Struct,
            TokenKind::KwEnum => Rule::Enum,
            TokenKind::KwKind => Rule::Kind,
            _ => {
                return Err(self.unexpected(
                    Rule::Term,
                    [TokenKind::KwStruct, TokenKind::KwEnum, TokenKind::KwKind],
                ))
            }
        };
        self.bump();
        let name = self.parse_decl_name(rule)?;
        let fields = self.parse_kwargs_until(TokenKind::RBrace, rule)?;

        Ok(match rule {
            Rule::Struct => Term::Struct { name, fields },
            Rule::Enum => Term::Enum { name, fields },
            _ => Term::Kind { name, fields },
        })
    }

    /// Parse `'trait' IDENT? '{' let* '}'`
    pub(crate) fn parse_trait(&mut self) -> Result<Term, SyntaxError> {
        self.expect(TokenKind::KwTrait, Rule::Trait)?;
        let name = self.parse_decl_name(Rule::Trait)?;

        let mut lets = Vec::new();
        loop {
            match self.kind() {
                TokenKind::RBrace => {
                    self.bump();
                    return Ok(Term::Trait { name, lets });
                }
                TokenKind::KwLet => {
                    self.descend()?;
                    lets.push(self.parse_let(Restrictions::NONE)?);
                    self.ascend();
                }
                _ => {
                    return Err(
                        self.unexpected(Rule::Trait, [TokenKind::KwLet, TokenKind::RBrace])
                    )
                }
            }
        }
    }

    /// Optional declaration name, then the opening `{`
    fn parse_decl_name(&mut self, rule: Rule) -> Result<Option<Ident>, SyntaxError> {
        let name = match self.current() {
            Some(token) if token.kind == TokenKind::Ident => {
                self.bump();
                Some(Ident::new(token.lexeme.as_str()))
            }
            _ => None,
        };
        if !self.skip(TokenKind::LBrace) {
            return Err(match name {
                Some(_) => self.unexpected(rule, [TokenKind::LBrace]),
                None => self.unexpected(rule, [TokenKind::Ident, TokenKind::LBrace]),
            });
        }
        Ok(name)
    }

    /// Parse `'case' '{' when* '}'`
    pub(crate) fn parse_case(&mut self) -> Result<Term, SyntaxError> {
        self.expect(TokenKind::KwCase, Rule::Case)?;
        self.expect(TokenKind::LBrace, Rule::Case)?;

        let mut branches = Vec::new();
        loop {
            match self.kind() {
                TokenKind::RBrace => {
                    self.bump();
                    return Ok(Term::Case(branches));
                }
                TokenKind::KwWhen => branches.push(self.parse_when()?),
                _ => {
                    return Err(
                        self.unexpected(Rule::Case, [TokenKind::KwWhen, TokenKind::RBrace])
                    )
                }
            }
        }
    }

    /// Parse `'when' term fatArrow`
    ///
    /// A guard such as `(a) -> b => c` first reads as a `fun`. When that
    /// leaves no `=>` for the branch, the guard is read again with `(..) -> b`
    /// as a funof so the `=>` starts the branch body.
    fn parse_when(&mut self) -> Result<When, SyntaxError> {
        self.expect(TokenKind::KwWhen, Rule::When)?;
        let start = self.checkpoint();
        let mut cond = self.parse_term()?;
        if !self.at(TokenKind::FatArrow) {
            trace!("when guard ending at token {} re-read preferring funof", self.position());
            self.restore(start);
            cond = self.parse_term_with(Restrictions::PREFER_FUNOF)?;
        }
        let body = self.parse_fat_arrow(Restrictions::NONE)?;
        Ok(When { cond, body })
    }
}
