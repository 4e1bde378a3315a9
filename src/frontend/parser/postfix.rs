//! Postfix chain: selectors, appliers and assignment folded onto a head

use super::super::lexer::tokens::*;
use super::ast::*;
use super::state::*;
use super::{Rule, SyntaxError};
use tracing::trace;

impl<'a> ParserState<'a> {
    /// Fold postfix operations onto `head`, left to right, until the next
    /// token starts none of them.
    ///
    /// Every folded link nests the tree one level deeper, so each one counts
    /// against the nesting limit until the chain ends.
    pub(crate) fn parse_postfix_chain(
        &mut self,
        head: Term,
        restrictions: Restrictions,
    ) -> Result<Term, SyntaxError> {
        let mut term = head;
        let mut links = 0;
        loop {
            let continues = match self.kind() {
                TokenKind::Dot | TokenKind::LBracket | TokenKind::LParen => true,
                TokenKind::LBrace => !restrictions.no_named_applier,
                TokenKind::Eq => !restrictions.no_assign,
                _ => false,
            };
            if !continues {
                break;
            }
            self.descend()?;
            links += 1;

            term = match self.kind() {
                TokenKind::Dot => {
                    self.bump();
                    let name = Ident::new(self.expect_ident(Rule::Selector)?);
                    Term::Select {
                        target: Box::new(term),
                        name,
                    }
                }
                TokenKind::LBracket => {
                    self.bump();
                    let args = self.parse_args_until(TokenKind::RBracket, Rule::ImplicitApplier)?;
                    Term::ImplicitApply {
                        target: Box::new(term),
                        args,
                    }
                }
                TokenKind::LParen => {
                    self.bump();
                    let args =
                        self.parse_args_until(TokenKind::RParen, Rule::PositionalApplier)?;
                    Term::PositionalApply {
                        target: Box::new(term),
                        args,
                    }
                }
                TokenKind::LBrace => match self.speculate(Self::parse_named_applier)? {
                    Some(args) => Term::NamedApply {
                        target: Box::new(term),
                        args,
                    },
                    None => {
                        trace!("'{{' at token {} left to the enclosing rule", self.position());
                        self.ascend();
                        links -= 1;
                        break;
                    }
                },
                TokenKind::Eq => {
                    self.bump();
                    let value = self.parse_term_with(restrictions)?;
                    Term::Assign {
                        target: Box::new(term),
                        value: Box::new(value),
                    }
                }
                _ => {
                    self.ascend();
                    links -= 1;
                    break;
                }
            };
        }
        for _ in 0..links {
            self.ascend();
        }
        Ok(term)
    }

    /// Parse `'{' kwArg* '}'`
    fn parse_named_applier(&mut self) -> Result<Vec<KwArg>, SyntaxError> {
        self.expect(TokenKind::LBrace, Rule::NamedApplier)?;
        self.parse_kwargs_until(TokenKind::RBrace, Rule::NamedApplier)
    }
}
