//! Annotations, parameters and arguments

use super::super::lexer::tokens::*;
use super::ast::*;
use super::state::*;
use super::{Rule, SyntaxError};

impl<'a> ParserState<'a> {
    /// Parse `':' ('*' | '**')? term`
    pub(crate) fn parse_anno(&mut self, restrictions: Restrictions) -> Result<Anno, SyntaxError> {
        self.expect(TokenKind::Colon, Rule::Anno)?;
        match self.kind() {
            // `:*T` and `:**T` bind the spread to the annotation itself
            TokenKind::Star => {
                self.bump();
                Ok(Anno::List(Box::new(self.parse_term_with(restrictions)?)))
            }
            TokenKind::StarStar => {
                self.bump();
                Ok(Anno::Dict(Box::new(self.parse_term_with(restrictions)?)))
            }
            _ => Ok(Anno::Single(Box::new(self.parse_term_with(restrictions)?))),
        }
    }

    /// Parse `IDENT anno?`
    pub(crate) fn parse_param(&mut self) -> Result<Param, SyntaxError> {
        let name = Ident::new(self.expect_ident(Rule::Param)?);
        let anno = if self.at(TokenKind::Colon) {
            Some(self.parse_anno(Restrictions::NONE)?)
        } else {
            None
        };
        Ok(Param { name, anno })
    }

    /// Parse `IDENT anno? '=' term | IDENT`
    pub(crate) fn parse_kwarg(&mut self) -> Result<KwArg, SyntaxError> {
        match self.nth_kind(1) {
            TokenKind::Eq => self.parse_renamed_kwarg(),
            TokenKind::Colon => match self.try_annotated_kwarg()? {
                Some(kwarg) => Ok(kwarg),
                None => self.parse_bare_kwarg(),
            },
            _ => self.parse_bare_kwarg(),
        }
    }

    fn parse_bare_kwarg(&mut self) -> Result<KwArg, SyntaxError> {
        let name = Ident::new(self.expect_ident(Rule::KwArg)?);
        Ok(KwArg::WithoutRename { name })
    }

    /// `IDENT '=' term`
    fn parse_renamed_kwarg(&mut self) -> Result<KwArg, SyntaxError> {
        let name = Ident::new(self.expect_ident(Rule::KwArg)?);
        self.expect(TokenKind::Eq, Rule::KwArg)?;
        let value = self.parse_term()?;
        Ok(KwArg::WithRename {
            name,
            anno: None,
            value: Box::new(value),
        })
    }

    /// `IDENT anno '=' term`, or `None` with the cursor untouched when no
    /// `=` follows the annotation
    fn try_annotated_kwarg(&mut self) -> Result<Option<KwArg>, SyntaxError> {
        let prefix = self.speculate(|state| {
            let name = Ident::new(state.expect_ident(Rule::KwArg)?);
            let anno = state.parse_anno(Restrictions::NO_ASSIGN)?;
            state.expect(TokenKind::Eq, Rule::KwArg)?;
            Ok((name, anno))
        })?;
        match prefix {
            Some((name, anno)) => {
                let value = self.parse_term()?;
                Ok(Some(KwArg::WithRename {
                    name,
                    anno: Some(anno),
                    value: Box::new(value),
                }))
            }
            None => Ok(None),
        }
    }

    /// Parse `kwArg | term`.
    ///
    /// An identifier starts a kwArg only when it is followed by `=`, or by an
    /// annotation that is itself followed by `=`. Anything else is positional.
    pub(crate) fn parse_arg(&mut self) -> Result<Arg, SyntaxError> {
        if self.at(TokenKind::Ident) {
            match self.nth_kind(1) {
                TokenKind::Eq => return self.parse_renamed_kwarg().map(Arg::Kw),
                TokenKind::Colon => {
                    if let Some(kwarg) = self.try_annotated_kwarg()? {
                        return Ok(Arg::Kw(kwarg));
                    }
                }
                _ => {}
            }
        }
        Ok(Arg::Pos(self.parse_term()?))
    }

    /// Parse `arg*` followed by `close`
    pub(crate) fn parse_args_until(
        &mut self,
        close: TokenKind,
        rule: Rule,
    ) -> Result<Vec<Arg>, SyntaxError> {
        let mut args = Vec::new();
        loop {
            if self.skip(close) {
                return Ok(args);
            }
            if !self.can_start_term() {
                return Err(self.unexpected(rule, term_start_or(&[close])));
            }
            args.push(self.parse_arg()?);
        }
    }

    /// Parse `kwArg*` followed by `close`
    pub(crate) fn parse_kwargs_until(
        &mut self,
        close: TokenKind,
        rule: Rule,
    ) -> Result<Vec<KwArg>, SyntaxError> {
        let mut kwargs = Vec::new();
        loop {
            if self.skip(close) {
                return Ok(kwargs);
            }
            if !self.at(TokenKind::Ident) {
                return Err(self.unexpected(rule, [TokenKind::Ident, close]));
            }
            kwargs.push(self.parse_kwarg()?);
        }
    }
}
