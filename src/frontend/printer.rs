//! Source printer for the AST
//!
//! [`Display`](fmt::Display) renders a term on one line. [`print_program`]
//! lays out braced bodies one item per line. Both emit a token sequence the
//! parser maps back to the same tree; only literal spelling is normalized
//! (`0x1F` prints as `31`).

use crate::frontend::parser::ast::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Layout settings for [`print_program`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrettyConfig {
    /// Spaces per nesting level
    #[serde(default = "default_indent")]
    pub indent: usize,
}

fn default_indent() -> usize {
    4
}

impl Default for PrettyConfig {
    fn default() -> Self {
        Self {
            indent: default_indent(),
        }
    }
}

/// Render a program with one top-level term per line
pub fn print_program(program: &Program, config: &PrettyConfig) -> String {
    let mut printer = Printer::new(Layout::Pretty {
        indent: config.indent,
    });
    for term in &program.terms {
        printer.term(term);
        printer.out.push('\n');
    }
    printer.out
}

#[derive(Debug, Clone, Copy)]
enum Layout {
    Compact,
    Pretty { indent: usize },
}

struct Printer {
    out: String,
    layout: Layout,
    level: usize,
}

impl Printer {
    fn new(layout: Layout) -> Self {
        Self {
            out: String::new(),
            layout,
            level: 0,
        }
    }

    fn push(&mut self, text: &str) {
        self.out.push_str(text);
    }

    fn newline(&mut self) {
        if let Layout::Pretty { indent } = self.layout {
            self.out.push('\n');
            self.out.extend(std::iter::repeat(' ').take(indent * self.level));
        }
    }

    /// `{ a b }`, one item per line in pretty layout
    fn braced<T>(&mut self, items: &[T], mut item: impl FnMut(&mut Self, &T)) {
        if items.is_empty() {
            self.push("{}");
            return;
        }
        self.push("{");
        self.level += 1;
        for it in items {
            match self.layout {
                Layout::Compact => self.push(" "),
                Layout::Pretty { .. } => self.newline(),
            }
            item(self, it);
        }
        self.level -= 1;
        match self.layout {
            Layout::Compact => self.push(" "),
            Layout::Pretty { .. } => self.newline(),
        }
        self.push("}");
    }

    /// Space-separated items between `open` and `close`, always on one line
    fn inline<T>(&mut self, open: &str, close: &str, items: &[T], mut item: impl FnMut(&mut Self, &T)) {
        self.push(open);
        for (i, it) in items.iter().enumerate() {
            if i > 0 {
                self.push(" ");
            }
            item(self, it);
        }
        self.push(close);
    }

    fn name(&mut self, name: &Option<Ident>) {
        if let Some(name) = name {
            self.push(name.as_str());
            self.push(" ");
        }
    }

    fn term(&mut self, term: &Term) {
        match term {
            Term::Block(terms) => {
                self.push("block ");
                self.braced(terms, Self::term);
            }
            Term::Generic { params, body } => {
                self.inline("[", "]", params, Self::param);
                self.fat_arrow(body);
            }
            Term::Let(form) => self.let_form(form),
            Term::For(form) => self.for_form(form),
            Term::StructOf { name, params } => self.param_decl("structof", name, params),
            Term::EnumOf { name, params } => self.param_decl("enumof", name, params),
            Term::TraitOf { name, params } => self.param_decl("traitof", name, params),
            Term::KindOf { name, params } => self.param_decl("kindof", name, params),
            Term::Struct { name, fields } => self.field_decl("struct", name, fields),
            Term::Enum { name, fields } => self.field_decl("enum", name, fields),
            Term::Kind { name, fields } => self.field_decl("kind", name, fields),
            Term::Trait { name, lets } => {
                self.push("trait ");
                self.name(name);
                self.braced(lets, Self::let_form);
            }
            Term::FunOf { params, ret } => {
                self.inline("(", ")", params, Self::term);
                self.push(" -> ");
                self.term(ret);
            }
            Term::Fun { params, ret, body } => {
                self.inline("(", ")", params, Self::param);
                if let Some(ret) = ret {
                    self.push(" -> ");
                    self.term(ret);
                }
                self.fat_arrow(body);
            }
            Term::Case(branches) => {
                self.push("case ");
                self.braced(branches, |p, when| {
                    p.push("when ");
                    p.term(&when.cond);
                    p.fat_arrow(&when.body);
                });
            }
            // The space keeps `* *x` from lexing as `**x`
            Term::Deref(DerefKind::Tuple, operand) => {
                self.push("* ");
                self.term(operand);
            }
            Term::Deref(DerefKind::Dict, operand) => {
                self.push("** ");
                self.term(operand);
            }
            Term::Bool(b) => self.push(if *b { "true" } else { "false" }),
            Term::Ident(id) => self.push(id.as_str()),
            Term::Integer(n) => self.push(&n.to_string()),
            Term::Decimal(x) => self.push(&decimal_text(*x)),
            Term::String(s) => {
                self.push("\"");
                self.push(&s.replace('"', "\\\""));
                self.push("\"");
            }
            Term::Char(c) => {
                self.push("'");
                self.push(&char_text(*c));
                self.push("'");
            }
            Term::Select { target, name } => {
                self.term(target);
                self.push(".");
                self.push(name.as_str());
            }
            Term::ImplicitApply { target, args } => {
                self.term(target);
                self.inline("[", "]", args, Self::arg);
            }
            Term::PositionalApply { target, args } => {
                self.term(target);
                self.inline("(", ")", args, Self::arg);
            }
            Term::NamedApply { target, args } => {
                self.term(target);
                self.inline("{", "}", args, Self::kwarg);
            }
            Term::Assign { target, value } => {
                self.term(target);
                self.push(" = ");
                self.term(value);
            }
        }
    }

    fn param_decl(&mut self, keyword: &str, name: &Option<Ident>, params: &[Param]) {
        self.push(keyword);
        self.push(" ");
        self.name(name);
        self.braced(params, Self::param);
    }

    fn field_decl(&mut self, keyword: &str, name: &Option<Ident>, fields: &[KwArg]) {
        self.push(keyword);
        self.push(" ");
        self.name(name);
        self.braced(fields, Self::kwarg);
    }

    fn fat_arrow(&mut self, body: &FatArrow) {
        self.push(" => ");
        match body {
            FatArrow::Blocked(terms) => self.braced(terms, Self::term),
            FatArrow::Single(term) => self.term(term),
        }
    }

    fn anno(&mut self, anno: &Anno) {
        match anno {
            Anno::Single(_) => self.push(": "),
            Anno::List(_) => self.push(": * "),
            Anno::Dict(_) => self.push(": ** "),
        }
        self.term(anno.term());
    }

    fn param(&mut self, param: &Param) {
        self.push(param.name.as_str());
        if let Some(anno) = &param.anno {
            self.anno(anno);
        }
    }

    fn kwarg(&mut self, kwarg: &KwArg) {
        match kwarg {
            KwArg::WithRename { name, anno, value } => {
                self.push(name.as_str());
                if let Some(anno) = anno {
                    self.anno(anno);
                }
                self.push(" = ");
                self.term(value);
            }
            KwArg::WithoutRename { name } => self.push(name.as_str()),
        }
    }

    fn arg(&mut self, arg: &Arg) {
        match arg {
            Arg::Kw(kwarg) => self.kwarg(kwarg),
            Arg::Pos(term) => self.term(term),
        }
    }

    fn let_form(&mut self, form: &LetForm) {
        self.push("let ");
        match form {
            LetForm::Initialized { id, anno, value } => {
                self.push(id.as_str());
                if let Some(anno) = anno {
                    self.anno(anno);
                }
                self.push(" = ");
                self.term(value);
            }
            LetForm::Uninitialized { id } => self.push(id.as_str()),
        }
    }

    fn for_form(&mut self, form: &ForForm) {
        self.push("for ");
        match form {
            ForForm::ForEach { id, iter, body } => {
                self.push(id.as_str());
                self.push(" in ");
                self.term(iter);
                self.push(" ");
                self.braced(body, Self::term);
            }
            ForForm::Loop { body } => self.braced(body, Self::term),
            ForForm::While { cond, body } => {
                self.term(cond);
                self.push(" ");
                self.braced(body, Self::term);
            }
        }
    }
}

/// Shortest text that reads back as `x` and still lexes as a decimal
fn decimal_text(x: f64) -> String {
    let text = x.to_string();
    if text.contains('.') {
        text
    } else {
        format!("{}.0", text)
    }
}

fn char_text(c: char) -> String {
    match c {
        '\n' => "\\n".to_string(),
        '\t' => "\\t".to_string(),
        '\r' => "\\r".to_string(),
        '\0' => "\\0".to_string(),
        '\\' => "\\\\".to_string(),
        '\'' => "\\'".to_string(),
        c => c.to_string(),
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut printer = Printer::new(Layout::Compact);
        printer.term(self);
        f.write_str(&printer.out)
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", term)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
