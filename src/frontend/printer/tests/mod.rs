//! Printer tests

use crate::frontend::lexer::tokenize;
use crate::frontend::parser::ast::*;
use crate::frontend::parser::parse_program;
use crate::frontend::printer::{print_program, PrettyConfig};

fn parse(source: &str) -> Program {
    let tokens = tokenize(source).unwrap();
    parse_program(&tokens).unwrap()
}

fn assert_round_trip(source: &str) {
    let original = parse(source);
    let compact = original.to_string();
    assert_eq!(parse(&compact), original, "compact form {:?}", compact);
    let pretty = print_program(&original, &PrettyConfig::default());
    assert_eq!(parse(&pretty), original, "pretty form {:?}", pretty);
}

const SAMPLE: &str = r#"
// A little of everything
let id = (x) => x
let add: (Int Int) -> Int = (a: Int b: Int) -> Int => { plus(a b) }
structof Point { x: Int y: Int }
let origin = Point{x = 0 y = 0}
enum Color { red = 0 green = 1 }
trait Show { let show: (Self) -> Str = default let name }
let pair = [A B] => struct { first: A = a second }
for i in range(10) { print(i) }
for { tick() }
for running { step() }
case {
    when ready => go()
    when blocked => { wait() retry() }
}
f(1 *rest key = v **opts)
p.x = 3
"#;

#[test]
fn test_sample_round_trips() {
    assert_round_trip(SAMPLE);
}

#[test]
fn test_compact_form() {
    let program = parse("f(  a  )");
    assert_eq!(program.to_string(), "f(a)");

    let program = parse("let   x :Int=  1");
    assert_eq!(program.to_string(), "let x: Int = 1");

    let program = parse("(x)->T=>{x}");
    assert_eq!(program.to_string(), "(x) -> T => { x }");
}

#[test]
fn test_pretty_layout() {
    let program = parse("block { a case { when b => c } }");
    let config = PrettyConfig { indent: 2 };
    assert_eq!(
        print_program(&program, &config),
        "block {\n  a\n  case {\n    when b => c\n  }\n}\n"
    );
}

#[test]
fn test_empty_bodies_stay_inline() {
    let program = parse("() => {} block {} struct P {}");
    assert_eq!(
        print_program(&program, &PrettyConfig::default()),
        "() => {}\nblock {}\nstruct P {}\n"
    );
}

#[test]
fn test_literal_spelling_is_normalized() {
    assert_eq!(parse("0x1F").to_string(), "31");
    assert_eq!(parse("-0b101").to_string(), "-5");
    assert_eq!(parse("2.50").to_string(), "2.5");
}

#[test]
fn test_decimal_keeps_point() {
    let term = Term::Decimal(3.0);
    assert_eq!(term.to_string(), "3.0");
    assert_round_trip("3.0 -0.25 100000.5");
}

#[test]
fn test_nested_derefs_are_spaced() {
    let term = Term::Deref(
        DerefKind::Tuple,
        Box::new(Term::Deref(DerefKind::Tuple, Box::new(Term::ident("x")))),
    );
    assert_eq!(term.to_string(), "* * x");
    assert_round_trip("* *x ** *y");
}

#[test]
fn test_string_and_char_escapes_round_trip() {
    assert_round_trip(r#""say \"hi\"" "a\nb" '\n' '\'' '\\' '"' 'x'"#);
    assert_eq!(Term::Char('\'').to_string(), r"'\''");
    assert_eq!(Term::String("q\"q".to_string()).to_string(), r#""q\"q""#);
}

#[test]
fn test_loop_bodies_round_trip() {
    assert_round_trip("for x { a } for make {n = 1} { step } for i in xs {}");
}

#[test]
fn test_program_display_joins_lines() {
    let program = parse("a b");
    assert_eq!(program.to_string(), "a\nb");
}
