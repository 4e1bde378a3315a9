//! End-to-end tests through the public library API

use shll::frontend::parser::ast::{ForForm, LetForm, Program, Term};
use shll::frontend::parser::{ParserConfig, SyntaxErrorKind};
use shll::frontend::printer::{print_program, PrettyConfig};
use shll::frontend::{parse_source, Frontend, FrontendError};
use shll::util::config::OutputFormat;
use shll::render_program;

const SAMPLE: &str = r#"
/* shapes */
struct Point { x: Int = 0 y: Int = 0 }
enumof Shape { circle: Decimal square: Decimal }
trait Area {
    let area: (Self) -> Decimal = builtin
    let name
}
let norm = [T: Num] => (p: Point) -> T => {
    p.x.mul(p.x).add(p.y.mul(p.y))
}
for p in points {
    total = total.add(norm(p))
}
case {
    when total.gt(100) => print("big")
    when true => print('s')
}
"#;

#[test]
fn test_sample_program_shape() {
    let program = parse_source(SAMPLE).unwrap();
    assert_eq!(program.len(), 6);

    assert!(matches!(program.terms[0], Term::Struct { .. }));
    assert!(matches!(program.terms[1], Term::EnumOf { .. }));
    match &program.terms[2] {
        Term::Trait { name, lets } => {
            assert_eq!(name.as_ref().map(|n| n.as_str()), Some("Area"));
            assert!(matches!(lets[0], LetForm::Initialized { .. }));
        }
        other => panic!("expected trait, got {:?}", other),
    }
    match &program.terms[3] {
        Term::Let(LetForm::Initialized { value, .. }) => {
            assert!(matches!(**value, Term::Generic { .. }));
        }
        other => panic!("expected let, got {:?}", other),
    }
    assert!(matches!(program.terms[4], Term::For(ForForm::ForEach { .. })));
    assert!(matches!(&program.terms[5], Term::Case(whens) if whens.len() == 2));
}

#[test]
fn test_compact_and_pretty_output_reparse() {
    let program = parse_source(SAMPLE).unwrap();

    let compact = program.to_string();
    assert_eq!(parse_source(&compact).unwrap(), program);

    for indent in [0, 2, 4] {
        let pretty = print_program(&program, &PrettyConfig { indent });
        assert_eq!(parse_source(&pretty).unwrap(), program, "{}", pretty);
    }
}

#[test]
fn test_pretty_output_is_stable() {
    let program = parse_source(SAMPLE).unwrap();
    let config = PrettyConfig::default();
    let once = print_program(&program, &config);
    let twice = print_program(&parse_source(&once).unwrap(), &config);
    assert_eq!(once, twice);
}

#[test]
fn test_serialized_dumps_decode_to_same_program() {
    let program = parse_source("let p = Point { x = 1 y = -2 }\nf(*xs **kw)[T]").unwrap();
    let pretty = PrettyConfig::default();

    let json = render_program(&program, OutputFormat::Json, &pretty).unwrap();
    assert_eq!(serde_json::from_str::<Program>(&json).unwrap(), program);

    let ron_text = render_program(&program, OutputFormat::Ron, &pretty).unwrap();
    assert_eq!(ron::from_str::<Program>(&ron_text).unwrap(), program);

    let debug = render_program(&program, OutputFormat::Debug, &pretty).unwrap();
    assert!(debug.contains("NamedApply"));
}

#[test]
fn test_errors_keep_their_layer() {
    assert!(matches!(parse_source("let x = \"open"), Err(FrontendError::Lexical(_))));
    assert!(matches!(parse_source("let x ="), Err(FrontendError::Syntax(_))));

    let err = parse_source("a\n  b }").unwrap_err();
    assert_eq!(err.location(), (2, 5));
    assert_eq!(err.offset(), 6);
    assert!(err.to_string().starts_with("Syntax error: 2:5: unexpected '}'"), "{}", err);
}

#[test]
fn test_configured_depth_limit() {
    let frontend = Frontend::with_config(ParserConfig { max_depth: 8 });
    let shallow = "f(f(f(x)))";
    let deep = format!("{}x{}", "f(".repeat(16), ")".repeat(16));

    assert!(frontend.parse(shallow).is_ok());
    match frontend.parse(&deep) {
        Err(FrontendError::Syntax(err)) => {
            assert_eq!(err.kind, SyntaxErrorKind::NestingTooDeep { limit: 8 })
        }
        other => panic!("expected nesting error, got {:?}", other),
    }
}

#[test]
fn test_million_link_chain_is_an_error() {
    let source = format!("x{}", ".a".repeat(1_000_000));
    match parse_source(&source) {
        Err(FrontendError::Syntax(err)) => {
            assert!(matches!(err.kind, SyntaxErrorKind::NestingTooDeep { .. }))
        }
        other => panic!("expected nesting error, got {:?}", other.map(|p| p.len())),
    }
}

#[test]
fn test_parser_stack_follows_limit() {
    let small = Frontend::with_config(ParserConfig { max_depth: 8 });
    let large = Frontend::with_config(ParserConfig { max_depth: 4096 });
    assert!(small.parser_stack_size() < large.parser_stack_size());

    // A raised limit gets a matching stack, wherever the caller runs
    let depth = 600;
    let source = format!("{}x{}", "block { ".repeat(depth), " }".repeat(depth));
    assert!(large.parse(&source).is_ok());
}

#[test]
fn test_empty_and_trivia_only_sources() {
    for source in ["", "   \n\t", "// only a comment", "/* block */"] {
        assert!(parse_source(source).unwrap().is_empty(), "{:?}", source);
    }
}
