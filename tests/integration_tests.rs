//! Integration tests for the full pipeline.
//!
//! These tests run source text through tokenization, parsing and constant
//! folding and check the resulting tree, scope and fold report.

use std::rc::Rc;

use squanchy::{
    ast::{ast::Node, value::Value},
    build_ast,
    errors::errors::ErrorImpl,
    lexer::lexer::tokenize,
    parser::{lookups::Grammar, parser::parse_with_grammar},
    scope::scope::Binding,
};

fn statements(node: &Node) -> Vec<String> {
    match node {
        Node::Module(statements) => statements.iter().map(|s| s.to_string()).collect(),
        other => panic!("expected a module, got {}", other),
    }
}

#[test]
fn test_program_with_blocks() {
    let source = "\
# counts up to a limit
limit: 3
i: 0
while i < limit ::
\ti: i + 1
\ttotal: i * 2
done: if i = limit then 1 else 0
";
    let program = build_ast(source, Some("count.sqy".to_string())).unwrap();

    assert_eq!(
        statements(&program.module),
        vec![
            "Assign(Name (limit),Const (3))",
            "Assign(Name (i),Const (0))",
            concat!(
                "While(Lt(Name (i),Name (limit)),",
                "[Assign(Name (i),Add(Name (i),Const (1))),",
                "Assign(Name (total),Mul(Name (i),Const (2)))])"
            ),
            "Assign(Name (done),IfExp(Eq(Name (i),Name (limit)),Const (1),Const (0)))",
        ]
    );

    // Folding walks the tree once in source order; loops are not executed.
    assert_eq!(program.scope.lookup("limit").unwrap(), &Binding::Value(Value::Int(3)));
    assert_eq!(program.scope.lookup("i").unwrap(), &Binding::Value(Value::Int(1)));
    assert_eq!(program.scope.lookup("total").unwrap(), &Binding::Value(Value::Int(2)));
    assert_eq!(program.scope.lookup("done").unwrap(), &Binding::Value(Value::Int(0)));
    assert!(program.folds.is_clean());
}

#[test]
fn test_program_with_functions() {
    let source = "\
square(x) -> int :: x * x
area: square(4)
twice: lambda f, v :: f(f(v))
";
    let program = build_ast(source, None).unwrap();

    assert_eq!(
        statements(&program.module),
        vec![
            "Function(Name (square),[Name (x)],Name (int),Mul(Name (x),Name (x)))",
            "Assign(Name (area),CallFunc(Name (square),[Const (4)]))",
            concat!(
                "Assign(Name (twice),Lambda([Name (f),Name (v)],",
                "CallFunc(Name (f),[CallFunc(Name (f),[Name (v)])])))"
            ),
        ]
    );

    assert!(matches!(
        program.scope.lookup("square").unwrap(),
        Binding::Pending(Node::FunctionDecl { .. })
    ));
    let unresolved: Vec<&str> = program
        .folds
        .unresolved()
        .map(|entry| entry.name.as_str())
        .collect();
    assert_eq!(unresolved, vec!["area", "twice"]);
}

#[test]
fn test_program_with_if_else_blocks() {
    let source = "\
global debug
level: 2
if level > 1 then
\tverbose: True
\tdepth: level * 10
else
\tverbose: False
";
    let program = build_ast(source, None).unwrap();

    assert_eq!(
        statements(&program.module),
        vec![
            "Global(Name (debug))",
            "Assign(Name (level),Const (2))",
            concat!(
                "If(Gt(Name (level),Const (1)),",
                "[Assign(Name (verbose),Const (1)),",
                "Assign(Name (depth),Mul(Name (level),Const (10)))],",
                "Assign(Name (verbose),Const (0)))"
            ),
        ]
    );
    assert_eq!(program.scope.lookup("debug").unwrap(), &Binding::Void);
    assert_eq!(program.scope.lookup("depth").unwrap(), &Binding::Value(Value::Int(20)));
    assert_eq!(program.scope.lookup("verbose").unwrap(), &Binding::Value(Value::Int(0)));
}

#[test]
fn test_program_with_lists() {
    let source = "\
primes: [
\t2, 3, 5,
\t7,
]
third: primes.2
pair: (third, 'five')
";
    let program = build_ast(source, None).unwrap();

    assert_eq!(
        program.scope.lookup("third").unwrap(),
        &Binding::Value(Value::Int(5))
    );
    assert_eq!(
        program.scope.lookup("pair").unwrap(),
        &Binding::Value(Value::Tuple(vec![Value::Int(5), Value::Str("five".to_string())]))
    );
}

#[test]
fn test_errors_carry_positions() {
    let error = build_ast("x: 1\ny: 2 @ 3", Some("bad.sqy".to_string())).unwrap_err();

    assert_eq!(error.get_error_name(), "UnknownToken");
    assert_eq!(error.get_position().0, 10);
    assert_eq!(error.get_position().1.as_str(), "bad.sqy");
}

#[test]
fn test_error_kinds() {
    let cases = [
        ("x: `", "UnrecognisedToken"),
        ("if a then", "ControlConstructError"),
        ("while a", "ControlConstructError"),
        ("lambda :: 1", "BadListOrLambda"),
        ("()", "BadListOrLambda"),
        ("x\n\ty", "IndentationError"),
        ("]", "UndefinedBehavior"),
        ("while a :: f(1) 2", "UnexpectedToken"),
    ];

    for (source, expected) in cases {
        let error = build_ast(source, None).unwrap_err();
        assert_eq!(error.get_error_name(), expected, "source: {:?}", source);
    }
}

#[test]
fn test_assigned_global() {
    let program = build_ast("global x\nx: 1", None).unwrap();

    assert_eq!(
        statements(&program.module),
        vec!["Global(Name (x))", "Assign(Name (x),Const (1))"]
    );
    assert_eq!(program.scope.lookup("x").unwrap(), &Binding::Value(Value::Int(1)));
}

#[test]
fn test_known_name_with_arrow_is_rejected() {
    // `f` is already bound, so `f(1, 2)` is a call and `->` starts a new statement.
    let error = build_ast("f: 1\nf(1, 2) -> x", None).unwrap_err();

    assert_eq!(
        error.kind(),
        &ErrorImpl::UndefinedBehavior {
            symbol: String::from("->"),
            role: "leaf",
        }
    );
}

#[test]
fn test_wide_integers_fold() {
    let program = build_ast(
        "big: 99999999999999999999\nsmall: big - 99999999999999999990",
        None,
    )
    .unwrap();

    assert_eq!(program.scope.lookup("small").unwrap(), &Binding::Value(Value::Int(9)));
    assert!(program.folds.is_clean());
}

#[test]
fn test_custom_grammar() {
    let mut grammar = Grammar::standard();
    grammar.infix("?", 65);

    let tokens = tokenize("a ? b = c".to_string(), None).unwrap();
    let (module, _) = parse_with_grammar(tokens, Rc::new("shell".to_string()), grammar).unwrap();

    assert_eq!(statements(&module), vec!["Eq(?(Name (a),Name (b)),Name (c))"]);
}
