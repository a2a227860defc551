use interpreter::{Interpreter, Value};
use lexer::Lexer;
use parser::Parser;

fn run(source: &str) -> Value {
    let mut parser = Parser::new(Lexer::new(source));
    let program = parser.parse_program();
    assert!(
        parser.errors().is_empty(),
        "parser errors for {:?}: {:?}",
        source,
        parser.errors()
    );
    Interpreter::new().interpret(&program)
}

fn assert_error(source: &str, expected: &str) {
    match run(source) {
        Value::Error(message) => assert_eq!(message, expected, "source {:?}", source),
        other => panic!("expected error for {:?}, got {:?}", source, other),
    }
}

#[test]
fn type_mismatches_and_unknown_operators() {
    let tests = [
        ("5 + true;", "type mismatch: INTEGER + BOOLEAN"),
        ("5 + true; 5;", "type mismatch: INTEGER + BOOLEAN"),
        ("-true", "unknown operator: -BOOLEAN"),
        ("true + false;", "unknown operator: BOOLEAN + BOOLEAN"),
        ("5; true + false; 5", "unknown operator: BOOLEAN + BOOLEAN"),
        (
            "if (10 > 1) { true + false; }",
            "unknown operator: BOOLEAN + BOOLEAN",
        ),
        (
            "if (10 > 1) { if (10 > 1) { return true + false; } return 1; }",
            "unknown operator: BOOLEAN + BOOLEAN",
        ),
        ("\"Hello\" - \"World\"", "unknown operator: STRING - STRING"),
        ("\"a\" == \"a\"", "unknown operator: STRING == STRING"),
    ];
    for (source, expected) in tests {
        assert_error(source, expected);
    }
}

#[test]
fn unbound_identifiers() {
    assert_error("foobar", "identifier not found: foobar");
    assert_error("let x = y; x", "identifier not found: y");
}

#[test]
fn unsupported_hash_keys() {
    assert_error(
        "{\"name\": \"monkey\"}[fn(x){x}]",
        "Invalid HashKey: \"fn(x) {\\nx\\n}\". Type \"FUNCTION\" is unsupported.",
    );
    assert_error(
        "{[1, 2]: \"nope\"}",
        "Invalid HashKey: \"[1, 2]\". Type \"ARRAY\" is unsupported.",
    );
}

#[test]
fn unsupported_index_targets() {
    assert_error("5[0]", "Index operator not supported: INTEGER[INTEGER]");
    assert_error(
        "\"str\"[0]",
        "Index operator not supported: STRING[INTEGER]",
    );
}

#[test]
fn errors_short_circuit_every_compound_form() {
    // Whatever surrounds a failing subexpression, the result is that
    // subexpression's error, unchanged.
    let failing = "(1 + true)";
    let expected = "type mismatch: INTEGER + BOOLEAN";
    let wrappers = [
        format!("-{}", failing),
        format!("!{}", failing),
        format!("2 * {}", failing),
        format!("{} * 2", failing),
        format!("[1, {}, 3]", failing),
        format!("{{\"k\": {}}}", failing),
        format!("{{{}: 1}}", failing),
        format!("[1, 2][{}]", failing),
        format!("{}[0]", failing),
        format!("len({})", failing),
        format!("fn(x) {{ x }}({})", failing),
        format!("return {};", failing),
        format!("let x = {}; x", failing),
        format!("if ({}) {{ 1 }}", failing),
    ];
    for source in &wrappers {
        assert_error(source, expected);
    }
}

#[test]
fn error_in_call_target_wins_over_arguments() {
    assert_error("missing(1, 2)", "identifier not found: missing");
}

#[test]
fn first_failing_argument_short_circuits() {
    assert_error(
        "len(missing, alsoMissing)",
        "identifier not found: missing",
    );
}

#[test]
fn errors_are_values_with_an_inspect_format() {
    let value = run("5 + true");
    assert_eq!(value.to_string(), "ERROR: type mismatch: INTEGER + BOOLEAN");
    assert_eq!(value.type_tag(), "ERROR");
}
