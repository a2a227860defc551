use lexer::Lexer;
use parser::Parser;

fn parse_errors(source: &str) -> Vec<String> {
    let mut parser = Parser::new(Lexer::new(source));
    parser.parse_program();
    parser.errors().to_vec()
}

#[test]
fn expect_peek_mismatches_are_recorded() {
    let errors = parse_errors("let x 5;");
    assert_eq!(
        errors,
        ["expected next token to be =, got INT instead".to_string()]
    );
}

#[test]
fn missing_let_name() {
    let errors = parse_errors("let = 10;");
    assert_eq!(
        errors[0],
        "expected next token to be IDENT, got = instead"
    );
}

#[test]
fn missing_prefix_parser() {
    // The failed let aborts at `+`; the recovery pass then stumbles over
    // the orphaned `;` as well.
    let errors = parse_errors("let x = +;");
    assert_eq!(
        errors,
        [
            "No prefix parse function for + was found".to_string(),
            "No prefix parse function for ; was found".to_string(),
        ]
    );
}

#[test]
fn unclosed_group_reports_missing_paren() {
    let errors = parse_errors("(1 + 2");
    assert_eq!(
        errors,
        ["expected next token to be ), got EOF instead".to_string()]
    );
}

#[test]
fn illegal_token_surfaces_as_parse_error() {
    let errors = parse_errors("1 + $");
    assert_eq!(
        errors,
        ["No prefix parse function for ILLEGAL was found".to_string()]
    );
}

#[test]
fn integer_overflow_is_reported() {
    let errors = parse_errors("92233720368547758099");
    assert_eq!(
        errors,
        ["Could not parse \"92233720368547758099\" as integer.".to_string()]
    );
}

#[test]
fn parsing_continues_after_an_error() {
    let mut parser = Parser::new(Lexer::new("let x 5; let y = 8;"));
    let program = parser.parse_program();
    // The bad let is dropped; its dangling `5` reparses as an expression
    // statement and the following statement is intact.
    assert_eq!(parser.errors().len(), 1);
    assert_eq!(program.statements.len(), 2);
    assert_eq!(program.statements[0].to_string(), "5");
    assert_eq!(program.statements[1].to_string(), "let y = 8;");
}
