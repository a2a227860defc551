use crate::expressions;
use crate::parser::Parser;
use crate::precedence::Precedence;
use syntax::ast::{Block, Identifier, Stmt};
use syntax::TokenType;

pub(crate) fn statement(parser: &mut Parser) -> Option<Stmt> {
    match parser.cur_token.token_type {
        TokenType::Let => let_statement(parser),
        TokenType::Return => return_statement(parser),
        _ => expression_statement(parser),
    }
}

fn let_statement(parser: &mut Parser) -> Option<Stmt> {
    let token = parser.cur_token.clone();

    if !parser.expect_peek(TokenType::Identifier) {
        return None;
    }
    let name = Identifier {
        token: parser.cur_token.clone(),
        value: parser.cur_token.lexeme.clone(),
    };

    if !parser.expect_peek(TokenType::Assign) {
        return None;
    }

    parser.next_token();
    let value = expressions::expression(parser, Precedence::Lowest)?;

    if parser.peek_token_is(TokenType::Semicolon) {
        parser.next_token();
    }

    Some(Stmt::Let { token, name, value })
}

fn return_statement(parser: &mut Parser) -> Option<Stmt> {
    let token = parser.cur_token.clone();

    parser.next_token();
    let value = expressions::expression(parser, Precedence::Lowest)?;

    if parser.peek_token_is(TokenType::Semicolon) {
        parser.next_token();
    }

    Some(Stmt::Return { token, value })
}

fn expression_statement(parser: &mut Parser) -> Option<Stmt> {
    let token = parser.cur_token.clone();
    let expression = expressions::expression(parser, Precedence::Lowest)?;

    if parser.peek_token_is(TokenType::Semicolon) {
        parser.next_token();
    }

    Some(Stmt::Expression { token, expression })
}

/// Consumes statements up to the closing `}` (or end of input), leaving the
/// cursor on the terminator.
pub(crate) fn block(parser: &mut Parser) -> Block {
    let token = parser.cur_token.clone();
    let mut statements = Vec::new();

    parser.next_token();
    while !parser.cur_token_is(TokenType::RightBrace) && !parser.cur_token_is(TokenType::Eof) {
        if let Some(stmt) = statement(parser) {
            statements.push(stmt);
        }
        parser.next_token();
    }

    Block { token, statements }
}
