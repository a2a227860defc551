use crate::parser::Parser;
use crate::precedence::Precedence;
use crate::statements;
use syntax::ast::{Expr, Identifier};
use syntax::TokenType;

pub(crate) type PrefixFn = fn(&mut Parser) -> Option<Expr>;
pub(crate) type InfixFn = fn(&mut Parser, Expr) -> Option<Expr>;

/// The prefix registry: which parse function starts an expression for a
/// given token kind. Kinds that cannot begin an expression have no entry.
pub(crate) fn prefix_parser(token_type: TokenType) -> Option<PrefixFn> {
    match token_type {
        TokenType::Identifier => Some(identifier),
        TokenType::Int => Some(integer_literal),
        TokenType::Str => Some(string_literal),
        TokenType::True | TokenType::False => Some(boolean_literal),
        TokenType::Bang | TokenType::Minus => Some(prefix_expression),
        TokenType::LeftParen => Some(grouped_expression),
        TokenType::If => Some(if_expression),
        TokenType::Function => Some(function_literal),
        TokenType::LeftBracket => Some(array_literal),
        TokenType::LeftBrace => Some(hash_literal),
        _ => None,
    }
}

/// The infix registry: how a token kind extends an already-parsed left
/// operand. `(` continues into a call and `[` into an index; both bind at
/// `Call` via the precedence table.
pub(crate) fn infix_parser(token_type: TokenType) -> Option<InfixFn> {
    match token_type {
        TokenType::Plus
        | TokenType::Minus
        | TokenType::Slash
        | TokenType::Star
        | TokenType::EqualEqual
        | TokenType::BangEqual
        | TokenType::Less
        | TokenType::Greater => Some(infix_expression),
        TokenType::LeftParen => Some(call_expression),
        TokenType::LeftBracket => Some(index_expression),
        _ => None,
    }
}

/// The Pratt loop: parse a prefix, then fold in infix continuations while
/// the peek token binds tighter than the caller.
pub(crate) fn expression(parser: &mut Parser, precedence: Precedence) -> Option<Expr> {
    let prefix = match prefix_parser(parser.cur_token.token_type) {
        Some(prefix) => prefix,
        None => {
            parser.no_prefix_parse_fn_error(parser.cur_token.token_type);
            return None;
        }
    };
    let mut left = prefix(parser)?;

    while !parser.peek_token_is(TokenType::Semicolon) && precedence < parser.peek_precedence() {
        let infix = match infix_parser(parser.peek_token.token_type) {
            Some(infix) => infix,
            None => return Some(left),
        };
        parser.next_token();
        left = infix(parser, left)?;
    }

    Some(left)
}

fn identifier(parser: &mut Parser) -> Option<Expr> {
    Some(Expr::Identifier(Identifier {
        token: parser.cur_token.clone(),
        value: parser.cur_token.lexeme.clone(),
    }))
}

fn integer_literal(parser: &mut Parser) -> Option<Expr> {
    match parser.cur_token.lexeme.parse::<i64>() {
        Ok(value) => Some(Expr::IntegerLiteral {
            token: parser.cur_token.clone(),
            value,
        }),
        Err(_) => {
            let lexeme = parser.cur_token.lexeme.clone();
            parser.integer_parse_error(&lexeme);
            None
        }
    }
}

fn string_literal(parser: &mut Parser) -> Option<Expr> {
    Some(Expr::StringLiteral {
        token: parser.cur_token.clone(),
        value: parser.cur_token.lexeme.clone(),
    })
}

fn boolean_literal(parser: &mut Parser) -> Option<Expr> {
    Some(Expr::BooleanLiteral {
        token: parser.cur_token.clone(),
        value: parser.cur_token_is(TokenType::True),
    })
}

fn prefix_expression(parser: &mut Parser) -> Option<Expr> {
    let token = parser.cur_token.clone();
    let operator = token.lexeme.clone();
    parser.next_token();
    let right = expression(parser, Precedence::Prefix)?;
    Some(Expr::Prefix {
        token,
        operator,
        right: Box::new(right),
    })
}

fn infix_expression(parser: &mut Parser, left: Expr) -> Option<Expr> {
    let token = parser.cur_token.clone();
    let operator = token.lexeme.clone();
    let precedence = parser.cur_precedence();
    parser.next_token();
    let right = expression(parser, precedence)?;
    Some(Expr::Infix {
        token,
        operator,
        left: Box::new(left),
        right: Box::new(right),
    })
}

/// Parentheses only steer the climb; they leave no node behind.
fn grouped_expression(parser: &mut Parser) -> Option<Expr> {
    parser.next_token();
    let expr = expression(parser, Precedence::Lowest)?;
    if !parser.expect_peek(TokenType::RightParen) {
        return None;
    }
    Some(expr)
}

fn if_expression(parser: &mut Parser) -> Option<Expr> {
    let token = parser.cur_token.clone();
    if !parser.expect_peek(TokenType::LeftParen) {
        return None;
    }
    parser.next_token();
    let condition = expression(parser, Precedence::Lowest)?;
    if !parser.expect_peek(TokenType::RightParen) {
        return None;
    }
    if !parser.expect_peek(TokenType::LeftBrace) {
        return None;
    }
    let consequence = statements::block(parser);

    let alternative = if parser.peek_token_is(TokenType::Else) {
        parser.next_token();
        if !parser.expect_peek(TokenType::LeftBrace) {
            return None;
        }
        Some(statements::block(parser))
    } else {
        None
    };

    Some(Expr::If {
        token,
        condition: Box::new(condition),
        consequence,
        alternative,
    })
}

fn function_literal(parser: &mut Parser) -> Option<Expr> {
    let token = parser.cur_token.clone();
    if !parser.expect_peek(TokenType::LeftParen) {
        return None;
    }
    let parameters = function_parameters(parser)?;
    if !parser.expect_peek(TokenType::LeftBrace) {
        return None;
    }
    let body = statements::block(parser);
    Some(Expr::FunctionLiteral {
        token,
        parameters,
        body,
    })
}

fn function_parameters(parser: &mut Parser) -> Option<Vec<Identifier>> {
    let mut parameters = Vec::new();

    if parser.peek_token_is(TokenType::RightParen) {
        parser.next_token();
        return Some(parameters);
    }

    parser.next_token();
    parameters.push(Identifier {
        token: parser.cur_token.clone(),
        value: parser.cur_token.lexeme.clone(),
    });

    while parser.peek_token_is(TokenType::Comma) {
        parser.next_token();
        parser.next_token();
        parameters.push(Identifier {
            token: parser.cur_token.clone(),
            value: parser.cur_token.lexeme.clone(),
        });
    }

    if !parser.expect_peek(TokenType::RightParen) {
        return None;
    }
    Some(parameters)
}

fn array_literal(parser: &mut Parser) -> Option<Expr> {
    let token = parser.cur_token.clone();
    let elements = expression_list(parser, TokenType::RightBracket)?;
    Some(Expr::ArrayLiteral { token, elements })
}

fn hash_literal(parser: &mut Parser) -> Option<Expr> {
    let token = parser.cur_token.clone();
    let mut pairs = Vec::new();

    while !parser.peek_token_is(TokenType::RightBrace) {
        parser.next_token();
        let key = expression(parser, Precedence::Lowest)?;
        if !parser.expect_peek(TokenType::Colon) {
            return None;
        }
        parser.next_token();
        let value = expression(parser, Precedence::Lowest)?;
        pairs.push((key, value));

        if !parser.peek_token_is(TokenType::RightBrace) && !parser.expect_peek(TokenType::Comma) {
            return None;
        }
    }

    if !parser.expect_peek(TokenType::RightBrace) {
        return None;
    }
    Some(Expr::HashLiteral { token, pairs })
}

fn call_expression(parser: &mut Parser, function: Expr) -> Option<Expr> {
    let token = parser.cur_token.clone();
    let arguments = expression_list(parser, TokenType::RightParen)?;
    Some(Expr::Call {
        token,
        function: Box::new(function),
        arguments,
    })
}

fn index_expression(parser: &mut Parser, left: Expr) -> Option<Expr> {
    let token = parser.cur_token.clone();
    parser.next_token();
    let index = expression(parser, Precedence::Lowest)?;
    if !parser.expect_peek(TokenType::RightBracket) {
        return None;
    }
    Some(Expr::Index {
        token,
        left: Box::new(left),
        index: Box::new(index),
    })
}

/// Comma-separated expressions up to `end`. Shared by call arguments and
/// array elements; empty lists are fine.
fn expression_list(parser: &mut Parser, end: TokenType) -> Option<Vec<Expr>> {
    let mut items = Vec::new();

    if parser.peek_token_is(end) {
        parser.next_token();
        return Some(items);
    }

    parser.next_token();
    items.push(expression(parser, Precedence::Lowest)?);

    while parser.peek_token_is(TokenType::Comma) {
        parser.next_token();
        parser.next_token();
        items.push(expression(parser, Precedence::Lowest)?);
    }

    if !parser.expect_peek(end) {
        return None;
    }
    Some(items)
}
