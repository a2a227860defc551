use syntax::TokenType;

/// Binding power, low to high. Ties bind left because the Pratt loop only
/// continues while the caller's level is strictly below the peek token's.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub enum Precedence {
    Lowest,
    Equals,
    LessGreater,
    Sum,
    Product,
    Prefix,
    Call,
}

/// The infix binding power of a token kind. Kinds without an infix role
/// fall back to `Lowest`, which stops the climbing loop.
pub fn of(token_type: TokenType) -> Precedence {
    match token_type {
        TokenType::EqualEqual | TokenType::BangEqual => Precedence::Equals,
        TokenType::Less | TokenType::Greater => Precedence::LessGreater,
        TokenType::Plus | TokenType::Minus => Precedence::Sum,
        TokenType::Star | TokenType::Slash => Precedence::Product,
        TokenType::LeftParen | TokenType::LeftBracket => Precedence::Call,
        _ => Precedence::Lowest,
    }
}
