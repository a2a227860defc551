use crate::token::Token;
use std::fmt;

/// A parsed source file: an ordered list of statements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

impl Program {
    pub fn token_literal(&self) -> &str {
        match self.statements.first() {
            Some(stmt) => stmt.token_literal(),
            None => "",
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, stmt) in self.statements.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", stmt)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Let {
        token: Token,
        name: Identifier,
        value: Expr,
    },
    Return {
        token: Token,
        value: Expr,
    },
    Expression {
        token: Token,
        expression: Expr,
    },
}

impl Stmt {
    pub fn token_literal(&self) -> &str {
        match self {
            Stmt::Let { token, .. } => &token.lexeme,
            Stmt::Return { token, .. } => &token.lexeme,
            Stmt::Expression { token, .. } => &token.lexeme,
        }
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::Let { name, value, .. } => write!(f, "let {} = {};", name, value),
            Stmt::Return { value, .. } => write!(f, "return {};", value),
            Stmt::Expression { expression, .. } => write!(f, "{}", expression),
        }
    }
}

/// Statements between `{` and `}`, as used by `if` arms and function bodies.
/// Renders as the bare statement sequence; the wrapping construct prints its
/// own braces.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub token: Token,
    pub statements: Vec<Stmt>,
}

impl Block {
    pub fn token_literal(&self) -> &str {
        &self.token.lexeme
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, stmt) in self.statements.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", stmt)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub token: Token,
    pub value: String,
}

impl Identifier {
    pub fn token_literal(&self) -> &str {
        &self.token.lexeme
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Identifier(Identifier),
    IntegerLiteral {
        token: Token,
        value: i64,
    },
    StringLiteral {
        token: Token,
        value: String,
    },
    BooleanLiteral {
        token: Token,
        value: bool,
    },
    ArrayLiteral {
        token: Token,
        elements: Vec<Expr>,
    },
    HashLiteral {
        token: Token,
        pairs: Vec<(Expr, Expr)>,
    },
    Prefix {
        token: Token,
        operator: String,
        right: Box<Expr>,
    },
    Infix {
        token: Token,
        operator: String,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    If {
        token: Token,
        condition: Box<Expr>,
        consequence: Block,
        alternative: Option<Block>,
    },
    FunctionLiteral {
        token: Token,
        parameters: Vec<Identifier>,
        body: Block,
    },
    Call {
        token: Token,
        function: Box<Expr>,
        arguments: Vec<Expr>,
    },
    Index {
        token: Token,
        left: Box<Expr>,
        index: Box<Expr>,
    },
}

impl Expr {
    pub fn token_literal(&self) -> &str {
        match self {
            Expr::Identifier(ident) => ident.token_literal(),
            Expr::IntegerLiteral { token, .. } => &token.lexeme,
            Expr::StringLiteral { token, .. } => &token.lexeme,
            Expr::BooleanLiteral { token, .. } => &token.lexeme,
            Expr::ArrayLiteral { token, .. } => &token.lexeme,
            Expr::HashLiteral { token, .. } => &token.lexeme,
            Expr::Prefix { token, .. } => &token.lexeme,
            Expr::Infix { token, .. } => &token.lexeme,
            Expr::If { token, .. } => &token.lexeme,
            Expr::FunctionLiteral { token, .. } => &token.lexeme,
            Expr::Call { token, .. } => &token.lexeme,
            Expr::Index { token, .. } => &token.lexeme,
        }
    }
}

fn join(f: &mut fmt::Formatter<'_>, items: &[impl fmt::Display], sep: &str) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl fmt::Display for Expr {
    /// The canonical source form: prefix and infix expressions fully
    /// parenthesized, `if` and `fn` with explicit braces, so the rendering
    /// parses back to an equivalent tree.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Identifier(ident) => write!(f, "{}", ident),
            Expr::IntegerLiteral { token, .. } => f.write_str(&token.lexeme),
            Expr::StringLiteral { value, .. } => f.write_str(value),
            Expr::BooleanLiteral { token, .. } => f.write_str(&token.lexeme),
            Expr::ArrayLiteral { elements, .. } => {
                write!(f, "[")?;
                join(f, elements, ", ")?;
                write!(f, "]")
            }
            Expr::HashLiteral { pairs, .. } => {
                write!(f, "{{")?;
                for (i, (key, value)) in pairs.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}:{}", key, value)?;
                }
                write!(f, "}}")
            }
            Expr::Prefix {
                operator, right, ..
            } => write!(f, "({}{})", operator, right),
            Expr::Infix {
                operator,
                left,
                right,
                ..
            } => write!(f, "({} {} {})", left, operator, right),
            Expr::If {
                condition,
                consequence,
                alternative,
                ..
            } => {
                write!(f, "if ({}) {{ {} }}", condition, consequence)?;
                if let Some(alt) = alternative {
                    write!(f, " else {{ {} }}", alt)?;
                }
                Ok(())
            }
            Expr::FunctionLiteral {
                parameters, body, ..
            } => {
                write!(f, "fn(")?;
                join(f, parameters, ", ")?;
                write!(f, ") {{ {} }}", body)
            }
            Expr::Call {
                function,
                arguments,
                ..
            } => {
                write!(f, "{}(", function)?;
                join(f, arguments, ", ")?;
                write!(f, ")")
            }
            Expr::Index { left, index, .. } => write!(f, "({}[{}])", left, index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenType;

    #[test]
    fn let_statement_renders_source() {
        let program = Program {
            statements: vec![Stmt::Let {
                token: Token::new(TokenType::Let, "let"),
                name: Identifier {
                    token: Token::new(TokenType::Identifier, "myVar"),
                    value: "myVar".to_string(),
                },
                value: Expr::Identifier(Identifier {
                    token: Token::new(TokenType::Identifier, "anotherVar"),
                    value: "anotherVar".to_string(),
                }),
            }],
        };
        assert_eq!(program.to_string(), "let myVar = anotherVar;");
    }
}
