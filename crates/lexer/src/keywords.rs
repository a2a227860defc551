use std::collections::HashMap;
use syntax::TokenType;

pub fn make_keywords() -> HashMap<String, TokenType> {
    let mut keywords = HashMap::new();
    keywords.insert("fn".to_string(), TokenType::Function);
    keywords.insert("let".to_string(), TokenType::Let);
    keywords.insert("true".to_string(), TokenType::True);
    keywords.insert("false".to_string(), TokenType::False);
    keywords.insert("if".to_string(), TokenType::If);
    keywords.insert("else".to_string(), TokenType::Else);
    keywords.insert("return".to_string(), TokenType::Return);
    keywords
}
