//! Tokenizer and recursive descent parser for keypad expressions
//!
//! The grammar is deliberately small: decimal numerals, the five keypad
//! operators and unary minus. Anything else is rejected as invalid input.

use crate::core::{CalcError, CalcResult, Operation};

/// Token types from lexical analysis
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Numeric literal
    Number(f64),
    /// Binary operator (or unary minus, depending on position)
    Operator(Operation),
}

impl Token {
    /// Returns true if this token is an operator
    #[must_use]
    pub const fn is_operator(&self) -> bool {
        matches!(self, Self::Operator(_))
    }

    /// Returns true if this token is a number
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }
}

/// Abstract Syntax Tree node
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    /// Numeric literal
    Number(f64),
    /// Binary operation
    BinaryOp {
        /// Left operand
        left: Box<AstNode>,
        /// Operator
        op: Operation,
        /// Right operand
        right: Box<AstNode>,
    },
    /// Unary negation
    Negate(Box<AstNode>),
}

impl AstNode {
    /// Creates a new number node
    #[must_use]
    pub fn number(value: f64) -> Self {
        Self::Number(value)
    }

    /// Creates a new binary operation node
    #[must_use]
    pub fn binary(left: AstNode, op: Operation, right: AstNode) -> Self {
        Self::BinaryOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    /// Creates a new negation node
    #[must_use]
    pub fn negate(inner: AstNode) -> Self {
        Self::Negate(Box::new(inner))
    }
}

/// Tokenizer for converting expression strings to tokens
#[derive(Debug)]
pub struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    /// Creates a new tokenizer for the given input
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Returns the remaining input
    #[must_use]
    pub fn remaining(&self) -> &str {
        &self.input[self.pos..]
    }

    /// Tokenizes the entire input
    pub fn tokenize(&mut self) -> CalcResult<Vec<Token>> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    /// Returns the next token, or None if at end of input
    pub fn next_token(&mut self) -> CalcResult<Option<Token>> {
        self.skip_whitespace();

        let Some(ch) = self.current_char() else {
            return Ok(None);
        };

        if ch.is_ascii_digit() || ch == '.' {
            return self.read_number().map(Some);
        }

        match Operation::from_char(ch) {
            Some(op) => {
                self.advance();
                Ok(Some(Token::Operator(op)))
            }
            None => Err(CalcError::invalid_input(format!(
                "unexpected character '{ch}'"
            ))),
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current_char() {
            self.pos += ch.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_number(&mut self) -> CalcResult<Token> {
        let start = self.pos;
        let mut has_dot = false;

        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() {
                self.advance();
            } else if ch == '.' && !has_dot {
                has_dot = true;
                self.advance();
            } else {
                break;
            }
        }

        let numeral = &self.input[start..self.pos];
        let value: f64 = numeral
            .parse()
            .map_err(|_| CalcError::invalid_input(format!("malformed number '{numeral}'")))?;

        Ok(Token::Number(value))
    }
}

/// Recursive descent parser for expressions
///
/// Grammar:
/// ```text
/// expression ::= term (('+' | '-') term)*
/// term       ::= unary (('*' | '/' | '%') unary)*
/// unary      ::= '-' unary | NUMBER
/// ```
#[derive(Debug)]
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    /// Creates a new parser from tokens
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Parses a string expression into an AST
    pub fn parse_str(input: &str) -> CalcResult<AstNode> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(CalcError::invalid_input("empty expression"));
        }

        let tokens = Tokenizer::new(trimmed).tokenize()?;
        let mut parser = Self::new(tokens);
        let ast = parser.parse()?;

        if parser.pos < parser.tokens.len() {
            return Err(CalcError::invalid_input(format!(
                "unexpected token at position {}",
                parser.pos
            )));
        }

        Ok(ast)
    }

    /// Parses tokens into an AST
    pub fn parse(&mut self) -> CalcResult<AstNode> {
        if self.tokens.is_empty() {
            return Err(CalcError::invalid_input("empty expression"));
        }
        self.parse_expression()
    }

    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn parse_expression(&mut self) -> CalcResult<AstNode> {
        let mut left = self.parse_term()?;

        while let Some(Token::Operator(op)) = self.current() {
            let op = *op;
            if op.precedence() != 1 {
                break;
            }
            self.advance();
            let right = self.parse_term()?;
            left = AstNode::binary(left, op, right);
        }

        Ok(left)
    }

    fn parse_term(&mut self) -> CalcResult<AstNode> {
        let mut left = self.parse_unary()?;

        while let Some(Token::Operator(op)) = self.current() {
            let op = *op;
            if op.precedence() != 2 {
                break;
            }
            self.advance();
            let right = self.parse_unary()?;
            left = AstNode::binary(left, op, right);
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> CalcResult<AstNode> {
        if matches!(self.current(), Some(Token::Operator(Operation::Subtract))) {
            self.advance();
            let inner = self.parse_unary()?;
            return Ok(AstNode::negate(inner));
        }

        match self.advance() {
            Some(Token::Number(n)) => Ok(AstNode::number(*n)),
            Some(token) => Err(CalcError::invalid_input(format!(
                "expected a number, found {token:?}"
            ))),
            None => Err(CalcError::invalid_input("expression ends with an operator")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== Token tests =====

    #[test]
    fn test_token_predicates() {
        assert!(Token::Operator(Operation::Add).is_operator());
        assert!(!Token::Number(5.0).is_operator());
        assert!(Token::Number(5.0).is_number());
        assert!(!Token::Operator(Operation::Modulo).is_number());
    }

    // ===== Tokenizer tests =====

    #[test]
    fn test_tokenize_keypad_expression() {
        let tokens = Tokenizer::new("12.5 * 3 % 2").tokenize().unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Number(12.5),
                Token::Operator(Operation::Multiply),
                Token::Number(3.0),
                Token::Operator(Operation::Modulo),
                Token::Number(2.0),
            ]
        );
    }

    #[test]
    fn test_tokenize_trailing_and_leading_dot() {
        let tokens = Tokenizer::new("12. + .5").tokenize().unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Number(12.0),
                Token::Operator(Operation::Add),
                Token::Number(0.5),
            ]
        );
    }

    #[test]
    fn test_tokenize_bare_dot_is_invalid() {
        let err = Tokenizer::new(". + 1").tokenize().unwrap_err();
        assert!(matches!(err, CalcError::InvalidInput(_)));
    }

    #[test]
    fn test_tokenize_rejects_parentheses() {
        let err = Tokenizer::new("(1)").tokenize().unwrap_err();
        assert_eq!(err, CalcError::invalid_input("unexpected character '('"));
    }

    #[test]
    fn test_tokenizer_remaining() {
        let mut tokenizer = Tokenizer::new("7 + 1");
        tokenizer.next_token().unwrap();
        assert_eq!(tokenizer.remaining(), " + 1");
    }

    // ===== Parser tests =====

    #[test]
    fn test_parse_precedence() {
        let ast = Parser::parse_str("2 + 3 * 4").unwrap();
        assert_eq!(
            ast,
            AstNode::binary(
                AstNode::number(2.0),
                Operation::Add,
                AstNode::binary(AstNode::number(3.0), Operation::Multiply, AstNode::number(4.0)),
            )
        );
    }

    #[test]
    fn test_parse_left_associative() {
        let ast = Parser::parse_str("8 - 3 - 1").unwrap();
        assert_eq!(
            ast,
            AstNode::binary(
                AstNode::binary(AstNode::number(8.0), Operation::Subtract, AstNode::number(3.0)),
                Operation::Subtract,
                AstNode::number(1.0),
            )
        );
    }

    #[test]
    fn test_parse_unary_minus_operand() {
        let ast = Parser::parse_str("-4 * 2").unwrap();
        assert_eq!(
            ast,
            AstNode::binary(
                AstNode::negate(AstNode::number(4.0)),
                Operation::Multiply,
                AstNode::number(2.0),
            )
        );
    }

    #[test]
    fn test_parse_subtract_negative_result() {
        let ast = Parser::parse_str("1 - -2").unwrap();
        assert_eq!(
            ast,
            AstNode::binary(
                AstNode::number(1.0),
                Operation::Subtract,
                AstNode::negate(AstNode::number(2.0)),
            )
        );
    }

    #[test]
    fn test_parse_empty_is_invalid() {
        assert!(matches!(
            Parser::parse_str("   "),
            Err(CalcError::InvalidInput(_))
        ));
        assert!(Parser::new(Vec::new()).parse().is_err());
    }

    #[test]
    fn test_parse_dangling_operator_is_invalid() {
        let err = Parser::parse_str("1 +").unwrap_err();
        assert_eq!(
            err,
            CalcError::invalid_input("expression ends with an operator")
        );
    }

    #[test]
    fn test_parse_leading_binary_operator_is_invalid() {
        assert!(Parser::parse_str("* 2").is_err());
    }

    #[test]
    fn test_parse_adjacent_numbers_is_invalid() {
        let err = Parser::parse_str("1 2").unwrap_err();
        assert!(err.to_string().contains("unexpected token"));
    }
}
