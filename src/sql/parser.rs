//! Parser for the continuous-query surface.
//!
//! Hand-written tokenizer and recursive-descent parser for statements of
//! the shape
//!
//! ```text
//! SELECT <emitter> [EVERY k TUPLES [IN rel, ...]] <proj_list>
//! FROM rel [RANGE n TUPLES|SECONDS] [AS alias], ...
//! [WHERE predicate]
//! ```
//!
//! The EVERY and RANGE clauses are written in square brackets, as in
//! `SELECT RSTREAM [EVERY 2 TUPLES] int FROM src [RANGE 2 SECONDS]`.

use crate::sql::ast::*;
use crate::sql::error::{SqlError, SqlResult};
use std::collections::HashMap;
use std::time::Duration;

/// Parser for single-statement SELECT queries
#[derive(Debug, Clone)]
pub struct SelectParser {
    keywords: HashMap<String, TokenType>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenType {
    Select,
    From,
    Where,
    As,
    Every,
    In,
    Range,
    Tuples,
    Seconds,
    RStream,
    IStream,
    DStream,
    And,
    Or,
    Not,
    True,
    False,
    Null,
    Identifier,
    StringLiteral,
    Integer,
    Float,
    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,
    Comma,
    Asterisk,
    Colon,
    Plus,
    Minus,
    Slash,
    Percent,
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    Eof,
}

#[derive(Debug, Clone)]
struct Token {
    token_type: TokenType,
    value: String,
    position: usize,
}

impl Default for SelectParser {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectParser {
    pub fn new() -> Self {
        let mut keywords = HashMap::new();
        keywords.insert("SELECT".to_string(), TokenType::Select);
        keywords.insert("FROM".to_string(), TokenType::From);
        keywords.insert("WHERE".to_string(), TokenType::Where);
        keywords.insert("AS".to_string(), TokenType::As);
        keywords.insert("EVERY".to_string(), TokenType::Every);
        keywords.insert("IN".to_string(), TokenType::In);
        keywords.insert("RANGE".to_string(), TokenType::Range);
        keywords.insert("TUPLES".to_string(), TokenType::Tuples);
        keywords.insert("SECONDS".to_string(), TokenType::Seconds);
        keywords.insert("RSTREAM".to_string(), TokenType::RStream);
        keywords.insert("ISTREAM".to_string(), TokenType::IStream);
        keywords.insert("DSTREAM".to_string(), TokenType::DStream);
        keywords.insert("AND".to_string(), TokenType::And);
        keywords.insert("OR".to_string(), TokenType::Or);
        keywords.insert("NOT".to_string(), TokenType::Not);
        keywords.insert("TRUE".to_string(), TokenType::True);
        keywords.insert("FALSE".to_string(), TokenType::False);
        keywords.insert("NULL".to_string(), TokenType::Null);

        Self { keywords }
    }

    /// Parse one SELECT statement
    pub fn parse(&self, query: &str) -> SqlResult<SelectStatement> {
        let tokens = self.tokenize(query)?;
        let mut cursor = TokenCursor::new(tokens);
        let statement = parse_select(&mut cursor)?;
        let trailing = cursor.peek();
        if trailing.token_type != TokenType::Eof {
            return Err(SqlError::parse_error(
                format!("unexpected input '{}' after statement", trailing.value),
                Some(trailing.position),
            ));
        }
        Ok(statement)
    }

    fn tokenize(&self, query: &str) -> SqlResult<Vec<Token>> {
        let mut tokens = Vec::new();
        let mut chars = query.chars().peekable();
        let mut position = 0;

        while let Some(&ch) = chars.peek() {
            match ch {
                ' ' | '\t' | '\n' | '\r' => {
                    chars.next();
                    position += 1;
                }
                '(' => {
                    tokens.push(Token {
                        token_type: TokenType::LeftParen,
                        value: "(".to_string(),
                        position,
                    });
                    chars.next();
                    position += 1;
                }
                ')' => {
                    tokens.push(Token {
                        token_type: TokenType::RightParen,
                        value: ")".to_string(),
                        position,
                    });
                    chars.next();
                    position += 1;
                }
                '[' => {
                    tokens.push(Token {
                        token_type: TokenType::LeftBracket,
                        value: "[".to_string(),
                        position,
                    });
                    chars.next();
                    position += 1;
                }
                ']' => {
                    tokens.push(Token {
                        token_type: TokenType::RightBracket,
                        value: "]".to_string(),
                        position,
                    });
                    chars.next();
                    position += 1;
                }
                ',' => {
                    tokens.push(Token {
                        token_type: TokenType::Comma,
                        value: ",".to_string(),
                        position,
                    });
                    chars.next();
                    position += 1;
                }
                '*' => {
                    tokens.push(Token {
                        token_type: TokenType::Asterisk,
                        value: "*".to_string(),
                        position,
                    });
                    chars.next();
                    position += 1;
                }
                ':' => {
                    tokens.push(Token {
                        token_type: TokenType::Colon,
                        value: ":".to_string(),
                        position,
                    });
                    chars.next();
                    position += 1;
                }
                '+' => {
                    tokens.push(Token {
                        token_type: TokenType::Plus,
                        value: "+".to_string(),
                        position,
                    });
                    chars.next();
                    position += 1;
                }
                '-' => {
                    tokens.push(Token {
                        token_type: TokenType::Minus,
                        value: "-".to_string(),
                        position,
                    });
                    chars.next();
                    position += 1;
                }
                '/' => {
                    tokens.push(Token {
                        token_type: TokenType::Slash,
                        value: "/".to_string(),
                        position,
                    });
                    chars.next();
                    position += 1;
                }
                '%' => {
                    tokens.push(Token {
                        token_type: TokenType::Percent,
                        value: "%".to_string(),
                        position,
                    });
                    chars.next();
                    position += 1;
                }
                '=' => {
                    tokens.push(Token {
                        token_type: TokenType::Equal,
                        value: "=".to_string(),
                        position,
                    });
                    chars.next();
                    position += 1;
                }
                '!' => {
                    chars.next();
                    position += 1;
                    if chars.peek() == Some(&'=') {
                        chars.next();
                        position += 1;
                        tokens.push(Token {
                            token_type: TokenType::NotEqual,
                            value: "!=".to_string(),
                            position: position - 2,
                        });
                    } else {
                        return Err(SqlError::parse_error(
                            "expected '=' after '!'",
                            Some(position),
                        ));
                    }
                }
                '<' => {
                    let start = position;
                    chars.next();
                    position += 1;
                    match chars.peek() {
                        Some(&'=') => {
                            chars.next();
                            position += 1;
                            tokens.push(Token {
                                token_type: TokenType::LessThanOrEqual,
                                value: "<=".to_string(),
                                position: start,
                            });
                        }
                        Some(&'>') => {
                            chars.next();
                            position += 1;
                            tokens.push(Token {
                                token_type: TokenType::NotEqual,
                                value: "<>".to_string(),
                                position: start,
                            });
                        }
                        _ => {
                            tokens.push(Token {
                                token_type: TokenType::LessThan,
                                value: "<".to_string(),
                                position: start,
                            });
                        }
                    }
                }
                '>' => {
                    let start = position;
                    chars.next();
                    position += 1;
                    if chars.peek() == Some(&'=') {
                        chars.next();
                        position += 1;
                        tokens.push(Token {
                            token_type: TokenType::GreaterThanOrEqual,
                            value: ">=".to_string(),
                            position: start,
                        });
                    } else {
                        tokens.push(Token {
                            token_type: TokenType::GreaterThan,
                            value: ">".to_string(),
                            position: start,
                        });
                    }
                }
                '\'' | '"' => {
                    let quote = ch;
                    let start = position;
                    chars.next();
                    position += 1;
                    let mut value = String::new();
                    let mut closed = false;

                    while let Some(&next_ch) = chars.peek() {
                        chars.next();
                        position += 1;
                        if next_ch == quote {
                            closed = true;
                            break;
                        }
                        value.push(next_ch);
                    }
                    if !closed {
                        return Err(SqlError::parse_error(
                            "unterminated string literal",
                            Some(start),
                        ));
                    }

                    tokens.push(Token {
                        token_type: TokenType::StringLiteral,
                        value,
                        position: start,
                    });
                }
                '0'..='9' => {
                    let start = position;
                    let mut value = String::new();
                    let mut is_float = false;

                    while let Some(&next_ch) = chars.peek() {
                        if next_ch.is_ascii_digit() {
                            value.push(next_ch);
                            chars.next();
                            position += 1;
                        } else if next_ch == '.' && !is_float {
                            is_float = true;
                            value.push(next_ch);
                            chars.next();
                            position += 1;
                        } else {
                            break;
                        }
                    }

                    tokens.push(Token {
                        token_type: if is_float {
                            TokenType::Float
                        } else {
                            TokenType::Integer
                        },
                        value,
                        position: start,
                    });
                }
                c if c.is_alphabetic() || c == '_' => {
                    let start = position;
                    let mut value = String::new();

                    while let Some(&next_ch) = chars.peek() {
                        if next_ch.is_alphanumeric() || next_ch == '_' {
                            value.push(next_ch);
                            chars.next();
                            position += 1;
                        } else {
                            break;
                        }
                    }

                    let token_type = self
                        .keywords
                        .get(&value.to_uppercase())
                        .copied()
                        .unwrap_or(TokenType::Identifier);
                    tokens.push(Token {
                        token_type,
                        value,
                        position: start,
                    });
                }
                other => {
                    return Err(SqlError::parse_error(
                        format!("unexpected character '{}'", other),
                        Some(position),
                    ));
                }
            }
        }

        tokens.push(Token {
            token_type: TokenType::Eof,
            value: String::new(),
            position,
        });
        Ok(tokens)
    }
}

struct TokenCursor {
    tokens: Vec<Token>,
    position: usize,
}

impl TokenCursor {
    fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    fn peek(&self) -> &Token {
        // tokenize always appends Eof, so the last token is a safe floor
        self.tokens
            .get(self.position)
            .unwrap_or(&self.tokens[self.tokens.len() - 1])
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if self.position < self.tokens.len() - 1 {
            self.position += 1;
        }
        token
    }

    /// Consume the next token if it has the given type
    fn matches(&mut self, token_type: TokenType) -> bool {
        if self.peek().token_type == token_type {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token_type: TokenType, what: &str) -> SqlResult<Token> {
        if self.peek().token_type == token_type {
            Ok(self.advance())
        } else {
            let token = self.peek();
            Err(SqlError::parse_error(
                format!("expected {}, found '{}'", what, token.value),
                Some(token.position),
            ))
        }
    }
}

fn parse_select(cursor: &mut TokenCursor) -> SqlResult<SelectStatement> {
    cursor.expect(TokenType::Select, "SELECT")?;
    let emitter = parse_emitter(cursor)?;
    let projection = parse_projection_list(cursor)?;
    cursor.expect(TokenType::From, "FROM")?;
    let from = parse_from_list(cursor)?;
    let where_clause = if cursor.matches(TokenType::Where) {
        Some(parse_expression(cursor)?)
    } else {
        None
    };

    Ok(SelectStatement {
        emitter,
        projection,
        from,
        where_clause,
    })
}

fn parse_emitter(cursor: &mut TokenCursor) -> SqlResult<Emitter> {
    let token = cursor.advance();
    let kind = match token.token_type {
        TokenType::RStream => EmitterKind::RStream,
        TokenType::IStream => EmitterKind::IStream,
        TokenType::DStream => EmitterKind::DStream,
        _ => {
            return Err(SqlError::parse_error(
                format!(
                    "expected RSTREAM, ISTREAM, or DSTREAM, found '{}'",
                    token.value
                ),
                Some(token.position),
            ));
        }
    };

    let mut cadence = Vec::new();
    if cursor.matches(TokenType::LeftBracket) {
        cursor.expect(TokenType::Every, "EVERY")?;
        let count = parse_count(cursor)?;
        cursor.expect(TokenType::Tuples, "TUPLES")?;
        if cursor.matches(TokenType::In) {
            let relation = cursor.expect(TokenType::Identifier, "a relation name")?;
            cadence.push(CadenceSpec {
                count,
                input: Some(relation.value),
            });
            while cursor.matches(TokenType::Comma) {
                let count = parse_count(cursor)?;
                cursor.expect(TokenType::Tuples, "TUPLES")?;
                cursor.expect(TokenType::In, "IN")?;
                let relation = cursor.expect(TokenType::Identifier, "a relation name")?;
                cadence.push(CadenceSpec {
                    count,
                    input: Some(relation.value),
                });
            }
        } else {
            cadence.push(CadenceSpec {
                count,
                input: None,
            });
        }
        cursor.expect(TokenType::RightBracket, "']'")?;
    }

    Ok(Emitter { kind, cadence })
}

fn parse_count(cursor: &mut TokenCursor) -> SqlResult<u64> {
    let token = cursor.expect(TokenType::Integer, "a tuple count")?;
    token.value.parse::<u64>().map_err(|_| {
        SqlError::parse_error(
            format!("invalid tuple count '{}'", token.value),
            Some(token.position),
        )
    })
}

fn parse_projection_list(cursor: &mut TokenCursor) -> SqlResult<Vec<ProjectionItem>> {
    let mut items = vec![parse_projection_item(cursor)?];
    while cursor.matches(TokenType::Comma) {
        items.push(parse_projection_item(cursor)?);
    }
    Ok(items)
}

fn parse_projection_item(cursor: &mut TokenCursor) -> SqlResult<ProjectionItem> {
    if cursor.matches(TokenType::Asterisk) {
        if cursor.matches(TokenType::As) {
            let name = cursor.expect(TokenType::Identifier, "an output name")?;
            return Ok(ProjectionItem::AliasedWildcard(name.value));
        }
        return Ok(ProjectionItem::Wildcard);
    }

    let expr = parse_expression(cursor)?;
    let alias = if cursor.matches(TokenType::As) {
        Some(cursor.expect(TokenType::Identifier, "an output name")?.value)
    } else {
        None
    };
    Ok(ProjectionItem::Expression { expr, alias })
}

fn parse_from_list(cursor: &mut TokenCursor) -> SqlResult<Vec<RelationInput>> {
    let mut inputs = vec![parse_relation_input(cursor)?];
    while cursor.matches(TokenType::Comma) {
        inputs.push(parse_relation_input(cursor)?);
    }
    Ok(inputs)
}

fn parse_relation_input(cursor: &mut TokenCursor) -> SqlResult<RelationInput> {
    let name = cursor.expect(TokenType::Identifier, "a relation name")?;

    // An absent RANGE clause keeps only the newest tuple.
    let mut range = WindowSpec::Tuples(1);
    if cursor.matches(TokenType::LeftBracket) {
        cursor.expect(TokenType::Range, "RANGE")?;
        let magnitude = parse_count(cursor)?;
        let unit = cursor.advance();
        range = match unit.token_type {
            TokenType::Tuples => WindowSpec::Tuples(magnitude),
            TokenType::Seconds => WindowSpec::Time(Duration::from_secs(magnitude)),
            _ => {
                return Err(SqlError::parse_error(
                    format!("expected TUPLES or SECONDS, found '{}'", unit.value),
                    Some(unit.position),
                ));
            }
        };
        cursor.expect(TokenType::RightBracket, "']'")?;
    }

    let alias = if cursor.matches(TokenType::As) {
        Some(cursor.expect(TokenType::Identifier, "an alias")?.value)
    } else {
        None
    };

    Ok(RelationInput {
        name: name.value,
        alias,
        range,
    })
}

fn parse_expression(cursor: &mut TokenCursor) -> SqlResult<Expr> {
    parse_or(cursor)
}

fn parse_or(cursor: &mut TokenCursor) -> SqlResult<Expr> {
    let mut left = parse_and(cursor)?;
    while cursor.matches(TokenType::Or) {
        let right = parse_and(cursor)?;
        left = Expr::BinaryOp {
            left: Box::new(left),
            op: BinaryOperator::Or,
            right: Box::new(right),
        };
    }
    Ok(left)
}

fn parse_and(cursor: &mut TokenCursor) -> SqlResult<Expr> {
    let mut left = parse_not(cursor)?;
    while cursor.matches(TokenType::And) {
        let right = parse_not(cursor)?;
        left = Expr::BinaryOp {
            left: Box::new(left),
            op: BinaryOperator::And,
            right: Box::new(right),
        };
    }
    Ok(left)
}

fn parse_not(cursor: &mut TokenCursor) -> SqlResult<Expr> {
    if cursor.matches(TokenType::Not) {
        let expr = parse_not(cursor)?;
        return Ok(Expr::UnaryOp {
            op: UnaryOperator::Not,
            expr: Box::new(expr),
        });
    }
    parse_comparison(cursor)
}

fn parse_comparison(cursor: &mut TokenCursor) -> SqlResult<Expr> {
    let left = parse_additive(cursor)?;
    let op = match cursor.peek().token_type {
        TokenType::Equal => BinaryOperator::Equal,
        TokenType::NotEqual => BinaryOperator::NotEqual,
        TokenType::LessThan => BinaryOperator::LessThan,
        TokenType::LessThanOrEqual => BinaryOperator::LessThanOrEqual,
        TokenType::GreaterThan => BinaryOperator::GreaterThan,
        TokenType::GreaterThanOrEqual => BinaryOperator::GreaterThanOrEqual,
        _ => return Ok(left),
    };
    cursor.advance();
    let right = parse_additive(cursor)?;
    Ok(Expr::BinaryOp {
        left: Box::new(left),
        op,
        right: Box::new(right),
    })
}

fn parse_additive(cursor: &mut TokenCursor) -> SqlResult<Expr> {
    let mut left = parse_multiplicative(cursor)?;
    loop {
        let op = match cursor.peek().token_type {
            TokenType::Plus => BinaryOperator::Add,
            TokenType::Minus => BinaryOperator::Subtract,
            _ => return Ok(left),
        };
        cursor.advance();
        let right = parse_multiplicative(cursor)?;
        left = Expr::BinaryOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
        };
    }
}

fn parse_multiplicative(cursor: &mut TokenCursor) -> SqlResult<Expr> {
    let mut left = parse_unary(cursor)?;
    loop {
        let op = match cursor.peek().token_type {
            TokenType::Asterisk => BinaryOperator::Multiply,
            TokenType::Slash => BinaryOperator::Divide,
            TokenType::Percent => BinaryOperator::Modulo,
            _ => return Ok(left),
        };
        cursor.advance();
        let right = parse_unary(cursor)?;
        left = Expr::BinaryOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
        };
    }
}

fn parse_unary(cursor: &mut TokenCursor) -> SqlResult<Expr> {
    if cursor.matches(TokenType::Minus) {
        let expr = parse_unary(cursor)?;
        return Ok(Expr::UnaryOp {
            op: UnaryOperator::Minus,
            expr: Box::new(expr),
        });
    }
    parse_primary(cursor)
}

fn parse_primary(cursor: &mut TokenCursor) -> SqlResult<Expr> {
    let token = cursor.advance();
    match token.token_type {
        TokenType::Integer => {
            let value = token.value.parse::<i64>().map_err(|_| {
                SqlError::parse_error(
                    format!("invalid integer literal '{}'", token.value),
                    Some(token.position),
                )
            })?;
            Ok(Expr::Literal(LiteralValue::Integer(value)))
        }
        TokenType::Float => {
            let value = token.value.parse::<f64>().map_err(|_| {
                SqlError::parse_error(
                    format!("invalid float literal '{}'", token.value),
                    Some(token.position),
                )
            })?;
            Ok(Expr::Literal(LiteralValue::Float(value)))
        }
        TokenType::StringLiteral => Ok(Expr::Literal(LiteralValue::String(token.value))),
        TokenType::True => Ok(Expr::Literal(LiteralValue::Boolean(true))),
        TokenType::False => Ok(Expr::Literal(LiteralValue::Boolean(false))),
        TokenType::Null => Ok(Expr::Literal(LiteralValue::Null)),
        TokenType::LeftParen => {
            let expr = parse_expression(cursor)?;
            cursor.expect(TokenType::RightParen, "')'")?;
            Ok(expr)
        }
        TokenType::Identifier => {
            if cursor.matches(TokenType::LeftParen) {
                let mut args = Vec::new();
                if !cursor.matches(TokenType::RightParen) {
                    args.push(parse_expression(cursor)?);
                    while cursor.matches(TokenType::Comma) {
                        args.push(parse_expression(cursor)?);
                    }
                    cursor.expect(TokenType::RightParen, "')'")?;
                }
                return Ok(Expr::Function {
                    name: token.value.to_lowercase(),
                    args,
                });
            }
            if cursor.matches(TokenType::Colon) {
                let column = cursor.expect(TokenType::Identifier, "a column name")?;
                return Ok(Expr::Column {
                    relation: Some(token.value),
                    name: column.value,
                });
            }
            Ok(Expr::Column {
                relation: None,
                name: token.value,
            })
        }
        _ => Err(SqlError::parse_error(
            format!("unexpected token '{}' in expression", token.value),
            Some(token.position),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(query: &str) -> SelectStatement {
        SelectParser::new().parse(query).unwrap()
    }

    #[test]
    fn test_minimal_select() {
        let stmt = parse("SELECT RSTREAM * FROM src [RANGE 1 TUPLES]");
        assert_eq!(stmt.emitter.kind, EmitterKind::RStream);
        assert!(stmt.emitter.cadence.is_empty());
        assert_eq!(stmt.projection, vec![ProjectionItem::Wildcard]);
        assert_eq!(stmt.from.len(), 1);
        assert_eq!(stmt.from[0].name, "src");
        assert_eq!(stmt.from[0].range, WindowSpec::Tuples(1));
        assert!(stmt.where_clause.is_none());
    }

    #[test]
    fn test_time_range_and_alias() {
        let stmt = parse("SELECT ISTREAM 2, x:int FROM src [RANGE 2 SECONDS] AS x");
        assert_eq!(stmt.from[0].range, WindowSpec::Time(Duration::from_secs(2)));
        assert_eq!(stmt.from[0].alias.as_deref(), Some("x"));
        assert_eq!(
            stmt.projection[1],
            ProjectionItem::Expression {
                expr: Expr::Column {
                    relation: Some("x".to_string()),
                    name: "int".to_string(),
                },
                alias: None,
            }
        );
    }

    #[test]
    fn test_missing_range_defaults_to_one_tuple() {
        let stmt = parse("SELECT RSTREAM int FROM src");
        assert_eq!(stmt.from[0].range, WindowSpec::Tuples(1));
    }

    #[test]
    fn test_every_clause_without_in() {
        let stmt = parse("SELECT RSTREAM [EVERY 2 TUPLES] int AS a FROM src [RANGE 2 SECONDS]");
        assert_eq!(
            stmt.emitter.cadence,
            vec![CadenceSpec {
                count: 2,
                input: None
            }]
        );
    }

    #[test]
    fn test_every_clause_with_relations() {
        let stmt = parse(
            "SELECT RSTREAM [EVERY 2 TUPLES IN src1, 3 TUPLES IN src2] x:a \
             FROM src1 [RANGE 3 TUPLES] AS x, src2 [RANGE 2 TUPLES] AS y",
        );
        assert_eq!(
            stmt.emitter.cadence,
            vec![
                CadenceSpec {
                    count: 2,
                    input: Some("src1".to_string())
                },
                CadenceSpec {
                    count: 3,
                    input: Some("src2".to_string())
                },
            ]
        );
        assert_eq!(stmt.from.len(), 2);
    }

    #[test]
    fn test_aliased_wildcard_and_anonymous_expression() {
        let stmt = parse("SELECT ISTREAM * AS x, (int-1)*2 FROM src [RANGE 2 SECONDS]");
        assert_eq!(
            stmt.projection[0],
            ProjectionItem::AliasedWildcard("x".to_string())
        );
        assert!(matches!(
            stmt.projection[1],
            ProjectionItem::Expression { alias: None, .. }
        ));
    }

    #[test]
    fn test_where_predicate_precedence() {
        let stmt = parse("SELECT RSTREAM int FROM src [RANGE 1 TUPLES] WHERE int % 2 = 0 AND int < 10");
        let Some(Expr::BinaryOp { op, left, .. }) = stmt.where_clause else {
            panic!("expected a binary predicate");
        };
        assert_eq!(op, BinaryOperator::And);
        // The left arm groups the comparison, not the modulo alone.
        assert!(matches!(
            *left,
            Expr::BinaryOp {
                op: BinaryOperator::Equal,
                ..
            }
        ));
    }

    #[test]
    fn test_function_call_lowercased() {
        let stmt = parse("SELECT RSTREAM ABS(int) FROM src [RANGE 1 TUPLES]");
        let ProjectionItem::Expression { expr, .. } = &stmt.projection[0] else {
            panic!("expected an expression item");
        };
        assert_eq!(
            *expr,
            Expr::Function {
                name: "abs".to_string(),
                args: vec![Expr::Column {
                    relation: None,
                    name: "int".to_string()
                }],
            }
        );
    }

    #[test]
    fn test_string_and_comparison_operators() {
        let stmt =
            parse("SELECT RSTREAM int FROM src [RANGE 1 TUPLES] WHERE name <> 'homhom'");
        assert!(matches!(
            stmt.where_clause,
            Some(Expr::BinaryOp {
                op: BinaryOperator::NotEqual,
                ..
            })
        ));
    }

    #[test]
    fn test_parse_error_carries_position() {
        let err = SelectParser::new().parse("SELECT RSTREAM int FROM src ^");
        let Err(SqlError::ParseError { position, .. }) = err else {
            panic!("expected a parse error");
        };
        assert_eq!(position, Some(28));
    }

    #[test]
    fn test_missing_from_rejected() {
        let err = SelectParser::new().parse("SELECT RSTREAM int");
        assert!(matches!(err, Err(SqlError::ParseError { .. })));
    }

    #[test]
    fn test_emitter_required() {
        let err = SelectParser::new().parse("SELECT int FROM src [RANGE 1 TUPLES]");
        assert!(matches!(err, Err(SqlError::ParseError { .. })));
    }
}
