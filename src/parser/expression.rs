//! Formula grammar, parsed from the token stream.
//!
//! ```text
//! expression     := additive
//! additive       := multiplicative (("+" | "-") multiplicative)*
//! multiplicative := unary (("*" | "/") unary)*
//! unary          := "-" unary | primary
//! primary        := number | field_ref | "(" expression ")"
//! field_ref      := identifier ("." identifier)?
//! ```

use super::core::Parser;
use super::prelude::*;
use crate::ast::{BinaryOperator, Expr, FieldRef};
use crate::tokenizer::{
    symbol::{Delimiter, Operator},
    token::{Token, TokenizerError},
    Tokenizer,
};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormulaError {
    #[error(transparent)]
    Tokenize(#[from] TokenizerError),
    #[error(transparent)]
    Parse(#[from] super::core::ParseError),
    #[error("unconsumed input after expression, at token {0}")]
    TrailingTokens(usize),
}

/// Parses one formula string into an expression tree.
#[tracing::instrument(level = "debug")]
pub fn parse_formula(input: &str) -> Result<Expr, FormulaError> {
    let tokens: Vec<Token> = Tokenizer::new()
        .tokenize(input)?
        .into_iter()
        .map(|spanned| spanned.token)
        .collect();
    let (pos, expr) = parse_expression().parse(&tokens, 0)?;
    if pos != tokens.len() {
        return Err(FormulaError::TrailingTokens(pos));
    }
    Ok(expr)
}

pub fn parse_expression() -> impl Parser<Token, Expr> {
    with_context(lazy(parse_additive), "expression")
}

fn parse_additive() -> impl Parser<Token, Expr> {
    with_context(
        map(
            tuple2(
                parse_multiplicative(),
                many(tuple2(
                    choice(vec![
                        Box::new(parse_operator_add()),
                        Box::new(parse_operator_subtract()),
                    ]),
                    parse_multiplicative(),
                )),
            ),
            |(first, rest)| {
                rest.into_iter()
                    .fold(first, |left, (op, right)| Expr::BinaryOp {
                        op,
                        left: Box::new(left),
                        right: Box::new(right),
                    })
            },
        ),
        "additive",
    )
}

fn parse_multiplicative() -> impl Parser<Token, Expr> {
    with_context(
        map(
            tuple2(
                parse_unary(),
                many(tuple2(
                    choice(vec![
                        Box::new(parse_operator_multiply()),
                        Box::new(parse_operator_divide()),
                    ]),
                    parse_unary(),
                )),
            ),
            |(first, rest)| {
                rest.into_iter()
                    .fold(first, |left, (op, right)| Expr::BinaryOp {
                        op,
                        left: Box::new(left),
                        right: Box::new(right),
                    })
            },
        ),
        "multiplicative",
    )
}

fn parse_operator_add() -> impl Parser<Token, BinaryOperator> {
    map(equal(Token::Operator(Operator::Plus)), |_| {
        BinaryOperator::Add
    })
}

fn parse_operator_subtract() -> impl Parser<Token, BinaryOperator> {
    map(equal(Token::Operator(Operator::Minus)), |_| {
        BinaryOperator::Subtract
    })
}

fn parse_operator_multiply() -> impl Parser<Token, BinaryOperator> {
    map(equal(Token::Operator(Operator::Multiply)), |_| {
        BinaryOperator::Multiply
    })
}

fn parse_operator_divide() -> impl Parser<Token, BinaryOperator> {
    map(equal(Token::Operator(Operator::Divide)), |_| {
        BinaryOperator::Divide
    })
}

fn parse_unary() -> impl Parser<Token, Expr> {
    with_context(
        choice(vec![
            Box::new(map(
                preceded(
                    equal(Token::Operator(Operator::Minus)),
                    lazy(parse_unary),
                ),
                |expr| Expr::Negate(Box::new(expr)),
            )),
            Box::new(parse_primary()),
        ]),
        "unary",
    )
}

fn parse_primary() -> impl Parser<Token, Expr> {
    with_context(
        choice(vec![
            Box::new(parse_number()),
            Box::new(map(parse_field_ref(), Expr::Field)),
            Box::new(delimited(
                as_unit(equal(Token::Delimiter(Delimiter::OpenParen))),
                lazy(parse_expression),
                as_unit(equal(Token::Delimiter(Delimiter::CloseParen))),
            )),
        ]),
        "primary",
    )
}

fn parse_number() -> impl Parser<Token, Expr> {
    with_context(
        satisfy(|token: &Token| match token {
            Token::Number(n) => Some(Expr::Number(*n)),
            _ => None,
        }),
        "number",
    )
}

fn parse_identifier() -> impl Parser<Token, String> {
    with_context(
        satisfy(|token: &Token| match token {
            Token::Identifier(name) => Some(name.clone()),
            _ => None,
        }),
        "identifier",
    )
}

fn parse_field_ref() -> impl Parser<Token, FieldRef> {
    with_context(
        map(
            tuple2(
                parse_identifier(),
                optional(preceded(
                    equal(Token::Operator(Operator::Dot)),
                    parse_identifier(),
                )),
            ),
            |(first, rest)| match rest {
                Some(field) => FieldRef::Qualified {
                    entity: first,
                    field,
                },
                None => FieldRef::Bare(first),
            },
        ),
        "field reference",
    )
}
