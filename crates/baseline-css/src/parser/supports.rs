//! `@supports` condition parsing.
//!
//! Builds the boolean expression tree behind an `@supports` prelude.
//! Anything outside the condition grammar (general-enclosed productions,
//! unknown functions, mixed `and`/`or` without parentheses) collapses to
//! [`SupportsCondition::Unknown`], which asserts nothing.

use cssparser::{ParseError as CssParseError, Parser, Token};

use super::css_parser::{collect_selector_components, collect_value_components};
use crate::ast::SupportsCondition;

/// Parse a full `@supports` prelude.
pub(super) fn parse_supports_condition<'i>(
    parser: &mut Parser<'i, '_>,
) -> Result<SupportsCondition, CssParseError<'i, ()>> {
    let condition = parse_condition(parser)?;
    parser.skip_whitespace();
    if !parser.is_exhausted() {
        // Trailing input the grammar does not cover.
        while parser.next().is_ok() {}
        return Ok(SupportsCondition::Unknown);
    }
    Ok(condition)
}

fn parse_condition<'i>(
    parser: &mut Parser<'i, '_>,
) -> Result<SupportsCondition, CssParseError<'i, ()>> {
    parser.skip_whitespace();

    if try_keyword(parser, "not") {
        let inner = parse_in_parens(parser)?;
        return Ok(SupportsCondition::Not(Box::new(inner)));
    }

    let first = parse_in_parens(parser)?;

    if try_keyword(parser, "and") {
        return parse_chain(parser, first, "and").map(SupportsCondition::And);
    }
    if try_keyword(parser, "or") {
        return parse_chain(parser, first, "or").map(SupportsCondition::Or);
    }
    Ok(first)
}

/// Parse the remaining terms of an `and`/`or` chain. The first term and one
/// combinator keyword have already been consumed.
fn parse_chain<'i>(
    parser: &mut Parser<'i, '_>,
    first: SupportsCondition,
    combinator: &str,
) -> Result<Vec<SupportsCondition>, CssParseError<'i, ()>> {
    let mut terms = vec![first, parse_in_parens(parser)?];
    while try_keyword(parser, combinator) {
        terms.push(parse_in_parens(parser)?);
    }
    Ok(terms)
}

/// Consume one ident token if it matches `keyword` case-insensitively.
fn try_keyword<'i>(parser: &mut Parser<'i, '_>, keyword: &str) -> bool {
    parser
        .try_parse(|p| -> Result<(), CssParseError<'i, ()>> {
            match p.next() {
                Ok(Token::Ident(name)) if name.eq_ignore_ascii_case(keyword) => Ok(()),
                Ok(token) => {
                    let token = token.clone();
                    Err(p.new_unexpected_token_error(token))
                }
                Err(e) => Err(e.into()),
            }
        })
        .is_ok()
}

/// Parse one `<supports-in-parens>`: a parenthesized condition or feature
/// test, or a `selector(...)` test.
fn parse_in_parens<'i>(
    parser: &mut Parser<'i, '_>,
) -> Result<SupportsCondition, CssParseError<'i, ()>> {
    parser.skip_whitespace();
    let token = match parser.next() {
        Ok(t) => t.clone(),
        Err(e) => return Err(e.into()),
    };

    match token {
        Token::ParenthesisBlock => parser.parse_nested_block(parse_parenthesized),
        Token::Function(name) if name.eq_ignore_ascii_case("selector") => {
            let components = parser.parse_nested_block(collect_selector_components)?;
            Ok(SupportsCondition::Selector(components))
        }
        Token::Function(_) => {
            // General-enclosed, e.g. `font-tech(...)`.
            parser.parse_nested_block(|p| {
                while p.next().is_ok() {}
                Ok::<_, CssParseError<'i, ()>>(())
            })?;
            Ok(SupportsCondition::Unknown)
        }
        _ => Ok(SupportsCondition::Unknown),
    }
}

/// Parse the contents of a parenthesized term: a nested condition or a
/// `(property: value)` feature test.
fn parse_parenthesized<'i>(
    parser: &mut Parser<'i, '_>,
) -> Result<SupportsCondition, CssParseError<'i, ()>> {
    parser.skip_whitespace();
    let state = parser.state();

    match parser.next() {
        Ok(Token::Ident(name)) if name.eq_ignore_ascii_case("not") => {
            parser.reset(&state);
            return parse_supports_condition(parser);
        }
        Ok(Token::ParenthesisBlock) | Ok(Token::Function(_)) => {
            parser.reset(&state);
            return parse_supports_condition(parser);
        }
        _ => parser.reset(&state),
    }

    let declaration = parser.try_parse(|p| -> Result<SupportsCondition, CssParseError<'i, ()>> {
        let property = p.expect_ident()?.to_string();
        p.expect_colon()?;
        let value = collect_value_components(p)?;
        Ok(SupportsCondition::Declaration { property, value })
    });
    if let Ok(condition) = declaration {
        return Ok(condition);
    }

    // General-enclosed.
    while parser.next().is_ok() {}
    Ok(SupportsCondition::Unknown)
}
