//! CSS syntax parser using the `cssparser` crate.
//!
//! This module tokenizes CSS input and builds the feature-oriented syntax
//! tree consumed by the analyzer. It keeps only what baseline analysis
//! needs: property declarations, value keywords and functions, at-rule
//! names and preludes, and the feature-bearing pieces of selectors, all
//! with exact source spans.

use cssparser::{Delimiter, ParseError as CssParseError, Parser, ParserInput, Token};

use super::supports;
use crate::{Error, Result};
use crate::ast::{
    AtRule, AtRulePrelude, Block, BlockItem, Declaration, MediaFeature, Rule, SelectorComponent,
    SourceSpan, StyleRule, Stylesheet, ValueComponent, utf16_len,
};

/// Parse a CSS stylesheet string into a [`Stylesheet`].
///
/// Parse errors in individual rules do not fail the whole parse: the
/// offending rule is logged via `tracing::warn!` and skipped, and parsing
/// resumes at the next rule. Returns [`Error::Parse`] only when the input
/// contains rules and none of them could be parsed.
pub fn parse_stylesheet(css: &str) -> Result<Stylesheet> {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    let mut rules = vec![];
    let mut first_error = None;

    loop {
        parser.skip_whitespace();

        if parser.is_exhausted() {
            break;
        }

        match parse_rule(&mut parser) {
            Ok(rule) => rules.push(rule),
            Err(e) => {
                tracing::warn!(
                    "CSS parse error at line {}, column {}: skipping rule",
                    e.location.line + 1,
                    e.location.column
                );
                if first_error.is_none() {
                    first_error = Some(Error::parse(
                        format!("{:?}", e.kind),
                        e.location.line + 1,
                        e.location.column,
                    ));
                }
                skip_to_next_rule(&mut parser);
            }
        }
    }

    match first_error {
        Some(error) if rules.is_empty() => Err(error),
        _ => Ok(Stylesheet { rules }),
    }
}

/// Parse a single rule: an at-rule or a style rule.
fn parse_rule<'i>(parser: &mut Parser<'i, '_>) -> std::result::Result<Rule, CssParseError<'i, ()>> {
    let state = parser.state();
    let token = match parser.next() {
        Ok(t) => t.clone(),
        Err(e) => return Err(e.into()),
    };
    parser.reset(&state);

    if matches!(token, Token::AtKeyword(_)) {
        parse_at_rule(parser).map(Rule::At)
    } else {
        parse_style_rule(parser).map(Rule::Style)
    }
}

/// Parse an at-rule: `@name prelude? ( `{ ... }` | `;` )`.
fn parse_at_rule<'i>(
    parser: &mut Parser<'i, '_>,
) -> std::result::Result<AtRule, CssParseError<'i, ()>> {
    let start = parser.current_source_location();
    let name = match parser.next() {
        Ok(Token::AtKeyword(name)) => name.to_string(),
        Ok(token) => {
            let token = token.clone();
            return Err(parser.new_unexpected_token_error(token));
        }
        Err(e) => return Err(e.into()),
    };
    let name_span = SourceSpan::from_width(start, 1 + utf16_len(&name));

    let prelude = parser.parse_until_before(
        Delimiter::CurlyBracketBlock | Delimiter::Semicolon,
        |p| parse_at_rule_prelude(p, &name),
    )?;

    let block = match parser.next() {
        Ok(Token::CurlyBracketBlock) => Some(parser.parse_nested_block(parse_block)?),
        Ok(Token::Semicolon) => None,
        Ok(token) => {
            let token = token.clone();
            return Err(parser.new_unexpected_token_error(token));
        }
        // Statement at-rule at end of input, e.g. a trailing `@import`.
        Err(_) => None,
    };

    Ok(AtRule {
        name,
        name_span,
        prelude,
        block,
    })
}

/// Parse an at-rule prelude according to the rule name.
///
/// Only `@supports` and `@media` preludes carry baseline-relevant structure;
/// everything else is consumed and recorded as [`AtRulePrelude::Raw`].
fn parse_at_rule_prelude<'i>(
    parser: &mut Parser<'i, '_>,
    name: &str,
) -> std::result::Result<AtRulePrelude, CssParseError<'i, ()>> {
    parser.skip_whitespace();
    if parser.is_exhausted() {
        return Ok(AtRulePrelude::None);
    }

    match name.to_ascii_lowercase().as_str() {
        "supports" => supports::parse_supports_condition(parser).map(AtRulePrelude::Supports),
        "media" => parse_media_features(parser).map(AtRulePrelude::Media),
        _ => {
            while parser.next().is_ok() {}
            Ok(AtRulePrelude::Raw)
        }
    }
}

/// Parse a style rule: `selectors { block }`.
fn parse_style_rule<'i>(
    parser: &mut Parser<'i, '_>,
) -> std::result::Result<StyleRule, CssParseError<'i, ()>> {
    let selectors =
        parser.parse_until_before(Delimiter::CurlyBracketBlock, collect_selector_components)?;

    match parser.next() {
        Ok(Token::CurlyBracketBlock) => {
            let block = parser.parse_nested_block(parse_block)?;
            Ok(StyleRule { selectors, block })
        }
        Ok(token) => {
            let token = token.clone();
            Err(parser.new_unexpected_token_error(token))
        }
        Err(e) => Err(e.into()),
    }
}

/// Parse the body of a rule: declarations interleaved with nested rules.
fn parse_block<'i>(
    parser: &mut Parser<'i, '_>,
) -> std::result::Result<Block, CssParseError<'i, ()>> {
    let mut items = vec![];

    loop {
        parser.skip_whitespace();

        if parser.is_exhausted() {
            break;
        }

        let state = parser.state();
        let token = match parser.next() {
            Ok(t) => t.clone(),
            Err(_) => break,
        };
        parser.reset(&state);

        if matches!(token, Token::AtKeyword(_)) {
            match parse_at_rule(parser) {
                Ok(rule) => items.push(BlockItem::Rule(Rule::At(rule))),
                Err(_) => {
                    tracing::debug!("skipping malformed nested at-rule");
                    skip_to_next_rule(parser);
                }
            }
        } else if looks_like_nested_rule(parser) {
            match parse_style_rule(parser) {
                Ok(rule) => items.push(BlockItem::Rule(Rule::Style(rule))),
                Err(_) => {
                    tracing::debug!("skipping malformed nested rule");
                    skip_to_next_rule(parser);
                }
            }
        } else {
            match parse_declaration(parser) {
                Ok(declaration) => items.push(BlockItem::Declaration(declaration)),
                Err(_) => {
                    tracing::debug!("skipping malformed declaration");
                    skip_declaration(parser);
                }
            }
        }
    }

    Ok(Block { items })
}

/// Whether the upcoming tokens form a nested style rule rather than a
/// declaration: a `{` appears before any `;` at this nesting level.
fn looks_like_nested_rule(parser: &mut Parser<'_, '_>) -> bool {
    let state = parser.state();
    let mut nested = false;
    loop {
        match parser.next() {
            Ok(Token::CurlyBracketBlock) => {
                nested = true;
                break;
            }
            Ok(Token::Semicolon) | Err(_) => break,
            Ok(_) => {}
        }
    }
    parser.reset(&state);
    nested
}

/// Parse one declaration: `property: value ;?`.
fn parse_declaration<'i>(
    parser: &mut Parser<'i, '_>,
) -> std::result::Result<Declaration, CssParseError<'i, ()>> {
    parser.skip_whitespace();
    let start = parser.current_source_location();
    let property = parser.expect_ident()?.to_string();
    let property_span = SourceSpan::from_width(start, utf16_len(&property));
    parser.expect_colon()?;

    let value = parser.parse_until_before(Delimiter::Semicolon, collect_value_components)?;
    let _ = parser.try_parse(|p| p.expect_semicolon());

    Ok(Declaration {
        property,
        property_span,
        value,
    })
}

/// Collect the identifier and function components of a declaration value.
///
/// Numbers, strings, dimensions, and the `!important` flag carry no
/// baseline data and are consumed without producing components. A function
/// span runs from the first character of its name through the closing
/// parenthesis.
pub(crate) fn collect_value_components<'i>(
    parser: &mut Parser<'i, '_>,
) -> std::result::Result<Vec<ValueComponent>, CssParseError<'i, ()>> {
    let mut components = vec![];

    loop {
        parser.skip_whitespace();
        let start = parser.current_source_location();
        let token = match parser.next() {
            Ok(t) => t.clone(),
            Err(_) => break,
        };

        match token {
            Token::Ident(value) => {
                let value = value.to_string();
                let span = SourceSpan::from_width(start, utf16_len(&value));
                components.push(ValueComponent::Keyword { value, span });
            }
            Token::Function(name) => {
                let name = name.to_string();
                let arguments = parser.parse_nested_block(collect_value_components)?;
                let end = parser.current_source_location();
                components.push(ValueComponent::Function {
                    name,
                    span: SourceSpan::from_locations(start, end),
                    arguments,
                });
            }
            Token::Delim('!') => {
                // `!important`
                let _ = parser.try_parse(|p| p.expect_ident().map(|_| ()));
            }
            _ => {}
        }
    }

    Ok(components)
}

/// Collect the feature-bearing components of a selector list: pseudo-classes,
/// pseudo-elements, and the nesting selector. Everything else (type, class,
/// id, attribute selectors, combinators) is consumed without producing
/// components.
pub(crate) fn collect_selector_components<'i>(
    parser: &mut Parser<'i, '_>,
) -> std::result::Result<Vec<SelectorComponent>, CssParseError<'i, ()>> {
    let mut components = vec![];

    loop {
        parser.skip_whitespace();
        let start = parser.current_source_location();
        let token = match parser.next() {
            Ok(t) => t.clone(),
            Err(_) => break,
        };

        match token {
            Token::Colon => {
                let mut colons = 1u32;
                let mut token = match parser.next() {
                    Ok(t) => t.clone(),
                    Err(_) => break,
                };
                if token == Token::Colon {
                    colons = 2;
                    token = match parser.next() {
                        Ok(t) => t.clone(),
                        Err(_) => break,
                    };
                }

                // Span covers the colon(s) and the name; functional
                // arguments are excluded.
                let (name, arguments) = match token {
                    Token::Ident(name) => (name.to_string(), vec![]),
                    Token::Function(name) => {
                        let name = name.to_string();
                        let arguments = parser.parse_nested_block(collect_selector_components)?;
                        (name, arguments)
                    }
                    _ => continue,
                };
                let span = SourceSpan::from_width(start, colons + utf16_len(&name));

                if colons == 2 {
                    components.push(SelectorComponent::PseudoElement {
                        name,
                        span,
                        arguments,
                    });
                } else {
                    components.push(SelectorComponent::PseudoClass {
                        name,
                        span,
                        arguments,
                    });
                }
            }
            Token::Delim('&') => {
                components.push(SelectorComponent::Nesting {
                    span: SourceSpan::from_width(start, 1),
                });
            }
            _ => {}
        }
    }

    Ok(components)
}

/// Extract the media features referenced anywhere in a media query list.
fn parse_media_features<'i>(
    parser: &mut Parser<'i, '_>,
) -> std::result::Result<Vec<MediaFeature>, CssParseError<'i, ()>> {
    let mut features = vec![];

    loop {
        let token = match parser.next() {
            Ok(t) => t.clone(),
            Err(_) => break,
        };
        if token == Token::ParenthesisBlock {
            parser.parse_nested_block(|p| collect_media_in_parens(p, &mut features))?;
        }
    }

    Ok(features)
}

/// Collect the feature name inside one parenthesized media condition,
/// recursing into condition groups like `((min-width: 0) and (hover))`.
fn collect_media_in_parens<'i>(
    parser: &mut Parser<'i, '_>,
    features: &mut Vec<MediaFeature>,
) -> std::result::Result<(), CssParseError<'i, ()>> {
    let mut named = false;

    loop {
        parser.skip_whitespace();
        let start = parser.current_source_location();
        let token = match parser.next() {
            Ok(t) => t.clone(),
            Err(_) => break,
        };

        match token {
            Token::Ident(name) => {
                let keyword = name.eq_ignore_ascii_case("not")
                    || name.eq_ignore_ascii_case("and")
                    || name.eq_ignore_ascii_case("or");
                if !named && !keyword {
                    features.push(MediaFeature {
                        name: name.to_string(),
                        span: SourceSpan::from_width(start, utf16_len(name.as_ref())),
                    });
                    named = true;
                }
            }
            // Feature value follows; stop treating identifiers as names.
            Token::Colon => named = true,
            Token::ParenthesisBlock => {
                parser.parse_nested_block(|p| collect_media_in_parens(p, features))?;
            }
            _ => {}
        }
    }

    Ok(())
}

/// Skip to the next rule (error recovery).
fn skip_to_next_rule(parser: &mut Parser<'_, '_>) {
    loop {
        match parser.next() {
            Ok(Token::CurlyBracketBlock) => {
                let _ = parser.parse_nested_block(|p| {
                    while !p.is_exhausted() {
                        let _ = p.next();
                    }
                    Ok::<_, CssParseError<'_, ()>>(())
                });
                return;
            }
            Ok(Token::Semicolon) | Err(_) => return,
            _ => {}
        }
    }
}

/// Skip to the end of the current declaration (error recovery).
fn skip_declaration(parser: &mut Parser<'_, '_>) {
    loop {
        match parser.next() {
            Ok(Token::Semicolon) | Err(_) => return,
            _ => {}
        }
    }
}
