//! CSS tokenization boundary, built on the `cssparser` crate.
//!
//! Two jobs live here: validating manually edited selector text before it
//! reaches the query engine, and scanning `:root` rules out of stylesheet
//! text to discover custom properties. Both are lenient the way a browser
//! is lenient: unknown-but-well-formed constructs pass validation, and
//! malformed rules are skipped with a warning rather than aborting the
//! whole scan.

use cssparser::{Delimiter, ParseError as CssParseError, Parser, ParserInput, Token};

use crate::error::{Error, Result};

/// Validate manually edited selector text.
///
/// Rejects token-level syntax errors (`Error::InvalidSelector`) without
/// touching any engine state; the caller keeps the user's typed text so it
/// can be corrected in place. This is a syntax gate only; whether the
/// selector matches anything is reported separately as an advisory count.
pub fn validate_selector(text: &str) -> Result<()> {
    if text.trim().is_empty() {
        return Err(Error::invalid_selector(text, "empty selector"));
    }

    let mut input = ParserInput::new(text);
    let mut parser = Parser::new(&mut input);

    loop {
        let token = match parser.next_including_whitespace() {
            Ok(t) => t.clone(),
            Err(_) => break,
        };

        match token {
            Token::Ident(_)
            | Token::WhiteSpace(_)
            | Token::IDHash(_)
            | Token::Hash(_)
            | Token::Comma => {}

            Token::Delim('.') => {
                parser.expect_ident().map_err(|_| {
                    Error::invalid_selector(text, "expected class name after '.'")
                })?;
            }

            Token::Delim('>') | Token::Delim('*') | Token::Delim('+') | Token::Delim('~') => {}

            Token::Colon => {
                let next = match parser.next() {
                    Ok(t) => t.clone(),
                    Err(_) => {
                        return Err(Error::invalid_selector(
                            text,
                            "expected pseudo-class name after ':'",
                        ));
                    }
                };
                match next {
                    Token::Ident(_) => {}
                    // Pseudo-element (`::before`).
                    Token::Colon => {
                        parser.expect_ident().map_err(|_| {
                            Error::invalid_selector(text, "expected pseudo-element name after '::'")
                        })?;
                    }
                    Token::Function(_) => consume_nested(&mut parser, text)?,
                    _ => {
                        return Err(Error::invalid_selector(
                            text,
                            "expected pseudo-class name after ':'",
                        ));
                    }
                }
            }

            Token::Function(_) | Token::SquareBracketBlock => consume_nested(&mut parser, text)?,

            other => {
                return Err(Error::invalid_selector(
                    text,
                    format!("unexpected token {:?}", other),
                ));
            }
        }
    }

    Ok(())
}

fn consume_nested(parser: &mut Parser<'_, '_>, text: &str) -> Result<()> {
    parser
        .parse_nested_block(|p| {
            while p.next_including_whitespace().is_ok() {}
            Ok::<(), CssParseError<'_, ()>>(())
        })
        .map_err(|_| Error::invalid_selector(text, "malformed block"))
}

/// Scan stylesheet texts for custom properties declared on `:root`.
///
/// Returns `(name, value)` pairs in source order, later sources after
/// earlier ones. Rules that fail to parse are skipped with a warning; the
/// scan itself never fails.
pub fn discover_root_variables(css_sources: &[&str]) -> Vec<(String, String)> {
    let mut out = vec![];
    for source in css_sources {
        scan_source(source, &mut out);
    }
    out
}

fn scan_source(css: &str, out: &mut Vec<(String, String)>) {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);

    loop {
        parser.skip_whitespace();
        if parser.is_exhausted() {
            break;
        }
        if let Err(message) = scan_rule(&mut parser, out) {
            tracing::warn!("skipping rule during variable discovery: {}", message);
            skip_to_next_rule(&mut parser);
        }
    }
}

fn scan_rule<'i>(
    parser: &mut Parser<'i, '_>,
    out: &mut Vec<(String, String)>,
) -> std::result::Result<(), String> {
    // At-rules don't declare root variables here; skip them whole.
    let state = parser.state();
    let is_at_rule = matches!(parser.next(), Ok(Token::AtKeyword(_)));
    if is_at_rule {
        skip_at_rule(parser);
        return Ok(());
    }
    parser.reset(&state);

    let prelude = parser
        .parse_until_before(Delimiter::CurlyBracketBlock, |p| {
            let start = p.position();
            while p.next_including_whitespace().is_ok() {}
            Ok::<_, CssParseError<'i, ()>>(p.slice_from(start).trim().to_string())
        })
        .map_err(|e| format!("failed to read selector: {:?}", e))?;

    let is_root = prelude == ":root";

    match parser.next() {
        Ok(Token::CurlyBracketBlock) => {
            let declarations = parser
                .parse_nested_block(|block| {
                    Ok::<_, CssParseError<'i, ()>>(scan_declarations(block))
                })
                .map_err(|e| format!("failed to read declaration block: {:?}", e))?;
            if is_root {
                out.extend(
                    declarations
                        .into_iter()
                        .filter(|(name, _)| name.starts_with("--")),
                );
            }
            Ok(())
        }
        _ => Err(format!("expected '{{' after selector '{}'", prelude)),
    }
}

fn scan_declarations<'i>(block: &mut Parser<'i, '_>) -> Vec<(String, String)> {
    let mut declarations = vec![];

    loop {
        block.skip_whitespace();
        if block.is_exhausted() {
            break;
        }

        let name = match block.expect_ident() {
            Ok(name) => name.to_string(),
            Err(_) => {
                skip_declaration(block);
                continue;
            }
        };
        if block.expect_colon().is_err() {
            skip_declaration(block);
            continue;
        }

        let value = block
            .parse_until_before(Delimiter::Semicolon, |v| {
                let start = v.position();
                while v.next_including_whitespace().is_ok() {}
                Ok::<_, CssParseError<'i, ()>>(v.slice_from(start).trim().to_string())
            })
            .unwrap_or_default();
        let _ = block.try_parse(|p| p.expect_semicolon());

        declarations.push((name, value));
    }

    declarations
}

fn skip_declaration<'i>(parser: &mut Parser<'i, '_>) {
    let _ = parser.parse_until_after(Delimiter::Semicolon, |p| {
        while p.next_including_whitespace().is_ok() {}
        Ok::<(), CssParseError<'i, ()>>(())
    });
}

fn skip_at_rule(parser: &mut Parser<'_, '_>) {
    let _ = parser.parse_until_before(
        Delimiter::Semicolon | Delimiter::CurlyBracketBlock,
        |p| {
            while p.next_including_whitespace().is_ok() {}
            Ok::<(), CssParseError<'_, ()>>(())
        },
    );
    if let Ok(Token::CurlyBracketBlock) = parser.next() {
        let _ = parser.parse_nested_block(|p| {
            while p.next_including_whitespace().is_ok() {}
            Ok::<(), CssParseError<'_, ()>>(())
        });
    }
}

fn skip_to_next_rule(parser: &mut Parser<'_, '_>) {
    loop {
        match parser.next() {
            Ok(Token::CurlyBracketBlock) => {
                let _ = parser.parse_nested_block(|p| {
                    while p.next_including_whitespace().is_ok() {}
                    Ok::<(), CssParseError<'_, ()>>(())
                });
                return;
            }
            Ok(_) => {}
            Err(_) => return,
        }
    }
}
