use crate::error::PresetError;
use crate::parse::Span;
use nom::branch::alt;
use nom::bytes::complete::{is_not, tag};
use nom::character::complete::{char, line_ending, multispace0, not_line_ending};
use nom::combinator::{eof, value};
use nom::sequence::delimited;
use nom::IResult;

#[derive(Debug)]
pub enum Token<'a> {
    /// A `[SECTION]` header.
    Section(Span<'a>),
    /// A `key=value` line inside a section.
    Entry { key: Span<'a>, value: Span<'a> },
}

fn whitespace(i: Span) -> IResult<Span, ()> {
    value((), multispace0)(i)
}

fn single_comment(i: Span) -> IResult<Span, Span> {
    delimited(
        alt((tag(";"), tag("#"))),
        not_line_ending,
        alt((line_ending, eof)),
    )(i)
}

fn parse_section(i: Span) -> IResult<Span, Token> {
    let (i, name) = delimited(char('['), is_not("]\r\n"), char(']'))(i)?;
    Ok((i, Token::Section(name)))
}

fn parse_entry(i: Span) -> IResult<Span, Token> {
    let (i, key) = is_not("=\r\n")(i)?;
    let (i, _) = tag("=")(i)?;
    let (i, value) = not_line_ending(i)?;
    Ok((i, Token::Entry { key, value }))
}

fn parse_tokens(mut span: Span) -> IResult<Span, Vec<Token>> {
    let mut values = Vec::new();
    while !span.is_empty() {
        // important to munch whitespace first.
        if let Ok((input, _)) = whitespace(span) {
            span = input;
        }
        if span.is_empty() {
            break;
        }
        if let Ok((input, _)) = single_comment(span) {
            span = input;
            continue;
        }
        if let Ok((input, token)) = parse_section(span) {
            span = input;
            values.push(token);
            continue;
        }
        let (input, token) = parse_entry(span)?;
        span = input;
        values.push(token)
    }
    Ok((span, values))
}

pub fn do_lex(input: &str) -> Result<Vec<Token>, PresetError> {
    let span = Span::new(input.trim_end());
    let (_, tokens) = parse_tokens(span).map_err(|e| match e {
        nom::Err::Error(e) | nom::Err::Failure(e) => {
            let input: Span = e.input;
            PresetError::LexerError {
                offset: input.location_offset(),
                row: input.location_line(),
                col: input.get_column(),
            }
        }
        _ => PresetError::LexerError {
            offset: 0,
            row: 0,
            col: 0,
        },
    })?;
    Ok(tokens)
}

#[cfg(test)]
mod test {
    use super::*;

    const PRESET: &str = "[CLOUDS_POPCORN_MODIFICATOR]\r\nIsActive=1\r\nCloudDistanceFactor=0.0000000005\r\n\r\n; written by hand\r\n[PRESET COMMENTS]\r\nComment=68656C6C6F\r\n";

    #[test]
    fn lexes_sections_and_entries() {
        let tokens = do_lex(PRESET).unwrap();
        assert_eq!(tokens.len(), 5);
        match &tokens[0] {
            Token::Section(name) => assert_eq!(*name.fragment(), "CLOUDS_POPCORN_MODIFICATOR"),
            other => panic!("expected section, got {other:?}"),
        }
        match &tokens[1] {
            Token::Entry { key, value } => {
                assert_eq!(*key.fragment(), "IsActive");
                assert_eq!(*value.fragment(), "1");
            }
            other => panic!("expected entry, got {other:?}"),
        }
    }

    #[test]
    fn reports_lex_error_location() {
        let err = do_lex("[GOOD]\r\nIsActive=1\r\nbroken line\r\n").unwrap_err();
        match err {
            PresetError::LexerError { row, .. } => assert_eq!(row, 3),
            other => panic!("expected lexer error, got {other:?}"),
        }
    }

    #[test]
    fn empty_values_are_allowed() {
        let tokens = do_lex("[S]\r\nName=\r\n").unwrap();
        match &tokens[1] {
            Token::Entry { value, .. } => assert_eq!(*value.fragment(), ""),
            other => panic!("expected entry, got {other:?}"),
        }
    }
}
