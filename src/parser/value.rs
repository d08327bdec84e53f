use super::*;
use super::document::parse_object_body;
use crate::resolver::concatenate;

/// Parse a field value or array element: one or more adjacent simple
/// values, objects, arrays or substitutions on the same line.
pub(super) fn parse_value(parser: &mut Parser) -> Result<Value, HoconError> {
    let (line, column) = (parser.line(), parser.column());
    let mut pieces: Vec<Value> = Vec::new();
    let mut has_substitution = false;
    let mut first_unquoted = false;

    loop {
        if !starts_value(parser.peek()) {
            break;
        }
        if !pieces.is_empty() && parser.peek_is_spaced() {
            pieces.push(Value::String(parser.peek_space().to_string()));
        }
        if pieces.is_empty() {
            first_unquoted = matches!(parser.peek(), Some(Token::Unquoted(_)));
        }

        let piece = match parser.peek() {
            Some(Token::Quoted(_)) => parse_quoted_value(parser)?,
            Some(Token::Unquoted(_)) => parse_unquoted_value(parser)?,
            Some(Token::Substitution { .. }) => {
                has_substitution = true;
                parse_substitution_value(parser)?
            }
            Some(Token::LBrace) => parse_object_value(parser)?,
            Some(Token::LBracket) => parse_array_value(parser)?,
            _ => unreachable!("starts_value checked the token"),
        };
        pieces.push(piece);
    }

    match pieces.len() {
        0 => {
            let token = parser.bump()?;
            Err(HoconError::InvalidToken {
                token: format!("{:?}", token),
                line,
                column,
                hint: Some("Expected a value".into()),
                code: Some(210),
            })
        }
        1 => {
            let piece = pieces.remove(0);
            match piece {
                // bare `null`; a quoted "null" stays a string
                Value::String(ref s) if first_unquoted && s == "null" => Ok(Value::Empty),
                other => Ok(other),
            }
        }
        _ if has_substitution => Ok(Value::Concat(pieces)),
        _ => concatenate(pieces),
    }
}

fn starts_value(token: Option<&Token>) -> bool {
    matches!(
        token,
        Some(Token::Quoted(_))
            | Some(Token::Unquoted(_))
            | Some(Token::Substitution { .. })
            | Some(Token::LBrace)
            | Some(Token::LBracket)
    )
}

fn parse_quoted_value(parser: &mut Parser) -> Result<Value, HoconError> {
    if let Token::Quoted(s) = parser.bump()? {
        Ok(Value::String(s))
    } else {
        unreachable!()
    }
}

fn parse_unquoted_value(parser: &mut Parser) -> Result<Value, HoconError> {
    if let Token::Unquoted(s) = parser.bump()? {
        Ok(Value::String(s))
    } else {
        unreachable!()
    }
}

fn parse_substitution_value(parser: &mut Parser) -> Result<Value, HoconError> {
    let position = (parser.line(), parser.column());
    if let Token::Substitution { path, optional } = parser.bump()? {
        Ok(parser.new_substitution(path, optional, position))
    } else {
        unreachable!()
    }
}

fn parse_object_value(parser: &mut Parser) -> Result<Value, HoconError> {
    parser.expect(Token::LBrace)?;
    parse_object_body(parser, Token::RBrace).map(Value::Object)
}

fn parse_array_value(parser: &mut Parser) -> Result<Value, HoconError> {
    let (line, column) = (parser.line(), parser.column());
    parser.bump()?; // consume [
    let mut arr = Vec::new();

    loop {
        parser.skip_separators()?;
        match parser.peek() {
            Some(Token::RBracket) => {
                parser.bump()?;
                break;
            }
            Some(Token::Eof) => {
                return Err(HoconError::UnexpectedEof {
                    message: "Array not closed".into(),
                    line,
                    column,
                    hint: Some("Add the closing ']'".into()),
                    code: Some(209),
                });
            }
            _ => {
                arr.push(parse_value(parser)?);
                match parser.peek() {
                    Some(Token::Comma) | Some(Token::Newline) | Some(Token::RBracket) | Some(Token::Eof) => {}
                    Some(tok) => {
                        return Err(HoconError::InvalidToken {
                            token: format!("{:?}", tok),
                            line: parser.line(),
                            column: parser.column(),
                            hint: Some("Separate array elements with ',' or a newline".into()),
                            code: Some(212),
                        });
                    }
                    None => {}
                }
            }
        }
    }
    Ok(Value::Array(arr))
}
