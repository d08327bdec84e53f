use super::*;

const INCLUDE_KEYWORD: &str = "include";

pub(super) fn parse_root(parser: &mut Parser) -> Result<Value, HoconError> {
    parser.skip_newlines()?;

    let object = match parser.peek() {
        Some(Token::LBrace) => {
            parser.bump()?;
            let object = parse_object_body(parser, Token::RBrace)?;
            parser.skip_separators()?;
            if parser.peek() != Some(&Token::Eof) {
                return Err(HoconError::InvalidToken {
                    token: format!("{:?}", parser.peek()),
                    line: parser.line(),
                    column: parser.column(),
                    hint: Some("Nothing may follow the closing '}' of the root object".into()),
                    code: Some(214),
                });
            }
            object
        }
        Some(Token::LBracket) => {
            return Err(HoconError::SyntaxError {
                message: "Root value must be an object".into(),
                line: parser.line(),
                column: parser.column(),
                hint: Some("Wrap the array in a field, e.g. `items = [...]`".into()),
                code: Some(215),
            });
        }
        _ => parse_object_body(parser, Token::Eof)?,
    };

    Ok(Value::Object(object))
}

/// Parse fields until `closing` (`RBrace` or `Eof`). The opening brace, if
/// any, is already consumed; a closing brace is consumed here.
pub(super) fn parse_object_body(parser: &mut Parser, closing: Token) -> Result<Object, HoconError> {
    let mut object = Object::new();

    loop {
        parser.skip_separators()?;

        match parser.peek() {
            Some(tok) if *tok == closing => {
                if closing != Token::Eof {
                    parser.bump()?;
                }
                break;
            }
            Some(Token::Eof) => {
                return Err(HoconError::UnexpectedEof {
                    message: "Object not closed".into(),
                    line: parser.line(),
                    column: parser.column(),
                    hint: Some("Add the closing '}'".into()),
                    code: Some(203),
                });
            }
            Some(Token::Unquoted(word)) if word == INCLUDE_KEYWORD => {
                parse_include_or_field(parser, &mut object)?;
            }
            Some(Token::Unquoted(_)) | Some(Token::Quoted(_)) => {
                parse_field(parser, &mut object)?;
            }
            Some(tok) => {
                return Err(HoconError::InvalidToken {
                    token: format!("{:?}", tok),
                    line: parser.line(),
                    column: parser.column(),
                    hint: Some("Expected a key, 'include' or '}'".into()),
                    code: Some(207),
                });
            }
            None => unreachable!("parser always holds a lookahead token"),
        }

        end_of_field(parser, &closing)?;
    }

    Ok(object)
}

/// A field must be followed by a separator or the end of its object.
fn end_of_field(parser: &mut Parser, closing: &Token) -> Result<(), HoconError> {
    match parser.peek() {
        Some(Token::Newline) | Some(Token::Comma) | Some(Token::Eof) => Ok(()),
        Some(tok) if tok == closing => Ok(()),
        Some(Token::RBrace) if *closing == Token::Eof => Err(HoconError::SyntaxError {
            message: "Unbalanced '}'".into(),
            line: parser.line(),
            column: parser.column(),
            hint: None,
            code: Some(204),
        }),
        Some(tok) => Err(HoconError::InvalidToken {
            token: format!("{:?}", tok),
            line: parser.line(),
            column: parser.column(),
            hint: Some("Separate fields with a newline or ','".into()),
            code: Some(205),
        }),
        None => Ok(()),
    }
}

/// `include` is a directive only when a quoted name or `file(`/`required(`
/// follows; otherwise it is an ordinary key.
fn parse_include_or_field(parser: &mut Parser, object: &mut Object) -> Result<(), HoconError> {
    let (line, column) = (parser.line(), parser.column());
    parser.bump()?; // consume `include`

    let directive = parser.peek_is_spaced()
        && match parser.peek() {
            Some(Token::Quoted(_)) => true,
            Some(Token::Unquoted(word)) => word.ends_with('('),
            _ => false,
        };

    if !directive {
        let path = read_key(parser, INCLUDE_KEYWORD.to_string(), true)?;
        return parse_field_value(parser, object, path, line, column);
    }

    let spec = parse_include_spec(parser)?;
    parser.include_into(object, spec)
}

fn parse_include_spec(parser: &mut Parser) -> Result<IncludeSpec, HoconError> {
    let (line, column) = (parser.line(), parser.column());

    let mut wrappers: Vec<String> = Vec::new();
    if let Some(Token::Unquoted(prefix)) = parser.peek() {
        wrappers = prefix
            .split('(')
            .map(str::trim)
            .filter(|w| !w.is_empty())
            .map(str::to_string)
            .collect();
        parser.bump()?;
    }

    let mut required = false;
    for wrapper in &wrappers {
        match wrapper.as_str() {
            "required" => required = true,
            "file" => {}
            "url" | "classpath" => {
                return Err(HoconError::SyntaxError {
                    message: format!("include {}(...) is not supported", wrapper),
                    line,
                    column,
                    hint: Some("Use a file path or file(...)".into()),
                    code: Some(217),
                });
            }
            other => {
                return Err(HoconError::SyntaxError {
                    message: format!("Unknown include qualifier '{}'", other),
                    line,
                    column,
                    hint: Some("Expected file(...) or required(...)".into()),
                    code: Some(218),
                });
            }
        }
    }

    let pattern = match parser.bump()? {
        Token::Quoted(p) => p,
        tok => {
            return Err(HoconError::SyntaxError {
                message: format!("Expected a quoted file name after include, got {:?}", tok),
                line,
                column,
                hint: Some("Write include \"file.conf\"".into()),
                code: Some(211),
            });
        }
    };

    // One ')' per wrapper, possibly split across tokens
    let mut open = wrappers.len();
    while open > 0 {
        match parser.peek() {
            Some(Token::Unquoted(close)) if close.chars().all(|c| c == ')') => {
                let count = close.len();
                if count > open {
                    break;
                }
                open -= count;
                parser.bump()?;
            }
            _ => break,
        }
    }
    if open != 0 {
        return Err(HoconError::SyntaxError {
            message: "Unbalanced parentheses in include".into(),
            line,
            column,
            hint: Some("Write include required(\"file.conf\")".into()),
            code: Some(219),
        });
    }

    Ok(IncludeSpec::new(pattern, required))
}

fn parse_field(parser: &mut Parser, object: &mut Object) -> Result<(), HoconError> {
    let (line, column) = (parser.line(), parser.column());
    let path = parse_key(parser)?;
    parse_field_value(parser, object, path, line, column)
}

fn parse_field_value(
    parser: &mut Parser,
    object: &mut Object,
    path: Vec<String>,
    line: usize,
    column: usize,
) -> Result<(), HoconError> {
    match parser.peek() {
        Some(Token::Colon) | Some(Token::Equals) => {
            parser.bump()?;
            parser.skip_newlines()?;
            let value = value::parse_value(parser)?;
            set_path(object, path, value);
        }
        Some(Token::LBrace) => {
            let value = value::parse_value(parser)?;
            set_path(object, path, value);
        }
        Some(Token::PlusEquals) => {
            parser.bump()?;
            parser.skip_newlines()?;
            let value = value::parse_value(parser)?;
            append_path(object, path, value);
        }
        _ => {
            return Err(HoconError::SyntaxError {
                message: format!("Expected ':', '=' or '{{' after key '{}'", path.join(".")),
                line,
                column,
                hint: Some("Write `key = value` or `key { ... }`".into()),
                code: Some(206),
            });
        }
    }
    Ok(())
}

/// Read a (possibly dotted, possibly partly quoted) key made of adjacent tokens.
fn parse_key(parser: &mut Parser) -> Result<Vec<String>, HoconError> {
    read_key(parser, String::new(), false)
}

/// Continue a key whose first characters are already in `current`.
fn read_key(parser: &mut Parser, mut current: String, mut started: bool) -> Result<Vec<String>, HoconError> {
    let (line, column) = (parser.line(), parser.column());
    let mut segments = Vec::new();
    let mut quoted = false;

    loop {
        if started && parser.peek_is_spaced() {
            break;
        }
        match parser.peek() {
            Some(Token::Unquoted(_)) | Some(Token::Quoted(_)) => {}
            _ => break,
        }
        match parser.bump()? {
            Token::Unquoted(text) => {
                for ch in text.chars() {
                    if ch == '.' {
                        push_segment(&mut segments, &mut current, &mut quoted, line, column)?;
                    } else {
                        current.push(ch);
                    }
                }
            }
            Token::Quoted(text) => {
                current.push_str(&text);
                quoted = true;
            }
            _ => unreachable!("checked above"),
        }
        started = true;
    }

    push_segment(&mut segments, &mut current, &mut quoted, line, column)?;
    Ok(segments)
}

fn push_segment(
    segments: &mut Vec<String>,
    current: &mut String,
    quoted: &mut bool,
    line: usize,
    column: usize,
) -> Result<(), HoconError> {
    if current.is_empty() && !*quoted {
        return Err(HoconError::SyntaxError {
            message: "Empty key segment".into(),
            line,
            column,
            hint: Some("Keys look like a.b.c; quote a key that contains '.'".into()),
            code: Some(208),
        });
    }
    segments.push(std::mem::take(current));
    *quoted = false;
    Ok(())
}

/// Wrap `value` in one object per extra path segment and merge it in.
fn set_path(object: &mut Object, mut path: Vec<String>, value: Value) {
    let head = path.remove(0);
    let nested = path.into_iter().rev().fold(value, |acc, key| {
        let mut wrapper = Object::new();
        wrapper.insert(key, acc);
        Value::Object(wrapper)
    });
    merge::merge_field(object, head, nested);
}

/// `key += value`: append to an existing array, start one, or defer to
/// concatenation when the current value is not known yet.
fn append_path(object: &mut Object, path: Vec<String>, value: Value) {
    let (last, parents) = match path.split_last() {
        Some(split) => split,
        None => return,
    };

    let mut target = &mut *object;
    for key in parents {
        let slot = target
            .entry(key.clone())
            .or_insert_with(|| Value::Object(Object::new()));
        if !slot.is_object() {
            *slot = Value::Object(Object::new());
        }
        target = match slot {
            Value::Object(inner) => inner,
            _ => unreachable!("slot was just made an object"),
        };
    }

    match target.get_mut(last) {
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let previous = std::mem::replace(existing, Value::Empty);
            *existing = Value::Concat(vec![previous, Value::Array(vec![value])]);
        }
        None => {
            target.insert(last.clone(), Value::Array(vec![value]));
        }
    }
}
