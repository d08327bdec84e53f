#[cfg(test)]
use super::*;
#[cfg(test)]
use crate::resolver::resolve;

fn refuse(spec: &IncludeSpec) -> Result<Root, HoconError> {
    Err(HoconError::FileError {
        message: "includes are not expected here".into(),
        path: spec.pattern.clone(),
        hint: None,
        code: None,
    })
}

fn parse_str(input: &str) -> Root {
    let mut includer = refuse;
    parse(input, &mut includer).expect("Failed to parse document")
}

fn parse_err(input: &str) -> HoconError {
    let mut includer = refuse;
    parse(input, &mut includer).expect_err("Expected a parse error")
}

/// Parse with an in-memory file table standing in for the filesystem.
fn parse_with_files(input: &str, files: &[(&str, &str)]) -> Result<Root, HoconError> {
    let mut includer = |spec: &IncludeSpec| -> Result<Root, HoconError> {
        match files.iter().find(|(name, _)| *name == spec.pattern) {
            Some((_, text)) => {
                let mut nested = refuse;
                parse(text, &mut nested)
            }
            None => Ok(Root::empty()),
        }
    };
    parse(input, &mut includer)
}

fn path(dotted: &str) -> Vec<String> {
    dotted.split('.').map(String::from).collect()
}

fn get<'r>(root: &'r Root, dotted: &str) -> Option<&'r Value> {
    root.value.lookup(&path(dotted))
}

fn s(v: &str) -> Value {
    Value::String(v.into())
}

#[test]
fn test_braced_root_with_nested_object() {
    let root = parse_str("{a: 1, b: {c: 2}}");
    assert_eq!(get(&root, "a"), Some(&s("1")));
    assert_eq!(get(&root, "b.c"), Some(&s("2")));
    assert!(root.substitutions.is_empty());

    let keys: Vec<&String> = root.value.as_object().unwrap().keys().collect();
    assert_eq!(keys, vec!["a", "b"]);
}

#[test]
fn test_braceless_root_and_separators() {
    let input = r#"
# comment
name = "svc"
port: 8080, debug = true
nested {
  x = 1
}
"#;
    let root = parse_str(input);
    assert_eq!(get(&root, "name"), Some(&s("svc")));
    assert_eq!(get(&root, "port"), Some(&s("8080")));
    assert_eq!(get(&root, "debug"), Some(&s("true")));
    assert_eq!(get(&root, "nested.x"), Some(&s("1")));
}

#[test]
fn test_arrays_keep_order_and_mix_separators() {
    let root = parse_str("list = [3, 1\n 2,\n]\nempty = []");
    assert_eq!(
        get(&root, "list"),
        Some(&Value::Array(vec![s("3"), s("1"), s("2")]))
    );
    assert_eq!(get(&root, "empty"), Some(&Value::Array(vec![])));
}

#[test]
fn test_array_of_objects() {
    let root = parse_str("servers = [{host = a}, {host = b}]");
    let servers = get(&root, "servers").unwrap().as_array().unwrap();
    assert_eq!(servers.len(), 2);
    assert_eq!(servers[1].lookup(&path("host")), Some(&s("b")));
}

#[test]
fn test_dotted_keys_expand_to_objects() {
    let root = parse_str("a.b.c = 1\na.b.d = 2\n\"x.y\" = 3");
    assert_eq!(get(&root, "a.b.c"), Some(&s("1")));
    assert_eq!(get(&root, "a.b.d"), Some(&s("2")));

    let top = root.value.as_object().unwrap();
    assert!(top.contains_key("x.y"));
    assert!(!top.contains_key("x"));
}

#[test]
fn test_duplicate_keys_merge_objects_and_replace_values() {
    let root = parse_str("a { x = 1 }\na { y = 2 }\nb = 1\nb = 2\nc { z = 1 }\nc = 3");
    assert_eq!(get(&root, "a.x"), Some(&s("1")));
    assert_eq!(get(&root, "a.y"), Some(&s("2")));
    assert_eq!(get(&root, "b"), Some(&s("2")));
    assert_eq!(get(&root, "c"), Some(&s("3")));
}

#[test]
fn test_unquoted_concatenation_keeps_inner_whitespace() {
    let root = parse_str("a = foo bar  baz // trailing\nb = \"x\" y");
    assert_eq!(get(&root, "a"), Some(&s("foo bar  baz")));
    assert_eq!(get(&root, "b"), Some(&s("x y")));
}

#[test]
fn test_array_and_object_concatenation() {
    let root = parse_str("a = [1, 2] [3]\nb = {x = 1} {y = 2}");
    assert_eq!(
        get(&root, "a"),
        Some(&Value::Array(vec![s("1"), s("2"), s("3")]))
    );
    assert_eq!(get(&root, "b.x"), Some(&s("1")));
    assert_eq!(get(&root, "b.y"), Some(&s("2")));
}

#[test]
fn test_null_is_empty_but_quoted_null_is_a_string() {
    let root = parse_str("a = null\nb = \"null\"\nc = null suffix");
    assert_eq!(get(&root, "a"), Some(&Value::Empty));
    assert_eq!(get(&root, "b"), Some(&s("null")));
    assert_eq!(get(&root, "c"), Some(&s("null suffix")));
}

#[test]
fn test_plus_equals_appends() {
    let root = parse_str("list = [1]\nlist += 2\nfresh += x");
    assert_eq!(get(&root, "list"), Some(&Value::Array(vec![s("1"), s("2")])));
    assert_eq!(get(&root, "fresh"), Some(&Value::Array(vec![s("x")])));
}

#[test]
fn test_substitutions_are_collected_in_order() {
    let root = parse_str("a = ${x}\nb = ${?y.z} tail");
    let paths: Vec<String> = root.substitutions.iter().map(|s| s.dotted()).collect();
    assert_eq!(paths, vec!["x", "y.z"]);
    assert!(root.substitutions[1].optional);

    assert!(matches!(get(&root, "a"), Some(Value::Substitution(_))));
    match get(&root, "b") {
        Some(Value::Concat(pieces)) => {
            assert_eq!(pieces.len(), 3);
            assert_eq!(pieces[1], s(" "));
            assert_eq!(pieces[2], s("tail"));
        }
        other => panic!("Expected a pending concatenation, got {:?}", other),
    }
}

#[test]
fn test_substitution_position_is_recorded() {
    let root = parse_str("a = 1\nb = ${a}");
    let sub = &root.substitutions[0];
    assert_eq!((sub.line, sub.column), (2, 5));
}

#[test]
fn test_parse_then_resolve() {
    let root = parse_str("host = localhost\nurl = \"http://\"${host}\":80\"");
    let resolved = resolve(root).expect("Failed to resolve");
    assert_eq!(
        resolved.lookup(&path("url")),
        Some(&s("http://localhost:80"))
    );
}

#[test]
fn test_include_merges_at_directive_position() {
    let files = [("defaults.conf", "a = 2\nshared { x = 1 }")];

    let before = parse_with_files("include \"defaults.conf\"\na = 1", &files).unwrap();
    assert_eq!(get(&before, "a"), Some(&s("1")));

    let after = parse_with_files("a = 1\ninclude \"defaults.conf\"", &files).unwrap();
    assert_eq!(get(&after, "a"), Some(&s("2")));

    let nested = parse_with_files("shared { y = 2 }\ninclude \"defaults.conf\"", &files).unwrap();
    assert_eq!(get(&nested, "shared.x"), Some(&s("1")));
    assert_eq!(get(&nested, "shared.y"), Some(&s("2")));
}

#[test]
fn test_include_substitutions_follow_document_order() {
    let files = [("inc.conf", "from_include = ${p}")];

    let first = parse_with_files("include \"inc.conf\"\nb = ${q}", &files).unwrap();
    let order: Vec<String> = first.substitutions.iter().map(|s| s.dotted()).collect();
    assert_eq!(order, vec!["p", "q"]);

    let second = parse_with_files("b = ${q}\ninclude \"inc.conf\"", &files).unwrap();
    let order: Vec<String> = second.substitutions.iter().map(|s| s.dotted()).collect();
    assert_eq!(order, vec!["q", "p"]);
}

#[test]
fn test_include_inside_nested_object() {
    let files = [("db.conf", "host = db1")];
    let root = parse_with_files("database {\n  include \"db.conf\"\n  port = 5432\n}", &files).unwrap();
    assert_eq!(get(&root, "database.host"), Some(&s("db1")));
    assert_eq!(get(&root, "database.port"), Some(&s("5432")));
}

#[test]
fn test_include_qualifiers() {
    let mut seen = Vec::new();
    let mut includer = |spec: &IncludeSpec| -> Result<Root, HoconError> {
        seen.push(spec.clone());
        Ok(Root::empty())
    };
    parse(
        "include required(\"a.conf\")\ninclude file(\"b.conf\")\ninclude required(file(\"c.conf\"))",
        &mut includer,
    )
    .expect("Failed to parse includes");

    assert_eq!(
        seen,
        vec![
            IncludeSpec::new("a.conf", true),
            IncludeSpec::new("b.conf", false),
            IncludeSpec::new("c.conf", true),
        ]
    );
}

#[test]
fn test_include_as_ordinary_key() {
    let root = parse_str("include = 5\ninclude.x = 1");
    let top = root.value.as_object().unwrap();
    assert!(top.contains_key("include"));
    assert_eq!(get(&root, "include.x"), Some(&s("1")));
}

#[test]
fn test_includer_error_propagates() {
    let err = parse_err("include \"anything.conf\"");
    assert!(matches!(err, HoconError::FileError { .. }));
}

#[test]
fn test_unsupported_include_kinds() {
    assert_eq!(parse_err("include url(\"http://x/a.conf\")").code(), Some(217));
    assert_eq!(parse_err("include classpath(\"a.conf\")").code(), Some(217));
    assert_eq!(parse_err("include nope(\"a.conf\")").code(), Some(218));
    assert_eq!(parse_err("include required(\"a.conf\"").code(), Some(219));
}

#[test]
fn test_syntax_error_codes() {
    assert_eq!(parse_err("a = {").code(), Some(203));
    assert_eq!(parse_err("a = 1 }").code(), Some(204));
    assert_eq!(parse_err("a 1").code(), Some(206));
    assert_eq!(parse_err("a..b = 1").code(), Some(208));
    assert_eq!(parse_err("a = [1, 2").code(), Some(209));
    assert_eq!(parse_err("a = ,").code(), Some(210));
    assert_eq!(parse_err("{a = 1} b = 2").code(), Some(214));
    assert_eq!(parse_err("[1, 2]").code(), Some(215));
}

#[test]
fn test_error_carries_position() {
    match parse_err("a = 1\nb 2") {
        HoconError::SyntaxError { line, column, .. } => assert_eq!((line, column), (2, 1)),
        other => panic!("Expected SyntaxError, got {:?}", other),
    }
}

#[test]
fn test_empty_document_is_empty_object() {
    let root = parse_str("  \n# only a comment\n");
    assert_eq!(root, Root::empty());
}
