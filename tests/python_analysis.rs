// End-to-end tests for the Python subset: source text in, diagnostics out

use synscope::diagnostics::line_of;
use synscope::language::Language;
use synscope::python::{parse, tokenize};
use synscope::token::TokenKind;

fn diagnostics(source: &str) -> Vec<String> {
    parse(&tokenize(source)).diagnostics
}

#[test]
fn test_function_with_pass() {
    let result = parse(&tokenize("def f():\n    pass\n"));
    assert!(result.success);
    assert!(result.diagnostics.is_empty());
}

#[test]
fn test_missing_right_hand_side() {
    let result = parse(&tokenize("x =\n"));
    assert!(!result.success);
    assert_eq!(
        result.diagnostics,
        vec!["Python Syntax Error at EOF: Expected expression after '='"]
    );
}

#[test]
fn test_realistic_program() {
    let source = r#"
import sys, os.path as p
from math import sqrt as root, pi

class Shape(object):
    def __init__(self, name, sides=0):
        self.name = name
        self.sides = sides

    def area(self) -> float:
        return 0

def describe(shape, verbose=False):
    # Branches, loops and handlers
    if shape.sides > 4 and verbose:
        print("many sides")
    elif shape.sides == 0:
        return None
    else:
        pass
    for item in [1, 2.5, 3e-2]:
        total += item ** 2
    while not done:
        break
    else:
        counts = {'a': 1, 'b': [x, y]}
    try:
        risky()
    except ValueError as err:
        log(err)
    finally:
        cleanup()
    return total
"#;
    let result = parse(&tokenize(source));
    assert!(result.success, "unexpected diagnostics: {:?}", result.diagnostics);
}

#[test]
fn test_each_missing_colon_is_reported() {
    let found = diagnostics("if a\n    b = 1\nwhile c\n    d = 2\n");
    assert_eq!(
        found,
        vec![
            "Python Syntax Error at line 2: Expected Separator ':', got 'b'",
            "Python Syntax Error at line 4: Expected Separator ':', got 'd'",
        ]
    );
    let lines: Vec<Option<usize>> = found.iter().map(|d| line_of(d)).collect();
    assert_eq!(lines, vec![Some(2), Some(4)]);
}

#[test]
fn test_stray_closing_parenthesis() {
    assert_eq!(diagnostics("print(1))\n"), vec!["Unexpected token: ) at line 1"]);
}

#[test]
fn test_try_needs_a_handler() {
    assert_eq!(
        diagnostics("try:\n    risky()\nx = 1\n"),
        vec!["Try statement must have except or finally clause"]
    );
    assert!(diagnostics("try:\n    risky()\nexcept:\n    pass\n").is_empty());
}

#[test]
fn test_finally_only_accepts_an_empty_clause() {
    assert!(diagnostics("try:\n    pass\nfinally:\n").is_empty());
    assert_eq!(
        diagnostics("try:\n    pass\nfinally:\n    cleanup()\n"),
        vec!["Try statement must have except or finally clause"]
    );
}

#[test]
fn test_indentation_is_tokenized_but_ignored() {
    let tokens = tokenize("def f():\n\tpass\n");
    let indent = tokens
        .iter()
        .find(|t| t.kind == TokenKind::Indent)
        .expect("indent token");
    assert_eq!(indent.text, "4");
    assert_eq!(indent.position(), (2, 1));

    // Dedented code after the body parses the same as indented code
    assert!(diagnostics("def f():\npass\n").is_empty());
}

#[test]
fn test_comments_are_tokens_but_not_grammar() {
    let source = "x = 1  # set x\n# whole line\n";
    let tokens = tokenize(source);
    let comments: Vec<&str> = tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Comment)
        .map(|t| t.text.as_str())
        .collect();
    assert_eq!(comments, vec!["# set x", "# whole line"]);
    assert!(parse(&tokens).success);
}

#[test]
fn test_language_dispatch_matches_module_functions() {
    let source = "def f(:\n    pass\n";
    let analysis = Language::Python.analyze(source);
    assert_eq!(analysis.tokens, tokenize(source));
    assert_eq!(analysis.result, parse(&analysis.tokens));
    assert!(!analysis.is_clean());
}
