// Whole-pipeline properties that hold for any input in either language

use synscope::diagnostics::AnalysisResult;
use synscope::language::Language;
use synscope::token::{Token, TokenKind};
use synscope::{c, python};

const LANGUAGES: [Language; 2] = [Language::C, Language::Python];

/// Source fragments that exercise every lexer state and most grammar rules.
const FRAGMENTS: &[&str] = &[
    "int", "float", "def", "class", "if", "else", "elif", "for", "while", "try", "except",
    "finally", "return", "import", "from", "as", "in", "not", "and", "or", "pass", "true",
    "None", "x", "_tmp", "main", "42", "3.14", ".5", "1e-5", "7j", "\"str\"", "'s'", "\"\"\"doc\"\"\"",
    "\"open", "(", ")", "[", "]", "{", "}", ",", ":", ";", ".", "...", "->", "@", "+", "-",
    "*", "/", "//", "**", "%", "=", "==", "!=", "<=", ">=", "+=", "//=", "**=", "<<=", "&&",
    "||", "!", "++", "--", "~", "^", "#", "# note", "//", "/*", "*/", "\n", "\n    ", "\t",
    " ", "$", "?", "é", "\r\n",
];

/// Small xorshift generator so failures reproduce from the seed.
struct Xorshift(u64);

impl Xorshift {
    fn next(&mut self) -> u64 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        self.0
    }

    fn below(&mut self, bound: usize) -> usize {
        (self.next() % bound as u64) as usize
    }
}

fn random_source(rng: &mut Xorshift) -> String {
    let count = rng.below(60);
    let mut source = String::new();
    for _ in 0..count {
        source.push_str(FRAGMENTS[rng.below(FRAGMENTS.len())]);
        if rng.below(3) == 0 {
            source.push(' ');
        }
    }
    source
}

fn random_sources() -> Vec<String> {
    let mut rng = Xorshift(0x9E37_79B9_7F4A_7C15);
    (0..400).map(|_| random_source(&mut rng)).collect()
}

fn assert_ordered(tokens: &[Token], source: &str) {
    for pair in tokens.windows(2) {
        assert!(
            pair[0].position() <= pair[1].position(),
            "tokens out of order in {:?}: {} then {}",
            source,
            pair[0],
            pair[1]
        );
    }
}

fn assert_consistent(result: &AnalysisResult) {
    assert_eq!(result.success, result.diagnostics.is_empty());
}

#[test]
fn test_empty_source_is_valid() {
    for language in LANGUAGES {
        let tokens = language.tokenize("");
        assert!(tokens.is_empty());
        assert_eq!(language.parse(&tokens), AnalysisResult::ok());
    }
}

#[test]
fn test_invalid_utf8_yields_no_tokens() {
    let bytes = [0x69, 0x6E, 0x74, 0xFF, 0xFE, 0x20, 0x78];
    assert!(c::tokenize_bytes(&bytes).is_empty());
    assert!(python::tokenize_bytes(&bytes).is_empty());
    assert_eq!(c::tokenize_bytes(b"int x"), c::tokenize("int x"));
    assert_eq!(python::tokenize_bytes(b"x = 1"), python::tokenize("x = 1"));
}

#[test]
fn test_random_sources_terminate_in_order() {
    for source in random_sources() {
        for language in LANGUAGES {
            let analysis = language.analyze(&source);
            assert_ordered(&analysis.tokens, &source);
            assert_consistent(&analysis.result);
        }
    }
}

#[test]
fn test_random_token_sequences_terminate() {
    let vocabulary: Vec<Token> = [
        (TokenKind::Keyword, "int"),
        (TokenKind::Keyword, "def"),
        (TokenKind::Keyword, "if"),
        (TokenKind::Keyword, "try"),
        (TokenKind::Keyword, "return"),
        (TokenKind::Identifier, "x"),
        (TokenKind::Number, "1"),
        (TokenKind::String, "\"s\""),
        (TokenKind::Operator, "="),
        (TokenKind::Operator, "+"),
        (TokenKind::Operator, "->"),
        (TokenKind::Separator, "("),
        (TokenKind::Separator, ")"),
        (TokenKind::Separator, "{"),
        (TokenKind::Separator, "}"),
        (TokenKind::Separator, "["),
        (TokenKind::Separator, ":"),
        (TokenKind::Separator, ";"),
        (TokenKind::Separator, "."),
        (TokenKind::Comment, "# c"),
        (TokenKind::Indent, "4"),
        (TokenKind::Dedent, ""),
    ]
    .into_iter()
    .map(|(kind, text)| Token::new(kind, text, 1, 1))
    .collect();

    let mut rng = Xorshift(0x2545_F491_4F6C_DD1D);
    for _ in 0..400 {
        let length = rng.below(80);
        let tokens: Vec<Token> = (0..length)
            .map(|_| vocabulary[rng.below(vocabulary.len())].clone())
            .collect();
        assert_consistent(&c::parse(&tokens));
        assert_consistent(&python::parse(&tokens));
    }
}

#[test]
fn test_pathological_nesting_terminates() {
    let deep_parens = format!("int main() {{ x = {}1{}; }}", "(".repeat(2000), ")".repeat(2000));
    let deep_blocks = format!("int main() {}{}", "{".repeat(2000), "}".repeat(2001));
    let deep_lists = format!("x = {}\n", "[".repeat(2000));
    let many_nots = format!("y = {}z\n", "not ".repeat(2000));

    for source in [deep_parens, deep_blocks] {
        let result = Language::C.analyze(&source).result;
        assert_eq!(result.diagnostics.len(), 1, "{:?}", result.diagnostics);
        assert!(result.diagnostics[0].starts_with("Unexpected error: "));
    }
    for source in [deep_lists, many_nots] {
        let result = Language::Python.analyze(&source).result;
        assert!(!result.success);
        assert!(result.diagnostics[0].starts_with("Unexpected error: "));
    }
}

#[test]
fn test_parse_is_idempotent_and_leaves_tokens_untouched() {
    for source in random_sources().iter().take(100) {
        for language in LANGUAGES {
            let tokens = language.tokenize(source);
            let snapshot = tokens.clone();
            let first = language.parse(&tokens);
            let second = language.parse(&tokens);
            assert_eq!(first, second);
            assert_eq!(tokens, snapshot);
        }
    }
}

#[test]
fn test_analysis_is_deterministic() {
    for source in random_sources().iter().take(100) {
        for language in LANGUAGES {
            assert_eq!(language.analyze(source), language.analyze(source));
        }
    }
}

#[test]
fn test_samples_are_clean() {
    for language in LANGUAGES {
        let analysis = language.analyze(language.sample());
        assert!(analysis.is_clean(), "{:?}", analysis.diagnostics());
    }
}
