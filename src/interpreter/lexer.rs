use logos::Logos;

use crate::{error::ParseError, interpreter::parser::core::ParseResult};

/// Every token tessel source can contain. Whitespace and comments are
/// skipped but still advance the line counter.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
pub enum Token {
    /// Numbers such as `42`, `3.14`, `.5` or `2.1e-10`.
    #[regex(r"[0-9]+(\.[0-9]+)?([eE][+-]?[0-9]+)?", parse_number)]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?", parse_number)]
    Number(f64),
    /// Double quoted string literals, with escapes decoded.
    #[regex(r#""([^"\\\n]|\\[^\n])*""#, parse_string)]
    Str(String),
    /// `#import "path"`, carrying the path between the quotes.
    #[regex(r#"#import[ \t]*"[^"\n]*""#, parse_import)]
    Import(String),
    /// `true` or `false`.
    #[token("true", parse_bool)]
    #[token("false", parse_bool)]
    Bool(bool),
    /// `func`
    #[token("func")]
    Func,
    /// `return`
    #[token("return")]
    Return,
    /// `if`
    #[token("if")]
    If,
    /// `else`
    #[token("else")]
    Else,
    /// `while`
    #[token("while")]
    While,
    /// `do`
    #[token("do")]
    Do,
    /// `for`
    #[token("for")]
    For,
    /// `class`
    #[token("class")]
    Class,
    /// `new`
    #[token("new")]
    New,
    /// `int`
    #[token("int")]
    IntType,
    /// `float`
    #[token("float")]
    FloatType,
    /// `bool`
    #[token("bool")]
    BoolType,
    /// `string`
    #[token("string")]
    StringType,
    /// `array`
    #[token("array")]
    ArrayType,
    /// `map`
    #[token("map")]
    MapType,
    /// `void`
    #[token("void")]
    Void,
    /// A variable, function or class name.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `// Comments.`
    #[regex(r"//[^\n\r]*", logos::skip, allow_greedy = true)]
    Comment,
    /// ```text
    /// /* Multi line comments. */
    /// ```
    #[regex(r"/\*([^*]|\*[^/])*\*/", |lex| {
        let comment      = lex.slice();
        let newlines     = comment.chars().filter(|&c| c == '\n').count();
        lex.extras.line += newlines;
        logos::Skip
    })]
    MultiLineComment,
    /// `++`
    #[token("++")]
    PlusPlus,
    /// `--`
    #[token("--")]
    MinusMinus,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `,`
    #[token(",")]
    Comma,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `:`
    #[token(":")]
    Colon,
    /// `.`
    #[token(".")]
    Dot,
    /// `=`
    #[token("=")]
    Equals,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// `&&`
    #[token("&&")]
    AndAnd,
    /// `||`
    #[token("||")]
    OrOr,
    /// `!`
    #[token("!")]
    Bang,
    /// Line breaks only advance the line counter.
    #[token("\n", |lex| {
        lex.extras.line += 1;
        logos::Skip
    })]
    NewLine,
    /// Spaces, tabs, carriage returns and feeds.
    #[regex(r"[ \t\r\f]+", logos::skip)]
    Ignored,
}

/// State logos threads through the callbacks.
#[derive(Default)]
pub struct LexerExtras {
    /// 1-based line of the token being produced.
    pub line: usize,
}

/// Tokenizes `source`, pairing every token with the line it appeared on.
///
/// Whitespace, line breaks and comments produce no tokens. The end of input is
/// the end of the returned vector.
///
/// # Errors
/// - `ParseError::InvalidLiteral` for a malformed string or number literal.
/// - `ParseError::UnexpectedToken` for any character sequence that is not a
///   token.
///
/// # Example
/// ```
/// use tessel::interpreter::lexer::{Token, tokenize};
///
/// let tokens = tokenize("int x = 1;\nx++;").unwrap();
///
/// assert_eq!(tokens[0], (Token::IntType, 1));
/// assert_eq!(tokens[3], (Token::Number(1.0), 1));
/// assert_eq!(tokens[5], (Token::Identifier("x".to_string()), 2));
/// assert_eq!(tokens[6], (Token::PlusPlus, 2));
/// ```
pub fn tokenize(source: &str) -> ParseResult<Vec<(Token, usize)>> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer_with_extras(source, LexerExtras { line: 1 });

    while let Some(token) = lexer.next() {
        if let Ok(tok) = token {
            tokens.push((tok, lexer.extras.line));
        } else {
            let slice = lexer.slice();
            let line = lexer.extras.line;

            if slice.starts_with('"') || slice.starts_with(|c: char| c.is_ascii_digit()) {
                return Err(ParseError::InvalidLiteral { literal: slice.to_string(),
                                                        line });
            }
            return Err(ParseError::UnexpectedToken { token: slice.to_string(),
                                                     line });
        }
    }

    Ok(tokens)
}

/// `None` turns the slice into a lexer error, reported as `InvalidLiteral`.
fn parse_number(lex: &logos::Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}

#[allow(clippy::unnecessary_wraps)]
fn parse_bool(lex: &logos::Lexer<Token>) -> Option<bool> {
    Some(lex.slice() == "true")
}

/// Decodes a string literal, dropping the quotes and resolving escapes.
///
/// Recognized escapes are `\n`, `\t`, `\r`, `\"`, `\\` and `\0`; any other
/// escape rejects the literal.
fn parse_string(lex: &logos::Lexer<Token>) -> Option<String> {
    let slice = lex.slice();
    let inner = &slice[1..slice.len() - 1];

    let mut decoded = String::with_capacity(inner.len());
    let mut chars = inner.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            decoded.push(c);
            continue;
        }

        decoded.push(match chars.next()? {
                         'n' => '\n',
                         't' => '\t',
                         'r' => '\r',
                         '"' => '"',
                         '\\' => '\\',
                         '0' => '\0',
                         _ => return None,
                     });
    }

    Some(decoded)
}

/// Extracts the quoted path of an `#import` directive.
fn parse_import(lex: &logos::Lexer<Token>) -> Option<String> {
    let slice = lex.slice();
    let start = slice.find('"')? + 1;
    let end = slice.rfind('"')?;

    (start <= end).then(|| slice[start..end].to_string())
}
