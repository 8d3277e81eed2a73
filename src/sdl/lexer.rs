use logos::{Lexer, Logos};

#[derive(Clone)]
pub struct Extras<'a> {
    pub arena: &'a bumpalo::Bump,
}

/// Tokens of the GraphQL schema definition language.
///
/// Commas, whitespace, a leading byte order mark, and `#` comments are insignificant and skipped.
#[derive(Logos, Debug, PartialEq)]
#[logos(extras = Extras<'s>)]
pub enum Token<'a> {
    #[token("[")]
    BracketOpen,

    #[token("]")]
    BracketClose,

    #[token("{")]
    BraceOpen,

    #[token("}")]
    BraceClose,

    #[token("(")]
    ParenOpen,

    #[token(")")]
    ParenClose,

    #[token(":")]
    Colon,

    #[token("=")]
    Equal,

    #[token("!")]
    Exclam,

    #[token("&")]
    Ampersand,

    #[token("|")]
    Pipe,

    #[regex(r"@[_a-zA-Z][_0-9a-zA-Z]*", |lex| &lex.slice()[1..])]
    DirectiveName(&'a str),

    #[regex(r"[_a-zA-Z][_0-9a-zA-Z]*", |lex| lex.slice())]
    Name(&'a str),

    #[regex(r"-?([1-9][0-9]*|0)[.][0-9]+([eE][+-]?[0-9]+)?", |lex| lex.slice())]
    #[regex("-?([1-9][0-9]*|0)[eE][+-]?[0-9]+", |lex| lex.slice())]
    Float(&'a str),

    #[regex(r"-?([1-9][0-9]*|0)", |lex| lex.slice())]
    Integer(&'a str),

    /// A regular or block string with escapes and indentation already resolved.
    #[regex(r#"""?"?"#, parse_string)]
    String(&'a str),

    #[error]
    #[regex(r"(\x{FEFF}|[ ,\t\n\r\f]+|#[^\n\r]*)+", logos::skip)]
    Error,

    /// Token indicates the end of the input
    End,
}

#[derive(Logos, Debug, PartialEq)]
enum StringPart {
    #[regex(r#"[^\n\r\\"]+"#)]
    Text,

    #[regex(r"\\u[0-9a-fA-F][0-9a-fA-F][0-9a-fA-F][0-9a-fA-F]")]
    EscapedCodepoint,

    #[token(r#"\""#)]
    EscapedQuote,
    #[token(r#"\\"#)]
    EscapedBackslash,
    #[token(r#"\/"#)]
    EscapedSlash,
    #[token(r#"\b"#)]
    EscapedBackspace,
    #[token(r#"\f"#)]
    EscapedFormfeed,
    #[token(r#"\n"#)]
    EscapedNewline,
    #[token(r#"\r"#)]
    EscapedReturn,
    #[token(r#"\t"#)]
    EscapedTab,

    #[token("\"")]
    EndString,

    #[error]
    Error,
}

#[inline]
fn lex_string<'a>(lex: &mut Lexer<'a, Token<'a>>, mut output: String) -> Option<&'a str> {
    let mut sublex = StringPart::lexer(lex.remainder());
    while let Some(token) = sublex.next() {
        match token {
            StringPart::Error => break,
            StringPart::Text => output.push_str(sublex.slice()),
            StringPart::EscapedQuote => output.push('"'),
            StringPart::EscapedBackslash => output.push('\\'),
            StringPart::EscapedSlash => output.push('/'),
            StringPart::EscapedBackspace => output.push(8 as char),
            StringPart::EscapedFormfeed => output.push(12 as char),
            StringPart::EscapedNewline => output.push('\n'),
            StringPart::EscapedReturn => output.push('\r'),
            StringPart::EscapedTab => output.push('\t'),
            StringPart::EscapedCodepoint => {
                use lexical_core::*;
                const FORMAT: u128 = NumberFormatBuilder::hexadecimal();
                const OPTIONS: ParseIntegerOptions = ParseIntegerOptions::new();
                output.push(
                    parse_with_options::<u32, FORMAT>(sublex.slice()[2..].as_bytes(), &OPTIONS)
                        .ok()
                        .and_then(std::char::from_u32)?,
                );
            }
            StringPart::EndString => {
                lex.bump(sublex.span().end);
                return Some(lex.extras.arena.alloc_str(&output));
            }
        }
    }
    None
}

/// Scans a block string up to its closing `"""`, only `\"""` is treated as an escape.
#[inline]
fn lex_block_string<'a>(lex: &mut Lexer<'a, Token<'a>>) -> Option<&'a str> {
    let remainder = lex.remainder();
    let mut raw = String::new();
    let mut index = 0;
    loop {
        let rest = &remainder[index..];
        if rest.starts_with(r#"\""""#) {
            raw.push_str(r#"""""#);
            index += 4;
        } else if rest.starts_with(r#"""""#) {
            lex.bump(index + 3);
            return Some(lex.extras.arena.alloc_str(&block_string_value(&raw)));
        } else {
            let c = rest.chars().next()?;
            raw.push(c);
            index += c.len_utf8();
        }
    }
}

/// Removes the common indentation of a block string as well as its leading and trailing blank
/// lines. The first line never counts towards the common indentation.
pub(crate) fn block_string_value(raw: &str) -> String {
    let normalized = raw.replace("\r\n", "\n").replace('\r', "\n");
    let mut lines: Vec<&str> = normalized.split('\n').collect();

    let is_blank = |line: &str| line.chars().all(|c| c == ' ' || c == '\t');
    let common_indent = lines
        .iter()
        .skip(1)
        .filter(|line| !is_blank(line))
        .map(|line| line.len() - line.trim_start_matches([' ', '\t']).len())
        .min()
        .unwrap_or(0);

    for line in lines.iter_mut().skip(1) {
        *line = if line.len() >= common_indent {
            &line[common_indent..]
        } else {
            ""
        };
    }

    while lines.first().map_or(false, |line| is_blank(line)) {
        lines.remove(0);
    }
    while lines.last().map_or(false, |line| is_blank(line)) {
        lines.pop();
    }

    lines.join("\n")
}

fn parse_string<'a>(lex: &mut Lexer<'a, Token<'a>>) -> Option<&'a str> {
    match lex.slice() {
        r#""""# => Some(""),
        r#"""""# => lex_block_string(lex),
        "\"" => {
            // Plain strings without escapes are borrowed straight from the source
            let remainder = lex.remainder();
            for (i, c) in remainder.char_indices() {
                match c {
                    '\n' | '\r' => return None,
                    '\\' => {
                        lex.bump(i);
                        return lex_string(lex, remainder[0..i].to_string());
                    }
                    '"' => {
                        lex.bump(i + 1);
                        return Some(&remainder[0..i]);
                    }
                    _ => {}
                }
            }
            None
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{block_string_value, Extras, Token};
    use bumpalo::Bump;
    use logos::Logos;

    #[test]
    fn empty() {
        let arena = Bump::new();
        let mut lex = Token::lexer_with_extras("", Extras { arena: &arena });
        assert_eq!(lex.next(), None);
        let mut lex = Token::lexer_with_extras(",,       # comment\n", Extras { arena: &arena });
        assert_eq!(lex.next(), None);
    }

    #[test]
    fn symbols() {
        let arena = Bump::new();
        let extras = Extras { arena: &arena };
        let mut lex = Token::lexer_with_extras("[]{}()=:!&|,", extras);
        assert_eq!(lex.next(), Some(Token::BracketOpen));
        assert_eq!(lex.next(), Some(Token::BracketClose));
        assert_eq!(lex.next(), Some(Token::BraceOpen));
        assert_eq!(lex.next(), Some(Token::BraceClose));
        assert_eq!(lex.next(), Some(Token::ParenOpen));
        assert_eq!(lex.next(), Some(Token::ParenClose));
        assert_eq!(lex.next(), Some(Token::Equal));
        assert_eq!(lex.next(), Some(Token::Colon));
        assert_eq!(lex.next(), Some(Token::Exclam));
        assert_eq!(lex.next(), Some(Token::Ampersand));
        assert_eq!(lex.next(), Some(Token::Pipe));
        assert_eq!(lex.next(), None);
    }

    #[test]
    fn type_header() {
        let arena = Bump::new();
        let mut lex = Token::lexer_with_extras(
            "type User implements Node @key # trailing\n{",
            Extras { arena: &arena },
        );
        assert_eq!(lex.next(), Some(Token::Name("type")));
        assert_eq!(lex.next(), Some(Token::Name("User")));
        assert_eq!(lex.next(), Some(Token::Name("implements")));
        assert_eq!(lex.next(), Some(Token::Name("Node")));
        assert_eq!(lex.next(), Some(Token::DirectiveName("key")));
        assert_eq!(lex.next(), Some(Token::BraceOpen));
        assert_eq!(lex.next(), None);
    }

    #[test]
    fn numbers() {
        let arena = Bump::new();
        let mut lex = Token::lexer_with_extras("10 -1 0 1.5 -2e3", Extras { arena: &arena });
        assert_eq!(lex.next(), Some(Token::Integer("10")));
        assert_eq!(lex.next(), Some(Token::Integer("-1")));
        assert_eq!(lex.next(), Some(Token::Integer("0")));
        assert_eq!(lex.next(), Some(Token::Float("1.5")));
        assert_eq!(lex.next(), Some(Token::Float("-2e3")));
        assert_eq!(lex.next(), None);
    }

    #[test]
    fn strings() {
        let arena = Bump::new();
        let mut lex = Token::lexer_with_extras("\"hello world\"", Extras { arena: &arena });
        assert_eq!(lex.next(), Some(Token::String("hello world")));
        assert_eq!(lex.next(), None);
        let mut lex = Token::lexer_with_extras("\"\"", Extras { arena: &arena });
        assert_eq!(lex.next(), Some(Token::String("")));
        let mut lex =
            Token::lexer_with_extras("\"say \\\"hi\\\" \\u0041\"", Extras { arena: &arena });
        assert_eq!(lex.next(), Some(Token::String("say \"hi\" A")));
        assert_eq!(lex.next(), None);
    }

    #[test]
    fn block_strings() {
        let arena = Bump::new();
        let mut lex = Token::lexer_with_extras(
            "\"\"\"\n    A user.\n\n      Indented \\\"\"\" quote\n  \"\"\" type",
            Extras { arena: &arena },
        );
        assert_eq!(
            lex.next(),
            Some(Token::String("A user.\n\n  Indented \"\"\" quote"))
        );
        assert_eq!(lex.next(), Some(Token::Name("type")));
        let mut lex = Token::lexer_with_extras("\"\"\"\"\"\"", Extras { arena: &arena });
        assert_eq!(lex.next(), Some(Token::String("")));
    }

    #[test]
    fn block_string_value_keeps_first_line() {
        assert_eq!(block_string_value("first\n    second\n      third"), "first\nsecond\n  third");
        assert_eq!(block_string_value("  \n\n"), "");
    }

    #[test]
    fn bad_strings() {
        let arena = Bump::new();
        let mut lex = Token::lexer_with_extras("\"\\ \"", Extras { arena: &arena });
        assert_eq!(lex.next(), Some(Token::Error));
        let mut lex = Token::lexer_with_extras("\"\n\"", Extras { arena: &arena });
        assert_eq!(lex.next(), Some(Token::Error));
        let mut lex = Token::lexer_with_extras("\"unterminated", Extras { arena: &arena });
        assert_eq!(lex.next(), Some(Token::Error));
        let mut lex = Token::lexer_with_extras("\"\"\"never closed", Extras { arena: &arena });
        assert_eq!(lex.next(), Some(Token::Error));
    }
}
