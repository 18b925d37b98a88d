// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! The scanner that produces tokens from source text.
//!
//! The scanner works on byte offsets into the source so it can be cloned
//! cheaply for lookahead and repositioned when the parser decides that a
//! `/` starts a regular expression or a `}` resumes a template literal.

use super::{Span, Token, TokenKind};

/// A scanner that tokenizes JavaScript source code.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    source: &'a str,
    pos: usize,
    newline_before: bool,
}

impl<'a> Scanner<'a> {
    /// Creates a new scanner for the given source code.
    ///
    /// A leading `#!` line is skipped.
    pub fn new(source: &'a str) -> Self {
        let mut scanner = Self {
            source,
            pos: 0,
            newline_before: false,
        };
        if source.starts_with("#!") {
            while let Some(ch) = scanner.peek() {
                if is_line_terminator(ch) {
                    break;
                }
                scanner.advance();
            }
        }
        scanner
    }

    /// Returns the source text being scanned.
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Returns the next token from the source.
    pub fn next_token(&mut self) -> Token {
        self.newline_before = false;
        if let Err(reason) = self.skip_whitespace_and_comments() {
            let start = self.pos;
            self.pos = self.source.len();
            return self.finish(TokenKind::Invalid(reason), start);
        }

        let start = self.pos;

        let Some(ch) = self.advance() else {
            return self.finish(TokenKind::Eof, start);
        };

        let kind = match ch {
            '{' => TokenKind::LeftBrace,
            '}' => TokenKind::RightBrace,
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            '[' => TokenKind::LeftBracket,
            ']' => TokenKind::RightBracket,
            ';' => TokenKind::Semicolon,
            ',' => TokenKind::Comma,
            ':' => TokenKind::Colon,
            '~' => TokenKind::Tilde,

            '.' => self.scan_dot(),
            '+' => self.scan_plus(),
            '-' => self.scan_minus(),
            '*' => self.scan_star(),
            '/' => self.scan_slash(),
            '%' => self.scan_percent(),
            '<' => self.scan_less_than(),
            '>' => self.scan_greater_than(),
            '=' => self.scan_equal(),
            '!' => self.scan_bang(),
            '&' => self.scan_ampersand(),
            '|' => self.scan_pipe(),
            '^' => self.scan_caret(),
            '?' => self.scan_question(),

            '"' | '\'' => self.scan_string(ch),
            '`' => self.scan_template_part(true),
            '0'..='9' => self.scan_number(ch),
            '#' => self.scan_private_identifier(),
            _ if is_id_start(ch) => self.scan_identifier(ch),

            _ => TokenKind::Invalid("unexpected character"),
        };

        self.finish(kind, start)
    }

    /// Re-reads a `/` or `/=` token as a regular expression literal.
    pub fn rescan_regex(&mut self, slash: &Token) -> Token {
        self.pos = slash.span.start + 1;
        let kind = self.scan_regex_body();
        let mut token = Token::new(kind, Span::new(slash.span.start, self.pos));
        token.newline_before = slash.newline_before;
        token
    }

    /// Re-reads a `}` token as the continuation of a template literal,
    /// producing either a middle or a tail part.
    pub fn rescan_template_continuation(&mut self, brace: &Token) -> Token {
        self.pos = brace.span.start + 1;
        let kind = self.scan_template_part(false);
        let mut token = Token::new(kind, Span::new(brace.span.start, self.pos));
        token.newline_before = brace.newline_before;
        token
    }

    fn finish(&self, kind: TokenKind, start: usize) -> Token {
        let mut token = Token::new(kind, Span::new(start, self.pos));
        token.newline_before = self.newline_before;
        token
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.source[self.pos..].chars().next()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn peek(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    fn peek_next(&self) -> Option<char> {
        let mut chars = self.source[self.pos..].chars();
        chars.next();
        chars.next()
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn skip_whitespace_and_comments(&mut self) -> Result<(), &'static str> {
        loop {
            match self.peek() {
                Some(ch) if is_line_terminator(ch) => {
                    self.newline_before = true;
                    self.advance();
                }
                Some(ch) if is_whitespace(ch) => {
                    self.advance();
                }
                Some('/') => match self.peek_next() {
                    Some('/') => {
                        self.pos += 2;
                        while let Some(ch) = self.peek() {
                            if is_line_terminator(ch) {
                                break;
                            }
                            self.advance();
                        }
                    }
                    Some('*') => {
                        self.pos += 2;
                        let Some(len) = self.source[self.pos..].find("*/") else {
                            return Err("unterminated comment");
                        };
                        let body = &self.source[self.pos..self.pos + len];
                        if body.chars().any(is_line_terminator) {
                            self.newline_before = true;
                        }
                        self.pos += len + 2;
                    }
                    _ => return Ok(()),
                },
                _ => return Ok(()),
            }
        }
    }

    fn scan_dot(&mut self) -> TokenKind {
        match self.peek() {
            Some(ch) if ch.is_ascii_digit() => self.scan_number('.'),
            Some('.') if self.peek_next() == Some('.') => {
                self.pos += 2;
                TokenKind::Ellipsis
            }
            _ => TokenKind::Dot,
        }
    }

    fn scan_plus(&mut self) -> TokenKind {
        if self.eat('+') {
            TokenKind::PlusPlus
        } else if self.eat('=') {
            TokenKind::PlusEqual
        } else {
            TokenKind::Plus
        }
    }

    fn scan_minus(&mut self) -> TokenKind {
        if self.eat('-') {
            TokenKind::MinusMinus
        } else if self.eat('=') {
            TokenKind::MinusEqual
        } else {
            TokenKind::Minus
        }
    }

    fn scan_star(&mut self) -> TokenKind {
        if self.eat('*') {
            if self.eat('=') {
                TokenKind::StarStarEqual
            } else {
                TokenKind::StarStar
            }
        } else if self.eat('=') {
            TokenKind::StarEqual
        } else {
            TokenKind::Star
        }
    }

    fn scan_slash(&mut self) -> TokenKind {
        if self.eat('=') {
            TokenKind::SlashEqual
        } else {
            TokenKind::Slash
        }
    }

    fn scan_percent(&mut self) -> TokenKind {
        if self.eat('=') {
            TokenKind::PercentEqual
        } else {
            TokenKind::Percent
        }
    }

    fn scan_less_than(&mut self) -> TokenKind {
        if self.eat('<') {
            if self.eat('=') {
                TokenKind::LeftShiftEqual
            } else {
                TokenKind::LeftShift
            }
        } else if self.eat('=') {
            TokenKind::LessThanEqual
        } else {
            TokenKind::LessThan
        }
    }

    fn scan_greater_than(&mut self) -> TokenKind {
        if self.eat('>') {
            if self.eat('>') {
                if self.eat('=') {
                    TokenKind::UnsignedRightShiftEqual
                } else {
                    TokenKind::UnsignedRightShift
                }
            } else if self.eat('=') {
                TokenKind::RightShiftEqual
            } else {
                TokenKind::RightShift
            }
        } else if self.eat('=') {
            TokenKind::GreaterThanEqual
        } else {
            TokenKind::GreaterThan
        }
    }

    fn scan_equal(&mut self) -> TokenKind {
        if self.eat('=') {
            if self.eat('=') {
                TokenKind::StrictEqual
            } else {
                TokenKind::EqualEqual
            }
        } else if self.eat('>') {
            TokenKind::Arrow
        } else {
            TokenKind::Equal
        }
    }

    fn scan_bang(&mut self) -> TokenKind {
        if self.eat('=') {
            if self.eat('=') {
                TokenKind::StrictNotEqual
            } else {
                TokenKind::NotEqual
            }
        } else {
            TokenKind::Bang
        }
    }

    fn scan_ampersand(&mut self) -> TokenKind {
        if self.eat('&') {
            if self.eat('=') {
                TokenKind::AmpersandAmpersandEqual
            } else {
                TokenKind::AmpersandAmpersand
            }
        } else if self.eat('=') {
            TokenKind::AmpersandEqual
        } else {
            TokenKind::Ampersand
        }
    }

    fn scan_pipe(&mut self) -> TokenKind {
        if self.eat('|') {
            if self.eat('=') {
                TokenKind::PipePipeEqual
            } else {
                TokenKind::PipePipe
            }
        } else if self.eat('=') {
            TokenKind::PipeEqual
        } else {
            TokenKind::Pipe
        }
    }

    fn scan_caret(&mut self) -> TokenKind {
        if self.eat('=') {
            TokenKind::CaretEqual
        } else {
            TokenKind::Caret
        }
    }

    fn scan_question(&mut self) -> TokenKind {
        if self.eat('?') {
            if self.eat('=') {
                TokenKind::QuestionQuestionEqual
            } else {
                TokenKind::QuestionQuestion
            }
        } else if self.peek() == Some('.')
            && !self.peek_next().is_some_and(|ch| ch.is_ascii_digit())
        {
            // `a?.5:b` is a conditional, not optional chaining
            self.advance();
            TokenKind::QuestionDot
        } else {
            TokenKind::Question
        }
    }

    fn scan_string(&mut self, quote: char) -> TokenKind {
        let mut value = String::new();

        loop {
            match self.advance() {
                None => return TokenKind::Invalid("unterminated string literal"),
                Some(ch) if ch == quote => break,
                Some('\n' | '\r') => return TokenKind::Invalid("unterminated string literal"),
                Some('\\') => {
                    if let Err(reason) = self.scan_escape(&mut value) {
                        return TokenKind::Invalid(reason);
                    }
                }
                Some(ch) => value.push(ch),
            }
        }

        TokenKind::String(value)
    }

    fn scan_escape(&mut self, value: &mut String) -> Result<(), &'static str> {
        let Some(escaped) = self.advance() else {
            return Err("unterminated string literal");
        };
        match escaped {
            'n' => value.push('\n'),
            'r' => value.push('\r'),
            't' => value.push('\t'),
            'b' => value.push('\u{8}'),
            'f' => value.push('\u{c}'),
            'v' => value.push('\u{b}'),
            '0' if !self.peek().is_some_and(|ch| ch.is_ascii_digit()) => value.push('\0'),
            '0'..='9' => return Err("octal escape sequences are not allowed in module code"),
            'x' => {
                let code = self.scan_hex_digits(2).ok_or("invalid hexadecimal escape")?;
                value.push(char::from_u32(code).ok_or("invalid hexadecimal escape")?);
            }
            'u' => {
                let code = self.scan_unicode_escape()?;
                value.push(char::from_u32(code).unwrap_or('\u{fffd}'));
            }
            // Line continuation
            '\r' => {
                self.eat('\n');
            }
            ch if is_line_terminator(ch) => {}
            other => value.push(other),
        }
        Ok(())
    }

    fn scan_unicode_escape(&mut self) -> Result<u32, &'static str> {
        if self.eat('{') {
            let start = self.pos;
            while self.peek().is_some_and(|ch| ch.is_ascii_hexdigit()) {
                self.advance();
            }
            let digits = &self.source[start..self.pos];
            if digits.is_empty() || !self.eat('}') {
                return Err("invalid unicode escape");
            }
            let code = u32::from_str_radix(digits, 16).map_err(|_| "invalid unicode escape")?;
            if code > 0x10FFFF {
                return Err("invalid unicode escape");
            }
            return Ok(code);
        }

        let high = self.scan_hex_digits(4).ok_or("invalid unicode escape")?;
        // Combine an escaped surrogate pair into one scalar
        if (0xD800..0xDC00).contains(&high) && self.source[self.pos..].starts_with("\\u") {
            let mut lookahead = self.clone();
            lookahead.pos += 2;
            if let Some(low) = lookahead.scan_hex_digits(4) {
                if (0xDC00..0xE000).contains(&low) {
                    self.pos = lookahead.pos;
                    return Ok(0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00));
                }
            }
        }
        Ok(high)
    }

    fn scan_hex_digits(&mut self, count: usize) -> Option<u32> {
        let digits = self.source.get(self.pos..self.pos + count)?;
        if !digits.chars().all(|ch| ch.is_ascii_hexdigit()) {
            return None;
        }
        self.pos += count;
        u32::from_str_radix(digits, 16).ok()
    }

    /// Scans a template part after its opening delimiter (`` ` `` or `}`).
    ///
    /// The token carries the raw text between the delimiters.
    fn scan_template_part(&mut self, head: bool) -> TokenKind {
        let start = self.pos;

        loop {
            match self.advance() {
                None => return TokenKind::Invalid("unterminated template literal"),
                Some('`') => {
                    let raw = self.source[start..self.pos - 1].to_string();
                    return if head {
                        TokenKind::NoSubstitutionTemplate(raw)
                    } else {
                        TokenKind::TemplateTail(raw)
                    };
                }
                Some('$') if self.peek() == Some('{') => {
                    let raw = self.source[start..self.pos - 1].to_string();
                    self.advance();
                    return if head {
                        TokenKind::TemplateHead(raw)
                    } else {
                        TokenKind::TemplateMiddle(raw)
                    };
                }
                Some('\\') => {
                    self.advance();
                }
                Some(_) => {}
            }
        }
    }

    fn scan_regex_body(&mut self) -> TokenKind {
        let start = self.pos;
        let mut in_class = false;

        loop {
            match self.advance() {
                None => return TokenKind::Invalid("unterminated regular expression"),
                Some(ch) if is_line_terminator(ch) => {
                    return TokenKind::Invalid("unterminated regular expression");
                }
                Some('\\') => {
                    match self.advance() {
                        Some(ch) if !is_line_terminator(ch) => {}
                        _ => return TokenKind::Invalid("unterminated regular expression"),
                    }
                }
                Some('[') => in_class = true,
                Some(']') => in_class = false,
                Some('/') if !in_class => break,
                Some(_) => {}
            }
        }

        let pattern = self.source[start..self.pos - 1].to_string();
        let flags_start = self.pos;
        while self.peek().is_some_and(is_id_continue) {
            self.advance();
        }
        let flags = self.source[flags_start..self.pos].to_string();
        if !valid_regex_flags(&flags) {
            return TokenKind::Invalid("invalid regular expression flags");
        }

        TokenKind::RegExp { pattern, flags }
    }

    fn scan_number(&mut self, first: char) -> TokenKind {
        self.scan_numeric_literal(first).unwrap_or_else(TokenKind::Invalid)
    }

    fn scan_numeric_literal(&mut self, first: char) -> Result<TokenKind, &'static str> {
        if first == '0' {
            let radix = match self.peek() {
                Some('x' | 'X') => Some(16),
                Some('o' | 'O') => Some(8),
                Some('b' | 'B') => Some(2),
                _ => None,
            };
            if let Some(radix) = radix {
                self.advance();
                return self.scan_radix_number(radix);
            }
            if self.peek().is_some_and(|ch| ch.is_ascii_digit() || ch == '_') {
                return Err("legacy octal literals are not allowed in module code");
            }
        }

        let mut value = String::from(first);
        let mut is_integer = first != '.';

        self.collect_digits(&mut value, 10, is_integer)?;

        if is_integer && self.peek() == Some('.') {
            is_integer = false;
            value.push('.');
            self.advance();
            self.collect_digits(&mut value, 10, false)?;
        }

        if matches!(self.peek(), Some('e' | 'E')) {
            let sign = self.peek_next();
            let has_exponent = match sign {
                Some('+' | '-') => {
                    let mut rest = self.source[self.pos + 2..].chars();
                    rest.next().is_some_and(|ch| ch.is_ascii_digit())
                }
                Some(ch) => ch.is_ascii_digit(),
                None => false,
            };
            if has_exponent {
                is_integer = false;
                value.push('e');
                self.advance();
                if let Some(sign @ ('+' | '-')) = self.peek() {
                    value.push(sign);
                    self.advance();
                }
                self.collect_digits(&mut value, 10, false)?;
            }
        }

        if is_integer && self.eat('n') {
            return Ok(TokenKind::BigInt(value));
        }

        if self.peek().is_some_and(is_id_start) {
            return Err("identifier starts immediately after numeric literal");
        }

        value
            .parse::<f64>()
            .map(TokenKind::Number)
            .map_err(|_| "invalid numeric literal")
    }

    fn scan_radix_number(&mut self, radix: u32) -> Result<TokenKind, &'static str> {
        let mut digits = String::new();
        self.collect_digits(&mut digits, radix, false)?;

        if digits.is_empty() {
            return Err("missing digits after radix prefix");
        }

        if self.eat('n') {
            let prefix = match radix {
                16 => "0x",
                8 => "0o",
                _ => "0b",
            };
            return Ok(TokenKind::BigInt(format!("{prefix}{digits}")));
        }

        // Fold digit by digit so literals wider than 64 bits stay finite
        let value = digits.chars().fold(0f64, |acc, ch| {
            acc * f64::from(radix) + f64::from(ch.to_digit(radix).unwrap_or(0))
        });
        Ok(TokenKind::Number(value))
    }

    /// Collects digits of `radix`, dropping `_` separators. A separator
    /// must sit between two digits; `after_digit` says whether the text
    /// just before the run already ends in one.
    fn collect_digits(
        &mut self,
        value: &mut String,
        radix: u32,
        mut after_digit: bool,
    ) -> Result<(), &'static str> {
        while let Some(ch) = self.peek() {
            if ch == '_' {
                if !after_digit || !self.peek_next().is_some_and(|next| next.is_digit(radix)) {
                    return Err("numeric separators are only allowed between digits");
                }
                after_digit = false;
                self.advance();
            } else if ch.is_digit(radix) {
                value.push(ch);
                after_digit = true;
                self.advance();
            } else {
                break;
            }
        }
        Ok(())
    }

    fn scan_identifier(&mut self, first: char) -> TokenKind {
        let start = self.pos - first.len_utf8();
        while self.peek().is_some_and(is_id_continue) {
            self.advance();
        }
        keyword_or_identifier(&self.source[start..self.pos])
    }

    fn scan_private_identifier(&mut self) -> TokenKind {
        let start = self.pos;
        if !self.peek().is_some_and(is_id_start) {
            return TokenKind::Invalid("expected name after '#'");
        }
        while self.peek().is_some_and(is_id_continue) {
            self.advance();
        }
        TokenKind::PrivateIdentifier(self.source[start..self.pos].to_string())
    }
}

fn keyword_or_identifier(name: &str) -> TokenKind {
    match name {
        "await" => TokenKind::Await,
        "break" => TokenKind::Break,
        "case" => TokenKind::Case,
        "catch" => TokenKind::Catch,
        "class" => TokenKind::Class,
        "const" => TokenKind::Const,
        "continue" => TokenKind::Continue,
        "debugger" => TokenKind::Debugger,
        "default" => TokenKind::Default,
        "delete" => TokenKind::Delete,
        "do" => TokenKind::Do,
        "else" => TokenKind::Else,
        "enum" => TokenKind::Enum,
        "export" => TokenKind::Export,
        "extends" => TokenKind::Extends,
        "false" => TokenKind::False,
        "finally" => TokenKind::Finally,
        "for" => TokenKind::For,
        "function" => TokenKind::Function,
        "if" => TokenKind::If,
        "import" => TokenKind::Import,
        "in" => TokenKind::In,
        "instanceof" => TokenKind::Instanceof,
        "let" => TokenKind::Let,
        "new" => TokenKind::New,
        "null" => TokenKind::Null,
        "return" => TokenKind::Return,
        "static" => TokenKind::Static,
        "super" => TokenKind::Super,
        "switch" => TokenKind::Switch,
        "this" => TokenKind::This,
        "throw" => TokenKind::Throw,
        "true" => TokenKind::True,
        "try" => TokenKind::Try,
        "typeof" => TokenKind::Typeof,
        "var" => TokenKind::Var,
        "void" => TokenKind::Void,
        "while" => TokenKind::While,
        "with" => TokenKind::With,
        "yield" => TokenKind::Yield,
        "async" => TokenKind::Async,
        _ => TokenKind::Identifier(name.to_string()),
    }
}

/// Checks if a character can start an identifier.
pub fn is_id_start(ch: char) -> bool {
    ch == '_' || ch == '$' || unicode_xid::UnicodeXID::is_xid_start(ch)
}

/// Checks if a character can continue an identifier.
pub fn is_id_continue(ch: char) -> bool {
    ch == '_'
        || ch == '$'
        || ch == '\u{200c}'
        || ch == '\u{200d}'
        || unicode_xid::UnicodeXID::is_xid_continue(ch)
}

fn is_line_terminator(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

fn is_whitespace(ch: char) -> bool {
    matches!(
        ch,
        ' ' | '\t' | '\u{b}' | '\u{c}' | '\u{a0}' | '\u{feff}'
    ) || (!ch.is_ascii() && ch.is_whitespace() && !is_line_terminator(ch))
}

fn valid_regex_flags(flags: &str) -> bool {
    flags
        .char_indices()
        .all(|(i, ch)| "dgimsuvy".contains(ch) && !flags[..i].contains(ch))
        && !(flags.contains('u') && flags.contains('v'))
}

/// Cooks the raw text of a template part.
///
/// Fails on escapes that only a tagged template may carry, such as `\x`
/// without hex digits or an unclosed `\u{`.
pub fn cook_template(raw: &str) -> Result<String, &'static str> {
    let mut scanner = Scanner {
        source: raw,
        pos: 0,
        newline_before: false,
    };
    let mut cooked = String::with_capacity(raw.len());
    while let Some(ch) = scanner.advance() {
        match ch {
            '\\' => scanner.scan_escape(&mut cooked)?,
            '\r' => {
                scanner.eat('\n');
                cooked.push('\n');
            }
            other => cooked.push(other),
        }
    }
    Ok(cooked)
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.next_token();
        if token.kind == TokenKind::Eof {
            None
        } else {
            Some(token)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Scanner::new(source).map(|t| t.kind).collect()
    }

    #[test]
    fn test_punctuation() {
        assert_eq!(
            kinds("{ } ( ) ... ?. ?? =>"),
            vec![
                TokenKind::LeftBrace,
                TokenKind::RightBrace,
                TokenKind::LeftParen,
                TokenKind::RightParen,
                TokenKind::Ellipsis,
                TokenKind::QuestionDot,
                TokenKind::QuestionQuestion,
                TokenKind::Arrow,
            ]
        );
    }

    #[test]
    fn test_conditional_with_leading_dot_number() {
        assert_eq!(
            kinds("a?.5:b"),
            vec![
                TokenKind::Identifier("a".into()),
                TokenKind::Question,
                TokenKind::Number(0.5),
                TokenKind::Colon,
                TokenKind::Identifier("b".into()),
            ]
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            kinds("42 3.14 0xff 0b1010 0o17 1_000 1e3 .5"),
            vec![
                TokenKind::Number(42.0),
                TokenKind::Number(3.14),
                TokenKind::Number(255.0),
                TokenKind::Number(10.0),
                TokenKind::Number(15.0),
                TokenKind::Number(1000.0),
                TokenKind::Number(1000.0),
                TokenKind::Number(0.5),
            ]
        );
    }

    #[test]
    fn test_bigint() {
        assert_eq!(
            kinds("10n 0xffn"),
            vec![TokenKind::BigInt("10".into()), TokenKind::BigInt("0xff".into())]
        );
    }

    #[test]
    fn test_member_access_on_integer_is_not_exponent() {
        assert_eq!(
            kinds("1..toString"),
            vec![
                TokenKind::Number(1.0),
                TokenKind::Dot,
                TokenKind::Identifier("toString".into()),
            ]
        );
    }

    #[test]
    fn test_strings_with_escapes() {
        assert_eq!(
            kinds(r#""a\nb" 'it\'s' "\x41B\u{43}" "😀""#),
            vec![
                TokenKind::String("a\nb".into()),
                TokenKind::String("it's".into()),
                TokenKind::String("ABC".into()),
                TokenKind::String("\u{1F600}".into()),
            ]
        );
    }

    #[test]
    fn test_unterminated_string() {
        assert!(matches!(kinds("\"abc")[0], TokenKind::Invalid(_)));
        assert!(matches!(kinds("'abc\n'")[0], TokenKind::Invalid(_)));
    }

    #[test]
    fn test_keywords_and_identifiers() {
        assert_eq!(
            kinds("import foo from as _bar $baz"),
            vec![
                TokenKind::Import,
                TokenKind::Identifier("foo".into()),
                TokenKind::Identifier("from".into()),
                TokenKind::Identifier("as".into()),
                TokenKind::Identifier("_bar".into()),
                TokenKind::Identifier("$baz".into()),
            ]
        );
    }

    #[test]
    fn test_private_identifier() {
        assert_eq!(kinds("#count"), vec![TokenKind::PrivateIdentifier("count".into())]);
    }

    #[test]
    fn test_comments_are_skipped() {
        assert_eq!(
            kinds("1 // line\n2 /* block\n */ 3"),
            vec![TokenKind::Number(1.0), TokenKind::Number(2.0), TokenKind::Number(3.0)]
        );
    }

    #[test]
    fn test_unterminated_block_comment() {
        assert!(matches!(kinds("1 /* open")[1], TokenKind::Invalid(_)));
    }

    #[test]
    fn test_newline_tracking() {
        let mut scanner = Scanner::new("a\nb /*\n*/ c d");
        assert!(!scanner.next_token().newline_before);
        assert!(scanner.next_token().newline_before);
        assert!(scanner.next_token().newline_before);
        assert!(!scanner.next_token().newline_before);
    }

    #[test]
    fn test_hashbang_is_skipped() {
        assert_eq!(
            kinds("#!/usr/bin/env node\nx"),
            vec![TokenKind::Identifier("x".into())]
        );
    }

    #[test]
    fn test_template_parts() {
        let source = "`a${b}c${d}e`";
        let mut scanner = Scanner::new(source);
        assert_eq!(scanner.next_token().kind, TokenKind::TemplateHead("a".into()));
        assert_eq!(scanner.next_token().kind, TokenKind::Identifier("b".into()));
        let brace = scanner.next_token();
        assert_eq!(brace.kind, TokenKind::RightBrace);
        let middle = scanner.rescan_template_continuation(&brace);
        assert_eq!(middle.kind, TokenKind::TemplateMiddle("c".into()));
        assert_eq!(scanner.next_token().kind, TokenKind::Identifier("d".into()));
        let brace = scanner.next_token();
        let tail = scanner.rescan_template_continuation(&brace);
        assert_eq!(tail.kind, TokenKind::TemplateTail("e".into()));
        assert_eq!(scanner.next_token().kind, TokenKind::Eof);
    }

    #[test]
    fn test_template_keeps_raw_text() {
        assert_eq!(
            kinds(r"`a\n\`b`"),
            vec![TokenKind::NoSubstitutionTemplate(r"a\n\`b".into())]
        );
    }

    #[test]
    fn test_regex_rescan() {
        let mut scanner = Scanner::new("/[/]a\\/b/gi.test");
        let slash = scanner.next_token();
        assert_eq!(slash.kind, TokenKind::Slash);
        let regex = scanner.rescan_regex(&slash);
        assert_eq!(
            regex.kind,
            TokenKind::RegExp {
                pattern: "[/]a\\/b".into(),
                flags: "gi".into(),
            }
        );
        assert_eq!(scanner.next_token().kind, TokenKind::Dot);
    }

    #[test]
    fn test_regex_flags_are_checked() {
        let flags = |source: &str| {
            let mut scanner = Scanner::new(source);
            let slash = scanner.next_token();
            scanner.rescan_regex(&slash).kind
        };
        assert!(matches!(flags("/a/dgimsy"), TokenKind::RegExp { .. }));
        assert!(matches!(flags("/a/v"), TokenKind::RegExp { .. }));
        assert_eq!(flags("/a/gg"), TokenKind::Invalid("invalid regular expression flags"));
        assert_eq!(flags("/a/x"), TokenKind::Invalid("invalid regular expression flags"));
        assert_eq!(flags("/a/uv"), TokenKind::Invalid("invalid regular expression flags"));
    }

    #[test]
    fn test_numeric_separators_sit_between_digits() {
        assert_eq!(
            kinds("1_000_000 0xff_ff 1.0_5 1e1_0"),
            vec![
                TokenKind::Number(1_000_000.0),
                TokenKind::Number(65535.0),
                TokenKind::Number(1.05),
                TokenKind::Number(1e10),
            ]
        );
        for source in ["1__0", "1_", "0x_1", "1_.5", "1._5", "0b1__0"] {
            assert_eq!(
                kinds(source)[0],
                TokenKind::Invalid("numeric separators are only allowed between digits"),
                "{source}"
            );
        }
    }

    #[test]
    fn test_legacy_octal_is_rejected() {
        for source in ["08", "01", "0_1", "00"] {
            assert_eq!(
                kinds(source)[0],
                TokenKind::Invalid("legacy octal literals are not allowed in module code"),
                "{source}"
            );
        }
        assert_eq!(
            kinds("0 0.5 0n"),
            vec![
                TokenKind::Number(0.0),
                TokenKind::Number(0.5),
                TokenKind::BigInt("0".into()),
            ]
        );
    }

    #[test]
    fn test_octal_escapes_are_rejected() {
        assert_eq!(kinds(r#""a\0b""#), vec![TokenKind::String("a\0b".into())]);
        for source in [r#""\1""#, r#""\01""#, r#""\8""#] {
            assert_eq!(
                kinds(source)[0],
                TokenKind::Invalid("octal escape sequences are not allowed in module code"),
                "{source}"
            );
        }
    }

    #[test]
    fn test_cook_template() {
        assert_eq!(cook_template(r"a\n\`b\u{43}").as_deref(), Ok("a\n`bC"));
        assert_eq!(cook_template("a\r\nb").as_deref(), Ok("a\nb"));
        assert_eq!(cook_template(r"\u{"), Err("invalid unicode escape"));
        assert_eq!(cook_template(r"\x"), Err("invalid hexadecimal escape"));
        assert_eq!(
            cook_template(r"\1"),
            Err("octal escape sequences are not allowed in module code")
        );
    }

    #[test]
    fn test_division_vs_comment() {
        assert_eq!(
            kinds("6 / 2"),
            vec![TokenKind::Number(6.0), TokenKind::Slash, TokenKind::Number(2.0)]
        );
    }

    #[test]
    fn test_spans() {
        let tokens: Vec<_> = Scanner::new("let  answer").collect();
        assert_eq!(tokens[0].span, Span::new(0, 3));
        assert_eq!(tokens[1].span, Span::new(5, 11));
    }
}
