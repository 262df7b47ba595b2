//! Lexer for Sable source text
//!
//! Converts a raw ASCII byte range into a stream of [`Token`]s, one call to
//! [`Lexer::next_token`] at a time.  The lexer owns line/column tracking and
//! statement-terminator insertion: a `;` token is synthesized at a line
//! break (or at end of input) whenever the previous token could end a
//! statement.
//!
//! The cursor keeps a one-codepoint pushback buffer (`getr`/`ungetr`), which
//! is enough for the two-character lookahead the operator cascades need.

use std::rc::Rc;

use thiserror::Error;

use crate::parser::ast::FileLoc;
use crate::parser::token::{Token, TokenKind};

/// Lexical error.  Always fatal: the caller reports it once and stops.
#[derive(Debug, Clone, Error)]
#[error("{loc}: parse error: {message}")]
pub struct LexError {
    pub message: String,
    pub loc: FileLoc,
}

/// Streaming tokenizer over one source file.
pub struct Lexer<'src> {
    src: &'src str,
    file: Rc<str>,
    /// Last and current read offset; `ungetr` rewinds `r` to `r0`.
    r0: usize,
    r: usize,
    line0: u32,
    line: u32,
    col0: u32,
    col: u32,
    /// Whether a terminator must be inserted at the next line break.
    nlsemi: bool,
}

impl<'src> Lexer<'src> {
    pub fn new(file: Rc<str>, src: &'src str) -> Self {
        Self {
            src,
            file,
            r0: 0,
            r: 0,
            line0: 1,
            line: 1,
            col0: 1,
            col: 1,
            nlsemi: false,
        }
    }

    /// Read one byte, advancing the cursor and the line/column counters.
    ///
    /// Returns `None` at end of input.  Embedded NUL and any byte outside
    /// ASCII are fatal (Unicode source is an explicit non-goal).
    fn getr(&mut self) -> Result<Option<u8>, LexError> {
        self.r0 = self.r;
        self.line0 = self.line;
        self.col0 = self.col;

        if self.r >= self.src.len() {
            return Ok(None);
        }
        let b = self.src.as_bytes()[self.r];
        if b == 0 {
            return Err(self.error_here("invalid NUL character"));
        }
        if b >= 0x80 {
            return Err(self.error_here(format!("invalid non-ASCII byte 0x{b:02x}")));
        }
        self.r += 1;
        self.col += 1;
        if b == b'\n' {
            self.line += 1;
            self.col = 1;
        }
        Ok(Some(b))
    }

    /// Push the last read byte back; valid for exactly one step.
    fn ungetr(&mut self) {
        self.r = self.r0;
        self.line = self.line0;
        self.col = self.col0;
    }

    fn error_here(&self, message: impl Into<String>) -> LexError {
        self.error_at(self.line0, self.col0, message)
    }

    fn error_at(&self, line: u32, col: u32, message: impl Into<String>) -> LexError {
        LexError {
            message: message.into(),
            loc: FileLoc {
                file: self.file.clone(),
                line,
                col,
            },
        }
    }

    fn token(&self, kind: TokenKind, line: u32, col: u32, lit: &'src str) -> Token<'src> {
        Token {
            kind,
            line,
            col,
            lit,
        }
    }

    /// Token whose literal is the source span `start..self.r`.
    fn token_span(&self, kind: TokenKind, line: u32, col: u32, start: usize) -> Token<'src> {
        self.token(kind, line, col, &self.src[start..self.r])
    }

    /// Lex and return the next token.
    pub fn next_token(&mut self) -> Result<Token<'src>, LexError> {
        let nlsemi = self.nlsemi;
        self.nlsemi = false;

        loop {
            let mut c = self.getr()?;
            while matches!(c, Some(b' ' | b'\t' | b'\r'))
                || (c == Some(b'\n') && !nlsemi)
            {
                c = self.getr()?;
            }

            let line = self.line0;
            let col = self.col0;

            let c = match c {
                None => {
                    if nlsemi {
                        return Ok(self.token(TokenKind::Semi, line, col, "eof"));
                    }
                    return Ok(self.token(TokenKind::Eof, line, col, ""));
                }
                Some(c) => c,
            };

            let kind = match c {
                b'\n' => {
                    // A terminator keeps the pending flag armed so that end
                    // of input still closes the statement.
                    self.nlsemi = true;
                    return Ok(self.token(TokenKind::Semi, line, col, "newline"));
                }
                b'a'..=b'z' | b'A'..=b'Z' | b'_' => return self.lex_ident(line, col),
                b'0'..=b'9' => return self.lex_number(c, line, col),
                b'\'' => return self.lex_char(line, col),
                b'"' => return self.lex_string(line, col),

                b'(' => TokenKind::LParen,
                b'[' => TokenKind::LBrack,
                b'{' => TokenKind::LBrace,
                b')' => {
                    self.nlsemi = true;
                    TokenKind::RParen
                }
                b']' => {
                    self.nlsemi = true;
                    TokenKind::RBrack
                }
                b'}' => {
                    self.nlsemi = true;
                    TokenKind::RBrace
                }
                b';' => return Ok(self.token(TokenKind::Semi, line, col, "semicolon")),
                b':' => TokenKind::Colon,
                b'.' => TokenKind::Dot,
                b',' => TokenKind::Comma,

                b'/' => match self.getr()? {
                    Some(b'/') => {
                        self.skip_line_comment()?;
                        continue;
                    }
                    Some(b'*') => {
                        self.skip_block_comment(line, col)?;
                        if self.line > line && nlsemi {
                            // The comment swallowed a line break.
                            self.nlsemi = true;
                            return Ok(self.token(TokenKind::Semi, line, col, "newline"));
                        }
                        continue;
                    }
                    Some(b'=') => TokenKind::DivAssign,
                    _ => {
                        self.ungetr();
                        TokenKind::Div
                    }
                },

                b'+' => match self.getr()? {
                    Some(b'=') => TokenKind::AddAssign,
                    Some(b'+') => {
                        self.nlsemi = true;
                        TokenKind::Inc
                    }
                    _ => {
                        self.ungetr();
                        TokenKind::Add
                    }
                },
                b'-' => match self.getr()? {
                    Some(b'=') => TokenKind::SubAssign,
                    Some(b'>') => TokenKind::Arrow,
                    Some(b'-') => {
                        self.nlsemi = true;
                        TokenKind::Dec
                    }
                    _ => {
                        self.ungetr();
                        TokenKind::Sub
                    }
                },
                b'*' => match self.getr()? {
                    Some(b'=') => TokenKind::MulAssign,
                    _ => {
                        self.ungetr();
                        TokenKind::Mul
                    }
                },
                b'%' => match self.getr()? {
                    Some(b'=') => TokenKind::RemAssign,
                    _ => {
                        self.ungetr();
                        TokenKind::Rem
                    }
                },
                b'&' => match self.getr()? {
                    Some(b'=') => TokenKind::AndAssign,
                    Some(b'&') => TokenKind::LAnd,
                    _ => {
                        self.ungetr();
                        TokenKind::And
                    }
                },
                b'|' => match self.getr()? {
                    Some(b'=') => TokenKind::OrAssign,
                    Some(b'|') => TokenKind::LOr,
                    _ => {
                        self.ungetr();
                        TokenKind::Or
                    }
                },
                b'^' => match self.getr()? {
                    Some(b'=') => TokenKind::XorAssign,
                    _ => {
                        self.ungetr();
                        TokenKind::Xor
                    }
                },
                b'<' => match self.getr()? {
                    Some(b'=') => TokenKind::Lte,
                    Some(b'<') => match self.getr()? {
                        Some(b'=') => TokenKind::ShlAssign,
                        _ => {
                            self.ungetr();
                            TokenKind::Shl
                        }
                    },
                    _ => {
                        self.ungetr();
                        TokenKind::Lt
                    }
                },
                b'>' => match self.getr()? {
                    Some(b'=') => TokenKind::Gte,
                    Some(b'>') => match self.getr()? {
                        Some(b'=') => TokenKind::ShrAssign,
                        _ => {
                            self.ungetr();
                            TokenKind::Shr
                        }
                    },
                    _ => {
                        self.ungetr();
                        TokenKind::Gt
                    }
                },
                b'=' => match self.getr()? {
                    Some(b'=') => TokenKind::Eql,
                    _ => {
                        self.ungetr();
                        TokenKind::Assign
                    }
                },
                b'!' => match self.getr()? {
                    Some(b'=') => TokenKind::Neq,
                    _ => {
                        self.ungetr();
                        TokenKind::Not
                    }
                },

                _ => {
                    return Err(self.error_at(
                        line,
                        col,
                        format!("invalid character '{}'", c as char),
                    ));
                }
            };

            return Ok(self.token(kind, line, col, ""));
        }
    }

    /// Longest run of letters, digits and underscores, matched in full
    /// against the keyword table.
    fn lex_ident(&mut self, line: u32, col: u32) -> Result<Token<'src>, LexError> {
        let start = self.r0;
        let mut c = self.getr()?;
        while matches!(c, Some(b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'_')) {
            c = self.getr()?;
        }
        self.ungetr();

        let lit = &self.src[start..self.r];
        match TokenKind::keyword(lit) {
            Some(kw) => {
                // Only these keywords may end a statement.
                self.nlsemi = matches!(
                    kw,
                    TokenKind::Break | TokenKind::Continue | TokenKind::Return
                );
                Ok(self.token(kw, line, col, lit))
            }
            None => {
                self.nlsemi = true;
                Ok(self.token(TokenKind::Ident, line, col, lit))
            }
        }
    }

    /// Numeric literal.  A leading `0` selects hex (`0x`/`0X`) or octal;
    /// `.` or an exponent marker selects a float.
    fn lex_number(&mut self, first: u8, line: u32, col: u32) -> Result<Token<'src>, LexError> {
        let start = self.r0;
        let mut kind = TokenKind::Int;
        let mut c;

        if first == b'0' {
            c = self.getr()?;
            if matches!(c, Some(b'x' | b'X')) {
                c = self.getr()?;
                let mut has_digit = false;
                while matches!(c, Some(b) if b.is_ascii_hexdigit()) {
                    has_digit = true;
                    c = self.getr()?;
                }
                if !has_digit {
                    return Err(self.error_at(line, col, "malformed hex constant"));
                }
                self.ungetr();
                self.nlsemi = true;
                return Ok(self.token_span(TokenKind::Int, line, col, start));
            }
            let mut has_8_or_9 = false;
            while let Some(b @ b'0'..=b'9') = c {
                if b > b'7' {
                    has_8_or_9 = true;
                }
                c = self.getr()?;
            }
            if !matches!(c, Some(b'.' | b'e' | b'E')) {
                // Stays an integer, so it is octal.
                if has_8_or_9 {
                    return Err(self.error_at(line, col, "malformed octal constant"));
                }
                self.ungetr();
                self.nlsemi = true;
                return Ok(self.token_span(TokenKind::Int, line, col, start));
            }
        } else {
            c = self.getr()?;
            while matches!(c, Some(b'0'..=b'9')) {
                c = self.getr()?;
            }
        }

        if c == Some(b'.') {
            kind = TokenKind::Float;
            c = self.getr()?;
            while matches!(c, Some(b'0'..=b'9')) {
                c = self.getr()?;
            }
        }
        if matches!(c, Some(b'e' | b'E')) {
            kind = TokenKind::Float;
            c = self.getr()?;
            if matches!(c, Some(b'+' | b'-')) {
                c = self.getr()?;
            }
            let mut has_digit = false;
            while matches!(c, Some(b'0'..=b'9')) {
                has_digit = true;
                c = self.getr()?;
            }
            if !has_digit {
                return Err(self.error_at(line, col, "malformed exponent"));
            }
        }

        self.ungetr();
        self.nlsemi = true;
        Ok(self.token_span(kind, line, col, start))
    }

    /// Validate one escape sequence after a consumed `\`.
    ///
    /// `\a \b \f \n \r \t \v \\`, octal `\NNN` (<= 255), `\xHH`, `\uHHHH`
    /// and `\UHHHHHHHH` (codepoint <= 0x10FFFF, outside the surrogate
    /// range).  An unterminated literal is reported by the caller, so a
    /// premature end of input returns `Ok` here.
    fn lex_escape(&mut self) -> Result<(), LexError> {
        let mut c = self.getr()?;
        let (n, base, max): (u32, u32, u32) = match c {
            Some(b'a' | b'b' | b'f' | b'n' | b'r' | b't' | b'v' | b'\\') => return Ok(()),
            Some(b'0'..=b'7') => (3, 8, 255),
            Some(b'x') => {
                c = self.getr()?;
                (2, 16, 255)
            }
            Some(b'u') => {
                c = self.getr()?;
                (4, 16, 0x0010_FFFF)
            }
            Some(b'U') => {
                c = self.getr()?;
                (8, 16, 0x0010_FFFF)
            }
            None => return Ok(()),
            Some(_) => return Err(self.error_here("unknown escape sequence")),
        };

        let mut x: u32 = 0;
        for _ in 0..n {
            let d = match c {
                Some(b @ b'0'..=b'9') => u32::from(b - b'0'),
                Some(b @ b'a'..=b'f') => u32::from(b - b'a') + 10,
                Some(b @ b'A'..=b'F') => u32::from(b - b'A') + 10,
                _ => base,
            };
            if d >= base {
                if c.is_none() {
                    return Ok(());
                }
                return Err(self.error_here(format!(
                    "non-{} character in escape sequence",
                    if base == 8 { "octal" } else { "hex" }
                )));
            }
            x = x * base + d;
            c = self.getr()?;
        }
        self.ungetr();

        if base == 8 && x > max {
            return Err(self.error_here(format!("octal escape value > 255: {x}")));
        }
        if x > max || (0xD800..=0xDFFF).contains(&x) {
            return Err(self.error_here("escape sequence is invalid Unicode code point"));
        }
        Ok(())
    }

    /// Character literal; must contain exactly one decoded character.
    fn lex_char(&mut self, line: u32, col: u32) -> Result<Token<'src>, LexError> {
        let start = self.r0;
        let mut n = 0;
        loop {
            match self.getr()? {
                Some(b'\'') => break,
                Some(b'\\') => {
                    self.lex_escape()?;
                    n += 1;
                }
                Some(b'\n') => {
                    self.ungetr();
                    return Err(self.error_at(line, col, "newline in character literal"));
                }
                None => {
                    return Err(self.error_at(line, col, "character literal not terminated"));
                }
                Some(_) => n += 1,
            }
        }
        if n == 0 {
            return Err(self.error_at(line, col, "empty character literal"));
        }
        if n != 1 {
            return Err(self.error_at(line, col, "invalid character literal"));
        }
        self.nlsemi = true;
        Ok(self.token_span(TokenKind::Char, line, col, start))
    }

    /// String literal; the stored span keeps the surrounding quotes.
    fn lex_string(&mut self, line: u32, col: u32) -> Result<Token<'src>, LexError> {
        let start = self.r0;
        loop {
            match self.getr()? {
                Some(b'"') => break,
                Some(b'\\') => self.lex_escape()?,
                Some(b'\n') => {
                    self.ungetr();
                    return Err(self.error_at(line, col, "newline in string"));
                }
                None => return Err(self.error_at(line, col, "string not terminated")),
                Some(_) => {}
            }
        }
        self.nlsemi = true;
        Ok(self.token_span(TokenKind::Str, line, col, start))
    }

    /// `// ...` up to (not including) the line break.
    fn skip_line_comment(&mut self) -> Result<(), LexError> {
        loop {
            match self.getr()? {
                Some(b'\n') => {
                    self.ungetr();
                    return Ok(());
                }
                None => return Ok(()),
                Some(_) => {}
            }
        }
    }

    /// `/* ... */`, no nesting.
    fn skip_block_comment(&mut self, line: u32, col: u32) -> Result<(), LexError> {
        let mut c = self.getr()?;
        while let Some(b) = c {
            if b == b'*' {
                c = self.getr()?;
                if c == Some(b'/') {
                    return Ok(());
                }
                continue;
            }
            c = self.getr()?;
        }
        Err(self.error_at(line, col, "comment not terminated"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex_all(src: &str) -> Vec<Token<'_>> {
        let mut lexer = Lexer::new(Rc::from("test.sb"), src);
        let mut tokens = Vec::new();
        loop {
            let tok = lexer.next_token().expect("lex failed");
            let done = tok.kind == TokenKind::Eof;
            tokens.push(tok);
            if done {
                break;
            }
        }
        tokens
    }

    fn lex_kinds(src: &str) -> Vec<TokenKind> {
        lex_all(src).iter().map(|t| t.kind).collect()
    }

    fn lex_err(src: &str) -> LexError {
        let mut lexer = Lexer::new(Rc::from("test.sb"), src);
        loop {
            match lexer.next_token() {
                Ok(tok) if tok.kind == TokenKind::Eof => panic!("expected a lex error"),
                Ok(_) => {}
                Err(err) => return err,
            }
        }
    }

    #[test]
    fn test_simple_tokens() {
        let tokens = lex_all("fn main() { return 0 }");
        assert_eq!(tokens[0].kind, TokenKind::Fn);
        assert_eq!(tokens[1].kind, TokenKind::Ident);
        assert_eq!(tokens[1].lit, "main");
        assert_eq!(tokens[2].kind, TokenKind::LParen);
        assert_eq!(tokens[3].kind, TokenKind::RParen);
        assert_eq!(tokens[4].kind, TokenKind::LBrace);
        assert_eq!(tokens[5].kind, TokenKind::Return);
        assert_eq!(tokens[6].kind, TokenKind::Int);
        assert_eq!(tokens[6].lit, "0");
        assert_eq!(tokens[7].kind, TokenKind::RBrace);
    }

    #[test]
    fn test_operator_longest_match() {
        assert_eq!(
            lex_kinds("< <= << <<= > >= >> >>= - -> -= && & &="),
            vec![
                TokenKind::Lt,
                TokenKind::Lte,
                TokenKind::Shl,
                TokenKind::ShlAssign,
                TokenKind::Gt,
                TokenKind::Gte,
                TokenKind::Shr,
                TokenKind::ShrAssign,
                TokenKind::Sub,
                TokenKind::Arrow,
                TokenKind::SubAssign,
                TokenKind::LAnd,
                TokenKind::And,
                TokenKind::AndAssign,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_terminator_at_newline_and_eof() {
        let tokens = lex_all("a\n");
        assert_eq!(tokens[0].kind, TokenKind::Ident);
        assert_eq!(tokens[0].lit, "a");
        assert_eq!(tokens[1].kind, TokenKind::Semi);
        assert_eq!(tokens[1].lit, "newline");
        assert_eq!(tokens[2].kind, TokenKind::Semi);
        assert_eq!(tokens[2].lit, "eof");
        assert_eq!(tokens[3].kind, TokenKind::Eof);
        assert_eq!(tokens.len(), 4);
    }

    #[test]
    fn test_terminator_only_after_ending_tokens() {
        // `+` cannot end a statement, so the newline is plain whitespace.
        assert_eq!(
            lex_kinds("1 +\n2\n"),
            vec![
                TokenKind::Int,
                TokenKind::Add,
                TokenKind::Int,
                TokenKind::Semi,
                TokenKind::Semi,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_terminator_after_keywords() {
        assert_eq!(
            lex_kinds("break\ncontinue\nlet\n"),
            vec![
                TokenKind::Break,
                TokenKind::Semi,
                TokenKind::Continue,
                TokenKind::Semi,
                // `let` does not end a statement; its newline is skipped.
                TokenKind::Let,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_block_comment_spanning_newline_inserts_terminator() {
        let kinds = lex_kinds("a /* x\ny */ b");
        assert_eq!(
            kinds,
            vec![
                TokenKind::Ident,
                TokenKind::Semi,
                TokenKind::Ident,
                TokenKind::Semi,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_line_comment() {
        assert_eq!(
            lex_kinds("a // trailing ;;\nb"),
            vec![
                TokenKind::Ident,
                TokenKind::Semi,
                TokenKind::Ident,
                TokenKind::Semi,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_unterminated_block_comment() {
        let err = lex_err("a /* never closed");
        assert!(err.message.contains("comment not terminated"));
    }

    #[test]
    fn test_numbers() {
        let tokens = lex_all("0x1F 017 1.5 2e10 0.5e-3 42");
        assert_eq!(tokens[0].kind, TokenKind::Int);
        assert_eq!(tokens[0].lit, "0x1F");
        assert_eq!(tokens[1].kind, TokenKind::Int);
        assert_eq!(tokens[1].lit, "017");
        assert_eq!(tokens[2].kind, TokenKind::Float);
        assert_eq!(tokens[2].lit, "1.5");
        assert_eq!(tokens[3].kind, TokenKind::Float);
        assert_eq!(tokens[3].lit, "2e10");
        assert_eq!(tokens[4].kind, TokenKind::Float);
        assert_eq!(tokens[4].lit, "0.5e-3");
        assert_eq!(tokens[5].kind, TokenKind::Int);
        assert_eq!(tokens[5].lit, "42");
    }

    #[test]
    fn test_malformed_hex() {
        let err = lex_err("0x");
        assert!(err.message.contains("malformed hex constant"));
        assert_eq!(err.loc.line, 1);
        assert_eq!(err.loc.col, 1);
    }

    #[test]
    fn test_malformed_octal() {
        let err = lex_err("09");
        assert!(err.message.contains("malformed octal constant"));
        // An 8/9 digit is fine when the literal turns out to be a float.
        let tokens = lex_all("09.5");
        assert_eq!(tokens[0].kind, TokenKind::Float);
        assert_eq!(tokens[0].lit, "09.5");
    }

    #[test]
    fn test_string_and_char_literals() {
        let tokens = lex_all(r#""hi\n" 'a' '\x41' '\n'"#);
        assert_eq!(tokens[0].kind, TokenKind::Str);
        assert_eq!(tokens[0].lit, r#""hi\n""#);
        assert_eq!(tokens[1].kind, TokenKind::Char);
        assert_eq!(tokens[1].lit, "'a'");
        assert_eq!(tokens[2].kind, TokenKind::Char);
        assert_eq!(tokens[2].lit, r"'\x41'");
        assert_eq!(tokens[3].kind, TokenKind::Char);
    }

    #[test]
    fn test_char_literal_shape_errors() {
        assert!(lex_err("''").message.contains("empty character literal"));
        assert!(lex_err("'ab'").message.contains("invalid character literal"));
        assert!(lex_err("'a").message.contains("not terminated"));
        assert!(lex_err("'a\n'").message.contains("newline in character literal"));
    }

    #[test]
    fn test_string_errors() {
        assert!(lex_err("\"abc").message.contains("string not terminated"));
        assert!(lex_err("\"ab\ncd\"").message.contains("newline in string"));
    }

    #[test]
    fn test_surrogate_escape_rejected() {
        let err = lex_err(r"'\uD800'");
        assert!(err.message.contains("invalid Unicode code point"));
        // Just outside the range is fine.
        let tokens = lex_all(r"'\uE000'");
        assert_eq!(tokens[0].kind, TokenKind::Char);
    }

    #[test]
    fn test_escape_value_checks() {
        assert!(lex_err(r"'\777'").message.contains("octal escape value > 255"));
        assert!(lex_err(r"'\xZZ'").message.contains("non-hex character"));
        assert!(lex_err(r"'\q'").message.contains("unknown escape sequence"));
    }

    #[test]
    fn test_invalid_bytes() {
        assert!(lex_err("a\u{0}b").message.contains("NUL"));
        assert!(lex_err("caf\u{e9}").message.contains("non-ASCII"));
    }

    #[test]
    fn test_relex_literal_span_roundtrip() {
        // A token's stored span, re-lexed on its own, reproduces the same
        // kind and span.
        let tokens = lex_all("foo 0x1F 1.5 'a' \"s\"");
        for tok in tokens {
            if tok.lit.is_empty() || tok.kind == TokenKind::Semi {
                continue;
            }
            let again = lex_all(tok.lit);
            assert_eq!(again[0].kind, tok.kind);
            assert_eq!(again[0].lit, tok.lit);
        }
    }

    #[test]
    fn test_token_positions() {
        let tokens = lex_all("let x = 1\nx = 2");
        assert_eq!((tokens[0].line, tokens[0].col), (1, 1));
        assert_eq!((tokens[1].line, tokens[1].col), (1, 5));
        assert_eq!((tokens[2].line, tokens[2].col), (1, 7));
        assert_eq!((tokens[3].line, tokens[3].col), (1, 9));
        // Synthesized terminator sits at the line break.
        assert_eq!(tokens[4].kind, TokenKind::Semi);
        // First token of the second line.
        assert_eq!((tokens[5].line, tokens[5].col), (2, 1));
    }
}
