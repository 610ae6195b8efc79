// ABOUTME: Reader — lexer and recursive-descent parser turning source text into values

use crate::heap::Heap;
use crate::value::Ref;

#[derive(Debug, Clone, PartialEq)]
enum Token {
    LParen,
    RParen,
    Quote,
    Backtick,
    Comma,
    Number(i64),
    Str(String),
    Symbol(String),
    /// An unterminated string or other lexical problem; carried as a token
    /// so the parser can turn it into an `Error` value at the point it's
    /// consumed, rather than the lexer throwing.
    LexError(String),
    Eof,
}

/// A reader over one source string. Call `read_form` repeatedly to pull
/// each top-level expression in turn; it returns `None` once only
/// whitespace and comments remain.
pub struct Reader {
    chars: Vec<char>,
    pos: usize,
    lookahead: Option<Token>,
}

const DELIMITERS: &[char] = &['(', ')', '\'', '`', ','];

impl Reader {
    pub fn new(src: &str) -> Self {
        Reader {
            chars: src.chars().collect(),
            pos: 0,
            lookahead: None,
        }
    }

    pub fn read_form(&mut self, heap: &mut Heap) -> Option<Ref> {
        if matches!(self.peek_token(), Token::Eof) {
            return None;
        }
        Some(self.parse_expr(heap))
    }

    // -- lexer --

    fn peek_char(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.peek_char() {
                Some(c) if c == ' ' || c == '\t' || c == '\r' || c == '\n' => {
                    self.pos += 1;
                }
                Some(';') => {
                    while let Some(c) = self.peek_char() {
                        if c == '\n' {
                            break;
                        }
                        self.pos += 1;
                    }
                }
                _ => break,
            }
        }
    }

    fn lex_string(&mut self) -> Token {
        self.pos += 1; // opening quote
        let mut out = String::new();
        loop {
            match self.peek_char() {
                None | Some('\n') => {
                    return Token::LexError("syntax error: unterminated string".to_string());
                }
                Some('"') => {
                    self.pos += 1;
                    return Token::Str(out);
                }
                Some(c) => {
                    out.push(c);
                    self.pos += 1;
                }
            }
        }
    }

    fn lex_number(&mut self) -> Token {
        let start = self.pos;
        if self.peek_char() == Some('-') {
            self.pos += 1;
        }
        while matches!(self.peek_char(), Some(c) if c.is_ascii_digit()) {
            self.pos += 1;
        }
        let text: String = self.chars[start..self.pos].iter().collect();
        match text.parse::<i64>() {
            Ok(n) => Token::Number(n),
            Err(_) => Token::LexError(format!("syntax error: invalid number '{text}'")),
        }
    }

    fn lex_symbol(&mut self) -> Token {
        let start = self.pos;
        while let Some(c) = self.peek_char() {
            if c.is_whitespace() || c == '"' || DELIMITERS.contains(&c) {
                break;
            }
            self.pos += 1;
        }
        Token::Symbol(self.chars[start..self.pos].iter().collect())
    }

    fn next_token_raw(&mut self) -> Token {
        self.skip_whitespace_and_comments();
        let c = match self.peek_char() {
            None => return Token::Eof,
            Some(c) => c,
        };
        match c {
            '(' => {
                self.pos += 1;
                Token::LParen
            }
            ')' => {
                self.pos += 1;
                Token::RParen
            }
            '\'' => {
                self.pos += 1;
                Token::Quote
            }
            '`' => {
                self.pos += 1;
                Token::Backtick
            }
            ',' => {
                self.pos += 1;
                Token::Comma
            }
            '"' => self.lex_string(),
            '-' if matches!(self.chars.get(self.pos + 1), Some(d) if d.is_ascii_digit()) => {
                self.lex_number()
            }
            c if c.is_ascii_digit() => self.lex_number(),
            _ => self.lex_symbol(),
        }
    }

    fn peek_token(&mut self) -> &Token {
        if self.lookahead.is_none() {
            self.lookahead = Some(self.next_token_raw());
        }
        self.lookahead.as_ref().unwrap()
    }

    fn next_token(&mut self) -> Token {
        self.peek_token();
        self.lookahead.take().unwrap()
    }

    // -- parser --
    //
    // expr  := QUOTE expr | BACKTICK expr | COMMA expr | LPAREN list | atom
    // list  := RPAREN | expr* RPAREN
    // atom  := NUMBER | STRING | SYMBOL

    fn parse_expr(&mut self, heap: &mut Heap) -> Ref {
        match self.next_token() {
            Token::Quote => self.parse_wrapped(heap, "quote"),
            Token::Backtick => self.parse_wrapped(heap, "quasiquote"),
            Token::Comma => self.parse_wrapped(heap, "unquote"),
            Token::LParen => self.parse_list(heap),
            Token::RParen => heap.new_error("syntax error: unexpected ')'"),
            Token::Number(n) => heap.new_number(n),
            Token::Str(s) => heap.new_string(s.into_bytes()),
            Token::Symbol(s) => atom_from_symbol(heap, &s),
            Token::LexError(msg) => heap.new_error(msg),
            Token::Eof => heap.new_error("syntax error: unexpected end of input"),
        }
    }

    fn parse_wrapped(&mut self, heap: &mut Heap, head: &str) -> Ref {
        let inner = self.parse_expr(heap);
        let head_sym = heap.new_symbol(head);
        let nil = heap.new_nil();
        let tail = heap.new_cons(inner, nil);
        heap.new_cons(head_sym, tail)
    }

    fn parse_list(&mut self, heap: &mut Heap) -> Ref {
        match self.peek_token() {
            Token::RParen => {
                self.next_token();
                return heap.new_nil();
            }
            Token::Eof => {
                return heap.new_error("syntax error: missing ')'");
            }
            _ => {}
        }
        let head = self.parse_expr(heap);
        let tail = self.parse_list(heap);
        heap.new_cons(head, tail)
    }
}

fn atom_from_symbol(heap: &mut Heap, text: &str) -> Ref {
    if let Some(name) = text.strip_prefix(':') {
        heap.new_keyword(name)
    } else {
        heap.new_symbol(text)
    }
}

/// Convenience for reading the single expression embedded in `src`;
/// returns the first form (or a syntax error value) and ignores anything
/// after it.
pub fn read_one(heap: &mut Heap, src: &str) -> Option<Ref> {
    Reader::new(src).read_form(heap)
}
