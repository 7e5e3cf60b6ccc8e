use std::fmt;
use std::fmt::{Display, Formatter};

use option_ext::OptionExt;

use crate::ntlang::common::error;
use crate::ntlang::common::error::{ErrorInfo, NtError, NtResult};

pub fn tokenize(source: &str) -> NtResult<Vec<Token>> {
    error::convert_error(Lexer::new(source).get_lexems())
}

// Lexing fails on at most one place at a time (unterminated string/comment,
// stray character), so a plain Result carries everything we need.
type LexResult<A> = Result<A, LexError>;

#[derive(Debug, PartialEq, Clone)]
pub enum TokenType {
    // Single-character tokens.
    OpenParen,
    CloseParen,
    OpenBrace,
    CloseBrace,
    OpenBracket,
    CloseBracket,
    Comma,
    Colon,
    Semicolon,
    Star,
    Slash,
    // One or two character tokens.
    Plus,
    PlusPlus,
    PlusEqual,
    Minus,
    MinusMinus,
    MinusEqual,
    Equal,
    EqualEqual,
    BangEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,
    // Keywords.
    Var,
    Exibir,
    Leia,
    Se,
    Senao,
    Enquanto,
    Para,
    Faca,
    Pare,
    Continue,
    Calc,
    E,
    Ou,
    Nao,
    Verdadeiro,
    Falso,
    // Type names.
    Inteiro,
    Real,
    Natural,
    Texto,
    Logico,
    Lista,

    IntegerLiteral(i64),
    RealLiteral(f64),
    StringLiteral(String),
    Identifier(String),
}

impl TokenType {
    fn string_literal<S: Into<String>>(str: S) -> Self { TokenType::StringLiteral(str.into()) }
    pub fn identifier<S: Into<String>>(str: S) -> Self { TokenType::Identifier(str.into()) }

    pub fn is_keyword(&self) -> bool {
        use TokenType::*;
        match self {
            Var | Exibir | Leia | Se | Senao | Enquanto | Para | Faca | Pare | Continue | Calc
            | E | Ou | Nao | Verdadeiro | Falso
            | Inteiro | Real | Natural | Texto | Logico | Lista => true,
            _ => false,
        }
    }
}

impl Display for TokenType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_fmt(format_args!("{:?}", self))
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct Token {
    pub line: usize,
    pub column: usize,
    pub r#type: TokenType,
}

impl Token {
    pub fn new(line: usize, column: usize, r#type: TokenType) -> Self {
        Token { line, column, r#type }
    }
    pub fn get_type(&self) -> &TokenType { &self.r#type }

    pub fn error_info(&self) -> ErrorInfo {
        ErrorInfo { line: self.line, column: self.column }
    }
}

#[derive(Debug)]
pub struct LexError {
    line: usize,
    column: usize,
    message: String,
}

impl NtError for LexError {
    fn get_info(&self) -> ErrorInfo {
        ErrorInfo { line: self.line, column: self.column }
    }

    fn get_title(&self) -> String { "Erro Léxico".to_owned() }

    fn get_message(&self) -> String {
        self.message.to_owned()
    }
}

struct Lexer {
    chars: Vec<char>,
    current: usize,
    start: usize,
    line: usize,
    line_start: usize,
    // Where the token being scanned began; a token may span lines (strings,
    // block comments), so its reported position is frozen here.
    token_line: usize,
    token_column: usize,
    lexems: Vec<Token>,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Lexer {
            chars: source.chars().collect(),
            current: 0,
            start: 0,
            line: 1,
            line_start: 0,
            token_line: 1,
            token_column: 1,
            lexems: Vec::new(),
        }
    }

    pub fn get_lexems(mut self) -> LexResult<Vec<Token>> {
        while !self.is_at_end() {
            self.start = self.current;
            self.token_line = self.line;
            self.token_column = self.current - self.line_start + 1;
            self.scan_token()?;
        }
        Ok(self.lexems)
    }

    fn is_at_end(&self) -> bool { self.current >= self.chars.len() }

    fn add_token_type(&mut self, tt: TokenType) {
        let token = Token::new(self.token_line, self.token_column, tt);
        self.lexems.push(token);
    }

    fn matches(&mut self, expected: char) -> bool {
        let result = self.peek_char().contains(&expected);
        if result {
            self.current += 1;
        }
        result
    }

    fn scan_token(&mut self) -> LexResult<()> {
        let c = self.advance();
        match c {
            '(' => Ok(self.add_token_type(TokenType::OpenParen)),
            ')' => Ok(self.add_token_type(TokenType::CloseParen)),
            '{' => Ok(self.add_token_type(TokenType::OpenBrace)),
            '}' => Ok(self.add_token_type(TokenType::CloseBrace)),
            '[' => Ok(self.add_token_type(TokenType::OpenBracket)),
            ']' => Ok(self.add_token_type(TokenType::CloseBracket)),
            ':' => Ok(self.add_token_type(TokenType::Colon)),
            ';' => Ok(self.add_token_type(TokenType::Semicolon)),
            '*' => Ok(self.add_token_type(TokenType::Star)),

            ',' => Ok(self.add_token_type(TokenType::Comma)),

            '+' => {
                let tt = if self.matches('+') {
                    TokenType::PlusPlus
                } else if self.matches('=') {
                    TokenType::PlusEqual
                } else {
                    TokenType::Plus
                };
                Ok(self.add_token_type(tt))
            }
            '-' => {
                let tt = if self.matches('-') {
                    TokenType::MinusMinus
                } else if self.matches('=') {
                    TokenType::MinusEqual
                } else {
                    TokenType::Minus
                };
                Ok(self.add_token_type(tt))
            }
            '=' => {
                let m = self.matches('=');
                Ok(self.add_token_type(if m { TokenType::EqualEqual } else { TokenType::Equal }))
            }
            '<' => {
                let m = self.matches('=');
                Ok(self.add_token_type(if m { TokenType::LessEqual } else { TokenType::Less }))
            }
            '>' => {
                let m = self.matches('=');
                Ok(self.add_token_type(if m { TokenType::GreaterEqual } else { TokenType::Greater }))
            }
            '!' =>
                if self.matches('=') {
                    Ok(self.add_token_type(TokenType::BangEqual))
                } else {
                    self.error("Esperado '=' após '!'.")
                },

            '/' =>
                if self.matches('/') {
                    self.skip_line_comment();
                    Ok(())
                } else if self.matches('*') {
                    self.skip_multiline_comment()
                } else {
                    Ok(self.add_token_type(TokenType::Slash))
                },

            ' ' | '\r' | '\t' => Ok(()),
            '\n' => {
                self.new_line();
                Ok(())
            }
            '"' => self.read_string_literal().map(|e| self.add_token_type(e)),
            c =>
                if c.is_ascii_digit() {
                    let num = self.read_number_literal();
                    Ok(self.add_token_type(num))
                } else if c.is_alphabetic() {
                    let ident = self.read_identifier();
                    Ok(self.add_token_type(ident))
                } else {
                    self.error(format!("Caractere inesperado '{}'.", c).as_ref())
                },
        }
    }

    fn error<A>(&self, msg: &str) -> LexResult<A> {
        Err(LexError {
            line: self.token_line,
            column: self.token_column,
            message: msg.to_owned(),
        })
    }

    fn advance(&mut self) -> char {
        let result = self.chars.get(self.current).copied();
        self.current += 1;
        result.expect("Source is empty")
    }

    fn new_line(&mut self) {
        self.line += 1;
        self.line_start = self.current;
    }

    fn skip_line_comment(&mut self) {
        while self.peek_test(|e: char| e != '\n') {
            self.advance();
        }
    }

    fn skip_multiline_comment(&mut self) -> LexResult<()> {
        loop {
            if self.current + 1 >= self.chars.len() {
                return self.error("Comentário de bloco não terminado.");
            }
            if self.peek_char().contains(&'*') && self.peek_n_char(1).contains(&'/') {
                self.current += 2; // Skip past closing comment
                return Ok(());
            }
            if self.peek_char().contains(&'\n') {
                self.advance();
                self.new_line();
            } else {
                self.advance();
            }
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.peek_n_char(0)
    }
    fn peek_n_char(&self, n: usize) -> Option<char> {
        self.chars.get(self.current + n).copied()
    }
    fn peek_test<F: Fn(char) -> bool>(&self, f: F) -> bool {
        self.peek_char().map(|e| f(e)).unwrap_or(false)
    }
    fn peek_n_test<F: Fn(char) -> bool>(&self, n: usize, f: F) -> bool {
        self.peek_n_char(n).map(|e| f(e)).unwrap_or(false)
    }

    // NT sources write reals with the Portuguese comma separator; a dot is
    // accepted too. Either one only counts as a separator when a digit
    // follows, so `EXIBIR(3, 14)` still lexes as two integers.
    fn read_number_literal(&mut self) -> TokenType {
        while self.peek_test(|e: char| e.is_ascii_digit()) {
            self.advance();
        }
        let separator = self.peek_char().contains(&'.') || self.peek_char().contains(&',');
        if separator && self.peek_n_test(1, |e: char| e.is_ascii_digit()) {
            self.advance(); // separator
            while self.peek_test(|e: char| e.is_ascii_digit()) {
                self.advance();
            }
            let lexeme = self.current_lexeme().replace(',', ".");
            TokenType::RealLiteral(lexeme.parse::<f64>().expect("invalid real literal."))
        } else {
            TokenType::IntegerLiteral(
                self.current_lexeme().parse::<i64>().expect("invalid integer literal."))
        }
    }

    fn read_string_literal(&mut self) -> LexResult<TokenType> {
        while self.peek_test(|e: char| e != '"') {
            if self.peek_char().contains(&'\n') {
                self.advance();
                self.new_line();
            } else {
                self.advance();
            }
        }
        if self.is_at_end() {
            self.error("Texto não terminado.")
        } else {
            let result: String = self.chars[self.start + 1..self.current].iter().collect();
            self.advance(); // Move past closing "
            Ok(TokenType::string_literal(result))
        }
    }

    fn read_identifier(&mut self) -> TokenType {
        while self.peek_test(|e: char| e.is_alphanumeric() || e == '_') {
            self.advance();
        }
        let word = self.current_lexeme();
        Lexer::get_keyword(word.as_ref()).unwrap_or_else(|| TokenType::identifier(word))
    }

    fn current_lexeme(&self) -> String {
        self.chars[self.start..self.current].iter().collect()
    }

    fn get_keyword(word: &str) -> Option<TokenType> {
        match word.to_uppercase().as_str() {
            "VAR" => Some(TokenType::Var),
            "EXIBIR" => Some(TokenType::Exibir),
            "LEIA" => Some(TokenType::Leia),
            "SE" => Some(TokenType::Se),
            "SENAO" | "SENÃO" => Some(TokenType::Senao),
            "ENQUANTO" => Some(TokenType::Enquanto),
            "PARA" => Some(TokenType::Para),
            "FACA" | "FAÇA" => Some(TokenType::Faca),
            "PARE" => Some(TokenType::Pare),
            "CONTINUE" => Some(TokenType::Continue),
            "CALC" => Some(TokenType::Calc),
            "E" => Some(TokenType::E),
            "OU" => Some(TokenType::Ou),
            "NAO" | "NÃO" => Some(TokenType::Nao),
            "VERDADEIRO" => Some(TokenType::Verdadeiro),
            "FALSO" => Some(TokenType::Falso),
            "INTEIRO" => Some(TokenType::Inteiro),
            "REAL" => Some(TokenType::Real),
            "NATURAL" => Some(TokenType::Natural),
            "TEXTO" => Some(TokenType::Texto),
            "LOGICO" | "LÓGICO" => Some(TokenType::Logico),
            "LISTA" => Some(TokenType::Lista),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::ntlang::common::tests::unsafe_tokenize;

    use super::*;

    #[test]
    fn basic_declaration() {
        assert_eq!(
            unsafe_tokenize(vec!["VAR contador = 0 : INTEIRO;"]),
            vec!(
                Token::new(1, 1, TokenType::Var),
                Token::new(1, 5, TokenType::identifier("contador")),
                Token::new(1, 14, TokenType::Equal),
                Token::new(1, 16, TokenType::IntegerLiteral(0)),
                Token::new(1, 18, TokenType::Colon),
                Token::new(1, 20, TokenType::Inteiro),
                Token::new(1, 27, TokenType::Semicolon),
            ),
        )
    }

    #[test]
    fn real_literal_with_comma() {
        assert_eq!(
            unsafe_tokenize(vec!["EXIBIR(3,14);"]),
            vec!(
                Token::new(1, 1, TokenType::Exibir),
                Token::new(1, 7, TokenType::OpenParen),
                Token::new(1, 8, TokenType::RealLiteral(3.14)),
                Token::new(1, 12, TokenType::CloseParen),
                Token::new(1, 13, TokenType::Semicolon),
            ),
        )
    }

    #[test]
    fn comma_with_space_is_argument_separator() {
        assert_eq!(
            unsafe_tokenize(vec!["EXIBIR(3, 14);"]),
            vec!(
                Token::new(1, 1, TokenType::Exibir),
                Token::new(1, 7, TokenType::OpenParen),
                Token::new(1, 8, TokenType::IntegerLiteral(3)),
                Token::new(1, 9, TokenType::Comma),
                Token::new(1, 11, TokenType::IntegerLiteral(14)),
                Token::new(1, 13, TokenType::CloseParen),
                Token::new(1, 14, TokenType::Semicolon),
            ),
        )
    }

    #[test]
    fn update_operators() {
        assert_eq!(
            unsafe_tokenize(vec!["i++; i--; i += 2; i -= 2;"]),
            vec!(
                Token::new(1, 1, TokenType::identifier("i")),
                Token::new(1, 2, TokenType::PlusPlus),
                Token::new(1, 4, TokenType::Semicolon),
                Token::new(1, 6, TokenType::identifier("i")),
                Token::new(1, 7, TokenType::MinusMinus),
                Token::new(1, 9, TokenType::Semicolon),
                Token::new(1, 11, TokenType::identifier("i")),
                Token::new(1, 13, TokenType::PlusEqual),
                Token::new(1, 16, TokenType::IntegerLiteral(2)),
                Token::new(1, 17, TokenType::Semicolon),
                Token::new(1, 19, TokenType::identifier("i")),
                Token::new(1, 21, TokenType::MinusEqual),
                Token::new(1, 24, TokenType::IntegerLiteral(2)),
                Token::new(1, 25, TokenType::Semicolon),
            ),
        )
    }

    #[test]
    fn keywords_are_case_insensitive() {
        assert_eq!(
            unsafe_tokenize(vec!["se (verdadeiro) { pare; }"]),
            vec!(
                Token::new(1, 1, TokenType::Se),
                Token::new(1, 4, TokenType::OpenParen),
                Token::new(1, 5, TokenType::Verdadeiro),
                Token::new(1, 15, TokenType::CloseParen),
                Token::new(1, 17, TokenType::OpenBrace),
                Token::new(1, 19, TokenType::Pare),
                Token::new(1, 23, TokenType::Semicolon),
                Token::new(1, 25, TokenType::CloseBrace),
            ),
        )
    }

    #[test]
    fn accented_keywords() {
        assert_eq!(
            unsafe_tokenize(vec!["FAÇA SENÃO NÃO"]),
            vec!(
                Token::new(1, 1, TokenType::Faca),
                Token::new(1, 6, TokenType::Senao),
                Token::new(1, 12, TokenType::Nao),
            ),
        )
    }

    #[test]
    fn comments_and_lines() {
        assert_eq!(
            unsafe_tokenize(vec!["42 / 2; // comentário", "VAR x /* bloco */ = 1 : INTEIRO;"]),
            vec!(
                Token::new(1, 1, TokenType::IntegerLiteral(42)),
                Token::new(1, 4, TokenType::Slash),
                Token::new(1, 6, TokenType::IntegerLiteral(2)),
                Token::new(1, 7, TokenType::Semicolon),
                Token::new(2, 1, TokenType::Var),
                Token::new(2, 5, TokenType::identifier("x")),
                Token::new(2, 19, TokenType::Equal),
                Token::new(2, 21, TokenType::IntegerLiteral(1)),
                Token::new(2, 23, TokenType::Colon),
                Token::new(2, 25, TokenType::Inteiro),
                Token::new(2, 32, TokenType::Semicolon),
            ),
        )
    }

    #[test]
    fn lone_bang_is_an_error() {
        assert!(tokenize("VAR x = !verdade : LOGICO;").is_err())
    }

    #[test]
    fn web_tag_tokens() {
        assert_eq!(
            unsafe_tokenize(vec!["bloco(fundo: azul) { }"]),
            vec!(
                Token::new(1, 1, TokenType::identifier("bloco")),
                Token::new(1, 6, TokenType::OpenParen),
                Token::new(1, 7, TokenType::identifier("fundo")),
                Token::new(1, 12, TokenType::Colon),
                Token::new(1, 14, TokenType::identifier("azul")),
                Token::new(1, 18, TokenType::CloseParen),
                Token::new(1, 20, TokenType::OpenBrace),
                Token::new(1, 22, TokenType::CloseBrace),
            ),
        )
    }
}
