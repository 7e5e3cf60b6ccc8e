use either::Either;

use crate::ntlang::common::error;
use crate::ntlang::common::error::{ErrorInfo, NtError, NtResult};
use crate::ntlang::common::lexer::{Token, TokenType};
use crate::ntlang::interpreted::annotated_ast::{
    AnnotatedAssignTarget, AnnotatedExpression, AnnotatedObjectLiteral, AnnotatedProgram,
    AnnotatedStatement, AnnotatedWebTag,
};
use crate::ntlang::interpreted::ast::{
    Atom, BinaryOperator, DeclaredType, LogicalOperator, UnaryOperator, UpdateOperator,
};

pub fn parse(tokens: &Vec<Token>) -> NtResult<AnnotatedProgram> {
    error::convert_error(Parser::parse(tokens))
}

// Parsing is fail-fast: the first syntax error aborts, there is no
// synchronization or recovery.
type ParserResult<A> = Result<A, ParserError>;

#[derive(Debug, PartialEq, Clone)]
pub struct ParserError {
    error_type: String,
    message: String,
    error_info: ErrorInfo,
}

impl ParserError {
    pub fn new<S1: Into<String>, S2: Into<String>>(
        error_type: S1, message: S2, error_info: ErrorInfo,
    ) -> Self {
        ParserError { error_type: error_type.into(), message: message.into(), error_info }
    }
}

impl NtError for ParserError {
    fn get_info(&self) -> ErrorInfo { self.error_info }
    fn get_title(&self) -> String { self.error_type.to_owned() }
    fn get_message(&self) -> String { self.message.to_owned() }
}

fn friendly_token_name(t: &TokenType) -> String {
    match t {
        TokenType::Colon => "dois pontos (:)".to_owned(),
        TokenType::Semicolon => "ponto e vírgula (;)".to_owned(),
        TokenType::Comma => "vírgula (,)".to_owned(),
        TokenType::Equal => "igual (=)".to_owned(),
        TokenType::OpenParen => "parêntese esquerdo '('".to_owned(),
        TokenType::CloseParen => "parêntese direito ')'".to_owned(),
        TokenType::OpenBrace => "chave esquerda '{'".to_owned(),
        TokenType::CloseBrace => "chave direita '}'".to_owned(),
        TokenType::OpenBracket => "colchete esquerdo '['".to_owned(),
        TokenType::CloseBracket => "colchete direito ']'".to_owned(),
        TokenType::Identifier(name) => format!("identificador '{}'", name),
        TokenType::StringLiteral(_) => "texto literal".to_owned(),
        e => e.to_string(),
    }
}

#[derive(Debug)]
struct Parser<'a> {
    tokens: &'a Vec<Token>,
    current: usize,
}

impl<'a> Parser<'a> {
    pub fn parse(tokens: &'a Vec<Token>) -> ParserResult<AnnotatedProgram> {
        let mut parser = Parser { tokens, current: 0 };
        parser.program()
    }

    fn program(&mut self) -> ParserResult<AnnotatedProgram> {
        let mut statements = Vec::new();
        while !self.is_at_end() {
            statements.push(self.statement()?);
        }
        Ok(AnnotatedProgram { statements })
    }

    fn statement(&mut self) -> ParserResult<AnnotatedStatement> {
        match self.peek().get_type() {
            TokenType::Var => self.var_declaration(),
            TokenType::Exibir => self.print_statement(),
            TokenType::Leia => self.input_statement(),
            TokenType::Se => self.if_statement(),
            TokenType::Enquanto => self.while_statement(),
            TokenType::Para => self.for_statement(),
            TokenType::Faca => self.do_while_statement(),
            TokenType::Pare => {
                let info = self.advance().error_info();
                self.consume(TokenType::Semicolon, None)?;
                Ok(AnnotatedStatement::Break(info))
            }
            TokenType::Continue => {
                let info = self.advance().error_info();
                self.consume(TokenType::Semicolon, None)?;
                Ok(AnnotatedStatement::Continue(info))
            }
            TokenType::Calc => {
                let expr = self.calc_expression()?;
                self.consume(TokenType::Semicolon, None)?;
                Ok(AnnotatedStatement::Expression(expr))
            }
            TokenType::Identifier(_) => self.identifier_statement(),
            t => {
                let message = format!(
                    "Token {} não pode iniciar um comando. Comandos válidos: VAR, EXIBIR, LEIA, SE, ENQUANTO, PARA, FACA, PARE, CONTINUE, CALC",
                    friendly_token_name(t),
                );
                Err(ParserError::new("Comando Inválido", message, self.peek().error_info()))
            }
        }
    }

    // Statements led by an identifier: assignment, indexed assignment, the
    // update operators, or a top-level web tag.
    fn identifier_statement(&mut self) -> ParserResult<AnnotatedStatement> {
        let token = self.advance().clone();
        let info = token.error_info();
        let name = match token.get_type() {
            TokenType::Identifier(name) => name.clone(),
            _ => unreachable!("identifier_statement called on non-identifier"),
        };
        match self.peek_type() {
            Some(TokenType::OpenParen) => {
                let tag = self.web_tag(name, info)?;
                self.consume(TokenType::Semicolon, None)?;
                Ok(AnnotatedStatement::Expression(tag))
            }
            Some(TokenType::OpenBracket) => {
                self.advance();
                let index = self.logical_expr()?;
                self.consume(TokenType::CloseBracket, None)?;
                self.consume(TokenType::Equal, None)?;
                let value = self.logical_expr()?;
                self.consume(TokenType::Semicolon, None)?;
                Ok(AnnotatedStatement::Assign {
                    target: AnnotatedAssignTarget::Index { name, index },
                    value,
                    error_info: info,
                })
            }
            Some(TokenType::Equal) => {
                self.advance();
                let value = self.logical_expr()?;
                self.consume(TokenType::Semicolon, None)?;
                Ok(AnnotatedStatement::Assign {
                    target: AnnotatedAssignTarget::Name(name),
                    value,
                    error_info: info,
                })
            }
            Some(TokenType::PlusPlus) | Some(TokenType::MinusMinus)
            | Some(TokenType::PlusEqual) | Some(TokenType::MinusEqual) => {
                let update = self.update_tail(name, info)?;
                self.consume(TokenType::Semicolon, None)?;
                Ok(update)
            }
            _ => Err(ParserError::new(
                "Comando Inválido",
                format!("Esperado '=', '[', '++', '--', '+=' ou '-=' após '{}'", name),
                info,
            )),
        }
    }

    // The operator tail of `i++` / `i--` / `i += e` / `i -= e`, without the
    // terminating semicolon so PARA update clauses can reuse it.
    fn update_tail(&mut self, name: String, info: ErrorInfo) -> ParserResult<AnnotatedStatement> {
        let (op, has_amount) = match self.peek_type() {
            Some(TokenType::PlusPlus) => (UpdateOperator::Increment, false),
            Some(TokenType::MinusMinus) => (UpdateOperator::Decrement, false),
            Some(TokenType::PlusEqual) => (UpdateOperator::AddAssign, true),
            Some(TokenType::MinusEqual) => (UpdateOperator::SubAssign, true),
            _ => return Err(ParserError::new(
                "Erro Sintático",
                format!("Esperado '++', '--', '+=' ou '-=' após '{}'", name),
                info,
            )),
        };
        self.advance();
        let amount = if has_amount { Some(self.expression()?) } else { None };
        Ok(AnnotatedStatement::Update { name, op, amount, error_info: info })
    }

    fn var_declaration(&mut self) -> ParserResult<AnnotatedStatement> {
        let info = self.consume(TokenType::Var, None)?;
        let token = self.peek_or_eof("Identificador esperado após VAR")?.clone();
        let name = match token.get_type() {
            TokenType::Identifier(name) => {
                self.advance();
                name.clone()
            }
            t if t.is_keyword() => {
                return Err(ParserError::new(
                    "Declaração incompleta",
                    "Palavra reservada não pode ser usada como identificador",
                    token.error_info(),
                ));
            }
            _ => {
                return Err(ParserError::new(
                    "Declaração incompleta",
                    "Identificador esperado após VAR",
                    token.error_info(),
                ));
            }
        };

        let init = match self.peek_type() {
            Some(TokenType::Equal) => {
                self.advance();
                Some(self.logical_expr()?)
            }
            Some(TokenType::Colon) => None,
            _ => {
                return Err(ParserError::new(
                    "Declaração incompleta",
                    format!("Esperado '=' ou ':' após identificador '{}'", name),
                    info,
                ));
            }
        };
        self.consume(TokenType::Colon, None)?;

        let type_token = self.peek_or_eof("Tipo esperado após ':'")?.clone();
        let tipo = match type_token.get_type() {
            TokenType::Inteiro => DeclaredType::Inteiro,
            TokenType::Real => DeclaredType::Real,
            TokenType::Natural => DeclaredType::Natural,
            TokenType::Texto => DeclaredType::Texto,
            TokenType::Logico => DeclaredType::Logico,
            TokenType::Lista => DeclaredType::Lista,
            t => {
                return Err(ParserError::new(
                    "Tipo de Variável Não Declarado",
                    format!(
                        "Tipo da variável '{}' não foi declarado ou tipo {} é inválido. Esperado um dos tipos: INTEIRO, REAL, NATURAL, TEXTO, LOGICO, LISTA",
                        name,
                        friendly_token_name(t),
                    ),
                    type_token.error_info(),
                ));
            }
        };
        self.advance();

        // The only declaration/initializer mismatches rejected at parse time
        // are the ones visible without evaluating anything; everything else
        // is the evaluator's job.
        if let Some(value) = &init {
            if tipo == DeclaredType::Logico {
                match value {
                    AnnotatedExpression::Atomic(Atom::True, _)
                    | AnnotatedExpression::Atomic(Atom::False, _) => {}
                    other => {
                        return Err(ParserError::new(
                            "Erro de Tipo (LOGICO)",
                            "Variável do tipo LOGICO deve receber VERDADEIRO ou FALSO",
                            other.error_info(),
                        ));
                    }
                }
            }
            if tipo == DeclaredType::Natural {
                if let AnnotatedExpression::Unary(UnaryOperator::Minus, _, unary_info) = value {
                    return Err(ParserError::new(
                        "Erro de Tipo (NATURAL)",
                        "Variável do tipo NATURAL não pode receber número negativo",
                        *unary_info,
                    ));
                }
            }
        }

        self.consume(TokenType::Semicolon, None)?;
        Ok(AnnotatedStatement::Variable { name, tipo, init, error_info: info })
    }

    fn print_statement(&mut self) -> ParserResult<AnnotatedStatement> {
        let info = self.consume(TokenType::Exibir, None)?;
        if !self.next_is(&TokenType::OpenParen) {
            return Err(ParserError::new(
                "EXIBIR sem parênteses",
                "Esperado '(' após EXIBIR",
                info,
            ));
        }
        self.advance();
        if self.next_is(&TokenType::CloseParen) {
            return Err(ParserError::new(
                "Expressão vazia",
                "Expressão vazia não é permitida",
                self.peek().error_info(),
            ));
        }
        let mut args = vec![self.logical_expr()?];
        while self.matches_single(TokenType::Comma).is_some() {
            args.push(self.logical_expr()?);
        }
        self.consume(TokenType::CloseParen, None)?;
        self.consume(TokenType::Semicolon, None)?;
        Ok(AnnotatedStatement::Print(args, info))
    }

    fn input_statement(&mut self) -> ParserResult<AnnotatedStatement> {
        let info = self.consume(TokenType::Leia, None)?;
        self.consume(TokenType::OpenParen, None)?;
        let token = self.peek_or_eof("Identificador esperado em LEIA")?.clone();
        let name = match token.get_type() {
            TokenType::Identifier(name) => {
                self.advance();
                name.clone()
            }
            t if t.is_keyword() => {
                return Err(ParserError::new(
                    "Declaração incompleta",
                    "Palavra reservada não pode ser usada como identificador",
                    token.error_info(),
                ));
            }
            _ => {
                return Err(ParserError::new(
                    "Erro Sintático",
                    "Identificador esperado em LEIA",
                    token.error_info(),
                ));
            }
        };
        self.consume(TokenType::CloseParen, None)?;
        self.consume(TokenType::Semicolon, None)?;
        Ok(AnnotatedStatement::Read(name, info))
    }

    fn if_statement(&mut self) -> ParserResult<AnnotatedStatement> {
        let info = self.consume(TokenType::Se, None)?;
        self.consume(TokenType::OpenParen, None)?;
        let cond = self.logical_expr()?;
        self.consume(TokenType::CloseParen, None)?;
        self.consume(TokenType::OpenBrace, None)?;
        let if_block = self.block()?;
        self.consume(TokenType::CloseBrace, None)?;

        let else_branch = match self.matches_single(TokenType::Senao) {
            None => None,
            Some(_) =>
                if self.next_is(&TokenType::Se) {
                    Some(Either::Left(Box::new(self.if_statement()?)))
                } else {
                    self.consume(TokenType::OpenBrace, None)?;
                    let block = self.block()?;
                    self.consume(TokenType::CloseBrace, None)?;
                    Some(Either::Right(block))
                },
        };
        Ok(AnnotatedStatement::IfElse { cond, if_block, else_branch, error_info: info })
    }

    fn while_statement(&mut self) -> ParserResult<AnnotatedStatement> {
        let info = self.consume(TokenType::Enquanto, None)?;
        self.consume(TokenType::OpenParen, None)?;
        let cond = self.logical_expr()?;
        self.consume(TokenType::CloseParen, None)?;
        self.consume(TokenType::OpenBrace, None)?;
        let body = self.block()?;
        self.consume(TokenType::CloseBrace, None)?;
        Ok(AnnotatedStatement::While { cond, body, error_info: info })
    }

    fn for_statement(&mut self) -> ParserResult<AnnotatedStatement> {
        let info = self.consume(TokenType::Para, None)?;
        self.consume(TokenType::OpenParen, None)?;
        let init = match self.peek_type() {
            Some(TokenType::Var) => self.var_declaration()?,
            _ => {
                let token = self.peek_or_eof("Inicialização esperada em PARA")?.clone();
                let init_info = token.error_info();
                let name = match token.get_type() {
                    TokenType::Identifier(name) => {
                        self.advance();
                        name.clone()
                    }
                    _ => {
                        return Err(ParserError::new(
                            "Erro Sintático",
                            "Esperado declaração ou atribuição na inicialização de PARA",
                            init_info,
                        ));
                    }
                };
                self.consume(TokenType::Equal, None)?;
                let value = self.logical_expr()?;
                self.consume(TokenType::Semicolon, None)?;
                AnnotatedStatement::Assign {
                    target: AnnotatedAssignTarget::Name(name),
                    value,
                    error_info: init_info,
                }
            }
        };
        let cond = self.logical_expr()?;
        self.consume(TokenType::Semicolon, None)?;
        let update = self.for_update()?;
        self.consume(TokenType::CloseParen, None)?;
        self.consume(TokenType::OpenBrace, None)?;
        let body = self.block()?;
        self.consume(TokenType::CloseBrace, None)?;
        Ok(AnnotatedStatement::For {
            init: Box::new(init),
            cond,
            update: Box::new(update),
            body,
            error_info: info,
        })
    }

    // The update clause of PARA: `i++`, `i -= 2` or `i = i + 1`, with no
    // terminating semicolon.
    fn for_update(&mut self) -> ParserResult<AnnotatedStatement> {
        let token = self.peek_or_eof("Atualização esperada em PARA")?.clone();
        let info = token.error_info();
        let name = match token.get_type() {
            TokenType::Identifier(name) => {
                self.advance();
                name.clone()
            }
            _ => {
                return Err(ParserError::new(
                    "Erro Sintático",
                    "Esperado atualização de variável em PARA",
                    info,
                ));
            }
        };
        if self.next_is(&TokenType::Equal) {
            self.advance();
            let value = self.logical_expr()?;
            return Ok(AnnotatedStatement::Assign {
                target: AnnotatedAssignTarget::Name(name),
                value,
                error_info: info,
            });
        }
        self.update_tail(name, info)
    }

    fn do_while_statement(&mut self) -> ParserResult<AnnotatedStatement> {
        let info = self.consume(TokenType::Faca, None)?;
        self.consume(TokenType::OpenBrace, None)?;
        let body = self.block()?;
        self.consume(TokenType::CloseBrace, None)?;
        self.consume(TokenType::Enquanto, None)?;
        self.consume(TokenType::OpenParen, None)?;
        let cond = self.logical_expr()?;
        self.consume(TokenType::CloseParen, None)?;
        self.consume(TokenType::Semicolon, None)?;
        Ok(AnnotatedStatement::DoWhile { body, cond, error_info: info })
    }

    fn block(&mut self) -> ParserResult<Vec<AnnotatedStatement>> {
        let mut statements = Vec::new();
        while !self.is_at_end() && self.peek().get_type() != &TokenType::CloseBrace {
            statements.push(self.statement()?);
        }
        Ok(statements)
    }

    // The operation name is parsed as a plain identifier on purpose: whether
    // it names a real operation is decided at evaluation time.
    fn calc_expression(&mut self) -> ParserResult<AnnotatedExpression> {
        let info = self.consume(TokenType::Calc, None)?;
        self.consume(TokenType::OpenParen, None)?;
        let token = self.peek_or_eof("Esperado nome de operação após 'CALC('")?.clone();
        let op = match token.get_type() {
            TokenType::Identifier(name) => {
                self.advance();
                name.clone()
            }
            _ => {
                return Err(ParserError::new(
                    "Erro Sintático",
                    "Esperado nome de operação após 'CALC('",
                    token.error_info(),
                ));
            }
        };
        let mut args = Vec::new();
        while self.matches_single(TokenType::Comma).is_some() {
            args.push(self.expression()?);
        }
        self.consume(TokenType::CloseParen, None)?;
        Ok(AnnotatedExpression::Calc { op, args, error_info: info })
    }

    fn logical_expr(&mut self) -> ParserResult<AnnotatedExpression> {
        let mut expr = self.comparison()?;
        loop {
            match self.matches(|e| match e {
                TokenType::E => Some(LogicalOperator::E),
                TokenType::Ou => Some(LogicalOperator::Ou),
                _ => None,
            }) {
                Some((operator, info)) => {
                    let right = self.comparison()?;
                    expr = AnnotatedExpression::Logical(
                        operator,
                        Box::new(expr),
                        Box::new(right),
                        info,
                    );
                }
                None => break,
            }
        }
        Ok(expr)
    }

    // A single optional comparison; chaining like `a < b < c` is not in the
    // grammar.
    fn comparison(&mut self) -> ParserResult<AnnotatedExpression> {
        let expr = self.expression()?;
        match self.matches(|e| match e {
            TokenType::EqualEqual => Some(LogicalOperator::EqualEqual),
            TokenType::BangEqual => Some(LogicalOperator::BangEqual),
            TokenType::Greater => Some(LogicalOperator::Greater),
            TokenType::GreaterEqual => Some(LogicalOperator::GreaterEqual),
            TokenType::Less => Some(LogicalOperator::Less),
            TokenType::LessEqual => Some(LogicalOperator::LessEqual),
            _ => None,
        }) {
            Some((operator, info)) => {
                let right = self.expression()?;
                Ok(AnnotatedExpression::Logical(
                    operator,
                    Box::new(expr),
                    Box::new(right),
                    info,
                ))
            }
            None => Ok(expr),
        }
    }

    fn expression(&mut self) -> ParserResult<AnnotatedExpression> {
        self.binary(
            |e| match e {
                TokenType::Plus => Some(BinaryOperator::Plus),
                TokenType::Minus => Some(BinaryOperator::Minus),
                _ => None,
            },
            |e| e.term(),
        )
    }

    fn term(&mut self) -> ParserResult<AnnotatedExpression> {
        self.binary(
            |e| match e {
                TokenType::Star => Some(BinaryOperator::Mult),
                TokenType::Slash => Some(BinaryOperator::Div),
                _ => None,
            },
            |e| e.factor(),
        )
    }

    fn factor(&mut self) -> ParserResult<AnnotatedExpression> {
        if self.is_at_end() {
            return Err(ParserError::new(
                "Operador sem operando",
                "Operador sem operando à direita",
                self.eof_info(),
            ));
        }
        let token = self.peek().clone();
        let info = token.error_info();
        match token.get_type() {
            TokenType::Minus => {
                self.advance();
                let right = self.factor()?;
                Ok(AnnotatedExpression::Unary(UnaryOperator::Minus, Box::new(right), info))
            }
            TokenType::Nao => {
                self.advance();
                let right = self.factor()?;
                Ok(AnnotatedExpression::Unary(UnaryOperator::Nao, Box::new(right), info))
            }
            TokenType::IntegerLiteral(n) => {
                self.advance();
                Ok(AnnotatedExpression::Atomic(Atom::Integer(*n), info))
            }
            TokenType::RealLiteral(r) => {
                self.advance();
                Ok(AnnotatedExpression::Atomic(Atom::Real(*r), info))
            }
            TokenType::StringLiteral(s) => {
                self.advance();
                Ok(AnnotatedExpression::Atomic(Atom::text(s.clone()), info))
            }
            TokenType::Verdadeiro => {
                self.advance();
                Ok(AnnotatedExpression::Atomic(Atom::True, info))
            }
            TokenType::Falso => {
                self.advance();
                Ok(AnnotatedExpression::Atomic(Atom::False, info))
            }
            TokenType::OpenParen => {
                self.advance();
                let expr = self.logical_expr()?;
                self.consume(TokenType::CloseParen, None)?;
                Ok(expr)
            }
            TokenType::OpenBracket => self.list_literal(info),
            TokenType::Calc => self.calc_expression(),
            TokenType::Identifier(name) => {
                let name = name.clone();
                self.advance();
                if self.next_is(&TokenType::OpenParen) {
                    return self.web_tag(name, info);
                }
                let mut expr = AnnotatedExpression::Atomic(Atom::Identifier(name), info);
                while let Some(index_info) = self.matches_single(TokenType::OpenBracket) {
                    let index = self.logical_expr()?;
                    self.consume(TokenType::CloseBracket, None)?;
                    expr = AnnotatedExpression::Index(
                        Box::new(expr),
                        Box::new(index),
                        index_info,
                    );
                }
                Ok(expr)
            }
            t => Err(ParserError::new(
                "Fator Inválido",
                format!("Token inesperado: {}", friendly_token_name(t)),
                info,
            )),
        }
    }

    fn list_literal(&mut self, info: ErrorInfo) -> ParserResult<AnnotatedExpression> {
        self.consume(TokenType::OpenBracket, None)?;
        let mut elements = Vec::new();
        if !self.next_is(&TokenType::CloseBracket) {
            elements.push(self.logical_expr()?);
            while self.matches_single(TokenType::Comma).is_some() {
                elements.push(self.logical_expr()?);
            }
        }
        self.consume(TokenType::CloseBracket, None)?;
        Ok(AnnotatedExpression::List(elements, info))
    }

    fn web_tag(&mut self, name: String, info: ErrorInfo) -> ParserResult<AnnotatedExpression> {
        let props_info = self.consume(TokenType::OpenParen, None)?;
        let mut entries = Vec::new();
        if !self.next_is(&TokenType::CloseParen) {
            loop {
                let token = self.peek_or_eof("Esperado nome de propriedade")?.clone();
                let key = match token.get_type() {
                    TokenType::Identifier(key) => {
                        self.advance();
                        key.clone()
                    }
                    _ => {
                        return Err(ParserError::new(
                            "Erro Sintático",
                            "Esperado nome de propriedade",
                            token.error_info(),
                        ));
                    }
                };
                self.consume(TokenType::Colon, None)?;
                let value = self.logical_expr()?;
                entries.push((key, value));
                if self.matches_single(TokenType::Comma).is_none() {
                    break;
                }
            }
        }
        self.consume(TokenType::CloseParen, None)?;
        self.consume(TokenType::OpenBrace, None)?;
        let mut children = Vec::new();
        while !self.is_at_end() && self.peek().get_type() != &TokenType::CloseBrace {
            children.push(self.logical_expr()?);
        }
        self.consume(TokenType::CloseBrace, None)?;
        Ok(AnnotatedExpression::Web(AnnotatedWebTag {
            name,
            props: AnnotatedObjectLiteral { entries, error_info: props_info },
            children,
            error_info: info,
        }))
    }

    fn matches_single(&mut self, expected: TokenType) -> Option<ErrorInfo> {
        if !self.is_at_end() && self.peek().get_type() == &expected {
            Some(self.consume(expected, None).unwrap())
        } else {
            None
        }
    }

    fn consume(&mut self, expected: TokenType, msg: Option<String>) -> ParserResult<ErrorInfo> {
        let expected_msg = msg.unwrap_or_else(|| friendly_token_name(&expected));
        if self.is_at_end() {
            Err(ParserError::new(
                "Erro Sintático",
                format!("Esperado {}, mas o arquivo terminou", expected_msg),
                self.eof_info(),
            ))
        } else if self.peek().get_type() != &expected {
            let found = self.peek();
            let message = if expected == TokenType::Semicolon {
                "Faltou o ponto e vírgula (;) ao terminar a linha".to_owned()
            } else {
                format!(
                    "Esperado {}, encontrado {}",
                    expected_msg,
                    friendly_token_name(found.get_type()),
                )
            };
            Err(ParserError::new("Erro Sintático", message, found.error_info()))
        } else {
            Ok(self.advance().error_info())
        }
    }

    fn matches<F, A>(&mut self, func: F) -> Option<(A, ErrorInfo)>
        where F: Fn(&TokenType) -> Option<A>
    {
        if self.is_at_end() {
            return None;
        }
        let result = func(self.peek().get_type()).map(|e| (e, self.peek().error_info()));
        if result.is_some() {
            self.advance();
        }
        result
    }

    fn binary<F, Next>(&mut self, func: F, next: Next) -> ParserResult<AnnotatedExpression>
        where F: Fn(&TokenType) -> Option<BinaryOperator>,
              Next: Fn(&mut Parser) -> ParserResult<AnnotatedExpression> {
        let mut expr = next(self)?;
        loop {
            match self.matches(&func) {
                Some((operator, info)) => {
                    let right = next(self)?;
                    expr = AnnotatedExpression::Binary(
                        operator,
                        Box::new(expr),
                        Box::new(right),
                        info,
                    )
                }
                None => break,
            }
        }
        Ok(expr)
    }

    fn peek_or_eof(&self, expected: &str) -> ParserResult<&Token> {
        if self.is_at_end() {
            Err(ParserError::new(
                "Erro Sintático",
                format!("{}, mas o arquivo terminou", expected),
                self.eof_info(),
            ))
        } else {
            Ok(self.peek())
        }
    }

    fn eof_info(&self) -> ErrorInfo {
        self.tokens.last()
            .map(|t| t.error_info())
            .unwrap_or(ErrorInfo { line: 1, column: 1 })
    }

    fn next_is(&self, expected: &TokenType) -> bool {
        !self.is_at_end() && self.peek().get_type() == expected
    }

    fn peek_type(&self) -> Option<&TokenType> {
        self.tokens.get(self.current).map(|t| t.get_type())
    }

    fn advance(&mut self) -> &Token {
        assert!(!self.is_at_end());
        self.current += 1;
        self.previous()
    }

    fn is_at_end(&self) -> bool {
        self.current == self.tokens.len()
    }
    fn previous(&self) -> &Token {
        &self.tokens[self.current - 1]
    }
    fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions_sorted::assert_eq;

    use crate::ntlang::common::tests::unsafe_tokenize;
    use crate::ntlang::common::utils::SliceExt;
    use crate::ntlang::interpreted::ast::{
        AssignTarget, Expression, ObjectLiteral, Program, Statement, WebTag,
    };

    use super::*;

    fn parse_program(program: Vec<&str>) -> Vec<Statement> {
        let tokens = unsafe_tokenize(program);
        let annotated = parse(&tokens).expect("Failed to parse");
        let program: Program = (&annotated).into();
        program.statements
    }

    fn parse_single_statement(program: Vec<&str>) -> Statement {
        let statements = parse_program(program);
        statements.as_slice().unwrap_single().clone()
    }

    fn parse_error_title(program: Vec<&str>) -> String {
        let tokens = unsafe_tokenize(program);
        let errors = parse(&tokens).unwrap_err();
        errors.first().get_title()
    }

    #[test]
    fn variable_declaration() {
        let stmt = parse_single_statement(vec!["VAR contador = 0 : INTEIRO;"]);
        let expected = Statement::variable(
            "contador",
            DeclaredType::Inteiro,
            Some(Expression::integer(0)),
        );
        assert_eq!(stmt, expected);
    }

    #[test]
    fn variable_declaration_without_initializer() {
        let stmt = parse_single_statement(vec!["VAR nome : TEXTO;"]);
        let expected = Statement::variable("nome", DeclaredType::Texto, None);
        assert_eq!(stmt, expected);
    }

    #[test]
    fn arithmetic_precedence() {
        let stmt = parse_single_statement(vec!["x = 1 + 2 * 3;"]);
        let expected = Statement::assign(
            "x",
            Expression::Binary(
                BinaryOperator::Plus,
                Box::new(Expression::integer(1)),
                Box::new(Expression::Binary(
                    BinaryOperator::Mult,
                    Box::new(Expression::integer(2)),
                    Box::new(Expression::integer(3)),
                )),
            ),
        );
        assert_eq!(stmt, expected);
    }

    #[test]
    fn grouping_returns_inner_node() {
        let stmt = parse_single_statement(vec!["x = (1 + 2) * 3;"]);
        let expected = Statement::assign(
            "x",
            Expression::Binary(
                BinaryOperator::Mult,
                Box::new(Expression::Binary(
                    BinaryOperator::Plus,
                    Box::new(Expression::integer(1)),
                    Box::new(Expression::integer(2)),
                )),
                Box::new(Expression::integer(3)),
            ),
        );
        assert_eq!(stmt, expected);
    }

    #[test]
    fn print_with_multiple_arguments() {
        let stmt = parse_single_statement(vec!["EXIBIR(\"soma:\", 5 + 5);"]);
        let expected = Statement::Print(vec![
            Expression::text("soma:"),
            Expression::Binary(
                BinaryOperator::Plus,
                Box::new(Expression::integer(5)),
                Box::new(Expression::integer(5)),
            ),
        ]);
        assert_eq!(stmt, expected);
    }

    #[test]
    fn if_else_chain() {
        let stmt = parse_single_statement(vec![
            "SE (x > 2) { EXIBIR(1); } SENAO SE (x > 1) { EXIBIR(2); } SENAO { EXIBIR(3); }",
        ]);
        let expected = Statement::IfElse {
            cond: Expression::Logical(
                LogicalOperator::Greater,
                Box::new(Expression::identifier("x")),
                Box::new(Expression::integer(2)),
            ),
            if_block: vec![Statement::Print(vec![Expression::integer(1)])],
            else_branch: Some(Either::Left(Box::new(Statement::IfElse {
                cond: Expression::Logical(
                    LogicalOperator::Greater,
                    Box::new(Expression::identifier("x")),
                    Box::new(Expression::integer(1)),
                ),
                if_block: vec![Statement::Print(vec![Expression::integer(2)])],
                else_branch: Some(Either::Right(
                    vec![Statement::Print(vec![Expression::integer(3)])],
                )),
            }))),
        };
        assert_eq!(stmt, expected);
    }

    #[test]
    fn while_with_break_and_continue() {
        let stmt = parse_single_statement(vec![
            "ENQUANTO (VERDADEIRO) { PARE; CONTINUE; }",
        ]);
        let expected = Statement::While {
            cond: Expression::Atomic(Atom::True),
            body: vec![Statement::Break, Statement::Continue],
        };
        assert_eq!(stmt, expected);
    }

    #[test]
    fn for_statement_with_update_operator() {
        let stmt = parse_single_statement(vec![
            "PARA (VAR i = 0 : INTEIRO; i < 10; i++) { EXIBIR(i); }",
        ]);
        let expected = Statement::For {
            init: Box::new(Statement::variable(
                "i",
                DeclaredType::Inteiro,
                Some(Expression::integer(0)),
            )),
            cond: Expression::Logical(
                LogicalOperator::Less,
                Box::new(Expression::identifier("i")),
                Box::new(Expression::integer(10)),
            ),
            update: Box::new(Statement::Update {
                name: "i".to_owned(),
                op: UpdateOperator::Increment,
                amount: None,
            }),
            body: vec![Statement::Print(vec![Expression::identifier("i")])],
        };
        assert_eq!(stmt, expected);
    }

    #[test]
    fn do_while_statement() {
        let stmt = parse_single_statement(vec!["FACA { x += 1; } ENQUANTO (x < 3);"]);
        let expected = Statement::DoWhile {
            body: vec![Statement::Update {
                name: "x".to_owned(),
                op: UpdateOperator::AddAssign,
                amount: Some(Expression::integer(1)),
            }],
            cond: Expression::Logical(
                LogicalOperator::Less,
                Box::new(Expression::identifier("x")),
                Box::new(Expression::integer(3)),
            ),
        };
        assert_eq!(stmt, expected);
    }

    #[test]
    fn list_literal_and_index_access() {
        let prog = parse_program(vec![
            "VAR xs = [1, 2, 3] : LISTA;",
            "EXIBIR(xs[0]);",
            "xs[1] = 5;",
        ]);
        let expected = vec![
            Statement::variable(
                "xs",
                DeclaredType::Lista,
                Some(Expression::List(vec![
                    Expression::integer(1),
                    Expression::integer(2),
                    Expression::integer(3),
                ])),
            ),
            Statement::Print(vec![Expression::Index(
                Box::new(Expression::identifier("xs")),
                Box::new(Expression::integer(0)),
            )]),
            Statement::Assign {
                target: AssignTarget::Index {
                    name: "xs".to_owned(),
                    index: Expression::integer(1),
                },
                value: Expression::integer(5),
            },
        ];
        assert_eq!(prog, expected);
    }

    #[test]
    fn calc_expression_keeps_operation_name() {
        let stmt = parse_single_statement(vec!["x = CALC(RAIZ, 9, 2);"]);
        let expected = Statement::assign(
            "x",
            Expression::Calc {
                op: "RAIZ".to_owned(),
                args: vec![Expression::integer(9), Expression::integer(2)],
            },
        );
        assert_eq!(stmt, expected);
    }

    #[test]
    fn web_tag_with_props_and_children() {
        let stmt = parse_single_statement(vec![
            "bloco(fundo: azul) { texto() { \"ola\" } };",
        ]);
        let expected = Statement::Expression(Expression::Web(WebTag {
            name: "bloco".to_owned(),
            props: ObjectLiteral {
                entries: vec![("fundo".to_owned(), Expression::identifier("azul"))],
            },
            children: vec![Expression::Web(WebTag {
                name: "texto".to_owned(),
                props: ObjectLiteral { entries: vec![] },
                children: vec![Expression::text("ola")],
            })],
        }));
        assert_eq!(stmt, expected);
    }

    #[test]
    fn logical_connectives() {
        let stmt = parse_single_statement(vec!["SE (x > 1 E x < 5) { }"]);
        let expected = Statement::IfElse {
            cond: Expression::Logical(
                LogicalOperator::E,
                Box::new(Expression::Logical(
                    LogicalOperator::Greater,
                    Box::new(Expression::identifier("x")),
                    Box::new(Expression::integer(1)),
                )),
                Box::new(Expression::Logical(
                    LogicalOperator::Less,
                    Box::new(Expression::identifier("x")),
                    Box::new(Expression::integer(5)),
                )),
            ),
            if_block: vec![],
            else_branch: None,
        };
        assert_eq!(stmt, expected);
    }

    #[test]
    fn reserved_word_as_identifier() {
        assert_eq!(
            parse_error_title(vec!["VAR PARA = 1 : INTEIRO;"]),
            "Declaração incompleta",
        );
    }

    #[test]
    fn empty_print_arguments() {
        assert_eq!(parse_error_title(vec!["EXIBIR();"]), "Expressão vazia");
    }

    #[test]
    fn missing_semicolon() {
        assert_eq!(parse_error_title(vec!["EXIBIR(42)"]), "Erro Sintático");
    }

    #[test]
    fn logico_initializer_must_be_boolean_literal() {
        assert_eq!(
            parse_error_title(vec!["VAR b = 1 : LOGICO;"]),
            "Erro de Tipo (LOGICO)",
        );
    }

    #[test]
    fn natural_initializer_must_not_be_negative() {
        assert_eq!(
            parse_error_title(vec!["VAR n = -1 : NATURAL;"]),
            "Erro de Tipo (NATURAL)",
        );
    }

    #[test]
    fn unknown_type_name() {
        assert_eq!(
            parse_error_title(vec!["VAR x = 1 : FRACIONADO;"]),
            "Tipo de Variável Não Declarado",
        );
    }

    #[test]
    fn statement_cannot_start_with_literal() {
        assert_eq!(parse_error_title(vec!["42;"]), "Comando Inválido");
    }

    #[test]
    fn error_location_is_reported() {
        let tokens = unsafe_tokenize(vec!["VAR x = 1 : INTEIRO;", "EXIBIR();"]);
        let errors = parse(&tokens).unwrap_err();
        let info = errors.first().get_info();
        assert_eq!(info.line, 2);
        assert_eq!(info.column, 8);
    }
}
