pub mod input;
pub mod result;
pub mod scope;
pub mod value;
pub mod webtag;

use std::io::Write;

use either::Either;

use crate::ntlang::common::error;
use crate::ntlang::common::error::{ErrorInfo, NtResult};
use crate::ntlang::common::utils::mk_string;
use crate::ntlang::interpreted::annotated_ast::{
    AnnotatedAssignTarget, AnnotatedExpression, AnnotatedProgram, AnnotatedStatement,
    AnnotatedWebTag,
};
use crate::ntlang::interpreted::ast::{
    Atom, BinaryOperator, DeclaredType, LogicalOperator, UnaryOperator, UpdateOperator,
};
use crate::ntlang::interpreted::interpreter::input::InputProvider;
use crate::ntlang::interpreted::interpreter::result::{
    arith_type_error, binary_type_error, unary_type_error, ControlSignal, EvalResult, LoopKind,
    RuntimeError, MAX_ITERATIONS,
};
use crate::ntlang::interpreted::interpreter::scope::{ScopeStack, Symbol};
use crate::ntlang::interpreted::interpreter::value::Value;
use crate::ntlang::interpreted::interpreter::webtag::PropValue;

/// Runs a parsed program. On a semantic or runtime error the rendered
/// diagnostic is written to `writer` and the remaining top-level statements
/// are skipped. On success the accumulated markup of top-level web tags is
/// returned.
pub fn interpret<W: Write>(
    program: &AnnotatedProgram,
    file_name: &str,
    writer: &mut W,
    input: &mut dyn InputProvider,
) -> NtResult<String> {
    let mut interpreter = Interpreter::new(file_name, writer, input);
    match interpreter.run(program) {
        Ok(()) => Ok(interpreter.markup),
        Err(e) => {
            let rendered = error::render_banner(&e, interpreter.file_name.as_ref());
            writeln!(interpreter.writer, "{}", rendered).expect("Not written");
            error::convert_error(Err(e))
        }
    }
}

pub struct Interpreter<'a, W: Write> {
    file_name: String,
    writer: &'a mut W,
    input: &'a mut dyn InputProvider,
    scopes: ScopeStack,
    markup: String,
}

impl<'a, W: Write> Interpreter<'a, W> {
    pub fn new(file_name: &str, writer: &'a mut W, input: &'a mut dyn InputProvider) -> Self {
        Interpreter {
            file_name: file_name.to_owned(),
            writer,
            input,
            scopes: ScopeStack::new(),
            markup: String::new(),
        }
    }

    pub fn markup(&self) -> &str { &self.markup }

    pub fn run(&mut self, program: &AnnotatedProgram) -> EvalResult<()> {
        self.scopes.enter();
        let result = self.run_go(program);
        // The global scope is popped on success and on error alike; errors
        // are plain values here, so this line always runs.
        self.scopes.exit();
        result
    }

    fn run_go(&mut self, program: &AnnotatedProgram) -> EvalResult<()> {
        for statement in &program.statements {
            match self.visit_statement(statement)? {
                ControlSignal::Normal => {}
                ControlSignal::Break(info) =>
                    return Err(RuntimeError::SignalOutsideLoop {
                        keyword: "PARE",
                        error_info: info,
                    }),
                ControlSignal::Continue(info) =>
                    return Err(RuntimeError::SignalOutsideLoop {
                        keyword: "CONTINUE",
                        error_info: info,
                    }),
            }
        }
        Ok(())
    }

    fn visit_statement(&mut self, statement: &AnnotatedStatement) -> EvalResult<ControlSignal> {
        match statement {
            AnnotatedStatement::Variable { name, tipo, init, error_info } => {
                let value = match init {
                    Some(e) => self.visit_expr(e)?,
                    None => tipo.zero_value(),
                };
                self.validate(name, *tipo, &value, *error_info)?;
                self.scopes
                    .declare(name.clone(), Symbol::new(*tipo, value))
                    .map_err(|()| RuntimeError::Redeclaration {
                        name: name.clone(),
                        error_info: *error_info,
                    })?;
                Ok(ControlSignal::Normal)
            }
            AnnotatedStatement::Assign { target, value, error_info } => {
                self.assign(target, value, *error_info)?;
                Ok(ControlSignal::Normal)
            }
            AnnotatedStatement::Update { name, op, amount, error_info } => {
                self.update(name, *op, amount.as_ref(), *error_info)?;
                Ok(ControlSignal::Normal)
            }
            AnnotatedStatement::Print(args, _) => {
                let mut rendered = Vec::new();
                for arg in args {
                    rendered.push(self.visit_expr(arg)?.stringify());
                }
                writeln!(self.writer, "{}", mk_string(rendered, " ")).expect("Not written");
                Ok(ControlSignal::Normal)
            }
            AnnotatedStatement::Read(name, info) => {
                self.read_into(name, *info)?;
                Ok(ControlSignal::Normal)
            }
            AnnotatedStatement::IfElse { cond, if_block, else_branch, .. } =>
                if self.eval_condition(cond, "SE")? {
                    self.in_child_scope(|i| i.execute_block(if_block))
                } else {
                    match else_branch {
                        None => Ok(ControlSignal::Normal),
                        Some(Either::Left(chained)) => self.visit_statement(chained),
                        Some(Either::Right(block)) =>
                            self.in_child_scope(|i| i.execute_block(block)),
                    }
                },
            AnnotatedStatement::While { cond, body, error_info } => {
                let mut iterations = 0;
                loop {
                    if !self.eval_condition(cond, "ENQUANTO")? {
                        break;
                    }
                    iterations += 1;
                    if iterations > MAX_ITERATIONS {
                        return Err(RuntimeError::LoopLimit {
                            kind: LoopKind::Enquanto,
                            error_info: *error_info,
                        });
                    }
                    match self.in_child_scope(|i| i.execute_block(body))? {
                        ControlSignal::Break(_) => break,
                        ControlSignal::Continue(_) | ControlSignal::Normal => {}
                    }
                }
                Ok(ControlSignal::Normal)
            }
            AnnotatedStatement::For { init, cond, update, body, error_info } =>
                self.in_child_scope(|i| {
                    i.visit_statement(init)?;
                    let mut iterations = 0;
                    loop {
                        if !i.eval_condition(cond, "PARA")? {
                            break;
                        }
                        iterations += 1;
                        if iterations > MAX_ITERATIONS {
                            return Err(RuntimeError::LoopLimit {
                                kind: LoopKind::Para,
                                error_info: *error_info,
                            });
                        }
                        match i.in_child_scope(|i2| i2.execute_block(body))? {
                            ControlSignal::Break(_) => break,
                            // The update clause still runs after CONTINUE.
                            ControlSignal::Continue(_) | ControlSignal::Normal => {}
                        }
                        i.visit_statement(update)?;
                    }
                    Ok(ControlSignal::Normal)
                }),
            AnnotatedStatement::DoWhile { body, cond, error_info } => {
                let mut iterations = 0;
                loop {
                    iterations += 1;
                    if iterations > MAX_ITERATIONS {
                        return Err(RuntimeError::LoopLimit {
                            kind: LoopKind::FacaEnquanto,
                            error_info: *error_info,
                        });
                    }
                    match self.in_child_scope(|i| i.execute_block(body))? {
                        ControlSignal::Break(_) => break,
                        ControlSignal::Continue(_) | ControlSignal::Normal => {}
                    }
                    if !self.eval_condition(cond, "FACA-ENQUANTO")? {
                        break;
                    }
                }
                Ok(ControlSignal::Normal)
            }
            AnnotatedStatement::Break(info) => Ok(ControlSignal::Break(*info)),
            AnnotatedStatement::Continue(info) => Ok(ControlSignal::Continue(*info)),
            AnnotatedStatement::Expression(e) => {
                let value = self.visit_expr(e)?;
                // Top-level web tags accumulate into the markup channel.
                if let AnnotatedExpression::Web(_) = e {
                    self.markup.push_str(value.stringify().as_ref());
                }
                Ok(ControlSignal::Normal)
            }
        }
    }

    fn execute_block(&mut self, statements: &[AnnotatedStatement]) -> EvalResult<ControlSignal> {
        for statement in statements {
            match self.visit_statement(statement)? {
                ControlSignal::Normal => {}
                signal => return Ok(signal),
            }
        }
        Ok(ControlSignal::Normal)
    }

    // Every enter is paired with the exit below no matter how `f` comes
    // back, keeping the stack balanced while an error propagates.
    fn in_child_scope<A>(
        &mut self, f: impl FnOnce(&mut Self) -> EvalResult<A>,
    ) -> EvalResult<A> {
        self.scopes.enter();
        let result = f(self);
        self.scopes.exit();
        result
    }

    fn validate(
        &self, name: &str, tipo: DeclaredType, value: &Value, error_info: ErrorInfo,
    ) -> EvalResult<()> {
        if tipo.accepts(value) {
            Ok(())
        } else {
            Err(RuntimeError::TypeMismatch {
                message: format!(
                    "Variável '{}' do tipo {} não pode receber {} ({})",
                    name,
                    tipo.name(),
                    value.type_name(),
                    value.stringify(),
                ),
                error_info,
            })
        }
    }

    fn missing_variable(&self, name: &str, error_info: ErrorInfo) -> RuntimeError {
        if self.scopes.was_ever_declared(name) {
            RuntimeError::OutOfScope { name: name.to_owned(), error_info }
        } else {
            RuntimeError::Undeclared { name: name.to_owned(), error_info }
        }
    }

    fn assign(
        &mut self,
        target: &AnnotatedAssignTarget,
        value_expr: &AnnotatedExpression,
        error_info: ErrorInfo,
    ) -> EvalResult<()> {
        let value = self.visit_expr(value_expr)?;
        match target {
            AnnotatedAssignTarget::Name(name) => {
                let tipo = match self.scopes.get(name) {
                    Some(symbol) => symbol.tipo,
                    None => return Err(self.missing_variable(name, error_info)),
                };
                self.validate(name, tipo, &value, error_info)?;
                if let Some(symbol) = self.scopes.get_mut(name) {
                    symbol.value = value;
                }
                Ok(())
            }
            AnnotatedAssignTarget::Index { name, index } => {
                let index_value = self.visit_expr(index)?;
                let i = match index_value {
                    Value::Inteiro(n) => n,
                    other => return Err(RuntimeError::NonIntegerIndex {
                        found: other.type_name(),
                        error_info,
                    }),
                };
                if self.scopes.get(name).is_none() {
                    return Err(self.missing_variable(name, error_info));
                }
                let symbol = self.scopes.get_mut(name).expect("Checked above");
                match &mut symbol.value {
                    Value::Lista(items) => {
                        if i < 0 || (i as usize) >= items.len() {
                            return Err(RuntimeError::IndexOutOfBounds {
                                index: i,
                                length: items.len(),
                                error_info,
                            });
                        }
                        items[i as usize] = value;
                        Ok(())
                    }
                    other => Err(RuntimeError::NonListIndexing {
                        found: other.type_name(),
                        error_info,
                    }),
                }
            }
        }
    }

    fn update(
        &mut self,
        name: &str,
        op: UpdateOperator,
        amount: Option<&AnnotatedExpression>,
        error_info: ErrorInfo,
    ) -> EvalResult<()> {
        let delta = match amount {
            None => Value::Inteiro(1),
            Some(e) => {
                let value = self.visit_expr(e)?;
                if !value.is_numeric() {
                    return Err(RuntimeError::TypeMismatch {
                        message: format!(
                            "Operador '{}' exige um valor numérico, encontrado {}",
                            op.symbol(),
                            value.type_name(),
                        ),
                        error_info,
                    });
                }
                value
            }
        };
        let (tipo, current) = match self.scopes.get(name) {
            Some(symbol) => (symbol.tipo, symbol.value.clone()),
            None => return Err(self.missing_variable(name, error_info)),
        };
        if !tipo.is_numeric() {
            return Err(RuntimeError::InvalidUpdateTarget {
                name: name.to_owned(),
                tipo: tipo.name(),
                error_info,
            });
        }
        let new_value = match op {
            UpdateOperator::Increment | UpdateOperator::AddAssign =>
                numeric_add(&current, &delta),
            UpdateOperator::Decrement | UpdateOperator::SubAssign =>
                numeric_sub(&current, &delta),
        };
        self.validate(name, tipo, &new_value, error_info)?;
        if let Some(symbol) = self.scopes.get_mut(name) {
            symbol.value = new_value;
        }
        Ok(())
    }

    fn read_into(&mut self, name: &str, error_info: ErrorInfo) -> EvalResult<()> {
        let tipo = match self.scopes.get(name) {
            Some(symbol) => symbol.tipo,
            None => return Err(self.missing_variable(name, error_info)),
        };
        let prompt = format!("Digite o valor de {}: ", name);
        let raw = self.input.read_line(&prompt).map_err(|e| RuntimeError::InputFailure {
            name: name.to_owned(),
            message: e.to_string(),
            error_info,
        })?;
        let value = parse_input(name, tipo, raw.trim(), error_info)?;
        self.validate(name, tipo, &value, error_info)?;
        if let Some(symbol) = self.scopes.get_mut(name) {
            symbol.value = value;
        }
        Ok(())
    }

    fn eval_condition(
        &mut self, cond: &AnnotatedExpression, construct: &'static str,
    ) -> EvalResult<bool> {
        match self.visit_expr(cond)? {
            Value::Logico(b) => Ok(b),
            other => Err(RuntimeError::TypeMismatch {
                message: format!(
                    "Condição de {} deve ser LOGICO, encontrado {}",
                    construct,
                    other.type_name(),
                ),
                error_info: cond.error_info(),
            }),
        }
    }

    fn visit_expr(&mut self, expression: &AnnotatedExpression) -> EvalResult<Value> {
        match expression {
            AnnotatedExpression::Atomic(atom, info) => match atom {
                Atom::Integer(n) => Ok(Value::Inteiro(*n)),
                Atom::Real(r) => Ok(Value::Real(*r)),
                Atom::Text(s) => Ok(Value::Texto(s.clone())),
                Atom::True => Ok(Value::Logico(true)),
                Atom::False => Ok(Value::Logico(false)),
                Atom::Identifier(name) => self
                    .scopes
                    .get(name)
                    .map(|symbol| symbol.value.clone())
                    .ok_or_else(|| self.missing_variable(name, *info)),
            },
            AnnotatedExpression::Unary(op, e, info) => {
                let value = self.visit_expr(e)?;
                match op {
                    UnaryOperator::Minus => match value {
                        Value::Inteiro(n) => Ok(Value::Inteiro(-n)),
                        Value::Real(r) => Ok(Value::Real(-r)),
                        other => unary_type_error(op, &other, info),
                    },
                    UnaryOperator::Nao => match value {
                        Value::Logico(b) => Ok(Value::Logico(!b)),
                        other => unary_type_error(op, &other, info),
                    },
                }
            }
            AnnotatedExpression::Binary(op, e1, e2, info) => {
                let v1 = self.visit_expr(e1)?;
                let v2 = self.visit_expr(e2)?;
                apply_binary(*op, v1, v2, *info)
            }
            AnnotatedExpression::Logical(op, e1, e2, info) => {
                let v1 = self.visit_expr(e1)?;
                let v2 = self.visit_expr(e2)?;
                apply_logical(*op, v1, v2, *info)
            }
            AnnotatedExpression::List(es, _) => {
                let mut values = Vec::new();
                for e in es {
                    values.push(self.visit_expr(e)?);
                }
                Ok(Value::Lista(values))
            }
            AnnotatedExpression::Index(obj, idx, info) => {
                let object = self.visit_expr(obj)?;
                let index = self.visit_expr(idx)?;
                index_value(object, index, *info)
            }
            AnnotatedExpression::Calc { op, args, error_info } =>
                self.visit_calc(op, args, *error_info),
            AnnotatedExpression::Web(tag) => self.visit_web_tag(tag).map(Value::Texto),
        }
    }

    fn visit_calc(
        &mut self, op: &str, args: &[AnnotatedExpression], error_info: ErrorInfo,
    ) -> EvalResult<Value> {
        enum CalcOperation { Raiz, Expoente }
        let operation = match op.to_uppercase().as_str() {
            "RAIZ" => CalcOperation::Raiz,
            "EXPOENTE" => CalcOperation::Expoente,
            _ => return Err(RuntimeError::InvalidCalcOperation {
                name: op.to_owned(),
                error_info,
            }),
        };
        if args.len() != 2 {
            return Err(RuntimeError::CalcArity { actual: args.len(), error_info });
        }
        let v1 = self.visit_expr(&args[0])?;
        let v2 = self.visit_expr(&args[1])?;
        let (a, b) = match (v1.as_number(), v2.as_number()) {
            (Some(a), Some(b)) => (a, b),
            _ => return binary_type_error("CALC", &v1, &v2, &error_info),
        };
        let result = match operation {
            CalcOperation::Raiz => {
                if b == 0.0 {
                    return Err(RuntimeError::InvalidCalcArgument {
                        message: "RAIZ com índice zero não é definida".to_owned(),
                        error_info,
                    });
                }
                a.powf(1.0 / b)
            }
            CalcOperation::Expoente => a.powf(b),
        };
        Ok(number_value(result))
    }

    fn visit_web_tag(&mut self, tag: &AnnotatedWebTag) -> EvalResult<String> {
        let mut props: Vec<(String, PropValue)> = Vec::new();
        for (key, expr) in &tag.props.entries {
            let value = self.eval_prop_value(expr)?;
            props.push((key.clone(), value));
        }
        let mut children = Vec::new();
        for child in &tag.children {
            let rendered = match self.visit_expr(child)? {
                Value::Texto(s) => s,
                other => other.stringify(),
            };
            children.push(rendered);
        }
        Ok(webtag::compose(tag.name.as_ref(), &props, &children))
    }

    // A bare identifier in property-value position usually names a color
    // word, not a variable; the word wins only when no live binding exists.
    fn eval_prop_value(&mut self, expr: &AnnotatedExpression) -> EvalResult<PropValue> {
        if let AnnotatedExpression::Atomic(Atom::Identifier(name), _) = expr {
            if self.scopes.get(name).is_none() {
                return Ok(Either::Left(name.clone()));
            }
        }
        self.visit_expr(expr).map(Either::Right)
    }
}

fn numeric_add(v1: &Value, v2: &Value) -> Value {
    match (v1, v2) {
        (Value::Inteiro(a), Value::Inteiro(b)) => Value::Inteiro(a + b),
        _ => Value::Real(
            v1.as_number().expect("Caller checked numeric")
                + v2.as_number().expect("Caller checked numeric")),
    }
}

fn numeric_sub(v1: &Value, v2: &Value) -> Value {
    match (v1, v2) {
        (Value::Inteiro(a), Value::Inteiro(b)) => Value::Inteiro(a - b),
        _ => Value::Real(
            v1.as_number().expect("Caller checked numeric")
                - v2.as_number().expect("Caller checked numeric")),
    }
}

fn apply_binary(op: BinaryOperator, v1: Value, v2: Value, info: ErrorInfo) -> EvalResult<Value> {
    match op {
        // `+` concatenates as soon as either side is TEXTO.
        BinaryOperator::Plus => match (&v1, &v2) {
            (Value::Texto(s1), other) =>
                Ok(Value::Texto(format!("{}{}", s1, other.stringify()))),
            (other, Value::Texto(s2)) =>
                Ok(Value::Texto(format!("{}{}", other.stringify(), s2))),
            _ => numeric_binary(op, &v1, &v2, &info),
        },
        BinaryOperator::Minus | BinaryOperator::Mult | BinaryOperator::Div =>
            numeric_binary(op, &v1, &v2, &info),
    }
}

fn numeric_binary(
    op: BinaryOperator, v1: &Value, v2: &Value, info: &ErrorInfo,
) -> EvalResult<Value> {
    if let (Value::Inteiro(a), Value::Inteiro(b)) = (v1, v2) {
        return match op {
            BinaryOperator::Plus => Ok(Value::Inteiro(a + b)),
            BinaryOperator::Minus => Ok(Value::Inteiro(a - b)),
            BinaryOperator::Mult => Ok(Value::Inteiro(a * b)),
            BinaryOperator::Div =>
                if *b == 0 {
                    Err(RuntimeError::DivisionByZero { error_info: *info })
                } else if a % b == 0 {
                    Ok(Value::Inteiro(a / b))
                } else {
                    Ok(Value::Real(*a as f64 / *b as f64))
                },
        };
    }
    match (v1.as_number(), v2.as_number()) {
        (Some(a), Some(b)) => match op {
            BinaryOperator::Plus => Ok(Value::Real(a + b)),
            BinaryOperator::Minus => Ok(Value::Real(a - b)),
            BinaryOperator::Mult => Ok(Value::Real(a * b)),
            BinaryOperator::Div =>
                if b == 0.0 {
                    Err(RuntimeError::DivisionByZero { error_info: *info })
                } else {
                    Ok(Value::Real(a / b))
                },
        },
        _ => arith_type_error(&op, v1, v2, info),
    }
}

fn apply_logical(op: LogicalOperator, v1: Value, v2: Value, info: ErrorInfo) -> EvalResult<Value> {
    match op {
        LogicalOperator::EqualEqual => Ok(Value::Logico(v1.equal_values(&v2))),
        LogicalOperator::BangEqual => Ok(Value::Logico(!v1.equal_values(&v2))),
        // Both operands are already evaluated; E/OU do not short-circuit.
        LogicalOperator::E => match (&v1, &v2) {
            (Value::Logico(b1), Value::Logico(b2)) => Ok(Value::Logico(*b1 && *b2)),
            _ => binary_type_error(op.symbol(), &v1, &v2, &info),
        },
        LogicalOperator::Ou => match (&v1, &v2) {
            (Value::Logico(b1), Value::Logico(b2)) => Ok(Value::Logico(*b1 || *b2)),
            _ => binary_type_error(op.symbol(), &v1, &v2, &info),
        },
        LogicalOperator::Greater
        | LogicalOperator::GreaterEqual
        | LogicalOperator::Less
        | LogicalOperator::LessEqual => ordering(op, &v1, &v2, &info),
    }
}

fn ordering(
    op: LogicalOperator, v1: &Value, v2: &Value, info: &ErrorInfo,
) -> EvalResult<Value> {
    if let (Value::Texto(s1), Value::Texto(s2)) = (v1, v2) {
        let result = match op {
            LogicalOperator::Greater => s1 > s2,
            LogicalOperator::GreaterEqual => s1 >= s2,
            LogicalOperator::Less => s1 < s2,
            LogicalOperator::LessEqual => s1 <= s2,
            _ => unreachable!("ordering called with non-comparison operator"),
        };
        return Ok(Value::Logico(result));
    }
    match (v1.as_number(), v2.as_number()) {
        (Some(a), Some(b)) => {
            let result = match op {
                LogicalOperator::Greater => a > b,
                LogicalOperator::GreaterEqual => a >= b,
                LogicalOperator::Less => a < b,
                LogicalOperator::LessEqual => a <= b,
                _ => unreachable!("ordering called with non-comparison operator"),
            };
            Ok(Value::Logico(result))
        }
        _ => binary_type_error(op.symbol(), v1, v2, info),
    }
}

fn index_value(object: Value, index: Value, info: ErrorInfo) -> EvalResult<Value> {
    let items = match object {
        Value::Lista(items) => items,
        other => return Err(RuntimeError::NonListIndexing {
            found: other.type_name(),
            error_info: info,
        }),
    };
    let i = match index {
        Value::Inteiro(n) => n,
        other => return Err(RuntimeError::NonIntegerIndex {
            found: other.type_name(),
            error_info: info,
        }),
    };
    if i < 0 || (i as usize) >= items.len() {
        Err(RuntimeError::IndexOutOfBounds { index: i, length: items.len(), error_info: info })
    } else {
        Ok(items[i as usize].clone())
    }
}

fn parse_input(
    name: &str, tipo: DeclaredType, raw: &str, error_info: ErrorInfo,
) -> EvalResult<Value> {
    let parse_error = || RuntimeError::InputParse {
        name: name.to_owned(),
        tipo: tipo.name(),
        raw: raw.to_owned(),
        error_info,
    };
    match tipo {
        DeclaredType::Inteiro | DeclaredType::Natural =>
            raw.parse::<i64>().map(Value::Inteiro).map_err(|_| parse_error()),
        DeclaredType::Real =>
            raw.replace(',', ".").parse::<f64>().map(Value::Real).map_err(|_| parse_error()),
        DeclaredType::Texto => Ok(Value::Texto(raw.to_owned())),
        DeclaredType::Logico => match raw.to_uppercase().as_str() {
            "VERDADEIRO" => Ok(Value::Logico(true)),
            "FALSO" => Ok(Value::Logico(false)),
            _ => Err(parse_error()),
        },
        DeclaredType::Lista => Err(parse_error()),
    }
}

fn number_value(r: f64) -> Value {
    if r.is_finite() && r.fract() == 0.0 && r.abs() < i64::MAX as f64 {
        Value::Inteiro(r as i64)
    } else {
        Value::Real(r)
    }
}
