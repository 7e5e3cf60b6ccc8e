use crate::ntlang::common::error::{ErrorInfo, NtError};
use crate::ntlang::interpreted::ast::{BinaryOperator, UnaryOperator};
use crate::ntlang::interpreted::interpreter::value::Value;

/// Every loop gives up after this many iterations; the limit is the only
/// defense against runaway programs.
pub const MAX_ITERATIONS: usize = 10_000;

/// The outcome of executing a statement or block. Break/Continue travel up
/// the call chain as ordinary values until the nearest enclosing loop
/// consumes them; they carry their origin so an escape past every loop can
/// be reported precisely.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum ControlSignal {
    Normal,
    Break(ErrorInfo),
    Continue(ErrorInfo),
}

#[derive(Debug, PartialEq, Clone, Copy, Eq)]
pub enum LoopKind {
    Enquanto,
    Para,
    FacaEnquanto,
}

impl LoopKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            LoopKind::Enquanto => "ENQUANTO",
            LoopKind::Para => "PARA",
            LoopKind::FacaEnquanto => "FACA-ENQUANTO",
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum RuntimeError {
    TypeMismatch { message: String, error_info: ErrorInfo },
    Undeclared { name: String, error_info: ErrorInfo },
    OutOfScope { name: String, error_info: ErrorInfo },
    Redeclaration { name: String, error_info: ErrorInfo },
    DivisionByZero { error_info: ErrorInfo },
    InvalidCalcOperation { name: String, error_info: ErrorInfo },
    CalcArity { actual: usize, error_info: ErrorInfo },
    InvalidCalcArgument { message: String, error_info: ErrorInfo },
    InvalidUpdateTarget { name: String, tipo: &'static str, error_info: ErrorInfo },
    IndexOutOfBounds { index: i64, length: usize, error_info: ErrorInfo },
    NonIntegerIndex { found: &'static str, error_info: ErrorInfo },
    NonListIndexing { found: &'static str, error_info: ErrorInfo },
    SignalOutsideLoop { keyword: &'static str, error_info: ErrorInfo },
    InputFailure { name: String, message: String, error_info: ErrorInfo },
    InputParse { name: String, tipo: &'static str, raw: String, error_info: ErrorInfo },
    LoopLimit { kind: LoopKind, error_info: ErrorInfo },
}

impl NtError for RuntimeError {
    fn get_info(&self) -> ErrorInfo {
        use RuntimeError::*;
        match self {
            TypeMismatch { error_info, .. } => *error_info,
            Undeclared { error_info, .. } => *error_info,
            OutOfScope { error_info, .. } => *error_info,
            Redeclaration { error_info, .. } => *error_info,
            DivisionByZero { error_info } => *error_info,
            InvalidCalcOperation { error_info, .. } => *error_info,
            CalcArity { error_info, .. } => *error_info,
            InvalidCalcArgument { error_info, .. } => *error_info,
            InvalidUpdateTarget { error_info, .. } => *error_info,
            IndexOutOfBounds { error_info, .. } => *error_info,
            NonIntegerIndex { error_info, .. } => *error_info,
            NonListIndexing { error_info, .. } => *error_info,
            SignalOutsideLoop { error_info, .. } => *error_info,
            InputFailure { error_info, .. } => *error_info,
            InputParse { error_info, .. } => *error_info,
            LoopLimit { error_info, .. } => *error_info,
        }
    }

    fn get_title(&self) -> String {
        match self {
            RuntimeError::LoopLimit { .. } => "Limite de Execução".to_owned(),
            _ => "Erro Semântico".to_owned(),
        }
    }

    fn get_message(&self) -> String {
        use RuntimeError::*;
        match self {
            TypeMismatch { message, .. } => message.to_owned(),
            Undeclared { name, .. } =>
                format!("Variável '{}' não foi declarada", name),
            OutOfScope { name, .. } =>
                format!("Variável '{}' está fora de escopo", name),
            Redeclaration { name, .. } =>
                format!("Variável '{}' já foi declarada neste escopo", name),
            DivisionByZero { .. } => "Divisão por zero".to_owned(),
            InvalidCalcOperation { name, .. } =>
                format!("Operação de cálculo inválida: '{}'. Operações válidas: RAIZ, EXPOENTE", name),
            CalcArity { actual, .. } =>
                format!("CALC espera exatamente 2 argumentos, recebeu {}", actual),
            InvalidCalcArgument { message, .. } => message.to_owned(),
            InvalidUpdateTarget { name, tipo, .. } =>
                format!("Operador de atualização exige variável numérica, mas '{}' é {}", name, tipo),
            IndexOutOfBounds { index, length, .. } =>
                format!("Índice {} fora dos limites da lista de tamanho {}", index, length),
            NonIntegerIndex { found, .. } =>
                format!("Índice de lista deve ser INTEIRO, encontrado {}", found),
            NonListIndexing { found, .. } =>
                format!("Indexação exige uma LISTA, encontrado {}", found),
            SignalOutsideLoop { keyword, .. } =>
                format!("'{}' fora de um laço", keyword),
            InputFailure { name, message, .. } =>
                format!("Falha ao ler o valor de '{}': {}", name, message),
            InputParse { name, tipo, raw, .. } =>
                format!("Entrada inválida para '{}' do tipo {}: '{}'", name, tipo, raw),
            LoopLimit { kind, .. } =>
                format!("Laço {} excedeu o limite de {} iterações", kind.keyword(), MAX_ITERATIONS),
        }
    }
}

pub type EvalResult<A> = Result<A, RuntimeError>;

pub fn unary_type_error<A>(
    op: &UnaryOperator, v: &Value, error_info: &ErrorInfo,
) -> EvalResult<A> {
    Err(RuntimeError::TypeMismatch {
        message: format!(
            "Operador '{}' não pode ser aplicado a {}", op.symbol(), v.type_name()),
        error_info: *error_info,
    })
}

pub fn binary_type_error<A>(
    op_symbol: &str, v1: &Value, v2: &Value, error_info: &ErrorInfo,
) -> EvalResult<A> {
    Err(RuntimeError::TypeMismatch {
        message: format!(
            "Operador '{}' não pode ser aplicado a {} e {}",
            op_symbol,
            v1.type_name(),
            v2.type_name(),
        ),
        error_info: *error_info,
    })
}

pub fn arith_type_error<A>(
    op: &BinaryOperator, v1: &Value, v2: &Value, error_info: &ErrorInfo,
) -> EvalResult<A> {
    binary_type_error(op.symbol(), v1, v2, error_info)
}
