use either::Either;

#[derive(Debug, PartialEq, Clone)]
pub struct Program {
    pub statements: Vec<Statement>,
}

/// The five declarable types, plus the list tag used by declaration-adjacent
/// checks. Whether a *value* satisfies a declared type is decided by the
/// evaluator; the parser only carries the tag around.
#[derive(Debug, PartialEq, Clone, Copy, Eq)]
pub enum DeclaredType {
    Inteiro,
    Real,
    Natural,
    Texto,
    Logico,
    Lista,
}

impl DeclaredType {
    pub fn name(&self) -> &'static str {
        match self {
            DeclaredType::Inteiro => "INTEIRO",
            DeclaredType::Real => "REAL",
            DeclaredType::Natural => "NATURAL",
            DeclaredType::Texto => "TEXTO",
            DeclaredType::Logico => "LOGICO",
            DeclaredType::Lista => "LISTA",
        }
    }

    pub fn is_numeric(&self) -> bool {
        match self {
            DeclaredType::Inteiro | DeclaredType::Real | DeclaredType::Natural => true,
            _ => false,
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum Statement {
    Variable { name: String, tipo: DeclaredType, init: Option<Expression> },
    Assign { target: AssignTarget, value: Expression },
    Update { name: String, op: UpdateOperator, amount: Option<Expression> },
    Print(Vec<Expression>),
    Read(String),
    IfElse {
        cond: Expression,
        if_block: Vec<Statement>,
        // Left: a chained `SENAO SE`; Right: a plain `SENAO { … }` block.
        else_branch: Option<Either<Box<Statement>, Vec<Statement>>>,
    },
    While { cond: Expression, body: Vec<Statement> },
    For {
        init: Box<Statement>,
        cond: Expression,
        update: Box<Statement>,
        body: Vec<Statement>,
    },
    DoWhile { body: Vec<Statement>, cond: Expression },
    Break,
    Continue,
    Expression(Expression),
}

impl Statement {
    pub fn variable<S: Into<String>>(name: S, tipo: DeclaredType, init: Option<Expression>) -> Self {
        Statement::Variable { name: name.into(), tipo, init }
    }
    pub fn assign<S: Into<String>>(name: S, value: Expression) -> Self {
        Statement::Assign { target: AssignTarget::Name(name.into()), value }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum AssignTarget {
    Name(String),
    Index { name: String, index: Expression },
}

#[derive(Debug, PartialEq, Clone)]
pub enum Expression {
    Atomic(Atom),
    Unary(UnaryOperator, Box<Expression>),
    Binary(BinaryOperator, Box<Expression>, Box<Expression>),
    Logical(LogicalOperator, Box<Expression>, Box<Expression>),
    List(Vec<Expression>),
    Index(Box<Expression>, Box<Expression>),
    Calc { op: String, args: Vec<Expression> },
    Web(WebTag),
}

impl Expression {
    pub fn identifier<S: Into<String>>(str: S) -> Self {
        Expression::Atomic(Atom::Identifier(str.into()))
    }
    pub fn text<S: Into<String>>(str: S) -> Self { Expression::Atomic(Atom::Text(str.into())) }
    pub fn integer(i: i64) -> Self { Expression::Atomic(Atom::Integer(i)) }
}

#[derive(Debug, PartialEq, Clone)]
pub struct WebTag {
    pub name: String,
    pub props: ObjectLiteral,
    pub children: Vec<Expression>,
}

/// The property map of a web tag, e.g. `(fundo: azul, tamanho: 12)`.
#[derive(Debug, PartialEq, Clone)]
pub struct ObjectLiteral {
    pub entries: Vec<(String, Expression)>,
}

#[derive(Debug, PartialEq, Clone)]
pub enum Atom {
    Integer(i64),
    Real(f64),
    Text(String),
    True,
    False,
    Identifier(String),
}

impl Atom {
    pub fn text<S: Into<String>>(str: S) -> Self { Atom::Text(str.into()) }
}

#[derive(Debug, PartialEq, Clone, Copy, Eq)]
pub enum UnaryOperator {
    Minus,
    Nao,
}

impl UnaryOperator {
    pub fn symbol(&self) -> &str {
        match self {
            UnaryOperator::Minus => "-",
            UnaryOperator::Nao => "NAO",
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy, Eq)]
pub enum BinaryOperator {
    Plus,
    Minus,
    Mult,
    Div,
}

impl BinaryOperator {
    pub fn symbol(&self) -> &str {
        match self {
            BinaryOperator::Plus => "+",
            BinaryOperator::Minus => "-",
            BinaryOperator::Mult => "*",
            BinaryOperator::Div => "/",
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy, Eq)]
pub enum LogicalOperator {
    EqualEqual,
    BangEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,

    E,
    Ou,
}

impl LogicalOperator {
    pub fn symbol(&self) -> &str {
        match self {
            LogicalOperator::EqualEqual => "==",
            LogicalOperator::BangEqual => "!=",
            LogicalOperator::Greater => ">",
            LogicalOperator::GreaterEqual => ">=",
            LogicalOperator::Less => "<",
            LogicalOperator::LessEqual => "<=",
            LogicalOperator::E => "E",
            LogicalOperator::Ou => "OU",
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy, Eq)]
pub enum UpdateOperator {
    Increment,
    Decrement,
    AddAssign,
    SubAssign,
}

impl UpdateOperator {
    pub fn symbol(&self) -> &str {
        match self {
            UpdateOperator::Increment => "++",
            UpdateOperator::Decrement => "--",
            UpdateOperator::AddAssign => "+=",
            UpdateOperator::SubAssign => "-=",
        }
    }
}
