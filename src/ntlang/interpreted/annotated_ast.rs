use either::Either;

use crate::ntlang::common::error::ErrorInfo;
use crate::ntlang::interpreted::ast::{
    AssignTarget, Atom, BinaryOperator, DeclaredType, Expression, LogicalOperator, ObjectLiteral,
    Program, Statement, UnaryOperator, UpdateOperator, WebTag,
};

#[derive(Debug, PartialEq, Clone)]
pub struct AnnotatedProgram {
    pub statements: Vec<AnnotatedStatement>,
}

impl From<&AnnotatedProgram> for Program {
    fn from(ap: &AnnotatedProgram) -> Self {
        Program { statements: ap.statements.iter().map(|e| e.into()).collect() }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum AnnotatedStatement {
    Variable {
        name: String,
        tipo: DeclaredType,
        init: Option<AnnotatedExpression>,
        error_info: ErrorInfo,
    },
    Assign {
        target: AnnotatedAssignTarget,
        value: AnnotatedExpression,
        error_info: ErrorInfo,
    },
    Update {
        name: String,
        op: UpdateOperator,
        amount: Option<AnnotatedExpression>,
        error_info: ErrorInfo,
    },
    Print(Vec<AnnotatedExpression>, ErrorInfo),
    Read(String, ErrorInfo),
    IfElse {
        cond: AnnotatedExpression,
        if_block: Vec<AnnotatedStatement>,
        else_branch: Option<Either<Box<AnnotatedStatement>, Vec<AnnotatedStatement>>>,
        error_info: ErrorInfo,
    },
    While {
        cond: AnnotatedExpression,
        body: Vec<AnnotatedStatement>,
        error_info: ErrorInfo,
    },
    For {
        init: Box<AnnotatedStatement>,
        cond: AnnotatedExpression,
        update: Box<AnnotatedStatement>,
        body: Vec<AnnotatedStatement>,
        error_info: ErrorInfo,
    },
    DoWhile {
        body: Vec<AnnotatedStatement>,
        cond: AnnotatedExpression,
        error_info: ErrorInfo,
    },
    Break(ErrorInfo),
    Continue(ErrorInfo),
    Expression(AnnotatedExpression),
}

fn statements(ss: &[AnnotatedStatement]) -> Vec<Statement> {
    ss.iter().map(|e| e.into()).collect()
}

impl From<&AnnotatedStatement> for Statement {
    fn from(s: &AnnotatedStatement) -> Self {
        match s {
            AnnotatedStatement::Variable { name, tipo, init, .. } => Statement::Variable {
                name: name.clone(),
                tipo: *tipo,
                init: init.as_ref().map(|e| e.into()),
            },
            AnnotatedStatement::Assign { target, value, .. } => Statement::Assign {
                target: target.into(),
                value: value.into(),
            },
            AnnotatedStatement::Update { name, op, amount, .. } => Statement::Update {
                name: name.clone(),
                op: *op,
                amount: amount.as_ref().map(|e| e.into()),
            },
            AnnotatedStatement::Print(es, _) =>
                Statement::Print(es.iter().map(|e| e.into()).collect()),
            AnnotatedStatement::Read(name, _) => Statement::Read(name.clone()),
            AnnotatedStatement::IfElse { cond, if_block, else_branch, .. } => Statement::IfElse {
                cond: cond.into(),
                if_block: statements(if_block),
                else_branch: else_branch.as_ref().map(|branch| match branch {
                    Either::Left(chained) => Either::Left(Box::new(chained.as_ref().into())),
                    Either::Right(block) => Either::Right(statements(block)),
                }),
            },
            AnnotatedStatement::While { cond, body, .. } => Statement::While {
                cond: cond.into(),
                body: statements(body),
            },
            AnnotatedStatement::For { init, cond, update, body, .. } => Statement::For {
                init: Box::new(init.as_ref().into()),
                cond: cond.into(),
                update: Box::new(update.as_ref().into()),
                body: statements(body),
            },
            AnnotatedStatement::DoWhile { body, cond, .. } => Statement::DoWhile {
                body: statements(body),
                cond: cond.into(),
            },
            AnnotatedStatement::Break(_) => Statement::Break,
            AnnotatedStatement::Continue(_) => Statement::Continue,
            AnnotatedStatement::Expression(e) => Statement::Expression(e.into()),
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum AnnotatedAssignTarget {
    Name(String),
    Index { name: String, index: AnnotatedExpression },
}

impl From<&AnnotatedAssignTarget> for AssignTarget {
    fn from(t: &AnnotatedAssignTarget) -> Self {
        match t {
            AnnotatedAssignTarget::Name(n) => AssignTarget::Name(n.clone()),
            AnnotatedAssignTarget::Index { name, index } =>
                AssignTarget::Index { name: name.clone(), index: index.into() },
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum AnnotatedExpression {
    Atomic(Atom, ErrorInfo),
    Unary(UnaryOperator, Box<AnnotatedExpression>, ErrorInfo),
    Binary(BinaryOperator, Box<AnnotatedExpression>, Box<AnnotatedExpression>, ErrorInfo),
    Logical(LogicalOperator, Box<AnnotatedExpression>, Box<AnnotatedExpression>, ErrorInfo),
    List(Vec<AnnotatedExpression>, ErrorInfo),
    Index(Box<AnnotatedExpression>, Box<AnnotatedExpression>, ErrorInfo),
    Calc { op: String, args: Vec<AnnotatedExpression>, error_info: ErrorInfo },
    Web(AnnotatedWebTag),
}

impl AnnotatedExpression {
    pub fn error_info(&self) -> ErrorInfo {
        use AnnotatedExpression::*;
        match self {
            Atomic(_, i) => *i,
            Unary(_, _, i) => *i,
            Binary(_, _, _, i) => *i,
            Logical(_, _, _, i) => *i,
            List(_, i) => *i,
            Index(_, _, i) => *i,
            Calc { error_info, .. } => *error_info,
            Web(tag) => tag.error_info,
        }
    }
}

impl From<&AnnotatedExpression> for Expression {
    fn from(e: &AnnotatedExpression) -> Self {
        match e {
            AnnotatedExpression::Atomic(a, _) => Expression::Atomic(a.clone()),
            AnnotatedExpression::Unary(op, e, _) =>
                Expression::Unary(*op, Box::new(e.as_ref().into())),
            AnnotatedExpression::Binary(op, e1, e2, _) => Expression::Binary(
                *op,
                Box::new(e1.as_ref().into()),
                Box::new(e2.as_ref().into()),
            ),
            AnnotatedExpression::Logical(op, e1, e2, _) => Expression::Logical(
                *op,
                Box::new(e1.as_ref().into()),
                Box::new(e2.as_ref().into()),
            ),
            AnnotatedExpression::List(es, _) =>
                Expression::List(es.iter().map(|e| e.into()).collect()),
            AnnotatedExpression::Index(obj, idx, _) => Expression::Index(
                Box::new(obj.as_ref().into()),
                Box::new(idx.as_ref().into()),
            ),
            AnnotatedExpression::Calc { op, args, .. } => Expression::Calc {
                op: op.clone(),
                args: args.iter().map(|e| e.into()).collect(),
            },
            AnnotatedExpression::Web(tag) => Expression::Web(tag.into()),
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct AnnotatedWebTag {
    pub name: String,
    pub props: AnnotatedObjectLiteral,
    pub children: Vec<AnnotatedExpression>,
    pub error_info: ErrorInfo,
}

impl From<&AnnotatedWebTag> for WebTag {
    fn from(tag: &AnnotatedWebTag) -> Self {
        WebTag {
            name: tag.name.clone(),
            props: (&tag.props).into(),
            children: tag.children.iter().map(|e| e.into()).collect(),
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct AnnotatedObjectLiteral {
    pub entries: Vec<(String, AnnotatedExpression)>,
    pub error_info: ErrorInfo,
}

impl From<&AnnotatedObjectLiteral> for ObjectLiteral {
    fn from(obj: &AnnotatedObjectLiteral) -> Self {
        ObjectLiteral {
            entries: obj.entries.iter().map(|(k, v)| (k.clone(), v.into())).collect(),
        }
    }
}
