use crate::ntlang::common::utils::mk_string;
use crate::ntlang::interpreted::ast::DeclaredType;

/// A runtime value. Note there is no Natural variant: naturality is a
/// property of the declared type of the symbol a value is bound to, and is
/// enforced on every write to such a symbol.
#[derive(Debug, PartialEq, Clone)]
pub enum Value {
    Inteiro(i64),
    Real(f64),
    Texto(String),
    Logico(bool),
    Lista(Vec<Value>),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Inteiro(_) => "INTEIRO",
            Value::Real(_) => "REAL",
            Value::Texto(_) => "TEXTO",
            Value::Logico(_) => "LOGICO",
            Value::Lista(_) => "LISTA",
        }
    }

    /// The user-facing rendering. Reals use the Portuguese comma decimal
    /// separator; integral reals drop their decimal part.
    pub fn stringify(&self) -> String {
        match self {
            Value::Inteiro(n) => n.to_string(),
            Value::Real(r) =>
                if r.fract() == 0.0 && r.is_finite() {
                    (*r as i64).to_string()
                } else {
                    r.to_string().replace('.', ",")
                },
            Value::Texto(s) => s.to_owned(),
            Value::Logico(true) => "VERDADEIRO".to_owned(),
            Value::Logico(false) => "FALSO".to_owned(),
            Value::Lista(vs) =>
                format!("[{}]", mk_string(vs.iter().map(|v| v.stringify()), ", ")),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Inteiro(n) => Some(*n as f64),
            Value::Real(r) => Some(*r),
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool { self.as_number().is_some() }

    /// Equality used by `==`/`!=`: numbers compare numerically across the
    /// integer/real divide, everything else compares within its own shape.
    pub fn equal_values(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Texto(s1), Value::Texto(s2)) => s1 == s2,
            (Value::Logico(b1), Value::Logico(b2)) => b1 == b2,
            (Value::Lista(v1), Value::Lista(v2)) =>
                v1.len() == v2.len()
                    && v1.iter().zip(v2.iter()).all(|(a, b)| a.equal_values(b)),
            _ => match (self.as_number(), other.as_number()) {
                (Some(n1), Some(n2)) => n1 == n2,
                _ => false,
            },
        }
    }
}

impl DeclaredType {
    /// The value a declaration takes when its initializer is omitted.
    pub fn zero_value(&self) -> Value {
        match self {
            DeclaredType::Inteiro | DeclaredType::Natural => Value::Inteiro(0),
            DeclaredType::Real => Value::Real(0.0),
            DeclaredType::Texto => Value::Texto(String::new()),
            DeclaredType::Logico => Value::Logico(false),
            DeclaredType::Lista => Value::Lista(Vec::new()),
        }
    }

    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            DeclaredType::Inteiro => matches!(value, Value::Inteiro(_)),
            DeclaredType::Natural => matches!(value, Value::Inteiro(n) if *n >= 0),
            DeclaredType::Real => value.is_numeric(),
            DeclaredType::Texto => matches!(value, Value::Texto(_)),
            DeclaredType::Logico => matches!(value, Value::Logico(_)),
            DeclaredType::Lista => matches!(value, Value::Lista(_)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reals_render_with_comma() {
        assert_eq!(Value::Real(3.14).stringify(), "3,14");
    }

    #[test]
    fn integral_reals_render_without_decimal_part() {
        assert_eq!(Value::Real(3.0).stringify(), "3");
    }

    #[test]
    fn booleans_render_as_keywords() {
        assert_eq!(Value::Logico(true).stringify(), "VERDADEIRO");
        assert_eq!(Value::Logico(false).stringify(), "FALSO");
    }

    #[test]
    fn lists_render_elementwise() {
        let list = Value::Lista(vec![
            Value::Inteiro(1),
            Value::Texto("dois".to_owned()),
            Value::Real(2.5),
        ]);
        assert_eq!(list.stringify(), "[1, dois, 2,5]");
    }

    #[test]
    fn natural_accepts_only_non_negative_integers() {
        assert!(DeclaredType::Natural.accepts(&Value::Inteiro(0)));
        assert!(DeclaredType::Natural.accepts(&Value::Inteiro(7)));
        assert!(!DeclaredType::Natural.accepts(&Value::Inteiro(-1)));
        assert!(!DeclaredType::Natural.accepts(&Value::Real(1.0)));
    }

    #[test]
    fn real_accepts_integers() {
        assert!(DeclaredType::Real.accepts(&Value::Inteiro(2)));
        assert!(DeclaredType::Real.accepts(&Value::Real(2.5)));
        assert!(!DeclaredType::Real.accepts(&Value::Texto("2".to_owned())));
    }

    #[test]
    fn cross_shape_numeric_equality() {
        assert!(Value::Inteiro(2).equal_values(&Value::Real(2.0)));
        assert!(!Value::Inteiro(2).equal_values(&Value::Texto("2".to_owned())));
    }
}
