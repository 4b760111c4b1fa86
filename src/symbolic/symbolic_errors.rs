use std::fmt;

/// Failure of a numeric evaluation or of an operation the expression set
/// does not support.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    /// A variable reached during evaluation has no binding; carries its name.
    UnboundVariable(String),
    /// The requested operation is not defined for this expression.
    Unsupported(String),
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::UnboundVariable(name) => {
                write!(f, "no value bound for variable '{}'", name)
            }
            EvalError::Unsupported(what) => write!(f, "unsupported operation: {}", what),
        }
    }
}

impl std::error::Error for EvalError {}
