//! # Symbolic Engine Module
//!
//! Core expression type of the crate: an immutable tree of real-valued
//! mathematical expressions over named variables.
//!
//! ## Purpose
//!
//! The engine allows users to:
//! - Build expressions from variables, constants, arithmetic operators and
//!   the transcendental functions `Sqrt`, `Exp`, `Log`, `Sinh`, `Cosh`, `Tanh`
//! - Query free variables, constantness and polynomial degree
//! - Evaluate under variable bindings (see `symbolic_eval`)
//! - Simplify algebraically (see `symbolic_simplify`)
//! - Differentiate analytically (see `symbolic_engine_derivatives`)
//!
//! ## Main Structures and Methods
//!
//! ### `Expr` Enum
//! One flat enum with fourteen variants. Children are held behind `Arc<Expr>`,
//! so rewriting produces new trees that share untouched subtrees with the
//! input, and any tree can be read from several threads at once.
//!
//! ### Key Methods
//! - `Symbols(symbols: &str)` - Create multiple variables from comma-separated string
//! - `variables()`, `is_constant()`, `polynomial_degree()`, `is_polynomial()`
//! - `with_name`, `with_value`, `with_operand`, `with_left`, `with_right`,
//!   `with_argument` - copy with one field replaced
//! - `set_variable()` / `substitute_variable()` - substitution
//!
//! ## Interesting Code Features
//!
//! 1. **Operator Overloading**: `+ - * /`, unary `-` and `^` (power) build nodes
//!    directly, mixing expressions and bare `f64` numbers: `2.0 * x + (y ^ 3.0)`
//!
//! 2. **Structural Equality**: derived `PartialEq` compares kind and children
//!    recursively, constants by exact floating value
//!
//! 3. **Macro System**: `symbols!(x, y, z)` for ergonomic variable creation

use crate::symbolic::symbolic_functions::{BinaryOp, Function};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

/// Symbolic expression node.
///
/// # Examples
/// ```rust, ignore
/// use RustedSymbolic::symbolic::symbolic_engine::Expr;
/// let x = Expr::var("x");
/// let expr = Expr::Add(x.shared(), Expr::Const(2.0).shared());
/// assert_eq!(expr.to_string(), "(x + 2)");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// Named variable
    Var(String),
    /// Numerical constant
    Const(f64),
    /// Unary negation: -operand
    Neg(Arc<Expr>),
    /// left + right
    Add(Arc<Expr>, Arc<Expr>),
    /// left - right
    Sub(Arc<Expr>, Arc<Expr>),
    /// left * right
    Mul(Arc<Expr>, Arc<Expr>),
    /// left / right
    Div(Arc<Expr>, Arc<Expr>),
    /// base ^ exponent
    Pow(Arc<Expr>, Arc<Expr>),
    /// Square root
    Sqrt(Arc<Expr>),
    /// e^x
    Exp(Arc<Expr>),
    /// Natural logarithm
    Log(Arc<Expr>),
    Sinh(Arc<Expr>),
    Cosh(Arc<Expr>),
    Tanh(Arc<Expr>),
}

impl From<f64> for Expr {
    fn from(value: f64) -> Self {
        Expr::Const(value)
    }
}

//___________________________________OPERATORS____________________________________

macro_rules! impl_binary_operator {
    ($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $variant:ident) => {
        impl<T: Into<Expr>> std::ops::$trait<T> for Expr {
            type Output = Expr;

            fn $method(self, rhs: T) -> Expr {
                Expr::$variant(self.shared(), rhs.into().shared())
            }
        }

        impl std::ops::$trait<Expr> for f64 {
            type Output = Expr;

            fn $method(self, rhs: Expr) -> Expr {
                Expr::$variant(Expr::Const(self).shared(), rhs.shared())
            }
        }

        impl std::ops::$trait<&Expr> for &Expr {
            type Output = Expr;

            fn $method(self, rhs: &Expr) -> Expr {
                Expr::$variant(self.clone().shared(), rhs.clone().shared())
            }
        }

        impl<T: Into<Expr>> std::ops::$assign_trait<T> for Expr {
            fn $assign_method(&mut self, rhs: T) {
                let lhs = std::mem::replace(self, Expr::zero());
                *self = Expr::$variant(lhs.shared(), rhs.into().shared());
            }
        }
    };
}

impl_binary_operator!(Add, add, AddAssign, add_assign, Add);
impl_binary_operator!(Sub, sub, SubAssign, sub_assign, Sub);
impl_binary_operator!(Mul, mul, MulAssign, mul_assign, Mul);
impl_binary_operator!(Div, div, DivAssign, div_assign, Div);
// `^` is power, not xor
impl_binary_operator!(BitXor, bitxor, BitXorAssign, bitxor_assign, Pow);

impl std::ops::Neg for Expr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Expr::Neg(self.shared())
    }
}

impl std::ops::Neg for &Expr {
    type Output = Expr;

    fn neg(self) -> Expr {
        Expr::Neg(self.clone().shared())
    }
}

impl Expr {
    /// BASIC FEATURES

    /// Creates multiple symbolic variables from a comma-separated string.
    ///
    /// Whitespace is trimmed and empty entries are skipped.
    ///
    /// # Arguments
    /// * `symbols` - Comma-separated string of variable names (e.g., "x, y, z")
    ///
    /// # Returns
    /// Vector of `Expr::Var` for each name, in order
    ///
    /// # Examples
    /// ```rust, ignore
    /// let vars = Expr::Symbols("x, y, z");
    /// assert_eq!(vars.len(), 3);
    /// ```
    pub fn Symbols(symbols: &str) -> Vec<Expr> {
        symbols
            .split(',')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(Expr::var)
            .collect()
    }

    pub fn var(name: &str) -> Expr {
        Expr::Var(name.to_string())
    }

    pub fn constant(value: f64) -> Expr {
        Expr::Const(value)
    }

    pub fn zero() -> Expr {
        Expr::Const(0.0)
    }

    pub fn one() -> Expr {
        Expr::Const(1.0)
    }

    /// Moves the expression behind an `Arc` so it can become a child node.
    pub fn shared(self) -> Arc<Expr> {
        Arc::new(self)
    }

    pub fn sqrt<T: Into<Expr>>(argument: T) -> Expr {
        Function::Sqrt.apply(argument)
    }

    pub fn exp<T: Into<Expr>>(argument: T) -> Expr {
        Function::Exp.apply(argument)
    }

    /// Natural logarithm
    pub fn log<T: Into<Expr>>(argument: T) -> Expr {
        Function::Log.apply(argument)
    }

    pub fn sinh<T: Into<Expr>>(argument: T) -> Expr {
        Function::Sinh.apply(argument)
    }

    pub fn cosh<T: Into<Expr>>(argument: T) -> Expr {
        Function::Cosh.apply(argument)
    }

    pub fn tanh<T: Into<Expr>>(argument: T) -> Expr {
        Function::Tanh.apply(argument)
    }

    /// Raises the expression to a power: `self ^ exponent`.
    pub fn pow<T: Into<Expr>>(self, exponent: T) -> Expr {
        Expr::Pow(self.shared(), exponent.into().shared())
    }

    pub fn is_zero(&self) -> bool {
        matches!(self, Expr::Const(value) if *value == 0.0)
    }

    pub fn is_one(&self) -> bool {
        matches!(self, Expr::Const(value) if *value == 1.0)
    }

    //___________________________________FAMILIES____________________________________

    /// Operator kind and children of a binary node, `None` for any other variant.
    pub fn binary_parts(&self) -> Option<(BinaryOp, &Arc<Expr>, &Arc<Expr>)> {
        match self {
            Expr::Add(lhs, rhs) => Some((BinaryOp::Add, lhs, rhs)),
            Expr::Sub(lhs, rhs) => Some((BinaryOp::Sub, lhs, rhs)),
            Expr::Mul(lhs, rhs) => Some((BinaryOp::Mul, lhs, rhs)),
            Expr::Div(lhs, rhs) => Some((BinaryOp::Div, lhs, rhs)),
            Expr::Pow(lhs, rhs) => Some((BinaryOp::Pow, lhs, rhs)),
            _ => None,
        }
    }

    /// Function kind and argument of a function node, `None` for any other variant.
    pub fn function_parts(&self) -> Option<(Function, &Arc<Expr>)> {
        match self {
            Expr::Sqrt(arg) => Some((Function::Sqrt, arg)),
            Expr::Exp(arg) => Some((Function::Exp, arg)),
            Expr::Log(arg) => Some((Function::Log, arg)),
            Expr::Sinh(arg) => Some((Function::Sinh, arg)),
            Expr::Cosh(arg) => Some((Function::Cosh, arg)),
            Expr::Tanh(arg) => Some((Function::Tanh, arg)),
            _ => None,
        }
    }

    //___________________________________QUERIES____________________________________

    /// Set of distinct variable names occurring anywhere in the tree.
    pub fn variables(&self) -> BTreeSet<String> {
        let mut names = BTreeSet::new();
        self.collect_variables(&mut names);
        names
    }

    fn collect_variables(&self, names: &mut BTreeSet<String>) {
        match self {
            Expr::Var(name) => {
                if !names.contains(name) {
                    names.insert(name.clone());
                }
            }
            Expr::Const(_) => {}
            Expr::Add(lhs, rhs)
            | Expr::Sub(lhs, rhs)
            | Expr::Mul(lhs, rhs)
            | Expr::Div(lhs, rhs)
            | Expr::Pow(lhs, rhs) => {
                lhs.collect_variables(names);
                rhs.collect_variables(names);
            }
            Expr::Neg(arg)
            | Expr::Sqrt(arg)
            | Expr::Exp(arg)
            | Expr::Log(arg)
            | Expr::Sinh(arg)
            | Expr::Cosh(arg)
            | Expr::Tanh(arg) => arg.collect_variables(names),
        }
    }

    /// True if the variable `name` occurs anywhere in the tree.
    /// Stops at the first occurrence.
    pub fn depends_on(&self, name: &str) -> bool {
        match self {
            Expr::Var(var) => var == name,
            Expr::Const(_) => false,
            Expr::Add(lhs, rhs)
            | Expr::Sub(lhs, rhs)
            | Expr::Mul(lhs, rhs)
            | Expr::Div(lhs, rhs)
            | Expr::Pow(lhs, rhs) => lhs.depends_on(name) || rhs.depends_on(name),
            Expr::Neg(arg)
            | Expr::Sqrt(arg)
            | Expr::Exp(arg)
            | Expr::Log(arg)
            | Expr::Sinh(arg)
            | Expr::Cosh(arg)
            | Expr::Tanh(arg) => arg.depends_on(name),
        }
    }

    /// True iff the expression has no free variables.
    pub fn is_constant(&self) -> bool {
        match self {
            Expr::Var(_) => false,
            Expr::Const(_) => true,
            Expr::Add(lhs, rhs)
            | Expr::Sub(lhs, rhs)
            | Expr::Mul(lhs, rhs)
            | Expr::Div(lhs, rhs)
            | Expr::Pow(lhs, rhs) => lhs.is_constant() && rhs.is_constant(),
            Expr::Neg(arg)
            | Expr::Sqrt(arg)
            | Expr::Exp(arg)
            | Expr::Log(arg)
            | Expr::Sinh(arg)
            | Expr::Cosh(arg)
            | Expr::Tanh(arg) => arg.is_constant(),
        }
    }

    /// Structural polynomial degree, or `None` if the expression is not a
    /// polynomial in its variables.
    ///
    /// - variable: 1, constant: 0
    /// - `+`/`-`: maximum of the operands, `*`: sum of the operands
    /// - `/`: degree of the numerator when the denominator has no variables
    /// - `^`: base degree times the exponent when the exponent is a literal
    ///   non-negative integer constant
    /// - functions: 0 when the argument has no variables
    pub fn polynomial_degree(&self) -> Option<u32> {
        match self {
            Expr::Var(_) => Some(1),
            Expr::Const(_) => Some(0),
            Expr::Neg(arg) => arg.polynomial_degree(),
            Expr::Add(lhs, rhs) | Expr::Sub(lhs, rhs) => {
                Some(lhs.polynomial_degree()?.max(rhs.polynomial_degree()?))
            }
            Expr::Mul(lhs, rhs) => lhs
                .polynomial_degree()?
                .checked_add(rhs.polynomial_degree()?),
            Expr::Div(lhs, rhs) => {
                if rhs.is_constant() {
                    lhs.polynomial_degree()
                } else {
                    None
                }
            }
            Expr::Pow(base, exponent) => match exponent.as_ref() {
                Expr::Const(power)
                    if power.is_finite()
                        && *power >= 0.0
                        && power.fract() == 0.0
                        && *power <= u32::MAX as f64 =>
                {
                    base.polynomial_degree()?.checked_mul(*power as u32)
                }
                _ => None,
            },
            Expr::Sqrt(arg)
            | Expr::Exp(arg)
            | Expr::Log(arg)
            | Expr::Sinh(arg)
            | Expr::Cosh(arg)
            | Expr::Tanh(arg) => {
                if arg.is_constant() {
                    Some(0)
                } else {
                    None
                }
            }
        }
    }

    pub fn is_polynomial(&self) -> bool {
        self.polynomial_degree().is_some()
    }

    /// Number of nodes in the tree, counting shared subtrees once per occurrence.
    pub fn node_count(&self) -> usize {
        match self {
            Expr::Var(_) | Expr::Const(_) => 1,
            Expr::Add(lhs, rhs)
            | Expr::Sub(lhs, rhs)
            | Expr::Mul(lhs, rhs)
            | Expr::Div(lhs, rhs)
            | Expr::Pow(lhs, rhs) => 1 + lhs.node_count() + rhs.node_count(),
            Expr::Neg(arg)
            | Expr::Sqrt(arg)
            | Expr::Exp(arg)
            | Expr::Log(arg)
            | Expr::Sinh(arg)
            | Expr::Cosh(arg)
            | Expr::Tanh(arg) => 1 + arg.node_count(),
        }
    }

    /// Length of the longest root-to-leaf path; a leaf has depth 1.
    pub fn depth(&self) -> usize {
        match self {
            Expr::Var(_) | Expr::Const(_) => 1,
            Expr::Add(lhs, rhs)
            | Expr::Sub(lhs, rhs)
            | Expr::Mul(lhs, rhs)
            | Expr::Div(lhs, rhs)
            | Expr::Pow(lhs, rhs) => 1 + lhs.depth().max(rhs.depth()),
            Expr::Neg(arg)
            | Expr::Sqrt(arg)
            | Expr::Exp(arg)
            | Expr::Log(arg)
            | Expr::Sinh(arg)
            | Expr::Cosh(arg)
            | Expr::Tanh(arg) => 1 + arg.depth(),
        }
    }

    //___________________________________UPDATES____________________________________
    // Each helper returns a new node; the receiver is never modified. A field the
    // variant does not have leaves the expression unchanged.

    /// Copy of a variable with another name.
    pub fn with_name(&self, name: &str) -> Expr {
        match self {
            Expr::Var(_) => Expr::var(name),
            _ => self.clone(),
        }
    }

    /// Copy of a constant with another value.
    pub fn with_value(&self, value: f64) -> Expr {
        match self {
            Expr::Const(_) => Expr::Const(value),
            _ => self.clone(),
        }
    }

    /// Copy of a negation with another operand.
    pub fn with_operand(&self, operand: Expr) -> Expr {
        match self {
            Expr::Neg(_) => Expr::Neg(operand.shared()),
            _ => self.clone(),
        }
    }

    /// Copy of a binary node with another left child; the right child is shared.
    pub fn with_left(&self, left: Expr) -> Expr {
        match self.binary_parts() {
            Some((op, _, rhs)) => op.build(left.shared(), rhs.clone()),
            None => self.clone(),
        }
    }

    /// Copy of a binary node with another right child; the left child is shared.
    pub fn with_right(&self, right: Expr) -> Expr {
        match self.binary_parts() {
            Some((op, lhs, _)) => op.build(lhs.clone(), right.shared()),
            None => self.clone(),
        }
    }

    /// Copy of a function node with another argument.
    pub fn with_argument(&self, argument: Expr) -> Expr {
        match self.function_parts() {
            Some((function, _)) => function.build(argument.shared()),
            None => self.clone(),
        }
    }

    //___________________________________SUBSTITUTION____________________________________

    /// Rebuilds the node with every direct child passed through `f`.
    /// Leaves are returned as they are.
    fn map_children<F: FnMut(&Expr) -> Expr>(&self, mut f: F) -> Expr {
        if let Some((op, lhs, rhs)) = self.binary_parts() {
            return op.build(f(lhs).shared(), f(rhs).shared());
        }
        if let Some((function, arg)) = self.function_parts() {
            return function.build(f(arg).shared());
        }
        match self {
            Expr::Neg(arg) => Expr::Neg(f(arg).shared()),
            _ => self.clone(),
        }
    }

    /// Substitutes a variable with a constant value throughout the expression.
    ///
    /// # Arguments
    /// * `var` - Name of the variable to substitute
    /// * `value` - Numerical value to substitute for the variable
    ///
    /// # Returns
    /// New expression with the variable substituted
    pub fn set_variable(&self, var: &str, value: f64) -> Expr {
        match self {
            Expr::Var(name) if name == var => Expr::Const(value),
            _ => self.map_children(|child| child.set_variable(var, value)),
        }
    }

    /// Substitutes every variable found in `values` with its constant.
    /// Variables without an entry stay symbolic.
    pub fn set_variables(&self, values: &HashMap<String, f64>) -> Expr {
        match self {
            Expr::Var(name) => match values.get(name) {
                Some(value) => Expr::Const(*value),
                None => self.clone(),
            },
            _ => self.map_children(|child| child.set_variables(values)),
        }
    }

    /// Replaces every occurrence of the variable `var` with `replacement`.
    pub fn substitute_variable(&self, var: &str, replacement: &Expr) -> Expr {
        match self {
            Expr::Var(name) if name == var => replacement.clone(),
            _ => self.map_children(|child| child.substitute_variable(var, replacement)),
        }
    }
}

//___________________________________MACROS____________________________________

/// Macro to create symbolic variables from a comma-separated list
/// Usage: symbols!(x, y, z) -> creates variables x, y, z
#[macro_export]
macro_rules! symbols {
    ($($var:ident),+ $(,)?) => {
        {
            let var_names = stringify!($($var),+);
            let vars = $crate::symbolic::symbolic_engine::Expr::Symbols(var_names);
            let mut iter = vars.into_iter();
            ($(
                {
                    let $var = iter.next().unwrap();
                    $var
                }
            ),+)
        }
    };
}
