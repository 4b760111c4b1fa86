//! # Operator and Function Families
//!
//! The closed expression set contains two sub-families that share behaviour:
//!
//! - [`BinaryOp`]: `+ - * / ^`, each with a display alias and a numeric
//!   combining function
//! - [`Function`]: `Sqrt`, `Exp`, `Log`, `Sinh`, `Cosh`, `Tanh`, each with a
//!   display name, a numeric single-argument function and a fixed outer
//!   derivative with respect to its own argument
//!
//! These descriptors let the evaluator, the renderer and the `with_*` update
//! helpers treat a whole family uniformly while `Expr` itself stays one flat
//! enum that every algorithm matches exhaustively.

use crate::symbolic::symbolic_engine::Expr;
use std::sync::Arc;
use strum_macros::{Display, EnumIter, IntoStaticStr};

/// Binary operator kind of an `Add`/`Sub`/`Mul`/`Div`/`Pow` node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinaryOp {
    /// Infix symbol used by the canonical rendering
    pub fn alias(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Pow => "^",
        }
    }

    /// Numeric combining function. Division by zero and `pow` outside its
    /// real domain follow IEEE-754 and never fail.
    pub fn compute_for(&self, left: f64, right: f64) -> f64 {
        match self {
            BinaryOp::Add => left + right,
            BinaryOp::Sub => left - right,
            BinaryOp::Mul => left * right,
            BinaryOp::Div => left / right,
            BinaryOp::Pow => left.powf(right),
        }
    }

    /// Builds the node of this kind over already shared children.
    pub fn build(&self, left: Arc<Expr>, right: Arc<Expr>) -> Expr {
        match self {
            BinaryOp::Add => Expr::Add(left, right),
            BinaryOp::Sub => Expr::Sub(left, right),
            BinaryOp::Mul => Expr::Mul(left, right),
            BinaryOp::Div => Expr::Div(left, right),
            BinaryOp::Pow => Expr::Pow(left, right),
        }
    }
}

/// Transcendental function kind of a `Sqrt`/`Exp`/`Log`/`Sinh`/`Cosh`/`Tanh` node.
///
/// `Display` (and [`Function::name`]) yields the name used in the canonical
/// rendering, e.g. `Sqrt(x)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, Display, IntoStaticStr)]
pub enum Function {
    Sqrt,
    Exp,
    Log,
    Sinh,
    Cosh,
    Tanh,
}

impl Function {
    pub fn name(&self) -> &'static str {
        self.into()
    }

    /// Numeric single-argument function; `Log` and `Sqrt` of negative
    /// arguments give NaN rather than an error.
    pub fn compute_for(&self, value: f64) -> f64 {
        match self {
            Function::Sqrt => value.sqrt(),
            Function::Exp => value.exp(),
            Function::Log => value.ln(),
            Function::Sinh => value.sinh(),
            Function::Cosh => value.cosh(),
            Function::Tanh => value.tanh(),
        }
    }

    /// Builds the node of this kind over an already shared argument.
    pub fn build(&self, argument: Arc<Expr>) -> Expr {
        match self {
            Function::Sqrt => Expr::Sqrt(argument),
            Function::Exp => Expr::Exp(argument),
            Function::Log => Expr::Log(argument),
            Function::Sinh => Expr::Sinh(argument),
            Function::Cosh => Expr::Cosh(argument),
            Function::Tanh => Expr::Tanh(argument),
        }
    }

    /// Applies the function to an expression or a bare number.
    pub fn apply<T: Into<Expr>>(&self, argument: T) -> Expr {
        self.build(argument.into().shared())
    }

    /// Derivative of the function with respect to its own argument `a`,
    /// i.e. `f'(a)`; the chain rule multiplies it by `D(a)`.
    ///
    /// - sqrt: `0.5 / sqrt(a)`
    /// - exp:  `exp(a)`
    /// - log:  `1 / a`
    /// - sinh: `cosh(a)`
    /// - cosh: `sinh(a)`
    /// - tanh: `1 - tanh(a)^2`
    pub fn outer_derivative(&self, argument: &Arc<Expr>) -> Expr {
        match self {
            Function::Sqrt => Expr::Div(
                Expr::Const(0.5).shared(),
                Expr::Sqrt(argument.clone()).shared(),
            ),
            Function::Exp => Expr::Exp(argument.clone()),
            Function::Log => Expr::Div(Expr::one().shared(), argument.clone()),
            Function::Sinh => Expr::Cosh(argument.clone()),
            Function::Cosh => Expr::Sinh(argument.clone()),
            Function::Tanh => Expr::Sub(
                Expr::one().shared(),
                Expr::Pow(
                    Expr::Tanh(argument.clone()).shared(),
                    Expr::Const(2.0).shared(),
                )
                .shared(),
            ),
        }
    }
}
