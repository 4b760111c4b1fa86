//! Numeric evaluation of expressions under variable bindings.
//!
//! Evaluation is a post-order walk: children first, then the node's own
//! combining or single-argument function. Floating-point semantics are plain
//! IEEE-754, so `1/0` is infinite and `Log(-1)` is NaN; the only failure is a
//! variable without a binding.

use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::symbolic_errors::EvalError;
use crate::symbolic::symbolic_functions::{BinaryOp, Function};
use crate::symbolic::symbolic_visitor::ExprVisitor;
use std::collections::HashMap;
use std::sync::Arc;

pub struct Evaluator<'a> {
    bindings: &'a HashMap<String, f64>,
}

impl<'a> Evaluator<'a> {
    pub fn new(bindings: &'a HashMap<String, f64>) -> Self {
        Self { bindings }
    }

    fn binary(&mut self, op: BinaryOp, left: &Expr, right: &Expr) -> Result<f64, EvalError> {
        let left = left.accept(self)?;
        let right = right.accept(self)?;
        Ok(op.compute_for(left, right))
    }

    fn function(&mut self, function: Function, argument: &Expr) -> Result<f64, EvalError> {
        Ok(function.compute_for(argument.accept(self)?))
    }
}

impl ExprVisitor for Evaluator<'_> {
    type Output = Result<f64, EvalError>;

    fn visit_var(&mut self, name: &str) -> Self::Output {
        self.bindings
            .get(name)
            .copied()
            .ok_or_else(|| EvalError::UnboundVariable(name.to_string()))
    }

    fn visit_const(&mut self, value: f64) -> Self::Output {
        Ok(value)
    }

    fn visit_neg(&mut self, operand: &Arc<Expr>) -> Self::Output {
        Ok(-operand.accept(self)?)
    }

    fn visit_add(&mut self, left: &Arc<Expr>, right: &Arc<Expr>) -> Self::Output {
        self.binary(BinaryOp::Add, left, right)
    }

    fn visit_sub(&mut self, left: &Arc<Expr>, right: &Arc<Expr>) -> Self::Output {
        self.binary(BinaryOp::Sub, left, right)
    }

    fn visit_mul(&mut self, left: &Arc<Expr>, right: &Arc<Expr>) -> Self::Output {
        self.binary(BinaryOp::Mul, left, right)
    }

    fn visit_div(&mut self, left: &Arc<Expr>, right: &Arc<Expr>) -> Self::Output {
        self.binary(BinaryOp::Div, left, right)
    }

    fn visit_pow(&mut self, base: &Arc<Expr>, exponent: &Arc<Expr>) -> Self::Output {
        self.binary(BinaryOp::Pow, base, exponent)
    }

    fn visit_sqrt(&mut self, argument: &Arc<Expr>) -> Self::Output {
        self.function(Function::Sqrt, argument)
    }

    fn visit_exp(&mut self, argument: &Arc<Expr>) -> Self::Output {
        self.function(Function::Exp, argument)
    }

    fn visit_log(&mut self, argument: &Arc<Expr>) -> Self::Output {
        self.function(Function::Log, argument)
    }

    fn visit_sinh(&mut self, argument: &Arc<Expr>) -> Self::Output {
        self.function(Function::Sinh, argument)
    }

    fn visit_cosh(&mut self, argument: &Arc<Expr>) -> Self::Output {
        self.function(Function::Cosh, argument)
    }

    fn visit_tanh(&mut self, argument: &Arc<Expr>) -> Self::Output {
        self.function(Function::Tanh, argument)
    }
}

impl Expr {
    /// Evaluates the expression with the given variable values.
    ///
    /// # Arguments
    /// * `bindings` - value of every variable the expression references
    ///
    /// # Returns
    /// The numeric value, or `EvalError::UnboundVariable` naming the first
    /// variable without a binding. Extra bindings are ignored.
    pub fn compute(&self, bindings: &HashMap<String, f64>) -> Result<f64, EvalError> {
        self.accept(&mut Evaluator::new(bindings))
    }

    /// Same as [`Expr::compute`] with the bindings given as `(name, value)` pairs.
    pub fn compute_with(&self, bindings: &[(&str, f64)]) -> Result<f64, EvalError> {
        let bindings: HashMap<String, f64> = bindings
            .iter()
            .map(|(name, value)| (name.to_string(), *value))
            .collect();
        self.compute(&bindings)
    }

    /// Evaluates an expression that must not reference any variable.
    pub fn compute_constant(&self) -> Result<f64, EvalError> {
        self.compute(&HashMap::new())
    }

    /// Value of a variable-free expression, `None` when a variable occurs.
    pub fn try_compute_constant(&self) -> Option<f64> {
        self.compute_constant().ok()
    }
}
