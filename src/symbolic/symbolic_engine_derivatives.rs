//! # Symbolic Engine Derivatives Module
//!
//! Analytical differentiation of expressions and numeric validation of the
//! results.
//!
//! ## Key Methods
//!
//! ### Differentiation
//! - `derivative(var: &str)` - partial derivative, not simplified
//! - `derivative_by(var: &Expr)` - same, with the variable given as an expression
//! - `n_th_derivative(var, n)` - higher-order derivatives, simplified after each step
//! - `diff_multi()` - all partial derivatives at once, in parallel
//!
//! ### Numerical Analysis
//! - `compare_num1D()` - compare the analytic derivative with a central
//!   difference on a linspace
//!
//! ## Rules
//!
//! With `D` the derivative with respect to `v`:
//! - `D(v) = 1`, `D(w) = 0` for any other variable, `D(c) = 0`
//! - `D(-a) = -D(a)`, `D(a ± b) = D(a) ± D(b)`
//! - `D(a*b) = D(a)*b + a*D(b)`
//! - `D(a/b) = (D(a)*b - a*D(b)) / b^2`
//! - `D(a^b) = a^b * (D(b)*Log(a) + (b/a)*D(a))`
//! - `D(f(a)) = D(a) * f'(a)` for the six functions
//!
//! Any subtree that does not contain `v` differentiates straight to `0`
//! without being walked.

use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::symbolic_errors::EvalError;
use crate::symbolic::symbolic_functions::Function;
use crate::symbolic::symbolic_visitor::ExprVisitor;
use crate::symbolic::utils::{linspace, norm, numerical_derivative};
use log::debug;
use rayon::prelude::*;
use std::sync::Arc;

/// Differentiation with respect to one variable, as a rebuilding visitor.
pub struct Differentiator<'a> {
    var: &'a str,
}

impl<'a> Differentiator<'a> {
    pub fn new(var: &'a str) -> Self {
        Self { var }
    }

    pub fn derive(&mut self, expr: &Expr) -> Expr {
        if !expr.depends_on(self.var) {
            return Expr::zero();
        }
        expr.accept(self)
    }

    fn chain(&mut self, function: Function, argument: &Arc<Expr>) -> Expr {
        let inner = self.derive(argument);
        Expr::Mul(inner.shared(), function.outer_derivative(argument).shared())
    }
}

impl ExprVisitor for Differentiator<'_> {
    type Output = Expr;

    fn visit_var(&mut self, name: &str) -> Expr {
        if name == self.var {
            Expr::one()
        } else {
            Expr::zero()
        }
    }

    fn visit_const(&mut self, _value: f64) -> Expr {
        Expr::zero()
    }

    fn visit_neg(&mut self, operand: &Arc<Expr>) -> Expr {
        Expr::Neg(self.derive(operand).shared())
    }

    fn visit_add(&mut self, left: &Arc<Expr>, right: &Arc<Expr>) -> Expr {
        Expr::Add(self.derive(left).shared(), self.derive(right).shared())
    }

    fn visit_sub(&mut self, left: &Arc<Expr>, right: &Arc<Expr>) -> Expr {
        Expr::Sub(self.derive(left).shared(), self.derive(right).shared())
    }

    fn visit_mul(&mut self, left: &Arc<Expr>, right: &Arc<Expr>) -> Expr {
        // product rule
        let d_left = self.derive(left).shared();
        let d_right = self.derive(right).shared();
        Expr::Add(
            Expr::Mul(d_left, right.clone()).shared(),
            Expr::Mul(left.clone(), d_right).shared(),
        )
    }

    fn visit_div(&mut self, left: &Arc<Expr>, right: &Arc<Expr>) -> Expr {
        // quotient rule
        let d_left = self.derive(left).shared();
        let d_right = self.derive(right).shared();
        let numerator = Expr::Sub(
            Expr::Mul(d_left, right.clone()).shared(),
            Expr::Mul(left.clone(), d_right).shared(),
        );
        let denominator = Expr::Pow(right.clone(), Expr::Const(2.0).shared());
        Expr::Div(numerator.shared(), denominator.shared())
    }

    fn visit_pow(&mut self, base: &Arc<Expr>, exponent: &Arc<Expr>) -> Expr {
        // generalized power rule, valid for variable base and exponent alike
        let d_base = self.derive(base).shared();
        let d_exponent = self.derive(exponent).shared();
        let power = Expr::Pow(base.clone(), exponent.clone());
        let from_exponent = Expr::Mul(d_exponent, Expr::Log(base.clone()).shared());
        let from_base = Expr::Mul(Expr::Div(exponent.clone(), base.clone()).shared(), d_base);
        Expr::Mul(
            power.shared(),
            Expr::Add(from_exponent.shared(), from_base.shared()).shared(),
        )
    }

    fn visit_sqrt(&mut self, argument: &Arc<Expr>) -> Expr {
        self.chain(Function::Sqrt, argument)
    }

    fn visit_exp(&mut self, argument: &Arc<Expr>) -> Expr {
        self.chain(Function::Exp, argument)
    }

    fn visit_log(&mut self, argument: &Arc<Expr>) -> Expr {
        self.chain(Function::Log, argument)
    }

    fn visit_sinh(&mut self, argument: &Arc<Expr>) -> Expr {
        self.chain(Function::Sinh, argument)
    }

    fn visit_cosh(&mut self, argument: &Arc<Expr>) -> Expr {
        self.chain(Function::Cosh, argument)
    }

    fn visit_tanh(&mut self, argument: &Arc<Expr>) -> Expr {
        self.chain(Function::Tanh, argument)
    }
}

impl Expr {
    /// Partial derivative with respect to the variable `var`.
    ///
    /// The result is not simplified; call [`Expr::simplify`] on it for a
    /// compact form.
    ///
    /// # Arguments
    /// * `var` - name of the variable to differentiate by
    ///
    /// # Returns
    /// Derivative expression; `Const(0)` when `var` does not occur
    pub fn derivative(&self, var: &str) -> Expr {
        debug!("differentiating {} by {}", self, var);
        Differentiator::new(var).derive(self)
    }

    /// Derivative with respect to a variable node.
    ///
    /// # Returns
    /// `EvalError::Unsupported` unless `var` is an `Expr::Var`
    pub fn derivative_by(&self, var: &Expr) -> Result<Expr, EvalError> {
        match var {
            Expr::Var(name) => Ok(self.derivative(name)),
            other => Err(EvalError::Unsupported(format!(
                "differentiation by non-variable expression {}",
                other
            ))),
        }
    }

    /// Computes the n-th derivative with respect to `var_name`,
    /// simplifying after every step. `n = 0` returns the simplified expression.
    pub fn n_th_derivative(&self, var_name: &str, n: usize) -> Expr {
        let mut expr = self.simplify();
        for _ in 0..n {
            expr = expr.derivative(var_name).simplify();
        }
        expr
    }

    /// Computes all partial derivatives, simplified.
    ///
    /// Variables are processed in alphabetical order, one rayon task per
    /// variable; the i-th entry belongs to the i-th name of `variables()`.
    ///
    /// # Usage
    /// Gradient computation: `expr.diff_multi()` for `f(x, y)` gives `[df/dx, df/dy]`
    pub fn diff_multi(&self) -> Vec<Expr> {
        let all_vars: Vec<String> = self.variables().into_iter().collect();
        all_vars
            .par_iter()
            .map(|var| self.derivative(var).simplify())
            .collect()
    }

    /// Compares the analytic derivative by `var` with a central difference.
    ///
    /// Both are sampled on `linspace(start, end, num_values)`; the step of the
    /// central difference is `1e-4` of the grid spacing.
    ///
    /// # Returns
    /// `(norm, norm < max_norm)`, or the evaluation error when the
    /// expression references a variable other than `var`
    pub fn compare_num1D(
        &self,
        var: &str,
        start: f64,
        end: f64,
        num_values: usize,
        max_norm: f64,
    ) -> Result<(f64, bool), EvalError> {
        let diff = self.derivative(var).simplify();
        let domain = linspace(start, end, num_values);
        let analytical_derivative = domain
            .iter()
            .map(|x| diff.compute_with(&[(var, *x)]))
            .collect::<Result<Vec<f64>, EvalError>>()?;
        let step = if num_values > 1 {
            (1.0 / 1e4) * (end - start) / (num_values as f64 - 1.0)
        } else {
            1e-6
        };
        let numerical = numerical_derivative(|x| self.compute_with(&[(var, x)]), &domain, step)?;
        let norma_val = norm(&analytical_derivative, &numerical);
        debug!("compare_num1D: norm {} against {}", norma_val, max_norm);

        Ok((norma_val, max_norm > norma_val))
    }
}
