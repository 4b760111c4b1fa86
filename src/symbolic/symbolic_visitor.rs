//! # Visitor Protocol
//!
//! Double dispatch over the closed expression set. An algorithm implements
//! [`ExprVisitor`] with one method per variant and runs through
//! [`Expr::accept`]; the exhaustive match in `accept` is the only place the
//! dispatch lives, so adding a variant is a compile error in every visitor.
//!
//! Children are handed over as `&Arc<Expr>` so a visitor that rebuilds trees
//! can reuse untouched subtrees without copying them.
//!
//! The canonical textual rendering ([`Renderer`]) is itself a visitor and
//! backs the `Display` impl of `Expr`:
//!
//! | node         | rendering        |
//! |--------------|------------------|
//! | variable     | `x`              |
//! | constant     | `2`, `(-10.2)`   |
//! | negation     | `-(x)`           |
//! | binary       | `(x + y)`        |
//! | function     | `Sqrt(x)`        |

use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::symbolic_functions::{BinaryOp, Function};
use std::fmt;
use std::sync::Arc;

pub trait ExprVisitor {
    type Output;

    fn visit_var(&mut self, name: &str) -> Self::Output;
    fn visit_const(&mut self, value: f64) -> Self::Output;
    fn visit_neg(&mut self, operand: &Arc<Expr>) -> Self::Output;
    fn visit_add(&mut self, left: &Arc<Expr>, right: &Arc<Expr>) -> Self::Output;
    fn visit_sub(&mut self, left: &Arc<Expr>, right: &Arc<Expr>) -> Self::Output;
    fn visit_mul(&mut self, left: &Arc<Expr>, right: &Arc<Expr>) -> Self::Output;
    fn visit_div(&mut self, left: &Arc<Expr>, right: &Arc<Expr>) -> Self::Output;
    fn visit_pow(&mut self, base: &Arc<Expr>, exponent: &Arc<Expr>) -> Self::Output;
    fn visit_sqrt(&mut self, argument: &Arc<Expr>) -> Self::Output;
    fn visit_exp(&mut self, argument: &Arc<Expr>) -> Self::Output;
    fn visit_log(&mut self, argument: &Arc<Expr>) -> Self::Output;
    fn visit_sinh(&mut self, argument: &Arc<Expr>) -> Self::Output;
    fn visit_cosh(&mut self, argument: &Arc<Expr>) -> Self::Output;
    fn visit_tanh(&mut self, argument: &Arc<Expr>) -> Self::Output;
}

impl Expr {
    /// Dispatches to the visitor method matching this node's variant.
    pub fn accept<V: ExprVisitor>(&self, visitor: &mut V) -> V::Output {
        match self {
            Expr::Var(name) => visitor.visit_var(name),
            Expr::Const(value) => visitor.visit_const(*value),
            Expr::Neg(operand) => visitor.visit_neg(operand),
            Expr::Add(lhs, rhs) => visitor.visit_add(lhs, rhs),
            Expr::Sub(lhs, rhs) => visitor.visit_sub(lhs, rhs),
            Expr::Mul(lhs, rhs) => visitor.visit_mul(lhs, rhs),
            Expr::Div(lhs, rhs) => visitor.visit_div(lhs, rhs),
            Expr::Pow(base, exponent) => visitor.visit_pow(base, exponent),
            Expr::Sqrt(arg) => visitor.visit_sqrt(arg),
            Expr::Exp(arg) => visitor.visit_exp(arg),
            Expr::Log(arg) => visitor.visit_log(arg),
            Expr::Sinh(arg) => visitor.visit_sinh(arg),
            Expr::Cosh(arg) => visitor.visit_cosh(arg),
            Expr::Tanh(arg) => visitor.visit_tanh(arg),
        }
    }
}

/// Renders an expression in the fully parenthesized canonical form.
pub struct Renderer;

impl Renderer {
    fn binary(&mut self, op: BinaryOp, left: &Expr, right: &Expr) -> String {
        format!(
            "({} {} {})",
            left.accept(self),
            op.alias(),
            right.accept(self)
        )
    }

    fn function(&mut self, function: Function, argument: &Expr) -> String {
        format!("{}({})", function.name(), argument.accept(self))
    }
}

impl ExprVisitor for Renderer {
    type Output = String;

    fn visit_var(&mut self, name: &str) -> String {
        name.to_string()
    }

    fn visit_const(&mut self, value: f64) -> String {
        // negative constants are parenthesized so `x - -2` reads `(x - (-2))`
        if value >= 0.0 {
            format!("{}", value)
        } else {
            format!("({})", value)
        }
    }

    fn visit_neg(&mut self, operand: &Arc<Expr>) -> String {
        format!("-({})", operand.accept(self))
    }

    fn visit_add(&mut self, left: &Arc<Expr>, right: &Arc<Expr>) -> String {
        self.binary(BinaryOp::Add, left, right)
    }

    fn visit_sub(&mut self, left: &Arc<Expr>, right: &Arc<Expr>) -> String {
        self.binary(BinaryOp::Sub, left, right)
    }

    fn visit_mul(&mut self, left: &Arc<Expr>, right: &Arc<Expr>) -> String {
        self.binary(BinaryOp::Mul, left, right)
    }

    fn visit_div(&mut self, left: &Arc<Expr>, right: &Arc<Expr>) -> String {
        self.binary(BinaryOp::Div, left, right)
    }

    fn visit_pow(&mut self, base: &Arc<Expr>, exponent: &Arc<Expr>) -> String {
        self.binary(BinaryOp::Pow, base, exponent)
    }

    fn visit_sqrt(&mut self, argument: &Arc<Expr>) -> String {
        self.function(Function::Sqrt, argument)
    }

    fn visit_exp(&mut self, argument: &Arc<Expr>) -> String {
        self.function(Function::Exp, argument)
    }

    fn visit_log(&mut self, argument: &Arc<Expr>) -> String {
        self.function(Function::Log, argument)
    }

    fn visit_sinh(&mut self, argument: &Arc<Expr>) -> String {
        self.function(Function::Sinh, argument)
    }

    fn visit_cosh(&mut self, argument: &Arc<Expr>) -> String {
        self.function(Function::Cosh, argument)
    }

    fn visit_tanh(&mut self, argument: &Arc<Expr>) -> String {
        self.function(Function::Tanh, argument)
    }
}

/// Display implementation for pretty printing symbolic expressions.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.accept(&mut Renderer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Counts nodes by kind; exercises dispatch for every variant.
    #[derive(Default)]
    struct KindCounter {
        leaves: usize,
        binaries: usize,
        unaries: usize,
    }

    impl KindCounter {
        fn unary(&mut self, operand: &Arc<Expr>) {
            self.unaries += 1;
            operand.accept(self);
        }

        fn binary(&mut self, left: &Arc<Expr>, right: &Arc<Expr>) {
            self.binaries += 1;
            left.accept(self);
            right.accept(self);
        }
    }

    impl ExprVisitor for KindCounter {
        type Output = ();

        fn visit_var(&mut self, _name: &str) {
            self.leaves += 1;
        }
        fn visit_const(&mut self, _value: f64) {
            self.leaves += 1;
        }
        fn visit_neg(&mut self, operand: &Arc<Expr>) {
            self.unary(operand)
        }
        fn visit_add(&mut self, left: &Arc<Expr>, right: &Arc<Expr>) {
            self.binary(left, right)
        }
        fn visit_sub(&mut self, left: &Arc<Expr>, right: &Arc<Expr>) {
            self.binary(left, right)
        }
        fn visit_mul(&mut self, left: &Arc<Expr>, right: &Arc<Expr>) {
            self.binary(left, right)
        }
        fn visit_div(&mut self, left: &Arc<Expr>, right: &Arc<Expr>) {
            self.binary(left, right)
        }
        fn visit_pow(&mut self, base: &Arc<Expr>, exponent: &Arc<Expr>) {
            self.binary(base, exponent)
        }
        fn visit_sqrt(&mut self, argument: &Arc<Expr>) {
            self.unary(argument)
        }
        fn visit_exp(&mut self, argument: &Arc<Expr>) {
            self.unary(argument)
        }
        fn visit_log(&mut self, argument: &Arc<Expr>) {
            self.unary(argument)
        }
        fn visit_sinh(&mut self, argument: &Arc<Expr>) {
            self.unary(argument)
        }
        fn visit_cosh(&mut self, argument: &Arc<Expr>) {
            self.unary(argument)
        }
        fn visit_tanh(&mut self, argument: &Arc<Expr>) {
            self.unary(argument)
        }
    }

    #[test]
    fn test_custom_visitor() {
        let x = Expr::var("x");
        let expr = Expr::sqrt(x.clone()) + Expr::exp(-x.clone()) * Expr::log(2.0)
            - Expr::sinh(x.clone()) / Expr::cosh(x.clone()).pow(Expr::tanh(x));
        let mut counter = KindCounter::default();
        expr.accept(&mut counter);
        assert_eq!(counter.binaries, 5);
        assert_eq!(counter.unaries, 7);
        assert_eq!(counter.leaves, 6);
        assert_eq!(
            counter.leaves + counter.binaries + counter.unaries,
            expr.node_count()
        );
    }

    #[test]
    fn test_render_leaves() {
        assert_eq!(Expr::var("x").to_string(), "x");
        assert_eq!(Expr::Const(10.2).to_string(), "10.2");
        assert_eq!(Expr::Const(2.0).to_string(), "2");
        assert_eq!(Expr::Const(-10.2).to_string(), "(-10.2)");
    }

    #[test]
    fn test_render_nested() {
        let x = Expr::var("x");
        let y = Expr::var("y");
        assert_eq!((-x.clone()).to_string(), "-(x)");
        assert_eq!((-(x.clone() + y.clone())).to_string(), "-((x + y))");
        assert_eq!((-Expr::Const(-2.0)).to_string(), "-((-2))");
        assert_eq!((x.clone() - y.clone()).to_string(), "(x - y)");
        assert_eq!(
            ((x.clone() ^ 2.0) / (y.clone() * -3.0)).to_string(),
            "((x ^ 2) / (y * (-3)))"
        );
        assert_eq!(
            Expr::sqrt(x.clone() + Expr::tanh(y)).to_string(),
            "Sqrt((x + Tanh(y)))"
        );
        assert_eq!(Expr::log(x).to_string(), "Log(x)");
    }
}
