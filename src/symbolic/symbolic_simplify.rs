//! # Symbolic Expression Simplification Module
//!
//! Rule-based algebraic simplification in a single bottom-up sweep.
//!
//! ## Simplification Strategy
//!
//! 1. **Children First**: every child is simplified before its parent, and
//!    each simplified child reports whether it is free of variables
//! 2. **Constant Folding**: an operator or function whose simplified operands
//!    are constants is replaced by its value when that value is finite
//! 3. **Variant Rules**: otherwise the simplified children are matched against
//!    the rules of the node's own variant (identities, annihilators,
//!    cancellation, distribution, power quotients)
//! 4. **Local Re-simplification**: a rule that builds a new composite node
//!    sends that node through the simplifier once more
//! 5. **Constant Subtrees**: a rebuilt node without free variables whose
//!    value is finite becomes that constant (`0.76 / Log(0.5 / 0)` is `0`)
//!
//! There is no global fixed-point loop. Operand order is never changed, so
//! `3*x` and `x*3` stay distinct; like terms are only merged when they are
//! structurally equal.
//!
//! Non-finite constant folds (`1/0`, `Log(-1)`, `(-1)^0.5`) are not performed:
//! such nodes keep their shape and go through the structural rules instead.
//!
//! A child in which no rule fired is handed back as the same `Arc`, so
//! untouched subtrees are shared between input and output without comparing
//! them.

use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::symbolic_functions::{BinaryOp, Function};
use crate::symbolic::symbolic_visitor::ExprVisitor;
use log::{debug, trace};
use std::sync::Arc;

/// A simplified node and whether it is free of variables.
type Reduced = (Expr, bool);

/// The rule set, as a rebuilding visitor.
///
/// Counts how many rules fired so callers (and the debug log) can tell
/// whether a sweep changed anything.
#[derive(Debug, Default)]
pub struct BasicSimplifier {
    rewrites: usize,
}

impl BasicSimplifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rules fired since creation.
    pub fn rewrites(&self) -> usize {
        self.rewrites
    }

    /// Simplifies `expr`; the input is left untouched.
    pub fn simplify(&mut self, expr: &Expr) -> Expr {
        expr.accept(self).0
    }

    fn fired(&mut self, rule: &str) {
        self.rewrites += 1;
        trace!("simplify: {}", rule);
    }

    /// Simplifies a child. When no rule fired inside it the original `Arc`
    /// is returned.
    fn reduce(&mut self, node: &Arc<Expr>) -> (Arc<Expr>, bool) {
        let before = self.rewrites;
        let (simplified, constant) = node.accept(self);
        if self.rewrites == before {
            (node.clone(), constant)
        } else {
            (simplified.shared(), constant)
        }
    }

    /// Sends a composite built by a rule through the simplifier again.
    fn resimplify(&mut self, expr: &Expr) -> Reduced {
        expr.accept(self)
    }

    /// Replaces a rebuilt variable-free node by its value when it is finite.
    fn settle(&mut self, rebuilt: Expr, constant: bool) -> Reduced {
        if constant && !matches!(rebuilt, Expr::Const(_)) {
            if let Some(value) = rebuilt.try_compute_constant() {
                if value.is_finite() {
                    self.fired("constant subtree");
                    return (Expr::Const(value), true);
                }
            }
        }
        (rebuilt, constant)
    }

    fn fold_binary(&mut self, op: BinaryOp, lhs: &Expr, rhs: &Expr) -> Option<Reduced> {
        let (Expr::Const(a), Expr::Const(b)) = (lhs, rhs) else {
            return None;
        };
        let folded = op.compute_for(*a, *b);
        if folded.is_finite() {
            self.fired("constant operands");
            Some((Expr::Const(folded), true))
        } else {
            None
        }
    }

    /// Rebuilds a function node; a constant argument is folded when the
    /// value is finite.
    fn function_node(&mut self, function: Function, argument: Arc<Expr>, constant: bool) -> Reduced {
        if let Expr::Const(value) = argument.as_ref() {
            let folded = function.compute_for(*value);
            if folded.is_finite() {
                self.fired("constant function argument");
                return (Expr::Const(folded), true);
            }
        }
        self.settle(function.build(argument), constant)
    }
}

impl ExprVisitor for BasicSimplifier {
    type Output = Reduced;

    fn visit_var(&mut self, name: &str) -> Reduced {
        (Expr::var(name), false)
    }

    fn visit_const(&mut self, value: f64) -> Reduced {
        (Expr::Const(value), true)
    }

    fn visit_neg(&mut self, operand: &Arc<Expr>) -> Reduced {
        let (inner, constant) = self.reduce(operand);
        match inner.as_ref() {
            // -(-a) = a
            Expr::Neg(a) => {
                self.fired("double negation");
                (a.as_ref().clone(), constant)
            }
            Expr::Const(value) if value.is_finite() => {
                self.fired("constant negation");
                (Expr::Const(-value), true)
            }
            _ => self.settle(Expr::Neg(inner), constant),
        }
    }

    fn visit_add(&mut self, left: &Arc<Expr>, right: &Arc<Expr>) -> Reduced {
        let (lhs, lc) = self.reduce(left);
        let (rhs, rc) = self.reduce(right);
        if let Some(folded) = self.fold_binary(BinaryOp::Add, &lhs, &rhs) {
            return folded;
        }
        match (lhs.as_ref(), rhs.as_ref()) {
            // a + 0 = a
            (_, r) if r.is_zero() => {
                self.fired("a + 0");
                (Arc::unwrap_or_clone(lhs), lc)
            }
            // 0 + a = a
            (l, _) if l.is_zero() => {
                self.fired("0 + a");
                (Arc::unwrap_or_clone(rhs), rc)
            }
            // a + a = 2 * a
            _ if lhs == rhs => {
                self.fired("a + a");
                self.resimplify(&Expr::Mul(Expr::Const(2.0).shared(), lhs))
            }
            // p/q + r/q = (p + r)/q
            (Expr::Div(p, q), Expr::Div(r, s)) if q == s => {
                self.fired("common denominator sum");
                let numerator = Expr::Add(p.clone(), r.clone());
                self.resimplify(&Expr::Div(numerator.shared(), q.clone()))
            }
            _ => self.settle(Expr::Add(lhs, rhs), lc && rc),
        }
    }

    fn visit_sub(&mut self, left: &Arc<Expr>, right: &Arc<Expr>) -> Reduced {
        let (lhs, lc) = self.reduce(left);
        let (rhs, rc) = self.reduce(right);
        if let Some(folded) = self.fold_binary(BinaryOp::Sub, &lhs, &rhs) {
            return folded;
        }
        match (lhs.as_ref(), rhs.as_ref()) {
            // a - 0 = a
            (_, r) if r.is_zero() => {
                self.fired("a - 0");
                (Arc::unwrap_or_clone(lhs), lc)
            }
            // 0 - a = -a
            (l, _) if l.is_zero() => {
                self.fired("0 - a");
                self.resimplify(&Expr::Neg(rhs))
            }
            // a - a = 0
            _ if lhs == rhs => {
                self.fired("a - a");
                (Expr::zero(), true)
            }
            // p/q - r/q = (p - r)/q
            (Expr::Div(p, q), Expr::Div(r, s)) if q == s => {
                self.fired("common denominator difference");
                let numerator = Expr::Sub(p.clone(), r.clone());
                self.resimplify(&Expr::Div(numerator.shared(), q.clone()))
            }
            _ => self.settle(Expr::Sub(lhs, rhs), lc && rc),
        }
    }

    fn visit_mul(&mut self, left: &Arc<Expr>, right: &Arc<Expr>) -> Reduced {
        let (lhs, lc) = self.reduce(left);
        let (rhs, rc) = self.reduce(right);
        if let Some(folded) = self.fold_binary(BinaryOp::Mul, &lhs, &rhs) {
            return folded;
        }
        match (lhs.as_ref(), rhs.as_ref()) {
            // 0 * a = a * 0 = 0
            (l, r) if l.is_zero() || r.is_zero() => {
                self.fired("0 * a");
                (Expr::zero(), true)
            }
            // 1 * a = a
            (l, _) if l.is_one() => {
                self.fired("1 * a");
                (Arc::unwrap_or_clone(rhs), rc)
            }
            // a * 1 = a
            (_, r) if r.is_one() => {
                self.fired("a * 1");
                (Arc::unwrap_or_clone(lhs), lc)
            }
            // a * a = a^2
            _ if lhs == rhs => {
                self.fired("a * a");
                (Expr::Pow(lhs, Expr::Const(2.0).shared()), lc)
            }
            // (b + c) * a = a*b + a*c
            (Expr::Add(b, c), _) => {
                self.fired("distribute over left sum");
                let expanded = Expr::Add(
                    Expr::Mul(rhs.clone(), b.clone()).shared(),
                    Expr::Mul(rhs.clone(), c.clone()).shared(),
                );
                self.resimplify(&expanded)
            }
            // a * (b + c) = a*b + a*c
            (_, Expr::Add(b, c)) => {
                self.fired("distribute over right sum");
                let expanded = Expr::Add(
                    Expr::Mul(lhs.clone(), b.clone()).shared(),
                    Expr::Mul(lhs.clone(), c.clone()).shared(),
                );
                self.resimplify(&expanded)
            }
            // (b - c) * a = a*b - a*c
            (Expr::Sub(b, c), _) => {
                self.fired("distribute over left difference");
                let expanded = Expr::Sub(
                    Expr::Mul(rhs.clone(), b.clone()).shared(),
                    Expr::Mul(rhs.clone(), c.clone()).shared(),
                );
                self.resimplify(&expanded)
            }
            // a * (b - c) = a*b - a*c
            (_, Expr::Sub(b, c)) => {
                self.fired("distribute over right difference");
                let expanded = Expr::Sub(
                    Expr::Mul(lhs.clone(), b.clone()).shared(),
                    Expr::Mul(lhs.clone(), c.clone()).shared(),
                );
                self.resimplify(&expanded)
            }
            // (p/q) * a = (p*a)/q
            (Expr::Div(p, q), _) => {
                self.fired("factor through left quotient");
                let numerator = Expr::Mul(p.clone(), rhs.clone());
                self.resimplify(&Expr::Div(numerator.shared(), q.clone()))
            }
            // a * (p/q) = (p*a)/q
            (_, Expr::Div(p, q)) => {
                self.fired("factor through right quotient");
                let numerator = Expr::Mul(p.clone(), lhs.clone());
                self.resimplify(&Expr::Div(numerator.shared(), q.clone()))
            }
            _ => self.settle(Expr::Mul(lhs, rhs), lc && rc),
        }
    }

    fn visit_div(&mut self, left: &Arc<Expr>, right: &Arc<Expr>) -> Reduced {
        let (lhs, lc) = self.reduce(left);
        let (rhs, rc) = self.reduce(right);
        match (lhs.as_ref(), rhs.as_ref()) {
            // 0 / a = 0, also for a constant zero denominator
            (l, _) if l.is_zero() => {
                self.fired("0 / a");
                return (Expr::zero(), true);
            }
            // a / 1 = a
            (_, r) if r.is_one() => {
                self.fired("a / 1");
                return (Arc::unwrap_or_clone(lhs), lc);
            }
            _ => {}
        }
        if let Some(folded) = self.fold_binary(BinaryOp::Div, &lhs, &rhs) {
            return folded;
        }
        match (lhs.as_ref(), rhs.as_ref()) {
            // a / a = 1
            _ if lhs == rhs => {
                self.fired("a / a");
                (Expr::one(), true)
            }
            // a / (p/q) = (a*q)/p
            (_, Expr::Div(p, q)) => {
                self.fired("nested quotient");
                let numerator = Expr::Mul(lhs.clone(), q.clone());
                self.resimplify(&Expr::Div(numerator.shared(), p.clone()))
            }
            // a^m / a^n = a^(m-n)
            (Expr::Pow(a, m), Expr::Pow(b, n)) if a == b => {
                self.fired("power quotient");
                let exponent = Expr::Sub(m.clone(), n.clone());
                self.resimplify(&Expr::Pow(a.clone(), exponent.shared()))
            }
            // a^m / a = a^(m-1)
            (Expr::Pow(a, m), _) if *a == rhs => {
                self.fired("power over base");
                let exponent = Expr::Sub(m.clone(), Expr::one().shared());
                self.resimplify(&Expr::Pow(a.clone(), exponent.shared()))
            }
            // a / a^m = a^(1-m)
            (_, Expr::Pow(a, m)) if *a == lhs => {
                self.fired("base over power");
                let exponent = Expr::Sub(Expr::one().shared(), m.clone());
                self.resimplify(&Expr::Pow(a.clone(), exponent.shared()))
            }
            _ => self.settle(Expr::Div(lhs, rhs), lc && rc),
        }
    }

    fn visit_pow(&mut self, base: &Arc<Expr>, exponent: &Arc<Expr>) -> Reduced {
        let (lhs, lc) = self.reduce(base);
        let (rhs, rc) = self.reduce(exponent);
        if let Some(folded) = self.fold_binary(BinaryOp::Pow, &lhs, &rhs) {
            return folded;
        }
        match (lhs.as_ref(), rhs.as_ref()) {
            // a^0 = 1
            (_, Expr::Const(e)) if *e == 0.0 => {
                self.fired("a ^ 0");
                (Expr::one(), true)
            }
            // a^1 = a
            (_, Expr::Const(e)) if *e == 1.0 => {
                self.fired("a ^ 1");
                (Arc::unwrap_or_clone(lhs), lc)
            }
            // a^(-1) = 1/a
            (_, Expr::Const(e)) if *e == -1.0 => {
                self.fired("a ^ -1");
                self.resimplify(&Expr::Div(Expr::one().shared(), lhs.clone()))
            }
            // 0^a = 0
            (b, _) if b.is_zero() => {
                self.fired("0 ^ a");
                (Expr::zero(), true)
            }
            // 1^a = 1
            (b, _) if b.is_one() => {
                self.fired("1 ^ a");
                (Expr::one(), true)
            }
            _ => self.settle(Expr::Pow(lhs, rhs), lc && rc),
        }
    }

    fn visit_sqrt(&mut self, argument: &Arc<Expr>) -> Reduced {
        let (arg, constant) = self.reduce(argument);
        // sqrt(b^k) = b^(k/2)
        if let Expr::Pow(b, k) = arg.as_ref() {
            if let Expr::Const(k) = k.as_ref() {
                self.fired("square root of power");
                let halved = Expr::Pow(b.clone(), Expr::Const(k / 2.0).shared());
                return self.resimplify(&halved);
            }
        }
        self.function_node(Function::Sqrt, arg, constant)
    }

    fn visit_exp(&mut self, argument: &Arc<Expr>) -> Reduced {
        let (arg, constant) = self.reduce(argument);
        // exp(log(a)) = a
        if let Expr::Log(inner) = arg.as_ref() {
            self.fired("exp of log");
            return (inner.as_ref().clone(), constant);
        }
        self.function_node(Function::Exp, arg, constant)
    }

    fn visit_log(&mut self, argument: &Arc<Expr>) -> Reduced {
        let (arg, constant) = self.reduce(argument);
        // log(exp(a)) = a
        if let Expr::Exp(inner) = arg.as_ref() {
            self.fired("log of exp");
            return (inner.as_ref().clone(), constant);
        }
        self.function_node(Function::Log, arg, constant)
    }

    fn visit_sinh(&mut self, argument: &Arc<Expr>) -> Reduced {
        let (arg, constant) = self.reduce(argument);
        self.function_node(Function::Sinh, arg, constant)
    }

    fn visit_cosh(&mut self, argument: &Arc<Expr>) -> Reduced {
        let (arg, constant) = self.reduce(argument);
        self.function_node(Function::Cosh, arg, constant)
    }

    fn visit_tanh(&mut self, argument: &Arc<Expr>) -> Reduced {
        let (arg, constant) = self.reduce(argument);
        self.function_node(Function::Tanh, arg, constant)
    }
}

impl Expr {
    /// Returns an algebraically simplified, numerically equivalent expression.
    ///
    /// The receiver is not modified; unchanged subtrees are shared between
    /// input and output.
    ///
    /// # Examples
    /// ```rust, ignore
    /// let x = Expr::var("x");
    /// let simplified = (x.clone() * (1.0 / x)).simplify();
    /// assert_eq!(simplified, Expr::one());
    /// ```
    pub fn simplify(&self) -> Expr {
        let mut simplifier = BasicSimplifier::new();
        let simplified = simplifier.simplify(self);
        debug!(
            "simplified {} nodes into {} ({} rewrites)",
            self.node_count(),
            simplified.node_count(),
            simplifier.rewrites()
        );
        simplified
    }
}
