use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::symbolic_functions::Function;
use crate::symbolic::symbolic_simplify::BasicSimplifier;
use crate::symbols;
//___________________________________TESTS____________________________________

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::Rng;
    use std::sync::Arc;
    use strum::IntoEnumIterator;

    fn check_all(cases: Vec<(Expr, Expr)>) {
        for (expr, expected) in cases {
            assert_eq!(expr.simplify(), expected, "original expression: {}", expr);
        }
    }

    #[test]
    fn test_function_cancellation() {
        let x = Expr::var("x");
        assert_eq!((-(-x.clone())).simplify(), x);
        assert_eq!(Expr::exp(Expr::log(x.clone())).simplify(), x);
        assert_eq!(Expr::log(Expr::exp(x.clone())).simplify(), x);
    }

    #[test]
    fn test_constant_compute() {
        check_all(vec![
            (-Expr::one(), Expr::Const(-1.0)),
            (Expr::sqrt(1.0), Expr::one()),
            (Expr::log(1.0), Expr::zero()),
            (Expr::sinh(0.0), Expr::zero()),
            (Expr::cosh(0.0), Expr::one()),
            (Expr::tanh(0.0), Expr::zero()),
        ]);
        match Expr::exp(1.0).simplify() {
            Expr::Const(value) => assert_relative_eq!(value, std::f64::consts::E),
            other => panic!("expected a constant, got {}", other),
        }
    }

    #[test]
    fn test_constant_argument_after_simplification() {
        let (x, y) = symbols!(x, y);
        let expr = Expr::cosh(x.clone() - x) * Expr::sinh(y.clone());
        assert_eq!(expr.simplify(), Expr::sinh(y));
    }

    #[test]
    fn test_non_finite_constants_keep_their_shape() {
        let division = Expr::one() / 0.0;
        assert_eq!(division.simplify(), division);
        let log = Expr::log(-1.0);
        assert_eq!(log.simplify(), log);
    }

    #[test]
    fn test_non_finite_operand_folds_are_skipped() {
        let y = Expr::var("y");
        let root = Expr::Const(-1.0) ^ 0.5;
        assert_eq!(root.simplify(), root);
        assert_eq!(root.simplify().simplify(), root.simplify());
        let overflow = Expr::Const(1e308) + 9e307;
        assert_eq!(overflow.simplify(), overflow);
        let product = Expr::Const(1e308) * 10.0;
        assert_eq!(product.simplify(), product);
        let difference = Expr::Const(-1e308) - 1e308;
        assert_eq!(difference.simplify(), difference);
        let negated = -Expr::Const(f64::INFINITY);
        assert_eq!(negated.simplify(), negated);

        let term = root * y;
        assert_eq!((term.clone() - term).simplify(), Expr::zero());
    }

    #[test]
    fn test_constant_subtree_finite_after_rules() {
        let x = Expr::var("x");
        let infinite = Expr::log(Expr::Const(0.5) / 0.0);
        let vanishing = Expr::log(0.0) - Expr::log(0.0);
        let expr = x.clone() + 0.76 / (infinite + vanishing);
        let once = expr.simplify();
        assert_eq!(once, x);
        assert_eq!(once.simplify(), once);

        let negated = -(0.76 / Expr::log(Expr::Const(0.5) / 0.0));
        assert_eq!(negated.simplify(), Expr::Const(-0.0));
    }

    #[test]
    fn test_untouched_subtrees_are_shared() {
        let (x, y) = symbols!(x, y);
        let product = (x * y).shared();
        let expr = Expr::Sinh(product.clone()) + 0.0;
        match expr.simplify() {
            Expr::Sinh(argument) => assert!(Arc::ptr_eq(&argument, &product)),
            other => panic!("expected Sinh, got {}", other),
        }
    }

    #[test]
    fn test_long_chain() {
        let mut chain = Expr::var("x");
        for i in 0..300 {
            chain = chain + Expr::var(&format!("y{}", i)) * 1.0;
        }
        let simplified = chain.simplify();
        assert_eq!(simplified.node_count(), 1 + 2 * 300);
        assert_eq!(simplified.simplify(), simplified);
    }

    #[test]
    fn test_sqrt_of_power() {
        let (x, y) = symbols!(x, y);
        let sqrt_xy = Expr::sqrt(x.clone() ^ y);
        assert_eq!(sqrt_xy.simplify(), sqrt_xy);
        assert_eq!(Expr::sqrt(x.clone() ^ 2.0).simplify(), x);
        assert_eq!(Expr::sqrt(x.clone() ^ 4.0).simplify(), x.clone() ^ 2.0);
        assert_eq!(Expr::sqrt(x.clone() ^ 3.0).simplify(), x ^ 1.5);
    }

    #[test]
    fn test_constant_folding_add_sub() {
        let x = Expr::var("x");
        check_all(vec![
            (x.clone() + 0.0, x.clone()),
            (0.0 + x.clone(), x.clone()),
            (x.clone() + x.clone(), 2.0 * x.clone()),
            (x.clone() + x.clone() + 0.0 + 0.0, 2.0 * x.clone()),
            (x.clone() - 0.0, x.clone()),
            (0.0 - x.clone(), -x.clone()),
            (x.clone() - x.clone(), Expr::zero()),
            (x.clone() - x.clone() + x.clone(), x.clone()),
            (Expr::Const(2.0) + 3.0, Expr::Const(5.0)),
        ]);
    }

    #[test]
    fn test_constant_folding_mul_div() {
        let x = Expr::var("x");
        check_all(vec![
            (x.clone() * 0.0, Expr::zero()),
            (0.0 * x.clone(), Expr::zero()),
            (x.clone() * 1.0, x.clone()),
            (1.0 * x.clone(), x.clone()),
            (x.clone() * x.clone(), x.clone() ^ 2.0),
            // operand order is preserved
            (3.0 * x.clone(), 3.0 * x.clone()),
            (x.clone() * 3.0, x.clone() * 3.0),
            (0.0 / x.clone(), Expr::zero()),
            (x.clone() / 1.0, x.clone()),
            (x.clone() / x.clone(), Expr::one()),
        ]);
    }

    #[test]
    fn test_constant_folding_pow() {
        let x = Expr::var("x");
        check_all(vec![
            (x.clone() ^ 0.0, Expr::one()),
            (x.clone() ^ 1.0, x.clone()),
            (x.clone() ^ -1.0, 1.0 / x.clone()),
            (1.0 ^ x.clone(), Expr::one()),
            (0.0 ^ x.clone(), Expr::zero()),
            (x.clone() ^ 3.0, x.clone() ^ 3.0),
            (3.0 ^ x.clone(), 3.0 ^ x.clone()),
        ]);
    }

    #[test]
    fn test_reciprocal_cancellation() {
        let x = Expr::var("x");
        check_all(vec![
            (x.clone() * (1.0 / x.clone()), Expr::one()),
            ((1.0 / x.clone()) * x.clone(), Expr::one()),
        ]);
    }

    #[test]
    fn test_common_denominator() {
        let (x, y, z) = symbols!(x, y, z);
        assert_eq!(
            (x.clone() / z.clone() + y.clone() / z.clone()).simplify(),
            (x.clone() + y.clone()) / z.clone()
        );
        assert_eq!(
            (x.clone() / z.clone() - y.clone() / z.clone()).simplify(),
            (x - y) / z
        );
    }

    #[test]
    fn test_nested_divisions_flip() {
        let (x, y, z) = symbols!(x, y, z);
        assert_eq!(
            (x.clone() / (z.clone() / y.clone())).simplify(),
            (x.clone() * y) / z.clone()
        );
        assert_eq!(
            (x.clone() / (z.clone() / (x.clone() / z.clone()))).simplify(),
            (x ^ 2.0) / (z ^ 2.0)
        );
    }

    #[test]
    fn test_division_of_powers() {
        let (x, y) = symbols!(x, y);
        check_all(vec![
            ((x.clone() ^ y.clone()) / x.clone(), x.clone() ^ (y.clone() - 1.0)),
            (x.clone() / (x.clone() ^ y.clone()), x.clone() ^ (1.0 - y.clone())),
            ((x.clone() ^ 1.5) / (x.clone() ^ 0.5), x.clone()),
            ((x.clone() ^ 5.0) / (x.clone() ^ 2.0), x ^ 3.0),
        ]);
    }

    #[test]
    fn test_multiply_distribution() {
        let (x, y, z) = symbols!(x, y, z);
        let sum = x.clone() * y.clone() + x.clone() * z.clone();
        let difference = x.clone() * y.clone() - x.clone() * z.clone();
        check_all(vec![
            (x.clone() * (y.clone() + z.clone()), sum.clone()),
            ((y.clone() + z.clone()) * x.clone(), sum),
            (x.clone() * (y.clone() - z.clone()), difference.clone()),
            ((y - z) * x, difference),
        ]);
    }

    #[test]
    fn test_functions_keep_simplified_argument() {
        let x = Expr::var("x");
        for function in Function::iter() {
            let expr = function.apply(x.clone() + 0.0);
            assert_eq!(expr.simplify(), function.apply(x.clone()));
        }
    }

    #[test]
    fn test_source_is_untouched() {
        let (x, y) = symbols!(x, y);
        let expr = x.clone() * (y.clone() + 0.0);
        let before = expr.clone();
        let simplified = expr.simplify();
        assert_eq!(expr, before);
        assert_eq!(simplified, x * y);
    }

    #[test]
    fn test_rewrite_counter() {
        let x = Expr::var("x");
        let mut simplifier = BasicSimplifier::new();
        assert_eq!(simplifier.simplify(&(x.clone() * 3.0)), x.clone() * 3.0);
        assert_eq!(simplifier.rewrites(), 0);
        simplifier.simplify(&(x + 0.0));
        assert_eq!(simplifier.rewrites(), 1);
    }

    #[test]
    fn test_simplify_is_idempotent() {
        let (x, y, z) = symbols!(x, y, z);
        let samples = vec![
            x.clone() / (z.clone() / (x.clone() / z.clone())),
            (x.clone() + y.clone()) * (x.clone() - z.clone()),
            Expr::sqrt(x.clone() ^ 6.0) / (x.clone() ^ 2.0) + x.clone() / z.clone() + y.clone() / z.clone(),
            (x.clone() / z.clone() + x.clone() / z.clone()) * y.clone(),
            Expr::exp(Expr::log(x.clone() * y.clone())) - 0.0 * z.clone(),
            Expr::tanh(x.clone() ^ -1.0) * (1.0 / y),
        ];
        for expr in samples {
            let once = expr.simplify();
            assert_eq!(once.simplify(), once, "original expression: {}", expr);
        }
    }

    #[test]
    fn test_simplify_preserves_value() {
        let (x, y, z) = symbols!(x, y, z);
        let samples = vec![
            x.clone() / (z.clone() / (x.clone() / z.clone())),
            (x.clone() + y.clone()) * (x.clone() - z.clone()) * (y.clone() + 2.0),
            (x.clone() ^ y.clone()) / x.clone() + (x.clone() ^ 2.5) / (x.clone() ^ 0.5),
            Expr::sqrt(x.clone() ^ 3.0) * (1.0 / x.clone()) - y.clone() / z.clone(),
            Expr::cosh(x.clone() - x.clone()) * Expr::sinh(y.clone() * 1.0) + z.clone() ^ -1.0,
        ];
        let mut rng = rand::rng();
        for expr in samples {
            let simplified = expr.simplify();
            for _ in 0..20 {
                let point = [
                    ("x", rng.random_range(0.5..3.0)),
                    ("y", rng.random_range(0.5..3.0)),
                    ("z", rng.random_range(0.5..3.0)),
                ];
                let original = expr.compute_with(&point).unwrap();
                let rewritten = simplified.compute_with(&point).unwrap();
                assert_relative_eq!(original, rewritten, epsilon = 1e-9, max_relative = 1e-9);
            }
        }
    }
}
