// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
#![allow(non_snake_case)]

use crate::Utils::config::DemoConfig;
use crate::symbolic::symbolic_engine::Expr;
use itertools::Itertools;
use log::{info, warn};

/// Prints the structural properties of an expression.
pub fn describe(expr: &Expr) -> String {
    let degree = expr
        .polynomial_degree()
        .map(|degree| degree.to_string())
        .unwrap_or_default();
    format!(
        "Expression: {}\n- IsConstant: {}\n- Variables: [{}]\n- IsPolynomial: {}\n- Degree: {}",
        expr,
        expr.is_constant(),
        expr.variables().iter().join(", "),
        expr.is_polynomial(),
        degree
    )
}

fn print_value(expr: &Expr, config: &DemoConfig) {
    let bindings = config.binding_pairs();
    let label = bindings
        .iter()
        .map(|(name, value)| format!("{} = {}", name, value))
        .join(", ");
    match expr.compute(&config.bindings) {
        Ok(value) => println!("-Value ({}): {}", label, value),
        Err(e) => warn!("cannot evaluate {}: {}", expr, e),
    }
}

pub fn sym_examples(example: usize, config: &DemoConfig) {
    info!("running symbolic example {}", example);
    match example {
        0 => {
            // BASIC PROPERTIES AND EVALUATION
            let (x, y) = crate::symbols!(x, y);
            let c = Expr::Const(3.0);
            let expr1 = (x.clone() - 4.0) * (3.0 * x.clone() + y.clone() * y.clone()) / 5.0;
            let expr2 = (5.0 - 3.0 * c.clone()) * Expr::sqrt(16.0 + c.clone() * c);
            println!("{}", describe(&expr1));
            print_value(&expr1, config);
            println!("{}", describe(&expr2));
            print_value(&expr2, config);
        }
        1 => {
            // DERIVATIVE BEFORE AND AFTER SIMPLIFICATION
            let (x, y) = crate::symbols!(x, y);
            let c = Expr::Const(10.0);
            let expr1 = Expr::exp(Expr::log(x + y + c));
            println!("{}", describe(&expr1));
            print_value(&expr1, config);
            println!("(Simplified): {}", expr1.simplify());
            println!(
                "(Simplified) d/dx: {}",
                expr1.simplify().derivative("x")
            );
            println!("d/dx (Non simplified): {}", expr1.derivative("x"));
            println!("d/dx (Simplified): {}", expr1.derivative("x").simplify());
        }
        2 => {
            // GRADIENT AND HIGHER DERIVATIVES
            let vars: Vec<Expr> = config.variables.iter().map(|v| Expr::var(v)).collect();
            if vars.is_empty() {
                warn!("no variables configured");
                return;
            }
            // f = v1^3 * v2 * ... + sinh(v1 * v2 * ...)
            let product = vars
                .iter()
                .cloned()
                .reduce(|acc, v| acc * v)
                .unwrap_or_else(Expr::one);
            let expr = (vars[0].clone() ^ 3.0) * product.clone() + Expr::sinh(product);
            println!("f = {}", expr);
            let gradient = expr.diff_multi();
            for (name, derivative) in expr.variables().iter().zip(gradient.iter()) {
                println!("df/d{} = {}", name, derivative);
                print_value(derivative, config);
            }
            let first = &config.variables[0];
            for n in 1..=3 {
                println!(
                    "d^{}f/d{}^{} = {}",
                    n,
                    first,
                    n,
                    expr.n_th_derivative(first, n)
                );
            }
        }
        3 => {
            // NUMERIC CHECK OF ANALYTIC DERIVATIVES
            let x = Expr::var("x");
            let candidates = vec![
                Expr::log(x.clone() + 2.0),
                Expr::tanh(x.clone()) * x.clone(),
                x.clone() ^ x.clone(),
                Expr::sqrt(x.clone() * x.clone() + 1.0) / Expr::cosh(x.clone()),
            ];
            for expr in candidates {
                match expr.compare_num1D("x", 0.5, 2.0, 100, 1e-6) {
                    Ok((norm, ok)) => println!("{}: norm = {:e}, within tolerance: {}", expr, norm, ok),
                    Err(e) => warn!("{}: {}", expr, e),
                }
            }
        }
        4 => {
            // SUBSTITUTION AND COPY-WITH-UPDATE
            let (x, y, z) = crate::symbols!(x, y, z);
            let expr = Expr::exp(x.clone()) * y.clone() - z.clone();
            println!("expr = {}", expr);
            println!("expr with x -> sinh(z): {}", expr.substitute_variable("x", &Expr::sinh(z)));
            println!(
                "expr with configured bindings: {}",
                expr.set_variables(&config.bindings).simplify()
            );
            println!("left branch replaced: {}", expr.with_left(Expr::cosh(y)));
            println!(
                "right branch replaced: {}",
                expr.with_right(Expr::Const(-1.5))
            );
            println!(
                "nodes: {}, depth: {}",
                expr.node_count(),
                expr.depth()
            );
        }
        _ => {
            println!("example {} not found, try 0..=4", example);
        }
    }
}
