#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
///____________________________________________________________________________________________________________________________
/// # Symbolic engine
/// a module
/// 1) builds immutable expression trees from variables, constants, operators and functions
/// 2) answers structural queries: free variables, constantness, polynomial degree
/// 3) turns a symbolic expression into a string expression for printing and control results
///# Example#
/// ```
/// use RustedSymbolic::symbolic::symbolic_engine::Expr;
/// let (x, y) = RustedSymbolic::symbols!(x, y);
/// let expr = (x.clone() ^ 2.0) * y.clone() + Expr::sqrt(x);
/// println!("expr = {}", expr);
/// assert_eq!(expr.polynomial_degree(), None);
/// assert_eq!(expr.variables().len(), 2);
/// ```
/// ________________________________________________________________________________________________________________________________________________
pub mod symbolic_engine;
///________________________________________________________________________________________________________________________________________________
///
/// symbolic differentiation and its numeric check
/// Example#
/// ```
/// use RustedSymbolic::symbolic::symbolic_engine::Expr;
/// let x = Expr::var("x");
/// let f = Expr::sinh(x.clone()) * x;
/// let df = f.derivative("x").simplify();
/// println!("df/dx = {}", df);
/// let (norm, ok) = f.compare_num1D("x", 0.0, 2.0, 50, 1e-6).unwrap();
/// println!("norm = {}, ok = {}", norm, ok);
/// assert!(ok);
/// ```
pub mod symbolic_engine_derivatives;
///______________________________________________________________________________________________________________________________________________
/// error type shared by evaluation and differentiation
pub mod symbolic_errors;
/// numeric evaluation under variable bindings
pub mod symbolic_eval;
/// the two operator families: binary operators and single-argument functions
pub mod symbolic_functions;
///______________________________________________________________________________________________________________________________________________
/// rule-based algebraic simplification
/// Example#
/// ```
/// use RustedSymbolic::symbolic::symbolic_engine::Expr;
/// let (x, z) = (Expr::var("x"), Expr::var("z"));
/// let expr = x.clone() / (z.clone() / (x.clone() / z.clone()));
/// assert_eq!(expr.simplify().to_string(), "((x ^ 2) / (z ^ 2))");
/// ```
pub mod symbolic_simplify;
/// double-dispatch visitor protocol and the canonical renderer
pub mod symbolic_visitor;
///______________________________________________________________________________________________________________________________________________
/// linspace, central differences and the sample norm used by `compare_num1D`
/// _____________________________________________________________________________________________________________________________________________
pub mod utils;

#[cfg(test)]
mod symbolic_simplify_tests;
