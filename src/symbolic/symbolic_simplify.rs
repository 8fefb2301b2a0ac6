//! # Symbolic Expression Simplification Module
//!
//! Brings an expression into a canonical form: a sparse polynomial whose "variables" are atoms.
//!
//! ## Simplification Strategy
//!
//! 1. **Constant Folding**: arithmetic on numerical constants and functions of constants are evaluated
//! 2. **Like Term Collection**: 3x + 2x = 5x, x*x = x^2, x/x = 1
//! 3. **Distribution**: products of sums are expanded
//! 4. **Atoms**: variables and every irreducible subexpression (sin(x), tg(x), exp(2x), a sum raised
//!    to an integer power, a power with a symbolic exponent) are treated as opaque factors, keyed by
//!    their canonical printed form
//!
//! Repeated derivatives of tg(x) stay polynomials in the atom tg(x) and never grow into nested
//! quotients. The printed result is deterministic: terms are ordered by their monomial key.

use crate::symbolic::symbolic_engine::Expr;
use std::collections::BTreeMap;

/// Represents the atom part of a polynomial term (monomial).
///
/// A monomial key encodes which atoms appear in a term and their respective
/// exponents. For example, the term `3x^2 tg(x)` has monomial key `{"tg(x)": 1, "x": 2}`
/// and coefficient `3`. Negative exponents stand for factors of the denominator.
///
/// ## Examples
///
/// - `x^2` → `MonomialKey({"x": 2})`
/// - `x/y^3` → `MonomialKey({"x": 1, "y": -3})`
/// - `5` (constant) → `MonomialKey({})` (empty map)
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonomialKey(pub BTreeMap<String, i32>);

impl MonomialKey {
    fn unit() -> Self {
        MonomialKey(BTreeMap::new())
    }

    fn single(atom: String, power: i32) -> Self {
        let mut map = BTreeMap::new();
        if power != 0 {
            map.insert(atom, power);
        }
        MonomialKey(map)
    }

    /// `None` when an exponent leaves the i32 range
    fn times(&self, other: &MonomialKey) -> Option<MonomialKey> {
        let mut map = self.0.clone();
        for (atom, power) in &other.0 {
            let entry = map.entry(atom.clone()).or_insert(0);
            *entry = entry.checked_add(*power)?;
            if *entry == 0 {
                map.remove(atom);
            }
        }
        Some(MonomialKey(map))
    }

    /// `None` when an exponent leaves the i32 range
    fn scaled(&self, n: i32) -> Option<MonomialKey> {
        if n == 0 {
            return Some(MonomialKey::unit());
        }
        self.0
            .iter()
            .map(|(a, p)| p.checked_mul(n).map(|p| (a.clone(), p)))
            .collect::<Option<BTreeMap<_, _>>>()
            .map(MonomialKey)
    }
}

/// monomial -> coefficient; zero coefficients are never stored
type Polynomial = BTreeMap<MonomialKey, f64>;

fn constant(c: f64) -> Polynomial {
    let mut poly = Polynomial::new();
    if c != 0.0 {
        poly.insert(MonomialKey::unit(), c);
    }
    poly
}

fn as_constant(poly: &Polynomial) -> Option<f64> {
    match poly.len() {
        0 => Some(0.0),
        1 => poly.get(&MonomialKey::unit()).copied(),
        _ => None,
    }
}

fn add_scaled(acc: &mut Polynomial, other: &Polynomial, scale: f64) {
    for (key, coeff) in other {
        let entry = acc.entry(key.clone()).or_insert(0.0);
        *entry += coeff * scale;
        if *entry == 0.0 {
            acc.remove(key);
        }
    }
}

fn is_integer(value: f64) -> bool {
    value.fract() == 0.0 && value.abs() <= i32::MAX as f64
}

fn product(factors: Vec<Expr>) -> Expr {
    factors
        .into_iter()
        .reduce(|a, b| Expr::Mul(Box::new(a), Box::new(b)))
        .unwrap_or(Expr::Const(1.0))
}

/// Holds the atoms met while converting one expression.
struct Canonicalizer {
    atoms: BTreeMap<String, Expr>,
}

impl Canonicalizer {
    fn new() -> Self {
        Canonicalizer {
            atoms: BTreeMap::new(),
        }
    }

    fn atom_key(&mut self, expr: Expr) -> String {
        let key = expr.to_string();
        self.atoms.entry(key.clone()).or_insert(expr);
        key
    }

    fn atom(&mut self, expr: Expr, power: i32) -> Polynomial {
        let key = self.atom_key(expr);
        BTreeMap::from([(MonomialKey::single(key, power), 1.0)])
    }

    fn convert(&mut self, expr: &Expr) -> Polynomial {
        match expr {
            Expr::Const(c) => constant(*c),
            Expr::Var(_) => self.atom(expr.clone(), 1),
            Expr::Add(lhs, rhs) => {
                let mut sum = self.convert(lhs);
                let rhs = self.convert(rhs);
                add_scaled(&mut sum, &rhs, 1.0);
                sum
            }
            Expr::Sub(lhs, rhs) => {
                let mut sum = self.convert(lhs);
                let rhs = self.convert(rhs);
                add_scaled(&mut sum, &rhs, -1.0);
                sum
            }
            Expr::Mul(lhs, rhs) => {
                let lhs = self.convert(lhs);
                let rhs = self.convert(rhs);
                self.multiply(&lhs, &rhs)
            }
            Expr::Div(num, den) => {
                let num = self.convert(num);
                let den = self.convert(den);
                let inverse = self.integer_power(den, -1);
                self.multiply(&num, &inverse)
            }
            Expr::Pow(base, exp) => {
                let base = self.convert(base);
                let exp = self.convert(exp);
                match as_constant(&exp) {
                    // 0^0 is taken as 1
                    Some(n) if n == 0.0 => constant(1.0),
                    Some(n) if is_integer(n) => self.integer_power(base, n as i32),
                    Some(n) => match as_constant(&base) {
                        Some(b) if b.powf(n).is_finite() => constant(b.powf(n)),
                        _ => {
                            let base = self.rebuild(&base);
                            self.atom(Expr::Pow(Box::new(base), Box::new(Expr::Const(n))), 1)
                        }
                    },
                    None => {
                        let base = self.rebuild(&base);
                        let exp = self.rebuild(&exp);
                        self.atom(Expr::Pow(Box::new(base), Box::new(exp)), 1)
                    }
                }
            }
            Expr::Exp(arg) => self.function(arg, Expr::Exp, f64::exp),
            Expr::Ln(arg) => self.function(arg, Expr::Ln, f64::ln),
            Expr::sin(arg) => self.function(arg, Expr::sin, f64::sin),
            Expr::cos(arg) => self.function(arg, Expr::cos, f64::cos),
            Expr::tg(arg) => self.function(arg, Expr::tg, f64::tan),
        }
    }

    fn multiply(&mut self, lhs: &Polynomial, rhs: &Polynomial) -> Polynomial {
        let mut product = Polynomial::new();
        for (key_l, coeff_l) in lhs {
            for (key_r, coeff_r) in rhs {
                let coeff = coeff_l * coeff_r;
                let term = match key_l.times(key_r) {
                    Some(key) => BTreeMap::from([(key, coeff)]),
                    // exponents too large to combine: the product stays an opaque atom
                    None => {
                        let factors = Expr::Mul(
                            Box::new(self.monomial_expr(key_l, 1.0)),
                            Box::new(self.monomial_expr(key_r, 1.0)),
                        );
                        let key = self.atom_key(factors);
                        BTreeMap::from([(MonomialKey::single(key, 1), coeff)])
                    }
                };
                add_scaled(&mut product, &term, 1.0);
            }
        }
        product
    }

    /// Functions of constants are folded when the value is finite, otherwise kept as atoms.
    fn function(
        &mut self,
        arg: &Expr,
        build: fn(Box<Expr>) -> Expr,
        eval: fn(f64) -> f64,
    ) -> Polynomial {
        let arg = self.convert(arg);
        if let Some(c) = as_constant(&arg) {
            let value = eval(c);
            if value.is_finite() {
                return constant(value);
            }
        }
        let arg = self.rebuild(&arg);
        self.atom(build(Box::new(arg)), 1)
    }

    /// Powers of a single monomial are computed; a sum raised to any power becomes a power of
    /// an atom. Quotient-rule derivatives then cancel: g'/g^2 keeps one atom g whose exponent
    /// drops by one per order instead of a denominator that doubles.
    fn integer_power(&mut self, base: Polynomial, n: i32) -> Polynomial {
        if base.len() == 1 {
            if let Some((key, coeff)) = base.iter().next() {
                if let Some(scaled) = key.scaled(n) {
                    return BTreeMap::from([(scaled, coeff.powi(n))]);
                }
            }
        }
        if base.is_empty() && n > 0 {
            return Polynomial::new();
        }
        // a sum, 1/0, or a monomial whose exponents would overflow
        let base = self.rebuild(&base);
        self.atom(base, n)
    }

    fn monomial_expr(&self, key: &MonomialKey, coeff: f64) -> Expr {
        let mut numerator = Vec::new();
        let mut denominator = Vec::new();
        for (name, power) in &key.0 {
            let atom = self
                .atoms
                .get(name)
                .cloned()
                .unwrap_or_else(|| Expr::Var(name.clone()));
            let factor = if power.unsigned_abs() == 1 {
                atom
            } else {
                Expr::Pow(Box::new(atom), Box::new(Expr::Const(power.unsigned_abs() as f64)))
            };
            if *power > 0 {
                numerator.push(factor);
            } else {
                denominator.push(factor);
            }
        }
        if coeff != 1.0 || numerator.is_empty() {
            numerator.insert(0, Expr::Const(coeff));
        }
        let numerator = product(numerator);
        if denominator.is_empty() {
            numerator
        } else {
            Expr::Div(Box::new(numerator), Box::new(product(denominator)))
        }
    }

    fn rebuild(&self, poly: &Polynomial) -> Expr {
        let mut result: Option<Expr> = None;
        for (key, coeff) in poly {
            result = Some(match result {
                None => self.monomial_expr(key, *coeff),
                Some(acc) if *coeff < 0.0 => {
                    Expr::Sub(Box::new(acc), Box::new(self.monomial_expr(key, -coeff)))
                }
                Some(acc) => Expr::Add(Box::new(acc), Box::new(self.monomial_expr(key, *coeff))),
            });
        }
        result.unwrap_or(Expr::Const(0.0))
    }
}

impl Expr {
    /// Canonical simplified form of the expression.
    ///
    /// Mathematically equal inputs that differ only by term order, constant arithmetic or
    /// like-term grouping produce the same tree.
    ///
    /// ## Examples
    ///
    /// - `x + x` → `(2 * x)`
    /// - `(x + 1) * (x - 1)` → `(-1 + (x ^ 2))`
    /// - `0 * sin(x)` → `0`
    pub fn simplify(&self) -> Expr {
        let mut canonicalizer = Canonicalizer::new();
        let poly = canonicalizer.convert(self);
        canonicalizer.rebuild(&poly)
    }
}
