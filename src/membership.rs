//! Membership function shapes.
//!
//! The free functions are the raw formulas, generic over any float type. Each
//! one picks its branch by comparing `x` against the breakpoints before doing
//! any arithmetic, so a zero-width ramp is never divided through and instead
//! resolves to the plateau on the side `x` falls on.
//!
//! [`MembershipFunction`] is the tagged value stored in a definition.

use num::Float;
use serde::{Deserialize, Serialize};

use crate::error::{FuzzyError, Result};
use crate::math::interp;

fn two<F: Float>() -> F {
    F::one() + F::one()
}

/// Triangle with feet at `a` and `c` and its peak at `b`.
pub fn tri<F: Float>(x: F, a: F, b: F, c: F) -> F {
    if x < a || x > c {
        F::zero()
    } else if x == b {
        F::one()
    } else if x < b {
        (x - a) / (b - a)
    } else {
        (c - x) / (c - b)
    }
}

/// Trapezoid rising over `[a, b]`, flat over `[b, c]`, falling over `[c, d]`.
pub fn trap<F: Float>(x: F, a: F, b: F, c: F, d: F) -> F {
    if x < a || x > d {
        F::zero()
    } else if b <= x && x <= c {
        F::one()
    } else if x < b {
        (x - a) / (b - a)
    } else {
        (d - x) / (d - c)
    }
}

/// Left shoulder: 1 below `a`, falling to 0 at `b`.
pub fn linz<F: Float>(x: F, a: F, b: F) -> F {
    if x < a {
        F::one()
    } else if x >= b {
        F::zero()
    } else {
        (b - x) / (b - a)
    }
}

/// Right shoulder: 0 below `a`, rising to 1 at `b`.
pub fn lins<F: Float>(x: F, a: F, b: F) -> F {
    if x < a {
        F::zero()
    } else if x >= b {
        F::one()
    } else {
        (x - a) / (b - a)
    }
}

pub fn gauss<F: Float>(x: F, s: F, c: F) -> F {
    if s == F::zero() {
        return if x == c { F::one() } else { F::zero() };
    }

    let d = x - c;

    (-(d * d) / (two::<F>() * s * s)).exp()
}

/// Two Gaussian flanks joined by a plateau over `[c1, c2]`.
pub fn gauss2<F: Float>(x: F, s1: F, c1: F, s2: F, c2: F) -> F {
    if x < c1 {
        gauss(x, s1, c1)
    } else if x > c2 {
        gauss(x, s2, c2)
    } else {
        F::one()
    }
}

/// Generalized bell of half-width `a`, slope `b`, centred on `c`.
pub fn gbell<F: Float>(x: F, a: F, b: F, c: F) -> F {
    if a == F::zero() {
        return if x == c { F::one() } else { F::zero() };
    }

    F::one() / (F::one() + ((x - c) / a).abs().powf(two::<F>() * b))
}

pub fn sig<F: Float>(x: F, a: F, c: F) -> F {
    F::one() / (F::one() + (-a * (x - c)).exp())
}

/// Difference of two sigmoids.
pub fn dsig<F: Float>(x: F, a1: F, c1: F, a2: F, c2: F) -> F {
    sig(x, a1, c1) - sig(x, a2, c2)
}

/// Product of two sigmoids.
pub fn psig<F: Float>(x: F, a1: F, c1: F, a2: F, c2: F) -> F {
    sig(x, a1, c1) * sig(x, a2, c2)
}

/// Quadratic S-curve rising from 0 at `a` to 1 at `b`.
pub fn s<F: Float>(x: F, a: F, b: F) -> F {
    if x < a {
        F::zero()
    } else if x >= b {
        F::one()
    } else if x <= (a + b) / two() {
        let t = (x - a) / (b - a);
        two::<F>() * t * t
    } else {
        let t = (x - b) / (b - a);
        F::one() - two::<F>() * t * t
    }
}

/// Quadratic Z-curve falling from 1 at `a` to 0 at `b`.
pub fn z<F: Float>(x: F, a: F, b: F) -> F {
    if x < a {
        F::one()
    } else if x >= b {
        F::zero()
    } else if x <= (a + b) / two() {
        let t = (x - a) / (b - a);
        F::one() - two::<F>() * t * t
    } else {
        let t = (x - b) / (b - a);
        two::<F>() * t * t
    }
}

/// S-rise over `[a, b]`, plateau over `[b, c]`, Z-fall over `[c, d]`.
pub fn pi<F: Float>(x: F, a: F, b: F, c: F, d: F) -> F {
    if x < b {
        s(x, a, b)
    } else if x > c {
        z(x, c, d)
    } else {
        F::one()
    }
}

/// A membership function: a shape tag and its ordered parameters.
///
/// Serialised as `{"shape": "<tag>", "params": [..]}`. `points` accepts either
/// `[[x, y], ..]` pairs or a flat `x, y` list, and is sorted by x on the way in.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMembership", into = "RawMembership")]
pub enum MembershipFunction {
    Tri(f64, f64, f64),
    Trap(f64, f64, f64, f64),
    Linz(f64, f64),
    Lins(f64, f64),
    Gauss(f64, f64),
    Gauss2(f64, f64, f64, f64),
    Gbell(f64, f64, f64),
    Sig(f64, f64),
    Dsig(f64, f64, f64, f64),
    Psig(f64, f64, f64, f64),
    Z(f64, f64),
    S(f64, f64),
    Pi(f64, f64, f64, f64),
    /// Piecewise linear through `(x, degree)` points sorted by x
    Points(Vec<(f64, f64)>),
}

#[derive(Serialize, Deserialize)]
struct RawMembership {
    shape: String,
    params: RawParams,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawParams {
    Flat(Vec<f64>),
    Pairs(Vec<(f64, f64)>),
}

impl TryFrom<RawMembership> for MembershipFunction {
    type Error = FuzzyError;

    fn try_from(raw: RawMembership) -> Result<Self> {
        match raw.params {
            RawParams::Flat(params) => Self::from_params(&raw.shape, &params),
            RawParams::Pairs(points) if raw.shape == "points" => {
                let mf = Self::points(points);

                mf.check()?;
                Ok(mf)
            },
            RawParams::Pairs(_) => Err(FuzzyError::InvalidShape {
                shape: raw.shape,
                reason: "expected a flat parameter list".to_owned(),
            }),
        }
    }
}

impl From<MembershipFunction> for RawMembership {
    fn from(mf: MembershipFunction) -> Self {
        let shape = mf.shape().to_owned();
        let params = match mf {
            MembershipFunction::Points(points) => RawParams::Pairs(points),
            other => RawParams::Flat(other.params()),
        };

        RawMembership { shape, params }
    }
}

impl MembershipFunction {
    /// A piecewise linear function through `points`, sorted by x.
    pub fn points(points: impl IntoIterator<Item = (f64, f64)>) -> Self {
        let mut points: Vec<_> = points.into_iter().collect();

        points.sort_by(|l, r| l.0.total_cmp(&r.0));
        Self::Points(points)
    }

    /// Builds a membership function from its shape tag and parameter list.
    ///
    /// `points` takes a flat `x0, y0, x1, y1, ...` list.
    pub fn from_params(shape: &str, params: &[f64]) -> Result<Self> {
        let invalid = |reason: String| FuzzyError::InvalidShape {
            shape: shape.to_owned(),
            reason,
        };

        if let Some(bad) = params.iter().find(|p| !p.is_finite()) {
            return Err(invalid(format!("parameter {bad} is not finite")));
        }

        let arity = match shape {
            "linz" | "lins" | "gauss" | "sig" | "z" | "s" => 2,
            "tri" | "gbell" => 3,
            "trap" | "gauss2" | "dsig" | "psig" | "pi" => 4,
            "points" => {
                if params.is_empty() || params.len() % 2 != 0 {
                    return Err(invalid(format!(
                        "expected a non-empty list of x, y pairs, got {} value(s)",
                        params.len()
                    )));
                }

                return Ok(Self::points(params.chunks(2).map(|xy| (xy[0], xy[1]))));
            },
            _ => return Err(invalid("unknown shape".to_owned())),
        };

        if params.len() != arity {
            return Err(invalid(format!("expected {arity} parameters, got {}", params.len())));
        }

        let p = params;

        Ok(match shape {
            "tri" => Self::Tri(p[0], p[1], p[2]),
            "trap" => Self::Trap(p[0], p[1], p[2], p[3]),
            "linz" => Self::Linz(p[0], p[1]),
            "lins" => Self::Lins(p[0], p[1]),
            "gauss" => Self::Gauss(p[0], p[1]),
            "gauss2" => Self::Gauss2(p[0], p[1], p[2], p[3]),
            "gbell" => Self::Gbell(p[0], p[1], p[2]),
            "sig" => Self::Sig(p[0], p[1]),
            "dsig" => Self::Dsig(p[0], p[1], p[2], p[3]),
            "psig" => Self::Psig(p[0], p[1], p[2], p[3]),
            "z" => Self::Z(p[0], p[1]),
            "s" => Self::S(p[0], p[1]),
            _ => Self::Pi(p[0], p[1], p[2], p[3]),
        })
    }

    /// Fails with `InvalidShape` if any parameter is not finite, or if a
    /// `points` function has no breakpoints. Catches values built directly
    /// rather than through [`MembershipFunction::from_params`].
    pub fn check(&self) -> Result<()> {
        let invalid = |reason: String| FuzzyError::InvalidShape {
            shape: self.shape().to_owned(),
            reason,
        };

        match self {
            Self::Points(points) if points.is_empty() => Err(invalid("no breakpoints".to_owned())),
            Self::Points(points) => match points.iter().find(|(x, y)| !x.is_finite() || !y.is_finite()) {
                Some((x, y)) => Err(invalid(format!("breakpoint ({x}, {y}) is not finite"))),
                None => Ok(()),
            },
            _ => match self.params().into_iter().find(|p| !p.is_finite()) {
                Some(bad) => Err(invalid(format!("parameter {bad} is not finite"))),
                None => Ok(()),
            },
        }
    }

    /// The shape tag, as used by [`MembershipFunction::from_params`].
    pub fn shape(&self) -> &'static str {
        match self {
            Self::Tri(..) => "tri",
            Self::Trap(..) => "trap",
            Self::Linz(..) => "linz",
            Self::Lins(..) => "lins",
            Self::Gauss(..) => "gauss",
            Self::Gauss2(..) => "gauss2",
            Self::Gbell(..) => "gbell",
            Self::Sig(..) => "sig",
            Self::Dsig(..) => "dsig",
            Self::Psig(..) => "psig",
            Self::Z(..) => "z",
            Self::S(..) => "s",
            Self::Pi(..) => "pi",
            Self::Points(_) => "points",
        }
    }

    /// The numeric parameters in declaration order. For `points` these are
    /// the x coordinates only.
    pub fn params(&self) -> Vec<f64> {
        match *self {
            Self::Linz(a, b) | Self::Lins(a, b) | Self::Gauss(a, b) | Self::Sig(a, b) | Self::Z(a, b) | Self::S(a, b) => {
                vec![a, b]
            },
            Self::Tri(a, b, c) | Self::Gbell(a, b, c) => vec![a, b, c],
            Self::Trap(a, b, c, d)
            | Self::Gauss2(a, b, c, d)
            | Self::Dsig(a, b, c, d)
            | Self::Psig(a, b, c, d)
            | Self::Pi(a, b, c, d) => vec![a, b, c, d],
            Self::Points(ref points) => points.iter().map(|(x, _)| *x).collect(),
        }
    }

    /// Degree of membership of `x`.
    pub fn eval(&self, x: f64) -> f64 {
        match *self {
            Self::Tri(a, b, c) => tri(x, a, b, c),
            Self::Trap(a, b, c, d) => trap(x, a, b, c, d),
            Self::Linz(a, b) => linz(x, a, b),
            Self::Lins(a, b) => lins(x, a, b),
            Self::Gauss(sd, c) => gauss(x, sd, c),
            Self::Gauss2(s1, c1, s2, c2) => gauss2(x, s1, c1, s2, c2),
            Self::Gbell(a, b, c) => gbell(x, a, b, c),
            Self::Sig(a, c) => sig(x, a, c),
            Self::Dsig(a1, c1, a2, c2) => dsig(x, a1, c1, a2, c2),
            Self::Psig(a1, c1, a2, c2) => psig(x, a1, c1, a2, c2),
            Self::Z(a, b) => z(x, a, b),
            Self::S(a, b) => s(x, a, b),
            Self::Pi(a, b, c, d) => pi(x, a, b, c, d),
            Self::Points(ref points) if points.windows(2).all(|w| w[0].0 <= w[1].0) => interp(x, points),
            Self::Points(ref points) => {
                let mut sorted = points.clone();

                sorted.sort_by(|l, r| l.0.total_cmp(&r.0));
                interp(x, &sorted)
            },
        }
    }
}
