//! Blade shaping functions.
//!
//! A shaping function warps a blade's vertical placement across its angular
//! span. The blade only ever uses it through the normalized ratio
//! `(f(t) - f(0)) / (f(span) - f(0))`, so any real function works as long as
//! it takes different values at `0` and at the span.

use std::fmt;
use std::sync::Arc;

use crate::error::{GeometryError, Result};

/// A named real-valued function `f64 -> f64`.
#[derive(Clone)]
pub struct ShapingFn {
    name: String,
    func: Arc<dyn Fn(f64) -> f64 + Send + Sync>,
}

impl ShapingFn {
    /// Wrap an arbitrary function.
    pub fn new(name: impl Into<String>, func: impl Fn(f64) -> f64 + Send + Sync + 'static) -> Self {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    /// `f(t) = t`. Blade height rises linearly across the span.
    pub fn identity() -> Self {
        Self::new("identity", |t| t)
    }

    /// `f(t) = t²`.
    pub fn quadratic() -> Self {
        Self::new("quadratic", |t| t * t)
    }

    /// `f(t) = t³`.
    pub fn cubic() -> Self {
        Self::new("cubic", |t| t * t * t)
    }

    /// `f(t) = sin(t)`. Monotonic for spans up to π/2.
    pub fn sine() -> Self {
        Self::new("sine", f64::sin)
    }

    /// `f(t) = t^p`.
    pub fn power(p: f64) -> Self {
        Self::new(format!("power:{p}"), move |t| t.powf(p))
    }

    /// `f(t) = c`. Always degenerate; every blade sampled with it is undefined.
    pub fn constant(c: f64) -> Self {
        Self::new(format!("constant:{c}"), move |_| c)
    }

    /// Look up a preset by name.
    ///
    /// Accepts `identity`, `quadratic`, `cubic`, `sine`, `power:<p>` and
    /// `constant:<c>`.
    pub fn from_name(name: &str) -> Result<Self> {
        let unknown = || GeometryError::UnknownShaping(name.to_string());
        let (head, arg) = match name.split_once(':') {
            Some((head, arg)) => (head.trim(), Some(arg.trim())),
            None => (name.trim(), None),
        };
        let parse_arg = || -> Result<f64> {
            arg.and_then(|a| a.parse::<f64>().ok())
                .filter(|v| v.is_finite())
                .ok_or_else(unknown)
        };
        match (head, arg) {
            ("identity", None) => Ok(Self::identity()),
            ("quadratic", None) => Ok(Self::quadratic()),
            ("cubic", None) => Ok(Self::cubic()),
            ("sine", None) => Ok(Self::sine()),
            ("power", Some(_)) => Ok(Self::power(parse_arg()?)),
            ("constant", Some(_)) => Ok(Self::constant(parse_arg()?)),
            _ => Err(unknown()),
        }
    }

    /// Name this function was created with.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Evaluate the function.
    #[inline]
    pub fn eval(&self, t: f64) -> f64 {
        (self.func)(t)
    }
}

impl Default for ShapingFn {
    fn default() -> Self {
        Self::identity()
    }
}

impl fmt::Debug for ShapingFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ShapingFn").field(&self.name).finish()
    }
}
