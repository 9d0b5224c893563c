//! Option Payoff Functions
//!
//! # Mathematical Definitions
//!
//! Scalar payoffs map one spot value to an amount:
//! - **Call**: max(S - K, 0)
//! - **Put**: max(K - S, 0)
//! - **Forward**: S - K
//! - **Double digital**: 1 if L < S < U, else 0
//!
//! Path-dependent products (see [`crate::mc::path_dependent`]) reduce a path to a
//! spot-like number first and then apply one of these.
//!
//! # Registry
//!
//! [`PayoffRegistry`] maps string identifiers to constructor closures. It is an
//! ordinary value built by the caller, so registration order is explicit.

use crate::error::{McError, McResult};
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PayOff {
    /// max(S - K, 0)
    Call { strike: f64 },

    /// max(K - S, 0)
    Put { strike: f64 },

    /// S - K, can be negative
    Forward { strike: f64 },

    /// 1 strictly inside (lower, upper), 0 on or outside the levels
    DoubleDigital { lower: f64, upper: f64 },
}

impl PayOff {
    pub fn evaluate(&self, spot: f64) -> f64 {
        match *self {
            PayOff::Call { strike } => (spot - strike).max(0.0),
            PayOff::Put { strike } => (strike - spot).max(0.0),
            PayOff::Forward { strike } => spot - strike,
            PayOff::DoubleDigital { lower, upper } => {
                if spot <= lower || spot >= upper {
                    0.0
                } else {
                    1.0
                }
            }
        }
    }
}

type PayOffCreator = Box<dyn Fn(&[f64]) -> Option<PayOff> + Send + Sync>;

/// String-keyed payoff constructors
#[derive(Default)]
pub struct PayoffRegistry {
    creators: HashMap<String, PayOffCreator>,
}

impl PayoffRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with `call`, `put`, `forward` (one argument: strike) and
    /// `double_digital` (two arguments: lower, upper).
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("call", |args| match args {
            [strike] => Some(PayOff::Call { strike: *strike }),
            _ => None,
        });
        registry.register("put", |args| match args {
            [strike] => Some(PayOff::Put { strike: *strike }),
            _ => None,
        });
        registry.register("forward", |args| match args {
            [strike] => Some(PayOff::Forward { strike: *strike }),
            _ => None,
        });
        registry.register("double_digital", |args| match args {
            [lower, upper] if lower < upper => Some(PayOff::DoubleDigital {
                lower: *lower,
                upper: *upper,
            }),
            _ => None,
        });
        registry
    }

    /// Register (or replace) the constructor for `id`.
    pub fn register<F>(&mut self, id: impl Into<String>, creator: F)
    where
        F: Fn(&[f64]) -> Option<PayOff> + Send + Sync + 'static,
    {
        self.creators.insert(id.into(), Box::new(creator));
    }

    pub fn contains(&self, id: &str) -> bool {
        self.creators.contains_key(id)
    }

    /// Sorted list of registered identifiers
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.creators.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Build the payoff registered under `id`.
    ///
    /// Returns `None` for an unknown identifier or arguments the constructor rejects.
    pub fn create(&self, id: &str, args: &[f64]) -> Option<PayOff> {
        match self.creators.get(id) {
            Some(creator) => {
                let payoff = creator(args);
                if payoff.is_none() {
                    tracing::warn!(id, ?args, "payoff constructor rejected arguments");
                }
                payoff
            }
            None => {
                tracing::warn!(id, "{} is an unknown payoff", id);
                None
            }
        }
    }

    /// Like [`create`](Self::create) but with the failure spelled out.
    pub fn try_create(&self, id: &str, args: &[f64]) -> McResult<PayOff> {
        if !self.contains(id) {
            return Err(McError::UnknownPayoff { id: id.to_string() });
        }
        self.create(id, args).ok_or_else(|| McError::InvalidConfiguration {
            field: id.to_string(),
            reason: format!("constructor rejected arguments {:?}", args),
        })
    }
}

impl fmt::Debug for PayoffRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PayoffRegistry")
            .field("ids", &self.ids())
            .finish()
    }
}
