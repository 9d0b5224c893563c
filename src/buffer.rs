// src/buffer.rs
//! Owned, resizable array of `f64` used as scratch space throughout the simulation loop.
//!
//! Size and capacity are tracked separately: shrinking keeps the allocation and a
//! later `resize` back up to the old capacity does not reallocate. Element-wise
//! arithmetic against another buffer reports a [`McError::DimensionMismatch`] when
//! the sizes differ; arithmetic against a scalar goes through the `*Assign` operators.

use crate::error::{McError, McResult};
use std::ops::{AddAssign, Deref, DerefMut, DivAssign, MulAssign, SubAssign};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumericBuffer {
    values: Vec<f64>,
}

impl NumericBuffer {
    pub fn new() -> Self {
        Self { values: Vec::new() }
    }

    /// Buffer of `size` elements. Contents are zeroed but callers should not rely on it.
    pub fn with_size(size: usize) -> Self {
        Self {
            values: vec![0.0; size],
        }
    }

    pub fn from_slice(values: &[f64]) -> Self {
        Self {
            values: values.to_vec(),
        }
    }

    pub fn size(&self) -> usize {
        self.values.len()
    }

    pub fn capacity(&self) -> usize {
        self.values.capacity()
    }

    /// Change the logical size. Growth beyond the current capacity reallocates
    /// with amortized headroom; shrinking never releases memory.
    pub fn resize(&mut self, new_size: usize) {
        self.values.resize(new_size, 0.0);
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.values
    }

    /// Copy `other` into `self`, reusing the allocation when it is large enough.
    pub fn assign(&mut self, other: &NumericBuffer) {
        self.values.clear();
        self.values.extend_from_slice(&other.values);
    }

    pub fn sum(&self) -> f64 {
        self.values.iter().sum()
    }

    pub fn min(&self) -> McResult<f64> {
        self.values
            .iter()
            .copied()
            .reduce(f64::min)
            .ok_or_else(|| McError::EmptyInput {
                operation: "min".to_string(),
            })
    }

    pub fn max(&self) -> McResult<f64> {
        self.values
            .iter()
            .copied()
            .reduce(f64::max)
            .ok_or_else(|| McError::EmptyInput {
                operation: "max".to_string(),
            })
    }

    /// New buffer with `f` mapped over every element; `self` is left untouched.
    pub fn apply<F: Fn(f64) -> f64>(&self, f: F) -> NumericBuffer {
        NumericBuffer {
            values: self.values.iter().map(|&x| f(x)).collect(),
        }
    }

    pub fn try_add_assign(&mut self, operand: &NumericBuffer) -> McResult<()> {
        self.zip_with(operand, "+=", |a, b| a + b)
    }

    pub fn try_sub_assign(&mut self, operand: &NumericBuffer) -> McResult<()> {
        self.zip_with(operand, "-=", |a, b| a - b)
    }

    pub fn try_mul_assign(&mut self, operand: &NumericBuffer) -> McResult<()> {
        self.zip_with(operand, "*=", |a, b| a * b)
    }

    pub fn try_div_assign(&mut self, operand: &NumericBuffer) -> McResult<()> {
        self.zip_with(operand, "/=", |a, b| a / b)
    }

    fn zip_with<F: Fn(f64, f64) -> f64>(
        &mut self,
        operand: &NumericBuffer,
        op: &str,
        f: F,
    ) -> McResult<()> {
        if self.size() != operand.size() {
            return Err(McError::dimension(
                &format!("buffer {}", op),
                self.size(),
                operand.size(),
            ));
        }
        for (a, &b) in self.values.iter_mut().zip(operand.values.iter()) {
            *a = f(*a, b);
        }
        Ok(())
    }
}

impl From<Vec<f64>> for NumericBuffer {
    fn from(values: Vec<f64>) -> Self {
        Self { values }
    }
}

impl Deref for NumericBuffer {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.values
    }
}

impl DerefMut for NumericBuffer {
    fn deref_mut(&mut self) -> &mut [f64] {
        &mut self.values
    }
}

macro_rules! scalar_assign_op {
    ($trait:ident, $method:ident, $op:tt) => {
        impl $trait<f64> for NumericBuffer {
            fn $method(&mut self, operand: f64) {
                for value in self.values.iter_mut() {
                    *value $op operand;
                }
            }
        }
    };
}

scalar_assign_op!(AddAssign, add_assign, +=);
scalar_assign_op!(SubAssign, sub_assign, -=);
scalar_assign_op!(MulAssign, mul_assign, *=);
scalar_assign_op!(DivAssign, div_assign, /=);
