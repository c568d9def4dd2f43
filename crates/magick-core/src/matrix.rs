//! Square matrix argument
//!
//! Passed to the native library as its row-major values plus the order.

use crate::error::{MagickError, Result};

/// Number of values in a matrix of `order`, if it fits in one allocation.
fn element_count(order: usize) -> Option<usize> {
    let len = order.checked_mul(order)?;
    let bytes = len.checked_mul(std::mem::size_of::<f64>())?;
    (bytes <= isize::MAX as usize).then_some(len)
}

#[derive(Debug, Clone, PartialEq)]
pub struct DoubleMatrix {
    order: usize,
    values: Vec<f64>,
}

impl DoubleMatrix {
    /// A zero-filled matrix of the given order.
    pub fn new(order: usize) -> Result<Self> {
        if order < 1 {
            return Err(MagickError::invalid_argument("order", "must be at least 1"));
        }
        let len = element_count(order)
            .ok_or_else(|| MagickError::invalid_argument("order", format!("{} is too large", order)))?;
        Ok(DoubleMatrix {
            order,
            values: vec![0.0; len],
        })
    }

    /// A matrix from row-major values; the count must be a perfect square.
    pub fn from_values(values: &[f64]) -> Result<Self> {
        let order = (values.len() as f64).sqrt().round() as usize;
        if order < 1 || order.checked_mul(order) != Some(values.len()) {
            return Err(MagickError::invalid_argument(
                "values",
                format!("{} values do not form a square matrix", values.len()),
            ));
        }
        Ok(DoubleMatrix {
            order,
            values: values.to_vec(),
        })
    }

    pub fn order(&self) -> usize {
        self.order
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    fn index(&self, x: usize, y: usize) -> Result<usize> {
        if x >= self.order || y >= self.order {
            return Err(MagickError::invalid_argument(
                "x, y",
                format!("({}, {}) is outside a matrix of order {}", x, y, self.order),
            ));
        }
        Ok(y * self.order + x)
    }

    pub fn get_value(&self, x: usize, y: usize) -> Result<f64> {
        Ok(self.values[self.index(x, y)?])
    }

    pub fn set_value(&mut self, x: usize, y: usize, value: f64) -> Result<()> {
        let index = self.index(x, y)?;
        self.values[index] = value;
        Ok(())
    }

    pub fn set_row(&mut self, y: usize, values: &[f64]) -> Result<()> {
        self.check_line(values)?;
        for (x, value) in values.iter().enumerate() {
            self.set_value(x, y, *value)?;
        }
        Ok(())
    }

    pub fn set_column(&mut self, x: usize, values: &[f64]) -> Result<()> {
        self.check_line(values)?;
        for (y, value) in values.iter().enumerate() {
            self.set_value(x, y, *value)?;
        }
        Ok(())
    }

    fn check_line(&self, values: &[f64]) -> Result<()> {
        if values.len() != self.order {
            return Err(MagickError::invalid_argument(
                "values",
                format!("expected {} values, got {}", self.order, values.len()),
            ));
        }
        Ok(())
    }
}
