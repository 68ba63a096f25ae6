use crate::error::{HarrisError, HarrisResult};

/// Dense per-pixel corner response grid, normalized to the 0-255 range
#[derive(Debug, Clone)]
pub struct ResponseMap {
    values: Vec<f32>,
    width: usize,
    height: usize,
}

impl ResponseMap {
    /// Wrap an existing row-major response grid
    pub fn from_values(values: Vec<f32>, width: usize, height: usize) -> HarrisResult<Self> {
        let expected_len = width * height;
        if values.len() != expected_len {
            return Err(HarrisError::InvalidImageData {
                expected_len,
                actual_len: values.len(),
            });
        }
        Ok(Self { values, width, height })
    }

    /// All-zero map of the given dimensions
    pub fn zeros(width: usize, height: usize) -> Self {
        Self {
            values: vec![0.0; width * height],
            width,
            height,
        }
    }

    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.values[y * self.width + x]
    }

    pub fn set(&mut self, x: usize, y: usize, value: f32) {
        self.values[y * self.width + x] = value;
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }
}
