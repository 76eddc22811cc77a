//! Fixed-size row-major 2D array

use serde::{Deserialize, Serialize};

/// A dense 2D array stored in row-major order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Array2D<T> {
    width: usize,
    height: usize,
    data: Vec<T>,
}

impl<T> Array2D<T> {
    /// Build an array by calling `f(x, y)` for every cell
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Wrap an existing row-major buffer. Returns `None` if the length does not fit.
    pub fn from_vec(width: usize, height: usize, data: Vec<T>) -> Option<Self> {
        if data.len() != width * height {
            return None;
        }
        Some(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn index(&self, x: usize, y: usize) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y * self.width + x)
        } else {
            None
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        self.index(x, y).map(|idx| &self.data[idx])
    }

    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut T> {
        self.index(x, y).map(move |idx| &mut self.data[idx])
    }

    /// Set a cell. Out-of-range coordinates are ignored.
    pub fn set(&mut self, x: usize, y: usize, value: T) {
        if let Some(idx) = self.index(x, y) {
            self.data[idx] = value;
        }
    }

    /// Iterate `(x, y, value)` in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &T)> {
        let width = self.width.max(1);
        self.data
            .iter()
            .enumerate()
            .map(move |(idx, value)| (idx % width, idx / width, value))
    }

    /// Row-major view of the underlying data
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}

impl<T: Clone> Array2D<T> {
    /// Build an array with every cell set to `value`
    pub fn filled(width: usize, height: usize, value: T) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_fn_is_row_major() {
        let array = Array2D::from_fn(3, 2, |x, y| y * 10 + x);
        assert_eq!(array.as_slice(), &[0, 1, 2, 10, 11, 12]);
        assert_eq!(array.get(2, 1), Some(&12));
    }

    #[test]
    fn test_out_of_range_access() {
        let mut array = Array2D::filled(2, 2, 0u8);
        assert_eq!(array.get(2, 0), None);
        assert_eq!(array.get(0, 2), None);
        array.set(5, 5, 9);
        assert!(array.iter().all(|(_, _, v)| *v == 0));
    }

    #[test]
    fn test_from_vec_checks_length() {
        assert!(Array2D::from_vec(2, 2, vec![1, 2, 3]).is_none());
        let array = Array2D::from_vec(2, 2, vec![1, 2, 3, 4]).unwrap();
        assert_eq!(array.get(1, 1), Some(&4));
    }

    #[test]
    fn test_iter_coordinates() {
        let array = Array2D::from_fn(2, 3, |x, y| (x, y));
        for (x, y, value) in array.iter() {
            assert_eq!((x, y), *value);
        }
        assert_eq!(array.iter().count(), 6);
    }
}
