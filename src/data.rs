use crate::errors::SaplingError;
use std::fmt;

/// Contiguous Column Major Matrix data container.
///
/// This structure borrows a dense matrix of values held in a single contiguous
/// memory block, in column-major order (Fortran-style). Column access is a plain
/// slice, which is what the split search iterates over.
///
/// # Type Parameters
/// * `T` - The numeric type of the data (e.g., `f64`).
pub struct Matrix<'a, T> {
    /// The raw data stored in a single slice.
    pub data: &'a [T],
    /// Indices into the data row-wise.
    pub index: Vec<usize>,
    /// Number of rows in the matrix.
    pub rows: usize,
    /// Number of columns in the matrix.
    pub cols: usize,
    stride1: usize,
    stride2: usize,
}

impl<'a, T> Matrix<'a, T> {
    // Defaults to column major
    /// Create a new Matrix.
    pub fn new(data: &'a [T], rows: usize, cols: usize) -> Self {
        Matrix {
            data,
            index: (0..rows).collect(),
            rows,
            cols,
            stride1: rows,
            stride2: 1,
        }
    }

    /// Get a single reference to an item in the matrix.
    ///
    /// * `i` - The ith row of the data to get.
    /// * `j` - the jth column of the data to get.
    pub fn get(&self, i: usize, j: usize) -> &T {
        &self.data[self.item_index(i, j)]
    }

    fn item_index(&self, i: usize, j: usize) -> usize {
        let mut idx = self.stride2 * i;
        idx += j * self.stride1;
        idx
    }

    /// Whether the backing slice holds exactly `rows * cols` values.
    pub fn is_consistent(&self) -> bool {
        self.rows.checked_mul(self.cols) == Some(self.data.len())
    }

    /// Get access to a row of the data, as an iterator.
    pub fn get_row_iter(&self, row: usize) -> std::iter::StepBy<std::iter::Skip<std::slice::Iter<'a, T>>> {
        self.data.iter().skip(row).step_by(self.rows)
    }

    /// Get an entire column in the matrix.
    ///
    /// * `col` - The index of the column to get.
    pub fn get_col(&self, col: usize) -> &[T] {
        let i = self.item_index(0, col);
        let j = self.item_index(self.rows, col);
        &self.data[i..j]
    }
}

impl<'a, T> Matrix<'a, T>
where
    T: Copy,
{
    /// Get a row of the data as a vector.
    pub fn get_row(&self, row: usize) -> Vec<T> {
        self.get_row_iter(row).copied().collect()
    }
}

/// Flatten row-major records into the column-major buffer `Matrix` expects.
///
/// Returns the buffer along with the number of rows and columns. Every row
/// must be as long as the first one.
pub fn to_column_major<T: Copy>(records: &[Vec<T>]) -> Result<(Vec<T>, usize, usize), SaplingError> {
    let rows = records.len();
    let cols = records.first().map_or(0, |r| r.len());
    if let Some((i, r)) = records.iter().enumerate().find(|(_, r)| r.len() != cols) {
        return Err(SaplingError::InvalidInput(format!(
            "row {} has {} values but row 0 has {}",
            i,
            r.len(),
            cols
        )));
    }
    let mut data = Vec::with_capacity(rows * cols);
    for j in 0..cols {
        data.extend(records.iter().map(|r| r[j]));
    }
    Ok((data, rows, cols))
}

impl<'a, T> fmt::Display for Matrix<'a, T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut val = String::new();
        for i in 0..self.rows {
            for j in 0..self.cols {
                val.push_str(self.get(i, j).to_string().as_str());
                if j == (self.cols - 1) {
                    val.push('\n');
                } else {
                    val.push(' ');
                }
            }
        }
        write!(f, "{}", val)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_get() {
        let v = vec![1, 2, 3, 5, 6, 7];
        let m = Matrix::new(&v, 2, 3);
        println!("{}", m);
        assert_eq!(m.get(0, 0), &1);
        assert_eq!(m.get(1, 0), &2);
        assert_eq!(m.get(1, 2), &7);
    }

    #[test]
    fn test_matrix_get_col() {
        let v = vec![1, 2, 3, 5, 6, 7];
        let m = Matrix::new(&v, 3, 2);
        assert_eq!(m.get_col(0), &vec![1, 2, 3]);
        assert_eq!(m.get_col(1), &vec![5, 6, 7]);
    }

    #[test]
    fn test_matrix_row() {
        let v = vec![1, 2, 3, 5, 6, 7];
        let m = Matrix::new(&v, 3, 2);
        assert_eq!(m.get_row(2), vec![3, 7]);
        assert_eq!(m.get_row(0), vec![1, 5]);
        assert_eq!(m.get_row(1), vec![2, 6]);
    }

    #[test]
    fn test_matrix_consistency() {
        let v = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        assert!(!Matrix::new(&v, 2, 3).is_consistent());
        assert!(Matrix::new(&v[..4], 2, 2).is_consistent());
    }

    #[test]
    fn test_to_column_major() {
        let records = vec![vec![1, 5], vec![2, 6], vec![3, 7]];
        let (data, rows, cols) = to_column_major(&records).unwrap();
        assert_eq!((rows, cols), (3, 2));
        assert_eq!(data, vec![1, 2, 3, 5, 6, 7]);
        let m = Matrix::new(&data, rows, cols);
        assert_eq!(m.get_row(1), records[1]);
    }

    #[test]
    fn test_to_column_major_ragged_rows() {
        let records = vec![vec![1.0, 5.0], vec![2.0], vec![3.0, 7.0]];
        let err = to_column_major(&records).unwrap_err();
        assert!(matches!(err, SaplingError::InvalidInput(ref msg) if msg.contains("row 1")));

        let records = vec![vec![1.0], vec![2.0, 6.0]];
        assert!(matches!(to_column_major(&records), Err(SaplingError::InvalidInput(_))));

        let empty: Vec<Vec<f64>> = Vec::new();
        assert_eq!(to_column_major(&empty).unwrap(), (Vec::new(), 0, 0));
    }
}
