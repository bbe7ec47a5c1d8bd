//! The 2-D byte grid that sits between text and pixels

// this_file: crates/versegrid-core/src/grid.rs

use crate::error::{GridError, Result, VersegridError};

/// Bytes folded row-major into `height` rows of `width` cells
///
/// The last `padding()` cells are zero fill. The grid remembers how many
/// cells carried real data, so [`Grid::content`] recovers the input
/// sequence exactly, even when real bytes happen to be zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    height: u32,
    width: u32,
    len: usize,
    cells: Vec<u8>,
}

impl Grid {
    /// Fold `bytes` into a grid
    ///
    /// Without an explicit `height` the grid is as close to square as
    /// integer arithmetic allows: `height = floor(sqrt(n))`,
    /// `width = ceil(n / height)`, so `height * width - n < height`.
    /// An explicit `height` must lie in `1..=n`.
    pub fn from_bytes(mut bytes: Vec<u8>, height: Option<u32>) -> Result<Self> {
        let len = bytes.len();
        if len == 0 {
            return Err(VersegridError::EmptyContent(
                "byte sequence is empty".into(),
            ));
        }

        let rows = match height {
            Some(0) => return Err(GridError::ZeroHeight.into()),
            // Every row past the n-th would be pure padding
            Some(rows) if rows as usize > len => {
                return Err(GridError::TallerThanContent { height: rows, len }.into())
            },
            Some(rows) => rows as usize,
            None => floor_sqrt(len),
        };
        let cols = len.div_ceil(rows);

        let too_large = || GridError::TooLarge {
            height: rows,
            width: cols,
        };
        let total = rows.checked_mul(cols).ok_or_else(too_large)?;
        let height = u32::try_from(rows).map_err(|_| too_large())?;
        let width = u32::try_from(cols).map_err(|_| too_large())?;

        bytes.resize(total, 0);
        log::trace!("Grid: {len} bytes -> {height}x{width}, {} padding", total - len);

        Ok(Self {
            height,
            width,
            len,
            cells: bytes,
        })
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    /// `(height, width)`, rows first
    pub fn dimensions(&self) -> (u32, u32) {
        (self.height, self.width)
    }

    /// Number of real (non-padding) cells
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of trailing zero cells added to fill the last row
    pub fn padding(&self) -> usize {
        self.cells.len() - self.len
    }

    /// Every cell, padding included, row-major
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// The cells that came from the byte sequence
    pub fn content(&self) -> &[u8] {
        &self.cells[..self.len]
    }

    pub fn into_cells(self) -> Vec<u8> {
        self.cells
    }

    pub fn row(&self, index: u32) -> Option<&[u8]> {
        if index >= self.height {
            return None;
        }
        let width = self.width as usize;
        let start = index as usize * width;
        self.cells.get(start..start + width)
    }

    pub fn rows(&self) -> std::slice::Chunks<'_, u8> {
        self.cells.chunks(self.width as usize)
    }

    pub fn get(&self, row: u32, col: u32) -> Option<u8> {
        if col >= self.width {
            return None;
        }
        self.row(row).and_then(|cells| cells.get(col as usize).copied())
    }

    /// Smallest cell, padding included
    pub fn min(&self) -> u8 {
        self.cells.iter().copied().min().unwrap_or(0)
    }

    /// Largest cell, padding included
    pub fn max(&self) -> u8 {
        self.cells.iter().copied().max().unwrap_or(0)
    }
}

/// Largest `r` with `r * r <= n`
fn floor_sqrt(n: usize) -> usize {
    let mut root = (n as f64).sqrt() as usize;
    // The float estimate can be off by one for large n
    while root.checked_mul(root).map_or(true, |sq| sq > n) {
        root -= 1;
    }
    while (root + 1).checked_mul(root + 1).is_some_and(|sq| sq <= n) {
        root += 1;
    }
    root
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn grid(bytes: &[u8], height: Option<u32>) -> Grid {
        match Grid::from_bytes(bytes.to_vec(), height) {
            Ok(grid) => grid,
            Err(e) => unreachable!("grid build failed: {e}"),
        }
    }

    #[test]
    fn five_bytes_make_two_by_three() {
        let grid = grid(&[65, 66, 32, 67, 68], None);
        assert_eq!(grid.dimensions(), (2, 3));
        assert_eq!(grid.row(0), Some(&[65, 66, 32][..]));
        assert_eq!(grid.row(1), Some(&[67, 68, 0][..]));
        assert_eq!(grid.padding(), 1);
    }

    #[test]
    fn perfect_square_needs_no_padding() {
        let grid = grid(&[1; 16], None);
        assert_eq!(grid.dimensions(), (4, 4));
        assert_eq!(grid.padding(), 0);
    }

    #[test]
    fn single_byte_is_one_by_one() {
        let grid = grid(&[200], None);
        assert_eq!(grid.dimensions(), (1, 1));
        assert_eq!(grid.cells(), &[200]);
    }

    #[test]
    fn padding_is_smaller_than_height() {
        for n in 1..=300usize {
            let bytes: Vec<u8> = (0..n).map(|i| (i % 251) as u8 + 1).collect();
            let grid = grid(&bytes, None);
            let (h, w) = (grid.height() as usize, grid.width() as usize);
            assert!(h * w >= n, "n={n}");
            assert!(h * w - n < h, "n={n}");
            assert_eq!(grid.content(), &bytes[..], "n={n}");
        }
    }

    #[test]
    fn explicit_height_is_respected() {
        let grid = grid(&[1, 2, 3, 4, 5, 6, 7], Some(3));
        assert_eq!(grid.dimensions(), (3, 3));
        assert_eq!(grid.row(2), Some(&[7, 0, 0][..]));
    }

    #[test]
    fn explicit_height_equal_to_input() {
        let grid = grid(&[9, 8], Some(2));
        assert_eq!(grid.dimensions(), (2, 1));
        assert_eq!(grid.cells(), &[9, 8]);
    }

    #[test]
    fn explicit_height_taller_than_input_is_degenerate() {
        let err = Grid::from_bytes(vec![9, 8], Some(3));
        assert!(matches!(
            err,
            Err(VersegridError::Grid(GridError::TallerThanContent { height: 3, len: 2 }))
        ));

        // Rejected before any padding is allocated
        let huge = Grid::from_bytes(vec![1], Some(4_000_000_000));
        assert!(matches!(huge, Err(ref e) if e.kind() == ErrorKind::DegenerateGrid));
    }

    #[test]
    fn trailing_zero_bytes_survive_round_trip() {
        let grid = grid(&[5, 0, 0], None);
        assert_eq!(grid.content(), &[5, 0, 0]);
    }

    #[test]
    fn empty_input_is_empty_content() {
        let err = Grid::from_bytes(Vec::new(), None);
        assert!(matches!(err, Err(ref e) if e.kind() == ErrorKind::EmptyContent));
    }

    #[test]
    fn zero_height_is_degenerate() {
        let err = Grid::from_bytes(vec![1, 2, 3], Some(0));
        assert!(matches!(err, Err(ref e) if e.kind() == ErrorKind::DegenerateGrid));
    }

    #[test]
    fn min_and_max_include_padding() {
        let grid = grid(&[65, 66, 32, 67, 68], None);
        assert_eq!(grid.min(), 0);
        assert_eq!(grid.max(), 68);
    }

    #[test]
    fn get_out_of_bounds() {
        let grid = grid(&[1, 2, 3, 4], None);
        assert_eq!(grid.get(1, 1), Some(4));
        assert_eq!(grid.get(2, 0), None);
        assert_eq!(grid.get(0, 2), None);
    }

    #[test]
    fn rows_iterate_in_order() {
        let grid = grid(&[1, 2, 3, 4, 5, 6], None);
        let rows: Vec<&[u8]> = grid.rows().collect();
        assert_eq!(rows, vec![&[1, 2, 3][..], &[4, 5, 6][..]]);
    }

    #[test]
    fn floor_sqrt_matches_definition() {
        for n in 0..2000usize {
            let r = floor_sqrt(n);
            assert!(r * r <= n);
            assert!((r + 1) * (r + 1) > n);
        }
        assert_eq!(floor_sqrt(u32::MAX as usize), 65535);
    }
}
