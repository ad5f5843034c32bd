/// Single coordinate axis used for board rows, columns, and positions.
pub type Coord = u8;

/// Count type used for total-cell and matched-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

/// Identifier shared by exactly two cells of a board, also used as the image id.
pub type PairId = u16;

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Iterates every position of a `size` board in row-major order.
pub fn iter_coords((rows, cols): Coord2) -> impl Iterator<Item = Coord2> {
    (0..rows).flat_map(move |row| (0..cols).map(move |col| (row, col)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iter_coords_is_row_major() {
        let mut coords = iter_coords((2, 3));
        assert_eq!(coords.next(), Some((0, 0)));
        assert_eq!(coords.next(), Some((0, 1)));
        assert_eq!(coords.next(), Some((0, 2)));
        assert_eq!(coords.next(), Some((1, 0)));
        assert_eq!(coords.count(), 2);
    }

    #[test]
    fn mult_saturates() {
        assert_eq!(mult(6, 5), 30);
        assert_eq!(mult(Coord::MAX, Coord::MAX), 65025);
    }
}
