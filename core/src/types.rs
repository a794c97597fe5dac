/// Single coordinate axis used for board rows, columns, and positions.
pub type Coord = u8;

/// Count type used for pair counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

/// Position of a symbol inside its theme.
pub type SymbolIndex = u8;

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

/// Converts signed user coordinates, returning a value only when it fits the axis type.
pub fn coords_from_signed(row: i64, col: i64) -> Option<Coord2> {
    Some((row.try_into().ok()?, col.try_into().ok()?))
}
