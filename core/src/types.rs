use ndarray::Array2;

/// Linear board dimension, used for row and column coordinates.
pub type Axis = u16;

/// Cell-count dimension, used for mine counts and board areas.
pub type Area = u32;

/// Board position as `(row, col)`.
pub type Pos = (Axis, Axis);

pub trait ToIndex {
    type Output;
    fn to_index(self) -> Self::Output;
}

impl ToIndex for Pos {
    type Output = [usize; 2];

    fn to_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn area(rows: Axis, cols: Axis) -> Area {
    let rows = rows as Area;
    let cols = cols as Area;
    rows.saturating_mul(cols)
}

const OFFSETS: [(i16, i16); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Applies `delta` to `pos`, returning a value only while it stays inside
/// `bounds`.
fn step(pos: Pos, delta: (i16, i16), bounds: Pos) -> Option<Pos> {
    let row = pos.0.checked_add_signed(delta.0)?;
    let col = pos.1.checked_add_signed(delta.1)?;
    (row < bounds.0 && col < bounds.1).then_some((row, col))
}

/// Iterates the up-to-8 Moore neighbors of `pos`, clipped at the edges of
/// `bounds`.
pub fn moore(pos: Pos, bounds: Pos) -> impl Iterator<Item = Pos> {
    OFFSETS
        .iter()
        .filter_map(move |&delta| step(pos, delta, bounds))
}

pub trait MooreExt {
    fn iter_moore(&self, pos: Pos) -> impl Iterator<Item = Pos>;
}

impl<T> MooreExt for Array2<T> {
    fn iter_moore(&self, pos: Pos) -> impl Iterator<Item = Pos> {
        let dim = self.dim();
        let bounds = (dim.0.try_into().unwrap(), dim.1.try_into().unwrap());
        moore(pos, bounds)
    }
}
