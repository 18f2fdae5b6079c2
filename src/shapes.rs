//! Tetromino catalog and the clockwise rotation transform.

use std::fmt;

/// Piece colour / shape identifier. Always in `1..=7`; 0 is never a colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColorId(u8);

impl ColorId {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 7;

    pub const fn new(value: u8) -> Option<Self> {
        if value >= Self::MIN && value <= Self::MAX {
            Some(Self(value))
        } else {
            None
        }
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Display for ColorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Tetromino kinds in catalog order (S, Z, I, O, J, L, T).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    S,
    Z,
    I,
    O,
    J,
    L,
    T,
}

impl ShapeKind {
    pub const ALL: [Self; 7] = [Self::S, Self::Z, Self::I, Self::O, Self::J, Self::L, Self::T];

    /// Colour id carried by every filled cell of this kind (S=1 … T=7).
    pub const fn color(self) -> ColorId {
        ColorId(self as u8 + 1)
    }

    /// Spawn-orientation matrix, top row first. 0 marks an empty cell.
    const fn layout(self) -> &'static [&'static [u8]] {
        match self {
            Self::S => &[&[0, 1, 1], &[1, 1, 0]],
            Self::Z => &[&[2, 2, 0], &[0, 2, 2]],
            Self::I => &[&[3, 3, 3, 3]],
            Self::O => &[&[4, 4], &[4, 4]],
            Self::J => &[&[0, 0, 5], &[5, 5, 5]],
            Self::L => &[&[6, 0, 0], &[6, 6, 6]],
            Self::T => &[&[7, 7, 7], &[0, 7, 0]],
        }
    }
}

/// Immutable row-major matrix of optional colour ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    kind: ShapeKind,
    width: usize,
    height: usize,
    cells: Vec<Option<ColorId>>,
}

impl Shape {
    fn from_layout(kind: ShapeKind) -> Self {
        let rows = kind.layout();
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.len());
        let cells = rows
            .iter()
            .flat_map(|row| row.iter().map(|&v| ColorId::new(v)))
            .collect();
        Self {
            kind,
            width,
            height,
            cells,
        }
    }

    #[inline]
    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Cell at column `x`, row `y` of the bounding box; `None` when empty or outside.
    pub fn get(&self, x: usize, y: usize) -> Option<ColorId> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells[y * self.width + x]
    }

    /// `(x, y, color)` for every filled cell, relative to the top-left corner.
    pub fn filled_cells(&self) -> impl Iterator<Item = (usize, usize, ColorId)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(i, c)| c.map(|color| (i % width, i / width, color)))
    }

    /// New matrix rotated 90° clockwise; an `r×c` shape becomes `c×r`.
    pub fn rotated(&self) -> Self {
        let (w, h) = (self.width, self.height);
        let mut cells = Vec::with_capacity(self.cells.len());
        // Row `y'` of the result is column `y'` of the source read bottom to top.
        for ny in 0..w {
            for nx in 0..h {
                cells.push(self.cells[(h - 1 - nx) * w + ny]);
            }
        }
        Self {
            kind: self.kind,
            width: h,
            height: w,
            cells,
        }
    }
}

/// The seven canonical shapes in spawn orientation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeCatalog {
    shapes: Vec<Shape>,
}

impl ShapeCatalog {
    pub fn standard() -> Self {
        Self {
            shapes: ShapeKind::ALL.iter().map(|&k| Shape::from_layout(k)).collect(),
        }
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn shape(&self, kind: ShapeKind) -> &Shape {
        &self.shapes[kind as usize]
    }
}

impl Default for ShapeCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(shape: &Shape) -> Vec<Vec<u8>> {
        (0..shape.height())
            .map(|y| {
                (0..shape.width())
                    .map(|x| shape.get(x, y).map_or(0, ColorId::get))
                    .collect()
            })
            .collect()
    }

    #[test]
    fn catalog_order_and_colors() {
        let catalog = ShapeCatalog::standard();
        assert_eq!(catalog.len(), 7);
        for (i, shape) in catalog.shapes().iter().enumerate() {
            assert_eq!(shape.kind(), ShapeKind::ALL[i]);
            assert!(shape.filled_cells().all(|(_, _, c)| c.get() as usize == i + 1));
            assert_eq!(shape.filled_cells().count(), 4);
        }
    }

    #[test]
    fn color_id_rejects_zero_and_large() {
        assert_eq!(ColorId::new(0), None);
        assert_eq!(ColorId::new(8), None);
        assert_eq!(ColorId::new(7).map(ColorId::get), Some(7));
    }

    #[test]
    fn rotate_j_clockwise() {
        let j = ShapeCatalog::standard().shape(ShapeKind::J).rotated();
        assert_eq!(rows(&j), vec![vec![5, 0], vec![5, 0], vec![5, 5]]);
    }

    #[test]
    fn rotate_t_clockwise() {
        let t = ShapeCatalog::standard().shape(ShapeKind::T).rotated();
        assert_eq!(rows(&t), vec![vec![0, 7], vec![7, 7], vec![0, 7]]);
    }

    #[test]
    fn rotate_i_swaps_dimensions() {
        let i = ShapeCatalog::standard().shape(ShapeKind::I).clone();
        let r = i.rotated();
        assert_eq!((r.width(), r.height()), (1, 4));
        assert_eq!(r.rotated(), i);
    }

    #[test]
    fn rotate_o_is_unchanged() {
        let o = ShapeCatalog::standard().shape(ShapeKind::O).clone();
        assert_eq!(o.rotated(), o);
    }

    #[test]
    fn four_rotations_return_to_start() {
        for shape in ShapeCatalog::standard().shapes() {
            let back = shape.rotated().rotated().rotated().rotated();
            assert_eq!(&back, shape, "{:?}", shape.kind());
        }
    }
}
