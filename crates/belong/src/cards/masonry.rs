use std::fmt;

use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Breakpoint {
    Md,
    Lg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Column,
    Row,
}

/// Extra grid cells a card occupies from a breakpoint upward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSpan {
    pub breakpoint: Breakpoint,
    pub axis: Axis,
    pub cells: u8,
}

impl fmt::Display for GridSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let breakpoint = match self.breakpoint {
            Breakpoint::Md => "md",
            Breakpoint::Lg => "lg",
        };
        let axis = match self.axis {
            Axis::Column => "col",
            Axis::Row => "row",
        };
        write!(f, "{breakpoint}:{axis}-span-{}", self.cells)
    }
}

impl Serialize for GridSpan {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Fixed pattern for the 1/2/3 column masonry grid.
pub fn masonry_span(index: usize) -> Option<GridSpan> {
    let (breakpoint, axis, cells) = match index {
        0 => (Breakpoint::Md, Axis::Column, 2),
        3 => (Breakpoint::Lg, Axis::Column, 2),
        5 => (Breakpoint::Md, Axis::Row, 2),
        7 => (Breakpoint::Lg, Axis::Column, 3),
        _ => return None,
    };
    Some(GridSpan {
        breakpoint,
        axis,
        cells,
    })
}
