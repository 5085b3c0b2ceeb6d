//! Structural and statistical plausibility checks for a submitted cube.
//!
//! Passing here does not mean the cube can be solved: corner twist, edge
//! flip and permutation parity are left to the solver.

use crate::domain::model::{CubeState, FacetColor, Sticker, FACE_COUNT, FACE_SIZE};
use std::collections::HashSet;
use std::fmt;

const STICKERS_PER_COLOR: usize = FACE_SIZE * FACE_SIZE;
const CENTER: usize = FACE_SIZE / 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationVerdict {
    Valid,
    Invalid(InvalidReason),
}

impl ValidationVerdict {
    pub fn into_result(self) -> Result<(), InvalidReason> {
        match self {
            ValidationVerdict::Valid => Ok(()),
            ValidationVerdict::Invalid(reason) => Err(reason),
        }
    }
}

/// The first check a cube failed, in check order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidReason {
    FaceCount { found: usize },
    RowCount { face: usize, found: usize },
    CellCount { face: usize, row: usize, found: usize },
    ColorValue { value: Sticker },
    ColorCount { color: u8, count: usize },
    DuplicateCenters { centers: Vec<Sticker> },
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidReason::FaceCount { .. } => {
                write!(f, "Cube must have exactly {} faces.", FACE_COUNT)
            }
            InvalidReason::RowCount { face, .. } => {
                write!(f, "Face {} must have {} rows.", face, FACE_SIZE)
            }
            InvalidReason::CellCount { face, row, .. } => {
                write!(f, "Face {}, row {} must have {} cells.", face, row, FACE_SIZE)
            }
            InvalidReason::ColorValue { value } => {
                write!(f, "Invalid color value: {}. Must be 0-5.", value)
            }
            InvalidReason::ColorCount { color, count } => write!(
                f,
                "Color {} appears {} times, should be {}.",
                color, count, STICKERS_PER_COLOR
            ),
            InvalidReason::DuplicateCenters { centers } => write!(
                f,
                "Center squares must be unique colors. Found centers: {:?}.",
                centers
            ),
        }
    }
}

type Check = fn(&CubeState) -> Result<(), InvalidReason>;

/// Later checks index into the grid, so shape checks come first and colors
/// are counted only once every value is known to be in range.
const CHECKS: [Check; 5] = [
    check_face_count,
    check_shape,
    check_color_domain,
    check_color_balance,
    check_unique_centers,
];

pub fn validate(cube: &CubeState) -> ValidationVerdict {
    match CHECKS.iter().try_for_each(|check| check(cube)) {
        Ok(()) => ValidationVerdict::Valid,
        Err(reason) => ValidationVerdict::Invalid(reason),
    }
}

fn check_face_count(cube: &CubeState) -> Result<(), InvalidReason> {
    match cube.faces().len() {
        FACE_COUNT => Ok(()),
        found => Err(InvalidReason::FaceCount { found }),
    }
}

// Faces are walked in order: rows of face i, then its cells, then face i + 1.
fn check_shape(cube: &CubeState) -> Result<(), InvalidReason> {
    for (face_index, face) in cube.faces().iter().enumerate() {
        if face.len() != FACE_SIZE {
            return Err(InvalidReason::RowCount {
                face: face_index,
                found: face.len(),
            });
        }
        check_face_cells(face_index, face)?;
    }
    Ok(())
}

fn check_face_cells(face_index: usize, face: &[Vec<Sticker>]) -> Result<(), InvalidReason> {
    for (row_index, row) in face.iter().enumerate() {
        if row.len() != FACE_SIZE {
            return Err(InvalidReason::CellCount {
                face: face_index,
                row: row_index,
                found: row.len(),
            });
        }
    }
    Ok(())
}

fn cells(cube: &CubeState) -> impl Iterator<Item = Sticker> + '_ {
    cube.faces().iter().flatten().flatten().copied()
}

fn check_color_domain(cube: &CubeState) -> Result<(), InvalidReason> {
    match cells(cube).find(|value| FacetColor::from_value(*value).is_none()) {
        Some(value) => Err(InvalidReason::ColorValue { value }),
        None => Ok(()),
    }
}

fn check_color_balance(cube: &CubeState) -> Result<(), InvalidReason> {
    let mut counts = [0usize; FACE_COUNT];
    for color in cells(cube).filter_map(FacetColor::from_value) {
        counts[usize::from(color.value())] += 1;
    }

    for color in FacetColor::ALL {
        let count = counts[usize::from(color.value())];
        if count != STICKERS_PER_COLOR {
            return Err(InvalidReason::ColorCount {
                color: color.value(),
                count,
            });
        }
    }
    Ok(())
}

fn check_unique_centers(cube: &CubeState) -> Result<(), InvalidReason> {
    let centers: Vec<Sticker> = cube.faces().iter().map(|face| face[CENTER][CENTER]).collect();
    let distinct: HashSet<Sticker> = centers.iter().copied().collect();

    if distinct.len() == FACE_COUNT {
        Ok(())
    } else {
        Err(InvalidReason::DuplicateCenters { centers })
    }
}
