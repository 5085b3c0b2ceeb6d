//! Positional mapping between a cube grid and its 54-letter facelet string.
//!
//! Faces are written in U R F D L B order, rows top to bottom, cells left to
//! right, each color replaced by the letter of its home face.

use crate::domain::model::{
    CubeState, FaceletString, FacetColor, FACELET_COUNT, FACE_COUNT, FACE_SIZE,
};

/// Encodes a cube that has already passed validation.
///
/// # Panics
///
/// Panics on a malformed grid or an out-of-range color instead of producing
/// a short string.
pub fn encode(cube: &CubeState) -> FaceletString {
    assert_eq!(cube.faces().len(), FACE_COUNT, "encode requires 6 faces");

    let mut encoded = String::with_capacity(FACELET_COUNT);
    for face in cube.faces() {
        assert_eq!(face.len(), FACE_SIZE, "encode requires 3 rows per face");
        for row in face {
            assert_eq!(row.len(), FACE_SIZE, "encode requires 3 cells per row");
            for &value in row {
                let color = FacetColor::from_value(value)
                    .unwrap_or_else(|| panic!("encode requires colors 0-5, found {value}"));
                encoded.push(color.letter());
            }
        }
    }

    FaceletString::from_encoded(encoded)
}

/// Inverse of [`encode`].
pub fn decode(facelets: &FaceletString) -> CubeState {
    let mut faces = [[[FacetColor::Up; FACE_SIZE]; FACE_SIZE]; FACE_COUNT];
    for (index, letter) in facelets.as_str().chars().enumerate() {
        let face = index / (FACE_SIZE * FACE_SIZE);
        let row = (index / FACE_SIZE) % FACE_SIZE;
        let col = index % FACE_SIZE;
        // FaceletString only ever holds the six face letters.
        if let Some(color) = FacetColor::from_letter(letter) {
            faces[face][row][col] = color;
        }
    }
    CubeState::from_colors(faces)
}
