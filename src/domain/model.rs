use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const FACE_COUNT: usize = 6;
pub const FACE_SIZE: usize = 3;
pub const FACELET_COUNT: usize = FACE_COUNT * FACE_SIZE * FACE_SIZE;
pub const SOLVED_FACELETS: &str = "UUUUUUUUURRRRRRRRRFFFFFFFFFDDDDDDDDDLLLLLLLLLBBBBBBBBB";

/// Sticker color, named after the face whose center carries it on a solved cube.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum FacetColor {
    Up = 0,
    Right = 1,
    Front = 2,
    Down = 3,
    Left = 4,
    Back = 5,
}

impl FacetColor {
    /// Face order of the canonical encoding.
    pub const ALL: [FacetColor; FACE_COUNT] = [
        FacetColor::Up,
        FacetColor::Right,
        FacetColor::Front,
        FacetColor::Down,
        FacetColor::Left,
        FacetColor::Back,
    ];

    pub fn from_value(value: Sticker) -> Option<Self> {
        usize::try_from(value)
            .ok()
            .and_then(|index| Self::ALL.get(index).copied())
    }

    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn letter(self) -> char {
        match self {
            FacetColor::Up => 'U',
            FacetColor::Right => 'R',
            FacetColor::Front => 'F',
            FacetColor::Down => 'D',
            FacetColor::Left => 'L',
            FacetColor::Back => 'B',
        }
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        Self::ALL.into_iter().find(|color| color.letter() == letter)
    }
}

/// A raw cell value as submitted. Wide enough for any JSON integer.
pub type Sticker = i128;

/// Untrusted 6×3×3 grid of color values, faces in U R F D L B order.
///
/// Shape and value domain are not guaranteed; `core::validator` polices both
/// before anything else reads the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CubeState {
    faces: Vec<Vec<Vec<Sticker>>>,
}

impl CubeState {
    pub fn from_raw(faces: Vec<Vec<Vec<Sticker>>>) -> Self {
        Self { faces }
    }

    pub fn from_colors(faces: [[[FacetColor; FACE_SIZE]; FACE_SIZE]; FACE_COUNT]) -> Self {
        let faces = faces
            .iter()
            .map(|face| {
                face.iter()
                    .map(|row| row.iter().map(|color| Sticker::from(color.value())).collect())
                    .collect()
            })
            .collect();
        Self { faces }
    }

    /// Every face filled with its own center color.
    pub fn solved() -> Self {
        Self::from_colors(FacetColor::ALL.map(|color| [[color; FACE_SIZE]; FACE_SIZE]))
    }

    pub fn faces(&self) -> &[Vec<Vec<Sticker>>] {
        &self.faces
    }

    #[cfg(test)]
    pub(crate) fn set(&mut self, face: usize, row: usize, col: usize, value: Sticker) {
        self.faces[face][row][col] = value;
    }
}

/// The 54-character solver input, e.g. [`SOLVED_FACELETS`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FaceletString(String);

impl FaceletString {
    /// Accepts exactly 54 characters over `U R F D L B`.
    pub fn parse(value: &str) -> Option<Self> {
        let well_formed = value.chars().count() == FACELET_COUNT
            && value.chars().all(|c| FacetColor::from_letter(c).is_some());
        well_formed.then(|| Self(value.to_string()))
    }

    /// Callers guarantee the 54-letter invariant.
    pub(crate) fn from_encoded(value: String) -> Self {
        debug_assert_eq!(value.len(), FACELET_COUNT);
        Self(value)
    }

    pub fn solved() -> Self {
        Self(SOLVED_FACELETS.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_solved(&self) -> bool {
        self.0.as_bytes() == SOLVED_FACELETS.as_bytes()
    }
}

impl fmt::Display for FaceletString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Move tokens as returned by the solver, e.g. `R U' F2`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MoveSequence(Vec<String>);

impl MoveSequence {
    pub fn from_solution_text(text: &str) -> Self {
        Self(text.split_whitespace().map(str::to_string).collect())
    }

    pub fn tokens(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_text(&self) -> String {
        self.0.join(" ")
    }
}

/// A completed solve, before the store assigns its id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSolveRecord {
    pub facelet_string: String,
    pub solution: String,
    pub move_count: u32,
    pub solve_time_ms: f64,
    pub timestamp: DateTime<Utc>,
    pub ip_address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveRecord {
    pub id: u64,
    pub facelet_string: String,
    pub solution: String,
    pub move_count: u32,
    pub solve_time_ms: f64,
    pub timestamp: DateTime<Utc>,
    pub ip_address: Option<String>,
}

impl SolveRecord {
    pub fn from_new(id: u64, record: NewSolveRecord) -> Self {
        Self {
            id,
            facelet_string: record.facelet_string,
            solution: record.solution,
            move_count: record.move_count,
            solve_time_ms: record.solve_time_ms,
            timestamp: record.timestamp,
            ip_address: record.ip_address,
        }
    }

    pub fn moves(&self) -> MoveSequence {
        MoveSequence::from_solution_text(&self.solution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_value_round_trip() {
        for color in FacetColor::ALL {
            assert_eq!(FacetColor::from_value(Sticker::from(color.value())), Some(color));
            assert_eq!(FacetColor::from_letter(color.letter()), Some(color));
        }
        assert_eq!(FacetColor::from_value(6), None);
        assert_eq!(FacetColor::from_value(-1), None);
        assert_eq!(FacetColor::from_letter('X'), None);
    }

    #[test]
    fn test_facelet_string_parse() {
        assert!(FaceletString::parse(SOLVED_FACELETS).unwrap().is_solved());
        assert!(FaceletString::parse("UUU").is_none());

        let mut wrong_letter = SOLVED_FACELETS.to_string();
        wrong_letter.replace_range(0..1, "X");
        assert!(FaceletString::parse(&wrong_letter).is_none());

        let scrambled = "FLLLULFRFRUURRRBBBLDDFFUBRUDFRDDUFLDUFUFLDLBRBDRBBULBD";
        assert!(!FaceletString::parse(scrambled).unwrap().is_solved());
    }

    #[test]
    fn test_move_sequence_counts_whitespace_tokens() {
        let moves = MoveSequence::from_solution_text("  R U'  F2\tD ");
        assert_eq!(moves.len(), 4);
        assert_eq!(moves.to_text(), "R U' F2 D");
        assert!(MoveSequence::from_solution_text("").is_empty());
    }

    #[test]
    fn test_solved_state_shape() {
        let cube = CubeState::solved();
        assert_eq!(cube.faces().len(), FACE_COUNT);
        assert_eq!(cube.faces()[4][1][1], 4);
    }
}
