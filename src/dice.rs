//! Die faces, claim masks, and the human-readable codecs.
//!
//! A die is a face index 0..=5 where 0 is the worm. A claim mask is a 6-bit
//! set recording which face values have already been set aside this turn; it
//! only ever grows within a turn. The string codecs ('W' for the worm, '1'..'5'
//! for numbered faces) are a presentation-layer convenience; the solver itself
//! works purely on indices and masks.

use crate::constants::FACE_COUNT;
use crate::error::{Error, Result};

/// Add a face to a claim mask.
#[inline(always)]
pub fn use_face(mask: u8, face: usize) -> u8 {
    mask | (1 << face)
}

/// Test whether a claim mask already contains a face.
#[inline(always)]
pub fn contains(mask: u8, face: usize) -> bool {
    mask & (1 << face) != 0
}

/// Test whether a claim mask contains the worm.
#[inline(always)]
pub fn contains_worm(mask: u8) -> bool {
    contains(mask, crate::constants::WORM)
}

/// Display character for a face index.
pub fn face_to_char(face: usize) -> char {
    debug_assert!(face < FACE_COUNT, "face {} out of range", face);
    ['W', '1', '2', '3', '4', '5'][face]
}

/// Parse a single die character. Accepts 'W', 'w' or '0' for the worm.
pub fn char_to_face(c: char) -> Result<usize> {
    match c {
        'W' | 'w' | '0' => Ok(0),
        '1'..='5' => Ok(c as usize - '0' as usize),
        other => Err(Error::InvalidDieSymbol(other)),
    }
}

/// Render a sequence of face indices as a string, e.g. `[0, 3, 0]` -> `"W3W"`.
pub fn faces_to_string(faces: &[usize]) -> String {
    faces.iter().map(|&f| face_to_char(f)).collect()
}

/// Parse a dice string into face indices, e.g. `"W3W"` -> `[0, 3, 0]`.
pub fn faces_from_str(s: &str) -> Result<Vec<usize>> {
    s.chars().map(char_to_face).collect()
}

/// Render a claim mask as a string of its faces in ascending index order.
pub fn mask_to_string(mask: u8) -> String {
    (0..FACE_COUNT)
        .filter(|&f| contains(mask, f))
        .map(face_to_char)
        .collect()
}

/// Parse a string of face characters into a claim mask.
pub fn mask_from_str(s: &str) -> Result<u8> {
    let mut mask = 0;
    for c in s.chars() {
        mask = use_face(mask, char_to_face(c)?);
    }
    Ok(mask)
}
