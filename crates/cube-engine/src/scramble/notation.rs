//! Face-turn notation: `U D L R F B`, optionally followed by `'` (reverse) or
//! `2` (half turn), separated by whitespace.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use crate::cube::face::Face;

/// Error parsing move notation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotationError {
    #[error("notation contains no moves")]
    Empty,
    #[error("unknown face {0:?} in move {1:?}")]
    UnknownFace(char, String),
    #[error("unknown modifier in move {0:?}")]
    UnknownModifier(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    /// Quarter turn clockwise, looking at the face.
    None,
    /// Quarter turn counter-clockwise.
    Prime,
    /// Half turn.
    Double,
}

impl Modifier {
    pub const ALL: [Modifier; 3] = [Modifier::None, Modifier::Prime, Modifier::Double];

    fn suffix(self) -> &'static str {
        match self {
            Modifier::None => "",
            Modifier::Prime => "'",
            Modifier::Double => "2",
        }
    }
}

/// One notated face turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub face: Face,
    pub modifier: Modifier,
}

impl Move {
    pub fn new(face: Face, modifier: Modifier) -> Self {
        Self { face, modifier }
    }

    /// The move that undoes this one.
    pub fn inverse(self) -> Self {
        let modifier = match self.modifier {
            Modifier::None => Modifier::Prime,
            Modifier::Prime => Modifier::None,
            Modifier::Double => Modifier::Double,
        };
        Self { modifier, ..self }
    }
}

impl FromStr for Move {
    type Err = NotationError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let mut chars = token.chars();
        let letter = chars.next().ok_or(NotationError::Empty)?;
        let face = Face::from_letter(letter)
            .ok_or_else(|| NotationError::UnknownFace(letter, token.to_string()))?;
        let modifier = match chars.as_str() {
            "" => Modifier::None,
            "'" => Modifier::Prime,
            "2" => Modifier::Double,
            _ => return Err(NotationError::UnknownModifier(token.to_string())),
        };
        Ok(Self { face, modifier })
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.face.letter(), self.modifier.suffix())
    }
}

/// Parse a whitespace-separated move sequence. Fails on the first bad token,
/// so nothing is queued from malformed input.
pub fn parse_sequence(notation: &str) -> Result<Vec<Move>, NotationError> {
    let moves = notation
        .split_whitespace()
        .map(str::parse)
        .collect::<Result<Vec<Move>, _>>()?;
    if moves.is_empty() {
        return Err(NotationError::Empty);
    }
    Ok(moves)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_standard_sequence() {
        let moves = parse_sequence("R U R' U'  F2").unwrap();
        assert_eq!(moves.len(), 5);
        assert_eq!(moves[2], Move::new(Face::Right, Modifier::Prime));
        assert_eq!(moves[4], Move::new(Face::Front, Modifier::Double));
        let printed: Vec<String> = moves.iter().map(|m| m.to_string()).collect();
        assert_eq!(printed.join(" "), "R U R' U' F2");
    }

    #[test]
    fn rejects_malformed_tokens() {
        assert_eq!(
            parse_sequence("R X"),
            Err(NotationError::UnknownFace('X', "X".to_string()))
        );
        assert_eq!(
            parse_sequence("R3"),
            Err(NotationError::UnknownModifier("R3".to_string()))
        );
        assert_eq!(parse_sequence("   "), Err(NotationError::Empty));
        assert!(parse_sequence("u").is_err());
    }

    #[test]
    fn inverse_undoes_quarter_turns() {
        let r = Move::new(Face::Right, Modifier::None);
        assert_eq!(r.inverse(), Move::new(Face::Right, Modifier::Prime));
        assert_eq!(r.inverse().inverse(), r);
        let half = Move::new(Face::Up, Modifier::Double);
        assert_eq!(half.inverse(), half);
    }
}
