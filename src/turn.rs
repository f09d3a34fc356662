//! Turn tracking: the interactive layer over the engine.
//!
//! A [`Turn`] follows one player through a single go: it accumulates the
//! score and claim mask, validates each physical roll against the game
//! limits, asks the bound strategy for a recommendation, and applies the
//! player's committed choice. The engine itself never mutates turn state;
//! all of that lives here.

use crate::board::Board;
use crate::constants::{FACE_SCORE, MAX_DICE, MAX_SCORE};
use crate::dice;
use crate::error::{Error, Result};
use crate::strategy::{Action, Strategy};
use crate::throw::Throw;

/// A recommendation for the current roll, with the per-face reasoning the
/// strategy collected while deciding.
#[derive(Debug)]
pub struct Recommendation {
    pub action: Action,
    pub face: Option<usize>,
    pub trace: Vec<String>,
}

/// State of one go: board, strategy, and what has been claimed so far.
pub struct Turn {
    board: Board,
    strategy: Strategy,
    score: usize,
    used: u8,
    throw: Option<Throw>,
}

impl Turn {
    pub fn new(board: Board, strategy: Strategy) -> Self {
        Self {
            board,
            strategy,
            score: 0,
            used: 0,
            throw: None,
        }
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn used(&self) -> u8 {
        self.used
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Record the dice just thrown and get a recommendation.
    ///
    /// Fails with [`Error::DiceCountExceeded`] for more than [`MAX_DICE`]
    /// dice and with [`Error::ScoreOverflow`] if the roll could push the
    /// accumulated score past [`MAX_SCORE`].
    pub fn roll(&mut self, faces: &[usize]) -> Result<Recommendation> {
        if faces.len() > MAX_DICE {
            return Err(Error::DiceCountExceeded(faces.len()));
        }
        if self.score + faces.len() * 5 > MAX_SCORE {
            return Err(Error::ScoreOverflow {
                score: self.score,
                num_dice: faces.len(),
            });
        }
        let throw = Throw::from_faces(faces)?;
        let mut trace = Vec::new();
        let (action, face) =
            self.strategy
                .select_traced(&throw, &self.board, self.score, self.used, &mut trace);
        self.throw = Some(throw);
        Ok(Recommendation {
            action,
            face,
            trace,
        })
    }

    /// [`Turn::roll`] from a dice string such as `"WW4441"`.
    pub fn roll_str(&mut self, s: &str) -> Result<Recommendation> {
        let faces = dice::faces_from_str(s)?;
        self.roll(&faces)
    }

    /// Commit to a face from the current throw, claiming all dice showing
    /// it. Fails with [`Error::FaceUnavailable`] if the face is absent from
    /// the throw or already claimed this turn.
    pub fn take(&mut self, face: usize) -> Result<()> {
        let throw = self
            .throw
            .as_ref()
            .ok_or(Error::FaceUnavailable(face))?;
        if throw.histogram[face] == 0 || dice::contains(self.used, face) {
            return Err(Error::FaceUnavailable(face));
        }
        self.score += throw.histogram[face] as usize * FACE_SCORE[face];
        self.used = dice::use_face(self.used, face);
        self.throw = None;
        Ok(())
    }

    /// [`Turn::take`] from a single die character such as `'W'`.
    pub fn take_char(&mut self, c: char) -> Result<()> {
        self.take(dice::char_to_face(c)?)
    }

    /// What stopping right now would win.
    pub fn banked_value(&self) -> i32 {
        self.board.evaluate(self.score, self.used)
    }
}
