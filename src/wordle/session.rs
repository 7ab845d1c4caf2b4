use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use super::{data::*, filter::*, prelude::*, status::*, tally::*};

///
/// A square of the grid. Letters are stored uppercase.
///
/// In game mode the status stays None until the row is submitted. In solver mode a typed letter
/// starts out Absent and the user clicks the square to change it.
///
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Cell {
    pub letter: Option<char>,
    pub status: Option<LetterStatus>,
}

pub type Grid = [[Cell; WORD_SIZE]; NUM_TURNS];

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Playing against a secret word
    Game { secret: String },
    /// Typing in guesses & colors from some other game to get hints
    Solver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Won { turns: usize },
    Lost,
}

/// Everything the user can do to a session. Each one is applied by Session::reduce.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Type(char),
    Backspace,
    Submit,
    CycleStatus { row: usize, col: usize },
    GiveUp,
    NewGame { secret: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionErr {
    #[error("'{0}' is not a letter")]
    InvalidLetter(char),
    #[error("not enough letters")]
    IncompleteGuess,
    #[error("'{0}' is not in the word list")]
    NotInWordList(String),
    #[error("the game is already over")]
    GameOver,
    #[error("only available in {0} mode")]
    WrongMode(&'static str),
    #[error("square ({0}, {1}) has no letter")]
    EmptyCell(usize, usize),
    #[error("square ({0}, {1}) is outside the grid")]
    OutOfBounds(usize, usize),
    #[error("word set '{0}' has no words")]
    NoWordsAvailable(WordSource),
    #[error("saved game is inconsistent: {0}")]
    BadSnapshot(String),
    #[error(transparent)]
    Input(#[from] InputErr),
}

/// What the hint panels show: the words still possible and the letters they use the most
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hints<'a> {
    pub candidates: Vec<&'a str>,
    pub letters: Vec<(char, usize)>,
}

///
/// The saved form of a game in progress. Only game sessions can be saved; storing it (and
/// checking it wasn't tampered with) is up to whoever holds it.
///
/// guesses holds every submitted guess in order, followed by the letters of the row being typed
/// if it isn't empty.
///
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub secret: String,
    pub row: usize,
    pub col: usize,
    pub guesses: Vec<String>,
    pub source: WordSource,
    pub done: bool,
}

///
/// The state of one game (or solver) session.
///
/// A session is never changed in place: reduce() returns the next session, and a rejected action
/// returns an error and leaves the caller holding the previous one. The candidate list and letter
/// counts are not stored at all, they are recomputed from the history by hints().
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    source: WordSource,
    mode: Mode,
    grid: Grid,
    row: usize,
    col: usize,
    /// game mode only, solver history is read off the grid
    history: Vec<GuessRecord>,
    outcome: Option<Outcome>,
}

impl Session {
    /// Starts a game against the given secret
    pub fn new_game(source: WordSource, secret: &str) -> Result<Self, SessionErr> {
        let secret = validated_word(secret)?;
        log::debug!("starting {} game", source);
        Ok(Self {
            source,
            mode: Mode::Game { secret },
            grid: Default::default(),
            row: 0,
            col: 0,
            history: Vec::new(),
            outcome: None,
        })
    }

    /// Starts a game against a random secret from the word set
    pub fn random_game<R>(source: WordSource, data: &Data, rng: &mut R) -> Result<Self, SessionErr>
        where R: Rng + ?Sized
    {
        let secret = data
            .random_secret(source, rng)
            .ok_or(SessionErr::NoWordsAvailable(source))?;
        Self::new_game(source, secret)
    }

    /// Starts an empty solver grid
    pub fn new_solver(source: WordSource) -> Self {
        log::debug!("starting {} solver", source);
        Self {
            source,
            mode: Mode::Solver,
            grid: Default::default(),
            row: 0,
            col: 0,
            history: Vec::new(),
            outcome: None,
        }
    }

    pub fn source(&self) -> WordSource {
        self.source
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn is_solver(&self) -> bool {
        matches!(self.mode, Mode::Solver)
    }

    pub fn secret(&self) -> Option<&str> {
        match &self.mode {
            Mode::Game { secret } => Some(secret.as_str()),
            Mode::Solver => None,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// (row, col) of the square the next letter goes into. In solver mode a full grid puts the
    /// cursor at (NUM_TURNS, 0).
    pub fn cursor(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn is_done(&self) -> bool {
        self.outcome.is_some()
    }

    ///
    /// The single update function: applies the action and returns the next session.
    ///
    /// data is only consulted to check that a submitted guess is a real word.
    ///
    pub fn reduce(&self, data: &Data, action: Action) -> Result<Self, SessionErr> {
        log::debug!("session action {:?}", &action);
        let out = match self.mode {
            Mode::Game { .. } => self.reduce_game(data, action),
            Mode::Solver => self.reduce_solver(action),
        };

        if let Err(err) = &out {
            log::warn!("session rejected action: {}", err);
        }

        out
    }

    fn reduce_game(&self, data: &Data, action: Action) -> Result<Self, SessionErr> {
        // starting over is the one thing you can still do once a game has ended
        if self.is_done() && !matches!(action, Action::NewGame { .. }) {
            return Err(SessionErr::GameOver);
        }

        let mut next = self.clone();
        match action {
            Action::Type(c) => next.type_letter(c)?,
            Action::Backspace => {
                if next.col > 0 {
                    next.col -= 1;
                    next.grid[next.row][next.col] = Cell::default();
                }
            }
            Action::Submit => next.submit(data)?,
            Action::GiveUp => {
                log::debug!("gave up after {} guesses", next.history.len());
                next.outcome = Some(Outcome::Lost);
            }
            Action::CycleStatus { .. } => return Err(SessionErr::WrongMode("solver")),
            Action::NewGame { secret } => return Self::new_game(self.source, &secret),
        }

        Ok(next)
    }

    /// Game mode typing: fills the next square of the current row, or does nothing if it's full
    fn type_letter(&mut self, c: char) -> Result<(), SessionErr> {
        let letter = normalize_letter(c)?;
        if self.col < WORD_SIZE {
            self.grid[self.row][self.col].letter = Some(letter);
            self.col += 1;
        }

        Ok(())
    }

    fn submit(&mut self, data: &Data) -> Result<(), SessionErr> {
        if self.col < WORD_SIZE {
            return Err(SessionErr::IncompleteGuess);
        }

        let guess = self.row_letters(self.row);
        if !data.is_allowed_guess(self.source, &guess) {
            return Err(SessionErr::NotInWordList(guess));
        }

        self.push_guess(&guess)
    }

    /// Classifies a full guess against the secret, colors its row & moves on to the next one
    fn push_guess(&mut self, guess: &str) -> Result<(), SessionErr> {
        let secret = match &self.mode {
            Mode::Game { secret } => secret.clone(),
            Mode::Solver => return Err(SessionErr::WrongMode("game")),
        };

        let record = GuessRecord::with_secret(guess, &secret)?;
        for (idx, c, status) in record.squares() {
            self.grid[self.row][idx] = Cell {
                letter: Some(c as char),
                status: Some(status),
            };
        }

        log::debug!("guess {} {}", record.guess(), record.statuses());
        let is_correct = record.is_correct();
        self.history.push(record);
        self.row = self.history.len();
        self.col = 0;

        if is_correct {
            self.outcome = Some(Outcome::Won { turns: self.history.len() });
        } else if self.history.len() >= NUM_TURNS {
            self.outcome = Some(Outcome::Lost);
        }

        Ok(())
    }

    fn reduce_solver(&self, action: Action) -> Result<Self, SessionErr> {
        let mut next = self.clone();
        match action {
            Action::Type(c) => {
                let letter = normalize_letter(c)?;
                let pos = next.cursor_pos();
                if pos < NUM_TURNS * WORD_SIZE {
                    next.grid[next.row][next.col] = Cell {
                        letter: Some(letter),
                        status: Some(LetterStatus::Absent),
                    };
                    next.set_cursor_pos(pos + 1);
                }
            }
            Action::Backspace => {
                let pos = next.cursor_pos();
                if pos > 0 {
                    next.set_cursor_pos(pos - 1);
                    next.grid[next.row][next.col] = Cell::default();
                }
            }
            Action::CycleStatus { row, col } => {
                if row >= NUM_TURNS || col >= WORD_SIZE {
                    return Err(SessionErr::OutOfBounds(row, col));
                }

                let cell = &mut next.grid[row][col];
                if cell.letter.is_none() {
                    return Err(SessionErr::EmptyCell(row, col));
                }
                cell.status = Some(cell.status.unwrap_or_default().cycle());
            }
            Action::Submit | Action::GiveUp => return Err(SessionErr::WrongMode("game")),
            Action::NewGame { secret } => return Self::new_game(self.source, &secret),
        }

        Ok(next)
    }

    /// The solver cursor auto-advances through the grid, so it's easier to move it as one number
    fn cursor_pos(&self) -> usize {
        self.row * WORD_SIZE + self.col
    }

    fn set_cursor_pos(&mut self, pos: usize) {
        self.row = pos / WORD_SIZE;
        self.col = pos % WORD_SIZE;
    }

    fn row_letters(&self, row: usize) -> String {
        self.grid[row].iter().filter_map(|cell| cell.letter).collect()
    }

    ///
    /// The rows the hints are computed from.
    ///
    /// In game mode these are the submitted guesses. In solver mode they're the rows of the grid
    /// which have all of their letters filled in, top to bottom, stopping at the first row which
    /// doesn't.
    ///
    pub fn history(&self) -> Vec<GuessRecord> {
        match self.mode {
            Mode::Game { .. } => self.history.clone(),
            Mode::Solver => self.grid
                .iter()
                .map_while(|row| {
                    let mut guess = String::with_capacity(WORD_SIZE);
                    let mut statuses = StatusRow::default();
                    for (idx, cell) in row.iter().enumerate() {
                        guess.push(cell.letter?);
                        statuses[idx] = cell.status.unwrap_or_default();
                    }
                    GuessRecord::new(&guess, statuses).ok()
                })
                .collect(),
        }
    }

    ///
    /// Narrows the session's word set with the history, then tallies the letters of whatever is
    /// left. letters holds at most N_LETTER_HINTS entries, most common first.
    ///
    pub fn hints<'d>(&self, data: &'d Data) -> Hints<'d> {
        let candidates = filter_words(data.secrets(self.source), &self.history());
        let letters = tally(candidates.as_slice()).top::<N_LETTER_HINTS>().collect();
        Hints { candidates, letters }
    }

    ///
    /// The best status each letter of the alphabet has received so far (Correct beats Present
    /// beats Absent), indexed by letter_idx. This is what colors the on-screen keyboard.
    ///
    pub fn key_statuses(&self) -> [Option<LetterStatus>; ALPHABET_SIZE] {
        let mut out: [Option<LetterStatus>; ALPHABET_SIZE] = [None; ALPHABET_SIZE];
        for record in self.history() {
            for (_, c, status) in record.squares() {
                let slot = &mut out[letter_idx(c)];
                if slot.map(|old| old.strength() < status.strength()).unwrap_or(true) {
                    *slot = Some(status);
                }
            }
        }

        out
    }

    /// Saves a game session. Solver sessions have nothing worth restoring, so they return None.
    pub fn snapshot(&self) -> Option<SessionSnapshot> {
        let secret = self.secret()?.to_string();
        let mut guesses: Vec<String> = self.history.iter().map(|r| r.guess().to_string()).collect();
        if self.col > 0 {
            guesses.push(self.row_letters(self.row));
        }

        Some(SessionSnapshot {
            secret,
            row: self.row,
            col: self.col,
            guesses,
            source: self.source,
            done: self.is_done(),
        })
    }

    ///
    /// Rebuilds a game from a snapshot by replaying every complete guess against the secret.
    ///
    /// When the snapshot's col is non-zero the last entry is put back in the row being typed
    /// instead of being submitted, even when all of its letters are there. Guesses are not checked
    /// against the word list again, since they were checked when they were first submitted.
    ///
    pub fn restore(snapshot: &SessionSnapshot) -> Result<Self, SessionErr> {
        let mut out = Self::new_game(snapshot.source, &snapshot.secret)?;
        let bad = |why: String| Err(SessionErr::BadSnapshot(why));

        if snapshot.guesses.len() > NUM_TURNS {
            return bad(format!("{} guesses is more than {}", snapshot.guesses.len(), NUM_TURNS));
        }

        for (idx, guess) in snapshot.guesses.iter().enumerate() {
            // a non-zero col means the last entry is the row still being typed, even if it's full
            let is_pending = snapshot.col > 0 && idx + 1 == snapshot.guesses.len();
            if out.is_done() {
                return bad(format!("guess {} comes after the game ended", guess));
            }

            if is_pending && guess.len() <= WORD_SIZE {
                for c in guess.chars() {
                    out.type_letter(c)?;
                }
            } else if !is_pending && guess.len() == WORD_SIZE {
                out.push_guess(guess)?;
            } else {
                return bad(format!("guess '{}' has the wrong length", guess));
            }
        }

        if snapshot.done && !out.is_done() {
            // the only way to end a game early is to give up
            out.outcome = Some(Outcome::Lost);
        } else if !snapshot.done && out.is_done() {
            return bad("the guesses end the game but it isn't marked done".to_string());
        }

        if (snapshot.row, snapshot.col) != out.cursor() {
            return bad(format!(
                "cursor ({}, {}) doesn't match the guesses ({}, {})",
                snapshot.row, snapshot.col, out.row, out.col,
            ));
        }

        log::debug!("restored {} game with {} guesses", out.source, out.history.len());
        Ok(out)
    }
}

fn normalize_letter(c: char) -> Result<char, SessionErr> {
    if c.is_ascii_alphabetic() {
        Ok(c.to_ascii_uppercase())
    } else {
        Err(SessionErr::InvalidLetter(c))
    }
}
