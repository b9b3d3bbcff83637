use std::fs;
use std::path::Path;

use itertools::Itertools;

use crate::error::PuzzleError;

pub type Pos = (i32, i32);

/// Fixed neighbour order for determinism: N, E, S, W
pub const STEPS: [Pos; 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

/// Rectangular character grid as read from a puzzle file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CharGrid {
    pub width: usize,
    pub height: usize,
    cells: Vec<char>,
}

impl CharGrid {
    /// Blank lines before and after the grid are ignored; every other line
    /// must have the same width.
    pub fn parse(input: &str) -> Result<Self, PuzzleError> {
        let lines: Vec<&str> = input
            .lines()
            .map(str::trim_end)
            .skip_while(|l| l.is_empty())
            .collect();
        let end = lines.iter().rposition(|l| !l.is_empty()).ok_or(PuzzleError::Empty)?;
        let lines = &lines[..=end];

        let width = lines[0].chars().count();
        let mut cells = Vec::with_capacity(width * lines.len());
        for (i, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(PuzzleError::Ragged { line: i + 1, expected: width, found });
            }
            cells.extend(line.chars());
        }
        Ok(Self { width, height: lines.len(), cells })
    }

    pub fn load(path: &Path) -> Result<Self, PuzzleError> {
        let text = fs::read_to_string(path).map_err(|source| PuzzleError::Io { path: path.to_path_buf(), source })?;
        Self::parse(&text)
    }

    pub fn contains(&self, (x, y): Pos) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Row-major index of an in-bounds position.
    pub fn index(&self, (x, y): Pos) -> usize {
        y as usize * self.width + x as usize
    }

    pub fn get(&self, pos: Pos) -> Option<char> {
        self.contains(pos).then(|| self.cells[self.index(pos)])
    }

    pub fn positions(&self) -> impl Iterator<Item = (Pos, char)> + '_ {
        self.cells.iter().enumerate().map(move |(i, &c)| (((i % self.width) as i32, (i / self.width) as i32), c))
    }

    /// Position of the single `ch` cell.
    pub fn find_unique(&self, ch: char) -> Result<Pos, PuzzleError> {
        let mut hits = self.positions().filter(|&(_, c)| c == ch).map(|(p, _)| p);
        let first = hits.next().ok_or(PuzzleError::Missing(ch))?;
        if hits.next().is_some() {
            return Err(PuzzleError::Duplicate(ch));
        }
        Ok(first)
    }

    /// First cell whose character fails `allowed`, as a parse error.
    pub fn check_cells(&self, allowed: impl Fn(char) -> bool) -> Result<(), PuzzleError> {
        match self.positions().find(|&(_, c)| !allowed(c)) {
            Some(((x, y), ch)) => Err(PuzzleError::UnknownCell { line: y as usize + 1, column: x as usize + 1, ch }),
            None => Ok(()),
        }
    }

    /// The grid with every position in `marks` replaced by `mark`.
    pub fn overlay(&self, marks: &[Pos], mark: char) -> String {
        let mut cells = self.cells.clone();
        for &p in marks {
            if self.contains(p) {
                cells[self.index(p)] = mark;
            }
        }
        cells.chunks(self.width).map(|row| row.iter().collect::<String>()).join("\n")
    }
}
