use std::collections::HashSet;

use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::{debug, info, instrument, trace};

use crate::{
    error::BoardError,
    models::{GameParams, Pos, Status},
    spot::Spot,
};

/// Right, down, up, left. Diagonals do not count as neighbours.
const NEIGHBORS: [(isize, isize); 4] = [(0, 1), (1, 0), (-1, 0), (0, -1)];

/// Selection sampling: each cell is mined with probability
/// `bombs_left / cells_left`, which yields every k-subset with equal odds.
fn generate_bombs<R: Rng + ?Sized>(length: usize, bombs: usize, rng: &mut R) -> Vec<bool> {
    let mut placed = Vec::with_capacity(length);

    let mut bombs_left = bombs.min(length);
    for cells_left in (1..=length).rev() {
        let value = rng.random_ratio(bombs_left as u32, cells_left as u32);
        placed.push(value);
        if value {
            bombs_left -= 1;
        }
    }

    placed
}

#[derive(Debug, Clone)]
pub struct Board {
    width: usize,
    depth: usize,
    bombs: usize,
    inverse_input: bool,
    status: Status,
    spots: Vec<Spot>,
}

impl Board {
    /// Builds a board from `params`, seeding the mine layout from
    /// `params.seed` when one is given.
    pub fn new(params: GameParams) -> Self {
        match params.seed {
            Some(seed) => Self::with_rng(params, &mut StdRng::seed_from_u64(seed)),
            None => Self::with_rng(params, &mut rand::rng()),
        }
    }

    #[instrument(level = "trace", skip(rng))]
    pub fn with_rng<R: Rng + ?Sized>(params: GameParams, rng: &mut R) -> Self {
        let length = params.width * params.depth;
        let mines = generate_bombs(length, params.bombs, rng);

        let mut board = Self::empty(params.width, params.depth, params.inverse_input);
        board.lay_mines(&mines);

        info!(
            "Created board: {}x{} with {} bombs ({} requested)",
            board.width, board.depth, board.bombs, params.bombs
        );
        if let Some(seed) = params.seed {
            debug!("Board seeded with {}", seed);
        }

        board
    }

    /// Builds a board with mines at exactly the given `(row, col)` positions.
    /// Positions outside the grid are ignored.
    pub fn from_mines(width: usize, depth: usize, mines: &[Pos], inverse_input: bool) -> Self {
        let mut layout = vec![false; width * depth];
        for pos in mines {
            if pos.row < depth && pos.col < width {
                layout[pos.row * width + pos.col] = true;
            }
        }

        let mut board = Self::empty(width, depth, inverse_input);
        board.lay_mines(&layout);
        board
    }

    fn empty(width: usize, depth: usize, inverse_input: bool) -> Self {
        Self {
            width,
            depth,
            bombs: 0,
            inverse_input,
            status: Status::Running,
            spots: vec![Spot::default(); width * depth],
        }
    }

    fn lay_mines(&mut self, mines: &[bool]) {
        for (spot, &mine) in self.spots.iter_mut().zip(mines) {
            spot.reset();
            spot.is_mine = mine;
        }
        self.bombs = self.spots.iter().filter(|spot| spot.is_mine).count();

        for index in 0..self.spots.len() {
            let pos = self.pos_of(index);
            let adjacent = self
                .neighbors(pos)
                .filter(|&neighbor| self.spots[self.index(neighbor)].is_mine)
                .count();
            self.spots[index].adjacent = adjacent as u8;
        }
    }

    fn index(&self, pos: Pos) -> usize {
        pos.row * self.width + pos.col
    }

    fn pos_of(&self, index: usize) -> Pos {
        Pos::new(index / self.width, index % self.width)
    }

    fn contains(&self, pos: Pos) -> bool {
        pos.row < self.depth && pos.col < self.width
    }

    fn neighbors(&self, pos: Pos) -> impl DoubleEndedIterator<Item = Pos> + '_ {
        NEIGHBORS.iter().filter_map(move |&(dr, dc)| {
            let row = pos.row.checked_add_signed(dr)?;
            let col = pos.col.checked_add_signed(dc)?;
            let neighbor = Pos::new(row, col);
            self.contains(neighbor).then_some(neighbor)
        })
    }

    /// Maps player coordinates onto the grid, swapping the pair first when
    /// the board takes inverse input.
    fn translate(&self, x: i64, y: i64) -> Option<Pos> {
        if x < 0 || y < 0 {
            return None;
        }

        let (row, col) = if self.inverse_input { (y, x) } else { (x, y) };
        let pos = Pos::new(usize::try_from(row).ok()?, usize::try_from(col).ok()?);
        self.contains(pos).then_some(pos)
    }

    pub fn in_bounds(&self, x: i64, y: i64) -> bool {
        self.translate(x, y).is_some()
    }

    /// Applies a move at player coordinates `(x, y)` and returns the
    /// resulting status. Coordinates off the board leave it untouched, and a
    /// decided game keeps its status.
    #[instrument(level = "trace", skip(self))]
    pub fn update(&mut self, x: i64, y: i64) -> Result<Status, BoardError> {
        let pos = self
            .translate(x, y)
            .ok_or(BoardError::OutOfRange { x, y })?;

        if self.spots[self.index(pos)].is_mine {
            info!("Mine hit at row {}, col {}", pos.row, pos.col);
            if self.status.is_running() {
                self.status = Status::Lost;
            }
            return Ok(self.status);
        }

        let revealed = self.reveal(pos.row, pos.col);
        debug!(
            "Revealed {} cells from row {}, col {}",
            revealed.len(),
            pos.row,
            pos.col
        );

        if self.status.is_running() && self.has_won() {
            info!("All safe cells revealed, game won");
            self.status = Status::Won;
        }

        Ok(self.status)
    }

    /// Flood-fill reveal from a grid position. Zero-count cells expand to
    /// their neighbours; numbered cells are revealed but stop the fill.
    /// Returns the cells visited, in visit order.
    pub fn reveal(&mut self, row: usize, col: usize) -> Vec<Pos> {
        let start = Pos::new(row, col);
        let mut order = Vec::new();
        if !self.contains(start) {
            return order;
        }

        let mut visited = HashSet::new();
        let mut stack = vec![start];
        while let Some(pos) = stack.pop() {
            if !visited.insert(pos) {
                continue;
            }

            let index = self.index(pos);
            self.spots[index].revealed = true;
            order.push(pos);
            trace!("Revealed row {}, col {}", pos.row, pos.col);

            if self.spots[index].adjacent == 0 {
                // Reversed so the first neighbour is expanded first.
                stack.extend(self.neighbors(pos).rev());
            }
        }

        order
    }

    pub fn has_won(&self) -> bool {
        !self.spots.iter().any(|spot| !spot.revealed && !spot.is_mine)
    }

    /// Ends the session without a result. Has no effect once decided.
    pub fn finish(&mut self) {
        if self.status.is_running() {
            debug!("Game abandoned");
            self.status = Status::Quit;
        }
    }

    fn render(&self, reveal_all: bool) -> Vec<Vec<char>> {
        (0..self.depth)
            .map(|row| {
                (0..self.width)
                    .map(|col| self.spots[self.index(Pos::new(row, col))].display(reveal_all))
                    .collect()
            })
            .collect()
    }

    /// Glyphs as the player currently sees them; hidden cells show `?`.
    pub fn render_rows(&self) -> Vec<Vec<char>> {
        self.render(false)
    }

    /// Every cell's final glyph, mines included, for the end-of-game board.
    pub fn render_final(&self) -> Vec<Vec<char>> {
        self.render(true)
    }

    pub fn spot(&self, row: usize, col: usize) -> Option<&Spot> {
        let pos = Pos::new(row, col);
        self.contains(pos).then(|| &self.spots[self.index(pos)])
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Number of mines actually placed, after clamping to the grid size.
    pub fn bombs(&self) -> usize {
        self.bombs
    }

    pub fn inverse_input(&self) -> bool {
        self.inverse_input
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn running(&self) -> bool {
        self.status.is_running()
    }

    pub fn exploded(&self) -> bool {
        self.status.is_exploded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_placed(bombs: &[bool]) -> usize {
        bombs.iter().filter(|&&bomb| bomb).count()
    }

    #[test]
    fn generate_bombs_places_exact_count() {
        let mut rng = StdRng::seed_from_u64(7);
        for bombs in 0..=12 {
            let placed = generate_bombs(12, bombs, &mut rng);
            assert_eq!(placed.len(), 12);
            assert_eq!(count_placed(&placed), bombs);
        }
    }

    #[test]
    fn generate_bombs_clamps_to_length() {
        let mut rng = StdRng::seed_from_u64(1);
        let placed = generate_bombs(4, 100, &mut rng);
        assert_eq!(count_placed(&placed), 4);
    }

    #[test]
    fn generate_bombs_on_empty_grid() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(generate_bombs(0, 5, &mut rng).is_empty());
    }

    #[test]
    fn neighbors_stay_on_grid() {
        let board = Board::from_mines(3, 2, &[], false);
        let corner: Vec<_> = board.neighbors(Pos::new(0, 0)).collect();
        assert_eq!(corner, vec![Pos::new(0, 1), Pos::new(1, 0)]);

        let edge: Vec<_> = board.neighbors(Pos::new(1, 1)).collect();
        assert_eq!(edge, vec![Pos::new(1, 2), Pos::new(0, 1), Pos::new(1, 0)]);
    }

    #[test]
    fn translate_swaps_only_with_inverse_input() {
        let straight = Board::from_mines(2, 3, &[], false);
        assert_eq!(straight.translate(2, 1), Some(Pos::new(2, 1)));
        assert_eq!(straight.translate(1, 2), None);

        let inverse = Board::from_mines(2, 3, &[], true);
        assert_eq!(inverse.translate(1, 2), Some(Pos::new(2, 1)));
        assert_eq!(inverse.translate(2, 1), None);
    }

    #[test]
    fn flood_fill_visits_first_neighbour_first() {
        let mut board = Board::from_mines(3, 1, &[], false);
        let order = board.reveal(0, 0);
        assert_eq!(order, vec![Pos::new(0, 0), Pos::new(0, 1), Pos::new(0, 2)]);
    }

    #[test]
    fn finish_keeps_decided_status() {
        let mut board = Board::from_mines(1, 1, &[Pos::new(0, 0)], false);
        assert_eq!(board.update(0, 0), Ok(Status::Lost));
        board.finish();
        assert_eq!(board.status(), Status::Lost);

        let mut board = Board::from_mines(2, 2, &[], false);
        board.finish();
        assert_eq!(board.status(), Status::Quit);
        assert!(!board.running());
        assert!(!board.exploded());
    }

    #[test]
    fn moves_after_the_end_never_change_status() {
        let mut board = Board::from_mines(3, 1, &[Pos::new(0, 1)], false);
        assert_eq!(board.update(0, 1), Ok(Status::Lost));
        assert_eq!(board.update(0, 0), Ok(Status::Lost));
        assert_eq!(board.update(0, 2), Ok(Status::Lost));
        assert!(board.has_won());
        assert!(board.exploded());
        assert!(!board.running());

        let mut board = Board::from_mines(1, 1, &[], false);
        board.finish();
        assert_eq!(board.update(0, 0), Ok(Status::Quit));
        assert!(board.spot(0, 0).unwrap().is_revealed());
        assert!(!board.exploded());

        let mut board = Board::from_mines(2, 1, &[Pos::new(0, 1)], false);
        assert_eq!(board.update(0, 0), Ok(Status::Won));
        assert_eq!(board.update(0, 1), Ok(Status::Won));
        assert!(!board.exploded());
    }
}
