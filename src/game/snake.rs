use ratatui::layout::Position;
use std::collections::VecDeque;

/// Snake state.  Snate.
///
/// Positions are in logical board units.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) struct Snake {
    /// The position of the snake's head
    pub(super) head: Position,

    /// The positions of the rest of the snake's segments, from the one
    /// directly behind the head to the tail
    pub(super) body: VecDeque<Position>,
}

impl Snake {
    /// Create a new snake consisting of just a head at `head`
    pub(super) fn new(head: Position) -> Snake {
        Snake {
            head,
            body: VecDeque::new(),
        }
    }

    /// Return the position of the snake's head
    pub(super) fn head(&self) -> Position {
        self.head
    }

    /// Return the positions of every segment other than the head
    pub(super) fn body(&self) -> &VecDeque<Position> {
        &self.body
    }

    /// Return the number of segments, head included
    pub(super) fn len(&self) -> usize {
        self.body.len() + 1
    }

    /// Iterate over all segments, head first
    pub(super) fn segments(&self) -> impl Iterator<Item = Position> + '_ {
        std::iter::once(self.head).chain(self.body.iter().copied())
    }

    /// Make `pos` the new head, with the old head becoming the first body
    /// segment
    pub(super) fn push_head(&mut self, pos: Position) {
        self.body.push_front(self.head);
        self.head = pos;
    }

    /// Remove the last segment.  The head is never removed.
    pub(super) fn pop_tail(&mut self) {
        let _ = self.body.pop_back();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_pop() {
        let mut snake = Snake::new(Position::new(100, 100));
        assert_eq!(snake.len(), 1);
        snake.push_head(Position::new(120, 100));
        assert_eq!(snake.len(), 2);
        assert_eq!(
            snake.segments().collect::<Vec<_>>(),
            [Position::new(120, 100), Position::new(100, 100)]
        );
        snake.pop_tail();
        assert_eq!(snake, Snake::new(Position::new(120, 100)));
        snake.pop_tail();
        assert_eq!(snake, Snake::new(Position::new(120, 100)));
    }
}
