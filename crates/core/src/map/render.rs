//! ASCII rendering and external room labels.

use std::fmt;

use super::node::Room;
use super::{Map, COLUMN_COUNT, ROW_COUNT};

impl Map {
    /// External label for the room at a position: the room name, or
    /// `BurningElite1..4` for the tagged elite.
    pub fn room_name(&self, x: usize, y: usize) -> Option<String> {
        let room = self.node(x, y).room()?;
        if room == Room::Elite {
            if let Some(elite) = self.burning_elite() {
                if elite.x == x && elite.y == y {
                    return Some(format!("BurningElite{}", elite.buff + 1));
                }
            }
        }
        Some(room.name().to_string())
    }

    fn is_drawn(&self, x: usize, y: usize) -> bool {
        let node = self.node(x, y);
        node.edge_count() > 0 || node.room().is_some()
    }

    fn room_symbol(&self, x: usize, y: usize) -> char {
        if let Some(elite) = self.burning_elite() {
            if elite.x == x && elite.y == y {
                return char::from_digit(elite.buff as u32 + 1, 10).unwrap_or('E');
            }
        }
        self.node(x, y).room().map_or('*', Room::symbol)
    }
}

/// Draws the map top row first: one line of exit glyphs entering the row,
/// one line of room symbols. Empty rows above the highest populated one are
/// skipped.
impl fmt::Display for Map {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut lines: Vec<String> = Vec::new();
        let mut reached_content = false;
        for row in (0..ROW_COUNT).rev() {
            if !reached_content {
                if !(0..COLUMN_COUNT).any(|col| self.is_drawn(col, row)) {
                    continue;
                }
                reached_content = true;
            }

            let mut exits_line = String::new();
            let mut rooms_line = String::new();
            for col in 0..COLUMN_COUNT {
                if self.is_drawn(col, row) {
                    exits_line.push_str(self.node(col, row).exits().glyph());
                    rooms_line.push(' ');
                    rooms_line.push(self.room_symbol(col, row));
                    rooms_line.push(' ');
                } else {
                    exits_line.push_str("   ");
                    rooms_line.push_str("   ");
                }
            }
            lines.push(exits_line);
            lines.push(rooms_line);
        }
        write!(f, "{}", lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::super::Map;

    #[test]
    fn final_act_map_renders_its_single_column() {
        assert_eq!(
            Map::act4().to_string(),
            [
                r"                     ",
                r"          B          ",
                r"          |          ",
                r"          E          ",
                r"          |          ",
                r"          $          ",
                r"          |          ",
                r"          R          ",
            ]
            .join("\n")
        );
    }

    #[test]
    fn empty_map_renders_nothing() {
        assert!(Map::empty().to_string().is_empty());
    }

    #[test]
    fn room_names_cover_the_burning_elite() {
        let map = Map::act4();
        assert_eq!(map.room_name(3, 0).as_deref(), Some("Rest"));
        assert_eq!(map.room_name(3, 2).as_deref(), Some("Elite"));
        assert_eq!(map.room_name(3, 3).as_deref(), Some("Boss"));
        assert_eq!(map.room_name(0, 0), None);
    }
}
