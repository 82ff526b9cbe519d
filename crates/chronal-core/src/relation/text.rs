//! Nine-character diagnostic diagrams.
//!
//! The reference interval is drawn as `__|||||__`: its boundaries and
//! interior occupy the middle five slots, the outer two slots on each side
//! stand for "before" and "after". The described interval is painted over
//! it, turning `|` into `#` and `_` into `=`:
//!
//! ```text
//! left_adjoining   ==#||||__
//! equal            __#####__
//! inside           __||#||__
//! right            __|||||_=
//! ```
//!
//! Diagrams are for tests and logs only; nothing branches on them.

use std::fmt;

use super::{Relation, RelationCode};
use crate::error::RelationError;

/// Width of every diagram.
pub const DIAGRAM_WIDTH: usize = 9;

const EMPTY: u8 = b'_';
const FILL: u8 = b'=';
const BOUNDARY: u8 = b'|';
const FILLED_BOUNDARY: u8 = b'#';

const TEMPLATE: [u8; DIAGRAM_WIDTH] = *b"__|||||__";

/// Slot a code is painted at.
const fn slot(code: RelationCode) -> Option<usize> {
    match code {
        RelationCode::None => None,
        RelationCode::Left => Some(0),
        RelationCode::AtLeft => Some(2),
        RelationCode::Inside => Some(4),
        RelationCode::AtRight => Some(6),
        RelationCode::Right => Some(8),
    }
}

fn render(relation: Relation) -> [u8; DIAGRAM_WIDTH] {
    let (Some(from), Some(to)) = (slot(relation.left_code()), slot(relation.right_code())) else {
        return [EMPTY; DIAGRAM_WIDTH];
    };

    let mut cells = TEMPLATE;
    for cell in &mut cells[from..=to] {
        *cell = if *cell == BOUNDARY {
            FILLED_BOUNDARY
        } else {
            FILL
        };
    }
    cells
}

impl Relation {
    /// The nine-character diagram for this relation.
    #[must_use]
    pub fn diagram(self) -> String {
        render(self).iter().map(|&b| char::from(b)).collect()
    }

    /// Recover a relation from its diagram.
    ///
    /// # Errors
    ///
    /// Returns [`RelationError::Unknown`] if `diagram` is not the rendering
    /// of any canonical relation.
    pub fn from_diagram(diagram: &str) -> Result<Self, RelationError> {
        let bytes = diagram.as_bytes();
        Self::all()
            .find(|r| bytes.len() == DIAGRAM_WIDTH && render(*r) == bytes)
            .ok_or_else(|| RelationError::Unknown(diagram.to_string()))
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.diagram())
    }
}
