//! Selection path and per-column offsets
//!
//! Both structures share one rule: changing the entry at depth `d`
//! discards everything deeper. `truncate` is that rule.

use crate::domain::Level;

/// Ids chosen from the root downwards; always a prefix of one root-to-leaf walk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionPath {
    ids: Vec<String>,
}

impl SelectionPath {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep at most `depth` ids.
    pub fn truncate(&mut self, depth: usize) {
        self.ids.truncate(depth);
    }

    /// Replace the selection at `level`, clearing it and every deeper level first.
    ///
    /// The parent level must already be selected; otherwise nothing is pushed.
    pub fn set(&mut self, level: Level, id: impl Into<String>) -> bool {
        let parent_depth = level.depth() - 1;
        self.truncate(parent_depth);
        if self.ids.len() != parent_depth {
            return false;
        }
        self.ids.push(id.into());
        true
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn get(&self, level: Level) -> Option<&str> {
        self.ids.get(level.depth() - 1).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Deepest selected level, if any.
    pub fn deepest(&self) -> Option<Level> {
        Level::from_depth(self.ids.len())
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }
}

/// Vertical alignment hints for the HCF, PCP and PATIENT columns (free mode).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnOffsets {
    offsets: [u32; 3],
}

impl ColumnOffsets {
    /// Offset of the column showing `level`; the CRO column is never offset.
    pub fn get(&self, level: Level) -> u32 {
        match level.depth().checked_sub(2) {
            Some(i) => self.offsets[i],
            None => 0,
        }
    }

    /// Record the clicked element's offset for the column below `clicked`,
    /// and reset every column further down.
    pub fn record(&mut self, clicked: Level, offset: u32) {
        let Some(column) = clicked.next() else {
            return;
        };
        self.truncate(clicked.depth());
        self.offsets[column.depth() - 2] = offset;
    }

    /// Zero the columns that disappear once the path is cut to `depth` ids.
    ///
    /// With `depth` ids selected, columns up to level `depth + 1` stay visible.
    pub fn truncate(&mut self, depth: usize) {
        // column i shows level depth i + 2
        for (i, offset) in self.offsets.iter_mut().enumerate() {
            if i + 2 > depth + 1 {
                *offset = 0;
            }
        }
    }

    pub fn reset(&mut self) {
        self.offsets = [0; 3];
    }
}
