use crate::score::Score;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Level {
    /// Frames between forced drops.
    pub interval: u16,
    /// Score at which play moves on to the next level.
    pub threshold: &'static str,
}

const fn level(interval: u16, threshold: &'static str) -> Level {
    Level {
        interval,
        threshold,
    }
}

pub static LEVELS: [Level; 13] = [
    level(30, "00004"),
    level(24, "00009"),
    level(20, "00014"),
    level(16, "00019"),
    level(12, "00029"),
    level(10, "00039"),
    level(8, "00049"),
    level(6, "00059"),
    level(5, "00069"),
    level(4, "00079"),
    level(3, "00099"),
    level(2, "00119"),
    level(1, "99999"),
];

#[derive(Clone, Debug)]
pub struct Difficulty {
    table: &'static [Level],
    level: usize,
}

impl Difficulty {
    pub fn new() -> Self {
        Self::with_table(&LEVELS)
    }

    pub fn with_table(table: &'static [Level]) -> Self {
        assert!(!table.is_empty(), "difficulty table is empty");
        Self { table, level: 0 }
    }

    pub fn table(&self) -> &'static [Level] {
        self.table
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn interval(&self) -> u16 {
        self.table[self.level].interval
    }

    /// Moves up one level if `score` has reached the current threshold.
    ///
    /// Returns whether the level changed. The last level is never left.
    pub fn update(&mut self, score: &Score) -> bool {
        let last = self.table.len() - 1;
        if self.level < last && score.reached(self.table[self.level].threshold) {
            self.level += 1;
            log::info!(
                "level {} at score {}, interval {}",
                self.level,
                score,
                self.interval()
            );
            true
        } else {
            false
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::new()
    }
}
