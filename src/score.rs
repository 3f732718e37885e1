use core::fmt;

pub const DIGITS: usize = 5;

/// Lines cleared this game, kept as zero-padded ASCII digits.
///
/// Fixed width means byte order and numeric order agree, so thresholds compare as strings.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Score {
    digits: [u8; DIGITS],
}

impl Score {
    pub const ZERO: Score = Score {
        digits: [b'0'; DIGITS],
    };
    pub const MAX: Score = Score {
        digits: [b'9'; DIGITS],
    };

    pub fn new() -> Self {
        Self::ZERO
    }

    /// Adds one, carrying through the digits. Saturates at all nines.
    pub fn increment(&mut self) {
        if *self == Self::MAX {
            return;
        }
        for digit in self.digits.iter_mut().rev() {
            if *digit == b'9' {
                *digit = b'0';
            } else {
                *digit += 1;
                return;
            }
        }
    }

    pub fn add_lines(&mut self, lines: usize) {
        for _ in 0..lines {
            self.increment();
        }
    }

    /// Whether this score is at or past `threshold`, compared digit by digit.
    pub fn reached(&self, threshold: &str) -> bool {
        self.digits.as_slice() >= threshold.as_bytes()
    }

    pub fn as_bytes(&self) -> &[u8; DIGITS] {
        &self.digits
    }

    pub fn as_str(&self) -> &str {
        match core::str::from_utf8(&self.digits) {
            Ok(s) => s,
            Err(_) => unreachable!("score digits are ASCII"),
        }
    }

    pub fn value(&self) -> u32 {
        self.digits
            .iter()
            .fold(0, |acc, digit| acc * 10 + u32::from(digit - b'0'))
    }
}

impl Default for Score {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score_of(value: u32) -> Score {
        let mut score = Score::new();
        score.add_lines(value as usize);
        score
    }

    #[test]
    fn carries_into_the_next_digit() {
        let mut score = score_of(9);
        assert_eq!(score.as_str(), "00009");
        score.increment();
        assert_eq!(score.as_str(), "00010");
    }

    #[test]
    fn carries_across_several_digits() {
        let mut score = score_of(999);
        score.add_lines(1);
        assert_eq!(score.as_str(), "01000");
        assert_eq!(score.value(), 1000);
    }

    #[test]
    fn saturates_at_all_nines() {
        let mut score = Score::MAX;
        score.increment();
        assert_eq!(score, Score::MAX);
        assert_eq!(score.to_string(), "99999");
    }

    #[test]
    fn threshold_comparison_is_inclusive() {
        assert!(score_of(4).reached("00004"));
        assert!(score_of(5).reached("00004"));
        assert!(!score_of(3).reached("00004"));
        assert!(score_of(10).reached("00009"));
    }
}
