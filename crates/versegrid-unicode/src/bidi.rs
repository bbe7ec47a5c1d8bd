//! Visual reordering with the Unicode Bidirectional Algorithm

use unicode_bidi::{BidiInfo, Level};
use versegrid_core::types::BaseDirection;

/// Rewrites logical-order text in the order it should appear on screen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BidiReorderer {
    direction: BaseDirection,
}

impl BidiReorderer {
    pub fn new(direction: BaseDirection) -> Self {
        Self { direction }
    }

    pub fn direction(&self) -> BaseDirection {
        self.direction
    }

    /// Reorder every paragraph of `text` into display order
    ///
    /// Right-to-left runs are reversed character by character and paired
    /// brackets inside them are mirrored.
    pub fn reorder(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        let base_level = match self.direction {
            BaseDirection::Auto => None,
            BaseDirection::LeftToRight => Some(Level::ltr()),
            BaseDirection::RightToLeft => Some(Level::rtl()),
        };

        let bidi = BidiInfo::new(text, base_level);
        let mut visual = String::with_capacity(text.len());

        for paragraph in &bidi.paragraphs {
            let line = paragraph.range.clone();
            let (levels, runs) = bidi.visual_runs(paragraph, line);

            for run in runs {
                if run.start >= run.end {
                    continue;
                }
                let rtl = levels
                    .get(run.start)
                    .copied()
                    .unwrap_or(paragraph.level)
                    .is_rtl();
                let slice = &text[run];
                if rtl {
                    visual.extend(slice.chars().rev().map(mirror));
                } else {
                    visual.push_str(slice);
                }
            }
        }

        visual
    }
}

/// Mirrored counterpart for characters drawn reversed in RTL runs
pub fn mirror(ch: char) -> char {
    match ch {
        '(' => ')',
        ')' => '(',
        '[' => ']',
        ']' => '[',
        '{' => '}',
        '}' => '{',
        '<' => '>',
        '>' => '<',
        '«' => '»',
        '»' => '«',
        '\u{2039}' => '\u{203A}',
        '\u{203A}' => '\u{2039}',
        other => other,
    }
}
