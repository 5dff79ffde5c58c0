// src/selection/navigation.rs
use crate::filters::ranker::RankedCandidate;

/// Keys the suggestion dropdown reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationKey {
    Up,
    Down,
    Enter,
    Escape,
}

impl NavigationKey {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "up" | "arrowup" => Some(NavigationKey::Up),
            "down" | "arrowdown" => Some(NavigationKey::Down),
            "enter" | "return" => Some(NavigationKey::Enter),
            "esc" | "escape" => Some(NavigationKey::Escape),
            _ => None,
        }
    }
}

/// Ranked suggestions currently shown under the search box, plus the
/// keyboard highlight. Moving past either end wraps around.
#[derive(Debug, Clone, Default)]
pub struct SuggestionList {
    candidates: Vec<RankedCandidate>,
    highlighted: Option<usize>,
}

impl SuggestionList {
    /// Replaces the list and drops the highlight.
    pub fn replace(&mut self, candidates: Vec<RankedCandidate>) {
        self.candidates = candidates;
        self.highlighted = None;
    }

    pub fn clear(&mut self) {
        self.replace(Vec::new());
    }

    pub fn candidates(&self) -> &[RankedCandidate] {
        &self.candidates
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn highlighted_index(&self) -> Option<usize> {
        self.highlighted
    }

    pub fn highlighted(&self) -> Option<&RankedCandidate> {
        self.highlighted.and_then(|i| self.candidates.get(i))
    }

    pub fn move_next(&mut self) -> Option<usize> {
        if self.candidates.is_empty() {
            return None;
        }
        self.highlighted = Some(match self.highlighted {
            Some(i) if i + 1 < self.candidates.len() => i + 1,
            Some(_) => 0,
            None => 0,
        });
        self.highlighted
    }

    pub fn move_previous(&mut self) -> Option<usize> {
        if self.candidates.is_empty() {
            return None;
        }
        let last = self.candidates.len() - 1;
        self.highlighted = Some(match self.highlighted {
            Some(0) | None => last,
            Some(i) => i - 1,
        });
        self.highlighted
    }
}
