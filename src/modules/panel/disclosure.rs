//! Show More / Show Less state for the recommended fixes list

use crate::report::FixGroup;
use std::collections::HashMap;

/// Groups and steps shown while collapsed
pub const COLLAPSED_LIMIT: usize = 3;

/// Label of a disclosure toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    ShowMore,
    ShowLess,
}

impl Toggle {
    fn for_expanded(expanded: bool) -> Self {
        if expanded {
            Toggle::ShowLess
        } else {
            Toggle::ShowMore
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Toggle::ShowMore => "Show More",
            Toggle::ShowLess => "Show Less",
        }
    }
}

/// Expansion flags for the fix list.
///
/// Per-group flags are keyed by group index and only affect that group's
/// steps. The global flag only affects how many groups are listed. The
/// two never influence each other.
#[derive(Debug, Clone, Default)]
pub struct Disclosure {
    expanded: HashMap<usize, bool>,
    global_expanded: bool,
}

impl Disclosure {
    pub fn is_expanded(&self, index: usize) -> bool {
        self.expanded.get(&index).copied().unwrap_or(false)
    }

    pub fn is_global_expanded(&self) -> bool {
        self.global_expanded
    }

    pub fn toggle(&mut self, index: usize) {
        let flag = self.expanded.entry(index).or_insert(false);
        *flag = !*flag;
    }

    pub fn toggle_global(&mut self) {
        self.global_expanded = !self.global_expanded;
    }

    pub fn visible_groups<'a>(&self, groups: &'a [FixGroup]) -> &'a [FixGroup] {
        if self.global_expanded {
            groups
        } else {
            &groups[..groups.len().min(COLLAPSED_LIMIT)]
        }
    }

    pub fn visible_steps<'a>(&self, index: usize, steps: &'a [String]) -> &'a [String] {
        if self.is_expanded(index) {
            steps
        } else {
            &steps[..steps.len().min(COLLAPSED_LIMIT)]
        }
    }

    /// Toggle for one group, if it has enough steps to need one
    pub fn group_toggle(&self, index: usize, step_count: usize) -> Option<Toggle> {
        (step_count > COLLAPSED_LIMIT).then(|| Toggle::for_expanded(self.is_expanded(index)))
    }

    /// Toggle for the whole list, if there are enough groups to need one
    pub fn global_toggle(&self, group_count: usize) -> Option<Toggle> {
        (group_count > COLLAPSED_LIMIT).then(|| Toggle::for_expanded(self.is_global_expanded()))
    }
}
