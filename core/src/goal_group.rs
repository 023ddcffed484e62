//! Collections of goals compared either as sequences or as multisets.

use crate::{BoardEntity, Goal, Point};

/// Goals the player has visited, or the goals a level asks for.
#[derive(Clone, Debug, Default)]
pub struct GoalGroup {
    goals: Vec<Goal>,
    /// Whether equality takes insertion order into account.
    pub is_ordered: bool,
}

impl GoalGroup {
    /// Creates an empty, unordered group.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty group compared in the provided mode.
    #[must_use]
    pub fn with_ordering(is_ordered: bool) -> Self {
        Self {
            goals: Vec::new(),
            is_ordered,
        }
    }

    /// Appends a goal to the group.
    pub fn add(&mut self, goal: Goal) {
        self.goals.push(goal);
    }

    /// Changes the comparison mode.
    pub fn set_ordered(&mut self, is_ordered: bool) {
        self.is_ordered = is_ordered;
    }

    /// Number of goals in the group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.goals.len()
    }

    /// Whether the group holds no goals.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }

    /// Goals in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Goal> {
        self.goals.iter()
    }

    /// Whether an equal goal is already present.
    #[must_use]
    pub fn contains(&self, goal: &Goal) -> bool {
        self.goals.iter().any(|existing| existing == goal)
    }

    /// Goal placed on the provided square, if any.
    #[must_use]
    pub fn goal_at(&self, position: Point) -> Option<&Goal> {
        self.goals
            .iter()
            .find(|goal| goal.logical_position() == position)
    }

    /// Removes every goal, keeping the comparison mode.
    pub fn clear(&mut self) {
        self.goals.clear();
    }
}

/// Groups are equal when both use the same mode and hold the same goals:
/// position by position when ordered, as multisets when unordered.
impl PartialEq for GoalGroup {
    fn eq(&self, other: &Self) -> bool {
        if self.goals.len() != other.goals.len() || self.is_ordered != other.is_ordered {
            return false;
        }

        if self.is_ordered {
            return self.goals.iter().zip(&other.goals).all(|(a, b)| a == b);
        }

        let mut matched = vec![false; other.goals.len()];
        self.goals.iter().all(|goal| {
            let candidate = other
                .goals
                .iter()
                .enumerate()
                .position(|(index, candidate)| !matched[index] && candidate == goal);
            match candidate {
                Some(index) => {
                    matched[index] = true;
                    true
                }
                None => false,
            }
        })
    }
}

impl Eq for GoalGroup {}

impl Extend<Goal> for GoalGroup {
    fn extend<T: IntoIterator<Item = Goal>>(&mut self, iter: T) {
        self.goals.extend(iter);
    }
}
