use bevy::prelude::Resource;

/// Counts balls that reach the bucket, at most one per throw.
#[derive(Resource, Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct ScoreTracker {
    score: u32,
    counted_this_throw: bool,
}

impl ScoreTracker {
    pub const fn score(&self) -> u32 {
        self.score
    }

    pub fn begin_throw(&mut self) {
        self.counted_this_throw = false;
    }

    /// Returns true when the goal counts.
    pub fn register_goal(&mut self) -> bool {
        if self.counted_this_throw {
            return false;
        }

        self.score += 1;
        self.counted_this_throw = true;
        true
    }
}
