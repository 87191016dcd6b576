//! Position state machine.
//!
//! All render-index bookkeeping lives here as one pure transition function,
//! `(state, event) -> (state, transition)`. Callers never adjust the index
//! themselves; they feed events and run whatever transition comes back.
//!
//! With looping enabled the render sequence is `[clone(last), items.., clone(first)]`.
//! A move past either end springs onto a clone; the completion event then
//! asks for an instant jump to the matching original, which is invisible
//! because both slots render the same item.

/// How the track should travel to a new index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionMode {
    Spring,
    /// Zero-duration jump, used only for the post-boundary teleport.
    Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionEvent {
    /// Step relative to the current index. Zero means "settle back here".
    RequestMove(i32),
    /// Jump to a render index (dot navigation, already mapped from the active index).
    RequestAbsolute(usize),
    /// The transition started for the current index has finished.
    AnimationCompleted,
}

/// A transition the motion controller must start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub index: usize,
    pub mode: TransitionMode,
}

impl Transition {
    fn spring(index: usize) -> Self {
        Self {
            index,
            mode: TransitionMode::Spring,
        }
    }

    fn instant(index: usize) -> Self {
        Self {
            index,
            mode: TransitionMode::Instant,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionState {
    index: usize,
    render_len: usize,
    looping: bool,
}

impl PositionState {
    /// Resting position for a freshly built sequence: the first original.
    pub fn new(render_len: usize, looping: bool) -> Self {
        Self {
            index: initial_index(render_len, looping),
            render_len,
            looping,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn render_len(&self) -> usize {
        self.render_len
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    /// Number of original items (N).
    pub fn item_count(&self) -> usize {
        if self.looping {
            self.render_len.saturating_sub(2)
        } else {
            self.render_len
        }
    }

    /// Index into the original item list that indicators should highlight.
    pub fn active_index(&self) -> usize {
        let count = self.item_count();
        if count == 0 {
            0
        } else if self.looping {
            (self.index + count - 1) % count
        } else {
            self.index.min(count - 1)
        }
    }

    /// Maps an active (original-list) index to its render index.
    pub fn render_index_for_active(&self, active_index: usize) -> usize {
        let active_index = active_index.min(self.item_count().saturating_sub(1));
        if self.looping && self.item_count() > 0 {
            active_index + 1
        } else {
            active_index
        }
    }

    /// `true` when the index rests on a boundary clone.
    pub fn is_on_clone(&self) -> bool {
        self.looping && self.render_len > 1 && (self.index == 0 || self.index == self.render_len - 1)
    }

    /// Runs one event through the machine.
    ///
    /// Returns the next state and, when the index changed or the track must
    /// settle again, the transition to start.
    pub fn apply(self, event: PositionEvent) -> (Self, Option<Transition>) {
        if self.render_len == 0 {
            return (self, None);
        }
        let last = self.render_len - 1;
        let transition = match event {
            PositionEvent::RequestMove(0) => Some(Transition::spring(self.index)),
            PositionEvent::RequestMove(step) => {
                // Clones absorb a single step past either end when looping;
                // the clamp only keeps the index in bounds.
                let next = (self.index as i64 + step as i64).clamp(0, last as i64) as usize;
                (next != self.index).then(|| Transition::spring(next))
            }
            PositionEvent::RequestAbsolute(target) => {
                let next = target.min(last);
                (next != self.index).then(|| Transition::spring(next))
            }
            PositionEvent::AnimationCompleted => {
                if !self.looping || self.render_len <= 1 {
                    None
                } else if self.index == last {
                    Some(Transition::instant(1))
                } else if self.index == 0 {
                    Some(Transition::instant(self.item_count()))
                } else {
                    None
                }
            }
        };

        let next = match transition {
            Some(transition) => Self {
                index: transition.index,
                ..self
            },
            None => self,
        };
        (next, transition)
    }

    /// Adapts the state to a rebuilt render sequence.
    ///
    /// Toggling looping changes what indices mean, so the position restarts
    /// at the first original. A changed item count keeps the position but
    /// clamps it into the resting range of the new sequence.
    pub fn rebuild(self, render_len: usize, looping: bool) -> Self {
        if looping != self.looping {
            return Self::new(render_len, looping);
        }
        let resized = Self {
            render_len,
            ..self
        };
        let count = resized.item_count();
        let index = if count == 0 {
            0
        } else if looping {
            self.index.clamp(1, count)
        } else {
            self.index.min(count - 1)
        };
        Self { index, ..resized }
    }
}

fn initial_index(render_len: usize, looping: bool) -> usize {
    if looping && render_len > 0 {
        1
    } else {
        0
    }
}

#[cfg(test)]
#[path = "tests/position_tests.rs"]
mod tests;
