use super::RingStateSignals;
use crate::reactive::{batch, request_change, ChangeFlags};

/// One step of the countdown, applied once per tick in declaration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CountdownPhase {
    /// Sliver of ring under the "Ready" label
    Ready,
    /// Sweep to a full circle
    Fill,
    Three,
    Two,
    One,
    /// Fade the label and shrink the stroke to nothing
    FadeOut,
    /// Raise the finished flag
    Finished,
}

impl CountdownPhase {
    pub const ALL: [CountdownPhase; 7] = [
        CountdownPhase::Ready,
        CountdownPhase::Fill,
        CountdownPhase::Three,
        CountdownPhase::Two,
        CountdownPhase::One,
        CountdownPhase::FadeOut,
        CountdownPhase::Finished,
    ];

    /// Label shown once this phase has been applied, if it sets one
    pub fn label(self) -> Option<&'static str> {
        match self {
            CountdownPhase::Three => Some("3"),
            CountdownPhase::Two => Some("2"),
            CountdownPhase::One => Some("1"),
            _ => None,
        }
    }

    /// Target sweep angle in degrees, if this phase moves the ring
    pub fn degrees(self) -> Option<f32> {
        match self {
            CountdownPhase::Ready | CountdownPhase::One => Some(1.0),
            CountdownPhase::Fill => Some(360.0),
            CountdownPhase::Three => Some(240.0),
            CountdownPhase::Two => Some(120.0),
            CountdownPhase::FadeOut | CountdownPhase::Finished => None,
        }
    }

    /// Parts of the output this phase invalidates
    pub fn changes(self) -> ChangeFlags {
        match self {
            CountdownPhase::Ready | CountdownPhase::Fill | CountdownPhase::FadeOut => {
                ChangeFlags::NEEDS_PAINT
            }
            CountdownPhase::Three | CountdownPhase::Two | CountdownPhase::One => {
                ChangeFlags::NEEDS_LAYOUT | ChangeFlags::NEEDS_PAINT
            }
            CountdownPhase::Finished => ChangeFlags::empty(),
        }
    }

    /// Write this phase's targets; observers see a single update.
    pub fn apply(self, state: &RingStateSignals) {
        batch(|| {
            if self == CountdownPhase::Three {
                state.text_factor.set(1.0);
            }
            if let Some(degrees) = self.degrees() {
                state.degrees.set(degrees);
            }
            if let Some(label) = self.label() {
                state.label.set(label.to_string());
            }
            match self {
                CountdownPhase::FadeOut => {
                    state.alpha.set(0.0);
                    state.shrink.set(0.0);
                }
                CountdownPhase::Finished => state.finished.set(true),
                _ => {}
            }
        });

        let changes = self.changes();
        if !changes.is_empty() {
            request_change(changes);
        }
    }
}
