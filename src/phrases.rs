//! Local phrase pools used when the remote phrase service is unavailable and
//! for completion celebrations. Selection is uniform random.

use rand::seq::SliceRandom;

/// Shown when the motivational-phrase endpoint fails. Never surfaced as an
/// error; the engine always has something to display.
pub const FALLBACK_PHRASES: [&str; 5] = [
    "Every minute of study is a step toward success.",
    "Discipline is the bridge between goals and results.",
    "You are investing in your future, keep going.",
    "Knowledge is the one treasure no one can take from you.",
    "You are closer to your goals today than you were yesterday.",
];

/// Shown when a cycle runs to natural completion.
pub const COMPLETION_PHRASES: [&str; 4] = [
    "Fantastic, you completed the session!",
    "Excellent, another session on your road to success!",
    "Great work, you are building solid study habits!",
    "Done! Every session brings you closer to your goals.",
];

pub fn fallback_phrase() -> &'static str {
    FALLBACK_PHRASES
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(FALLBACK_PHRASES[0])
}

pub fn completion_phrase() -> &'static str {
    COMPLETION_PHRASES
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(COMPLETION_PHRASES[0])
}
