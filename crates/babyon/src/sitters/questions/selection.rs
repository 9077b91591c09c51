use rand::seq::SliceRandom;
use rand::Rng;

use super::domain::InterviewQuestion;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("No active AI questions available")]
pub struct NoQuestionsAvailable;

/// Picks a question uniformly among the `sample_size` least-used entries of `pool`.
///
/// The pool must already be restricted to active questions. Selection never mutates the
/// usage counters; those move only when an upload answering the question is committed.
/// Ties in usage keep the order the pool was supplied in.
pub fn select_question<'a, R>(
    pool: &'a [InterviewQuestion],
    sample_size: usize,
    rng: &mut R,
) -> Result<&'a InterviewQuestion, NoQuestionsAvailable>
where
    R: Rng + ?Sized,
{
    if pool.is_empty() {
        return Err(NoQuestionsAvailable);
    }

    let mut ranked: Vec<&InterviewQuestion> = pool.iter().collect();
    ranked.sort_by_key(|question| question.usage_count);

    let width = sample_size.clamp(1, ranked.len());
    ranked[..width]
        .choose(rng)
        .copied()
        .ok_or(NoQuestionsAvailable)
}
