//! Picking the next quiz question.

use std::collections::HashSet;

use rand::seq::IteratorRandom;
use rand::Rng;
use serde::{Serialize, Serializer};

use crate::db::Question;

/// Questions a quiz round draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizScope {
    All,
    Category(i64),
}

impl QuizScope {
    /// Category id 0 is the "all categories" choice.
    pub fn from_category_id(id: i64) -> Self {
        match id {
            0 => QuizScope::All,
            id => QuizScope::Category(id),
        }
    }
}

/// Picks uniformly among `candidates` whose id is not in `previous`.
pub fn pick_question<R: Rng + ?Sized>(
    candidates: Vec<Question>,
    previous: &[i64],
    rng: &mut R,
) -> Option<Question> {
    let previous: HashSet<i64> = previous.iter().copied().collect();
    candidates
        .into_iter()
        .filter(|q| !previous.contains(&q.id))
        .choose(rng)
}

/// The picked question, serialized as `false` once every candidate was shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizQuestion(pub Option<Question>);

impl Serialize for QuizQuestion {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match &self.0 {
            Some(question) => question.serialize(serializer),
            None => serializer.serialize_bool(false),
        }
    }
}
