// ============================================================
// Layer 2 — Best-of-N Extractive Answerer
// ============================================================
// Asks the span extractor about every passage, one at a time,
// and keeps the highest-scoring span.
//
//   best = ("", 0.0)
//   for passage in passages:
//       span = extract(question, passage)
//       if span.score > best.score: best = span
//
// The comparison is strict, so on a tie the earlier passage
// keeps its place, and a span scoring exactly 0 never replaces
// the empty answer. N passages cost N model calls; nothing is
// batched, cached, or cut short.

use anyhow::Result;

use crate::domain::traits::{ExtractiveAnswerer, SpanExtractor};

pub struct BestSpanAnswerer<E: SpanExtractor> {
    extractor: E,
}

impl<E: SpanExtractor> BestSpanAnswerer<E> {
    pub fn new(extractor: E) -> Self {
        Self { extractor }
    }
}

impl<E: SpanExtractor> ExtractiveAnswerer for BestSpanAnswerer<E> {
    fn answer(&self, question: &str, passages: &[String]) -> Result<String> {
        let mut best_score  = 0.0_f32;
        let mut best_answer = String::new();

        for (idx, passage) in passages.iter().enumerate() {
            let span = self.extractor.extract(question, passage)?;
            tracing::debug!("Passage {} score={:.4} span='{}'", idx, span.score, span.text);

            if span.score > best_score {
                best_score  = span.score;
                best_answer = span.text;
            }
        }

        tracing::info!(
            "Best span over {} passages: score={:.4}",
            passages.len(),
            best_score
        );
        Ok(best_answer)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::answer::ScoredSpan;
    use std::cell::RefCell;

    /// Returns a fixed score per passage and records every call.
    struct FixedScores {
        scores: Vec<f32>,
        calls:  RefCell<Vec<String>>,
    }

    impl FixedScores {
        fn new(scores: &[f32]) -> Self {
            Self { scores: scores.to_vec(), calls: RefCell::new(Vec::new()) }
        }
    }

    impl SpanExtractor for FixedScores {
        fn extract(&self, _question: &str, passage: &str) -> Result<ScoredSpan> {
            let idx = self.calls.borrow().len();
            self.calls.borrow_mut().push(passage.to_string());
            Ok(ScoredSpan::new(format!("span from {passage}"), self.scores[idx]))
        }
    }

    fn passages(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("p{i}")).collect()
    }

    #[test]
    fn test_empty_passages_give_empty_answer() {
        let answerer = BestSpanAnswerer::new(FixedScores::new(&[]));
        assert_eq!(answerer.answer("q", &[]).unwrap(), "");
        assert!(answerer.extractor.calls.borrow().is_empty());
    }

    #[test]
    fn test_ties_keep_first_maximum() {
        let answerer = BestSpanAnswerer::new(FixedScores::new(&[0.2, 0.9, 0.9]));
        assert_eq!(answerer.answer("q", &passages(3)).unwrap(), "span from p1");
    }

    #[test]
    fn test_every_passage_is_scored_once_in_order() {
        let answerer = BestSpanAnswerer::new(FixedScores::new(&[0.9, 0.1, 0.3]));
        answerer.answer("q", &passages(3)).unwrap();
        assert_eq!(*answerer.extractor.calls.borrow(), passages(3));
    }

    #[test]
    fn test_later_higher_score_wins() {
        let answerer = BestSpanAnswerer::new(FixedScores::new(&[0.3, 0.1, 0.95]));
        assert_eq!(answerer.answer("q", &passages(3)).unwrap(), "span from p2");
    }

    #[test]
    fn test_zero_scores_leave_answer_empty() {
        let answerer = BestSpanAnswerer::new(FixedScores::new(&[0.0, 0.0]));
        assert_eq!(answerer.answer("q", &passages(2)).unwrap(), "");
    }

    #[test]
    fn test_extractor_error_propagates() {
        struct Failing;
        impl SpanExtractor for Failing {
            fn extract(&self, _: &str, _: &str) -> Result<ScoredSpan> {
                anyhow::bail!("model runtime failure")
            }
        }
        let answerer = BestSpanAnswerer::new(Failing);
        assert!(answerer.answer("q", &passages(1)).is_err());
    }
}
