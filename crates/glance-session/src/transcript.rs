//! Append-only chat transcript for one display session.
//!
//! Questions are numbered as they are asked. Answers may arrive in any
//! order, but a turn only becomes visible once every earlier question has
//! been answered, so the transcript always reads in request order.

use std::collections::BTreeMap;

use glance_core::entities::ChatTurn;

#[derive(Debug, Default)]
pub(crate) struct Transcript {
    turns: Vec<ChatTurn>,
    pending: BTreeMap<u64, PendingTurn>,
    next_seq: u64,
}

#[derive(Debug)]
struct PendingTurn {
    question: String,
    answer: Option<String>,
}

impl Transcript {
    /// Register a question and return its sequence number.
    pub(crate) fn ask(&mut self, question: String) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.insert(
            seq,
            PendingTurn {
                question,
                answer: None,
            },
        );
        seq
    }

    /// Record the answer for `seq`. Returns `false` if no such question is pending.
    pub(crate) fn answer(&mut self, seq: u64, answer: String) -> bool {
        let Some(turn) = self.pending.get_mut(&seq) else {
            return false;
        };
        turn.answer = Some(answer);
        self.flush();
        true
    }

    fn flush(&mut self) {
        while let Some(entry) = self.pending.first_entry() {
            if entry.get().answer.is_none() {
                break;
            }
            let turn = entry.remove();
            self.turns.push(ChatTurn {
                question: turn.question,
                answer: turn.answer.unwrap_or_default(),
            });
        }
    }

    pub(crate) fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub(crate) fn pending_len(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn answers_in_order_append_immediately() {
        let mut transcript = Transcript::default();
        let q = transcript.ask("What method was used?".into());
        assert!(transcript.answer(q, "Retrieval.".into()));
        assert_eq!(transcript.turns().len(), 1);
        assert_eq!(transcript.pending_len(), 0);
    }

    #[test]
    fn out_of_order_answer_waits_for_earlier_question() {
        let mut transcript = Transcript::default();
        let first = transcript.ask("first".into());
        let second = transcript.ask("second".into());

        transcript.answer(second, "answer two".into());
        assert!(transcript.turns().is_empty());
        assert_eq!(transcript.pending_len(), 2);

        transcript.answer(first, "answer one".into());
        let questions: Vec<&str> = transcript
            .turns()
            .iter()
            .map(|turn| turn.question.as_str())
            .collect();
        assert_eq!(questions, vec!["first", "second"]);
        assert_eq!(transcript.turns()[1].answer, "answer two");
    }

    #[test]
    fn unknown_sequence_is_ignored() {
        let mut transcript = Transcript::default();
        assert!(!transcript.answer(7, "late".into()));
        assert!(transcript.turns().is_empty());
    }
}
