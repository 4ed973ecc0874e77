//! Questionnaire scoring.
//!
//! Ten fixed Likert statements, two per Big Five trait, each answered on a
//! 0–10 scale. A trait score is the sum of its two responses, so every score
//! falls in [0, 20].

use crate::models::TraitScores;

/// The five trait codes used to label questionnaire statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraitCode {
    /// Openness to experience.
    Openness,
    /// Conscientiousness.
    Conscientiousness,
    /// Extraversion.
    Extraversion,
    /// Agreeableness.
    Agreeableness,
    /// Sensitivity (neuroticism).
    Sensitivity,
}

/// One questionnaire statement with its trait label.
#[derive(Debug, Clone, Copy)]
pub struct Question {
    /// The trait this statement loads on.
    pub code: TraitCode,
    /// The statement shown to the user.
    pub text: &'static str,
}

/// The fixed question set, two statements per trait.
pub const QUESTIONS: [Question; 10] = [
    Question {
        code: TraitCode::Extraversion,
        text: "I see myself as outgoing, sociable.",
    },
    Question {
        code: TraitCode::Extraversion,
        text: "I see myself as talkative.",
    },
    Question {
        code: TraitCode::Agreeableness,
        text: "I see myself as helpful and unselfish.",
    },
    Question {
        code: TraitCode::Agreeableness,
        text: "I see myself as trusting and forgiving.",
    },
    Question {
        code: TraitCode::Conscientiousness,
        text: "I see myself as thorough and reliable.",
    },
    Question {
        code: TraitCode::Conscientiousness,
        text: "I see myself as organized.",
    },
    Question {
        code: TraitCode::Sensitivity,
        text: "I see myself as anxious or easily upset.",
    },
    Question {
        code: TraitCode::Sensitivity,
        text: "I see myself as moody.",
    },
    Question {
        code: TraitCode::Openness,
        text: "I see myself as imaginative and original.",
    },
    Question {
        code: TraitCode::Openness,
        text: "I see myself as artistic.",
    },
];

/// Scores ten questionnaire responses into trait scores.
///
/// `responses[i]` answers `QUESTIONS[i]` and must be in [0, 10]; values
/// outside that range are a caller contract violation and are summed as
/// given. Pure and deterministic.
#[must_use]
pub fn score(responses: &[u8; 10]) -> TraitScores {
    let mut scores = TraitScores {
        openness: 0,
        conscientiousness: 0,
        extraversion: 0,
        agreeableness: 0,
        sensitivity: 0,
    };

    for (question, &response) in QUESTIONS.iter().zip(responses) {
        let field = match question.code {
            TraitCode::Openness => &mut scores.openness,
            TraitCode::Conscientiousness => &mut scores.conscientiousness,
            TraitCode::Extraversion => &mut scores.extraversion,
            TraitCode::Agreeableness => &mut scores.agreeableness,
            TraitCode::Sensitivity => &mut scores.sensitivity,
        };
        *field = field.saturating_add(response);
    }

    scores
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_each_trait_has_exactly_two_questions() {
        for code in [
            TraitCode::Openness,
            TraitCode::Conscientiousness,
            TraitCode::Extraversion,
            TraitCode::Agreeableness,
            TraitCode::Sensitivity,
        ] {
            let count = QUESTIONS.iter().filter(|q| q.code == code).count();
            assert_eq!(count, 2, "{code:?} must label exactly two questions");
        }
    }

    #[test]
    fn test_score_sums_mapped_pairs() {
        // Order is E,E,A,A,C,C,N,N,O,O.
        let scores = score(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
        assert_eq!(scores.extraversion, 3);
        assert_eq!(scores.agreeableness, 7);
        assert_eq!(scores.conscientiousness, 11);
        assert_eq!(scores.sensitivity, 15);
        assert_eq!(scores.openness, 19);
    }

    #[test]
    fn test_all_zero_and_all_max() {
        let zero = score(&[0; 10]);
        assert_eq!(zero.openness, 0);
        assert_eq!(zero.sensitivity, 0);

        let max = score(&[10; 10]);
        assert_eq!(max.openness, 20);
        assert_eq!(max.conscientiousness, 20);
        assert_eq!(max.extraversion, 20);
        assert_eq!(max.agreeableness, 20);
        assert_eq!(max.sensitivity, 20);
    }

    proptest! {
        #[test]
        fn prop_scores_bounded_and_exact(responses in proptest::array::uniform10(0u8..=10)) {
            let scores = score(&responses);
            for (_, value) in scores.labeled() {
                prop_assert!(value <= TraitScores::MAX_SCORE);
            }
            prop_assert_eq!(scores.extraversion, responses[0] + responses[1]);
            prop_assert_eq!(scores.agreeableness, responses[2] + responses[3]);
            prop_assert_eq!(scores.conscientiousness, responses[4] + responses[5]);
            prop_assert_eq!(scores.sensitivity, responses[6] + responses[7]);
            prop_assert_eq!(scores.openness, responses[8] + responses[9]);
        }
    }
}
