//! Completion detection on free-form assistant replies.
//!
//! The intake service does not return a structured status, so "the complaint
//! was submitted" is recognized from the reply wording. Any change to that
//! wording on the service side silently breaks detection; a status field in
//! the reply would be the proper signal.

/// The reply the intake service sends once a complaint is stored.
pub const COMPLETION_SENTENCE: &str = "Thank you! Your complaint has been recorded and submitted. We will look into this issue and get back to you soon.";

const THANK_YOU: &str = "thank you";
const RECORDED_AND_SUBMITTED: &str = "recorded and submitted";

/// True if `reply` contains the canonical sentence, or (ignoring case) both
/// "thank you" and "recorded and submitted".
///
/// Callers pass the most recent assistant reply only.
pub fn is_completion(reply: &str) -> bool {
    if reply.contains(COMPLETION_SENTENCE) {
        return true;
    }

    let lower = reply.to_lowercase();
    lower.contains(THANK_YOU) && lower.contains(RECORDED_AND_SUBMITTED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::collection::vec;
    use proptest::prelude::*;

    /// Upper-cases the chars of `text` where `mask` (cycled) is set.
    fn recase(text: &str, mask: &[bool]) -> String {
        text.chars()
            .zip(mask.iter().cycle())
            .map(|(c, upper)| if *upper { c.to_ascii_uppercase() } else { c })
            .collect()
    }

    #[test]
    fn canonical_sentence_matches() {
        assert!(is_completion(COMPLETION_SENTENCE));
        assert!(is_completion(&format!("Summary: ...\n\n{COMPLETION_SENTENCE}")));
    }

    #[test]
    fn case_permutations_match() {
        assert!(is_completion("THANK YOU, it was RECORDED AND SUBMITTED."));
        assert!(is_completion("Recorded and Submitted. Thank You."));
        assert!(is_completion("tHaNk YoU - rEcOrDeD aNd SuBmItTeD"));
    }

    #[test]
    fn one_substring_alone_does_not_match() {
        assert!(!is_completion("Thank you for providing the location."));
        assert!(!is_completion("Your complaint was recorded and submitted."));
        assert!(!is_completion("Thank you! Your complaint has been registered."));
        assert!(!is_completion(""));
    }

    #[test]
    fn split_phrase_does_not_match() {
        assert!(!is_completion("thank you. it was recorded and then submitted"));
    }

    proptest! {
        #[test]
        fn both_phrases_match_in_any_case(
            mask in vec(any::<bool>(), 2..32),
            prefix in "[a-z0-9 .,!]{0,20}",
            middle in "[a-z0-9 .,!]{0,20}",
            swapped in any::<bool>(),
        ) {
            let thanks = recase(THANK_YOU, &mask);
            let recorded = recase(RECORDED_AND_SUBMITTED, &mask[1..]);
            let reply = if swapped {
                format!("{prefix}{recorded}{middle}{thanks}")
            } else {
                format!("{prefix}{thanks}{middle}{recorded}")
            };
            prop_assert!(is_completion(&reply), "{reply:?}");
        }

        #[test]
        fn either_phrase_alone_never_matches(
            mask in vec(any::<bool>(), 1..32),
            filler in "[0-9 ]{0,30}",
            thanks_only in any::<bool>(),
        ) {
            let phrase = if thanks_only { THANK_YOU } else { RECORDED_AND_SUBMITTED };
            let reply = format!("{filler}{}{filler}", recase(phrase, &mask));
            prop_assert!(!is_completion(&reply), "{reply:?}");
        }
    }
}
