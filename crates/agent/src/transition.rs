//! Turn transition logic
//!
//! Maps a classification label and the follow-up count of the current
//! question to the next step. Ending takes priority over the follow-up cap;
//! the cap overrides every other label with a forced completion.

use survey_agent_core::{ClassificationLabel, Directive};

/// What the engine does after classifying an utterance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Submit the answer and move to the next question
    Advance,
    /// Ask for more detail on the same question
    Probe,
    /// Steer back to the same question
    Redirect,
    /// Say goodbye and stop
    End,
}

impl Transition {
    /// Generator instruction for this step
    pub fn directive(&self) -> Directive {
        match self {
            Transition::Advance => Directive::Advance,
            Transition::Probe => Directive::Probe,
            Transition::Redirect => Directive::Redirect,
            Transition::End => Directive::Farewell,
        }
    }
}

/// Outcome of [`decide`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub transition: Transition,
    /// Label after the cap override
    pub label: ClassificationLabel,
    /// The cap turned a non-complete label into Complete
    pub forced: bool,
}

/// Decide the next step for `label` given `follow_ups` already spent
pub fn decide(label: ClassificationLabel, follow_ups: u32, max_follow_ups: u32) -> Decision {
    if label == ClassificationLabel::EndRequested {
        return Decision {
            transition: Transition::End,
            label,
            forced: false,
        };
    }

    let effective = if follow_ups >= max_follow_ups {
        ClassificationLabel::Complete
    } else {
        label
    };

    let transition = match effective {
        ClassificationLabel::Complete => Transition::Advance,
        ClassificationLabel::Incomplete => Transition::Probe,
        ClassificationLabel::OffTopic => Transition::Redirect,
        ClassificationLabel::EndRequested => Transition::End,
    };

    Decision {
        transition,
        label: effective,
        forced: effective != label,
    }
}
