//! Dialogue engine scenarios over scripted ports

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use survey_agent_agent::{
    AbortHandle, AgentError, DialogueEngine, DialogueEvent, DialoguePorts, SessionOutcome,
    SessionReport,
};
use survey_agent_config::{DialogueConfig, PhraseBook};
use survey_agent_core::{
    AnswerSubmission, AnswerSubmitter, ClassificationLabel, Directive, Error, GenerationRequest,
    Question, QuestionRepository, ResponseClassifier, ResponseGenerator, Result, SessionClosing,
    SessionId, SpeechToText, TextToSpeech, Turn,
};

use ClassificationLabel::{Complete, EndRequested, Incomplete, OffTopic};

// ---------------------------------------------------------------------------
// Scripted ports
// ---------------------------------------------------------------------------

fn said(text: &str) -> Result<String> {
    Ok(text.to_string())
}

fn silence() -> Result<String> {
    Ok(String::new())
}

fn capture_error() -> Result<String> {
    Err(Error::Capture("microphone unplugged".to_string()))
}

/// Microphone replaying a script; silent once the script runs out
#[derive(Default)]
struct ScriptedMic {
    script: Mutex<VecDeque<Result<String>>>,
    listens: Mutex<usize>,
    abort_after: Mutex<Option<(usize, AbortHandle)>>,
}

#[async_trait]
impl SpeechToText for ScriptedMic {
    async fn listen(&self) -> Result<String> {
        let count = {
            let mut listens = self.listens.lock();
            *listens += 1;
            *listens
        };
        if let Some((after, handle)) = self.abort_after.lock().as_ref() {
            if count >= *after {
                handle.abort();
            }
        }
        self.script.lock().pop_front().unwrap_or_else(silence)
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

#[derive(Default)]
struct RecordingSpeaker {
    spoken: Mutex<Vec<String>>,
    fail: bool,
}

#[async_trait]
impl TextToSpeech for RecordingSpeaker {
    async fn speak(&self, text: &str) -> Result<()> {
        self.spoken.lock().push(text.to_string());
        if self.fail {
            return Err(Error::Playback("speaker busy".to_string()));
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "recording"
    }
}

#[derive(Debug, Clone)]
struct ClassifyCall {
    utterance: String,
    history_len: usize,
    question: String,
}

/// Returns scripted labels; Complete once the script runs out
#[derive(Default)]
struct ScriptedClassifier {
    labels: Mutex<VecDeque<ClassificationLabel>>,
    calls: Mutex<Vec<ClassifyCall>>,
}

#[async_trait]
impl ResponseClassifier for ScriptedClassifier {
    async fn classify(&self, utterance: &str, history: &[Turn], question: &str) -> ClassificationLabel {
        self.calls.lock().push(ClassifyCall {
            utterance: utterance.to_string(),
            history_len: history.len(),
            question: question.to_string(),
        });
        self.labels.lock().pop_front().unwrap_or(Complete)
    }
}

#[derive(Debug, Clone)]
struct GenerateCall {
    directive: Directive,
    utterance: String,
    next_question: Option<String>,
    history_len: usize,
}

#[derive(Default)]
struct RecordingGenerator {
    calls: Mutex<Vec<GenerateCall>>,
}

#[async_trait]
impl ResponseGenerator for RecordingGenerator {
    async fn generate(&self, request: GenerationRequest<'_>) -> String {
        self.calls.lock().push(GenerateCall {
            directive: request.directive,
            utterance: request.utterance.to_string(),
            next_question: request.next_question.map(str::to_string),
            history_len: request.history.len(),
        });
        format!("{} reply to {}", request.directive, request.utterance)
    }
}

#[derive(Default)]
struct MockStore {
    questions: Vec<Question>,
    submitted: Mutex<Vec<AnswerSubmission>>,
    closings: Mutex<Vec<SessionClosing>>,
    opened: Mutex<usize>,
    fail_submit: bool,
    fail_open: bool,
}

#[async_trait]
impl QuestionRepository for MockStore {
    async fn fetch_questions(&self) -> Result<Vec<Question>> {
        Ok(self.questions.clone())
    }
}

#[async_trait]
impl AnswerSubmitter for MockStore {
    async fn open_session(&self) -> Result<SessionId> {
        if self.fail_open {
            return Err(Error::Persistence("503 from API".to_string()));
        }
        *self.opened.lock() += 1;
        Ok(SessionId::from(7))
    }

    async fn submit_answer(&self, submission: &AnswerSubmission) -> Result<()> {
        if self.fail_submit {
            return Err(Error::Persistence("write rejected".to_string()));
        }
        self.submitted.lock().push(submission.clone());
        Ok(())
    }

    async fn finalize_session(&self, closing: &SessionClosing) -> Result<()> {
        self.closings.lock().push(closing.clone());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Harness
// ---------------------------------------------------------------------------

struct Harness {
    mic: Arc<ScriptedMic>,
    speaker: Arc<RecordingSpeaker>,
    classifier: Arc<ScriptedClassifier>,
    generator: Arc<RecordingGenerator>,
    store: Arc<MockStore>,
    phrases: Arc<PhraseBook>,
    engine: DialogueEngine,
}

struct Setup {
    questions: Vec<&'static str>,
    utterances: Vec<Result<String>>,
    labels: Vec<ClassificationLabel>,
    config: DialogueConfig,
    store: MockStore,
    speaker: RecordingSpeaker,
}

impl Setup {
    fn new(questions: &[&'static str]) -> Self {
        Self {
            questions: questions.to_vec(),
            utterances: Vec::new(),
            labels: Vec::new(),
            config: DialogueConfig::default(),
            store: MockStore::default(),
            speaker: RecordingSpeaker::default(),
        }
    }

    fn utterances(mut self, utterances: Vec<Result<String>>) -> Self {
        self.utterances = utterances;
        self
    }

    fn labels(mut self, labels: &[ClassificationLabel]) -> Self {
        self.labels = labels.to_vec();
        self
    }

    fn config(mut self, f: impl FnOnce(&mut DialogueConfig)) -> Self {
        f(&mut self.config);
        self
    }

    fn store(mut self, store: MockStore) -> Self {
        self.store = store;
        self
    }

    fn speaker(mut self, speaker: RecordingSpeaker) -> Self {
        self.speaker = speaker;
        self
    }

    fn build(self) -> Harness {
        let mic = Arc::new(ScriptedMic {
            script: Mutex::new(self.utterances.into_iter().collect()),
            ..ScriptedMic::default()
        });
        let classifier = Arc::new(ScriptedClassifier {
            labels: Mutex::new(self.labels.into_iter().collect()),
            ..ScriptedClassifier::default()
        });
        let generator = Arc::new(RecordingGenerator::default());
        let speaker = Arc::new(self.speaker);

        let questions = self
            .questions
            .iter()
            .enumerate()
            .map(|(i, text)| Question::new(100 + i as i64, *text, i as i32 + 1))
            .collect();
        let store = Arc::new(MockStore {
            questions,
            ..self.store
        });
        let phrases = Arc::new(PhraseBook::default());

        let ports = DialoguePorts {
            stt: mic.clone(),
            tts: speaker.clone(),
            classifier: classifier.clone(),
            generator: generator.clone(),
            questions: store.clone(),
            answers: store.clone(),
        };
        let engine = DialogueEngine::new(self.config, phrases.clone(), ports).unwrap();

        Harness {
            mic,
            speaker,
            classifier,
            generator,
            store,
            phrases,
            engine,
        }
    }
}

impl Harness {
    async fn run(&self) -> SessionReport {
        self.engine.run().await.unwrap()
    }

    fn submitted(&self) -> Vec<(i64, String)> {
        self.store
            .submitted
            .lock()
            .iter()
            .map(|s| (s.question_id, s.response.clone()))
            .collect()
    }

    fn directives(&self) -> Vec<Directive> {
        self.generator.calls.lock().iter().map(|c| c.directive).collect()
    }

    fn spoken(&self) -> Vec<String> {
        self.speaker.spoken.lock().clone()
    }

    fn finalize_calls(&self) -> usize {
        self.store.closings.lock().len()
    }
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_incomplete_then_complete_combines_answer() {
    let h = Setup::new(&["Q1", "Q2"])
        .utterances(vec![said("the park"), said("needs benches"), said("fine")])
        .labels(&[Incomplete, Complete, Complete])
        .build();

    let report = h.run().await;

    assert_eq!(report.outcome, SessionOutcome::Completed);
    assert_eq!(
        h.submitted(),
        vec![
            (100, "the park needs benches".to_string()),
            (101, "fine".to_string())
        ]
    );
    assert_eq!(
        h.directives(),
        vec![Directive::Probe, Directive::Advance, Directive::Advance]
    );

    let calls = h.generator.calls.lock().clone();
    assert_eq!(calls[0].next_question, None);
    assert_eq!(calls[1].next_question.as_deref(), Some("Q2"));
    assert_eq!(calls[1].utterance, "needs benches");
    assert_eq!(calls[2].next_question, None);
    assert_eq!(h.finalize_calls(), 1);
    assert_eq!(report.questions_answered, 2);
    assert_eq!(report.turns, 3);
    assert_eq!(*h.store.opened.lock(), 1);
}

#[tokio::test]
async fn test_first_turn_incomplete_does_not_submit() {
    let h = Setup::new(&["Q1", "Q2"])
        .utterances(vec![said("hmm"), capture_error()])
        .labels(&[Incomplete])
        .config(|c| c.max_consecutive_failures = 1)
        .build();

    let report = h.run().await;

    assert_eq!(report.outcome, SessionOutcome::Failed);
    assert!(h.submitted().is_empty());
    assert_eq!(report.questions_answered, 0);
    assert_eq!(h.finalize_calls(), 1);
}

#[tokio::test]
async fn test_five_silent_turns_end_session() {
    let h = Setup::new(&["Q1"])
        .utterances(vec![silence(), silence(), silence(), silence(), silence(), said("late")])
        .build();
    let phrases = h.phrases.clone();

    let report = h.run().await;

    assert_eq!(report.outcome, SessionOutcome::SilenceTimeout);
    assert!(h.submitted().is_empty());
    assert_eq!(h.finalize_calls(), 1);
    assert!(h.classifier.calls.lock().is_empty());
    assert_eq!(h.mic.script.lock().len(), 1);

    let spoken = h.spoken();
    assert_eq!(spoken.first().map(String::as_str), Some("Q1"));
    assert_eq!(spoken.last(), Some(&phrases.silence_goodbye));
    let reprompts = spoken.iter().filter(|s| **s == phrases.silence_reprompt).count();
    assert_eq!(reprompts, 4);
}

#[tokio::test]
async fn test_silence_counter_resets_on_speech() {
    let mut utterances = vec![silence(), silence(), silence(), silence(), said("one")];
    utterances.extend([silence(), silence(), silence(), silence(), said("two")]);

    let h = Setup::new(&["Q1"])
        .utterances(utterances)
        .labels(&[Incomplete, Complete])
        .build();

    let report = h.run().await;

    assert_eq!(report.outcome, SessionOutcome::Completed);
    assert_eq!(h.submitted(), vec![(100, "one two".to_string())]);
}

#[tokio::test]
async fn test_silent_retry_without_reprompt() {
    let h = Setup::new(&["Q1"])
        .utterances(vec![silence(), said("yes")])
        .config(|c| c.reprompt_on_silence = false)
        .build();

    h.run().await;

    let phrases = h.phrases.clone();
    assert!(!h.spoken().contains(&phrases.silence_reprompt));
}

#[tokio::test]
async fn test_off_topic_cap_forces_complete() {
    let h = Setup::new(&["Q1", "Q2"])
        .utterances(vec![said("football"), said("weather"), said("cats"), said("ok")])
        .labels(&[OffTopic, OffTopic, OffTopic, EndRequested])
        .build();
    let mut events = h.engine.subscribe();

    let report = h.run().await;

    assert_eq!(
        h.directives(),
        vec![Directive::Redirect, Directive::Redirect, Directive::Advance]
    );
    let calls = h.generator.calls.lock().clone();
    assert_eq!(calls[0].next_question.as_deref(), Some("Q1"));
    assert_eq!(calls[1].next_question.as_deref(), Some("Q1"));
    assert_eq!(calls[2].next_question.as_deref(), Some("Q2"));

    // off-topic turns stay out of the answer; the forced turn is kept
    assert_eq!(h.submitted(), vec![(100, "cats".to_string())]);
    assert_eq!(report.outcome, SessionOutcome::EndRequested);

    let mut forced = Vec::new();
    while let Ok(event) = events.try_recv() {
        if let DialogueEvent::Classified { label, effective, forced: f } = event {
            forced.push((label, effective, f));
        }
    }
    assert_eq!(forced[2], (OffTopic, Complete, true));
    assert!(!forced[0].2);
}

#[tokio::test]
async fn test_off_topic_appended_when_enabled() {
    let h = Setup::new(&["Q1"])
        .utterances(vec![said("by the way"), said("more trees")])
        .labels(&[OffTopic, Complete])
        .config(|c| c.append_off_topic = true)
        .build();

    h.run().await;

    assert_eq!(h.submitted(), vec![(100, "by the way more trees".to_string())]);
}

#[tokio::test]
async fn test_follow_ups_never_exceed_cap() {
    let utterances = (0..9).map(|i| said(&format!("u{}", i))).collect();
    let h = Setup::new(&["Q1", "Q2", "Q3"])
        .utterances(utterances)
        .labels(&[Incomplete; 9])
        .build();

    let report = h.run().await;

    assert_eq!(report.outcome, SessionOutcome::Completed);
    assert_eq!(
        h.directives(),
        [Directive::Probe, Directive::Probe, Directive::Advance].repeat(3)
    );
    assert_eq!(
        h.submitted(),
        vec![
            (100, "u0 u1 u2".to_string()),
            (101, "u3 u4 u5".to_string()),
            (102, "u6 u7 u8".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_custom_cap() {
    let h = Setup::new(&["Q1"])
        .utterances(vec![said("a"), said("b")])
        .labels(&[Incomplete, Incomplete])
        .config(|c| c.max_follow_ups = 1)
        .build();

    h.run().await;

    assert_eq!(h.directives(), vec![Directive::Probe, Directive::Advance]);
    assert_eq!(h.submitted(), vec![(100, "a b".to_string())]);
}

#[tokio::test]
async fn test_end_requested_discards_buffer() {
    let h = Setup::new(&["Q1", "Q2"])
        .utterances(vec![said("fine"), said("partly"), said("stop please")])
        .labels(&[Complete, Incomplete, EndRequested])
        .build();
    let phrases = h.phrases.clone();

    let report = h.run().await;

    assert_eq!(report.outcome, SessionOutcome::EndRequested);
    assert_eq!(h.submitted(), vec![(100, "fine".to_string())]);
    assert_eq!(h.finalize_calls(), 1);
    assert_eq!(h.spoken().last(), Some(&phrases.farewell));
    assert_eq!(report.questions_answered, 1);
    assert!(!h.directives().contains(&Directive::Farewell));
}

#[tokio::test]
async fn test_end_requested_at_cap_still_ends() {
    let h = Setup::new(&["Q1"])
        .utterances(vec![said("a"), said("b"), said("bye")])
        .labels(&[Incomplete, Incomplete, EndRequested])
        .build();

    let report = h.run().await;

    assert_eq!(report.outcome, SessionOutcome::EndRequested);
    assert!(h.submitted().is_empty());
}

#[tokio::test]
async fn test_generated_farewell() {
    let h = Setup::new(&["Q1"])
        .utterances(vec![said("I'm done")])
        .labels(&[EndRequested])
        .config(|c| c.generate_farewell = true)
        .build();

    h.run().await;

    assert_eq!(h.directives(), vec![Directive::Farewell]);
    assert_eq!(h.spoken().last().map(String::as_str), Some("farewell reply to I'm done"));
}

#[tokio::test]
async fn test_capture_error_asks_to_repeat_without_state_change() {
    let h = Setup::new(&["Q1"])
        .utterances(vec![said("part one"), capture_error(), said("part two")])
        .labels(&[Incomplete, Complete])
        .build();
    let phrases = h.phrases.clone();

    let report = h.run().await;

    assert!(h.spoken().contains(&phrases.clarification));
    assert_eq!(h.submitted(), vec![(100, "part one part two".to_string())]);
    assert_eq!(report.turns, 2);
    assert_eq!(h.classifier.calls.lock().len(), 2);
}

#[tokio::test]
async fn test_repeated_capture_errors_fail_session() {
    let h = Setup::new(&["Q1"])
        .utterances((0..5).map(|_| capture_error()).collect())
        .config(|c| c.max_consecutive_failures = 3)
        .build();
    let phrases = h.phrases.clone();

    let report = h.run().await;

    assert_eq!(report.outcome, SessionOutcome::Failed);
    assert_eq!(h.finalize_calls(), 1);
    assert_eq!(h.mic.script.lock().len(), 2);

    let spoken = h.spoken();
    assert_eq!(spoken.last(), Some(&phrases.farewell));
    assert_eq!(
        spoken.iter().filter(|s| **s == phrases.clarification).count(),
        2
    );
    assert_eq!(
        report.transcript.turns().last().map(|t| t.content.as_str()),
        Some(phrases.farewell.as_str())
    );
}

#[tokio::test]
async fn test_submit_failure_does_not_block() {
    let h = Setup::new(&["Q1", "Q2"])
        .utterances(vec![said("a"), said("b")])
        .store(MockStore {
            fail_submit: true,
            ..MockStore::default()
        })
        .build();

    let report = h.run().await;

    assert_eq!(report.outcome, SessionOutcome::Completed);
    assert_eq!(report.failed_submissions, 2);
    assert!(report.submitted.is_empty());
    assert_eq!(report.questions_answered, 2);
    assert!(report.finalized);
}

#[tokio::test]
async fn test_playback_failure_is_not_fatal() {
    let h = Setup::new(&["Q1"])
        .utterances(vec![said("answer")])
        .speaker(RecordingSpeaker {
            fail: true,
            ..RecordingSpeaker::default()
        })
        .build();

    let report = h.run().await;

    assert_eq!(report.outcome, SessionOutcome::Completed);
    assert_eq!(h.submitted().len(), 1);
}

#[tokio::test]
async fn test_empty_questionnaire_completes_immediately() {
    let h = Setup::new(&[]).build();

    let report = h.run().await;

    assert_eq!(report.outcome, SessionOutcome::Completed);
    assert!(h.spoken().is_empty());
    assert_eq!(*h.mic.listens.lock(), 0);
    assert_eq!(h.finalize_calls(), 1);
}

#[tokio::test]
async fn test_session_start_failure_speaks_nothing() {
    let h = Setup::new(&["Q1"])
        .store(MockStore {
            fail_open: true,
            ..MockStore::default()
        })
        .build();

    let result = h.engine.run().await;

    assert!(matches!(result, Err(AgentError::SessionStart(_))));
    assert!(h.spoken().is_empty());
    assert_eq!(h.finalize_calls(), 0);
}

#[tokio::test]
async fn test_questions_are_asked_in_order() {
    let h = Setup::new(&["Q1", "Q2"])
        .utterances(vec![said("a"), said("b")])
        .build();

    h.run().await;

    let questions: Vec<String> = h
        .classifier
        .calls
        .lock()
        .iter()
        .map(|c| c.question.clone())
        .collect();
    assert_eq!(questions, vec!["Q1", "Q2"]);
    let utterances: Vec<String> = h
        .classifier
        .calls
        .lock()
        .iter()
        .map(|c| c.utterance.clone())
        .collect();
    assert_eq!(utterances, vec!["a", "b"]);
}

#[tokio::test]
async fn test_next_question_recorded_but_not_repeated() {
    let h = Setup::new(&["Q1", "Q2"])
        .utterances(vec![said("a"), said("b")])
        .build();

    let report = h.run().await;

    assert!(!h.spoken().contains(&"Q2".to_string()));
    let questions: Vec<&str> = report
        .transcript
        .turns()
        .iter()
        .filter(|t| t.role == survey_agent_core::TurnRole::Question)
        .map(|t| t.content.as_str())
        .collect();
    assert_eq!(questions, vec!["Q1", "Q2"]);
}

#[tokio::test]
async fn test_next_question_repeated_when_enabled() {
    let h = Setup::new(&["Q1", "Q2"])
        .utterances(vec![said("a"), said("b")])
        .config(|c| c.repeat_question_after_advance = true)
        .build();

    h.run().await;

    let spoken = h.spoken();
    assert_eq!(spoken[1], "advance reply to a");
    assert_eq!(spoken[2], "Q2");
}

#[tokio::test]
async fn test_opening_greeting_comes_first() {
    let h = Setup::new(&["Q1"])
        .utterances(vec![said("a")])
        .config(|c| c.opening_greeting = Some("Hello from the bench!".to_string()))
        .build();

    h.run().await;

    assert_eq!(h.spoken()[..2], ["Hello from the bench!".to_string(), "Q1".to_string()]);
}

#[tokio::test]
async fn test_history_window_is_bounded() {
    let utterances = (0..6).map(|i| said(&format!("u{}", i))).collect();
    let h = Setup::new(&["Q1", "Q2", "Q3"])
        .utterances(utterances)
        .labels(&[Incomplete, Incomplete, Complete, Incomplete, Complete, Complete])
        .config(|c| c.transcript_window = 3)
        .build();

    h.run().await;

    let classify_max = h.classifier.calls.lock().iter().map(|c| c.history_len).max();
    let generate_max = h.generator.calls.lock().iter().map(|c| c.history_len).max();
    assert_eq!(classify_max, Some(3));
    assert_eq!(generate_max, Some(3));
    assert_eq!(h.classifier.calls.lock()[0].history_len, 1);
}

#[tokio::test]
async fn test_transcript_records_each_exchange() {
    let h = Setup::new(&["Q1"])
        .utterances(vec![said("hmm"), said("the lake")])
        .labels(&[Incomplete, Complete])
        .build();

    let report = h.run().await;

    let turns: Vec<(survey_agent_core::TurnRole, &str)> = report
        .transcript
        .turns()
        .iter()
        .map(|t| (t.role, t.content.as_str()))
        .collect();
    use survey_agent_core::TurnRole::*;
    assert_eq!(
        turns,
        vec![
            (Question, "Q1"),
            (Answer, "hmm"),
            (System, "probe reply to hmm"),
            (Answer, "the lake"),
            (System, "advance reply to the lake"),
        ]
    );
}

#[tokio::test]
async fn test_abort_between_turns() {
    let h = Setup::new(&["Q1", "Q2"])
        .utterances(vec![said("a"), said("b")])
        .labels(&[Incomplete])
        .build();
    *h.mic.abort_after.lock() = Some((1, h.engine.abort_handle()));

    let report = h.run().await;

    assert_eq!(report.outcome, SessionOutcome::Aborted);
    // the in-flight turn finishes before the abort is observed
    assert_eq!(h.directives(), vec![Directive::Probe]);
    assert_eq!(*h.mic.listens.lock(), 1);
    assert_eq!(h.finalize_calls(), 1);
    assert!(h.submitted().is_empty());

    assert!(matches!(h.engine.run().await, Err(AgentError::Aborted)));
}

#[tokio::test]
async fn test_events_bracket_the_session() {
    let h = Setup::new(&["Q1"]).utterances(vec![said("a")]).build();
    let mut events = h.engine.subscribe();

    h.run().await;

    let mut seen = Vec::new();
    while let Ok(event) = events.try_recv() {
        seen.push(event);
    }
    assert!(matches!(seen.first(), Some(DialogueEvent::SessionStarted { questions: 1, .. })));
    assert!(matches!(
        seen.last(),
        Some(DialogueEvent::Ended {
            outcome: SessionOutcome::Completed
        })
    ));
    assert!(seen
        .iter()
        .any(|e| matches!(e, DialogueEvent::AnswerSubmitted { question_id: 100, .. })));
}

#[tokio::test]
async fn test_invalid_config_is_rejected() {
    let config = DialogueConfig {
        max_silent_attempts: 0,
        ..DialogueConfig::default()
    };
    let store = Arc::new(MockStore::default());
    let ports = DialoguePorts {
        stt: Arc::new(ScriptedMic::default()),
        tts: Arc::new(RecordingSpeaker::default()),
        classifier: Arc::new(ScriptedClassifier::default()),
        generator: Arc::new(RecordingGenerator::default()),
        questions: store.clone(),
        answers: store,
    };

    let result = DialogueEngine::new(config, Arc::new(PhraseBook::default()), ports);
    assert!(matches!(result, Err(AgentError::Config(_))));
}
