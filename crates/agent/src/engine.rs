//! Dialogue Engine
//!
//! Runs one survey session end to end over injected ports:
//! fetch questions → open session → ask → (listen → classify → decide →
//! generate → speak)* → finalize.
//!
//! Turns never overlap: each capture, model call and playback is awaited
//! before the next step is chosen. Failures inside a turn degrade to a
//! spoken fallback; only question fetch and session creation can fail a run.
//!
//! ## Terminal paths
//! - every question answered
//! - respondent asks to stop (buffer for the open question is discarded)
//! - too many silent turns in a row
//! - external abort, observed between turns
//! - too many failed turns in a row
//!
//! Each of them finalizes the session exactly once.

use std::sync::Arc;
use std::time::{Duration, Instant};

use survey_agent_config::{DialogueConfig, PhraseBook};
use survey_agent_core::{
    sort_questions, AnswerSubmission, AnswerSubmitter, Directive, GenerationRequest, Question,
    QuestionRepository, ResponseClassifier, ResponseGenerator, SessionClosing, SessionId,
    SpeechToText, TextToSpeech, Transcript, Turn,
};
use tokio::sync::{broadcast, watch};

use crate::events::{DialogueEvent, DialogueState, SessionOutcome};
use crate::session::SurveySession;
use crate::transition::{decide, Transition};
use crate::AgentError;

/// Collaborators the engine drives
#[derive(Clone)]
pub struct DialoguePorts {
    pub stt: Arc<dyn SpeechToText>,
    pub tts: Arc<dyn TextToSpeech>,
    pub classifier: Arc<dyn ResponseClassifier>,
    pub generator: Arc<dyn ResponseGenerator>,
    pub questions: Arc<dyn QuestionRepository>,
    pub answers: Arc<dyn AnswerSubmitter>,
}

/// Stops a running session at the next turn boundary
#[derive(Clone)]
pub struct AbortHandle {
    tx: Arc<watch::Sender<bool>>,
}

impl AbortHandle {
    pub fn abort(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_aborted(&self) -> bool {
        *self.tx.borrow()
    }
}

/// Summary returned when a session ends
#[derive(Debug, Clone)]
pub struct SessionReport {
    pub session_id: SessionId,
    pub outcome: SessionOutcome,
    pub questions_total: usize,
    /// Questions the cursor moved past
    pub questions_answered: usize,
    /// Answers the store accepted, in order
    pub submitted: Vec<AnswerSubmission>,
    pub failed_submissions: u32,
    /// The store acknowledged the closing call
    pub finalized: bool,
    /// Turns with a non-empty utterance
    pub turns: u32,
    pub transcript: Transcript,
    pub duration: Duration,
}

/// Per-run bookkeeping
struct SessionRun {
    session: SurveySession,
    state: DialogueState,
    turns: u32,
    consecutive_failures: u32,
    submitted: Vec<AnswerSubmission>,
    failed_submissions: u32,
}

impl SessionRun {
    fn new(session: SurveySession) -> Self {
        Self {
            session,
            state: DialogueState::AskingQuestion(0),
            turns: 0,
            consecutive_failures: 0,
            submitted: Vec::new(),
            failed_submissions: 0,
        }
    }
}

enum TurnResult {
    Continue,
    End(SessionOutcome),
}

/// Survey dialogue engine
pub struct DialogueEngine {
    config: DialogueConfig,
    phrases: Arc<PhraseBook>,
    ports: DialoguePorts,
    event_tx: broadcast::Sender<DialogueEvent>,
    abort_tx: Arc<watch::Sender<bool>>,
}

impl DialogueEngine {
    pub fn new(
        config: DialogueConfig,
        phrases: Arc<PhraseBook>,
        ports: DialoguePorts,
    ) -> Result<Self, AgentError> {
        config.validate()?;

        let (event_tx, _) = broadcast::channel(100);
        let (abort_tx, _) = watch::channel(false);

        Ok(Self {
            config,
            phrases,
            ports,
            event_tx,
            abort_tx: Arc::new(abort_tx),
        })
    }

    pub fn config(&self) -> &DialogueConfig {
        &self.config
    }

    /// Subscribe to dialogue events
    pub fn subscribe(&self) -> broadcast::Receiver<DialogueEvent> {
        self.event_tx.subscribe()
    }

    pub fn abort_handle(&self) -> AbortHandle {
        AbortHandle {
            tx: self.abort_tx.clone(),
        }
    }

    pub fn is_aborted(&self) -> bool {
        *self.abort_tx.borrow()
    }

    /// Run one session to completion
    pub async fn run(&self) -> Result<SessionReport, AgentError> {
        if self.is_aborted() {
            return Err(AgentError::Aborted);
        }
        let started = Instant::now();

        let mut questions = self
            .ports
            .questions
            .fetch_questions()
            .await
            .map_err(AgentError::Questions)?;
        sort_questions(&mut questions);

        let session_id = self
            .ports
            .answers
            .open_session()
            .await
            .map_err(AgentError::SessionStart)?;

        tracing::info!(
            session_id = %session_id,
            questions = questions.len(),
            language = %self.config.language,
            "Survey session started"
        );
        self.emit(DialogueEvent::SessionStarted {
            session_id: session_id.clone(),
            questions: questions.len(),
        });

        let mut run = SessionRun::new(SurveySession::new(session_id, questions));
        let outcome = self.drive(&mut run).await;
        Ok(self.finish(run, outcome, started).await)
    }

    async fn drive(&self, run: &mut SessionRun) -> SessionOutcome {
        if run.session.is_complete() {
            tracing::warn!(session_id = %run.session.id(), "No questions to ask");
            return SessionOutcome::Completed;
        }

        if let Some(greeting) = self.config.opening_greeting.as_deref() {
            self.say(greeting).await;
            run.session.record(Turn::system(greeting));
        }
        self.ask_current(run, true).await;

        loop {
            if self.is_aborted() {
                tracing::info!(session_id = %run.session.id(), "Session aborted");
                return SessionOutcome::Aborted;
            }

            self.set_state(run, DialogueState::AwaitingUtterance);
            let heard = match self.ports.stt.listen().await {
                Ok(text) => text,
                Err(e) => {
                    run.consecutive_failures += 1;
                    metrics::counter!("survey_turn_failures_total").increment(1);
                    tracing::warn!(
                        session_id = %run.session.id(),
                        error = %e,
                        consecutive = run.consecutive_failures,
                        "Turn failed"
                    );
                    self.emit(DialogueEvent::TurnFailed {
                        error: e.to_string(),
                        consecutive: run.consecutive_failures,
                    });

                    if run.consecutive_failures >= self.config.max_consecutive_failures {
                        tracing::error!(session_id = %run.session.id(), "Too many failed turns, giving up");
                        self.set_state(run, DialogueState::Ending);
                        let goodbye = self.phrases.farewell.clone();
                        self.say(&goodbye).await;
                        run.session.record(Turn::system(goodbye));
                        return SessionOutcome::Failed;
                    }
                    self.say(&self.phrases.clarification).await;
                    continue;
                }
            };
            run.consecutive_failures = 0;

            let utterance = heard.trim();
            if utterance.is_empty() {
                let attempts = run.session.record_silence();
                metrics::counter!("survey_silent_turns_total").increment(1);
                tracing::debug!(
                    session_id = %run.session.id(),
                    attempts,
                    max = self.config.max_silent_attempts,
                    "No response"
                );
                self.emit(DialogueEvent::Silence { attempts });

                if attempts >= self.config.max_silent_attempts {
                    self.set_state(run, DialogueState::Ending);
                    let goodbye = self.phrases.silence_goodbye.clone();
                    self.say(&goodbye).await;
                    run.session.record(Turn::system(goodbye));
                    return SessionOutcome::SilenceTimeout;
                }
                if self.config.reprompt_on_silence {
                    self.say(&self.phrases.silence_reprompt).await;
                }
                continue;
            }

            run.session.reset_silence();
            run.turns += 1;
            self.emit(DialogueEvent::UtteranceHeard {
                text: utterance.to_string(),
            });

            match self.handle_utterance(run, utterance).await {
                TurnResult::Continue => continue,
                TurnResult::End(outcome) => return outcome,
            }
        }
    }

    async fn handle_utterance(&self, run: &mut SessionRun, utterance: &str) -> TurnResult {
        let Some(question) = run.session.current_question().cloned() else {
            return TurnResult::End(SessionOutcome::Completed);
        };

        self.set_state(run, DialogueState::Classifying);
        let label = self
            .ports
            .classifier
            .classify(
                utterance,
                run.session.history(self.config.transcript_window),
                &question.text,
            )
            .await;
        let decision = decide(label, run.session.follow_ups(), self.config.max_follow_ups);

        metrics::counter!("survey_turns_total", "label" => label.as_str()).increment(1);
        if decision.forced {
            metrics::counter!("survey_forced_completions_total").increment(1);
        }
        tracing::debug!(
            session_id = %run.session.id(),
            question_index = run.session.cursor(),
            label = %label,
            effective = %decision.label,
            forced = decision.forced,
            follow_ups = run.session.follow_ups(),
            "Utterance classified"
        );
        self.emit(DialogueEvent::Classified {
            label,
            effective: decision.label,
            forced: decision.forced,
        });

        match decision.transition {
            Transition::End => {
                self.end_requested(run, utterance).await;
                TurnResult::End(SessionOutcome::EndRequested)
            }
            Transition::Advance => self.advance(run, &question, utterance).await,
            Transition::Probe | Transition::Redirect => {
                self.follow_up(run, &question, utterance, decision.transition)
                    .await;
                TurnResult::Continue
            }
        }
    }

    async fn end_requested(&self, run: &mut SessionRun, utterance: &str) {
        self.set_state(run, DialogueState::Ending);
        tracing::info!(
            session_id = %run.session.id(),
            question_index = run.session.cursor(),
            discarded = run.session.responses().len(),
            "Respondent ended the survey"
        );
        run.session.discard_responses();

        let farewell = if self.config.generate_farewell {
            self.ports
                .generator
                .generate(GenerationRequest::new(
                    Directive::Farewell,
                    utterance,
                    run.session.history(self.config.transcript_window),
                ))
                .await
        } else {
            self.phrases.farewell.clone()
        };

        self.say(&farewell).await;
        run.session.record(Turn::answer(utterance));
        run.session.record(Turn::system(farewell));
    }

    async fn advance(&self, run: &mut SessionRun, question: &Question, utterance: &str) -> TurnResult {
        self.set_state(run, DialogueState::Advancing);
        run.session.push_response(utterance);
        let answer = run.session.combined_answer();
        self.submit(run, question, answer).await;

        let next = run.session.next_question().map(|q| q.text.clone());
        let reply = self
            .ports
            .generator
            .generate(
                GenerationRequest::new(
                    Directive::Advance,
                    utterance,
                    run.session.history(self.config.transcript_window),
                )
                .with_next_question(next.as_deref()),
            )
            .await;
        run.session.advance();

        self.say(&reply).await;
        run.session.record(Turn::answer(utterance));
        run.session.record(Turn::system(reply));

        if run.session.is_complete() {
            tracing::info!(session_id = %run.session.id(), "Questionnaire complete");
            return TurnResult::End(SessionOutcome::Completed);
        }
        self.ask_current(run, self.config.repeat_question_after_advance)
            .await;
        TurnResult::Continue
    }

    async fn follow_up(
        &self,
        run: &mut SessionRun,
        question: &Question,
        utterance: &str,
        transition: Transition,
    ) {
        let (state, hint) = match transition {
            Transition::Redirect => (DialogueState::Redirecting, Some(question.text.as_str())),
            _ => (DialogueState::FollowingUp, None),
        };
        self.set_state(run, state);

        if transition == Transition::Probe || self.config.append_off_topic {
            run.session.push_response(utterance);
        }

        let reply = self
            .ports
            .generator
            .generate(
                GenerationRequest::new(
                    transition.directive(),
                    utterance,
                    run.session.history(self.config.transcript_window),
                )
                .with_next_question(hint),
            )
            .await;
        run.session.record_follow_up();

        self.say(&reply).await;
        run.session.record(Turn::answer(utterance));
        run.session.record(Turn::system(reply));
    }

    /// Record the current question, speaking it when `speak` is set
    async fn ask_current(&self, run: &mut SessionRun, speak: bool) {
        let Some(question) = run.session.current_question().cloned() else {
            return;
        };
        let index = run.session.cursor();
        self.set_state(run, DialogueState::AskingQuestion(index));

        if speak {
            self.say(&question.text).await;
        }
        run.session.record(Turn::question(question.text.as_str()));

        tracing::debug!(
            session_id = %run.session.id(),
            question_index = index,
            question_id = question.id,
            spoken = speak,
            "Question asked"
        );
        self.emit(DialogueEvent::QuestionAsked {
            index,
            question_id: question.id,
            spoken: speak,
        });
    }

    async fn submit(&self, run: &mut SessionRun, question: &Question, answer: String) {
        let submission = AnswerSubmission::new(run.session.id().clone(), question.id, answer);

        match self.ports.answers.submit_answer(&submission).await {
            Ok(()) => {
                metrics::counter!("survey_answers_submitted_total").increment(1);
                tracing::info!(
                    session_id = %submission.session_id,
                    question_id = question.id,
                    "Answer submitted"
                );
                self.emit(DialogueEvent::AnswerSubmitted {
                    question_id: question.id,
                    response: submission.response.clone(),
                });
                run.submitted.push(submission);
            }
            Err(e) => {
                metrics::counter!("survey_submit_failures_total").increment(1);
                tracing::error!(
                    session_id = %submission.session_id,
                    question_id = question.id,
                    error = %e,
                    "Failed to submit answer, continuing"
                );
                self.emit(DialogueEvent::SubmissionFailed {
                    question_id: question.id,
                    error: e.to_string(),
                });
                run.failed_submissions += 1;
            }
        }
    }

    async fn finish(
        &self,
        mut run: SessionRun,
        outcome: SessionOutcome,
        started: Instant,
    ) -> SessionReport {
        self.set_state(&mut run, DialogueState::Ending);

        let closing = SessionClosing::now(run.session.id().clone());
        let finalized = match self.ports.answers.finalize_session(&closing).await {
            Ok(()) => true,
            Err(e) => {
                metrics::counter!("survey_finalize_failures_total").increment(1);
                tracing::error!(session_id = %closing.session_id, error = %e, "Failed to finalize session");
                false
            }
        };
        self.set_state(&mut run, DialogueState::Done);

        let duration = started.elapsed();
        metrics::counter!("survey_sessions_total", "outcome" => outcome.as_str()).increment(1);
        metrics::histogram!("survey_session_duration_seconds").record(duration.as_secs_f64());

        tracing::info!(
            session_id = %closing.session_id,
            outcome = %outcome,
            answered = run.session.cursor(),
            submitted = run.submitted.len(),
            failed_submissions = run.failed_submissions,
            turns = run.turns,
            duration_ms = duration.as_millis() as u64,
            "Survey session ended"
        );
        self.emit(DialogueEvent::Ended { outcome });

        SessionReport {
            session_id: closing.session_id,
            outcome,
            questions_total: run.session.questions().len(),
            questions_answered: run.session.cursor(),
            submitted: run.submitted,
            failed_submissions: run.failed_submissions,
            finalized,
            turns: run.turns,
            transcript: run.session.transcript().clone(),
            duration,
        }
    }

    /// Speak and wait; playback failures are logged and skipped
    async fn say(&self, text: &str) {
        if let Err(e) = self.ports.tts.speak(text).await {
            metrics::counter!("survey_playback_failures_total").increment(1);
            tracing::warn!(error = %e, "Playback failed");
        }
        self.emit(DialogueEvent::Spoke {
            text: text.to_string(),
        });
    }

    fn set_state(&self, run: &mut SessionRun, to: DialogueState) {
        if run.state == to {
            return;
        }
        let from = run.state;
        run.state = to;
        tracing::trace!(?from, ?to, "Dialogue state changed");
        self.emit(DialogueEvent::StateChanged { from, to });
    }

    fn emit(&self, event: DialogueEvent) {
        let _ = self.event_tx.send(event);
    }
}
