//! Built-in phrase packs
//!
//! A [`PhraseBook`] holds every fixed sentence the agent uses, per language:
//! - Persona and directive instructions for the response generator
//! - Evaluator instructions and framing for the classifier
//! - Canned utterances (farewell, silence goodbye, clarification, fallback)

use serde::{Deserialize, Serialize};
use survey_agent_core::{Directive, Language};

/// Coarse time of day used as generator context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimeOfDay {
    /// Bucket a 24-hour clock hour: 5-11 morning, 12-16 afternoon,
    /// 17-20 evening, otherwise night.
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            5..=11 => TimeOfDay::Morning,
            12..=16 => TimeOfDay::Afternoon,
            17..=20 => TimeOfDay::Evening,
            _ => TimeOfDay::Night,
        }
    }
}

/// Every fixed sentence for one language
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhraseBook {
    pub language: Language,
    /// Generator system persona
    pub persona: String,
    pub advance_directive: String,
    pub probe_directive: String,
    pub redirect_directive: String,
    pub farewell_directive: String,
    /// Classifier system instructions
    pub evaluator_role: String,
    /// Spoken when the respondent asks to stop or the session gives up
    pub farewell: String,
    /// Spoken when the silence limit is reached
    pub silence_goodbye: String,
    /// Spoken after a failed turn
    pub clarification: String,
    /// Returned by the generator when the model is unavailable
    pub generator_fallback: String,
    /// Spoken after a silent turn that does not end the session
    pub silence_reprompt: String,
    /// Prefix of the time context sentence, e.g. "It is currently"
    pub time_context_prefix: String,
    /// Words for morning, afternoon, evening and night
    pub time_words: [String; 4],
    pub follow_up_label: String,
    /// Written in place of a missing follow-up question
    pub no_follow_up: String,
    pub question_label: String,
    pub response_label: String,
}

impl PhraseBook {
    /// Built-in pack for a language
    pub fn for_language(language: Language) -> Self {
        match language {
            Language::English => Self::english(),
            Language::Dutch => Self::dutch(),
        }
    }

    /// Built-in pack with configured overrides applied
    pub fn resolve(language: Language, overrides: &PhraseOverrides) -> Self {
        let mut book = Self::for_language(language);
        overrides.apply(&mut book);
        book
    }

    fn english() -> Self {
        Self {
            language: Language::English,
            persona: ENGLISH_PERSONA.trim().to_string(),
            advance_directive: "1. Respond kindly to their answers. 2. Acknowledge that we are moving to the next question of our questionnaire. 3. Ask the provided follow-up question.".to_string(),
            probe_directive: "1. Generate a clarifying question to kindly obtain more details, or a question that gathers the user's feedback about the city. 2. The question should be open-ended.".to_string(),
            redirect_directive: "Handle off-topic user responses by confirming what was heard and politely redirecting the conversation back to the questionnaire. 1. Acknowledge the user's input. If the user asks an off-topic question, do not answer it. 2. Kindly state that the focus is on the questionnaire topics. 3. Ask the follow-up question to smoothly guide the conversation back on track.".to_string(),
            farewell_directive: "1. Thank the user warmly for sharing their thoughts. 2. Mention that their feedback will help make the city better. 3. Say goodbye. Do not ask any further questions.".to_string(),
            evaluator_role: ENGLISH_EVALUATOR.trim().to_string(),
            farewell: "Thank you for sharing your thoughts with me! Your feedback will help make our city better. Have a wonderful rest of your day!".to_string(),
            silence_goodbye: "I haven't heard a response in a while. Thank you for your time. Have a great day!".to_string(),
            clarification: "I'm having trouble understanding. Could you please repeat that?".to_string(),
            generator_fallback: "I seem to be lost in thought at the moment. Perhaps we could chat again in a bit?".to_string(),
            silence_reprompt: "Are you still there? Take your time, I'm listening.".to_string(),
            time_context_prefix: "It is currently".to_string(),
            time_words: [
                "morning".to_string(),
                "afternoon".to_string(),
                "evening".to_string(),
                "night".to_string(),
            ],
            follow_up_label: "Follow-up question".to_string(),
            no_follow_up: "None".to_string(),
            question_label: "Question".to_string(),
            response_label: "Response".to_string(),
        }
    }

    fn dutch() -> Self {
        Self {
            language: Language::Dutch,
            persona: DUTCH_PERSONA.trim().to_string(),
            advance_directive: "1. Reageer vriendelijk op hun antwoorden. 2. Erken dat we doorgaan naar de volgende vraag in onze vragenlijst. 3. Stel de aangeleverde vervolgvraag.".to_string(),
            probe_directive: "1. Genereer een verduidelijkende vraag om vriendelijk meer details te verkrijgen, of een vraag om feedback van de gebruiker over de stad te verzamelen. 2. De vraag moet open zijn.".to_string(),
            redirect_directive: "Behandel off-topic reacties van de gebruiker door te bevestigen wat er is gehoord en het gesprek op een beleefde manier terug te leiden naar de vragenlijst. 1. Erken de input van de gebruiker. Als de gebruiker een off-topic vraag stelt, beantwoord deze dan niet. 2. Geef vriendelijk aan dat de focus ligt op de onderwerpen van de vragenlijst. 3. Stel de vervolgvraag om het gesprek soepel weer op koers te brengen.".to_string(),
            farewell_directive: "1. Bedank de gebruiker hartelijk voor het delen van hun gedachten. 2. Vertel dat hun feedback helpt om de stad beter te maken. 3. Neem afscheid. Stel geen verdere vragen.".to_string(),
            evaluator_role: DUTCH_EVALUATOR.trim().to_string(),
            farewell: "Bedankt voor het delen van je gedachten! Jouw feedback zal helpen om onze stad beter te maken. Nog een geweldige dag verder!".to_string(),
            silence_goodbye: "Ik heb al een tijdje geen reactie gehoord. Bedankt voor je tijd. Fijne dag verder!".to_string(),
            clarification: "Ik heb moeite met begrijpen. Kun je dat alstublieft herhalen?".to_string(),
            generator_fallback: "Ik lijk even in gedachten verzonken te zijn. Misschien kunnen we straks weer verder praten?".to_string(),
            silence_reprompt: "Ben je er nog? Neem gerust de tijd, ik luister.".to_string(),
            time_context_prefix: "Het is momenteel".to_string(),
            time_words: [
                "ochtend".to_string(),
                "middag".to_string(),
                "avond".to_string(),
                "nacht".to_string(),
            ],
            follow_up_label: "Vervolgvraag".to_string(),
            no_follow_up: "Geen".to_string(),
            question_label: "Vraag".to_string(),
            response_label: "Reactie".to_string(),
        }
    }

    /// Instruction text for a directive
    pub fn directive(&self, directive: Directive) -> &str {
        match directive {
            Directive::Advance => &self.advance_directive,
            Directive::Probe => &self.probe_directive,
            Directive::Redirect => &self.redirect_directive,
            Directive::Farewell => &self.farewell_directive,
        }
    }

    /// Full time context sentence, e.g. "It is currently morning."
    pub fn time_context(&self, time: TimeOfDay) -> String {
        let word = match time {
            TimeOfDay::Morning => &self.time_words[0],
            TimeOfDay::Afternoon => &self.time_words[1],
            TimeOfDay::Evening => &self.time_words[2],
            TimeOfDay::Night => &self.time_words[3],
        };
        format!("{} {}.", self.time_context_prefix, word)
    }
}

impl Default for PhraseBook {
    fn default() -> Self {
        Self::english()
    }
}

/// Per-phrase replacements from configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PhraseOverrides {
    #[serde(default)]
    pub persona: Option<String>,
    #[serde(default)]
    pub advance_directive: Option<String>,
    #[serde(default)]
    pub probe_directive: Option<String>,
    #[serde(default)]
    pub redirect_directive: Option<String>,
    #[serde(default)]
    pub farewell_directive: Option<String>,
    #[serde(default)]
    pub evaluator_role: Option<String>,
    #[serde(default)]
    pub farewell: Option<String>,
    #[serde(default)]
    pub silence_goodbye: Option<String>,
    #[serde(default)]
    pub clarification: Option<String>,
    #[serde(default)]
    pub generator_fallback: Option<String>,
    #[serde(default)]
    pub silence_reprompt: Option<String>,
}

impl PhraseOverrides {
    fn apply(&self, book: &mut PhraseBook) {
        let slots: [(&Option<String>, &mut String); 11] = [
            (&self.persona, &mut book.persona),
            (&self.advance_directive, &mut book.advance_directive),
            (&self.probe_directive, &mut book.probe_directive),
            (&self.redirect_directive, &mut book.redirect_directive),
            (&self.farewell_directive, &mut book.farewell_directive),
            (&self.evaluator_role, &mut book.evaluator_role),
            (&self.farewell, &mut book.farewell),
            (&self.silence_goodbye, &mut book.silence_goodbye),
            (&self.clarification, &mut book.clarification),
            (&self.generator_fallback, &mut book.generator_fallback),
            (&self.silence_reprompt, &mut book.silence_reprompt),
        ];
        for (replacement, target) in slots {
            if let Some(text) = replacement.as_ref().filter(|t| !t.trim().is_empty()) {
                *target = text.clone();
            }
        }
    }
}

const ENGLISH_PERSONA: &str = r#"
You are a friendly and approachable Talking Bench designed to collect feedback about the city from the public.
Your goal is to make people feel comfortable sharing their honest opinions, ideas, and experiences.
You ask clear, conversational questions and respond empathetically, showing understanding and encouragement.
You never end the conversation yourself. For that you use the provided follow-up question.

Key traits:
- Friendly: You greet people warmly and maintain a positive tone.
- Curious: You express genuine interest in people's thoughts and ideas.
- Respectful: You acknowledge each response and show appreciation for their input.
- Non-judgmental: You remain neutral and supportive, regardless of the feedback received.

You gather feedback in three categories:
1. Positive experiences people have had in the city.
2. Areas where they see room for improvement.
3. Ideas for making the city better.

Keep responses brief (2-3 sentences) unless engaged in a deeper conversation.

Your task:"#;

const DUTCH_PERSONA: &str = r#"
Je bent een vriendelijke en toegankelijke Pratende Bank ontworpen om feedback over de stad te verzamelen van het publiek.
Je doel is om mensen zich comfortabel te laten voelen zodat ze hun eerlijke meningen, ideeën en ervaringen delen.
Je stelt duidelijke, informele vragen en reageert empathisch, waarbij je begrip en aanmoediging toont.
Je beëindigt nooit zelf het gesprek. Hiervoor gebruik je de aangeleverde vervolgvraag.

Belangrijke eigenschappen:
- Vriendelijk: Je begroet mensen hartelijk en houdt een positieve toon aan.
- Nieuwsgierig: Je toont oprechte interesse in de gedachten en ideeën van mensen.
- Respectvol: Je waardeert elke reactie en toont waardering voor hun input.
- Niet-oordelend: Je blijft neutraal en ondersteunend, ongeacht de ontvangen feedback.

Je verzamelt feedback in drie categorieën:
1. Positieve ervaringen die mensen in de stad hebben gehad.
2. Gebieden waar ze verbeteringen zien.
3. Ideeën om de stad beter te maken.

Houd reacties kort (2-3 zinnen) tenzij het gesprek dieper gaat.

Jouw taak:"#;

const ENGLISH_EVALUATOR: &str = r#"
You are an evaluator trained to determine if a user's response fully answers a given question.

Provide a judgment in the format: 'Yes', 'No', 'Off', 'End'.
- 'Yes': The response is related to the question and addresses the question enough.
- 'No': The response is related to the question, but is incomplete or lacks details.
- 'Off': The response is off-topic or unrelated to the question.
- 'End': The response indicates the will to end the conversation. For example, 'Goodbye', or the person no longer wants to answer questions."#;

const DUTCH_EVALUATOR: &str = r#"
Je bent een beoordelaar die is getraind om te bepalen of de reactie van een gebruiker volledig antwoord geeft op een gegeven vraag.

Geef een oordeel in het volgende formaat: 'Ja', 'Nee', 'Off', 'Einde'.
- 'Ja': De reactie is gerelateerd aan de vraag en beantwoordt de vraag voldoende.
- 'Nee': De reactie is gerelateerd aan de vraag, maar is onvolledig of mist details.
- 'Off': De reactie is niet relevant of niet gerelateerd aan de vraag.
- 'Einde': De reactie geeft aan dat de gebruiker het gesprek wil beëindigen. Bijvoorbeeld 'Tot ziens', of de persoon wil geen vragen meer beantwoorden."#;
