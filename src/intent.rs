//! Keyword-routed assistant replies.
//!
//! Both the `/assistant` handler and the client widget's offline path call
//! [`respond`], so category selection and suggestion sets cannot drift apart.

use crate::content::{self, Topic};
use crate::models::{AssistantReply, Suggestion};
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Greeting,
    Track,
    Breastfeeding,
    Sleep,
    Recovery,
    Tip,
    Fallback,
}

/// Keyword sets in priority order. The first set with a hit wins.
const RULES: [(Intent, &[&str]); 5] = [
    (Intent::Track, &["track", "log", "mood"]),
    (Intent::Breastfeeding, &["breast", "latch", "feeding"]),
    (Intent::Sleep, &["sleep"]),
    (Intent::Recovery, &["recover", "postpartum", "pain"]),
    (Intent::Tip, &["tip", "advice", "help"]),
];

/// Optional caller details sent alongside a message.
#[derive(Debug, Clone, Default)]
pub struct Context<'a> {
    pub name: Option<&'a str>,
    pub mood: Option<&'a str>,
}

pub fn classify(text: &str) -> Intent {
    let text = text.trim().to_lowercase();
    if text.is_empty() {
        return Intent::Greeting;
    }

    RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| text.contains(keyword)))
        .map(|(intent, _)| *intent)
        .unwrap_or(Intent::Fallback)
}

impl Intent {
    pub fn suggestions(self) -> Vec<Suggestion> {
        use Suggestion::*;
        match self {
            Intent::Greeting => vec![Tip, FaqBreastfeeding, Track],
            Intent::Track => vec![Track],
            Intent::Breastfeeding => vec![Tip, FaqBreastfeeding],
            Intent::Sleep => vec![Tip, FaqSleep],
            Intent::Recovery => vec![FaqPostpartum, Tip],
            Intent::Tip => vec![Tip],
            Intent::Fallback => vec![Tip, Track, FaqBreastfeeding],
        }
    }
}

pub fn respond<R: Rng + ?Sized>(text: &str, context: &Context<'_>, rng: &mut R) -> AssistantReply {
    let intent = classify(text);
    let mut resources = None;

    let reply = match intent {
        Intent::Greeting => match context.name.map(str::trim).filter(|name| !name.is_empty()) {
            Some(name) => format!("Hi {name} — I'm here for you. How can I support you today?"),
            None => "Hi — I'm here for you. How can I support you today?".to_string(),
        },
        Intent::Track => match context.mood.map(str::trim).filter(|mood| !mood.is_empty()) {
            Some(mood) => empathetic(
                "Thanks for sharing —",
                &format!("I can log that you're feeling {mood}, and your sleep too. Would you like to record now?"),
            ),
            None => empathetic(
                "Thanks for sharing —",
                "I can log your mood and sleep. Would you like to record now?",
            ),
        },
        Intent::Breastfeeding => {
            resources = Some(content::breastfeeding_resources());
            empathetic("Breastfeeding can be challenging —", Topic::Breastfeeding.answer())
        }
        Intent::Sleep => empathetic("Sleep is so important —", Topic::Sleep.answer()),
        Intent::Recovery => empathetic("Recovery takes time —", Topic::Postpartum.answer()),
        Intent::Tip => empathetic("Here’s a simple tip —", content::random_tip(rng)),
        Intent::Fallback => empathetic(
            "I hear you —",
            "Tell me more or choose a quick action: 'tip', 'track', or ask about 'breastfeeding' or 'sleep'.",
        ),
    };

    AssistantReply {
        reply,
        suggestions: intent.suggestions(),
        resources,
    }
}

fn empathetic(prefix: &str, body: &str) -> String {
    format!("{prefix} {body} 💜")
}
