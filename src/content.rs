use crate::models::Resource;
use rand::{Rng, seq::SliceRandom};
use std::str::FromStr;

pub const TIPS: [&str; 5] = [
    "Take three slow, deep breaths when you feel overwhelmed.",
    "Try skin-to-skin contact for soothing both you and your baby.",
    "Small, frequent snacks can help maintain energy while breastfeeding.",
    "Short walks (even indoors) can boost mood and circulation.",
    "Create a simple bedtime cue for your baby — a soft song or dim light.",
];

pub const GENERAL_ANSWER: &str =
    "Ask me about breastfeeding, sleep, or postpartum recovery and I’ll share tips and resources.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Breastfeeding,
    Sleep,
    Postpartum,
}

impl Topic {
    pub fn as_str(self) -> &'static str {
        match self {
            Topic::Breastfeeding => "breastfeeding",
            Topic::Sleep => "sleep",
            Topic::Postpartum => "postpartum",
        }
    }

    pub fn answer(self) -> &'static str {
        match self {
            Topic::Breastfeeding => {
                "Breastfeeding often works best when both you and baby are comfortable. Seek a lactation consultant for persistent pain or latch issues. It's okay to ask for help. Try repositioning, ensuring the baby's mouth covers more of the areola, and burping frequently."
            }
            Topic::Sleep => {
                "Newborns sleep in short stretches. Focus on safe sleep practices and rest when you can. Consider short naps, a calming bedtime routine, and reduce screen time before bed. If sleep deprivation becomes severe, ask for support from family or a provider."
            }
            Topic::Postpartum => {
                "Postpartum recovery varies. Rest, hydration, gentle movement, and reaching out for support help. If you experience heavy bleeding, fever, severe pain, or thoughts of harming yourself, contact a healthcare provider immediately."
            }
        }
    }
}

impl FromStr for Topic {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "breastfeeding" => Ok(Topic::Breastfeeding),
            "sleep" => Ok(Topic::Sleep),
            "postpartum" => Ok(Topic::Postpartum),
            _ => Err(()),
        }
    }
}

/// Resolves a free-form topic to `(topic, answer)`, defaulting to the general answer.
pub fn faq(topic: Option<&str>) -> (&'static str, &'static str) {
    match topic.and_then(|value| value.parse::<Topic>().ok()) {
        Some(topic) => (topic.as_str(), topic.answer()),
        None => ("general", GENERAL_ANSWER),
    }
}

pub fn random_tip<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    TIPS.choose(rng).copied().unwrap_or(TIPS[0])
}

pub fn breastfeeding_resources() -> Vec<Resource> {
    vec![
        Resource {
            title: "La Leche League".to_string(),
            url: "https://www.llli.org".to_string(),
        },
        Resource {
            title: "Local lactation consultants".to_string(),
            url: "/community".to_string(),
        },
    ]
}
