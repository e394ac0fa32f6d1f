//! Ordered condition rules for offline guidance
//!
//! Rules are tried top to bottom and the first one with a matching keyword
//! wins, so "hot headache" is answered as a fever.

use std::fmt::Write;

/// Keyword group mapped to a guidance template
#[derive(Debug)]
pub struct ConditionRule {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
    pub causes: &'static str,
    pub home_care: &'static [&'static str],
    pub warning_signs: &'static [&'static str],
    pub prevention: &'static [&'static str],
}

impl ConditionRule {
    /// True if any keyword occurs in already lower-cased text.
    pub fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|keyword| lowered.contains(keyword))
    }

    pub fn render(&self) -> String {
        format!(
            "**{} GUIDANCE**

📋 **Possible Causes:** {}

🏠 **Home Care:** {}

⚠️ **Seek Medical Help If:** {}

🛡️ **Prevention:** {}

---
🔬 **Remember:** I provide general information only. Always consult healthcare professionals for medical care.",
            self.name.to_uppercase(),
            self.causes,
            bullets(self.home_care),
            bullets(self.warning_signs),
            bullets(self.prevention),
        )
    }
}

fn bullets(items: &[&str]) -> String {
    let mut out = String::new();
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = write!(out, "• {item}");
    }
    out
}

pub const GENERAL_GUIDANCE: &str = "Thank you for describing your symptoms.

I recommend monitoring your condition and consulting a healthcare professional for proper diagnosis.

For immediate concerns, please contact local medical services.";

/// Checked in order, first match wins. Headache's `head` and `ache` are
/// broad, so "stomach ache", "toothache" and "earache" land on Headache
/// unless an earlier rule matches. Later rules only see text without them.
pub static CONDITION_RULES: &[ConditionRule] = &[
    ConditionRule {
        name: "Fever",
        keywords: &["fever", "temperature", "hot"],
        causes: "Infections, inflammation, or environmental factors",
        home_care: &[
            "Rest and hydrate with water/electrolytes",
            "Use damp cloth on forehead",
            "Monitor temperature",
        ],
        warning_signs: &[
            "Temperature above 103°F",
            "Lasting more than 3 days",
            "Difficulty breathing",
        ],
        prevention: &["Practice good hygiene", "Wash hands regularly"],
    },
    ConditionRule {
        name: "Headache",
        keywords: &["headache", "head", "ache"],
        causes: "Tension, dehydration, lack of sleep, or eye strain",
        home_care: &["Rest in quiet, dark room", "Cool compress", "Stay hydrated"],
        warning_signs: &["Severe sudden headache", "Head injury", "Vision changes"],
        prevention: &["Regular sleep patterns", "Stress management"],
    },
    ConditionRule {
        name: "Cough",
        keywords: &["cough", "congestion", "sore throat", "runny nose"],
        causes: "Common cold, flu, dust or smoke irritation, or allergies",
        home_care: &[
            "Drink warm fluids such as tea with honey",
            "Breathe steam from a bowl of hot water",
            "Rest and keep warm",
        ],
        warning_signs: &[
            "Coughing blood",
            "Lasting more than 3 weeks",
            "High fever or shortness of breath",
        ],
        prevention: &[
            "Cover mouth when coughing",
            "Avoid smoke from cooking fires indoors",
        ],
    },
    ConditionRule {
        name: "Skin Rash",
        keywords: &["rash", "itch", "hives"],
        causes: "Allergic reaction, insect bites, heat, or fungal infection",
        home_care: &[
            "Wash gently with clean water and mild soap",
            "Keep the area dry and uncovered",
            "Avoid scratching",
        ],
        warning_signs: &[
            "Rash spreading quickly",
            "Swelling of face or lips",
            "Blisters, pus, or fever",
        ],
        prevention: &["Wear loose cotton clothing", "Use mosquito nets"],
    },
    ConditionRule {
        name: "Stomach Upset",
        keywords: &["stomach", "diarrhea", "vomit", "nausea"],
        causes: "Contaminated food or water, infection, or indigestion",
        home_care: &[
            "Sip oral rehydration solution often",
            "Eat plain foods like rice or bananas",
            "Rest",
        ],
        warning_signs: &[
            "Blood in stool or vomit",
            "Signs of dehydration such as no urine for 8 hours",
            "Pain lasting more than 2 days",
        ],
        prevention: &[
            "Boil or treat drinking water",
            "Wash hands before eating",
        ],
    },
];

/// First rule matching already lower-cased text.
pub fn find(lowered: &str) -> Option<&'static ConditionRule> {
    CONDITION_RULES.iter().find(|rule| rule.matches(lowered))
}
