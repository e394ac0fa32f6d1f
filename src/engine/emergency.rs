//! Emergency keyword detection and the alert template

/// Literal phrases that always route to the emergency alert.
/// Matched as case-insensitive substrings.
pub const EMERGENCY_KEYWORDS: &[&str] = &[
    "chest pain",
    "can't breathe",
    "difficulty breathing",
    "severe pain",
    "unconscious",
    "heavy bleeding",
    "heart attack",
    "stroke",
    "choking",
];

/// Return the first emergency keyword found in already lower-cased text.
pub fn detect(lowered: &str) -> Option<&'static str> {
    EMERGENCY_KEYWORDS
        .iter()
        .copied()
        .find(|keyword| lowered.contains(keyword))
}

/// Render the alert for `description`, quoted verbatim.
pub fn alert(description: &str) -> String {
    format!(
        "🚨 **EMERGENCY ALERT** 🚨

Based on your description of '{description}', this may be a medical emergency.

**IMMEDIATE ACTION REQUIRED:**
• 📞 Call local emergency services NOW
• 🚑 Don't drive yourself to hospital
• 📋 Stay on the line with operator

**Emergency contacts:**
• National Emergency: 112 or 911
• Local hospital: [Nearest Healthcare Facility]
• Ambulance: 108 (in many regions)

⚠️ **CRITICAL LIMITATION:** I cannot handle emergencies. Please seek immediate human medical help."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_each_keyword() {
        for keyword in EMERGENCY_KEYWORDS {
            let text = format!("since this morning i have {keyword} and worry");
            assert_eq!(detect(&text), Some(*keyword));
        }
    }

    #[test]
    fn test_detect_needs_lowered_input() {
        // Callers lower-case first; detect itself is a plain substring scan
        assert_eq!(detect("CHEST PAIN"), None);
        assert_eq!(detect(&"CHEST PAIN".to_lowercase()), Some("chest pain"));
    }

    #[test]
    fn test_detect_substring_inside_words() {
        assert_eq!(detect("heatstroke after work"), Some("stroke"));
    }

    #[test]
    fn test_detect_none() {
        assert_eq!(detect("mild cough for two days"), None);
        assert_eq!(detect(""), None);
    }

    #[test]
    fn test_alert_quotes_description_verbatim() {
        let text = alert("My Father Has CHEST PAIN");
        assert!(text.starts_with("🚨 **EMERGENCY ALERT** 🚨"));
        assert!(text.contains("'My Father Has CHEST PAIN'"));
        assert!(text.contains("112 or 911"));
        assert!(text.contains("[Nearest Healthcare Facility]"));
        assert!(text.contains("108"));
    }
}
