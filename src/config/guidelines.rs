//! Usage policy shown read-only to every user of the UI.

use serde::{Deserialize, Serialize};

/// Guidelines shipped with the default configuration, in display order.
const DEFAULT_GUIDELINES: &[&str] = &[
    "Do not use cloned voices to impersonate real people",
    "Clearly disclose when content is AI-generated",
    "Do not produce harmful or misleading content",
    "Respect copyright and data protection laws",
    "Obtain explicit permission before using anyone's voice",
];

const DEFAULT_DISCLAIMER: &str =
    "This tool enables AI-generated podcast creation using cloned voices. Users must comply with all applicable laws and ethical guidelines.";

/// Fixed legal notice appended after the configurable guidelines.
const LEGAL_NOTICE: &[&str] = &[
    "Users are responsible for all content generated",
    "Misuse of this tool may result in legal consequences",
    "Always obtain proper permissions and licenses",
    "Follow platform terms of service and community guidelines",
];

/// Disclaimer plus ordered list of acceptable-use guidelines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UsageGuidelines {
    pub disclaimer: String,
    pub guidelines: Vec<String>,
}

impl Default for UsageGuidelines {
    fn default() -> Self {
        Self { disclaimer: DEFAULT_DISCLAIMER.to_string(), guidelines: DEFAULT_GUIDELINES.iter().map(|g| g.to_string()).collect() }
    }
}

impl UsageGuidelines {
    /// Render the policy as markdown: disclaimer, numbered guidelines, legal notice.
    pub fn render_markdown(&self) -> String {
        let mut text = String::new();
        text.push_str("## ⚠️ Important Usage Guidelines\n\n");
        text.push_str(&self.disclaimer);
        text.push_str("\n\n### 📋 Guidelines:\n");

        for (i, guideline) in self.guidelines.iter().enumerate() {
            text.push_str(&format!("\n{}. {}", i + 1, guideline));
        }

        text.push_str("\n\n### 🚨 Legal Notice:\n");
        for notice in LEGAL_NOTICE {
            text.push_str(&format!("- {}\n", notice));
        }
        text.push_str("\nBy using this tool, you agree to comply with all applicable laws and ethical standards.\n");
        text
    }

    /// Lines of the fixed legal notice.
    pub fn legal_notice(&self) -> &'static [&'static str] {
        LEGAL_NOTICE
    }
}
