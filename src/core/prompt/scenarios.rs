//! Built-in document scenarios and their prompts

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Kind of document produced from the key frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Scenario {
    /// Operational manual for new joiners
    #[default]
    ManualCreation,
    /// Driving safety compliance report
    SafetyCheck,
    /// Concise summary of the video
    Summary,
}

impl Scenario {
    /// All scenarios
    pub const ALL: [Scenario; 3] = [
        Scenario::ManualCreation,
        Scenario::SafetyCheck,
        Scenario::Summary,
    ];

    /// Prompt for generating the final document
    pub fn main_prompt(&self) -> &'static str {
        match self {
            Scenario::ManualCreation => {
                "Could you create an operational manual for operational procedures based on the following images and descriptions in markdown? We would like to show this manual to new joiners\n- Please leverage markdown grammar effectively e.g. using bullet points, # tag to emphasize, break lines\n- Please include image with using SAS image url(DO NOT modify the image URL, NOT output base64 encoding)"
            }
            Scenario::SafetyCheck => {
                "Could you analyze the following driving video for safety compliance? First, answer the overall evaluation for the driving. Also, please annotate instances of safe and unsafe behaviors with specific timestamps and descriptions."
            }
            Scenario::Summary => {
                "Could you summarize the key points of the following video? Provide a concise summary"
            }
        }
    }

    /// Prompt for drafting per-frame annotations
    pub fn annotation_prompt(&self) -> &'static str {
        match self {
            Scenario::ManualCreation => {
                "We would like to create an operational manual from screenshots of the video. To provide information to LLM, we need to add some information of each image as auxiliary information. Could you generate a draft of the image annotations?\nExample\n1. Action: The lady is carrying the box\n2. Outfit: The person is wearing safety gloves\n3. Attention: Carefully checking the box\n4. Environment: Outside"
            }
            Scenario::SafetyCheck => {
                "We would like to ensure the safety of the driving video. To provide information to LLM, we need to add some information of each image as auxiliary information. Could you generate a draft of the image annotations?\nExample\n1. Action: The driver is checking mirrors\n2. Vehicle: The car is in good condition\n3. Attention: The driver is focusing on the road\n4. Environment: Urban area"
            }
            Scenario::Summary => {
                "We would like to create a summary from the video. To provide information to LLM, we need to add some information of each image as auxiliary information. Could you generate a draft of the image annotations?\nExample\n1. Scene: The character is talking\n2. Action: The character is moving\n3. Attention: The character is pointing at the board\n4. Environment: Inside a room"
            }
        }
    }

    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Scenario::ManualCreation => "manualCreation",
            Scenario::SafetyCheck => "safetyCheck",
            Scenario::Summary => "summary",
        }
    }
}

impl std::fmt::Display for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Scenario {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_'], "").as_str() {
            "manualcreation" | "manual" => Ok(Scenario::ManualCreation),
            "safetycheck" | "safety" => Ok(Scenario::SafetyCheck),
            "summary" => Ok(Scenario::Summary),
            _ => Err(format!(
                "unknown scenario '{}', expected one of: manualCreation, safetyCheck, summary",
                s
            )),
        }
    }
}
