// Role-to-competency mapping — prompt template, response schema, and reply
// parsing.
//
// The template carries three placeholders plus a slot for the full
// competency framework JSON. The model answers with the same organization
// and role echoed back, a list of mapped competencies, and a rationale.

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::json;

const ROLE_MAPPING_TEMPLATE: &str = r#"You are an expert in organizational development and competency mapping. Your task is to map a given role to the competencies from the provided competency framework, indicating your confidence in each mapping with strict relevance to the specific organization and role context.
Here is the competency framework:
[Insert the entire competency framework JSON here]
Now, for the given role:

Organization: [organization]
Role Title: [role_title]
Department: [department] (if provided)

CRITICAL INSTRUCTIONS:

Only select competencies that are DIRECTLY and SPECIFICALLY relevant to this exact role within this particular organization
Consider the organization's industry, size, culture, and business context when determining relevance
Avoid generic competency selections that could apply to any role - focus on what makes THIS role unique in THIS organization
Do not include competencies that are merely "nice to have" - only include those that are essential or highly important
If a competency theme has multiple sub-themes, only include the sub-themes that are specifically relevant (not all sub-themes automatically)
Your confidence level should reflect both the importance of the competency AND how certain you are about its relevance to this specific organizational context

For each selected competency, provide:

The category (Behavioural, Functional, Domain)
The competency theme name
Only the relevant competency sub-themes (be selective)
A confidence level (as a percentage, e.g., 85) indicating how certain you are that this competency is critically important for this specific role in this specific organization

Additionally, provide a brief rationale explaining why you selected these specific competencies for this role within this organization, demonstrating clear understanding of the organizational and role context.
Please output your response only in the following JSON format, without any additional text:
{
"organization": "[organization]",
"role_title": "[role_title]",
"mapped_competencies": [
{
"category": "string",
"theme": "string",
"sub_themes": ["string", "string", ...],
"confidence": integer (0-100)
},
...
],
"mapping_rationale": "string"
}"#;

/// The model's structured mapping reply.
#[derive(Debug, Deserialize)]
pub struct MappingReply {
    pub organization: String,
    pub role_title: String,
    #[serde(default)]
    pub mapped_competencies: Vec<MappedCompetency>,
    pub mapping_rationale: String,
}

#[derive(Debug, Deserialize)]
pub struct MappedCompetency {
    pub category: String,
    pub theme: String,
    #[serde(default)]
    pub sub_themes: Vec<String>,
    pub confidence: Option<i64>,
}

/// Substitute the framework document and request fields into the template.
pub fn prompt(
    framework_json: &str,
    organization: &str,
    role_title: &str,
    department: Option<&str>,
) -> String {
    ROLE_MAPPING_TEMPLATE
        .replace(
            "[Insert the entire competency framework JSON here]",
            framework_json,
        )
        .replace("[organization]", organization)
        .replace("[role_title]", role_title)
        .replace("[department]", department.unwrap_or(""))
}

/// Response schema passed to the provider's structured-output mode.
pub fn schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "required": ["organization", "role_title", "mapped_competencies", "mapping_rationale"],
        "properties": {
            "organization": {
                "type": "STRING",
                "description": "The name of the organization"
            },
            "role_title": {
                "type": "STRING",
                "description": "The title of the role"
            },
            "mapped_competencies": {
                "type": "ARRAY",
                "description": "List of mapped competencies",
                "items": {
                    "type": "OBJECT",
                    "required": ["category", "theme", "sub_themes", "confidence"],
                    "properties": {
                        "category": {
                            "type": "STRING",
                            "description": "The category of the competency",
                            "enum": ["Behavioural", "Functional", "Domain"]
                        },
                        "theme": {
                            "type": "STRING",
                            "description": "The name of the competency theme"
                        },
                        "sub_themes": {
                            "type": "ARRAY",
                            "description": "List of competency sub-themes",
                            "items": { "type": "STRING" }
                        },
                        "confidence": {
                            "type": "INTEGER",
                            "description": "Confidence level (0 to 100) of the competency mapping for the role"
                        }
                    }
                }
            },
            "mapping_rationale": {
                "type": "STRING",
                "description": "Explanation of why these competencies were selected"
            }
        }
    })
}

/// Parse the model's JSON reply.
pub fn parse_reply(reply: &str) -> Result<MappingReply> {
    serde_json::from_str(reply).context("LLM mapping reply is not the expected JSON")
}
