//! Prompt text and structured-output schema sent with every report request.

use pharmatrack_core::InspectionStatus;
use serde_json::{json, Value};

use crate::types::{
    Content, GenerateContentRequest, GenerationConfig, GoogleSearch, Part, Tool,
};

/// Builds the natural-language instruction for `drug_name`.
///
/// Asks for `City, State/Province, Country` locations so that the location
/// parser can recover a country and, for US sites, a state.
pub fn report_prompt(drug_name: &str) -> String {
    format!(
        "Find all FDA-approved manufacturing facilities for the drug \"{drug_name}\".\n\
         For each facility, provide the name, location (formatted exactly as: City, \
         State/Province, Country), FEI number, the type of manufacturing they perform \
         (e.g., Active Pharmaceutical Ingredient (API), Finished Dosage Form, or Packaging), \
         their most recent known FDA inspection status, a rough capacity estimate, and at \
         least 2 interesting facts or history about that specific site.\n\n\
         If the facility is in the United States, ensure the State is clearly provided \
         (e.g., \"Chicago, IL, USA\").\n\
         Format the response as JSON."
    )
}

/// Response schema constraining the generated JSON to the report shape.
pub fn report_schema() -> Value {
    let statuses: Vec<&str> = InspectionStatus::ALL.iter().map(|s| s.as_str()).collect();
    json!({
        "type": "OBJECT",
        "properties": {
            "name": { "type": "STRING" },
            "manufacturer": { "type": "STRING" },
            "approvalDate": { "type": "STRING" },
            "drugClass": { "type": "STRING" },
            "sites": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "siteName": { "type": "STRING" },
                        "location": { "type": "STRING" },
                        "type": { "type": "STRING" },
                        "feiNumber": { "type": "STRING" },
                        "inspectionStatus": { "type": "STRING", "enum": statuses },
                        "lastInspectionDate": { "type": "STRING" },
                        "interestingFacts": { "type": "ARRAY", "items": { "type": "STRING" } },
                        "capacityEstimate": { "type": "STRING" }
                    },
                    "required": ["siteName", "location", "type"]
                }
            }
        },
        "required": ["name", "sites"]
    })
}

/// Full `generateContent` body: prompt, grounded search and JSON output.
pub fn build_request(drug_name: &str) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            parts: vec![Part {
                text: report_prompt(drug_name),
            }],
        }],
        tools: vec![Tool {
            google_search: GoogleSearch::default(),
        }],
        generation_config: GenerationConfig {
            response_mime_type: "application/json".to_owned(),
            response_schema: report_schema(),
        },
    }
}
