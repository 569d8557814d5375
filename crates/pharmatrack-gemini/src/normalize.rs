//! Converts a raw `generateContent` response into a [`DrugReport`].

use pharmatrack_core::display::{SOURCE_TITLE_FALLBACK, SOURCE_URI_FALLBACK};
use pharmatrack_core::{DrugReport, InspectionStatus, ManufacturingSite, SourceLink};

use crate::error::GeminiError;
use crate::types::{GenerateContentResponse, GroundingChunk, ReportPayload, SitePayload};

/// Concatenates the text parts of the first candidate.
///
/// An empty result is replaced with `"{}"`, which then fails report
/// deserialization on the missing required fields.
///
/// # Errors
///
/// Returns [`GeminiError::EmptyResponse`] when there are no candidates.
pub(crate) fn response_text(response: &GenerateContentResponse) -> Result<String, GeminiError> {
    let Some(candidate) = response.candidates.first() else {
        let reason = response
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.clone())
            .unwrap_or_else(|| "no candidates".to_owned());
        return Err(GeminiError::EmptyResponse(reason));
    };

    let text: String = candidate
        .content
        .iter()
        .flat_map(|c| c.parts.iter())
        .filter_map(|p| p.text.as_deref())
        .collect();

    if text.trim().is_empty() {
        Ok("{}".to_owned())
    } else {
        Ok(text)
    }
}

/// Grounding sources from the first candidate, in response order.
pub(crate) fn grounding_sources(response: &GenerateContentResponse) -> Vec<SourceLink> {
    response
        .candidates
        .first()
        .and_then(|c| c.grounding_metadata.as_ref())
        .map(|m| m.grounding_chunks.iter().map(source_link).collect())
        .unwrap_or_default()
}

fn source_link(chunk: &GroundingChunk) -> SourceLink {
    let web = chunk.web.as_ref();
    let title = web
        .and_then(|w| w.title.as_deref())
        .filter(|t| !t.is_empty())
        .unwrap_or(SOURCE_TITLE_FALLBACK);
    let uri = web
        .and_then(|w| w.uri.as_deref())
        .filter(|u| !u.is_empty())
        .unwrap_or(SOURCE_URI_FALLBACK);
    SourceLink {
        title: title.to_owned(),
        uri: uri.to_owned(),
    }
}

fn site_from_payload(site: SitePayload) -> ManufacturingSite {
    ManufacturingSite {
        site_name: site.site_name,
        location: site.location,
        facility_type: site.facility_type,
        fei_number: site.fei_number.unwrap_or_default(),
        inspection_status: site
            .inspection_status
            .as_deref()
            .map(InspectionStatus::from_label)
            .unwrap_or_default(),
        last_inspection_date: site.last_inspection_date.unwrap_or_default(),
        interesting_facts: site.interesting_facts.unwrap_or_default(),
        capacity_estimate: site.capacity_estimate.unwrap_or_default(),
    }
}

/// Parses the generated JSON and attaches grounding sources.
///
/// # Errors
///
/// - [`GeminiError::EmptyResponse`] if the response has no candidates.
/// - [`GeminiError::Deserialize`] if the generated text is not a report.
pub(crate) fn into_report(
    drug_name: &str,
    response: &GenerateContentResponse,
) -> Result<DrugReport, GeminiError> {
    let text = response_text(response)?;
    let payload: ReportPayload =
        serde_json::from_str(&text).map_err(|e| GeminiError::Deserialize {
            context: format!("generated report for '{drug_name}'"),
            source: e,
        })?;

    Ok(DrugReport {
        name: payload.name,
        manufacturer: payload.manufacturer.unwrap_or_default(),
        approval_date: payload.approval_date.unwrap_or_default(),
        drug_class: payload.drug_class.unwrap_or_default(),
        sites: payload.sites.into_iter().map(site_from_payload).collect(),
        sources: grounding_sources(response),
    })
}
