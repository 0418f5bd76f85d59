//! Prompt Templates
//!
//! Fixed prompt contracts for the three generative surfaces. The JSON key
//! names in these prompts mirror the wire types in [`crate::types`]; keep
//! them in sync when either side changes.

/// Prompt for single-shot medication extraction.
///
/// Asks for a JSON object with `name`, `dosage`, `time` keys and explicit
/// normalization of vague dayparts to fixed clock times.
pub fn extraction(text: &str) -> String {
    format!(
        r#"Extract structured medication data from this text: "{text}"

Return a valid JSON object with these keys:
- name: (string, e.g. "Metformin")
- dosage: (string, e.g. "500mg")
- time: (string, normalized to HH:MM AM/PM format if possible, e.g. "08:00 AM". If vague like "morning", map to 08:00 AM, "night" to 09:00 PM)

If a field is missing, use null.
Example Output: {{"name": "Aspirin", "dosage": "81mg", "time": "08:00 AM"}}"#
    )
}

/// Prompt for the generative interaction fallback.
///
/// Restricts the reply severity to HIGH or MEDIUM; mild or absent
/// interactions come back as both-null.
pub fn interaction(new_med: &str, current_meds: &[String]) -> String {
    let current_list = current_meds.join(", ");
    format!(
        r#"Act as a Clinical Pharmacist. Check for interactions between the new medication: "{new_med}"
and these current medications: "{current_list}".

If there is a MODERATE, HIGH, or CONTRAINDICATED interaction, return a JSON object:
{{
    "warning": "Brief clinical explanation of the risk.",
    "severity": "HIGH" or "MEDIUM"
}}

If there are NO significant interactions or only MILD ones, return:
{{
    "warning": null,
    "severity": null
}}

Return ONLY valid JSON. No markdown."#
    )
}

/// Prompt for whole-document structured extraction.
pub fn document_analysis() -> String {
    r#"Analyze this medical document image.
Extract key clinical data such as:
- Patient Name
- Test Names and Results (Value + Unit)
- Medication Names and Dosages
- Date of Report

Return the result as a clean, structured JSON object.
Example format:
{
  "patient_name": "...",
  "date": "...",
  "tests": [{"name": "Hemoglobin", "value": "13.5", "unit": "g/dL"}],
  "medications": [...]
}
Only return the JSON. No markdown formatting."#
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extraction_prompt_carries_input_and_keys() {
        let p = extraction("Take 50mg metformin every morning");
        assert!(p.contains("Take 50mg metformin every morning"));
        assert!(p.contains("- name:"));
        assert!(p.contains("- dosage:"));
        assert!(p.contains("- time:"));
    }

    #[test]
    fn interaction_prompt_lists_full_regimen() {
        let meds = vec!["Warfarin".to_string(), "Lisinopril".to_string()];
        let p = interaction("Aspirin", &meds);
        assert!(p.contains("\"Aspirin\""));
        assert!(p.contains("Warfarin, Lisinopril"));
        assert!(p.contains("\"HIGH\" or \"MEDIUM\""));
    }

    #[test]
    fn document_prompt_requests_bare_json() {
        let p = document_analysis();
        assert!(p.contains("No markdown"));
        assert!(p.contains("patient_name"));
    }
}
