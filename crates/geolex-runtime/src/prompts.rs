//! Prompt construction for the generation backend.
//!
//! The instruction steers the fine-tuned model toward minified JSON with
//! the exact record keys; the resolution engine in geolex-core handles
//! whatever comes back anyway.

/// Default analysis instruction sent to the backend.
pub const DEFAULT_INSTRUCTION: &str =
    "Analyse the feature artifact and decide if geo-specific compliance logic is needed.";

/// Output-format hint appended to every instruction.
pub const FORMAT_HINT: &str = concat!(
    "Return ONLY valid minified JSON with keys: ",
    "need_geo_logic,jurisdictions,legal_citations,data_categories,lawful_basis,",
    "consent_required,notes,risks,implementation,confidence. ",
    r#"Example: {"need_geo_logic":true,"jurisdictions":["EU"],"#,
    r#""legal_citations":[{"law":"GDPR","article":"7(1)","jurisdiction":"EU"}],"#,
    r#""data_categories":["cookies"],"lawful_basis":["consent"],"consent_required":true,"#,
    r#""notes":"...","risks":[{"risk":"...","severity":"high","mitigation":"..."}],"#,
    r#""implementation":[{"step":"...","priority":1}],"confidence":0.8}"#,
);

/// Build the full model instruction from a base instruction.
pub fn build_instruction(instruction: &str) -> String {
    format!(
        "{}\n\nYou are a compliance analyst. {}",
        instruction, FORMAT_HINT
    )
}
