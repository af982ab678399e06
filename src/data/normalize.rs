//! Cell coercion applied while a row is turned into an [`AuditRecord`].
//!
//! [`AuditRecord`]: super::model::AuditRecord

/// Best-effort numeric parse. Blank, unparseable and non-finite input all
/// become `0.0`.
pub fn to_number(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

pub fn clean_text(raw: &str) -> String {
    raw.trim().to_string()
}
