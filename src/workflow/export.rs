use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};
use crate::fields::FieldMap;

pub const UNTITLED_EXPORT_NAME: &str = "untitled.json";

const PDF_SUFFIX: &str = ".pdf";

/// `Invoice.PDF` becomes `Invoice.json`; without an opened file the name is
/// `untitled.json`.
pub fn export_file_name(file_name: Option<&str>) -> String {
    let Some(name) = file_name.filter(|name| !name.is_empty()) else {
        return UNTITLED_EXPORT_NAME.to_string();
    };
    let split = name.len().saturating_sub(PDF_SUFFIX.len());
    let base = match name.get(split..) {
        Some(suffix) if suffix.eq_ignore_ascii_case(PDF_SUFFIX) => &name[..split],
        _ => name,
    };
    format!("{base}.json")
}

pub fn export_json(fields: &FieldMap) -> AppResult<String> {
    Ok(serde_json::to_string_pretty(fields)?)
}

pub fn write_export(directory: &Path, file_name: &str, json: &str) -> AppResult<PathBuf> {
    let path = directory.join(file_name);
    fs::write(&path, json).map_err(|err| {
        AppError::io_with_context(err, format!("failed to write export {}", path.display()))
    })?;
    Ok(path)
}

/// Serializes and writes the field map. An empty map is refused.
pub fn export_fields(
    fields: &FieldMap,
    file_name: Option<&str>,
    directory: &Path,
) -> AppResult<PathBuf> {
    if fields.is_empty() {
        return Err(AppError::invalid_argument("there are no fields to export"));
    }
    let json = export_json(fields)?;
    let path = write_export(directory, &export_file_name(file_name), &json)?;
    tracing::info!(path = %path.display(), "fields exported");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use crate::error::AppError;
    use crate::fields::{FieldKey, FieldMap};

    use super::{export_fields, export_file_name, export_json};

    #[test]
    fn file_name_strips_pdf_suffix_case_insensitively() {
        assert_eq!(export_file_name(Some("Invoice.PDF")), "Invoice.json");
        assert_eq!(export_file_name(Some("report.pdf")), "report.json");
        assert_eq!(export_file_name(Some("notes.txt")), "notes.txt.json");
        assert_eq!(export_file_name(Some("a.pdf.pdf")), "a.pdf.json");
        assert_eq!(export_file_name(Some("pdf")), "pdf.json");
        assert_eq!(export_file_name(Some("счёт.pdf")), "счёт.json");
        assert_eq!(export_file_name(None), "untitled.json");
        assert_eq!(export_file_name(Some("")), "untitled.json");
    }

    #[test]
    fn json_is_pretty_with_two_space_indent_in_field_order() {
        let mut fields = FieldMap::new();
        fields.set_field(FieldKey::AmountDue, "€195.00");
        fields.set_field(FieldKey::InvoiceNumber, "336EB2B70001");
        let json = export_json(&fields).expect("fields should serialize");
        assert_eq!(
            json,
            "{\n  \"invoice_number\": \"336EB2B70001\",\n  \"amount_due\": \"€195.00\"\n}"
        );
    }

    #[test]
    fn export_fields_writes_file_into_directory() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let path = export_fields(&FieldMap::sample(), Some("Invoice.PDF"), dir.path())
            .expect("export should succeed");
        assert_eq!(path, dir.path().join("Invoice.json"));

        let written = fs::read_to_string(&path).expect("export should exist");
        let parsed: FieldMap = serde_json::from_str(&written).expect("export should parse");
        assert_eq!(parsed, FieldMap::sample());
    }

    #[test]
    fn empty_field_map_is_refused() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let result = export_fields(&FieldMap::new(), Some("a.pdf"), dir.path());
        assert!(matches!(result, Err(AppError::InvalidArgument(_))));
        assert!(!dir.path().join("a.json").exists());
    }
}
