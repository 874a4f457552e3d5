//! Tender flow ("Licitaciones IA"): one uploaded file in, a fixed mock
//! analysis out.

use serde::Serialize;

use super::analysis::InputCollector;
use super::risk::{Percentage, RiskLevel};

/// Handle to the file the visitor picked. Contents are never kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectedFile {
    pub name: String,
    pub size_bytes: u64,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            size_bytes,
        }
    }

    /// Size in MiB with two decimals, e.g. `2.00 MB`.
    pub fn size_label(&self) -> String {
        format!("{:.2} MB", self.size_bytes as f64 / 1024.0 / 1024.0)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct TenderInput {
    file: Option<SelectedFile>,
}

impl TenderInput {
    pub fn set_file(&mut self, file: SelectedFile) {
        self.file = Some(file);
    }

    pub fn file(&self) -> Option<&SelectedFile> {
        self.file.as_ref()
    }

    pub fn is_ready(&self) -> bool {
        self.file.is_some()
    }
}

impl InputCollector for TenderInput {
    type Snapshot = SelectedFile;

    const FLOW: &'static str = "tender";

    fn is_ready(&self) -> bool {
        TenderInput::is_ready(self)
    }

    fn snapshot(&self) -> Option<SelectedFile> {
        self.file.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TenderResult {
    pub document_type: String,
    pub risk_level: RiskLevel,
    pub legal_compliance: Percentage,
    pub technical_compliance: Percentage,
    pub recommendations: Vec<String>,
    pub estimated_processing_time: String,
    pub traditional_time: String,
}

impl TenderResult {
    /// The canned analysis every tender upload produces.
    pub fn mock() -> Self {
        Self {
            document_type: "Licitación Pública de Infraestructura".to_string(),
            risk_level: RiskLevel::Medium,
            technical_compliance: Percentage::clamped(85),
            legal_compliance: Percentage::clamped(92),
            recommendations: vec![
                "Revisar cláusulas de penalización por retraso".to_string(),
                "Verificar certificaciones técnicas del proveedor".to_string(),
                "Evaluar garantías de cumplimiento".to_string(),
            ],
            estimated_processing_time: "2.5 horas".to_string(),
            traditional_time: "8-12 horas".to_string(),
        }
    }
}

/// Input snapshot is ignored: the mock does not look at the file.
pub fn analyze(_file: &SelectedFile) -> TenderResult {
    TenderResult::mock()
}
