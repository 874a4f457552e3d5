//! Domain types for the two demo flows and the site's pages.

pub mod analysis;
pub mod credit;
pub mod pages;
pub mod random;
pub mod risk;
pub mod tender;

// Re-export commonly used types
pub use analysis::{AnalysisError, AnalysisMachine, AnalysisState, InputCollector};
pub use credit::{CreditField, CreditForm, CreditResult};
pub use pages::Page;
pub use random::{RandomSource, ThreadRandom};
pub use risk::{Percentage, RiskLevel};
pub use tender::{SelectedFile, TenderInput, TenderResult};
