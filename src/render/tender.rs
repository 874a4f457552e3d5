//! Tender demo page (`/reto1`).

use super::{document, escape, submit_button};
use crate::domain::{AnalysisState, Page, TenderResult};
use crate::services::views::TenderView;

const FEATURES: [(&str, &str, &str); 4] = [
    ("📄", "Análisis Automático", "Procesamiento inteligente de documentos legales y técnicos"),
    ("⚠️", "Detección de Riesgos", "Identificación automática de cláusulas problemáticas"),
    ("⚖️", "Comparación Inteligente", "Evaluación objetiva entre múltiples propuestas"),
    ("⚡", "Optimización de Tiempo", "Reducción significativa en tiempos de evaluación"),
];

const IMPACT: [(&str, &str); 3] = [
    ("75%", "Reducción en tiempo de análisis"),
    ("90%", "Menos errores humanos"),
    ("60%", "Mejora en transparencia"),
];

pub fn page(view: &TenderView) -> String {
    let running = view.analysis.is_running();
    let view_id = view.id;

    let selected = view
        .input
        .file()
        .map(|file| {
            format!(
                r#"<div class="selected-file" style="background:#eff6ff;padding:1rem;border-radius:.5rem;margin:1rem 0">
<p style="color:#1e40af;font-weight:500">📄 {}</p>
<p style="color:#2563eb;font-size:.875rem">{}</p>
</div>"#,
                escape(&file.name),
                file.size_label()
            )
        })
        .unwrap_or_default();

    let button_label = if running { "Analizando..." } else { "Analizar con IA" };

    let features: String = FEATURES
        .iter()
        .map(|(icon, title, text)| {
            format!(r#"<div style="text-align:center"><span>{icon}</span><h3>{title}</h3><p>{text}</p></div>"#)
        })
        .collect();
    let impact: String = IMPACT
        .iter()
        .map(|(figure, text)| format!("<div><p><strong>{figure}</strong></p><p>{text}</p></div>"))
        .collect();

    let body = format!(
        r#"<div style="text-align:center">
<h1>Optimización Inteligente en Procesos de Licitación</h1>
<p>Nuestra solución de IA analiza documentos de licitación automáticamente, detecta riesgos y facilita la toma de decisiones informadas.</p>
</div>
<div class="grid">
<div class="card">
<h2>Análisis de Documento</h2>
<form method="post" action="/reto1/upload?view={view_id}" enctype="multipart/form-data" style="border:2px dashed #d1d5db;border-radius:.5rem;padding:2rem;text-align:center">
<label for="file-upload">Arrastra tu documento de licitación aquí o haz clic para subir</label>
<input type="file" name="file" id="file-upload" accept=".pdf,.docx,.doc">
<p style="font-size:.875rem;color:#9ca3af">Soporta PDF, DOCX, DOC</p>
<button type="submit">Cargar documento</button>
</form>
{selected}
<form method="post" action="/reto1/analyze?view={view_id}">
{button}
</form>
</div>
<div class="card">
<h2>Resultados del Análisis</h2>
{results}
</div>
</div>
<div class="card">
<h2 style="text-align:center">Características de la Solución</h2>
<div class="grid">{features}</div>
</div>
<div class="card" style="background:#2563eb;color:#fff;text-align:center">
<h2>Impacto Esperado</h2>
<div class="grid">{impact}</div>
</div>"#,
        button = submit_button(button_label, view.is_submittable(), None),
        results = result_panel(view.analysis.state()),
    );

    document(Page::Reto1, running.then_some(1), &body)
}

/// Right-hand panel: placeholder, busy indicator or the full result.
pub fn result_panel(state: &AnalysisState<TenderResult>) -> String {
    match state {
        AnalysisState::Idle => {
            r#"<div class="muted"><p>Sube un documento para ver los resultados del análisis de IA</p></div>"#
                .to_string()
        }
        AnalysisState::Running => r#"<div class="busy" style="text-align:center;padding:2rem 0">
<div class="spinner"></div>
<p>Analizando documento con IA...</p>
</div>"#
            .to_string(),
        AnalysisState::Completed(result) => completed(result),
    }
}

fn completed(result: &TenderResult) -> String {
    let recommendations: String = result
        .recommendations
        .iter()
        .map(|rec| format!("<li>• {}</li>", escape(rec)))
        .collect();

    format!(
        r#"<div class="result">
<div><h3>Tipo de Documento</h3><p class="document-type">{document_type}</p></div>
<div class="grid">
<div><h4>Cumplimiento Legal</h4><p class="legal-compliance"><strong>{legal}</strong></p></div>
<div><h4>Cumplimiento Técnico</h4><p class="technical-compliance"><strong>{technical}</strong></p></div>
</div>
<div><h4>Nivel de Riesgo</h4><span class="badge risk-medium risk-level">{risk}</span></div>
<div><h4>Recomendaciones</h4><ul>{recommendations}</ul></div>
<div style="background:#f0fdf4;padding:1rem;border-radius:.5rem">
<h4>Eficiencia</h4>
<p><strong>Tiempo con IA:</strong> {ai_time}</p>
<p><strong>Tiempo tradicional:</strong> {traditional}</p>
<p>⚡ Reducción del 75% en tiempo de análisis</p>
</div>
</div>"#,
        document_type = escape(&result.document_type),
        legal = result.legal_compliance,
        technical = result.technical_compliance,
        risk = result.risk_level,
        ai_time = escape(&result.estimated_processing_time),
        traditional = escape(&result.traditional_time),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SelectedFile;
    use uuid::Uuid;

    #[test]
    fn idle_page_has_disabled_button_and_placeholder() {
        let view = TenderView::new(Uuid::new_v4());
        let html = page(&view);
        assert!(html.contains("<button type=\"submit\" disabled>Analizar con IA</button>"));
        assert!(html.contains("Sube un documento para ver los resultados"));
        assert!(html.contains(r#"<span class="finova-nav-current">Licitaciones IA</span>"#));
        assert!(!html.contains("http-equiv"));
    }

    #[test]
    fn selected_file_enables_analysis() {
        let mut view = TenderView::new(Uuid::new_v4());
        view.edit_input(|input| input.set_file(SelectedFile::new("<tender>.pdf", 2 * 1024 * 1024)));

        let html = page(&view);
        assert!(html.contains("<button type=\"submit\">Analizar con IA</button>"));
        assert!(html.contains("&lt;tender&gt;.pdf"));
        assert!(html.contains("2.00 MB"));
    }

    #[test]
    fn running_page_shows_spinner_and_refreshes() {
        let mut view = TenderView::new(Uuid::new_v4());
        view.edit_input(|input| input.set_file(SelectedFile::new("tender.pdf", 1)));
        view.analysis.begin(true).unwrap();

        let html = page(&view);
        assert!(html.contains("Analizando documento con IA..."));
        assert!(html.contains("<button type=\"submit\" disabled>Analizando...</button>"));
        assert!(html.contains(r#"http-equiv="refresh""#));
    }

    #[test]
    fn completed_panel_renders_every_field() {
        let html = result_panel(&AnalysisState::Completed(TenderResult::mock()));
        assert!(html.contains("Licitación Pública de Infraestructura"));
        assert!(html.contains("<strong>92%</strong>"));
        assert!(html.contains("<strong>85%</strong>"));
        assert!(html.contains(">Medio</span>"));
        assert!(html.contains("Evaluar garantías de cumplimiento"));
        assert!(html.contains("2.5 horas"));
        assert!(html.contains("8-12 horas"));
    }
}
