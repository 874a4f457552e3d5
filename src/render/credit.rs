//! Credit demo page (`/reto2`).

use super::{document, escape, format_thousands, percent_bar, submit_button};
use crate::domain::credit::{DIGITAL_PRESENCE_TIERS, REFERENCE_TIERS, SECTORS};
use crate::domain::{AnalysisState, CreditField, CreditForm, CreditResult, Page, RiskLevel};
use crate::services::views::CreditView;

const DATA_SOURCES: [(&str, &str, &str); 4] = [
    ("🌐", "Presencia Digital", "Análisis de redes sociales, sitio web y reseñas online"),
    ("🤝", "Referencias Comerciales", "Historial con proveedores y clientes"),
    ("📊", "Actividad Financiera", "Patrones de transacciones y flujo de caja"),
    ("📱", "Datos de Comportamiento", "Patrones de uso de servicios digitales"),
];

const IMPACT: [(&str, &str); 3] = [
    ("40%", "Más PYMEs con acceso a crédito"),
    ("80%", "Reducción en tiempo de evaluación"),
    ("65%", "Mejor precisión en evaluación"),
];

fn text_input(
    form: &CreditForm,
    field: CreditField,
    label: &str,
    kind: &str,
    placeholder: &str,
) -> String {
    let min = if kind == "number" { r#" min="0""# } else { "" };
    format!(
        r#"<label for="{name}">{label}</label>
<input type="{kind}" id="{name}" name="{name}" value="{value}" placeholder="{placeholder}"{min}>"#,
        name = field.wire_name(),
        value = escape(form.get(field)),
    )
}

fn select(
    field: CreditField,
    current: &str,
    label: &str,
    empty: &str,
    options: &[(&str, &str)],
) -> String {
    let options: String = options
        .iter()
        .map(|(value, text)| {
            let selected = if *value == current { " selected" } else { "" };
            format!(r#"<option value="{value}"{selected}>{text}</option>"#)
        })
        .collect();
    format!(
        r#"<label for="{name}">{label}</label>
<select id="{name}" name="{name}"><option value="">{empty}</option>{options}</select>"#,
        name = field.wire_name(),
    )
}

fn form_fields(form: &CreditForm) -> String {
    [
        text_input(
            form,
            CreditField::CompanyName,
            "Nombre de la Empresa",
            "text",
            "Ej. Distribuidora Los Andes EIRL",
        ),
        select(
            CreditField::Sector,
            &form.sector,
            "Sector de Actividad",
            "Seleccionar sector",
            &SECTORS,
        ),
        text_input(
            form,
            CreditField::YearsInBusiness,
            "Años en el Negocio",
            "number",
            "Ej. 5",
        ),
        text_input(
            form,
            CreditField::MonthlyRevenue,
            "Ingresos Mensuales Promedio (USD)",
            "number",
            "Ej. 15000",
        ),
        select(
            CreditField::DigitalPresence,
            &form.digital_presence,
            "Presencia Digital",
            "Seleccionar nivel",
            &DIGITAL_PRESENCE_TIERS,
        ),
        select(
            CreditField::CommercialReferences,
            &form.commercial_references,
            "Referencias Comerciales",
            "Seleccionar cantidad",
            &REFERENCE_TIERS,
        ),
    ]
    .join("\n")
}

pub fn page(view: &CreditView) -> String {
    let running = view.analysis.is_running();
    let view_id = view.id;
    let button_label = if running { "Evaluando Riesgo..." } else { "Evaluar con IA" };
    let analyze_url = format!("/reto2/analyze?view={view_id}");

    let sources: String = DATA_SOURCES
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
<h1>Evaluación Inteligente de Riesgo Financiero para PYMEs</h1>
<p>Utilizamos IA para evaluar el riesgo crediticio usando información alternativa, democratizando el acceso al crédito para pequeñas y medianas empresas.</p>
</div>
<div class="grid">
<div class="card">
<h2>Datos de la Empresa</h2>
<form method="post" action="/reto2/form?view={view_id}">
{fields}
<p><button type="submit" style="background:#6b7280">Guardar datos</button></p>
{button}
</form>
</div>
<div class="card">
<h2>Evaluación de Riesgo</h2>
{results}
</div>
</div>
<div class="card">
<h2 style="text-align:center">Fuentes de Datos Alternativos</h2>
<div class="grid">{sources}</div>
</div>
<div class="card" style="background:#7c3aed;color:#fff;text-align:center">
<h2>Impacto Social</h2>
<div class="grid">{impact}</div>
</div>"#,
        fields = form_fields(&view.input),
        button = submit_button(button_label, view.is_submittable(), Some(&analyze_url)),
        results = result_panel(view.analysis.state()),
    );

    document(Page::Reto2, running.then_some(1), &body)
}

/// Right-hand panel: placeholder, busy indicator or the full assessment.
pub fn result_panel(state: &AnalysisState<CreditResult>) -> String {
    match state {
        AnalysisState::Idle => {
            r#"<div class="muted"><p>Completa el formulario para ver la evaluación de riesgo con IA</p></div>"#
                .to_string()
        }
        AnalysisState::Running => r#"<div class="busy" style="text-align:center;padding:2rem 0">
<div class="spinner" style="border-bottom-color:#7c3aed"></div>
<p>Analizando perfil crediticio con IA...</p>
</div>"#
            .to_string(),
        AnalysisState::Completed(result) => completed(result),
    }
}

fn risk_class(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::Low => "risk-low",
        RiskLevel::Medium => "risk-medium",
        RiskLevel::High => "risk-high",
    }
}

fn completed(result: &CreditResult) -> String {
    let amount = result
        .recommended_amount
        .map(|amount| format!("${}", format_thousands(amount)))
        .unwrap_or_else(|| "N/D".to_string());

    let factors = [
        percent_bar("Presencia Digital", result.factors.digital_presence),
        percent_bar("Reputación Comercial", result.factors.commercial_reputation),
        percent_bar("Estabilidad del Negocio", result.factors.business_stability),
        percent_bar("Comportamiento Financiero", result.factors.financial_behavior),
    ]
    .join("");

    let recommendations: String = result
        .recommendations
        .iter()
        .map(|rec| format!("<li>• {}</li>", escape(rec)))
        .collect();

    format!(
        r#"<div class="result">
<div style="text-align:center;background:#f9fafb;padding:1.5rem;border-radius:.5rem">
<h3>SCORE CREDITICIO IA</h3>
<p class="credit-score" style="font-size:2.25rem;font-weight:700;color:#7c3aed">{score}</p>
<span class="badge {risk_class}">Riesgo {risk}</span>
</div>
<div class="grid">
<div><h4>Probabilidad de Aprobación</h4><p class="approval-probability"><strong>{approval}</strong></p></div>
<div><h4>Tasa Sugerida</h4><p class="interest-rate"><strong>{rate}%</strong></p></div>
</div>
<div style="background:#f5f3ff;padding:1rem;border-radius:.5rem">
<h4>Monto Recomendado</h4>
<p class="recommended-amount"><strong>{amount}</strong></p>
<p>Basado en capacidad de pago estimada</p>
</div>
<div><h4>Factores de Evaluación</h4>{factors}</div>
<div><h4>Recomendaciones para Mejorar</h4><ul>{recommendations}</ul></div>
</div>"#,
        score = result.credit_score,
        risk_class = risk_class(result.risk_level),
        risk = result.risk_level,
        approval = result.approval_probability,
        rate = result.interest_rate,
    )
}
