use super::document;
use crate::domain::Page;

struct Problem {
    title: &'static str,
    problem: &'static str,
    impacts: [&'static str; 4],
}

struct Solution {
    title: &'static str,
    points: [(&'static str, &'static str); 4],
    outcome: &'static str,
    demo: Page,
}

const PROBLEMS: [Problem; 2] = [
    Problem {
        title: "Licitaciones Ineficientes",
        problem: "Los procesos de licitación son largos, propensos a errores humanos y carecen de transparencia.",
        impacts: [
            "8-12 horas para evaluar una propuesta",
            "40% de errores en evaluación manual",
            "Falta de criterios objetivos unificados",
            "Retrasos en adjudicaciones importantes",
        ],
    },
    Problem {
        title: "Exclusión Financiera de PYMEs",
        problem: "Las PYMEs no pueden acceder a créditos por falta de historial crediticio formal.",
        impacts: [
            "60% de PYMEs sin acceso a crédito",
            "Evaluación basada solo en garantías",
            "Empresas rentables excluidas del sistema",
            "Limitación del crecimiento económico",
        ],
    },
];

const SOLUTIONS: [Solution; 2] = [
    Solution {
        title: "IA para Licitaciones Inteligentes",
        points: [
            ("NLP avanzado", "para análisis automático de documentos"),
            ("Machine Learning", "para detección de riesgos y anomalías"),
            ("Algoritmos de scoring", "para evaluación objetiva"),
            ("Dashboard intuitivo", "para toma de decisiones"),
        ],
        outcome: "75% menos tiempo, 90% menos errores",
        demo: Page::Reto1,
    },
    Solution {
        title: "IA para Crédito Inclusivo",
        points: [
            ("Datos alternativos", "de redes sociales y reputación digital"),
            ("Análisis de comportamiento", "comercial y transaccional"),
            ("Modelos predictivos", "para evaluación de riesgo"),
            ("Scoring dinámico", "que se actualiza en tiempo real"),
        ],
        outcome: "40% más PYMEs con acceso a crédito",
        demo: Page::Reto2,
    },
];

const METHODOLOGY: [(&str, &str); 4] = [
    ("1. Investigación", "Análisis profundo del problema y sus stakeholders"),
    ("2. Diseño IA", "Arquitectura de modelos de machine learning especializados"),
    ("3. Desarrollo", "Implementación ágil con tecnologías de vanguardia"),
    ("4. Validación", "Pruebas exhaustivas y métricas de impacto real"),
];

pub fn page() -> String {
    let problems: String = PROBLEMS
        .iter()
        .map(|p| {
            let impacts: String = p
                .impacts
                .iter()
                .map(|i| format!("<li>• {i}</li>"))
                .collect();
            format!(
                r#"<div class="card"><h4>{}</h4><p><strong>Problema:</strong> {}</p><p><strong>Impacto:</strong></p><ul>{impacts}</ul></div>"#,
                p.title, p.problem
            )
        })
        .collect();

    let solutions: String = SOLUTIONS
        .iter()
        .map(|s| {
            let points: String = s
                .points
                .iter()
                .map(|(lead, rest)| format!("<li>✓ <strong>{lead}</strong> {rest}</li>"))
                .collect();
            format!(
                r#"<div class="card"><h4>{}</h4><h5>Cómo lo resolvimos:</h5><ul>{points}</ul><p><strong>Resultado:</strong> {}</p><a href="{}">Ver Demo Completa</a></div>"#,
                s.title,
                s.outcome,
                s.demo.path()
            )
        })
        .collect();

    let steps: String = METHODOLOGY
        .iter()
        .map(|(title, text)| format!(r#"<div class="card"><h4>{title}</h4><p>{text}</p></div>"#))
        .collect();

    let body = format!(
        r##"<section style="text-align:center">
<p class="badge" style="border:2px solid #1FAA59;color:#0D3B66">Innovando hoy, transformando finanzas</p>
<h2 style="color:#0D3B66">Código que impulsa tu futuro <span style="color:#1FAA59">financiero</span></h2>
<p>Desarrollamos soluciones de IA para resolver problemas críticos en licitaciones públicas y evaluación crediticia, democratizando el acceso a procesos más eficientes y justos.</p>
<p><a href="#soluciones">Ver Soluciones</a> · <a href="{team}">Conocer Equipo</a></p>
</section>
<section>
<h3>Los Problemas Que Identificamos</h3>
<p>Desafíos críticos que requieren soluciones innovadoras</p>
<div class="grid">{problems}</div>
</section>
<section id="soluciones">
<h3>Nuestra Solución con IA</h3>
<p>Tecnología de vanguardia para problemas financieros complejos</p>
<div class="grid">{solutions}</div>
</section>
<section>
<h3>Nuestra Metodología</h3>
<div class="grid">{steps}</div>
</section>
<section style="text-align:center">
<h3>¿Listo para Ver la IA en Acción?</h3>
<p>Explora nuestras demos interactivas y descubre cómo la inteligencia artificial puede transformar industrias completas.</p>
<p><a href="{reto1}">Demo: Licitaciones Inteligentes</a> · <a href="{reto2}">Demo: Crédito Inclusivo</a> · <a href="{team}">Conoce al Equipo</a></p>
</section>"##,
        team = Page::Equipo.path(),
        reto1 = Page::Reto1.path(),
        reto2 = Page::Reto2.path(),
    );

    document(Page::Inicio, None, &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn landing_links_to_both_demos_and_team() {
        let html = page();
        assert!(html.contains(r#"<span class="finova-nav-current">Inicio</span>"#));
        assert!(html.contains("Demo: Licitaciones Inteligentes"));
        assert!(html.contains(r#"href="/reto2""#));
        assert!(html.contains(r#"href="/equipo""#));
    }
}
