use super::{document, escape};
use crate::domain::Page;

struct Member {
    name: &'static str,
    role: &'static str,
    expertise: &'static str,
    experience: &'static str,
    photo: &'static str,
    description: &'static str,
    linkedin: &'static str,
    github: &'static str,
    web: Option<&'static str>,
}

const MEMBERS: [Member; 3] = [
    Member {
        name: "Jaime Pergueza",
        role: "Full Stack Developer & Team Lead",
        expertise: "React, Node.js, IA/ML, Python",
        experience: "5+ años",
        photo: "/static/team/jaime.svg",
        description: "Líder técnico especializado en desarrollo full stack y implementación de soluciones de inteligencia artificial para el sector financiero.",
        linkedin: "https://www.linkedin.com/in/jaime-pergueza-40768a375/",
        github: "https://github.com/jaimepergueza",
        web: None,
    },
    Member {
        name: "Edison López",
        role: "Data Scientist & AI Engineer",
        expertise: "Machine Learning, Python, NLP, TensorFlow",
        experience: "4+ años",
        photo: "/static/team/edison.svg",
        description: "Científico de datos con experiencia en algoritmos de aprendizaje automático y procesamiento de lenguaje natural para análisis de riesgo crediticio.",
        linkedin: "https://www.linkedin.com/in/edison-l%C3%B3pez-6b69b4343/",
        github: "https://github.com/edisonvargas",
        web: None,
    },
    Member {
        name: "Geovanny Basantes",
        role: "CISO y Project Manager",
        expertise: "Ciberseguridad, Gestión de Proyectos, DevSecOps",
        experience: "3+ años",
        photo: "/static/team/geovanny.svg",
        description: "Desarrollador Full Stack con 3 años de experiencia, especializado en seguridad de la información y gestión de proyectos tecnológicos.",
        linkedin: "https://www.linkedin.com/in/geovanny-basantes-0471b123a/",
        github: "https://github.com/COMPUMAX-EC",
        web: Some("https://compumax.tech"),
    },
];

const VALUES: [(&str, &str, &str); 3] = [
    (
        "🚀",
        "Innovación",
        "Buscamos constantemente nuevas formas de resolver problemas complejos con tecnología de vanguardia.",
    ),
    (
        "🤝",
        "Colaboración",
        "Trabajamos en equipo, combinando nuestras fortalezas para crear soluciones excepcionales.",
    ),
    (
        "🎯",
        "Impacto",
        "Nos enfocamos en crear tecnología que genere un impacto positivo y real en la sociedad.",
    ),
];

fn icon_link(href: &str, title: &str, icon: &str) -> String {
    format!(
        r#"<a href="{}" target="_blank" rel="noopener noreferrer" title="{title}"><img src="{icon}" alt="{title}" width="32" height="32"></a>"#,
        escape(href)
    )
}

fn member_card(m: &Member) -> String {
    let mut links = vec![
        icon_link(m.linkedin, "LinkedIn", "/static/icons/linkedin.svg"),
        icon_link(m.github, "GitHub", "/static/icons/github.svg"),
    ];
    if let Some(web) = m.web {
        links.push(icon_link(web, "Sitio Web", "/static/icons/globe.svg"));
    }

    format!(
        r#"<div class="card">
<img src="{photo}" alt="{name}" width="80" height="80">
<h3>{name}</h3>
<p style="color:#0d9488">{role}</p>
<p class="muted" style="padding:0;text-align:left">{experience} de experiencia</p>
<p>{description}</p>
<div><h4>Especialidades:</h4><p>{expertise}</p></div>
<div class="social">{links}</div>
</div>"#,
        photo = m.photo,
        name = escape(m.name),
        role = escape(m.role),
        experience = m.experience,
        description = m.description,
        expertise = m.expertise,
        links = links.join(""),
    )
}

pub fn page() -> String {
    let members: String = MEMBERS.iter().map(member_card).collect();
    let values: String = VALUES
        .iter()
        .map(|(icon, title, text)| {
            format!(r#"<div style="text-align:center"><span>{icon}</span><h3>{title}</h3><p>{text}</p></div>"#)
        })
        .collect();

    let body = format!(
        r#"<section style="text-align:center">
<p class="badge">Conoce a FINOVA</p>
<h1>Nuestro Equipo de <span style="color:#0d9488">Innovación</span></h1>
<p>Somos un equipo multidisciplinario de desarrolladores y especialistas en IA, comprometidos con crear soluciones tecnológicas innovadoras que transformen las finanzas.</p>
</section>
<div class="grid">{members}</div>
<div class="card"><h2 style="text-align:center">Nuestros Valores</h2><div class="grid">{values}</div></div>
<div class="card" style="background:#111827;color:#fff">
<h2 style="text-align:center">Stack Tecnológico</h2>
<div class="grid"><div><h4>Backend</h4><p>Rust / axum</p><p>tokio</p></div><div><h4>DevOps</h4><p>GCP</p></div></div>
</div>"#
    );

    document(Page::Equipo, None, &body)
}
