use serde::Serialize;

/// The four top-level pages of the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    Inicio,
    Reto1,
    Reto2,
    Equipo,
}

impl Page {
    pub const ALL: [Page; 4] = [Self::Inicio, Self::Reto1, Self::Reto2, Self::Equipo];

    pub fn path(self) -> &'static str {
        match self {
            Self::Inicio => "/",
            Self::Reto1 => "/reto1",
            Self::Reto2 => "/reto2",
            Self::Equipo => "/equipo",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Inicio => "Inicio",
            Self::Reto1 => "Licitaciones IA",
            Self::Reto2 => "Crédito PYME IA",
            Self::Equipo => "Equipo",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Inicio => "FINOVA | Innovando hoy, transformando finanzas",
            Self::Reto1 => "FINOVA | Licitaciones Inteligentes",
            Self::Reto2 => "FINOVA | Crédito PYME IA",
            Self::Equipo => "FINOVA | Equipo",
        }
    }
}
