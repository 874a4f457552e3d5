//! Credit flow ("Crédito PYME IA"): a company form in, a pseudo-random
//! risk assessment out.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::analysis::InputCollector;
use super::random::RandomSource;
use super::risk::{Percentage, RiskLevel};

/// Named fields of the company form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CreditField {
    CompanyName,
    Sector,
    YearsInBusiness,
    MonthlyRevenue,
    DigitalPresence,
    CommercialReferences,
}

impl CreditField {
    pub const ALL: [CreditField; 6] = [
        Self::CompanyName,
        Self::Sector,
        Self::YearsInBusiness,
        Self::MonthlyRevenue,
        Self::DigitalPresence,
        Self::CommercialReferences,
    ];

    /// Name used in HTML forms and JSON.
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::CompanyName => "companyName",
            Self::Sector => "sector",
            Self::YearsInBusiness => "yearsInBusiness",
            Self::MonthlyRevenue => "monthlyRevenue",
            Self::DigitalPresence => "digitalPresence",
            Self::CommercialReferences => "commercialReferences",
        }
    }

    pub fn is_required(self) -> bool {
        !matches!(self, Self::DigitalPresence | Self::CommercialReferences)
    }
}

impl FromStr for CreditField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.wire_name() == s)
            .ok_or_else(|| format!("unknown credit form field '{s}'"))
    }
}

pub const SECTORS: [(&str, &str); 6] = [
    ("comercio", "Comercio"),
    ("servicios", "Servicios"),
    ("manufactura", "Manufactura"),
    ("agricultura", "Agricultura"),
    ("construccion", "Construcción"),
    ("tecnologia", "Tecnología"),
];

pub const DIGITAL_PRESENCE_TIERS: [(&str, &str); 3] = [
    ("alta", "Alta (Redes sociales, web, reseñas)"),
    ("media", "Media (Algunas redes sociales)"),
    ("baja", "Baja (Presencia mínima)"),
];

pub const REFERENCE_TIERS: [(&str, &str); 3] = [
    ("muchas", "Muchas (5+ proveedores/clientes)"),
    ("algunas", "Algunas (2-4 referencias)"),
    ("pocas", "Pocas (1-2 referencias)"),
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditForm {
    pub company_name: String,
    pub sector: String,
    pub years_in_business: String,
    pub monthly_revenue: String,
    pub digital_presence: String,
    pub commercial_references: String,
}

impl CreditForm {
    pub fn get(&self, field: CreditField) -> &str {
        match field {
            CreditField::CompanyName => &self.company_name,
            CreditField::Sector => &self.sector,
            CreditField::YearsInBusiness => &self.years_in_business,
            CreditField::MonthlyRevenue => &self.monthly_revenue,
            CreditField::DigitalPresence => &self.digital_presence,
            CreditField::CommercialReferences => &self.commercial_references,
        }
    }

    pub fn set(&mut self, field: CreditField, value: impl Into<String>) {
        let slot = match field {
            CreditField::CompanyName => &mut self.company_name,
            CreditField::Sector => &mut self.sector,
            CreditField::YearsInBusiness => &mut self.years_in_business,
            CreditField::MonthlyRevenue => &mut self.monthly_revenue,
            CreditField::DigitalPresence => &mut self.digital_presence,
            CreditField::CommercialReferences => &mut self.commercial_references,
        };
        *slot = value.into();
    }

    /// All four required fields are non-empty. No format checks.
    pub fn is_ready(&self) -> bool {
        CreditField::ALL
            .into_iter()
            .filter(|field| field.is_required())
            .all(|field| !self.get(field).is_empty())
    }
}

impl InputCollector for CreditForm {
    type Snapshot = CreditForm;

    const FLOW: &'static str = "credit";

    fn is_ready(&self) -> bool {
        CreditForm::is_ready(self)
    }

    fn snapshot(&self) -> Option<CreditForm> {
        CreditForm::is_ready(self).then(|| self.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditFactors {
    pub digital_presence: Percentage,
    pub commercial_reputation: Percentage,
    pub business_stability: Percentage,
    pub financial_behavior: Percentage,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditResult {
    pub credit_score: u32,
    pub risk_level: RiskLevel,
    pub approval_probability: Percentage,
    /// `None` when the stated revenue is not a number.
    pub recommended_amount: Option<i64>,
    pub interest_rate: u32,
    pub factors: CreditFactors,
    pub recommendations: Vec<String>,
}

pub const SCORE_RANGE: (u32, u32) = (600, 899);
pub const DIGITAL_PRESENCE_BAND: (u32, u32) = (70, 99);
pub const COMMERCIAL_REPUTATION_BAND: (u32, u32) = (75, 104);
pub const BUSINESS_STABILITY_BAND: (u32, u32) = (70, 94);
pub const FINANCIAL_BEHAVIOR_BAND: (u32, u32) = (80, 99);

pub fn risk_level(score: u32) -> RiskLevel {
    if score >= 750 {
        RiskLevel::Low
    } else if score >= 650 {
        RiskLevel::Medium
    } else {
        RiskLevel::High
    }
}

pub fn approval_probability(score: u32) -> u32 {
    match risk_level(score) {
        RiskLevel::Low => 85,
        RiskLevel::Medium => 65,
        RiskLevel::High => 35,
    }
}

pub fn interest_rate(score: u32) -> u32 {
    match risk_level(score) {
        RiskLevel::Low => 12,
        RiskLevel::Medium => 18,
        RiskLevel::High => 25,
    }
}

/// Leading integer of `raw`, read the way a browser's `parseInt` does:
/// leading whitespace and trailing junk are ignored, and a `0x` prefix
/// switches to hexadecimal.
pub fn parse_leading_int(raw: &str) -> Option<f64> {
    let trimmed = raw.trim_start();
    let (sign, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1.0, &trimmed[1..]),
        Some(b'+') => (1.0, &trimmed[1..]),
        _ => (1.0, trimmed),
    };

    if let Some(hex) = rest.strip_prefix("0x").or_else(|| rest.strip_prefix("0X")) {
        let digits_len = hex.bytes().take_while(u8::is_ascii_hexdigit).count();
        if digits_len == 0 {
            return None;
        }
        let value = hex[..digits_len]
            .chars()
            .filter_map(|c| c.to_digit(16))
            .fold(0.0, |acc, digit| acc * 16.0 + f64::from(digit));
        return Some(sign * value);
    }

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }

    rest[..digits_len].parse::<f64>().ok().map(|v| sign * v)
}

/// Largest amount a JSON client can hold exactly (2^53 - 1).
const MAX_AMOUNT: f64 = 9_007_199_254_740_991.0;

/// 30% of monthly revenue, floored. Amounts beyond what a JSON number holds
/// exactly are treated as unknown.
pub fn recommended_amount(monthly_revenue: &str) -> Option<i64> {
    let revenue = parse_leading_int(monthly_revenue)?;
    let amount = (revenue * 0.3).floor();
    (amount.is_finite() && amount.abs() <= MAX_AMOUNT).then_some(amount as i64)
}

fn draw_band(rng: &dyn RandomSource, (lo, hi): (u32, u32)) -> Percentage {
    Percentage::clamped(rng.draw(lo, hi))
}

/// Produce an assessment from a submitted form snapshot.
///
/// Draw order is fixed: score, then the four factors in declaration order.
pub fn assess(form: &CreditForm, rng: &dyn RandomSource) -> CreditResult {
    let (lo, hi) = SCORE_RANGE;
    let score = rng.draw(lo, hi);

    let factors = CreditFactors {
        digital_presence: draw_band(rng, DIGITAL_PRESENCE_BAND),
        commercial_reputation: draw_band(rng, COMMERCIAL_REPUTATION_BAND),
        business_stability: draw_band(rng, BUSINESS_STABILITY_BAND),
        financial_behavior: draw_band(rng, FINANCIAL_BEHAVIOR_BAND),
    };

    CreditResult {
        credit_score: score,
        risk_level: risk_level(score),
        approval_probability: Percentage::clamped(approval_probability(score)),
        recommended_amount: recommended_amount(&form.monthly_revenue),
        interest_rate: interest_rate(score),
        factors,
        recommendations: vec![
            "Mejorar presencia digital con testimonios de clientes".to_string(),
            "Documentar historial de pagos a proveedores".to_string(),
            "Registrar transacciones comerciales formalmente".to_string(),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::random::testing::ScriptedRandom;

    fn filled_form() -> CreditForm {
        let mut form = CreditForm::default();
        form.set(CreditField::CompanyName, "Distribuidora Los Andes EIRL");
        form.set(CreditField::Sector, "comercio");
        form.set(CreditField::YearsInBusiness, "5");
        form.set(CreditField::MonthlyRevenue, "15000");
        form
    }

    #[test]
    fn ready_needs_all_four_required_fields() {
        let mut form = CreditForm::default();
        assert!(!form.is_ready());

        form.set(CreditField::CompanyName, "ACME");
        form.set(CreditField::Sector, "servicios");
        form.set(CreditField::YearsInBusiness, "3");
        assert!(!form.is_ready());

        form.set(CreditField::MonthlyRevenue, "1000");
        assert!(form.is_ready());

        form.set(CreditField::Sector, "");
        assert!(!form.is_ready());
    }

    #[test]
    fn optional_fields_do_not_affect_readiness() {
        let mut form = filled_form();
        form.set(CreditField::DigitalPresence, "alta");
        assert!(form.is_ready());
        form.set(CreditField::DigitalPresence, "");
        form.set(CreditField::CommercialReferences, "");
        assert!(form.is_ready());
    }

    #[test]
    fn field_names_round_trip_through_wire_names() {
        for field in CreditField::ALL {
            assert_eq!(field.wire_name().parse::<CreditField>(), Ok(field));
        }
        assert!("revenue".parse::<CreditField>().is_err());
    }

    #[test]
    fn thresholds_match_the_demo() {
        assert_eq!(risk_level(750), RiskLevel::Low);
        assert_eq!(risk_level(749), RiskLevel::Medium);
        assert_eq!(risk_level(650), RiskLevel::Medium);
        assert_eq!(risk_level(649), RiskLevel::High);

        assert_eq!(approval_probability(700), 65);
        assert_eq!(interest_rate(700), 18);
        assert_eq!(approval_probability(800), 85);
        assert_eq!(interest_rate(800), 12);
        assert_eq!(approval_probability(600), 35);
        assert_eq!(interest_rate(600), 25);
    }

    #[test]
    fn recommended_amount_is_thirty_percent_floored() {
        assert_eq!(recommended_amount("15000"), Some(4500));
        assert_eq!(recommended_amount("  15000.9"), Some(4500));
        assert_eq!(recommended_amount("1001"), Some(300));
        assert_eq!(recommended_amount("-10"), Some(-3));
        assert_eq!(recommended_amount("abc"), None);
        assert_eq!(recommended_amount(""), None);
    }

    #[test]
    fn out_of_range_revenue_has_no_amount() {
        assert_eq!(recommended_amount(&format!("1{}", "0".repeat(23))), None);
        assert_eq!(recommended_amount(&format!("1{}", "0".repeat(400))), None);
        assert_eq!(recommended_amount("-100000000000000000000000"), None);
        assert_eq!(recommended_amount("20000"), Some(6000));
    }

    #[test]
    fn leading_int_follows_parse_int() {
        assert_eq!(parse_leading_int("  42abc"), Some(42.0));
        assert_eq!(parse_leading_int("+7"), Some(7.0));
        assert_eq!(parse_leading_int("0x1A"), Some(26.0));
        assert_eq!(parse_leading_int("-0X1a"), Some(-26.0));
        assert_eq!(parse_leading_int("0xZZ"), None);
        assert_eq!(parse_leading_int("0"), Some(0.0));
        assert_eq!(parse_leading_int("x1"), None);
    }

    #[test]
    fn score_seven_hundred_is_medium_risk() {
        let rng = ScriptedRandom::new([700, 80, 90, 75, 85]);
        let result = assess(&filled_form(), &rng);

        assert_eq!(result.credit_score, 700);
        assert_eq!(result.risk_level, RiskLevel::Medium);
        assert_eq!(result.approval_probability.value(), 65);
        assert_eq!(result.interest_rate, 18);
        assert_eq!(result.recommended_amount, Some(4500));
        assert_eq!(result.factors.digital_presence.value(), 80);
        assert_eq!(result.factors.commercial_reputation.value(), 90);
        assert_eq!(result.factors.business_stability.value(), 75);
        assert_eq!(result.factors.financial_behavior.value(), 85);
        assert_eq!(result.recommendations.len(), 3);
    }

    #[test]
    fn reputation_above_hundred_is_clamped() {
        let rng = ScriptedRandom::new([760, 99, 104, 94, 99]);
        let result = assess(&filled_form(), &rng);
        assert_eq!(result.factors.commercial_reputation.value(), 100);
        assert_eq!(result.risk_level, RiskLevel::Low);
    }
}
