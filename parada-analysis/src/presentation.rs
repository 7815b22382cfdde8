//! Maps probabilities and trends to the display vocabulary used by the UI:
//! tier levels, Tailwind color classes and Portuguese status messages.

use crate::trend::TrendDirection;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProbabilityLevel {
    Excellent,
    Good,
    Moderate,
    Low,
    VeryLow,
}

/// Everything the UI needs to render one probability value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbabilityStyle {
    pub level: ProbabilityLevel,
    pub text_color: &'static str,
    pub bg_color: &'static str,
    pub message: &'static str,
}

pub fn level(probability: f64) -> ProbabilityLevel {
    if probability >= 80.0 {
        ProbabilityLevel::Excellent
    } else if probability >= 60.0 {
        ProbabilityLevel::Good
    } else if probability >= 40.0 {
        ProbabilityLevel::Moderate
    } else if probability >= 20.0 {
        ProbabilityLevel::Low
    } else {
        ProbabilityLevel::VeryLow
    }
}

pub fn text_color(probability: f64) -> &'static str {
    match level(probability) {
        ProbabilityLevel::Excellent => "text-green-600",
        ProbabilityLevel::Good => "text-blue-600",
        ProbabilityLevel::Moderate => "text-yellow-600",
        ProbabilityLevel::Low => "text-orange-600",
        ProbabilityLevel::VeryLow => "text-red-600",
    }
}

pub fn bg_color(probability: f64) -> &'static str {
    match level(probability) {
        ProbabilityLevel::Excellent => "bg-green-50 dark:bg-green-950/20 border-green-500",
        ProbabilityLevel::Good => "bg-blue-50 dark:bg-blue-950/20 border-blue-500",
        ProbabilityLevel::Moderate => "bg-yellow-50 dark:bg-yellow-950/20 border-yellow-500",
        ProbabilityLevel::Low => "bg-orange-50 dark:bg-orange-950/20 border-orange-500",
        ProbabilityLevel::VeryLow => "bg-red-50 dark:bg-red-950/20 border-red-500",
    }
}

pub fn message(probability: f64) -> &'static str {
    match level(probability) {
        ProbabilityLevel::Excellent => "🌟 EXCELENTE! Altíssima probabilidade de clima perfeito!",
        ProbabilityLevel::Good => "👍 BOA probabilidade de clima favorável!",
        ProbabilityLevel::Moderate => "⚡ Probabilidade MODERADA - tenha um plano B!",
        ProbabilityLevel::Low => "⚠️ Probabilidade BAIXA - considere outra data!",
        ProbabilityLevel::VeryLow => "🚨 ALERTA! Muito improvável ter clima adequado!",
    }
}

pub fn style(probability: f64) -> ProbabilityStyle {
    ProbabilityStyle {
        level: level(probability),
        text_color: text_color(probability),
        bg_color: bg_color(probability),
        message: message(probability),
    }
}

/// Rendered form of a trend comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendStyle {
    pub emoji: &'static str,
    pub color: &'static str,
    pub message: String,
}

pub fn trend_style(direction: TrendDirection, difference: f64) -> TrendStyle {
    match direction {
        TrendDirection::Positive => TrendStyle {
            emoji: "📈",
            color: "text-green-700 dark:text-green-300",
            message: format!(
                "Tendência positiva! O clima está {:.1}% mais favorável nos últimos anos.",
                difference
            ),
        },
        TrendDirection::Negative => TrendStyle {
            emoji: "📉",
            color: "text-orange-700 dark:text-orange-300",
            message: format!(
                "Tendência negativa. O clima está {:.1}% menos favorável nos últimos anos.",
                difference
            ),
        },
        TrendDirection::Stable => TrendStyle {
            emoji: "➡️",
            color: "text-blue-700 dark:text-blue-300",
            message: "Clima estável. Não há mudança significativa entre os períodos recentes e históricos."
                .to_string(),
        },
    }
}

pub fn format_percentage(probability: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, probability)
}

pub fn format_year_count(ideal_years: u32, total_years: u32) -> String {
    format!("{} de {} anos", ideal_years, total_years)
}
