use crate::criteria::EventCriteria;
use serde::{Deserialize, Serialize};

/// A named, described bundle of event criteria, identified by a stable key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventProfile {
    pub key: String,
    pub name: String,
    pub description: String,
    pub criteria: EventCriteria,
}

/// How the criteria for an analysis request are chosen.
///
/// The builtin registry is never mutated at runtime; user-edited and
/// machine-generated criteria ride along as their own variants. Generated
/// criteria (from the external text-to-criteria collaborator) get no special
/// validation beyond the sanitize pass applied to every criteria set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProfileSelection {
    Builtin { key: String },
    Custom { criteria: EventCriteria },
    Generated {
        criteria: EventCriteria,
        source_text: String,
    },
}

impl ProfileSelection {
    pub fn builtin(key: &str) -> ProfileSelection {
        ProfileSelection::Builtin {
            key: key.to_string(),
        }
    }

    /// Resolve to the effective criteria set. `None` for an unknown
    /// builtin key.
    pub fn resolve(&self) -> Option<EventCriteria> {
        match self {
            ProfileSelection::Builtin { key } => profile(key).map(|p| p.criteria),
            ProfileSelection::Custom { criteria } => Some(*criteria),
            ProfileSelection::Generated { criteria, .. } => Some(*criteria),
        }
    }
}

fn make(
    key: &str,
    name: &str,
    description: &str,
    criteria: EventCriteria,
) -> EventProfile {
    EventProfile {
        key: key.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        criteria,
    }
}

/// The fixed builtin profile registry.
pub fn all_profiles() -> Vec<EventProfile> {
    vec![
        make(
            "praia",
            "Praia",
            "Sol forte, calor intenso, céu limpo",
            EventCriteria {
                temp_min_ideal: Some(28.0),
                temp_max_ideal: Some(45.0),
                precipitation_max: Some(1.0),
                wind_max: Some(20.0),
                humidity_max: Some(80.0),
                ..Default::default()
            },
        ),
        make(
            "churrasco",
            "Churrasco",
            "Sem chuva, calor ou clima agradável",
            EventCriteria {
                temp_min_ideal: Some(20.0),
                temp_max_ideal: Some(40.0),
                precipitation_max: Some(1.0),
                wind_max: Some(15.0),
                ..Default::default()
            },
        ),
        make(
            "pelada",
            "Pelada/Futebol",
            "Brasileiro joga bola em qualquer calor!",
            EventCriteria {
                temp_min_ideal: Some(20.0),
                temp_max_ideal: Some(38.0),
                precipitation_max: Some(3.0),
                wind_max: Some(15.0),
                ..Default::default()
            },
        ),
        make(
            "festa_junina",
            "Festa Junina",
            "Clima de inverno brasileiro (fresquinho à noite)",
            EventCriteria {
                temp_min_ideal: Some(16.0),
                temp_max_ideal: Some(32.0),
                precipitation_max: Some(1.0),
                wind_max: Some(12.0),
                humidity_min: Some(35.0),
                humidity_max: Some(65.0),
                ..Default::default()
            },
        ),
        make(
            "samba_pagode",
            "Samba/Pagode ao Ar Livre",
            "Clima quente e animado para curtir",
            EventCriteria {
                temp_min_ideal: Some(24.0),
                temp_max_ideal: Some(36.0),
                precipitation_max: Some(2.0),
                wind_max: Some(12.0),
                humidity_max: Some(80.0),
                ..Default::default()
            },
        ),
        make(
            "carnaval",
            "Carnaval de Rua",
            "Calor ABSURDO de verão brasileiro!",
            EventCriteria {
                temp_min_ideal: Some(24.0),
                temp_max_ideal: Some(42.0),
                precipitation_max: Some(5.0),
                wind_max: Some(15.0),
                humidity_min: Some(55.0),
                humidity_max: Some(90.0),
                ..Default::default()
            },
        ),
        make(
            "volei_praia",
            "Vôlei de Praia",
            "Sol, areia e pouco vento",
            EventCriteria {
                temp_min_ideal: Some(28.0),
                temp_max_ideal: Some(42.0),
                precipitation_max: Some(1.0),
                wind_max: Some(10.0),
                humidity_max: Some(75.0),
                ..Default::default()
            },
        ),
        make(
            "pescaria",
            "Pescaria",
            "Clima ameno e vento fraco",
            EventCriteria {
                temp_min_ideal: Some(20.0),
                temp_max_ideal: Some(32.0),
                precipitation_max: Some(2.0),
                wind_max: Some(12.0),
                ..Default::default()
            },
        ),
        make(
            "piquenique",
            "Piquenique",
            "Dia agradável ao ar livre, sem chuva",
            EventCriteria {
                temp_min_ideal: Some(22.0),
                temp_max_ideal: Some(30.0),
                precipitation_max: Some(0.5),
                wind_max: Some(10.0),
                humidity_min: Some(40.0),
                humidity_max: Some(70.0),
                ..Default::default()
            },
        ),
        make(
            "trilha",
            "Trilha/Caminhada",
            "Fresco e seco para caminhar",
            EventCriteria {
                temp_min_ideal: Some(18.0),
                temp_max_ideal: Some(28.0),
                precipitation_max: Some(5.0),
                wind_max: Some(12.0),
                humidity_min: Some(40.0),
                humidity_max: Some(85.0),
                ..Default::default()
            },
        ),
        make(
            "customizavel",
            "Customizável",
            "Ponto de partida para ajustes do usuário",
            EventCriteria {
                temp_min_ideal: Some(20.0),
                temp_max_ideal: Some(30.0),
                precipitation_max: Some(2.0),
                wind_max: Some(10.0),
                humidity_min: Some(40.0),
                humidity_max: Some(70.0),
                ..Default::default()
            },
        ),
        make(
            "custom",
            "Custom",
            "Critérios definidos pelo usuário",
            EventCriteria::default(),
        ),
    ]
}

/// Look up one builtin profile by key.
pub fn profile(key: &str) -> Option<EventProfile> {
    all_profiles().into_iter().find(|p| p.key == key)
}

/// All builtin profile keys, in registry order.
pub fn profile_keys() -> Vec<String> {
    all_profiles().into_iter().map(|p| p.key).collect()
}

pub fn is_valid_profile(key: &str) -> bool {
    profile(key).is_some()
}
