//! Per-request display preferences and display-string lookup.
//!
//! Language and theme travel with each request as a [`DisplayContext`];
//! nothing here is process-global.

use std::borrow::Cow;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::rankings::catalog::CatalogOption;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    #[default]
    English,
    Spanish,
}

impl Language {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "en" | "en-us" | "english" => Some(Self::English),
            "es" | "es-es" | "es-mx" | "spanish" | "espanol" | "español" => Some(Self::Spanish),
            _ => None,
        }
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Spanish => "es",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }
}

/// Display preferences for one render pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DisplayContext {
    pub language: Language,
    pub theme: Theme,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DisplayParams {
    #[serde(default, alias = "language")]
    pub lang: Option<String>,
    #[serde(default)]
    pub theme: Option<String>,
}

impl From<&DisplayParams> for DisplayContext {
    /// Unknown values fall back to the defaults.
    fn from(params: &DisplayParams) -> Self {
        Self {
            language: params
                .lang
                .as_deref()
                .and_then(Language::parse)
                .unwrap_or_default(),
            theme: params
                .theme
                .as_deref()
                .and_then(Theme::parse)
                .unwrap_or_default(),
        }
    }
}

/// Display-string lookup. `None` means "use the built-in English text".
pub trait Localizer: Send + Sync {
    fn translate(&self, key: &str, language: Language) -> Option<Cow<'static, str>>;
}

/// Localized label for a catalog option.
pub fn option_label<T: CatalogOption>(
    localizer: &dyn Localizer,
    option: T,
    language: Language,
) -> String {
    localizer
        .translate(&option.message_key(), language)
        .map(Cow::into_owned)
        .unwrap_or_else(|| option.label().to_string())
}

/// Compiled-in translations for the option catalogs.
pub struct StaticLocalizer {
    spanish: HashMap<&'static str, &'static str>,
}

impl Default for StaticLocalizer {
    fn default() -> Self {
        Self {
            spanish: SPANISH.iter().copied().collect(),
        }
    }
}

impl Localizer for StaticLocalizer {
    fn translate(&self, key: &str, language: Language) -> Option<Cow<'static, str>> {
        match language {
            Language::English => None,
            Language::Spanish => self.spanish.get(key).map(|text| Cow::Borrowed(*text)),
        }
    }
}

const SPANISH: &[(&str, &str)] = &[
    ("sector.education", "Educación"),
    ("sector.health", "Salud"),
    ("sector.environment", "Medio ambiente"),
    ("sector.housing", "Vivienda"),
    ("sector.food_security", "Seguridad alimentaria"),
    ("sector.economic_development", "Desarrollo económico"),
    ("sector.arts_culture", "Arte y cultura"),
    ("sector.human_rights", "Derechos humanos"),
    ("sector.disaster_relief", "Ayuda en desastres"),
    ("sector.animal_welfare", "Bienestar animal"),
    ("sector.community_development", "Desarrollo comunitario"),
    ("region.north_america", "Norteamérica"),
    ("region.latin_america", "América Latina"),
    ("region.europe", "Europa"),
    ("region.africa", "África"),
    ("region.middle_east", "Oriente Medio"),
    ("region.south_asia", "Asia del Sur"),
    ("region.east_asia", "Asia Oriental"),
    ("region.southeast_asia", "Sudeste Asiático"),
    ("region.oceania", "Oceanía"),
    ("region.global", "Global"),
    ("sdg.no_poverty", "Fin de la pobreza"),
    ("sdg.zero_hunger", "Hambre cero"),
    ("sdg.good_health", "Salud y bienestar"),
    ("sdg.quality_education", "Educación de calidad"),
    ("sdg.gender_equality", "Igualdad de género"),
    ("sdg.clean_water", "Agua limpia y saneamiento"),
    ("sdg.clean_energy", "Energía asequible y no contaminante"),
    ("sdg.decent_work", "Trabajo decente y crecimiento económico"),
    ("sdg.innovation", "Industria, innovación e infraestructura"),
    ("sdg.reduced_inequalities", "Reducción de las desigualdades"),
    ("sdg.sustainable_cities", "Ciudades y comunidades sostenibles"),
    ("sdg.responsible_consumption", "Producción y consumo responsables"),
    ("sdg.climate_action", "Acción por el clima"),
    ("sdg.life_below_water", "Vida submarina"),
    ("sdg.life_on_land", "Vida de ecosistemas terrestres"),
    ("sdg.peace_justice", "Paz, justicia e instituciones sólidas"),
    ("sdg.partnerships", "Alianzas para lograr los objetivos"),
    ("demographic.children_youth", "Niñez y juventud"),
    ("demographic.women_girls", "Mujeres y niñas"),
    ("demographic.elderly", "Personas mayores"),
    ("demographic.refugees_displaced", "Personas refugiadas y desplazadas"),
    ("demographic.people_with_disabilities", "Personas con discapacidad"),
    ("demographic.low_income", "Hogares de bajos ingresos"),
    ("demographic.indigenous", "Comunidades indígenas"),
    ("demographic.rural", "Comunidades rurales"),
    ("demographic.veterans", "Veteranos"),
    ("business_type.nonprofit", "Organización sin fines de lucro"),
    ("business_type.social_enterprise", "Empresa social"),
    ("business_type.b_corp", "Empresa B"),
    ("business_type.cooperative", "Cooperativa"),
    ("business_type.foundation", "Fundación"),
    ("business_type.public_partnership", "Alianza público-privada"),
    ("organization_size.small", "Pequeña"),
    ("organization_size.medium", "Mediana"),
    ("organization_size.large", "Grande"),
];
