//! Closed option lists that populate filter controls and validate form input.
//!
//! Every catalog type implements [`CatalogOption`], which gives the stable
//! wire slug, the English display label, and a lenient parser used for query
//! strings.

use serde::{Deserialize, Serialize};

/// Shared surface of the option catalogs.
pub trait CatalogOption: Copy + Eq + 'static {
    /// Key prefix used for localization and catalog listings.
    const KIND: &'static str;

    fn ordered() -> &'static [Self];
    fn slug(self) -> &'static str;
    fn label(self) -> &'static str;

    /// Accepts the slug, the display label, or the label with `-`/space
    /// separators, ignoring case.
    fn parse(raw: &str) -> Option<Self> {
        let wanted = normalize(raw);
        if wanted.is_empty() {
            return None;
        }
        Self::ordered()
            .iter()
            .copied()
            .find(|option| normalize(option.slug()) == wanted || normalize(option.label()) == wanted)
    }

    /// Localization key, e.g. `sector.food_security`.
    fn message_key(self) -> String {
        format!("{}.{}", Self::KIND, self.slug())
    }
}

fn normalize(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter_map(|ch| match ch {
            ' ' | '-' | '_' | '&' => Some('_'),
            ch if ch.is_alphanumeric() => Some(ch.to_ascii_lowercase()),
            _ => None,
        })
        .collect::<String>()
        .split('_')
        .filter(|part| !part.is_empty() && *part != "and")
        .collect::<Vec<_>>()
        .join("_")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sector {
    Education,
    Health,
    Environment,
    Housing,
    FoodSecurity,
    EconomicDevelopment,
    ArtsCulture,
    HumanRights,
    DisasterRelief,
    AnimalWelfare,
    CommunityDevelopment,
}

impl CatalogOption for Sector {
    const KIND: &'static str = "sector";

    fn ordered() -> &'static [Self] {
        &[
            Self::Education,
            Self::Health,
            Self::Environment,
            Self::Housing,
            Self::FoodSecurity,
            Self::EconomicDevelopment,
            Self::ArtsCulture,
            Self::HumanRights,
            Self::DisasterRelief,
            Self::AnimalWelfare,
            Self::CommunityDevelopment,
        ]
    }

    fn slug(self) -> &'static str {
        match self {
            Self::Education => "education",
            Self::Health => "health",
            Self::Environment => "environment",
            Self::Housing => "housing",
            Self::FoodSecurity => "food_security",
            Self::EconomicDevelopment => "economic_development",
            Self::ArtsCulture => "arts_culture",
            Self::HumanRights => "human_rights",
            Self::DisasterRelief => "disaster_relief",
            Self::AnimalWelfare => "animal_welfare",
            Self::CommunityDevelopment => "community_development",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Education => "Education",
            Self::Health => "Health",
            Self::Environment => "Environment",
            Self::Housing => "Housing",
            Self::FoodSecurity => "Food Security",
            Self::EconomicDevelopment => "Economic Development",
            Self::ArtsCulture => "Arts & Culture",
            Self::HumanRights => "Human Rights",
            Self::DisasterRelief => "Disaster Relief",
            Self::AnimalWelfare => "Animal Welfare",
            Self::CommunityDevelopment => "Community Development",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    NorthAmerica,
    LatinAmerica,
    Europe,
    Africa,
    MiddleEast,
    SouthAsia,
    EastAsia,
    SoutheastAsia,
    Oceania,
    Global,
}

impl CatalogOption for Region {
    const KIND: &'static str = "region";

    fn ordered() -> &'static [Self] {
        &[
            Self::NorthAmerica,
            Self::LatinAmerica,
            Self::Europe,
            Self::Africa,
            Self::MiddleEast,
            Self::SouthAsia,
            Self::EastAsia,
            Self::SoutheastAsia,
            Self::Oceania,
            Self::Global,
        ]
    }

    fn slug(self) -> &'static str {
        match self {
            Self::NorthAmerica => "north_america",
            Self::LatinAmerica => "latin_america",
            Self::Europe => "europe",
            Self::Africa => "africa",
            Self::MiddleEast => "middle_east",
            Self::SouthAsia => "south_asia",
            Self::EastAsia => "east_asia",
            Self::SoutheastAsia => "southeast_asia",
            Self::Oceania => "oceania",
            Self::Global => "global",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::NorthAmerica => "North America",
            Self::LatinAmerica => "Latin America",
            Self::Europe => "Europe",
            Self::Africa => "Africa",
            Self::MiddleEast => "Middle East",
            Self::SouthAsia => "South Asia",
            Self::EastAsia => "East Asia",
            Self::SoutheastAsia => "Southeast Asia",
            Self::Oceania => "Oceania",
            Self::Global => "Global",
        }
    }
}

/// UN Sustainable Development Goals, in goal-number order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sdg {
    NoPoverty,
    ZeroHunger,
    GoodHealth,
    QualityEducation,
    GenderEquality,
    CleanWater,
    CleanEnergy,
    DecentWork,
    Innovation,
    ReducedInequalities,
    SustainableCities,
    ResponsibleConsumption,
    ClimateAction,
    LifeBelowWater,
    LifeOnLand,
    PeaceJustice,
    Partnerships,
}

impl Sdg {
    /// Goal number, 1 through 17.
    pub fn number(self) -> u8 {
        Self::ordered()
            .iter()
            .position(|goal| *goal == self)
            .map(|index| index as u8 + 1)
            .unwrap_or_default()
    }

    pub fn from_number(number: u8) -> Option<Self> {
        let index = usize::from(number).checked_sub(1)?;
        Self::ordered().get(index).copied()
    }
}

impl CatalogOption for Sdg {
    const KIND: &'static str = "sdg";

    fn ordered() -> &'static [Self] {
        &[
            Self::NoPoverty,
            Self::ZeroHunger,
            Self::GoodHealth,
            Self::QualityEducation,
            Self::GenderEquality,
            Self::CleanWater,
            Self::CleanEnergy,
            Self::DecentWork,
            Self::Innovation,
            Self::ReducedInequalities,
            Self::SustainableCities,
            Self::ResponsibleConsumption,
            Self::ClimateAction,
            Self::LifeBelowWater,
            Self::LifeOnLand,
            Self::PeaceJustice,
            Self::Partnerships,
        ]
    }

    fn slug(self) -> &'static str {
        match self {
            Self::NoPoverty => "no_poverty",
            Self::ZeroHunger => "zero_hunger",
            Self::GoodHealth => "good_health",
            Self::QualityEducation => "quality_education",
            Self::GenderEquality => "gender_equality",
            Self::CleanWater => "clean_water",
            Self::CleanEnergy => "clean_energy",
            Self::DecentWork => "decent_work",
            Self::Innovation => "innovation",
            Self::ReducedInequalities => "reduced_inequalities",
            Self::SustainableCities => "sustainable_cities",
            Self::ResponsibleConsumption => "responsible_consumption",
            Self::ClimateAction => "climate_action",
            Self::LifeBelowWater => "life_below_water",
            Self::LifeOnLand => "life_on_land",
            Self::PeaceJustice => "peace_justice",
            Self::Partnerships => "partnerships",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::NoPoverty => "No Poverty",
            Self::ZeroHunger => "Zero Hunger",
            Self::GoodHealth => "Good Health and Well-being",
            Self::QualityEducation => "Quality Education",
            Self::GenderEquality => "Gender Equality",
            Self::CleanWater => "Clean Water and Sanitation",
            Self::CleanEnergy => "Affordable and Clean Energy",
            Self::DecentWork => "Decent Work and Economic Growth",
            Self::Innovation => "Industry, Innovation and Infrastructure",
            Self::ReducedInequalities => "Reduced Inequalities",
            Self::SustainableCities => "Sustainable Cities and Communities",
            Self::ResponsibleConsumption => "Responsible Consumption and Production",
            Self::ClimateAction => "Climate Action",
            Self::LifeBelowWater => "Life Below Water",
            Self::LifeOnLand => "Life on Land",
            Self::PeaceJustice => "Peace, Justice and Strong Institutions",
            Self::Partnerships => "Partnerships for the Goals",
        }
    }

    /// Also accepts goal numbers: `7`, `sdg7`, `SDG 7`.
    fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        let digits = trimmed
            .strip_prefix("sdg")
            .or_else(|| trimmed.strip_prefix("SDG"))
            .unwrap_or(trimmed)
            .trim_start_matches(['-', '_', ' ']);
        if let Ok(number) = digits.parse::<u8>() {
            return Self::from_number(number);
        }

        let wanted = normalize(trimmed);
        Self::ordered()
            .iter()
            .copied()
            .find(|goal| normalize(goal.slug()) == wanted || normalize(goal.label()) == wanted)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Demographic {
    ChildrenYouth,
    WomenGirls,
    Elderly,
    RefugeesDisplaced,
    PeopleWithDisabilities,
    LowIncome,
    Indigenous,
    Rural,
    Veterans,
}

impl CatalogOption for Demographic {
    const KIND: &'static str = "demographic";

    fn ordered() -> &'static [Self] {
        &[
            Self::ChildrenYouth,
            Self::WomenGirls,
            Self::Elderly,
            Self::RefugeesDisplaced,
            Self::PeopleWithDisabilities,
            Self::LowIncome,
            Self::Indigenous,
            Self::Rural,
            Self::Veterans,
        ]
    }

    fn slug(self) -> &'static str {
        match self {
            Self::ChildrenYouth => "children_youth",
            Self::WomenGirls => "women_girls",
            Self::Elderly => "elderly",
            Self::RefugeesDisplaced => "refugees_displaced",
            Self::PeopleWithDisabilities => "people_with_disabilities",
            Self::LowIncome => "low_income",
            Self::Indigenous => "indigenous",
            Self::Rural => "rural",
            Self::Veterans => "veterans",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::ChildrenYouth => "Children & Youth",
            Self::WomenGirls => "Women & Girls",
            Self::Elderly => "Elderly",
            Self::RefugeesDisplaced => "Refugees & Displaced People",
            Self::PeopleWithDisabilities => "People with Disabilities",
            Self::LowIncome => "Low-Income Households",
            Self::Indigenous => "Indigenous Communities",
            Self::Rural => "Rural Communities",
            Self::Veterans => "Veterans",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusinessType {
    Nonprofit,
    SocialEnterprise,
    BCorp,
    Cooperative,
    Foundation,
    PublicPartnership,
}

impl CatalogOption for BusinessType {
    const KIND: &'static str = "business_type";

    fn ordered() -> &'static [Self] {
        &[
            Self::Nonprofit,
            Self::SocialEnterprise,
            Self::BCorp,
            Self::Cooperative,
            Self::Foundation,
            Self::PublicPartnership,
        ]
    }

    fn slug(self) -> &'static str {
        match self {
            Self::Nonprofit => "nonprofit",
            Self::SocialEnterprise => "social_enterprise",
            Self::BCorp => "b_corp",
            Self::Cooperative => "cooperative",
            Self::Foundation => "foundation",
            Self::PublicPartnership => "public_partnership",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Nonprofit => "Nonprofit",
            Self::SocialEnterprise => "Social Enterprise",
            Self::BCorp => "B Corp",
            Self::Cooperative => "Cooperative",
            Self::Foundation => "Foundation",
            Self::PublicPartnership => "Public-Private Partnership",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrganizationSize {
    Small,
    Medium,
    Large,
}

impl CatalogOption for OrganizationSize {
    const KIND: &'static str = "organization_size";

    fn ordered() -> &'static [Self] {
        &[Self::Small, Self::Medium, Self::Large]
    }

    fn slug(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Small => "Small",
            Self::Medium => "Medium",
            Self::Large => "Large",
        }
    }
}
