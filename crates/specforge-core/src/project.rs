use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Enumerated questionnaire fields
// ---------------------------------------------------------------------------

/// A questionnaire field with a fixed menu of choices.
pub trait ChoiceField: Sized + Copy + 'static {
    /// Field name as shown in error messages and flags.
    const FIELD: &'static str;

    fn all() -> &'static [Self];
    fn as_str(&self) -> &'static str;
    fn label(&self) -> &'static str;

    fn parse(s: &str) -> Option<Self> {
        Self::all().iter().copied().find(|v| v.as_str() == s)
    }

    fn choices() -> String {
        Self::all()
            .iter()
            .map(|v| v.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArchitectureStyle {
    Monolithic,
    Microservices,
    Serverless,
    Hybrid,
}

impl ChoiceField for ArchitectureStyle {
    const FIELD: &'static str = "architecture_style";

    fn all() -> &'static [Self] {
        &[
            Self::Monolithic,
            Self::Microservices,
            Self::Serverless,
            Self::Hybrid,
        ]
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::Monolithic => "monolithic",
            Self::Microservices => "microservices",
            Self::Serverless => "serverless",
            Self::Hybrid => "hybrid",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Monolithic => "Monolithic — single deployable unit",
            Self::Microservices => "Microservices — independently deployed services",
            Self::Serverless => "Serverless — managed functions and services",
            Self::Hybrid => "Hybrid — mixed deployment model",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DevelopmentApproach {
    Agile,
    TestDriven,
    BehaviorDriven,
    Waterfall,
}

impl ChoiceField for DevelopmentApproach {
    const FIELD: &'static str = "development_approach";

    fn all() -> &'static [Self] {
        &[
            Self::Agile,
            Self::TestDriven,
            Self::BehaviorDriven,
            Self::Waterfall,
        ]
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::Agile => "agile",
            Self::TestDriven => "test_driven",
            Self::BehaviorDriven => "behavior_driven",
            Self::Waterfall => "waterfall",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Agile => "Agile — iterative delivery in short cycles",
            Self::TestDriven => "Test-driven — tests written before code",
            Self::BehaviorDriven => "Behavior-driven — specification by example",
            Self::Waterfall => "Waterfall — sequential phase gates",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordinationLevel {
    Solo,
    SmallTeam,
    MultiTeam,
}

impl ChoiceField for CoordinationLevel {
    const FIELD: &'static str = "coordination_level";

    fn all() -> &'static [Self] {
        &[Self::Solo, Self::SmallTeam, Self::MultiTeam]
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::Solo => "solo",
            Self::SmallTeam => "small_team",
            Self::MultiTeam => "multi_team",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Solo => "Solo — single developer",
            Self::SmallTeam => "Small team — 2-8 people, light coordination",
            Self::MultiTeam => "Multi-team — cross-team coordination required",
        }
    }
}

// ---------------------------------------------------------------------------
// TechStack — fixed menu plus a custom escape hatch
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TechStack {
    WebFullstack,
    PythonData,
    RustSystems,
    MobileCrossPlatform,
    #[serde(untagged)]
    Custom(String),
}

impl TechStack {
    /// The fixed menu entries, excluding the custom escape hatch.
    pub fn known() -> &'static [TechStack] {
        &[
            Self::WebFullstack,
            Self::PythonData,
            Self::RustSystems,
            Self::MobileCrossPlatform,
        ]
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::WebFullstack => "web_fullstack",
            Self::PythonData => "python_data",
            Self::RustSystems => "rust_systems",
            Self::MobileCrossPlatform => "mobile_cross_platform",
            Self::Custom(s) => s.as_str(),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::WebFullstack => "Web fullstack — TypeScript/Node + browser frontend",
            Self::PythonData => "Python data — pipelines, ML, analytics",
            Self::RustSystems => "Rust systems — services, CLIs, infrastructure",
            Self::MobileCrossPlatform => "Mobile cross-platform — iOS + Android",
            Self::Custom(s) => s.as_str(),
        }
    }

    /// Parse a menu value; anything outside the fixed menu becomes `Custom`.
    pub fn parse(s: &str) -> TechStack {
        Self::known()
            .iter()
            .find(|v| v.as_str() == s)
            .cloned()
            .unwrap_or_else(|| Self::Custom(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// ProjectInfo
// ---------------------------------------------------------------------------

/// Structured questionnaire output. Built once by discovery (or reconstructed
/// from memory for an existing project) and treated as read-only by every
/// later document generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectInfo {
    pub name: String,
    pub description: String,
    pub target_audience: String,
    pub tech_stack: TechStack,
    pub architecture_style: ArchitectureStyle,
    pub development_approach: DevelopmentApproach,
    pub coordination_level: CoordinationLevel,
    pub timeline: String,
    #[serde(default)]
    pub compliance_requirements: Vec<String>,
    pub quality_requirements: String,
}

impl ProjectInfo {
    /// A fully defaulted record for non-interactive runs and
    /// existing-project reconstruction.
    pub fn with_defaults(description: &str) -> Self {
        Self {
            name: description.trim().to_string(),
            description: description.trim().to_string(),
            target_audience: "general users".to_string(),
            tech_stack: TechStack::WebFullstack,
            architecture_style: ArchitectureStyle::Monolithic,
            development_approach: DevelopmentApproach::Agile,
            coordination_level: CoordinationLevel::SmallTeam,
            timeline: "3 months".to_string(),
            compliance_requirements: Vec::new(),
            quality_requirements: "standard production quality".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
