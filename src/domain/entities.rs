//! Domain entities: the study hierarchy
//!
//! Field names follow Rust conventions; serde renames map them onto the
//! platform's wrapper records (`croWrapperList`, `hfWrapperList`, ...).

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Facility status that makes a facility eligible in guided navigation.
pub const IDENTIFIED: &str = "Identified";

/// Research study: root of the hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Study {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "croWrapperList", default)]
    pub cros: Vec<Cro>,
}

/// Contract Research Organization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cro {
    #[serde(rename = "croId")]
    pub id: String,
    #[serde(rename = "croName", default)]
    pub name: String,
    #[serde(rename = "hfWrapperList", default)]
    pub facilities: Vec<Facility>,
}

/// Healthcare facility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Facility {
    #[serde(rename = "hfId")]
    pub id: String,
    #[serde(rename = "hfName", default)]
    pub name: String,
    #[serde(default)]
    pub status: FacilityStatus,
    #[serde(rename = "cssClass", default, skip_serializing_if = "Option::is_none")]
    pub css_class: Option<String>,
    #[serde(rename = "pcpWrapperList", default)]
    pub providers: Vec<Provider>,
}

/// Principal care provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provider {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "elCandidateWrapperList", default)]
    pub candidates: Vec<Candidate>,
}

/// Enrollment candidate (leaf record).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Candidate {
    #[serde(rename = "idEnrolled")]
    pub id: String,
    #[serde(rename = "patientName", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "patientAge", skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(rename = "statusEnrolled", skip_serializing_if = "Option::is_none")]
    pub enrollment_status: Option<String>,
    #[serde(rename = "enrollmentDate", skip_serializing_if = "Option::is_none")]
    pub enrollment_date: Option<NaiveDate>,
    #[serde(rename = "patientWeight", skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    #[serde(rename = "patientBMI", skip_serializing_if = "Option::is_none")]
    pub bmi: Option<f64>,
    #[serde(rename = "patientBP", skip_serializing_if = "Option::is_none")]
    pub blood_pressure: Option<String>,
    #[serde(rename = "patientEcgStatus", skip_serializing_if = "Option::is_none")]
    pub ecg_status: Option<String>,
    #[serde(rename = "sugarStatus", skip_serializing_if = "Option::is_none")]
    pub sugar_status: Option<String>,
    #[serde(rename = "patientHepaticFunction", skip_serializing_if = "Option::is_none")]
    pub hepatic_function: Option<String>,
    #[serde(rename = "score", skip_serializing_if = "Option::is_none")]
    pub eligibility_score: Option<f64>,
    #[serde(flatten)]
    pub llm_notes: LlmNotes,
}

/// Prior agent annotations, displayed as opaque strings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmNotes {
    #[serde(rename = "siteLLMResponse", skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
    #[serde(rename = "pcpLLMResponse", skip_serializing_if = "Option::is_none")]
    pub pcp: Option<String>,
    #[serde(rename = "croLLMResponse", skip_serializing_if = "Option::is_none")]
    pub cro: Option<String>,
}

impl LlmNotes {
    pub fn is_empty(&self) -> bool {
        self.site.is_none() && self.pcp.is_none() && self.cro.is_none()
    }
}

/// Facility status as delivered by the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FacilityStatus {
    Identified,
    Other(String),
}

impl FacilityStatus {
    pub fn as_str(&self) -> &str {
        match self {
            FacilityStatus::Identified => IDENTIFIED,
            FacilityStatus::Other(s) => s,
        }
    }

    pub fn is(&self, status: &str) -> bool {
        self.as_str() == status
    }
}

impl Default for FacilityStatus {
    fn default() -> Self {
        FacilityStatus::Other(String::new())
    }
}

impl From<String> for FacilityStatus {
    fn from(s: String) -> Self {
        if s == IDENTIFIED {
            FacilityStatus::Identified
        } else {
            FacilityStatus::Other(s)
        }
    }
}

impl From<&str> for FacilityStatus {
    fn from(s: &str) -> Self {
        FacilityStatus::from(s.to_string())
    }
}

impl From<FacilityStatus> for String {
    fn from(status: FacilityStatus) -> Self {
        match status {
            FacilityStatus::Identified => IDENTIFIED.to_string(),
            FacilityStatus::Other(s) => s,
        }
    }
}

impl fmt::Display for FacilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Study {
    /// Keep only facilities whose status equals `status`, in every CRO.
    pub fn retain_facilities_with_status(&mut self, status: &str) {
        for cro in &mut self.cros {
            cro.facilities.retain(|f| f.status.is(status));
        }
    }

    /// Find a candidate anywhere in the tree.
    pub fn find_candidate_mut(&mut self, candidate_id: &str) -> Option<&mut Candidate> {
        self.cros
            .iter_mut()
            .flat_map(|c| c.facilities.iter_mut())
            .flat_map(|f| f.providers.iter_mut())
            .flat_map(|p| p.candidates.iter_mut())
            .find(|c| c.id == candidate_id)
    }

    pub fn find_candidate(&self, candidate_id: &str) -> Option<&Candidate> {
        self.cros
            .iter()
            .flat_map(|c| c.facilities.iter())
            .flat_map(|f| f.providers.iter())
            .flat_map(|p| p.candidates.iter())
            .find(|c| c.id == candidate_id)
    }
}

/// Common view over every node of the hierarchy.
pub trait Node {
    fn id(&self) -> &str;
    fn name(&self) -> &str;
}

impl Node for Study {
    fn id(&self) -> &str {
        &self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
}

impl Node for Cro {
    fn id(&self) -> &str {
        &self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
}

impl Node for Facility {
    fn id(&self) -> &str {
        &self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
}

impl Node for Provider {
    fn id(&self) -> &str {
        &self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
}

impl Node for Candidate {
    fn id(&self) -> &str {
        &self.id
    }
    fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }
}
