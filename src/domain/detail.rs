//! Candidate detail view: labelled rows for a single enrollment record

use serde::Serialize;

use crate::domain::Candidate;

/// Placeholder for missing values.
pub const MISSING: &str = "—";

/// One labelled row of the detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailRow {
    pub label: &'static str,
    pub value: String,
    /// Record link, only set on the name row
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_url: Option<String>,
}

impl DetailRow {
    fn new(label: &'static str, value: String) -> Self {
        Self {
            label,
            value,
            record_url: None,
        }
    }
}

/// Read-only presentation of a candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateDetail {
    candidate: Candidate,
}

impl From<&Candidate> for CandidateDetail {
    fn from(candidate: &Candidate) -> Self {
        Self {
            candidate: candidate.clone(),
        }
    }
}

fn text(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => MISSING.to_string(),
    }
}

fn number<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| MISSING.to_string())
}

impl CandidateDetail {
    pub fn candidate(&self) -> &Candidate {
        &self.candidate
    }

    /// Name, followed by ` • status` when a status is known.
    pub fn header_title(&self) -> String {
        let name = match self.candidate.name.as_deref() {
            Some(n) if !n.is_empty() => n,
            _ => "Patient",
        };
        match self.candidate.enrollment_status.as_deref() {
            Some(s) if !s.is_empty() => format!("{} • {}", name, s),
            _ => name.to_string(),
        }
    }

    pub fn has_agent_notes(&self) -> bool {
        !self.candidate.llm_notes.is_empty()
    }

    pub fn rows(&self) -> Vec<DetailRow> {
        let c = &self.candidate;
        let notes = &c.llm_notes;
        let mut name = DetailRow::new("Name", text(c.name.as_deref()));
        name.record_url = Some(format!("/{}", c.id));

        vec![
            name,
            DetailRow::new("Age", number(c.age)),
            DetailRow::new("Weight (kg)", number(c.weight_kg)),
            DetailRow::new("BMI", number(c.bmi)),
            DetailRow::new("Blood Pressure", text(c.blood_pressure.as_deref())),
            DetailRow::new("ECG Status", text(c.ecg_status.as_deref())),
            DetailRow::new("Sugar Status", text(c.sugar_status.as_deref())),
            DetailRow::new("Hepatic Function", text(c.hepatic_function.as_deref())),
            DetailRow::new("Status", text(c.enrollment_status.as_deref())),
            DetailRow::new("Eligibility Score", number(c.eligibility_score)),
            DetailRow::new("Site Agent LLM Response", text(notes.site.as_deref())),
            DetailRow::new("PCP Agent LLM Response", text(notes.pcp.as_deref())),
            DetailRow::new("CRO Agent LLM Response", text(notes.cro.as_deref())),
        ]
    }
}
