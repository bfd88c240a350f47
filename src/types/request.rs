// src/types/request.rs
use serde::{Deserialize, Serialize};

/// Raw values as typed into the form, before trimming.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    pub api_key: String,
    pub skills: String,
    pub experience: String,
    pub job_description: String,
}

/// Which part of the form failed pre-flight validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingInput {
    Credential,
    Fields,
}

/// Body of `POST /api/generate`. Every field is non-empty and trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub skills: String,
    pub experience: String,
    pub job_description: String,
    pub api_key: String,
}

impl GenerationRequest {
    /// Build a request from form input.
    ///
    /// The credential is checked before the text fields, so a form with
    /// nothing filled in reports [`MissingInput::Credential`].
    pub fn from_form(form: &FormInput) -> Result<Self, MissingInput> {
        let api_key = form.api_key.trim();
        if api_key.is_empty() {
            return Err(MissingInput::Credential);
        }

        let skills = form.skills.trim();
        let experience = form.experience.trim();
        let job_description = form.job_description.trim();
        if skills.is_empty() || experience.is_empty() || job_description.is_empty() {
            return Err(MissingInput::Fields);
        }

        Ok(Self {
            skills: skills.to_string(),
            experience: experience.to_string(),
            job_description: job_description.to_string(),
            api_key: api_key.to_string(),
        })
    }
}
