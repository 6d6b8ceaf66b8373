use serde::{Deserialize, Serialize};

/// The resume record handed in by the persistence collaborator.
///
/// Every field except `name` and `email` is optional; the renderer skips
/// sections whose backing data is empty. Field names follow the camelCase
/// JSON convention of the surrounding application.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Resume {
    pub name: String,
    pub label: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub summary: Option<String>,
    pub experience: Vec<ExperienceItem>,
    pub projects: Vec<ProjectItem>,
    pub skills: Vec<SkillGroup>,
    pub education: Vec<EducationItem>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ExperienceItem {
    pub title: String,
    pub company: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub current: bool,
    pub description: Option<String>,
    pub highlights: Vec<String>,
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectItem {
    pub name: String,
    pub description: Option<String>,
    pub url: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub highlights: Vec<String>,
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct EducationItem {
    pub institution: String,
    pub area: Option<String>,
    pub degree: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub current: bool,
    pub score: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct SkillGroup {
    pub name: String,
    pub level: Option<String>,
    pub keywords: Vec<String>,
}

impl Resume {
    /// Structural validation, run before any drawing begins.
    ///
    /// Missing optional data never fails a render; an absent name or email
    /// means the record is not a resume at all.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("resume has no name".to_string());
        }
        if self.email.trim().is_empty() {
            return Err("resume has no email address".to_string());
        }
        Ok(())
    }

    pub fn has_summary(&self) -> bool {
        self.summary.as_deref().is_some_and(|s| !s.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_camel_case_fields() {
        let json = r#"{
            "name": "Ana Lee",
            "email": "ana@x.com",
            "experience": [{
                "title": "Engineer",
                "company": "Acme",
                "startDate": "2020-01",
                "current": true,
                "description": "Built systems.",
                "highlights": ["Shipped v2"],
                "technologies": ["Go"]
            }]
        }"#;
        let resume: Resume = serde_json::from_str(json).unwrap();
        assert_eq!(resume.name, "Ana Lee");
        assert_eq!(resume.experience.len(), 1);
        let item = &resume.experience[0];
        assert_eq!(item.start_date.as_deref(), Some("2020-01"));
        assert!(item.current);
        assert!(resume.validate().is_ok());
    }

    #[test]
    fn validation_requires_name_and_email() {
        let mut resume = Resume {
            name: "Ana Lee".into(),
            email: "ana@x.com".into(),
            ..Resume::default()
        };
        assert!(resume.validate().is_ok());

        resume.name = "  ".into();
        assert!(resume.validate().is_err());

        resume.name = "Ana Lee".into();
        resume.email = String::new();
        assert!(resume.validate().is_err());
    }
}
