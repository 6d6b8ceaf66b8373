use vitae_types::{EducationItem, Resume};

/// Fallback fields a profile store can contribute when the resume record
/// leaves them out. Only absent fields are filled; resume data always
/// wins.
#[derive(Debug, Clone, Default)]
pub struct ProfileDefaults {
    pub name: Option<String>,
    pub label: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub education: Vec<EducationItem>,
}

/// The profile-provider collaborator. The persistence layer implements
/// this against its own storage; renders receive it through the exporter
/// configuration.
pub trait ProfileProvider {
    fn defaults(&self) -> ProfileDefaults;
}

/// Provider used when no profile store is wired in.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProfile;

impl ProfileProvider for NoProfile {
    fn defaults(&self) -> ProfileDefaults {
        ProfileDefaults::default()
    }
}

/// Pre-populated provider, handy for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProfileProvider {
    defaults: ProfileDefaults,
}

impl InMemoryProfileProvider {
    pub fn new(defaults: ProfileDefaults) -> Self {
        Self { defaults }
    }
}

impl ProfileProvider for InMemoryProfileProvider {
    fn defaults(&self) -> ProfileDefaults {
        self.defaults.clone()
    }
}

fn filled(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Merges provider fallbacks into a copy of the resume.
pub(crate) fn merge_profile(resume: &Resume, provider: &dyn ProfileProvider) -> Resume {
    let defaults = provider.defaults();
    let mut merged = resume.clone();

    if !filled(&merged.name) {
        if let Some(name) = defaults.name {
            merged.name = name;
        }
    }
    if !filled(&merged.email) {
        if let Some(email) = defaults.email {
            merged.email = email;
        }
    }
    if merged.label.as_deref().is_none_or(|v| !filled(v)) {
        merged.label = defaults.label;
    }
    if merged.phone.as_deref().is_none_or(|v| !filled(v)) {
        merged.phone = defaults.phone;
    }
    if merged.location.as_deref().is_none_or(|v| !filled(v)) {
        merged.location = defaults.location;
    }
    if merged.website.as_deref().is_none_or(|v| !filled(v)) {
        merged.website = defaults.website;
    }
    if merged.education.is_empty() {
        merged.education = defaults.education;
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_only_missing_fields() {
        let resume = Resume {
            name: "Ana Lee".into(),
            email: String::new(),
            phone: Some("  ".into()),
            ..Resume::default()
        };
        let provider = InMemoryProfileProvider::new(ProfileDefaults {
            name: Some("Should Not Win".into()),
            email: Some("profile@x.com".into()),
            phone: Some("555-0100".into()),
            ..ProfileDefaults::default()
        });

        let merged = merge_profile(&resume, &provider);
        assert_eq!(merged.name, "Ana Lee");
        assert_eq!(merged.email, "profile@x.com");
        assert_eq!(merged.phone.as_deref(), Some("555-0100"));
    }

    #[test]
    fn no_profile_changes_nothing() {
        let resume = Resume {
            name: "Ana Lee".into(),
            email: "ana@x.com".into(),
            ..Resume::default()
        };
        assert_eq!(merge_profile(&resume, &NoProfile), resume);
    }
}
