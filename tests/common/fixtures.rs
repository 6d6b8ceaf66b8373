use vitae::{EducationItem, ExperienceItem, ProjectItem, Resume, SkillGroup};

/// The smallest structurally valid resume: name and email only.
pub fn minimal_resume() -> Resume {
    Resume {
        name: "Ana Lee".into(),
        email: "ana@x.com".into(),
        ..Resume::default()
    }
}

/// The reference scenario: one current experience entry.
pub fn ana_lee_resume() -> Resume {
    Resume {
        name: "Ana Lee".into(),
        email: "ana@x.com".into(),
        experience: vec![ExperienceItem {
            title: "Engineer".into(),
            company: "Acme".into(),
            start_date: Some("2020-01".into()),
            current: true,
            description: Some("Built systems.".into()),
            highlights: vec!["Shipped v2".into()],
            technologies: vec!["Go".into()],
            ..ExperienceItem::default()
        }],
        ..Resume::default()
    }
}

/// A resume guaranteed to exceed one page.
pub fn long_experience_resume(items: usize) -> Resume {
    let mut resume = minimal_resume();
    for i in 0..items {
        resume.experience.push(ExperienceItem {
            title: format!("Engineer {i}"),
            company: "Acme".into(),
            start_date: Some("2018-03".into()),
            end_date: Some("2020-01".into()),
            description: Some(
                "Owned a production service end to end: capacity planning, \
                 on-call, incident reviews, and the migrations nobody else \
                 wanted to touch."
                    .into(),
            ),
            highlights: vec![
                "Reduced p99 latency from 900ms to 180ms".into(),
                "Led a three-person working group".into(),
            ],
            technologies: vec!["Go".into(), "Rust".into(), "Postgres".into()],
            ..ExperienceItem::default()
        });
    }
    resume
}

/// Mixed-script resume with a CJK summary of at least 2000 characters.
pub fn cjk_resume() -> Resume {
    let mut resume = minimal_resume();
    resume.name = "李安娜".into();
    resume.summary = Some("负责大规模分布式系统的架构设计与实现以及团队管理工作".repeat(80));
    resume.experience.push(ExperienceItem {
        title: "Engineer".into(),
        company: "阿里巴巴".into(),
        start_date: Some("2019-06".into()),
        current: true,
        description: Some("Built 高可用 services for global traffic.".into()),
        ..ExperienceItem::default()
    });
    resume
}

/// A resume with every section populated, for full-pipeline smoke tests.
pub fn full_resume() -> Resume {
    let mut resume = ana_lee_resume();
    resume.label = Some("Staff Engineer".into());
    resume.phone = Some("+1 555 0100".into());
    resume.location = Some("Lisbon, PT".into());
    resume.website = Some("https://ana.example".into());
    resume.summary = Some("Engineer with a decade of distributed-systems work.".into());
    resume.projects = vec![ProjectItem {
        name: "fleetctl".into(),
        description: Some("A control plane for edge fleets.".into()),
        url: Some("https://github.com/ana/fleetctl".into()),
        technologies: vec!["Rust".into()],
        ..ProjectItem::default()
    }];
    resume.skills = vec![SkillGroup {
        name: "Languages".into(),
        level: Some("advanced".into()),
        keywords: vec!["Go".into(), "Rust".into(), "SQL".into()],
    }];
    resume.education = vec![EducationItem {
        institution: "Instituto Superior Tecnico".into(),
        degree: Some("MSc".into()),
        area: Some("Computer Science".into()),
        start_date: Some("2010-09".into()),
        end_date: Some("2012-07".into()),
        ..EducationItem::default()
    }];
    resume
}
