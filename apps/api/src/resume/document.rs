use serde::Serialize;

use crate::content::records::{ExperienceRecord, ProjectRecord, SkillGroup};
use crate::content::rich_text::RichText;
use crate::metrics::DerivedMetrics;
use crate::resume::language::Language;
use crate::resume::profile::ResumeProfile;
use crate::translation::{
    TranslatableEducation, TranslatableExperience, TranslatableProject, TranslatableResume,
};

/// A profile photo embedded into the resume.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileImage {
    pub mime: String,
    /// Standard base64 of the image bytes.
    pub base64: String,
}

impl ProfileImage {
    /// File extension for a MIME type the renderer can embed.
    pub fn extension_for(mime: &str) -> Option<&'static str> {
        match mime {
            "image/png" => Some("png"),
            "image/jpeg" | "image/jpg" => Some("jpg"),
            "image/gif" => Some("gif"),
            "image/svg+xml" => Some("svg"),
            _ => None,
        }
    }

    pub fn extension(&self) -> Option<&'static str> {
        Self::extension_for(&self.mime)
    }
}

/// Everything the renderer needs, already fetched, sorted and (optionally) translated.
#[derive(Debug, Clone)]
pub struct ResumeDocument {
    pub language: Language,
    pub profile: ResumeProfile,
    pub profile_image: Option<ProfileImage>,
    /// Newest first.
    pub experiences: Vec<ExperienceRecord>,
    /// Dated projects only, newest first.
    pub projects: Vec<ProjectRecord>,
    pub skills: Vec<SkillGroup>,
    pub metrics: DerivedMetrics,
}

impl ResumeDocument {
    /// The text a translator is allowed to touch.
    pub fn translatable(&self) -> TranslatableResume {
        TranslatableResume {
            title: self.profile.title.clone(),
            summary: self.profile.summary.clone(),
            experiences: self
                .experiences
                .iter()
                .map(|e| TranslatableExperience {
                    role: e.role.clone(),
                    company: e.company.clone(),
                    description: e
                        .description
                        .as_ref()
                        .map(RichText::to_plain_text)
                        .unwrap_or_default(),
                    responsibilities: e.responsibilities.clone(),
                })
                .collect(),
            projects: self
                .projects
                .iter()
                .map(|p| TranslatableProject {
                    title: p.title.clone(),
                    description: p.description.clone(),
                })
                .collect(),
            education: self
                .profile
                .education
                .iter()
                .map(|e| TranslatableEducation {
                    degree: e.degree.clone(),
                    institution: e.institution.clone(),
                })
                .collect(),
            interests: self.profile.interests.clone(),
        }
    }

    /// Writes translated text back. Descriptions left unchanged by the translator keep
    /// their rich-text structure; changed ones become plain text.
    pub fn apply_translation(&mut self, translated: TranslatableResume) {
        let original = self.translatable();

        self.profile.title = translated.title;
        self.profile.summary = translated.summary;
        self.profile.interests = translated.interests;

        for ((record, tr), orig) in self
            .experiences
            .iter_mut()
            .zip(translated.experiences)
            .zip(original.experiences)
        {
            record.role = tr.role;
            record.company = tr.company;
            record.responsibilities = tr.responsibilities;
            if tr.description != orig.description {
                record.description = Some(RichText::Plain(tr.description));
            }
        }

        for (record, tr) in self.projects.iter_mut().zip(translated.projects) {
            record.title = tr.title;
            record.description = tr.description;
        }

        for (entry, tr) in self.profile.education.iter_mut().zip(translated.education) {
            entry.degree = tr.degree;
            entry.institution = tr.institution;
        }
    }
}
