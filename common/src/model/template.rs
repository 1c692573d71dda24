use crate::model::schema::TemplateSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateType {
    #[default]
    General,
    Subject,
}

impl TemplateType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateType::General => "general",
            TemplateType::Subject => "subject",
        }
    }
}

/// A persisted logbook template: the schema plus its identity and scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub template_type: TemplateType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub academic_year_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(default)]
    pub dynamic_schema: TemplateSchema,
}

/// Body of the create (`POST`) and update (`PATCH`) template requests.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDraft {
    /// Present only when updating an existing template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub description: String,
    pub template_type: TemplateType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_id: Option<String>,
    pub created_by: String,
    pub dynamic_schema: TemplateSchema,
}

impl TemplateDraft {
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    /// Prepares a draft that edits `template` in place.
    pub fn from_template(template: &Template, created_by: &str) -> Self {
        Self {
            id: Some(template.id.clone()),
            name: template.name.clone(),
            description: template.description.clone(),
            template_type: template.template_type,
            subject_id: template.subject_id.clone(),
            created_by: template
                .created_by
                .clone()
                .unwrap_or_else(|| created_by.to_string()),
            dynamic_schema: template.dynamic_schema.clone(),
        }
    }
}

/// Scope used by students and teachers to find the template that applies to them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TemplateFilter {
    pub academic_year_id: Option<String>,
    pub batch_id: Option<String>,
    pub subject_id: Option<String>,
    pub module_id: Option<String>,
}

impl TemplateFilter {
    /// Query parameters for the set members, blank strings skipped.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        [
            ("academicYearId", &self.academic_year_id),
            ("batchId", &self.batch_id),
            ("subjectId", &self.subject_id),
            ("moduleId", &self.module_id),
        ]
        .into_iter()
        .filter_map(|(name, value)| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(|v| (name, v.to_string()))
        })
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.query_pairs().is_empty()
    }
}
