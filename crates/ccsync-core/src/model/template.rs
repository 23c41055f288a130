use std::fmt;

/// A file pulled from the templates repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoFile {
    pub name: String,
    pub content: String,
}

impl RepoFile {
    /// Template name this file maps to.
    pub fn template_name(&self) -> &str {
        template_name(&self.name)
    }
}

/// Template name for a source file: everything before the first `.`.
///
/// `vlan.txt` and `vlan.j2` both map to `vlan`; the later file wins.
pub fn template_name(file_name: &str) -> &str {
    file_name.split('.').next().unwrap_or(file_name)
}

/// What the sync did with one template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateOutcome {
    /// Project had no such template; created and committed.
    Created,
    /// Stored content equals the composed content; nothing written.
    Unchanged,
    /// Stored content differed; updated and committed.
    Updated,
    /// The template is listed but its content could not be read back.
    ContentUnavailable,
}

impl TemplateOutcome {
    /// Whether the controller received a create or update.
    pub fn wrote_controller(self) -> bool {
        matches!(self, Self::Created | Self::Updated)
    }

    /// The human-readable report line for template `name`.
    pub fn report_line(self, name: &str) -> String {
        match self {
            Self::Created => format!("New template \"{name}\" created and committed"),
            Self::Unchanged => {
                format!("Template \"{name}\" has not changed, identical template on Catalyst Center")
            }
            Self::Updated => format!(
                "Template \"{name}\" has changed, updated and committed on Catalyst Center"
            ),
            Self::ContentUnavailable => format!(
                "Template \"{name}\" exists but its content is unavailable, skipped"
            ),
        }
    }
}

impl fmt::Display for TemplateOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Created => "created",
            Self::Unchanged => "unchanged",
            Self::Updated => "updated",
            Self::ContentUnavailable => "content unavailable",
        })
    }
}
