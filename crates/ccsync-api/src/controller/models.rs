// Wire types for the Catalyst Center Intent API.
//
// Most endpoints wrap their payload as `{ "response": ..., "version": ... }`;
// the template-programmer project listing and the SDA role lookup do not.

use serde::{Deserialize, Serialize};

/// The `{ "response": ... }` envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub response: T,
}

/// `POST /dna/system/api/v1/auth/token` result.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    #[serde(rename = "Token")]
    pub token: String,
}

// ── Template programmer ─────────────────────────────────────────────

/// A template-programmer project with the summaries of its templates.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub templates: Vec<TemplateSummary>,
}

impl Project {
    /// Find a template by name in this project's listing.
    pub fn find_template(&self, name: &str) -> Option<&TemplateSummary> {
        self.templates.iter().find(|t| t.name == name)
    }
}

/// Name and id of a template inside a project listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TemplateSummary {
    pub name: String,
    pub id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TemplateDetail {
    #[serde(default)]
    pub template_content: Option<String>,
}

/// Everything needed to create or update a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSpec {
    pub name: String,
    pub content: String,
    pub language: String,
    /// Product families, e.g. `Routers`, `Switches and Hubs`.
    pub device_types: Vec<String>,
    pub software_type: String,
    pub author: String,
    pub description: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DeviceTypeRef<'a> {
    pub product_family: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TemplateRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<&'a str>,
    pub project_id: &'a str,
    pub name: &'a str,
    pub template_content: &'a str,
    pub language: &'a str,
    pub device_types: Vec<DeviceTypeRef<'a>>,
    pub software_type: &'a str,
    pub author: &'a str,
    pub description: &'a str,
}

impl<'a> TemplateRequest<'a> {
    pub fn new(spec: &'a TemplateSpec, project_id: &'a str, id: Option<&'a str>) -> Self {
        Self {
            id,
            project_id,
            name: &spec.name,
            template_content: &spec.content,
            language: &spec.language,
            device_types: spec
                .device_types
                .iter()
                .map(|family| DeviceTypeRef {
                    product_family: family,
                })
                .collect(),
            software_type: &spec.software_type,
            author: &spec.author,
            description: &spec.description,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VersionRequest<'a> {
    pub comments: &'a str,
    pub template_id: &'a str,
}

// ── Tasks ───────────────────────────────────────────────────────────

/// Handle returned by asynchronous controller writes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskHandle {
    #[serde(default)]
    pub task_id: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// `GET /dna/intent/api/v1/task/{id}` payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStatus {
    #[serde(default)]
    pub is_error: bool,
    #[serde(default)]
    pub progress: Option<String>,
    #[serde(default)]
    pub failure_reason: Option<String>,
    #[serde(default)]
    pub end_time: Option<i64>,
}

impl TaskStatus {
    pub fn is_finished(&self) -> bool {
        self.is_error || self.end_time.is_some()
    }
}

// ── Inventory ───────────────────────────────────────────────────────

/// One row of `GET /dna/intent/api/v1/network-device`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkDevice {
    pub id: String,
    #[serde(default)]
    pub hostname: Option<String>,
    #[serde(default)]
    pub management_ip_address: String,
    #[serde(default)]
    pub software_version: Option<String>,
    /// Platform description, e.g. `Cisco Catalyst 9300 Switch`.
    #[serde(rename = "type", default)]
    pub device_type: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    /// Product family, e.g. `Switches and Hubs` or `Unified AP`.
    #[serde(default)]
    pub family: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DeviceDetail {
    #[serde(default)]
    pub location: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FabricRoleResponse {
    #[serde(default)]
    pub roles: Option<Vec<String>>,
}

/// Outcome of the SDA fabric role lookup for one device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FabricRoles {
    /// The device participates in a fabric with these roles.
    Member(Vec<String>),
    /// The controller answered that the device has no fabric role.
    NotInFabric,
    /// The controller rejected the lookup for a reason other than auth.
    /// Non-fabric devices commonly land here.
    Unavailable(String),
}

impl FabricRoles {
    /// Roles to record; empty unless the device is a fabric member.
    pub fn into_roles(self) -> Vec<String> {
        match self {
            Self::Member(roles) => roles,
            Self::NotInFabric | Self::Unavailable(_) => Vec::new(),
        }
    }
}

// ── Sites ───────────────────────────────────────────────────────────

/// One node of `GET /dna/intent/api/v1/site`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteResponse {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub site_name_hierarchy: String,
}
