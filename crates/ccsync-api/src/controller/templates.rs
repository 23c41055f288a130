// Template programmer endpoints
//
// Projects, templates, and version commits. Create and update are
// asynchronous on the controller: they return a task handle and the
// template is only queryable once that task finishes.

use serde_json::json;
use tracing::debug;

use crate::controller::client::ControllerClient;
use crate::controller::models::{
    Project, TaskHandle, TemplateDetail, TemplateRequest, TemplateSpec, VersionRequest,
};
use crate::error::Error;

const PROJECT_PATH: &str = "dna/intent/api/v1/template-programmer/project";
const TEMPLATE_PATH: &str = "dna/intent/api/v1/template-programmer/template";
const VERSION_PATH: &str = "dna/intent/api/v1/template-programmer/template/version";
const TEMPLATE_DETAILS_PATH: &str = "dna/intent/api/v2/template-programmer/template";

impl ControllerClient {
    /// Look up a project by exact name.
    ///
    /// `GET /dna/intent/api/v1/template-programmer/project?name={name}`
    pub async fn find_project(&self, name: &str) -> Result<Option<Project>, Error> {
        let projects: Vec<Project> = self.get_raw(PROJECT_PATH, &[("name", name)]).await?;
        Ok(projects.into_iter().find(|p| p.name == name))
    }

    /// Create an empty project.
    ///
    /// `POST /dna/intent/api/v1/template-programmer/project`. The project is
    /// not visible until the returned task completes.
    pub async fn create_project(&self, name: &str) -> Result<TaskHandle, Error> {
        debug!(name, "creating project");
        self.post(PROJECT_PATH, &json!({ "name": name })).await
    }

    /// Create a template in `project_id`.
    ///
    /// `POST /dna/intent/api/v1/template-programmer/project/{project_id}/template`
    pub async fn create_template(
        &self,
        project_id: &str,
        spec: &TemplateSpec,
    ) -> Result<TaskHandle, Error> {
        debug!(name = %spec.name, "creating template");
        let path = format!("{PROJECT_PATH}/{project_id}/template");
        self.post(&path, &TemplateRequest::new(spec, project_id, None))
            .await
    }

    /// Replace the content and metadata of an existing template.
    ///
    /// `PUT /dna/intent/api/v1/template-programmer/template`
    pub async fn update_template(
        &self,
        template_id: &str,
        project_id: &str,
        spec: &TemplateSpec,
    ) -> Result<TaskHandle, Error> {
        debug!(name = %spec.name, template_id, "updating template");
        self.put(
            TEMPLATE_PATH,
            &TemplateRequest::new(spec, project_id, Some(template_id)),
        )
        .await
    }

    /// Snapshot the template's current content as a new version.
    ///
    /// `POST /dna/intent/api/v1/template-programmer/template/version`
    pub async fn commit_template(&self, template_id: &str, comment: &str) -> Result<(), Error> {
        debug!(template_id, "committing template version");
        let _: serde_json::Value = self
            .post(
                VERSION_PATH,
                &VersionRequest {
                    comments: comment,
                    template_id,
                },
            )
            .await?;
        Ok(())
    }

    /// Stored content of the named template in `project_id`, if any.
    ///
    /// `GET /dna/intent/api/v2/template-programmer/template?name=&projectId=`
    pub async fn get_template_content(
        &self,
        project_id: &str,
        name: &str,
    ) -> Result<Option<String>, Error> {
        let details: Vec<TemplateDetail> = self
            .get(
                TEMPLATE_DETAILS_PATH,
                &[("name", name), ("projectId", project_id)],
            )
            .await?;
        Ok(details.into_iter().next().and_then(|d| d.template_content))
    }
}
