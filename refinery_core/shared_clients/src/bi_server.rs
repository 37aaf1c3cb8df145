use crate::model::{DatabaseAccessType, DatabaseConnection, DatabaseType, PublishStatus};
use crate::BiServerClientError;
use common::config::components::acl::DataSourceAclModel;
use common::config::components::connections::{
    DatabaseMeta, FORCE_IDENTIFIERS_TO_LOWERCASE, PORT_NUMBER, QUOTE_ALL_FIELDS,
};
use common::config::components::server::BiServerConnection;
use common::utils::Variables;
use log::{debug, info, warn};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response, StatusCode};

pub const CONNECTION_GET_PATH: &str = "plugin/data-access/api/connection/get";
pub const CONNECTION_ADD_PATH: &str = "plugin/data-access/api/connection/add";
pub const CONNECTION_UPDATE_PATH: &str = "plugin/data-access/api/connection/update";
pub const MONDRIAN_POST_ANALYSIS_PATH: &str = "plugin/data-access/api/mondrian/postAnalysis";
pub const METADATA_IMPORT_PATH: &str = "plugin/data-access/api/metadata/import";
pub const DSW_IMPORT_PATH: &str = "plugin/data-access/api/datasource/dsw/import";

const XMI_EXTENSION: &str = ".xmi";

/// Client for the BI server data access api.
///
/// A single http client is reused for every request and each request carries
/// basic auth credentials from the server connection.
#[derive(Debug, Clone)]
pub struct BiServerClient {
    connection: BiServerConnection,
    force_overwrite: bool,
    acl_model: Option<DataSourceAclModel>,
    database_meta: Option<DatabaseMeta>,
    variables: Variables,
    client: Client,
}

impl BiServerClient {
    pub fn new(connection: BiServerConnection) -> Result<Self, BiServerClientError> {
        let client = Client::builder().build()?;
        Ok(Self {
            connection,
            force_overwrite: false,
            acl_model: None,
            database_meta: None,
            variables: Variables::from_env(),
            client,
        })
    }

    pub fn set_force_overwrite(&mut self, force_overwrite: bool) {
        self.force_overwrite = force_overwrite;
    }

    /// An empty acl is treated as no acl.
    pub fn set_acl_model(&mut self, acl_model: Option<DataSourceAclModel>) {
        self.acl_model = acl_model.filter(|acl| !acl.is_empty());
    }

    pub fn set_database_meta(&mut self, database_meta: Option<DatabaseMeta>) {
        self.database_meta = database_meta;
    }

    pub fn set_variables(&mut self, variables: Variables) {
        self.variables = variables;
    }

    /// Multipart body shared by the metadata and dsw imports.
    fn domain_form(&self, xmi: Vec<u8>, domain_id: &str) -> Form {
        let form = Form::new()
            .text("domainId", domain_id.to_string())
            .part("metadataFile", Part::bytes(xmi).file_name(domain_id.to_string()))
            .text("overwrite", self.force_overwrite.to_string());
        match self.acl_model.as_ref().map(serde_json::to_string) {
            Some(Ok(acl)) => form.text("acl", acl),
            Some(Err(err)) => {
                warn!("Skipping acl, unable to encode it: {}", err);
                form
            }
            None => form,
        }
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.basic_auth(&self.connection.user_id, Some(&self.connection.password))
    }

    async fn send(&self, builder: RequestBuilder, what: &str) -> Option<Response> {
        match self.authorized(builder).send().await {
            Ok(resp) => Some(resp),
            Err(err) => {
                warn!("Failed to send {} request: {}", what, err);
                None
            }
        }
    }

    /// Looks up a connection by name on the server.
    ///
    /// Any failure (no name, transport error, non 200 status, unreadable
    /// body) is reported as `None`.
    pub async fn connection_name_exists(&self, name: Option<&str>) -> Option<DatabaseConnection> {
        let name = name?;
        let url = self.connection.endpoint(CONNECTION_GET_PATH);
        let resp = self
            .send(self.client.get(url).query(&[("name", name)]), "connection lookup")
            .await?;

        if resp.status() != StatusCode::OK {
            debug!(
                "Connection '{}' not found on server, status {}",
                name,
                resp.status().as_u16()
            );
            return None;
        }

        let body = match resp.text().await {
            Ok(body) => body,
            Err(err) => {
                warn!("Failed to read connection lookup response: {}", err);
                return None;
            }
        };
        match serde_json::from_str::<DatabaseConnection>(&body) {
            Ok(conn) => Some(conn),
            Err(err) => {
                debug!("Unreadable connection payload for '{}': {}", name, err);
                None
            }
        }
    }

    pub fn database_type(plugin_id: &str) -> Option<DatabaseType> {
        DatabaseType::from_plugin_id(plugin_id)
    }

    /// Builds the server side connection from the configured database meta,
    /// expanding `${VAR}` placeholders in the credential and host fields.
    pub fn build_database_connection(
        &self,
        id: Option<&str>,
    ) -> Result<DatabaseConnection, BiServerClientError> {
        let meta = self.database_meta.as_ref().ok_or_else(|| {
            BiServerClientError::missing_config("no database connection set for publishing")
        })?;
        let vars = &self.variables;

        Ok(DatabaseConnection {
            id: id.map(str::to_string),
            name: meta.name.clone(),
            database_type: Self::database_type(&meta.plugin_id),
            access_type: DatabaseAccessType::Native,
            hostname: vars.substitute(&meta.hostname),
            database_name: vars.substitute(&meta.database_name),
            database_port: meta
                .attribute(PORT_NUMBER)
                .map(|port| vars.substitute(port))
                .unwrap_or_default(),
            username: vars.substitute(&meta.username),
            password: vars.substitute(&meta.password),
            extra_options: meta.extra_options.clone(),
            attributes: meta.attributes.clone(),
            forcing_identifiers_to_lower_case: meta.attribute_flag(FORCE_IDENTIFIERS_TO_LOWERCASE),
            quote_all_fields: meta.attribute_flag(QUOTE_ALL_FIELDS),
        })
    }

    /// Publishes the configured database connection, adding it or updating
    /// the existing definition with the given id.
    pub async fn publish_data_source(&self, update: bool, id: Option<&str>) -> bool {
        match self.build_database_connection(id) {
            Ok(conn) => self.update_connection(&conn, update).await,
            Err(err) => {
                warn!("Unable to publish data source: {}", err);
                false
            }
        }
    }

    pub async fn update_connection(&self, conn: &DatabaseConnection, update: bool) -> bool {
        let path = if update {
            CONNECTION_UPDATE_PATH
        } else {
            CONNECTION_ADD_PATH
        };
        let url = self.connection.endpoint(path);
        let Some(resp) = self
            .send(self.client.post(url).json(conn), "connection publish")
            .await
        else {
            return false;
        };

        if resp.status() == StatusCode::OK {
            info!("Published connection '{}'", conn.name);
            true
        } else {
            warn!(
                "Publishing connection '{}' failed with status {}",
                conn.name,
                resp.status().as_u16()
            );
            false
        }
    }

    /// Uploads a Mondrian schema as an analysis catalog.
    pub async fn publish_mondrian_schema(
        &self,
        schema: impl Into<Vec<u8>>,
        catalog_name: &str,
        datasource_info: &str,
        overwrite: bool,
    ) -> PublishStatus {
        let form = Form::new()
            .text(
                "parameters",
                format!("Datasource={datasource_info};retainInlineAnnotations=true"),
            )
            .part(
                "uploadInput",
                Part::bytes(schema.into()).file_name(format!("{catalog_name}.mondrian.xml")),
            )
            .text("catalogName", catalog_name.to_string())
            .text("overwrite", overwrite.to_string())
            .text("xmlaEnabledFlag", "true");

        let url = self.connection.endpoint(MONDRIAN_POST_ANALYSIS_PATH);
        let Some(resp) = self
            .send(self.client.post(url).multipart(form), "mondrian publish")
            .await
        else {
            return PublishStatus::Failed;
        };

        let status = resp.status();
        if status != StatusCode::OK {
            warn!(
                "Publishing mondrian schema '{}' failed, status {}",
                catalog_name,
                status.as_u16()
            );
            return PublishStatus::Failed;
        }
        let body = resp.text().await.unwrap_or_default();
        match PublishStatus::from_body(&body) {
            Some(PublishStatus::CatalogExists) => {
                info!("Catalog '{}' already exists on server", catalog_name);
                PublishStatus::CatalogExists
            }
            Some(PublishStatus::Success) => {
                info!("Published mondrian schema '{}'", catalog_name);
                PublishStatus::Success
            }
            _ => {
                warn!(
                    "Publishing mondrian schema '{}' failed, status {}",
                    catalog_name,
                    status.as_u16()
                );
                PublishStatus::Failed
            }
        }
    }

    /// Imports a metadata model. Only a 200 response carrying the success
    /// code counts as published.
    pub async fn publish_metadata_file(
        &self,
        xmi: impl Into<Vec<u8>>,
        domain_id: &str,
    ) -> PublishStatus {
        let form = self.domain_form(xmi.into(), domain_id);

        let url = self.connection.endpoint(METADATA_IMPORT_PATH);
        let Some(resp) = self
            .send(self.client.put(url).multipart(form), "metadata publish")
            .await
        else {
            return PublishStatus::Failed;
        };

        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        if status == StatusCode::OK && PublishStatus::from_body(&body) == Some(PublishStatus::Success)
        {
            info!("Published metadata domain '{}'", domain_id);
            PublishStatus::Success
        } else {
            warn!(
                "Publishing metadata domain '{}' failed, status {}",
                domain_id,
                status.as_u16()
            );
            PublishStatus::Failed
        }
    }

    /// Imports a data source wizard model. The domain id must name an
    /// `.xmi` file.
    pub async fn publish_dsw(
        &self,
        xmi: impl Into<Vec<u8>>,
        domain_id: &str,
    ) -> Result<PublishStatus, BiServerClientError> {
        if !domain_id.ends_with(XMI_EXTENSION) {
            return Err(BiServerClientError::invalid_argument(format!(
                "domain id '{domain_id}' must end with {XMI_EXTENSION}"
            )));
        }

        let form = self.domain_form(xmi.into(), domain_id);

        let url = self.connection.endpoint(DSW_IMPORT_PATH);
        let Some(resp) = self
            .send(self.client.put(url).multipart(form), "dsw publish")
            .await
        else {
            return Ok(PublishStatus::Failed);
        };

        match resp.status() {
            StatusCode::OK | StatusCode::CREATED => {
                info!("Published data source wizard model '{}'", domain_id);
                Ok(PublishStatus::Success)
            }
            status => {
                warn!(
                    "Publishing data source wizard model '{}' failed, status {}",
                    domain_id,
                    status.as_u16()
                );
                Ok(PublishStatus::Failed)
            }
        }
    }
}
