//! Letter service: the operations the HTTP surface exposes.
//!
//! Every operation takes the request's [`SessionContext`]; the token is read
//! through it so an expired session fails with `NotAuthenticated` before any
//! remote call is made.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use surat_content::RenderedTemplate;
use surat_core::config::SourceSettings;
use surat_core::document::download_file_name;
use surat_core::forms::describe_fields;
use surat_core::letter_type::{fallback_catalog, find as find_letter_type};
use surat_core::resident::{Page, find_by_nik, search};
use surat_core::variables::FormData;
use surat_core::{
    Error as CoreError, ExportFormat, ExportedFile, FieldDescriptor, LetterType, Organization,
    Permissions, ProcessedDocumentHandle, Resident, SessionContext, SuratConfig, UserProfile,
    VariableMap, build_variables, dates,
};

use crate::client::GoogleClient;
use crate::error::Result;
use crate::materializer::Materializer;

/// Default page size for resident search.
pub const DEFAULT_PER_PAGE: usize = 10;

/// Input for preview and materialization.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LetterRequest {
    #[serde(alias = "letter_type")]
    pub letter_type: String,
    pub nik: String,
    #[serde(default, alias = "form_data")]
    pub form_data: FormData,
    #[serde(default, alias = "file_name")]
    pub file_name: Option<String>,
}

/// Catalog entry plus its field descriptors.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LetterForm {
    pub letter_type: LetterType,
    pub fields: Vec<FieldDescriptor>,
}

/// Substituted HTML and the map that produced it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LetterPreview {
    pub title: String,
    pub html: String,
    pub variables: VariableMap,
    pub letter_number: String,
    pub file_name: String,
}

/// Profile, expiry, and permission summary for `GET /session`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub profile: UserProfile,
    pub expires_at: chrono::DateTime<chrono::Utc>,
    pub permissions: Permissions,
    pub access_level: surat_core::AccessLevel,
    pub guidance: Option<&'static str>,
}

/// Resolved inputs shared by preview and materialization.
struct Resolved {
    letter_type: LetterType,
    resident: Resident,
    template: RenderedTemplate,
    variables: VariableMap,
    file_name: String,
}

#[derive(Debug, Clone)]
pub struct LetterService {
    client: GoogleClient,
    materializer: Materializer,
    sources: SourceSettings,
    catalog_spreadsheet_id: String,
    organization: Organization,
}

impl LetterService {
    pub fn new(config: &SuratConfig) -> Result<Self> {
        let client = GoogleClient::new(&config.google)?;
        Ok(Self {
            materializer: Materializer::new(client.clone()),
            client,
            sources: config.sources.clone(),
            catalog_spreadsheet_id: config.catalog_spreadsheet_id().to_string(),
            organization: config.organization.clone(),
        })
    }

    pub fn client(&self) -> &GoogleClient {
        &self.client
    }

    // ========================================================================
    // Catalog
    // ========================================================================

    /// The letter-type catalog, or the built-in list when the sheet cannot
    /// be read. An expired session still fails.
    #[tracing::instrument(skip_all)]
    pub async fn letter_types(&self, session: &SessionContext) -> Result<Vec<LetterType>> {
        let token = session.token()?;
        let fetched = self
            .client
            .fetch_letter_types(token, &self.catalog_spreadsheet_id, &self.sources.catalog_range)
            .await;
        match fetched {
            Ok(types) if !types.is_empty() => Ok(types),
            Ok(_) => {
                tracing::warn!("Letter-type catalog is empty, using built-in catalog");
                Ok(fallback_catalog())
            }
            Err(e) if e.is_not_authenticated() => Err(e),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load letter-type catalog, using built-in catalog");
                Ok(fallback_catalog())
            }
        }
    }

    pub async fn letter_type(&self, session: &SessionContext, id: &str) -> Result<LetterType> {
        let catalog = self.letter_types(session).await?;
        find_letter_type(&catalog, id)
            .cloned()
            .ok_or_else(|| CoreError::TemplateNotFound { id: id.to_string() }.into())
    }

    // ========================================================================
    // Residents
    // ========================================================================

    #[tracing::instrument(skip_all)]
    pub async fn residents(&self, session: &SessionContext) -> Result<Vec<Resident>> {
        let token = session.token()?;
        let residents = self
            .client
            .fetch_residents(
                token,
                &self.sources.residents_spreadsheet_id,
                &self.sources.residents_range,
            )
            .await?;
        tracing::debug!(count = residents.len(), "Loaded residents");
        Ok(residents)
    }

    pub async fn search(
        &self,
        session: &SessionContext,
        query: &str,
        page: usize,
        per_page: usize,
    ) -> Result<Page<Resident>> {
        let residents = self.residents(session).await?;
        Ok(search(&residents, query, page, per_page))
    }

    pub async fn resident(&self, session: &SessionContext, nik: &str) -> Result<Resident> {
        let residents = self.residents(session).await?;
        find_by_nik(&residents, nik)
            .cloned()
            .ok_or_else(|| CoreError::ResidentNotFound { nik: nik.to_string() }.into())
    }

    // ========================================================================
    // Letters
    // ========================================================================

    /// Field descriptors for a letter type, pre-filled when `nik` is given.
    pub async fn form(
        &self,
        session: &SessionContext,
        letter_type_id: &str,
        nik: Option<&str>,
    ) -> Result<LetterForm> {
        let letter_type = self.letter_type(session, letter_type_id).await?;
        let values = match nik.filter(|n| !n.trim().is_empty()) {
            Some(nik) => {
                let resident = self.resident(session, nik).await?;
                Some(build_variables(
                    &resident,
                    &letter_type,
                    &FormData::new(),
                    &self.organization,
                    dates::today(),
                ))
            }
            None => None,
        };
        let fields = describe_fields(&letter_type, values.as_ref());
        Ok(LetterForm {
            letter_type,
            fields,
        })
    }

    /// Substitute the resolved map into the template's HTML.
    #[tracing::instrument(skip(self, session, request), fields(letter_type = %request.letter_type))]
    pub async fn preview(
        &self,
        session: &SessionContext,
        request: &LetterRequest,
    ) -> Result<LetterPreview> {
        let resolved = self.resolve(session, request, dates::today()).await?;
        let html = resolved.template.render_html(&resolved.variables);
        Ok(LetterPreview {
            title: resolved.template.title,
            html,
            letter_number: resolved
                .variables
                .get("nomor_surat")
                .unwrap_or_default()
                .to_string(),
            variables: resolved.variables,
            file_name: resolved.file_name,
        })
    }

    /// Copy the template and fill it from the same resolved map as the preview.
    #[tracing::instrument(skip(self, session, request), fields(letter_type = %request.letter_type))]
    pub async fn materialize(
        &self,
        session: &SessionContext,
        request: &LetterRequest,
    ) -> Result<ProcessedDocumentHandle> {
        let date = dates::today();
        let resolved = self.resolve(session, request, date).await?;
        let token = session.token()?;
        let handle = self
            .materializer
            .create(
                token,
                &resolved.letter_type.doc_id,
                &resolved.file_name,
                &resolved.variables,
                &resolved.template.full_text,
                date,
            )
            .await?;
        tracing::info!(
            document_id = %handle.document_id,
            nik = %resolved.resident.nik,
            "Materialized letter"
        );
        Ok(handle)
    }

    pub async fn export(
        &self,
        session: &SessionContext,
        document_id: &str,
        format: ExportFormat,
        file_name: &str,
    ) -> Result<ExportedFile> {
        let token = session.token()?;
        self.materializer
            .export(token, document_id, format, file_name)
            .await
    }

    /// Best-effort delete; never fails.
    pub async fn dispose(&self, session: &SessionContext, document_id: &str) {
        match session.token() {
            Ok(token) => self.materializer.dispose(token, document_id).await,
            Err(e) => tracing::warn!(document_id, error = %e, "Skipping cleanup"),
        }
    }

    // ========================================================================
    // Session
    // ========================================================================

    pub async fn permissions(&self, session: &SessionContext) -> Result<Permissions> {
        let token = session.token()?;
        self.client
            .check_permissions(token, &self.sources.residents_spreadsheet_id)
            .await
    }

    /// Fresh profile from userinfo (falling back to the session snapshot)
    /// plus the permission probe.
    pub async fn session_summary(&self, session: &SessionContext) -> Result<SessionSummary> {
        let token = session.token()?;
        let (profile, permissions) = tokio::join!(
            self.client.fetch_profile(token),
            self.permissions(session)
        );
        let permissions = permissions?;
        let profile = match profile {
            Ok(profile) => profile,
            Err(e) if e.is_not_authenticated() => return Err(e),
            Err(e) => {
                tracing::debug!(error = %e, "Profile lookup failed, using session snapshot");
                session.profile().clone()
            }
        };
        Ok(SessionSummary {
            profile,
            expires_at: session.expires_at(),
            access_level: permissions.access_level(),
            guidance: permissions.guidance(),
            permissions,
        })
    }

    async fn resolve(
        &self,
        session: &SessionContext,
        request: &LetterRequest,
        date: NaiveDate,
    ) -> Result<Resolved> {
        if request.nik.trim().is_empty() {
            return Err(CoreError::validation("nik is required").into());
        }
        let letter_type = self.letter_type(session, &request.letter_type).await?;
        if !letter_type.has_template() {
            return Err(CoreError::TemplateNotFound {
                id: letter_type.id.clone(),
            }
            .into());
        }

        let resident = self.resident(session, &request.nik).await?;
        let token = session.token()?;
        let template = self.client.fetch_template(token, &letter_type.doc_id).await?;

        let variables = build_variables(
            &resident,
            &letter_type,
            &request.form_data,
            &self.organization,
            date,
        );
        let file_name = request
            .file_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| download_file_name(&letter_type.title, &resident.nama_lengkap));

        Ok(Resolved {
            letter_type,
            resident,
            template,
            variables,
            file_name,
        })
    }
}
