//! Asistente KYC en tres pasos
//!
//! `Documents → OperationalDetails → Review`. El estado sólo cambia a través
//! de `KycWizard::apply`; una acción rechazada deja el estado intacto.

use serde::Serialize;

use crate::models::{DocumentKind, Identity, OperationalField, OperationalInfo, UploadMethod};
use crate::utils::errors::{AppError, AppResult};
use crate::utils::validation::{validate_absolute_url, validate_file_size, MAX_UPLOAD_BYTES};

pub const MSG_FILE_TOO_LARGE: &str = "File size must be under 5MB.";
pub const MSG_MISSING_FILES: &str = "Please upload all required company documents.";
pub const MSG_MISSING_LINKS: &str = "Please provide all required document links.";
pub const MSG_INVALID_LINKS: &str = "Please provide valid URLs for all document links.";
pub const MSG_NOT_SIGNED_IN: &str = "No user is logged in. Please sign in again.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum WizardStep {
    #[default]
    Documents,
    OperationalDetails,
    Review,
}

impl WizardStep {
    pub fn index(&self) -> u8 {
        match self {
            WizardStep::Documents => 0,
            WizardStep::OperationalDetails => 1,
            WizardStep::Review => 2,
        }
    }
}

/// Fichero adjuntado en memoria
#[derive(Debug, Clone, PartialEq)]
pub struct AttachedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Acciones del asistente
#[derive(Debug, Clone)]
pub enum WizardAction {
    SelectMethod(UploadMethod),
    AttachFile(DocumentKind, AttachedFile),
    SetLink(DocumentKind, String),
    ClearDocument(DocumentKind),
    SetOperational(OperationalField, String),
    Next,
    Back,
    Reset,
}

/// Documentos listos para enviar, todos por el mismo método
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionDocuments {
    Files(Vec<(DocumentKind, AttachedFile)>),
    Links(Vec<(DocumentKind, String)>),
}

impl SubmissionDocuments {
    pub fn method(&self) -> UploadMethod {
        match self {
            SubmissionDocuments::Files(_) => UploadMethod::File,
            SubmissionDocuments::Links(_) => UploadMethod::Link,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct KycSubmission {
    pub documents: SubmissionDocuments,
    pub operational_info: OperationalInfo,
}

#[derive(Debug, Clone)]
pub struct KycWizard {
    step: WizardStep,
    method: UploadMethod,
    files: [Option<AttachedFile>; 5],
    links: [String; 5],
    operational_info: OperationalInfo,
    max_file_bytes: usize,
}

impl Default for KycWizard {
    fn default() -> Self {
        Self::new(MAX_UPLOAD_BYTES)
    }
}

impl KycWizard {
    pub fn new(max_file_bytes: usize) -> Self {
        Self {
            step: WizardStep::Documents,
            method: UploadMethod::File,
            files: Default::default(),
            links: Default::default(),
            operational_info: OperationalInfo::default(),
            max_file_bytes,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn method(&self) -> UploadMethod {
        self.method
    }

    pub fn operational_info(&self) -> &OperationalInfo {
        &self.operational_info
    }

    pub fn file(&self, kind: DocumentKind) -> Option<&AttachedFile> {
        self.files[kind.index()].as_ref()
    }

    pub fn link(&self, kind: DocumentKind) -> &str {
        &self.links[kind.index()]
    }

    /// Aplicar una acción
    pub fn apply(&mut self, action: WizardAction) -> AppResult<()> {
        match action {
            WizardAction::SelectMethod(method) => {
                self.method = method;
                self.clear_documents();
            }
            WizardAction::AttachFile(kind, file) => {
                if self.method != UploadMethod::File {
                    return Err(AppError::ValidationError(
                        "Select the file upload method to attach documents.".to_string(),
                    ));
                }
                validate_file_size(file.bytes.len(), self.max_file_bytes)
                    .map_err(|_| AppError::ValidationError(MSG_FILE_TOO_LARGE.to_string()))?;
                self.files[kind.index()] = Some(file);
            }
            WizardAction::SetLink(kind, url) => {
                if self.method != UploadMethod::Link {
                    return Err(AppError::ValidationError(
                        "Select the link method to provide document URLs.".to_string(),
                    ));
                }
                self.links[kind.index()] = url;
            }
            WizardAction::ClearDocument(kind) => {
                self.files[kind.index()] = None;
                self.links[kind.index()].clear();
            }
            WizardAction::SetOperational(field, value) => {
                self.operational_info.set(field, value);
            }
            WizardAction::Next => {
                self.step = match self.step {
                    WizardStep::Documents => {
                        self.validate_documents()?;
                        WizardStep::OperationalDetails
                    }
                    WizardStep::OperationalDetails | WizardStep::Review => WizardStep::Review,
                };
            }
            WizardAction::Back => {
                self.step = match self.step {
                    WizardStep::Documents | WizardStep::OperationalDetails => WizardStep::Documents,
                    WizardStep::Review => WizardStep::OperationalDetails,
                };
            }
            WizardAction::Reset => {
                *self = Self::new(self.max_file_bytes);
            }
        }
        Ok(())
    }

    /// Envío listo para el servicio: exige el paso de revisión y un usuario
    pub fn submission(&self, identity: Option<&Identity>) -> AppResult<KycSubmission> {
        if identity.is_none() {
            return Err(AppError::Unauthorized(MSG_NOT_SIGNED_IN.to_string()));
        }
        if self.step != WizardStep::Review {
            return Err(AppError::ValidationError(
                "Complete all steps before submitting.".to_string(),
            ));
        }
        // El paso 0 ya validó; se revalida por si hubo ClearDocument después
        self.validate_documents()?;

        let documents = match self.method {
            UploadMethod::File => SubmissionDocuments::Files(
                DocumentKind::ALL
                    .iter()
                    .filter_map(|kind| self.file(*kind).map(|file| (*kind, file.clone())))
                    .collect(),
            ),
            UploadMethod::Link => SubmissionDocuments::Links(
                DocumentKind::ALL
                    .iter()
                    .map(|kind| (*kind, self.link(*kind).trim().to_string()))
                    .collect(),
            ),
        };

        Ok(KycSubmission {
            documents,
            operational_info: self.operational_info.clone(),
        })
    }

    fn clear_documents(&mut self) {
        self.files = Default::default();
        self.links = Default::default();
    }

    fn validate_documents(&self) -> AppResult<()> {
        match self.method {
            UploadMethod::File => {
                if self.files.iter().any(Option::is_none) {
                    return Err(AppError::ValidationError(MSG_MISSING_FILES.to_string()));
                }
            }
            UploadMethod::Link => {
                if self.links.iter().any(|link| link.trim().is_empty()) {
                    return Err(AppError::ValidationError(MSG_MISSING_LINKS.to_string()));
                }
                if self.links.iter().any(|link| validate_absolute_url(link).is_err()) {
                    return Err(AppError::ValidationError(MSG_INVALID_LINKS.to_string()));
                }
            }
        }
        Ok(())
    }
}
