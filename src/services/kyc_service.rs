//! Envío del registro KYC
//!
//! Sube los ficheros en orden fijo (GST, PAN, constitución, firmante, banco)
//! informando del progreso, y escribe el registro de la cuenta una sola vez
//! cuando todo se ha resuelto. Si algo falla, la cuenta queda como estaba.

use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info};

use super::kyc_workflow::{KycSubmission, SubmissionDocuments, MSG_MISSING_FILES, MSG_MISSING_LINKS};
use crate::models::{Account, DocumentKind, Identity, KycDocuments, KycRecord, KycStatus};
use crate::repositories::UserRepository;
use crate::storage::{object_path, ObjectStorage};
use crate::utils::errors::{AppError, AppResult};

/// Carpeta raíz de los documentos KYC en el almacenamiento
pub const KYC_CATEGORY: &str = "kyc-documents";

/// Progreso tras cada subida en modo fichero
const FILE_PROGRESS: [u8; 5] = [25, 40, 55, 70, 85];

pub struct KycService {
    users: UserRepository,
    storage: Arc<dyn ObjectStorage>,
}

impl KycService {
    pub fn new(users: UserRepository, storage: Arc<dyn ObjectStorage>) -> Self {
        Self { users, storage }
    }

    /// Enviar el KYC del usuario; `on_progress` recibe porcentajes crecientes
    pub async fn submit<F>(
        &self,
        identity: &Identity,
        submission: KycSubmission,
        mut on_progress: F,
    ) -> AppResult<Account>
    where
        F: FnMut(u8) + Send,
    {
        let account_id = identity.owner_id();
        let method = submission.documents.method();
        let documents = in_upload_order(submission.documents)?;
        info!("📝 Envío KYC de {} por {:?}", account_id, method);
        on_progress(10);

        let documents = match documents {
            SubmissionDocuments::Files(files) => {
                let mut documents = KycDocuments::default();
                for (index, (kind, file)) in files.into_iter().enumerate() {
                    let path = object_path(KYC_CATEGORY, account_id, kind.as_str(), &file.file_name, Utc::now());
                    let stored = self
                        .storage
                        .put(&path, file.bytes, file.content_type.as_deref())
                        .await
                        .map_err(|e| {
                            error!("❌ Subida KYC fallida ({}): {}", kind.as_str(), e);
                            submission_failed(e)
                        })?;
                    documents.set(kind, stored.url);
                    on_progress(FILE_PROGRESS.get(index).copied().unwrap_or(85));
                }
                documents
            }
            SubmissionDocuments::Links(links) => {
                let mut documents = KycDocuments::default();
                for (kind, url) in links {
                    documents.set(kind, url);
                }
                on_progress(50);
                on_progress(85);
                documents
            }
        };

        let record = KycRecord {
            documents,
            document_upload_method: method,
            operational_info: submission.operational_info,
            kyc_status: KycStatus::Pending,
            kyc_submitted_at: Utc::now(),
        };

        let account = self
            .users
            .write_kyc(account_id, &record)
            .await
            .map_err(submission_failed)?;
        on_progress(100);
        info!("✅ KYC de {} pendiente de revisión", account_id);
        Ok(account)
    }

    /// Cuenta del llamador con su registro KYC
    pub async fn account(&self, identity: &Identity) -> AppResult<Account> {
        self.users.find_by_id(identity.owner_id()).await
    }

    /// Estado normalizado de la cuenta
    pub async fn status(&self, identity: &Identity) -> AppResult<KycStatus> {
        Ok(self.account(identity).await?.kyc_status())
    }
}

/// Ordenar por tipo de documento y exigir los cinco, uno de cada
fn in_upload_order(documents: SubmissionDocuments) -> AppResult<SubmissionDocuments> {
    fn ordered<T>(mut items: Vec<(DocumentKind, T)>, missing: &str) -> AppResult<Vec<(DocumentKind, T)>> {
        items.sort_by_key(|(kind, _)| kind.index());
        items.dedup_by_key(|(kind, _)| *kind);
        if items.len() != DocumentKind::ALL.len() {
            return Err(AppError::ValidationError(missing.to_string()));
        }
        Ok(items)
    }

    Ok(match documents {
        SubmissionDocuments::Files(files) => SubmissionDocuments::Files(ordered(files, MSG_MISSING_FILES)?),
        SubmissionDocuments::Links(links) => SubmissionDocuments::Links(ordered(links, MSG_MISSING_LINKS)?),
    })
}

fn submission_failed(e: impl std::fmt::Display) -> AppError {
    AppError::Submission(format!("Submission failed: {}", e))
}
