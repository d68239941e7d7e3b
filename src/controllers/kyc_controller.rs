use std::str::FromStr;

use crate::dto::kyc_dto::{KycLinkRequest, KycStatusResponse, KycSubmitResponse};
use crate::models::{DocumentKind, Identity, OperationalField, OperationalInfo, UploadMethod};
use crate::services::kyc_workflow::{AttachedFile, KycWizard, WizardAction};
use crate::services::KycService;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Formulario KYC completo tal como llega en una sola request
#[derive(Debug, Default)]
pub struct KycForm {
    pub method: UploadMethod,
    pub files: Vec<(DocumentKind, AttachedFile)>,
    pub links: Vec<(DocumentKind, String)>,
    pub operational: Vec<(OperationalField, String)>,
}

impl KycForm {
    /// Formulario por enlaces a partir del cuerpo JSON
    pub fn from_links(request: KycLinkRequest) -> Result<Self, AppError> {
        let mut links = Vec::with_capacity(request.documents.len());
        for (key, url) in request.documents {
            let kind = DocumentKind::from_str(&key).map_err(AppError::ValidationError)?;
            links.push((kind, url));
        }
        Ok(Self {
            method: request.method.unwrap_or(UploadMethod::Link),
            files: Vec::new(),
            links,
            operational: operational_pairs(request.operational_info),
        })
    }

    /// Secuencia de acciones equivalente al recorrido del asistente
    fn actions(self) -> Vec<WizardAction> {
        let mut actions = vec![WizardAction::SelectMethod(self.method)];
        actions.extend(
            self.files
                .into_iter()
                .map(|(kind, file)| WizardAction::AttachFile(kind, file)),
        );
        actions.extend(
            self.links
                .into_iter()
                .map(|(kind, url)| WizardAction::SetLink(kind, url)),
        );
        actions.push(WizardAction::Next);
        actions.extend(
            self.operational
                .into_iter()
                .map(|(field, value)| WizardAction::SetOperational(field, value)),
        );
        actions.push(WizardAction::Next);
        actions
    }
}

fn operational_pairs(info: OperationalInfo) -> Vec<(OperationalField, String)> {
    vec![
        (OperationalField::Services, info.services),
        (OperationalField::FleetDetails, info.fleet_details),
        (OperationalField::CoverageZones, info.coverage_zones),
        (OperationalField::PricingModel, info.pricing_model),
        (OperationalField::TrackingCapability, info.tracking_capability),
    ]
}

pub struct KycController {
    service: KycService,
    max_upload_bytes: usize,
}

impl KycController {
    pub fn new(state: &AppState) -> Self {
        Self {
            service: state.kyc(),
            max_upload_bytes: state.config.max_upload_bytes,
        }
    }

    /// Reproducir el formulario en el asistente y enviar
    pub async fn submit(&self, identity: &Identity, form: KycForm) -> Result<KycSubmitResponse, AppError> {
        let mut wizard = KycWizard::new(self.max_upload_bytes);
        for action in form.actions() {
            wizard.apply(action)?;
        }
        let submission = wizard.submission(Some(identity))?;
        let method = submission.documents.method();

        let mut progress = Vec::new();
        let account = self
            .service
            .submit(identity, submission, |percent| progress.push(percent))
            .await?;

        Ok(KycSubmitResponse {
            message: "KYC submitted successfully. Verification is pending.".to_string(),
            kyc_status: account.kyc_status(),
            document_upload_method: method,
            progress,
        })
    }

    pub async fn status(&self, identity: &Identity) -> Result<KycStatusResponse, AppError> {
        let account = self.service.account(identity).await?;
        Ok(KycStatusResponse {
            kyc_status: account.kyc_status(),
            document_upload_method: account.document_upload_method,
            kyc_submitted_at: account.kyc_submitted_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_link_form_accepts_both_key_styles() {
        let mut documents = BTreeMap::new();
        documents.insert("gst".to_string(), "https://a.io/gst".to_string());
        documents.insert("panCard".to_string(), "https://a.io/pan".to_string());
        let form = KycForm::from_links(KycLinkRequest {
            method: None,
            documents,
            operational_info: OperationalInfo::default(),
        })
        .unwrap();
        assert_eq!(form.method, UploadMethod::Link);
        assert_eq!(form.links.len(), 2);
    }

    #[test]
    fn test_link_form_rejects_unknown_document() {
        let mut documents = BTreeMap::new();
        documents.insert("passport".to_string(), "https://a.io/p".to_string());
        let result = KycForm::from_links(KycLinkRequest {
            documents,
            ..KycLinkRequest::default()
        });
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_method_selected_before_documents() {
        let form = KycForm {
            method: UploadMethod::Link,
            links: vec![(DocumentKind::Gst, "https://a.io/gst".into())],
            ..KycForm::default()
        };
        let actions = form.actions();
        assert!(matches!(actions[0], WizardAction::SelectMethod(UploadMethod::Link)));
        assert!(matches!(actions.last(), Some(WizardAction::Next)));
    }
}
