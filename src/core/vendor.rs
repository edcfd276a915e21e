//! Vendor application business logic - submission, documents and review history.
//!
//! Document uploads are a side channel: they are recorded against an application
//! whatever its status and never pass through the workflow engine.

use crate::{
    core::{clock, status::EntityType},
    entities::{
        ApplicationStatus, VendorApplication, VendorDocument, VendorReviewEvent,
        vendor_application, vendor_document, vendor_review_event,
    },
    errors::{Error, Result},
};
use sea_orm::{PaginatorTrait, QueryOrder, Set, prelude::*};
use tracing::{debug, info};

/// Fields supplied by the vendor sign-up form
#[derive(Clone, Debug)]
pub struct NewApplication {
    /// User ID of the applicant
    pub user_id: String,
    pub company_name: String,
    pub contact_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub business_description: Option<String>,
}

/// Metadata for a document already stored in blob storage
#[derive(Clone, Debug)]
pub struct NewDocument {
    pub file_name: String,
    pub file_size: i64,
    pub file_type: String,
    pub storage_path: String,
}

/// Creates a new vendor application in `pending`.
pub async fn submit_application<C>(
    db: &C,
    application: NewApplication,
) -> Result<vendor_application::Model>
where
    C: ConnectionTrait,
{
    if application.company_name.trim().is_empty() {
        return Err(Error::InvalidInput {
            message: "Company name cannot be empty".to_string(),
        });
    }
    if application.contact_name.trim().is_empty() {
        return Err(Error::InvalidInput {
            message: "Contact name cannot be empty".to_string(),
        });
    }
    if !application.email.contains('@') {
        return Err(Error::InvalidInput {
            message: format!("Invalid email address '{}'", application.email),
        });
    }

    let now = clock::now();
    let model = vendor_application::ActiveModel {
        user_id: Set(application.user_id),
        company_name: Set(application.company_name.trim().to_string()),
        contact_name: Set(application.contact_name.trim().to_string()),
        email: Set(application.email.trim().to_string()),
        phone: Set(application.phone),
        business_description: Set(application.business_description),
        status: Set(ApplicationStatus::Pending),
        review_notes: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let created = model.insert(db).await?;
    info!(application_id = created.id, company = %created.company_name, "Vendor application submitted");
    Ok(created)
}

/// Finds a vendor application by its unique ID.
pub async fn get_application<C>(
    db: &C,
    application_id: i64,
) -> Result<Option<vendor_application::Model>>
where
    C: ConnectionTrait,
{
    VendorApplication::find_by_id(application_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Records a supporting document against an application.
///
/// Allowed in every status, including terminal ones.
pub async fn attach_document<C>(
    db: &C,
    application_id: i64,
    document: NewDocument,
) -> Result<vendor_document::Model>
where
    C: ConnectionTrait,
{
    if document.file_name.trim().is_empty() {
        return Err(Error::InvalidInput {
            message: "Document file name cannot be empty".to_string(),
        });
    }
    if document.file_size < 0 {
        return Err(Error::InvalidInput {
            message: format!("Invalid document size {}", document.file_size),
        });
    }

    VendorApplication::find_by_id(application_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: EntityType::VendorApplication,
            entity_id: application_id,
        })?;

    let model = vendor_document::ActiveModel {
        application_id: Set(application_id),
        file_name: Set(document.file_name),
        file_size: Set(document.file_size),
        file_type: Set(document.file_type),
        storage_path: Set(document.storage_path),
        uploaded_at: Set(clock::now()),
        ..Default::default()
    };

    let created = model.insert(db).await?;
    debug!(application_id, document_id = created.id, "Vendor document attached");
    Ok(created)
}

/// Lists the documents attached to an application in upload order.
pub async fn list_documents<C>(db: &C, application_id: i64) -> Result<Vec<vendor_document::Model>>
where
    C: ConnectionTrait,
{
    VendorDocument::find()
        .filter(vendor_document::Column::ApplicationId.eq(application_id))
        .order_by_asc(vendor_document::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Whether any document has been attached to the application.
pub async fn has_documents<C>(db: &C, application_id: i64) -> Result<bool>
where
    C: ConnectionTrait,
{
    let count = VendorDocument::find()
        .filter(vendor_document::Column::ApplicationId.eq(application_id))
        .count(db)
        .await?;
    Ok(count > 0)
}

/// Retrieves the review trail of an application in the order the transitions happened.
pub async fn review_history<C>(
    db: &C,
    application_id: i64,
) -> Result<Vec<vendor_review_event::Model>>
where
    C: ConnectionTrait,
{
    VendorReviewEvent::find()
        .filter(vendor_review_event::Column::ApplicationId.eq(application_id))
        .order_by_asc(vendor_review_event::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn spec_sheet() -> NewDocument {
        NewDocument {
            file_name: "iso9001.pdf".to_string(),
            file_size: 48_213,
            file_type: "application/pdf".to_string(),
            storage_path: "vendor-docs/iso9001.pdf".to_string(),
        }
    }

    #[tokio::test]
    async fn test_submit_application_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let result = submit_application(
            &db,
            NewApplication {
                user_id: "vendor-1".to_string(),
                company_name: " ".to_string(),
                contact_name: "Dana".to_string(),
                email: "dana@example.com".to_string(),
                phone: None,
                business_description: None,
            },
        )
        .await;
        assert!(matches!(result, Err(Error::InvalidInput { .. })));

        let result = submit_application(
            &db,
            NewApplication {
                user_id: "vendor-1".to_string(),
                company_name: "Acme Machining".to_string(),
                contact_name: "Dana".to_string(),
                email: "not-an-email".to_string(),
                phone: None,
                business_description: None,
            },
        )
        .await;
        assert!(matches!(result, Err(Error::InvalidInput { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_submit_application_starts_pending() -> Result<()> {
        let db = setup_test_db().await?;
        let application = create_test_application(&db, "vendor-1").await?;

        assert_eq!(application.status, ApplicationStatus::Pending);
        assert!(application.review_notes.is_none());

        let fetched = get_application(&db, application.id).await?.unwrap();
        assert_eq!(fetched, application);
        Ok(())
    }

    #[tokio::test]
    async fn test_attach_document_to_missing_application() -> Result<()> {
        let db = setup_test_db().await?;
        let result = attach_document(&db, 404, spec_sheet()).await;
        assert!(matches!(
            result,
            Err(Error::NotFound {
                entity: EntityType::VendorApplication,
                entity_id: 404
            })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_documents_are_independent_of_status() -> Result<()> {
        let db = setup_test_db().await?;
        let application = create_test_application(&db, "vendor-1").await?;
        assert!(!has_documents(&db, application.id).await?);

        attach_document(&db, application.id, spec_sheet()).await?;
        drive_application(
            &db,
            application.id,
            &[ApplicationStatus::UnderReview, ApplicationStatus::Rejected],
        )
        .await?;

        // Still accepted after the application reached a terminal status
        let mut late = spec_sheet();
        late.file_name = "insurance.pdf".to_string();
        attach_document(&db, application.id, late).await?;

        let documents = list_documents(&db, application.id).await?;
        assert_eq!(documents.len(), 2);
        assert_eq!(documents[0].file_name, "iso9001.pdf");
        assert_eq!(documents[1].file_name, "insurance.pdf");
        assert!(has_documents(&db, application.id).await?);

        // Uploading did not touch the application row
        let after = get_application(&db, application.id).await?.unwrap();
        assert_eq!(after.status, ApplicationStatus::Rejected);
        Ok(())
    }

    #[tokio::test]
    async fn test_review_history() -> Result<()> {
        let db = setup_test_db().await?;
        let application = create_test_application(&db, "vendor-1").await?;
        drive_application(
            &db,
            application.id,
            &[
                ApplicationStatus::UnderReview,
                ApplicationStatus::Pending,
                ApplicationStatus::UnderReview,
            ],
        )
        .await?;

        let history = review_history(&db, application.id).await?;
        assert_eq!(history.len(), 3);
        assert_eq!(history[1].from_status, ApplicationStatus::UnderReview);
        assert_eq!(history[1].to_status, ApplicationStatus::Pending);
        assert!(history.iter().all(|e| e.actor_id == TEST_ADMIN_ID));
        Ok(())
    }
}
