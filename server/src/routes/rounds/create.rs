use actix_identity::Identity;
use actix_web::{
    web::{block, Data, Json},
    Result,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use auth::get_claim_from_identity;
use db::{get_conn, models::Round, PgPool};
use errors::Error;

use crate::uploads::Storage;
use crate::validate::validate;

#[derive(Clone, Deserialize, Serialize)]
pub struct AttachmentUpload {
    pub file_name: String,
    /// base64-encoded payload
    pub data: String,
}

#[derive(Clone, Deserialize, Serialize, Validate)]
pub struct CreateRoundRequest {
    #[validate(length(min = "1", max = "200"))]
    title: String,
    #[validate(length(min = "1", max = "50"))]
    round_label: String,
    attachment: Option<AttachmentUpload>,
}

pub async fn create(
    id: Identity,
    pool: Data<PgPool>,
    params: Json<CreateRoundRequest>,
) -> Result<Json<Round>, Error> {
    validate(&params)?;

    let (claim, _) = get_claim_from_identity(id)?;
    let conn = get_conn(&pool)?;

    let res = block(move || {
        let attachment_path = match &params.attachment {
            Some(upload) => store_attachment(upload)?,
            None => None,
        };

        Round::create(
            &conn,
            &params.title,
            params.round_label.clone(),
            claim.id,
            attachment_path,
        )
    })
    .await?;

    let round = res?;

    Ok(Json(round))
}

// A rejected attachment never fails the round; it is logged and dropped.
fn store_attachment(upload: &AttachmentUpload) -> Result<Option<String>, Error> {
    let storage = Storage::from_config();

    if !storage.allowed_file(&upload.file_name) {
        warn!(
            "attachment \"{}\" has a disallowed extension, skipping",
            upload.file_name
        );
        return Ok(None);
    }

    let data = match base64::decode(&upload.data) {
        Ok(data) => data,
        Err(_) => {
            warn!(
                "attachment \"{}\" is not valid base64, skipping",
                upload.file_name
            );
            return Ok(None);
        }
    };

    let stored_name = storage.store(&upload.file_name, &data)?;

    Ok(Some(stored_name))
}
