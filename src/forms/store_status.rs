use serde::Deserialize;
use validator::Validate;

use crate::domain::store_status::UpdateStoreStatus;
use crate::forms::normalize_optional_text;

const MESSAGE_MAX_LEN: u64 = 512;

/// JSON payload accepted when updating the public open/closed banner.
#[derive(Debug, Deserialize, Validate)]
pub struct StoreStatusForm {
    pub is_open: bool,
    #[serde(default)]
    #[validate(length(max = MESSAGE_MAX_LEN))]
    pub message: Option<String>,
}

impl StoreStatusForm {
    pub fn into_update(self) -> Result<UpdateStoreStatus, validator::ValidationErrors> {
        self.validate()?;
        Ok(UpdateStoreStatus::new(
            self.is_open,
            normalize_optional_text(self.message),
        ))
    }
}
