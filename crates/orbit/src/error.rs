use crate::item::ItemId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("duplicate item id {0}")]
    DuplicateId(ItemId),
    #[error("invalid setting `{field}`: {reason}")]
    InvalidSetting {
        field: &'static str,
        reason: &'static str,
    },
}
