//! Type conversions for KeystoneError

use super::types::KeystoneError;
use sea_orm::DbErr;

impl From<DbErr> for KeystoneError {
    fn from(err: DbErr) -> Self {
        match err {
            DbErr::RecordNotFound(message) => KeystoneError::NotFound(message),
            other => KeystoneError::Database(other),
        }
    }
}
