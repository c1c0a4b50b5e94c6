use postcard::Error as PostcardError;
use thiserror::Error;

use crate::RowId;

#[derive(Error, Debug)]
pub enum ColumnarError {
    #[error("row with id `{0}` does not exist")]
    RowNotFound(RowId),
    #[error("key {0} not found")]
    KeyNotFound(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("serialize error during size accounting")]
    SerializeError(#[from] PostcardError),
}

impl ColumnarError {
    pub(crate) fn key_not_found<Q: std::fmt::Debug + ?Sized>(key: &Q) -> Self {
        ColumnarError::KeyNotFound(format!("{:?}", key))
    }
}

#[cfg(test)]
mod test {
    use super::ColumnarError;

    #[test]
    fn key_not_found_message_quotes_once() {
        let err = ColumnarError::key_not_found("zz");
        assert_eq!(err.to_string(), r#"key "zz" not found"#);
        let err = ColumnarError::key_not_found(&7u32);
        assert_eq!(err.to_string(), "key 7 not found");
    }
}
