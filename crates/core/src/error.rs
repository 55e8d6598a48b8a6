use crate::store::StoreError;

/// Reasons a route does not produce a content page.
///
/// Every variant except [`PageError::Store`] is a not-found outcome whose
/// `Display` text is the message shown to the reader. Empty results and
/// malformed parameters are both reported this way.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("Invalid Channel")]
    InvalidPostKey,

    #[error("Query is too short. Please try a longer query.")]
    QueryTooShort,

    #[error("Channel Not Found")]
    InvalidChannelKey,

    #[error("No Articles")]
    NoArticles,

    #[error("No Articles for query '{0}'")]
    NoSearchResults(String),

    #[error("Channel not found")]
    UnknownChannel,

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl PageError {
    pub fn is_not_found(&self) -> bool {
        !matches!(self, Self::Store(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(PageError::InvalidPostKey.to_string(), "Invalid Channel");
        assert_eq!(PageError::InvalidChannelKey.to_string(), "Channel Not Found");
        assert_eq!(PageError::UnknownChannel.to_string(), "Channel not found");
        assert_eq!(
            PageError::NoSearchResults("golangx".to_string()).to_string(),
            "No Articles for query 'golangx'"
        );
    }

    #[test]
    fn test_store_error_is_not_a_not_found() {
        let err = PageError::from(StoreError::backend(std::fmt::Error));
        assert!(!err.is_not_found());
        assert!(PageError::NoArticles.is_not_found());
    }
}
