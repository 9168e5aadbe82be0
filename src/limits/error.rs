use thiserror::Error;

/// Fatal failures of the capability table pipeline.
#[derive(Debug, Error)]
pub enum LimitsError {
    #[error("failed to fetch {url}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error(transparent)]
    Parse(#[from] ParseError),
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("no table matching `{0}` found in the ENI limits document")]
    MissingTable(&'static str),
    #[error("pricing feed is not valid json")]
    Json(#[from] serde_json::Error),
    #[error("pricing feed has no `products` key")]
    MissingProducts,
    #[error("{field} for {type_id} is not a number: {value:?}")]
    InvalidNumber {
        type_id: String,
        field: &'static str,
        value: String,
    },
}
