use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("Unsupported locale: {input}")]
    UnsupportedLocale { input: String },

    #[error("{0}")]
    Store(#[from] StoreError),

    #[error("{0}")]
    Form(#[from] FormError),

    #[error("{}", .0.message())]
    Image(#[from] ImageRejection),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures reported by a record store backend
#[derive(Debug, Error)]
pub(crate) enum StoreError {
    #[error("No record store configured (set --url/SUPABASE_URL or --data-dir)")]
    NotConfigured,

    #[error("Missing API key for {url} (set --api-key or SUPABASE_ANON_KEY)")]
    MissingApiKey { url: String },

    #[error("Failed to fetch {table}: {reason}")]
    Fetch { table: String, reason: String },

    #[error("Failed to decode {table}: {reason}")]
    Decode { table: String, reason: String },

    #[error("Failed to insert into {table}: {reason}")]
    Write { table: String, reason: String },
}

#[derive(Debug, Error)]
pub(crate) enum FormError {
    #[error("Invalid date \"{input}\" for {field} (expected YYYYMMDD or YYYY-MM-DD)")]
    InvalidDate { field: &'static str, input: String },

    #[error("Invalid budget \"{input}\" (expected a number)")]
    InvalidBudget { input: String },

    #[error("Invalid status \"{input}\" (expected planning, in-progress, on-hold, or completed)")]
    InvalidStatus { input: String },

    #[error("Missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("Invalid form file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Reason an image attachment was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub(crate) enum ImageRejection {
    #[error("unsupported type")]
    UnsupportedType,

    #[error("too large")]
    TooLarge,
}

impl ImageRejection {
    /// Message shown to the person submitting the form
    pub(crate) fn message(self) -> &'static str {
        match self {
            ImageRejection::UnsupportedType => "Please upload a valid image (JPG, PNG, or WebP)",
            ImageRejection::TooLarge => "Image size must be less than 10MB",
        }
    }
}
