use thiserror::Error;

/// Internal issues indicating unexpected behavior & possible bugs
#[derive(Error, Debug)]
pub enum InternalError {
    /// Argon2 failed to produce a hash for a new password.
    ///
    /// Results in a 500 Internal Server Error with a generic message returned
    /// to client.
    #[error("Failed to hash password: {0}")]
    PasswordHash(String),

    /// Signing a JWT failed.
    #[error("Failed to sign JWT for user {user_id}: {source}")]
    JwtEncode {
        /// The user the token was issued for
        user_id: i32,
        /// The underlying signing error
        #[source]
        source: jsonwebtoken::errors::Error,
    },

    /// Image decoding or resizing failed for an accepted upload.
    #[error("Failed to process uploaded image: {0}")]
    ImageProcessing(#[from] image::ImageError),

    /// A blocking task panicked or was cancelled.
    #[error("Background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
