//! Cart store extractor.
//!
//! Handlers never reach into the session themselves. They take a
//! [`SessionCart`], mutate the [`CartStore`] it derefs to, and call
//! [`SessionCart::save`] before responding.

use std::ops::{Deref, DerefMut};

use axum::{extract::FromRequestParts, http::request::Parts};
use eternal_roses_core::CartStore;
use tower_sessions::Session;

use crate::error::AppError;
use crate::models::session_keys;
use crate::state::AppState;

/// The current shopper's cart store, loaded from the session.
///
/// A session without a stored cart (or with one that no longer
/// deserializes) starts from an empty store priced in the catalog currency.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(mut cart: SessionCart) -> Result<impl IntoResponse> {
///     cart.clear();
///     cart.save().await?;
///     Ok(StatusCode::NO_CONTENT)
/// }
/// ```
pub struct SessionCart {
    session: Session,
    store: CartStore,
}

impl SessionCart {
    /// Write the cart store back to the session.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Session` if the session store rejects the write.
    pub async fn save(&self) -> Result<(), AppError> {
        self.session
            .insert(session_keys::CART_STORE, &self.store)
            .await?;
        Ok(())
    }

    #[must_use]
    pub const fn store(&self) -> &CartStore {
        &self.store
    }
}

impl Deref for SessionCart {
    type Target = CartStore;

    fn deref(&self) -> &Self::Target {
        &self.store
    }
}

impl DerefMut for SessionCart {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.store
    }
}

impl FromRequestParts<AppState> for SessionCart {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Set by SessionManagerLayer
        let session = parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or_else(|| AppError::Internal("session layer is not installed".to_string()))?;

        let store = match session.get::<CartStore>(session_keys::CART_STORE).await {
            Ok(Some(store)) => store,
            Ok(None) => state.empty_cart_store(),
            Err(e) => {
                tracing::warn!(error = %e, "Discarding unreadable cart store");
                state.empty_cart_store()
            }
        };

        Ok(Self { session, store })
    }
}
