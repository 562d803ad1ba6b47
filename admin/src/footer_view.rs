//! Footer link list as the admin console shows it.
//!
//! DESIGN
//! ======
//! A reorder is applied to the local list before the request is sent so the
//! screen updates immediately. If the server refuses, the view re-fetches the
//! authoritative list; if that also fails it restores the pre-reorder
//! snapshot. Only one reorder may be outstanding. A second one is refused with
//! [`AdminError::ReorderInFlight`] instead of racing the first.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use storefront::footer::{self, FooterLink, ReorderItem};

use crate::AdminError;
use crate::client::ApiClient;

/// The two footer-link calls the view needs. Enables mocking in tests.
#[async_trait]
pub trait FooterLinksApi: Send + Sync {
    async fn list_links(&self) -> Result<Vec<FooterLink>, AdminError>;
    async fn reorder_links(&self, items: &[ReorderItem]) -> Result<Vec<FooterLink>, AdminError>;
}

#[async_trait]
impl FooterLinksApi for ApiClient {
    async fn list_links(&self) -> Result<Vec<FooterLink>, AdminError> {
        self.footer_links().await
    }

    async fn reorder_links(&self, items: &[ReorderItem]) -> Result<Vec<FooterLink>, AdminError> {
        self.reorder_footer_links(items).await
    }
}

/// Clears the in-flight flag even if the reorder future is dropped.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct FooterLinksView<A> {
    api: A,
    links: Mutex<Vec<FooterLink>>,
    reorder_in_flight: AtomicBool,
}

impl<A: FooterLinksApi> FooterLinksView<A> {
    /// Load the current list from the server.
    ///
    /// # Errors
    ///
    /// Returns an error if the initial fetch fails.
    pub async fn load(api: A) -> Result<Self, AdminError> {
        let mut links = api.list_links().await?;
        footer::sort_links(&mut links);
        Ok(Self { api, links: Mutex::new(links), reorder_in_flight: AtomicBool::new(false) })
    }

    /// Snapshot of the list currently on screen.
    #[must_use]
    pub fn links(&self) -> Vec<FooterLink> {
        self.lock().clone()
    }

    #[must_use]
    pub fn reorder_in_flight(&self) -> bool {
        self.reorder_in_flight.load(Ordering::Acquire)
    }

    /// Replace the local list with the server's.
    ///
    /// # Errors
    ///
    /// Returns an error if the fetch fails; the local list is left as is.
    pub async fn refresh(&self) -> Result<(), AdminError> {
        let links = self.api.list_links().await?;
        self.replace(links);
        Ok(())
    }

    /// Apply `items` locally, then persist them.
    ///
    /// # Errors
    ///
    /// - [`AdminError::Invalid`] if `items` fails [`footer::validate_reorder`];
    ///   nothing changes locally.
    /// - [`AdminError::ReorderInFlight`] if another reorder has not finished.
    /// - The server's error if it refuses; the local list has been rolled back.
    pub async fn reorder(&self, items: &[ReorderItem]) -> Result<(), AdminError> {
        footer::validate_reorder(items).into_result().map_err(AdminError::Invalid)?;

        if self.reorder_in_flight.swap(true, Ordering::AcqRel) {
            return Err(AdminError::ReorderInFlight);
        }
        let _guard = InFlightGuard(&self.reorder_in_flight);

        let snapshot = {
            let mut links = self.lock();
            let snapshot = links.clone();
            footer::apply_reorder(&mut links, items);
            snapshot
        };

        match self.api.reorder_links(items).await {
            Ok(authoritative) => {
                self.replace(authoritative);
                Ok(())
            }
            Err(err) => {
                match self.api.list_links().await {
                    Ok(links) => self.replace(links),
                    Err(_) => *self.lock() = snapshot,
                }
                Err(err)
            }
        }
    }

    fn replace(&self, mut links: Vec<FooterLink>) {
        footer::sort_links(&mut links);
        *self.lock() = links;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<FooterLink>> {
        // A poisoned lock only means a panic elsewhere; the list itself is still whole.
        self.links.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[cfg(test)]
#[path = "footer_view_test.rs"]
mod tests;
