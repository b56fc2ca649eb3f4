//! Reporting views.
//!
//! Every view returns at most [`REPORT_ROW_LIMIT`] rows, sorted descending by
//! its key. None of them require a particular role.

use super::{REPORT_ROW_LIMIT, Session};
use crate::db::Marketplace;
use crate::error::Result;
use crate::models::{CustomerActivity, Order, ProductPopularity, ProductUpdate};

/// Report service.
pub struct ReportService<'a> {
    db: &'a dyn Marketplace,
}

impl<'a> ReportService<'a> {
    /// Create a new report service.
    #[must_use]
    pub const fn new(db: &'a dyn Marketplace) -> Self {
        Self { db }
    }

    /// The acting user's most recent orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::DataAccess` if the query fails.
    pub async fn recent_orders(&self, session: &Session) -> Result<Vec<Order>> {
        Ok(self
            .db
            .recent_orders(session.user_id, REPORT_ROW_LIMIT)
            .await?)
    }

    /// Most recent product updates across all stores.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::DataAccess` if the query fails.
    pub async fn recent_updates(&self) -> Result<Vec<ProductUpdate>> {
        Ok(self.db.recent_product_updates(REPORT_ROW_LIMIT).await?)
    }

    /// Most ordered product names.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::DataAccess` if the query fails.
    pub async fn popular_products(&self) -> Result<Vec<ProductPopularity>> {
        Ok(self.db.popular_products(REPORT_ROW_LIMIT).await?)
    }

    /// Customers with the most orders.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::DataAccess` if the query fails.
    pub async fn popular_customers(&self) -> Result<Vec<CustomerActivity>> {
        Ok(self.db.popular_customers(REPORT_ROW_LIMIT).await?)
    }
}
