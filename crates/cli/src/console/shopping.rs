//! Customer operations: nearby stores, product lists, orders.

use tokio::io::{AsyncBufRead, AsyncWrite};

use marketplace_core::{ResultTable, StoreId};
use marketplace_service::services::{CatalogService, OrderingService, ReportService, Session};

use super::{Console, ConsoleError};

impl<R, W> Console<'_, R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub(super) async fn view_stores(&mut self, session: &Session) -> Result<(), ConsoleError> {
        let stores = CatalogService::new(self.market)
            .nearby_stores(session)
            .await?;

        self.io.say("Stores within 30 miles:\n").await?;
        self.io.table(&ResultTable::from_rows(&stores)).await
    }

    pub(super) async fn view_products(&mut self) -> Result<(), ConsoleError> {
        let store_id: StoreId = self.io.ask_parsed("Enter store ID").await?;
        let products = CatalogService::new(self.market).products(store_id).await?;
        self.io.table(&ResultTable::from_rows(&products)).await
    }

    pub(super) async fn place_order(&mut self, session: &Session) -> Result<(), ConsoleError> {
        let store_id: StoreId = self.io.ask_parsed("Enter store ID").await?;
        let product_name = self.io.ask("Enter product name").await?;
        let units: i32 = self
            .io
            .ask_number("number of units", "Enter number of units")
            .await?;

        let order = OrderingService::new(self.market)
            .place_order(session, store_id, product_name.trim(), units)
            .await?;

        self.io
            .say(&format!("\nOrder {} placed successfully!\n", order.number))
            .await
    }

    pub(super) async fn view_recent_orders(
        &mut self,
        session: &Session,
    ) -> Result<(), ConsoleError> {
        let orders = ReportService::new(self.market).recent_orders(session).await?;
        self.io.table(&ResultTable::from_rows(&orders)).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::console::test_support::{market, session_output};

    const LOGIN: &str = "2\nalice\npw\n";

    #[tokio::test]
    async fn test_view_stores_lists_only_near() {
        let db = market();
        let out = session_output(&db, &format!("{LOGIN}1\n20\n9\n")).await;

        assert!(out.contains("Stores within 30 miles:"));
        assert!(out.contains("1\tNear\t20.00\t"));
        assert!(!out.contains("Far"));
    }

    #[tokio::test]
    async fn test_view_products() {
        let db = market();
        let out = session_output(&db, &format!("{LOGIN}2\n1\n20\n9\n")).await;

        assert!(out.contains("storeID\tproductName\tnumberOfUnits\tpricePerUnit\t"));
        assert!(out.contains("1\tWidget\t10\t2.50\t"));
        assert!(out.contains("total row(s): 1"));
    }

    #[tokio::test]
    async fn test_view_products_bad_store_id() {
        let db = market();
        let out = session_output(&db, &format!("{LOGIN}2\nabc\n20\n9\n")).await;
        assert!(out.contains("'abc' is not a number"));
    }

    #[tokio::test]
    async fn test_place_order_near_and_far() {
        let db = market();
        let out = session_output(
            &db,
            &format!("{LOGIN}3\n1\nWidget\n2\n3\n2\nWidget\n1\n4\n20\n9\n"),
        )
        .await;

        assert!(out.contains("Order 1 placed successfully!"));
        assert!(out.contains("store is 40.00 miles away"));
        assert!(out.contains("orderNumber\tcustomerID"));
        assert_eq!(db.orders().await.len(), 1);
    }

    #[tokio::test]
    async fn test_place_order_bad_units() {
        let db = market();
        let out = session_output(&db, &format!("{LOGIN}3\n1\nWidget\nmany\n20\n9\n")).await;

        assert!(out.contains("invalid number of units: 'many' is not a number"));
        assert!(db.orders().await.is_empty());
    }
}
