//! Manager and admin operations.
//!
//! Role checks run before any further prompt, so a customer choosing one of
//! these options is turned away without being asked for input.

use tokio::io::{AsyncBufRead, AsyncWrite};

use marketplace_core::{Price, ProductField, ResultTable, StoreId, UserField, UserId, WarehouseId};
use marketplace_service::services::{AdminService, InventoryService, Session};

use super::{Console, ConsoleError};

impl<R, W> Console<'_, R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub(super) async fn update_product(&mut self, session: &Session) -> Result<(), ConsoleError> {
        let inventory = InventoryService::new(self.market);
        inventory.authorize(session).await?;

        let store_id: StoreId = self.io.ask_parsed("Enter store ID").await?;
        let product_name = self.io.ask("Enter product name").await?;
        let price: Price = self.io.ask_parsed("Enter new price").await?;
        let units: i32 = self
            .io
            .ask_number("number of units", "Enter number of units")
            .await?;

        let product = inventory
            .update_product(session, store_id, product_name.trim(), units, price)
            .await?;

        self.io.say("\nProduct updated successfully!\n").await?;
        self.io
            .table(&ResultTable::from_rows(std::slice::from_ref(&product)))
            .await
    }

    pub(super) async fn place_supply_request(
        &mut self,
        session: &Session,
    ) -> Result<(), ConsoleError> {
        let inventory = InventoryService::new(self.market);
        inventory.authorize(session).await?;

        let store_id: StoreId = self.io.ask_parsed("Enter store ID").await?;
        let product_name = self.io.ask("Enter product name").await?;
        let units: i32 = self.io.ask_number("quantity", "Enter quantity").await?;
        let warehouse_id: WarehouseId = self.io.ask_parsed("Enter warehouse ID").await?;

        let receipt = inventory
            .place_supply_request(session, store_id, product_name.trim(), units, warehouse_id)
            .await?;

        let remaining = receipt
            .remaining_units
            .map_or_else(|| "product not stocked".to_owned(), |u| format!("{u} units left"));
        self.io
            .say(&format!(
                "\nSupply request {} placed successfully! ({remaining})\n",
                receipt.request.number
            ))
            .await
    }

    pub(super) async fn admin_override(&mut self, session: &Session) -> Result<(), ConsoleError> {
        let admin = AdminService::new(self.market);
        admin.authorize(session).await?;

        let user_id: UserId = self.io.ask_parsed("Enter user ID").await?;
        let user_field: UserField = self
            .io
            .ask_parsed(&column_prompt(UserField::ALL.iter().map(UserField::column)))
            .await?;
        let user_update = user_field.parse_value(&self.io.ask("Enter new value").await?)?;

        let store_id: StoreId = self.io.ask_parsed("Enter store ID").await?;
        let product_name = self.io.ask("Enter product name").await?;
        let product_field: ProductField = self
            .io
            .ask_parsed(&column_prompt(ProductField::ALL.iter().map(ProductField::column)))
            .await?;
        let product_update = product_field.parse_value(&self.io.ask("Enter new value").await?)?;

        let (user, product) = admin
            .apply_override(
                session,
                user_id,
                &user_update,
                store_id,
                product_name.trim(),
                &product_update,
            )
            .await?;

        self.io.table(&ResultTable::from_rows(&[user])).await?;
        self.io.table(&ResultTable::from_rows(&[product])).await?;
        self.io
            .say("\nAdmin operations completed successfully.\n")
            .await
    }
}

fn column_prompt<'c>(columns: impl Iterator<Item = &'c str>) -> String {
    format!(
        "Enter column to update ({})",
        columns.collect::<Vec<_>>().join(", ")
    )
}
