//! Global reporting views.

use tokio::io::{AsyncBufRead, AsyncWrite};

use marketplace_core::ResultTable;
use marketplace_service::services::ReportService;

use super::{Console, ConsoleError};

impl<R, W> Console<'_, R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub(super) async fn view_recent_updates(&mut self) -> Result<(), ConsoleError> {
        let updates = ReportService::new(self.market).recent_updates().await?;
        self.io.table(&ResultTable::from_rows(&updates)).await
    }

    pub(super) async fn view_popular_products(&mut self) -> Result<(), ConsoleError> {
        let ranked = ReportService::new(self.market).popular_products().await?;
        self.io.table(&ResultTable::from_rows(&ranked)).await
    }

    pub(super) async fn view_popular_customers(&mut self) -> Result<(), ConsoleError> {
        let ranked = ReportService::new(self.market).popular_customers().await?;
        self.io.table(&ResultTable::from_rows(&ranked)).await
    }
}
